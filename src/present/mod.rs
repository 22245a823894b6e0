use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DxError;
use crate::model::{Category, PredictionResult};

pub const CHART_Y_MIN: f64 = 0.0;
pub const CHART_Y_MAX: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityColor {
    Green,
    Yellow,
    Red,
}

impl SeverityColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeverityColor::Green => "green",
            SeverityColor::Yellow => "yellow",
            SeverityColor::Red => "red",
        }
    }

    pub fn hex(&self) -> &'static str {
        match self {
            SeverityColor::Green => "#2ecc71",
            SeverityColor::Yellow => "#f1c40f",
            SeverityColor::Red => "#e74c3c",
        }
    }
}

impl fmt::Display for SeverityColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedProbability {
    pub label: String,
    pub percent: f64,
    pub emphasized: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub percent: f64,
    pub color: SeverityColor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisPresentation {
    pub category: Category,
    pub label: String,
    pub color: SeverityColor,
    /// Always in category order, never sorted by probability.
    pub ranked_probabilities: Vec<RankedProbability>,
    pub chart_series: Vec<ChartPoint>,
}

pub fn diagnosis_label(category: Category) -> &'static str {
    match category {
        Category::CognitivelyNormal => "Cognitively Normal",
        Category::Mci => "Mild Cognitive Impairment (MCI)",
        Category::Dementia => "Dementia",
    }
}

pub fn short_label(category: Category) -> &'static str {
    match category {
        Category::CognitivelyNormal => "Cognitively Normal",
        Category::Mci => "MCI",
        Category::Dementia => "Dementia",
    }
}

pub fn severity_color(category: Category) -> SeverityColor {
    match category {
        Category::CognitivelyNormal => SeverityColor::Green,
        Category::Mci => SeverityColor::Yellow,
        Category::Dementia => SeverityColor::Red,
    }
}

/// Probability as a percentage rounded to one decimal place, ties to even.
pub fn to_percent(probability: f64) -> f64 {
    (probability * 100.0 * 10.0).round_ties_even() / 10.0
}

/// Maps a raw category code and its probability triple to display data.
/// Codes outside 1..=3 are rejected, never defaulted.
pub fn present(category: i64, probabilities: &[f64; 3]) -> Result<DiagnosisPresentation, DxError> {
    let category = Category::from_code(category)?;
    Ok(present_category(category, probabilities))
}

pub fn present_prediction(result: &PredictionResult) -> DiagnosisPresentation {
    present_category(result.category, &result.probabilities)
}

fn present_category(category: Category, probabilities: &[f64; 3]) -> DiagnosisPresentation {
    let percents: Vec<f64> = probabilities.iter().map(|p| to_percent(*p)).collect();
    let max = percents.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let ranked_probabilities = Category::ALL
        .iter()
        .zip(&percents)
        .map(|(c, pct)| RankedProbability {
            label: short_label(*c).to_string(),
            percent: *pct,
            emphasized: *pct == max,
        })
        .collect();

    let chart_series = Category::ALL
        .iter()
        .zip(&percents)
        .map(|(c, pct)| ChartPoint {
            label: short_label(*c).to_string(),
            percent: *pct,
            color: severity_color(*c),
        })
        .collect();

    DiagnosisPresentation {
        category,
        label: diagnosis_label(category).to_string(),
        color: severity_color(category),
        ranked_probabilities,
        chart_series,
    }
}
