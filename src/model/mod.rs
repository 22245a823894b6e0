use std::fmt;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::error::DxError;
use crate::features::FeatureVector;

pub mod forest;

pub use forest::ForestClassifier;

pub const PROBABILITY_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    CognitivelyNormal,
    Mci,
    Dementia,
}

impl Category {
    pub const ALL: [Category; 3] = [
        Category::CognitivelyNormal,
        Category::Mci,
        Category::Dementia,
    ];

    pub fn from_code(code: i64) -> Result<Self, DxError> {
        match code {
            1 => Ok(Category::CognitivelyNormal),
            2 => Ok(Category::Mci),
            3 => Ok(Category::Dementia),
            other => Err(DxError::UnknownCategory(other)),
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            Category::CognitivelyNormal => 1,
            Category::Mci => 2,
            Category::Dementia => 3,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub category: Category,
    pub probabilities: [f64; 3],
}

/// Anything that can score a feature vector: a serialized forest, a rule
/// table, a remote service. Implementations are loaded once and shared
/// read-only.
pub trait Classifier: Send + Sync {
    fn name(&self) -> &str;

    /// Raw category code as the model emits it.
    fn predict(&self, features: &FeatureVector) -> Result<i64>;

    /// Class probabilities, index 0 = category 1.
    fn predict_proba(&self, features: &FeatureVector) -> Result<Vec<f64>>;
}

/// Single synchronous attempt against the classifier, checking its output
/// contract before anything downstream sees it.
pub fn classify(classifier: &dyn Classifier, features: &FeatureVector) -> Result<PredictionResult> {
    let code = classifier.predict(features).map_err(unavailable)?;
    let category = Category::from_code(code)?;

    let raw = classifier.predict_proba(features).map_err(unavailable)?;
    let probabilities = check_probabilities(&raw)?;

    Ok(PredictionResult {
        category,
        probabilities,
    })
}

fn check_probabilities(raw: &[f64]) -> Result<[f64; 3], DxError> {
    let probabilities: [f64; 3] = raw.try_into().map_err(|_| {
        DxError::unavailable(format!("expected 3 class probabilities, got {}", raw.len()))
    })?;
    if probabilities.iter().any(|p| !p.is_finite() || *p < 0.0) {
        return Err(DxError::unavailable(format!(
            "invalid class probabilities {:?}",
            probabilities
        )));
    }
    let sum: f64 = probabilities.iter().sum();
    if (sum - 1.0).abs() > PROBABILITY_TOLERANCE {
        return Err(DxError::unavailable(format!(
            "class probabilities sum to {:.6}, expected 1",
            sum
        )));
    }
    Ok(probabilities)
}

fn unavailable(err: anyhow::Error) -> anyhow::Error {
    if err.downcast_ref::<DxError>().is_some() {
        err
    } else {
        DxError::unavailable(format!("{:#}", err)).into()
    }
}
