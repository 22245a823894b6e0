use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::features::FeatureVector;
use crate::indicators::{IndicatorInputs, KeyIndicator};
use crate::input::RawInput;
use crate::model::PredictionResult;
use crate::present::DiagnosisPresentation;
use crate::schema::v1::NeuroDxV1;
use crate::validate::ValidationResult;

/// What the submission step hands to the summary step: the prediction plus
/// the four raw values the indicator rules read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionHandoff {
    pub model: String,
    pub result: PredictionResult,
    pub inputs: IndicatorInputs,
}

/// Per-submission state threaded explicitly through both pipelines. Created
/// fresh for every submission and dropped when the summary is rendered.
#[derive(Debug)]
pub struct SubmissionContext {
    pub input: RawInput,
    pub json_path: Option<PathBuf>,
    pub validation: Option<ValidationResult>,
    pub features: Option<FeatureVector>,
    pub handoff: Option<PredictionHandoff>,
    pub presentation: Option<DiagnosisPresentation>,
    pub indicators: Vec<KeyIndicator>,
    pub warnings: Vec<String>,
    pub report: Option<NeuroDxV1>,
}

impl SubmissionContext {
    pub fn new(input: RawInput, json_path: Option<PathBuf>) -> Self {
        Self {
            input,
            json_path,
            validation: None,
            features: None,
            handoff: None,
            presentation: None,
            indicators: Vec::new(),
            warnings: Vec::new(),
            report: None,
        }
    }

    /// Fired indicator messages in rule order.
    pub fn key_indicators(&self) -> Vec<String> {
        self.indicators
            .iter()
            .filter(|i| i.fired)
            .map(|i| i.message.clone())
            .collect()
    }
}
