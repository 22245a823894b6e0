use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DxError {
    #[error("all fields must be completed before prediction; missing: {}", .missing.join(", "))]
    Validation { missing: Vec<String> },

    #[error("classifier unavailable: {0}")]
    ClassifierUnavailable(String),

    #[error("classifier returned unknown category {0} (expected 1, 2 or 3)")]
    UnknownCategory(i64),

    #[error("no prediction available; submit the form first")]
    MissingPredictionContext,
}

impl DxError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::ClassifierUnavailable(reason.into())
    }
}
