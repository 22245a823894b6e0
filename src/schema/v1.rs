use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnosis {
    pub category: i64,
    pub label: String,
    pub color: String,
    pub color_hex: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbabilityEntry {
    pub label: String,
    pub percent: f64,
    pub emphasized: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartSeriesPoint {
    pub label: String,
    pub percent: f64,
    pub color: String,
    pub color_hex: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chart {
    pub y_min: f64,
    pub y_max: f64,
    pub series: Vec<ChartSeriesPoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorRule {
    pub name: String,
    pub fired: bool,
    pub threshold: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeuroDxV1 {
    pub tool: String,
    pub version: String,
    pub schema_version: String,
    pub model: String,
    pub diagnosis: Diagnosis,
    pub probabilities: Vec<ProbabilityEntry>,
    pub chart: Chart,
    pub key_indicators: Vec<String>,
    pub indicator_rules: Vec<IndicatorRule>,
    pub warnings: Vec<String>,
    pub disclaimer: String,
}
