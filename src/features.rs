use serde::{Deserialize, Serialize};

use crate::input::RawInput;

/// Column names and order of the trained classifier's input frame.
pub const FEATURE_NAMES: [&str; 12] = [
    "MMSCORE",
    "MOCA",
    "AGE",
    "EDUCATION_YEARS",
    "hippocampus_norm_vol",
    "amygdala_norm_vol",
    "temporal_pole_norm_vol",
    "brainstem_norm_vol",
    "precentral_thick",
    "superior_frontal_thick",
    "insula_thick",
    "GENDER",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Number(f64),
    Text(String),
}

impl FeatureValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FeatureValue::Number(v) => Some(*v),
            FeatureValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FeatureValue::Number(_) => None,
            FeatureValue::Text(s) => Some(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    entries: Vec<(String, FeatureValue)>,
}

impl FeatureVector {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&FeatureValue> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }
}

/// Renames form fields to the classifier schema. Values pass through untouched.
pub fn build(input: &RawInput) -> FeatureVector {
    let values = [
        FeatureValue::Number(f64::from(input.mmse)),
        FeatureValue::Number(f64::from(input.moca)),
        FeatureValue::Number(f64::from(input.age)),
        FeatureValue::Number(f64::from(input.education_years)),
        FeatureValue::Number(input.hippocampus_norm_vol),
        FeatureValue::Number(input.amygdala_norm_vol),
        FeatureValue::Number(input.temporal_pole_norm_vol),
        FeatureValue::Number(input.brainstem_norm_vol),
        FeatureValue::Number(input.precentral_thick),
        FeatureValue::Number(input.superior_frontal_thick),
        FeatureValue::Number(input.insula_thick),
        FeatureValue::Text(input.gender.as_str().to_string()),
    ];
    let entries = FEATURE_NAMES
        .iter()
        .zip(values)
        .map(|(name, value)| ((*name).to_string(), value))
        .collect();
    FeatureVector { entries }
}
