use serde::{Deserialize, Serialize};

use crate::input::RawInput;

const LOW_MMSE_THRESHOLD: u32 = 24;
const LOW_MOCA_THRESHOLD: u32 = 26;
const HIPPOCAMPUS_VOL_THRESHOLD: f64 = 0.003;
const PRECENTRAL_THICK_THRESHOLD: f64 = 2.3;

/// Rendered by callers when no rule fires.
pub const NO_INDICATORS_MESSAGE: &str = "No significant abnormal indicators detected.";

/// The subset of a submission the indicator rules read. Carried alongside the
/// prediction so the summary never needs the full form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorInputs {
    pub mmse: u32,
    pub moca: u32,
    pub hippocampus_norm_vol: f64,
    pub precentral_thick: f64,
}

impl From<&RawInput> for IndicatorInputs {
    fn from(input: &RawInput) -> Self {
        Self {
            mmse: input.mmse,
            moca: input.moca,
            hippocampus_norm_vol: input.hippocampus_norm_vol,
            precentral_thick: input.precentral_thick,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyIndicator {
    pub name: String,
    pub fired: bool,
    pub threshold: String,
    pub message: String,
}

/// Evaluates every rule in fixed order; each fires independently.
pub fn evaluate_indicators(inputs: &IndicatorInputs) -> Vec<KeyIndicator> {
    vec![
        KeyIndicator {
            name: "low_mmse".to_string(),
            fired: inputs.mmse < LOW_MMSE_THRESHOLD,
            threshold: format!("MMSCORE < {}", LOW_MMSE_THRESHOLD),
            message: format!("Low MMSE score (<{})", LOW_MMSE_THRESHOLD),
        },
        KeyIndicator {
            name: "low_moca".to_string(),
            fired: inputs.moca < LOW_MOCA_THRESHOLD,
            threshold: format!("MOCA < {}", LOW_MOCA_THRESHOLD),
            message: format!("Low MOCA score (<{})", LOW_MOCA_THRESHOLD),
        },
        KeyIndicator {
            name: "reduced_hippocampal_volume".to_string(),
            fired: inputs.hippocampus_norm_vol < HIPPOCAMPUS_VOL_THRESHOLD,
            threshold: format!("hippocampus_norm_vol < {}", HIPPOCAMPUS_VOL_THRESHOLD),
            message: "Reduced hippocampal volume".to_string(),
        },
        KeyIndicator {
            name: "reduced_cortical_thickness".to_string(),
            fired: inputs.precentral_thick < PRECENTRAL_THICK_THRESHOLD,
            threshold: format!("precentral_thick < {}", PRECENTRAL_THICK_THRESHOLD),
            message: "Reduced cortical thickness".to_string(),
        },
    ]
}

/// Messages of the rules that fired, in evaluation order. Empty when nothing
/// is abnormal; the fallback text is the caller's choice.
pub fn derive_indicators(inputs: &IndicatorInputs) -> Vec<String> {
    evaluate_indicators(inputs)
        .into_iter()
        .filter(|i| i.fired)
        .map(|i| i.message)
        .collect()
}
