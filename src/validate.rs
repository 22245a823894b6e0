use crate::error::DxError;
use crate::input::RawInput;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid { missing: Vec<String> },
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    pub fn missing(&self) -> &[String] {
        match self {
            ValidationResult::Valid => &[],
            ValidationResult::Invalid { missing } => missing.as_slice(),
        }
    }

    pub fn into_result(self) -> Result<(), DxError> {
        match self {
            ValidationResult::Valid => Ok(()),
            ValidationResult::Invalid { missing } => Err(DxError::Validation { missing }),
        }
    }
}

/// Flags every numeric field still holding the zero sentinel. Gender always
/// carries a selection and is never reported.
pub fn validate(input: &RawInput) -> ValidationResult {
    // Zero is indistinguishable from "not entered", even where it is plausible.
    let missing: Vec<String> = input
        .numeric_fields()
        .iter()
        .filter(|(_, value)| *value == 0.0)
        .map(|(name, _)| (*name).to_string())
        .collect();

    if missing.is_empty() {
        ValidationResult::Valid
    } else {
        ValidationResult::Invalid { missing }
    }
}

const TYPICAL_THICKNESS_MM: (f64, f64) = (2.0, 3.5);

/// Non-blocking hints for values that look like unit mistakes.
pub fn plausibility_warnings(input: &RawInput) -> Vec<String> {
    let mut warnings = Vec::new();
    let volumes = [
        ("hippocampus_norm_vol", input.hippocampus_norm_vol),
        ("amygdala_norm_vol", input.amygdala_norm_vol),
        ("temporal_pole_norm_vol", input.temporal_pole_norm_vol),
        ("brainstem_norm_vol", input.brainstem_norm_vol),
    ];
    for (name, value) in volumes {
        if value >= 1.0 {
            warnings.push(format!(
                "{} = {} looks like a raw volume; expected a proportion of intracranial volume",
                name, value
            ));
        }
    }

    let thicknesses = [
        ("precentral_thick", input.precentral_thick),
        ("superior_frontal_thick", input.superior_frontal_thick),
        ("insula_thick", input.insula_thick),
    ];
    let (lo, hi) = TYPICAL_THICKNESS_MM;
    for (name, value) in thicknesses {
        if value != 0.0 && (value < lo || value > hi) {
            warnings.push(format!(
                "{} = {} mm is outside the typical {:.1}-{:.1} mm range",
                name, value, lo, hi
            ));
        }
    }
    warnings
}
