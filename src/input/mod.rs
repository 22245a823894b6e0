use std::fmt;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

pub const AGE_MAX: u32 = 100;
pub const EDUCATION_YEARS_MAX: u32 = 30;
pub const SCORE_MAX: u32 = 30;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One form submission. Every numeric field left at `0` counts as not entered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawInput {
    pub age: u32,
    pub education_years: u32,
    pub gender: Gender,
    pub mmse: u32,
    pub moca: u32,
    pub hippocampus_norm_vol: f64,
    pub amygdala_norm_vol: f64,
    pub temporal_pole_norm_vol: f64,
    pub brainstem_norm_vol: f64,
    pub precentral_thick: f64,
    pub superior_frontal_thick: f64,
    pub insula_thick: f64,
}

impl RawInput {
    /// Numeric fields in form declaration order, keyed by display name.
    pub fn numeric_fields(&self) -> [(&'static str, f64); 11] {
        [
            ("Age", f64::from(self.age)),
            ("Education Years", f64::from(self.education_years)),
            ("MMSE Score", f64::from(self.mmse)),
            ("MOCA Score", f64::from(self.moca)),
            ("Hippocampus Volume", self.hippocampus_norm_vol),
            ("Amygdala Volume", self.amygdala_norm_vol),
            ("Temporal Pole Volume", self.temporal_pole_norm_vol),
            ("Brainstem Volume", self.brainstem_norm_vol),
            ("Precentral Thickness", self.precentral_thick),
            ("Superior Frontal Thickness", self.superior_frontal_thick),
            ("Insula Thickness", self.insula_thick),
        ]
    }
}

pub fn load_form(path: &Path) -> Result<RawInput> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read form input {}", path.display()))?;
    let input: RawInput = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse form input {}", path.display()))?;
    check_ranges(&input).with_context(|| format!("invalid form input {}", path.display()))?;
    Ok(input)
}

/// Enforces the bounds the form widgets impose. Zero is in range; the
/// validator decides whether it means "missing".
pub fn check_ranges(input: &RawInput) -> Result<()> {
    let bounded = [
        ("age", input.age, AGE_MAX),
        ("education_years", input.education_years, EDUCATION_YEARS_MAX),
        ("mmse", input.mmse, SCORE_MAX),
        ("moca", input.moca, SCORE_MAX),
    ];
    for (name, value, max) in bounded {
        if value > max {
            bail!("{} = {} is outside [0, {}]", name, value, max);
        }
    }

    let measured = [
        ("hippocampus_norm_vol", input.hippocampus_norm_vol),
        ("amygdala_norm_vol", input.amygdala_norm_vol),
        ("temporal_pole_norm_vol", input.temporal_pole_norm_vol),
        ("brainstem_norm_vol", input.brainstem_norm_vol),
        ("precentral_thick", input.precentral_thick),
        ("superior_frontal_thick", input.superior_frontal_thick),
        ("insula_thick", input.insula_thick),
    ];
    for (name, value) in measured {
        if !value.is_finite() {
            bail!("{} must be a finite number", name);
        }
    }
    Ok(())
}
