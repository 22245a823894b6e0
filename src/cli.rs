use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::input::{self, Gender, RawInput};

#[derive(Debug, Parser)]
#[command(
    name = "kira-neurodx",
    version,
    about = "Multimodal cognitive-status classifier CLI"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Validate the form, classify it and print the diagnosis summary
    Predict(PredictArgs),
    /// Check the form for missing fields without loading a model
    Validate(ValidateArgs),
    /// Print the classifier feature schema in column order
    Schema,
}

#[derive(Debug, Args)]
pub struct PredictArgs {
    #[arg(long, help = "Trained forest artifact (kira-forest-v1 JSON)")]
    pub model: PathBuf,

    #[arg(long, help = "Write the diagnosis report as JSON to this path")]
    pub json: Option<PathBuf>,

    #[command(flatten)]
    pub form: FormArgs,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub form: FormArgs,
}

#[derive(Debug, Args)]
pub struct FormArgs {
    #[arg(
        long,
        help = "Form values as JSON (omitted keys count as not entered)",
        conflicts_with_all = [
            "age", "education_years", "gender", "mmse", "moca",
            "hippocampus", "amygdala", "temporal_pole", "brainstem",
            "precentral", "superior_frontal", "insula",
        ]
    )]
    pub input: Option<PathBuf>,

    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u32).range(0..=100), help = "Age (years)")]
    pub age: u32,

    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u32).range(0..=30), help = "Education (years)")]
    pub education_years: u32,

    #[arg(long, value_enum, default_value_t = GenderArg::Male, help = "Gender")]
    pub gender: GenderArg,

    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u32).range(0..=30), help = "MMSE score (0-30)")]
    pub mmse: u32,

    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u32).range(0..=30), help = "MOCA score (0-30)")]
    pub moca: u32,

    #[arg(long, default_value_t = 0.0, help = "Hippocampus volume (proportion of ICV)")]
    pub hippocampus: f64,

    #[arg(long, default_value_t = 0.0, help = "Amygdala volume (proportion of ICV)")]
    pub amygdala: f64,

    #[arg(long, default_value_t = 0.0, help = "Temporal pole volume (proportion of ICV)")]
    pub temporal_pole: f64,

    #[arg(long, default_value_t = 0.0, help = "Brainstem volume (proportion of ICV)")]
    pub brainstem: f64,

    #[arg(long, default_value_t = 0.0, help = "Precentral cortical thickness (mm)")]
    pub precentral: f64,

    #[arg(long, default_value_t = 0.0, help = "Superior frontal cortical thickness (mm)")]
    pub superior_frontal: f64,

    #[arg(long, default_value_t = 0.0, help = "Insula cortical thickness (mm)")]
    pub insula: f64,
}

impl FormArgs {
    pub fn to_raw_input(&self) -> Result<RawInput> {
        if let Some(path) = &self.input {
            return input::load_form(path);
        }
        let raw = RawInput {
            age: self.age,
            education_years: self.education_years,
            gender: self.gender.into(),
            mmse: self.mmse,
            moca: self.moca,
            hippocampus_norm_vol: self.hippocampus,
            amygdala_norm_vol: self.amygdala,
            temporal_pole_norm_vol: self.temporal_pole,
            brainstem_norm_vol: self.brainstem,
            precentral_thick: self.precentral,
            superior_frontal_thick: self.superior_frontal,
            insula_thick: self.insula,
        };
        input::check_ranges(&raw)?;
        Ok(raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GenderArg {
    Male,
    Female,
}

impl From<GenderArg> for Gender {
    fn from(arg: GenderArg) -> Self {
        match arg {
            GenderArg::Male => Gender::Male,
            GenderArg::Female => Gender::Female,
        }
    }
}
