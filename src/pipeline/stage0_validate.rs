use anyhow::Result;
use tracing::{info, warn};

use crate::ctx::SubmissionContext;
use crate::error::DxError;
use crate::pipeline::Stage;
use crate::validate::{ValidationResult, plausibility_warnings, validate};

pub struct Stage0Validate;

impl Stage0Validate {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage0Validate {
    fn name(&self) -> &'static str {
        "stage0_validate"
    }

    fn run(&self, ctx: &mut SubmissionContext) -> Result<()> {
        let validation = validate(&ctx.input);
        ctx.validation = Some(validation.clone());

        if let ValidationResult::Invalid { missing } = validation {
            warn!(missing = %missing.join(", "), "validation_failed");
            return Err(DxError::Validation { missing }.into());
        }

        for warning in plausibility_warnings(&ctx.input) {
            warn!(%warning, "implausible_input");
            ctx.warnings.push(warning);
        }
        info!("validation_ok");
        Ok(())
    }
}
