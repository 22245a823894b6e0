use anyhow::Result;
use tracing::info;

use crate::ctx::SubmissionContext;
use crate::error::DxError;
use crate::pipeline::Stage;
use crate::present::present_prediction;

pub struct Stage3Present;

impl Stage3Present {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage3Present {
    fn name(&self) -> &'static str {
        "stage3_present"
    }

    fn run(&self, ctx: &mut SubmissionContext) -> Result<()> {
        let handoff = ctx
            .handoff
            .as_ref()
            .ok_or(DxError::MissingPredictionContext)?;
        let presentation = present_prediction(&handoff.result);
        info!(label = %presentation.label, color = %presentation.color, "presentation_ready");
        ctx.presentation = Some(presentation);
        Ok(())
    }
}
