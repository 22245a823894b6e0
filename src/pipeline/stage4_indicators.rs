use anyhow::Result;
use tracing::info;

use crate::ctx::SubmissionContext;
use crate::error::DxError;
use crate::indicators::evaluate_indicators;
use crate::pipeline::Stage;

pub struct Stage4Indicators;

impl Stage4Indicators {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage4Indicators {
    fn name(&self) -> &'static str {
        "stage4_indicators"
    }

    fn run(&self, ctx: &mut SubmissionContext) -> Result<()> {
        let handoff = ctx
            .handoff
            .as_ref()
            .ok_or(DxError::MissingPredictionContext)?;
        let indicators = evaluate_indicators(&handoff.inputs);
        let fired = indicators.iter().filter(|i| i.fired).count();
        ctx.indicators = indicators;
        info!(fired, "key_indicators_ready");
        Ok(())
    }
}
