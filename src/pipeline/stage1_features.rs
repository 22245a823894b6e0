use anyhow::{Result, bail};
use tracing::info;

use crate::ctx::SubmissionContext;
use crate::features::build;
use crate::pipeline::Stage;

pub struct Stage1Features;

impl Stage1Features {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage1Features {
    fn name(&self) -> &'static str {
        "stage1_features"
    }

    fn run(&self, ctx: &mut SubmissionContext) -> Result<()> {
        match &ctx.validation {
            Some(v) if v.is_valid() => {}
            _ => bail!("feature vector requested before the form passed validation"),
        }
        let features = build(&ctx.input);
        info!(columns = features.len(), "feature_vector_ready");
        ctx.features = Some(features);
        Ok(())
    }
}
