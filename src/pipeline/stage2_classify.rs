use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::ctx::{PredictionHandoff, SubmissionContext};
use crate::indicators::IndicatorInputs;
use crate::model::{Classifier, classify};
use crate::pipeline::Stage;

pub struct Stage2Classify {
    classifier: Arc<dyn Classifier>,
}

impl Stage2Classify {
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self { classifier }
    }
}

impl Stage for Stage2Classify {
    fn name(&self) -> &'static str {
        "stage2_classify"
    }

    fn run(&self, ctx: &mut SubmissionContext) -> Result<()> {
        let features = ctx.features.as_ref().context("feature vector missing")?;
        let result = classify(self.classifier.as_ref(), features)?;
        info!(
            model = self.classifier.name(),
            category = result.category.code(),
            "prediction_ready"
        );
        ctx.handoff = Some(PredictionHandoff {
            model: self.classifier.name().to_string(),
            result,
            inputs: IndicatorInputs::from(&ctx.input),
        });
        Ok(())
    }
}
