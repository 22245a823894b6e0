use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use tracing::{info, warn};

use crate::ctx::SubmissionContext;
use crate::model::Classifier;

pub mod stage0_validate;
pub mod stage1_features;
pub mod stage2_classify;
pub mod stage3_present;
pub mod stage4_indicators;
pub mod stage5_output;

use stage0_validate::Stage0Validate;
use stage1_features::Stage1Features;
use stage2_classify::Stage2Classify;
use stage3_present::Stage3Present;
use stage4_indicators::Stage4Indicators;
use stage5_output::Stage5Output;

pub trait Stage {
    fn name(&self) -> &'static str;
    fn run(&self, ctx: &mut SubmissionContext) -> Result<()>;
}

pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
    pub fn new(stages: Vec<Box<dyn Stage>>) -> Self {
        Self { stages }
    }

    /// validate -> build features -> classify. Halts at the first failing
    /// stage, so an invalid form never reaches the classifier.
    pub fn submission(classifier: Arc<dyn Classifier>) -> Self {
        Self::new(vec![
            Box::new(Stage0Validate::new()),
            Box::new(Stage1Features::new()),
            Box::new(Stage2Classify::new(classifier)),
        ])
    }

    /// present -> key indicators -> report. Reads only the prediction handoff.
    pub fn summary() -> Self {
        Self::new(vec![
            Box::new(Stage3Present::new()),
            Box::new(Stage4Indicators::new()),
            Box::new(Stage5Output::new()),
        ])
    }

    pub fn validation_only() -> Self {
        Self::new(vec![Box::new(Stage0Validate::new())])
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    pub fn run(&self, ctx: &mut SubmissionContext) -> Result<()> {
        for stage in &self.stages {
            let start = Instant::now();
            info!(stage = stage.name(), "stage started");
            if let Err(err) = stage.run(ctx) {
                let elapsed_ms = start.elapsed().as_millis();
                warn!(
                    stage = stage.name(),
                    elapsed_ms = elapsed_ms as u64,
                    "stage failed"
                );
                return Err(err);
            }
            let elapsed_ms = start.elapsed().as_millis();
            info!(
                stage = stage.name(),
                elapsed_ms = elapsed_ms as u64,
                "stage finished"
            );
        }
        Ok(())
    }
}
