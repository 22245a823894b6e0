use anyhow::Result;
use tracing::info;

use crate::ctx::SubmissionContext;
use crate::io::json_writer;
use crate::pipeline::Stage;

pub struct Stage5Output;

impl Stage5Output {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage5Output {
    fn name(&self) -> &'static str {
        "stage5_output"
    }

    fn run(&self, ctx: &mut SubmissionContext) -> Result<()> {
        let report = json_writer::build_report(ctx)?;
        if let Some(path) = &ctx.json_path {
            crate::io::write_json(path, &report)?;
            info!(path = %path.display(), "json_report_written");
        }
        ctx.report = Some(report);
        info!("stage5_output_ready");
        Ok(())
    }
}
