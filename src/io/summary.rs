use anyhow::Result;

use crate::ctx::SubmissionContext;
use crate::error::DxError;
use crate::indicators::NO_INDICATORS_MESSAGE;
use crate::present::{CHART_Y_MAX, CHART_Y_MIN, ChartPoint};

pub const DISCLAIMER: &str = "This tool is intended for research and educational purposes only. \
It does not constitute a medical diagnosis. Clinical decisions must be made by qualified \
healthcare professionals based on comprehensive clinical assessment.";

const BAR_WIDTH: usize = 40;

pub fn format_summary(ctx: &SubmissionContext) -> Result<String> {
    let presentation = ctx
        .presentation
        .as_ref()
        .ok_or(DxError::MissingPredictionContext)?;

    let mut out = String::new();
    out.push_str(&format!("kira-neurodx v{}\n", env!("CARGO_PKG_VERSION")));
    out.push_str("Diagnosis Summary\n");
    out.push_str(&format!(
        "Diagnosis: {} ({})\n",
        presentation.label, presentation.color
    ));

    out.push_str("\nProbability Breakdown:\n");
    for entry in &presentation.ranked_probabilities {
        if entry.emphasized {
            out.push_str(&format!("  **{}: {:.1}%**\n", entry.label, entry.percent));
        } else {
            out.push_str(&format!("  {}: {:.1}%\n", entry.label, entry.percent));
        }
    }

    out.push_str(&format!(
        "\nProbability Distribution ({:.0}-{:.0}%):\n",
        CHART_Y_MIN, CHART_Y_MAX
    ));
    out.push_str(&render_bars(&presentation.chart_series));

    out.push_str("\nKey Indicators:\n");
    let indicators = ctx.key_indicators();
    if indicators.is_empty() {
        out.push_str(&format!("{}\n", NO_INDICATORS_MESSAGE));
    } else {
        for item in &indicators {
            out.push_str(&format!("- {}\n", item));
        }
    }

    out.push_str("\nClinical Disclaimer:\n");
    out.push_str(DISCLAIMER);
    out.push('\n');
    Ok(out)
}

pub fn format_validation_failure(missing: &[String]) -> String {
    format!(
        "All fields must be completed before prediction.\nMissing: {}\n",
        missing.join(", ")
    )
}

/// Horizontal bars on the fixed 0-100 axis.
pub fn render_bars(series: &[ChartPoint]) -> String {
    let label_width = series.iter().map(|p| p.label.len()).max().unwrap_or(0);
    let mut out = String::new();
    for point in series {
        let clamped = point.percent.clamp(CHART_Y_MIN, CHART_Y_MAX);
        let filled = ((clamped / CHART_Y_MAX) * BAR_WIDTH as f64).round() as usize;
        out.push_str(&format!(
            "  {:<width$} |{}{} {:>5.1}% [{}]\n",
            point.label,
            "#".repeat(filled),
            " ".repeat(BAR_WIDTH - filled),
            point.percent,
            point.color,
            width = label_width
        ));
    }
    out
}
