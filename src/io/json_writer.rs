use anyhow::{Context, Result};

use crate::ctx::SubmissionContext;
use crate::io::summary::DISCLAIMER;
use crate::present::{CHART_Y_MAX, CHART_Y_MIN};
use crate::schema::v1::{
    Chart, ChartSeriesPoint, Diagnosis, IndicatorRule, NeuroDxV1, ProbabilityEntry,
};

pub fn build_report(ctx: &SubmissionContext) -> Result<NeuroDxV1> {
    let handoff = ctx.handoff.as_ref().context("prediction handoff missing")?;
    let presentation = ctx
        .presentation
        .as_ref()
        .context("diagnosis presentation missing")?;

    let diagnosis = Diagnosis {
        category: presentation.category.code(),
        label: presentation.label.clone(),
        color: presentation.color.as_str().to_string(),
        color_hex: presentation.color.hex().to_string(),
    };

    let probabilities = presentation
        .ranked_probabilities
        .iter()
        .map(|r| ProbabilityEntry {
            label: r.label.clone(),
            percent: r.percent,
            emphasized: r.emphasized,
        })
        .collect();

    let series = presentation
        .chart_series
        .iter()
        .map(|p| ChartSeriesPoint {
            label: p.label.clone(),
            percent: p.percent,
            color: p.color.as_str().to_string(),
            color_hex: p.color.hex().to_string(),
        })
        .collect();

    let indicator_rules = ctx
        .indicators
        .iter()
        .map(|i| IndicatorRule {
            name: i.name.clone(),
            fired: i.fired,
            threshold: i.threshold.clone(),
            message: i.message.clone(),
        })
        .collect();

    Ok(NeuroDxV1 {
        tool: "kira-neurodx".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        schema_version: "v1".to_string(),
        model: handoff.model.clone(),
        diagnosis,
        probabilities,
        chart: Chart {
            y_min: CHART_Y_MIN,
            y_max: CHART_Y_MAX,
            series,
        },
        key_indicators: ctx.key_indicators(),
        indicator_rules,
        warnings: ctx.warnings.clone(),
        disclaimer: DISCLAIMER.to_string(),
    })
}
