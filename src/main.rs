use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use kira_neurodx::cli::{Cli, Commands, PredictArgs, ValidateArgs};
use kira_neurodx::ctx::SubmissionContext;
use kira_neurodx::error::DxError;
use kira_neurodx::features::FEATURE_NAMES;
use kira_neurodx::io::summary::{format_summary, format_validation_failure};
use kira_neurodx::model::{Classifier, ForestClassifier};
use kira_neurodx::pipeline::Pipeline;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Predict(args) => handle_predict(args)?,
        Commands::Validate(args) => handle_validate(args)?,
        Commands::Schema => print_schema(),
    }

    Ok(())
}

fn handle_predict(args: PredictArgs) -> Result<()> {
    let classifier: Arc<dyn Classifier> = Arc::new(ForestClassifier::load(&args.model)?);
    let input = args.form.to_raw_input()?;

    let mut ctx = SubmissionContext::new(input, args.json);
    Pipeline::submission(classifier)
        .run(&mut ctx)
        .inspect_err(print_validation_banner)?;
    Pipeline::summary().run(&mut ctx)?;

    print_summary(&ctx)
}

fn handle_validate(args: ValidateArgs) -> Result<()> {
    let input = args.form.to_raw_input()?;
    let mut ctx = SubmissionContext::new(input, None);
    Pipeline::validation_only()
        .run(&mut ctx)
        .inspect_err(print_validation_banner)?;

    println!("kira-neurodx validate ok");
    print_warnings(&ctx.warnings);
    Ok(())
}

fn print_validation_banner(err: &anyhow::Error) {
    if let Some(DxError::Validation { missing }) = err.downcast_ref::<DxError>() {
        print!("{}", format_validation_failure(missing));
    }
}

fn print_summary(ctx: &SubmissionContext) -> Result<()> {
    let summary = format_summary(ctx)?;
    print!("{}", summary);
    print_warnings(&ctx.warnings);
    if let Some(path) = &ctx.json_path {
        println!("report: {}", path.display());
    }
    Ok(())
}

fn print_warnings(warnings: &[String]) {
    if !warnings.is_empty() {
        println!("warnings:");
        for warning in warnings {
            println!("- {}", warning);
        }
    }
}

fn print_schema() {
    println!("feature schema ({} columns):", FEATURE_NAMES.len());
    for (idx, name) in FEATURE_NAMES.iter().enumerate() {
        println!("{}\t{}", idx, name);
    }
}
