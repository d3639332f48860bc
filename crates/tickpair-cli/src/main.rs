mod cli;
mod config;
mod error;
mod logging;
mod prompt;
mod render;
mod report;
mod viewer;

use std::io;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use tickpair_core::{compare, SystemClock, YahooAdapter};

use crate::cli::Cli;
use crate::config::AnalysisConfig;
use crate::error::CliError;
use crate::prompt::DatePrompter;
use crate::viewer::SystemViewer;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.log_level);

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(%error, "run aborted");
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

async fn run(cli: &Cli) -> Result<(), CliError> {
    let config = AnalysisConfig::from_cli(cli)?;

    let range = {
        let clock = SystemClock;
        let mut prompter = DatePrompter::new(io::stdin().lock(), io::stdout().lock(), &clock);
        prompter.prompt_range(&config.defaults)?
    };
    tracing::info!(%range, "date range accepted");

    let adapter = YahooAdapter::default().with_timeout_ms(config.timeout_ms);
    let comparison = compare(&adapter, &config.left.symbol, &config.right.symbol, range).await?;

    report::write_summary(
        &mut io::stdout().lock(),
        &config.left.label,
        &config.right.label,
        &comparison.analysis,
    )?;

    // The temporary chart lives until the viewer is dismissed.
    let scratch;
    let chart_path: &Path = match &config.output {
        Some(path) => path,
        None => {
            scratch = tempfile::Builder::new()
                .prefix("tickpair-")
                .suffix(".svg")
                .tempfile()?
                .into_temp_path();
            &scratch
        }
    };

    render::render_comparison(
        chart_path,
        &config.left.label,
        &config.right.label,
        &comparison.analysis,
    )?;
    viewer::show_and_wait(
        &SystemViewer,
        chart_path,
        io::stdin().lock(),
        io::stdout().lock(),
    )?;

    Ok(())
}
