//! podium - merge a ranked party activity report into the Habitica group
//! description.
//!
//! One invocation is one run: fetch the party chat, aggregate the trailing
//! window, render the podium, merge it into the description, and persist
//! only when something changed. Scheduling belongs to cron or whatever
//! invokes the binary.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use podium_core::api::HabiticaClient;
use podium_core::pipeline::{compute_podium_update, run_podium_update};
use podium_core::{PodiumError, RunOutcome, TimeWindow, config};
use podium_types::ReportSettings;
use tracing_subscriber::filter::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Update the party podium from recent chat activity")]
struct Cli {
    /// Config file path (defaults to <config dir>/podium/config.toml).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Trailing window length in days.
    #[arg(long)]
    days: Option<u32>,

    /// Entries per ranked subsection.
    #[arg(long)]
    top: Option<usize>,

    /// Print the merged description instead of updating the group.
    #[arg(long)]
    preview: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => return abort(err),
    };
    if let Some(days) = cli.days {
        config.report.days = days;
    }
    if let Some(top) = cli.top {
        config.report.top_n = top;
    }

    let client = match HabiticaClient::new(&config.api) {
        Ok(client) => client,
        Err(err) => return abort(err),
    };

    let result = if cli.preview {
        preview(&client, &config.report).await
    } else {
        run(&client, &config.report).await
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => abort(err),
    }
}

fn abort(err: PodiumError) -> ExitCode {
    tracing::warn!("{err}");
    ExitCode::FAILURE
}

async fn run(client: &HabiticaClient, settings: &ReportSettings) -> Result<(), PodiumError> {
    match run_podium_update(client, settings).await? {
        RunOutcome::Updated { group_id } => {
            tracing::info!(%group_id, "podium section updated");
        }
        RunOutcome::AlreadyCurrent => {
            tracing::info!("podium section already up to date, no changes made");
        }
    }
    Ok(())
}

/// Compute the merged description and print it; never calls the update
/// endpoint, so previewing cannot influence the stored document.
async fn preview(client: &HabiticaClient, settings: &ReportSettings) -> Result<(), PodiumError> {
    let window = TimeWindow::trailing_days(settings.days);
    let update = compute_podium_update(client, settings, window).await?;
    println!("{}", update.updated);
    Ok(())
}
