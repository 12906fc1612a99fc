use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use holiday_core::app::{ChangePublisher, RangeOrchestrator, YearUpdater};
use holiday_core::impls::{GitCli, HttpDataSource};
use holiday_core::ports::SystemClock;
use holiday_core::{Config, RunReport, RunScope, UpdateError, UpdateRun};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Refresh the yearly holiday files and publish them when they changed.
#[derive(Parser)]
#[command(name = "holiday-update")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Update every year since 2014 instead of only this year and next
    #[arg(long)]
    all: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // .env があれば読み込む（無ければそのまま）
    let _ = dotenvy::dotenv();

    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(directives.as_deref()))
        .with_writer(std::io::stderr)
        .init();

    match run(RunScope::from_all_flag(cli.all)).await {
        Ok(report) => {
            if report.is_up_to_date() {
                println!("Already up to date.");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            if let Some(update_err) = err.downcast_ref::<UpdateError>() {
                tracing::error!(failed_in = %update_err.failed_in(), "run aborted");
            }
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` の指定を優先し、未指定なら info
fn log_filter(directives: Option<&str>) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse_lossy(directives.unwrap_or_default())
}

async fn run(scope: RunScope) -> anyhow::Result<RunReport> {
    let config = Config::from_env().context("invalid configuration")?;
    tracing::info!(
        data_dir = %config.data_dir.display(),
        source = %config.source_url,
        timeout = ?config.fetch_timeout,
        "starting update"
    );

    let updater = YearUpdater::new(HttpDataSource::new(&config.source_url), &config.data_dir)
        .with_fetch_timeout(config.fetch_timeout);
    let git = GitCli::with_program(&config.git_program, &config.data_dir);

    let run = UpdateRun::new(
        RangeOrchestrator::new(updater, SystemClock),
        ChangePublisher::new(git, SystemClock),
    );

    // UpdateError はそのまま保持して failed_in() を取り出せるようにする
    let report = run.execute(scope).await?;
    Ok(report)
}
