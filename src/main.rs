#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ground_check::driver::DRIVER_MANAGER;
use ground_check::errors::GroundCheckError;
use ground_check::pipeline::{RunOptions, run_once, run_with_retry};
use ground_check::Config;

const EXIT_SUCCESS: i32 = 0;

#[derive(Parser)]
#[command(name = "ground-check")]
#[command(about = "Check baseball-ground availability and push a LINE report", long_about = None)]
struct Cli {
    /// Search start date (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Maximum whole-pipeline attempts
    #[arg(long, default_value = "5")]
    max_retries: u32,

    /// Print the report without sending it
    #[arg(long)]
    dry_run: bool,

    /// Run browser in visible mode (disables headless)
    #[arg(long = "no-headless")]
    no_headless: bool,
}

#[tokio::main]
async fn main() {
    let result = run().await;

    // Always clean up a spawned chromedriver before exiting
    DRIVER_MANAGER.stop();

    match result {
        Ok(()) => std::process::exit(EXIT_SUCCESS),
        Err(err) => {
            let err: GroundCheckError = err.into();
            eprintln!("Error: {}", err);
            std::process::exit(err.exit_code());
        }
    }
}

async fn run() -> Result<()> {
    // Logs go to stderr; the rendered report goes to stdout
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ground_check=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();
    // A missing or malformed BASE_URL is fatal before the first attempt
    config.base_url()?;
    let options = RunOptions {
        date: cli.date.unwrap_or_else(|| Local::now().date_naive()),
        headless: !cli.no_headless,
        dry_run: cli.dry_run,
    };

    info!("Checking availability from {}", options.date);
    // Outcome is already logged per attempt; exhausting retries still
    // exits normally.
    run_with_retry(cli.max_retries, |_| run_once(&config, &options)).await;
    Ok(())
}
