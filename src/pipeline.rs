//! Top-level orchestration: one full check run, and the flat retry wrapper
//! around it.

use anyhow::Result;
use chrono::NaiveDate;
use std::future::Future;
use std::time::Duration;
use tracing::{error, info, warn};

use crate::browser::Browser;
use crate::config::Config;
use crate::notify::LineNotifier;
use crate::publish;
use crate::recruitment::capture_recruitment_page;
use crate::report::make_report;
use crate::scrape::{fetch_venues, return_home, venue_availability};
use crate::types::VenueSlots;

/// Per-run settings from the command line.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Search start date handed to the booking site
    pub date: NaiveDate,
    pub headless: bool,
    /// Print the report instead of pushing it (also skips the git publish)
    pub dry_run: bool,
}

/// Delay after returning to the home page before the next venue
const HOME_SETTLE: Duration = Duration::from_secs(3);

/// Execute the whole pipeline once. The browser session is torn down on
/// every path; errors out of here feed the retry wrapper.
pub async fn run_once(config: &Config, options: &RunOptions) -> Result<()> {
    let browser = Browser::launch(options.headless).await?;
    let result = run_inner(&browser, config, options).await;
    if let Err(e) = browser.close().await {
        warn!("Failed to close browser session: {:#}", e);
    }
    info!("Run finished");
    result
}

async fn run_inner(browser: &Browser, config: &Config, options: &RunOptions) -> Result<()> {
    let base_url = config.base_url()?;

    let venues = fetch_venues(browser, base_url, options.date).await?;

    let mut results: Vec<VenueSlots> = Vec::new();
    for venue in venues {
        match venue_availability(browser, &venue).await {
            Ok(slots) => results.push(VenueSlots { venue, slots }),
            Err(e) => {
                // One broken venue must not sink the run; skip it and
                // reset the session before the next one.
                warn!("Skipping venue {}: {:#}", venue.name, e);
            }
        }
        return_home(browser, base_url).await?;
        tokio::time::sleep(HOME_SETTLE).await;
    }

    let report = make_report(&results);

    let screenshot = capture_recruitment_page(browser, config).await;
    let image_url = match (&screenshot, options.dry_run) {
        (Some(path), false) => match publish::commit_and_push(path) {
            Ok(()) => match config.github_repo.as_deref() {
                Some(repo) => publish::raw_content_url(repo, &config.github_branch, path),
                None => {
                    warn!("GITHUB_REPO not set, sending text only");
                    None
                }
            },
            Err(e) => {
                warn!("Screenshot publish failed, sending text only: {:#}", e);
                None
            }
        },
        _ => None,
    };

    if options.dry_run {
        info!("Dry run, not sending");
    } else if let Some(notifier) = LineNotifier::from_config(config) {
        notifier.send(&report, image_url.as_deref()).await?;
    }

    println!("{}", report);
    Ok(())
}

/// Re-run the whole pipeline on any failure, up to `max_retries` attempts.
///
/// No backoff and no state carried between attempts. Exhausting the budget
/// logs and returns `false`; it never propagates the error, so the process
/// still exits normally.
pub async fn run_with_retry<F, Fut>(max_retries: u32, mut attempt_fn: F) -> bool
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<()>>,
{
    for attempt in 1..=max_retries {
        match attempt_fn(attempt).await {
            Ok(()) => return true,
            Err(e) => {
                error!("Attempt {} failed: {:#}", attempt, e);
                if attempt == max_retries {
                    error!("Reached the retry limit ({}), giving up", max_retries);
                } else {
                    info!("Restarting the pipeline");
                }
            }
        }
    }
    false
}
