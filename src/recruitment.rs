//! Opponent-recruitment page screenshot.
//!
//! Logs into the management screen, opens the recruitment listing, and
//! captures a full-page PNG. Entirely best-effort: any failure is logged
//! and the report is sent without an image.

use anyhow::{Context, Result, anyhow};
use chrono::Local;
use fantoccini::Locator;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

use crate::browser::{Browser, PAGE_WAIT};
use crate::config::{Config, SCREENSHOT_DIR};

const USERID_INPUT: Locator<'static> = Locator::Id("userid");
const PASSWORD_INPUT: Locator<'static> = Locator::Id("password");
const LOGIN_BUTTON: Locator<'static> = Locator::Id("login2");
const LOGGED_IN_MARKER: Locator<'static> = Locator::Css(".ltl");
const RECRUITMENT_LINK: Locator<'static> = Locator::XPath("//a[contains(text(), '対戦募集')]");
const RECRUITMENT_MARKER: Locator<'static> = Locator::Css(".lgTdl8");

/// Capture the recruitment page, returning the saved path, or `None` when
/// the page is not configured or anything goes wrong along the way.
pub async fn capture_recruitment_page(browser: &Browser, config: &Config) -> Option<PathBuf> {
    let Some(url) = config.game_recruitment_url.as_deref() else {
        info!("GAME_RECRUITMENT_URL not set, skipping screenshot");
        return None;
    };
    match try_capture(browser, config, url).await {
        Ok(path) => {
            info!("Saved recruitment screenshot to {}", path.display());
            Some(path)
        }
        Err(e) => {
            warn!("Recruitment screenshot failed: {:#}", e);
            None
        }
    }
}

async fn try_capture(browser: &Browser, config: &Config, url: &str) -> Result<PathBuf> {
    let login_id = config
        .management_login_id
        .as_deref()
        .ok_or_else(|| anyhow!("MANAGEMENT_SCREEN_LOGIN_ID not set"))?;
    let password = config
        .management_password
        .as_deref()
        .ok_or_else(|| anyhow!("MANAGEMENT_SCREEN_PASSWORD not set"))?;

    info!("Opening recruitment page at {}", url);
    browser.goto(url).await?;

    let userid = browser.wait_for(USERID_INPUT, PAGE_WAIT).await?;
    userid.send_keys(login_id).await?;
    let password_input = browser.find(PASSWORD_INPUT).await?;
    password_input.send_keys(password).await?;
    browser.find(LOGIN_BUTTON).await?.click().await?;

    browser.wait_for(LOGGED_IN_MARKER, PAGE_WAIT).await?;
    let link = browser.wait_for(RECRUITMENT_LINK, PAGE_WAIT).await?;
    link.click().await?;
    browser.wait_for(RECRUITMENT_MARKER, PAGE_WAIT).await?;
    // Settle delay: the listing keeps filling in after its marker appears
    tokio::time::sleep(Duration::from_secs(2)).await;

    // Grow the window to the full scroll height so one viewport capture
    // covers the whole page
    let total_height = browser
        .execute("return document.body.scrollHeight;")
        .await?
        .as_u64()
        .unwrap_or(3000) as u32;
    let window_width = browser
        .execute("return window.innerWidth;")
        .await?
        .as_u64()
        .unwrap_or(1920) as u32;
    browser.set_window_size(window_width, total_height).await?;
    tokio::time::sleep(Duration::from_secs(1)).await;

    std::fs::create_dir_all(SCREENSHOT_DIR)
        .with_context(|| format!("Failed to create directory: {}", SCREENSHOT_DIR))?;
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let path = config.screenshot_path(&format!("game_recruitment_{}.png", timestamp));

    let png = browser.screenshot().await?;
    std::fs::write(&path, &png)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}
