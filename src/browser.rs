//! Headless Chrome session over WebDriver.
//!
//! Wraps the fantoccini client with the bounded polling waits the booking
//! site needs. The site exposes no load-completion event, so waits poll for
//! element presence, URL changes, or markup changes with a fixed deadline.

use anyhow::{Context, Result, anyhow};
use fantoccini::{Client, ClientBuilder, Locator, elements::Element};
use serde_json::json;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::driver::DRIVER_MANAGER;

/// Default budget for element-presence waits
pub const ELEMENT_WAIT: Duration = Duration::from_secs(20);
/// Budget for navigation and pagination waits
pub const PAGE_WAIT: Duration = Duration::from_secs(10);

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// One live browser session; exactly one exists per run.
pub struct Browser {
    client: Client,
}

impl Browser {
    /// Connect to chromedriver (starting it if needed) and open a session
    /// with the fixed tall viewport the screenshot stage relies on.
    pub async fn launch(headless: bool) -> Result<Self> {
        let webdriver_url = DRIVER_MANAGER.ensure_driver().await?;

        let mut args = vec![
            "--no-sandbox".to_string(),
            "--disable-dev-shm-usage".to_string(),
            "--window-size=1920,3000".to_string(),
        ];
        if headless {
            args.push("--headless=new".to_string());
            args.push("--disable-gpu".to_string());
        }

        let mut caps = serde_json::Map::new();
        caps.insert("goog:chromeOptions".to_string(), json!({ "args": args }));

        debug!("Connecting to WebDriver at {}", webdriver_url);
        let client = ClientBuilder::rustls()
            .capabilities(caps)
            .connect(&webdriver_url)
            .await
            .context("Failed to connect to WebDriver")?;

        Ok(Browser { client })
    }

    pub async fn goto(&self, url: &str) -> Result<()> {
        info!("Navigating to {}", url);
        self.client.goto(url).await?;
        Ok(())
    }

    pub async fn current_url(&self) -> Result<String> {
        Ok(self.client.current_url().await?.to_string())
    }

    /// Full serialized markup of the current page.
    pub async fn page_source(&self) -> Result<String> {
        Ok(self.client.source().await?)
    }

    /// Poll until an element matching `locator` exists, up to `timeout`.
    pub async fn wait_for(&self, locator: Locator<'_>, timeout: Duration) -> Result<Element> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Ok(element) = self.client.find(locator).await {
                return Ok(element);
            }
            if Instant::now() >= deadline {
                return Err(anyhow!("timed out waiting for element {:?}", locator));
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    /// Poll until the browser URL differs from `before`, up to `timeout`.
    pub async fn wait_for_url_change(&self, before: &str, timeout: Duration) -> Result<String> {
        let deadline = Instant::now() + timeout;
        loop {
            let current = self.current_url().await?;
            if current != before {
                return Ok(current);
            }
            if Instant::now() >= deadline {
                return Err(anyhow!("timed out waiting for navigation away from {}", before));
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    /// Poll until the element's serialized markup differs from `snapshot`.
    ///
    /// The calendar widget repaints in place with no completion signal;
    /// a markup diff against the pre-click snapshot is the only observable
    /// sign that the next week has rendered.
    pub async fn wait_for_markup_change(
        &self,
        locator: Locator<'_>,
        snapshot: &str,
        timeout: Duration,
    ) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Ok(current) = self.outer_html(locator).await
                && current != snapshot
            {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(anyhow!("timed out waiting for {:?} to repaint", locator));
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    pub async fn outer_html(&self, locator: Locator<'_>) -> Result<String> {
        let element = self.client.find(locator).await?;
        Ok(element.html(false).await?)
    }

    /// Set an input's value through the DOM, bypassing keystroke events.
    pub async fn set_value_by_script(&self, css: &str, value: &str) -> Result<()> {
        self.client
            .execute(
                "document.querySelector(arguments[0]).value = arguments[1];",
                vec![json!(css), json!(value)],
            )
            .await?;
        Ok(())
    }

    /// Click through the DOM rather than synthesized pointer events; the
    /// calendar's next-week control sits under an overlay that intercepts
    /// real clicks.
    pub async fn click_by_script(&self, css: &str) -> Result<()> {
        self.client
            .execute(
                "document.querySelector(arguments[0]).click();",
                vec![json!(css)],
            )
            .await?;
        Ok(())
    }

    /// Select an `<option>` under the `select_css` element by clicking the
    /// first one the predicate accepts. Returns whether a match was clicked.
    pub async fn select_option<F>(&self, select_css: &str, predicate: F) -> Result<bool>
    where
        F: Fn(&str, &str) -> bool,
    {
        let options = self
            .client
            .find_all(Locator::Css(&format!("{} option", select_css)))
            .await?;
        for option in options {
            let value = option.attr("value").await?.unwrap_or_default();
            let text = option.text().await.unwrap_or_default().trim().to_string();
            if predicate(&value, &text) {
                option.click().await?;
                return Ok(true);
            }
        }
        Ok(false)
    }

    pub async fn execute(&self, script: &str) -> Result<serde_json::Value> {
        Ok(self.client.execute(script, vec![]).await?)
    }

    pub async fn set_window_size(&self, width: u32, height: u32) -> Result<()> {
        debug!("Resizing window to {}x{}", width, height);
        self.client.set_window_size(width, height).await?;
        Ok(())
    }

    /// Capture the current viewport as a PNG.
    pub async fn screenshot(&self) -> Result<Vec<u8>> {
        Ok(self.client.screenshot().await?)
    }

    pub async fn find(&self, locator: Locator<'_>) -> Result<Element> {
        Ok(self.client.find(locator).await?)
    }

    pub async fn find_all(&self, locator: Locator<'_>) -> Result<Vec<Element>> {
        Ok(self.client.find_all(locator).await?)
    }

    /// End the WebDriver session.
    pub async fn close(self) -> Result<()> {
        self.client.close().await?;
        Ok(())
    }
}
