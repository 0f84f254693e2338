//! Chromedriver process management.
//!
//! Reuses an already-running chromedriver when one responds on the standard
//! port, otherwise spawns one and kills it again at process exit.

use anyhow::{Context, Result};
use std::process::{Child, Command, Stdio};
use std::sync::{LazyLock, Mutex};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info};

const CHROMEDRIVER_PORT: u16 = 9515;

/// Process-wide driver manager; stopped from `main` before exit.
pub static DRIVER_MANAGER: LazyLock<DriverManager> = LazyLock::new(DriverManager::new);

pub struct DriverManager {
    spawned: Mutex<Option<Child>>,
}

impl DriverManager {
    pub fn new() -> Self {
        Self {
            spawned: Mutex::new(None),
        }
    }

    /// Ensure a chromedriver is reachable; returns the URL to connect to.
    pub async fn ensure_driver(&self) -> Result<String> {
        let url = format!("http://localhost:{}", CHROMEDRIVER_PORT);
        if Self::is_driver_ready(&url).await {
            debug!("Using existing chromedriver at {}", url);
            return Ok(url);
        }

        info!("chromedriver not detected, starting it");
        if !Self::command_exists("chromedriver") {
            anyhow::bail!(
                "chromedriver not found in PATH. Please install it:\n\
                  macOS: brew install chromedriver\n\
                  Linux: Download from https://chromedriver.chromium.org/downloads"
            );
        }

        let child = Command::new("chromedriver")
            .arg(format!("--port={}", CHROMEDRIVER_PORT))
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .context("Failed to start chromedriver")?;
        *self.spawned.lock().unwrap() = Some(child);

        // Wait for the driver to come up (3 seconds total)
        for _ in 0..30 {
            if Self::is_driver_ready(&url).await {
                info!("chromedriver started on port {}", CHROMEDRIVER_PORT);
                return Ok(url);
            }
            sleep(Duration::from_millis(100)).await;
        }

        self.stop();
        anyhow::bail!("chromedriver failed to start within timeout")
    }

    /// Probe the WebDriver status endpoint for `ready: true`.
    async fn is_driver_ready(url: &str) -> bool {
        let status_url = format!("{}/status", url);
        match reqwest::Client::new()
            .get(&status_url)
            .timeout(Duration::from_secs(1))
            .send()
            .await
        {
            Ok(response) => match response.json::<serde_json::Value>().await {
                Ok(body) => body
                    .get("value")
                    .and_then(|v| v.get("ready"))
                    .and_then(|r| r.as_bool())
                    .unwrap_or(false),
                Err(_) => false,
            },
            Err(_) => false,
        }
    }

    /// Check if a command exists in PATH
    fn command_exists(command: &str) -> bool {
        #[cfg(unix)]
        {
            Command::new("which")
                .arg(command)
                .output()
                .map(|output| output.status.success())
                .unwrap_or(false)
        }

        #[cfg(windows)]
        {
            Command::new("where")
                .arg(command)
                .output()
                .map(|output| output.status.success())
                .unwrap_or(false)
        }
    }

    /// Kill the spawned chromedriver, if this process started one.
    pub fn stop(&self) {
        if let Some(mut child) = self.spawned.lock().unwrap().take() {
            info!("Stopping chromedriver (pid {})", child.id());
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

impl Default for DriverManager {
    fn default() -> Self {
        Self::new()
    }
}
