//! Environment-sourced configuration.
//!
//! Read once at startup and passed down explicitly, so the pipeline stages
//! stay testable without ambient state.

use anyhow::{Context, Result, anyhow};
use std::env;
use std::path::Path;
use url::Url;

/// Directory screenshots are written to, relative to the working directory.
/// The raw-content URL derivation assumes this layout.
pub const SCREENSHOT_DIR: &str = "screenshots";

#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Booking-site home page. Checked by [`Config::base_url`] before the
    /// first attempt; a missing or malformed value is fatal.
    pub base_url: Option<String>,
    /// LINE Messaging API channel token; both LINE settings must be present
    /// or the send is skipped.
    pub line_channel_access_token: Option<String>,
    /// Destination group for the push message
    pub line_group_id: Option<String>,
    /// Opponent-recruitment page; screenshot capture is skipped when unset
    pub game_recruitment_url: Option<String>,
    /// `user/repository` hosting the committed screenshots
    pub github_repo: Option<String>,
    /// Branch the raw-content URL points at
    pub github_branch: String,
    /// Management-screen login
    pub management_login_id: Option<String>,
    pub management_password: Option<String>,
}

fn var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

impl Config {
    /// Load configuration from the process environment, honoring a `.env`
    /// file in the working directory when present.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self {
            base_url: var("BASE_URL"),
            line_channel_access_token: var("LINE_CHANNEL_ACCESS_TOKEN"),
            line_group_id: var("LINE_GROUP_ID"),
            game_recruitment_url: var("GAME_RECRUITMENT_URL"),
            github_repo: var("GITHUB_REPO"),
            github_branch: var("GITHUB_BRANCH").unwrap_or_else(|| "main".to_string()),
            management_login_id: var("MANAGEMENT_SCREEN_LOGIN_ID"),
            management_password: var("MANAGEMENT_SCREEN_PASSWORD"),
        }
    }

    /// Required booking-site URL, validated before the browser launches.
    pub fn base_url(&self) -> Result<&str> {
        let url = self
            .base_url
            .as_deref()
            .ok_or_else(|| anyhow!("BASE_URL is not set"))?;
        Url::parse(url).context("BASE_URL is not a valid URL")?;
        Ok(url)
    }

    /// Screenshot output path for the given file name.
    pub fn screenshot_path(&self, filename: &str) -> std::path::PathBuf {
        Path::new(SCREENSHOT_DIR).join(filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_branch() {
        let config = Config {
            github_branch: "main".to_string(),
            ..Default::default()
        };
        assert_eq!(config.github_branch, "main");
        assert!(config.base_url.is_none());
    }

    #[test]
    fn test_base_url_missing_is_an_error() {
        let config = Config::default();
        let err = config.base_url().unwrap_err();
        assert!(err.to_string().contains("BASE_URL is not set"));
    }

    #[test]
    fn test_base_url_must_parse() {
        let config = Config {
            base_url: Some("not a url".to_string()),
            github_branch: "main".to_string(),
            ..Default::default()
        };
        let err = config.base_url().unwrap_err();
        assert!(err.to_string().contains("not a valid URL"));
    }

    #[test]
    fn test_base_url_passes_through_when_valid() {
        let config = Config {
            base_url: Some("https://example.com/reserve".to_string()),
            github_branch: "main".to_string(),
            ..Default::default()
        };
        assert_eq!(config.base_url().unwrap(), "https://example.com/reserve");
    }

    #[test]
    fn test_screenshot_path_under_fixed_dir() {
        let config = Config::default();
        let path = config.screenshot_path("shot.png");
        assert_eq!(path, Path::new("screenshots/shot.png"));
    }
}
