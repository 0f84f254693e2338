//! Screenshot hosting through the repository itself.
//!
//! The LINE image message type needs a publicly reachable URL, not inline
//! bytes. Committing the file and pointing at the raw-content URL of the
//! hosting repository covers that without a separate image host.

use anyhow::{Context, Result};
use chrono::Local;
use std::path::Path;
use std::process::Command;
use tracing::info;

fn run_git(args: &[&str]) -> Result<()> {
    let status = Command::new("git")
        .args(args)
        .status()
        .with_context(|| format!("Failed to run git {}", args.join(" ")))?;
    if !status.success() {
        anyhow::bail!("git {} exited with {}", args.join(" "), status);
    }
    Ok(())
}

/// Commit and push the screenshot so the raw-content URL resolves.
pub fn commit_and_push(path: &Path) -> Result<()> {
    info!("Committing screenshot {}", path.display());
    let filename = path
        .file_name()
        .and_then(|f| f.to_str())
        .context("screenshot path has no file name")?;
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    let message = format!("Add screenshot: {} at {}", filename, timestamp);

    run_git(&["add", &path.to_string_lossy()])?;
    run_git(&["commit", "-m", &message])?;
    run_git(&["push"])?;
    info!("Pushed screenshot");
    Ok(())
}

/// Raw-content URL for a committed screenshot.
///
/// Pattern: `https://raw.githubusercontent.com/{repo}/{branch}/screenshots/{file}`.
pub fn raw_content_url(repo: &str, branch: &str, path: &Path) -> Option<String> {
    let filename = path.file_name()?.to_str()?;
    Some(format!(
        "https://raw.githubusercontent.com/{}/{}/screenshots/{}",
        repo, branch, filename
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_content_url() {
        let path = Path::new("screenshots/game_recruitment_20250101_120000.png");
        assert_eq!(
            raw_content_url("someone/ground-check", "main", path).unwrap(),
            "https://raw.githubusercontent.com/someone/ground-check/main/screenshots/game_recruitment_20250101_120000.png"
        );
    }

    #[test]
    fn test_raw_content_url_no_filename() {
        assert!(raw_content_url("someone/repo", "main", Path::new("/")).is_none());
    }
}
