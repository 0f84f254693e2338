use thiserror::Error;

/// Custom error type that includes exit codes
#[derive(Debug, Error)]
pub enum GroundCheckError {
    /// WebDriver connection failed (exit code 4)
    #[error("WebDriver connection failed: {0}")]
    WebDriverFailed(String),
    /// Bounded wait expired (exit code 5)
    #[error("Operation timed out: {0}")]
    Timeout(String),
    /// Generic error (exit code 1)
    #[error(transparent)]
    Other(anyhow::Error),
}

impl GroundCheckError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            GroundCheckError::WebDriverFailed(_) => 4,
            GroundCheckError::Timeout(_) => 5,
            GroundCheckError::Other(_) => 1,
        }
    }
}

impl From<anyhow::Error> for GroundCheckError {
    fn from(err: anyhow::Error) -> Self {
        // Classify from the error message for exit-code purposes
        let msg = err.to_string();

        if msg.contains("Failed to connect to WebDriver")
            || msg.contains("WebDriver")
            || msg.contains("chromedriver")
        {
            GroundCheckError::WebDriverFailed(msg)
        } else if msg.contains("timeout") || msg.contains("timed out") {
            GroundCheckError::Timeout(msg)
        } else {
            GroundCheckError::Other(err)
        }
    }
}
