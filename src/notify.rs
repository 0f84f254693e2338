//! LINE Messaging API push client.

use anyhow::{Context, Result};
use serde_json::{Value, json};
use tracing::{error, info, warn};

use crate::config::Config;

const PUSH_ENDPOINT: &str = "https://api.line.me/v2/bot/message/push";

/// Push-message sender for one LINE group.
pub struct LineNotifier {
    token: String,
    group_id: String,
    endpoint: String,
    client: reqwest::Client,
}

impl LineNotifier {
    /// Build a notifier from configuration; `None` when either LINE
    /// setting is missing, which callers treat as "skip the send".
    pub fn from_config(config: &Config) -> Option<Self> {
        match (&config.line_channel_access_token, &config.line_group_id) {
            (Some(token), Some(group_id)) => Some(Self::new(token, group_id)),
            _ => {
                warn!("LINE credentials incomplete, skipping send");
                None
            }
        }
    }

    pub fn new(token: &str, group_id: &str) -> Self {
        Self {
            token: token.to_string(),
            group_id: group_id.to_string(),
            endpoint: PUSH_ENDPOINT.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Point at a different push endpoint; used by the stub-server tests.
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    /// Build the push payload: always a text part, plus an image part when
    /// a public URL is available.
    pub fn payload(&self, text: &str, image_url: Option<&str>) -> Value {
        let mut messages = vec![json!({ "type": "text", "text": text })];
        if let Some(url) = image_url {
            messages.push(json!({
                "type": "image",
                "originalContentUrl": url,
                "previewImageUrl": url,
            }));
        }
        json!({ "to": &self.group_id, "messages": messages })
    }

    /// POST the report. `Ok(true)` on HTTP 200; any other status is logged
    /// and reported as `Ok(false)`. No internal retry: the whole-run retry
    /// wrapper is the only resilience layer.
    pub async fn send(&self, text: &str, image_url: Option<&str>) -> Result<bool> {
        info!("Sending LINE message");
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(&self.payload(text, image_url))
            .send()
            .await
            .context("LINE push request failed")?;

        let status = response.status();
        info!("LINE push returned {}", status);
        if status != reqwest::StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            error!("LINE push error: {}", body);
            return Ok(false);
        }
        Ok(true)
    }
}
