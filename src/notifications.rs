//! Feishu webhook alerts
//!
//! Best-effort by design: a failed notification must never fail the daily
//! job, so the send reports success as a bool instead of an error.

use crate::config;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};

const NOTIFY_TIMEOUT_SECS: u64 = 6;

pub struct FeishuNotifier {
    client: reqwest::Client,
    webhook: Option<String>,
}

impl FeishuNotifier {
    /// Reads FEISHU_WEBHOOK from the environment; alerts are no-ops when it
    /// is unset.
    pub fn from_env() -> Self {
        Self::with_webhook(config::get_feishu_webhook())
    }

    pub fn with_webhook(webhook: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(NOTIFY_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { client, webhook }
    }

    /// Send a text alert. Returns true when the webhook accepted it.
    pub async fn send_alert(&self, title: &str, content: &str) -> bool {
        let Some(ref url) = self.webhook else {
            debug!("no Feishu webhook configured, skipping alert");
            return false;
        };

        let payload = json!({
            "msg_type": "text",
            "content": {
                "text": format!("【AlphaPilot 监控报警】\n{}\n\n{}", title, content)
            }
        });

        match self.client.post(url).json(&payload).send().await {
            Ok(response) if response.status().is_success() => {
                debug!(title, "Feishu alert sent");
                true
            }
            Ok(response) => {
                warn!(status = %response.status(), "Feishu webhook rejected alert");
                false
            }
            Err(e) => {
                warn!(error = %e, "Failed to send Feishu alert");
                false
            }
        }
    }
}
