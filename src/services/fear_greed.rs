//! CNN Fear & Greed Index client with alternative.me fallback

use crate::config::{REQUEST_TIMEOUT_SECS, YAHOO_USER_AGENT};
use crate::error::CoreError;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

const CNN_URLS: &[&str] = &[
    "https://production.dataviz.cnn.io/index/fearandgreed/graphdata",
    "https://production.dataviz.cnn.io/index/fearandgreed/current",
];
const FALLBACK_URL: &str = "https://api.alternative.me/fng/?limit=1";

/// Fetches the composite 0-100 sentiment score.
///
/// Tries the CNN endpoints in order, then the alternative.me crypto index as
/// a last resort (the original dashboard accepts either source).
pub struct FearGreedClient {
    client: reqwest::Client,
    urls: Vec<String>,
    fallback_url: String,
}

impl FearGreedClient {
    pub fn new() -> Self {
        Self::with_urls(
            CNN_URLS.iter().map(|u| u.to_string()).collect(),
            FALLBACK_URL.to_string(),
        )
    }

    /// Custom endpoints, used by tests to target a mock server.
    pub fn with_urls(urls: Vec<String>, fallback_url: String) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(YAHOO_USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            client,
            urls,
            fallback_url,
        }
    }

    /// Returns `(score, rating)`, e.g. `(72.0, "greed")`.
    pub async fn fetch(&self) -> Result<(f64, String), CoreError> {
        for url in &self.urls {
            match self.fetch_cnn(url).await {
                Some(result) => return Ok(result),
                None => debug!(url = %url, "fear & greed endpoint gave no usable data"),
            }
        }
        self.fetch_fallback().await.ok_or_else(|| {
            CoreError::DataUnavailable("all fear & greed sources failed".to_string())
        })
    }

    async fn fetch_cnn(&self, url: &str) -> Option<(f64, String)> {
        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .header("Referer", "https://www.cnn.com/markets/fear-and-greed")
            .send()
            .await
            .ok()?;
        if !response.status().is_success() {
            return None;
        }
        let data: Value = response.json().await.ok()?;

        if let Some(fng) = data.get("fear_and_greed") {
            let score = fng.get("score")?.as_f64()?;
            let rating = fng.get("rating")?.as_str()?.to_string();
            return Some((score, rating));
        }
        if let Some(score) = data.get("score").and_then(Value::as_f64) {
            let rating = data
                .get("rating")
                .and_then(Value::as_str)
                .unwrap_or("Unknown")
                .to_string();
            return Some((score, rating));
        }
        None
    }

    async fn fetch_fallback(&self) -> Option<(f64, String)> {
        let response = self.client.get(&self.fallback_url).send().await.ok()?;
        if !response.status().is_success() {
            return None;
        }
        let data: Value = response.json().await.ok()?;
        let entry = data.get("data")?.as_array()?.first()?;
        let score: f64 = entry.get("value")?.as_str()?.parse().ok()?;
        let rating = entry
            .get("value_classification")?
            .as_str()?
            .to_string();
        Some((score, rating))
    }
}

impl Default for FearGreedClient {
    fn default() -> Self {
        Self::new()
    }
}
