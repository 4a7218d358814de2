//! Yahoo Finance chart API gateway

use crate::config::{REQUEST_TIMEOUT_SECS, YAHOO_USER_AGENT};
use crate::error::CoreError;
use crate::indicators::relative_strength::latest_ratio;
use crate::models::{MacroSnapshot, PriceBar};
use crate::services::fear_greed::FearGreedClient;
use crate::services::market_data::MarketDataGateway;
use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use chrono::{DateTime, Duration as ChronoDuration, NaiveDate};
use serde::Deserialize;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<Quote>,
}

#[derive(Debug, Deserialize)]
struct Quote {
    close: Option<Vec<Option<f64>>>,
}

/// Daily-bar gateway backed by the Yahoo v8 chart API.
///
/// Handles the crumb handshake Yahoo demands on rate-limited networks and
/// retries transient failures with exponential backoff. The base URL is
/// injectable so tests can point at a mock server.
pub struct YahooGateway {
    client: reqwest::Client,
    base_url: String,
    fear_greed: FearGreedClient,
    crumb: RwLock<Option<String>>,
    retry_policy: ExponentialBuilder,
}

impl YahooGateway {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(YAHOO_USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            client,
            base_url: base_url.into(),
            fear_greed: FearGreedClient::new(),
            crumb: RwLock::new(None),
            retry_policy: ExponentialBuilder::default().with_max_times(3),
        }
    }

    pub fn with_fear_greed(mut self, fear_greed: FearGreedClient) -> Self {
        self.fear_greed = fear_greed;
        self
    }

    /// Override the backoff policy (tests use a near-zero one).
    pub fn with_retry_policy(mut self, retry_policy: ExponentialBuilder) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    /// The crumb can fail on some networks; treat it as best-effort.
    async fn fetch_crumb(&self) -> Option<String> {
        let url = format!("{}/v1/test/getcrumb", self.base_url);
        let response = self.client.get(&url).send().await.ok()?;
        if !response.status().is_success() {
            return None;
        }
        let text = response.text().await.ok()?;
        let crumb = text.trim().to_string();
        if crumb.is_empty() {
            None
        } else {
            Some(crumb)
        }
    }

    async fn fetch_chart_once(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PriceBar>, CoreError> {
        let url = format!("{}/v8/finance/chart/{}", self.base_url, ticker);
        let period1 = start
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc().timestamp())
            .unwrap_or(0);
        let period2 = end
            .and_hms_opt(23, 59, 59)
            .map(|dt| dt.and_utc().timestamp())
            .unwrap_or(0);

        let mut params: Vec<(&str, String)> = vec![
            ("period1", period1.to_string()),
            ("period2", period2.to_string()),
            ("interval", "1d".to_string()),
            ("includePrePost", "false".to_string()),
        ];
        if let Some(crumb) = self.crumb.read().await.clone() {
            params.push(("crumb", crumb));
        }

        let mut response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| CoreError::DataUnavailable(format!("chart request failed: {e}")))?;

        // Rate limited without a crumb: fetch one and try again.
        if response.status().as_u16() == 429 && self.crumb.read().await.is_none() {
            if let Some(crumb) = self.fetch_crumb().await {
                debug!(ticker, "retrying chart request with fresh crumb");
                let mut retry_params = params.clone();
                retry_params.push(("crumb", crumb.clone()));
                *self.crumb.write().await = Some(crumb);
                response = self
                    .client
                    .get(&url)
                    .query(&retry_params)
                    .send()
                    .await
                    .map_err(|e| {
                        CoreError::DataUnavailable(format!("chart request failed: {e}"))
                    })?;
            }
        }

        if !response.status().is_success() {
            return Err(CoreError::DataUnavailable(format!(
                "chart request for {} returned HTTP {}",
                ticker,
                response.status()
            )));
        }

        let body: ChartResponse = response
            .json()
            .await
            .map_err(|e| CoreError::DataUnavailable(format!("chart response malformed: {e}")))?;
        parse_chart(ticker, body)
    }
}

impl Default for YahooGateway {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_chart(ticker: &str, body: ChartResponse) -> Result<Vec<PriceBar>, CoreError> {
    if let Some(err) = body.chart.error {
        return Err(CoreError::DataUnavailable(format!(
            "chart API error for {ticker}: {err}"
        )));
    }
    let result = body
        .chart
        .result
        .and_then(|mut r| if r.is_empty() { None } else { Some(r.remove(0)) })
        .ok_or_else(|| CoreError::DataUnavailable(format!("empty chart result for {ticker}")))?;

    let timestamps = result.timestamp.unwrap_or_default();
    let closes = result
        .indicators
        .quote
        .first()
        .and_then(|q| q.close.clone())
        .unwrap_or_default();

    let mut bars = Vec::with_capacity(timestamps.len());
    for (ts, close) in timestamps.iter().zip(closes.iter()) {
        // Holidays and half-days come back as nulls; drop them.
        let Some(close) = close else { continue };
        let Some(date) = DateTime::from_timestamp(*ts, 0).map(|dt| dt.date_naive()) else {
            continue;
        };
        bars.push(PriceBar::new(date, ticker, *close));
    }
    // One bar per trading day: Yahoo occasionally repeats the live bar.
    bars.dedup_by(|a, b| a.date == b.date);
    Ok(bars)
}

#[async_trait]
impl MarketDataGateway for YahooGateway {
    async fn fetch_price_history(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PriceBar>, CoreError> {
        let fetch = || self.fetch_chart_once(ticker, start, end);
        fetch
            .retry(self.retry_policy)
            .when(|e| matches!(e, CoreError::DataUnavailable(_)))
            .notify(|err, dur| {
                warn!(ticker, error = %err, backoff_ms = dur.as_millis() as u64, "retrying price history fetch");
            })
            .await
    }

    async fn fetch_macro(&self, date: NaiveDate) -> Result<MacroSnapshot, CoreError> {
        let start = date - ChronoDuration::days(14);

        let latest_close = |ticker: &'static str| async move {
            match self.fetch_price_history(ticker, start, date).await {
                Ok(bars) => bars.last().map(|b| b.close),
                Err(e) => {
                    warn!(ticker, error = %e, "macro leg unavailable");
                    None
                }
            }
        };

        let vix = latest_close("^VIX").await;
        let tnx = latest_close("^TNX").await;
        let soxx = latest_close("SOXX").await;
        let qqq = latest_close("QQQ").await;
        let xlp = latest_close("XLP").await;
        let xly = latest_close("XLY").await;

        let fear_greed = match self.fear_greed.fetch().await {
            Ok((score, _rating)) => Some(score.round() as i32),
            Err(e) => {
                warn!(error = %e, "fear & greed unavailable");
                None
            }
        };

        let snapshot = MacroSnapshot {
            date,
            vix_close: vix,
            fear_greed_index: fear_greed,
            us10y_yield: tnx,
            soxx_qqq_ratio: latest_ratio(soxx, qqq),
            xlp_xly_ratio: latest_ratio(xlp, xly),
        };

        if snapshot.vix_close.is_none()
            && snapshot.fear_greed_index.is_none()
            && snapshot.us10y_yield.is_none()
            && snapshot.soxx_qqq_ratio.is_none()
            && snapshot.xlp_xly_ratio.is_none()
        {
            return Err(CoreError::DataUnavailable(
                "all macro providers failed".to_string(),
            ));
        }
        Ok(snapshot)
    }
}
