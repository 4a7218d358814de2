//! Environment configuration and the watchlist

use std::env;

/// Core ETFs tracked on the dashboard summary table.
pub const TARGET_ETFS: &[&str] = &["VOO", "QQQ", "QLD", "TQQQ", "SMH", "TLT"];

/// Macro index tickers (Yahoo symbols).
pub const MACRO_TICKERS: &[&str] = &["^VIX", "^TNX"];

/// Sector tickers feeding the SOXX/QQQ and XLP/XLY ratio columns.
pub const L1_TICKERS: &[&str] = &["SOXX", "XLP", "XLY"];

/// Tickers that trigger an oversold alert from the daily job.
pub const ALERT_TICKERS: &[&str] = &["VOO", "QQQ", "SMH", "TLT"];

pub const YAHOO_USER_AGENT: &str = "Mozilla/5.0";
pub const REQUEST_TIMEOUT_SECS: u64 = 15;

/// Current deployment environment, defaulting to sandbox.
pub fn get_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "sandbox".to_string())
}

/// Postgres connection string for the snapshot store.
pub fn get_database_url() -> String {
    env::var("DATABASE_URL")
        .unwrap_or_else(|_| "host=localhost user=alphapilot dbname=alphapilot".to_string())
}

/// Feishu bot webhook for daily alerts; notifications are skipped when unset.
pub fn get_feishu_webhook() -> Option<String> {
    env::var("FEISHU_WEBHOOK").ok().filter(|url| !url.is_empty())
}

/// Every ticker the daily job fetches, deduplicated.
pub fn all_tickers() -> Vec<String> {
    let mut tickers: Vec<String> = TARGET_ETFS
        .iter()
        .chain(MACRO_TICKERS.iter())
        .chain(L1_TICKERS.iter())
        .map(|t| t.to_string())
        .collect();
    tickers.sort();
    tickers.dedup();
    tickers
}
