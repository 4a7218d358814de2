use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One daily close for one ticker. Unique per (date, ticker).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub ticker: String,
    pub close: f64,
}

impl PriceBar {
    pub fn new(date: NaiveDate, ticker: impl Into<String>, close: f64) -> Self {
        Self {
            date,
            ticker: ticker.into(),
            close,
        }
    }
}

/// Derived per-asset metrics for one trading day.
///
/// Indicator fields are `None` when the price history behind this date was
/// too short; the row is still persisted so the close survives. Immutable
/// once computed unless the upstream price series is corrected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub date: NaiveDate,
    pub ticker: String,
    pub close: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rsi_14: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ma200_dist_pct: Option<f64>,
}

/// Per-calendar-date macro indicators, independent of ticker.
///
/// Each field comes from its own provider and fails independently, so all
/// values are optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroSnapshot {
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vix_close: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fear_greed_index: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub us10y_yield: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soxx_qqq_ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xlp_xly_ratio: Option<f64>,
}

impl MacroSnapshot {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            vix_close: None,
            fear_greed_index: None,
            us10y_yield: None,
            soxx_qqq_ratio: None,
            xlp_xly_ratio: None,
        }
    }
}
