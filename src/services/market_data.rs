//! Market data gateway interface

use crate::error::CoreError;
use crate::models::{MacroSnapshot, PriceBar};
use async_trait::async_trait;
use chrono::NaiveDate;

/// External collaborator supplying raw daily closes and macro indicators.
///
/// Provider failures surface as `CoreError::DataUnavailable`. Retry policy
/// lives behind this trait; the indicator/signal core never retries.
#[async_trait]
pub trait MarketDataGateway: Send + Sync {
    /// Ordered daily bars for one ticker, ascending by date.
    async fn fetch_price_history(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PriceBar>, CoreError>;

    /// Macro indicators (VIX, Fear & Greed, 10y yield, sector ratios) for a
    /// calendar date. Individual fields may be missing when a provider leg
    /// fails; the whole call fails only when nothing could be fetched.
    async fn fetch_macro(&self, date: NaiveDate) -> Result<MacroSnapshot, CoreError>;
}
