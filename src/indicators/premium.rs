//! Cross-listed ETF premium over estimated NAV
//!
//! A-share funds tracking US indexes trade while the underlying market is
//! closed, so the reference NAV is yesterday's NAV adjusted by the overnight
//! index futures move and the USD/CNY move. Quote and NAV inputs are
//! injected; fetching them is a provider concern.

use crate::error::CoreError;

/// Premium above which rotation out of the fund is suggested.
pub const PREMIUM_SELL_PCT: f64 = 3.0;
/// Upper bound of the normal holding range.
pub const PREMIUM_ELEVATED_PCT: f64 = 2.0;

/// Suggested handling of a fund at a given premium level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PremiumAction {
    /// Discount to estimated NAV.
    Buy,
    /// Premium in the normal 0-2% range.
    Hold,
    /// Premium between 2% and 3%.
    Watch,
    /// Premium above 3%.
    Sell,
}

impl PremiumAction {
    pub fn label(&self) -> &'static str {
        match self {
            PremiumAction::Buy => "buy the discount",
            PremiumAction::Hold => "hold",
            PremiumAction::Watch => "wait",
            PremiumAction::Sell => "sell or rotate",
        }
    }
}

/// Raw per-fund inputs: the live exchange price and yesterday's unit NAV.
/// Either leg may be missing when its provider fails.
#[derive(Debug, Clone, PartialEq)]
pub struct FundQuote {
    pub code: String,
    pub name: String,
    pub price: Option<f64>,
    pub nav: Option<f64>,
}

/// Premium computation result for one fund. `estimated_nav`, `premium_pct`
/// and `action` stay `None` when any required input was missing.
#[derive(Debug, Clone, PartialEq)]
pub struct PremiumSnapshot {
    pub code: String,
    pub name: String,
    pub price: Option<f64>,
    pub nav: Option<f64>,
    pub estimated_nav: Option<f64>,
    pub premium_pct: Option<f64>,
    pub action: Option<PremiumAction>,
}

/// Yesterday's NAV carried forward by the overnight futures move and the
/// FX move: `nav * (1 + future_change_pct/100) * (1 + fx_change_pct/100)`.
pub fn estimated_nav(nav: f64, future_change_pct: f64, fx_change_pct: f64) -> f64 {
    nav * (1.0 + future_change_pct / 100.0) * (1.0 + fx_change_pct / 100.0)
}

/// Percentage premium of the live price over the estimated NAV.
///
/// Negative means the fund trades at a discount. A non-positive or
/// non-finite NAV is `InvalidInput`; there is nothing meaningful to divide
/// by.
pub fn premium_pct(price: f64, estimated_nav: f64) -> Result<f64, CoreError> {
    if !price.is_finite() {
        return Err(CoreError::InvalidInput(format!(
            "price is not a finite number: {price}"
        )));
    }
    if !estimated_nav.is_finite() || estimated_nav <= 0.0 {
        return Err(CoreError::InvalidInput(format!(
            "estimated NAV must be a positive finite number, got {estimated_nav}"
        )));
    }
    Ok((price - estimated_nav) / estimated_nav * 100.0)
}

/// Map a premium percentage to a suggested action.
///
/// Boundaries: exactly 0 and exactly 2 are Hold, exactly 3 is Watch.
pub fn classify_premium(premium_pct: f64) -> PremiumAction {
    if premium_pct > PREMIUM_SELL_PCT {
        PremiumAction::Sell
    } else if premium_pct < 0.0 {
        PremiumAction::Buy
    } else if premium_pct <= PREMIUM_ELEVATED_PCT {
        PremiumAction::Hold
    } else {
        PremiumAction::Watch
    }
}

/// Compute premium snapshots for a batch of funds against one market
/// context.
///
/// A missing futures move disables estimation entirely (the adjustment is
/// the point of the calculation); a missing FX move degrades to zero, as a
/// currency peg day would. Per-fund input gaps leave that fund's derived
/// fields `None` without affecting the others.
pub fn compute_premiums(
    quotes: &[FundQuote],
    future_change_pct: Option<f64>,
    fx_change_pct: Option<f64>,
) -> Vec<PremiumSnapshot> {
    quotes
        .iter()
        .map(|quote| {
            let derived = match (quote.price, quote.nav, future_change_pct) {
                (Some(price), Some(nav), Some(future)) => {
                    let est = estimated_nav(nav, future, fx_change_pct.unwrap_or(0.0));
                    premium_pct(price, est)
                        .ok()
                        .map(|pct| (est, pct, classify_premium(pct)))
                }
                _ => None,
            };
            match derived {
                Some((est, pct, action)) => PremiumSnapshot {
                    code: quote.code.clone(),
                    name: quote.name.clone(),
                    price: quote.price,
                    nav: quote.nav,
                    estimated_nav: Some(est),
                    premium_pct: Some(pct),
                    action: Some(action),
                },
                None => PremiumSnapshot {
                    code: quote.code.clone(),
                    name: quote.name.clone(),
                    price: quote.price,
                    nav: quote.nav,
                    estimated_nav: None,
                    premium_pct: None,
                    action: None,
                },
            }
        })
        .collect()
}
