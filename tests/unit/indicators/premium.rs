//! Unit tests for the cross-listed ETF premium calculation

use alphapilot::error::CoreError;
use alphapilot::indicators::premium::{
    classify_premium, compute_premiums, estimated_nav, premium_pct, FundQuote, PremiumAction,
};

fn quote(code: &str, price: Option<f64>, nav: Option<f64>) -> FundQuote {
    FundQuote {
        code: code.to_string(),
        name: format!("fund {code}"),
        price,
        nav,
    }
}

#[test]
fn estimated_nav_applies_futures_and_fx_moves() {
    // +2% futures, +1% FX: 1.0 * 1.02 * 1.01
    let est = estimated_nav(1.0, 2.0, 1.0);
    assert!((est - 1.0302).abs() < 1e-12);
}

#[test]
fn estimated_nav_with_flat_context_is_the_nav() {
    assert_eq!(estimated_nav(1.234, 0.0, 0.0), 1.234);
}

#[test]
fn premium_is_signed_percentage_over_estimate() {
    assert!((premium_pct(1.03, 1.0).unwrap() - 3.0).abs() < 1e-9);
    assert!((premium_pct(0.97, 1.0).unwrap() + 3.0).abs() < 1e-9);
}

#[test]
fn non_positive_estimate_is_invalid_input() {
    let err = premium_pct(1.0, 0.0).unwrap_err();
    assert!(matches!(err, CoreError::InvalidInput(_)));
    let err = premium_pct(1.0, f64::NAN).unwrap_err();
    assert!(matches!(err, CoreError::InvalidInput(_)));
}

#[test]
fn action_bands_match_the_thresholds() {
    assert_eq!(classify_premium(-0.5), PremiumAction::Buy);
    assert_eq!(classify_premium(0.0), PremiumAction::Hold);
    assert_eq!(classify_premium(2.0), PremiumAction::Hold);
    assert_eq!(classify_premium(2.5), PremiumAction::Watch);
    assert_eq!(classify_premium(3.0), PremiumAction::Watch);
    assert_eq!(classify_premium(3.1), PremiumAction::Sell);
}

#[test]
fn batch_computes_each_fund_against_one_context() {
    let quotes = vec![
        quote("513100", Some(1.03), Some(1.0)),
        quote("159941", Some(0.99), Some(1.0)),
    ];
    let snapshots = compute_premiums(&quotes, Some(0.0), Some(0.0));

    assert_eq!(snapshots.len(), 2);
    assert!((snapshots[0].premium_pct.unwrap() - 3.0).abs() < 1e-9);
    assert_eq!(snapshots[0].action, Some(PremiumAction::Watch));
    assert!((snapshots[1].premium_pct.unwrap() + 1.0).abs() < 1e-9);
    assert_eq!(snapshots[1].action, Some(PremiumAction::Buy));
}

#[test]
fn missing_fund_inputs_leave_derived_fields_empty() {
    let quotes = vec![
        quote("513100", None, Some(1.0)),
        quote("159941", Some(1.0), None),
        quote("161128", Some(1.01), Some(1.0)),
    ];
    let snapshots = compute_premiums(&quotes, Some(1.0), Some(0.0));

    assert_eq!(snapshots[0].premium_pct, None);
    assert_eq!(snapshots[0].action, None);
    assert_eq!(snapshots[1].premium_pct, None);
    // The healthy fund still gets its premium.
    assert!(snapshots[2].premium_pct.is_some());
}

#[test]
fn missing_futures_move_disables_estimation() {
    let quotes = vec![quote("513100", Some(1.03), Some(1.0))];
    let snapshots = compute_premiums(&quotes, None, Some(0.0));
    assert_eq!(snapshots[0].estimated_nav, None);
    assert_eq!(snapshots[0].premium_pct, None);
}

#[test]
fn missing_fx_move_degrades_to_zero() {
    let quotes = vec![quote("513100", Some(1.02), Some(1.0))];
    let with_fx = compute_premiums(&quotes, Some(2.0), Some(0.0));
    let without_fx = compute_premiums(&quotes, Some(2.0), None);
    assert_eq!(with_fx[0].premium_pct, without_fx[0].premium_pct);
}

#[test]
fn action_labels_are_human_readable() {
    assert_eq!(PremiumAction::Buy.label(), "buy the discount");
    assert_eq!(PremiumAction::Sell.label(), "sell or rotate");
}
