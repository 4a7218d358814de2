//! Unit tests for the ordered decision list

use alphapilot::models::Signal;
use alphapilot::signals::rules::DECISION_LIST;

#[test]
fn list_has_five_rules_ending_in_a_catch_all() {
    assert_eq!(DECISION_LIST.len(), 5);
    let last = DECISION_LIST.last().unwrap();
    assert_eq!(last.signal, Signal::NormalDca);
    assert!((last.predicate)(0.0, 0.0));
    assert!((last.predicate)(100.0, 1000.0));
}

#[test]
fn great_buy_is_checked_before_oversold() {
    // Both predicates hold for (20, -5); position in the list decides.
    let great_buy = DECISION_LIST
        .iter()
        .position(|r| r.signal == Signal::GreatBuy)
        .unwrap();
    let oversold = DECISION_LIST
        .iter()
        .position(|r| r.signal == Signal::OversoldBuy)
        .unwrap();
    assert!(great_buy < oversold);
    assert!((DECISION_LIST[great_buy].predicate)(20.0, -5.0));
    assert!((DECISION_LIST[oversold].predicate)(20.0, -5.0));
}

#[test]
fn severe_overbought_is_checked_before_overvalued() {
    let overbought = DECISION_LIST
        .iter()
        .position(|r| r.signal == Signal::SevereOverbought)
        .unwrap();
    let overvalued = DECISION_LIST
        .iter()
        .position(|r| r.signal == Signal::Overvalued)
        .unwrap();
    assert!(overbought < overvalued);
    assert!((DECISION_LIST[overbought].predicate)(80.0, 25.0));
    assert!((DECISION_LIST[overvalued].predicate)(80.0, 25.0));
}

#[test]
fn first_match_wins() {
    let matched = DECISION_LIST
        .iter()
        .find(|r| (r.predicate)(20.0, -5.0))
        .unwrap();
    assert_eq!(matched.signal, Signal::GreatBuy);

    let matched = DECISION_LIST
        .iter()
        .find(|r| (r.predicate)(80.0, 25.0))
        .unwrap();
    assert_eq!(matched.signal, Signal::SevereOverbought);
}

#[test]
fn rule_names_are_unique() {
    let mut names: Vec<&str> = DECISION_LIST.iter().map(|r| r.name).collect();
    names.sort();
    names.dedup();
    assert_eq!(names.len(), DECISION_LIST.len());
}
