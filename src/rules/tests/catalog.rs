use chrono::{Duration, TimeZone, Utc};

use super::common::*;
use crate::domain::{CustomerId, Transaction};
use crate::rules::{
    check_account_age, check_country_restriction, check_income_ratio, check_kyc_documents,
    check_large_transaction, check_transaction_velocity, CountryBlacklist, RuleId, Severity,
};

#[test]
fn large_transaction_boundaries() {
    let at_threshold = check_large_transaction(&transaction("t1", 10_000.0), 10_000.0);
    assert!(at_threshold.passed);
    assert_eq!(at_threshold.severity, None);
    assert_eq!(
        at_threshold.details,
        "Transaction amount $10,000 within threshold"
    );

    let just_over = check_large_transaction(&transaction("t2", 10_000.01), 10_000.0);
    assert!(!just_over.passed);
    assert_eq!(just_over.severity, Some(Severity::High));
    assert_eq!(
        just_over.details,
        "Transaction amount $10,000.01 exceeds threshold of $10,000"
    );

    let at_five_times = check_large_transaction(&transaction("t3", 50_000.0), 10_000.0);
    assert_eq!(at_five_times.severity, Some(Severity::High));

    let over_five_times = check_large_transaction(&transaction("t4", 50_000.01), 10_000.0);
    assert_eq!(over_five_times.severity, Some(Severity::Critical));
    assert_eq!(over_five_times.rule_id, RuleId::LargeTransaction);
    assert_eq!(over_five_times.rule_name, "Large Transaction Threshold");
}

#[test]
fn velocity_window_includes_lower_bound() {
    let customer_id = CustomerId::new("cust-001");
    let mut transactions = burst("cust-001", 5);
    transactions.push(Transaction::new(
        "edge",
        "cust-001",
        10.0,
        now() - Duration::minutes(60),
    ));

    let result = check_transaction_velocity(&transactions, &customer_id, 60, 5, now());

    assert!(!result.passed);
    assert_eq!(result.severity, Some(Severity::High));
    assert_eq!(
        result.details,
        "6 transactions detected within 60-minute window"
    );
}

#[test]
fn velocity_ignores_other_customers_and_stale_entries() {
    let customer_id = CustomerId::new("cust-001");
    let mut transactions = burst("cust-001", 5);
    transactions.extend(burst("cust-999", 20));
    transactions.push(Transaction::new(
        "stale",
        "cust-001",
        10.0,
        now() - Duration::minutes(61),
    ));

    let result = check_transaction_velocity(&transactions, &customer_id, 60, 5, now());

    assert!(result.passed);
    assert_eq!(
        result.details,
        "5 transactions in 60-minute window (within limit)"
    );
}

#[test]
fn velocity_escalates_past_double_the_limit() {
    let customer_id = CustomerId::new("cust-001");

    let doubled = check_transaction_velocity(&burst("cust-001", 10), &customer_id, 60, 5, now());
    assert_eq!(doubled.severity, Some(Severity::High));

    let beyond = check_transaction_velocity(&burst("cust-001", 11), &customer_id, 60, 5, now());
    assert_eq!(beyond.severity, Some(Severity::Critical));
}

#[test]
fn velocity_with_empty_history_passes() {
    let result = check_transaction_velocity(&[], &CustomerId::new("cust-001"), 60, 5, now());
    assert!(result.passed);
    assert_eq!(result.details, "0 transactions in 60-minute window (within limit)");
}

#[test]
fn country_restriction() {
    let blacklist = CountryBlacklist::default();

    let unknown = check_country_restriction(&transaction("t1", 10.0), &blacklist);
    assert!(unknown.passed);
    assert_eq!(
        unknown.details,
        "Transaction does not involve restricted jurisdictions"
    );

    let allowed = check_country_restriction(
        &transaction("t2", 10.0).with_counterparty_country("US"),
        &blacklist,
    );
    assert!(allowed.passed);

    let restricted = check_country_restriction(
        &transaction("t3", 10.0).with_counterparty_country("kp"),
        &blacklist,
    );
    assert!(!restricted.passed);
    assert_eq!(restricted.severity, Some(Severity::Critical));
    assert_eq!(
        restricted.details,
        "Transaction involves restricted jurisdiction: kp"
    );
}

#[test]
fn kyc_documents_lists_missing_in_required_order() {
    let mut profile = customer();
    profile.documents_provided.clear();
    profile.documents_provided.insert("drivers_license".to_string());

    let result = check_kyc_documents(&profile, &["passport", "utility_bill"]);

    assert!(!result.passed);
    assert_eq!(result.severity, Some(Severity::Medium));
    assert_eq!(
        result.details,
        "Missing required documents: passport, utility_bill"
    );

    let complete = check_kyc_documents(&customer(), &["passport", "utility_bill"]);
    assert!(complete.passed);
    assert_eq!(complete.details, "All required documents provided");
}

#[test]
fn kyc_documents_with_no_requirements_passes() {
    let mut profile = customer();
    profile.documents_provided.clear();
    let none: [&str; 0] = [];
    assert!(check_kyc_documents(&profile, &none).passed);
}

#[test]
fn account_age_minimum() {
    let mut profile = customer();
    profile.account_age = 3;
    let result = check_account_age(&profile, 3);
    assert!(result.passed);
    assert_eq!(
        result.details,
        "Account age 3 months meets minimum requirement"
    );

    profile.account_age = 1;
    let result = check_account_age(&profile, 3);
    assert!(!result.passed);
    assert_eq!(result.severity, Some(Severity::Low));
    assert_eq!(
        result.details,
        "Account age 1 months below minimum of 3 months"
    );
}

#[test]
fn income_ratio_reports_one_decimal_percentage() {
    let result = check_income_ratio(&transaction("t1", 600.0), &customer(), 0.5);

    assert!(!result.passed);
    assert_eq!(result.severity, Some(Severity::Medium));
    assert_eq!(
        result.details,
        "Transaction is 60.0% of monthly income (exceeds 50% threshold)"
    );
}

#[test]
fn income_ratio_severity_and_pass() {
    let within = check_income_ratio(&transaction("t1", 500.0), &customer(), 0.5);
    assert!(within.passed);
    assert_eq!(
        within.details,
        "Transaction is 50.0% of monthly income (within limit)"
    );

    let at_double = check_income_ratio(&transaction("t2", 1_000.0), &customer(), 0.5);
    assert_eq!(at_double.severity, Some(Severity::Medium));

    let beyond = check_income_ratio(&transaction("t3", 1_000.5), &customer(), 0.5);
    assert_eq!(beyond.severity, Some(Severity::High));
}

#[test]
fn income_ratio_with_zero_income() {
    let mut profile = customer();
    profile.income = 0.0;

    let flagged = check_income_ratio(&transaction("t1", 600.0), &profile, 0.5);
    assert!(!flagged.passed);
    assert_eq!(flagged.severity, Some(Severity::High));
    assert_eq!(
        flagged.details,
        "Transaction of $600 cannot be compared against zero monthly income"
    );

    let empty = check_income_ratio(&transaction("t2", 0.0), &profile, 0.5);
    assert!(empty.passed);
    assert_eq!(empty.severity, None);
}

#[test]
fn velocity_with_widest_window_counts_whole_history() {
    let customer_id = CustomerId::new("cust-001");
    let mut transactions = burst("cust-001", 3);
    transactions.push(Transaction::new(
        "archived",
        "cust-001",
        10.0,
        Utc.with_ymd_and_hms(1900, 1, 1, 0, 0, 0).unwrap(),
    ));

    let result = check_transaction_velocity(&transactions, &customer_id, u32::MAX, 3, now());

    assert!(!result.passed);
    assert_eq!(
        result.details,
        format!("4 transactions detected within {}-minute window", u32::MAX)
    );
}

#[test]
fn income_ratio_with_unbounded_income_passes() {
    let mut profile = customer();
    profile.income = f64::INFINITY;

    let result = check_income_ratio(&transaction("t1", 600.0), &profile, 0.5);

    assert!(result.passed);
    assert_eq!(
        result.details,
        "Transaction is 0.0% of monthly income (within limit)"
    );

    profile.income = f64::NAN;
    let undefined = check_income_ratio(&transaction("t2", 600.0), &profile, 0.5);
    assert!(!undefined.passed);
    assert_eq!(undefined.severity, Some(Severity::High));
}
