//! The fixed rule catalog. Each rule is a pure function of its arguments.

use chrono::{DateTime, Duration, Utc};

use super::config::CountryBlacklist;
use super::{RuleId, RuleResult, Severity};
use crate::domain::{Customer, CustomerId, Transaction};
use crate::format::{format_amount, format_percent, format_threshold_percent};

/// RULE_001: flag single transactions above `threshold`.
pub fn check_large_transaction(transaction: &Transaction, threshold: f64) -> RuleResult {
    let amount = transaction.amount;
    if amount <= threshold {
        return RuleResult::pass(
            RuleId::LargeTransaction,
            format!(
                "Transaction amount ${} within threshold",
                format_amount(amount)
            ),
        );
    }

    let severity = if amount > threshold * 5.0 {
        Severity::Critical
    } else {
        Severity::High
    };

    RuleResult::fail(
        RuleId::LargeTransaction,
        format!(
            "Transaction amount ${} exceeds threshold of ${}",
            format_amount(amount),
            format_amount(threshold)
        ),
        severity,
    )
}

/// RULE_002: count the customer's transactions in the trailing window ending at `now`.
///
/// The window's lower bound is inclusive.
pub fn check_transaction_velocity(
    transactions: &[Transaction],
    customer_id: &CustomerId,
    window_minutes: u32,
    max_transactions: usize,
    now: DateTime<Utc>,
) -> RuleResult {
    let window_start = Duration::try_minutes(i64::from(window_minutes))
        .and_then(|window| now.checked_sub_signed(window))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);
    let recent = transactions
        .iter()
        .filter(|tx| tx.belongs_to(customer_id) && tx.timestamp >= window_start)
        .count();

    if recent <= max_transactions {
        return RuleResult::pass(
            RuleId::TransactionVelocity,
            format!("{recent} transactions in {window_minutes}-minute window (within limit)"),
        );
    }

    let severity = if recent > max_transactions.saturating_mul(2) {
        Severity::Critical
    } else {
        Severity::High
    };

    RuleResult::fail(
        RuleId::TransactionVelocity,
        format!("{recent} transactions detected within {window_minutes}-minute window"),
        severity,
    )
}

/// RULE_003: reject counterparties in blacklisted jurisdictions. Unknown country passes.
pub fn check_country_restriction(
    transaction: &Transaction,
    blacklist: &CountryBlacklist,
) -> RuleResult {
    match transaction.counterparty_country.as_deref() {
        Some(country) if blacklist.contains(country) => RuleResult::fail(
            RuleId::CountryRestriction,
            format!("Transaction involves restricted jurisdiction: {country}"),
            Severity::Critical,
        ),
        _ => RuleResult::pass(
            RuleId::CountryRestriction,
            "Transaction does not involve restricted jurisdictions",
        ),
    }
}

/// RULE_004: every required document type must be on file.
pub fn check_kyc_documents<S: AsRef<str>>(customer: &Customer, required_docs: &[S]) -> RuleResult {
    let missing: Vec<&str> = required_docs
        .iter()
        .map(AsRef::as_ref)
        .filter(|doc| !customer.has_document(doc))
        .collect();

    if missing.is_empty() {
        RuleResult::pass(RuleId::KycDocuments, "All required documents provided")
    } else {
        RuleResult::fail(
            RuleId::KycDocuments,
            format!("Missing required documents: {}", missing.join(", ")),
            Severity::Medium,
        )
    }
}

/// RULE_005: accounts younger than `min_months` are flagged.
pub fn check_account_age(customer: &Customer, min_months: u32) -> RuleResult {
    let age = customer.account_age;
    if age >= min_months {
        RuleResult::pass(
            RuleId::AccountAge,
            format!("Account age {age} months meets minimum requirement"),
        )
    } else {
        RuleResult::fail(
            RuleId::AccountAge,
            format!("Account age {age} months below minimum of {min_months} months"),
            Severity::Low,
        )
    }
}

/// RULE_006: compare the transaction amount against one month of declared income.
pub fn check_income_ratio(
    transaction: &Transaction,
    customer: &Customer,
    max_ratio: f64,
) -> RuleResult {
    let monthly_income = customer.income / 12.0;

    if monthly_income <= 0.0 || monthly_income.is_nan() {
        if transaction.amount <= 0.0 {
            return RuleResult::pass(
                RuleId::IncomeRatio,
                format!(
                    "Transaction is {} of monthly income (within limit)",
                    format_percent(0.0)
                ),
            );
        }
        return RuleResult::fail(
            RuleId::IncomeRatio,
            format!(
                "Transaction of ${} cannot be compared against zero monthly income",
                format_amount(transaction.amount)
            ),
            Severity::High,
        );
    }

    let ratio = transaction.amount / monthly_income;
    if ratio <= max_ratio {
        return RuleResult::pass(
            RuleId::IncomeRatio,
            format!(
                "Transaction is {} of monthly income (within limit)",
                format_percent(ratio)
            ),
        );
    }

    let severity = if ratio > max_ratio * 2.0 {
        Severity::High
    } else {
        Severity::Medium
    };

    RuleResult::fail(
        RuleId::IncomeRatio,
        format!(
            "Transaction is {} of monthly income (exceeds {} threshold)",
            format_percent(ratio),
            format_threshold_percent(max_ratio)
        ),
        severity,
    )
}
