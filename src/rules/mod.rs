//! Compliance and fraud rule evaluation.
//!
//! The catalog holds six independent rules. [`RuleEngine`] binds them to a [`RuleConfig`] and
//! exposes the transaction bundle used by the alert triage screens. RULE_004 (KYC documents) is
//! intentionally not part of that bundle and must be requested through
//! [`RuleEngine::check_kyc_documents`] or [`RuleEngine::run_customer_rules`].

mod audit;
mod catalog;
mod config;
mod summary;

#[cfg(test)]
mod tests;

pub use audit::{create_audit_log, create_audit_log_at, AuditLog, AuditOutcome};
pub use catalog::{
    check_account_age, check_country_restriction, check_income_ratio, check_kyc_documents,
    check_large_transaction, check_transaction_velocity,
};
pub use config::{
    CountryBlacklist, RuleConfig, DEFAULT_BLACKLISTED_COUNTRIES,
    DEFAULT_LARGE_TRANSACTION_THRESHOLD, DEFAULT_MAX_INCOME_RATIO,
    DEFAULT_MIN_ACCOUNT_AGE_MONTHS, DEFAULT_REQUIRED_DOCUMENTS, DEFAULT_VELOCITY_MAX_TRANSACTIONS,
    DEFAULT_VELOCITY_WINDOW_MINUTES,
};
pub use summary::RuleSummary;

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{Customer, Transaction};

/// Fixed identifiers of the rule catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RuleId {
    #[serde(rename = "RULE_001")]
    LargeTransaction,
    #[serde(rename = "RULE_002")]
    TransactionVelocity,
    #[serde(rename = "RULE_003")]
    CountryRestriction,
    #[serde(rename = "RULE_004")]
    KycDocuments,
    #[serde(rename = "RULE_005")]
    AccountAge,
    #[serde(rename = "RULE_006")]
    IncomeRatio,
}

impl RuleId {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleId::LargeTransaction => "RULE_001",
            RuleId::TransactionVelocity => "RULE_002",
            RuleId::CountryRestriction => "RULE_003",
            RuleId::KycDocuments => "RULE_004",
            RuleId::AccountAge => "RULE_005",
            RuleId::IncomeRatio => "RULE_006",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RuleId::LargeTransaction => "Large Transaction Threshold",
            RuleId::TransactionVelocity => "Rapid Transaction Velocity",
            RuleId::CountryRestriction => "Blacklisted Country Check",
            RuleId::KycDocuments => "KYC Document Verification",
            RuleId::AccountAge => "Account Age Verification",
            RuleId::IncomeRatio => "Income Ratio Check",
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Alert severity, ordered from least to most urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

/// Verdict of a single rule. `severity` is present exactly when the rule failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleResult {
    pub rule_id: RuleId,
    pub rule_name: String,
    pub passed: bool,
    pub details: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
}

impl RuleResult {
    pub fn pass(rule: RuleId, details: impl Into<String>) -> Self {
        Self {
            rule_id: rule,
            rule_name: rule.name().to_string(),
            passed: true,
            details: details.into(),
            severity: None,
        }
    }

    pub fn fail(rule: RuleId, details: impl Into<String>, severity: Severity) -> Self {
        Self {
            rule_id: rule,
            rule_name: rule.name().to_string(),
            passed: false,
            details: details.into(),
            severity: Some(severity),
        }
    }
}

/// Binds the rule catalog to a fixed configuration. Holds no other state.
#[derive(Debug, Clone, Default)]
pub struct RuleEngine {
    config: RuleConfig,
}

impl RuleEngine {
    pub fn new(config: RuleConfig) -> Self {
        Self { config }
    }

    pub fn check_large_transaction(&self, transaction: &Transaction) -> RuleResult {
        check_large_transaction(transaction, self.config.large_transaction_threshold)
    }

    pub fn check_transaction_velocity(
        &self,
        transactions: &[Transaction],
        customer: &Customer,
        now: DateTime<Utc>,
    ) -> RuleResult {
        check_transaction_velocity(
            transactions,
            &customer.id,
            self.config.velocity_window_minutes,
            self.config.velocity_max_transactions,
            now,
        )
    }

    pub fn check_country_restriction(&self, transaction: &Transaction) -> RuleResult {
        check_country_restriction(transaction, &self.config.blacklisted_countries)
    }

    pub fn check_kyc_documents(&self, customer: &Customer) -> RuleResult {
        check_kyc_documents(customer, &self.config.required_documents)
    }

    pub fn check_account_age(&self, customer: &Customer) -> RuleResult {
        check_account_age(customer, self.config.min_account_age_months)
    }

    pub fn check_income_ratio(&self, transaction: &Transaction, customer: &Customer) -> RuleResult {
        check_income_ratio(transaction, customer, self.config.max_income_ratio)
    }

    pub fn run_transaction_rules(
        &self,
        transaction: &Transaction,
        customer: &Customer,
        all_transactions: &[Transaction],
    ) -> Vec<RuleResult> {
        self.run_transaction_rules_at(transaction, customer, all_transactions, Utc::now())
    }

    /// RULE_001, 002, 003, 005 and 006 in catalog order, whatever their verdicts.
    pub fn run_transaction_rules_at(
        &self,
        transaction: &Transaction,
        customer: &Customer,
        all_transactions: &[Transaction],
        now: DateTime<Utc>,
    ) -> Vec<RuleResult> {
        let results = vec![
            self.check_large_transaction(transaction),
            self.check_transaction_velocity(all_transactions, customer, now),
            self.check_country_restriction(transaction),
            self.check_account_age(customer),
            self.check_income_ratio(transaction, customer),
        ];

        log_failures(&results, customer, Some(transaction));
        results
    }

    /// Account-level checks: RULE_004 and RULE_005.
    pub fn run_customer_rules(&self, customer: &Customer) -> Vec<RuleResult> {
        let results = vec![
            self.check_kyc_documents(customer),
            self.check_account_age(customer),
        ];

        log_failures(&results, customer, None);
        results
    }
}

fn log_failures(results: &[RuleResult], customer: &Customer, transaction: Option<&Transaction>) {
    for result in results.iter().filter(|result| !result.passed) {
        debug!(
            customer_id = %customer.id,
            transaction_id = transaction.map(|tx| tx.id.as_str()),
            rule_id = result.rule_id.as_str(),
            severity = ?result.severity,
            "rule flagged"
        );
    }
}

/// Run the default transaction bundle with the default configuration.
pub fn run_all_transaction_rules(
    transaction: &Transaction,
    customer: &Customer,
    all_transactions: &[Transaction],
) -> Vec<RuleResult> {
    RuleEngine::default().run_transaction_rules(transaction, customer, all_transactions)
}
