//! Credit scoring and compliance rule evaluation for the fraud-operations dashboard.
//!
//! Both engines are pure: they take a [`domain::Customer`] and a slice of
//! [`domain::Transaction`]s, read the clock at most once per call, and return value objects for
//! the presentation layer to render.

pub mod config;
pub mod domain;
pub mod error;
pub mod format;
pub mod ingest;
pub mod rules;
pub mod scoring;
pub mod telemetry;

pub use domain::{Customer, CustomerId, KycStatus, Transaction, TransactionId};
pub use rules::{
    create_audit_log, run_all_transaction_rules, AuditLog, AuditOutcome, RuleEngine, RuleId,
    RuleResult, RuleSummary, Severity,
};
pub use scoring::{calculate_credit_score, CreditScore, CreditScoringEngine, ScoreBucket};
