use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::RuleResult;
use crate::domain::{CustomerId, TransactionId};

/// Outcome recorded in the audit trail.
///
/// `Fail` exists for records written by other systems. [`create_audit_log`] only ever emits
/// `Pass` or `Flag`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditOutcome {
    Pass,
    Fail,
    Flag,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLog {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub rule_id: String,
    pub rule_name: String,
    pub customer_id: CustomerId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<TransactionId>,
    pub result: AuditOutcome,
    pub details: String,
}

pub fn create_audit_log(
    result: &RuleResult,
    customer_id: &CustomerId,
    transaction_id: Option<&TransactionId>,
) -> AuditLog {
    create_audit_log_at(result, customer_id, transaction_id, Utc::now())
}

pub fn create_audit_log_at(
    result: &RuleResult,
    customer_id: &CustomerId,
    transaction_id: Option<&TransactionId>,
    now: DateTime<Utc>,
) -> AuditLog {
    let outcome = if result.passed {
        AuditOutcome::Pass
    } else {
        AuditOutcome::Flag
    };

    AuditLog {
        id: audit_log_id(now),
        timestamp: now,
        rule_id: result.rule_id.as_str().to_string(),
        rule_name: result.rule_name.clone(),
        customer_id: customer_id.clone(),
        transaction_id: transaction_id.cloned(),
        result: outcome,
        details: result.details.clone(),
    }
}

fn audit_log_id(now: DateTime<Utc>) -> String {
    let token = Uuid::new_v4().simple().to_string();
    format!("log_{}_{}", now.timestamp_millis(), &token[..9])
}
