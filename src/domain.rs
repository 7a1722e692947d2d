use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Identifier wrapper for customers known to the dashboard backend.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(pub String);

impl CustomerId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for ledger transactions.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(pub String);

impl TransactionId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity verification state reported by the onboarding flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KycStatus {
    Verified,
    Pending,
    Failed,
    #[default]
    NotStarted,
}

/// Snapshot of a customer profile used for a single scoring or rule run.
///
/// Every numeric field carries an explicit default so partially hydrated records coming from the
/// backend still produce a well-defined evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: CustomerId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Annual income.
    #[serde(default)]
    pub income: f64,
    /// Repayment behaviour score on a 0-100 scale, computed upstream.
    #[serde(default)]
    pub repayment_history: f64,
    /// Whole months since the account was opened.
    #[serde(default)]
    pub account_age: u32,
    #[serde(default)]
    pub loan_balance: f64,
    #[serde(default)]
    pub kyc_status: KycStatus,
    #[serde(default)]
    pub documents_provided: BTreeSet<String>,
}

impl Customer {
    /// Bare profile with every optional attribute at its default.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: CustomerId::new(id),
            first_name: None,
            last_name: None,
            country: None,
            income: 0.0,
            repayment_history: 0.0,
            account_age: 0,
            loan_balance: 0.0,
            kyc_status: KycStatus::NotStarted,
            documents_provided: BTreeSet::new(),
        }
    }

    pub fn has_document(&self, document: &str) -> bool {
        self.documents_provided.contains(document)
    }
}

/// Ledger entry evaluated by the rule engine and counted by the activity factor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TransactionId,
    pub customer_id: CustomerId,
    pub amount: f64,
    pub timestamp: DateTime<Utc>,
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub counterparty_country: Option<String>,
}

impl Transaction {
    pub fn new(
        id: impl Into<String>,
        customer_id: impl Into<String>,
        amount: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: TransactionId::new(id),
            customer_id: CustomerId::new(customer_id),
            amount,
            timestamp,
            counterparty_country: None,
        }
    }

    pub fn with_counterparty_country(mut self, country: impl Into<String>) -> Self {
        self.counterparty_country = Some(country.into());
        self
    }

    pub fn belongs_to(&self, customer_id: &CustomerId) -> bool {
        &self.customer_id == customer_id
    }
}

pub(crate) fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty()))
}
