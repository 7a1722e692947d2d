//! Deterministic multi-factor credit scoring.
//!
//! Six independently normalized sub-scores (income, repayment history, account age, recent
//! transaction activity, debt-to-income ratio and identity verification) are combined with fixed
//! weights into a 0-100 score and a coarse bucket used by the dashboard.

mod config;
mod factors;

pub use config::{
    KycScoreTable, ScoringConfig, ScoringWeights, ScoringWeightsError,
    DEFAULT_ACTIVITY_WINDOW_DAYS, MAX_ACTIVITY_WINDOW_DAYS,
};
pub use factors::{clamp_score, normalize};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{Customer, CustomerId, Transaction};

/// Direction in which a factor pushes the overall assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorImpact {
    Positive,
    Negative,
    Neutral,
}

/// Discrete contribution to a credit score, kept for transparent display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreFactor {
    pub name: String,
    pub impact: FactorImpact,
    pub weight: f64,
    /// Normalized sub-score on a 0-100 scale.
    pub value: f64,
    pub description: String,
}

impl ScoreFactor {
    pub(crate) fn new(
        name: &str,
        impact: FactorImpact,
        weight: f64,
        value: f64,
        description: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            impact,
            weight,
            value,
            description: description.to_string(),
        }
    }

    pub fn weighted_value(&self) -> f64 {
        self.value * self.weight
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBucket {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl ScoreBucket {
    pub fn from_score(score: u8) -> Self {
        if score >= 80 {
            ScoreBucket::Excellent
        } else if score >= 65 {
            ScoreBucket::Good
        } else if score >= 50 {
            ScoreBucket::Fair
        } else {
            ScoreBucket::Poor
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreBucket::Excellent => "excellent",
            ScoreBucket::Good => "good",
            ScoreBucket::Fair => "fair",
            ScoreBucket::Poor => "poor",
        }
    }
}

/// Composite score and the factor trail that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditScore {
    pub customer_id: CustomerId,
    pub score: u8,
    pub bucket: ScoreBucket,
    /// Income, repayment history, account age, transaction activity, debt-to-income, identity
    /// verification, always in this order.
    pub factors: Vec<ScoreFactor>,
    pub calculated_at: DateTime<Utc>,
}

impl CreditScore {
    pub fn factor(&self, name: &str) -> Option<&ScoreFactor> {
        self.factors.iter().find(|factor| factor.name == name)
    }
}

/// Stateless scorer that applies a [`ScoringConfig`] to a customer snapshot.
#[derive(Debug, Clone, Default)]
pub struct CreditScoringEngine {
    config: ScoringConfig,
}

impl CreditScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn score(&self, customer: &Customer, transactions: &[Transaction]) -> CreditScore {
        self.score_at(customer, transactions, Utc::now())
    }

    /// Score against an explicit reference time. The activity window and `calculated_at` both
    /// derive from `now`.
    pub fn score_at(
        &self,
        customer: &Customer,
        transactions: &[Transaction],
        now: DateTime<Utc>,
    ) -> CreditScore {
        let weights = &self.config.weights;
        let recent = factors::recent_activity(
            customer,
            transactions,
            now,
            self.config.activity_window_days,
        );

        let factors = vec![
            factors::income_factor(customer.income, weights),
            factors::repayment_factor(customer.repayment_history, weights),
            factors::account_age_factor(customer.account_age, weights),
            factors::activity_factor(recent, weights),
            factors::debt_to_income_factor(customer.loan_balance, customer.income, weights),
            factors::identity_factor(customer.kyc_status, &self.config.kyc_scores, weights),
        ];

        let total: f64 = factors.iter().map(ScoreFactor::weighted_value).sum();
        let score = clamp_score(total.round()) as u8;
        let bucket = ScoreBucket::from_score(score);

        debug!(
            customer_id = %customer.id,
            score,
            bucket = bucket.as_str(),
            recent_transactions = recent,
            "credit score calculated"
        );

        CreditScore {
            customer_id: customer.id.clone(),
            score,
            bucket,
            factors,
            calculated_at: now,
        }
    }
}

/// Score a customer with the default weights and lookup tables.
pub fn calculate_credit_score(customer: &Customer, transactions: &[Transaction]) -> CreditScore {
    CreditScoringEngine::default().score(customer, transactions)
}
