use serde::Serialize;

use crate::domain::KycStatus;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;
pub const DEFAULT_ACTIVITY_WINDOW_DAYS: u32 = 30;
/// Longest activity window accepted from configuration (ten years).
pub const MAX_ACTIVITY_WINDOW_DAYS: u32 = 3_650;

/// Relative weight of each factor in the composite score. The six weights sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoringWeights {
    income: f64,
    repayment_history: f64,
    account_age: f64,
    transaction_activity: f64,
    debt_to_income: f64,
    identity_verification: f64,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoringWeightsError {
    #[error("weight for {factor} must be a finite, non-negative number (found {value})")]
    InvalidWeight { factor: &'static str, value: f64 },
    #[error("scoring weights must sum to 1.0 (found {sum})")]
    SumMismatch { sum: f64 },
}

impl ScoringWeights {
    pub fn new(
        income: f64,
        repayment_history: f64,
        account_age: f64,
        transaction_activity: f64,
        debt_to_income: f64,
        identity_verification: f64,
    ) -> Result<Self, ScoringWeightsError> {
        let weights = Self {
            income,
            repayment_history,
            account_age,
            transaction_activity,
            debt_to_income,
            identity_verification,
        };

        for (factor, value) in weights.labelled() {
            if !value.is_finite() || value < 0.0 {
                return Err(ScoringWeightsError::InvalidWeight { factor, value });
            }
        }

        let sum = weights.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ScoringWeightsError::SumMismatch { sum });
        }

        Ok(weights)
    }

    pub fn income(&self) -> f64 {
        self.income
    }

    pub fn repayment_history(&self) -> f64 {
        self.repayment_history
    }

    pub fn account_age(&self) -> f64 {
        self.account_age
    }

    pub fn transaction_activity(&self) -> f64 {
        self.transaction_activity
    }

    pub fn debt_to_income(&self) -> f64 {
        self.debt_to_income
    }

    pub fn identity_verification(&self) -> f64 {
        self.identity_verification
    }

    pub fn sum(&self) -> f64 {
        self.labelled().iter().map(|(_, value)| value).sum()
    }

    fn labelled(&self) -> [(&'static str, f64); 6] {
        [
            ("income", self.income),
            ("repayment history", self.repayment_history),
            ("account age", self.account_age),
            ("transaction activity", self.transaction_activity),
            ("debt-to-income", self.debt_to_income),
            ("identity verification", self.identity_verification),
        ]
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            income: 0.20,
            repayment_history: 0.30,
            account_age: 0.15,
            transaction_activity: 0.10,
            debt_to_income: 0.15,
            identity_verification: 0.10,
        }
    }
}

/// Sub-score awarded for each identity verification state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KycScoreTable {
    pub verified: f64,
    pub pending: f64,
    pub failed: f64,
    pub not_started: f64,
}

impl KycScoreTable {
    pub fn score_for(&self, status: KycStatus) -> f64 {
        let raw = match status {
            KycStatus::Verified => self.verified,
            KycStatus::Pending => self.pending,
            KycStatus::Failed => self.failed,
            KycStatus::NotStarted => self.not_started,
        };
        super::factors::clamp_score(raw)
    }
}

impl Default for KycScoreTable {
    fn default() -> Self {
        Self {
            verified: 100.0,
            pending: 60.0,
            failed: 20.0,
            not_started: 0.0,
        }
    }
}

/// Immutable configuration owned by a [`super::CreditScoringEngine`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoringConfig {
    pub weights: ScoringWeights,
    pub kyc_scores: KycScoreTable,
    /// Trailing window, in days, used by the transaction activity factor.
    pub activity_window_days: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            kyc_scores: KycScoreTable::default(),
            activity_window_days: DEFAULT_ACTIVITY_WINDOW_DAYS,
        }
    }
}
