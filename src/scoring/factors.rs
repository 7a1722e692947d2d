use chrono::{DateTime, Duration, Utc};

use super::config::{KycScoreTable, ScoringWeights};
use super::{FactorImpact, ScoreFactor};
use crate::domain::{Customer, KycStatus, Transaction};

pub(crate) const INCOME_FLOOR: f64 = 20_000.0;
pub(crate) const INCOME_CEILING: f64 = 200_000.0;
pub(crate) const ACCOUNT_AGE_CEILING_MONTHS: f64 = 60.0;
pub(crate) const ACTIVITY_CEILING: f64 = 30.0;
pub(crate) const ZERO_INCOME_DEBT_SCORE: f64 = 50.0;

/// Clamp a raw score into `[0, 100]`. NaN collapses to the floor.
pub fn clamp_score(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

/// Linearly map `value` from `[min, max]` onto `[0, 100]`, saturating outside the range.
pub fn normalize(value: f64, min: f64, max: f64) -> f64 {
    clamp_score(((value - min) / (max - min)) * 100.0)
}

pub(crate) fn income_factor(income: f64, weights: &ScoringWeights) -> ScoreFactor {
    let value = normalize(income, INCOME_FLOOR, INCOME_CEILING);

    let impact = if income >= 60_000.0 {
        FactorImpact::Positive
    } else if income >= 40_000.0 {
        FactorImpact::Neutral
    } else {
        FactorImpact::Negative
    };

    let description = if income >= 80_000.0 {
        "Strong income level supports creditworthiness"
    } else if income >= 50_000.0 {
        "Moderate income level"
    } else {
        "Lower income may impact credit capacity"
    };

    ScoreFactor::new("Annual Income", impact, weights.income(), value, description)
}

pub(crate) fn repayment_factor(history: f64, weights: &ScoringWeights) -> ScoreFactor {
    let value = clamp_score(history);

    let impact = if history >= 85.0 {
        FactorImpact::Positive
    } else if history >= 70.0 {
        FactorImpact::Neutral
    } else {
        FactorImpact::Negative
    };

    let description = if history >= 90.0 {
        "Excellent payment track record"
    } else if history >= 75.0 {
        "Good payment history with minor issues"
    } else {
        "Payment history needs improvement"
    };

    ScoreFactor::new(
        "Repayment History",
        impact,
        weights.repayment_history(),
        value,
        description,
    )
}

pub(crate) fn account_age_factor(months: u32, weights: &ScoringWeights) -> ScoreFactor {
    let value = normalize(f64::from(months), 0.0, ACCOUNT_AGE_CEILING_MONTHS);

    let (impact, description) = if months >= 24 {
        (
            FactorImpact::Positive,
            "Well-established account relationship",
        )
    } else if months >= 12 {
        (FactorImpact::Neutral, "Developing account history")
    } else {
        (FactorImpact::Negative, "New account with limited history")
    };

    ScoreFactor::new(
        "Account Age",
        impact,
        weights.account_age(),
        value,
        description,
    )
}

/// Count of the customer's transactions at or after `now - window_days`. A window reaching past
/// the representable range counts the whole history.
pub(crate) fn recent_activity(
    customer: &Customer,
    transactions: &[Transaction],
    now: DateTime<Utc>,
    window_days: u32,
) -> usize {
    let window_start = Duration::try_days(i64::from(window_days))
        .and_then(|window| now.checked_sub_signed(window))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);
    transactions
        .iter()
        .filter(|tx| tx.belongs_to(&customer.id) && tx.timestamp >= window_start)
        .count()
}

pub(crate) fn activity_factor(frequency: usize, weights: &ScoringWeights) -> ScoreFactor {
    let value = normalize(frequency as f64, 0.0, ACTIVITY_CEILING);

    let impact = if frequency >= 10 {
        FactorImpact::Positive
    } else if frequency >= 5 {
        FactorImpact::Neutral
    } else {
        FactorImpact::Negative
    };

    let description = if frequency >= 15 {
        "Active account usage demonstrates engagement"
    } else if frequency >= 5 {
        "Moderate account activity"
    } else {
        "Limited recent transaction activity"
    };

    ScoreFactor::new(
        "Transaction Activity",
        impact,
        weights.transaction_activity(),
        value,
        description,
    )
}

pub(crate) fn debt_to_income_factor(
    loan_balance: f64,
    income: f64,
    weights: &ScoringWeights,
) -> ScoreFactor {
    const NAME: &str = "Debt-to-Income Ratio";

    if income == 0.0 {
        return ScoreFactor::new(
            NAME,
            FactorImpact::Neutral,
            weights.debt_to_income(),
            ZERO_INCOME_DEBT_SCORE,
            "Unable to calculate ratio",
        );
    }

    let ratio = loan_balance / income;
    let value = clamp_score((1.0 - ratio).clamp(0.0, 1.0) * 100.0);

    let impact = if ratio <= 0.3 {
        FactorImpact::Positive
    } else if ratio <= 0.5 {
        FactorImpact::Neutral
    } else {
        FactorImpact::Negative
    };

    let description = if ratio <= 0.2 {
        "Low debt burden relative to income"
    } else if ratio <= 0.4 {
        "Moderate debt level"
    } else {
        "High debt-to-income ratio"
    };

    ScoreFactor::new(NAME, impact, weights.debt_to_income(), value, description)
}

pub(crate) fn identity_factor(
    status: KycStatus,
    table: &KycScoreTable,
    weights: &ScoringWeights,
) -> ScoreFactor {
    let (impact, description) = match status {
        KycStatus::Verified => (FactorImpact::Positive, "Identity fully verified"),
        KycStatus::Pending => (FactorImpact::Neutral, "Verification in progress"),
        KycStatus::Failed | KycStatus::NotStarted => {
            (FactorImpact::Negative, "Identity verification required")
        }
    };

    ScoreFactor::new(
        "Identity Verification",
        impact,
        weights.identity_verification(),
        table.score_for(status),
        description,
    )
}
