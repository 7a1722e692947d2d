use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::domain::{Customer, KycStatus, Transaction};
use crate::rules::{RuleConfig, RuleEngine};

pub(super) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, 24, 15, 30, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn customer() -> Customer {
    let mut customer = Customer::new("cust-001");
    customer.income = 12_000.0;
    customer.repayment_history = 88.0;
    customer.account_age = 14;
    customer.loan_balance = 2_000.0;
    customer.kyc_status = KycStatus::Verified;
    customer.documents_provided = ["passport", "utility_bill"]
        .into_iter()
        .map(str::to_string)
        .collect();
    customer
}

pub(super) fn transaction(id: &str, amount: f64) -> Transaction {
    Transaction::new(id, "cust-001", amount, now())
}

/// `count` transactions for `customer_id`, one per minute going back from `now()`.
pub(super) fn burst(customer_id: &str, count: usize) -> Vec<Transaction> {
    (0..count)
        .map(|i| {
            Transaction::new(
                format!("{customer_id}-tx-{i}"),
                customer_id,
                25.0,
                now() - Duration::minutes(i as i64),
            )
        })
        .collect()
}

pub(super) fn engine() -> RuleEngine {
    RuleEngine::new(RuleConfig::default())
}
