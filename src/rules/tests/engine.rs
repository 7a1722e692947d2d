use super::common::*;
use crate::domain::TransactionId;
use crate::rules::{
    create_audit_log_at, AuditOutcome, RuleConfig, RuleEngine, RuleId, RuleSummary, Severity,
};

#[test]
fn transaction_bundle_runs_five_rules_in_catalog_order() {
    let engine = engine();
    let tx = transaction("t1", 100.0);
    let history = vec![tx.clone()];

    let results = engine.run_transaction_rules_at(&tx, &customer(), &history, now());

    let ids: Vec<RuleId> = results.iter().map(|result| result.rule_id).collect();
    assert_eq!(
        ids,
        vec![
            RuleId::LargeTransaction,
            RuleId::TransactionVelocity,
            RuleId::CountryRestriction,
            RuleId::AccountAge,
            RuleId::IncomeRatio,
        ]
    );
    assert!(results.iter().all(|result| result.passed));
}

#[test]
fn transaction_bundle_leaves_kyc_documents_out_even_when_missing() {
    let engine = engine();
    let mut profile = customer();
    profile.documents_provided.clear();
    let tx = transaction("t1", 100.0);

    let results = engine.run_transaction_rules_at(&tx, &profile, &[], now());

    assert!(results
        .iter()
        .all(|result| result.rule_id != RuleId::KycDocuments));
    assert!(!engine.check_kyc_documents(&profile).passed);
}

#[test]
fn transaction_bundle_returns_failures_alongside_passes() {
    let engine = engine();
    let mut profile = customer();
    profile.account_age = 1;
    let tx = transaction("t1", 60_000.0).with_counterparty_country("IR");
    let history = burst("cust-001", 12);

    let results = engine.run_transaction_rules_at(&tx, &profile, &history, now());
    let summary = RuleSummary::from_results(&results);

    assert_eq!(results.len(), 5);
    assert_eq!(summary.evaluated, 5);
    assert_eq!(summary.failed, 5);
    assert_eq!(summary.highest_severity, Some(Severity::Critical));
    assert_eq!(
        results.iter().map(|r| r.severity).collect::<Vec<_>>(),
        vec![
            Some(Severity::Critical),
            Some(Severity::Critical),
            Some(Severity::Critical),
            Some(Severity::Low),
            Some(Severity::High),
        ]
    );
}

#[test]
fn configuration_overrides_thresholds() {
    let engine = RuleEngine::new(RuleConfig {
        large_transaction_threshold: 100.0,
        velocity_max_transactions: 1,
        min_account_age_months: 24,
        max_income_ratio: 2.0,
        required_documents: vec!["selfie".to_string()],
        ..RuleConfig::default()
    });
    let tx = transaction("t1", 150.0);

    let results = engine.run_transaction_rules_at(&tx, &customer(), &burst("cust-001", 2), now());

    assert!(!results[0].passed);
    assert!(!results[1].passed);
    assert!(!results[3].passed);
    assert!(results[4].passed);

    let kyc = engine.check_kyc_documents(&customer());
    assert_eq!(kyc.details, "Missing required documents: selfie");
}

#[test]
fn customer_rules_cover_documents_and_age() {
    let results = engine().run_customer_rules(&customer());
    let ids: Vec<RuleId> = results.iter().map(|result| result.rule_id).collect();
    assert_eq!(ids, vec![RuleId::KycDocuments, RuleId::AccountAge]);
    assert!(RuleSummary::from_results(&results).is_clean());
}

#[test]
fn summary_of_clean_run_has_no_severity() {
    let summary = RuleSummary::from_results(&[]);
    assert_eq!(summary, RuleSummary::default());
    assert!(summary.is_clean());
}

#[test]
fn audit_log_maps_pass_and_flag_only() {
    let engine = engine();
    let profile = customer();
    let tx = transaction("t1", 25_000.0);
    let results = engine.run_transaction_rules_at(&tx, &profile, &[], now());
    let tx_id = TransactionId::new("t1");

    for result in &results {
        let log = create_audit_log_at(result, &profile.id, Some(&tx_id), now());
        let expected = if result.passed {
            AuditOutcome::Pass
        } else {
            AuditOutcome::Flag
        };
        assert_eq!(log.result, expected, "{}", result.rule_id);
        assert_ne!(log.result, AuditOutcome::Fail);
        assert_eq!(log.rule_id, result.rule_id.as_str());
        assert_eq!(log.rule_name, result.rule_name);
        assert_eq!(log.details, result.details);
        assert_eq!(log.customer_id, profile.id);
        assert_eq!(log.transaction_id.as_ref(), Some(&tx_id));
        assert_eq!(log.timestamp, now());
    }
}
