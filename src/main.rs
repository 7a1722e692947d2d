use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use riskdesk::config::AppConfig;
use riskdesk::error::AppError;
use riskdesk::ingest;
use riskdesk::rules::{create_audit_log_at, AuditLog, RuleEngine, RuleResult, RuleSummary};
use riskdesk::scoring::CreditScoringEngine;
use riskdesk::telemetry;
use riskdesk::TransactionId;
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "riskdesk",
    about = "Score customers and run compliance rules against transaction exports",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the weighted credit score for a customer
    Score(ScoreArgs),
    /// Run the transaction rule bundle against one transaction
    Rules(RulesArgs),
    /// Check that the customer's required KYC documents are on file
    Kyc(KycArgs),
}

#[derive(Args, Debug)]
struct ScoreArgs {
    /// Customer snapshot (JSON)
    #[arg(long)]
    customer: PathBuf,
    /// Transaction history (.csv export or JSON array)
    #[arg(long)]
    transactions: PathBuf,
    /// Reference time for recency windows (RFC 3339, defaults to now)
    #[arg(long, value_parser = parse_instant)]
    now: Option<DateTime<Utc>>,
}

#[derive(Args, Debug)]
struct RulesArgs {
    /// Customer snapshot (JSON)
    #[arg(long)]
    customer: PathBuf,
    /// Transaction history (.csv export or JSON array)
    #[arg(long)]
    transactions: PathBuf,
    /// Identifier of the transaction to evaluate
    #[arg(long)]
    transaction: String,
    /// Reference time for the velocity window (RFC 3339, defaults to now)
    #[arg(long, value_parser = parse_instant)]
    now: Option<DateTime<Utc>>,
    /// Append the KYC document check to the bundle
    #[arg(long)]
    include_kyc: bool,
    /// Emit an audit log entry per rule result
    #[arg(long)]
    audit: bool,
}

#[derive(Args, Debug)]
struct KycArgs {
    /// Customer snapshot (JSON)
    #[arg(long)]
    customer: PathBuf,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RulesReport {
    results: Vec<RuleResult>,
    summary: RuleSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    audit_logs: Option<Vec<AuditLog>>,
}

fn main() {
    if let Err(err) = run_cli() {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    match cli.command {
        Command::Score(args) => run_score(args, &config),
        Command::Rules(args) => run_rules(args, &config),
        Command::Kyc(args) => run_kyc(args, &config),
    }
}

fn parse_instant(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|err| format!("failed to parse '{raw}' as an RFC 3339 timestamp ({err})"))
}

fn run_score(args: ScoreArgs, config: &AppConfig) -> Result<(), AppError> {
    let customer = ingest::load_customer(&args.customer)?;
    let transactions = ingest::load_transactions(&args.transactions)?;
    let now = args.now.unwrap_or_else(Utc::now);

    let engine = CreditScoringEngine::new(config.scoring.clone());
    let score = engine.score_at(&customer, &transactions, now);

    info!(
        customer_id = %score.customer_id,
        score = score.score,
        bucket = score.bucket.as_str(),
        "credit score ready"
    );
    emit(&score, config)
}

fn run_rules(args: RulesArgs, config: &AppConfig) -> Result<(), AppError> {
    let customer = ingest::load_customer(&args.customer)?;
    let transactions = ingest::load_transactions(&args.transactions)?;
    let now = args.now.unwrap_or_else(Utc::now);

    let target_id = TransactionId::new(args.transaction);
    let transaction = transactions
        .iter()
        .find(|tx| tx.id == target_id)
        .ok_or_else(|| AppError::TransactionNotFound(target_id.clone()))?;

    let engine = RuleEngine::new(config.rules.clone());
    let mut results = engine.run_transaction_rules_at(transaction, &customer, &transactions, now);
    if args.include_kyc {
        results.push(engine.check_kyc_documents(&customer));
    }

    let summary = RuleSummary::from_results(&results);
    let audit_logs = args.audit.then(|| {
        results
            .iter()
            .map(|result| create_audit_log_at(result, &customer.id, Some(&transaction.id), now))
            .collect()
    });

    info!(
        customer_id = %customer.id,
        transaction_id = %transaction.id,
        failed = summary.failed,
        highest_severity = ?summary.highest_severity,
        "rule evaluation ready"
    );
    emit(
        &RulesReport {
            results,
            summary,
            audit_logs,
        },
        config,
    )
}

fn run_kyc(args: KycArgs, config: &AppConfig) -> Result<(), AppError> {
    let customer = ingest::load_customer(&args.customer)?;
    let result = RuleEngine::new(config.rules.clone()).check_kyc_documents(&customer);

    info!(customer_id = %customer.id, passed = result.passed, "kyc document check ready");
    emit(&result, config)
}

fn emit<T: Serialize>(value: &T, config: &AppConfig) -> Result<(), AppError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    if config.environment.pretty_output() {
        serde_json::to_writer_pretty(&mut handle, value)?;
    } else {
        serde_json::to_writer(&mut handle, value)?;
    }
    writeln!(handle)?;
    Ok(())
}
