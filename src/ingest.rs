//! File ingestion for customer snapshots and transaction exports.
//!
//! Customers arrive as JSON objects in the backend's wire format. Transactions arrive either as a
//! JSON array or as the CSV export produced by the dashboard's data importer.

use crate::domain::{blank_as_none, Customer, CustomerId, Transaction, TransactionId};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

#[derive(Debug)]
pub enum IngestError {
    Io(std::io::Error),
    Csv(csv::Error),
    Json(serde_json::Error),
    Timestamp { line: u64, value: String },
}

impl std::fmt::Display for IngestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IngestError::Io(err) => write!(f, "failed to read input file: {}", err),
            IngestError::Csv(err) => write!(f, "invalid transaction CSV data: {}", err),
            IngestError::Json(err) => write!(f, "invalid JSON payload: {}", err),
            IngestError::Timestamp { line, value } => {
                write!(f, "line {}: unrecognised timestamp '{}'", line, value)
            }
        }
    }
}

impl std::error::Error for IngestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IngestError::Io(err) => Some(err),
            IngestError::Csv(err) => Some(err),
            IngestError::Json(err) => Some(err),
            IngestError::Timestamp { .. } => None,
        }
    }
}

impl From<std::io::Error> for IngestError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for IngestError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<serde_json::Error> for IngestError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

#[derive(Debug, Deserialize)]
struct TransactionRow {
    id: String,
    #[serde(rename = "customerId")]
    customer_id: String,
    amount: f64,
    timestamp: String,
    #[serde(
        rename = "counterpartyCountry",
        default,
        deserialize_with = "blank_as_none"
    )]
    counterparty_country: Option<String>,
}

pub fn load_customer(path: impl AsRef<Path>) -> Result<Customer, IngestError> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

/// Load transactions from a `.csv` export or a JSON array, chosen by file extension.
pub fn load_transactions(path: impl AsRef<Path>) -> Result<Vec<Transaction>, IngestError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    if is_csv {
        read_transactions_csv(file)
    } else {
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}

pub fn read_transactions_csv<R: Read>(reader: R) -> Result<Vec<Transaction>, IngestError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let mut record = csv::StringRecord::new();
    let mut transactions = Vec::new();

    while csv_reader.read_record(&mut record)? {
        let row: TransactionRow = record.deserialize(Some(&headers))?;
        let line = record.position().map(|pos| pos.line()).unwrap_or_default();
        let timestamp = parse_timestamp(&row.timestamp).ok_or_else(|| IngestError::Timestamp {
            line,
            value: row.timestamp.clone(),
        })?;

        transactions.push(Transaction {
            id: TransactionId(row.id),
            customer_id: CustomerId(row.customer_id),
            amount: row.amount,
            timestamp,
            counterparty_country: row.counterparty_country,
        });
    }

    Ok(transactions)
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(naive.and_utc());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const EXPORT: &str = "\
id,customerId,amount,timestamp,counterpartyCountry,description
tx-1,cust-1,250.00,2025-03-01T12:00:00Z,,Groceries
tx-2,cust-1,12500,2025-03-01 13:15:00,KP,Wire
tx-3,cust-2,40.5,2025-03-02T08:00:00+02:00, US ,Coffee
";

    #[test]
    fn reads_export_rows() {
        let transactions = read_transactions_csv(EXPORT.as_bytes()).expect("export parses");

        assert_eq!(transactions.len(), 3);
        assert_eq!(transactions[0].counterparty_country, None);
        assert_eq!(
            transactions[1].timestamp,
            Utc.with_ymd_and_hms(2025, 3, 1, 13, 15, 0).unwrap()
        );
        assert_eq!(transactions[1].counterparty_country.as_deref(), Some("KP"));
        assert_eq!(
            transactions[2].timestamp,
            Utc.with_ymd_and_hms(2025, 3, 2, 6, 0, 0).unwrap()
        );
        assert_eq!(transactions[2].counterparty_country.as_deref(), Some("US"));
    }

    #[test]
    fn rejects_unparseable_timestamp() {
        let data = "id,customerId,amount,timestamp\ntx-1,cust-1,10,yesterday\n";

        match read_transactions_csv(data.as_bytes()) {
            Err(IngestError::Timestamp { value, .. }) => assert_eq!(value, "yesterday"),
            other => panic!("expected timestamp error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_non_numeric_amount() {
        let data = "id,customerId,amount,timestamp\ntx-1,cust-1,lots,2025-03-01T12:00:00Z\n";
        assert!(matches!(
            read_transactions_csv(data.as_bytes()),
            Err(IngestError::Csv(_))
        ));
    }
}
