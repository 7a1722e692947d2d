use std::collections::BTreeSet;

use serde::Serialize;

pub const DEFAULT_LARGE_TRANSACTION_THRESHOLD: f64 = 10_000.0;
pub const DEFAULT_VELOCITY_WINDOW_MINUTES: u32 = 60;
pub const DEFAULT_VELOCITY_MAX_TRANSACTIONS: usize = 5;
pub const DEFAULT_MIN_ACCOUNT_AGE_MONTHS: u32 = 3;
pub const DEFAULT_MAX_INCOME_RATIO: f64 = 0.5;
pub const DEFAULT_REQUIRED_DOCUMENTS: [&str; 2] = ["passport", "utility_bill"];
/// FATF "call for action" jurisdictions.
pub const DEFAULT_BLACKLISTED_COUNTRIES: [&str; 3] = ["KP", "IR", "MM"];

/// Jurisdictions a counterparty may not reside in. Stored upper-cased and trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryBlacklist(BTreeSet<String>);

impl CountryBlacklist {
    pub fn new<I, S>(countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            countries
                .into_iter()
                .map(|country| canonical_country(country.as_ref()))
                .filter(|country| !country.is_empty())
                .collect(),
        )
    }

    pub fn contains(&self, country: &str) -> bool {
        self.0.contains(&canonical_country(country))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Default for CountryBlacklist {
    fn default() -> Self {
        Self::new(DEFAULT_BLACKLISTED_COUNTRIES)
    }
}

fn canonical_country(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}

/// Thresholds backing the rule catalog. Every field has a documented default.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleConfig {
    pub large_transaction_threshold: f64,
    pub velocity_window_minutes: u32,
    pub velocity_max_transactions: usize,
    pub blacklisted_countries: CountryBlacklist,
    /// Checked in this order so missing documents are reported deterministically.
    pub required_documents: Vec<String>,
    pub min_account_age_months: u32,
    pub max_income_ratio: f64,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            large_transaction_threshold: DEFAULT_LARGE_TRANSACTION_THRESHOLD,
            velocity_window_minutes: DEFAULT_VELOCITY_WINDOW_MINUTES,
            velocity_max_transactions: DEFAULT_VELOCITY_MAX_TRANSACTIONS,
            blacklisted_countries: CountryBlacklist::default(),
            required_documents: DEFAULT_REQUIRED_DOCUMENTS
                .iter()
                .map(|doc| doc.to_string())
                .collect(),
            min_account_age_months: DEFAULT_MIN_ACCOUNT_AGE_MONTHS,
            max_income_ratio: DEFAULT_MAX_INCOME_RATIO,
        }
    }
}
