use std::env;
use std::fmt;
use std::str::FromStr;

use crate::rules::{CountryBlacklist, RuleConfig};
use crate::scoring::{ScoringConfig, MAX_ACTIVITY_WINDOW_DAYS};

/// Distinguishes runtime behavior for different stages of the deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }

    /// Production output is single-line JSON for log shippers; other stages pretty-print.
    pub fn pretty_output(&self) -> bool {
        !matches!(self, Self::Production)
    }
}

/// Top-level configuration: telemetry plus the two engines' thresholds.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub scoring: ScoringConfig,
    pub rules: RuleConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );
        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let defaults = RuleConfig::default();
        let rules = RuleConfig {
            large_transaction_threshold: parse_var(
                "RISK_LARGE_TX_THRESHOLD",
                defaults.large_transaction_threshold,
            )?,
            velocity_window_minutes: parse_var(
                "RISK_VELOCITY_WINDOW_MINUTES",
                defaults.velocity_window_minutes,
            )?,
            velocity_max_transactions: parse_var(
                "RISK_VELOCITY_MAX_TRANSACTIONS",
                defaults.velocity_max_transactions,
            )?,
            blacklisted_countries: list_var("RISK_BLACKLISTED_COUNTRIES")
                .map(CountryBlacklist::new)
                .unwrap_or(defaults.blacklisted_countries),
            required_documents: list_var("RISK_REQUIRED_DOCUMENTS")
                .unwrap_or(defaults.required_documents),
            min_account_age_months: parse_var(
                "RISK_MIN_ACCOUNT_AGE_MONTHS",
                defaults.min_account_age_months,
            )?,
            max_income_ratio: parse_var("RISK_MAX_INCOME_RATIO", defaults.max_income_ratio)?,
        };

        for (key, value) in [
            ("RISK_LARGE_TX_THRESHOLD", rules.large_transaction_threshold),
            ("RISK_MAX_INCOME_RATIO", rules.max_income_ratio),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidValue {
                    key,
                    value: value.to_string(),
                });
            }
        }

        let activity_window_days = parse_var(
            "RISK_ACTIVITY_WINDOW_DAYS",
            ScoringConfig::default().activity_window_days,
        )?;
        if !(1..=MAX_ACTIVITY_WINDOW_DAYS).contains(&activity_window_days) {
            return Err(ConfigError::InvalidValue {
                key: "RISK_ACTIVITY_WINDOW_DAYS",
                value: activity_window_days.to_string(),
            });
        }

        let scoring = ScoringConfig {
            activity_window_days,
            ..ScoringConfig::default()
        };

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            scoring,
            rules,
        })
    }
}

fn parse_var<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidValue { key, value: raw }),
        _ => Ok(default),
    }
}

fn list_var(key: &str) -> Option<Vec<String>> {
    let raw = env::var(key).ok()?;
    Some(
        raw.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect(),
    )
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidValue { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidValue { key, value } => {
                write!(f, "{key} has an invalid value '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
