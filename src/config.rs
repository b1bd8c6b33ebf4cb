use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

use crate::errors::{JournalError, JournalResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Text,
    Json,
}

impl ReportFormat {
    pub fn parse(s: &str) -> JournalResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            other => Err(JournalError::Config(format!(
                "REPORT_FORMAT: expected text or json, got {other:?}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Storage
    pub data_file: PathBuf,

    // Output
    pub report_format: ReportFormat,

    // Logging
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Missing keys take their defaults and an
    /// invalid REPORT_FORMAT falls back to text with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = |key: &str, default: &str| -> String {
            lookup(key).unwrap_or_else(|| default.to_string())
        };

        let report_format = ReportFormat::parse(&env("REPORT_FORMAT", "text"))
            .unwrap_or_else(|e| {
                warn!("{}, falling back to text", e);
                ReportFormat::Text
            });

        Config {
            data_file: PathBuf::from(env("JOURNAL_DATA_FILE", "data/journal.json")),
            report_format,
            log_level: env("LOG_LEVEL", "info"),
        }
    }
}
