//! User settings for budget-pulse
//!
//! Where the backend lives, how long to wait for it, and how amounts and
//! dates are displayed.

use serde::{Deserialize, Serialize};

use super::paths::PulsePaths;
use crate::error::PulseError;
use crate::storage::file_io::{load_json, save_json};

/// Environment variable overriding the backend base URL
pub const API_URL_ENV: &str = "BUDGET_PULSE_API_URL";

/// User settings for budget-pulse
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Base URL of the REST backend, without a trailing slash
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Default currency symbol
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Per-request timeout
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_schema_version() -> u32 {
    1
}

fn default_api_base_url() -> String {
    "http://localhost:3000/api".to_string()
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            api_base_url: default_api_base_url(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or defaults if the file doesn't exist
    ///
    /// `BUDGET_PULSE_API_URL` takes precedence over the stored base URL.
    pub fn load_or_create(paths: &PulsePaths) -> Result<Self, PulseError> {
        // A missing file means defaults; nothing is written until `save`
        let mut settings = load_json::<Settings>(&paths.settings_file())
            .map_err(|e| match e {
                PulseError::Storage(msg) => PulseError::Config(msg),
                other => other,
            })?
            .unwrap_or_default();

        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                settings.api_base_url = url;
            }
        }
        settings.api_base_url = settings.api_base_url.trim_end_matches('/').to_string();

        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &PulsePaths) -> Result<(), PulseError> {
        paths.ensure_directories()?;
        save_json(&paths.settings_file(), self)
    }

    /// Format an amount with the configured currency symbol
    pub fn format_money(&self, amount: crate::models::Money) -> String {
        amount.format_with_symbol(&self.currency_symbol)
    }
}
