//! Path management for budget-pulse
//!
//! ## Path Resolution Order
//!
//! 1. `BUDGET_PULSE_DATA_DIR` environment variable (if set)
//! 2. The platform config directory joined with `budget-pulse`
//!    (`~/.config/budget-pulse` on Linux, `%APPDATA%\budget-pulse` on Windows)

use std::path::PathBuf;

use directories::BaseDirs;

use crate::error::PulseError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "BUDGET_PULSE_DATA_DIR";

const APP_DIR: &str = "budget-pulse";

/// Manages all paths used by budget-pulse
#[derive(Debug, Clone)]
pub struct PulsePaths {
    /// Base directory for all budget-pulse files
    base_dir: PathBuf,
}

impl PulsePaths {
    /// Resolve paths from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined and no
    /// override is set.
    pub fn new() -> Result<Self, PulseError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create PulsePaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Directory holding cached backend data
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the stored session (token + user profile)
    pub fn session_file(&self) -> PathBuf {
        self.base_dir.join("session.json")
    }

    /// Get the path to the offline dataset written by `sync`
    pub fn snapshot_file(&self) -> PathBuf {
        self.data_dir().join("snapshot.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), PulseError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| PulseError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| PulseError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }
}

fn resolve_default_path() -> Result<PathBuf, PulseError> {
    let dirs = BaseDirs::new()
        .ok_or_else(|| PulseError::Config("Could not determine home directory".into()))?;
    Ok(dirs.config_dir().join(APP_DIR))
}
