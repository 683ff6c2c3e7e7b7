//! Configuration module for budget-pulse
//!
//! This module provides configuration management including:
//! - platform-aware path resolution
//! - user settings persistence

pub mod paths;
pub mod settings;

pub use paths::PulsePaths;
pub use settings::Settings;
