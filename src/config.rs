//! Configuration management for Hestia
//!
//! This module handles loading, validation, and management of the application
//! configuration from YAML files.

use crate::error::{HestiaError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

mod defaults;
pub use defaults::RATES_URL;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tariff feed retrieval configuration
    pub feed: FeedConfig,

    /// Distribution company selection
    pub company: CompanyConfig,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// Timezone used for time-of-use period selection
    pub timezone: String,

    /// Regional holiday calendar selector
    pub region: String,
}

/// Tariff feed retrieval parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// URL of the published tariff document
    pub url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Interval between scheduled refreshes in seconds
    pub refresh_interval_secs: u64,
}

/// Distribution company selection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyConfig {
    /// Exact company name as published in the feed (case-sensitive)
    pub name: String,

    /// Field extraction profile (natural_gas or electricity)
    pub profile: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (TRACE, DEBUG, INFO, WARNING, ERROR)
    pub level: String,

    /// Path to log file; empty disables file logging
    pub file: String,

    /// Whether to log to console
    pub console_output: bool,

    /// Whether to use JSON format
    pub json_format: bool,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from the default locations
    pub fn load() -> Result<Self> {
        let default_paths = [
            "hestia_config.yaml",
            "/data/hestia_config.yaml",
            "/etc/hestia/config.yaml",
        ];

        for path in &default_paths {
            if Path::new(path).exists() {
                return Self::from_file(path);
            }
        }

        // Fall back to default configuration
        Ok(Config::default())
    }

    /// Save configuration to a YAML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.feed.url.is_empty() {
            return Err(HestiaError::validation("feed.url", "URL cannot be empty"));
        }

        if !self.feed.url.starts_with("http://") && !self.feed.url.starts_with("https://") {
            return Err(HestiaError::validation(
                "feed.url",
                "URL must be http or https",
            ));
        }

        if self.feed.timeout_secs == 0 {
            return Err(HestiaError::validation(
                "feed.timeout_secs",
                "Must be greater than 0",
            ));
        }

        if self.feed.refresh_interval_secs == 0 {
            return Err(HestiaError::validation(
                "feed.refresh_interval_secs",
                "Must be greater than 0",
            ));
        }

        if self.company.name.is_empty() {
            return Err(HestiaError::validation(
                "company.name",
                "Company name cannot be empty",
            ));
        }

        if crate::tariff::ExtractionProfile::from_name(&self.company.profile).is_none() {
            return Err(HestiaError::validation(
                "company.profile",
                "Must be natural_gas or electricity",
            ));
        }

        if self.timezone.parse::<chrono_tz::Tz>().is_err() {
            return Err(HestiaError::validation(
                "timezone",
                "Unknown IANA timezone name",
            ));
        }

        if crate::calendar::HolidayCalendar::for_region(&self.region).is_none() {
            return Err(HestiaError::validation(
                "region",
                "Unknown holiday calendar region",
            ));
        }

        Ok(())
    }

    /// Extraction profile selected by the configuration
    ///
    /// Falls back to the natural-gas profile for unvalidated input.
    pub fn profile(&self) -> crate::tariff::ExtractionProfile {
        crate::tariff::ExtractionProfile::from_name(&self.company.profile)
            .unwrap_or(crate::tariff::ExtractionProfile::NaturalGas)
    }
}
