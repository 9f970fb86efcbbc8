use log::info;
use std::env;

use crate::error::ConfigError;
use crate::models::UnitSystem;
use crate::DecodeOptions;

pub const UNIT_SYSTEM_VAR: &str = "ECOWITT_UNIT_SYSTEM";
pub const DERIVE_VAR: &str = "ECOWITT_DERIVE";
pub const PRETTY_VAR: &str = "ECOWITT_PRETTY";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestConfig {
    pub unit_system: UnitSystem,
    pub derive_missing: bool,
    pub pretty: bool,
}

impl Default for IngestConfig {
    fn default() -> Self {
        IngestConfig {
            unit_system: UnitSystem::Metric,
            derive_missing: true,
            pretty: false,
        }
    }
}

impl IngestConfig {
    /// Load configuration from `.env` and the process environment.
    pub fn new() -> Result<Self, ConfigError> {
        // Load environment variables
        dotenv::dotenv().ok();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from any variable source. Unset variables keep
    /// their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = IngestConfig::default();

        let unit_system = match lookup(UNIT_SYSTEM_VAR) {
            Some(value) => value.parse()?,
            None => defaults.unit_system,
        };
        let derive_missing = match lookup(DERIVE_VAR) {
            Some(value) => parse_flag(DERIVE_VAR, &value)?,
            None => defaults.derive_missing,
        };
        let pretty = match lookup(PRETTY_VAR) {
            Some(value) => parse_flag(PRETTY_VAR, &value)?,
            None => defaults.pretty,
        };

        info!(
            "Unit system: {}, derived readings: {}, pretty output: {}",
            unit_system, derive_missing, pretty
        );

        Ok(IngestConfig {
            unit_system,
            derive_missing,
            pretty,
        })
    }

    pub fn decode_options(&self) -> DecodeOptions {
        DecodeOptions {
            unit_system: self.unit_system,
            derive_missing: self.derive_missing,
        }
    }
}

fn parse_flag(name: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            name: name.to_string(),
            value: value.to_string(),
        }),
    }
}
