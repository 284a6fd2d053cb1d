//! Configuration loading from TOML.
//!
//! Reads `tracker.toml` and deserializes into strongly-typed structs.
//! Every field has a default, so a missing file or a partial one is fine.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::ledger::metrics::DEFAULT_STAKE;

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "tracker.toml";

/// Default ledger file path.
pub const DEFAULT_LEDGER_FILE: &str = "predictions_tracker.csv";

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub ledger: LedgerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LedgerConfig {
    /// CSV file holding the bets.
    #[serde(default = "default_ledger_path")]
    pub path: PathBuf,
    /// Flat stake per bet.
    #[serde(default = "default_stake")]
    pub stake: Decimal,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            path: default_ledger_path(),
            stake: default_stake(),
        }
    }
}

fn default_ledger_path() -> PathBuf {
    PathBuf::from(DEFAULT_LEDGER_FILE)
}

fn default_stake() -> Decimal {
    DEFAULT_STAKE
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load from `path` if it exists, otherwise use defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Parse configuration from TOML text.
    pub fn parse(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents)?;
        if config.ledger.stake <= Decimal::ZERO {
            anyhow::bail!("ledger.stake must be positive, got {}", config.ledger.stake);
        }
        Ok(config)
    }
}
