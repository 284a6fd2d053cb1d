//! Shared types for the bet tracker.
//!
//! These types form the data model used across the ledger, storage
//! and CLI modules.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// How a settled bet resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Lose,
    /// Voided bet, stake refunded.
    Push,
}

impl Outcome {
    /// All known outcomes (useful for iteration).
    pub const ALL: &'static [Outcome] = &[Outcome::Win, Outcome::Lose, Outcome::Push];

    /// Lowercase form used in the ledger file.
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Win => "win",
            Outcome::Lose => "lose",
            Outcome::Push => "push",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Win => write!(f, "WIN"),
            Outcome::Lose => write!(f, "LOSE"),
            Outcome::Push => write!(f, "PUSH"),
        }
    }
}

/// Case-insensitive parse. Anything other than win/lose/push is rejected.
impl std::str::FromStr for Outcome {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "win" => Ok(Outcome::Win),
            "lose" => Ok(Outcome::Lose),
            "push" => Ok(Outcome::Push),
            _ => Err(LedgerError::InvalidOutcome(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Bet slip (input) and bet record (stored)
// ---------------------------------------------------------------------------

/// A bet as entered by the user, before validation and derived metrics.
#[derive(Debug, Clone)]
pub struct BetSlip {
    pub date: NaiveDate,
    pub league: String,
    pub match_name: String,
    pub pick: String,
    /// Final score or other settled result, e.g. "2-1".
    pub result: String,
    /// Decimal odds, e.g. 1.85.
    pub odds: Decimal,
    /// Unparsed outcome ("win", "Lose", ...).
    pub outcome: String,
    /// Estimated chance the pick wins, 0..=1.
    pub win_probability: Option<Decimal>,
}

/// A settled bet held by the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BetRecord {
    pub date: NaiveDate,
    pub league: String,
    pub match_name: String,
    pub pick: String,
    pub result: String,
    pub odds: Decimal,
    pub outcome: Outcome,
    pub win_probability: Option<Decimal>,
    /// Amount wagered; profit and EV are expressed against it.
    pub stake: Decimal,
    pub profit: Decimal,
    pub expected_value: Option<Decimal>,
}

impl fmt::Display for BetRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {} | {} @ {} | {} ({}) | profit={:.2}",
            self.date,
            self.league,
            self.match_name,
            self.pick,
            self.odds,
            self.outcome,
            self.result,
            self.profit.round_dp(2),
        )?;
        if let Some(ev) = self.expected_value {
            write!(f, " EV={:.2}", ev.round_dp(2))?;
        }
        Ok(())
    }
}

impl BetRecord {
    /// Helper to build a sample record with sensible defaults.
    #[cfg(test)]
    pub fn sample(date: &str, profit: Decimal) -> Self {
        use rust_decimal_macros::dec;
        BetRecord {
            date: date.parse().unwrap(),
            league: "Serie A".to_string(),
            match_name: "Torino vs Napoli".to_string(),
            pick: "Napoli to Win".to_string(),
            result: "1-2".to_string(),
            odds: dec!(1.70),
            outcome: Outcome::Win,
            win_probability: None,
            stake: dec!(100),
            profit,
            expected_value: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Domain-specific error types for the ledger.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("Invalid outcome '{0}': expected win, lose or push")]
    InvalidOutcome(String),

    #[error("Invalid odds {0}: decimal odds must be at least 1.0")]
    InvalidOdds(Decimal),

    #[error("Invalid win probability {0}: must be between 0 and 1")]
    InvalidProbability(Decimal),

    #[error("Arithmetic overflow computing {0}")]
    Overflow(&'static str),

    #[error("Storage error: {0}")]
    Storage(#[source] anyhow::Error),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
