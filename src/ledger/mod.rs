//! The betting ledger.
//!
//! Owns the ordered list of settled bets, derives profit and EV as bets
//! are recorded, and rewrites the backing CSV file after every append.

pub mod metrics;
pub mod summary;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::storage;
use crate::types::{BetRecord, BetSlip, LedgerError, Outcome};
use summary::SummaryStats;

/// One point on the cumulative profit curve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfitPoint {
    pub date: NaiveDate,
    pub cumulative_profit: Decimal,
}

/// An ordered, append-only collection of bets. New bets are placed at
/// `stake`; each record keeps the stake it was placed at.
#[derive(Debug)]
pub struct Ledger {
    records: Vec<BetRecord>,
    stake: Decimal,
    /// Backing file; `None` keeps the ledger in memory only.
    path: Option<PathBuf>,
}

impl Ledger {
    /// Open the ledger stored at `path`. A missing file gives an empty
    /// ledger that will be created on the first `record`.
    pub fn open(path: impl Into<PathBuf>, stake: Decimal) -> anyhow::Result<Self> {
        let path = path.into();
        let records = storage::load_ledger(&path)?.unwrap_or_default();
        info!(path = %path.display(), bets = records.len(), %stake, "Ledger opened");
        Ok(Self {
            records,
            stake,
            path: Some(path),
        })
    }

    /// A ledger with no backing file.
    pub fn in_memory(stake: Decimal) -> Self {
        Self {
            records: Vec::new(),
            stake,
            path: None,
        }
    }

    /// Validate a bet, derive its metrics, append it and persist.
    ///
    /// On a storage failure the append is undone so memory and disk agree.
    pub fn record(&mut self, slip: BetSlip) -> Result<BetRecord, LedgerError> {
        let outcome: Outcome = slip.outcome.parse()?;
        let odds = metrics::validate_odds(slip.odds)?;
        let win_probability = slip
            .win_probability
            .map(metrics::validate_probability)
            .transpose()?;

        let profit = metrics::profit(odds, outcome, self.stake)?;
        let expected_value = win_probability
            .map(|p| metrics::expected_value(odds, p, self.stake))
            .transpose()?;

        let record = BetRecord {
            date: slip.date,
            league: slip.league,
            match_name: slip.match_name,
            pick: slip.pick,
            result: slip.result,
            odds,
            outcome,
            win_probability,
            stake: self.stake,
            profit,
            expected_value,
        };

        self.records.push(record.clone());

        if let Some(path) = &self.path {
            if let Err(e) = storage::save_ledger(&self.records, path) {
                self.records.pop();
                return Err(LedgerError::Storage(e));
            }
        }

        info!(
            date = %record.date,
            match_name = %record.match_name,
            outcome = %record.outcome,
            profit = %record.profit.round_dp(2),
            ev = ?record.expected_value.map(|ev| ev.round_dp(2)),
            "Bet recorded"
        );

        Ok(record)
    }

    /// Aggregate statistics, or `None` when there is nothing to summarise.
    pub fn summarize(&self) -> Result<Option<SummaryStats>, LedgerError> {
        let stats = SummaryStats::compute(&self.records)?;
        if stats.is_none() {
            debug!("Summary requested on empty ledger");
        }
        Ok(stats)
    }

    /// Running profit total with bets ordered by date.
    ///
    /// Bets on the same date keep their insertion order.
    pub fn cumulative_profit_series(&self) -> Result<Vec<ProfitPoint>, LedgerError> {
        let mut sorted: Vec<&BetRecord> = self.records.iter().collect();
        sorted.sort_by_key(|r| r.date);

        let mut running = Decimal::ZERO;
        sorted
            .into_iter()
            .map(|r| {
                running = running
                    .checked_add(r.profit)
                    .ok_or(LedgerError::Overflow("cumulative profit"))?;
                Ok(ProfitPoint {
                    date: r.date,
                    cumulative_profit: running,
                })
            })
            .collect()
    }

    /// All bets in insertion order.
    pub fn records(&self) -> &[BetRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Stake applied to newly recorded bets.
    pub fn stake(&self) -> Decimal {
        self.stake
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
