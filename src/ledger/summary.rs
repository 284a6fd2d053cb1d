//! Aggregate performance statistics over a set of settled bets.

use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

use crate::types::{BetRecord, LedgerError, Outcome};

/// Whether the selections look profitable on expected value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EvVerdict {
    /// Average EV is positive.
    OnTrack,
    /// Average EV is zero or negative.
    CheckSelections,
}

impl fmt::Display for EvVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvVerdict::OnTrack => write!(f, "On Track"),
            EvVerdict::CheckSelections => write!(f, "Check Selections"),
        }
    }
}

/// Ledger-wide totals and ratios.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStats {
    pub count: usize,
    pub wins: usize,
    pub losses: usize,
    pub pushes: usize,
    pub total_profit: Decimal,
    /// Total profit over total staked, as a percentage.
    pub roi: Decimal,
    /// Wins over all bets (pushes included), as a percentage.
    pub win_rate: Decimal,
    /// Mean EV over the bets that carry one.
    pub average_ev: Option<Decimal>,
    pub verdict: Option<EvVerdict>,
}

impl SummaryStats {
    /// Aggregate `records`. Returns `Ok(None)` for an empty slice so no
    /// ratio is ever computed over zero bets.
    ///
    /// ROI is measured against the stakes the bets were actually placed at.
    pub fn compute(records: &[BetRecord]) -> Result<Option<Self>, LedgerError> {
        if records.is_empty() {
            return Ok(None);
        }

        let count = records.len();
        let tally = |o: Outcome| records.iter().filter(|r| r.outcome == o).count();
        let wins = tally(Outcome::Win);
        let losses = tally(Outcome::Lose);
        let pushes = tally(Outcome::Push);

        let total_profit = checked_sum(records.iter().map(|r| r.profit), "total profit")?;
        let total_staked = checked_sum(records.iter().map(|r| r.stake), "total staked")?;
        let hundred = Decimal::ONE_HUNDRED;

        let roi = if total_staked.is_zero() {
            Decimal::ZERO
        } else {
            total_profit
                .checked_div(total_staked)
                .and_then(|ratio| ratio.checked_mul(hundred))
                .ok_or(LedgerError::Overflow("ROI"))?
        };
        let win_rate = Decimal::from(wins) / Decimal::from(count) * hundred;

        let evs: Vec<Decimal> = records.iter().filter_map(|r| r.expected_value).collect();
        let average_ev = if evs.is_empty() {
            None
        } else {
            let total = checked_sum(evs.iter().copied(), "expected value")?;
            Some(total / Decimal::from(evs.len()))
        };
        let verdict = average_ev.map(|ev| {
            if ev > Decimal::ZERO {
                EvVerdict::OnTrack
            } else {
                EvVerdict::CheckSelections
            }
        });

        Ok(Some(Self {
            count,
            wins,
            losses,
            pushes,
            total_profit,
            roi,
            win_rate,
            average_ev,
            verdict,
        }))
    }
}

/// Sum that reports overflow instead of panicking.
pub(crate) fn checked_sum(
    values: impl IntoIterator<Item = Decimal>,
    what: &'static str,
) -> Result<Decimal, LedgerError> {
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(v))
        .ok_or(LedgerError::Overflow(what))
}

impl fmt::Display for SummaryStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total Bets: {}", self.count)?;
        writeln!(
            f,
            "Wins: {} | Losses: {} | Pushes: {}",
            self.wins, self.losses, self.pushes
        )?;
        writeln!(f, "Win Rate: {:.2}%", self.win_rate.round_dp(2))?;
        writeln!(f, "Total Profit: {:.2}", self.total_profit.round_dp(2))?;
        write!(f, "ROI: {:.2}%", self.roi.round_dp(2))?;
        if let Some(ev) = self.average_ev {
            write!(f, "\nAverage EV: {:.2}", ev.round_dp(2))?;
        }
        if let Some(verdict) = self.verdict {
            write!(f, "\nPredicted Accuracy vs. Real: {verdict}")?;
        }
        Ok(())
    }
}
