//! Per-bet derived metrics.
//!
//! Profit and expected value at a flat stake, computed in exact decimal
//! arithmetic so that ledger figures round-trip through the CSV file.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::{LedgerError, Outcome};

/// Default flat stake per bet, in currency units.
pub const DEFAULT_STAKE: Decimal = dec!(100);

/// Realised profit of a settled bet.
///
/// Win pays `(odds - 1) * stake`, a loss forfeits the stake and a push
/// refunds it. Fails with `Overflow` when the result leaves `Decimal` range.
pub fn profit(odds: Decimal, outcome: Outcome, stake: Decimal) -> Result<Decimal, LedgerError> {
    match outcome {
        Outcome::Win => odds
            .checked_sub(Decimal::ONE)
            .and_then(|net| net.checked_mul(stake))
            .ok_or(LedgerError::Overflow("profit")),
        Outcome::Lose => Ok(-stake),
        Outcome::Push => Ok(Decimal::ZERO),
    }
}

/// Probability-weighted profit of a bet before it settles.
///
/// `EV = p * (odds - 1) * stake - (1 - p) * stake`
pub fn expected_value(
    odds: Decimal,
    win_probability: Decimal,
    stake: Decimal,
) -> Result<Decimal, LedgerError> {
    let upside = odds
        .checked_sub(Decimal::ONE)
        .and_then(|net| net.checked_mul(stake))
        .and_then(|payout| payout.checked_mul(win_probability));
    let downside = Decimal::ONE
        .checked_sub(win_probability)
        .and_then(|lose_p| lose_p.checked_mul(stake));

    upside
        .zip(downside)
        .and_then(|(up, down)| up.checked_sub(down))
        .ok_or(LedgerError::Overflow("expected value"))
}

/// Reject decimal odds below 1.0.
pub fn validate_odds(odds: Decimal) -> Result<Decimal, LedgerError> {
    if odds < Decimal::ONE {
        return Err(LedgerError::InvalidOdds(odds));
    }
    Ok(odds)
}

/// Reject probabilities outside [0, 1].
pub fn validate_probability(p: Decimal) -> Result<Decimal, LedgerError> {
    if p < Decimal::ZERO || p > Decimal::ONE {
        return Err(LedgerError::InvalidProbability(p));
    }
    Ok(p)
}
