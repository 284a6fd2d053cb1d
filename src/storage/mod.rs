//! Persistence layer.
//!
//! Saves and loads the ledger to/from a CSV file. The whole file is
//! rewritten on every save; columns are located by header name on load,
//! so files written without the optional EV or Stake columns still load.
//! A missing Stake column means the default stake of 100 was used.

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

use crate::ledger::metrics::DEFAULT_STAKE;
use crate::types::{BetRecord, Outcome};

const COL_DATE: &str = "Date";
const COL_LEAGUE: &str = "League";
const COL_MATCH: &str = "Match";
const COL_PICK: &str = "Your_Pick";
const COL_RESULT: &str = "Result";
const COL_ODDS: &str = "Odds";
const COL_OUTCOME: &str = "Outcome";
const COL_PROFIT: &str = "Profit";
const COL_EV: &str = "EV";
const COL_WIN_PROB: &str = "Win_Prob";
const COL_STAKE: &str = "Stake";

const BASE_COLUMNS: [&str; 8] = [
    COL_DATE, COL_LEAGUE, COL_MATCH, COL_PICK, COL_RESULT, COL_ODDS, COL_OUTCOME, COL_PROFIT,
];

/// Write every record to `path`, replacing any existing file.
///
/// `EV` and `Win_Prob` columns are only written when at least one record
/// carries them. `Stake` is always the last column.
pub fn save_ledger(records: &[BetRecord], path: &Path) -> Result<()> {
    let with_ev = records
        .iter()
        .any(|r| r.expected_value.is_some() || r.win_probability.is_some());

    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create ledger file {}", path.display()))?;

    let mut header: Vec<&str> = BASE_COLUMNS.to_vec();
    if with_ev {
        header.extend([COL_EV, COL_WIN_PROB]);
    }
    header.push(COL_STAKE);
    wtr.write_record(&header)?;

    for r in records {
        let mut row = vec![
            r.date.to_string(),
            r.league.clone(),
            r.match_name.clone(),
            r.pick.clone(),
            r.result.clone(),
            r.odds.to_string(),
            r.outcome.as_str().to_string(),
            r.profit.to_string(),
        ];
        if with_ev {
            row.push(optional(r.expected_value));
            row.push(optional(r.win_probability));
        }
        row.push(r.stake.to_string());
        wtr.write_record(&row)?;
    }
    wtr.flush()
        .with_context(|| format!("Failed to write ledger to {}", path.display()))?;

    debug!(path = %path.display(), bets = records.len(), "Ledger saved");
    Ok(())
}

/// Load the ledger from `path`.
/// Returns None if the file doesn't exist (fresh start).
pub fn load_ledger(path: &Path) -> Result<Option<Vec<BetRecord>>> {
    if !path.exists() {
        info!(path = %path.display(), "No ledger file found, starting fresh");
        return Ok(None);
    }

    let mut rdr = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open ledger file {}", path.display()))?;

    let headers = rdr
        .headers()
        .with_context(|| format!("Failed to read header of {}", path.display()))?
        .clone();
    let columns = Columns::locate(&headers)
        .with_context(|| format!("Unrecognised ledger layout in {}", path.display()))?;

    let mut records = Vec::new();
    for (i, row) in rdr.records().enumerate() {
        // Header is line 1
        let line = i + 2;
        let row = row.with_context(|| format!("{}: malformed CSV at line {line}", path.display()))?;
        let record = columns
            .parse(&row)
            .with_context(|| format!("{}: bad record at line {line}", path.display()))?;
        records.push(record);
    }

    info!(path = %path.display(), bets = records.len(), "Ledger loaded from disk");
    Ok(Some(records))
}

fn optional(value: Option<Decimal>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Column lookup
// ---------------------------------------------------------------------------

/// Field positions resolved from the header row.
struct Columns {
    date: usize,
    league: usize,
    match_name: usize,
    pick: usize,
    result: usize,
    odds: usize,
    outcome: usize,
    profit: usize,
    ev: Option<usize>,
    win_prob: Option<usize>,
    stake: Option<usize>,
}

impl Columns {
    fn locate(headers: &csv::StringRecord) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        let require = |name: &str| find(name).ok_or_else(|| anyhow!("missing column '{name}'"));

        Ok(Self {
            date: require(COL_DATE)?,
            league: require(COL_LEAGUE)?,
            match_name: require(COL_MATCH)?,
            pick: require(COL_PICK)?,
            result: require(COL_RESULT)?,
            odds: require(COL_ODDS)?,
            outcome: require(COL_OUTCOME)?,
            profit: require(COL_PROFIT)?,
            ev: find(COL_EV),
            win_prob: find(COL_WIN_PROB),
            stake: find(COL_STAKE),
        })
    }

    fn parse(&self, row: &csv::StringRecord) -> Result<BetRecord> {
        let field = |idx: usize| row.get(idx).unwrap_or("").trim();
        let decimal = |idx: usize, name: &str| {
            Decimal::from_str(field(idx))
                .with_context(|| format!("invalid {name} '{}'", field(idx)))
        };
        let optional_decimal = |idx: Option<usize>, name: &str| -> Result<Option<Decimal>> {
            match idx.map(field) {
                None | Some("") => Ok(None),
                Some(raw) => Decimal::from_str(raw)
                    .map(Some)
                    .with_context(|| format!("invalid {name} '{raw}'")),
            }
        };

        let date = NaiveDate::parse_from_str(field(self.date), "%Y-%m-%d")
            .with_context(|| format!("invalid date '{}'", field(self.date)))?;
        let outcome = Outcome::from_str(field(self.outcome))?;

        Ok(BetRecord {
            date,
            league: row.get(self.league).unwrap_or("").to_string(),
            match_name: row.get(self.match_name).unwrap_or("").to_string(),
            pick: row.get(self.pick).unwrap_or("").to_string(),
            result: row.get(self.result).unwrap_or("").to_string(),
            odds: decimal(self.odds, COL_ODDS)?,
            outcome,
            win_probability: optional_decimal(self.win_prob, COL_WIN_PROB)?,
            stake: optional_decimal(self.stake, COL_STAKE)?.unwrap_or(DEFAULT_STAKE),
            profit: decimal(self.profit, COL_PROFIT)?,
            expected_value: optional_decimal(self.ev, COL_EV)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
