//! Command-line interface definitions and handlers.

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;
use tracing::info;

use crate::config::{AppConfig, DEFAULT_CONFIG_FILE};
use crate::ledger::Ledger;
use crate::types::BetSlip;

/// Personal sports-betting ledger.
#[derive(Parser, Debug)]
#[command(name = "bet-tracker")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Ledger CSV file (overrides the config)
    #[arg(long, global = true)]
    pub ledger: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Record a settled bet
    Add(AddArgs),

    /// Show performance summary
    Summary(SummaryArgs),

    /// Show cumulative profit by date
    History,

    /// List every recorded bet
    List,
}

/// Arguments for `bet-tracker add`.
#[derive(Parser, Debug)]
pub struct AddArgs {
    /// Match date (YYYY-MM-DD)
    pub date: NaiveDate,
    /// League or competition, e.g. "Serie A"
    pub league: String,
    /// Fixture, e.g. "Torino vs Napoli"
    #[arg(value_name = "MATCH")]
    pub match_name: String,
    /// Your selection, e.g. "Napoli to Win"
    pub pick: String,
    /// Final result, e.g. "1-2"
    pub result: String,
    /// Decimal odds, e.g. 1.70
    pub odds: Decimal,
    /// win, lose or push
    pub outcome: String,
    /// Your estimated win probability (0.0 - 1.0)
    #[arg(long = "win-prob")]
    pub win_prob: Option<Decimal>,
}

/// Arguments for `bet-tracker summary`.
#[derive(Parser, Debug)]
pub struct SummaryArgs {
    /// Emit JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// Resolve config, open the ledger and dispatch the subcommand.
pub fn run(cli: Cli) -> Result<()> {
    let cfg = AppConfig::load_or_default(&cli.config)?;
    let path = cli.ledger.unwrap_or(cfg.ledger.path);
    let mut ledger = Ledger::open(path, cfg.ledger.stake)?;

    match cli.command {
        Commands::Add(args) => add(&mut ledger, args),
        Commands::Summary(args) => summary(&ledger, args.json),
        Commands::History => history(&ledger),
        Commands::List => list(&ledger),
    }
}

fn add(ledger: &mut Ledger, args: AddArgs) -> Result<()> {
    let record = ledger.record(BetSlip {
        date: args.date,
        league: args.league,
        match_name: args.match_name,
        pick: args.pick,
        result: args.result,
        odds: args.odds,
        outcome: args.outcome,
        win_probability: args.win_prob,
    })?;

    let mut line = format!(
        "Added: {} ({}) | Profit: {:.2}",
        record.match_name,
        record.outcome,
        record.profit.round_dp(2)
    );
    if let Some(ev) = record.expected_value {
        line.push_str(&format!(" | EV: {:.2}", ev.round_dp(2)));
    }
    println!("{line}");
    Ok(())
}

fn summary(ledger: &Ledger, json: bool) -> Result<()> {
    let stats = ledger.summarize()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    match stats {
        Some(stats) => {
            println!();
            println!("--- Betting Tracker Summary ---");
            println!("{stats}");
        }
        None => println!("No data yet."),
    }
    Ok(())
}

fn history(ledger: &Ledger) -> Result<()> {
    let series = ledger.cumulative_profit_series()?;
    if series.is_empty() {
        println!("No data to show yet.");
        return Ok(());
    }

    println!("  {:<12} {:>12}", "Date", "Cumulative");
    println!("  {:─<12} {:─>12}", "", "");
    for point in &series {
        println!("  {:<12} {:>12.2}", point.date.to_string(), point.cumulative_profit.round_dp(2));
    }
    info!(points = series.len(), "Profit history printed");
    Ok(())
}

fn list(ledger: &Ledger) -> Result<()> {
    if ledger.is_empty() {
        println!("No bets recorded.");
        return Ok(());
    }
    for (i, record) in ledger.records().iter().enumerate() {
        println!("{:>4}. {record}", i + 1);
    }
    Ok(())
}
