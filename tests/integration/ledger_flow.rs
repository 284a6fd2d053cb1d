//! Ledger lifecycle through the library API: record, reopen, summarise.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use bet_tracker::ledger::summary::EvVerdict;
use bet_tracker::ledger::Ledger;
use bet_tracker::storage;
use bet_tracker::types::{BetSlip, LedgerError, Outcome};

fn slip(
    date: &str,
    match_name: &str,
    odds: Decimal,
    outcome: &str,
    win_prob: Option<Decimal>,
) -> BetSlip {
    BetSlip {
        date: date.parse().unwrap(),
        league: "Serie A".to_string(),
        match_name: match_name.to_string(),
        pick: "Home to Win".to_string(),
        result: "2-1".to_string(),
        odds,
        outcome: outcome.to_string(),
        win_probability: win_prob,
    }
}

#[test]
fn test_weekend_of_bets_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("predictions_tracker.csv");

    let mut ledger = Ledger::open(&path, dec!(100)).unwrap();
    ledger
        .record(slip("2025-10-18", "Torino vs Napoli", dec!(1.70), "win", Some(dec!(0.65))))
        .unwrap();
    ledger
        .record(slip("2025-10-18", "Barcelona vs Girona", dec!(1.80), "win", Some(dec!(0.60))))
        .unwrap();
    ledger
        .record(slip("2025-10-19", "Liverpool vs Brentford", dec!(1.85), "lose", Some(dec!(0.55))))
        .unwrap();
    drop(ledger);

    let ledger = Ledger::open(&path, dec!(100)).unwrap();
    assert_eq!(ledger.len(), 3);
    assert_eq!(ledger.records()[2].outcome, Outcome::Lose);

    let stats = ledger.summarize().unwrap().unwrap();
    assert_eq!(stats.wins, 2);
    assert_eq!(stats.losses, 1);
    // 70 + 80 - 100
    assert_eq!(stats.total_profit, dec!(50));
    // EVs: 0.65*70 - 35 = 10.5, 8, 0.55*85 - 45 = 1.75 -> mean 6.75
    assert_eq!(stats.average_ev, Some(dec!(6.75)));
    assert_eq!(stats.verdict, Some(EvVerdict::OnTrack));

    let series: Vec<Decimal> = ledger
        .cumulative_profit_series()
        .unwrap()
        .into_iter()
        .map(|p| p.cumulative_profit)
        .collect();
    assert_eq!(series, vec![dec!(70), dec!(150), dec!(50)]);
}

#[test]
fn test_rejected_bet_leaves_file_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("predictions_tracker.csv");

    let mut ledger = Ledger::open(&path, dec!(100)).unwrap();
    ledger
        .record(slip("2025-10-18", "Torino vs Napoli", dec!(1.70), "win", None))
        .unwrap();
    let before = std::fs::read_to_string(&path).unwrap();

    let err = ledger
        .record(slip("2025-10-19", "Roma vs Lazio", dec!(2.10), "void", None))
        .unwrap_err();
    assert!(matches!(err, LedgerError::InvalidOutcome(_)));

    assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
    assert_eq!(ledger.len(), 1);
}

#[test]
fn test_empty_ledger_summary_is_no_data() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = Ledger::open(dir.path().join("none.csv"), dec!(100)).unwrap();
    assert!(ledger.summarize().unwrap().is_none());
    assert!(ledger.cumulative_profit_series().unwrap().is_empty());
}

#[test]
fn test_storage_roundtrip_matches_ledger() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("predictions_tracker.csv");

    let mut ledger = Ledger::open(&path, dec!(100)).unwrap();
    ledger
        .record(slip("2025-10-20", "Inter vs Milan", dec!(2.40), "push", None))
        .unwrap();
    ledger
        .record(slip("2025-10-18", "Juventus vs Como", dec!(1.30), "win", Some(dec!(0.80))))
        .unwrap();

    let loaded = storage::load_ledger(&path).unwrap().unwrap();
    assert_eq!(loaded, ledger.records());
}

#[test]
fn test_changing_stake_between_sessions_keeps_roi() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("predictions_tracker.csv");

    let mut ledger = Ledger::open(&path, dec!(100)).unwrap();
    ledger
        .record(slip("2025-10-18", "Arsenal vs Chelsea", dec!(2.00), "win", None))
        .unwrap();
    drop(ledger);

    let ledger = Ledger::open(&path, dec!(10)).unwrap();
    assert_eq!(ledger.records()[0].stake, dec!(100));
    let stats = ledger.summarize().unwrap().unwrap();
    assert_eq!(stats.roi, dec!(100));
}

#[test]
fn test_overflowing_odds_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("predictions_tracker.csv");

    let mut ledger = Ledger::open(&path, dec!(100)).unwrap();
    let err = ledger
        .record(slip("2025-10-18", "A vs B", Decimal::MAX, "win", None))
        .unwrap_err();
    assert!(matches!(err, LedgerError::Overflow(_)));
    assert!(ledger.is_empty());
    assert!(!path.exists());
}
