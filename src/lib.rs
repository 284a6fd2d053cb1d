//! Bet tracker — personal sports-betting ledger.
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod cli;
pub mod config;
pub mod ledger;
pub mod storage;
pub mod types;
