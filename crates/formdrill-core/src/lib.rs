//! formdrill-core: Formula bank, answer history, drill engine, and statistics.
//!
//! This crate holds everything with real logic in formdrill: the in-memory
//! formula bank and its line loader, bounded answer histories, the interactive
//! drill state machine, and the per-topic statistics reporter.

pub mod bank;
pub mod config;
pub mod console;
pub mod engine;
pub mod error;
pub mod formula;
pub mod history;
pub mod loader;
pub mod statistics;
