//! Subcommand implementations.

pub mod claim;
pub mod config;
pub mod import;
pub mod project;
pub mod report;

use chrono::{DateTime, FixedOffset};
use rotaday_core::storage::{open_store, StateStore};
use rotaday_core::{Clock, Config, Session, SystemClock};

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

type StoredSession = Session<Box<dyn StateStore>>;

/// Load config, open the configured store and reconcile against the clock.
pub fn open_session() -> Result<(StoredSession, DateTime<FixedOffset>), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let now = SystemClock.now();
    let store = open_store(config.storage.backend)?;
    let session = Session::open(store, &config, now)?;
    let report = session.opened();
    if report.rolled_over {
        eprintln!(
            "New week {}: weekly counts reset, backlog updated.",
            report.current_week
        );
    }
    Ok((session, now))
}

pub fn print_json<T: serde::Serialize>(value: &T) -> CommandResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
