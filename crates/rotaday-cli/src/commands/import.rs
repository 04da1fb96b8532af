use std::path::Path;

use rotaday_core::{JsonFileStore, StateStore};

use super::{open_session, CommandResult};

pub fn run(path: &Path) -> CommandResult {
    let imported = JsonFileStore::read(path)?;
    let (mut session, now) = open_session()?;
    let count = imported.projects.len();
    let report = session.replace_state(imported, now)?;
    println!(
        "Imported {count} project(s) into {}",
        session.store().describe()
    );
    if report.rolled_over {
        println!("Week rolled over since the file was saved; backlog updated.");
    }
    Ok(())
}
