//! Read-only views over the session state.
//!
//! Each report is serializable for `--json` output and implements
//! `Display` for the plain-text form.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::claim::{ClaimEngine, PoolWeight};
use crate::state::{Project, SessionState};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BacklogEntry {
    pub name: String,
    pub days: u32,
}

/// Projects that still owe days from past weeks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BacklogReport {
    pub entries: Vec<BacklogEntry>,
}

impl BacklogReport {
    pub fn build(state: &SessionState) -> Self {
        Self {
            entries: state
                .projects
                .iter()
                .filter(|p| p.backlog > 0)
                .map(|p| BacklogEntry {
                    name: p.name.clone(),
                    days: p.backlog,
                })
                .collect(),
        }
    }
}

impl fmt::Display for BacklogReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.entries.is_empty() {
            return writeln!(f, "No backlog, keep it up! ;)");
        }
        for entry in &self.entries {
            writeln!(f, "{}: {} days", entry.name, entry.days)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkLogEntry {
    pub name: String,
    pub total_worked: u32,
    pub worked_this_week: u32,
}

/// Lifetime and weekly totals per project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkLog {
    pub entries: Vec<WorkLogEntry>,
}

impl WorkLog {
    pub fn build(state: &SessionState) -> Self {
        Self {
            entries: state
                .projects
                .iter()
                .map(|p| WorkLogEntry {
                    name: p.name.clone(),
                    total_worked: p.total_worked,
                    worked_this_week: p.worked_this_week,
                })
                .collect(),
        }
    }
}

impl fmt::Display for WorkLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(
                f,
                "{}: {} day(s) worked ({} day(s) this week)",
                entry.name, entry.total_worked, entry.worked_this_week
            )?;
        }
        Ok(())
    }
}

/// Where the week stands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekStatus {
    pub worked_this_week: u32,
    pub weekly_target: u32,
    pub today: Option<Project>,
    pub projects: Vec<PoolWeight>,
}

impl WeekStatus {
    pub fn build(state: &SessionState, engine: &ClaimEngine) -> Self {
        Self {
            worked_this_week: state.worked_this_week(),
            weekly_target: engine.settings().weekly_target,
            today: state.last_claimed_project.clone(),
            projects: engine.pool_weights(&state.projects),
        }
    }
}

impl fmt::Display for WeekStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "This week: {}/{} day(s)",
            self.worked_this_week, self.weekly_target
        )?;
        match &self.today {
            Some(project) => writeln!(f, "Today's item is {}", project.name)?,
            None => writeln!(f, "Today is not claimed yet")?,
        }
        for weight in &self.projects {
            writeln!(
                f,
                "  {:<24} {} day(s) left  {:>5.1}%",
                weight.name,
                weight.weight,
                weight.probability * 100.0
            )?;
        }
        Ok(())
    }
}
