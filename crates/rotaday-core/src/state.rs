//! Project and session state data model.
//!
//! Field aliases let the state load the PascalCase `savefile.json` written
//! by the earlier overlay tool, so `rotaday import` can take it as-is.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

fn new_project_id() -> String {
    Uuid::new_v4().to_string()
}

/// A recurring project with a weekly quota of work-days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default = "new_project_id")]
    pub id: String,
    #[serde(alias = "Name")]
    pub name: String,
    /// Desired work-days per week.
    #[serde(alias = "DaysPerWeek", default)]
    pub quota_per_week: u32,
    #[serde(alias = "Active", default = "default_true")]
    pub active: bool,
    #[serde(alias = "DaysWorkedThisWeek", default)]
    pub worked_this_week: u32,
    /// Unmet quota carried over from past weeks.
    #[serde(alias = "DaysBehind", default)]
    pub backlog: u32,
    #[serde(alias = "TotalDaysWorked", default)]
    pub total_worked: u32,
}

fn default_true() -> bool {
    true
}

impl Project {
    /// New project with zeroed counters.
    pub fn new(name: impl Into<String>, quota_per_week: u32, active: bool) -> Self {
        Self {
            id: new_project_id(),
            name: name.into(),
            quota_per_week,
            active,
            worked_this_week: 0,
            backlog: 0,
            total_worked: 0,
        }
    }

    /// Days still owed this week; zero once the quota is met or exceeded.
    pub fn remaining_quota(&self) -> u32 {
        self.quota_per_week.saturating_sub(self.worked_this_week)
    }
}

/// Everything that survives a restart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    #[serde(alias = "Projects", default)]
    pub projects: Vec<Project>,
    #[serde(alias = "LastUsage")]
    pub last_usage: DateTime<Utc>,
    /// Snapshot of the project claimed on the most recent active day.
    #[serde(alias = "LastProject", default)]
    pub last_claimed_project: Option<Project>,
    /// Day on which claiming was closed.
    #[serde(default)]
    pub claimed_on: Option<NaiveDate>,
}

impl SessionState {
    /// Empty registry, stamped with `now`.
    pub fn empty(now: DateTime<Utc>) -> Self {
        Self {
            projects: Vec::new(),
            last_usage: now,
            last_claimed_project: None,
            claimed_on: None,
        }
    }

    pub fn is_claimed_on(&self, day: NaiveDate) -> bool {
        self.claimed_on == Some(day)
    }

    /// Sum of `worked_this_week` across all projects.
    pub fn worked_this_week(&self) -> u32 {
        self.projects.iter().map(|p| p.worked_this_week).sum()
    }

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn project_mut(&mut self, id: &str) -> Option<&mut Project> {
        self.projects.iter_mut().find(|p| p.id == id)
    }
}
