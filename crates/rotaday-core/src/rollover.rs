//! Weekly rollover.
//!
//! On startup the persisted state is reconciled against the current time:
//! when a week boundary lies between `last_usage` and `now`, weekly counters
//! are reset and backlog accrues. The day's claim survives only if `now` is
//! on the same calendar day as the last save.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::{WeekKey, WeekRule};
use crate::state::SessionState;

/// How unmet quota turns into backlog at a week boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BacklogAccrual {
    /// Add the full weekly quota regardless of what was worked.
    #[default]
    FullQuota,
    /// Add only `quota - worked`, measured before the counters reset.
    Shortfall,
}

/// Backlog change for one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectAccrual {
    pub project_id: String,
    pub name: String,
    pub worked_last_week: u32,
    pub accrued: u32,
    pub backlog: u32,
}

/// What a reconcile pass did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolloverReport {
    pub previous_week: WeekKey,
    pub current_week: WeekKey,
    /// Set when a week boundary was crossed and counters were reset.
    pub rolled_over: bool,
    pub accruals: Vec<ProjectAccrual>,
    /// Today's claim was kept from the persisted state.
    pub claim_restored: bool,
}

/// Reconcile `state` against `now`.
///
/// Only a forward move into a later week is a boundary. `last_usage` is
/// moved to `now` afterwards but never backwards, so calling this again for
/// any instant in the same week, or after the clock stepped back, changes
/// nothing.
pub fn reconcile(
    state: &mut SessionState,
    now: DateTime<FixedOffset>,
    rule: &dyn WeekRule,
    accrual: BacklogAccrual,
) -> RolloverReport {
    let last = state.last_usage.with_timezone(now.offset());
    let today = now.date_naive();
    let previous_week = rule.week_of(last.date_naive());
    let current_week = rule.week_of(today);
    let rolled_over = current_week > previous_week;

    let mut accruals = Vec::new();
    if rolled_over {
        for project in &mut state.projects {
            let worked_last_week = project.worked_this_week;
            let owed = match accrual {
                BacklogAccrual::FullQuota => project.quota_per_week,
                BacklogAccrual::Shortfall => project.remaining_quota(),
            };
            project.worked_this_week = 0;
            project.backlog = project.backlog.saturating_add(owed);
            accruals.push(ProjectAccrual {
                project_id: project.id.clone(),
                name: project.name.clone(),
                worked_last_week,
                accrued: owed,
                backlog: project.backlog,
            });
        }
        tracing::info!(
            from = %previous_week,
            to = %current_week,
            projects = accruals.len(),
            "week rolled over"
        );
    }

    let same_day = last.date_naive() == today;
    if !same_day {
        state.last_claimed_project = None;
    }
    if state.claimed_on != Some(today) {
        state.claimed_on = None;
    }
    // Older state files have no claimed_on; a same-day snapshot implies it.
    if same_day && state.last_claimed_project.is_some() && state.claimed_on.is_none() {
        state.claimed_on = Some(today);
    }
    let claim_restored = state.last_claimed_project.is_some();

    state.last_usage = state.last_usage.max(now.with_timezone(&Utc));

    RolloverReport {
        previous_week,
        current_week,
        rolled_over,
        accruals,
        claim_restored,
    }
}
