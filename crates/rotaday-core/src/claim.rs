//! Claim engine.
//!
//! Each day moves once from unclaimed to claimed. An automatic claim draws
//! from a weighted pool where every project appears once per day of quota
//! it still owes this week; a forced claim credits a chosen project
//! unconditionally.
//!
//! # Usage
//! ```rust,ignore
//! let engine = ClaimEngine::new(RotationSettings::default());
//! match engine.auto_claim(&mut state, today, &mut ThreadRandom)? {
//!     ClaimOutcome::Claimed { project } => println!("today: {}", project.name),
//!     other => println!("{other:?}"),
//! }
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::RotationSettings;
use crate::error::ClaimError;
use crate::random::RandomSource;
use crate::state::{Project, SessionState};

/// Result of an automatic claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ClaimOutcome {
    /// A project was credited; holds its post-claim snapshot.
    Claimed { project: Project },
    /// The day was already claimed; nothing changed.
    AlreadyClaimed { project: Option<Project> },
    /// The week's total already reached the target; nothing changed.
    WeeklyTargetMet { worked: u32, target: u32 },
}

/// A project's share of the weighted pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolWeight {
    pub project_id: String,
    pub name: String,
    pub weight: u32,
    /// `weight / pool size`, or 0 when the pool is empty.
    pub probability: f64,
}

/// Selects and credits the day's project.
#[derive(Debug, Clone)]
pub struct ClaimEngine {
    settings: RotationSettings,
}

impl ClaimEngine {
    pub fn new(settings: RotationSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &RotationSettings {
        &self.settings
    }

    fn eligible(&self, project: &Project) -> bool {
        project.active || !self.settings.skip_inactive
    }

    /// Registry indices, each repeated once per day of remaining quota.
    pub fn weighted_pool(&self, projects: &[Project]) -> Vec<usize> {
        projects
            .iter()
            .enumerate()
            .filter(|(_, p)| self.eligible(p))
            .flat_map(|(i, p)| std::iter::repeat(i).take(p.remaining_quota() as usize))
            .collect()
    }

    /// Per-project weights and draw odds, in registry order.
    pub fn pool_weights(&self, projects: &[Project]) -> Vec<PoolWeight> {
        let weights: Vec<u32> = projects
            .iter()
            .map(|p| if self.eligible(p) { p.remaining_quota() } else { 0 })
            .collect();
        let total: u32 = weights.iter().sum();
        projects
            .iter()
            .zip(weights)
            .map(|(p, weight)| PoolWeight {
                project_id: p.id.clone(),
                name: p.name.clone(),
                weight,
                probability: if total == 0 {
                    0.0
                } else {
                    f64::from(weight) / f64::from(total)
                },
            })
            .collect()
    }

    /// Draw today's project.
    ///
    /// # Errors
    /// Returns [`ClaimError::EmptyPool`] when the weekly target is unmet but
    /// no project owes any quota. The state is untouched in that case.
    pub fn auto_claim(
        &self,
        state: &mut SessionState,
        today: NaiveDate,
        rng: &mut dyn RandomSource,
    ) -> Result<ClaimOutcome, ClaimError> {
        if state.is_claimed_on(today) {
            return Ok(ClaimOutcome::AlreadyClaimed {
                project: state.last_claimed_project.clone(),
            });
        }

        let worked = state.worked_this_week();
        let target = self.settings.weekly_target;
        if worked >= target {
            tracing::debug!(worked, target, "weekly target met, not claiming");
            return Ok(ClaimOutcome::WeeklyTargetMet { worked, target });
        }

        let pool = self.weighted_pool(&state.projects);
        if pool.is_empty() {
            return Err(ClaimError::EmptyPool);
        }
        let index = pool[rng.pick(pool.len())];
        let project = apply_claim(state, index, today);
        tracing::info!(project = %project.name, pool = pool.len(), "claimed day");
        Ok(ClaimOutcome::Claimed { project })
    }

    /// Credit `project_id` for today whatever its quota or the day's state.
    ///
    /// # Errors
    /// Returns [`ClaimError::UnknownProject`] if no project has that id.
    pub fn force_claim(
        &self,
        state: &mut SessionState,
        project_id: &str,
        today: NaiveDate,
    ) -> Result<Project, ClaimError> {
        let index = state
            .projects
            .iter()
            .position(|p| p.id == project_id)
            .ok_or_else(|| ClaimError::UnknownProject(project_id.to_string()))?;
        let project = apply_claim(state, index, today);
        tracing::info!(project = %project.name, "forced claim");
        Ok(project)
    }
}

fn apply_claim(state: &mut SessionState, index: usize, today: NaiveDate) -> Project {
    let project = &mut state.projects[index];
    project.worked_this_week = project.worked_this_week.saturating_add(1);
    project.total_worked = project.total_worked.saturating_add(1);
    let snapshot = project.clone();
    state.last_claimed_project = Some(snapshot.clone());
    state.claimed_on = Some(today);
    snapshot
}
