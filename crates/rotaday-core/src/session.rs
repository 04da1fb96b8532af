//! Session wiring: state, store and settings in one place.
//!
//! Every mutating method reconciles against `now` first, applies its
//! change, stamps `last_usage` and saves synchronously. The last save wins.

use chrono::{DateTime, FixedOffset, Utc};

use crate::claim::{ClaimEngine, ClaimOutcome};
use crate::config::{Config, RolloverSettings};
use crate::error::Result;
use crate::random::RandomSource;
use crate::registry;
use crate::rollover::{self, RolloverReport};
use crate::state::{Project, SessionState};
use crate::storage::StateStore;

pub struct Session<S: StateStore> {
    state: SessionState,
    store: S,
    engine: ClaimEngine,
    rollover: RolloverSettings,
    default_quota: u32,
    opened: RolloverReport,
}

impl<S: StateStore> Session<S> {
    /// Load the stored state (or start empty) and reconcile it against `now`.
    ///
    /// The reconciled state is saved straight away when a week boundary was
    /// crossed, so a later start in the same week cannot accrue again.
    ///
    /// # Errors
    /// A stored state that cannot be read aborts the open; nothing is
    /// replaced with defaults.
    pub fn open(store: S, config: &Config, now: DateTime<FixedOffset>) -> Result<Self> {
        let loaded = store.load()?;
        let fresh = loaded.is_none();
        let mut state = loaded.unwrap_or_else(|| SessionState::empty(now.with_timezone(&Utc)));
        let opened = rollover::reconcile(
            &mut state,
            now,
            &config.rollover.week_rule,
            config.rollover.accrual,
        );
        tracing::debug!(
            store = %store.describe(),
            fresh,
            projects = state.projects.len(),
            week = %opened.current_week,
            "session opened"
        );

        let mut session = Self {
            state,
            store,
            engine: ClaimEngine::new(config.rotation.clone()),
            rollover: config.rollover.clone(),
            default_quota: config.rotation.default_quota,
            opened,
        };
        if session.opened.rolled_over {
            session.save()?;
        }
        Ok(session)
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn engine(&self) -> &ClaimEngine {
        &self.engine
    }

    /// What reconciling at open time did.
    pub fn opened(&self) -> &RolloverReport {
        &self.opened
    }

    /// The project credited today, if the day is claimed.
    pub fn todays_project(&self) -> Option<&Project> {
        self.state.last_claimed_project.as_ref()
    }

    /// Re-run the rollover for long-lived callers whose clock moved on.
    pub fn refresh(&mut self, now: DateTime<FixedOffset>) -> Result<RolloverReport> {
        let report = rollover::reconcile(
            &mut self.state,
            now,
            &self.rollover.week_rule,
            self.rollover.accrual,
        );
        if report.rolled_over {
            self.save()?;
        }
        Ok(report)
    }

    /// Draw today's project. Saves only if a project was claimed.
    ///
    /// # Errors
    /// [`crate::ClaimError::EmptyPool`] when no project owes quota; the
    /// state is unchanged.
    pub fn auto_claim(
        &mut self,
        now: DateTime<FixedOffset>,
        rng: &mut dyn RandomSource,
    ) -> Result<ClaimOutcome> {
        self.refresh(now)?;
        let outcome = self
            .engine
            .auto_claim(&mut self.state, now.date_naive(), rng)?;
        if matches!(outcome, ClaimOutcome::Claimed { .. }) {
            self.persist(now)?;
        }
        Ok(outcome)
    }

    /// Credit a project for today regardless of quota or day state.
    pub fn force_claim(&mut self, project_id: &str, now: DateTime<FixedOffset>) -> Result<Project> {
        self.refresh(now)?;
        let project = self
            .engine
            .force_claim(&mut self.state, project_id, now.date_naive())?;
        self.persist(now)?;
        Ok(project)
    }

    /// Add a project; `quota` falls back to the configured default.
    pub fn add_project(
        &mut self,
        name: &str,
        quota: Option<u32>,
        active: bool,
        now: DateTime<FixedOffset>,
    ) -> Result<String> {
        self.refresh(now)?;
        let id = registry::add(
            &mut self.state,
            name,
            quota.unwrap_or(self.default_quota),
            active,
        )?;
        tracing::info!(%id, name, "project added");
        self.persist(now)?;
        Ok(id)
    }

    pub fn remove_project(&mut self, project_id: &str, now: DateTime<FixedOffset>) -> Result<Project> {
        self.refresh(now)?;
        let removed = registry::remove(&mut self.state, project_id)?;
        tracing::info!(id = %removed.id, name = %removed.name, "project removed");
        self.persist(now)?;
        Ok(removed)
    }

    /// Returns whether anything changed; saves only then.
    pub fn set_quota(
        &mut self,
        project_id: &str,
        quota: u32,
        now: DateTime<FixedOffset>,
    ) -> Result<bool> {
        self.refresh(now)?;
        let changed = registry::set_quota(&mut self.state, project_id, quota)?;
        if changed {
            self.persist(now)?;
        }
        Ok(changed)
    }

    /// Returns whether anything changed; saves only then.
    pub fn set_active(
        &mut self,
        project_id: &str,
        active: bool,
        now: DateTime<FixedOffset>,
    ) -> Result<bool> {
        self.refresh(now)?;
        let changed = registry::set_active(&mut self.state, project_id, active)?;
        if changed {
            self.persist(now)?;
        }
        Ok(changed)
    }

    /// Swap in a state from elsewhere (an import), reconciled and saved.
    pub fn replace_state(
        &mut self,
        state: SessionState,
        now: DateTime<FixedOffset>,
    ) -> Result<RolloverReport> {
        self.state = state;
        let report = rollover::reconcile(
            &mut self.state,
            now,
            &self.rollover.week_rule,
            self.rollover.accrual,
        );
        self.persist(now)?;
        Ok(report)
    }

    pub fn into_parts(self) -> (SessionState, S) {
        (self.state, self.store)
    }

    fn persist(&mut self, now: DateTime<FixedOffset>) -> Result<()> {
        self.state.last_usage = self.state.last_usage.max(now.with_timezone(&Utc));
        self.save()
    }

    fn save(&mut self) -> Result<()> {
        self.store.save(&self.state)?;
        Ok(())
    }
}
