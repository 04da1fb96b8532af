//! # rotaday Core Library
//!
//! Rotates daily effort across a handful of recurring projects. Each project
//! has a weekly quota of work-days; once a day the user claims a project,
//! either drawn at random weighted by the quota it still owes or forced by
//! hand. Unmet quota turns into backlog when a week closes.
//!
//! ## Architecture
//!
//! - **State**: projects plus last usage, last claim and the claimed day
//! - **Rollover**: reconciles persisted state against the current week
//! - **Claim engine**: weighted draw and forced claims
//! - **Storage**: JSON file, SQLite and in-memory [`StateStore`]s
//! - **Session**: ties the above together and saves after every mutation
//!
//! ## Key Components
//!
//! - [`Session`]: open, reconcile, mutate, persist
//! - [`ClaimEngine`]: the daily draw
//! - [`reconcile`]: week rollover
//! - [`Config`]: application configuration management

pub mod calendar;
pub mod claim;
pub mod clock;
pub mod config;
pub mod error;
pub mod random;
pub mod registry;
pub mod report;
pub mod rollover;
pub mod session;
pub mod state;
pub mod storage;

pub use calendar::{WeekKey, WeekNumbering, WeekRule};
pub use claim::{ClaimEngine, ClaimOutcome, PoolWeight};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{Config, RolloverSettings, RotationSettings, StorageBackend};
pub use error::{
    ClaimError, ConfigError, CoreError, StateLoadError, StateSaveError, ValidationError,
};
pub use random::{RandomSource, SeededRandom, ThreadRandom};
pub use report::{BacklogReport, WeekStatus, WorkLog};
pub use rollover::{reconcile, BacklogAccrual, RolloverReport};
pub use session::Session;
pub use state::{Project, SessionState};
pub use storage::{JsonFileStore, MemoryStore, SqliteStore, StateStore};
