//! Interval scheduling and stochastic predator events for Forage.
//!
//! A [`Scheduler`] drives periodic work in priority order and tells
//! [`Notifiable`] collaborators when intervals and time steps begin.
//! Predator presence is synthesized once per parameter set by thinning a
//! homogeneous point process against a [`forage_core::QualityField`], cached
//! in a [`PredatorCache`], and queried through a [`PredatorManager`] while
//! the run advances.

/// Interval and time-step bookkeeping for one scheduler run.
pub mod clock;
/// Configuration for simulation runs and predator generation.
pub mod config;
/// Error types for the simulation crate.
pub mod error;
/// Run-level event types and the run log.
pub mod event;
/// Predator values, generation, caching, and queries.
pub mod predator;
/// Named and numeric scheduling priorities.
pub mod priority;
/// Injectable uniform random sources.
pub mod random;
/// Tabular predator reports.
pub mod report;
/// The priority scheduler.
pub mod scheduler;
/// Top-level experiment orchestrator.
pub mod simulation;
/// The traits scheduled and notified units implement.
pub mod system;

/// Re-export of [`clock::RunClock`].
pub use clock::RunClock;
/// Re-export of [`config::SimConfig`].
pub use config::SimConfig;
/// Re-exports of [`error::SimError`] and [`error::SimResult`].
pub use error::{SimError, SimResult};
/// Re-exports of [`event::RunLog`], [`event::RunEvent`], and [`event::RunEventKind`].
pub use event::{RunEvent, RunEventKind, RunLog};
/// Re-exports of the predator subsystem.
pub use predator::{
    CacheOutcome, PlacementScenario, Predator, PredatorCache, PredatorEventGenerator, PredatorKey,
    PredatorManager, PredatorParams, PredatorRecord,
};
/// Re-export of [`priority::Priority`].
pub use priority::Priority;
/// Re-exports of the random sources.
pub use random::{RandomSource, ScriptedRandom, SeededRandom};
/// Re-exports of [`scheduler::Scheduler`] and [`scheduler::RunSummary`].
pub use scheduler::{RunSummary, Scheduler};
/// Re-export of [`simulation::Simulation`].
pub use simulation::Simulation;
/// Re-exports of [`system::Schedulable`] and [`system::Notifiable`].
pub use system::{Notifiable, Schedulable};
