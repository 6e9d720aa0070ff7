//! Predator presence events.
//!
//! A [`Predator`] occupies one location for a half-open range of intervals.
//! Sets of them are produced by [`PredatorEventGenerator`], memoized by
//! [`PredatorCache`], and queried through [`PredatorManager`].

mod cache;
mod generator;
mod manager;

use forage_core::Point;
use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

pub use cache::{CacheOutcome, PredatorCache, PredatorKey};
pub use generator::{PlacementScenario, PredatorEventGenerator, PredatorParams};
pub use manager::PredatorManager;

/// A predator present at `location` from interval `start` up to, but not
/// including, interval `stop`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Predator {
    start: u64,
    stop: u64,
    location: Point,
}

impl Predator {
    /// Create a predator. Fails unless `stop > start`.
    pub fn new(start: u64, stop: u64, location: Point) -> SimResult<Self> {
        if stop <= start {
            return Err(SimError::InvalidPredator { start, stop });
        }
        Ok(Self {
            start,
            stop,
            location,
        })
    }

    /// Create a predator active for `duration` intervals from `start`.
    pub fn with_duration(start: u64, duration: u64, location: Point) -> SimResult<Self> {
        let stop = start
            .checked_add(duration)
            .ok_or(SimError::InvalidPredator { start, stop: start })?;
        Self::new(start, stop, location)
    }

    /// First active interval.
    pub fn start(&self) -> u64 {
        self.start
    }

    /// First interval at which the predator is gone again.
    pub fn stop(&self) -> u64 {
        self.stop
    }

    /// Number of active intervals.
    pub fn duration(&self) -> u64 {
        self.stop - self.start
    }

    /// Raw location, without any border offset.
    pub fn location(&self) -> Point {
        self.location
    }

    /// Whether the predator is present during `interval`.
    pub fn is_active(&self, interval: u64) -> bool {
        (self.start..self.stop).contains(&interval)
    }

    /// The four-column report row for this predator.
    pub fn record(&self) -> PredatorRecord {
        PredatorRecord {
            start_interval: self.start,
            stop_interval: self.stop,
            x: self.location.x,
            y: self.location.y,
        }
    }
}

/// Flat report row: `startInterval, stopInterval, x, y`.
///
/// Field names and order are relied upon by downstream report readers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredatorRecord {
    /// First active interval.
    pub start_interval: u64,
    /// First inactive interval.
    pub stop_interval: u64,
    /// Raw x coordinate.
    pub x: f64,
    /// Raw y coordinate.
    pub y: f64,
}

impl PredatorRecord {
    /// Column names in report order.
    pub const COLUMNS: [&'static str; 4] = ["startInterval", "stopInterval", "x", "y"];
}
