use serde::{Deserialize, Serialize};

use crate::clock::RunClock;
use crate::error::SimResult;
use crate::predator::PlacementScenario;

/// Configuration for a simulation run.
///
/// Values may change between runs. Components that must see the current
/// value (such as the border offset) take the config at call time rather
/// than copying it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for deterministic simulation.
    pub seed: u64,
    /// Simulation time units per scheduling interval.
    pub interval_size: f64,
    /// Number of simulation time units in a run.
    pub num_steps: u64,
    /// Intervals each predator stays active.
    pub predator_duration: u64,
    /// Blend between average (1.0) and local (0.0) quality when placing predators.
    pub randomness: f64,
    /// Total predation pressure; predators = floor(pressure / duration).
    pub predation_pressure: f64,
    /// Offset added to both coordinates of reported predator locations.
    pub border: f64,
    /// Place predators in the upper-right quadrant starting mid-run.
    pub introduced: bool,
    /// Candidates drawn per predator before sampling gives up.
    pub max_rejection_attempts: u64,
    /// Maximum run log size (oldest events dropped when exceeded). 0 = unlimited.
    pub max_events: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            interval_size: 1.0,
            num_steps: 1000,
            predator_duration: 10,
            randomness: 0.5,
            predation_pressure: 100.0,
            border: 0.0,
            introduced: false,
            max_rejection_attempts: 1_000_000,
            max_events: 0,
        }
    }
}

impl SimConfig {
    /// Set the RNG seed for deterministic simulation.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the time units per interval.
    pub fn with_interval_size(mut self, size: f64) -> Self {
        self.interval_size = size;
        self
    }

    /// Set the number of simulation time units.
    pub fn with_num_steps(mut self, steps: u64) -> Self {
        self.num_steps = steps;
        self
    }

    /// Set how many intervals each predator stays active.
    pub fn with_predator_duration(mut self, duration: u64) -> Self {
        self.predator_duration = duration;
        self
    }

    /// Set the randomness tradeoff coefficient.
    pub fn with_randomness(mut self, randomness: f64) -> Self {
        self.randomness = randomness;
        self
    }

    /// Set the total predation pressure.
    pub fn with_predation_pressure(mut self, pressure: f64) -> Self {
        self.predation_pressure = pressure;
        self
    }

    /// Set the border offset.
    pub fn with_border(mut self, border: f64) -> Self {
        self.border = border;
        self
    }

    /// Enable or disable the introduced-predator scenario.
    pub fn with_introduced(mut self, introduced: bool) -> Self {
        self.introduced = introduced;
        self
    }

    /// Set the per-predator rejection sampling budget.
    pub fn with_max_rejection_attempts(mut self, attempts: u64) -> Self {
        self.max_rejection_attempts = attempts;
        self
    }

    /// Set the maximum run log size (0 = unlimited).
    pub fn with_max_events(mut self, max: usize) -> Self {
        self.max_events = max;
        self
    }

    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Check that the run arguments describe at least one interval.
    pub fn validate(&self) -> SimResult<()> {
        RunClock::new(self.interval_size, self.num_steps).map(|_| ())
    }

    /// Intervals in a run, or 0 if the run arguments are invalid.
    pub fn total_intervals(&self) -> u64 {
        RunClock::new(self.interval_size, self.num_steps).map_or(0, |c| c.total_intervals())
    }

    /// The predator placement scenario selected by [`Self::introduced`].
    pub fn scenario(&self) -> PlacementScenario {
        if self.introduced {
            PlacementScenario::Introduced
        } else {
            PlacementScenario::Natural
        }
    }
}
