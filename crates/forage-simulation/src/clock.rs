use crate::error::{SimError, SimResult};

/// When time-step notifications fire relative to intervals.
#[derive(Debug, Clone, Copy, PartialEq)]
enum StepCadence {
    /// Each interval spans one or more steps: notify every interval.
    EveryInterval { steps_per_interval: f64 },
    /// Each step spans several intervals: notify every n-th interval.
    EveryNth { intervals_per_step: u64 },
}

/// Maps scheduling intervals onto simulation time steps for one run.
///
/// `num_steps` counts simulation time units and `interval_size` is the
/// number of time units per interval, so a run has
/// `floor(num_steps / interval_size)` intervals.
#[derive(Debug, Clone)]
pub struct RunClock {
    num_steps: u64,
    total_intervals: u64,
    cadence: StepCadence,
}

impl RunClock {
    /// Validate the run arguments and derive the interval count.
    pub fn new(interval_size: f64, num_steps: u64) -> SimResult<Self> {
        let invalid = |reason| SimError::InvalidRunArguments {
            interval_size,
            num_steps,
            reason,
        };

        if !interval_size.is_finite() || interval_size <= 0.0 {
            return Err(invalid("interval size must be finite and positive"));
        }
        if num_steps == 0 {
            return Err(invalid("a run needs at least one time step"));
        }

        let total = (num_steps as f64 / interval_size).floor();
        if total < 1.0 {
            return Err(invalid("interval size yields zero intervals"));
        }
        if total >= u64::MAX as f64 {
            return Err(invalid("interval size yields too many intervals"));
        }
        let total_intervals = total as u64;

        let cadence = if total_intervals < num_steps {
            StepCadence::EveryInterval {
                steps_per_interval: num_steps as f64 / total_intervals as f64,
            }
        } else {
            StepCadence::EveryNth {
                intervals_per_step: total_intervals / num_steps,
            }
        };

        Ok(Self {
            num_steps,
            total_intervals,
            cadence,
        })
    }

    /// Number of intervals in the run.
    pub fn total_intervals(&self) -> u64 {
        self.total_intervals
    }

    /// The time step that begins at `interval`, if any.
    ///
    /// When intervals are longer than steps every interval starts a step at
    /// `floor(interval * steps_per_interval)`. Otherwise only intervals
    /// divisible by `intervals_per_step` start one, and steps past the end
    /// of the run are never reported.
    pub fn time_step_at(&self, interval: u64) -> Option<u64> {
        match self.cadence {
            StepCadence::EveryInterval { steps_per_interval } => {
                Some((interval as f64 * steps_per_interval).floor() as u64)
            }
            StepCadence::EveryNth { intervals_per_step } => {
                if interval % intervals_per_step != 0 {
                    return None;
                }
                let step = interval / intervals_per_step;
                (step < self.num_steps).then_some(step)
            }
        }
    }

    /// How many time-step notifications a full run emits.
    pub fn time_step_count(&self) -> u64 {
        (0..self.total_intervals)
            .filter(|&i| self.time_step_at(i).is_some())
            .count() as u64
    }
}
