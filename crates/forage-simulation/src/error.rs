use forage_core::CoreError;

/// Alias for `Result<T, SimError>`.
pub type SimResult<T> = Result<T, SimError>;

/// Errors raised by the scheduler and the predator subsystem.
///
/// Every variant is fatal: configuration problems are reported before any
/// state changes, and nothing here is worth retrying.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// The interval size and step count do not describe a runnable schedule.
    #[error("invalid run arguments (interval size {interval_size}, {num_steps} steps): {reason}")]
    InvalidRunArguments {
        /// Time units per interval.
        interval_size: f64,
        /// Number of simulation time units.
        num_steps: u64,
        /// What is wrong with the combination.
        reason: &'static str,
    },

    /// A priority lies outside `Priority::FIRST..=Priority::LAST`.
    #[error("priority {0} is outside the schedulable range")]
    InvalidPriority(i32),

    /// A predator would stop at or before it starts.
    #[error("predator must stop after it starts (start {start}, stop {stop})")]
    InvalidPredator {
        /// First active interval.
        start: u64,
        /// First inactive interval.
        stop: u64,
    },

    /// Predators live longer than the run has intervals.
    #[error("predator duration {duration} exceeds the {intervals} available intervals")]
    DurationExceedsRun {
        /// Active intervals per predator.
        duration: u64,
        /// Intervals in the run.
        intervals: u64,
    },

    /// A predator-generation parameter is out of range.
    #[error("invalid predator parameter: {0}")]
    InvalidParameter(String),

    /// The sampling region has no positive quality, so no candidate can be accepted.
    #[error("maximum quality {max} in the sampling region leaves nothing to accept")]
    NoAcceptableQuality {
        /// The maximum quality that was found.
        max: f64,
    },

    /// Rejection sampling gave up on a single predator.
    #[error("no predator location accepted after {attempts} attempts")]
    RejectionExhausted {
        /// Candidates drawn before giving up.
        attempts: u64,
    },

    /// An error from the landscape layer.
    #[error(transparent)]
    Core(#[from] CoreError),
}
