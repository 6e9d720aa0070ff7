use forage_core::LandscapeId;

/// What kind of run-level event occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEventKind {
    /// A scheduler run is about to start.
    RunStarted {
        /// Intervals the run will execute.
        intervals: u64,
    },
    /// A scheduler run completed.
    RunFinished {
        /// Intervals executed.
        intervals: u64,
        /// Schedulable executions, including the run-at-end pass.
        executions: u64,
    },
    /// Registrations were discarded without running.
    RunAborted {
        /// Number of registrations dropped.
        discarded: usize,
    },
    /// A run failed its argument check.
    RunRejected,

    /// A new predator set was generated and cached.
    PredatorsGenerated {
        /// The landscape the predators were placed on.
        landscape: LandscapeId,
        /// Number of predators generated.
        count: usize,
    },
    /// A cached predator set was reused.
    PredatorsReused {
        /// The landscape the predators were placed on.
        landscape: LandscapeId,
        /// Number of predators in the set.
        count: usize,
    },
}

/// A record of something that happened to an experiment.
#[derive(Debug, Clone)]
pub struct RunEvent {
    /// The run number (starting at 1) the event belongs to; 0 before the first run.
    pub run: u64,
    /// The specific kind of event that occurred.
    pub kind: RunEventKind,
    /// A human-readable description of the event.
    pub description: String,
}

impl RunEvent {
    /// Create a new event with the given run number, kind, and description.
    pub fn new(run: u64, kind: RunEventKind, description: impl Into<String>) -> Self {
        Self {
            run,
            kind,
            description: description.into(),
        }
    }
}

/// Everything that happened across the runs of one experiment, oldest first.
///
/// With a nonzero `limit` only the newest `limit` events are kept.
#[derive(Debug, Default)]
pub struct RunLog {
    events: Vec<RunEvent>,
    limit: usize,
}

impl RunLog {
    /// An empty log keeping at most `limit` events; 0 keeps everything.
    pub fn new(limit: usize) -> Self {
        Self {
            events: Vec::new(),
            limit,
        }
    }

    /// Record `event`, forgetting the oldest entries beyond the limit.
    pub fn push(&mut self, event: RunEvent) {
        self.events.push(event);
        if self.limit == 0 {
            return;
        }
        if let Some(excess) = self.events.len().checked_sub(self.limit) {
            self.events.drain(..excess);
        }
    }

    /// The recorded events.
    pub fn events(&self) -> &[RunEvent] {
        &self.events
    }

    /// How many predator lookups were answered from the cache.
    pub fn reused_predator_sets(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e.kind, RunEventKind::PredatorsReused { .. }))
            .count()
    }

    /// Number of events currently held.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
