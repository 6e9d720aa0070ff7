use std::collections::BTreeMap;

use tracing::debug;

use crate::clock::RunClock;
use crate::error::SimResult;
use crate::priority::Priority;
use crate::random::{RandomSource, SeededRandom, shuffle};
use crate::system::{Notifiable, Schedulable};

type Buckets = BTreeMap<Priority, Vec<Box<dyn Schedulable>>>;

/// Counts from a completed [`Scheduler::run`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Interval notifications sent to each notifiable.
    pub intervals: u64,
    /// Time-step notifications sent to each notifiable.
    pub time_steps: u64,
    /// Schedulable executions during the interval loop.
    pub executions: u64,
    /// Executions of run-at-end units.
    pub end_executions: u64,
}

/// Drives registered work through the intervals of one run, in priority order.
///
/// Registrations live for exactly one run: [`run`](Self::run) and
/// [`abort_run`](Self::abort_run) both leave the scheduler empty, so the same
/// instance can be reused for the next replicate.
pub struct Scheduler<R: RandomSource = SeededRandom> {
    rng: R,
    buckets: Buckets,
    at_end: Buckets,
    notifiables: Vec<Box<dyn Notifiable>>,
}

impl<R: RandomSource> std::fmt::Debug for Scheduler<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("priorities", &self.buckets.keys().collect::<Vec<_>>())
            .field("schedulables", &bucket_len(&self.buckets))
            .field("at_end", &bucket_len(&self.at_end))
            .field("notifiables", &self.notifiables.len())
            .finish()
    }
}

impl<R: RandomSource> Scheduler<R> {
    /// Create an empty scheduler that shuffles priority buckets with `rng`.
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            buckets: BTreeMap::new(),
            at_end: BTreeMap::new(),
            notifiables: Vec::new(),
        }
    }

    /// Register a unit to execute every interval at `priority`.
    pub fn register<S: Schedulable + 'static>(&mut self, unit: S, priority: Priority) {
        self.buckets
            .entry(priority)
            .or_default()
            .push(Box::new(unit));
    }

    /// Register a unit to execute once, after the last interval.
    pub fn register_at_end<S: Schedulable + 'static>(&mut self, unit: S, priority: Priority) {
        self.at_end.entry(priority).or_default().push(Box::new(unit));
    }

    /// Register a collaborator for interval and time-step notifications.
    pub fn register_notifiable<N: Notifiable + 'static>(&mut self, notifiable: N) {
        self.notifiables.push(Box::new(notifiable));
    }

    /// Total number of pending registrations of every kind.
    pub fn registered(&self) -> usize {
        bucket_len(&self.buckets) + bucket_len(&self.at_end) + self.notifiables.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.registered() == 0
    }

    /// Run `floor(num_steps / interval_size)` intervals, then the run-at-end pass.
    ///
    /// Each interval first notifies every notifiable of the interval (and of
    /// the time step, when one starts there), then executes the priority
    /// buckets in ascending order, shuffling each bucket beforehand.
    /// Invalid arguments are reported before anything is notified or
    /// executed. All registrations are cleared however the run ends.
    pub fn run(&mut self, interval_size: f64, num_steps: u64) -> SimResult<RunSummary> {
        let mut buckets = std::mem::take(&mut self.buckets);
        let mut at_end = std::mem::take(&mut self.at_end);
        let notifiables = std::mem::take(&mut self.notifiables);

        let clock = RunClock::new(interval_size, num_steps)?;
        debug!(
            intervals = clock.total_intervals(),
            num_steps,
            schedulables = bucket_len(&buckets),
            notifiables = notifiables.len(),
            "scheduler run starting"
        );

        let mut summary = RunSummary::default();
        for interval in 0..clock.total_intervals() {
            for n in &notifiables {
                n.notify_interval(interval);
            }
            summary.intervals += 1;

            if let Some(step) = clock.time_step_at(interval) {
                for n in &notifiables {
                    n.notify_time_step(step);
                }
                summary.time_steps += 1;
            }

            summary.executions += self.execute_buckets(&mut buckets, interval);
        }

        summary.end_executions = self.execute_buckets(&mut at_end, clock.total_intervals());

        debug!(
            intervals = summary.intervals,
            time_steps = summary.time_steps,
            executions = summary.executions,
            end_executions = summary.end_executions,
            "scheduler run finished"
        );
        Ok(summary)
    }

    /// Drop every registration without executing anything.
    pub fn abort_run(&mut self) {
        if !self.is_empty() {
            debug!(discarded = self.registered(), "scheduler run aborted");
        }
        self.buckets.clear();
        self.at_end.clear();
        self.notifiables.clear();
    }

    fn execute_buckets(&mut self, buckets: &mut Buckets, step: u64) -> u64 {
        let mut executed = 0;
        for units in buckets.values_mut() {
            shuffle(&mut self.rng, units);
            for unit in units.iter_mut() {
                unit.execute(step);
                executed += 1;
            }
        }
        executed
    }
}

impl Default for Scheduler<SeededRandom> {
    fn default() -> Self {
        Self::new(SeededRandom::new(0))
    }
}

fn bucket_len(buckets: &Buckets) -> usize {
    buckets.values().map(Vec::len).sum()
}
