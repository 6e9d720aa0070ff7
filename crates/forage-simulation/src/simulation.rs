use std::sync::Arc;

use forage_core::QualityField;
use tracing::info;

use crate::config::SimConfig;
use crate::error::SimResult;
use crate::event::{RunEvent, RunEventKind, RunLog};
use crate::predator::{CacheOutcome, PredatorCache, PredatorManager, PredatorParams};
use crate::random::SeededRandom;
use crate::scheduler::{RunSummary, Scheduler};

/// The top-level experiment orchestrator.
///
/// Owns the configuration, the scheduler, the random stream used for
/// predator generation, and the run log. The predator cache is shared, so
/// replicate experiments with identical parameters reuse one predator set.
pub struct Simulation {
    config: SimConfig,
    scheduler: Scheduler<SeededRandom>,
    rng: SeededRandom,
    cache: Arc<PredatorCache>,
    log: RunLog,
    runs: u64,
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("runs", &self.runs)
            .field("registered", &self.scheduler.registered())
            .field("cached_predator_sets", &self.cache.len())
            .field("events", &self.log.len())
            .finish()
    }
}

impl Simulation {
    /// Create a simulation with its own, empty predator cache.
    pub fn new(config: SimConfig) -> Self {
        Self::with_cache(config, Arc::new(PredatorCache::new()))
    }

    /// Create a simulation that shares `cache` with other experiments.
    ///
    /// Predator generation draws from a stream seeded with `config.seed`;
    /// bucket shuffling uses a separate stream derived from the same seed.
    pub fn with_cache(config: SimConfig, cache: Arc<PredatorCache>) -> Self {
        let scheduler = Scheduler::new(SeededRandom::new(config.seed.wrapping_add(1)));
        let rng = SeededRandom::new(config.seed);
        let log = RunLog::new(config.max_events);
        Self {
            config,
            scheduler,
            rng,
            cache,
            log,
            runs: 0,
        }
    }

    /// The current configuration.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Change the configuration between runs, e.g. to move the border.
    pub fn config_mut(&mut self) -> &mut SimConfig {
        &mut self.config
    }

    /// Register units and notifiables for the next run here.
    pub fn scheduler_mut(&mut self) -> &mut Scheduler<SeededRandom> {
        &mut self.scheduler
    }

    /// The shared predator cache.
    pub fn cache(&self) -> &Arc<PredatorCache> {
        &self.cache
    }

    /// Get the predator manager for `field` under the current configuration,
    /// generating and caching it on first use.
    ///
    /// Run arguments that describe no intervals are reported as such before
    /// any predator parameter is looked at.
    pub fn predators<F: QualityField + ?Sized>(
        &mut self,
        field: &F,
    ) -> SimResult<Arc<PredatorManager>> {
        self.config.validate()?;
        let params = PredatorParams::from_config(&self.config);
        let (manager, outcome) = self.cache.get_or_generate(field, &params, &mut self.rng)?;

        let landscape = field.identity();
        let count = manager.len();
        let (kind, verb) = match outcome {
            CacheOutcome::Generated => (
                RunEventKind::PredatorsGenerated { landscape, count },
                "generated",
            ),
            CacheOutcome::Hit => (RunEventKind::PredatorsReused { landscape, count }, "reused"),
        };
        self.log.push(RunEvent::new(
            self.runs,
            kind,
            format!("{count} predators {verb} for landscape {landscape}"),
        ));
        Ok(manager)
    }

    /// Run the scheduler with the configured interval size and step count.
    ///
    /// Whatever was registered is consumed, even when the arguments are
    /// rejected.
    pub fn run(&mut self) -> SimResult<RunSummary> {
        self.runs += 1;
        let intervals = self.config.total_intervals();
        self.log.push(RunEvent::new(
            self.runs,
            RunEventKind::RunStarted { intervals },
            format!("run {} starting with {intervals} intervals", self.runs),
        ));

        let result = self
            .scheduler
            .run(self.config.interval_size, self.config.num_steps);
        match &result {
            Ok(summary) => {
                let executions = summary.executions + summary.end_executions;
                self.log.push(RunEvent::new(
                    self.runs,
                    RunEventKind::RunFinished {
                        intervals: summary.intervals,
                        executions,
                    },
                    format!(
                        "run {} finished: {} intervals, {executions} executions",
                        self.runs, summary.intervals
                    ),
                ));
                info!(run = self.runs, intervals = summary.intervals, executions, "run finished");
            }
            Err(e) => {
                self.log.push(RunEvent::new(
                    self.runs,
                    RunEventKind::RunRejected,
                    format!("run {} rejected: {e}", self.runs),
                ));
            }
        }
        result
    }

    /// Discard everything registered for the next run without executing it.
    pub fn abort(&mut self) {
        let discarded = self.scheduler.registered();
        self.scheduler.abort_run();
        self.log.push(RunEvent::new(
            self.runs,
            RunEventKind::RunAborted { discarded },
            format!("aborted with {discarded} registrations"),
        ));
    }

    /// The run log.
    pub fn log(&self) -> &RunLog {
        &self.log
    }

    /// Number of runs started so far.
    pub fn runs(&self) -> u64 {
        self.runs
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use forage_core::GridLandscape;

    use super::*;
    use crate::error::SimError;
    use crate::priority::Priority;
    use crate::system::{Notifiable, Schedulable};

    fn config() -> SimConfig {
        SimConfig::default()
            .with_seed(7)
            .with_num_steps(60)
            .with_predator_duration(10)
            .with_predation_pressure(50.0)
    }

    /// Records how many predators are active at each interval.
    struct Census {
        manager: Arc<PredatorManager>,
        config: SimConfig,
        counts: Vec<usize>,
    }

    impl Schedulable for Census {
        fn execute(&mut self, _step: u64) {
            self.counts
                .push(self.manager.active_predators(&self.config).len());
        }
    }

    #[test]
    fn predators_follow_the_run() {
        let land = GridLandscape::uniform(20, 20, 1.0).unwrap();
        let mut sim = Simulation::new(config());
        let manager = sim.predators(&land).unwrap();
        assert_eq!(manager.len(), 5);

        let census = Rc::new(RefCell::new(Census {
            manager: Arc::clone(&manager),
            config: sim.config().clone(),
            counts: Vec::new(),
        }));
        sim.scheduler_mut().register_notifiable(Arc::clone(&manager));
        sim.scheduler_mut().register(Rc::clone(&census), Priority::RECORD);

        let summary = sim.run().unwrap();
        assert_eq!(summary.intervals, 60);
        assert_eq!(manager.current_interval(), 59);

        let census = census.borrow();
        let counts = &census.counts;
        assert_eq!(counts.len(), 60);
        for (interval, &count) in counts.iter().enumerate() {
            let expected = manager
                .all_predators()
                .iter()
                .filter(|p| p.is_active(interval as u64))
                .map(|p| p.location().bits())
                .collect::<std::collections::HashSet<_>>()
                .len();
            assert_eq!(count, expected, "interval {interval}");
        }
    }

    #[test]
    fn replicates_share_the_cached_manager() {
        let land = GridLandscape::uniform(10, 10, 1.0).unwrap();
        let cache = Arc::new(PredatorCache::new());
        let mut first = Simulation::with_cache(config(), Arc::clone(&cache));
        let mut second = Simulation::with_cache(config().with_seed(99), Arc::clone(&cache));

        let a = first.predators(&land).unwrap();
        let b = second.predators(&land).unwrap();

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);
        assert_eq!(first.log().reused_predator_sets(), 0);
        assert_eq!(second.log().reused_predator_sets(), 1);
        assert!(matches!(
            second.log().events()[0].kind,
            RunEventKind::PredatorsReused { count: 5, .. }
        ));
    }

    #[test]
    fn border_change_between_runs_is_visible() {
        let land = GridLandscape::uniform(10, 10, 1.0).unwrap();
        let mut sim = Simulation::new(config());
        let manager = sim.predators(&land).unwrap();
        let raw = manager.all_predators()[0];
        manager.notify_interval(raw.start());

        let before = manager.active_predators(sim.config());
        sim.config_mut().border = 2.0;
        let after = manager.active_predators(sim.config());

        assert!(before.contains(&raw.location()));
        assert!(after.contains(&raw.location().offset(2.0)));
    }

    #[test]
    fn rejected_run_clears_registrations_and_is_logged() {
        let mut sim = Simulation::new(config().with_interval_size(500.0));
        let census = Census {
            manager: Arc::new(PredatorManager::new(Vec::new())),
            config: SimConfig::default(),
            counts: Vec::new(),
        };
        sim.scheduler_mut().register(census, Priority::MOVE);

        assert!(matches!(sim.run(), Err(SimError::InvalidRunArguments { .. })));
        assert_eq!(sim.scheduler_mut().registered(), 0);
        let last = sim.log().events().last().unwrap();
        assert_eq!((last.run, &last.kind), (1, &RunEventKind::RunRejected));
    }

    #[test]
    fn abort_is_logged_and_next_run_is_empty() {
        let mut sim = Simulation::new(config());
        let manager = Arc::new(PredatorManager::new(Vec::new()));
        sim.scheduler_mut().register_notifiable(Arc::clone(&manager));
        sim.abort();

        assert!(matches!(
            sim.log().events()[0].kind,
            RunEventKind::RunAborted { discarded: 1 }
        ));
        sim.run().unwrap();
        assert_eq!(manager.current_interval(), 0);
    }

    #[test]
    fn duration_beyond_run_is_reported() {
        let land = GridLandscape::uniform(4, 4, 1.0).unwrap();
        let mut sim = Simulation::new(config().with_predator_duration(61));
        assert!(matches!(
            sim.predators(&land),
            Err(SimError::DurationExceedsRun { duration: 61, intervals: 60 })
        ));
        assert!(sim.cache().is_empty());
        assert_eq!(sim.log().len(), 0);
    }

    #[test]
    fn invalid_run_arguments_are_reported_before_generation() {
        let land = GridLandscape::uniform(4, 4, 1.0).unwrap();
        let mut sim = Simulation::new(config().with_interval_size(500.0));
        assert!(matches!(
            sim.predators(&land),
            Err(SimError::InvalidRunArguments { num_steps: 60, .. })
        ));
        assert!(sim.cache().is_empty());
    }
}
