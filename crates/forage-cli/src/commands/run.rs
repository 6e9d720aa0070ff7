use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use forage_core::{Point, QualityField};
use forage_simulation::{
    Notifiable, PredatorCache, PredatorManager, Priority, Schedulable, SimConfig, Simulation,
};

use crate::SetupArgs;

/// Watches the landscape centre for predators during a run.
struct EncounterMonitor {
    manager: Arc<PredatorManager>,
    config: SimConfig,
    focus: Point,
    radius: f64,
    peak_active: usize,
    exposed_intervals: u64,
}

impl Schedulable for EncounterMonitor {
    fn execute(&mut self, _step: u64) {
        let active = self.manager.active_predators(&self.config).len();
        self.peak_active = self.peak_active.max(active);
        if !self
            .manager
            .active_predators_near(&self.config, self.focus, self.radius)
            .is_empty()
        {
            self.exposed_intervals += 1;
        }
    }
}

/// Runs once after the last interval.
struct FinalSnapshot {
    manager: Arc<PredatorManager>,
    config: SimConfig,
    active: Option<usize>,
}

impl Schedulable for FinalSnapshot {
    fn execute(&mut self, _step: u64) {
        self.active = Some(self.manager.active_predators(&self.config).len());
    }
}

#[derive(Default)]
struct StepCounter {
    steps: Cell<u64>,
}

impl Notifiable for StepCounter {
    fn notify_interval(&self, _interval: u64) {}

    fn notify_time_step(&self, _step: u64) {
        self.steps.set(self.steps.get() + 1);
    }
}

pub fn run(setup: &SetupArgs, replicates: u64, radius: f64, verbose: bool) -> Result<(), String> {
    if replicates == 0 {
        return Err("at least one replicate is required".into());
    }
    if !radius.is_finite() || radius < 0.0 {
        return Err(format!("radius must be a non-negative number, got {radius}"));
    }

    let landscape = super::load_landscape(setup)?;
    let base = super::build_config(setup)?;
    let cache = Arc::new(PredatorCache::new());

    println!(
        "  {} {} replicate(s) on landscape {} {}",
        "Forage".bold(),
        replicates,
        landscape.identity(),
        format!(
            "({} steps, interval={}, radius={radius})",
            base.num_steps, base.interval_size
        )
        .dimmed()
    );
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Replicate",
        "Seed",
        "Predators",
        "Set",
        "Intervals",
        "Time steps",
        "Peak active",
        "Exposed",
        "Active at end",
    ]);

    for replicate in 0..replicates {
        let config = base.clone().with_seed(base.seed.wrapping_add(replicate));
        let mut sim = Simulation::with_cache(config.clone(), Arc::clone(&cache));
        let manager = sim
            .predators(&landscape)
            .map_err(|e| format!("predator generation failed: {e}"))?;
        let reused = sim.log().reused_predator_sets() > 0;

        let monitor = Rc::new(RefCell::new(EncounterMonitor {
            manager: Arc::clone(&manager),
            config: config.clone(),
            focus: landscape.bounds().midpoint().offset(config.border),
            radius,
            peak_active: 0,
            exposed_intervals: 0,
        }));
        let snapshot = Rc::new(RefCell::new(FinalSnapshot {
            manager: Arc::clone(&manager),
            config: config.clone(),
            active: None,
        }));
        let steps = Rc::new(StepCounter::default());

        let scheduler = sim.scheduler_mut();
        scheduler.register_notifiable(Arc::clone(&manager));
        scheduler.register_notifiable(Rc::clone(&steps));
        scheduler.register(Rc::clone(&monitor), Priority::RECORD);
        scheduler.register_at_end(Rc::clone(&snapshot), Priority::LAST);

        let summary = sim
            .run()
            .map_err(|e| format!("simulation error: {e}"))?;

        let monitor = monitor.borrow();
        let set = if reused {
            "reused".dimmed().to_string()
        } else {
            "generated".green().to_string()
        };
        let exposed = if monitor.exposed_intervals > 0 {
            monitor.exposed_intervals.to_string().red().to_string()
        } else {
            "0".to_string()
        };
        table.add_row(vec![
            (replicate + 1).to_string(),
            config.seed.to_string(),
            manager.len().to_string(),
            set,
            summary.intervals.to_string(),
            steps.steps.get().to_string(),
            monitor.peak_active.to_string(),
            exposed,
            snapshot
                .borrow()
                .active
                .map_or_else(|| "-".to_string(), |n| n.to_string()),
        ]);

        if verbose {
            println!("  {}", format!("Replicate {}", replicate + 1).bold().underline());
            for event in sim.log().events() {
                println!("  {} {}", format!("[run {}]", event.run).dimmed(), event.description);
            }
            println!();
        }
    }

    println!("{table}");
    println!();
    println!(
        "  {} predator set(s) cached for {replicates} replicate(s)",
        cache.len()
    );

    Ok(())
}
