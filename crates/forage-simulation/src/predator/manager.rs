use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

use forage_core::Point;

use super::{Predator, PredatorRecord};
use crate::config::SimConfig;
use crate::system::Notifiable;

/// Answers "which predators are present now" for one generated predator set.
///
/// The predator list is fixed at construction. The only mutable state is
/// the current interval, which starts at 0 and follows the scheduler's
/// interval notifications. Managers are shared through the cache, so the
/// border offset is taken from the caller's config on every query.
#[derive(Debug)]
pub struct PredatorManager {
    predators: Vec<Predator>,
    current_interval: AtomicU64,
}

impl PredatorManager {
    /// Wrap a predator set. The current interval starts at 0.
    pub fn new(predators: Vec<Predator>) -> Self {
        Self {
            predators,
            current_interval: AtomicU64::new(0),
        }
    }

    /// The interval most recently announced by the scheduler.
    pub fn current_interval(&self) -> u64 {
        self.current_interval.load(Ordering::Relaxed)
    }

    /// Every predator, active or not.
    pub fn all_predators(&self) -> &[Predator] {
        &self.predators
    }

    /// Number of predators in the set.
    pub fn len(&self) -> usize {
        self.predators.len()
    }

    /// Returns true if the set has no predators.
    pub fn is_empty(&self) -> bool {
        self.predators.is_empty()
    }

    /// Border-adjusted locations of the predators active in the current
    /// interval, with duplicate locations collapsed.
    pub fn active_predators(&self, config: &SimConfig) -> Vec<Point> {
        self.collect_active(config, |_| true)
    }

    /// Like [`Self::active_predators`], restricted to locations strictly
    /// closer than `radius` to `point`. Distances are measured between
    /// border-adjusted coordinates.
    pub fn active_predators_near(&self, config: &SimConfig, point: Point, radius: f64) -> Vec<Point> {
        self.collect_active(config, |location| location.distance(&point) < radius)
    }

    /// Report rows for every predator.
    pub fn records(&self) -> Vec<PredatorRecord> {
        self.predators.iter().map(Predator::record).collect()
    }

    fn collect_active(&self, config: &SimConfig, keep: impl Fn(&Point) -> bool) -> Vec<Point> {
        let interval = self.current_interval();
        let mut seen = HashSet::new();
        self.predators
            .iter()
            .filter(|p| p.is_active(interval))
            .map(|p| p.location().offset(config.border))
            .filter(|location| keep(location))
            .filter(|location| seen.insert(location.bits()))
            .collect()
    }
}

impl Notifiable for PredatorManager {
    fn notify_interval(&self, interval: u64) {
        self.current_interval.store(interval, Ordering::Relaxed);
    }

    /// Predators are defined in intervals only.
    fn notify_time_step(&self, _step: u64) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_predators() -> PredatorManager {
        PredatorManager::new(vec![
            Predator::with_duration(3, 10, Point::new(2.3, 13.6)).unwrap(),
            Predator::with_duration(5, 10, Point::new(4.3, -4.2)).unwrap(),
            Predator::with_duration(13, 10, Point::new(23.0, 9.8)).unwrap(),
        ])
    }

    #[test]
    fn starts_at_interval_zero() {
        let manager = three_predators();
        assert_eq!(manager.current_interval(), 0);
        assert!(manager.active_predators(&SimConfig::default()).is_empty());
    }

    #[test]
    fn active_set_follows_interval_notifications() {
        let manager = three_predators();
        let config = SimConfig::default();

        manager.notify_interval(5);
        assert_eq!(
            manager.active_predators(&config),
            vec![Point::new(2.3, 13.6), Point::new(4.3, -4.2)]
        );

        manager.notify_interval(13);
        assert_eq!(
            manager.active_predators(&config),
            vec![Point::new(4.3, -4.2), Point::new(23.0, 9.8)]
        );
    }

    #[test]
    fn time_steps_do_not_move_the_interval() {
        let manager = three_predators();
        manager.notify_interval(4);
        manager.notify_time_step(99);
        assert_eq!(manager.current_interval(), 4);
    }

    #[test]
    fn border_offset_is_read_on_every_call() {
        let manager = three_predators();
        manager.notify_interval(3);

        let plain = manager.active_predators(&SimConfig::default());
        let padded = manager.active_predators(&SimConfig::default().with_border(10.0));

        assert_eq!(plain, vec![Point::new(2.3, 13.6)]);
        assert_eq!(padded, vec![Point::new(2.3, 13.6).offset(10.0)]);
        assert_eq!(manager.all_predators()[0].location(), Point::new(2.3, 13.6));
    }

    #[test]
    fn duplicate_locations_are_collapsed() {
        let here = Point::new(1.0, 1.0);
        let manager = PredatorManager::new(vec![
            Predator::with_duration(0, 5, here).unwrap(),
            Predator::with_duration(2, 5, here).unwrap(),
            Predator::with_duration(2, 5, Point::new(2.0, 2.0)).unwrap(),
        ]);
        manager.notify_interval(3);
        assert_eq!(
            manager.active_predators(&SimConfig::default()),
            vec![here, Point::new(2.0, 2.0)]
        );
    }

    #[test]
    fn near_query_uses_strict_radius() {
        let manager = three_predators();
        let config = SimConfig::default();
        manager.notify_interval(5);

        let origin = Point::new(4.3, 0.0);
        assert_eq!(
            manager.active_predators_near(&config, origin, 5.0),
            vec![Point::new(4.3, -4.2)]
        );
        assert!(manager.active_predators_near(&config, origin, 4.2).is_empty());

        let shifted = SimConfig::default().with_border(1.0);
        assert!(
            manager
                .active_predators_near(&shifted, Point::new(5.3, -3.2), 0.001)
                .contains(&Point::new(4.3, -4.2).offset(1.0))
        );
    }

    #[test]
    fn all_predators_include_inactive() {
        let manager = three_predators();
        manager.notify_interval(100);
        assert!(manager.active_predators(&SimConfig::default()).is_empty());
        assert_eq!(manager.all_predators().len(), 3);
        let records = manager.records();
        assert_eq!(records[2].start_interval, 13);
        assert_eq!(records[2].stop_interval, 23);
    }
}
