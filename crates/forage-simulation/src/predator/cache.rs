use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use forage_core::{LandscapeId, QualityField};
use tracing::{debug, info};

use super::generator::{PlacementScenario, PredatorEventGenerator, PredatorParams};
use super::manager::PredatorManager;
use crate::error::SimResult;
use crate::random::RandomSource;

/// Identifies one predator generation configuration.
///
/// Floating-point fields are compared bit for bit, so two keys are equal
/// exactly when every input that shapes the generated set is identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PredatorKey {
    landscape: LandscapeId,
    duration: u64,
    total_intervals: u64,
    randomness: u64,
    pressure: u64,
    scenario: PlacementScenario,
}

impl PredatorKey {
    /// Build the key for generating `params` on `field`.
    pub fn new<F: QualityField + ?Sized>(field: &F, params: &PredatorParams) -> Self {
        Self {
            landscape: field.identity(),
            duration: params.duration,
            total_intervals: params.total_intervals,
            randomness: params.randomness.to_bits(),
            pressure: params.pressure.to_bits(),
            scenario: params.scenario,
        }
    }

    /// The landscape part of the key.
    pub fn landscape(&self) -> LandscapeId {
        self.landscape
    }
}

/// Whether [`PredatorCache::get_or_generate`] reused an existing set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheOutcome {
    /// The manager was already cached.
    Hit,
    /// The manager was generated by this call.
    Generated,
}

/// Memoizes predator managers by generation configuration.
///
/// Entries are never evicted. The map lock is held while a missing set is
/// generated, so concurrent callers with the same key wait for the first
/// one instead of generating twice.
#[derive(Debug, Default)]
pub struct PredatorCache {
    managers: Mutex<HashMap<PredatorKey, Arc<PredatorManager>>>,
}

impl PredatorCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the manager for this configuration, generating it on first use.
    ///
    /// A hit returns the very same `Arc` handed out before. `rng` is only
    /// drawn from on a miss.
    pub fn get_or_generate<F, R>(
        &self,
        field: &F,
        params: &PredatorParams,
        rng: &mut R,
    ) -> SimResult<(Arc<PredatorManager>, CacheOutcome)>
    where
        F: QualityField + ?Sized,
        R: RandomSource + ?Sized,
    {
        let key = PredatorKey::new(field, params);
        let mut managers = self.managers.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(manager) = managers.get(&key) {
            debug!(landscape = %key.landscape(), predators = manager.len(), "predator cache hit");
            return Ok((Arc::clone(manager), CacheOutcome::Hit));
        }

        let generator = PredatorEventGenerator::new(field, params.clone())?;
        let manager = Arc::new(PredatorManager::new(generator.generate(rng)?));
        managers.insert(key, Arc::clone(&manager));
        info!(
            landscape = %key.landscape(),
            predators = manager.len(),
            cached = managers.len(),
            "predator set generated"
        );
        Ok((manager, CacheOutcome::Generated))
    }

    /// Whether a manager is cached for this configuration.
    pub fn contains<F: QualityField + ?Sized>(&self, field: &F, params: &PredatorParams) -> bool {
        let key = PredatorKey::new(field, params);
        self.managers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&key)
    }

    /// Number of cached configurations.
    pub fn len(&self) -> usize {
        self.managers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true if nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use forage_core::GridLandscape;

    use super::*;
    use crate::random::SeededRandom;

    fn base_params() -> PredatorParams {
        PredatorParams {
            duration: 5,
            total_intervals: 100,
            randomness: 0.5,
            pressure: 40.0,
            scenario: PlacementScenario::Natural,
            max_attempts: 10_000,
        }
    }

    #[test]
    fn identical_keys_share_one_instance() {
        let land = GridLandscape::uniform(5, 5, 1.0).unwrap();
        let cache = PredatorCache::new();
        let mut rng = SeededRandom::new(1);

        let (first, outcome) = cache.get_or_generate(&land, &base_params(), &mut rng).unwrap();
        assert_eq!(outcome, CacheOutcome::Generated);
        let (second, outcome) = cache.get_or_generate(&land, &base_params(), &mut rng).unwrap();
        assert_eq!(outcome, CacheOutcome::Hit);

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
        assert!(cache.contains(&land, &base_params()));
    }

    #[test]
    fn any_differing_field_misses() {
        let land = GridLandscape::uniform(5, 5, 1.0).unwrap();
        let other_land = GridLandscape::uniform(5, 5, 1.0).unwrap();
        let cache = PredatorCache::new();
        let mut rng = SeededRandom::new(2);
        let (base, _) = cache.get_or_generate(&land, &base_params(), &mut rng).unwrap();

        let mut variants = vec![
            PredatorParams {
                duration: 4,
                ..base_params()
            },
            PredatorParams {
                total_intervals: 99,
                ..base_params()
            },
            PredatorParams {
                randomness: 0.25,
                ..base_params()
            },
            PredatorParams {
                pressure: 41.0,
                ..base_params()
            },
            PredatorParams {
                scenario: PlacementScenario::Introduced,
                ..base_params()
            },
        ];
        for params in variants.drain(..) {
            let (manager, outcome) = cache.get_or_generate(&land, &params, &mut rng).unwrap();
            assert_eq!(outcome, CacheOutcome::Generated, "{params:?}");
            assert!(!Arc::ptr_eq(&base, &manager));
        }

        let (manager, outcome) = cache
            .get_or_generate(&other_land, &base_params(), &mut rng)
            .unwrap();
        assert_eq!(outcome, CacheOutcome::Generated);
        assert!(!Arc::ptr_eq(&base, &manager));
        assert_eq!(cache.len(), 7);
    }

    #[test]
    fn failed_generation_is_not_cached() {
        let land = GridLandscape::uniform(5, 5, 1.0).unwrap();
        let cache = PredatorCache::new();
        let params = PredatorParams {
            duration: 200,
            ..base_params()
        };
        assert!(
            cache
                .get_or_generate(&land, &params, &mut SeededRandom::new(0))
                .is_err()
        );
        assert!(cache.is_empty());
    }

    #[test]
    fn hit_does_not_draw_random_numbers() {
        let land = GridLandscape::uniform(5, 5, 1.0).unwrap();
        let cache = PredatorCache::new();
        cache
            .get_or_generate(&land, &base_params(), &mut SeededRandom::new(3))
            .unwrap();

        let mut rng = crate::random::ScriptedRandom::default();
        cache.get_or_generate(&land, &base_params(), &mut rng).unwrap();
        assert_eq!(rng.uniform_draws() + rng.integer_draws(), 0);
    }

    #[test]
    fn concurrent_lookups_generate_once() {
        let land = Arc::new(GridLandscape::uniform(8, 8, 1.0).unwrap());
        let cache = Arc::new(PredatorCache::new());

        let handles: Vec<_> = (0..4)
            .map(|seed| {
                let land = Arc::clone(&land);
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    let mut rng = SeededRandom::new(seed);
                    cache
                        .get_or_generate(land.as_ref(), &base_params(), &mut rng)
                        .unwrap()
                        .0
                })
            })
            .collect();
        let managers: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(cache.len(), 1);
        assert!(managers.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    }
}
