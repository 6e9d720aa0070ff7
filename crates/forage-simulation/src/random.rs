use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A source of uniform random numbers.
///
/// The scheduler and the predator generator only ever draw through this
/// trait, so tests can swap in [`ScriptedRandom`].
pub trait RandomSource {
    /// A double in `[low, high)`. Returns `low` when the range is empty.
    fn uniform(&mut self, low: f64, high: f64) -> f64;

    /// An integer in `[low, high]`. Returns `low` when `high <= low`.
    fn uniform_int(&mut self, low: u64, high: u64) -> u64;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        (**self).uniform(low, high)
    }

    fn uniform_int(&mut self, low: u64, high: u64) -> u64 {
        (**self).uniform_int(low, high)
    }
}

/// Fisher-Yates shuffle driven by a [`RandomSource`].
pub fn shuffle<T, R: RandomSource + ?Sized>(rng: &mut R, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = rng.uniform_int(0, i as u64) as usize;
        items.swap(i, j);
    }
}

/// The production source: a seeded `StdRng`.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    /// Create a source from a seed. Equal seeds give equal sequences.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        if high > low {
            self.rng.random_range(low..high)
        } else {
            low
        }
    }

    fn uniform_int(&mut self, low: u64, high: u64) -> u64 {
        if high > low {
            self.rng.random_range(low..=high)
        } else {
            low
        }
    }
}

/// A deterministic stub that replays fixed values.
///
/// Doubles are scripted as unit fractions and scaled into the requested
/// range; integers are scripted as offsets from `low`, clamped to `high`.
/// Both scripts cycle when exhausted. An empty script yields `low`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    fractions: Vec<f64>,
    offsets: Vec<u64>,
    next_fraction: usize,
    next_offset: usize,
    uniform_draws: u64,
    integer_draws: u64,
}

impl ScriptedRandom {
    /// Create a stub from its double and integer scripts.
    pub fn new(fractions: Vec<f64>, offsets: Vec<u64>) -> Self {
        Self {
            fractions,
            offsets,
            ..Self::default()
        }
    }

    /// Number of doubles drawn so far.
    pub fn uniform_draws(&self) -> u64 {
        self.uniform_draws
    }

    /// Number of integers drawn so far.
    pub fn integer_draws(&self) -> u64 {
        self.integer_draws
    }
}

impl RandomSource for ScriptedRandom {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        self.uniform_draws += 1;
        if self.fractions.is_empty() {
            return low;
        }
        let f = self.fractions[self.next_fraction % self.fractions.len()];
        self.next_fraction += 1;
        low + f * (high - low).max(0.0)
    }

    fn uniform_int(&mut self, low: u64, high: u64) -> u64 {
        self.integer_draws += 1;
        if self.offsets.is_empty() {
            return low;
        }
        let offset = self.offsets[self.next_offset % self.offsets.len()];
        self.next_offset += 1;
        low.saturating_add(offset).min(high.max(low))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_is_deterministic() {
        let mut a = SeededRandom::new(7);
        let mut b = SeededRandom::new(7);
        for _ in 0..20 {
            assert_eq!(a.uniform_int(0, 100), b.uniform_int(0, 100));
            assert_eq!(a.uniform(0.0, 1.0).to_bits(), b.uniform(0.0, 1.0).to_bits());
        }
    }

    #[test]
    fn seeded_respects_ranges() {
        let mut rng = SeededRandom::new(3);
        for _ in 0..500 {
            let d = rng.uniform(-2.0, 5.0);
            assert!((-2.0..5.0).contains(&d));
            let i = rng.uniform_int(4, 9);
            assert!((4..=9).contains(&i));
        }
    }

    #[test]
    fn empty_ranges_return_low() {
        let mut rng = SeededRandom::new(1);
        assert_eq!(rng.uniform(3.0, 3.0), 3.0);
        assert_eq!(rng.uniform_int(8, 2), 8);
    }

    #[test]
    fn scripted_scales_and_cycles() {
        let mut rng = ScriptedRandom::new(vec![0.0, 0.5], vec![1, 10]);
        assert_eq!(rng.uniform(2.0, 4.0), 2.0);
        assert_eq!(rng.uniform(2.0, 4.0), 3.0);
        assert_eq!(rng.uniform(0.0, 1.0), 0.0);
        assert_eq!(rng.uniform_int(5, 8), 6);
        assert_eq!(rng.uniform_int(5, 8), 8);
        assert_eq!(rng.uniform_draws(), 3);
        assert_eq!(rng.integer_draws(), 2);
    }

    #[test]
    fn shuffle_keeps_every_item() {
        let mut rng = SeededRandom::new(11);
        let mut items: Vec<u32> = (0..50).collect();
        shuffle(&mut rng, &mut items);
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn shuffle_with_zero_offsets_rotates_predictably() {
        // Always picking j = 0 moves the tail item to the front each step.
        let mut rng = ScriptedRandom::new(vec![], vec![0]);
        let mut items = vec!['a', 'b', 'c'];
        shuffle(&mut rng, &mut items);
        assert_eq!(items, vec!['b', 'c', 'a']);
    }
}
