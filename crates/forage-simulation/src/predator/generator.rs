use forage_core::{Bounds, CellRect, Point, QualityField};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Predator;
use crate::config::SimConfig;
use crate::error::{SimError, SimResult};
use crate::random::RandomSource;

/// Where and when predators may appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementScenario {
    /// Anywhere on the landscape, starting at any interval that leaves room
    /// for the full duration.
    #[default]
    Natural,
    /// Only in the upper-right quadrant, all starting at the run midpoint.
    /// Predators longer than half the run stay active past its last interval.
    Introduced,
}

/// Every input that shapes a generated predator set, apart from the landscape.
#[derive(Debug, Clone, PartialEq)]
pub struct PredatorParams {
    /// Intervals each predator stays active.
    pub duration: u64,
    /// Intervals available in the run.
    pub total_intervals: u64,
    /// Blend between average (1.0) and local (0.0) quality, in `[0, 1]`.
    pub randomness: f64,
    /// Aggregate predation budget.
    pub pressure: f64,
    /// Placement variant.
    pub scenario: PlacementScenario,
    /// Candidates drawn per predator before giving up.
    pub max_attempts: u64,
}

impl PredatorParams {
    /// Read the predator parameters out of a run configuration.
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            duration: config.predator_duration,
            total_intervals: config.total_intervals(),
            randomness: config.randomness,
            pressure: config.predation_pressure,
            scenario: config.scenario(),
            max_attempts: config.max_rejection_attempts,
        }
    }

    /// Largest predator set one configuration may ask for.
    pub const MAX_PREDATORS: u64 = 10_000_000;

    /// Number of predators the pressure budget pays for.
    pub fn num_predators(&self) -> u64 {
        if self.duration == 0 {
            return 0;
        }
        (self.pressure / self.duration as f64).floor() as u64
    }

    fn validate(&self) -> SimResult<()> {
        if self.duration == 0 {
            return Err(SimError::InvalidParameter(
                "predator duration must be at least one interval".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.randomness) {
            return Err(SimError::InvalidParameter(format!(
                "randomness {} is outside [0, 1]",
                self.randomness
            )));
        }
        if !self.pressure.is_finite() || self.pressure < 0.0 {
            return Err(SimError::InvalidParameter(format!(
                "predation pressure {} must be finite and non-negative",
                self.pressure
            )));
        }
        if (self.pressure / self.duration as f64).floor() > Self::MAX_PREDATORS as f64 {
            return Err(SimError::InvalidParameter(format!(
                "predation pressure {} over duration {} asks for more than {} predators",
                self.pressure,
                self.duration,
                Self::MAX_PREDATORS
            )));
        }
        if self.max_attempts == 0 {
            return Err(SimError::InvalidParameter(
                "rejection sampling needs at least one attempt".into(),
            ));
        }
        if self.duration > self.total_intervals {
            return Err(SimError::DurationExceedsRun {
                duration: self.duration,
                intervals: self.total_intervals,
            });
        }
        Ok(())
    }
}

/// Places predators by thinning a homogeneous proposal against a quality field.
///
/// A candidate location drawn uniformly from the sampling region is kept
/// with probability `q / q_max`, where
/// `q = r * average + (1 - r) * intrinsic(cell)` and `q_max` is the highest
/// quality in the region. Higher-quality ground therefore attracts more
/// predators, and `r` flattens that preference towards uniform.
#[derive(Debug)]
pub struct PredatorEventGenerator<'a, F: QualityField + ?Sized> {
    field: &'a F,
    params: PredatorParams,
    region: Bounds,
    quality_max: f64,
    min_start: u64,
    max_start: u64,
}

impl<'a, F: QualityField + ?Sized> PredatorEventGenerator<'a, F> {
    /// Validate the parameters against the field and fix the sampling region.
    pub fn new(field: &'a F, params: PredatorParams) -> SimResult<Self> {
        params.validate()?;

        let bounds = field.bounds();
        let latest_start = params.total_intervals - params.duration;
        let (region, quality_max, min_start, max_start) = match params.scenario {
            PlacementScenario::Natural => (bounds, field.max_quality(), 0, latest_start),
            PlacementScenario::Introduced => {
                let quadrant = bounds.upper_right_quadrant();
                let cells = CellRect::new(
                    field.cell_at(Point::new(quadrant.min_x, quadrant.min_y)),
                    field.cell_at(Point::new(quadrant.max_x, quadrant.max_y)),
                );
                let midpoint = params.total_intervals / 2;
                let stop = midpoint.saturating_add(params.duration);
                if stop > params.total_intervals {
                    debug!(
                        start = midpoint,
                        stop,
                        intervals = params.total_intervals,
                        "introduced predators outlive the run"
                    );
                }
                (quadrant, field.max_quality_in(cells), midpoint, midpoint)
            }
        };

        if !quality_max.is_finite() || quality_max <= 0.0 {
            return Err(SimError::NoAcceptableQuality { max: quality_max });
        }

        Ok(Self {
            field,
            params,
            region,
            quality_max,
            min_start,
            max_start,
        })
    }

    /// The box candidate locations are drawn from.
    pub fn region(&self) -> Bounds {
        self.region
    }

    /// Generate `floor(pressure / duration)` predators.
    pub fn generate<R: RandomSource + ?Sized>(&self, rng: &mut R) -> SimResult<Vec<Predator>> {
        let count = self.params.num_predators();
        let mut predators = Vec::new();
        for _ in 0..count {
            let start = self.sample_start(rng);
            let location = self.sample_location(rng)?;
            predators.push(Predator::with_duration(
                start,
                self.params.duration,
                location,
            )?);
        }
        debug!(
            count,
            scenario = ?self.params.scenario,
            duration = self.params.duration,
            "predators generated"
        );
        Ok(predators)
    }

    fn sample_start<R: RandomSource + ?Sized>(&self, rng: &mut R) -> u64 {
        if self.min_start == self.max_start {
            return self.min_start;
        }
        rng.uniform_int(self.min_start, self.max_start)
    }

    fn sample_location<R: RandomSource + ?Sized>(&self, rng: &mut R) -> SimResult<Point> {
        let r = self.params.randomness;
        let average = self.field.average_quality();
        for _ in 0..self.params.max_attempts {
            let candidate = Point::new(
                rng.uniform(self.region.min_x, self.region.max_x),
                rng.uniform(self.region.min_y, self.region.max_y),
            );
            let local = self.field.intrinsic_quality(self.field.cell_at(candidate));
            let quality = r * average + (1.0 - r) * local;
            if rng.uniform(0.0, 1.0) <= quality / self.quality_max {
                return Ok(candidate);
            }
        }
        Err(SimError::RejectionExhausted {
            attempts: self.params.max_attempts,
        })
    }
}
