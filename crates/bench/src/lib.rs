use std::ops::RangeInclusive;
use std::time::Duration;

use criterion::BenchmarkGroup;
use criterion::measurement::Measurement;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const RNG_SEED: u64 = 0x5EED_2026;

/// Criterion timing preset, chosen by input length.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuntimePreset {
    Small,
    Medium,
    Large,
}

impl RuntimePreset {
    pub fn for_size(size: usize) -> Self {
        match size {
            0..=4_096 => Self::Small,
            4_097..=16_384 => Self::Medium,
            _ => Self::Large,
        }
    }

    /// `(sample_size, warm_up_ms, measure_ms)`
    fn timings(self) -> (usize, u64, u64) {
        match self {
            Self::Small => (15, 100, 200),
            Self::Medium => (15, 500, 1_000),
            Self::Large => (10, 800, 1_500),
        }
    }

    pub fn apply<M: Measurement>(self, group: &mut BenchmarkGroup<'_, M>) {
        let (samples, warm_up_ms, measure_ms) = self.timings();
        group.sample_size(samples);
        group.warm_up_time(Duration::from_millis(warm_up_ms));
        group.measurement_time(Duration::from_millis(measure_ms));
    }
}

pub fn apply_runtime_config_for_size<M: Measurement>(
    group: &mut BenchmarkGroup<'_, M>,
    size: usize,
) {
    RuntimePreset::for_size(size).apply(group);
}

pub fn default_rng() -> StdRng {
    StdRng::seed_from_u64(RNG_SEED)
}

pub fn generate_values<R: Rng + ?Sized>(
    rng: &mut R,
    n: usize,
    range: RangeInclusive<i64>,
) -> Vec<i64> {
    let mut values = Vec::with_capacity(n);
    for _ in 0..n {
        values.push(rng.random_range(range.clone()));
    }
    values
}

/// `count` random inclusive ranges `(left, right)` with `left <= right < n`.
pub fn generate_ranges<R: Rng + ?Sized>(
    rng: &mut R,
    n: usize,
    count: usize,
) -> Vec<(usize, usize)> {
    debug_assert!(n > 0);
    let mut ranges = Vec::with_capacity(count);
    for _ in 0..count {
        let left = rng.random_range(0..n);
        let right = rng.random_range(left..n);
        ranges.push((left, right));
    }
    ranges
}
