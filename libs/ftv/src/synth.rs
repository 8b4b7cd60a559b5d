//! Synthesizer
//!
//! Produces the shared timestamp sequence and one sinusoid per series, with
//! NaN gaps placed by a per-series random phase. The pure functions here take
//! the clock reading and the phases as arguments; [`Synthesizer`] supplies
//! both from a seeded RNG and a [`Clock`].

use std::f64::consts::PI;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::shape::{RequestShape, Synthesized};
use crate::TIMESTAMP_STEP_MS;

/// Gap window period. Independent of `num_points`.
const GAP_MODULUS: f64 = 100.0;

/// Source of the "now" captured at generation time.
pub trait Clock: Send + Sync {
    /// Milliseconds since the Unix epoch.
    fn now_ms(&self) -> i64;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0)
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_ms(&self) -> i64 {
        self.0
    }
}

/// Draw one uniform gap phase in `[0, num_points)` per series.
pub fn draw_gap_phases<R: Rng>(rng: &mut R, num_series: u32, num_points: u32) -> Vec<f64> {
    (0..num_series)
        .map(|_| rng.gen::<f64>() * num_points as f64)
        .collect()
}

/// `num_points` timestamps spaced 100ms apart, the last one 100ms before `now_ms`.
pub fn timestamps(num_points: u32, now_ms: i64) -> Vec<f64> {
    let n = num_points as i64;
    (0..n)
        .map(|t| (now_ms - (n - t) * TIMESTAMP_STEP_MS) as f64)
        .collect()
}

/// Whether sample `v` of a series with `gap_phase` carries a value.
pub fn is_present(v: u32, gap_phase: f64, percent_missing: f64) -> bool {
    (v as f64 + gap_phase) % GAP_MODULUS > percent_missing
}

/// Sinusoid sample `v` of series `i`, shifted by `2i` so series stay distinguishable.
pub fn sample(i: u32, v: u32, num_points: u32) -> f64 {
    (PI * 2.0 * (2 * i as u64 + v as u64) as f64 / num_points as f64).sin()
}

/// Build the arrays for `shape` given a clock reading and one phase per series.
///
/// Series beyond `gap_phases.len()` are not generated, so callers pass exactly
/// `shape.num_series` phases.
pub fn synthesize(shape: &RequestShape, now_ms: i64, gap_phases: &[f64]) -> Synthesized {
    let series = gap_phases
        .iter()
        .take(shape.num_series as usize)
        .zip(0u32..)
        .map(|(&phase, i)| {
            (0..shape.num_points)
                .map(|v| {
                    if is_present(v, phase, shape.percent_missing) {
                        sample(i, v, shape.num_points)
                    } else {
                        f64::NAN
                    }
                })
                .collect()
        })
        .collect();

    Synthesized {
        timestamps: timestamps(shape.num_points, now_ms),
        series,
    }
}

/// Stateful synthesizer owning the gap-phase RNG and the clock.
///
/// The RNG lock is held only while drawing phases; the sample loops run
/// unlocked so concurrent misses for different shapes proceed in parallel.
pub struct Synthesizer {
    rng: Mutex<ChaCha8Rng>,
    clock: Arc<dyn Clock>,
}

impl Synthesizer {
    /// Process-level generator seeded from OS entropy, reading the wall clock.
    pub fn from_entropy() -> Self {
        Self::new(ChaCha8Rng::from_entropy(), Arc::new(SystemClock))
    }

    /// Deterministic gap placement for a fixed seed.
    pub fn seeded(seed: u64, clock: Arc<dyn Clock>) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed), clock)
    }

    pub fn new(rng: ChaCha8Rng, clock: Arc<dyn Clock>) -> Self {
        Self {
            rng: Mutex::new(rng),
            clock,
        }
    }

    /// Capture "now", draw fresh gap phases, and synthesize `shape`.
    pub fn generate(&self, shape: &RequestShape) -> Synthesized {
        let now_ms = self.clock.now_ms();
        let phases = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            draw_gap_phases(&mut *rng, shape.num_series, shape.num_points)
        };
        synthesize(shape, now_ms, &phases)
    }
}

impl Default for Synthesizer {
    fn default() -> Self {
        Self::from_entropy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000_000;

    fn missing_indices(values: &[f64]) -> Vec<usize> {
        values
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_nan())
            .map(|(i, _)| i)
            .collect()
    }

    #[test]
    fn test_timestamps_end_one_step_before_now() {
        let ts = timestamps(4, NOW);
        assert_eq!(
            ts,
            vec![
                (NOW - 400) as f64,
                (NOW - 300) as f64,
                (NOW - 200) as f64,
                (NOW - 100) as f64
            ]
        );
        assert!(timestamps(0, NOW).is_empty());
    }

    #[test]
    fn test_values_follow_shifted_sinusoid() {
        let shape = RequestShape::new(2, 8, 0.0);
        let out = synthesize(&shape, NOW, &[1.5, 3.5]);

        assert_eq!(out.series.len(), 2);
        for (i, values) in out.series.iter().enumerate() {
            for (v, value) in values.iter().enumerate() {
                let expected = (PI * 2.0 * (2 * i + v) as f64 / 8.0).sin();
                assert_eq!(value.to_bits(), expected.to_bits());
            }
        }
        // Series 1 is series 0 advanced by two samples.
        assert_eq!(out.series[1][0].to_bits(), out.series[0][2].to_bits());
    }

    #[test]
    fn test_exact_gap_positions_for_fixed_phase() {
        let shape = RequestShape::new(1, 200, 20.0);
        let out = synthesize(&shape, NOW, &[10.5]);

        // (v + 10.5) % 100 <= 20 for v in 0..=9, 90..=109, 190..=199.
        let expected: Vec<usize> = (0..=9).chain(90..=109).chain(190..=199).collect();
        assert_eq!(missing_indices(&out.series[0]), expected);
    }

    #[test]
    fn test_gap_window_wraps_at_100_for_short_series() {
        // With 10 points, (v + 5) % 100 never exceeds 50, so every sample is missing.
        let shape = RequestShape::new(1, 10, 50.0);
        let out = synthesize(&shape, NOW, &[5.0]);
        assert_eq!(missing_indices(&out.series[0]).len(), 10);

        let shape = RequestShape::new(1, 10, 10.0);
        let out = synthesize(&shape, NOW, &[5.0]);
        assert_eq!(missing_indices(&out.series[0]), vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_extremes_of_percent_missing() {
        let phases = [0.25, 7.75, 42.5];
        let none = synthesize(&RequestShape::new(3, 250, 0.0), NOW, &phases);
        assert!(none.series.iter().flatten().all(|v| v.is_finite()));

        let all = synthesize(&RequestShape::new(3, 250, 100.0), NOW, &phases);
        assert!(all.series.iter().flatten().all(|v| v.is_nan()));
    }

    #[test]
    fn test_zero_points() {
        let out = synthesize(&RequestShape::new(3, 0, 0.0), NOW, &[0.0, 0.0, 0.0]);
        assert!(out.timestamps.is_empty());
        assert_eq!(out.series.len(), 3);
        assert!(out.series.iter().all(|s| s.is_empty()));
    }

    #[test]
    fn test_gap_phases_within_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let phases = draw_gap_phases(&mut rng, 1_000, 37);
        assert_eq!(phases.len(), 1_000);
        assert!(phases.iter().all(|p| (0.0..37.0).contains(p)));

        let zero = draw_gap_phases(&mut rng, 4, 0);
        assert_eq!(zero, vec![0.0; 4]);
    }

    #[test]
    fn test_seeded_synthesizer_is_deterministic() {
        let shape = RequestShape::new(4, 300, 20.0);
        let a = Synthesizer::seeded(42, Arc::new(FixedClock(NOW))).generate(&shape);
        let b = Synthesizer::seeded(42, Arc::new(FixedClock(NOW))).generate(&shape);

        assert_eq!(a.timestamps, b.timestamps);
        for (sa, sb) in a.series.iter().zip(&b.series) {
            assert_eq!(missing_indices(sa), missing_indices(sb));
        }
    }

    #[test]
    fn test_phases_drawn_fresh_per_generation() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let first = draw_gap_phases(&mut rng, 3, 1_000);
        let second = draw_gap_phases(&mut rng, 3, 1_000);
        assert_ne!(first, second);
    }

    #[test]
    fn test_generate_captures_clock() {
        let synth = Synthesizer::seeded(1, Arc::new(FixedClock(NOW)));
        let out = synth.generate(&RequestShape::new(1, 3, 0.0));
        assert_eq!(out.timestamps.last().copied(), Some((NOW - 100) as f64));
    }
}
