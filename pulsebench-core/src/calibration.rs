//! Overhead Calibration
//!
//! Every measured run pays a fixed cost that has nothing to do with the
//! benchmarked body: the clock read pair, body construction dispatch and
//! the iteration-loop bookkeeping. This module estimates that cost as a
//! linear function of the iteration count by timing empty-body runs, so the
//! engine can subtract it from raw measurements.
//!
//! The intercept is fixed first, from a large number of zero-iteration
//! runs; the fixed overhead is dominated by the clock read pair and is
//! large relative to the per-iteration cost, so an unconstrained least
//! squares fit could land on a negative intercept and predict impossible
//! negative times for small iteration counts. With the intercept pinned,
//! the optimal slope has the closed form
//! `slope = sum(x * (t - intercept)) / sum(x^2)`.

use crate::body::{EmptyBody, run_timed};
use tracing::debug;

/// Zero-iteration runs used to fix the intercept.
const INTERCEPT_RUNS: u64 = 10_000;

/// Rounds of slope sample collection.
const CALIBRATION_ROUNDS: usize = 10;

/// Iterations represented by one unit of `x` in the slope samples. Keeps
/// the integer slope precise: the slope is stored per `scale` iterations.
const CALIBRATION_SCALE: u64 = 1_000_000;

/// Scaled iteration counts sampled per round.
const CALIBRATION_POINTS: [u64; 6] = [1, 2, 5, 10, 15, 20];

/// Linear overhead model: `overhead(n) = y_intercept + n * slope / scale`.
#[derive(Debug, Clone, Copy)]
pub struct CalibrationModel {
    scale: u64,
    slope: u64,
    y_intercept: u64,
}

impl CalibrationModel {
    /// Build a model from raw coefficients.
    pub fn new(scale: u64, slope: u64, y_intercept: u64) -> Self {
        Self {
            scale: scale.max(1),
            slope,
            y_intercept,
        }
    }

    /// Estimated harness overhead in nanoseconds for a run of `iterations`.
    pub fn overhead(&self, iterations: u64) -> u64 {
        let scaled = (iterations as u128 * self.slope as u128) / self.scale as u128;
        self.y_intercept + scaled as u64
    }

    /// Slope in nanoseconds per `scale` iterations.
    pub fn slope(&self) -> u64 {
        self.slope
    }

    /// Fixed per-run overhead in nanoseconds.
    pub fn y_intercept(&self) -> u64 {
        self.y_intercept
    }

    /// Fit the slope through `(x, t)` samples with a fixed intercept.
    ///
    /// `x` is in units of `scale` iterations and `t` is the measured time
    /// for the run. A sample that lands below the intercept contributes
    /// zero rather than wrapping.
    pub fn fit(samples: &[(u64, u64)], scale: u64, y_intercept: u64) -> Self {
        let mut sum_products = 0u64;
        let mut sum_x_squared = 0u64;

        for &(x, t) in samples {
            sum_x_squared += x * x;
            sum_products += x * t.saturating_sub(y_intercept);
        }

        let slope = if sum_x_squared == 0 {
            0
        } else {
            sum_products / sum_x_squared
        };

        Self::new(scale, slope, y_intercept)
    }

    /// Measure a model from live empty-body runs.
    ///
    /// Runs exactly once per `run_all` invocation, before any real
    /// benchmark executes; it is never recomputed per test.
    pub fn measure() -> Self {
        let mut empty = EmptyBody;

        let mut intercept_sum = 0u64;
        let mut intercept_min = u64::MAX;
        let mut intercept_max = 0u64;

        for _ in 0..INTERCEPT_RUNS {
            let intercept = run_timed(&mut empty, 0);
            intercept_sum += intercept;
            intercept_min = intercept_min.min(intercept);
            intercept_max = intercept_max.max(intercept);
        }

        let y_intercept = intercept_sum / INTERCEPT_RUNS;
        debug!(
            y_intercept,
            intercept_min, intercept_max, "estimated fixed per-run overhead"
        );

        let mut samples = Vec::with_capacity(CALIBRATION_ROUNDS * CALIBRATION_POINTS.len());
        for _ in 0..CALIBRATION_ROUNDS {
            for &x in &CALIBRATION_POINTS {
                let t = run_timed(&mut empty, x * CALIBRATION_SCALE);
                samples.push((x, t));
            }
        }

        let model = Self::fit(&samples, CALIBRATION_SCALE, y_intercept);
        debug!(
            slope = model.slope,
            scale = model.scale,
            "fitted calibration model"
        );
        model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_recovers_exact_slope() {
        // t = 40 + 7 * x: intercept fixed at 40 recovers slope 7 exactly.
        let samples: Vec<(u64, u64)> = (1..=20).map(|x| (x, 40 + 7 * x)).collect();
        let model = CalibrationModel::fit(&samples, 1_000, 40);

        assert_eq!(model.slope(), 7);
        assert_eq!(model.y_intercept(), 40);
    }

    #[test]
    fn test_fit_with_noise_averages_out() {
        // Alternate +-1 around t = 100 + 5 * x.
        let samples: Vec<(u64, u64)> = (1..=10)
            .map(|x| (x, 100 + 5 * x + if x % 2 == 0 { 1 } else { 0 }))
            .collect();
        let model = CalibrationModel::fit(&samples, 1_000, 100);

        assert_eq!(model.slope(), 5);
    }

    #[test]
    fn test_fit_samples_below_intercept_clamp() {
        let samples = vec![(1u64, 5u64), (2, 5)];
        let model = CalibrationModel::fit(&samples, 1_000, 50);

        assert_eq!(model.slope(), 0);
        assert_eq!(model.overhead(0), 50);
    }

    #[test]
    fn test_fit_empty_samples() {
        let model = CalibrationModel::fit(&[], 1_000, 12);
        assert_eq!(model.slope(), 0);
        assert_eq!(model.overhead(1_000_000), 12);
    }

    #[test]
    fn test_overhead_scales_with_iterations() {
        let model = CalibrationModel::new(1_000_000, 2_000_000, 30);

        // 2,000,000 ns per 1,000,000 iterations = 2 ns per iteration.
        assert_eq!(model.overhead(0), 30);
        assert_eq!(model.overhead(1), 32);
        assert_eq!(model.overhead(1_000_000), 2_000_030);
    }

    #[test]
    fn test_overhead_large_iteration_counts() {
        let model = CalibrationModel::new(1_000_000, 3_000_000, 0);
        // 3 ns/iteration at a billion iterations stays in range.
        assert_eq!(model.overhead(1_000_000_000), 3_000_000_000);
    }
}
