//! Per-Test Result Statistics
//!
//! A `TestResult` owns the net per-run durations of one executed benchmark
//! (measurement overhead already subtracted, clamped at zero) and derives
//! every reported figure from them at construction time.

use crate::NANOS_PER_SECOND;
use crate::quartiles::compute_quartiles;
use serde::Serialize;

/// Timing statistics for one executed benchmark.
///
/// Immutable once built: the constructor walks the duration sequence once
/// for total/min/max, a second time for the standard deviation, and sorts a
/// copy for the quartiles. Throughput and per-iteration figures are derived
/// on demand from the stored aggregates.
#[derive(Debug, Clone, Serialize)]
pub struct TestResult {
    run_times: Vec<u64>,
    iterations: u64,
    time_total: u64,
    time_run_min: u64,
    time_run_max: u64,
    time_std_dev: f64,
    time_median: f64,
    time_quartile1: f64,
    time_quartile3: f64,
}

impl TestResult {
    /// Build the statistics from net per-run durations in nanoseconds.
    ///
    /// `iterations` is the repetition count each run performed; it only
    /// feeds the per-iteration figures, which are reported as 0 when it is
    /// zero rather than dividing by it.
    pub fn new(run_times: Vec<u64>, iterations: u64) -> Self {
        let mut time_total = 0u64;
        let mut time_run_min = u64::MAX;
        let mut time_run_max = 0u64;

        for &run in &run_times {
            time_total += run;
            time_run_min = time_run_min.min(run);
            time_run_max = time_run_max.max(run);
        }

        if run_times.is_empty() {
            time_run_min = 0;
            time_run_max = 0;
        }

        let mean = if run_times.is_empty() {
            0.0
        } else {
            time_total as f64 / run_times.len() as f64
        };

        let time_std_dev = if run_times.len() < 2 {
            0.0
        } else {
            let accu: f64 = run_times
                .iter()
                .map(|&run| {
                    let diff = run as f64 - mean;
                    diff * diff
                })
                .sum();
            (accu / (run_times.len() - 1) as f64).sqrt()
        };

        let mut sorted = run_times.clone();
        sorted.sort_unstable();
        let quartiles = compute_quartiles(&sorted);

        Self {
            run_times,
            iterations,
            time_total,
            time_run_min,
            time_run_max,
            time_std_dev,
            time_median: quartiles.median,
            time_quartile1: quartiles.quartile1,
            time_quartile3: quartiles.quartile3,
        }
    }

    /// Net per-run durations in nanoseconds, in execution order.
    pub fn run_times(&self) -> &[u64] {
        &self.run_times
    }

    /// Iteration count each run performed.
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    /// Total time across all runs in nanoseconds.
    pub fn time_total(&self) -> f64 {
        self.time_total as f64
    }

    /// Average time per run.
    pub fn run_time_average(&self) -> f64 {
        if self.run_times.is_empty() {
            0.0
        } else {
            self.time_total as f64 / self.run_times.len() as f64
        }
    }

    /// Sample standard deviation of the run times (0 for a single run).
    pub fn run_time_std_dev(&self) -> f64 {
        self.time_std_dev
    }

    /// Median (2nd quartile) time per run.
    pub fn run_time_median(&self) -> f64 {
        self.time_median
    }

    /// 1st quartile time per run.
    pub fn run_time_quartile1(&self) -> f64 {
        self.time_quartile1
    }

    /// 3rd quartile time per run.
    pub fn run_time_quartile3(&self) -> f64 {
        self.time_quartile3
    }

    /// Fastest run in nanoseconds.
    pub fn run_time_minimum(&self) -> f64 {
        self.time_run_min as f64
    }

    /// Slowest run in nanoseconds.
    pub fn run_time_maximum(&self) -> f64 {
        self.time_run_max as f64
    }

    /// Average runs per second.
    pub fn runs_per_second_average(&self) -> f64 {
        NANOS_PER_SECOND / self.run_time_average()
    }

    /// Median runs per second.
    pub fn runs_per_second_median(&self) -> f64 {
        NANOS_PER_SECOND / self.time_median
    }

    /// 1st quartile runs per second.
    pub fn runs_per_second_quartile1(&self) -> f64 {
        NANOS_PER_SECOND / self.time_quartile1
    }

    /// 3rd quartile runs per second.
    pub fn runs_per_second_quartile3(&self) -> f64 {
        NANOS_PER_SECOND / self.time_quartile3
    }

    /// Best throughput: the inverse of the FASTEST run.
    pub fn runs_per_second_maximum(&self) -> f64 {
        NANOS_PER_SECOND / self.time_run_min as f64
    }

    /// Worst throughput: the inverse of the SLOWEST run.
    pub fn runs_per_second_minimum(&self) -> f64 {
        NANOS_PER_SECOND / self.time_run_max as f64
    }

    /// Average time per iteration.
    pub fn iteration_time_average(&self) -> f64 {
        self.per_iteration(self.run_time_average())
    }

    /// Standard deviation of the time per iteration.
    pub fn iteration_time_std_dev(&self) -> f64 {
        self.per_iteration(self.time_std_dev)
    }

    /// Median time per iteration.
    pub fn iteration_time_median(&self) -> f64 {
        self.per_iteration(self.time_median)
    }

    /// 1st quartile time per iteration.
    pub fn iteration_time_quartile1(&self) -> f64 {
        self.per_iteration(self.time_quartile1)
    }

    /// 3rd quartile time per iteration.
    pub fn iteration_time_quartile3(&self) -> f64 {
        self.per_iteration(self.time_quartile3)
    }

    /// Fastest per-iteration time.
    pub fn iteration_time_minimum(&self) -> f64 {
        self.per_iteration(self.time_run_min as f64)
    }

    /// Slowest per-iteration time.
    pub fn iteration_time_maximum(&self) -> f64 {
        self.per_iteration(self.time_run_max as f64)
    }

    /// Average iterations per second.
    pub fn iterations_per_second_average(&self) -> f64 {
        NANOS_PER_SECOND / self.iteration_time_average()
    }

    /// Median iterations per second.
    pub fn iterations_per_second_median(&self) -> f64 {
        NANOS_PER_SECOND / self.iteration_time_median()
    }

    /// 1st quartile iterations per second.
    pub fn iterations_per_second_quartile1(&self) -> f64 {
        NANOS_PER_SECOND / self.iteration_time_quartile1()
    }

    /// 3rd quartile iterations per second.
    pub fn iterations_per_second_quartile3(&self) -> f64 {
        NANOS_PER_SECOND / self.iteration_time_quartile3()
    }

    /// Worst iteration throughput: the inverse of the slowest iteration time.
    pub fn iterations_per_second_minimum(&self) -> f64 {
        NANOS_PER_SECOND / self.iteration_time_maximum()
    }

    /// Best iteration throughput: the inverse of the fastest iteration time.
    pub fn iterations_per_second_maximum(&self) -> f64 {
        NANOS_PER_SECOND / self.iteration_time_minimum()
    }

    fn per_iteration(&self, per_run: f64) -> f64 {
        if self.iterations == 0 {
            0.0
        } else {
            per_run / self.iterations as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_is_sum_over_count() {
        let result = TestResult::new(vec![10, 20, 30, 40], 1);
        assert!((result.run_time_average() - 25.0).abs() < f64::EPSILON);
        assert!((result.time_total() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_average_scales_with_iterations() {
        let result = TestResult::new(vec![100, 200, 300], 10);
        let per_run = result.run_time_average();
        let per_iteration = result.iteration_time_average();
        assert!((per_run - per_iteration * 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_even_count_quartiles() {
        let result = TestResult::new(vec![10, 20, 30, 40], 1);
        assert!((result.run_time_median() - 25.0).abs() < f64::EPSILON);
        assert!((result.run_time_quartile1() - 15.0).abs() < f64::EPSILON);
        assert!((result.run_time_quartile3() - 35.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_odd_count_quartiles() {
        let result = TestResult::new(vec![30, 10, 20], 1);
        assert!((result.run_time_median() - 20.0).abs() < f64::EPSILON);
        assert!((result.run_time_quartile1() - 15.0).abs() < f64::EPSILON);
        assert!((result.run_time_quartile3() - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_min_max_over_raw_order() {
        let result = TestResult::new(vec![50, 10, 40, 20], 1);
        assert!((result.run_time_minimum() - 10.0).abs() < f64::EPSILON);
        assert!((result.run_time_maximum() - 50.0).abs() < f64::EPSILON);
        // Input order survives for the sinks
        assert_eq!(result.run_times(), &[50, 10, 40, 20]);
    }

    #[test]
    fn test_std_dev_sample_form() {
        // mean = 20, squared diffs = 100 + 0 + 100, / (3 - 1) = 100
        let result = TestResult::new(vec![10, 20, 30], 1);
        assert!((result.run_time_std_dev() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_run_degrades_gracefully() {
        let result = TestResult::new(vec![1000], 1);
        assert!((result.run_time_std_dev() - 0.0).abs() < f64::EPSILON);
        assert!((result.run_time_quartile1() - 1000.0).abs() < f64::EPSILON);
        assert!((result.run_time_quartile3() - 1000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_throughput_inversion() {
        let result = TestResult::new(vec![10, 40], 1);
        // Fastest run (10 ns) bounds the BEST throughput, slowest the worst.
        assert!((result.runs_per_second_maximum() - 1e8).abs() < 1.0);
        assert!((result.runs_per_second_minimum() - 2.5e7).abs() < 1.0);
        assert!(result.runs_per_second_maximum() > result.runs_per_second_minimum());
    }

    #[test]
    fn test_iteration_inversion_mirrors_run_inversion() {
        let result = TestResult::new(vec![100, 400], 10);
        assert!((result.iterations_per_second_maximum() - NANOS_PER_SECOND / 10.0).abs() < 1.0);
        assert!((result.iterations_per_second_minimum() - NANOS_PER_SECOND / 40.0).abs() < 1.0);
    }

    #[test]
    fn test_zero_iterations_guard() {
        let result = TestResult::new(vec![100, 200], 0);
        assert!((result.iteration_time_average() - 0.0).abs() < f64::EPSILON);
        assert!((result.iteration_time_std_dev() - 0.0).abs() < f64::EPSILON);
        assert!((result.iteration_time_maximum() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_durations_do_not_crash() {
        let result = TestResult::new(vec![0, 0, 0], 1);
        assert!((result.run_time_average() - 0.0).abs() < f64::EPSILON);
        assert!(result.runs_per_second_average().is_infinite());
    }
}
