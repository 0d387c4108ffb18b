//! Output Sinks
//!
//! The registry pushes an ordered event stream into every attached sink:
//! `begin`, then per test either `skip_disabled_test` or a
//! `begin_test`/`end_test` pair, then `end`. Sink implementations live in
//! the report crate; this module defines the interface the engine consumes
//! plus the minimal structured-log sink the registry falls back to when
//! nothing is attached, so results are never silently dropped.

use crate::params::Parameters;
use pulsebench_stats::TestResult;
use tracing::info;

/// Borrowed view of the test a sink event refers to.
#[derive(Debug, Clone, Copy)]
pub struct TestInfo<'a> {
    /// Fixture name.
    pub fixture_name: &'a str,
    /// Test name.
    pub test_name: &'a str,
    /// Display parameters.
    pub parameters: &'a Parameters,
    /// Independent measured executions.
    pub runs: u64,
    /// Body repetitions per run.
    pub iterations: u64,
}

impl TestInfo<'_> {
    /// `Fixture.Test(params)` as the sinks display it.
    pub fn display_name(&self) -> String {
        format!(
            "{}.{}{}",
            self.fixture_name, self.test_name, self.parameters
        )
    }
}

/// Consumer of the per-run event stream.
pub trait Outputter {
    /// A run-all invocation is starting.
    fn begin(&mut self, enabled: usize, disabled: usize);

    /// The run-all invocation finished.
    fn end(&mut self, enabled: usize, disabled: usize);

    /// A test is about to execute.
    fn begin_test(&mut self, info: &TestInfo<'_>);

    /// A disabled test was encountered and will not execute.
    fn skip_disabled_test(&mut self, info: &TestInfo<'_>);

    /// A test finished; `result` is its computed statistics.
    fn end_test(&mut self, info: &TestInfo<'_>, result: &TestResult);
}

impl std::fmt::Debug for dyn Outputter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<dyn Outputter>")
    }
}

/// Fallback sink emitting one structured log event per lifecycle point.
#[derive(Debug, Default)]
pub struct LogOutputter;

impl Outputter for LogOutputter {
    fn begin(&mut self, enabled: usize, disabled: usize) {
        info!(enabled, disabled, "running benchmarks");
    }

    fn end(&mut self, enabled: usize, disabled: usize) {
        info!(enabled, disabled, "benchmark run finished");
    }

    fn begin_test(&mut self, info: &TestInfo<'_>) {
        info!(
            test = %info.display_name(),
            runs = info.runs,
            iterations = info.iterations,
            "running"
        );
    }

    fn skip_disabled_test(&mut self, info: &TestInfo<'_>) {
        info!(test = %info.display_name(), "disabled, skipping");
    }

    fn end_test(&mut self, info: &TestInfo<'_>, result: &TestResult) {
        info!(
            test = %info.display_name(),
            average_ns = result.run_time_average(),
            std_dev_ns = result.run_time_std_dev(),
            min_ns = result.run_time_minimum(),
            max_ns = result.run_time_maximum(),
            "done"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_without_parameters() {
        let parameters = Parameters::empty();
        let info = TestInfo {
            fixture_name: "Vector",
            test_name: "PushBack",
            parameters: &parameters,
            runs: 10,
            iterations: 100,
        };
        assert_eq!(info.display_name(), "Vector.PushBack");
    }

    #[test]
    fn test_display_name_with_parameters() {
        let parameters = Parameters::parse("(size)", "(128)");
        let info = TestInfo {
            fixture_name: "Vector",
            test_name: "Reserve",
            parameters: &parameters,
            runs: 1,
            iterations: 1,
        };
        assert_eq!(info.display_name(), "Vector.Reserve(size = 128)");
    }
}
