//! Benchmark Definitions
//!
//! A definition is created once at registration time and is immutable
//! thereafter: fixture and test names, the run and iteration counts, the
//! display parameters and the factory producing a fresh body per run.
//! Definitions are registered explicitly through [`crate::Registry`];
//! there is no self-registering global state.

use crate::body::{BenchmarkBody, BodyFactory, ClosureBody};
use crate::params::Parameters;

/// Reserved test-name prefix that registers a benchmark as disabled.
pub const DISABLED_PREFIX: &str = "DISABLED_";

/// One registered benchmark.
pub struct BenchmarkDef {
    fixture_name: String,
    test_name: String,
    canonical_name: String,
    runs: u64,
    iterations: u64,
    is_disabled: bool,
    parameters: Parameters,
    factory: BodyFactory,
}

impl BenchmarkDef {
    /// Create a definition.
    ///
    /// A `test_name` starting with `DISABLED_` registers the benchmark as
    /// disabled with the prefix stripped from the stored name. `runs` is
    /// clamped to at least 1; `iterations` may be 0 (the run still times an
    /// empty window, which is what calibration measures).
    pub fn new(
        fixture_name: impl Into<String>,
        test_name: impl Into<String>,
        runs: u64,
        iterations: u64,
        factory: BodyFactory,
        parameters: Parameters,
    ) -> Self {
        let fixture_name = fixture_name.into();
        let mut test_name = test_name.into();

        let is_disabled = test_name.starts_with(DISABLED_PREFIX);
        if is_disabled {
            test_name.drain(..DISABLED_PREFIX.len());
        }

        let canonical_name = format!("{fixture_name}.{test_name}");

        Self {
            fixture_name,
            test_name,
            canonical_name,
            runs: runs.max(1),
            iterations,
            is_disabled,
            parameters,
            factory,
        }
    }

    /// Fixture name.
    pub fn fixture_name(&self) -> &str {
        &self.fixture_name
    }

    /// Test name, with any disabling prefix stripped.
    pub fn test_name(&self) -> &str {
        &self.test_name
    }

    /// `fixture.test`, the unit of identity for filtering and listing.
    pub fn canonical_name(&self) -> &str {
        &self.canonical_name
    }

    /// Independent measured executions per test.
    pub fn runs(&self) -> u64 {
        self.runs
    }

    /// Body repetitions per run.
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    /// Whether the test is skipped at run time.
    pub fn is_disabled(&self) -> bool {
        self.is_disabled
    }

    /// Display parameters.
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Construct a fresh body instance for one run.
    pub fn create_body(&self) -> Box<dyn BenchmarkBody> {
        (self.factory)()
    }
}

impl std::fmt::Debug for BenchmarkDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BenchmarkDef")
            .field("canonical_name", &self.canonical_name)
            .field("runs", &self.runs)
            .field("iterations", &self.iterations)
            .field("is_disabled", &self.is_disabled)
            .finish_non_exhaustive()
    }
}

/// Builder for benchmark definitions; the registration surface.
///
/// ```
/// use pulsebench_core::Benchmark;
///
/// let def = Benchmark::new("Vector", "PushBack")
///     .runs(10)
///     .iterations(1_000)
///     .body(|| {
///         let mut v = Vec::new();
///         v.push(1u64);
///         std::hint::black_box(&v);
///     });
/// assert_eq!(def.canonical_name(), "Vector.PushBack");
/// ```
pub struct Benchmark {
    fixture_name: String,
    test_name: String,
    runs: u64,
    iterations: u64,
    parameters: Parameters,
}

impl Benchmark {
    /// Start a definition for `fixture.test` with 1 run of 1 iteration.
    pub fn new(fixture_name: impl Into<String>, test_name: impl Into<String>) -> Self {
        Self {
            fixture_name: fixture_name.into(),
            test_name: test_name.into(),
            runs: 1,
            iterations: 1,
            parameters: Parameters::empty(),
        }
    }

    /// Number of independent measured executions.
    pub fn runs(mut self, runs: u64) -> Self {
        self.runs = runs;
        self
    }

    /// Body repetitions per run.
    pub fn iterations(mut self, iterations: u64) -> Self {
        self.iterations = iterations;
        self
    }

    /// Attach display parameters from raw declaration and value lists,
    /// e.g. `.parameters("(size, count)", "(128, 4)")`.
    pub fn parameters(mut self, declarations: &str, values: &str) -> Self {
        self.parameters = Parameters::parse(declarations, values);
        self
    }

    /// Finish with a closure body. The closure is cloned for every run, so
    /// each run starts from a fresh copy of its captured state.
    pub fn body<F>(self, f: F) -> BenchmarkDef
    where
        F: FnMut() + Clone + 'static,
    {
        self.body_factory(move || Box::new(ClosureBody::new(f.clone())))
    }

    /// Finish with an explicit body factory, for fixtures with set-up and
    /// tear-down or shared state.
    pub fn body_factory<F>(self, factory: F) -> BenchmarkDef
    where
        F: Fn() -> Box<dyn BenchmarkBody> + 'static,
    {
        BenchmarkDef::new(
            self.fixture_name,
            self.test_name,
            self.runs,
            self.iterations,
            Box::new(factory),
            self.parameters,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_prefix_is_stripped() {
        let def = Benchmark::new("X", "DISABLED_Slow").body(|| {});
        assert!(def.is_disabled());
        assert_eq!(def.test_name(), "Slow");
        assert_eq!(def.canonical_name(), "X.Slow");
    }

    #[test]
    fn test_enabled_by_default() {
        let def = Benchmark::new("X", "Fast").body(|| {});
        assert!(!def.is_disabled());
        assert_eq!(def.canonical_name(), "X.Fast");
    }

    #[test]
    fn test_runs_clamped_to_one() {
        let def = Benchmark::new("X", "Fast").runs(0).body(|| {});
        assert_eq!(def.runs(), 1);
    }

    #[test]
    fn test_zero_iterations_allowed() {
        let def = Benchmark::new("X", "Empty").iterations(0).body(|| {});
        assert_eq!(def.iterations(), 0);
    }

    #[test]
    fn test_factory_produces_fresh_bodies() {
        use crate::body::run_timed;
        use std::cell::Cell;
        use std::rc::Rc;

        let total = Rc::new(Cell::new(0u64));
        let captured = total.clone();
        let def = Benchmark::new("X", "Count")
            .iterations(3)
            .body(move || captured.set(captured.get() + 1));

        let mut first = def.create_body();
        run_timed(first.as_mut(), def.iterations());
        let mut second = def.create_body();
        run_timed(second.as_mut(), def.iterations());

        // Shared only through the explicit Rc capture.
        assert_eq!(total.get(), 6);
    }
}
