//! Benchmark Registry
//!
//! Holds every registered definition and drives execution. The lifecycle
//! has three strictly ordered phases:
//!
//! 1. **Registration** — definitions accumulate in discovery order.
//! 2. **Selection** — an optional pattern filter removes definitions by
//!    canonical name; an optional shuffle randomizes the remaining order.
//! 3. **Run** — `run_all` measures the calibration model once, then walks
//!    the selected definitions, executing each enabled test and pushing the
//!    event stream into every attached sink.
//!
//! The registry is an explicit value: construct one, register into it, hand
//! it to the run entry point. Nothing here is global.

use crate::body::run_timed;
use crate::calibration::CalibrationModel;
use crate::definition::BenchmarkDef;
use crate::outputter::{LogOutputter, Outputter, TestInfo};
use crate::pattern::matches_filter;
use pulsebench_stats::TestResult;
use rand::seq::SliceRandom;
use rand::thread_rng;
use std::collections::BTreeSet;
use tracing::debug;

/// Registry of benchmark definitions and attached output sinks.
#[derive(Default)]
pub struct Registry {
    tests: Vec<BenchmarkDef>,
    outputters: Vec<Box<dyn Outputter>>,
    include: Vec<String>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition. Discovery order is preserved.
    pub fn register(&mut self, definition: BenchmarkDef) {
        self.tests.push(definition);
    }

    /// Attach an output sink for the next run.
    pub fn add_outputter(&mut self, outputter: Box<dyn Outputter>) {
        self.outputters.push(outputter);
    }

    /// Add a secondary inclusion filter: at run time a test executes only
    /// if no inclusion filters are set or its `fixture.test` name contains
    /// at least one of them. Non-matching tests are skipped without any
    /// sink output.
    pub fn add_include(&mut self, substring: impl Into<String>) {
        self.include.push(substring.into());
    }

    /// Number of registered definitions currently held.
    pub fn len(&self) -> usize {
        self.tests.len()
    }

    /// Whether no definitions are registered.
    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    /// Remove definitions whose canonical name fails the filter
    /// expression (see [`crate::pattern::matches_filter`] for the syntax).
    pub fn apply_pattern_filter(&mut self, expression: &str) {
        self.tests
            .retain(|test| matches_filter(expression, test.canonical_name()));
        debug!(
            filter = expression,
            remaining = self.tests.len(),
            "applied pattern filter"
        );
    }

    /// Randomize execution order of the registered definitions.
    pub fn shuffle(&mut self) {
        self.tests.shuffle(&mut thread_rng());
    }

    /// Unique canonical names, sorted; the list-only mode output.
    pub fn canonical_names(&self) -> Vec<String> {
        let unique: BTreeSet<&str> = self
            .tests
            .iter()
            .map(|test| test.canonical_name())
            .collect();
        unique.into_iter().map(String::from).collect()
    }

    /// Measure a fresh calibration model and run every selected test.
    ///
    /// A benchmark body that panics is not caught: partial timing data is
    /// meaningless, so the panic propagates and terminates the run.
    pub fn run_all(&mut self) {
        let model = CalibrationModel::measure();
        self.run_all_with_model(model);
    }

    /// Run every selected test against an already-measured calibration
    /// model. `run_all` is the normal entry point; this seam exists so the
    /// event stream can be exercised without paying for live calibration.
    pub fn run_all_with_model(&mut self, model: CalibrationModel) {
        let Self {
            tests,
            outputters,
            include,
        } = self;

        // Fall back to the structured-log sink so results are never
        // silently dropped.
        let mut fallback: Vec<Box<dyn Outputter>> = Vec::new();
        if outputters.is_empty() {
            fallback.push(Box::new(LogOutputter));
        }
        let sinks: &mut Vec<Box<dyn Outputter>> = if outputters.is_empty() {
            &mut fallback
        } else {
            outputters
        };

        // Counts reflect declared disabled state over the post-filter list
        // and stay fixed even if inclusion filters skip more tests below.
        let disabled_count = tests.iter().filter(|test| test.is_disabled()).count();
        let enabled_count = tests.len() - disabled_count;

        for sink in sinks.iter_mut() {
            sink.begin(enabled_count, disabled_count);
        }

        for test in tests.iter() {
            if !include.is_empty()
                && !include
                    .iter()
                    .any(|substring| test.canonical_name().contains(substring.as_str()))
            {
                continue;
            }

            let info = TestInfo {
                fixture_name: test.fixture_name(),
                test_name: test.test_name(),
                parameters: test.parameters(),
                runs: test.runs(),
                iterations: test.iterations(),
            };

            if test.is_disabled() {
                for sink in sinks.iter_mut() {
                    sink.skip_disabled_test(&info);
                }
                continue;
            }

            for sink in sinks.iter_mut() {
                sink.begin_test(&info);
            }

            let overhead = model.overhead(test.iterations());
            let mut run_times = Vec::with_capacity(test.runs() as usize);

            for _ in 0..test.runs() {
                let mut body = test.create_body();
                let raw = run_timed(body.as_mut(), test.iterations());
                run_times.push(raw.saturating_sub(overhead));
                drop(body);
            }

            let result = TestResult::new(run_times, test.iterations());

            for sink in sinks.iter_mut() {
                sink.end_test(&info, &result);
            }
        }

        for sink in sinks.iter_mut() {
            sink.end(enabled_count, disabled_count);
        }
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("tests", &self.tests)
            .field("outputters", &self.outputters.len())
            .field("include", &self.include)
            .finish()
    }
}
