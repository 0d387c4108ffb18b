#![warn(missing_docs)]
//! # Pulsebench
//!
//! Micro-benchmarking harness for nanosecond/microsecond-scale code units:
//! - **Overhead calibration**: a fixed-intercept regression over empty-body
//!   runs estimates the harness cost, which is subtracted from every
//!   measurement (clamped at zero)
//! - **Statistically useful output**: mean, sample stddev, min/max, median
//!   and quartiles, per run and per iteration, plus throughput figures
//! - **Explicit registration**: benchmarks register into a `Registry`
//!   value you construct; no global magic, deterministic discovery order
//! - **Selection controls**: glob name filters with negation, substring
//!   includes, shuffling, list-only mode
//! - **Pluggable sinks**: console text, JSON and JUnit XML outputters, or
//!   any `Outputter` implementation of your own
//!
//! ## Quick Start
//!
//! ```no_run
//! use pulsebench::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut registry = Registry::new();
//!
//!     registry.register(
//!         Benchmark::new("String", "Format")
//!             .runs(10)
//!             .iterations(100)
//!             .body(|| {
//!                 std::hint::black_box(format!("{}-{}", 42, "suffix"));
//!             }),
//!     );
//!
//!     pulsebench::run(registry)
//! }
//! ```
//!
//! ## Fixtures
//!
//! Bodies with set-up and tear-down implement [`BenchmarkBody`] and
//! register through [`Benchmark::body_factory`]; the set-up and tear-down
//! run outside the timed window, once per run.

// Re-export core types
pub use pulsebench_core::{
    Benchmark, BenchmarkBody, BenchmarkDef, BodyFactory, CalibrationModel, Clock, ClosureBody,
    LogOutputter, Outputter, Parameter, Parameters, Registry, TestInfo, TimePoint, Timer,
    matches_filter, pin_to_cpu,
};

// Re-export stats
pub use pulsebench_stats::{Quartiles, TestResult, compute_quartiles};

// Re-export sinks
pub use pulsebench_report::{
    ConsoleOutputter, JsonOutputter, JunitOutputter, OutputFormat, OutputSpec, SinkError,
    create_sink,
};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Benchmark, BenchmarkBody, Outputter, Registry, TestResult};
}

/// Run the pulsebench CLI harness against a populated registry.
///
/// Call this from your benchmark binary's `main()`:
/// ```ignore
/// fn main() -> anyhow::Result<()> {
///     pulsebench::run(registry)
/// }
/// ```
pub use pulsebench_cli::run;

/// Re-export of the CLI argument surface for binaries that need to
/// pre-process arguments before handing over.
pub use pulsebench_cli::{Cli, PulseConfig, run_with_cli};
