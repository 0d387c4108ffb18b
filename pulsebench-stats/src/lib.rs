#![warn(missing_docs)]
//! Pulsebench Statistical Engine
//!
//! Turns the raw per-run durations collected by the execution engine into
//! the figures the output sinks report:
//! - total, mean, sample standard deviation, min, max
//! - median and 1st/3rd quartile via integer-half indexing
//! - throughput (runs/s, iterations/s) with the min/max inversion
//! - per-iteration variants of every per-run figure
//!
//! Everything here is a pure function of the input sequence, so the whole
//! crate is unit-testable without ever touching a clock.

mod quartiles;
mod result;

pub use quartiles::{Quartiles, compute_quartiles};
pub use result::TestResult;

/// Nanoseconds per second, the base for all throughput figures.
pub const NANOS_PER_SECOND: f64 = 1_000_000_000.0;
