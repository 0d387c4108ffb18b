#![warn(missing_docs)]
//! Pulsebench Core - Execution Engine
//!
//! This crate provides the benchmark registry and everything it drives:
//! - Monotonic timing (`Clock`, `Timer`) with optional CPU pinning
//! - Glob-style name filtering with negation
//! - Benchmark definitions, bodies and the explicit registration builder
//! - Overhead calibration via fixed-intercept linear regression
//! - The `Outputter` event-stream interface sinks implement

mod body;
mod calibration;
mod clock;
mod definition;
mod outputter;
mod params;
mod pattern;
mod registry;

pub use body::{BenchmarkBody, BodyFactory, ClosureBody, EmptyBody, run_timed};
pub use calibration::CalibrationModel;
pub use clock::{Clock, TimePoint, Timer, pin_to_cpu};
pub use definition::{Benchmark, BenchmarkDef, DISABLED_PREFIX};
pub use outputter::{LogOutputter, Outputter, TestInfo};
pub use params::{Parameter, Parameters};
pub use pattern::matches_filter;
pub use registry::Registry;
