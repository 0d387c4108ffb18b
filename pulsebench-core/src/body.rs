//! Benchmark Bodies
//!
//! A body is the unit of work being measured. Each run gets a freshly
//! constructed instance from the definition's factory, so state cannot leak
//! between runs unless the body explicitly shares it (e.g. through an `Rc`
//! capture). Set-up and tear-down execute outside the timed window; only
//! the iteration loop is inside.

use crate::clock::Timer;
use std::hint::black_box;

/// Executable benchmark body.
///
/// `iterate` is called `iterations` times per run inside the timed window.
pub trait BenchmarkBody {
    /// Prepare per-run state. Runs before the clock starts.
    fn set_up(&mut self) {}

    /// One iteration of the measured work.
    fn iterate(&mut self);

    /// Release per-run state. Runs after the clock stops.
    fn tear_down(&mut self) {}
}

/// Constructs a fresh body instance for every run.
pub type BodyFactory = Box<dyn Fn() -> Box<dyn BenchmarkBody>>;

/// Body wrapping a plain closure; the common case for benchmarks without a
/// fixture.
pub struct ClosureBody<F: FnMut()> {
    f: F,
}

impl<F: FnMut()> ClosureBody<F> {
    /// Wrap a closure as a benchmark body.
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F: FnMut()> BenchmarkBody for ClosureBody<F> {
    fn iterate(&mut self) {
        (self.f)();
    }
}

/// Body that does nothing; drives the overhead calibration runs.
#[derive(Default)]
pub struct EmptyBody;

impl BenchmarkBody for EmptyBody {
    fn iterate(&mut self) {}
}

/// Execute one measured run: set up, time `iterations` calls of the body,
/// tear down. Returns the raw duration of the timed window in nanoseconds.
///
/// The body reference passes through `black_box` so the iteration loop
/// cannot be devirtualized and folded away for trivial bodies; the loop
/// dispatch cost it keeps is exactly what the calibration model subtracts.
pub fn run_timed(body: &mut dyn BenchmarkBody, iterations: u64) -> u64 {
    body.set_up();

    let body = black_box(body);
    let timer = Timer::start();
    for _ in 0..iterations {
        body.iterate();
    }
    let elapsed = timer.stop();

    body.tear_down();
    elapsed
}
