//! Example benchmark binary.
//!
//! Run with `cargo run --release --example benchmarks`, then try the
//! selection controls:
//!
//! ```text
//! cargo run --release --example benchmarks -- --list
//! cargo run --release --example benchmarks -- -f 'Vector.*-Vector.Sort'
//! cargo run --release --example benchmarks -- -o json:results.json
//! ```

use pulsebench::prelude::*;

/// Fixture with per-run set-up: sorting benchmarks get a freshly shuffled
/// input every run, built outside the timed window.
struct SortBody {
    data: Vec<u64>,
}

impl SortBody {
    fn new() -> Self {
        Self { data: Vec::new() }
    }
}

impl BenchmarkBody for SortBody {
    fn set_up(&mut self) {
        // Deterministic pseudo-shuffled input, rebuilt per run.
        self.data = (0..1_000u64).map(|i| i.wrapping_mul(2654435761) % 1_000).collect();
    }

    fn iterate(&mut self) {
        let mut scratch = self.data.clone();
        scratch.sort_unstable();
        std::hint::black_box(&scratch);
    }

    fn tear_down(&mut self) {
        self.data.clear();
    }
}

fn main() -> anyhow::Result<()> {
    let mut registry = Registry::new();

    registry.register(
        Benchmark::new("Vector", "PushBack")
            .runs(10)
            .iterations(10_000)
            .body(|| {
                let mut v = Vec::new();
                for i in 0..16u64 {
                    v.push(i);
                }
                std::hint::black_box(&v);
            }),
    );

    registry.register(
        Benchmark::new("Vector", "Sort")
            .runs(5)
            .iterations(100)
            .body_factory(|| Box::new(SortBody::new())),
    );

    registry.register(
        Benchmark::new("String", "Format")
            .runs(10)
            .iterations(1_000)
            .parameters("(width)", "(8)")
            .body(|| {
                std::hint::black_box(format!("{:>8}", 42));
            }),
    );

    // Kept around for comparison but skipped unless explicitly included.
    registry.register(
        Benchmark::new("String", "DISABLED_FormatHuge")
            .runs(2)
            .iterations(100)
            .body(|| {
                std::hint::black_box("x".repeat(1 << 20));
            }),
    );

    pulsebench::run(registry)
}
