#![warn(missing_docs)]
//! Pulsebench CLI Library
//!
//! This module provides the CLI infrastructure for benchmark binaries.
//! Build a [`Registry`], register your benchmarks, and hand it to
//! [`run`] from your main function:
//!
//! ```no_run
//! use pulsebench_core::{Benchmark, Registry};
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut registry = Registry::new();
//!     registry.register(
//!         Benchmark::new("Vector", "PushBack")
//!             .runs(10)
//!             .iterations(1_000)
//!             .body(|| {
//!                 let mut v = Vec::with_capacity(16);
//!                 v.push(1u64);
//!                 std::hint::black_box(&v);
//!             }),
//!     );
//!     pulsebench_cli::run(registry)
//! }
//! ```

mod config;

pub use config::*;

use clap::Parser;
use pulsebench_core::{Registry, pin_to_cpu};
use pulsebench_report::{OutputSpec, create_sink};
use tracing::warn;

/// Pulsebench CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "pulsebench")]
#[command(author, version, about = "Pulsebench - micro-benchmark harness")]
pub struct Cli {
    /// List the names of all benchmarks instead of running them
    #[arg(short, long)]
    pub list: bool,

    /// Run only benchmarks whose name matches one of the positive patterns
    /// but none of the negative patterns. '?' matches any single character;
    /// '*' matches any substring; ':' separates two patterns; '-' starts
    /// the negative patterns.
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Randomize benchmark execution order
    #[arg(short, long)]
    pub shuffle: bool,

    /// Only run benchmarks whose fixture.test name contains this substring;
    /// can be specified multiple times
    #[arg(short, long)]
    pub include: Vec<String>,

    /// Output sink as format[:path] where format is console, json or
    /// junit. Can be specified multiple times for output in different
    /// formats. Without a path the sink writes to stdout, and only the
    /// last pathless sink is kept.
    #[arg(short, long)]
    pub output: Vec<String>,

    /// Pin the process to a CPU core before running
    #[arg(long)]
    pub pin_cpu: Option<usize>,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Run the pulsebench CLI against a populated registry.
///
/// This is the main entry point for benchmark binaries.
pub fn run(registry: Registry) -> anyhow::Result<()> {
    run_with_cli(registry, Cli::parse())
}

/// Run the pulsebench CLI with pre-parsed arguments.
pub fn run_with_cli(mut registry: Registry, cli: Cli) -> anyhow::Result<()> {
    // Initialize logging; a second initialization in the same process is a
    // no-op rather than an error.
    let filter = if cli.verbose {
        "pulsebench=debug"
    } else {
        "pulsebench=info"
    };
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    // Discover pulse.toml configuration (CLI flags override).
    let config = PulseConfig::discover().unwrap_or_default();

    if let Some(cpu) = cli.pin_cpu.or(config.run.pin_cpu) {
        if let Err(error) = pin_to_cpu(cpu) {
            warn!(cpu, %error, "failed to pin CPU, continuing unpinned");
        }
    }

    if let Some(ref expression) = cli.filter {
        registry.apply_pattern_filter(expression);
    }
    for substring in &cli.include {
        registry.add_include(substring.clone());
    }

    if cli.list {
        for name in registry.canonical_names() {
            println!("{name}");
        }
        return Ok(());
    }

    if cli.shuffle || config.run.shuffle {
        registry.shuffle();
    }

    attach_sinks(&mut registry, &cli, &config)?;

    registry.run_all();

    Ok(())
}

/// Assemble output sinks from `-o` specifiers, falling back to the
/// configured stdout format.
///
/// A malformed specifier is a usage failure and aborts before the run; a
/// sink that fails to OPEN is reported and skipped so the remaining sinks
/// still receive the run. With no sink left, the registry's built-in log
/// sink takes over.
fn attach_sinks(registry: &mut Registry, cli: &Cli, config: &PulseConfig) -> anyhow::Result<()> {
    let mut specs: Vec<OutputSpec> = Vec::new();

    if cli.output.is_empty() {
        let format = config.output.format.parse().map_err(|error| {
            anyhow::anyhow!("invalid output format in pulse.toml: {}", error)
        })?;
        specs.push(OutputSpec { format, path: None });
    } else {
        for raw in &cli.output {
            specs.push(raw.parse::<OutputSpec>()?);
        }
    }

    // Only the last pathless specifier keeps stdout; file sinks accumulate.
    let mut stdout_spec: Option<OutputSpec> = None;
    let mut file_specs: Vec<OutputSpec> = Vec::new();
    for spec in specs {
        if spec.path.is_none() {
            stdout_spec = Some(spec);
        } else {
            file_specs.push(spec);
        }
    }

    let mut attached = 0usize;
    for spec in stdout_spec.into_iter().chain(file_specs) {
        match create_sink(&spec) {
            Ok(sink) => {
                registry.add_outputter(sink);
                attached += 1;
            }
            Err(error) => warn!(%error, "skipping output sink"),
        }
    }

    if attached == 0 {
        warn!("no output sinks available, falling back to log output");
    }

    Ok(())
}
