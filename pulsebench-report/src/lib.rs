#![warn(missing_docs)]
//! Pulsebench Report - Output Sinks
//!
//! Implements the `Outputter` event-stream interface for the formats the
//! harness ships:
//! - Console text (bracketed event lines plus statistics blocks)
//! - JSON (machine-readable document with run metadata)
//! - JUnit-compatible XML (restrictive, for CI ingestion)
//!
//! Sinks write to stdout or to a file; construction goes through
//! [`create_sink`], which reports failures as an explicit [`SinkError`]
//! instead of aborting, so the caller can drop one sink and proceed with
//! the rest.

mod console;
mod json;
mod junit;
mod sink;

pub use console::ConsoleOutputter;
pub use json::JsonOutputter;
pub use junit::JunitOutputter;
pub use sink::{OutputSpec, SinkError, create_sink};

/// Output format selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Standard console output.
    Console,
    /// JSON document.
    Json,
    /// JUnit-compatible XML (very restrictive).
    Junit,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "console" | "text" => Ok(OutputFormat::Console),
            "json" => Ok(OutputFormat::Json),
            "junit" => Ok(OutputFormat::Junit),
            other => Err(format!("unknown output format: {}", other)),
        }
    }
}
