//! Sink Construction
//!
//! Parses `format[:path]` output specifiers and opens the corresponding
//! sink. Failures come back as an explicit [`SinkError`] so the caller can
//! report the sink and proceed with the rest; nothing here aborts a run.

use crate::{ConsoleOutputter, JsonOutputter, JunitOutputter, OutputFormat};
use pulsebench_core::Outputter;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Why a sink could not be constructed.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The output file could not be opened for writing.
    #[error("failed to open {path} for writing: {source}")]
    Open {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The format part of the specifier is not a known format.
    #[error("{0}")]
    UnknownFormat(String),
}

/// Parsed `format[:path]` output specifier. Without a path the sink writes
/// to standard output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSpec {
    /// Selected format.
    pub format: OutputFormat,
    /// Output file, or `None` for stdout.
    pub path: Option<PathBuf>,
}

impl std::str::FromStr for OutputSpec {
    type Err = SinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (format, path) = match s.split_once(':') {
            Some((format, path)) if !path.is_empty() => (format, Some(PathBuf::from(path))),
            Some((format, _)) => (format, None),
            None => (s, None),
        };

        let format = format.parse().map_err(SinkError::UnknownFormat)?;
        Ok(Self { format, path })
    }
}

/// Construct the sink an output specifier describes.
pub fn create_sink(spec: &OutputSpec) -> Result<Box<dyn Outputter>, SinkError> {
    match &spec.path {
        Some(path) => {
            let writer = open_file(path)?;
            Ok(match spec.format {
                OutputFormat::Console => Box::new(ConsoleOutputter::new(writer)),
                OutputFormat::Json => Box::new(JsonOutputter::new(writer)),
                OutputFormat::Junit => Box::new(JunitOutputter::new(writer)),
            })
        }
        None => Ok(match spec.format {
            OutputFormat::Console => Box::new(ConsoleOutputter::stdout()),
            OutputFormat::Json => Box::new(JsonOutputter::stdout()),
            OutputFormat::Junit => Box::new(JunitOutputter::stdout()),
        }),
    }
}

fn open_file(path: &Path) -> Result<Box<dyn std::io::Write>, SinkError> {
    let file = File::create(path).map_err(|source| SinkError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Box::new(BufWriter::new(file)))
}

/// Report a failed sink write; sinks are infallible by contract, so write
/// failures degrade to a warning instead of aborting the run.
pub(crate) fn log_write_error(sink: &'static str, error: &std::io::Error) {
    tracing::warn!(sink, %error, "sink write failed");
}
