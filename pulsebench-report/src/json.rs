//! JSON Sink
//!
//! Collects every event during the run and writes one machine-readable
//! document at `end`: run metadata (schema and harness versions, UTC
//! timestamp, clock implementation, enabled/disabled counts) followed by a
//! record per test with the raw net run times and the derived statistics.

use crate::sink::log_write_error;
use chrono::{DateTime, Utc};
use pulsebench_core::{Clock, Outputter, Parameter, TestInfo};
use pulsebench_stats::TestResult;
use serde::Serialize;
use std::io::Write;

/// Document schema version, bumped on breaking shape changes.
const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    schema_version: u32,
    harness_version: &'static str,
    timestamp: DateTime<Utc>,
    clock: &'static str,
    enabled: usize,
    disabled: usize,
    tests: &'a [JsonTestRecord],
}

#[derive(Debug, Serialize)]
struct JsonTestRecord {
    fixture: String,
    test: String,
    parameters: Vec<Parameter>,
    runs: u64,
    iterations: u64,
    disabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<JsonResultRecord>,
}

#[derive(Debug, Serialize)]
struct JsonResultRecord {
    run_times_ns: Vec<u64>,
    total_ns: f64,
    average_ns: f64,
    std_dev_ns: f64,
    minimum_ns: f64,
    maximum_ns: f64,
    median_ns: f64,
    quartile1_ns: f64,
    quartile3_ns: f64,
    runs_per_second_average: f64,
    iteration_average_ns: f64,
    iterations_per_second_average: f64,
}

impl JsonTestRecord {
    fn new(info: &TestInfo<'_>, disabled: bool) -> Self {
        Self {
            fixture: info.fixture_name.to_string(),
            test: info.test_name.to_string(),
            parameters: info.parameters.parameters().to_vec(),
            runs: info.runs,
            iterations: info.iterations,
            disabled,
            result: None,
        }
    }
}

impl From<&TestResult> for JsonResultRecord {
    fn from(result: &TestResult) -> Self {
        Self {
            run_times_ns: result.run_times().to_vec(),
            total_ns: result.time_total(),
            average_ns: result.run_time_average(),
            std_dev_ns: result.run_time_std_dev(),
            minimum_ns: result.run_time_minimum(),
            maximum_ns: result.run_time_maximum(),
            median_ns: result.run_time_median(),
            quartile1_ns: result.run_time_quartile1(),
            quartile3_ns: result.run_time_quartile3(),
            runs_per_second_average: result.runs_per_second_average(),
            iteration_average_ns: result.iteration_time_average(),
            iterations_per_second_average: result.iterations_per_second_average(),
        }
    }
}

/// Sink accumulating the run into a single JSON document.
pub struct JsonOutputter {
    writer: Box<dyn Write>,
    tests: Vec<JsonTestRecord>,
}

impl JsonOutputter {
    /// Render into an arbitrary writer.
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self {
            writer,
            tests: Vec::new(),
        }
    }

    /// Render to standard output.
    pub fn stdout() -> Self {
        Self::new(Box::new(std::io::stdout()))
    }
}

impl Outputter for JsonOutputter {
    fn begin(&mut self, _enabled: usize, _disabled: usize) {}

    fn end(&mut self, enabled: usize, disabled: usize) {
        let report = JsonReport {
            schema_version: SCHEMA_VERSION,
            harness_version: env!("CARGO_PKG_VERSION"),
            timestamp: Utc::now(),
            clock: Clock::description(),
            enabled,
            disabled,
            tests: &self.tests,
        };

        match serde_json::to_string_pretty(&report) {
            Ok(document) => {
                if let Err(error) = self
                    .writer
                    .write_all(document.as_bytes())
                    .and_then(|()| self.writer.write_all(b"\n"))
                    .and_then(|()| self.writer.flush())
                {
                    log_write_error("json", &error);
                }
            }
            Err(error) => {
                tracing::warn!(sink = "json", %error, "failed to serialize report");
            }
        }
    }

    fn begin_test(&mut self, _info: &TestInfo<'_>) {}

    fn skip_disabled_test(&mut self, info: &TestInfo<'_>) {
        self.tests.push(JsonTestRecord::new(info, true));
    }

    fn end_test(&mut self, info: &TestInfo<'_>, result: &TestResult) {
        let mut record = JsonTestRecord::new(info, false);
        record.result = Some(JsonResultRecord::from(result));
        self.tests.push(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulsebench_core::Parameters;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_document_shape() {
        let buffer = SharedBuffer::default();
        let mut outputter = JsonOutputter::new(Box::new(buffer.clone()));

        let parameters = Parameters::parse("(size)", "(64)");
        let info = TestInfo {
            fixture_name: "Vector",
            test_name: "Reserve",
            parameters: &parameters,
            runs: 3,
            iterations: 10,
        };
        let skipped = Parameters::empty();
        let skipped_info = TestInfo {
            fixture_name: "Vector",
            test_name: "Slow",
            parameters: &skipped,
            runs: 1,
            iterations: 1,
        };

        outputter.begin(1, 1);
        outputter.begin_test(&info);
        outputter.end_test(&info, &TestResult::new(vec![100, 200, 300], 10));
        outputter.skip_disabled_test(&skipped_info);
        outputter.end(1, 1);

        let bytes = buffer.0.lock().unwrap().clone();
        let document: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(document["schema_version"], 1);
        assert_eq!(document["enabled"], 1);
        assert_eq!(document["disabled"], 1);
        assert_eq!(document["clock"], "std::time::Instant");

        let tests = document["tests"].as_array().unwrap();
        assert_eq!(tests.len(), 2);

        let executed = &tests[0];
        assert_eq!(executed["fixture"], "Vector");
        assert_eq!(executed["test"], "Reserve");
        assert_eq!(executed["parameters"][0]["declaration"], "size");
        assert_eq!(executed["parameters"][0]["value"], "64");
        assert_eq!(executed["result"]["average_ns"], 200.0);
        assert_eq!(
            executed["result"]["run_times_ns"].as_array().unwrap().len(),
            3
        );

        let skipped = &tests[1];
        assert_eq!(skipped["disabled"], true);
        assert!(skipped.get("result").is_none());
    }
}
