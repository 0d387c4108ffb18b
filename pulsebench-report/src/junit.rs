//! JUnit XML Sink
//!
//! Very restrictive JUnit-compatible output: one `<testsuite>` per fixture
//! in first-seen order, one `<testcase>` per test with the total run time
//! in seconds, disabled tests as `<skipped/>`. Enough for CI systems that
//! only understand the JUnit schema.

use crate::sink::log_write_error;
use pulsebench_core::{Outputter, TestInfo};
use pulsebench_stats::TestResult;
use std::io::Write;

struct TestCase {
    name: String,
    time_seconds: Option<f64>,
}

struct TestSuite {
    fixture: String,
    cases: Vec<TestCase>,
}

/// Sink accumulating the run into a JUnit XML document.
pub struct JunitOutputter {
    writer: Box<dyn Write>,
    suites: Vec<TestSuite>,
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

impl JunitOutputter {
    /// Render into an arbitrary writer.
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self {
            writer,
            suites: Vec::new(),
        }
    }

    /// Render to standard output.
    pub fn stdout() -> Self {
        Self::new(Box::new(std::io::stdout()))
    }

    fn record(&mut self, info: &TestInfo<'_>, time_seconds: Option<f64>) {
        let case = TestCase {
            name: format!("{}{}", info.test_name, info.parameters),
            time_seconds,
        };

        match self
            .suites
            .iter_mut()
            .find(|suite| suite.fixture == info.fixture_name)
        {
            Some(suite) => suite.cases.push(case),
            None => self.suites.push(TestSuite {
                fixture: info.fixture_name.to_string(),
                cases: vec![case],
            }),
        }
    }
}

impl Outputter for JunitOutputter {
    fn begin(&mut self, _enabled: usize, _disabled: usize) {}

    fn end(&mut self, _enabled: usize, _disabled: usize) {
        let mut document = String::new();
        document.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        document.push_str("<testsuites>\n");

        for suite in &self.suites {
            document.push_str(&format!(
                "  <testsuite name=\"{}\" tests=\"{}\">\n",
                escape_xml(&suite.fixture),
                suite.cases.len()
            ));
            for case in &suite.cases {
                match case.time_seconds {
                    Some(time) => document.push_str(&format!(
                        "    <testcase name=\"{}\" time=\"{:.9}\"/>\n",
                        escape_xml(&case.name),
                        time
                    )),
                    None => document.push_str(&format!(
                        "    <testcase name=\"{}\"><skipped/></testcase>\n",
                        escape_xml(&case.name)
                    )),
                }
            }
            document.push_str("  </testsuite>\n");
        }

        document.push_str("</testsuites>\n");

        if let Err(error) = self
            .writer
            .write_all(document.as_bytes())
            .and_then(|()| self.writer.flush())
        {
            log_write_error("junit", &error);
        }
    }

    fn begin_test(&mut self, _info: &TestInfo<'_>) {}

    fn skip_disabled_test(&mut self, info: &TestInfo<'_>) {
        self.record(info, None);
    }

    fn end_test(&mut self, info: &TestInfo<'_>, result: &TestResult) {
        self.record(info, Some(result.time_total() / 1_000_000_000.0));
    }
}
