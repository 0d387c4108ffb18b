//! Console Text Sink
//!
//! Bracketed event lines followed by per-run and per-iteration statistics
//! blocks. Time figures print in microseconds with the deviation from the
//! average alongside; throughput figures print in runs/s and iterations/s.

use crate::sink::log_write_error;
use pulsebench_core::{Outputter, TestInfo};
use pulsebench_stats::TestResult;
use std::io::Write;

const LABEL_WIDTH: usize = 33;

/// Sink rendering the event stream as human-readable text.
pub struct ConsoleOutputter {
    writer: Box<dyn Write>,
}

impl ConsoleOutputter {
    /// Render into an arbitrary writer.
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }

    /// Render to standard output.
    pub fn stdout() -> Self {
        Self::new(Box::new(std::io::stdout()))
    }

    fn write_line(&mut self, line: &str) {
        if let Err(error) = writeln!(self.writer, "{}", line) {
            log_write_error("console", &error);
        }
    }

    fn write_padded(&mut self, label: &str, content: &str) {
        self.write_line(&format!("{:>LABEL_WIDTH$}{}", label, content));
    }
}

fn benchmark_noun(count: usize) -> &'static str {
    if count == 1 { "benchmark" } else { "benchmarks" }
}

/// `value (+diff unit / +pct %)` relative to the average.
fn with_deviation(value: f64, average: f64, unit: &str) -> String {
    let diff = value - average;
    format!(
        "{:.3} {} ({:+.3} {} / {:+.3} %)",
        value,
        unit,
        diff,
        unit,
        diff * 100.0 / average
    )
}

fn run_header(info: &TestInfo<'_>) -> String {
    format!(
        "{} ({} {}, {} {} per run)",
        info.display_name(),
        info.runs,
        if info.runs == 1 { "run" } else { "runs" },
        info.iterations,
        if info.iterations == 1 {
            "iteration"
        } else {
            "iterations"
        },
    )
}

impl Outputter for ConsoleOutputter {
    fn begin(&mut self, enabled: usize, disabled: usize) {
        let mut line = format!(
            "[==========] Running {} {}",
            enabled,
            benchmark_noun(enabled)
        );
        if disabled > 0 {
            line.push_str(&format!(
                ", skipping {} {}.",
                disabled,
                benchmark_noun(disabled)
            ));
        } else {
            line.push('.');
        }
        self.write_line(&line);
    }

    fn end(&mut self, enabled: usize, disabled: usize) {
        let mut line = format!("[==========] Ran {} {}", enabled, benchmark_noun(enabled));
        if disabled > 0 {
            line.push_str(&format!(
                ", skipped {} {}.",
                disabled,
                benchmark_noun(disabled)
            ));
        } else {
            line.push('.');
        }
        self.write_line(&line);
        if let Err(error) = self.writer.flush() {
            log_write_error("console", &error);
        }
    }

    fn begin_test(&mut self, info: &TestInfo<'_>) {
        self.write_line(&format!("[ RUN      ] {}", run_header(info)));
    }

    fn skip_disabled_test(&mut self, info: &TestInfo<'_>) {
        self.write_line(&format!("[ DISABLED ] {}", run_header(info)));
    }

    fn end_test(&mut self, info: &TestInfo<'_>, result: &TestResult) {
        self.write_line(&format!(
            "[     DONE ] {} ({:.6} ms)",
            info.display_name(),
            result.time_total() / 1_000_000.0
        ));

        let average = result.run_time_average() / 1000.0;
        self.write_line(&format!(
            "[   RUNS   ] {:>20}{:.3} us (~{:.3} us)",
            "Average time: ",
            average,
            result.run_time_std_dev() / 1000.0
        ));
        self.write_padded(
            "Fastest time: ",
            &with_deviation(result.run_time_minimum() / 1000.0, average, "us"),
        );
        self.write_padded(
            "Slowest time: ",
            &with_deviation(result.run_time_maximum() / 1000.0, average, "us"),
        );
        self.write_padded(
            "Median time: ",
            &format!(
                "{:.3} us (1st quartile: {:.3} us | 3rd quartile: {:.3} us)",
                result.run_time_median() / 1000.0,
                result.run_time_quartile1() / 1000.0,
                result.run_time_quartile3() / 1000.0
            ),
        );

        self.write_line("");
        let average_performance = result.runs_per_second_average();
        self.write_padded(
            "Average performance: ",
            &format!("{:.5} runs/s", average_performance),
        );
        self.write_padded(
            "Best performance: ",
            &with_deviation(
                result.runs_per_second_maximum(),
                average_performance,
                "runs/s",
            ),
        );
        self.write_padded(
            "Worst performance: ",
            &with_deviation(
                result.runs_per_second_minimum(),
                average_performance,
                "runs/s",
            ),
        );
        self.write_padded(
            "Median performance: ",
            &format!(
                "{:.5} runs/s (1st quartile: {:.5} | 3rd quartile: {:.5})",
                result.runs_per_second_median(),
                result.runs_per_second_quartile1(),
                result.runs_per_second_quartile3()
            ),
        );

        let iteration_average = result.iteration_time_average() / 1000.0;
        self.write_line(&format!(
            "[ITERATIONS] {:>20}{:.3} us (~{:.3} us)",
            "Average time: ",
            iteration_average,
            result.iteration_time_std_dev() / 1000.0
        ));
        self.write_padded(
            "Fastest time: ",
            &with_deviation(
                result.iteration_time_minimum() / 1000.0,
                iteration_average,
                "us",
            ),
        );
        self.write_padded(
            "Slowest time: ",
            &with_deviation(
                result.iteration_time_maximum() / 1000.0,
                iteration_average,
                "us",
            ),
        );
        self.write_padded(
            "Median time: ",
            &format!(
                "{:.3} us (1st quartile: {:.3} us | 3rd quartile: {:.3} us)",
                result.iteration_time_median() / 1000.0,
                result.iteration_time_quartile1() / 1000.0,
                result.iteration_time_quartile3() / 1000.0
            ),
        );

        self.write_line("");
        let average_performance = result.iterations_per_second_average();
        self.write_padded(
            "Average performance: ",
            &format!("{:.5} iterations/s", average_performance),
        );
        self.write_padded(
            "Best performance: ",
            &with_deviation(
                result.iterations_per_second_maximum(),
                average_performance,
                "iterations/s",
            ),
        );
        self.write_padded(
            "Worst performance: ",
            &with_deviation(
                result.iterations_per_second_minimum(),
                average_performance,
                "iterations/s",
            ),
        );
        self.write_padded(
            "Median performance: ",
            &format!(
                "{:.5} iterations/s (1st quartile: {:.5} | 3rd quartile: {:.5})",
                result.iterations_per_second_median(),
                result.iterations_per_second_quartile1(),
                result.iterations_per_second_quartile3()
            ),
        );
    }
}
