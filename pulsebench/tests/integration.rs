//! Integration tests for pulsebench
//!
//! These drive the registry end-to-end through a recording sink and check
//! the event stream the outputters receive.

use pulsebench::{Benchmark, CalibrationModel, JsonOutputter, Outputter, Registry, TestInfo};
use pulsebench_stats::TestResult;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
enum Event {
    Begin(usize, usize),
    BeginTest(String),
    EndTest(String, Vec<u64>),
    Skip(String),
    End(usize, usize),
}

#[derive(Clone, Default)]
struct RecordingOutputter {
    events: Rc<RefCell<Vec<Event>>>,
}

impl RecordingOutputter {
    fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }
}

impl Outputter for RecordingOutputter {
    fn begin(&mut self, enabled: usize, disabled: usize) {
        self.events.borrow_mut().push(Event::Begin(enabled, disabled));
    }

    fn end(&mut self, enabled: usize, disabled: usize) {
        self.events.borrow_mut().push(Event::End(enabled, disabled));
    }

    fn begin_test(&mut self, info: &TestInfo<'_>) {
        self.events
            .borrow_mut()
            .push(Event::BeginTest(info.display_name()));
    }

    fn skip_disabled_test(&mut self, info: &TestInfo<'_>) {
        self.events.borrow_mut().push(Event::Skip(info.display_name()));
    }

    fn end_test(&mut self, info: &TestInfo<'_>, result: &TestResult) {
        self.events.borrow_mut().push(Event::EndTest(
            info.display_name(),
            result.run_times().to_vec(),
        ));
    }
}

/// A calibration model that subtracts nothing, keeping tests fast and the
/// event stream deterministic; `run_all` itself is covered separately.
fn null_model() -> CalibrationModel {
    CalibrationModel::new(1_000_000, 0, 0)
}

fn end_test_run_times(event: &Event) -> &[u64] {
    match event {
        Event::EndTest(_, run_times) => run_times,
        other => panic!("expected an end-test event, got {other:?}"),
    }
}

fn quick(fixture: &str, test: &str) -> pulsebench::BenchmarkDef {
    Benchmark::new(fixture, test)
        .runs(2)
        .iterations(3)
        .body(|| {
            std::hint::black_box(7u64 * 191);
        })
}

#[test]
fn test_event_stream_order_and_counts() {
    let recorder = RecordingOutputter::default();
    let mut registry = Registry::new();

    registry.register(quick("X", "Alpha"));
    registry.register(quick("X", "DISABLED_Slow"));
    registry.register(quick("Y", "Beta"));
    registry.register(quick("Z", "Gamma"));
    registry.add_outputter(Box::new(recorder.clone()));

    registry.run_all_with_model(null_model());

    let events = recorder.events();
    assert_eq!(events.len(), 9);
    assert_eq!(events[0], Event::Begin(3, 1));
    assert_eq!(events[1], Event::BeginTest("X.Alpha".into()));
    assert!(matches!(events[2], Event::EndTest(ref name, _) if name == "X.Alpha"));
    assert_eq!(events[3], Event::Skip("X.Slow".into()));
    assert_eq!(events[4], Event::BeginTest("Y.Beta".into()));
    assert!(matches!(events[5], Event::EndTest(ref name, _) if name == "Y.Beta"));
    assert_eq!(events[6], Event::BeginTest("Z.Gamma".into()));
    assert!(matches!(events[7], Event::EndTest(ref name, _) if name == "Z.Gamma"));
    assert_eq!(events[8], Event::End(3, 1));
}

#[test]
fn test_disabled_test_never_contributes_a_result() {
    let recorder = RecordingOutputter::default();
    let mut registry = Registry::new();

    registry.register(quick("X", "DISABLED_Slow"));
    registry.add_outputter(Box::new(recorder.clone()));

    registry.run_all_with_model(null_model());

    let events = recorder.events();
    assert_eq!(
        events,
        vec![
            Event::Begin(0, 1),
            Event::Skip("X.Slow".into()),
            Event::End(0, 1),
        ]
    );
}

#[test]
fn test_pattern_filter_with_negation_retains_only_x_fast() {
    let mut registry = Registry::new();
    registry.register(quick("X", "Fast"));
    registry.register(quick("X", "Slow"));
    registry.register(quick("Y", "Fast"));

    registry.apply_pattern_filter("X.*-X.Slow");

    assert_eq!(registry.canonical_names(), vec!["X.Fast".to_string()]);
}

#[test]
fn test_include_filter_skips_silently_and_counts_stay_fixed() {
    let recorder = RecordingOutputter::default();
    let mut registry = Registry::new();

    registry.register(quick("X", "Alpha"));
    registry.register(quick("Y", "Beta"));
    registry.register(quick("Z", "Gamma"));
    registry.add_outputter(Box::new(recorder.clone()));
    registry.add_include("Y.");

    registry.run_all_with_model(null_model());

    // Non-included tests produce no events at all; begin/end counts still
    // reflect the full post-filter list.
    let events = recorder.events();
    assert_eq!(events.len(), 4);
    assert_eq!(events[0], Event::Begin(3, 0));
    assert_eq!(events[1], Event::BeginTest("Y.Beta".into()));
    assert!(matches!(events[2], Event::EndTest(ref name, _) if name == "Y.Beta"));
    assert_eq!(events[3], Event::End(3, 0));
}

#[test]
fn test_runs_produce_one_duration_each() {
    let recorder = RecordingOutputter::default();
    let mut registry = Registry::new();

    registry.register(
        Benchmark::new("Vector", "PushBack")
            .runs(5)
            .iterations(10)
            .body(|| {
                let mut v = Vec::with_capacity(4);
                v.push(1u64);
                std::hint::black_box(&v);
            }),
    );
    registry.add_outputter(Box::new(recorder.clone()));

    registry.run_all_with_model(null_model());

    let events = recorder.events();
    assert_eq!(end_test_run_times(&events[2]).len(), 5);
}

#[test]
fn test_calibration_subtraction_clamps_at_zero() {
    let recorder = RecordingOutputter::default();
    let mut registry = Registry::new();

    registry.register(quick("X", "Tiny"));
    registry.add_outputter(Box::new(recorder.clone()));

    // An overhead estimate far above any real measurement must clamp every
    // net duration to zero, never wrap.
    let model = CalibrationModel::new(1_000_000, 0, u64::MAX / 2);
    registry.run_all_with_model(model);

    let events = recorder.events();
    assert!(end_test_run_times(&events[2]).iter().all(|&t| t == 0));
}

#[test]
fn test_parameterized_display_name_reaches_sinks() {
    let recorder = RecordingOutputter::default();
    let mut registry = Registry::new();

    registry.register(
        Benchmark::new("Vector", "Reserve")
            .parameters("(size, fill)", "(128, true)")
            .body(|| {
                std::hint::black_box(Vec::<u64>::with_capacity(128));
            }),
    );
    registry.add_outputter(Box::new(recorder.clone()));

    registry.run_all_with_model(null_model());

    let events = recorder.events();
    assert_eq!(
        events[1],
        Event::BeginTest("Vector.Reserve(size = 128, fill = true)".into())
    );
}

#[test]
fn test_json_sink_end_to_end() {
    use std::io::Write;
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

    let buffer = SharedBuffer::default();
    let mut registry = Registry::new();
    registry.register(quick("X", "Alpha"));
    registry.register(quick("X", "DISABLED_Slow"));
    registry.add_outputter(Box::new(JsonOutputter::new(Box::new(buffer.clone()))));

    registry.run_all_with_model(null_model());

    let bytes = buffer.0.lock().unwrap().clone();
    let document: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(document["enabled"], 1);
    assert_eq!(document["disabled"], 1);
    let tests = document["tests"].as_array().unwrap();
    assert_eq!(tests.len(), 2);
    assert_eq!(tests[0]["test"], "Alpha");
    assert_eq!(tests[1]["disabled"], true);
}

#[test]
fn test_run_all_with_live_calibration() {
    let recorder = RecordingOutputter::default();
    let mut registry = Registry::new();

    registry.register(
        Benchmark::new("Math", "Multiply")
            .runs(3)
            .iterations(100)
            .body(|| {
                std::hint::black_box(123_u64.wrapping_mul(457));
            }),
    );
    registry.add_outputter(Box::new(recorder.clone()));

    // Full path: measures a real calibration model first.
    registry.run_all();

    let events = recorder.events();
    assert_eq!(events.first(), Some(&Event::Begin(1, 0)));
    assert_eq!(events.last(), Some(&Event::End(1, 0)));
    assert_eq!(end_test_run_times(&events[2]).len(), 3);
}
