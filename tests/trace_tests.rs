use scriptforge::extract::{ExtractOptions, SelectorParamNamer, extract_with};
use scriptforge::trace::{TraceEvent, TraceLogger};

// =========================================================================
// Helpers
// =========================================================================

fn read_events(path: &std::path::Path) -> Vec<serde_json::Value> {
    std::fs::read_to_string(path)
        .expect("trace file exists")
        .lines()
        .map(|l| serde_json::from_str(l).expect("each line is JSON"))
        .collect()
}

// =========================================================================
// TraceEvent
// =========================================================================

#[test]
fn event_builders_set_fields() {
    let event = TraceEvent::now(3, 10, 5, "click")
        .with_outcome("skipped")
        .with_kind("click")
        .with_reason("argument 1 is not a literal");
    assert_eq!(event.step, 3);
    assert_eq!((event.line, event.column), (10, 5));
    assert_eq!(event.method, "click");
    assert_eq!(event.outcome, "skipped");
    assert_eq!(event.kind.as_deref(), Some("click"));
    assert_eq!(event.reason.as_deref(), Some("argument 1 is not a literal"));
    assert!(event.timestamp_ms > 0);
}

#[test]
fn new_event_defaults_to_ignored() {
    let event = TraceEvent::now(1, 1, 1, "locator");
    assert_eq!(event.outcome, "ignored");
    assert!(event.kind.is_none());
    assert!(event.reason.is_none());
}

// =========================================================================
// TraceLogger
// =========================================================================

#[test]
fn logger_writes_one_line_per_call() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("trace.jsonl");

    let extraction = extract_with(
        "page.goto('https://a.test')\npage.fill('#x')\npage.locator('#y')\n",
        &ExtractOptions::default(),
        &SelectorParamNamer,
    )
    .expect("extract");

    let logger = TraceLogger::new(path.to_str().expect("utf-8 path"));
    assert!(logger.is_enabled());
    logger.log_report(&extraction.report);

    let events = read_events(&path);
    assert_eq!(events.len(), 3);

    assert_eq!(events[0]["step"], 1);
    assert_eq!(events[0]["method"], "goto");
    assert_eq!(events[0]["outcome"], "recognized");
    assert_eq!(events[0]["kind"], "navigate");

    assert_eq!(events[1]["outcome"], "skipped");
    assert_eq!(events[1]["kind"], "fill");
    assert_eq!(events[1]["reason"], "needs 2 positional argument(s), found 1");
    assert_eq!(events[1]["line"], 2);

    assert_eq!(events[2]["outcome"], "ignored");
    assert!(events[2]["kind"].is_null());
}

#[test]
fn logger_appends_across_instances() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("trace.jsonl");
    let path_str = path.to_str().expect("utf-8 path");

    TraceLogger::new(path_str).log(&TraceEvent::now(1, 1, 1, "a"));
    TraceLogger::new(path_str).log(&TraceEvent::now(2, 2, 1, "b"));

    let events = read_events(&path);
    assert_eq!(events.len(), 2);
    assert_eq!(events[1]["method"], "b");
}

#[test]
fn unopenable_trace_file_disables_logging() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("missing").join("trace.jsonl");

    let logger = TraceLogger::new(path.to_str().expect("utf-8 path"));
    assert!(!logger.is_enabled());
    logger.log(&TraceEvent::now(1, 1, 1, "click"));
    assert!(!path.exists());
}

#[test]
fn disabled_logger_is_a_no_op() {
    let logger = TraceLogger::disabled();
    assert!(!logger.is_enabled());
    logger.log(&TraceEvent::now(1, 1, 1, "click"));
}
