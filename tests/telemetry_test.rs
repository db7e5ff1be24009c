//! Integration tests for log file handling and span helpers.

use std::io::Write;
use webarchives_report::telemetry::{TelemetryConfig, init_telemetry, log_file_name, open_log_file};

#[test]
fn log_file_name_includes_environment_and_repository() {
    assert_eq!(
        log_file_name("prod", 2),
        "webarchives-update-prod-repository-2.log"
    );
    assert_eq!(log_file_name("", 0), "webarchives-update--repository-0.log");
}

#[test]
fn log_file_is_appended_not_truncated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(log_file_name("dev", 3));
    std::fs::write(&path, "previous run\n").unwrap();

    let mut file = open_log_file(&path).unwrap();
    file.write_all(b"this run\n").unwrap();
    drop(file);

    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "previous run\nthis run\n"
    );
}

#[test]
fn log_file_in_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no-such-dir").join("run.log");
    assert!(open_log_file(&path).is_err());
}

#[test]
fn telemetry_initializes_without_endpoint() {
    // Note: tracing subscriber can only be set once per process.
    let dir = tempfile::tempdir().unwrap();
    let file = open_log_file(&dir.path().join("telemetry.log")).unwrap();
    let config = TelemetryConfig {
        endpoint: None,
        service_name: "webarchives-report-test".to_string(),
        log_file: Some(file),
    };
    // This may return Err if a global subscriber was already set by
    // another test in this process; that is acceptable.
    let _guard = init_telemetry(config);
}

#[test]
fn worker_span_creates_and_records_output() {
    let span = webarchives_report::telemetry::worker::start_worker_span(3, 120);
    webarchives_report::telemetry::worker::record_worker_output(&span, 97);
}
