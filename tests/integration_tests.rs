//! Integration tests for the appender registry
//!
//! These tests verify:
//! - Threshold filtering per appender
//! - Partial open failures during installation
//! - Idempotent finalize and post-finalize drops
//! - Message truncation through the full dispatch path
//! - Independent per-write failures
//! - Configuration errors

use fanout_logger::prelude::*;
use fanout_logger::{info, log, MAX_APPENDER_COUNT, MAX_MESSAGE_SIZE};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const HERE: SourceLocation<'static> = SourceLocation::new("integration_tests.rs", 1, "tests");

/// Log lines without the stack frames that follow error events
fn event_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .expect("Failed to read log file")
        .lines()
        .filter(|l| !l.starts_with('#'))
        .map(str::to_string)
        .collect()
}

#[test]
fn test_threshold_monotonicity() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let paths: Vec<_> = LogLevel::ALL
        .iter()
        .map(|level| temp_dir.path().join(format!("{}.log", level)))
        .collect();

    let configs: Vec<_> = LogLevel::ALL
        .iter()
        .zip(&paths)
        .map(|(level, path)| AppenderConfig::file(path).threshold(*level).format("%l"))
        .collect();

    let registry = Registry::new();
    registry.install(&configs).expect("Failed to install");

    for level in LogLevel::ALL {
        registry.log(level, HERE, format_args!("event"));
    }
    registry.finalize();

    for (threshold, path) in LogLevel::ALL.iter().zip(&paths) {
        let expected: Vec<String> = LogLevel::ALL
            .iter()
            .filter(|severity| threshold <= severity)
            .map(|severity| severity.to_str().to_string())
            .collect();
        assert_eq!(event_lines(path), expected, "threshold {}", threshold);
    }
}

#[test]
fn test_partial_open_failure_tolerated() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let good = temp_dir.path().join("good.log");
    let bad = temp_dir.path().join("missing-dir").join("bad.log");

    let registry = Registry::new();
    registry
        .install(&[
            AppenderConfig::file(&good).format("%m"),
            AppenderConfig::file(&bad).format("%m"),
        ])
        .expect("Install should tolerate one failed appender");

    assert_eq!(registry.appender_count(), 1);
    info!(registry: registry, "reaches only the good appender");
    registry.finalize();

    assert_eq!(event_lines(&good), vec!["reaches only the good appender"]);
    assert!(!bad.exists());
}

#[test]
fn test_all_appenders_failing_drops_events() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let bad = temp_dir.path().join("missing-dir").join("bad.log");

    let registry = Registry::new();
    let err = registry
        .install(&[AppenderConfig::file(&bad)])
        .expect_err("Install must fail when nothing opens");
    assert!(matches!(err, LoggerError::InitError { .. }));

    for i in 0..5 {
        info!(registry: registry, "dropped {}", i);
    }
    assert_eq!(registry.lifecycle(), Lifecycle::Uninitialized);
    assert_eq!(registry.appender_count(), 0);
    assert_eq!(registry.metrics().events_dropped(), 5);
    assert_eq!(registry.metrics().events_dispatched(), 0);
}

#[test]
fn test_finalize_idempotent_and_drops_later_events() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("app.log");

    let registry = Registry::new();
    registry
        .install(&[AppenderConfig::file(&path).format("%m")])
        .expect("Failed to install");

    info!(registry: registry, "kept");
    for _ in 0..5 {
        registry.finalize();
    }
    info!(registry: registry, "dropped");
    log!(registry, LogLevel::Error, "also dropped");

    assert_eq!(registry.lifecycle(), Lifecycle::Finalized);
    assert_eq!(registry.metrics().appenders_released(), 1);
    assert_eq!(registry.metrics().events_dropped(), 2);
    assert_eq!(fs::read_to_string(&path).unwrap(), "kept\n");
}

#[test]
fn test_format_round_trip_through_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("format.log");

    let registry = Registry::new();
    registry
        .install(&[AppenderConfig::file(&path).format("%l5%%done %m")])
        .expect("Failed to install");
    info!(registry: registry, "ok");
    registry.finalize();

    assert_eq!(fs::read_to_string(&path).unwrap(), "INFO %done ok\n");
}

#[test]
fn test_source_location_fields() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("location.log");

    let registry = Registry::new();
    registry
        .install(&[AppenderConfig::file(&path).format("%f|%c")])
        .expect("Failed to install");
    let line = line!() + 1;
    info!(registry: registry, "where");
    registry.finalize();

    let content = fs::read_to_string(&path).unwrap();
    let expected = format!(
        "{}:{}|integration_tests::test_source_location_fields\n",
        file!(),
        line
    );
    assert_eq!(content, expected);
}

#[test]
fn test_oversized_message_truncated() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("long.log");

    let registry = Registry::new();
    registry
        .install(&[AppenderConfig::file(&path).format("%m")])
        .expect("Failed to install");

    let huge = "y".repeat(MAX_MESSAGE_SIZE * 10);
    info!(registry: registry, "{}", huge);
    registry.finalize();

    let lines = event_lines(&path);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].len(), MAX_MESSAGE_SIZE);
}

#[test]
fn test_error_events_carry_backtrace() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("errors.log");

    let registry = Registry::new();
    registry
        .install(&[AppenderConfig::file(&path).format("%l %m")])
        .expect("Failed to install");
    log!(registry, LogLevel::Error, "disk failure");
    log!(registry, LogLevel::Warning, "no trace here");
    registry.finalize();

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.first(), Some(&"ERROR disk failure"));
    assert_eq!(lines.last(), Some(&"WARN no trace here"));
    for frame in &lines[1..lines.len() - 1] {
        assert!(frame.starts_with('#'), "unexpected line: {}", frame);
        assert!(!frame.contains("Registry::dispatch"), "internal frame: {}", frame);
        assert!(!frame.contains("write_backtrace"), "internal frame: {}", frame);
    }
}

#[cfg(target_os = "linux")]
#[test]
fn test_failed_write_does_not_silence_other_appenders() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let good = temp_dir.path().join("good.log");

    let registry = Registry::new();
    registry
        .install(&[
            AppenderConfig::file("/dev/full").format("%m"),
            AppenderConfig::file(&good).format("%m"),
        ])
        .expect("Failed to install");

    for i in 0..3 {
        info!(registry: registry, "message {}", i);
    }

    assert_eq!(registry.appender_count(), 2);
    assert_eq!(registry.metrics().write_failures(), 3);
    assert_eq!(registry.metrics().writes(), 3);
    registry.finalize();

    assert_eq!(
        event_lines(&good),
        vec!["message 0", "message 1", "message 2"]
    );
}

#[test]
fn test_configuration_errors() {
    let registry = Registry::new();

    let err = registry.install(&[]).unwrap_err();
    assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

    let too_many = vec![AppenderConfig::stdout(); MAX_APPENDER_COUNT + 1];
    let err = registry.install(&too_many).unwrap_err();
    assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

    let err = registry
        .install(&[AppenderConfig::stdout(), AppenderConfig::file("")])
        .unwrap_err();
    assert!(err.to_string().contains("appender #1"));

    // None of the rejected lists touched the registry.
    assert_eq!(registry.lifecycle(), Lifecycle::Uninitialized);
    assert!(!registry.init_failed());
}

#[test]
fn test_install_from_json() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("json.log");
    let json = format!(
        r#"[{{"type": "file", "filename": {:?}, "threshold": "WARNING", "format": "%l|%m"}}]"#,
        path.to_str().unwrap()
    );

    let configs = AppenderConfig::list_from_json(&json).expect("Failed to parse JSON");
    let registry = Registry::new();
    registry.install(&configs).expect("Failed to install");
    info!(registry: registry, "filtered");
    log!(registry, LogLevel::Warning, "kept");
    registry.finalize();

    assert_eq!(fs::read_to_string(&path).unwrap(), "WARN|kept\n");
}

#[test]
fn test_install_from_args() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("args.log");
    let args = vec![
        "app".to_string(),
        "-Dlogger.appender1.type=file".to_string(),
        format!("-Dlogger.appender1.filename={}", path.display()),
        "-Dlogger.appender1.threshold=INFO".to_string(),
        "-Dlogger.appender1.format=%l %m".to_string(),
    ];

    let registry = Registry::new();
    registry.install_from_args(&args).expect("Failed to install");
    log!(registry, LogLevel::Debug, "filtered");
    info!(registry: registry, "from args");
    registry.finalize();

    assert_eq!(fs::read_to_string(&path).unwrap(), "INFO from args\n");
}
