//! Unit tests for log.rs
//!
//! Tests Logger trait, LogEntry, LogSeverity, and DefaultLogger.

use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
use std::sync::{Arc, Mutex};
use std::time::SystemTime;

fn create_entry(severity: LogSeverity, file: Option<&'static str>, line: Option<u32>) -> LogEntry {
    LogEntry {
        severity,
        timestamp: SystemTime::now(),
        source: "sns::Scene".to_string(),
        message: "Scene built".to_string(),
        file,
        line,
    }
}

// ============================================================================
// LOG SEVERITY TESTS
// ============================================================================

#[test]
fn test_log_severity_ordering() {
    assert!(LogSeverity::Trace < LogSeverity::Debug);
    assert!(LogSeverity::Debug < LogSeverity::Info);
    assert!(LogSeverity::Info < LogSeverity::Warn);
    assert!(LogSeverity::Warn < LogSeverity::Error);
}

#[test]
fn test_log_severity_labels_are_fixed_width() {
    for severity in [
        LogSeverity::Trace,
        LogSeverity::Debug,
        LogSeverity::Info,
        LogSeverity::Warn,
        LogSeverity::Error,
    ] {
        assert_eq!(severity.label().len(), 5);
    }
    assert_eq!(LogSeverity::Info.label(), "INFO ");
}

// ============================================================================
// LOG ENTRY TESTS
// ============================================================================

#[test]
fn test_plain_text_without_location() {
    let entry = create_entry(LogSeverity::Info, None, None);
    assert_eq!(entry.plain_text(), "[INFO] [sns::Scene] Scene built");
}

#[test]
fn test_plain_text_with_location() {
    let entry = create_entry(LogSeverity::Error, Some("scene.rs"), Some(42));
    assert_eq!(entry.plain_text(), "[ERROR] [sns::Scene] Scene built (scene.rs:42)");
}

#[test]
fn test_log_entry_clone() {
    let entry = create_entry(LogSeverity::Warn, Some("frustum.rs"), Some(7));
    let cloned = entry.clone();
    assert_eq!(cloned.severity, LogSeverity::Warn);
    assert_eq!(cloned.source, entry.source);
    assert_eq!(cloned.file, Some("frustum.rs"));
    assert_eq!(cloned.line, Some(7));
}

// ============================================================================
// DEFAULT LOGGER TESTS
// ============================================================================

#[test]
fn test_default_logger_all_severities() {
    let logger = DefaultLogger;
    for severity in [
        LogSeverity::Trace,
        LogSeverity::Debug,
        LogSeverity::Info,
        LogSeverity::Warn,
        LogSeverity::Error,
    ] {
        // Should not panic with or without location
        logger.log(&create_entry(severity, None, None));
        logger.log(&create_entry(severity, Some("file.rs"), Some(1)));
    }
}

// ============================================================================
// CUSTOM LOGGER TESTS
// ============================================================================

struct CapturingLogger {
    lines: Arc<Mutex<Vec<String>>>,
}

impl Logger for CapturingLogger {
    fn log(&self, entry: &LogEntry) {
        self.lines.lock().unwrap().push(entry.plain_text());
    }
}

#[test]
fn test_custom_logger_implementation() {
    let lines = Arc::new(Mutex::new(Vec::new()));
    let logger = CapturingLogger { lines: lines.clone() };

    logger.log(&create_entry(LogSeverity::Debug, None, None));

    let captured = lines.lock().unwrap();
    assert_eq!(captured.len(), 1);
    assert!(captured[0].starts_with("[DEBUG]"));
}

#[test]
fn test_logger_trait_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<DefaultLogger>();
    assert_send_sync::<CapturingLogger>();
}
