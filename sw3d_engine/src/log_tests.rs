//! Unit tests for log.rs

use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
use std::sync::Mutex;
use std::time::SystemTime;

fn entry(severity: LogSeverity, message: &str, location: Option<(&'static str, u32)>) -> LogEntry {
    LogEntry {
        severity,
        timestamp: SystemTime::now(),
        source: "sw3d::VolumeLevel".to_string(),
        message: message.to_string(),
        file: location.map(|(file, _)| file),
        line: location.map(|(_, line)| line),
    }
}

const ALL_SEVERITIES: [LogSeverity; 5] = [
    LogSeverity::Trace,
    LogSeverity::Debug,
    LogSeverity::Info,
    LogSeverity::Warn,
    LogSeverity::Error,
];

// ============================================================================
// LOG SEVERITY
// ============================================================================

#[test]
fn test_log_severity_ordering() {
    assert!(LogSeverity::Trace < LogSeverity::Debug);
    assert!(LogSeverity::Debug < LogSeverity::Info);
    assert!(LogSeverity::Info < LogSeverity::Warn);
    assert!(LogSeverity::Warn < LogSeverity::Error);
}

#[test]
fn test_log_severity_debug_names() {
    let names: Vec<String> = ALL_SEVERITIES.iter().map(|s| format!("{:?}", s)).collect();
    assert_eq!(names, ["Trace", "Debug", "Info", "Warn", "Error"]);
}

// ============================================================================
// LOG ENTRY
// ============================================================================

#[test]
fn test_log_entry_without_location() {
    let e = entry(LogSeverity::Trace, "Unlocked level 2", None);
    assert_eq!(e.source, "sw3d::VolumeLevel");
    assert!(e.file.is_none());
    assert!(e.line.is_none());
}

#[test]
fn test_log_entry_with_location_clones() {
    let e1 = entry(LogSeverity::Error, "Level 2 is not locked", Some(("volume.rs", 212)));
    let e2 = e1.clone();
    assert_eq!(e2.severity, LogSeverity::Error);
    assert_eq!(e2.message, "Level 2 is not locked");
    assert_eq!(e2.file, Some("volume.rs"));
    assert_eq!(e2.line, Some(212));
}

// ============================================================================
// DEFAULT LOGGER
// ============================================================================

#[test]
fn test_default_logger_prints_every_severity() {
    let logger = DefaultLogger;
    for severity in ALL_SEVERITIES {
        logger.log(&entry(severity, "plain", None));
        logger.log(&entry(severity, "with location", Some(("volume_texture.rs", 42))));
    }
}

#[test]
fn test_default_logger_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<DefaultLogger>();
}

// ============================================================================
// CUSTOM LOGGER
// ============================================================================

struct CountingLogger {
    errors: Mutex<usize>,
    others: Mutex<usize>,
}

impl Logger for CountingLogger {
    fn log(&self, entry: &LogEntry) {
        let counter = if entry.severity == LogSeverity::Error { &self.errors } else { &self.others };
        *counter.lock().unwrap() += 1;
    }
}

#[test]
fn test_custom_logger_receives_entries() {
    let logger = CountingLogger { errors: Mutex::new(0), others: Mutex::new(0) };
    for severity in ALL_SEVERITIES {
        logger.log(&entry(severity, "message", None));
    }
    assert_eq!(*logger.errors.lock().unwrap(), 1);
    assert_eq!(*logger.others.lock().unwrap(), 4);
}
