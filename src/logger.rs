//! Shared append-only log.
//!
//! Every demo appends its trace to a [`LogSink`]. The process-wide sink is a
//! file-backed [`SharedLog`] reached through [`global`]; tests hand harnesses a
//! [`MemoryLog`] instead.

use std::cell::{Cell, RefCell};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use lazy_static::lazy_static;

use crate::error::DemoError;

pub const DEFAULT_LOG_PATH: &str = "log.txt";

/// Closes every demo's trace.
pub const SEPARATOR: &str =
    "-----------------------------------------------------------------------------------------------";

pub trait LogSink {
    /// Adds `text` to the end of the buffer.
    fn append(&self, text: &str);

    /// Writes the whole buffer to the destination, replacing what was there.
    fn flush(&self) -> Result<(), DemoError>;
}

impl<T: LogSink + ?Sized> LogSink for &T {
    fn append(&self, text: &str) {
        (**self).append(text)
    }

    fn flush(&self) -> Result<(), DemoError> {
        (**self).flush()
    }
}

// =============================================================================
// File-backed log
// =============================================================================

pub struct SharedLog {
    buffer: Mutex<String>,
    destination: PathBuf,
}

impl SharedLog {
    pub fn new(destination: impl Into<PathBuf>) -> Self {
        SharedLog {
            buffer: Mutex::new(String::new()),
            destination: destination.into(),
        }
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    pub fn contents(&self) -> String {
        self.lock().clone()
    }

    // A panic while appending cannot leave the String half-written.
    fn lock(&self) -> MutexGuard<'_, String> {
        self.buffer.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl LogSink for SharedLog {
    fn append(&self, text: &str) {
        self.lock().push_str(text);
    }

    fn flush(&self) -> Result<(), DemoError> {
        let snapshot = self.contents();
        fs::write(&self.destination, snapshot)
            .map_err(|err| DemoError::io(&self.destination, err))
    }
}

lazy_static! {
    static ref GLOBAL_LOG: SharedLog = SharedLog::new(DEFAULT_LOG_PATH);
}

/// The process-wide log every binary writes to.
pub fn global() -> &'static SharedLog {
    &GLOBAL_LOG
}

// =============================================================================
// In-memory stub
// =============================================================================

#[derive(Default)]
pub struct MemoryLog {
    entries: RefCell<Vec<String>>,
    flushes: Cell<usize>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.borrow().clone()
    }

    pub fn contents(&self) -> String {
        self.entries.borrow().concat()
    }

    pub fn flush_count(&self) -> usize {
        self.flushes.get()
    }
}

impl LogSink for MemoryLog {
    fn append(&self, text: &str) {
        self.entries.borrow_mut().push(text.to_string());
    }

    fn flush(&self) -> Result<(), DemoError> {
        self.flushes.set(self.flushes.get() + 1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_append_preserves_order() {
        let log = SharedLog::new("unused.txt");
        log.append("first\n");
        log.append("second\n");
        assert_eq!(log.contents(), "first\nsecond\n");
    }

    #[test]
    fn test_flush_writes_full_buffer_each_time() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log.txt");
        let log = SharedLog::new(&path);

        log.append("one\n");
        log.flush().unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "one\n");

        log.append("two\n");
        log.flush().unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "one\ntwo\n");
    }

    #[test]
    fn test_flush_overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log.txt");
        fs::write(&path, "stale content that is longer than the buffer").unwrap();

        let log = SharedLog::new(&path);
        log.append("fresh");
        log.flush().unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "fresh");
    }

    #[test]
    fn test_flush_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("log.txt");
        let log = SharedLog::new(&path);
        log.append("text");

        match log.flush() {
            Err(DemoError::Io { path: failed, .. }) => assert_eq!(failed, path),
            other => panic!("expected Io error, got {:?}", other),
        }
    }

    #[test]
    fn test_global_is_single_instance() {
        assert!(std::ptr::eq(global(), global()));
        assert_eq!(global().destination(), Path::new(DEFAULT_LOG_PATH));
    }

    #[test]
    fn test_memory_log_records_entries_and_flushes() {
        let log = MemoryLog::new();
        log.append("a");
        log.append("b");
        log.flush().unwrap();
        log.flush().unwrap();

        assert_eq!(log.entries(), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(log.contents(), "ab");
        assert_eq!(log.flush_count(), 2);
    }

    #[test]
    fn test_sink_usable_through_reference() {
        fn write_twice<L: LogSink>(sink: L) {
            sink.append("x");
            sink.append("y");
        }

        let log = MemoryLog::new();
        write_twice(&log);
        assert_eq!(log.contents(), "xy");
    }
}
