use std::{fmt, sync::Arc};

use chrono::{DateTime, Utc};
use gatelog_core::{LogMessage, LogRecord, LogSender, Severity};

/// In-progress message owned by exactly one thread. Fragments accumulate
/// here until the buffer is flushed; the completed line then crosses to the
/// writer threads as one record. The destination senders are captured at
/// creation, so a superseded buffer still flushes to the logger it was
/// started on.
pub(crate) struct LineBuffer {
    severity: Severity,
    timestamp: DateTime<Utc>,
    text: String,
    spent: bool,
    console: Option<Arc<LogSender>>,
    file: Option<Arc<LogSender>>,
}

impl LineBuffer {
    pub(crate) fn new(
        severity: Severity,
        console: Option<Arc<LogSender>>,
        file: Option<Arc<LogSender>>,
    ) -> Self {
        Self {
            severity,
            timestamp: Utc::now(),
            text: String::new(),
            spent: false,
            console,
            file,
        }
    }

    /// The deaf sentinel installed for below-threshold messages: permanently
    /// spent, no destinations, no allocation. Appends land here and vanish.
    pub(crate) fn deaf() -> Self {
        Self {
            severity: Severity::Debug3,
            timestamp: Utc::now(),
            text: String::new(),
            spent: true,
            console: None,
            file: None,
        }
    }

    /// Appending to a spent buffer is a silent no-op, so call sites can
    /// chain writes without checking state.
    pub(crate) fn append(&mut self, fragment: fmt::Arguments<'_>) {
        if self.spent {
            return;
        }
        use fmt::Write;
        let _ = self.text.write_fmt(fragment);
    }

    pub(crate) fn has_content(&self) -> bool {
        !self.spent && !self.text.is_empty()
    }

    /// Ships the accumulated text to the captured destinations and marks the
    /// buffer spent. The writer appends the newline.
    pub(crate) fn flush(&mut self) {
        if self.spent {
            return;
        }
        self.spent = true;
        let record = Arc::new(LogRecord {
            severity: self.severity,
            timestamp: self.timestamp,
            text: std::mem::take(&mut self.text),
        });
        if let Some(console) = &self.console {
            console.send(LogMessage::Record(record.clone())).ok();
        }
        if let Some(file) = &self.file {
            file.send(LogMessage::Record(record)).ok();
        }
    }
}

impl Drop for LineBuffer {
    fn drop(&mut self) {
        // The owning context ended; content written but never flushed would
        // otherwise be lost silently.
        if self.has_content() {
            self.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatelog_core::{LogFile, spawn_log_thread};

    #[test]
    fn test_spent_buffer_discards_appends() {
        let mut buffer = LineBuffer::deaf();
        buffer.append(format_args!("into the void"));
        assert!(!buffer.has_content());
    }

    #[test]
    fn test_drop_flushes_unflushed_content() {
        let path = "/tmp/gatelog_test_buffer_drop.log";
        std::fs::remove_file(path).ok();

        let sender = Arc::new(spawn_log_thread(LogFile::new(path).unwrap()));
        let mut buffer = LineBuffer::new(Severity::Warning, None, Some(sender.clone()));
        buffer.append(format_args!("left behind"));
        drop(buffer);
        sender.flush_barrier();

        assert!(std::fs::read_to_string(path).unwrap().contains("left behind"));
        sender.shutdown();
    }

    #[test]
    fn test_flush_is_idempotent() {
        let path = "/tmp/gatelog_test_buffer_idem.log";
        std::fs::remove_file(path).ok();

        let sender = Arc::new(spawn_log_thread(LogFile::new(path).unwrap()));
        let mut buffer = LineBuffer::new(Severity::Info, None, Some(sender.clone()));
        buffer.append(format_args!("once"));
        buffer.flush();
        buffer.append(format_args!(" and never again"));
        buffer.flush();
        drop(buffer);
        sender.shutdown();

        let content = std::fs::read_to_string(path).unwrap();
        assert_eq!(content.lines().count(), 1);
        assert!(content.ends_with("once\n"));
    }
}
