use std::{
    cell::RefCell,
    fmt,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use chrono::Utc;
use gatelog_core::{LogMessage, LogRecord, LogSender, Severity};

use crate::buffer::LineBuffer;

thread_local! {
    /// The calling thread's in-progress message. Exclusive ownership of this
    /// slot is what keeps fragments of concurrently built lines apart.
    static ACTIVE: RefCell<Option<LineBuffer>> = const { RefCell::new(None) };
}

/// Default level for bare appends that never went through [`LoggerHandle::begin`].
const DEFAULT_LEVEL: Severity = Severity::Debug0;

/// The severity-gated dispatcher. One handle owns the destination writer
/// threads and the mutable threshold; share it by reference (or behind an
/// `Arc`) across threads. Dropping an owned handle joins the writers,
/// flushing everything outstanding.
pub struct LoggerHandle {
    threshold: AtomicUsize,
    console: Option<Arc<LogSender>>,
    file: Option<Arc<LogSender>>,
}

impl LoggerHandle {
    pub(crate) fn new(
        threshold: Severity,
        console: Option<LogSender>,
        file: Option<LogSender>,
    ) -> Self {
        Self {
            threshold: AtomicUsize::new(threshold as usize),
            console: console.map(Arc::new),
            file: file.map(Arc::new),
        }
    }

    pub fn threshold(&self) -> Severity {
        Severity::from_index(self.threshold.load(Ordering::Relaxed))
    }

    pub(crate) fn set_threshold(&self, threshold: Severity) {
        self.threshold.store(threshold as usize, Ordering::Relaxed);
    }

    /// Whether a message at `severity` would currently be emitted.
    pub fn enabled(&self, severity: Severity) -> bool {
        severity <= self.threshold()
    }

    /// Starts a new message for the calling thread. Replacing the slot drops
    /// the previous buffer, which flushes any content that was written but
    /// never flushed. Below the threshold, a deaf sentinel is installed
    /// instead and every subsequent append vanishes without allocation.
    pub fn begin(&self, severity: Severity) -> Line<'_> {
        ACTIVE.with(|slot| {
            *slot.borrow_mut() = Some(if self.enabled(severity) {
                LineBuffer::new(severity, self.console.clone(), self.file.clone())
            } else {
                LineBuffer::deaf()
            });
        });
        Line { logger: self }
    }

    /// Appends one fragment to the thread's active buffer. With no active
    /// buffer, a message at [`DEFAULT_LEVEL`] is begun first.
    pub fn append(&self, fragment: fmt::Arguments<'_>) {
        ACTIVE.with(|slot| {
            let mut slot = slot.borrow_mut();
            let buffer = slot.get_or_insert_with(|| {
                if self.enabled(DEFAULT_LEVEL) {
                    LineBuffer::new(DEFAULT_LEVEL, self.console.clone(), self.file.clone())
                } else {
                    LineBuffer::deaf()
                }
            });
            buffer.append(fragment);
        });
    }

    /// Flushes the calling thread's active buffer, if any. The accumulated
    /// text crosses to the destinations as one record. The spent buffer
    /// stays in the slot so that later appends through a stale handle are
    /// silent no-ops instead of starting a fresh default-level message.
    pub fn flush(&self) {
        ACTIVE.with(|slot| {
            if let Some(buffer) = slot.borrow_mut().as_mut() {
                buffer.flush();
            }
        });
    }

    /// One-shot convenience: begin, append, flush.
    pub fn log(&self, severity: Severity, args: fmt::Arguments<'_>) {
        self.begin(severity).arg(args).flush();
    }

    /// Blocks until every record this thread has flushed so far is durably
    /// written to all destinations.
    pub fn sync(&self) {
        self.flush();
        self.barrier();
    }

    fn barrier(&self) {
        for sender in [&self.console, &self.file].into_iter().flatten() {
            sender.flush_barrier();
        }
    }

    /// Fail-fast escalation: the message is emitted regardless of the
    /// threshold, synchronously forced to disk, and then converted into a
    /// panic so the caller stops. A caller-visible control-flow effect, not
    /// a recoverable condition.
    pub fn fatal(&self, args: fmt::Arguments<'_>) -> ! {
        self.flush();
        let text = args.to_string();
        let record = Arc::new(LogRecord {
            severity: Severity::Fatal,
            timestamp: Utc::now(),
            text: text.clone(),
        });
        for sender in [&self.console, &self.file].into_iter().flatten() {
            sender.send(LogMessage::Record(record.clone())).ok();
            sender.flush_barrier();
        }
        panic!("{text}");
    }
}

/// Fluent handle to the in-progress message of the calling thread. Many
/// appends, one flush.
#[must_use = "a Line does nothing until fragments are appended and flushed"]
pub struct Line<'a> {
    logger: &'a LoggerHandle,
}

impl Line<'_> {
    pub fn arg<T: fmt::Display>(&self, value: T) -> &Self {
        self.logger.append(format_args!("{value}"));
        self
    }

    pub fn flush(&self) {
        self.logger.flush();
    }
}
