use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use crate::record::LogRecord;

/// A destination for completed log lines. Implementations are driven from a
/// single writer thread, so they need no interior locking.
pub trait LogWriter {
    fn write_line(&mut self, record: &LogRecord);
    fn flush(&mut self);
}

/// Console destination: process stdout, flushed after every line. Whether
/// the severity tag actually carries color escapes is decided by `colored`
/// (tty detection, NO_COLOR).
#[derive(Default, Debug)]
pub struct LogStdout;

impl LogWriter for LogStdout {
    fn write_line(&mut self, record: &LogRecord) {
        println!("{}", record.render(true));
        std::io::stdout().flush().ok();
    }

    fn flush(&mut self) {
        std::io::stdout().flush().ok();
    }
}

/// File destination. The file is truncated once at open, then reopened in
/// append mode: every process start begins from an empty log, while appends
/// within the run are preserved. Every line is flushed immediately so a
/// crashing host loses nothing already logged.
pub struct LogFile {
    file: Option<BufWriter<File>>,
}

impl LogFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, std::io::Error> {
        File::options()
            .create(true)
            .truncate(true)
            .write(true)
            .open(&path)?;
        let file = File::options().append(true).open(&path)?;
        Ok(Self {
            file: Some(BufWriter::new(file)),
        })
    }
}

impl LogWriter for LogFile {
    fn write_line(&mut self, record: &LogRecord) {
        let Some(file) = self.file.as_mut() else {
            return;
        };
        // A failed write retires the destination; logging calls never
        // surface per-message errors to the host.
        if writeln!(file, "{}", record.render(false))
            .and_then(|()| file.flush())
            .is_err()
        {
            self.file = None;
        }
    }

    fn flush(&mut self) {
        if let Some(file) = self.file.as_mut()
            && file.flush().is_err()
        {
            self.file = None;
        }
    }
}

#[cfg(test)]
fn record(severity: crate::Severity, text: &str) -> LogRecord {
    LogRecord {
        severity,
        timestamp: chrono::Utc::now(),
        text: text.into(),
    }
}

#[test]
fn test_log_file_truncates_then_appends() {
    use crate::Severity;
    let path = "/tmp/gatelog_test_truncate.log";
    std::fs::write(path, "stale content from a previous run\n").unwrap();

    let mut file = LogFile::new(path).unwrap();
    file.write_line(&record(Severity::Error, "first"));
    file.write_line(&record(Severity::Warning, "second"));
    file.flush();

    let content = std::fs::read_to_string(path).unwrap();
    assert!(!content.contains("stale"));
    assert!(content.contains("ERROR     first"));
    assert!(content.contains("WARNING   second"));
    assert_eq!(content.lines().count(), 2);

    // A second open on the same path starts from an empty file again.
    let mut file = LogFile::new(path).unwrap();
    file.write_line(&record(Severity::Info, "fresh start"));
    file.flush();
    let content = std::fs::read_to_string(path).unwrap();
    assert!(!content.contains("first"));
    assert_eq!(content.lines().count(), 1);
}

#[test]
fn test_log_file_is_durable_per_line() {
    use crate::Severity;
    let path = "/tmp/gatelog_test_durable.log";
    std::fs::remove_file(path).ok();

    let mut file = LogFile::new(path).unwrap();
    file.write_line(&record(Severity::Info, "already on disk"));
    // No explicit flush: write_line flushes by itself.
    let content = std::fs::read_to_string(path).unwrap();
    assert!(content.ends_with("already on disk\n"));
}

#[test]
fn test_log_file_output_is_plain_text() {
    use crate::Severity;
    let path = "/tmp/gatelog_test_plain.log";
    std::fs::remove_file(path).ok();

    let mut file = LogFile::new(path).unwrap();
    file.write_line(&record(Severity::Error, "no escapes here"));
    let content = std::fs::read_to_string(path).unwrap();
    assert!(!content.contains('\x1b'));
}
