use std::sync::Arc;

use chrono::{DateTime, Utc};
use crossbeam_channel::Sender;

use crate::severity::Severity;

/// One completed log line, ready for delivery to its destinations. Records
/// cross to the writer threads whole, which is what keeps concurrently
/// logged lines from interleaving at the byte level.
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub severity: Severity,
    pub timestamp: DateTime<Utc>,
    pub text: String,
}

impl LogRecord {
    /// Renders the line: timestamp, severity tag left-justified to 10
    /// columns, message text. Color escapes frame the tag on the console
    /// rendition only; file output stays plain for parseability.
    pub fn render(&self, color: bool) -> String {
        let time = self.timestamp.format("%Y-%m-%dT%H:%M:%S%.3f");
        if color {
            format!("{time} {}{}", self.severity.colored_tag(), self.text)
        } else {
            format!("{time} {:<10}{}", self.severity.tag(), self.text)
        }
    }
}

/// Messages understood by a writer thread.
pub enum LogMessage {
    Record(Arc<LogRecord>),
    /// Rendezvous: the writer flushes its destination, then signals the ack
    /// channel so the caller knows everything sent before is durable.
    Flush(Sender<()>),
    Shutdown,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(severity: Severity, text: &str) -> LogRecord {
        LogRecord {
            severity,
            timestamp: Utc::now(),
            text: text.into(),
        }
    }

    #[test]
    fn test_render_plain_has_padded_tag_and_no_escapes() {
        let line = record(Severity::Error, "disk on fire").render(false);
        assert!(line.ends_with("ERROR     disk on fire"));
        assert!(!line.contains('\x1b'));
    }

    #[test]
    fn test_render_keeps_text_verbatim() {
        let line = record(Severity::Info, "a b  c").render(false);
        assert!(line.ends_with("INFO      a b  c"));
    }
}
