//! # gatelog-core
//! Core infrastructure for gatelog - severity model, sink destinations and
//! writer threads.

mod config;
mod record;
mod severity;
mod thread;
mod writer;

pub use config::GATELOG_CONFIG;
pub use record::{LogMessage, LogRecord};
pub use severity::{ParseSeverityError, Severity};
pub use thread::{LogSender, LoggerGuard, spawn_log_thread};
pub use writer::{LogFile, LogStdout, LogWriter};
