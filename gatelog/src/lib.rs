//! # gatelog
//! Severity-gated, thread-aware logger with buffered lines and optional dual
//! console/file delivery.
//!
//! Each thread accumulates streamed fragments into a private line buffer;
//! completed lines cross to dedicated writer threads as atomic records, so
//! concurrently logging threads never interleave inside one line.
//!
//! ## Usage
//! ```rust
//! use gatelog::{Severity, logger_config};
//!
//! let logger = logger_config()
//!     .with_threshold(Severity::Info)
//!     .build()
//!     .unwrap();
//! logger.log(Severity::Info, format_args!("Hello, world!"));
//! // dropping the handle joins the writer threads, flushing everything
//! ```
//!
//! ## Logging to files
//! The configured file is truncated once at startup, then appended to for
//! the rest of the run. With `dual()`, every message goes to both the file
//! and the console.
//!
//! ```rust
//! use gatelog::{Severity, logger_config};
//!
//! let logger = logger_config()
//!     .with_threshold(Severity::Info)
//!     .with_log_file("/tmp/gatelog_doc.log")
//!     .build()
//!     .expect("unable to open log file");
//! logger.begin(Severity::Info).arg("Hello, ").arg("world!").flush();
//! logger.log(Severity::Warning, format_args!("spoken too soon"));
//! drop(logger);
//! assert!(std::fs::read_to_string("/tmp/gatelog_doc.log").unwrap().ends_with("spoken too soon\n"));
//! ```
//!
//! ## As the `log` facade backend
//! `init_global` installs the logger behind the `log` macros. The first
//! call's parameters are binding for the process; later calls are no-ops
//! returning the existing handle.
//!
//! ```rust
//! use gatelog::logger_config;
//!
//! let logger = logger_config().init_global().unwrap();
//! log::warn!("Hello, world!");
//! logger.sync();
//! ```

use std::{
    path::{Path, PathBuf},
    sync::OnceLock,
};

use gatelog_core::{GATELOG_CONFIG, LogFile, LogStdout, spawn_log_thread};
use log::Log;

mod buffer;
mod error;
mod handle;
mod scope;

pub use error::ConfigError;
pub use gatelog_core::Severity;
pub use handle::{Line, LoggerHandle};
pub use scope::AlterLevel;

/// The process-global handle behind [`init_global`] and the `log` bridge.
static GLOBAL: OnceLock<LoggerHandle> = OnceLock::new();

fn default_threshold() -> Severity {
    GATELOG_CONFIG.LEVEL.parse().unwrap_or(Severity::Warning)
}

/// Builder for configuring a logger.
#[derive(Default)]
pub struct ConfigBuilder {
    threshold: Option<Severity>,
    log_file: Option<PathBuf>,
    dual: bool,
}

impl ConfigBuilder {
    /// Sets the emission threshold. Defaults to `GATELOG_LEVEL` from the
    /// environment, falling back to WARNING.
    pub fn with_threshold(self, threshold: Severity) -> Self {
        Self {
            threshold: Some(threshold),
            ..self
        }
    }

    /// Sets a log file. The file is opened at build time, so an unwritable
    /// path surfaces there and not per message.
    pub fn with_log_file<P: AsRef<Path>>(self, path: P) -> Self {
        Self {
            log_file: Some(path.as_ref().to_path_buf()),
            ..self
        }
    }

    /// Maybe sets a log file.
    pub fn maybe_with_log_file<P: AsRef<Path>>(self, path: Option<P>) -> Self {
        Self {
            log_file: path.map(|p| p.as_ref().to_path_buf()),
            ..self
        }
    }

    /// Deliver every message to both the file and the console. Requires a
    /// log file.
    pub fn dual(self) -> Self {
        Self { dual: true, ..self }
    }

    /// Validates the configuration, opens the file destination and spawns
    /// the writer threads. Destination resolution: a file without `dual()`
    /// replaces the console; no file means console only.
    pub fn build(self) -> Result<LoggerHandle, ConfigError> {
        if self.dual && self.log_file.is_none() {
            return Err(ConfigError::DualWithoutFile);
        }
        let threshold = self.threshold.unwrap_or_else(default_threshold);
        let file = self.log_file.map(LogFile::new).transpose()?;
        let file_sender = file.map(spawn_log_thread);
        let console_sender = if file_sender.is_none() || self.dual {
            Some(spawn_log_thread(LogStdout::default()))
        } else {
            None
        };
        Ok(LoggerHandle::new(threshold, console_sender, file_sender))
    }

    /// Initializes the process-global logger and installs it as the `log`
    /// facade backend. First call wins: later calls return the existing
    /// handle and their parameters are ignored.
    pub fn init_global(self) -> Result<&'static LoggerHandle, ConfigError> {
        if let Some(handle) = GLOBAL.get() {
            return Ok(handle);
        }
        let handle = self.build()?;
        let installed = GLOBAL.get_or_init(|| {
            log::set_boxed_logger(Box::new(GatelogBridge)).ok();
            handle
        });
        log::set_max_level(installed.threshold().to_level_filter());
        Ok(installed)
    }
}

/// Returns a default [`ConfigBuilder`].
pub fn logger_config() -> ConfigBuilder {
    ConfigBuilder::default()
}

/// Global accessor. Initializes a console-only logger with the environment
/// threshold on first touch.
pub fn global() -> &'static LoggerHandle {
    match GLOBAL.get() {
        Some(handle) => handle,
        None => logger_config()
            .init_global()
            .expect("console-only logger configuration cannot fail"),
    }
}

/// Backend bridge for the `log` facade. Records submitted through the `log`
/// macros are mapped onto the gatelog severity scale and routed like native
/// messages.
struct GatelogBridge;

impl Log for GatelogBridge {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        GLOBAL
            .get()
            .is_some_and(|handle| handle.enabled(Severity::from_level(metadata.level())))
    }

    fn log(&self, record: &log::Record) {
        if let Some(handle) = GLOBAL.get() {
            let severity = Severity::from_level(record.level());
            if handle.enabled(severity) {
                handle.log(severity, format_args!("{}", record.args()));
            }
        }
    }

    fn flush(&self) {
        if let Some(handle) = GLOBAL.get() {
            handle.sync();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dual_without_file_is_a_config_error() {
        let result = logger_config().dual().build();
        assert!(matches!(result, Err(ConfigError::DualWithoutFile)));
    }

    #[test]
    fn test_unopenable_file_surfaces_at_build_time() {
        let result = logger_config()
            .with_log_file("/nonexistent-gatelog-dir/app.log")
            .build();
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_default_threshold_is_warning() {
        let logger = logger_config().build().unwrap();
        assert_eq!(logger.threshold(), Severity::Warning);
    }

    #[test]
    fn test_dual_mode_delivers_to_file_verbatim() {
        let path = "/tmp/gatelog_test_dual.log";
        std::fs::remove_file(path).ok();
        let logger = logger_config()
            .with_threshold(Severity::Info)
            .with_log_file(path)
            .dual()
            .build()
            .unwrap();
        logger.log(Severity::Info, format_args!("both places"));
        logger.log(Severity::Error, format_args!("here too"));
        drop(logger);

        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.contains("INFO      both places"));
        assert!(content.contains("ERROR     here too"));
        assert!(!content.contains('\x1b'));
    }

    #[test]
    fn test_maybe_with_log_file() {
        let logger = logger_config()
            .maybe_with_log_file(None::<&str>)
            .build()
            .unwrap();
        assert_eq!(logger.threshold(), Severity::Warning);
    }
}
