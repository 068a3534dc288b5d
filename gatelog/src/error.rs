use thiserror::Error;

/// Errors surfaced at configuration time. Ordinary logging calls never fail:
/// once a logger exists, a dead destination degrades to "no destination"
/// instead of raising per-call errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Dual mode pairs the console with a file; there is nothing to pair
    /// without a file path.
    #[error("dual mode requires a log file path")]
    DualWithoutFile,
    /// The configured log file could not be opened. Fatal at startup; the
    /// system does not silently fall back to console-only.
    #[error("unable to open log file: {0}")]
    Io(#[from] std::io::Error),
}
