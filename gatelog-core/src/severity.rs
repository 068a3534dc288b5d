use std::{fmt, str::FromStr};

use colored::{ColoredString, Colorize};
use log::{Level, LevelFilter};

/// Message severity. Lower numeric value means more severe; a message is
/// emitted when its severity compares `<=` against the active threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Fatal = 0,
    Error = 1,
    Warning = 2,
    Info = 3,
    Debug0 = 4,
    Debug1 = 5,
    Debug2 = 6,
    Debug3 = 7,
}

impl Severity {
    /// Tag written in the line preamble.
    pub fn tag(&self) -> &'static str {
        match self {
            Severity::Fatal => "FATAL",
            Severity::Error => "ERROR",
            Severity::Warning => "WARNING",
            Severity::Info => "INFO",
            Severity::Debug0 => "DEBUG0",
            Severity::Debug1 => "DEBUG1",
            Severity::Debug2 => "DEBUG2",
            Severity::Debug3 => "DEBUG3",
        }
    }

    /// Tag padded to 10 columns with the console color applied around it.
    /// Error and above render in red, warnings in yellow, the rest plain.
    pub fn colored_tag(&self) -> ColoredString {
        let tag = format!("{:<10}", self.tag());
        match self {
            Severity::Fatal | Severity::Error => tag.red(),
            Severity::Warning => tag.yellow(),
            _ => tag.normal(),
        }
    }

    /// Reverse of `as usize`. Out-of-range values clamp to the least severe
    /// level, matching the historical behavior of the configuration entry
    /// point.
    pub fn from_index(index: usize) -> Self {
        match index {
            0 => Severity::Fatal,
            1 => Severity::Error,
            2 => Severity::Warning,
            3 => Severity::Info,
            4 => Severity::Debug0,
            5 => Severity::Debug1,
            6 => Severity::Debug2,
            _ => Severity::Debug3,
        }
    }

    /// Mapping into the `log` facade's five-level scale. The two scales are
    /// ordered differently, so the mapping is explicit in both directions.
    pub fn to_level(self) -> Level {
        match self {
            Severity::Fatal | Severity::Error => Level::Error,
            Severity::Warning => Level::Warn,
            Severity::Info => Level::Info,
            Severity::Debug0 => Level::Debug,
            Severity::Debug1 | Severity::Debug2 | Severity::Debug3 => Level::Trace,
        }
    }

    /// Mapping from a `log` facade level back onto this scale.
    pub fn from_level(level: Level) -> Self {
        match level {
            Level::Error => Severity::Error,
            Level::Warn => Severity::Warning,
            Level::Info => Severity::Info,
            Level::Debug => Severity::Debug0,
            Level::Trace => Severity::Debug1,
        }
    }

    /// The `log` facade filter admitting exactly the severities this
    /// threshold admits.
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            Severity::Fatal | Severity::Error => LevelFilter::Error,
            Severity::Warning => LevelFilter::Warn,
            Severity::Info => LevelFilter::Info,
            Severity::Debug0 => LevelFilter::Debug,
            Severity::Debug1 | Severity::Debug2 | Severity::Debug3 => LevelFilter::Trace,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSeverityError(String);

impl fmt::Display for ParseSeverityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown severity: {:?}", self.0)
    }
}

impl std::error::Error for ParseSeverityError {}

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "FATAL" => Ok(Severity::Fatal),
            "ERROR" => Ok(Severity::Error),
            "WARNING" | "WARN" => Ok(Severity::Warning),
            "INFO" => Ok(Severity::Info),
            "DEBUG" | "DEBUG0" => Ok(Severity::Debug0),
            "DEBUG1" => Ok(Severity::Debug1),
            "DEBUG2" => Ok(Severity::Debug2),
            "DEBUG3" => Ok(Severity::Debug3),
            _ => Err(ParseSeverityError(s.into())),
        }
    }
}
