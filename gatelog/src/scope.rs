use gatelog_core::Severity;

use crate::handle::LoggerHandle;

/// Temporarily replaces the logger threshold for the enclosing scope: "log
/// everything during this subroutine" without permanently mutating the
/// configuration. The previous threshold is restored on drop, on every exit
/// path including panic unwind. Nested overrides compose when properly
/// nested (LIFO).
///
/// ```
/// use gatelog::{AlterLevel, Severity, logger_config};
///
/// let logger = logger_config().with_threshold(Severity::Warning).build().unwrap();
/// {
///     let _verbose = AlterLevel::new(&logger, Severity::Debug3);
///     assert!(logger.enabled(Severity::Debug2));
/// }
/// assert!(!logger.enabled(Severity::Info));
/// ```
#[must_use = "the threshold reverts when AlterLevel is dropped; bind it to a variable"]
pub struct AlterLevel<'a> {
    logger: &'a LoggerHandle,
    previous: Severity,
}

impl<'a> AlterLevel<'a> {
    pub fn new(logger: &'a LoggerHandle, threshold: Severity) -> Self {
        let previous = logger.threshold();
        logger.set_threshold(threshold);
        Self { logger, previous }
    }
}

impl Drop for AlterLevel<'_> {
    fn drop(&mut self) {
        self.logger.set_threshold(self.previous);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger_config;

    #[test]
    fn test_restores_previous_threshold() {
        let logger = logger_config()
            .with_threshold(Severity::Warning)
            .build()
            .unwrap();
        {
            let _scope = AlterLevel::new(&logger, Severity::Debug1);
            assert_eq!(logger.threshold(), Severity::Debug1);
        }
        assert_eq!(logger.threshold(), Severity::Warning);
    }

    #[test]
    fn test_nested_overrides_unwind_in_lifo_order() {
        let logger = logger_config()
            .with_threshold(Severity::Error)
            .build()
            .unwrap();
        {
            let _outer = AlterLevel::new(&logger, Severity::Info);
            {
                let _inner = AlterLevel::new(&logger, Severity::Debug3);
                assert_eq!(logger.threshold(), Severity::Debug3);
            }
            assert_eq!(logger.threshold(), Severity::Info);
        }
        assert_eq!(logger.threshold(), Severity::Error);
    }

    #[test]
    fn test_restores_across_panic_unwind() {
        let logger = logger_config()
            .with_threshold(Severity::Warning)
            .build()
            .unwrap();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _scope = AlterLevel::new(&logger, Severity::Debug3);
            panic!("early exit");
        }));
        assert!(result.is_err());
        assert_eq!(logger.threshold(), Severity::Warning);
    }
}
