//! An unparsable `GATELOG_LEVEL` falls back to WARNING instead of failing.
//! Own binary for the same reason as env_threshold.rs: the env config is
//! read once per process.

use gatelog::{Severity, logger_config};

#[test]
fn unparsable_env_level_falls_back_to_warning() {
    unsafe { std::env::set_var("GATELOG_LEVEL", "ear-splitting") };
    let logger = logger_config().build().unwrap();
    assert_eq!(logger.threshold(), Severity::Warning);
}
