//! `GATELOG_LEVEL` drives the default threshold. Own binary: the env config
//! is read once per process, so this must not share a process with tests
//! that rely on the unset default.

use gatelog::{Severity, logger_config};

#[test]
fn env_level_becomes_the_default_threshold() {
    unsafe { std::env::set_var("GATELOG_LEVEL", "debug2") };
    let logger = logger_config().build().unwrap();
    assert_eq!(logger.threshold(), Severity::Debug2);
}
