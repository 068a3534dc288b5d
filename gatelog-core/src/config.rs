use std::sync::LazyLock;

use derive_from_env::FromEnv;

#[derive(FromEnv)]
#[from_env(prefix = "GATELOG")]
#[allow(non_snake_case)]
pub struct GatelogConfig {
    /// Default threshold when the configuration does not set one.
    /// Unparsable values fall back to WARNING at the use site.
    #[from_env(default = "WARNING")]
    pub LEVEL: String,
}

pub static GATELOG_CONFIG: LazyLock<GatelogConfig> =
    LazyLock::new(|| GatelogConfig::from_env().unwrap());
