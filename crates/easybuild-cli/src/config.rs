//! CLI presentation settings from environment variables
//!
//! Only output presentation lives here; build behavior comes from
//! `easybuild.toml` and the `EASYBUILD_*` overrides read by `easybuild-config`.

use std::env;

/// CLI configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Default to JSON output (EASYBUILD_DIAGNOSTICS=json)
    pub default_json: bool,
    /// Disable colored output (EASYBUILD_NO_COLOR=1 or NO_COLOR=1)
    pub no_color: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            default_json: env::var("EASYBUILD_DIAGNOSTICS")
                .map(|v| v.to_lowercase() == "json")
                .unwrap_or(false),
            no_color: env::var_os("EASYBUILD_NO_COLOR").is_some()
                || env::var_os("NO_COLOR").is_some(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
