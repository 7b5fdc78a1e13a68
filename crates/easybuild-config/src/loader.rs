//! Configuration Loader
//!
//! Loads the optional project config and applies environment overrides:
//! 1. Built-in defaults - lowest priority
//! 2. Project config (`<root>/easybuild.toml`) - overrides defaults
//! 3. Environment variables (EASYBUILD_*) - overrides project

use crate::project::{FailurePolicy, MatchMode, ProjectConfig};
use crate::ConfigResult;
use std::env;
use std::path::{Path, PathBuf};

/// Name of the project configuration file
pub const CONFIG_FILE_NAME: &str = "easybuild.toml";

/// Environment variable overriding `build.exclude_match`
pub const ENV_EXCLUDE_MATCH: &str = "EASYBUILD_EXCLUDE_MATCH";
/// Environment variable overriding `build.on_compiler_failure`
pub const ENV_ON_FAILURE: &str = "EASYBUILD_ON_FAILURE";
/// Environment variable overriding `toolchain.launcher`
pub const ENV_LAUNCHER: &str = "EASYBUILD_LAUNCHER";

/// Configuration loader
#[derive(Debug, Default)]
pub struct ConfigLoader {
    /// Path of the file the last load read, if any
    loaded_from: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        Self { loaded_from: None }
    }

    /// Load configuration for the project rooted at `root`
    ///
    /// A missing `easybuild.toml` is not an error; the defaults apply.
    pub fn load_from_root(&mut self, root: &Path) -> ConfigResult<ProjectConfig> {
        let config_path = root.join(CONFIG_FILE_NAME);

        let config = if config_path.is_file() {
            self.loaded_from = Some(config_path.clone());
            ProjectConfig::load_from_file(&config_path)?
        } else {
            self.loaded_from = None;
            ProjectConfig::default()
        };

        self.apply_env_overrides(config)
    }

    /// The file the last successful load read, if any
    pub fn loaded_from(&self) -> Option<&Path> {
        self.loaded_from.as_deref()
    }

    /// Apply environment variable overrides to project config
    fn apply_env_overrides(&self, mut config: ProjectConfig) -> ConfigResult<ProjectConfig> {
        if let Some(mode) = env_value(ENV_EXCLUDE_MATCH) {
            config.build_mut().exclude_match = Some(mode.parse::<MatchMode>()?);
        }

        if let Some(policy) = env_value(ENV_ON_FAILURE) {
            config.build_mut().on_compiler_failure = Some(policy.parse::<FailurePolicy>()?);
        }

        if let Some(launcher) = env_value(ENV_LAUNCHER) {
            config.toolchain_mut().launcher = Some(launcher);
        }

        config.validate()?;
        Ok(config)
    }
}

/// Read a non-empty environment variable
fn env_value(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    fn clear_env() {
        env::remove_var(ENV_EXCLUDE_MATCH);
        env::remove_var(ENV_ON_FAILURE);
        env::remove_var(ENV_LAUNCHER);
    }

    #[test]
    #[serial]
    fn test_missing_file_yields_defaults() {
        clear_env();
        let temp_dir = TempDir::new().unwrap();

        let mut loader = ConfigLoader::new();
        let config = loader.load_from_root(temp_dir.path()).unwrap();

        assert_eq!(config, ProjectConfig::default());
        assert!(loader.loaded_from().is_none());
    }

    #[test]
    #[serial]
    fn test_loads_project_file() {
        clear_env();
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            "[build]\nexclude = [\"vendor\"]\n",
        )
        .unwrap();

        let mut loader = ConfigLoader::new();
        let config = loader.load_from_root(temp_dir.path()).unwrap();

        assert_eq!(config.exclude(), Some(&["vendor".to_string()][..]));
        assert_eq!(
            loader.loaded_from(),
            Some(temp_dir.path().join(CONFIG_FILE_NAME).as_path())
        );
    }

    #[test]
    #[serial]
    fn test_env_override_failure_policy() {
        clear_env();
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            "[build]\non_compiler_failure = \"finalize\"\n",
        )
        .unwrap();

        env::set_var(ENV_ON_FAILURE, "abort");
        let config = ConfigLoader::new().load_from_root(temp_dir.path());
        clear_env();

        assert_eq!(
            config.unwrap().on_compiler_failure(),
            Some(FailurePolicy::Abort)
        );
    }

    #[test]
    #[serial]
    fn test_env_override_invalid_value() {
        clear_env();
        let temp_dir = TempDir::new().unwrap();

        env::set_var(ENV_EXCLUDE_MATCH, "regex");
        let result = ConfigLoader::new().load_from_root(temp_dir.path());
        clear_env();

        assert!(result.is_err());
    }

    #[test]
    #[serial]
    fn test_blank_env_value_ignored() {
        clear_env();
        let temp_dir = TempDir::new().unwrap();

        env::set_var(ENV_LAUNCHER, "   ");
        let config = ConfigLoader::new().load_from_root(temp_dir.path());
        clear_env();

        assert_eq!(config.unwrap().launcher(), None);
    }
}
