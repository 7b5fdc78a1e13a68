//! Typed build settings
//!
//! Built-in defaults reproduce the fixed release build; an
//! [`easybuild_config::ProjectConfig`] can only select among the opt-in
//! behaviors. Artifact names and compiler options never come from here.

use crate::error::BuildResult;
use crate::exclusion::ExclusionSet;
use easybuild_config::{ConfigLoader, FailurePolicy, ProjectConfig};
use std::path::{Path, PathBuf};

/// Compiled artifact file name
pub const ARTIFACT_NAME: &str = "xtk.js";
/// Persisted build log file name
pub const BUILD_LOG_NAME: &str = "xtk_build.log";
/// Extension of scanned source files
pub const DEFAULT_SOURCE_EXTENSION: &str = "js";

/// Settings for one pipeline run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSettings {
    /// Paths kept out of the build
    pub exclusions: ExclusionSet,
    /// Scanned extension, without the dot
    pub source_extension: String,
    /// Interpreter for the dependency analyzer
    pub launcher: Option<String>,
    /// Behavior on a failed compile
    pub failure_policy: FailurePolicy,
    /// Directory receiving the artifact and the build log
    pub output_dir: PathBuf,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            exclusions: ExclusionSet::default(),
            source_extension: DEFAULT_SOURCE_EXTENSION.to_string(),
            launcher: None,
            failure_policy: FailurePolicy::default(),
            output_dir: PathBuf::from("."),
        }
    }
}

impl BuildSettings {
    /// Settings for the project at `root`, read through `loader`
    ///
    /// `easybuild.toml` is optional; environment overrides apply either way.
    pub fn load(root: &Path, loader: &mut ConfigLoader) -> BuildResult<Self> {
        let config = loader.load_from_root(root)?;
        Ok(Self::from_config(&config))
    }

    /// Defaults overlaid with a loaded project configuration
    pub fn from_config(config: &ProjectConfig) -> Self {
        let defaults = Self::default();

        let mode = config
            .exclude_match()
            .unwrap_or(defaults.exclusions.mode());
        let exclusions = match config.exclude() {
            Some(patterns) => ExclusionSet::new(patterns.iter().cloned(), mode),
            None => defaults.exclusions.with_mode(mode),
        };

        Self {
            exclusions,
            source_extension: config
                .source_extension()
                .map(str::to_string)
                .unwrap_or(defaults.source_extension),
            launcher: config.launcher().map(str::to_string),
            failure_policy: config
                .on_compiler_failure()
                .unwrap_or(defaults.failure_policy),
            output_dir: config
                .output_dir()
                .map(Path::to_path_buf)
                .unwrap_or(defaults.output_dir),
        }
    }

    /// Set the output directory
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Set the exclusion set
    pub fn with_exclusions(mut self, exclusions: ExclusionSet) -> Self {
        self.exclusions = exclusions;
        self
    }

    /// Set the source extension
    pub fn with_source_extension(mut self, extension: impl Into<String>) -> Self {
        self.source_extension = extension.into();
        self
    }

    /// Set the analyzer launcher
    pub fn with_launcher(mut self, launcher: impl Into<String>) -> Self {
        self.launcher = Some(launcher.into());
        self
    }

    /// Set the failure policy
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Location of the compiled artifact
    pub fn artifact_path(&self) -> PathBuf {
        self.output_dir.join(ARTIFACT_NAME)
    }

    /// Location of the persisted build log
    pub fn build_log_path(&self) -> PathBuf {
        self.output_dir.join(BUILD_LOG_NAME)
    }
}
