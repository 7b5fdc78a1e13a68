//! Project Configuration (easybuild.toml)
//!
//! Handles the optional project-level configuration stored in `easybuild.toml`
//! at the project root.

use crate::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Project configuration from easybuild.toml
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Build configuration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build: Option<BuildSection>,

    /// Toolchain configuration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toolchain: Option<ToolchainSection>,
}

/// `[build]` section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct BuildSection {
    /// Exclusion patterns (default: lib, testing, deps)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Vec<String>>,

    /// How exclusion patterns are matched (default: substring)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_match: Option<MatchMode>,

    /// Source file extension without the dot (default: "js")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_extension: Option<String>,

    /// What to do when the compiler exits non-zero (default: finalize)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_compiler_failure: Option<FailurePolicy>,

    /// Where the artifact and build log are written, relative to the
    /// working directory (default: ".")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
}

/// `[toolchain]` section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ToolchainSection {
    /// Interpreter used to execute the dependency analyzer script
    #[serde(skip_serializing_if = "Option::is_none")]
    pub launcher: Option<String>,
}

/// Exclusion matching policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Pattern occurs anywhere in the absolute path, case-sensitive.
    ///
    /// A pattern also matches inside file names: `lib` excludes
    /// `src/library.js`.
    Substring,
    /// Pattern equals a whole component of the path relative to the project root
    Segment,
}

#[allow(clippy::derivable_impls)]
impl Default for MatchMode {
    fn default() -> Self {
        Self::Substring
    }
}

impl MatchMode {
    /// Get the mode name as written in easybuild.toml
    pub fn name(&self) -> &'static str {
        match self {
            Self::Substring => "substring",
            Self::Segment => "segment",
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MatchMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "substring" => Ok(Self::Substring),
            "segment" => Ok(Self::Segment),
            other => Err(ConfigError::InvalidValue {
                field: "build.exclude_match".to_string(),
                reason: format!("expected 'substring' or 'segment', got '{}'", other),
            }),
        }
    }
}

/// Behavior when the compiler reports a non-zero exit status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Record the diagnostics and stamp whatever the compiler produced
    #[serde(alias = "continue")]
    Finalize,
    /// Record the diagnostics and stop before finalizing the artifact
    #[serde(alias = "halt")]
    Abort,
}

#[allow(clippy::derivable_impls)]
impl Default for FailurePolicy {
    fn default() -> Self {
        Self::Finalize
    }
}

impl FailurePolicy {
    /// Get the policy name as written in easybuild.toml
    pub fn name(&self) -> &'static str {
        match self {
            Self::Finalize => "finalize",
            Self::Abort => "abort",
        }
    }

    /// Whether a failed compile should stop the pipeline
    pub fn halts_on_failure(&self) -> bool {
        matches!(self, Self::Abort)
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FailurePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "finalize" | "continue" => Ok(Self::Finalize),
            "abort" | "halt" => Ok(Self::Abort),
            other => Err(ConfigError::InvalidValue {
                field: "build.on_compiler_failure".to_string(),
                reason: format!("expected 'finalize' or 'abort', got '{}'", other),
            }),
        }
    }
}

impl ProjectConfig {
    /// Load project configuration from a file
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(path, &content)
    }

    /// Parse project configuration; `path` is only used for error reporting
    pub fn parse(path: &Path, content: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::TomlParseError {
            file: path.to_path_buf(),
            error: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the project configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(build) = &self.build {
            if let Some(patterns) = &build.exclude {
                // An empty pattern is a substring of every path
                if patterns.iter().any(|p| p.is_empty()) {
                    return Err(ConfigError::InvalidValue {
                        field: "build.exclude".to_string(),
                        reason: "patterns cannot be empty".to_string(),
                    });
                }

                // A segment pattern is compared against one path component
                if build.exclude_match == Some(MatchMode::Segment) {
                    if let Some(p) = patterns.iter().find(|p| p.contains(['/', '\\'])) {
                        return Err(ConfigError::ValidationError(format!(
                            "exclude pattern '{}' spans several path segments \
                             and can never match in segment mode",
                            p
                        )));
                    }
                }
            }

            if let Some(ext) = &build.source_extension {
                validate_extension(ext)?;
            }
        }

        if let Some(launcher) = self.launcher() {
            if launcher.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "toolchain.launcher".to_string(),
                    reason: "launcher cannot be empty".to_string(),
                });
            }
        }

        Ok(())
    }

    /// Configured exclusion patterns
    pub fn exclude(&self) -> Option<&[String]> {
        self.build.as_ref().and_then(|b| b.exclude.as_deref())
    }

    /// Configured exclusion match mode
    pub fn exclude_match(&self) -> Option<MatchMode> {
        self.build.as_ref().and_then(|b| b.exclude_match)
    }

    /// Configured source extension
    pub fn source_extension(&self) -> Option<&str> {
        self.build
            .as_ref()
            .and_then(|b| b.source_extension.as_deref())
    }

    /// Configured compiler failure policy
    pub fn on_compiler_failure(&self) -> Option<FailurePolicy> {
        self.build.as_ref().and_then(|b| b.on_compiler_failure)
    }

    /// Configured output directory
    pub fn output_dir(&self) -> Option<&Path> {
        self.build.as_ref().and_then(|b| b.output_dir.as_deref())
    }

    /// Configured analyzer launcher
    pub fn launcher(&self) -> Option<&str> {
        self.toolchain
            .as_ref()
            .and_then(|t| t.launcher.as_deref())
    }

    pub(crate) fn build_mut(&mut self) -> &mut BuildSection {
        self.build.get_or_insert_with(BuildSection::default)
    }

    pub(crate) fn toolchain_mut(&mut self) -> &mut ToolchainSection {
        self.toolchain.get_or_insert_with(ToolchainSection::default)
    }
}

fn validate_extension(ext: &str) -> ConfigResult<()> {
    let reason = if ext.is_empty() {
        Some("extension cannot be empty")
    } else if ext.starts_with('.') {
        Some("extension is written without the leading dot")
    } else if ext.contains(['/', '\\']) {
        Some("extension cannot contain path separators")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(ConfigError::InvalidValue {
            field: "build.source_extension".to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}
