//! easybuild configuration
//!
//! Every setting has a built-in default that reproduces the fixed release
//! build. A project may carry an optional `easybuild.toml` next to its sources
//! to pick the opt-in behaviors (segment-aware exclusion, aborting on compiler
//! failure, an interpreter for the dependency analyzer).
//!
//! # Configuration Hierarchy
//!
//! Later sources override earlier ones:
//! 1. Built-in defaults
//! 2. Project config (`<project root>/easybuild.toml`)
//! 3. Environment variables (`EASYBUILD_*`)
//!
//! The compiler flag set and the artifact names are not configurable at any
//! layer.
//!
//! # Example
//!
//! ```no_run
//! use easybuild_config::ConfigLoader;
//! use std::path::Path;
//!
//! let config = ConfigLoader::new().load_from_root(Path::new(".")).unwrap();
//! ```

pub mod loader;
pub mod project;

use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid TOML syntax in {file}: {error}")]
    TomlParseError {
        file: PathBuf,
        error: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    ValidationError(String),

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

pub use loader::{ConfigLoader, CONFIG_FILE_NAME};
pub use project::{BuildSection, FailurePolicy, MatchMode, ProjectConfig, ToolchainSection};
