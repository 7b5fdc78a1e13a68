/// Build pipeline error types
use easybuild_config::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

pub type BuildResult<T> = Result<T, BuildError>;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Cannot resolve project layout: {0}")]
    Configuration(String),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to start compiler '{program}': {error}")]
    CompilerSpawn {
        program: String,
        error: std::io::Error,
    },

    #[error("Compiler exited with {}; artifact left unfinalized", describe_exit(.exit_code))]
    CompilerFailed { exit_code: Option<i32> },

    #[error("Artifact {path} cannot be opened: {error}")]
    ArtifactMissing {
        path: PathBuf,
        error: std::io::Error,
    },

    #[error("I/O error at {path}: {error}")]
    IoError {
        path: PathBuf,
        error: std::io::Error,
    },
}

impl BuildError {
    /// Create a layout resolution error
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration(reason.into())
    }

    /// Create an I/O error with path context
    pub fn io(path: impl Into<PathBuf>, error: std::io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            error,
        }
    }

    /// Create a compiler spawn error
    pub fn compiler_spawn(program: impl Into<String>, error: std::io::Error) -> Self {
        Self::CompilerSpawn {
            program: program.into(),
            error,
        }
    }

    /// Create an artifact missing error
    pub fn artifact_missing(path: impl Into<PathBuf>, error: std::io::Error) -> Self {
        Self::ArtifactMissing {
            path: path.into(),
            error,
        }
    }
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "no status (terminated by signal)".to_string(),
    }
}
