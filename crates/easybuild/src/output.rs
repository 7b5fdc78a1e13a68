//! Progress reporting and output formatting

use crate::pipeline::Stage;
use std::fmt::Display;

/// How much the pipeline reports while it runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Warnings and the final output line
    #[default]
    Normal,
    /// Every stage transition and its details
    Verbose,
    /// Errors only
    Quiet,
    /// Machine-readable summary only; warnings still go to stderr
    Json,
}

impl OutputMode {
    pub fn is_verbose(&self) -> bool {
        matches!(self, Self::Verbose)
    }

    pub fn shows_warnings(&self) -> bool {
        !matches!(self, Self::Quiet)
    }
}

/// Stage and warning reporter
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildProgress {
    mode: OutputMode,
}

impl BuildProgress {
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Report entering `stage`
    pub fn stage(&self, stage: Stage) {
        if self.mode.is_verbose() {
            println!("[{}]", stage.name());
        }
    }

    /// Report a detail of the current stage
    pub fn detail(&self, message: impl Display) {
        if self.mode.is_verbose() {
            println!("  {}", message);
        }
    }

    /// Report a condition that does not stop the build
    pub fn warn(&self, message: impl Display) {
        if self.mode.shows_warnings() {
            eprintln!("warning: {}", message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_mode_default() {
        assert_eq!(OutputMode::default(), OutputMode::Normal);
    }

    #[test]
    fn test_output_mode_flags() {
        assert!(OutputMode::Verbose.is_verbose());
        assert!(!OutputMode::Normal.is_verbose());
        assert!(OutputMode::Json.shows_warnings());
        assert!(!OutputMode::Quiet.shows_warnings());
    }
}
