//! easybuild release pipeline
//!
//! Compiles a source library into one optimized artifact with an external
//! compiler:
//! - Project layout resolution from the tool location
//! - Source discovery and exclusion filtering
//! - Compiler invocation assembly with a fixed option set
//! - Compiler execution with diagnostic capture and a timed build log
//! - License banner stamping of the artifact
//!
//! ```no_run
//! use easybuild::{BuildSettings, Pipeline, ProjectLayout};
//!
//! let layout = ProjectLayout::from_env()?;
//! let report = Pipeline::new(layout, BuildSettings::default()).run()?;
//! println!(">> OUTPUT: {}", report.artifact.display());
//! # Ok::<(), easybuild::BuildError>(())
//! ```

pub mod build_log;
pub mod clock;
pub mod command;
pub mod error;
pub mod exclusion;
pub mod finalizer;
pub mod layout;
pub mod output;
pub mod pipeline;
pub mod runner;
pub mod scanner;
pub mod settings;

// Re-export main types
pub use build_log::BuildLog;
pub use clock::{Clock, ScriptedClock, SystemClock};
pub use command::{BuildCommand, COMPILER_OPTIONS};
pub use error::{BuildError, BuildResult};
pub use exclusion::{ExclusionSet, SourceFileList, DEFAULT_EXCLUSIONS};
pub use finalizer::{finalize, BANNER};
pub use layout::ProjectLayout;
pub use output::{BuildProgress, OutputMode};
pub use pipeline::{BuildReport, Pipeline, Stage};
pub use runner::{CompileOutcome, DiagnosticDisplay, PlainDisplay, ProcessRunner, SilentDisplay};
pub use scanner::SourceScanner;
pub use settings::{BuildSettings, ARTIFACT_NAME, BUILD_LOG_NAME};

// Re-export configuration types for convenience
pub use easybuild_config::{ConfigLoader, FailurePolicy, MatchMode, ProjectConfig};
