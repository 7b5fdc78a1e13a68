//! Release build pipeline
//!
//! Strictly linear: `Init → Scanning → Filtering → Assembling → Compiling →
//! Logging → Finalizing → Done`. No stage is retried and any error ends the
//! run; files written by earlier stages stay on disk.

use crate::build_log::BuildLog;
use crate::clock::{Clock, SystemClock};
use crate::command::BuildCommand;
use crate::error::{BuildError, BuildResult};
use crate::exclusion::SourceFileList;
use crate::finalizer;
use crate::layout::ProjectLayout;
use crate::output::BuildProgress;
use crate::runner::{CompileOutcome, DiagnosticDisplay, PlainDisplay, ProcessRunner};
use crate::scanner::SourceScanner;
use crate::settings::BuildSettings;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Pipeline states, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Init,
    Scanning,
    Filtering,
    Assembling,
    Compiling,
    Logging,
    Finalizing,
    Done,
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Scanning => "scanning",
            Self::Filtering => "filtering",
            Self::Assembling => "assembling",
            Self::Compiling => "compiling",
            Self::Logging => "logging",
            Self::Finalizing => "finalizing",
            Self::Done => "done",
        }
    }

    /// All stages in execution order
    pub fn all() -> [Stage; 8] {
        [
            Self::Init,
            Self::Scanning,
            Self::Filtering,
            Self::Assembling,
            Self::Compiling,
            Self::Logging,
            Self::Finalizing,
            Self::Done,
        ]
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a completed run produced
#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    /// Final, banner-stamped artifact
    pub artifact: PathBuf,
    /// Persisted build log
    pub build_log: PathBuf,
    /// Source files found by the scan
    pub scanned: usize,
    /// Files removed by exclusion patterns
    pub excluded: usize,
    /// Files passed to the compiler
    pub compiled: usize,
    /// Compiler exit information
    pub outcome: CompileOutcome,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Elapsed seconds between start and finish
    pub elapsed: f64,
}

/// Sequenced release build
pub struct Pipeline {
    layout: ProjectLayout,
    settings: BuildSettings,
    clock: Box<dyn Clock>,
    display: Box<dyn DiagnosticDisplay>,
    progress: BuildProgress,
    stage: Stage,
}

impl Pipeline {
    /// Create a pipeline with the wall clock and plain stderr diagnostics
    pub fn new(layout: ProjectLayout, settings: BuildSettings) -> Self {
        Self {
            layout,
            settings,
            clock: Box::new(SystemClock),
            display: Box::new(PlainDisplay),
            progress: BuildProgress::default(),
            stage: Stage::Init,
        }
    }

    /// Use a different time source
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Use a different diagnostic display
    pub fn with_display(mut self, display: impl DiagnosticDisplay + 'static) -> Self {
        self.display = Box::new(display);
        self
    }

    /// Use a different progress reporter
    pub fn with_progress(mut self, progress: BuildProgress) -> Self {
        self.progress = progress;
        self
    }

    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    pub fn settings(&self) -> &BuildSettings {
        &self.settings
    }

    /// Last stage entered
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Run every stage once
    pub fn run(&mut self) -> BuildResult<BuildReport> {
        self.enter(Stage::Init);
        let mut log = BuildLog::new(self.clock.now());
        let root = self.layout.project_root().to_path_buf();
        self.progress.detail(format_args!("project root: {}", root.display()));

        self.enter(Stage::Scanning);
        let scanner = SourceScanner::new(&root, self.settings.source_extension.as_str());
        let candidates: Vec<PathBuf> = scanner.scan().collect();
        let scanned = candidates.len();
        self.progress
            .detail(format_args!("{} .{} files found", scanned, self.settings.source_extension));

        self.enter(Stage::Filtering);
        let files: SourceFileList = self.settings.exclusions.filter(&root, candidates).collect();
        let excluded = scanned - files.len();
        self.progress.detail(format_args!(
            "{} excluded by {:?} ({} match)",
            excluded,
            self.settings.exclusions.patterns(),
            self.settings.exclusions.mode()
        ));
        if files.is_empty() {
            self.progress.warn("no source files left after exclusion");
        }

        self.enter(Stage::Assembling);
        let command =
            BuildCommand::assemble(&files, &self.layout, self.settings.launcher.as_deref());
        self.progress.detail(&command);

        self.enter(Stage::Compiling);
        let output_dir = &self.settings.output_dir;
        fs::create_dir_all(output_dir).map_err(|e| BuildError::io(output_dir, e))?;
        let artifact = self.settings.artifact_path();
        let outcome = ProcessRunner::new(self.display.as_ref()).run(&command, &artifact, &mut log)?;

        self.enter(Stage::Logging);
        log.finish(self.clock.now());
        let build_log = self.settings.build_log_path();
        log.write_to(&build_log)?;
        self.progress.detail(format_args!(
            "{} written ({:.3}s)",
            build_log.display(),
            log.elapsed().as_secs_f64()
        ));

        if !outcome.success {
            if self.settings.failure_policy.halts_on_failure() {
                return Err(BuildError::CompilerFailed {
                    exit_code: outcome.exit_code,
                });
            }
            self.progress.warn(format_args!(
                "compiler exited with {}; finalizing anyway (see {})",
                outcome
                    .exit_code
                    .map(|c| format!("status {}", c))
                    .unwrap_or_else(|| "a signal".to_string()),
                build_log.display()
            ));
        }

        self.enter(Stage::Finalizing);
        finalizer::finalize(&artifact)?;

        self.enter(Stage::Done);
        let finished_at = log.finished_at().unwrap_or_else(|| log.started_at());
        Ok(BuildReport {
            artifact,
            build_log,
            scanned,
            excluded,
            compiled: files.len(),
            outcome,
            started_at: log.started_at(),
            finished_at,
            elapsed: log.elapsed().as_secs_f64(),
        })
    }

    fn enter(&mut self, stage: Stage) {
        self.stage = stage;
        self.progress.stage(stage);
    }
}
