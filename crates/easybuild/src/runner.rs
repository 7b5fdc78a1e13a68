//! Compiler execution and diagnostic capture

use crate::build_log::BuildLog;
use crate::command::BuildCommand;
use crate::error::{BuildError, BuildResult};
use serde::Serialize;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;
use std::process::Stdio;

/// Human-facing rendering of captured diagnostics
///
/// Display only; implementations must not influence the build.
pub trait DiagnosticDisplay {
    fn show(&self, diagnostics: &str);
}

/// Writes diagnostics to stderr unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainDisplay;

impl DiagnosticDisplay for PlainDisplay {
    fn show(&self, diagnostics: &str) {
        if !diagnostics.is_empty() {
            eprint!("{}", diagnostics);
        }
    }
}

/// Discards diagnostics
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentDisplay;

impl DiagnosticDisplay for SilentDisplay {
    fn show(&self, _diagnostics: &str) {}
}

/// Exit information of a compiler run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompileOutcome {
    /// Exit code; `None` when terminated by a signal
    pub exit_code: Option<i32>,
    /// Whether the compiler reported success
    pub success: bool,
}

/// Runs the compiler with stdout bound to the artifact
pub struct ProcessRunner<'a> {
    display: &'a dyn DiagnosticDisplay,
}

impl<'a> ProcessRunner<'a> {
    /// Create a runner reporting diagnostics through `display`
    pub fn new(display: &'a dyn DiagnosticDisplay) -> Self {
        Self { display }
    }

    /// Run `command`, writing its stdout to `artifact` and its stderr into `log`
    ///
    /// Blocks until the compiler exits. A non-zero exit is reported in the
    /// returned outcome, not as an error.
    pub fn run(
        &self,
        command: &BuildCommand,
        artifact: &Path,
        log: &mut BuildLog,
    ) -> BuildResult<CompileOutcome> {
        let output = File::create(artifact).map_err(|e| BuildError::io(artifact, e))?;

        // Anonymous temp file: removed by the OS once the last handle closes
        let mut stderr_file = tempfile::tempfile().map_err(|e| BuildError::io(temp_dir(), e))?;
        let stderr_handle = stderr_file
            .try_clone()
            .map_err(|e| BuildError::io(temp_dir(), e))?;

        let program = command.program().to_string_lossy().into_owned();
        let status = command
            .to_command()
            .stdin(Stdio::null())
            .stdout(Stdio::from(output))
            .stderr(Stdio::from(stderr_handle))
            .status()
            .map_err(|e| BuildError::compiler_spawn(&program, e))?;

        let diagnostics = read_all(&mut stderr_file)?;
        drop(stderr_file);

        self.display.show(&diagnostics);
        log.append_diagnostics(&diagnostics);

        Ok(CompileOutcome {
            exit_code: status.code(),
            success: status.success(),
        })
    }
}

fn read_all(file: &mut File) -> BuildResult<String> {
    let mut bytes = Vec::new();
    file.seek(SeekFrom::Start(0))
        .and_then(|_| file.read_to_end(&mut bytes))
        .map_err(|e| BuildError::io(temp_dir(), e))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn temp_dir() -> std::path::PathBuf {
    std::env::temp_dir()
}
