//! Compiler invocation assembly
//!
//! The invocation is fully determined by the source list and the layout.
//! There is no way to add, drop or override compiler flags.

use crate::exclusion::SourceFileList;
use crate::layout::ProjectLayout;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Input file flag, repeated once per source
pub const INPUT_FLAG: &str = "-i";
/// Flag forwarding one option to the compiler
pub const COMPILER_FLAG: &str = "-f";
/// Output mode producing one concatenated, optimized artifact
pub const OUTPUT_MODE: &str = "--output_mode=compiled";
/// Flag preceding the compiler artifact path
pub const COMPILER_JAR_FLAG: &str = "--compiler_jar";

/// Options forwarded to the optimizing compiler, in order
pub const COMPILER_OPTIONS: [&str; 5] = [
    "--warning_level=VERBOSE",
    "--compilation_level=ADVANCED_OPTIMIZATIONS",
    "--jscomp_warning=missingProperties",
    "--jscomp_warning=checkTypes",
    "--define=goog.DEBUG=false",
];

/// Fully assembled compiler invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildCommand {
    program: OsString,
    args: Vec<OsString>,
    working_dir: PathBuf,
}

impl BuildCommand {
    /// Assemble the invocation for `files`
    ///
    /// With a `launcher` the analyzer path becomes its first argument.
    pub fn assemble(
        files: &SourceFileList,
        layout: &ProjectLayout,
        launcher: Option<&str>,
    ) -> Self {
        let analyzer = layout.dependency_analyzer().as_os_str().to_os_string();

        let (program, mut args) = match launcher {
            Some(launcher) => (OsString::from(launcher), vec![analyzer]),
            None => (analyzer, Vec::new()),
        };

        for file in files {
            args.push(INPUT_FLAG.into());
            args.push(file.as_os_str().to_os_string());
        }

        let mut root = OsString::from("--root=");
        root.push(layout.project_root());
        args.push(root);

        args.push(OUTPUT_MODE.into());

        args.push(COMPILER_JAR_FLAG.into());
        args.push(layout.compiler_jar().as_os_str().to_os_string());

        for option in COMPILER_OPTIONS {
            args.push(COMPILER_FLAG.into());
            args.push(option.into());
        }

        Self {
            program,
            args,
            working_dir: layout.project_root().to_path_buf(),
        }
    }

    /// Program executed
    pub fn program(&self) -> &OsStr {
        &self.program
    }

    /// Arguments after the program
    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// Directory the compiler runs in
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Input files, in the order they are passed
    pub fn inputs(&self) -> impl Iterator<Item = &Path> + '_ {
        self.args
            .windows(2)
            .filter(|pair| pair[0] == INPUT_FLAG)
            .map(|pair| Path::new(&pair[1]))
    }

    /// Options forwarded with `-f`, in order
    pub fn compiler_options(&self) -> impl Iterator<Item = &OsStr> + '_ {
        self.args
            .windows(2)
            .filter(|pair| pair[0] == COMPILER_FLAG)
            .map(|pair| pair[1].as_os_str())
    }

    /// Process builder for this invocation; stdio is left to the caller
    pub fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args).current_dir(&self.working_dir);
        command
    }
}

impl fmt::Display for BuildCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.to_string_lossy())?;
        for arg in &self.args {
            let arg = arg.to_string_lossy();
            if arg.contains(char::is_whitespace) {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}
