//! Project layout resolution
//!
//! The build tool lives one directory below the project root (the `utils/`
//! directory of the library). Everything else is derived from that location.

use crate::error::{BuildError, BuildResult};
use std::env;
use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

/// Environment variable naming the tool directory explicitly
pub const ENV_UTILS_DIR: &str = "EASYBUILD_UTILS_DIR";

/// Compiler artifact, relative to the project root
pub const COMPILER_JAR: &str = "lib/closure-library/compiler-latest/compiler.jar";

/// Dependency analyzer (the program actually executed), relative to the project root
pub const DEPENDENCY_ANALYZER: &str = "lib/closure-library/closure/bin/build/closurebuilder.py";

/// Absolute locations used by a build, resolved once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    tool_root: PathBuf,
    compiler_jar: PathBuf,
    dependency_analyzer: PathBuf,
    project_root: PathBuf,
}

impl ProjectLayout {
    /// Resolve from the path of the invoked program (a file inside the tool directory)
    pub fn from_invocation(invocation: &Path) -> BuildResult<Self> {
        let tool_root = invocation.parent().ok_or_else(|| {
            BuildError::configuration(format!(
                "invocation path '{}' has no parent directory",
                invocation.display()
            ))
        })?;
        Self::from_tool_dir(tool_root)
    }

    /// Resolve from the tool directory itself
    pub fn from_tool_dir(tool_dir: &Path) -> BuildResult<Self> {
        let tool_root = absolutize(tool_dir)?;
        let project_root = tool_root
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| {
                BuildError::configuration(format!(
                    "tool directory '{}' has no parent to use as project root",
                    tool_root.display()
                ))
            })?;

        Ok(Self {
            compiler_jar: normalize(&project_root.join(COMPILER_JAR)),
            dependency_analyzer: normalize(&project_root.join(DEPENDENCY_ANALYZER)),
            tool_root,
            project_root,
        })
    }

    /// Resolve from the environment: `EASYBUILD_UTILS_DIR` if set, otherwise
    /// the path the program was invoked by
    pub fn from_env() -> BuildResult<Self> {
        match env::var_os(ENV_UTILS_DIR).filter(|v| !v.is_empty()) {
            Some(dir) => Self::from_tool_dir(Path::new(&dir)),
            None => Self::from_argv0(env::args_os().next().as_deref()),
        }
    }

    /// Resolve from the program's `argv[0]`
    ///
    /// A path is used as given, so a symlink placed in a project's tool
    /// directory resolves to that project. A bare name (found through `PATH`)
    /// falls back to the location of the running executable.
    pub fn from_argv0(argv0: Option<&OsStr>) -> BuildResult<Self> {
        let invoked = argv0.map(Path::new).filter(|p| has_directory(p));
        match invoked {
            Some(path) => Self::from_invocation(path),
            None => {
                let exe = env::current_exe().map_err(|e| {
                    BuildError::configuration(format!("cannot locate running executable: {}", e))
                })?;
                Self::from_invocation(&exe)
            }
        }
    }

    /// Directory containing the build tool
    pub fn tool_root(&self) -> &Path {
        &self.tool_root
    }

    /// Compiler artifact handed to the analyzer
    pub fn compiler_jar(&self) -> &Path {
        &self.compiler_jar
    }

    /// Dependency analyzer executable
    pub fn dependency_analyzer(&self) -> &Path {
        &self.dependency_analyzer
    }

    /// Project root scanned for sources
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }
}

/// Whether `path` names a directory part, not just a file name
fn has_directory(path: &Path) -> bool {
    path.parent().is_some_and(|p| !p.as_os_str().is_empty())
}

/// Make `path` absolute against the current directory and normalize it
fn absolutize(path: &Path) -> BuildResult<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        let cwd = env::current_dir().map_err(|e| {
            BuildError::configuration(format!("cannot determine current directory: {}", e))
        })?;
        cwd.join(path)
    };
    Ok(normalize(&joined))
}

/// Lexically normalize a path: drop `.` components and fold `..` into the
/// preceding component. Symlinks are not resolved.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = matches!(out.components().next_back(), Some(Component::Normal(_)))
                    && out.pop();
                if !popped && !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}
