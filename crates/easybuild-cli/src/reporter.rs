//! Terminal rendering of diagnostics and build results

use colored::*;
use easybuild::{BuildReport, DiagnosticDisplay};
use std::path::Path;

/// Kind of a compiler diagnostic line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Error,
    Warning,
    /// The compiler's closing "N error(s), M warning(s)" line
    Summary,
    Other,
}

/// Classify one line of compiler output
pub fn classify(line: &str) -> LineKind {
    if line.contains("error(s)") && line.contains("warning(s)") {
        LineKind::Summary
    } else if line.contains("ERROR") {
        LineKind::Error
    } else if line.contains("WARNING") {
        LineKind::Warning
    } else {
        LineKind::Other
    }
}

/// Writes compiler diagnostics to stderr, colored by severity
pub struct ColoredDisplay {
    color: bool,
}

impl ColoredDisplay {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn paint(&self, line: &str) -> String {
        if !self.color {
            return line.to_string();
        }
        match classify(line) {
            LineKind::Error => line.red().bold().to_string(),
            LineKind::Warning => line.yellow().to_string(),
            LineKind::Summary => line.bold().to_string(),
            LineKind::Other => line.to_string(),
        }
    }
}

impl DiagnosticDisplay for ColoredDisplay {
    fn show(&self, diagnostics: &str) {
        for line in diagnostics.lines() {
            eprintln!("{}", self.paint(line));
        }
    }
}

/// Artifact path as shown to the user; `./xtk.js` is shown as `xtk.js`
pub fn display_path(path: &Path) -> String {
    path.strip_prefix(".").unwrap_or(path).display().to_string()
}

/// Human-readable result
pub fn print_summary(report: &BuildReport, verbose: bool) {
    if verbose {
        let compiler = if report.outcome.success {
            "ok".green().to_string()
        } else {
            match report.outcome.exit_code {
                Some(code) => format!("exited with status {}", code).red().to_string(),
                None => "terminated by signal".red().to_string(),
            }
        };

        println!("\n{}", "=".repeat(60));
        println!("Build finished in {:.2}s", report.elapsed);
        println!("{}", "=".repeat(60));
        println!(
            "  Sources:  {} scanned, {} excluded, {} compiled",
            report.scanned, report.excluded, report.compiled
        );
        println!("  Compiler: {}", compiler);
        println!("  Log:      {}", display_path(&report.build_log));
        println!("{}", "=".repeat(60));
    }

    println!(">> OUTPUT: {}", display_path(&report.artifact));
}
