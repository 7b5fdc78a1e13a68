//! Build command - resolve the project, run the pipeline, report the result

use crate::reporter::{self, ColoredDisplay};
use anyhow::{Context, Result};
use easybuild::{BuildProgress, BuildSettings, OutputMode, Pipeline, ProjectLayout, SilentDisplay};
use easybuild_config::ConfigLoader;

/// Build command arguments
#[derive(Default)]
pub struct BuildArgs {
    /// Verbose output
    pub verbose: bool,
    /// Quiet output (errors only)
    pub quiet: bool,
    /// JSON output
    pub json: bool,
    /// Plain diagnostics
    pub no_color: bool,
}

/// Run the build
pub fn run(args: BuildArgs) -> Result<()> {
    if args.no_color {
        colored::control::set_override(false);
    }

    let output_mode = determine_output_mode(&args);
    let progress = BuildProgress::new(output_mode);

    let layout = ProjectLayout::from_env().context("Failed to resolve project layout")?;

    let mut loader = ConfigLoader::new();
    let settings = BuildSettings::load(layout.project_root(), &mut loader)
        .context("Failed to load easybuild.toml")?;

    if let Some(path) = loader.loaded_from() {
        progress.detail(format_args!("config: {}", path.display()));
    }

    let pipeline = Pipeline::new(layout, settings).with_progress(progress);

    let mut pipeline = if args.quiet {
        pipeline.with_display(SilentDisplay)
    } else {
        pipeline.with_display(ColoredDisplay::new(!args.no_color))
    };

    let report = pipeline.run().context("Build failed")?;

    match output_mode {
        OutputMode::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&report).context("Failed to encode build report")?
            );
        }
        OutputMode::Quiet => {}
        OutputMode::Normal | OutputMode::Verbose => {
            reporter::print_summary(&report, output_mode.is_verbose());
        }
    }

    Ok(())
}

/// Determine output mode from arguments
fn determine_output_mode(args: &BuildArgs) -> OutputMode {
    if args.json {
        OutputMode::Json
    } else if args.quiet {
        OutputMode::Quiet
    } else if args.verbose {
        OutputMode::Verbose
    } else {
        OutputMode::Normal
    }
}
