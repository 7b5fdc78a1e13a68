use anyhow::Result;
use clap::Parser;

mod build;
mod config;
mod reporter;

/// One-command release build.
///
/// Scans the project one directory above the tool location for sources,
/// compiles them into a single optimized artifact with the closure compiler,
/// records a timed build log and stamps the artifact with the license banner.
/// Nothing about the build itself is configurable from the command line.
///
/// FILES WRITTEN (current directory):
///     xtk.js           Compiled, banner-stamped artifact
///     xtk_build.log    Start, end and elapsed seconds, then diagnostics
///
/// ENVIRONMENT VARIABLES:
///     EASYBUILD_UTILS_DIR      Tool directory (default: directory of the invoked path)
///     EASYBUILD_ON_FAILURE     'finalize' (default) or 'abort'
///     EASYBUILD_EXCLUDE_MATCH  'substring' (default) or 'segment'
///     EASYBUILD_LAUNCHER       Interpreter for the dependency analyzer
///     EASYBUILD_DIAGNOSTICS    Set to 'json' for JSON output by default
///     EASYBUILD_NO_COLOR       Set to disable colored output
///     NO_COLOR                 Set to disable colored output
#[derive(Parser)]
#[command(name = "easybuild")]
#[command(version)]
struct Cli {
    /// Report every pipeline stage
    #[arg(long, short = 'v')]
    verbose: bool,
    /// Errors only
    #[arg(long, short = 'q', conflicts_with = "verbose")]
    quiet: bool,
    /// Print a JSON summary instead of the output line
    #[arg(long, conflicts_with_all = ["verbose", "quiet"])]
    json: bool,
    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cli_config = config::Config::from_env();

    // Command-line flags override environment variables
    build::run(build::BuildArgs {
        verbose: cli.verbose,
        quiet: cli.quiet,
        json: cli.json || (cli_config.default_json && !cli.verbose && !cli.quiet),
        no_color: cli.no_color || cli_config.no_color,
    })
}
