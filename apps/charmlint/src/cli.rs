//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "charmlint",
    version,
    about = "Static analysis for packaged charms",
    long_about = "charmlint — run attribute probes and lint checks against a packaged charm.\n\nConfiguration precedence: CLI > environment > charmlint.toml > defaults.",
    after_help = "Examples:\n  charmlint analyze build/demo.charm\n  charmlint analyze build/demo.charm --format json\n  charmlint analyze build/demo.charm --force --jobs 0",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current charmlint version.")]
    Version,
    /// Analyze a charm file
    #[command(
        about = "Analyze a charm",
        long_about = "Extract the charm and run every attribute and lint check against it. Lint errors or fatal results make the exit status non-zero.",
        after_help = "Examples:\n  charmlint analyze demo.charm\n  charmlint analyze demo.charm --format json"
    )]
    Analyze {
        #[arg(help = "Path to the .charm file")]
        filepath: String,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Run checks even if ignored in the configuration")]
        force: bool,
        #[arg(long, help = "Output format: unformatted|json (default: unformatted)")]
        format: Option<String>,
        #[arg(long, help = "Parallel check workers; 0 uses every CPU (default: 1)")]
        jobs: Option<usize>,
        #[arg(long, help = "Directory used to discover charmlint.toml (default: current dir)")]
        repo_root: Option<String>,
    },
}
