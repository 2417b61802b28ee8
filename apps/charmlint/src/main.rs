//! charmlint CLI binary entry point.
//! Delegates to the library for analysis and emits the rendered report.

use charmlint::cli::{Cli, Commands};
use charmlint::env::{self, EnvOverrides};
use charmlint::error::AnalyzeError;
use charmlint::models::CheckResult;
use charmlint::output::{self, OutputMode};
use charmlint::{analyze, artifact, config, utils};
use clap::Parser;
use std::path::Path;

fn main() {
    let cli = Cli::parse();
    output::log_builder(env::is_developer_mode()).init();
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Analyze {
            filepath,
            force,
            format,
            jobs,
            repo_root,
        } => match run_analyze(&filepath, force, format.as_deref(), jobs, repo_root.as_deref()) {
            Ok(code) => std::process::exit(code),
            Err(e) => {
                eprintln!("{} {}", utils::error_prefix(), e);
                std::process::exit(2);
            }
        },
    }
}

fn run_analyze(
    filepath: &str,
    force: bool,
    format: Option<&str>,
    jobs: Option<usize>,
    repo_root: Option<&str>,
) -> Result<i32, AnalyzeError> {
    let env_overrides = EnvOverrides::from_env()?;
    // An absent --force must not mask the environment or config file.
    let settings =
        config::resolve_effective(repo_root, format, jobs, force.then_some(true), &env_overrides)?;
    if settings.config_file.is_none() && settings.mode == OutputMode::Unformatted {
        eprintln!(
            "{} No charmlint.toml found; using defaults.",
            utils::note_prefix()
        );
    }
    let charm = artifact::useful_filepath(Path::new(filepath))?;
    let results = analyze::run_analysis(&settings, &charm)?;
    let lines = output::render(&results, settings.mode)?;
    output::emit(&lines);
    if results.iter().any(CheckResult::is_failure) {
        Ok(1)
    } else {
        Ok(0)
    }
}
