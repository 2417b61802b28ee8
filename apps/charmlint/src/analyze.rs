//! Analysis runner: executes registered checks against an extracted charm.
//!
//! Results come back in registration order whether checks ran sequentially
//! or on a rayon pool. A failing checker never aborts the run; it is
//! recorded as `fatal` (lint) or `unknown` (attribute).

use crate::artifact;
use crate::checks::{CheckRegistry, Checker};
use crate::config::Settings;
use crate::error::AnalyzeError;
use crate::models::{CheckResult, CheckType, LintOutcome, ResultValue, IGNORED, UNKNOWN};
use rayon::prelude::*;
use std::path::Path;

/// Source of per-check ignore rules.
pub trait IgnoreRules: Sync {
    fn is_ignored(&self, check_type: CheckType, name: &str) -> bool;
}

/// Run the built-in checks against `basedir`.
pub fn analyze(settings: &Settings, basedir: &Path, override_ignore_config: bool) -> Vec<CheckResult> {
    analyze_with(
        &CheckRegistry::builtin(),
        &settings.ignore,
        basedir,
        override_ignore_config,
        settings.jobs,
    )
}

/// Run every checker in `registry` against `basedir`.
///
/// When `override_ignore_config` is false, ignored checkers are skipped and
/// reported as ignored; when true they run and report their real outcome.
pub fn analyze_with(
    registry: &CheckRegistry,
    ignore: &dyn IgnoreRules,
    basedir: &Path,
    override_ignore_config: bool,
    jobs: usize,
) -> Vec<CheckResult> {
    let checkers = registry.checkers();
    let run = |c: &Box<dyn Checker>| {
        run_checker(c.as_ref(), ignore, basedir, override_ignore_config)
    };
    if jobs <= 1 || checkers.len() <= 1 {
        return checkers.iter().map(run).collect();
    }
    match rayon::ThreadPoolBuilder::new().num_threads(jobs).build() {
        Ok(pool) => pool.install(|| checkers.par_iter().map(run).collect()),
        Err(e) => {
            log::warn!(
                "Cannot start {} check workers ({}); running sequentially",
                jobs,
                e
            );
            checkers.iter().map(run).collect()
        }
    }
}

fn run_checker(
    checker: &dyn Checker,
    ignore: &dyn IgnoreRules,
    basedir: &Path,
    override_ignore_config: bool,
) -> CheckResult {
    let name = checker.name();
    let check_type = checker.check_type();
    if !override_ignore_config && ignore.is_ignored(check_type, name) {
        log::debug!("Check '{}' ignored by configuration", name);
        return match check_type {
            CheckType::Attribute => {
                CheckResult::attribute(name, checker.url(), checker.text(), IGNORED)
            }
            CheckType::Lint => {
                CheckResult::lint(name, checker.url(), checker.text(), LintOutcome::Ignored)
            }
        };
    }

    match checker.run(basedir) {
        Ok(finding) => {
            // Passing lints carry no explanation unless the checker gave one.
            let text = match (&finding.text, &finding.result) {
                (Some(text), _) => text.clone(),
                (None, ResultValue::Lint(LintOutcome::Ok)) => String::new(),
                (None, _) => checker.text().to_string(),
            };
            log::debug!("Check '{}' -> {}", name, finding.result);
            // The result variant must agree with the checker's declared type.
            match (check_type, finding.result) {
                (CheckType::Lint, ResultValue::Lint(outcome)) => {
                    CheckResult::lint(name, checker.url(), text, outcome)
                }
                (CheckType::Attribute, ResultValue::Attribute(value)) => {
                    CheckResult::attribute(name, checker.url(), text, value)
                }
                (_, other) => failed(
                    checker,
                    format!("check produced a {} result", other.check_type()),
                ),
            }
        }
        Err(e) => {
            log::debug!("Check '{}' failed: {}", name, e);
            failed(checker, e.to_string())
        }
    }
}

fn failed(checker: &dyn Checker, reason: String) -> CheckResult {
    match checker.check_type() {
        CheckType::Attribute => CheckResult::attribute(checker.name(), checker.url(), reason, UNKNOWN),
        CheckType::Lint => {
            CheckResult::lint(checker.name(), checker.url(), reason, LintOutcome::Fatal)
        }
    }
}

/// Open `charm_path` and run the built-in checks against its contents.
pub fn run_analysis(settings: &Settings, charm_path: &Path) -> Result<Vec<CheckResult>, AnalyzeError> {
    run_analysis_with(&CheckRegistry::builtin(), settings, charm_path)
}

/// Open `charm_path` and run `registry` against its contents.
///
/// Fails before any check runs when the archive cannot be opened. The
/// extracted tree is removed when this returns.
pub fn run_analysis_with(
    registry: &CheckRegistry,
    settings: &Settings,
    charm_path: &Path,
) -> Result<Vec<CheckResult>, AnalyzeError> {
    let extracted = artifact::open_artifact(charm_path)?;
    log::debug!(
        "Analyzing {} with {} checks (force={}, jobs={})",
        extracted.source().display(),
        registry.len(),
        settings.force,
        settings.jobs
    );
    Ok(analyze_with(
        registry,
        &settings.ignore,
        extracted.path(),
        settings.force,
        settings.jobs,
    ))
}
