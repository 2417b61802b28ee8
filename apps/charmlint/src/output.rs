//! Report rendering for analysis results.
//!
//! Supports `unformatted` (default, grouped human lines) and `json` (one
//! array with an object per result, in run order). Rendering is pure; the
//! `emit` step hands the lines to the logger under `REPORT_TARGET`.

use crate::classify::{classify, ResultGroup};
use crate::env::LOG_ENV_VAR;
use crate::error::AnalyzeError;
use crate::models::{CheckResult, LintOutcome, ResultValue, StructuredEntry};
use log::LevelFilter;
use std::fmt;
use std::io::Write;
use std::str::FromStr;

/// Log target carrying report lines.
pub const REPORT_TARGET: &str = "charmlint::report";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// How the report is rendered.
pub enum OutputMode {
    #[default]
    Unformatted,
    Structured,
}

impl FromStr for OutputMode {
    type Err = AnalyzeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "unformatted" => Ok(OutputMode::Unformatted),
            "json" => Ok(OutputMode::Structured),
            other => Err(AnalyzeError::UnknownRenderMode(other.to_string())),
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputMode::Unformatted => "unformatted",
            OutputMode::Structured => "json",
        })
    }
}

fn result_line(r: &CheckResult) -> String {
    match r.result() {
        ResultValue::Attribute(value) => format!("- {}: {} ({})", r.name(), value, r.url()),
        ResultValue::Lint(LintOutcome::Ok) => {
            format!("- {}: no issues found ({})", r.name(), r.url())
        }
        ResultValue::Lint(LintOutcome::Ignored | LintOutcome::Fatal) => {
            format!("- {} ({})", r.name(), r.url())
        }
        ResultValue::Lint(LintOutcome::Warnings | LintOutcome::Errors) => {
            format!("- {}: {} ({})", r.name(), r.text(), r.url())
        }
    }
}

/// Grouped human-readable lines: a `<Title>:` header per group, then one line per result.
pub fn render_text(groups: &[ResultGroup<'_>]) -> Vec<String> {
    let mut lines = Vec::new();
    for group in groups {
        lines.push(format!("{}:", group.kind.title()));
        lines.extend(group.results.iter().map(|r| result_line(r)));
    }
    lines
}

/// Single-line JSON array with one object per result, in run order.
pub fn render_structured(results: &[CheckResult]) -> Result<String, AnalyzeError> {
    let entries: Vec<StructuredEntry<'_>> = results.iter().map(StructuredEntry::from).collect();
    Ok(serde_json::to_string(&entries)?)
}

/// Render `results` in the requested mode.
pub fn render(results: &[CheckResult], mode: OutputMode) -> Result<Vec<String>, AnalyzeError> {
    match mode {
        OutputMode::Unformatted => Ok(render_text(&classify(results))),
        OutputMode::Structured => Ok(vec![render_structured(results)?]),
    }
}

/// Log each report line at debug level under `REPORT_TARGET`.
pub fn emit(lines: &[String]) {
    for line in lines {
        log::debug!(target: REPORT_TARGET, "{}", line);
    }
}

/// Logger configuration for the binary.
///
/// Report lines always reach stdout bare. Other diagnostics follow
/// `CHARMLINT_LOG`, defaulting to debug in developer mode and warn otherwise.
pub fn log_builder(developer_mode: bool) -> env_logger::Builder {
    let level = if developer_mode {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level)
        .parse_env(env_logger::Env::new().filter(LOG_ENV_VAR))
        .filter_module(REPORT_TARGET, LevelFilter::Debug)
        .target(env_logger::Target::Stdout)
        .format(|buf, record| {
            if record.target() == REPORT_TARGET {
                writeln!(buf, "{}", record.args())
            } else {
                writeln!(buf, "[{} {}] {}", record.level(), record.target(), record.args())
            }
        });
    builder
}
