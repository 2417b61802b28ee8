//! Shared data models for check results and their classification.

use crate::error::AnalyzeError;
use serde::Serialize;
use std::fmt;

/// Value reported by attribute checkers that could not determine a result.
pub const UNKNOWN: &str = "unknown";
/// Value reported by attribute checkers skipped through ignore rules.
pub const IGNORED: &str = "ignored";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
/// Kind of check: informational attribute probe or pass/fail lint.
pub enum CheckType {
    Attribute,
    Lint,
}

impl CheckType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckType::Attribute => "attribute",
            CheckType::Lint => "lint",
        }
    }
}

impl fmt::Display for CheckType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
/// Outcome of a lint check.
pub enum LintOutcome {
    Ok,
    Warnings,
    Errors,
    Fatal,
    Ignored,
}

impl LintOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            LintOutcome::Ok => "ok",
            LintOutcome::Warnings => "warnings",
            LintOutcome::Errors => "errors",
            LintOutcome::Fatal => "fatal",
            LintOutcome::Ignored => IGNORED,
        }
    }
}

impl fmt::Display for LintOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// The result carried by a check: a lint outcome or a free-form attribute value.
pub enum ResultValue {
    Lint(LintOutcome),
    Attribute(String),
}

impl ResultValue {
    pub fn check_type(&self) -> CheckType {
        match self {
            ResultValue::Lint(_) => CheckType::Lint,
            ResultValue::Attribute(_) => CheckType::Attribute,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ResultValue::Lint(outcome) => outcome.as_str(),
            ResultValue::Attribute(value) => value,
        }
    }

    /// Lint outcome, if this is a lint value.
    pub fn outcome(&self) -> Option<LintOutcome> {
        match self {
            ResultValue::Lint(outcome) => Some(*outcome),
            ResultValue::Attribute(_) => None,
        }
    }
}

impl fmt::Display for ResultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Outcome of one check within a run. Immutable once built.
pub struct CheckResult {
    name: String,
    url: String,
    text: String,
    result: ResultValue,
}

impl CheckResult {
    /// Build a result, rejecting an empty name.
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        text: impl Into<String>,
        result: ResultValue,
    ) -> Result<Self, AnalyzeError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(AnalyzeError::EmptyCheckName);
        }
        Ok(CheckResult {
            name,
            url: url.into(),
            text: text.into(),
            result,
        })
    }

    pub(crate) fn lint(
        name: impl Into<String>,
        url: impl Into<String>,
        text: impl Into<String>,
        outcome: LintOutcome,
    ) -> Self {
        CheckResult {
            name: name.into(),
            url: url.into(),
            text: text.into(),
            result: ResultValue::Lint(outcome),
        }
    }

    pub(crate) fn attribute(
        name: impl Into<String>,
        url: impl Into<String>,
        text: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        CheckResult {
            name: name.into(),
            url: url.into(),
            text: text.into(),
            result: ResultValue::Attribute(value.into()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn check_type(&self) -> CheckType {
        self.result.check_type()
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn result(&self) -> &ResultValue {
        &self.result
    }

    /// Whether this result should fail the run (lint errors or fatal).
    pub fn is_failure(&self) -> bool {
        matches!(
            self.result.outcome(),
            Some(LintOutcome::Errors) | Some(LintOutcome::Fatal)
        )
    }
}

#[derive(Serialize)]
/// Flat record used by the structured (JSON) report.
pub struct StructuredEntry<'a> {
    pub name: &'a str,
    #[serde(rename = "type")]
    pub check_type: CheckType,
    pub url: &'a str,
    pub result: &'a str,
}

impl<'a> From<&'a CheckResult> for StructuredEntry<'a> {
    fn from(r: &'a CheckResult) -> Self {
        StructuredEntry {
            name: r.name(),
            check_type: r.check_type(),
            url: r.url(),
            result: r.result().as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_type_follows_result_variant() {
        let lint = CheckResult::lint("l", "u", "t", LintOutcome::Warnings);
        assert_eq!(lint.check_type(), CheckType::Lint);
        let attr = CheckResult::attribute("a", "u", "t", "python");
        assert_eq!(attr.check_type(), CheckType::Attribute);
        assert_eq!(attr.result().as_str(), "python");
        assert_eq!(attr.result().outcome(), None);
    }

    #[test]
    fn test_new_rejects_empty_name() {
        let err = CheckResult::new("  ", "u", "", ResultValue::Lint(LintOutcome::Ok));
        assert!(matches!(err, Err(AnalyzeError::EmptyCheckName)));
        let ok = CheckResult::new("x", "u", "", ResultValue::Lint(LintOutcome::Ok)).unwrap();
        assert_eq!(ok.name(), "x");
    }

    #[test]
    fn test_outcome_display_strings() {
        let all = [
            (LintOutcome::Ok, "ok"),
            (LintOutcome::Warnings, "warnings"),
            (LintOutcome::Errors, "errors"),
            (LintOutcome::Fatal, "fatal"),
            (LintOutcome::Ignored, "ignored"),
        ];
        for (outcome, expected) in all {
            assert_eq!(outcome.to_string(), expected);
            assert_eq!(serde_json::to_value(outcome).unwrap(), expected);
        }
    }

    #[test]
    fn test_failure_only_for_errors_and_fatal() {
        assert!(CheckResult::lint("a", "", "", LintOutcome::Errors).is_failure());
        assert!(CheckResult::lint("a", "", "", LintOutcome::Fatal).is_failure());
        assert!(!CheckResult::lint("a", "", "", LintOutcome::Warnings).is_failure());
        assert!(!CheckResult::attribute("a", "", "", "errors").is_failure());
    }
}
