//! Grouping of check results for the text report.

use crate::models::{CheckResult, LintOutcome, ResultValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Report groups, declared in display priority order.
pub enum GroupKind {
    Attributes,
    LintIgnored,
    LintWarnings,
    LintErrors,
    LintFatal,
    LintOk,
}

impl GroupKind {
    pub const ALL: [GroupKind; 6] = [
        GroupKind::Attributes,
        GroupKind::LintIgnored,
        GroupKind::LintWarnings,
        GroupKind::LintErrors,
        GroupKind::LintFatal,
        GroupKind::LintOk,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            GroupKind::Attributes => "Attributes",
            GroupKind::LintIgnored => "Lint Ignored",
            GroupKind::LintWarnings => "Lint Warnings",
            GroupKind::LintErrors => "Lint Errors",
            GroupKind::LintFatal => "Lint Fatal",
            GroupKind::LintOk => "Lint OK",
        }
    }

    /// Group a result belongs to.
    pub fn of(result: &CheckResult) -> GroupKind {
        match result.result() {
            ResultValue::Attribute(_) => GroupKind::Attributes,
            ResultValue::Lint(LintOutcome::Ignored) => GroupKind::LintIgnored,
            ResultValue::Lint(LintOutcome::Warnings) => GroupKind::LintWarnings,
            ResultValue::Lint(LintOutcome::Errors) => GroupKind::LintErrors,
            ResultValue::Lint(LintOutcome::Fatal) => GroupKind::LintFatal,
            ResultValue::Lint(LintOutcome::Ok) => GroupKind::LintOk,
        }
    }
}

#[derive(Debug)]
/// A non-empty group of results, in run order.
pub struct ResultGroup<'a> {
    pub kind: GroupKind,
    pub results: Vec<&'a CheckResult>,
}

/// Partition `results` into groups in priority order, dropping empty ones.
pub fn classify(results: &[CheckResult]) -> Vec<ResultGroup<'_>> {
    GroupKind::ALL
        .iter()
        .filter_map(|&kind| {
            let members: Vec<&CheckResult> =
                results.iter().filter(|r| GroupKind::of(r) == kind).collect();
            (!members.is_empty()).then_some(ResultGroup {
                kind,
                results: members,
            })
        })
        .collect()
}
