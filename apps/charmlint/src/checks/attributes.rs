//! Attribute checkers: informational probes with free-form results.

use super::{docs_url, entrypoint_from_dispatch, read_text, Checker, Finding};
use crate::error::CheckError;
use crate::models::{CheckType, UNKNOWN};
use std::path::Path;

/// Detects the language the charm is written in.
pub struct Language;

impl Checker for Language {
    fn name(&self) -> &str {
        "language"
    }

    fn check_type(&self) -> CheckType {
        CheckType::Attribute
    }

    fn url(&self) -> String {
        docs_url("language")
    }

    fn text(&self) -> &str {
        "The charm is written with Python."
    }

    fn run(&self, basedir: &Path) -> Result<Finding, CheckError> {
        let Some(entrypoint) = entrypoint_from_dispatch(basedir)? else {
            return Ok(Finding::attribute(UNKNOWN));
        };
        let is_python = entrypoint.extension().is_some_and(|e| e == "py")
            && entrypoint.is_file()
            && basedir.join("venv").is_dir();
        Ok(if is_python {
            Finding::attribute("python")
        } else {
            Finding::attribute(UNKNOWN).with_text("The charm language could not be determined.")
        })
    }
}

/// Detects the framework the charm is built on.
pub struct Framework;

impl Framework {
    fn is_operator(basedir: &Path) -> Result<bool, CheckError> {
        if !basedir.join("venv/ops").is_dir() {
            return Ok(false);
        }
        let Some(entrypoint) = entrypoint_from_dispatch(basedir)? else {
            return Ok(false);
        };
        if !entrypoint.is_file() {
            return Ok(false);
        }
        let source = read_text(&entrypoint)?;
        Ok(source.lines().map(str::trim).any(|l| {
            l == "import ops"
                || l.starts_with("import ops.")
                || l.starts_with("from ops ")
                || l.starts_with("from ops.")
        }))
    }

    fn is_reactive(basedir: &Path) -> bool {
        basedir.join("reactive").is_dir() && basedir.join("venv/charms/reactive").is_dir()
    }
}

impl Checker for Framework {
    fn name(&self) -> &str {
        "framework"
    }

    fn check_type(&self) -> CheckType {
        CheckType::Attribute
    }

    fn url(&self) -> String {
        docs_url("framework")
    }

    fn text(&self) -> &str {
        "The charm is not based on any known framework."
    }

    fn run(&self, basedir: &Path) -> Result<Finding, CheckError> {
        if Self::is_operator(basedir)? {
            return Ok(Finding::attribute("operator")
                .with_text("The charm is based on the Operator Framework."));
        }
        if Self::is_reactive(basedir) {
            return Ok(Finding::attribute("reactive")
                .with_text("The charm is based on the Reactive Framework."));
        }
        Ok(Finding::attribute(UNKNOWN))
    }
}
