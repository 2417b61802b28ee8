//! Check definitions and the registry that orders them.
//!
//! A `Checker` inspects an extracted charm tree and returns a `Finding`.
//! The registry keeps checkers in registration order, which is the order
//! results are reported in.

pub mod attributes;
pub mod lints;

use crate::error::{AnalyzeError, CheckError};
use crate::models::{CheckType, LintOutcome, ResultValue};
use std::fs;
use std::path::{Component, Path, PathBuf};

const DISPATCH_FILENAME: &str = "dispatch";
const DOCS_BASE: &str = "https://juju.is/docs/sdk/charmcraft-analyze";

/// Documentation anchor for a check.
pub(crate) fn docs_url(anchor: &str) -> String {
    format!("{}#heading--{}", DOCS_BASE, anchor)
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Successful verdict of a checker.
pub struct Finding {
    pub result: ResultValue,
    /// Overrides the checker's default explanation when set.
    pub text: Option<String>,
}

impl Finding {
    pub fn attribute(value: impl Into<String>) -> Self {
        Finding {
            result: ResultValue::Attribute(value.into()),
            text: None,
        }
    }

    pub fn lint(outcome: LintOutcome) -> Self {
        Finding {
            result: ResultValue::Lint(outcome),
            text: None,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

/// One independent probe run against an extracted charm.
pub trait Checker: Send + Sync {
    /// Unique name within a registry.
    fn name(&self) -> &str;
    fn check_type(&self) -> CheckType;
    fn url(&self) -> String;
    /// Default explanation shown for warnings and errors.
    fn text(&self) -> &str;
    fn run(&self, basedir: &Path) -> Result<Finding, CheckError>;
}

/// Ordered collection of checkers.
pub struct CheckRegistry {
    checkers: Vec<Box<dyn Checker>>,
}

impl CheckRegistry {
    pub fn empty() -> Self {
        CheckRegistry {
            checkers: Vec::new(),
        }
    }

    /// Registry with every built-in attribute and lint checker.
    pub fn builtin() -> Self {
        CheckRegistry {
            checkers: vec![
                Box::new(attributes::Language),
                Box::new(attributes::Framework),
                Box::new(lints::JujuMetadata),
                Box::new(lints::JujuActions),
                Box::new(lints::JujuConfig),
                Box::new(lints::Entrypoint),
                Box::new(lints::NamingConventions),
            ],
        }
    }

    /// Append a checker. A checker whose name is already registered replaces
    /// the earlier one in place; a blank name is rejected.
    pub fn register(&mut self, checker: Box<dyn Checker>) -> Result<(), AnalyzeError> {
        if checker.name().trim().is_empty() {
            return Err(AnalyzeError::EmptyCheckName);
        }
        match self
            .checkers
            .iter()
            .position(|c| c.name() == checker.name())
        {
            Some(i) => self.checkers[i] = checker,
            None => self.checkers.push(checker),
        }
        Ok(())
    }

    pub fn checkers(&self) -> &[Box<dyn Checker>] {
        &self.checkers
    }

    pub fn len(&self) -> usize {
        self.checkers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checkers.is_empty()
    }
}

pub(crate) fn read_text(path: &Path) -> Result<String, CheckError> {
    fs::read_to_string(path).map_err(|source| CheckError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse a YAML file, `Ok(None)` when it does not exist.
pub(crate) fn read_yaml(path: &Path) -> Result<Option<serde_yaml::Value>, CheckError> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = read_text(path)?;
    serde_yaml::from_str(&raw)
        .map(Some)
        .map_err(|source| CheckError::Yaml {
            path: path.to_path_buf(),
            source,
        })
}

/// Entrypoint named by the charm's `dispatch` script, if any.
///
/// The script's last non-comment line ends with the entrypoint path, e.g.
/// `... /usr/bin/env python3 ./src/charm.py`. Only paths inside `basedir`
/// count; absolute paths and paths climbing out through `..` yield `None`.
pub fn entrypoint_from_dispatch(basedir: &Path) -> Result<Option<PathBuf>, CheckError> {
    let dispatch = basedir.join(DISPATCH_FILENAME);
    if !dispatch.is_file() {
        return Ok(None);
    }
    let content = read_text(&dispatch)?;
    let last = content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .last();
    let Some(token) = last.and_then(|l| l.split_whitespace().last()) else {
        return Ok(None);
    };
    let Some(rel) = contained_relative(Path::new(token)) else {
        log::debug!("Dispatch entrypoint '{}' is outside the charm", token);
        return Ok(None);
    };
    let entrypoint = basedir.join(rel);
    // A symlink in the archive may still point elsewhere.
    if let (Ok(real), Ok(root)) = (entrypoint.canonicalize(), basedir.canonicalize()) {
        if !real.starts_with(&root) {
            log::debug!("Dispatch entrypoint '{}' resolves outside the charm", token);
            return Ok(None);
        }
    }
    Ok(Some(entrypoint))
}

/// Lexically normalize a relative path, `None` if it is absolute or `..`
/// climbs above its starting point.
fn contained_relative(path: &Path) -> Option<PathBuf> {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => out.push(part),
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    return None;
                }
            }
            Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    (!out.as_os_str().is_empty()).then_some(out)
}
