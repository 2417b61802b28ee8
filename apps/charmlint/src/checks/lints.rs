//! Lint checkers: pass/fail probes reporting a `LintOutcome`.

use super::{docs_url, entrypoint_from_dispatch, read_yaml, Checker, Finding};
use crate::error::CheckError;
use crate::models::{CheckType, LintOutcome};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_yaml::Value as Yaml;
use std::path::Path;

const METADATA_FILE: &str = "metadata.yaml";
const ACTIONS_FILE: &str = "actions.yaml";
const CONFIG_FILE: &str = "config.yaml";
const METADATA_REQUIRED: [&str; 3] = ["name", "summary", "description"];

static KEBAB_CASE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").expect("valid kebab-case pattern"));

fn errors(text: impl Into<String>) -> Finding {
    Finding::lint(LintOutcome::Errors).with_text(text)
}

/// Parse an optional YAML file, mapping parse failures to a lint verdict.
fn optional_yaml(path: &Path, invalid: &str) -> Result<Result<Option<Yaml>, Finding>, CheckError> {
    match read_yaml(path) {
        Ok(v) => Ok(Ok(v)),
        Err(CheckError::Yaml { .. }) => Ok(Err(errors(invalid))),
        Err(e) => Err(e),
    }
}

/// `metadata.yaml` must exist and declare the basic fields.
pub struct JujuMetadata;

impl Checker for JujuMetadata {
    fn name(&self) -> &str {
        "metadata"
    }

    fn check_type(&self) -> CheckType {
        CheckType::Lint
    }

    fn url(&self) -> String {
        docs_url("metadata")
    }

    fn text(&self) -> &str {
        "Problems found with metadata.yaml file."
    }

    fn run(&self, basedir: &Path) -> Result<Finding, CheckError> {
        let path = basedir.join(METADATA_FILE);
        let doc = match optional_yaml(&path, "The metadata.yaml file is not a valid YAML file.")? {
            Ok(Some(doc)) => doc,
            Ok(None) => return Ok(errors("Cannot read the metadata.yaml file.")),
            Err(verdict) => return Ok(verdict),
        };
        let Some(map) = doc.as_mapping() else {
            return Ok(errors("The metadata.yaml file must contain a mapping."));
        };
        let missing: Vec<&str> = METADATA_REQUIRED
            .iter()
            .copied()
            .filter(|k| map.get(*k).map_or(true, Yaml::is_null))
            .collect();
        if missing.is_empty() {
            Ok(Finding::lint(LintOutcome::Ok))
        } else {
            Ok(errors(format!(
                "The metadata.yaml file is missing the following attributes: {}.",
                missing.join(", ")
            )))
        }
    }
}

/// `actions.yaml` is optional but must be valid when present.
pub struct JujuActions;

impl Checker for JujuActions {
    fn name(&self) -> &str {
        "juju-actions"
    }

    fn check_type(&self) -> CheckType {
        CheckType::Lint
    }

    fn url(&self) -> String {
        docs_url("juju-actions")
    }

    fn text(&self) -> &str {
        "The actions.yaml file is not a valid YAML file."
    }

    fn run(&self, basedir: &Path) -> Result<Finding, CheckError> {
        let path = basedir.join(ACTIONS_FILE);
        match optional_yaml(&path, self.text())? {
            Ok(None) => Ok(Finding::lint(LintOutcome::Ok)),
            Ok(Some(doc)) if doc.is_mapping() || doc.is_null() => Ok(Finding::lint(LintOutcome::Ok)),
            Ok(Some(_)) => Ok(errors("The actions.yaml file must contain a mapping.")),
            Err(verdict) => Ok(verdict),
        }
    }
}

/// `config.yaml` is optional; when present every option needs a type.
pub struct JujuConfig;

impl Checker for JujuConfig {
    fn name(&self) -> &str {
        "juju-config"
    }

    fn check_type(&self) -> CheckType {
        CheckType::Lint
    }

    fn url(&self) -> String {
        docs_url("juju-config")
    }

    fn text(&self) -> &str {
        "Problems found with config.yaml file."
    }

    fn run(&self, basedir: &Path) -> Result<Finding, CheckError> {
        let path = basedir.join(CONFIG_FILE);
        let doc = match optional_yaml(&path, "The config.yaml file is not a valid YAML file.")? {
            Ok(Some(doc)) => doc,
            Ok(None) => return Ok(Finding::lint(LintOutcome::Ok)),
            Err(verdict) => return Ok(verdict),
        };
        let Some(options) = doc.get("options").and_then(Yaml::as_mapping) else {
            return Ok(errors(
                "Error in config.yaml: must have an 'options' dictionary.",
            ));
        };
        let untyped: Vec<String> = options
            .iter()
            .filter(|(_, v)| v.get("type").is_none())
            .map(|(k, _)| yaml_key(k))
            .collect();
        if untyped.is_empty() {
            Ok(Finding::lint(LintOutcome::Ok))
        } else {
            Ok(errors(format!(
                "Error in config.yaml: items under 'options' must have a 'type' key: {}.",
                untyped.join(", ")
            )))
        }
    }
}

/// The `dispatch` entrypoint must exist and be executable.
pub struct Entrypoint;

impl Checker for Entrypoint {
    fn name(&self) -> &str {
        "entrypoint"
    }

    fn check_type(&self) -> CheckType {
        CheckType::Lint
    }

    fn url(&self) -> String {
        docs_url("entrypoint")
    }

    fn text(&self) -> &str {
        "Problems found with the charm entrypoint."
    }

    fn run(&self, basedir: &Path) -> Result<Finding, CheckError> {
        let Some(entrypoint) = entrypoint_from_dispatch(basedir)? else {
            return Ok(errors(
                "Cannot find a proper 'dispatch' script pointing to an entrypoint.",
            ));
        };
        let shown = entrypoint
            .strip_prefix(basedir)
            .unwrap_or(&entrypoint)
            .display()
            .to_string();
        if !entrypoint.exists() {
            return Ok(errors(format!("Cannot find the entrypoint file: '{shown}'.")));
        }
        if !entrypoint.is_file() {
            return Ok(errors(format!("The entrypoint is not a file: '{shown}'.")));
        }
        if !is_executable(&entrypoint)? {
            return Ok(errors(format!("The entrypoint file is not executable: '{shown}'.")));
        }
        Ok(Finding::lint(LintOutcome::Ok))
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> Result<bool, CheckError> {
    use std::os::unix::fs::PermissionsExt;
    let meta = std::fs::metadata(path).map_err(|source| CheckError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(meta.permissions().mode() & 0o111 != 0)
}

#[cfg(not(unix))]
fn is_executable(_path: &Path) -> Result<bool, CheckError> {
    Ok(true)
}

/// Config options and actions should be named in lowercase kebab-case.
pub struct NamingConventions;

impl Checker for NamingConventions {
    fn name(&self) -> &str {
        "naming-conventions"
    }

    fn check_type(&self) -> CheckType {
        CheckType::Lint
    }

    fn url(&self) -> String {
        docs_url("naming-conventions")
    }

    fn text(&self) -> &str {
        "Config options and actions should use lowercase kebab-case names."
    }

    fn run(&self, basedir: &Path) -> Result<Finding, CheckError> {
        let mut offenders: Vec<String> = Vec::new();

        // Invalid files are reported by the config and actions linters.
        if let Ok(Some(doc)) = read_yaml(&basedir.join(CONFIG_FILE)) {
            if let Some(options) = doc.get("options").and_then(Yaml::as_mapping) {
                for key in options.keys().map(yaml_key) {
                    if !KEBAB_CASE.is_match(&key) {
                        offenders.push(format!("config option '{key}'"));
                    }
                }
            }
        }
        if let Ok(Some(doc)) = read_yaml(&basedir.join(ACTIONS_FILE)) {
            if let Some(actions) = doc.as_mapping() {
                for key in actions.keys().map(yaml_key) {
                    if !KEBAB_CASE.is_match(&key) {
                        offenders.push(format!("action '{key}'"));
                    }
                }
            }
        }

        if offenders.is_empty() {
            Ok(Finding::lint(LintOutcome::Ok))
        } else {
            Ok(Finding::lint(LintOutcome::Warnings)
                .with_text(format!("{} Found: {}.", self.text(), offenders.join(", "))))
        }
    }
}

fn yaml_key(k: &Yaml) -> String {
    match k {
        Yaml::String(s) => s.clone(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::tests::DISPATCH;
    use std::fs;
    use tempfile::tempdir;

    fn outcome(f: &Finding) -> LintOutcome {
        f.result.outcome().unwrap()
    }

    #[test]
    fn test_kebab_case_pattern() {
        for ok in ["port", "log-level", "v2", "a-1-b"] {
            assert!(KEBAB_CASE.is_match(ok), "{ok}");
        }
        for bad in ["", "Port", "log_level", "-lead", "trail-", "a--b"] {
            assert!(!KEBAB_CASE.is_match(bad), "{bad}");
        }
    }

    #[test]
    fn test_metadata_ok_and_missing() {
        let dir = tempdir().unwrap();
        let f = JujuMetadata.run(dir.path()).unwrap();
        assert_eq!(outcome(&f), LintOutcome::Errors);
        assert_eq!(f.text.as_deref(), Some("Cannot read the metadata.yaml file."));

        fs::write(dir.path().join("metadata.yaml"), "name: foo\nsummary: s\n").unwrap();
        let f = JujuMetadata.run(dir.path()).unwrap();
        assert_eq!(
            f.text.as_deref(),
            Some("The metadata.yaml file is missing the following attributes: description.")
        );

        fs::write(
            dir.path().join("metadata.yaml"),
            "name: foo\nsummary: s\ndescription: d\n",
        )
        .unwrap();
        assert_eq!(outcome(&JujuMetadata.run(dir.path()).unwrap()), LintOutcome::Ok);
    }

    #[test]
    fn test_metadata_invalid_yaml_is_errors_not_failure() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("metadata.yaml"), "name: [oops").unwrap();
        let f = JujuMetadata.run(dir.path()).unwrap();
        assert_eq!(outcome(&f), LintOutcome::Errors);
    }

    #[test]
    fn test_actions_optional_and_validated() {
        let dir = tempdir().unwrap();
        assert_eq!(outcome(&JujuActions.run(dir.path()).unwrap()), LintOutcome::Ok);
        fs::write(dir.path().join("actions.yaml"), "do-it:\n  description: x\n").unwrap();
        assert_eq!(outcome(&JujuActions.run(dir.path()).unwrap()), LintOutcome::Ok);
        fs::write(dir.path().join("actions.yaml"), "- just\n- a list\n").unwrap();
        assert_eq!(outcome(&JujuActions.run(dir.path()).unwrap()), LintOutcome::Errors);
        fs::write(dir.path().join("actions.yaml"), "{{{").unwrap();
        assert_eq!(outcome(&JujuActions.run(dir.path()).unwrap()), LintOutcome::Errors);
    }

    #[test]
    fn test_config_options_need_type() {
        let dir = tempdir().unwrap();
        assert_eq!(outcome(&JujuConfig.run(dir.path()).unwrap()), LintOutcome::Ok);

        fs::write(dir.path().join("config.yaml"), "foo: bar\n").unwrap();
        let f = JujuConfig.run(dir.path()).unwrap();
        assert_eq!(
            f.text.as_deref(),
            Some("Error in config.yaml: must have an 'options' dictionary.")
        );

        fs::write(
            dir.path().join("config.yaml"),
            "options:\n  port:\n    type: int\n  name:\n    default: x\n",
        )
        .unwrap();
        let f = JujuConfig.run(dir.path()).unwrap();
        assert_eq!(outcome(&f), LintOutcome::Errors);
        assert_eq!(
            f.text.as_deref(),
            Some("Error in config.yaml: items under 'options' must have a 'type' key: name.")
        );
    }

    #[test]
    fn test_entrypoint_problems() {
        let dir = tempdir().unwrap();
        let f = Entrypoint.run(dir.path()).unwrap();
        assert_eq!(outcome(&f), LintOutcome::Errors);

        fs::write(dir.path().join("dispatch"), DISPATCH).unwrap();
        let f = Entrypoint.run(dir.path()).unwrap();
        assert_eq!(
            f.text.as_deref(),
            Some("Cannot find the entrypoint file: 'src/charm.py'.")
        );

        fs::create_dir_all(dir.path().join("src/charm.py")).unwrap();
        let f = Entrypoint.run(dir.path()).unwrap();
        assert_eq!(
            f.text.as_deref(),
            Some("The entrypoint is not a file: 'src/charm.py'.")
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_entrypoint_executable_bit() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("dispatch"), DISPATCH).unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        let ep = dir.path().join("src/charm.py");
        fs::write(&ep, "import ops\n").unwrap();
        fs::set_permissions(&ep, fs::Permissions::from_mode(0o644)).unwrap();
        let f = Entrypoint.run(dir.path()).unwrap();
        assert_eq!(
            f.text.as_deref(),
            Some("The entrypoint file is not executable: 'src/charm.py'.")
        );

        fs::set_permissions(&ep, fs::Permissions::from_mode(0o755)).unwrap();
        assert_eq!(outcome(&Entrypoint.run(dir.path()).unwrap()), LintOutcome::Ok);
    }

    #[test]
    fn test_naming_conventions() {
        let dir = tempdir().unwrap();
        assert_eq!(
            outcome(&NamingConventions.run(dir.path()).unwrap()),
            LintOutcome::Ok
        );
        fs::write(
            dir.path().join("config.yaml"),
            "options:\n  good-name:\n    type: string\n  bad_name:\n    type: int\n",
        )
        .unwrap();
        fs::write(dir.path().join("actions.yaml"), "DoIt: {}\nrun-it: {}\n").unwrap();
        let f = NamingConventions.run(dir.path()).unwrap();
        assert_eq!(outcome(&f), LintOutcome::Warnings);
        assert_eq!(
            f.text.as_deref(),
            Some("Config options and actions should use lowercase kebab-case names. Found: config option 'bad_name', action 'DoIt'.")
        );
    }
}
