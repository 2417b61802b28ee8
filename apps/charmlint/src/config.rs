//! Configuration discovery and effective settings resolution.
//!
//! charmlint reads `charmlint.toml|yaml|yml` from the repository root (or
//! closest ancestor) and merges it with environment variables and CLI flags
//! to produce `Settings`.
//! Defaults:
//! - `format`: `unformatted`
//! - `jobs`: 1 (`0` means one per available CPU)
//! - `force`: false
//! - `analysis.ignore.{attributes,linters}`: empty
//!
//! Overrides precedence: CLI > environment > config file > defaults.

use crate::analyze::IgnoreRules;
use crate::env::{self, EnvOverrides};
use crate::error::AnalyzeError;
use crate::models::CheckType;
use crate::output::OutputMode;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILES: [&str; 3] = ["charmlint.toml", "charmlint.yaml", "charmlint.yml"];

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `charmlint.toml|yaml`.
pub struct CharmlintConfig {
    pub format: Option<String>,
    pub jobs: Option<usize>,
    pub force: Option<bool>,
    #[serde(default)]
    pub analysis: Option<AnalysisCfg>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Analysis section under `[analysis]`.
pub struct AnalysisCfg {
    #[serde(default)]
    pub ignore: AnalysisIgnore,
}

#[derive(Debug, Default, Deserialize, Clone, PartialEq, Eq)]
/// Checks excluded from a run unless ignores are overridden.
pub struct AnalysisIgnore {
    #[serde(default)]
    pub attributes: Vec<String>,
    #[serde(default)]
    pub linters: Vec<String>,
}

impl IgnoreRules for AnalysisIgnore {
    fn is_ignored(&self, check_type: CheckType, name: &str) -> bool {
        let list = match check_type {
            CheckType::Attribute => &self.attributes,
            CheckType::Lint => &self.linters,
        };
        list.iter().any(|n| n == name)
    }
}

#[derive(Debug, Clone)]
/// Fully-resolved settings used by the analyze command.
pub struct Settings {
    pub config_file: Option<PathBuf>,
    pub mode: OutputMode,
    pub jobs: usize,
    pub force: bool,
    pub ignore: AnalysisIgnore,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            config_file: None,
            mode: OutputMode::Unformatted,
            jobs: 1,
            force: false,
            ignore: AnalysisIgnore::default(),
        }
    }
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when a `charmlint.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if CONFIG_FILES.iter().any(|f| cur.join(f).exists()) {
            return cur.to_path_buf();
        }
        if cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Path of the config file under `root`, if any.
pub fn find_config(root: &Path) -> Option<PathBuf> {
    CONFIG_FILES
        .iter()
        .map(|f| root.join(f))
        .find(|p| p.is_file())
}

/// Load `CharmlintConfig` from `charmlint.toml` or `charmlint.yaml|yml` if present.
pub fn load_config(root: &Path) -> Result<Option<(PathBuf, CharmlintConfig)>, AnalyzeError> {
    let Some(path) = find_config(root) else {
        return Ok(None);
    };
    let invalid = |cause: String| AnalyzeError::InvalidConfig {
        path: path.clone(),
        cause,
    };
    let s = fs::read_to_string(&path).map_err(|e| invalid(e.to_string()))?;
    let cfg: CharmlintConfig = if path.extension().is_some_and(|e| e == "toml") {
        toml::from_str(&s).map_err(|e| invalid(e.to_string()))?
    } else {
        serde_yaml::from_str(&s).map_err(|e| invalid(e.to_string()))?
    };
    log::debug!("Loaded config from {}", path.display());
    Ok(Some((path, cfg)))
}

/// Resolve `Settings` by merging CLI flags, environment, discovered config, and defaults.
pub fn resolve_effective(
    cli_repo_root: Option<&str>,
    cli_format: Option<&str>,
    cli_jobs: Option<usize>,
    cli_force: Option<bool>,
    env: &EnvOverrides,
) -> Result<Settings, AnalyzeError> {
    let start = PathBuf::from(cli_repo_root.unwrap_or("."));
    let repo_root = detect_repo_root(&start);
    let (config_file, cfg) = match load_config(&repo_root)? {
        Some((path, cfg)) => (Some(path), cfg),
        None => (None, CharmlintConfig::default()),
    };

    let mode = match cli_format
        .map(str::to_string)
        .or_else(|| env.format.clone())
        .or(cfg.format)
    {
        Some(raw) => raw.parse::<OutputMode>()?,
        None => OutputMode::Unformatted,
    };

    let jobs = match cli_jobs.or(env.jobs).or(cfg.jobs).unwrap_or(1) {
        0 => env::available_cpus(),
        n => n,
    };

    let force = cli_force.or(env.force).or(cfg.force).unwrap_or(false);

    let ignore = cfg.analysis.map(|a| a.ignore).unwrap_or_default();

    Ok(Settings {
        config_file,
        mode,
        jobs,
        force,
        ignore,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn write_file(path: &Path, body: &str) {
        let mut f = fs::File::create(path).unwrap();
        writeln!(f, "{}", body).unwrap();
    }

    #[test]
    fn test_detect_and_load_toml() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        write_file(
            &root.join("charmlint.toml"),
            r#"
format = "json"
jobs = 2
[analysis.ignore]
attributes = ["framework"]
linters = ["entrypoint"]
    "#,
        );

        let eff = resolve_effective(root.to_str(), None, None, None, &EnvOverrides::default())
            .unwrap();
        assert_eq!(eff.mode, OutputMode::Structured);
        assert_eq!(eff.jobs, 2);
        assert!(!eff.force);
        assert_eq!(eff.ignore.attributes, vec!["framework".to_string()]);
        assert!(eff.ignore.is_ignored(CheckType::Lint, "entrypoint"));
        assert!(!eff.ignore.is_ignored(CheckType::Attribute, "entrypoint"));
        assert_eq!(eff.config_file, Some(root.join("charmlint.toml")));
    }

    #[test]
    fn test_load_yaml_and_defaults() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        write_file(
            &root.join("charmlint.yaml"),
            r#"
analysis:
  ignore:
    linters: [metadata]
            "#,
        );

        let eff = resolve_effective(root.to_str(), None, None, None, &EnvOverrides::default())
            .unwrap();
        assert_eq!(eff.mode, OutputMode::Unformatted);
        assert_eq!(eff.jobs, 1);
        assert!(eff.ignore.attributes.is_empty());
        assert_eq!(eff.ignore.linters, vec!["metadata".to_string()]);
    }

    #[test]
    fn test_precedence_cli_then_env_then_file() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        write_file(
            &root.join("charmlint.toml"),
            r#"
format = "json"
jobs = 2
force = false
            "#,
        );
        let env = EnvOverrides {
            format: Some("unformatted".into()),
            jobs: Some(5),
            force: Some(true),
        };

        let from_env = resolve_effective(root.to_str(), None, None, None, &env).unwrap();
        assert_eq!(from_env.mode, OutputMode::Unformatted);
        assert_eq!(from_env.jobs, 5);
        assert!(from_env.force);

        let from_cli =
            resolve_effective(root.to_str(), Some("json"), Some(3), Some(false), &env).unwrap();
        assert_eq!(from_cli.mode, OutputMode::Structured);
        assert_eq!(from_cli.jobs, 3);
        assert!(!from_cli.force);
    }

    #[test]
    fn test_zero_jobs_means_available_cpus() {
        let dir = tempdir().unwrap();
        let eff = resolve_effective(
            dir.path().to_str(),
            None,
            Some(0),
            None,
            &EnvOverrides::default(),
        )
        .unwrap();
        assert_eq!(eff.jobs, env::available_cpus());
        assert!(eff.jobs >= 1);
    }

    #[test]
    fn test_unknown_format_is_error() {
        let dir = tempdir().unwrap();
        let err = resolve_effective(
            dir.path().to_str(),
            Some("xml"),
            None,
            None,
            &EnvOverrides::default(),
        )
        .unwrap_err();
        assert!(matches!(err, AnalyzeError::UnknownRenderMode(ref m) if m == "xml"));
    }

    #[test]
    fn test_broken_config_is_error() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        write_file(&root.join("charmlint.toml"), "jobs = [not valid");
        let err = resolve_effective(root.to_str(), None, None, None, &EnvOverrides::default())
            .unwrap_err();
        assert!(matches!(err, AnalyzeError::InvalidConfig { .. }));
    }

    #[test]
    fn test_detect_repo_root_walks_up_to_config() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        write_file(&root.join("charmlint.yml"), "jobs: 1");
        let nested = root.join("a/b");
        fs::create_dir_all(&nested).unwrap();
        assert_eq!(detect_repo_root(&nested), root.to_path_buf());
    }
}
