//! Environment-variable driven settings.
//!
//! Values here sit between CLI flags and the config file in precedence.
//! Lookups go through a closure so tests never touch the process env.

use crate::error::AnalyzeError;

pub const FORMAT_ENV_VAR: &str = "CHARMLINT_FORMAT";
pub const JOBS_ENV_VAR: &str = "CHARMLINT_JOBS";
pub const FORCE_ENV_VAR: &str = "CHARMLINT_FORCE";
pub const DEVELOPER_MODE_ENV_VAR: &str = "CHARMLINT_DEVELOPER";
pub const LOG_ENV_VAR: &str = "CHARMLINT_LOG";

#[derive(Debug, Default, Clone, PartialEq, Eq)]
/// Settings read from the environment; `None` means unset.
pub struct EnvOverrides {
    pub format: Option<String>,
    pub jobs: Option<usize>,
    pub force: Option<bool>,
}

impl EnvOverrides {
    pub fn from_env() -> Result<Self, AnalyzeError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AnalyzeError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let format = lookup(FORMAT_ENV_VAR).filter(|s| !s.trim().is_empty());
        let jobs = match lookup(JOBS_ENV_VAR) {
            Some(raw) => Some(raw.trim().parse::<usize>().map_err(|_| {
                AnalyzeError::InvalidEnv {
                    name: JOBS_ENV_VAR.to_string(),
                    value: raw.clone(),
                }
            })?),
            None => None,
        };
        let force = match lookup(FORCE_ENV_VAR) {
            Some(raw) => Some(parse_flag(FORCE_ENV_VAR, &raw)?),
            None => None,
        };
        Ok(EnvOverrides {
            format,
            jobs,
            force,
        })
    }
}

/// Parse a boolean flag the way `strtobool` does.
pub fn parse_flag(name: &str, raw: &str) -> Result<bool, AnalyzeError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "t" | "true" | "on" | "1" => Ok(true),
        "n" | "no" | "f" | "false" | "off" | "0" => Ok(false),
        _ => Err(AnalyzeError::InvalidEnv {
            name: name.to_string(),
            value: raw.to_string(),
        }),
    }
}

/// Developer mode turns on debug diagnostics. Unparseable values count as off.
pub fn is_developer_mode() -> bool {
    std::env::var(DEVELOPER_MODE_ENV_VAR)
        .ok()
        .and_then(|v| parse_flag(DEVELOPER_MODE_ENV_VAR, &v).ok())
        .unwrap_or(false)
}

/// Number of CPUs available to this process, at least 1.
pub fn available_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
