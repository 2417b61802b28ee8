//! charmlint core library.
//!
//! Runs independent checks against a packaged charm, classifies their
//! outcomes, and renders a deterministic report as grouped text or JSON.
//!
//! High-level modules:
//! - `analyze`: The runner that executes checks with ignore/override semantics.
//! - `artifact`: Opening and extracting the charm archive.
//! - `checks`: The `Checker` trait, registry, and built-in checkers.
//! - `classify`: Grouping of results for the text report.
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Discovery and effective configuration resolution.
//! - `env`: Environment-variable settings.
//! - `error`: Error types.
//! - `models`: Check result data model.
//! - `output`: Text/JSON renderers.
//! - `utils`: Supporting helpers.
pub mod analyze;
pub mod artifact;
pub mod checks;
pub mod classify;
pub mod cli;
pub mod config;
pub mod env;
pub mod error;
pub mod models;
pub mod output;
pub mod utils;
