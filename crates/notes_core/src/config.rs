//! Core runtime configuration.
//!
//! # Responsibility
//! - Carry logging settings and the default listing order.
//! - Load overrides from `NOTES_*` environment variables.
//!
//! # Invariants
//! - `log_dir`, when set, is an absolute path.

use crate::logging::default_log_level;
use crate::service::note_service::SortOrder;
use std::env;
use std::path::{Path, PathBuf};

pub const ENV_LOG_LEVEL: &str = "NOTES_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "NOTES_LOG_DIR";
pub const ENV_DEFAULT_SORT: &str = "NOTES_DEFAULT_SORT";

/// Settings shared by the logging bootstrap and the note service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Rolling log file directory; `None` logs to stderr.
    pub log_dir: Option<PathBuf>,
    /// Order used when a listing passes no explicit order.
    pub default_sort: SortOrder,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level().to_string(),
            log_dir: None,
            default_sort: SortOrder::default(),
        }
    }
}

impl CoreConfig {
    /// Loads configuration from the process environment.
    ///
    /// Optional:
    /// - `NOTES_LOG_LEVEL`: log level (default: build-mode dependent)
    /// - `NOTES_LOG_DIR`: absolute log directory (default: stderr)
    /// - `NOTES_DEFAULT_SORT`: `0|newest` or `1|oldest` (default: newest)
    ///
    /// # Errors
    /// - Returns a human-readable message when a value is invalid.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let mut config = Self::default();

        if let Some(level) = lookup(ENV_LOG_LEVEL).filter(|value| !value.trim().is_empty()) {
            config.log_level = level.trim().to_string();
        }

        if let Some(dir) = lookup(ENV_LOG_DIR).filter(|value| !value.trim().is_empty()) {
            let path = Path::new(dir.trim());
            if !path.is_absolute() {
                return Err(format!(
                    "{ENV_LOG_DIR} must be an absolute path, got `{}`",
                    dir.trim()
                ));
            }
            config.log_dir = Some(path.to_path_buf());
        }

        if let Some(sort) = lookup(ENV_DEFAULT_SORT) {
            config.default_sort = parse_sort(&sort)?;
        }

        Ok(config)
    }
}

fn parse_sort(value: &str) -> Result<SortOrder, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "0" | "newest" => Ok(SortOrder::NewestFirst),
        "1" | "oldest" => Ok(SortOrder::OldestFirst),
        other => Err(format!(
            "unsupported {ENV_DEFAULT_SORT} value `{other}`; expected 0|1|newest|oldest"
        )),
    }
}
