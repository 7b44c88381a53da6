//! Core runtime configuration.
//!
//! # Responsibility
//! - Describe where collections are stored, how logging starts, and the
//!   report page geometry.
//! - Validate configuration before any storage is touched.

use crate::db::{open_db, open_db_in_memory, DbResult};
use crate::logging::{default_log_level, init_logging, normalize_level, normalize_log_dir};
use crate::report::{ReportOptions, TASK_ADVANCE};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Parse(String),
    InvalidLogLevel(String),
    InvalidLogDir(String),
    InvalidReport(&'static str),
    Logging(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(message) => write!(f, "invalid configuration: {message}"),
            Self::InvalidLogLevel(message) => write!(f, "{message}"),
            Self::InvalidLogDir(message) => write!(f, "{message}"),
            Self::InvalidReport(message) => write!(f, "invalid report options: {message}"),
            Self::Logging(message) => write!(f, "logging init failed: {message}"),
        }
    }
}

impl Error for ConfigError {}

/// Settings for one embedding of the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// SQLite file holding the collections. `None` keeps them in memory.
    pub db_path: Option<PathBuf>,
    pub log_level: String,
    /// Absolute log directory. `None` leaves logging to the host.
    pub log_dir: Option<PathBuf>,
    pub report: ReportOptions,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            log_level: default_log_level().to_string(),
            log_dir: None,
            report: ReportOptions::default(),
        }
    }
}

impl CoreConfig {
    /// Parses and validates a JSON configuration document.
    ///
    /// Missing fields take their defaults.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(text).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        normalize_level(&self.log_level).map_err(ConfigError::InvalidLogLevel)?;
        if let Some(dir) = &self.log_dir {
            normalize_log_dir(&log_dir_text(dir)?).map_err(ConfigError::InvalidLogDir)?;
        }

        let report = &self.report;
        if report.page_height == 0 {
            return Err(ConfigError::InvalidReport("page_height must be positive"));
        }
        if report.page_top > report.page_height || report.first_page_start > report.page_height {
            return Err(ConfigError::InvalidReport(
                "page_top and first_page_start must not exceed page_height",
            ));
        }
        if report.page_height > u32::MAX - TASK_ADVANCE {
            return Err(ConfigError::InvalidReport(
                "page_height leaves no room for a task entry",
            ));
        }
        Ok(())
    }

    /// Starts file logging when `log_dir` is set.
    pub fn init_logging(&self) -> Result<(), ConfigError> {
        let Some(dir) = &self.log_dir else {
            return Ok(());
        };
        init_logging(&self.log_level, &log_dir_text(dir)?).map_err(ConfigError::Logging)
    }

    /// Opens the configured collection database with migrations applied.
    pub fn open_database(&self) -> DbResult<Connection> {
        match &self.db_path {
            Some(path) => open_db(path),
            None => open_db_in_memory(),
        }
    }
}

fn log_dir_text(dir: &std::path::Path) -> Result<String, ConfigError> {
    dir.to_str().map(str::to_string).ok_or_else(|| {
        ConfigError::InvalidLogDir(format!("log_dir is not UTF-8: {}", dir.display()))
    })
}
