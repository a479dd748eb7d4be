use crate::constants::SCHEDULE_URL;
use crate::error::{Result, ScheduleError};
use crate::normalize::timestamp::OutputTimeZone;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub schedule_url: String,
    pub timezone: OutputTimeZone,
    pub log_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schedule_url: SCHEDULE_URL.to_string(),
            timezone: OutputTimeZone::Local,
            log_dir: None,
        }
    }
}

impl Config {
    /// Loads `config.toml` from the working directory (if present), then applies
    /// `SCHEDULE_URL`, `SCHEDULE_TIMEZONE` and `LOG_DIR` from the environment.
    ///
    /// Never fails: an unreadable file falls back to defaults and a bad override
    /// leaves its field untouched. Every problem is returned for reporting.
    pub fn load() -> (Self, Vec<ScheduleError>) {
        let mut problems = Vec::new();
        let mut config = Self::from_file(Path::new(CONFIG_PATH)).unwrap_or_else(|e| {
            problems.push(e);
            Self::default()
        });
        problems.extend(config.apply_overrides(|key| std::env::var(key).ok()));
        (config, problems)
    }

    /// Reads a TOML config file, falling back to defaults when it does not exist.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|e| {
            ScheduleError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Applies each override on its own; returns the ones that could not be used.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Vec<ScheduleError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut problems = Vec::new();
        if let Some(url) = lookup("SCHEDULE_URL").filter(|v| !v.trim().is_empty()) {
            self.schedule_url = url.trim().to_string();
        }
        if let Some(tz) = lookup("SCHEDULE_TIMEZONE").filter(|v| !v.trim().is_empty()) {
            match tz.parse() {
                Ok(zone) => self.timezone = zone,
                Err(e) => problems.push(e),
            }
        }
        if let Some(dir) = lookup("LOG_DIR").filter(|v| !v.trim().is_empty()) {
            self.log_dir = Some(PathBuf::from(dir.trim()));
        }
        problems
    }
}
