//! Configuration system for the school roster
//!
//! Supports multiple configuration sources with the following precedence (highest to lowest):
//! 1. CLI arguments
//! 2. Environment variables (SCHOOL_ROSTER_* prefix)
//! 3. Configuration file (TOML)
//! 4. Default values

use std::fs;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Name of the configuration file looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "school-roster.toml";

/// Main roster configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    /// Data and export file locations
    pub storage: StorageSettings,

    /// Accepted input ranges at the interactive prompt
    pub grading: GradingSettings,

    /// Logging configuration
    pub logging: LoggingSettings,
}

/// File locations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// JSON file used by save/load
    pub data_file: String,

    /// CSV file written by export
    pub export_file: String,
}

/// Input ranges enforced by the menu before calling the roster
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GradingSettings {
    pub min_grade: f64,
    pub max_grade: f64,
    pub min_age: u32,
    pub max_age: u32,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level: trace, debug, info, warn, error
    pub level: String,

    /// Log file path (empty = no file logging)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// Number of rotated log files to keep
    pub max_files: u32,

    /// Enable JSON formatted logging
    pub json_format: bool,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_file: "students.json".to_string(),
            export_file: "students.csv".to_string(),
        }
    }
}

impl Default for GradingSettings {
    fn default() -> Self {
        Self {
            min_grade: 0.0,
            max_grade: 20.0,
            min_age: 0,
            max_age: 120,
        }
    }
}

impl GradingSettings {
    pub fn grade_range(&self) -> RangeInclusive<f64> {
        self.min_grade..=self.max_grade
    }

    pub fn age_range(&self) -> RangeInclusive<u32> {
        self.min_age..=self.max_age
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            // Interactive use: keep the console quiet unless asked
            level: "warn".to_string(),
            file: None,
            max_files: 5,
            json_format: false,
        }
    }
}

impl RosterConfig {
    /// Load configuration from file with environment variable overrides
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut config = Self::default();

        // 1. Load from config file if it exists
        if let Some(path) = Self::find_config_file(config_path)? {
            debug!(path = %path.display(), "Loading configuration file");
            config = Self::from_file(&path)?;
            info!(path = %path.display(), "Configuration loaded from file");
        }

        // 2. Apply environment variable overrides
        config.apply_env_overrides();

        // 3. Expand paths
        config.expand_paths();

        // 4. Validate
        config.validate()?;

        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Error::read(path, e))?;
        toml::from_str(&content).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Find the configuration file to use
    fn find_config_file(explicit_path: Option<&str>) -> Result<Option<PathBuf>> {
        // If explicit path provided, use it (error if not found)
        if let Some(path) = explicit_path {
            let path = PathBuf::from(expand_path(path));
            return if path.exists() {
                Ok(Some(path))
            } else {
                Err(Error::config_not_found(path))
            };
        }

        let search_paths = [
            // Current directory
            Some(PathBuf::from(LOCAL_CONFIG_FILE)),
            // User config directory
            dirs::config_dir().map(|p| p.join("school-roster").join("config.toml")),
            // Home directory
            dirs::home_dir().map(|p| p.join(".school-roster").join("config.toml")),
        ];

        for path in search_paths.iter().flatten() {
            if path.exists() {
                debug!(path = %path.display(), "Found configuration file");
                return Ok(Some(path.clone()));
            }
        }

        debug!("No configuration file found, using defaults");
        Ok(None)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        // Storage settings
        if let Ok(val) = std::env::var("SCHOOL_ROSTER_DATA_FILE") {
            self.storage.data_file = val;
        }
        if let Ok(val) = std::env::var("SCHOOL_ROSTER_EXPORT_FILE") {
            self.storage.export_file = val;
        }

        // Grading settings
        if let Ok(val) = std::env::var("SCHOOL_ROSTER_MIN_GRADE") {
            if let Ok(n) = val.parse() {
                self.grading.min_grade = n;
            }
        }
        if let Ok(val) = std::env::var("SCHOOL_ROSTER_MAX_GRADE") {
            if let Ok(n) = val.parse() {
                self.grading.max_grade = n;
            }
        }
        if let Ok(val) = std::env::var("SCHOOL_ROSTER_MIN_AGE") {
            if let Ok(n) = val.parse() {
                self.grading.min_age = n;
            }
        }
        if let Ok(val) = std::env::var("SCHOOL_ROSTER_MAX_AGE") {
            if let Ok(n) = val.parse() {
                self.grading.max_age = n;
            }
        }

        // Logging settings
        if let Ok(val) = std::env::var("SCHOOL_ROSTER_LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Ok(val) = std::env::var("SCHOOL_ROSTER_LOG_FILE") {
            self.logging.file = Some(val);
        }
        if let Ok(val) = std::env::var("SCHOOL_ROSTER_LOG_JSON") {
            self.logging.json_format = val.to_lowercase() == "true" || val == "1";
        }
    }

    /// Apply `--data-file` / `--export-file` style overrides from the command line
    pub fn apply_cli_overrides(&mut self, data_file: Option<&str>, export_file: Option<&str>) {
        if let Some(path) = data_file {
            self.storage.data_file = expand_path(path);
        }
        if let Some(path) = export_file {
            self.storage.export_file = expand_path(path);
        }
    }

    /// Expand ~ and other path variables
    fn expand_paths(&mut self) {
        self.storage.data_file = expand_path(&self.storage.data_file);
        self.storage.export_file = expand_path(&self.storage.export_file);

        if let Some(ref file) = self.logging.file {
            self.logging.file = Some(expand_path(file));
        }
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        if self.storage.data_file.trim().is_empty() {
            return Err(Error::config_field_invalid(
                "storage.data_file",
                "Data file path cannot be empty",
            ));
        }
        if self.storage.export_file.trim().is_empty() {
            return Err(Error::config_field_invalid(
                "storage.export_file",
                "Export file path cannot be empty",
            ));
        }

        let grading = &self.grading;
        if !grading.min_grade.is_finite() || !grading.max_grade.is_finite() {
            return Err(Error::config_field_invalid(
                "grading",
                "Grade bounds must be finite numbers",
            ));
        }
        if grading.min_grade > grading.max_grade {
            return Err(Error::config_field_invalid(
                "grading.min_grade",
                format!(
                    "min_grade ({}) must not exceed max_grade ({})",
                    grading.min_grade, grading.max_grade
                ),
            ));
        }
        if grading.min_age > grading.max_age {
            return Err(Error::config_field_invalid(
                "grading.min_age",
                format!(
                    "min_age ({}) must not exceed max_age ({})",
                    grading.min_age, grading.max_age
                ),
            ));
        }

        // Validate log level
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(Error::config_field_invalid(
                "logging.level",
                format!(
                    "Invalid log level '{}'. Must be one of: {}",
                    self.logging.level,
                    valid_levels.join(", ")
                ),
            ));
        }

        Ok(())
    }

    pub fn data_file(&self) -> PathBuf {
        PathBuf::from(&self.storage.data_file)
    }

    pub fn export_file(&self) -> PathBuf {
        PathBuf::from(&self.storage.export_file)
    }
}

/// Expand ~ and environment variables in paths
fn expand_path(path: &str) -> String {
    shellexpand::full(path)
        .unwrap_or_else(|_| std::borrow::Cow::Borrowed(path))
        .into_owned()
}

/// Initialize a new configuration file
pub fn init_config(path: Option<&str>, force: bool) -> Result<PathBuf> {
    let config_path = path
        .map(|p| PathBuf::from(expand_path(p)))
        .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE));

    if config_path.exists() && !force {
        return Err(Error::Config(format!(
            "Configuration file already exists: {}. Use --force to overwrite.",
            config_path.display()
        )));
    }

    if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::write(parent, e))?;
    }

    fs::write(&config_path, generate_default_config()).map_err(|e| Error::write(&config_path, e))?;

    Ok(config_path)
}

/// Generate default configuration content with comments
fn generate_default_config() -> String {
    r#"# School Roster Configuration

[storage]
# JSON file used by save/load (loaded automatically on start-up if present)
data_file = "students.json"

# CSV file written by export
export_file = "students.csv"

[grading]
# Accepted grade range at the prompt
min_grade = 0.0
max_grade = 20.0

# Accepted age range at the prompt
min_age = 0
max_age = 120

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log file path (comment out to disable file logging)
# file = "~/.school-roster/logs/roster.log"

# Number of rotated log files to keep
max_files = 5

# Enable JSON formatted logging
json_format = false
"#
    .to_string()
}
