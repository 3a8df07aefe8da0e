//! Serializable logger settings
//!
//! [`LoggerConfig`] mirrors the [`LoggerBuilder`] options so a logger can be
//! described in a configuration file. Every field except `path` is optional.
//!
//! ```
//! use category_logger::LoggerConfig;
//!
//! let config = LoggerConfig::from_json(r#"{
//!     "path": "/var/log/app.log",
//!     "prefix": "%t %L [%c] ",
//!     "time_format": "%Y-%m-%d %H:%M:%S",
//!     "default_level": "INFO",
//!     "categories": { "db": "DEBUG" }
//! }"#)?;
//! assert_eq!(config.categories["db"], "DEBUG");
//! # Ok::<(), category_logger::LoggerError>(())
//! ```

use super::error::Result;
use super::filter::LevelPolicy;
use super::level_table::LevelTable;
use super::logger::{Logger, LoggerBuilder};
use super::timestamp::TimestampFormat;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggerConfig {
    pub path: PathBuf,

    #[serde(default)]
    pub prefix: String,

    /// strftime string; empty selects RFC 3339
    #[serde(default)]
    pub time_format: String,

    /// Replaces the default level table when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub levels: Option<LevelTable>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_level: Option<String>,

    /// Category name to level name
    #[serde(default)]
    pub categories: BTreeMap<String, String>,

    #[serde(default)]
    pub strict_levels: bool,
}

impl LoggerConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            prefix: String::new(),
            time_format: String::new(),
            levels: None,
            default_level: None,
            categories: BTreeMap::new(),
            strict_levels: false,
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Builder carrying every setting except the path
    pub fn builder(&self) -> LoggerBuilder {
        let mut builder = Logger::builder()
            .prefix(self.prefix.as_str())
            .time_format(TimestampFormat::from(self.time_format.as_str()));

        if let Some(levels) = &self.levels {
            builder = builder.levels(levels.clone());
        }
        if let Some(level) = &self.default_level {
            builder = builder.default_level(level.as_str());
        }
        for (category, level) in &self.categories {
            builder = builder.category(category.as_str(), level.as_str());
        }
        if self.strict_levels {
            builder = builder.level_policy(LevelPolicy::Strict);
        }
        builder
    }

    pub fn open(&self) -> Result<Logger> {
        self.builder().open(&self.path)
    }
}

impl Logger {
    /// Open a logger described by `config`
    pub fn from_config(config: &LoggerConfig) -> Result<Self> {
        config.open()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::LoggerError;
    use crate::core::level_table::Severity;
    use tempfile::TempDir;

    #[test]
    fn test_minimal_config() {
        let config = LoggerConfig::from_json(r#"{"path": "app.log"}"#).expect("parse");
        assert_eq!(config, LoggerConfig::new("app.log"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = LoggerConfig::from_json(r#"{"path": "a.log", "rotate": true}"#)
            .expect_err("unknown field");
        assert!(matches!(err, LoggerError::Config(_)));
    }

    #[test]
    fn test_missing_path_rejected() {
        assert!(LoggerConfig::from_json(r#"{"prefix": "%L "}"#).is_err());
    }

    #[test]
    fn test_open_from_config() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let mut config = LoggerConfig::new(temp_dir.path().join("config.log"));
        config.prefix = "%L|%c ".to_string();
        config.default_level = Some("ERROR".to_string());
        config.categories.insert("db".to_string(), "ALL".to_string());

        let logger = Logger::from_config(&config).expect("open");
        assert_eq!(logger.default_threshold(), Severity(3));
        assert!(logger.is_printable("db", "DEBUG"));
        assert!(!logger.is_printable("web", "WARN"));
        assert_eq!(
            logger.sprintf("db", "DEBUG", format_args!("q")),
            "DEBUG|db q"
        );
    }

    #[test]
    fn test_custom_levels_and_strict() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let json = format!(
            r#"{{
                "path": {:?},
                "levels": {{"HIGH": 1, "LOW": 2}},
                "default_level": "HIGH",
                "strict_levels": true
            }}"#,
            temp_dir.path().join("levels.log")
        );
        let config = LoggerConfig::from_json(&json).expect("parse");
        let logger = config.open().expect("open");

        assert!(logger.is_printable("any", "HIGH"));
        assert!(!logger.is_printable("any", "LOW"));
        assert!(logger.set_category("any", "WARN").is_err());
    }

    #[test]
    fn test_json_roundtrip() {
        let mut config = LoggerConfig::new("/tmp/app.log");
        config.time_format = "%H:%M".to_string();
        config.categories.insert("net".to_string(), "INFO".to_string());

        let json = config.to_json().expect("serialize");
        assert_eq!(LoggerConfig::from_json(&json).expect("parse"), config);
    }
}
