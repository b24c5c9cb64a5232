//! Appender configuration records
//!
//! One [`AppenderConfig`] describes one sink. Records can be built in code,
//! deserialized from JSON, or parsed from the command line (see
//! [`cmdline`](super::cmdline)).
//!
//! ```
//! use fanout_logger::core::{AppenderConfig, LogLevel};
//!
//! let configs = vec![
//!     AppenderConfig::stdout().threshold(LogLevel::Info),
//!     AppenderConfig::file("app.log").format("%t %l5 %m"),
//! ];
//! assert_eq!(configs.len(), 2);
//! ```

use super::appender::Appender;
use super::error::{LoggerError, Result};
use super::format::DEFAULT_MESSAGE_FORMAT;
use super::log_level::LogLevel;
use crate::appenders::{ConsoleAppender, FileAppender};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;

/// Maximum number of appenders a registry holds.
pub const MAX_APPENDER_COUNT: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AppenderConfig {
    Stdout(ConsoleConfig),
    File(FileConfig),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    #[serde(default, deserialize_with = "lenient_threshold")]
    pub threshold: LogLevel,
    #[serde(default)]
    pub format: Option<String>,
    /// Route error-severity events to the process error stream.
    #[serde(default)]
    pub error_to_stderr: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default, deserialize_with = "lenient_threshold")]
    pub threshold: LogLevel,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default, alias = "filename")]
    pub path: Option<PathBuf>,
}

/// Accept level names in any case, or raw numbers; anything else becomes
/// `Debug`.
fn lenient_threshold<'de, D>(deserializer: D) -> std::result::Result<LogLevel, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => LogLevel::parse_threshold(&s),
        Some(serde_json::Value::Number(n)) => n.as_i64().map_or(LogLevel::Debug, LogLevel::from_raw),
        _ => LogLevel::Debug,
    })
}

impl AppenderConfig {
    pub fn stdout() -> Self {
        AppenderConfig::Stdout(ConsoleConfig::default())
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        AppenderConfig::File(FileConfig {
            path: Some(path.into()),
            ..FileConfig::default()
        })
    }

    /// The appender installed when nothing else is configured.
    pub fn default_console() -> Self {
        AppenderConfig::Stdout(ConsoleConfig {
            threshold: LogLevel::Debug,
            format: Some(DEFAULT_MESSAGE_FORMAT.to_string()),
            error_to_stderr: true,
        })
    }

    /// Parse a JSON array of appender records.
    pub fn list_from_json(json: &str) -> Result<Vec<AppenderConfig>> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use = "builder methods return a new value"]
    pub fn threshold(mut self, level: LogLevel) -> Self {
        match &mut self {
            AppenderConfig::Stdout(c) => c.threshold = level,
            AppenderConfig::File(c) => c.threshold = level,
        }
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn format(mut self, format: impl Into<String>) -> Self {
        let format = Some(format.into());
        match &mut self {
            AppenderConfig::Stdout(c) => c.format = format,
            AppenderConfig::File(c) => c.format = format,
        }
        self
    }

    /// Only meaningful for stdout appenders; ignored for files.
    #[must_use = "builder methods return a new value"]
    pub fn error_to_stderr(mut self, enabled: bool) -> Self {
        if let AppenderConfig::Stdout(c) = &mut self {
            c.error_to_stderr = enabled;
        }
        self
    }

    pub fn kind(&self) -> &'static str {
        match self {
            AppenderConfig::Stdout(_) => "stdout",
            AppenderConfig::File(_) => "file",
        }
    }

    pub fn threshold_level(&self) -> LogLevel {
        match self {
            AppenderConfig::Stdout(c) => c.threshold,
            AppenderConfig::File(c) => c.threshold,
        }
    }

    pub fn format_str(&self) -> &str {
        let format = match self {
            AppenderConfig::Stdout(c) => c.format.as_deref(),
            AppenderConfig::File(c) => c.format.as_deref(),
        };
        format.unwrap_or(DEFAULT_MESSAGE_FORMAT)
    }

    /// Check this record on its own. `index` only labels the error.
    pub fn validate(&self, index: usize) -> Result<()> {
        if let AppenderConfig::File(c) = self {
            let empty = c.path.as_ref().map_or(true, |p| p.as_os_str().is_empty());
            if empty {
                return Err(LoggerError::config(
                    format!("appender #{}", index),
                    "file appender requires a non-empty path",
                ));
            }
        }
        Ok(())
    }

    /// Build the (unopened) sink for this record.
    pub(crate) fn build(&self) -> Box<dyn Appender> {
        match self {
            AppenderConfig::Stdout(c) => Box::new(ConsoleAppender::from_config(c)),
            AppenderConfig::File(c) => Box::new(FileAppender::from_config(c)),
        }
    }
}

/// Validate a whole appender list before any sink is opened.
pub fn validate_list(configs: &[AppenderConfig]) -> Result<()> {
    if configs.is_empty() {
        return Err(LoggerError::config("appender list", "no appenders configured"));
    }
    if configs.len() > MAX_APPENDER_COUNT {
        return Err(LoggerError::config(
            "appender list",
            format!(
                "{} appenders configured, at most {} allowed",
                configs.len(),
                MAX_APPENDER_COUNT
            ),
        ));
    }
    configs
        .iter()
        .enumerate()
        .try_for_each(|(i, config)| config.validate(i))
}
