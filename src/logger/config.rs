//! Configuration types for the logger

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::logger::LoggerError;

const VALID_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

fn default_level() -> String {
    "info".to_string()
}

fn default_colored() -> bool {
    true
}

/// Logger configuration, loaded as the `[logger]` section of the settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// A plain level (`info`) or a full filter (`movie_store=debug,info`)
    #[serde(default = "default_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,

    /// ANSI colors, only honored when stdout is a terminal
    #[serde(default = "default_colored")]
    pub colored: bool,
}

impl LoggerConfig {
    pub fn validate(&self) -> Result<(), LoggerError> {
        self.env_filter().map(|_| ())
    }

    /// Builds the filter for this configuration.
    ///
    /// Bare words other than the five level names are rejected; `EnvFilter`
    /// would otherwise read them as target names and silently filter out
    /// everything else.
    pub fn env_filter(&self) -> Result<EnvFilter, LoggerError> {
        let level = self.level.trim();
        if VALID_LEVELS.contains(&level.to_lowercase().as_str()) || level.contains('=') {
            return EnvFilter::try_new(level).map_err(LoggerError::from);
        }

        Err(LoggerError::config(format!(
            "Invalid log level '{}'. Valid levels are: trace, debug, info, warn, error",
            self.level
        )))
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
            colored: default_colored(),
        }
    }
}

/// Output format of the fmt layer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Full => "full",
            LogFormat::Compact => "compact",
            LogFormat::Json => "json",
        }
    }
}

impl FromStr for LogFormat {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(LogFormat::Full),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(LoggerError::config(format!(
                "Invalid log format '{}'. Valid formats are: full, compact, json",
                s
            ))),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn with_level(level: &str) -> LoggerConfig {
        LoggerConfig {
            level: level.to_string(),
            ..LoggerConfig::default()
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = LoggerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.format, LogFormat::Full);
    }

    #[test]
    fn test_directives_are_accepted() {
        let config = with_level("movie_store=debug,diesel=warn");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bare_word_is_rejected() {
        let err = with_level("verbose").validate().unwrap_err();
        assert!(err.to_string().contains("Invalid log level 'verbose'"));
    }

    #[test]
    fn test_log_format_parsing() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("compact".parse::<LogFormat>().unwrap(), LogFormat::Compact);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    proptest! {
        #[test]
        fn property_level_names_valid_in_any_case(
            idx in 0usize..VALID_LEVELS.len(),
            upper in any::<bool>(),
        ) {
            let level = if upper {
                VALID_LEVELS[idx].to_uppercase()
            } else {
                VALID_LEVELS[idx].to_string()
            };
            prop_assert!(with_level(&level).validate().is_ok());
        }
    }
}
