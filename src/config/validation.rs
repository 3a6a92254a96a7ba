//! Configuration validation logic
//!
//! Checks loaded values before a pool or subscriber is built from them.

use crate::config::error::ConfigError;
use crate::config::settings::{DatabaseConfig, Settings};

/// URL schemes accepted by the PostgreSQL connection manager
const VALID_URL_SCHEMES: &[&str] = &["postgres://", "postgresql://"];

impl DatabaseConfig {
    /// Validate database configuration
    ///
    /// # Validation Rules
    /// - A non-empty URL must use a PostgreSQL scheme
    /// - Without a URL, host and database name are required
    /// - Max and min connections must be greater than 0, min <= max
    /// - Connection timeout must be greater than 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url.is_empty() {
            if self.host.trim().is_empty() {
                return Err(ConfigError::validation(
                    "database.host",
                    "Database host is required when no database URL is given.",
                ));
            }
            if self.name.trim().is_empty() {
                return Err(ConfigError::validation(
                    "database.name",
                    "Database name is required when no database URL is given.",
                ));
            }
        } else if !self.is_valid_database_url() {
            return Err(ConfigError::validation(
                "database.url",
                "Invalid database URL format. Expected format: postgres://[user:password@]host[:port]/database",
            ));
        }

        if self.max_connections == 0 {
            return Err(ConfigError::validation(
                "database.max_connections",
                "Max connections must be greater than 0.",
            ));
        }

        if self.min_connections == 0 {
            return Err(ConfigError::validation(
                "database.min_connections",
                "Min connections must be greater than 0.",
            ));
        }

        if self.min_connections > self.max_connections {
            return Err(ConfigError::validation(
                "database.min_connections",
                format!(
                    "Min connections ({}) cannot exceed max connections ({}).",
                    self.min_connections, self.max_connections
                ),
            ));
        }

        if self.connection_timeout == 0 {
            return Err(ConfigError::validation(
                "database.connection_timeout",
                "Connection timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }

    fn is_valid_database_url(&self) -> bool {
        VALID_URL_SCHEMES
            .iter()
            .any(|scheme| self.url.starts_with(scheme))
    }
}

impl Settings {
    /// Validate every section, reporting the first failure.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.database.validate()?;
        self.logger
            .validate()
            .map_err(|e| ConfigError::validation("logger", e.to_string()))?;
        Ok(())
    }
}
