//! Logger Module
//!
//! Console logging based on `tracing-subscriber` with:
//! - Full, Compact or JSON output
//! - Color control (only on terminals)
//! - A reloadable filter so the level can change at runtime

pub mod config;
pub mod error;

pub use self::config::{LogFormat, LoggerConfig};
pub use self::error::LoggerError;

use std::io::IsTerminal;

use tracing_subscriber::{
    EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt,
};

/// Handle returned by [`init_logger`] to adjust the filter later on
#[derive(Clone)]
pub struct LoggerHandle {
    filter: reload::Handle<EnvFilter, Registry>,
}

impl LoggerHandle {
    /// Replaces the active filter, e.g. `handle.set_level("debug")`.
    pub fn set_level(&self, level: &str) -> Result<(), LoggerError> {
        let config = LoggerConfig {
            level: level.to_string(),
            ..LoggerConfig::default()
        };
        self.filter.reload(config.env_filter()?)?;
        Ok(())
    }
}

/// Installs the global subscriber for the given configuration.
///
/// # Errors
///
/// Fails on an invalid level or when a global subscriber is already set.
pub fn init_logger(config: LoggerConfig) -> Result<LoggerHandle, LoggerError> {
    let filter = config.env_filter()?;
    let (filter, handle) = reload::Layer::new(filter);

    let use_ansi = config.colored && std::io::stdout().is_terminal();
    let output = match config.format {
        LogFormat::Full => fmt::layer()
            .with_ansi(use_ansi)
            .with_target(true)
            .with_level(true)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .with_ansi(use_ansi)
            .with_target(true)
            .compact()
            .boxed(),
        LogFormat::Json => fmt::layer().with_ansi(false).json().boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(output)
        .try_init()?;

    Ok(LoggerHandle { filter: handle })
}
