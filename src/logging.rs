//! Tracing subscriber setup.

use crate::error::{Error, Result};
use clap::ValueEnum;
use std::io::IsTerminal;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_LEVEL: &str = "info";

/// Log line format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LoggerFormat {
    #[default]
    Text,
    Json,
}

/// Logger configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggerConfig {
    pub format: LoggerFormat,
    /// Filter expression such as `info` or `node_label_copier=debug,warn`.
    /// Falls back to `RUST_LOG`, then to `info`.
    pub level: Option<String>,
}

impl LoggerConfig {
    /// Builds the level filter.
    pub fn env_filter(&self) -> Result<EnvFilter> {
        match &self.level {
            Some(level) => EnvFilter::try_new(level)
                .map_err(|e| Error::Configuration(format!("invalid log level '{}': {}", level, e))),
            None => Ok(EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))),
        }
    }
}

/// Installs the global subscriber. Logs are written to stderr.
pub fn init_logger(cfg: &LoggerConfig) -> Result<()> {
    let filter = cfg.env_filter()?;
    let registry = tracing_subscriber::registry().with(filter);
    let installed = match cfg.format {
        LoggerFormat::Text => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(std::io::stderr().is_terminal()),
            )
            .try_init(),
        LoggerFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
    };
    installed.map_err(|_| Error::Configuration("logger already initialized".to_string()))
}
