//! # Logger
//!
//! A centralized logging bootstrap for the site.
//! It installs a global `tracing` subscriber with environment-based filtering and
//! a console layer that fits the target:
//!
//! * native targets (tests, tooling) get a compact `fmt` layer on stderr;
//! * `wasm32` gets [`tracing_wasm::WASMLayer`], which writes to the browser console.
//!
//! Use [`LoggerBuilder::env_filter`] to set module-directed filters
//! (e.g., `"vitae=debug,vitae_platform=warn"`), in addition to `RUST_LOG` on native targets.
//!
//! ## Example
//!
//! ```rust
//! # use vitae_logger::{Logger, LevelFilter};
//!
//! let _logger = Logger::builder()
//!     .name("vitae")
//!     .console(true)
//!     .level(LevelFilter::DEBUG)
//!     .init()
//!     .unwrap();
//! ```

mod error;

pub use crate::error::LoggerError;
pub use tracing::level_filters::LevelFilter;

use private::Sealed;
use std::str::FromStr;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

#[derive(Debug)]
pub struct LoggerConfig {
    console: bool,
    level: LevelFilter,
    env_filter: Option<String>,
    rejected_level: Option<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self { console: true, level: LevelFilter::INFO, env_filter: None, rejected_level: None }
    }
}

#[derive(Debug)]
pub struct NoName;
#[derive(Debug)]
pub struct WithName(String);

mod private {
    pub trait Sealed {}
}
impl Sealed for NoName {}
impl Sealed for WithName {}

/// A builder for configuring and initializing the global tracing subscriber.
#[derive(Debug)]
pub struct LoggerBuilder<N: Sealed = NoName> {
    config: LoggerConfig,
    name: N,
}

impl LoggerBuilder<NoName> {
    /// Sets the name of the logger.
    pub fn name(self, name: impl Into<String>) -> LoggerBuilder<WithName> {
        LoggerBuilder { name: WithName(name.into()), config: self.config }
    }
}

impl LoggerBuilder<WithName> {
    /// Configures the minimum log level to be emitted.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.config.level = level;
        self
    }

    /// Parses a level name (`"trace"` .. `"error"`, `"off"`), keeping the current level if invalid.
    ///
    /// An invalid name is reported once the subscriber is installed.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn level_name(mut self, level: &str) -> Self {
        match LevelFilter::from_str(level) {
            Ok(parsed) => {
                self.config.level = parsed;
                self.config.rejected_level = None;
            },
            Err(_) => self.config.rejected_level = Some(level.to_owned()),
        }
        self
    }

    /// Adds an explicit env filter (e.g., `vitae=debug`).
    ///
    /// `RUST_LOG` still overrides on native targets; this is a programmatic default.
    /// Invalid filters will cause [`LoggerBuilder::init`] to return an error.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn env_filter(mut self, filter: impl Into<String>) -> Self {
        self.config.env_filter = Some(filter.into());
        self
    }

    /// Enables console logging.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn console(mut self, enabled: bool) -> Self {
        self.config.console = enabled;
        self
    }

    /// Consumes the builder and initializes the global tracing subscriber.
    ///
    /// # Errors
    /// Returns [`LoggerError::Subscriber`] if a global subscriber has already been set.
    /// Returns [`LoggerError::InvalidConfiguration`] for invalid builder settings.
    pub fn init(self) -> Result<Logger, LoggerError> {
        validate_config(&self.name.0)?;

        let env_filter = build_env_filter(&self.config)?;

        let mut layers = Vec::new();

        if self.config.console {
            #[cfg(target_arch = "wasm32")]
            layers.push(tracing_wasm::WASMLayer::default().boxed());

            #[cfg(not(target_arch = "wasm32"))]
            layers.push(tracing_subscriber::fmt::layer().compact().with_ansi(true).boxed());
        }

        if layers.is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "No logging layers enabled. Enable console output.".into(),
                context: None,
            });
        }

        tracing_subscriber::registry().with(env_filter).with(layers).try_init()?;

        tracing::debug!(logger = %self.name.0, level = %self.config.level, "Logger initialized");
        if let Some(rejected) = &self.config.rejected_level {
            tracing::warn!(level = %rejected, "Unknown log level, keeping {}", self.config.level);
        }

        Ok(Logger { name: self.name.0, level: self.config.level })
    }
}

/// A handle to the initialized logging system.
///
/// Keep it alive for the lifetime of the page; dropping it records the shutdown.
#[must_use = "Dropping this handle marks the logging system as shut down."]
#[derive(Debug)]
pub struct Logger {
    name: String,
    level: LevelFilter,
}

impl Logger {
    /// Returns a new [`LoggerBuilder`] to configure the global tracing subscriber.
    ///
    /// The `name` identifies the application in the initialization record.
    ///
    /// # Example
    ///
    /// ```rust
    /// use vitae_logger::{LevelFilter, Logger};
    ///
    /// let _logger = Logger::builder()
    ///     .name("my-site")
    ///     .level(LevelFilter::DEBUG)
    ///     .init()
    ///     .unwrap();
    /// ```
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder { config: LoggerConfig::default(), name: NoName }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn level(&self) -> LevelFilter {
        self.level
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        tracing::debug!(logger = %self.name, "Logging system shutting down");
    }
}

fn validate_config(name: &str) -> Result<(), LoggerError> {
    if name.trim().is_empty() {
        return Err(LoggerError::InvalidConfiguration {
            message: "Logger name cannot be empty".into(),
            context: None,
        });
    }

    Ok(())
}

fn build_env_filter(config: &LoggerConfig) -> Result<EnvFilter, LoggerError> {
    let builder = EnvFilter::builder().with_default_directive(config.level.into());
    config.env_filter.as_ref().map_or_else(
        || Ok(builder.from_env_lossy()),
        |filter| {
            builder.parse(filter).map_err(|e| LoggerError::InvalidConfiguration {
                message: format!("Invalid env filter '{filter}': {e}").into(),
                context: None,
            })
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_logger_builder_initial_state() {
        let logger_builder = Logger::builder().name("test-site").env_filter("vitae=debug");
        assert!(logger_builder.config.console);
        assert_eq!(logger_builder.config.level, LevelFilter::INFO);
        assert_eq!(logger_builder.config.env_filter.as_deref(), Some("vitae=debug"));
    }

    #[test]
    #[serial]
    fn test_level_name_parsing() {
        let builder = Logger::builder().name("test-site").level_name("debug");
        assert_eq!(builder.config.level, LevelFilter::DEBUG);

        let builder = builder.level_name("chatty");
        assert_eq!(builder.config.level, LevelFilter::DEBUG, "invalid names keep the level");
        assert_eq!(builder.config.rejected_level.as_deref(), Some("chatty"));

        let builder = builder.level_name("warn");
        assert_eq!(builder.config.level, LevelFilter::WARN);
        assert!(builder.config.rejected_level.is_none());
    }

    #[test]
    #[serial]
    fn test_invalid_configuration_is_rejected() {
        let err = Logger::builder().name("  ").init().expect_err("blank name must fail");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let err = Logger::builder()
            .name("test-site")
            .console(false)
            .init()
            .expect_err("no layers must fail");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let err = Logger::builder()
            .name("test-site")
            .env_filter("vitae=[")
            .init()
            .expect_err("bad filter must fail");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }
}
