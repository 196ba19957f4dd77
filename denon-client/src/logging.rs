//! Logging setup for applications embedding the client
//!
//! The library crates only emit `tracing` events. Binaries pick a
//! [`LoggingMode`] once at startup to install a subscriber.

use tracing_subscriber::{fmt, EnvFilter, Registry};

/// Logging mode for different use cases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoggingMode {
    /// No subscriber installed
    Silent,
    /// Compact stderr output
    Development,
    /// Verbose output with source locations
    Debug,
    /// One JSON object per line, for log shippers
    Json,
}

impl std::str::FromStr for LoggingMode {
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "silent" => Ok(LoggingMode::Silent),
            "development" => Ok(LoggingMode::Development),
            "debug" => Ok(LoggingMode::Debug),
            "json" => Ok(LoggingMode::Json),
            other => Err(LoggingError::InvalidEnv(format!(
                "unknown logging mode '{}'",
                other
            ))),
        }
    }
}

/// Logging configuration error
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Failed to initialize tracing subscriber: {0}")]
    TracingInit(String),

    #[error("Invalid environment variable: {0}")]
    InvalidEnv(String),
}

/// Initialize logging with the specified mode
///
/// # Environment Variables
///
/// - `DENON_LOG_LEVEL`: filter directive (e.g. `debug`, `denon_client=trace`)
/// - `RUST_LOG`: used when `DENON_LOG_LEVEL` is unset
pub fn init_logging(mode: LoggingMode) -> Result<(), LoggingError> {
    let default_level = match mode {
        LoggingMode::Debug => "debug",
        _ => "info",
    };
    install(mode, env_filter(default_level))
}

/// Initialize logging with an explicit filter, ignoring the environment
pub fn init_logging_with_level(mode: LoggingMode, level: &str) -> Result<(), LoggingError> {
    let filter = EnvFilter::try_new(level)
        .map_err(|e| LoggingError::InvalidEnv(format!("bad log level '{}': {}", level, e)))?;
    install(mode, filter)
}

/// Initialize logging from `DENON_LOG_MODE`
///
/// Accepts `silent`, `development`, `debug` or `json`. Defaults to
/// `Silent` when unset.
pub fn init_logging_from_env() -> Result<(), LoggingError> {
    let mode = match std::env::var("DENON_LOG_MODE") {
        Ok(value) => value.parse()?,
        Err(_) => LoggingMode::Silent,
    };

    init_logging(mode)
}

/// Whether a global subscriber is already installed
pub fn is_initialized() -> bool {
    tracing::dispatcher::has_been_set()
}

fn install(mode: LoggingMode, filter: EnvFilter) -> Result<(), LoggingError> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let result = match mode {
        LoggingMode::Silent => return Ok(()),
        LoggingMode::Development => Registry::default()
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .compact(),
            )
            .with(filter)
            .try_init(),
        LoggingMode::Debug => Registry::default()
            .with(
                fmt::layer()
                    .pretty()
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init(),
        LoggingMode::Json => Registry::default()
            .with(fmt::layer().json().with_current_span(false))
            .with(filter)
            .try_init(),
    };

    result.map_err(|e| LoggingError::TracingInit(e.to_string()))
}

/// DENON_LOG_LEVEL, then RUST_LOG, then `default_level`
fn env_filter(default_level: &str) -> EnvFilter {
    if let Ok(level) = std::env::var("DENON_LOG_LEVEL") {
        EnvFilter::new(level)
    } else if let Ok(rust_log) = std::env::var("RUST_LOG") {
        EnvFilter::new(rust_log)
    } else {
        EnvFilter::new(default_level)
    }
}
