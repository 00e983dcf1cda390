//! Logging initialisation for the `wuf` CLI.
//!
//! Installs a global `tracing` subscriber writing to stderr, optionally as
//! JSON, and bridges the `log` facade so crates using either API emit
//! structured events.

use std::{env, sync::OnceLock};

use thiserror::Error;
use tracing::level_filters::LevelFilter;
use tracing_log::LogTracer;
use tracing_subscriber::{
    EnvFilter, Layer, fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Environment variable selecting the diagnostic format.
pub const LOG_FORMAT_ENV: &str = "WUF_LOG_FORMAT";

const DEFAULT_LEVEL: LevelFilter = LevelFilter::WARN;

static INITIALISED: OnceLock<()> = OnceLock::new();

/// Errors raised while initialising structured logging.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// Environment variable contained invalid UTF-8 data.
    #[error("environment variable `{name}` contained invalid UTF-8: {source}")]
    InvalidUnicode {
        /// Name of the offending environment variable.
        name: &'static str,
        /// Underlying lookup failure.
        #[source]
        source: env::VarError,
    },
    /// Unsupported log format requested via `WUF_LOG_FORMAT`.
    #[error("unsupported log format `{provided}`; expected `human` or `json`")]
    UnsupportedFormat {
        /// Raw value supplied by the user.
        provided: String,
    },
    /// Failed to install the global tracing subscriber.
    #[error("failed to install tracing subscriber: {source}")]
    InstallFailed {
        /// Error raised by `tracing_subscriber`.
        #[source]
        source: tracing_subscriber::util::TryInitError,
    },
}

/// Rendering used for diagnostics on stderr.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Human,
    /// One JSON object per event, with the current span list attached.
    Json,
}

impl LogFormat {
    /// Reads the format from `WUF_LOG_FORMAT`, defaulting to [`LogFormat::Human`]
    /// when the variable is unset.
    ///
    /// # Errors
    /// Returns [`LoggingError`] when the variable is not valid Unicode or names
    /// an unknown format.
    pub fn from_env() -> Result<Self, LoggingError> {
        match env::var(LOG_FORMAT_ENV) {
            Ok(raw) => Self::parse(&raw),
            Err(env::VarError::NotPresent) => Ok(Self::Human),
            Err(source @ env::VarError::NotUnicode(_)) => Err(LoggingError::InvalidUnicode {
                name: LOG_FORMAT_ENV,
                source,
            }),
        }
    }

    fn parse(raw: &str) -> Result<Self, LoggingError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "human" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            other => Err(LoggingError::UnsupportedFormat {
                provided: other.to_owned(),
            }),
        }
    }
}

/// Everything logging initialisation needs, resolved up front by the caller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Output rendering.
    pub format: LogFormat,
    /// Explicit level from the command line. `None` defers to `RUST_LOG`,
    /// falling back to `warn`.
    pub level: Option<LevelFilter>,
}

impl LoggingConfig {
    /// Builds a configuration from repeated `-v`/`-q` flags and the format
    /// environment variable.
    ///
    /// # Errors
    /// Propagates [`LogFormat::from_env`] failures.
    ///
    /// # Examples
    /// ```
    /// use tracing::level_filters::LevelFilter;
    /// use wuf_cli::logging::LoggingConfig;
    ///
    /// # fn main() -> Result<(), wuf_cli::logging::LoggingError> {
    /// let config = LoggingConfig::from_verbosity(2, 0)?;
    /// assert_eq!(config.level, Some(LevelFilter::DEBUG));
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_verbosity(verbose: u8, quiet: u8) -> Result<Self, LoggingError> {
        Ok(Self {
            format: LogFormat::from_env()?,
            level: level_for(verbose, quiet),
        })
    }

    fn env_filter(&self) -> EnvFilter {
        match self.level {
            Some(level) => EnvFilter::default().add_directive(level.into()),
            None => EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::default().add_directive(DEFAULT_LEVEL.into())),
        }
    }
}

/// Maps verbosity flag counts to a level; no flags leaves the choice to the
/// environment.
///
/// A single `-q` keeps errors. `tracing` has no fatal level to stop at, so
/// `-qq` and beyond switch logging off entirely and hide errors as well; the
/// process exit status is then the only failure signal.
const fn level_for(verbose: u8, quiet: u8) -> Option<LevelFilter> {
    match (verbose, quiet) {
        (0, 0) => None,
        (0, 1) => Some(LevelFilter::ERROR),
        (0, _) => Some(LevelFilter::OFF),
        (1, _) => Some(LevelFilter::INFO),
        (2, _) => Some(LevelFilter::DEBUG),
        (_, _) => Some(LevelFilter::TRACE),
    }
}

/// Install global structured logging if it has not already been configured.
///
/// Diagnostics are emitted to `stderr` so reports on `stdout` remain
/// parseable.
///
/// # Errors
/// Returns [`LoggingError`] if the subscriber cannot be installed for a
/// reason other than another subscriber already owning the global slot.
pub fn init_logging(config: &LoggingConfig) -> Result<(), LoggingError> {
    if INITIALISED.get().is_some() {
        return Ok(());
    }

    match install_subscriber(config) {
        Ok(()) => {}
        Err(LoggingError::InstallFailed { source }) => {
            tracing::debug!(%source, "structured logging already configured elsewhere");
        }
        Err(err) => return Err(err),
    }
    INITIALISED.get_or_init(|| ());
    Ok(())
}

fn install_subscriber(config: &LoggingConfig) -> Result<(), LoggingError> {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr);

    let fmt_layer = match config.format {
        LogFormat::Human => fmt_layer.boxed(),
        LogFormat::Json => fmt_layer
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .boxed(),
    };

    // Another logger may already own the `log` slot; keep it if so.
    if LogTracer::init().is_err() {
        tracing::debug!("log facade already bridged");
    }

    tracing_subscriber::registry()
        .with(config.env_filter())
        .with(fmt_layer)
        .try_init()
        .map_err(|source| LoggingError::InstallFailed { source })
}
