//! Logging configuration

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::errors::ConsoleError;

/// Default verbosity, used when `RUST_LOG` is unset
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    #[serde(alias = "warning")]
    #[value(alias = "warning")]
    Warn,
    Error,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => LevelFilter::TRACE,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    pub log_level: LogLevel,

    /// JSON lines instead of human readable output
    pub json_format: bool,

    /// Also write daily rolling files here
    pub file_dir: Option<PathBuf>,
}

/// Install the global subscriber.
///
/// Terminal output goes to stderr; stdout carries command output only.
/// Hold the returned guard until exit or buffered file lines are lost.
pub fn init_logging(options: LogOptions) -> Result<Option<WorkerGuard>, ConsoleError> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from(options.log_level).into())
        .from_env_lossy();

    let terminal = match options.json_format {
        true => fmt::layer().json().with_writer(std::io::stderr).boxed(),
        false => fmt::layer().with_writer(std::io::stderr).boxed(),
    };

    let mut guard = None;
    let file = options.file_dir.as_ref().map(|dir| {
        let (writer, worker) =
            tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, "msconsole.log"));
        guard = Some(worker);
        fmt::layer().with_ansi(false).with_writer(writer).boxed()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(terminal)
        .with(file)
        .try_init()
        .map_err(|e| ConsoleError::ConfigError(e.to_string()))?;

    Ok(guard)
}
