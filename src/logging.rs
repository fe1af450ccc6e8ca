//! Logging setup for the liftrs CLI.
//!
//! Log output goes to stderr; command results own stdout. An optional
//! file sink writes JSON lines and can rotate daily.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan, writer::BoxMakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

/// How much to log, where to, and in what shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Minimum level emitted unless `RUST_LOG` overrides it
    pub level: LogLevel,

    /// Console output format
    pub format: LogFormat,

    /// Optional log file; console only when unset
    pub file_path: Option<PathBuf>,

    /// Rotate the log file daily instead of appending forever
    pub rotation: bool,

    /// Record span enter/close events in pretty output
    pub include_spans: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Warn,
            format: LogFormat::Compact,
            file_path: None,
            rotation: true,
            include_spans: false,
        }
    }
}

/// Verbosity threshold for emitted events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Name used in filter directives and config files
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }

    pub fn tracing_level(self) -> Level {
        match self {
            Self::Error => Level::ERROR,
            Self::Warn => Level::WARN,
            Self::Info => Level::INFO,
            Self::Debug => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            other => Err(format!(
                "unrecognized log level '{}', expected error, warn, info, debug or trace",
                other
            )),
        }
    }
}

/// Shape of console log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Multi-line human-readable output with source locations
    Pretty,
    /// One JSON object per event
    Json,
    /// Single terse line per event
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            "compact" => Ok(Self::Compact),
            other => Err(format!(
                "unrecognized log format '{}', expected pretty, json or compact",
                other
            )),
        }
    }
}

/// Install the global tracing subscriber.
///
/// Honors `RUST_LOG` when set; otherwise events from this crate at
/// `config.level` and above are emitted.
pub fn init_logging(config: &LogConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("liftrs={}", config.level.as_str())));

    let span_events = if config.include_spans {
        FmtSpan::ENTER | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let console = match config.format {
        LogFormat::Pretty => fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_line_number(true)
            .with_span_events(span_events)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_current_span(config.include_spans)
            .with_span_list(config.include_spans)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_writer(std::io::stderr)
            .with_target(false)
            .boxed(),
    };

    let registry = tracing_subscriber::registry().with(filter).with(console);

    match &config.file_path {
        Some(path) => {
            let file_layer = fmt::layer()
                .json()
                .with_writer(log_writer(path, config.rotation)?)
                .with_target(true)
                .with_ansi(false);
            registry.with(file_layer).init();
        }
        None => registry.init(),
    }

    tracing::debug!(level = ?config.level, format = ?config.format, "logging initialized");

    Ok(())
}

/// Open the file sink, creating parent directories as needed.
fn log_writer(path: &Path, rotate: bool) -> anyhow::Result<BoxMakeWriter> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }

    if rotate {
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("liftrs.log");
        Ok(BoxMakeWriter::new(tracing_appender::rolling::daily(
            dir, name,
        )))
    } else {
        let file = fs::OpenOptions::new().create(true).append(true).open(path)?;
        Ok(BoxMakeWriter::new(Arc::new(file)))
    }
}
