//! Unified error hierarchy for liftrs
//!
//! Aggregates the per-module error types behind one top-level enum with
//! user-facing messages and severity levels for the tracing system.

use thiserror::Error;

use crate::backup::BackupError;
use crate::database::DatabaseError;
use crate::onerm::OneRmError;
use crate::trend::TrendError;

/// Top-level error type for all liftrs operations
#[derive(Debug, Error)]
pub enum LiftrsError {
    /// Strength metric errors
    #[error("Strength metric error: {0}")]
    Metric(#[from] OneRmError),

    /// Trend estimation errors
    #[error("Trend error: {0}")]
    Trend(#[from] TrendError),

    /// Persistence failures from the SQLite layer
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Backup and restore errors
    #[error("Backup error: {0}")]
    Backup(#[from] BackupError),

    /// Bad values in the config file or on the command line
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Filesystem access failures
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invariant violations that indicate a bug
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for liftrs operations
pub type Result<T> = std::result::Result<T, LiftrsError>;

impl LiftrsError {
    /// Whether retrying the operation could succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, LiftrsError::Io(_))
    }

    /// How bad this error is for the current command
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // Estimation and lookup failures leave the command usable
            LiftrsError::Metric(_) => ErrorSeverity::Warning,
            LiftrsError::Trend(_) => ErrorSeverity::Warning,
            LiftrsError::Database(DatabaseError::NotFound { .. }) => ErrorSeverity::Warning,
            LiftrsError::Database(_) => ErrorSeverity::Error,
            LiftrsError::Backup(_) => ErrorSeverity::Error,
            LiftrsError::Configuration(_) => ErrorSeverity::Error,
            LiftrsError::Io(_) => ErrorSeverity::Error,
            LiftrsError::Internal(_) => ErrorSeverity::Critical,
        }
    }

    /// Message suitable for terminal display, without internal detail
    pub fn user_message(&self) -> String {
        match self {
            LiftrsError::Trend(TrendError::InsufficientData(_)) => {
                "Not enough sessions to compute a trend. Log at least two sets.".to_string()
            }
            LiftrsError::Metric(OneRmError::RepsOutOfRange(reps)) => {
                format!(
                    "Cannot estimate a one-rep max for {} reps; the formula tops out at 36.",
                    reps
                )
            }
            LiftrsError::Database(DatabaseError::NotFound { entity, id }) => {
                format!("No {} with id {} exists.", entity, id)
            }
            LiftrsError::Configuration(reason) => {
                format!("Configuration problem: {}", reason)
            }
            _ => self.to_string(),
        }
    }
}

/// Coarse severity classes used when reporting errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// The tool cannot continue safely
    Critical,
    /// The command failed but the data store is intact
    Error,
    /// Degraded output, the command still completes
    Warning,
}

impl ErrorSeverity {
    /// Level at which this severity should be logged
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            ErrorSeverity::Critical | ErrorSeverity::Error => tracing::Level::ERROR,
            ErrorSeverity::Warning => tracing::Level::WARN,
        }
    }
}
