// Library interface for liftrs modules
// This allows integration tests to access the core functionality

pub mod backup;
#[cfg(feature = "charts")]
pub mod chart;
pub mod config;
pub mod database;
pub mod error;
pub mod logging;
pub mod models;
pub mod onerm;
pub mod rounding;
pub mod suggest;
pub mod trend;

// Re-export commonly used types for convenience
pub use models::*;
pub use onerm::{OneRmCalculator, OneRmError, MAX_ESTIMABLE_REPS};
pub use rounding::{RoundingPolicy, WeightRounder};
pub use suggest::{SuggestedSet, SuggestionEngine, SuggestionMethod};
pub use trend::{TrendCalculator, TrendError, TrendFit, TrendLine};
pub use database::{Database, DatabaseError, DatabaseStats};
pub use error::{LiftrsError, Result};
pub use logging::{LogConfig, LogFormat, LogLevel};
