use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An exercise the user tracks, e.g. "Bench Press"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    /// Unique identifier for the exercise
    pub id: i64,

    /// Display name
    pub name: String,

    /// Smallest weight increment available for this exercise in the gym
    /// (plate or machine step). Suggested weights are snapped to multiples
    /// of this value.
    pub weight_step: f64,

    /// Hidden exercises are kept in the store but excluded from listings
    pub hidden: bool,
}

/// A single logged set: how much weight was lifted for how many reps, when
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseLog {
    /// Unique identifier for the log entry
    pub id: i64,

    /// Exercise this set belongs to
    pub exercise_id: i64,

    /// When the set was performed. Logs are not guaranteed to be stored in
    /// chronological order; consumers sort by this field.
    pub date: DateTime<Utc>,

    /// Weight lifted
    pub weight: f64,

    /// Repetitions completed
    pub reps: u32,
}

/// A named workout grouping an ordered list of exercises
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    /// Unique identifier for the workout
    pub id: i64,

    /// Display name
    pub name: String,

    /// Last time the workout was opened, used to order workout listings
    pub last_viewed: DateTime<Utc>,
}

/// Membership of an exercise in a workout, with its position in the sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutEntry {
    pub workout_id: i64,
    pub exercise_id: i64,

    /// Zero-based position of the exercise within the workout
    pub position: u32,
}

/// Settings controlling how the progress trend is fitted
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionConfig {
    /// Weight recent sessions more heavily (linearly increasing weights)
    pub weighted: bool,

    /// Number of trailing sessions to fit over; 0 fits the entire history
    pub window: usize,

    /// Shift the fitted line so it passes exactly through the most recent
    /// session's estimated one-rep max
    pub fit_to_last_session: bool,
}

impl Default for RegressionConfig {
    fn default() -> Self {
        RegressionConfig {
            weighted: false,
            window: 0,
            fit_to_last_session: true,
        }
    }
}

impl Exercise {
    /// A usable plate increment: finite and strictly positive
    pub fn valid_step(step: f64) -> bool {
        step.is_finite() && step > 0.0
    }

    /// Whether this exercise has a usable weight increment configured
    pub fn has_valid_step(&self) -> bool {
        Self::valid_step(self.weight_step)
    }
}

impl ExerciseLog {
    /// Convenience constructor for a set logged now
    pub fn new(exercise_id: i64, weight: f64, reps: u32) -> Self {
        ExerciseLog {
            id: 0,
            exercise_id,
            date: Utc::now(),
            weight,
            reps,
        }
    }
}
