use crate::models::{Exercise, ExerciseLog, RegressionConfig};
use crate::onerm::OneRmCalculator;
use crate::rounding::WeightRounder;
use crate::trend::{chronological, TrendCalculator};

/// A suggested next set with the method that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestedSet {
    pub weight: f64,
    pub reps: u32,
    pub method: SuggestionMethod,
}

/// Methods used to produce a suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionMethod {
    /// Projected one session forward along the fitted progress trend
    TrendProjection,

    /// Most recent logged weight, used when no usable trend exists
    LastLogged,
}

/// Next-set suggestion engine.
///
/// Composes the trend fit, the strength-metric inversion, and weight-step
/// rounding into a single read-only query over an exercise's history.
pub struct SuggestionEngine {
    config: RegressionConfig,
    rounder: WeightRounder,
}

impl SuggestionEngine {
    pub fn new() -> Self {
        Self::with_config(RegressionConfig::default())
    }

    pub fn with_config(config: RegressionConfig) -> Self {
        SuggestionEngine {
            config,
            rounder: WeightRounder::new(),
        }
    }

    /// Suggest weight and reps for the next set of an exercise.
    ///
    /// `target_reps` defaults to the most recent log's rep count. The
    /// projected weight is snapped to `weight_step`. When the trend cannot
    /// be fitted, any intermediate value is non-finite, or the step is
    /// degenerate, the suggestion falls back to the most recent logged
    /// weight verbatim. Returns `None` only when there is no history at
    /// all.
    pub fn suggest_next_set(
        &self,
        logs: &[ExerciseLog],
        weight_step: f64,
        target_reps: Option<u32>,
    ) -> Option<SuggestedSet> {
        let history = chronological(logs, 0);
        let last = history.last()?;
        let reps = target_reps.unwrap_or(last.reps);

        if let Some(weight) = self.project(&history, weight_step, reps) {
            return Some(SuggestedSet {
                weight,
                reps,
                method: SuggestionMethod::TrendProjection,
            });
        }

        Some(SuggestedSet {
            weight: last.weight,
            reps,
            method: SuggestionMethod::LastLogged,
        })
    }

    /// Trend-based projection, or `None` when any stage degenerates
    fn project(&self, history: &[ExerciseLog], weight_step: f64, reps: u32) -> Option<f64> {
        let fit = TrendCalculator::with_config(self.config).fit(history).ok()?;
        let predicted_one_rm = fit.next_session_estimate();
        let weight = OneRmCalculator::weight_for_reps(predicted_one_rm, reps).ok()?;
        if !predicted_one_rm.is_finite() || !weight.is_finite() {
            return None;
        }
        if !Exercise::valid_step(weight_step) {
            return None;
        }
        Some(self.rounder.round_to_step(weight, weight_step))
    }
}

impl Default for SuggestionEngine {
    fn default() -> Self {
        Self::new()
    }
}
