//! Progress trend estimation over logged sets
//!
//! Fits a straight line through the per-session estimated one-rep max series
//! of an exercise using weighted least squares. Sessions are indexed by
//! ordinal (0, 1, 2, ...) rather than calendar distance, so irregular gaps
//! between gym visits do not stretch the fit. The fit can be restricted to a
//! trailing window, can weight recent sessions more heavily, and can be
//! anchored so the line passes exactly through the most recent session.

use crate::models::{ExerciseLog, RegressionConfig};
use crate::onerm::{OneRmCalculator, OneRmError};
use thiserror::Error;

/// Trend estimation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrendError {
    #[error("Insufficient data for trend estimation: {0}")]
    InsufficientData(String),

    #[error(transparent)]
    Metric(#[from] OneRmError),
}

/// A fitted progress line over session ordinals.
///
/// `intercept` already includes the anchoring `adjustment` when anchoring is
/// enabled, so `value_at` can be evaluated directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendLine {
    /// Estimated one-rep max gained (or lost) per session
    pub slope: f64,

    /// Estimated one-rep max at ordinal 0, after anchoring
    pub intercept: f64,

    /// Signed shift applied to the intercept so the line passes through the
    /// most recent session; 0.0 when anchoring is disabled
    pub adjustment: f64,
}

impl TrendLine {
    /// Evaluate the line at a session ordinal
    pub fn value_at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// A trend line together with the number of sessions it was fitted over
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendFit {
    pub line: TrendLine,

    /// Count of sessions kept after windowing; the fitted ordinals are
    /// `0..sessions`
    pub sessions: usize,
}

impl TrendFit {
    /// Projected estimated one-rep max for the next session, one ordinal
    /// past the fitted range
    pub fn next_session_estimate(&self) -> f64 {
        self.line.value_at(self.sessions as f64)
    }
}

/// Sort logs by date ascending and keep the trailing `window` entries.
/// A window of 0 keeps everything. The sort is stable, so entries logged
/// at the same instant keep their relative order.
pub fn chronological(logs: &[ExerciseLog], window: usize) -> Vec<ExerciseLog> {
    let mut sorted = logs.to_vec();
    sorted.sort_by_key(|log| log.date);
    if window > 0 && sorted.len() > window {
        sorted.drain(..sorted.len() - window);
    }
    sorted
}

/// Weighted least-squares trend fitting over an exercise's logged sets
pub struct TrendCalculator {
    config: RegressionConfig,
}

impl TrendCalculator {
    pub fn new() -> Self {
        Self::with_config(RegressionConfig::default())
    }

    pub fn with_config(config: RegressionConfig) -> Self {
        TrendCalculator { config }
    }

    /// Fit a trend line to the given logs.
    ///
    /// Input order is irrelevant; logs are sorted by date internally. Fails
    /// with `InsufficientData` when fewer than 2 sessions remain after
    /// windowing, and with `Metric` when any kept set has a rep count the
    /// strength formula cannot evaluate.
    pub fn fit(&self, logs: &[ExerciseLog]) -> Result<TrendFit, TrendError> {
        let kept = chronological(logs, self.config.window);
        let n = kept.len();
        if n < 2 {
            return Err(TrendError::InsufficientData(format!(
                "need at least 2 sessions, have {}",
                n
            )));
        }

        let one_rms = kept
            .iter()
            .map(|log| OneRmCalculator::estimate(log.weight, log.reps))
            .collect::<Result<Vec<f64>, OneRmError>>()?;

        let mut sum_w = 0.0;
        let mut sum_x = 0.0;
        let mut sum_y = 0.0;
        let mut sum_xy = 0.0;
        let mut sum_xx = 0.0;
        for (i, y) in one_rms.iter().enumerate() {
            let x = i as f64;
            let w = if self.config.weighted {
                (i + 1) as f64 / n as f64
            } else {
                1.0
            };
            sum_w += w;
            sum_x += w * x;
            sum_y += w * y;
            sum_xy += w * x * y;
            sum_xx += w * x * x;
        }

        // Distinct ordinals with positive weights keep this strictly
        // positive; guarded anyway so a pathological input can never divide
        // by zero.
        let denominator = sum_w * sum_xx - sum_x * sum_x;
        if denominator.abs() < 1e-12 {
            return Err(TrendError::InsufficientData(
                "regression denominator is zero".to_string(),
            ));
        }

        let slope = (sum_w * sum_xy - sum_x * sum_y) / denominator;
        let mut intercept = (sum_y - slope * sum_x) / sum_w;

        let adjustment = if self.config.fit_to_last_session {
            let x_last = (n - 1) as f64;
            let y_last = one_rms[n - 1];
            let shift = y_last - (slope * x_last + intercept);
            intercept += shift;
            shift
        } else {
            0.0
        };

        Ok(TrendFit {
            line: TrendLine {
                slope,
                intercept,
                adjustment,
            },
            sessions: n,
        })
    }
}

impl Default for TrendCalculator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn create_test_log(day: i64, weight: f64, reps: u32) -> ExerciseLog {
        ExerciseLog {
            id: day,
            exercise_id: 1,
            date: Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap() + Duration::days(day),
            weight,
            reps,
        }
    }

    fn plain_config() -> RegressionConfig {
        RegressionConfig {
            weighted: false,
            window: 0,
            fit_to_last_session: false,
        }
    }

    #[test]
    fn test_perfect_line_has_unit_slope() {
        // Single-rep sets, so estimated 1RM equals the weight: 1, 2, 3
        let logs = vec![
            create_test_log(0, 1.0, 1),
            create_test_log(1, 2.0, 1),
            create_test_log(2, 3.0, 1),
        ];

        let fit = TrendCalculator::with_config(plain_config())
            .fit(&logs)
            .unwrap();

        assert!((fit.line.slope - 1.0).abs() < 1e-9);
        assert!(fit.line.intercept.abs() < 1e-9);
        assert_eq!(fit.sessions, 3);
        // Next session projects to 4
        assert!((fit.next_session_estimate() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_insufficient_data() {
        let calculator = TrendCalculator::with_config(plain_config());

        let result = calculator.fit(&[]);
        assert!(matches!(result, Err(TrendError::InsufficientData(_))));

        let result = calculator.fit(&[create_test_log(0, 100.0, 5)]);
        assert!(matches!(result, Err(TrendError::InsufficientData(_))));
    }

    #[test]
    fn test_window_of_one_is_insufficient() {
        let logs = vec![
            create_test_log(0, 100.0, 5),
            create_test_log(1, 102.5, 5),
            create_test_log(2, 105.0, 5),
        ];
        let config = RegressionConfig {
            window: 1,
            ..plain_config()
        };

        let result = TrendCalculator::with_config(config).fit(&logs);
        assert!(matches!(result, Err(TrendError::InsufficientData(_))));
    }

    #[test]
    fn test_window_narrows_to_recent_trend() {
        // Five flat sessions at 100, then five climbing by 5 per session
        let mut logs = Vec::new();
        for day in 0..5 {
            logs.push(create_test_log(day, 100.0, 1));
        }
        for (i, day) in (5..10).enumerate() {
            logs.push(create_test_log(day, 105.0 + 5.0 * i as f64, 1));
        }

        let full = TrendCalculator::with_config(plain_config())
            .fit(&logs)
            .unwrap();
        let windowed = TrendCalculator::with_config(RegressionConfig {
            window: 5,
            ..plain_config()
        })
        .fit(&logs)
        .unwrap();

        assert_eq!(full.sessions, 10);
        assert_eq!(windowed.sessions, 5);
        assert!(windowed.line.slope > full.line.slope);
        assert!(windowed.next_session_estimate() > full.next_session_estimate());
    }

    #[test]
    fn test_weighted_follows_recent_acceleration() {
        // Monotonically increasing with growing jumps; later sessions pull
        // the weighted fit up
        let logs = vec![
            create_test_log(0, 100.0, 1),
            create_test_log(1, 102.0, 1),
            create_test_log(2, 105.0, 1),
            create_test_log(3, 109.0, 1),
            create_test_log(4, 114.0, 1),
        ];

        let unweighted = TrendCalculator::with_config(plain_config())
            .fit(&logs)
            .unwrap();
        let weighted = TrendCalculator::with_config(RegressionConfig {
            weighted: true,
            ..plain_config()
        })
        .fit(&logs)
        .unwrap();

        assert!(weighted.line.slope >= unweighted.line.slope);
        assert!(weighted.next_session_estimate() >= unweighted.next_session_estimate());
    }

    #[test]
    fn test_anchoring_passes_through_last_session() {
        // Noisy series; the anchored line must hit the last point exactly
        let logs = vec![
            create_test_log(0, 100.0, 1),
            create_test_log(1, 97.5, 1),
            create_test_log(2, 104.0, 1),
            create_test_log(3, 101.0, 1),
        ];

        let unanchored = TrendCalculator::with_config(plain_config())
            .fit(&logs)
            .unwrap();
        let anchored = TrendCalculator::with_config(RegressionConfig {
            fit_to_last_session: true,
            ..plain_config()
        })
        .fit(&logs)
        .unwrap();

        let x_last = 3.0;
        let y_last = 101.0;
        assert!((anchored.line.value_at(x_last) - y_last).abs() < 1e-9);
        assert_eq!(anchored.line.slope, unanchored.line.slope);
        assert!(
            (anchored.line.adjustment - (y_last - unanchored.line.value_at(x_last))).abs() < 1e-9
        );
        assert_eq!(unanchored.line.adjustment, 0.0);
    }

    #[test]
    fn test_input_order_is_irrelevant() {
        let sorted = vec![
            create_test_log(0, 100.0, 5),
            create_test_log(1, 102.5, 5),
            create_test_log(2, 101.0, 6),
            create_test_log(3, 105.0, 4),
        ];
        let shuffled = vec![
            sorted[2].clone(),
            sorted[0].clone(),
            sorted[3].clone(),
            sorted[1].clone(),
        ];

        let calculator = TrendCalculator::with_config(RegressionConfig {
            weighted: true,
            window: 3,
            fit_to_last_session: true,
        });
        let from_sorted = calculator.fit(&sorted).unwrap();
        let from_shuffled = calculator.fit(&shuffled).unwrap();

        assert_eq!(from_sorted, from_shuffled);
    }

    #[test]
    fn test_zero_window_keeps_entire_history() {
        let logs: Vec<ExerciseLog> = (0..8)
            .map(|day| create_test_log(day, 100.0 + day as f64, 3))
            .collect();

        let zero = TrendCalculator::with_config(plain_config())
            .fit(&logs)
            .unwrap();
        let explicit = TrendCalculator::with_config(RegressionConfig {
            window: 8,
            ..plain_config()
        })
        .fit(&logs)
        .unwrap();

        assert_eq!(zero, explicit);
    }

    #[test]
    fn test_rejects_reps_at_singularity_within_window() {
        let logs = vec![
            create_test_log(0, 100.0, 5),
            create_test_log(1, 50.0, 37),
            create_test_log(2, 102.5, 5),
        ];

        let result = TrendCalculator::with_config(plain_config()).fit(&logs);
        assert!(matches!(result, Err(TrendError::Metric(_))));
    }

    #[test]
    fn test_windowed_out_singularity_is_ignored() {
        // The 37-rep set falls outside the trailing window and must not
        // poison the fit
        let logs = vec![
            create_test_log(0, 50.0, 37),
            create_test_log(1, 100.0, 5),
            create_test_log(2, 102.5, 5),
        ];
        let config = RegressionConfig {
            window: 2,
            ..plain_config()
        };

        let fit = TrendCalculator::with_config(config).fit(&logs).unwrap();
        assert_eq!(fit.sessions, 2);
    }

    #[test]
    fn test_chronological_sorts_and_windows() {
        let logs = vec![
            create_test_log(2, 3.0, 1),
            create_test_log(0, 1.0, 1),
            create_test_log(1, 2.0, 1),
        ];

        let all = chronological(&logs, 0);
        assert_eq!(
            all.iter().map(|l| l.weight).collect::<Vec<_>>(),
            vec![1.0, 2.0, 3.0]
        );

        let last_two = chronological(&logs, 2);
        assert_eq!(
            last_two.iter().map(|l| l.weight).collect::<Vec<_>>(),
            vec![2.0, 3.0]
        );

        let oversized = chronological(&logs, 10);
        assert_eq!(oversized.len(), 3);
    }
}
