//! Integration tests for the suggestion pipeline
//!
//! Exercises the trend fit, one-rep max inversion and step rounding as one
//! pipeline, the way the CLI consumes them.

use chrono::{Duration, TimeZone, Utc};
use liftrs::models::{ExerciseLog, RegressionConfig};
use liftrs::suggest::{SuggestionEngine, SuggestionMethod};
use liftrs::trend::TrendCalculator;

fn session(day: i64, weight: f64, reps: u32) -> ExerciseLog {
    ExerciseLog {
        id: day,
        exercise_id: 1,
        date: Utc.with_ymd_and_hms(2024, 1, 8, 18, 30, 0).unwrap() + Duration::days(day),
        weight,
        reps,
    }
}

#[test]
fn test_weighted_fit_favors_recent_sessions() {
    // Gains accelerate toward the end of the block
    let logs = vec![
        session(0, 100.0, 5),
        session(2, 102.0, 5),
        session(4, 105.0, 5),
        session(6, 109.0, 5),
        session(8, 114.0, 5),
    ];

    let unweighted = TrendCalculator::new().fit(&logs).unwrap();
    let weighted = TrendCalculator::with_config(RegressionConfig {
        weighted: true,
        ..RegressionConfig::default()
    })
    .fit(&logs)
    .unwrap();

    assert!(weighted.line.slope > unweighted.line.slope);
    assert!(weighted.next_session_estimate() > unweighted.next_session_estimate());

    // A fine enough step keeps the difference visible after rounding
    let plain = SuggestionEngine::new()
        .suggest_next_set(&logs, 0.5, None)
        .unwrap();
    let recent = SuggestionEngine::with_config(RegressionConfig {
        weighted: true,
        ..RegressionConfig::default()
    })
    .suggest_next_set(&logs, 0.5, None)
    .unwrap();

    assert!((plain.weight - 117.5).abs() < 1e-9);
    assert!((recent.weight - 118.0).abs() < 1e-9);
}

#[test]
fn test_anchoring_shifts_projection_through_last_session() {
    // Last session beats the straight line, leaving a residual to anchor out
    let logs = vec![
        session(0, 100.0, 5),
        session(2, 100.0, 5),
        session(4, 105.0, 5),
    ];

    let anchored = TrendCalculator::new().fit(&logs).unwrap();
    let unanchored = TrendCalculator::with_config(RegressionConfig {
        fit_to_last_session: false,
        ..RegressionConfig::default()
    })
    .fit(&logs)
    .unwrap();

    // Same slope, shifted intercept
    assert!((anchored.line.slope - unanchored.line.slope).abs() < 1e-9);
    assert!((anchored.next_session_estimate() - 120.9375).abs() < 1e-9);
    assert!((unanchored.next_session_estimate() - 120.0).abs() < 1e-9);

    // The anchored line passes exactly through the last session's 1RM
    assert!((anchored.line.value_at(2.0) - 118.125).abs() < 1e-9);
}

#[test]
fn test_rounding_respects_weight_step() {
    let logs = vec![
        session(0, 100.0, 5),
        session(2, 102.5, 5),
        session(4, 105.0, 5),
    ];
    let engine = SuggestionEngine::new();

    // Raw projection is 107.5; coarser steps snap it differently
    let fine = engine.suggest_next_set(&logs, 2.5, None).unwrap();
    assert!((fine.weight - 107.5).abs() < 1e-9);

    let coarse = engine.suggest_next_set(&logs, 5.0, None).unwrap();
    assert!((coarse.weight - 110.0).abs() < 1e-9);
}

#[test]
fn test_degenerate_step_suggests_last_weight_verbatim() {
    let logs = vec![
        session(0, 100.0, 5),
        session(2, 102.5, 5),
        session(4, 105.0, 5),
    ];
    let engine = SuggestionEngine::new();

    for step in [0.0, -2.5, f64::NAN, f64::INFINITY] {
        let set = engine.suggest_next_set(&logs, step, None).unwrap();
        assert_eq!(set.method, SuggestionMethod::LastLogged);
        assert_eq!(set.weight, 105.0);
    }
}

#[test]
fn test_target_reps_inversion() {
    let logs = vec![
        session(0, 100.0, 5),
        session(2, 102.5, 5),
        session(4, 105.0, 5),
    ];
    let engine = SuggestionEngine::new();

    // Projected 1RM is 120.9375 either way; the inversion target differs
    let heavier = engine.suggest_next_set(&logs, 2.5, Some(1)).unwrap();
    assert_eq!(heavier.reps, 1);
    assert!((heavier.weight - 120.0).abs() < 1e-9);

    let lighter = engine.suggest_next_set(&logs, 2.5, Some(8)).unwrap();
    assert_eq!(lighter.reps, 8);
    assert!((lighter.weight - 97.5).abs() < 1e-9);
}

#[test]
fn test_same_day_sets_keep_logging_order() {
    // Two sets in one session still count as two trend points,
    // with the later-inserted set treated as the most recent
    let first = session(0, 100.0, 5);
    let mut second = session(0, 102.5, 5);
    second.id = 99;
    second.date = first.date;

    let set = SuggestionEngine::new()
        .suggest_next_set(&[first, second], 2.5, None)
        .unwrap();

    assert_eq!(set.method, SuggestionMethod::TrendProjection);
    assert!((set.weight - 105.0).abs() < 1e-9);
}

#[test]
fn test_empty_history_yields_nothing() {
    let set = SuggestionEngine::new().suggest_next_set(&[], 2.5, None);
    assert!(set.is_none());
}
