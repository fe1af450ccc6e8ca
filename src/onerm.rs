use thiserror::Error;

/// Errors from one-rep-max estimation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OneRmError {
    #[error("Cannot estimate one-rep max for {0} reps (formula is defined below 37)")]
    RepsOutOfRange(u32),
}

/// Highest rep count the Brzycki formula accepts. The denominator `37 - reps`
/// reaches zero at 37 and the estimate diverges.
pub const MAX_ESTIMABLE_REPS: u32 = 36;

/// Estimated one-rep max conversions based on the Brzycki formula.
///
/// The estimate normalizes sets of different rep counts onto a single
/// comparable scale, so a 100kg x 5 set and a 95kg x 8 set can be plotted
/// and regressed against each other.
pub struct OneRmCalculator;

impl OneRmCalculator {
    /// Estimate the one-rep max from a completed set:
    /// `1RM = weight * 36 / (37 - reps)`.
    ///
    /// A single-rep set maps to itself. Rep counts of 37 or more are
    /// rejected rather than producing an infinite or negative estimate.
    pub fn estimate(weight: f64, reps: u32) -> Result<f64, OneRmError> {
        if reps > MAX_ESTIMABLE_REPS {
            return Err(OneRmError::RepsOutOfRange(reps));
        }
        Ok(weight * 36.0 / (37.0 - reps as f64))
    }

    /// Invert the estimate: the working weight that corresponds to `one_rm`
    /// at the target rep count, `weight = 1RM * (37 - reps) / 36`.
    pub fn weight_for_reps(one_rm: f64, target_reps: u32) -> Result<f64, OneRmError> {
        if target_reps > MAX_ESTIMABLE_REPS {
            return Err(OneRmError::RepsOutOfRange(target_reps));
        }
        Ok(one_rm * (37.0 - target_reps as f64) / 36.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_rep_is_identity() {
        // 100 * 36 / (37 - 1) = 100
        let one_rm = OneRmCalculator::estimate(100.0, 1).unwrap();
        assert_eq!(one_rm, 100.0);
    }

    #[test]
    fn test_estimate_known_values() {
        // 100 * 36 / 32 = 112.5
        let one_rm = OneRmCalculator::estimate(100.0, 5).unwrap();
        assert!((one_rm - 112.5).abs() < 1e-9);

        // 80 * 36 / 27 = 106.666...
        let one_rm = OneRmCalculator::estimate(80.0, 10).unwrap();
        assert!((one_rm - 106.666_666_666_666_67).abs() < 1e-9);
    }

    #[test]
    fn test_zero_reps_is_defined() {
        // The formula is well-defined at 0 reps: 100 * 36 / 37
        let one_rm = OneRmCalculator::estimate(100.0, 0).unwrap();
        assert!((one_rm - 97.297_297).abs() < 1e-3);
        assert!(one_rm < 100.0);
    }

    #[test]
    fn test_estimate_rejects_singularity() {
        assert_eq!(
            OneRmCalculator::estimate(100.0, 37),
            Err(OneRmError::RepsOutOfRange(37))
        );
        assert_eq!(
            OneRmCalculator::estimate(100.0, 50),
            Err(OneRmError::RepsOutOfRange(50))
        );
        assert!(OneRmCalculator::estimate(100.0, 36).is_ok());
    }

    #[test]
    fn test_weight_for_reps_known_values() {
        // 112.5 * 32 / 36 = 100
        let weight = OneRmCalculator::weight_for_reps(112.5, 5).unwrap();
        assert!((weight - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_weight_for_reps_rejects_singularity() {
        assert_eq!(
            OneRmCalculator::weight_for_reps(100.0, 40),
            Err(OneRmError::RepsOutOfRange(40))
        );
    }

    #[test]
    fn test_round_trip_inversion() {
        for &weight in &[20.0, 62.5, 100.0, 142.5, 240.0] {
            for reps in 1..=12u32 {
                let one_rm = OneRmCalculator::estimate(weight, reps).unwrap();
                let back = OneRmCalculator::weight_for_reps(one_rm, reps).unwrap();
                assert!(
                    (back - weight).abs() < 1e-3,
                    "round trip drifted for {}x{}: got {}",
                    weight,
                    reps,
                    back
                );
            }
        }
    }

    // Property-based tests using proptest
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_round_trip_property(
            weight in 1.0f64..500.0,
            reps in 1u32..=36
        ) {
            let one_rm = OneRmCalculator::estimate(weight, reps).unwrap();
            let back = OneRmCalculator::weight_for_reps(one_rm, reps).unwrap();

            prop_assert!((back - weight).abs() < 1e-3);
        }

        #[test]
        fn test_estimate_at_least_weight_for_valid_reps(
            weight in 1.0f64..500.0,
            reps in 1u32..=36
        ) {
            // More reps at the same weight can only raise the estimate
            let one_rm = OneRmCalculator::estimate(weight, reps).unwrap();

            prop_assert!(one_rm >= weight - 1e-9);
            prop_assert!(one_rm.is_finite());
        }
    }
}
