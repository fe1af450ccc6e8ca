/// Fallback behavior for degenerate rounding inputs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundingPolicy {
    /// Substituted when the weight to round is NaN. The default of 0.0
    /// renders as "no suggestion" downstream.
    pub nan_weight_fallback: f64,
}

impl Default for RoundingPolicy {
    fn default() -> Self {
        RoundingPolicy {
            nan_weight_fallback: 0.0,
        }
    }
}

/// Snaps continuous weights to the discrete increments actually loadable
/// on a bar or machine.
pub struct WeightRounder {
    policy: RoundingPolicy,
}

impl WeightRounder {
    pub fn new() -> Self {
        Self::with_policy(RoundingPolicy::default())
    }

    pub fn with_policy(policy: RoundingPolicy) -> Self {
        WeightRounder { policy }
    }

    /// Round `weight` to the nearest multiple of `step`.
    ///
    /// Total over all float inputs: a NaN weight resolves to the policy
    /// fallback, and a NaN, non-finite, zero or negative step leaves the
    /// weight unchanged. Halfway values round away from zero.
    pub fn round_to_step(&self, weight: f64, step: f64) -> f64 {
        if weight.is_nan() {
            return self.policy.nan_weight_fallback;
        }
        if !step.is_finite() || step <= 0.0 {
            return weight;
        }
        (weight / step).round() * step
    }
}

impl Default for WeightRounder {
    fn default() -> Self {
        Self::new()
    }
}
