//! Residual to vote-weight conversion.
//!
//! A point votes with weight 1 for cells it lies on exactly, and the weight falls
//! off linearly to 0 once the residual reaches the tolerance:
//!
//! ```text
//! weight(r) = 1 - clip(|r|, 0, tolerance) / tolerance
//! ```
//!
//! With the default tolerance of one grid unit this draws a ridge roughly one cell
//! thick along each point's parameter curve.

use crate::error::InvalidInput;

/// Default ridge half-width, in grid units.
pub const DEFAULT_TOLERANCE: f64 = 1.0;

/// Maps a residual to a vote weight in [0, 1].
#[derive(Clone, Debug, PartialEq)]
pub enum VotingPolicy {
    /// Linear falloff from 1 at zero residual to 0 at `tolerance`, 0 beyond.
    ClippedLinear {
        /// Residual at which the weight reaches zero.
        tolerance: f64,
    },
}

impl VotingPolicy {
    /// Clipped linear falloff with the given tolerance.
    pub fn new(tolerance: f64) -> Result<Self, InvalidInput> {
        let policy = Self::ClippedLinear { tolerance };
        policy.validate()?;
        Ok(policy)
    }

    /// The tolerance must be positive and finite. A hand-built variant may not be.
    pub fn validate(&self) -> Result<(), InvalidInput> {
        let tolerance = self.tolerance();
        if !(tolerance.is_finite() && tolerance > 0.0) {
            return Err(InvalidInput::NonPositiveTolerance(tolerance));
        }
        Ok(())
    }

    pub fn tolerance(&self) -> f64 {
        match self {
            Self::ClippedLinear { tolerance } => *tolerance,
        }
    }

    /// Vote weight for a residual.
    ///
    /// Exactly 1.0 when the residual is exactly zero, exactly 0.0 at or beyond the
    /// tolerance.
    #[inline]
    pub fn weight(&self, residual: f64) -> f64 {
        match self {
            Self::ClippedLinear { tolerance } => {
                1.0 - residual.abs().clamp(0.0, *tolerance) / tolerance
            }
        }
    }
}

impl Default for VotingPolicy {
    fn default() -> Self {
        Self::ClippedLinear {
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn unit_tolerance_falloff() {
        let policy = VotingPolicy::default();
        assert_eq!(policy.weight(0.0), 1.0);
        assert_relative_eq!(policy.weight(0.25), 0.75, epsilon = 1e-12);
        assert_relative_eq!(policy.weight(-0.5), 0.5, epsilon = 1e-12);
        assert_eq!(policy.weight(1.0), 0.0);
        assert_eq!(policy.weight(2.0), 0.0);
        assert_eq!(policy.weight(1e9), 0.0);
    }

    #[test]
    fn wider_tolerance_widens_the_ridge() {
        let policy = VotingPolicy::new(4.0).unwrap();
        assert_eq!(policy.tolerance(), 4.0);
        assert_relative_eq!(policy.weight(1.0), 0.75, epsilon = 1e-12);
        assert_relative_eq!(policy.weight(3.0), 0.25, epsilon = 1e-12);
        assert_eq!(policy.weight(4.0), 0.0);
    }

    #[test]
    fn weight_stays_in_unit_interval() {
        let policy = VotingPolicy::new(0.3).unwrap();
        for i in 0..200 {
            let w = policy.weight(i as f64 * 0.01 - 1.0);
            assert!((0.0..=1.0).contains(&w), "w={}", w);
        }
    }

    #[test]
    fn rejects_non_positive_tolerance() {
        assert_eq!(VotingPolicy::new(0.0), Err(InvalidInput::NonPositiveTolerance(0.0)));
        assert!(VotingPolicy::new(-1.0).is_err());
        assert!(VotingPolicy::new(f64::INFINITY).is_err());
    }

    #[test]
    fn hand_built_variant_is_checked() {
        let negative = VotingPolicy::ClippedLinear { tolerance: -1.0 };
        assert_eq!(negative.validate(), Err(InvalidInput::NonPositiveTolerance(-1.0)));
        let zero = VotingPolicy::ClippedLinear { tolerance: 0.0 };
        assert!(zero.validate().is_err());
        assert!(VotingPolicy::default().validate().is_ok());
    }
}
