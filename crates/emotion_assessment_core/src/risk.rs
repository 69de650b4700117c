//! crates/emotion_assessment_core/src/risk.rs
//!
//! Maps stress and anxiety levels onto a risk tier.

use crate::domain::RiskLevel;

/// Highest combined score still classified as `Low`.
pub const LOW_RISK_CEILING: f64 = 0.3;

/// Highest combined score still classified as `Medium`.
pub const MEDIUM_RISK_CEILING: f64 = 0.7;

/// Slack absorbing floating-point rounding when the combined score lands on a ceiling,
/// e.g. `(0.2 + 0.4) / 2` evaluating to `0.30000000000000004`.
pub const CEILING_TOLERANCE: f64 = 1e-9;

/// Classifies the mean of the two levels. Boundary values fall to the less severe tier.
///
/// A pure function of its inputs: equal levels always yield the same tier.
pub fn classify(stress_level: f64, anxiety_level: f64) -> RiskLevel {
    let combined = (stress_level + anxiety_level) / 2.0;
    if combined.is_nan() || combined <= LOW_RISK_CEILING + CEILING_TOLERANCE {
        RiskLevel::Low
    } else if combined <= MEDIUM_RISK_CEILING + CEILING_TOLERANCE {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lower_boundary_is_low() {
        assert_eq!(classify(0.3, 0.3), RiskLevel::Low);
    }

    #[test]
    fn upper_boundary_is_medium_not_high() {
        assert_eq!(classify(0.7, 0.7), RiskLevel::Medium);
    }

    #[test]
    fn just_above_upper_boundary_is_high() {
        assert_eq!(classify(0.701, 0.701), RiskLevel::High);
    }

    #[test]
    fn just_above_lower_boundary_is_medium() {
        assert_eq!(classify(0.301, 0.301), RiskLevel::Medium);
    }

    #[test]
    fn rounded_sums_on_a_ceiling_fall_to_the_lower_tier() {
        assert_eq!(classify(0.2, 0.4), RiskLevel::Low);
        assert_eq!(classify(0.1, 0.5), RiskLevel::Low);
        assert_eq!(classify(0.6, 0.8), RiskLevel::Medium);
    }

    #[test]
    fn extremes() {
        assert_eq!(classify(0.0, 0.0), RiskLevel::Low);
        assert_eq!(classify(1.0, 1.0), RiskLevel::High);
    }

    #[test]
    fn uses_the_mean_of_both_levels() {
        assert_eq!(classify(0.6, 0.0), RiskLevel::Low);
        assert_eq!(classify(1.0, 0.5), RiskLevel::High);
        assert_eq!(classify(1.0, 0.0), RiskLevel::Medium);
    }

    #[test]
    fn classification_is_deterministic_over_a_grid() {
        for s in 0..=20 {
            for a in 0..=20 {
                // Combined score in fortieths: (s + a) / 40.
                let fortieths = s + a;
                let expected = if fortieths <= 12 {
                    RiskLevel::Low
                } else if fortieths <= 28 {
                    RiskLevel::Medium
                } else {
                    RiskLevel::High
                };
                let (s, a) = (s as f64 / 20.0, a as f64 / 20.0);
                assert_eq!(classify(s, a), classify(s, a));
                assert_eq!(classify(s, a), expected);
            }
        }
    }
}
