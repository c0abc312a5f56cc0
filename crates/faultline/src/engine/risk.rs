//! Cascade risk classification.

use crate::domain::RiskLevel;

/// Classify a cascade from its depth and impact percentage.
///
/// The tiers are evaluated in order, first match wins, and boundary values
/// belong to the higher tier:
///
/// | condition                       | level      |
/// |---------------------------------|------------|
/// | depth >= 5 or impact >= 50%     | Critical   |
/// | depth >= 4 or impact >= 30%     | High       |
/// | depth >= 3 or impact >= 15%     | Moderate   |
/// | depth >= 2 or impact >= 5%      | Low        |
/// | otherwise                       | Negligible |
pub fn classify_cascade(depth: usize, impact_pct: f64) -> RiskLevel {
    if depth >= 5 || impact_pct >= 50.0 {
        RiskLevel::Critical
    } else if depth >= 4 || impact_pct >= 30.0 {
        RiskLevel::High
    } else if depth >= 3 || impact_pct >= 15.0 {
        RiskLevel::Moderate
    } else if depth >= 2 || impact_pct >= 5.0 {
        RiskLevel::Low
    } else {
        RiskLevel::Negligible
    }
}
