use rust_decimal::Decimal;

use crate::models::UsageTier;

/// Usage at or above this percentage is critical and raises a console alert.
pub const HIGH_USAGE_THRESHOLD: u32 = 80;

pub fn classify(usage_percentage: Decimal) -> UsageTier {
    if usage_percentage >= Decimal::from(HIGH_USAGE_THRESHOLD) {
        UsageTier::Critical
    } else if usage_percentage >= Decimal::from(50) {
        UsageTier::High
    } else if usage_percentage >= Decimal::from(25) {
        UsageTier::Medium
    } else {
        UsageTier::Low
    }
}

pub fn is_high_usage(usage_percentage: Decimal) -> bool {
    usage_percentage >= Decimal::from(HIGH_USAGE_THRESHOLD)
}

/// Progress bar fill, capped so over-quota rows don't overflow the bar.
pub fn bar_width(usage_percentage: Decimal) -> Decimal {
    usage_percentage.min(Decimal::ONE_HUNDRED)
}
