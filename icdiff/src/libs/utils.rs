/// Significant figures of the reported values
pub const SIGNIFICANT_DIGITS: i32 = 7;

/// Formats a value to `digits` significant figures using fixed notation.
///
/// The number of decimals is `digits - 1 - trunc(log10(value))`, never below zero.
/// Zero, negative and non-finite values have no usable magnitude and get `digits - 1` decimals.
pub fn format_significant(value: f64, digits: i32) -> String {
    let magnitude = value.log10().trunc();
    let decimals = if magnitude.is_finite() {
        (f64::from(digits - 1) - magnitude).max(0.0) as usize
    } else {
        usize::try_from(digits - 1).unwrap_or(0)
    };
    format!("{value:.decimals$}")
}
