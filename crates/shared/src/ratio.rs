//! Ratio helpers that stay well-defined on empty denominators.

/// Rounded percentage of `part` over `whole`, clamped to `0..=100`.
///
/// Returns 0 when `whole` is 0.
pub fn percentage(part: u64, whole: u64) -> u32 {
    if whole == 0 {
        return 0;
    }
    let pct = (part as f64 / whole as f64 * 100.0).round();
    pct.clamp(0.0, 100.0) as u32
}

/// Rounded percentage for floating point totals, 0 when `whole` is not positive.
pub fn percentage_f64(part: f64, whole: f64) -> u32 {
    if whole.is_nan() || whole <= 0.0 || !part.is_finite() {
        return 0;
    }
    (part / whole * 100.0).round().clamp(0.0, 100.0) as u32
}

/// Mean of `sum` over `count`, 0 when `count` is 0.
pub fn average(sum: f64, count: u64) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
