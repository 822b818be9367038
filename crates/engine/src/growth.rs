//! Period-over-period growth comparator.

/// Growth rate in percent between the current window's view total and
/// the immediately preceding window of equal length.
///
/// A window coming from zero counts as 100% growth; two empty windows
/// are flat at 0%.
pub fn growth_rate(current: u64, previous: u64) -> f64 {
    if previous == 0 {
        if current > 0 {
            100.0
        } else {
            0.0
        }
    } else {
        (current as f64 - previous as f64) / previous as f64 * 100.0
    }
}
