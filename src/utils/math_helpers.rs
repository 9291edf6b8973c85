//! Small helpers for the `(x, y)` tuples used throughout the crate.

#[inline]
pub fn vec_add(a: (f64, f64), b: (f64, f64)) -> (f64, f64) {
    (a.0 + b.0, a.1 + b.1)
}

#[inline]
pub fn vec_sub(a: (f64, f64), b: (f64, f64)) -> (f64, f64) {
    (a.0 - b.0, a.1 - b.1)
}

#[inline]
pub fn vec_scale(a: (f64, f64), s: f64) -> (f64, f64) {
    (a.0 * s, a.1 * s)
}

#[inline]
pub fn magnitude_squared(a: (f64, f64)) -> f64 {
    a.0 * a.0 + a.1 * a.1
}

#[inline]
pub fn magnitude(a: (f64, f64)) -> f64 {
    magnitude_squared(a).sqrt()
}

/// Mass-weighted average of two positions.
///
/// Returns `b` when the combined weight is zero so an empty accumulator
/// takes on the position of the first thing added to it.
///
/// # Examples
///
/// ```
/// use rs_nbody::utils::weighted_average;
///
/// let com = weighted_average((0.0, 0.0), 1.0, (3.0, 0.0), 2.0);
/// assert!((com.0 - 2.0).abs() < 1e-12);
/// assert_eq!(weighted_average((5.0, 5.0), 0.0, (1.0, 2.0), 0.0), (1.0, 2.0));
/// ```
#[inline]
pub fn weighted_average(a: (f64, f64), wa: f64, b: (f64, f64), wb: f64) -> (f64, f64) {
    let total = wa + wb;
    if total == 0.0 {
        return b;
    }
    ((a.0 * wa + b.0 * wb) / total, (a.1 * wa + b.1 * wb) / total)
}
