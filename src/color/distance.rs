use crate::color::Color;

/// Largest value `squared_distance` can return (three channels at full difference)
pub const MAX_SQUARED_DISTANCE: u32 = 3 * 255 * 255;

/// Squared Euclidean distance over the red, green and blue channels
///
/// Alpha is excluded. The square root is never taken here: the squared form
/// orders candidates identically and this runs in the innermost search loop.
#[inline]
pub fn squared_distance(a: Color, b: Color) -> u32 {
    let dr = u32::from(a.r.abs_diff(b.r));
    let dg = u32::from(a.g.abs_diff(b.g));
    let db = u32::from(a.b.abs_diff(b.b));
    dr * dr + dg * dg + db * db
}

/// True Euclidean RGB distance, for diagnostics only
pub fn euclidean_distance(a: Color, b: Color) -> f64 {
    f64::from(squared_distance(a, b)).sqrt()
}

/// Mean Euclidean distance between two equal-length color sequences
///
/// Pairs beyond the shorter sequence are ignored. Returns `0.0` when there is
/// nothing to compare.
pub fn mean_euclidean_error(output: &[Color], target: &[Color]) -> f64 {
    let count = output.len().min(target.len());
    if count == 0 {
        return 0.0;
    }
    let total: f64 = output
        .iter()
        .zip(target)
        .map(|(&o, &t)| euclidean_distance(o, t))
        .sum();
    total / count as f64
}
