//! Numeric kernels over value slices
//!
//! Plain slice arithmetic shared by the filter crates. Empty inputs yield NaN
//! rather than an error.

use num_traits::ToPrimitive;

/// Widen any primitive number to `f64`; unrepresentable values become NaN
#[inline]
pub fn to_f64<T: ToPrimitive>(value: &T) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

/// Exclusive prefix sums: `out[j]` is the sum of the first `j` values
///
/// `out.len() == values.len() + 1`, so the sum of `values[a..b]` is
/// `out[b] - out[a]`.
pub fn prefix_sums<T: ToPrimitive>(values: &[T]) -> Vec<f64> {
    let mut sums = Vec::with_capacity(values.len() + 1);
    let mut running = 0.0;
    sums.push(running);
    for v in values {
        running += to_f64(v);
        sums.push(running);
    }
    sums
}

/// First-order difference with a leading zero
pub fn difference<T: ToPrimitive>(values: &[T]) -> Vec<f64> {
    let mut out = Vec::with_capacity(values.len());
    if values.is_empty() {
        return out;
    }
    out.push(0.0);
    out.extend(values.windows(2).map(|w| to_f64(&w[1]) - to_f64(&w[0])));
    out
}

/// Arithmetic mean, NaN when empty
pub fn mean<T: ToPrimitive>(values: &[T]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().map(to_f64).sum::<f64>() / values.len() as f64
}

/// Population variance (divides by `n`), NaN when empty
pub fn population_variance<T: ToPrimitive>(values: &[T]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let m = mean(values);
    values.iter().map(|v| (to_f64(v) - m).powi(2)).sum::<f64>() / values.len() as f64
}

/// Minimum and maximum, `None` when empty
pub fn min_max<T: ToPrimitive>(values: &[T]) -> Option<(f64, f64)> {
    values.iter().map(to_f64).fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}
