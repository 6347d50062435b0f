//! Simple rolling mean.
//!
//! Mean over a trailing window of `window` values. The first `window - 1`
//! outputs are NaN, and any NaN inside a window makes that output NaN.

/// Rolling mean of `values` over a trailing `window`.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];

    if window == 0 || n < window {
        return result;
    }

    for end in (window - 1)..n {
        let slice = &values[(end + 1 - window)..=end];
        if slice.iter().any(|v| v.is_nan()) {
            continue;
        }
        result[end] = slice.iter().sum::<f64>() / window as f64;
    }

    result
}
