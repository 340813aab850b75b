//! In-place detrending and edge tapering of single time series.
//!
//! These helpers mutate the slice they are given; that is their contract.
//! [`wk_filter`](crate::wk::wk_filter) applies them to internal copies
//! only, so caller-owned arrays are never touched.

use std::f64::consts::PI;

/// Subtracts the ordinary-least-squares linear trend from `ts` in place.
///
/// The abscissa is the sample index `0..n`. A slice with fewer than two
/// samples is left unchanged.
pub fn detrend_in_place(ts: &mut [f64]) {
    let n = ts.len();
    if n < 2 {
        return;
    }
    let nf = n as f64;
    let x_mean = (nf - 1.0) / 2.0;
    let y_mean = ts.iter().sum::<f64>() / nf;

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    for (i, &y) in ts.iter().enumerate() {
        let dx = i as f64 - x_mean;
        sxy += dx * (y - y_mean);
        sxx += dx * dx;
    }
    let slope = sxy / sxx;
    let intercept = y_mean - slope * x_mean;

    for (i, y) in ts.iter_mut().enumerate() {
        *y -= slope * i as f64 + intercept;
    }
}

/// Applies a half-cosine taper to the first and last `window` samples of
/// `ts` in place.
///
/// The leading ramp rises from 0 at the first sample; the trailing ramp
/// falls to 0 at the last sample. On a zero-padded buffer the trailing
/// ramp only touches padding, so the taper effectively acts on the
/// leading edge of the real data.
pub fn taper_to_zero_in_place(ts: &mut [f64], window: usize) {
    let n = ts.len();
    if window == 0 || n < 2 * window {
        return;
    }
    let w = window as f64;
    for i in 0..window {
        let factor = 0.5 * (1.0 - (i as f64 * PI / w).cos());
        ts[i] *= factor;
        ts[n - 1 - i] *= factor;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn detrend_removes_linear_ramp() {
        let mut ts: Vec<f64> = (0..100).map(|i| 3.0 * i as f64 + 7.0).collect();
        detrend_in_place(&mut ts);
        for &v in &ts {
            assert_abs_diff_eq!(v, 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn detrend_preserves_oscillation_about_trend() {
        let n = 1000;
        let mut ts: Vec<f64> = (0..n)
            .map(|i| 0.5 * i as f64 + (2.0 * PI * i as f64 / 50.0).sin())
            .collect();
        detrend_in_place(&mut ts);
        // The sinusoid survives with near-unit amplitude.
        let max = ts.iter().cloned().fold(f64::MIN, f64::max);
        assert_relative_eq!(max, 1.0, epsilon = 0.05);
        // And the mean is zero after trend removal.
        let mean = ts.iter().sum::<f64>() / n as f64;
        assert_abs_diff_eq!(mean, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn detrend_short_slice_noop() {
        let mut ts = vec![42.0];
        detrend_in_place(&mut ts);
        assert_eq!(ts, vec![42.0]);
    }

    #[test]
    fn taper_endpoints_and_interior() {
        let mut ts = vec![1.0; 40];
        taper_to_zero_in_place(&mut ts, 10);
        // First sample fully suppressed, mid-ramp at half weight.
        assert_abs_diff_eq!(ts[0], 0.0, epsilon = 1e-12);
        assert_relative_eq!(ts[5], 0.5, epsilon = 1e-12);
        // Interior untouched.
        for &v in &ts[10..30] {
            assert_relative_eq!(v, 1.0, epsilon = 1e-12);
        }
        // Trailing ramp mirrors the leading one.
        assert_relative_eq!(ts[34], 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(ts[39], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn taper_zero_window_noop() {
        let mut ts = vec![1.0, 2.0, 3.0];
        taper_to_zero_in_place(&mut ts, 0);
        assert_eq!(ts, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn taper_oversized_window_noop() {
        let mut ts = vec![1.0, 2.0, 3.0];
        taper_to_zero_in_place(&mut ts, 2);
        assert_eq!(ts, vec![1.0, 2.0, 3.0]);
    }
}
