//! One-dimensional temporal spectral smoothing (the "quick" PC filter).

use num_complex::Complex;
use rustfft::FftPlanner;

use crate::error::FilterError;
use crate::wk::build_freq_axis;

/// Bandpass-filters a single time series by zeroing every Fourier
/// component whose period lies outside `[period_min, period_max]` days.
///
/// The zero-frequency component has infinite period and is always
/// removed, so the output is mean-free. No zero padding is applied; this
/// is the fast, time-only variant used for quick PC calculations.
///
/// # Errors
///
/// Returns [`FilterError::InvalidConfig`] for a non-positive
/// `time_spacing` or an invalid period band, and
/// [`FilterError::EmptyInput`] for an empty series.
pub fn spectral_smoothing_1d(
    series: &[f64],
    time_spacing: f64,
    period_min: f64,
    period_max: f64,
) -> Result<Vec<f64>, FilterError> {
    if time_spacing <= 0.0 {
        return Err(FilterError::InvalidConfig(format!(
            "time_spacing must be > 0 (got {time_spacing})"
        )));
    }
    if !(period_min > 0.0 && period_min < period_max) {
        return Err(FilterError::InvalidConfig(format!(
            "period band must satisfy 0 < min < max (got {period_min}..{period_max})"
        )));
    }
    let n = series.len();
    if n == 0 {
        return Err(FilterError::EmptyInput { nt: 0, nl: 1 });
    }

    let mut buffer: Vec<Complex<f64>> = series.iter().map(|&v| Complex::new(v, 0.0)).collect();

    let mut planner = FftPlanner::new();
    planner.plan_fft_forward(n).process(&mut buffer);

    let freq_axis = build_freq_axis(n, 1.0 / time_spacing);
    for (value, &f) in buffer.iter_mut().zip(freq_axis.iter()) {
        let period = if f == 0.0 { f64::INFINITY } else { 1.0 / f.abs() };
        if period < period_min || period > period_max {
            *value = Complex::new(0.0, 0.0);
        }
    }

    planner.plan_fft_inverse(n).process(&mut buffer);
    let norm = 1.0 / n as f64;
    Ok(buffer.into_iter().map(|c| c.re * norm).collect())
}
