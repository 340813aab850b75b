//! The two-dimensional (time x longitude) Wheeler–Kiladis bandpass filter.

use ndarray::Array2;
use num_complex::Complex;
use rustfft::FftPlanner;
use tracing::debug;

use crate::error::FilterError;
use crate::preprocess::{detrend_in_place, taper_to_zero_in_place};
use crate::reorder::{reorder_from_legacy, reorder_to_legacy};

/// Length of the fixed zero-padding buffer of the reference pipeline.
pub const KILADIS_PADDING_LENGTH: usize = 1 << 17;

/// Duration of the edge taper of the reference pipeline, in days.
pub const KILADIS_TAPER_DAYS: f64 = 10.0;

/// Configuration for the Wheeler–Kiladis filter.
///
/// The defaults reproduce the reference pipeline; deviating from them is
/// only useful for alternative datasets (e.g. modeled data with coarser
/// sampling) or for fast tests.
///
/// # Example
///
/// ```ignore
/// use omi_filter::FilterConfig;
///
/// let config = FilterConfig::new()
///     .with_padding_length(1 << 12)
///     .with_taper_days(10.0);
/// ```
#[derive(Clone, Debug)]
pub struct FilterConfig {
    /// Number of samples of the zero-padded time dimension.
    padding_length: usize,
    /// Duration of the half-cosine edge taper in days.
    taper_days: f64,
}

impl FilterConfig {
    /// Creates a new `FilterConfig` with the reference defaults:
    /// `padding_length = 2^17`, `taper_days = 10.0`.
    pub fn new() -> Self {
        Self {
            padding_length: KILADIS_PADDING_LENGTH,
            taper_days: KILADIS_TAPER_DAYS,
        }
    }

    /// Sets the zero-padding buffer length.
    pub fn with_padding_length(mut self, padding_length: usize) -> Self {
        self.padding_length = padding_length;
        self
    }

    /// Sets the edge taper duration in days.
    pub fn with_taper_days(mut self, taper_days: f64) -> Self {
        self.taper_days = taper_days;
        self
    }

    /// Returns the zero-padding buffer length.
    pub fn padding_length(&self) -> usize {
        self.padding_length
    }

    /// Returns the edge taper duration in days.
    pub fn taper_days(&self) -> f64 {
        self.taper_days
    }

    fn validate(&self) -> Result<(), FilterError> {
        if self.padding_length == 0 {
            return Err(FilterError::InvalidConfig(
                "padding_length must be > 0".to_string(),
            ));
        }
        if self.taper_days < 0.0 {
            return Err(FilterError::InvalidConfig(
                "taper_days must be >= 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// The period and wavenumber band kept by the filter.
///
/// Periods are in days, wavenumbers in cycles per globe (positive =
/// eastward in the legacy sign convention).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BandLimits {
    period_min: f64,
    period_max: f64,
    wn_min: f64,
    wn_max: f64,
}

impl BandLimits {
    /// Creates a new band.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidConfig`] unless
    /// `0 < period_min < period_max` and `wn_min < wn_max`.
    pub fn new(
        period_min: f64,
        period_max: f64,
        wn_min: f64,
        wn_max: f64,
    ) -> Result<Self, FilterError> {
        if !(period_min > 0.0 && period_min < period_max) {
            return Err(FilterError::InvalidConfig(format!(
                "period band must satisfy 0 < min < max (got {period_min}..{period_max})"
            )));
        }
        if wn_min >= wn_max {
            return Err(FilterError::InvalidConfig(format!(
                "wavenumber band must satisfy min < max (got {wn_min}..{wn_max})"
            )));
        }
        Ok(Self {
            period_min,
            period_max,
            wn_min,
            wn_max,
        })
    }

    /// Band used to filter OLR before the PC projection:
    /// periods 20..96 days, all wavenumbers up to 720.
    pub fn mjo_pc() -> Self {
        Self {
            period_min: 20.0,
            period_max: 96.0,
            wn_min: -720.0,
            wn_max: 720.0,
        }
    }

    /// Band used to filter OLR before the EOF computation:
    /// periods 30..96 days, eastward wavenumbers 0..720.
    pub fn mjo_eof() -> Self {
        Self {
            period_min: 30.0,
            period_max: 96.0,
            wn_min: 0.0,
            wn_max: 720.0,
        }
    }

    /// Returns the minimal retained period in days.
    pub fn period_min(&self) -> f64 {
        self.period_min
    }

    /// Returns the maximal retained period in days.
    pub fn period_max(&self) -> f64 {
        self.period_max
    }

    /// Returns the minimal retained wavenumber.
    pub fn wn_min(&self) -> f64 {
        self.wn_min
    }

    /// Returns the maximal retained wavenumber.
    pub fn wn_max(&self) -> f64 {
        self.wn_max
    }
}

/// Bandpass-filters a `(time, longitude)` OLR slice in time and longitude
/// direction according to the reference Kiladis algorithm.
///
/// The time dimension is open-ended and described by `time_spacing` (in
/// days); the longitude dimension is taken to cover exactly one globe, so
/// its length alone fixes the wavenumber grid.
///
/// The input is copied; the caller's array is never mutated.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`FilterError::InvalidConfig`] | bad config or `time_spacing <= 0` |
/// | [`FilterError::EmptyInput`] | zero rows or columns |
/// | [`FilterError::SeriesTooLong`] | more time steps than the padding buffer |
pub fn wk_filter(
    data: &Array2<f64>,
    time_spacing: f64,
    bands: &BandLimits,
    config: &FilterConfig,
) -> Result<Array2<f64>, FilterError> {
    config.validate()?;
    if time_spacing <= 0.0 {
        return Err(FilterError::InvalidConfig(format!(
            "time_spacing must be > 0 (got {time_spacing})"
        )));
    }

    let (orig_nt, nl) = data.dim();
    if orig_nt == 0 || nl == 0 {
        return Err(FilterError::EmptyInput { nt: orig_nt, nl });
    }
    let nt = config.padding_length;
    if orig_nt > nt {
        return Err(FilterError::SeriesTooLong {
            len: orig_nt,
            max: nt,
        });
    }

    let dataperday = 1.0 / time_spacing;
    let taper_window = (config.taper_days * dataperday) as usize;

    // Detrend each longitude's series into the zero-padded buffer, then
    // taper the edges. The trailing ramp only touches padding.
    let mut padded = Array2::<f64>::zeros((nt, nl));
    let mut column = vec![0.0; nt];
    for l in 0..nl {
        column.iter_mut().for_each(|v| *v = 0.0);
        for (t, v) in column.iter_mut().take(orig_nt).enumerate() {
            *v = data[[t, l]];
        }
        detrend_in_place(&mut column[..orig_nt]);
        taper_to_zero_in_place(&mut column, taper_window);
        for (t, &v) in column.iter().enumerate() {
            padded[[t, l]] = v;
        }
    }

    // Forward 2D FFT, then the legacy component reordering.
    let spectrum = fft2(&padded.mapv(|v| Complex::new(v, 0.0)), FftDirection::Forward);
    let mut spectrum = reorder_to_legacy(&spectrum);

    let freq_axis = build_freq_axis(nt, dataperday);
    let wn_axis = build_wn_axis(nl);

    let kept = apply_trapezoid_mask(&mut spectrum, &freq_axis, &wn_axis, bands);
    debug!(kept, nt, nl, "spectral bins retained by trapezoid mask");

    // Back to natural ordering, inverse transform, drop the padding.
    let spectrum = reorder_from_legacy(&spectrum);
    let filtered = fft2(&spectrum, FftDirection::Inverse);
    let norm = 1.0 / (nt * nl) as f64;

    let mut result = Array2::<f64>::zeros((orig_nt, nl));
    for t in 0..orig_nt {
        for l in 0..nl {
            result[[t, l]] = filtered[[t, l]].re * norm;
        }
    }
    Ok(result)
}

/// The frequency grid of the legacy pipeline, in cycles per day.
///
/// Index `i <= n/2` maps to `+i * dataperday / n`, larger indices to
/// `-(n - i) * dataperday / n`.
pub(crate) fn build_freq_axis(n: usize, dataperday: f64) -> Vec<f64> {
    (0..n)
        .map(|i| {
            if i <= n / 2 {
                i as f64 * dataperday / n as f64
            } else {
                -((n - i) as f64) * dataperday / n as f64
            }
        })
        .collect()
}

/// The wavenumber grid of the legacy pipeline, in cycles per globe.
///
/// Index `i <= n/2` maps to `-i`, larger indices to `n - i`. The sign is
/// mirrored relative to the frequency axis; this matches the reference
/// Fortran convention, under which positive wavenumbers are eastward.
pub(crate) fn build_wn_axis(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| {
            if i <= n / 2 {
                -(i as f64)
            } else {
                (n - i) as f64
            }
        })
        .collect()
}

/// Zeroes every spectral bin outside the trapezoidal (wavenumber,
/// frequency) region, including the Hermitian mirror of each zeroed bin
/// so the inverse transform stays real-valued. Returns the number of
/// retained bins in the scanned half-plane.
fn apply_trapezoid_mask(
    spectrum: &mut Array2<Complex<f64>>,
    freq_axis: &[f64],
    wn_axis: &[f64],
    bands: &BandLimits,
) -> usize {
    let nt = freq_axis.len();
    let nl = wn_axis.len();

    // Boundary coefficients named as in the reference code.
    let f1 = 1.0 / bands.period_max;
    let f2 = f1;
    let f3 = 1.0 / bands.period_min;
    let f4 = f3;
    let s1 = bands.wn_min;
    let s2 = bands.wn_max;
    let s3 = bands.wn_min;
    let s4 = bands.wn_max;

    let mut kept = 0usize;
    for i_f in 0..=nt / 2 {
        for i_wn in 0..nl {
            let ff = freq_axis[i_f];
            let ss = wn_axis[i_wn];
            let inside = ff >= (ss * (f1 - f2) + f2 * s1 - f1 * s2) / (s1 - s2)
                && ff <= (ss * (f3 - f4) + f4 * s3 - f3 * s4) / (s3 - s4)
                && ss >= (ff * (s3 - s1) - f1 * s3 + f3 * s1) / (f3 - f1)
                && ss <= (ff * (s4 - s2) - f2 * s4 + f4 * s2) / (f4 - f2);
            if inside {
                kept += 1;
                continue;
            }
            spectrum[[i_f, i_wn]] = Complex::new(0.0, 0.0);
            match (i_f, i_wn) {
                (0, 0) => {}
                (_, 0) => {
                    let ind_f = nt - i_f;
                    if ind_f < nt {
                        spectrum[[ind_f, 0]] = Complex::new(0.0, 0.0);
                    }
                }
                (0, _) => {
                    let ind_wn = nl - i_wn;
                    if ind_wn < nl {
                        spectrum[[0, ind_wn]] = Complex::new(0.0, 0.0);
                    }
                }
                _ => {
                    let ind_f = nt - i_f;
                    let ind_wn = nl - i_wn;
                    if ind_f < nt && ind_wn < nl {
                        spectrum[[ind_f, ind_wn]] = Complex::new(0.0, 0.0);
                    }
                }
            }
        }
    }
    kept
}

enum FftDirection {
    Forward,
    Inverse,
}

/// Unnormalized 2D FFT: length-`nt` transforms along the time axis for
/// every longitude, then length-`nl` transforms along the longitude axis
/// for every time step.
fn fft2(data: &Array2<Complex<f64>>, direction: FftDirection) -> Array2<Complex<f64>> {
    let (nt, nl) = data.dim();
    let mut planner = FftPlanner::new();
    let fft_t = match direction {
        FftDirection::Forward => planner.plan_fft_forward(nt),
        FftDirection::Inverse => planner.plan_fft_inverse(nt),
    };
    let fft_l = match direction {
        FftDirection::Forward => planner.plan_fft_forward(nl),
        FftDirection::Inverse => planner.plan_fft_inverse(nl),
    };

    let mut out = data.clone();

    let mut column = vec![Complex::new(0.0, 0.0); nt];
    for l in 0..nl {
        for (t, v) in column.iter_mut().enumerate() {
            *v = out[[t, l]];
        }
        fft_t.process(&mut column);
        for (t, &v) in column.iter().enumerate() {
            out[[t, l]] = v;
        }
    }

    for mut row in out.rows_mut() {
        fft_l.process(row.as_slice_mut().expect("row is contiguous"));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::f64::consts::PI;

    #[test]
    fn config_defaults() {
        let config = FilterConfig::new();
        assert_eq!(config.padding_length(), 1 << 17);
        assert_relative_eq!(config.taper_days(), 10.0);
    }

    #[test]
    fn config_builder() {
        let config = FilterConfig::new()
            .with_padding_length(4096)
            .with_taper_days(5.0);
        assert_eq!(config.padding_length(), 4096);
        assert_relative_eq!(config.taper_days(), 5.0);
    }

    #[test]
    fn config_default_trait() {
        let a = FilterConfig::new();
        let b = FilterConfig::default();
        assert_eq!(a.padding_length(), b.padding_length());
        assert_relative_eq!(a.taper_days(), b.taper_days());
    }

    #[test]
    fn band_validation() {
        assert!(BandLimits::new(20.0, 96.0, -720.0, 720.0).is_ok());
        assert!(BandLimits::new(96.0, 20.0, -720.0, 720.0).is_err());
        assert!(BandLimits::new(0.0, 96.0, -720.0, 720.0).is_err());
        assert!(BandLimits::new(20.0, 96.0, 720.0, -720.0).is_err());
    }

    #[test]
    fn band_presets() {
        let pc = BandLimits::mjo_pc();
        assert_relative_eq!(pc.period_min(), 20.0);
        assert_relative_eq!(pc.period_max(), 96.0);
        assert_relative_eq!(pc.wn_min(), -720.0);
        assert_relative_eq!(pc.wn_max(), 720.0);

        let eof = BandLimits::mjo_eof();
        assert_relative_eq!(eof.period_min(), 30.0);
        assert_relative_eq!(eof.wn_min(), 0.0);
    }

    #[test]
    fn freq_axis_legacy_shape() {
        let axis = build_freq_axis(8, 1.0);
        let expected = [0.0, 0.125, 0.25, 0.375, 0.5, -0.375, -0.25, -0.125];
        for (i, &e) in expected.iter().enumerate() {
            assert_relative_eq!(axis[i], e, epsilon = 1e-12);
        }
    }

    #[test]
    fn freq_axis_scales_with_spacing() {
        // Half-day sampling doubles the frequency range.
        let axis = build_freq_axis(8, 2.0);
        assert_relative_eq!(axis[4], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn wn_axis_mirrored_sign() {
        let axis = build_wn_axis(6);
        let expected = [0.0, -1.0, -2.0, -3.0, 2.0, 1.0];
        for (i, &e) in expected.iter().enumerate() {
            assert_relative_eq!(axis[i], e, epsilon = 1e-12);
        }
    }

    #[test]
    fn rejects_zero_time_spacing() {
        let data = Array2::zeros((16, 4));
        let err = wk_filter(
            &data,
            0.0,
            &BandLimits::mjo_pc(),
            &FilterConfig::new().with_padding_length(64),
        )
        .unwrap_err();
        assert!(matches!(err, FilterError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_too_long_series() {
        let data = Array2::zeros((256, 4));
        let err = wk_filter(
            &data,
            1.0,
            &BandLimits::mjo_pc(),
            &FilterConfig::new().with_padding_length(128),
        )
        .unwrap_err();
        assert_eq!(err, FilterError::SeriesTooLong { len: 256, max: 128 });
    }

    #[test]
    fn rejects_empty_input() {
        let data = Array2::zeros((0, 4));
        let err = wk_filter(
            &data,
            1.0,
            &BandLimits::mjo_pc(),
            &FilterConfig::new().with_padding_length(128),
        )
        .unwrap_err();
        assert_eq!(err, FilterError::EmptyInput { nt: 0, nl: 4 });
    }

    #[test]
    fn input_is_not_mutated() {
        let data = Array2::from_shape_fn((64, 4), |(t, l)| {
            (2.0 * PI * t as f64 / 16.0).sin() + l as f64
        });
        let copy = data.clone();
        wk_filter(
            &data,
            1.0,
            &BandLimits::mjo_pc(),
            &FilterConfig::new().with_padding_length(256),
        )
        .unwrap();
        assert_eq!(data, copy);
    }

    #[test]
    fn fft2_roundtrip() {
        let data = Array2::from_shape_fn((8, 4), |(t, l)| {
            Complex::new((t * 4 + l) as f64, 0.0)
        });
        let spectrum = fft2(&data, FftDirection::Forward);
        let back = fft2(&spectrum, FftDirection::Inverse);
        let norm = 1.0 / 32.0;
        for (a, b) in data.iter().zip(back.iter()) {
            assert_abs_diff_eq!(a.re, b.re * norm, epsilon = 1e-9);
            assert_abs_diff_eq!(a.im, b.im * norm, epsilon = 1e-9);
        }
    }

    #[test]
    fn mask_keeps_dc_free_band_only() {
        // A constant field has all energy at (f=0, wn=0), which is outside
        // any band with period_max < infinity.
        let data = Array2::from_elem((100, 8), 5.0);
        let filtered = wk_filter(
            &data,
            1.0,
            &BandLimits::mjo_pc(),
            &FilterConfig::new().with_padding_length(512),
        )
        .unwrap();
        for &v in filtered.iter() {
            assert_abs_diff_eq!(v, 0.0, epsilon = 1e-9);
        }
    }
}
