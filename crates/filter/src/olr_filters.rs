//! Whole-field filtering wrappers: apply the spectral filters latitude
//! row by latitude row to a full OLR cube.

use ndarray::{Array3, Axis};
use tracing::info;

use omi_grid::OlrData;

use crate::error::FilterError;
use crate::smooth1d::spectral_smoothing_1d;
use crate::wk::{BandLimits, FilterConfig, wk_filter};

/// Bandpass-filters an OLR field in time and longitude direction.
///
/// Each latitude row is treated as an independent `(time, longitude)`
/// slice and run through [`wk_filter`]; intermediate spectra are dropped
/// after each row, so the working set stays one padded slice.
///
/// # Errors
///
/// Propagates [`FilterError`] from the slice filter and grid
/// reconstruction.
pub fn filter_olr_temporally_and_longitudinally(
    olr: &OlrData,
    bands: &BandLimits,
    config: &FilterConfig,
) -> Result<OlrData, FilterError> {
    let time_spacing = olr.time_spacing_days();
    let mut filtered = Array3::<f64>::zeros((olr.n_time(), olr.n_lat(), olr.n_long()));

    for (ilat, &lat) in olr.lat().iter().enumerate() {
        info!(lat, "filtering latitude row");
        let slice = olr.olr().index_axis(Axis(1), ilat).to_owned();
        let result = wk_filter(&slice, time_spacing, bands, config)?;
        filtered.index_axis_mut(Axis(1), ilat).assign(&result);
    }

    Ok(OlrData::new(
        filtered,
        olr.time().to_vec(),
        olr.lat().clone(),
        olr.long().clone(),
    )?)
}

/// Filters an OLR field with the band used before the EOF computation
/// (periods 30..96 days, eastward wavenumbers 0..720).
pub fn filter_olr_for_mjo_eof_calculation(
    olr: &OlrData,
    config: &FilterConfig,
) -> Result<OlrData, FilterError> {
    filter_olr_temporally_and_longitudinally(olr, &BandLimits::mjo_eof(), config)
}

/// Filters an OLR field with the band used before the PC projection
/// (periods 20..96 days, all wavenumbers).
pub fn filter_olr_for_mjo_pc_calculation(
    olr: &OlrData,
    config: &FilterConfig,
) -> Result<OlrData, FilterError> {
    filter_olr_temporally_and_longitudinally(olr, &BandLimits::mjo_pc(), config)
}

/// Quick PC preprocessing: time-only spectral smoothing (periods 20..96
/// days) of every grid point series, without longitudinal masking.
pub fn filter_olr_for_mjo_pc_calculation_1d(olr: &OlrData) -> Result<OlrData, FilterError> {
    let time_spacing = olr.time_spacing_days();
    let mut filtered = Array3::<f64>::zeros((olr.n_time(), olr.n_lat(), olr.n_long()));

    info!("smoothing data temporally");
    for ilat in 0..olr.n_lat() {
        for ilong in 0..olr.n_long() {
            let series: Vec<f64> = olr
                .olr()
                .index_axis(Axis(1), ilat)
                .index_axis(Axis(1), ilong)
                .to_vec();
            let smoothed = spectral_smoothing_1d(&series, time_spacing, 20.0, 96.0)?;
            for (t, &v) in smoothed.iter().enumerate() {
                filtered[[t, ilat, ilong]] = v;
            }
        }
    }

    Ok(OlrData::new(
        filtered,
        olr.time().to_vec(),
        olr.lat().clone(),
        olr.long().clone(),
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use chrono::NaiveDate;
    use ndarray::Array1;
    use std::f64::consts::PI;

    fn daily_dates(n: usize) -> Vec<NaiveDate> {
        let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        (0..n).map(|i| start + chrono::Days::new(i as u64)).collect()
    }

    fn sinusoid_olr(n_time: usize, period: f64) -> OlrData {
        let n_lat = 2;
        let n_long = 8;
        let cube = Array3::from_shape_fn((n_time, n_lat, n_long), |(t, _, l)| {
            (2.0 * PI * (t as f64 / period - 2.0 * l as f64 / n_long as f64)).cos()
        });
        OlrData::new(
            cube,
            daily_dates(n_time),
            Array1::from_iter((0..n_lat).map(|i| i as f64 * 2.5)),
            Array1::from_iter((0..n_long).map(|i| i as f64 * 45.0)),
        )
        .unwrap()
    }

    #[test]
    fn wrappers_preserve_axes() {
        let olr = sinusoid_olr(400, 40.0);
        let config = FilterConfig::new().with_padding_length(1024);
        let filtered = filter_olr_for_mjo_pc_calculation(&olr, &config).unwrap();
        assert_eq!(filtered.time(), olr.time());
        assert_eq!(filtered.lat(), olr.lat());
        assert_eq!(filtered.long(), olr.long());
    }

    #[test]
    fn quick_filter_keeps_in_band_signal() {
        let olr = sinusoid_olr(960, 40.0);
        let filtered = filter_olr_for_mjo_pc_calculation_1d(&olr).unwrap();
        for (a, b) in olr.olr().iter().zip(filtered.olr().iter()) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-8);
        }
    }

    #[test]
    fn quick_filter_removes_slow_signal() {
        let olr = sinusoid_olr(960, 240.0);
        let filtered = filter_olr_for_mjo_pc_calculation_1d(&olr).unwrap();
        for &v in filtered.olr().iter() {
            assert_abs_diff_eq!(v, 0.0, epsilon = 1e-8);
        }
    }
}
