//! Spatial resampling of OLR fields via bilinear interpolation.

use ndarray::{Array1, Array3, ArrayView2, Axis};
use tracing::debug;

use crate::error::GridError;
use crate::olr::OlrData;

/// The reference OMI calculation grid: latitudes from 20S to 20N and
/// longitudes around the whole globe, both at 2.5 degree spacing.
pub fn original_grid() -> (Array1<f64>, Array1<f64>) {
    let lat = Array1::from_iter((0..17).map(|i| -20.0 + 2.5 * i as f64));
    let long = Array1::from_iter((0..144).map(|i| 2.5 * i as f64));
    (lat, long)
}

/// Resamples an OLR field onto the reference OMI grid.
///
/// # Errors
///
/// See [`resample_spatial_grid`].
pub fn resample_to_original_grid(olr: &OlrData) -> Result<OlrData, GridError> {
    let (lat, long) = original_grid();
    resample_spatial_grid(olr, &lat, &long)
}

/// Resamples an OLR field onto the given spatial grids and returns a new
/// `OlrData`.
///
/// Each day's map is interpolated bilinearly; target coordinates outside
/// the source grid are clamped to the boundary value.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`GridError::EmptyAxis`] | empty target axis |
/// | [`GridError::AxisNotIncreasing`] | non-monotonic target axis |
pub fn resample_spatial_grid(
    olr: &OlrData,
    target_lat: &Array1<f64>,
    target_long: &Array1<f64>,
) -> Result<OlrData, GridError> {
    validate_target("lat", target_lat)?;
    validate_target("long", target_long)?;

    debug!(
        from_lat = olr.n_lat(),
        from_long = olr.n_long(),
        to_lat = target_lat.len(),
        to_long = target_long.len(),
        "resampling spatial grid"
    );

    // Bracketing indices and weights are identical for every day.
    let lat_hooks = axis_hooks(olr.lat(), target_lat);
    let long_hooks = axis_hooks(olr.long(), target_long);

    let mut out = Array3::zeros((olr.n_time(), target_lat.len(), target_long.len()));
    for (day, source) in olr.olr().axis_iter(Axis(0)).enumerate() {
        let mut target = out.index_axis_mut(Axis(0), day);
        for (i, &(la0, la1, wa)) in lat_hooks.iter().enumerate() {
            for (j, &(lo0, lo1, wo)) in long_hooks.iter().enumerate() {
                target[[i, j]] = bilinear(&source, la0, la1, wa, lo0, lo1, wo);
            }
        }
    }

    OlrData::new(
        out,
        olr.time().to_vec(),
        target_lat.clone(),
        target_long.clone(),
    )
}

fn validate_target(name: &'static str, axis: &Array1<f64>) -> Result<(), GridError> {
    if axis.is_empty() {
        return Err(GridError::EmptyAxis { name });
    }
    let values = axis.as_slice().expect("contiguous");
    if !values.windows(2).all(|w| w[0] < w[1]) {
        return Err(GridError::AxisNotIncreasing { name });
    }
    Ok(())
}

/// For each target coordinate: the two bracketing source indices and the
/// interpolation weight of the upper one. Out-of-range targets clamp to
/// the nearest boundary (weight 0 or 1 on a degenerate bracket).
fn axis_hooks(source: &Array1<f64>, target: &Array1<f64>) -> Vec<(usize, usize, f64)> {
    let src = source.as_slice().expect("contiguous");
    let n = src.len();
    target
        .iter()
        .map(|&x| {
            if x <= src[0] {
                return (0, 0, 0.0);
            }
            if x >= src[n - 1] {
                return (n - 1, n - 1, 0.0);
            }
            let hi = src.partition_point(|&s| s < x).min(n - 1);
            let lo = hi - 1;
            let w = (x - src[lo]) / (src[hi] - src[lo]);
            (lo, hi, w)
        })
        .collect()
}

fn bilinear(
    map: &ArrayView2<'_, f64>,
    la0: usize,
    la1: usize,
    wa: f64,
    lo0: usize,
    lo1: usize,
    wo: f64,
) -> f64 {
    let top = map[[la0, lo0]] * (1.0 - wo) + map[[la0, lo1]] * wo;
    let bottom = map[[la1, lo0]] * (1.0 - wo) + map[[la1, lo1]] * wo;
    top * (1.0 - wa) + bottom * wa
}
