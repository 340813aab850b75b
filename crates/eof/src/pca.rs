//! Per-DOY PCA of windowed, bandpass-filtered OLR anomalies.

use nalgebra::{DMatrix, SymmetricEigen};
use ndarray::Array1;
use tracing::{debug, info};

use omi_calendar::{LeapYearTreatment, doy_list};
use omi_grid::OlrData;

use crate::collection::EofCollection;
use crate::data::{EofPair, EofStatistics};
use crate::error::EofError;

/// Computes the leading two EOFs for one DOY.
///
/// All days of the (already bandpass-filtered) series falling inside the
/// DOY window are flattened into observation vectors; the two leading
/// eigenvectors of their covariance matrix `F * F^T / N` become `eof1`
/// and `eof2`. Windows around DOY 366 contain fewer samples and are
/// expected to differ statistically from neighbouring DOYs; that is a
/// property of the calendar, not of this routine.
///
/// # Errors
///
/// Returns [`EofError::InsufficientSamples`] when the window selects
/// fewer than two days, and propagates grid/calendar failures.
pub fn calc_eofs_for_doy(
    olr: &OlrData,
    doy: u16,
    window_length: u16,
    treatment: LeapYearTreatment,
) -> Result<EofPair, EofError> {
    let maps = olr.extract_olr_matrix_for_doy_range(doy, window_length, treatment)?;
    let n = maps.shape()[0];
    if n < 2 {
        return Err(EofError::InsufficientSamples { doy, got: n });
    }
    let n_lat = olr.n_lat();
    let n_long = olr.n_long();
    let m = n_lat * n_long;

    // Observation matrix: one flattened map per column.
    let f = DMatrix::from_fn(m, n, |row, col| {
        maps[[col, row / n_long, row % n_long]]
    });
    let covariance = (&f * f.transpose()) / n as f64;

    let eigen = SymmetricEigen::new(covariance);

    // Descending eigenvalue order.
    let mut order: Vec<usize> = (0..m).collect();
    order.sort_by(|&a, &b| {
        eigen.eigenvalues[b]
            .partial_cmp(&eigen.eigenvalues[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let lead1 = order[0];
    let lead2 = order[1];
    let eof1 = Array1::from_iter(eigen.eigenvectors.column(lead1).iter().cloned());
    let eof2 = Array1::from_iter(eigen.eigenvectors.column(lead2).iter().cloned());

    let total_variance: f64 = eigen.eigenvalues.iter().sum();
    let (ev1, ev2) = (eigen.eigenvalues[lead1], eigen.eigenvalues[lead2]);
    let explained = if total_variance > 0.0 {
        (ev1 / total_variance, ev2 / total_variance)
    } else {
        (0.0, 0.0)
    };

    debug!(doy, samples = n, explained1 = explained.0, "computed EOF pair");

    Ok(EofPair::new(
        olr.lat().clone(),
        olr.long().clone(),
        eof1.into_dyn(),
        eof2.into_dyn(),
    )?
    .with_statistics(EofStatistics::new((ev1, ev2), explained, n)))
}

/// Computes the full EOF collection: one PCA per DOY over the windowed,
/// filtered OLR series.
///
/// The returned collection is raw: eigenvector signs are arbitrary per
/// DOY and the pair subspace is unrotated. Apply
/// [`post_process_rotation`](crate::rotation::post_process_rotation) to
/// obtain the stable artifact.
///
/// # Errors
///
/// Propagates the per-DOY failures of [`calc_eofs_for_doy`].
pub fn compute_eofs_from_olr(
    olr: &OlrData,
    window_length: u16,
    treatment: LeapYearTreatment,
) -> Result<EofCollection, EofError> {
    let no_leap = treatment == LeapYearTreatment::NoLeapYears;
    let doys = doy_list(no_leap);
    info!(
        n_doys = doys.len(),
        window_length, "computing EOFs for all DOYs"
    );
    let mut pairs = Vec::with_capacity(doys.len());
    for doy in doys {
        pairs.push(calc_eofs_for_doy(olr, doy, window_length, treatment)?);
    }
    EofCollection::new(pairs, no_leap)
}
