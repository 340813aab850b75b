//! Removal of the EOF phase discontinuity at the year-end wraparound.
//!
//! Per-DOY PCA leaves the (eof1, eof2) pair free to rotate inside its
//! subspace, which shows up as a phase jump between the last DOY and
//! DOY 1. Distributing a small counter-rotation linearly over the DOY
//! cycle removes the jump while preserving norms and the angle between
//! the two eigenvectors of every pair.

use nalgebra::Matrix2;
use ndarray::Array1;
use tracing::info;

use crate::collection::EofCollection;
use crate::data::EofPair;
use crate::error::EofError;
use crate::sign::correct_spontaneous_sign_changes;

/// The angle in radians between two vectors, via the arccosine of the
/// normalized dot product.
///
/// Returns NaN if either vector has zero norm.
pub fn angle_between_vectors(u: &Array1<f64>, v: &Array1<f64>) -> f64 {
    let cos = u.dot(v) / (u.dot(u).sqrt() * v.dot(v).sqrt());
    cos.clamp(-1.0, 1.0).acos()
}

/// The pair of angles (eof1-to-eof1, eof2-to-eof2) between two EOF pairs.
pub fn angle_between_eof_pairs(a: &EofPair, b: &EofPair) -> (f64, f64) {
    (
        angle_between_vectors(a.eof1_vector(), b.eof1_vector()),
        angle_between_vectors(a.eof2_vector(), b.eof2_vector()),
    )
}

/// The standard 2x2 rotation matrix for angle `theta`.
pub fn rotation_matrix(theta: f64) -> Matrix2<f64> {
    Matrix2::new(theta.cos(), -theta.sin(), theta.sin(), theta.cos())
}

/// The per-DOY rotation step that closes the year-end discontinuity.
///
/// Measures the angle between the last DOY's `eof1` and DOY 1's `eof1`
/// and distributes its negation over the DOY cycle, returning
/// `-angle / number_of_doys`.
pub fn calculate_angle_from_discontinuity(eofs: &EofCollection) -> Result<f64, EofError> {
    let first = eofs.pair_for_doy(1)?;
    let last = eofs.pair_for_doy(eofs.max_doy())?;
    let discontinuity = angle_between_vectors(last.eof1_vector(), first.eof1_vector());
    Ok(-discontinuity / eofs.len() as f64)
}

/// Rotates each DOY's (eof1, eof2) pair by `delta * (doy - 1)`.
///
/// DOY 1 stays fixed as the reference orientation; the rotation angle
/// grows linearly along the cycle so the last DOY is rotated by almost
/// the full correction. Rotation is orthogonal, preserving each vector's
/// norm and the angle between the two vectors of a pair. Attached
/// statistics are carried over unchanged.
///
/// # Errors
///
/// Propagates construction errors when rebuilding the collection.
pub fn rotate_each_eof_by_delta(
    eofs: &EofCollection,
    delta: f64,
) -> Result<EofCollection, EofError> {
    let mut rotated: Vec<EofPair> = Vec::with_capacity(eofs.len());
    for (idx, pair) in eofs.pairs().iter().enumerate() {
        let rotation = rotation_matrix(delta * idx as f64);
        let eof1: Array1<f64> = rotation[(0, 0)] * pair.eof1_vector()
            + rotation[(0, 1)] * pair.eof2_vector();
        let eof2: Array1<f64> = rotation[(1, 0)] * pair.eof1_vector()
            + rotation[(1, 1)] * pair.eof2_vector();
        let rebuilt = EofPair::new(
            pair.lat().clone(),
            pair.long().clone(),
            eof1.into_dyn(),
            eof2.into_dyn(),
        )?;
        rotated.push(match pair.statistics() {
            Some(stats) => rebuilt.with_statistics(stats.clone()),
            None => rebuilt,
        });
    }
    EofCollection::new(rotated, eofs.no_leap())
}

/// Measures the year-end discontinuity and rotates the whole collection
/// to remove it.
pub fn rotate_eofs(eofs: &EofCollection) -> Result<EofCollection, EofError> {
    let delta = calculate_angle_from_discontinuity(eofs)?;
    info!(delta, "rotating EOFs to remove year-end discontinuity");
    rotate_each_eof_by_delta(eofs, delta)
}

/// Rescales each DOY's `eof1` and `eof2` independently to unit norm.
///
/// # Errors
///
/// Returns [`EofError::ZeroNormEof`] if any eigenvector has zero norm.
pub fn normalize_eofs(eofs: &EofCollection) -> Result<EofCollection, EofError> {
    let mut normalized: Vec<EofPair> = Vec::with_capacity(eofs.len());
    for (idx, pair) in eofs.pairs().iter().enumerate() {
        let doy = idx as u16 + 1;
        let norm1 = pair.eof1_vector().dot(pair.eof1_vector()).sqrt();
        let norm2 = pair.eof2_vector().dot(pair.eof2_vector()).sqrt();
        if norm1 == 0.0 || norm2 == 0.0 {
            return Err(EofError::ZeroNormEof { doy });
        }
        let eof1: Array1<f64> = pair.eof1_vector() / norm1;
        let eof2: Array1<f64> = pair.eof2_vector() / norm2;
        let rebuilt = EofPair::new(
            pair.lat().clone(),
            pair.long().clone(),
            eof1.into_dyn(),
            eof2.into_dyn(),
        )?;
        normalized.push(match pair.statistics() {
            Some(stats) => rebuilt.with_statistics(stats.clone()),
            None => rebuilt,
        });
    }
    EofCollection::new(normalized, eofs.no_leap())
}

/// The full continuity post-processing: sign correction, discontinuity
/// rotation, normalization.
///
/// The result is the stable EOF artifact; the raw PCA output is not
/// reproducible across eigen backends.
pub fn post_process_rotation(eofs: &EofCollection) -> Result<EofCollection, EofError> {
    let corrected = correct_spontaneous_sign_changes(eofs)?;
    let rotated = rotate_eofs(&corrected)?;
    normalize_eofs(&rotated)
}
