//! Elementwise agreement between a reference vector and a recalculation.

use crate::error::EvaluateError;

/// Summary statistics of the difference `target - reference`.
#[derive(Debug, Clone)]
pub struct VectorAgreement {
    /// Pearson correlation (None for constant or too-short input).
    pub correlation: Option<f64>,
    /// Mean of the differences.
    pub diff_mean: f64,
    /// Population standard deviation of the differences.
    pub diff_std: f64,
    /// 68th percentile of the absolute differences.
    pub diff_abs_percent68: f64,
    /// 95th percentile of the absolute differences.
    pub diff_abs_percent95: f64,
    /// 99th percentile of the absolute differences.
    pub diff_abs_percent99: f64,
}

/// Computes agreement statistics between `reference` and `target`.
///
/// With `percentage = true` the differences are scaled by the mean
/// absolute value of the reference and expressed in percent.
///
/// # Errors
///
/// Returns [`EvaluateError::LengthMismatch`] if the vectors differ in
/// length.
pub fn vector_agreement(
    reference: &[f64],
    target: &[f64],
    percentage: bool,
) -> Result<VectorAgreement, EvaluateError> {
    if reference.len() != target.len() {
        return Err(EvaluateError::LengthMismatch {
            reference: reference.len(),
            target: target.len(),
        });
    }

    let mut diff: Vec<f64> = reference
        .iter()
        .zip(target.iter())
        .map(|(r, t)| t - r)
        .collect();
    if percentage {
        let abs_ref: Vec<f64> = reference.iter().map(|v| v.abs()).collect();
        let scale = omi_stats::mean(&abs_ref);
        for d in &mut diff {
            *d = *d / scale * 100.0;
        }
    }

    let correlation = omi_stats::pearson_correlation(reference, target);
    let diff_mean = omi_stats::mean(&diff);
    let diff_std = omi_stats::std_pop(&diff);

    let mut abs_diff: Vec<f64> = diff.iter().map(|d| d.abs()).collect();
    abs_diff.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    Ok(VectorAgreement {
        correlation,
        diff_mean,
        diff_std,
        diff_abs_percent68: omi_stats::percentile(&abs_diff, 68.0),
        diff_abs_percent95: omi_stats::percentile(&abs_diff, 95.0),
        diff_abs_percent99: omi_stats::percentile(&abs_diff, 99.0),
    })
}
