//! Collection-level comparisons: EOFs across all DOYs, PC series.

use omi_eof::EofCollection;
use omi_pc::PcSeries;

use crate::agreement::{VectorAgreement, vector_agreement};
use crate::error::EvaluateError;

/// Agreement of both PC components between two series.
#[derive(Debug, Clone)]
pub struct PcComparison {
    /// Agreement of the PC1 series.
    pub pc1: VectorAgreement,
    /// Agreement of the PC2 series.
    pub pc2: VectorAgreement,
}

/// Compares one EOF component of two collections for every DOY.
///
/// `eof_number` selects the component (1 or 2). With `exclude_doy366` the
/// statistically weaker DOY 366 is dropped from the comparison. Returns
/// one `(doy, agreement)` entry per compared DOY.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`EvaluateError::InvalidEofNumber`] | selector not 1 or 2 |
/// | [`EvaluateError::CoverageMismatch`] | collections of different DOY counts |
pub fn compare_eofs_all_doys(
    reference: &EofCollection,
    target: &EofCollection,
    eof_number: u8,
    exclude_doy366: bool,
) -> Result<Vec<(u16, VectorAgreement)>, EvaluateError> {
    if eof_number != 1 && eof_number != 2 {
        return Err(EvaluateError::InvalidEofNumber { got: eof_number });
    }
    if reference.len() != target.len() {
        return Err(EvaluateError::CoverageMismatch {
            reference: reference.len(),
            target: target.len(),
        });
    }

    let mut doys = reference.doys();
    if exclude_doy366 && doys.last() == Some(&366) {
        doys.pop();
    }

    let mut results = Vec::with_capacity(doys.len());
    for doy in doys {
        let (ref_vec, target_vec) = if eof_number == 1 {
            (
                reference.eof1_vector_for_doy(doy)?,
                target.eof1_vector_for_doy(doy)?,
            )
        } else {
            (
                reference.eof2_vector_for_doy(doy)?,
                target.eof2_vector_for_doy(doy)?,
            )
        };
        let agreement = vector_agreement(
            ref_vec.as_slice().expect("contiguous"),
            target_vec.as_slice().expect("contiguous"),
            false,
        )?;
        results.push((doy, agreement));
    }
    Ok(results)
}

/// Compares two PC series that cover the identical period.
///
/// # Errors
///
/// Returns [`EvaluateError::TimeAxisMismatch`] if the time axes differ.
pub fn compare_pc_series(
    reference: &PcSeries,
    target: &PcSeries,
) -> Result<PcComparison, EvaluateError> {
    if reference.time() != target.time() {
        return Err(EvaluateError::TimeAxisMismatch);
    }
    Ok(PcComparison {
        pc1: vector_agreement(reference.pc1(), target.pc1(), false)?,
        pc2: vector_agreement(reference.pc2(), target.pc2(), false)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ndarray::array;
    use omi_eof::EofPair;

    fn collection(perturbation: f64) -> EofCollection {
        let pairs = (1..=366)
            .map(|doy| {
                let scale = doy as f64 / 100.0;
                EofPair::new(
                    array![-10.0, 0.0, 10.0],
                    array![0.0, 5.0],
                    (array![0.1, 0.2, 0.3, 0.4, 0.5, 0.6] * scale + perturbation).into_dyn(),
                    (array![0.6, 0.5, 0.4, 0.3, 0.2, 0.1] * scale - perturbation).into_dyn(),
                )
                .unwrap()
            })
            .collect();
        EofCollection::new(pairs, false).unwrap()
    }

    #[test]
    fn identical_collections_agree() {
        let a = collection(0.0);
        let results = compare_eofs_all_doys(&a, &a, 1, false).unwrap();
        assert_eq!(results.len(), 366);
        for (doy, agreement) in &results {
            assert!(
                agreement.diff_abs_percent99 < 1e-12,
                "DOY {doy} unexpectedly differs"
            );
        }
    }

    #[test]
    fn perturbation_shows_up_in_statistics() {
        let reference = collection(0.0);
        let target = collection(0.01);
        let results = compare_eofs_all_doys(&reference, &target, 1, false).unwrap();
        for (_, agreement) in &results {
            assert!((agreement.diff_mean - 0.01).abs() < 1e-12);
        }
        let results2 = compare_eofs_all_doys(&reference, &target, 2, false).unwrap();
        for (_, agreement) in &results2 {
            assert!((agreement.diff_mean + 0.01).abs() < 1e-12);
        }
    }

    #[test]
    fn doy366_exclusion() {
        let a = collection(0.0);
        let results = compare_eofs_all_doys(&a, &a, 1, true).unwrap();
        assert_eq!(results.len(), 365);
        assert_eq!(results.last().unwrap().0, 365);
    }

    #[test]
    fn invalid_eof_number_rejected() {
        let a = collection(0.0);
        let err = compare_eofs_all_doys(&a, &a, 3, false).unwrap_err();
        assert_eq!(err, EvaluateError::InvalidEofNumber { got: 3 });
    }

    fn pc_series(offset: f64) -> PcSeries {
        PcSeries::new(
            (0..20)
                .map(|i| NaiveDate::from_ymd_opt(1979, 1, 1 + i).unwrap())
                .collect(),
            (0..20).map(|i| (i as f64 * 0.7).sin() + offset).collect(),
            (0..20).map(|i| (i as f64 * 0.7).cos()).collect(),
        )
        .unwrap()
    }

    #[test]
    fn pc_comparison_on_shared_axis() {
        let comparison = compare_pc_series(&pc_series(0.0), &pc_series(0.05)).unwrap();
        assert!((comparison.pc1.diff_mean - 0.05).abs() < 1e-12);
        assert!(comparison.pc2.diff_abs_percent99 < 1e-12);
        assert!(comparison.pc1.correlation.unwrap() > 0.999);
    }

    #[test]
    fn pc_comparison_rejects_different_axes() {
        let a = pc_series(0.0);
        let later = PcSeries::new(
            (0..20)
                .map(|i| NaiveDate::from_ymd_opt(1980, 1, 1 + i).unwrap())
                .collect(),
            a.pc1().to_vec(),
            a.pc2().to_vec(),
        )
        .unwrap();
        let err = compare_pc_series(&a, &later).unwrap_err();
        assert_eq!(err, EvaluateError::TimeAxisMismatch);
    }
}
