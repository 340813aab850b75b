//! Correction of spontaneous sign changes along the DOY axis.

use ndarray::Array1;
use tracing::debug;

use crate::collection::EofCollection;
use crate::data::EofPair;
use crate::error::EofError;

/// Removes spontaneous sign flips between consecutive DOYs.
///
/// PCA eigenvectors carry an arbitrary sign, so a freshly computed
/// collection can flip orientation from one DOY to the next. Starting
/// from DOY 1, each DOY's `eof1` and `eof2` are independently negated
/// whenever their projection onto the previous (already corrected) DOY's
/// counterpart is negative. DOY 1 itself is kept as computed and serves
/// as the reference orientation.
///
/// # Errors
///
/// Propagates construction errors when rebuilding the collection.
pub fn correct_spontaneous_sign_changes(
    eofs: &EofCollection,
) -> Result<EofCollection, EofError> {
    let mut corrected: Vec<EofPair> = Vec::with_capacity(eofs.len());

    for (idx, pair) in eofs.pairs().iter().enumerate() {
        if idx == 0 {
            corrected.push(pair.clone());
            continue;
        }
        let previous = &corrected[idx - 1];
        let flip1 = previous.eof1_vector().dot(pair.eof1_vector()) < 0.0;
        let flip2 = previous.eof2_vector().dot(pair.eof2_vector()) < 0.0;
        if flip1 || flip2 {
            debug!(doy = idx + 1, flip1, flip2, "correcting EOF sign flip");
        }
        corrected.push(flipped(pair, flip1, flip2)?);
    }

    EofCollection::new(corrected, eofs.no_leap())
}

fn flipped(pair: &EofPair, flip1: bool, flip2: bool) -> Result<EofPair, EofError> {
    let sign = |flip: bool| if flip { -1.0 } else { 1.0 };
    let eof1: Array1<f64> = pair.eof1_vector() * sign(flip1);
    let eof2: Array1<f64> = pair.eof2_vector() * sign(flip2);
    let rebuilt = EofPair::new(
        pair.lat().clone(),
        pair.long().clone(),
        eof1.into_dyn(),
        eof2.into_dyn(),
    )?;
    Ok(match pair.statistics() {
        Some(stats) => rebuilt.with_statistics(stats.clone()),
        None => rebuilt,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn pair(scale1: f64, scale2: f64) -> EofPair {
        EofPair::new(
            array![-10.0, 0.0, 10.0],
            array![0.0, 5.0],
            (array![1.0, 2.0, 3.0, 4.0, 5.0, 6.0] * scale1).into_dyn(),
            (array![6.0, 5.0, 4.0, 3.0, 2.0, 1.0] * scale2).into_dyn(),
        )
        .unwrap()
    }

    fn collection_with_flips() -> EofCollection {
        let pairs: Vec<EofPair> = (1..=366)
            .map(|doy| {
                // Flip eof1 on a stretch of DOYs and eof2 on another one.
                let s1 = if (100..200).contains(&doy) { -1.0 } else { 1.0 };
                let s2 = if doy >= 300 { -1.0 } else { 1.0 };
                pair(s1, s2)
            })
            .collect();
        EofCollection::new(pairs, false).unwrap()
    }

    #[test]
    fn all_consecutive_projections_nonnegative_after_correction() {
        let corrected = correct_spontaneous_sign_changes(&collection_with_flips()).unwrap();
        for idx in 1..corrected.len() {
            let prev = &corrected.pairs()[idx - 1];
            let cur = &corrected.pairs()[idx];
            assert!(
                prev.eof1_vector().dot(cur.eof1_vector()) >= 0.0,
                "eof1 flip left at index {idx}"
            );
            assert!(
                prev.eof2_vector().dot(cur.eof2_vector()) >= 0.0,
                "eof2 flip left at index {idx}"
            );
        }
    }

    #[test]
    fn doy1_is_reference() {
        let original = collection_with_flips();
        let corrected = correct_spontaneous_sign_changes(&original).unwrap();
        assert_eq!(
            corrected.pair_for_doy(1).unwrap(),
            original.pair_for_doy(1).unwrap()
        );
    }

    #[test]
    fn clean_collection_unchanged() {
        let pairs: Vec<EofPair> = (1..=366).map(|_| pair(1.0, 1.0)).collect();
        let collection = EofCollection::new(pairs, false).unwrap();
        let corrected = correct_spontaneous_sign_changes(&collection).unwrap();
        assert!(corrected.close_to(&collection, 0.0));
    }

    #[test]
    fn statistics_survive_correction() {
        use crate::data::EofStatistics;
        let mut pairs: Vec<EofPair> = (1..=366).map(|_| pair(1.0, 1.0)).collect();
        pairs[1] = pair(-1.0, 1.0).with_statistics(EofStatistics::new(
            (4.0, 2.0),
            (0.5, 0.25),
            121,
        ));
        let collection = EofCollection::new(pairs, false).unwrap();
        let corrected = correct_spontaneous_sign_changes(&collection).unwrap();
        assert!(corrected.pair_for_doy(2).unwrap().statistics().is_some());
    }
}
