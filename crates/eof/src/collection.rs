//! The ordered collection of EOF pairs covering a full DOY cycle.

use ndarray::Array1;

use omi_calendar::doy_list;

use crate::data::EofPair;
use crate::error::EofError;

/// EOF pairs for every DOY of a year, sharing one spatial grid.
///
/// The collection holds exactly one pair per DOY, 1..=366 (or 1..=365
/// with `no_leap`), in DOY order.
#[derive(Debug, Clone, PartialEq)]
pub struct EofCollection {
    pairs: Vec<EofPair>,
    no_leap: bool,
}

impl EofCollection {
    /// Creates a collection from pairs ordered by DOY.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`EofError::DoyCoverage`] | not exactly 366 (or 365) pairs |
    /// | [`EofError::GridMismatch`] | a pair on a different grid than the first |
    pub fn new(pairs: Vec<EofPair>, no_leap: bool) -> Result<Self, EofError> {
        let expected = doy_list(no_leap).len();
        if pairs.len() != expected {
            return Err(EofError::DoyCoverage {
                expected,
                got: pairs.len(),
            });
        }
        for (idx, pair) in pairs.iter().enumerate().skip(1) {
            if !pair.same_grid(&pairs[0]) {
                return Err(EofError::GridMismatch {
                    doy: idx as u16 + 1,
                });
            }
        }
        Ok(Self { pairs, no_leap })
    }

    /// True if the collection covers 365 DOYs instead of 366.
    pub fn no_leap(&self) -> bool {
        self.no_leap
    }

    /// Number of DOYs covered (365 or 366).
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Always false; a constructed collection covers a full year.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// The largest DOY in the collection (365 or 366).
    pub fn max_doy(&self) -> u16 {
        self.pairs.len() as u16
    }

    /// All DOYs in order.
    pub fn doys(&self) -> Vec<u16> {
        doy_list(self.no_leap)
    }

    /// The shared latitude grid.
    pub fn lat(&self) -> &Array1<f64> {
        self.pairs[0].lat()
    }

    /// The shared longitude grid.
    pub fn long(&self) -> &Array1<f64> {
        self.pairs[0].long()
    }

    /// All pairs in DOY order.
    pub fn pairs(&self) -> &[EofPair] {
        &self.pairs
    }

    /// The EOF pair for one DOY.
    ///
    /// # Errors
    ///
    /// Returns [`EofError::DoyOutOfRange`] for DOY 0 or beyond the
    /// collection's last DOY.
    pub fn pair_for_doy(&self, doy: u16) -> Result<&EofPair, EofError> {
        if doy < 1 || doy > self.max_doy() {
            return Err(EofError::DoyOutOfRange {
                doy,
                max: self.max_doy(),
            });
        }
        Ok(&self.pairs[doy as usize - 1])
    }

    /// The first eigenvector for one DOY, as a flat vector.
    pub fn eof1_vector_for_doy(&self, doy: u16) -> Result<&Array1<f64>, EofError> {
        Ok(self.pair_for_doy(doy)?.eof1_vector())
    }

    /// The second eigenvector for one DOY, as a flat vector.
    pub fn eof2_vector_for_doy(&self, doy: u16) -> Result<&Array1<f64>, EofError> {
        Ok(self.pair_for_doy(doy)?.eof2_vector())
    }

    /// Elementwise closeness of two collections within an absolute
    /// tolerance.
    pub fn close_to(&self, other: &EofCollection, atol: f64) -> bool {
        self.no_leap == other.no_leap
            && self.pairs.len() == other.pairs.len()
            && self
                .pairs
                .iter()
                .zip(other.pairs.iter())
                .all(|(a, b)| a.close_to(b, atol))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn pair_for(doy: u16) -> EofPair {
        let scale = doy as f64;
        EofPair::new(
            array![-10.0, 0.0, 10.0],
            array![0.0, 5.0],
            (array![1.0, 2.0, 3.0, 4.0, 5.0, 6.0] * scale).into_dyn(),
            (array![10.0, 20.0, 30.0, 40.0, 50.0, 60.0] * scale).into_dyn(),
        )
        .unwrap()
    }

    fn full_collection(no_leap: bool) -> EofCollection {
        let n = if no_leap { 365 } else { 366 };
        let pairs = (1..=n).map(pair_for).collect();
        EofCollection::new(pairs, no_leap).unwrap()
    }

    #[test]
    fn construction_and_lookup() {
        let collection = full_collection(false);
        assert_eq!(collection.len(), 366);
        assert_eq!(collection.max_doy(), 366);
        assert!(!collection.no_leap());
        assert_eq!(collection.lat(), &array![-10.0, 0.0, 10.0]);
        assert_eq!(collection.long(), &array![0.0, 5.0]);

        assert_eq!(collection.eof1_vector_for_doy(1).unwrap()[0], 1.0);
        assert_eq!(collection.eof1_vector_for_doy(12).unwrap()[1], 24.0);
        assert_eq!(collection.eof2_vector_for_doy(1).unwrap()[0], 10.0);
        assert_eq!(collection.eof2_vector_for_doy(12).unwrap()[1], 240.0);
    }

    #[test]
    fn no_leap_collection_holds_365() {
        let collection = full_collection(true);
        assert_eq!(collection.len(), 365);
        assert_eq!(collection.doys().last().copied(), Some(365));
        assert!(collection.pair_for_doy(366).is_err());
    }

    #[test]
    fn wrong_count_rejected() {
        let pairs: Vec<EofPair> = (1..=12).map(pair_for).collect();
        let err = EofCollection::new(pairs, false).unwrap_err();
        assert_eq!(
            err,
            EofError::DoyCoverage {
                expected: 366,
                got: 12
            }
        );
    }

    #[test]
    fn mismatching_grid_rejected() {
        let mut pairs: Vec<EofPair> = (1..=366).map(pair_for).collect();
        pairs[100] = EofPair::new(
            array![-20.0, 0.0, 20.0],
            array![0.0, 5.0],
            array![1.0, 2.0, 3.0, 4.0, 5.0, 6.0].into_dyn(),
            array![1.0, 2.0, 3.0, 4.0, 5.0, 6.0].into_dyn(),
        )
        .unwrap();
        let err = EofCollection::new(pairs, false).unwrap_err();
        assert_eq!(err, EofError::GridMismatch { doy: 101 });
    }

    #[test]
    fn doy_lookup_bounds() {
        let collection = full_collection(false);
        assert!(collection.pair_for_doy(0).is_err());
        assert!(collection.pair_for_doy(1).is_ok());
        assert!(collection.pair_for_doy(366).is_ok());
        assert_eq!(
            collection.pair_for_doy(367).unwrap_err(),
            EofError::DoyOutOfRange { doy: 367, max: 366 }
        );
    }

    #[test]
    fn closeness() {
        let a = full_collection(false);
        let b = full_collection(false);
        assert!(a.close_to(&b, 1e-12));
        let c = full_collection(true);
        assert!(!a.close_to(&c, 1e-12));
    }

    #[test]
    fn collection_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<EofCollection>();
    }
}
