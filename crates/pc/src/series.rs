//! The principal component time series data model.

use chrono::NaiveDate;

use crate::error::PcError;

/// Parallel arrays of timestamps and PC1/PC2 values, one entry per day.
///
/// Invariants, checked at construction: all three arrays share one
/// length, the series is non-empty, and time is strictly increasing.
#[derive(Debug, Clone, PartialEq)]
pub struct PcSeries {
    time: Vec<NaiveDate>,
    pc1: Vec<f64>,
    pc2: Vec<f64>,
}

impl PcSeries {
    /// Creates a new `PcSeries`.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`PcError::Empty`] | zero-length input |
    /// | [`PcError::LengthMismatch`] | arrays differ in length |
    /// | [`PcError::TimeNotIncreasing`] | unsorted or duplicate dates |
    pub fn new(time: Vec<NaiveDate>, pc1: Vec<f64>, pc2: Vec<f64>) -> Result<Self, PcError> {
        if time.is_empty() {
            return Err(PcError::Empty);
        }
        if time.len() != pc1.len() || time.len() != pc2.len() {
            return Err(PcError::LengthMismatch {
                time: time.len(),
                pc1: pc1.len(),
                pc2: pc2.len(),
            });
        }
        if !time.windows(2).all(|w| w[0] < w[1]) {
            return Err(PcError::TimeNotIncreasing);
        }
        Ok(Self { time, pc1, pc2 })
    }

    /// Returns the time axis.
    pub fn time(&self) -> &[NaiveDate] {
        &self.time
    }

    /// Returns the PC1 values.
    pub fn pc1(&self) -> &[f64] {
        &self.pc1
    }

    /// Returns the PC2 values.
    pub fn pc2(&self) -> &[f64] {
        &self.pc2
    }

    /// Returns the number of days in the series.
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Always false; construction rejects empty series.
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2001, 1, day).unwrap()
    }

    #[test]
    fn construction_valid() {
        let series = PcSeries::new(
            vec![d(1), d(2), d(3)],
            vec![0.1, 0.2, 0.3],
            vec![-0.1, -0.2, -0.3],
        )
        .unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.pc1()[1], 0.2);
        assert_eq!(series.pc2()[2], -0.3);
        assert_eq!(series.time()[0], d(1));
    }

    #[test]
    fn empty_rejected() {
        let err = PcSeries::new(vec![], vec![], vec![]).unwrap_err();
        assert_eq!(err, PcError::Empty);
    }

    #[test]
    fn length_mismatch_rejected() {
        let err = PcSeries::new(vec![d(1), d(2)], vec![0.1], vec![0.2, 0.3]).unwrap_err();
        assert_eq!(
            err,
            PcError::LengthMismatch {
                time: 2,
                pc1: 1,
                pc2: 2
            }
        );
    }

    #[test]
    fn unsorted_time_rejected() {
        let err = PcSeries::new(
            vec![d(2), d(1)],
            vec![0.1, 0.2],
            vec![0.3, 0.4],
        )
        .unwrap_err();
        assert_eq!(err, PcError::TimeNotIncreasing);
    }

    #[test]
    fn duplicate_time_rejected() {
        let err = PcSeries::new(
            vec![d(1), d(1)],
            vec![0.1, 0.2],
            vec![0.3, 0.4],
        )
        .unwrap_err();
        assert_eq!(err, PcError::TimeNotIncreasing);
    }

    #[test]
    fn series_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<PcSeries>();
    }
}
