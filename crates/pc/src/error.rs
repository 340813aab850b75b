//! Error types for the omi-pc crate.

/// Error type for all fallible operations in the omi-pc crate.
///
/// This enum covers PC series validation and failures bubbling up from
/// the calendar, grid, filter and EOF stages of the assembly pipeline.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PcError {
    /// Returned when the time, PC1 and PC2 arrays differ in length.
    #[error("series lengths differ: {time} timestamps, {pc1} PC1 values, {pc2} PC2 values")]
    LengthMismatch {
        /// Number of timestamps.
        time: usize,
        /// Number of PC1 values.
        pc1: usize,
        /// Number of PC2 values.
        pc2: usize,
    },

    /// Returned when the time axis is not strictly increasing.
    #[error("PC time axis is not strictly increasing")]
    TimeNotIncreasing,

    /// Returned when a PC series would be empty.
    #[error("PC series must contain at least one day")]
    Empty,

    /// Returned when PC1 has zero variance and the normalization factor
    /// is undefined.
    #[error("PC1 standard deviation is zero; cannot normalize")]
    ZeroStd,

    /// Wraps an error originating from the omi-calendar crate.
    #[error("calendar error: {0}")]
    Calendar(#[from] omi_calendar::CalendarError),

    /// Wraps an error originating from the omi-grid crate.
    #[error("grid error: {0}")]
    Grid(#[from] omi_grid::GridError),

    /// Wraps an error originating from the omi-filter crate.
    #[error("filter error: {0}")]
    Filter(#[from] omi_filter::FilterError),

    /// Wraps an error originating from the omi-eof crate.
    #[error("eof error: {0}")]
    Eof(#[from] omi_eof::EofError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_length_mismatch() {
        let err = PcError::LengthMismatch {
            time: 10,
            pc1: 10,
            pc2: 9,
        };
        assert_eq!(
            err.to_string(),
            "series lengths differ: 10 timestamps, 10 PC1 values, 9 PC2 values"
        );
    }

    #[test]
    fn display_time_not_increasing() {
        assert_eq!(
            PcError::TimeNotIncreasing.to_string(),
            "PC time axis is not strictly increasing"
        );
    }

    #[test]
    fn display_zero_std() {
        assert_eq!(
            PcError::ZeroStd.to_string(),
            "PC1 standard deviation is zero; cannot normalize"
        );
    }

    #[test]
    fn from_upstream_errors() {
        let cal: PcError = omi_calendar::CalendarError::InvalidDoy { doy: 0, max: 366 }.into();
        assert!(matches!(cal, PcError::Calendar(_)));

        let filter: PcError = omi_filter::FilterError::EmptyInput { nt: 0, nl: 0 }.into();
        assert!(matches!(filter, PcError::Filter(_)));
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<PcError>();
    }
}
