//! Error types for the omi-grid crate.

use chrono::NaiveDate;

/// Error type for all fallible operations in the omi-grid crate.
///
/// This enum covers shape mismatches between the data cube and its axes,
/// axis-ordering violations, lookups outside the covered period, and
/// calendar failures bubbling up from DOY computations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GridError {
    /// Returned when an axis length does not match the corresponding cube
    /// dimension.
    #[error("axis '{name}' has {got} entries but the data cube expects {expected}")]
    AxisMismatch {
        /// Name of the axis (`time`, `lat` or `long`).
        name: &'static str,
        /// Length required by the data cube.
        expected: usize,
        /// Length actually provided.
        got: usize,
    },

    /// Returned when an axis is not strictly increasing.
    #[error("axis '{name}' is not strictly increasing")]
    AxisNotIncreasing {
        /// Name of the axis (`time`, `lat` or `long`).
        name: &'static str,
    },

    /// Returned when an axis is empty.
    #[error("axis '{name}' is empty")]
    EmptyAxis {
        /// Name of the axis.
        name: &'static str,
    },

    /// Returned when a requested date is not on the time axis.
    #[error("date {date} is not covered by the time axis")]
    DateNotFound {
        /// The requested date.
        date: NaiveDate,
    },

    /// Returned when a time restriction selects no days.
    #[error("no days between {start} and {stop} in the time axis")]
    EmptyPeriod {
        /// Start of the requested period.
        start: NaiveDate,
        /// End of the requested period.
        stop: NaiveDate,
    },

    /// Wraps an error originating from the omi-calendar crate.
    #[error("calendar error: {0}")]
    Calendar(#[from] omi_calendar::CalendarError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_axis_mismatch() {
        let err = GridError::AxisMismatch {
            name: "lat",
            expected: 17,
            got: 16,
        };
        assert_eq!(
            err.to_string(),
            "axis 'lat' has 16 entries but the data cube expects 17"
        );
    }

    #[test]
    fn display_axis_not_increasing() {
        let err = GridError::AxisNotIncreasing { name: "time" };
        assert_eq!(err.to_string(), "axis 'time' is not strictly increasing");
    }

    #[test]
    fn display_date_not_found() {
        let err = GridError::DateNotFound {
            date: NaiveDate::from_ymd_opt(1979, 1, 1).unwrap(),
        };
        assert_eq!(err.to_string(), "date 1979-01-01 is not covered by the time axis");
    }

    #[test]
    fn from_calendar_error() {
        let cal = omi_calendar::CalendarError::InvalidDoy { doy: 0, max: 366 };
        let err: GridError = cal.into();
        assert!(matches!(err, GridError::Calendar(_)));
        assert!(err.to_string().contains("calendar error"));
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<GridError>();
    }
}
