//! Error types for the omi-calendar crate.

use chrono::NaiveDate;

/// Error type for all fallible operations in the omi-calendar crate.
///
/// This enum covers domain failures for dates that do not exist in the
/// 365-day no-leap calendar and validation failures for day-of-year
/// values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    /// Returned when a date cannot be expressed in a 365-day year
    /// (February 29 under the no-leap assumption).
    #[error("date {date} does not exist in a 365-day year")]
    InvalidNoLeapDate {
        /// The offending calendar date.
        date: NaiveDate,
    },

    /// Returned when a day-of-year value is outside the valid range.
    #[error("invalid day of year: {doy} (must be 1..={max})")]
    InvalidDoy {
        /// The invalid day-of-year value that was provided.
        doy: u16,
        /// The largest valid day-of-year for the active calendar.
        max: u16,
    },
}
