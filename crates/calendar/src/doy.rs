//! Day-of-year computation with optional no-leap handling.

use chrono::{Datelike, NaiveDate};

use crate::error::CalendarError;

/// Number of days in each month of a 365-day year
/// (index 0 unused, index 1 = January, ..., index 12 = December).
pub(crate) const DAYS_PER_MONTH_NO_LEAP: [u8; 13] =
    [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Day-of-year on which each month starts in a 365-day year
/// (index 0 unused, index 1 = January starts at DOY 1, ...).
pub(crate) const MONTH_START_DOY_NO_LEAP: [u16; 13] =
    [0, 1, 32, 60, 91, 121, 152, 182, 213, 244, 274, 305, 335];

/// Computes the 1-based day-of-year for a single date.
///
/// With `no_leap = false`, the DOY follows the real calendar (Dec 31 of a
/// leap year is DOY 366). With `no_leap = true`, all years are treated as
/// 365 days long; February 29 is then an invalid date.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidNoLeapDate`] for February 29 when
/// `no_leap` is true.
pub fn day_of_year(date: NaiveDate, no_leap: bool) -> Result<u16, CalendarError> {
    if !no_leap {
        return Ok(date.ordinal() as u16);
    }
    let month = date.month() as usize;
    let day = date.day() as u8;
    if day > DAYS_PER_MONTH_NO_LEAP[month] {
        return Err(CalendarError::InvalidNoLeapDate { date });
    }
    Ok(MONTH_START_DOY_NO_LEAP[month] + day as u16 - 1)
}

/// Computes the day-of-year for each date in a slice.
///
/// # Errors
///
/// Propagates [`CalendarError::InvalidNoLeapDate`] from the first
/// offending date when `no_leap` is true.
pub fn days_of_year(dates: &[NaiveDate], no_leap: bool) -> Result<Vec<u16>, CalendarError> {
    dates.iter().map(|&d| day_of_year(d, no_leap)).collect()
}

/// Returns all DOYs of a year: `1..=366`, or `1..=365` with `no_leap`.
pub fn doy_list(no_leap: bool) -> Vec<u16> {
    let max = if no_leap { 365 } else { 366 };
    (1..=max).collect()
}
