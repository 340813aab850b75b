//! Selection of date indices inside a centered day-of-year window.

use chrono::{Days, NaiveDate};

use crate::doy::days_of_year;
use crate::error::CalendarError;

/// How leap years are handled when a DOY window is constructed.
///
/// `Original` reproduces the legacy index algorithm: window bounds are
/// computed as integer DOY distances with wraparound at 1/365, so the
/// total calendar-day coverage per center DOY is approximately equal for
/// all DOYs including 366, at the price of windows occasionally spanning
/// `2*window_length + 2` days across a leap-year end.
///
/// `Strict` computes the bounds as actual calendar dates per occurrence of
/// the center DOY. Every window spans exactly `2*window_length + 1` days,
/// but DOY 366 occurs only in leap years and ends up with roughly a
/// quarter of the samples of its neighbours. Retained for compatibility;
/// not recommended as a default.
///
/// `NoLeapYears` treats every year as 365 days (useful for modeled data
/// on a no-leap calendar).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LeapYearTreatment {
    /// Integer DOY arithmetic with wraparound, closest to the legacy index.
    #[default]
    Original,
    /// Calendar-date windows per occurrence of the center DOY.
    Strict,
    /// 365-day years throughout.
    NoLeapYears,
}

/// Indices of a date series falling inside a centered DOY window,
/// together with the DOY of each selected date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoyWindow {
    indices: Vec<usize>,
    doys: Vec<u16>,
}

impl DoyWindow {
    /// Returns the selected indices into the original date slice.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Returns the DOY of each selected date, parallel to `indices`.
    pub fn doys(&self) -> &[u16] {
        &self.doys
    }

    /// Returns the number of selected dates.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Returns true if no dates were selected.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Finds the indices in `dates` whose DOY lies within `window_length` days
/// of `center_doy`, wrapping circularly across the year boundary.
///
/// Example: `center_doy = 3`, `window_length = 5` selects all dates with
/// DOY in {363..=366, 1..=8} under the `Original` policy.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`CalendarError::InvalidDoy`] | `center_doy` outside 1..=366 (1..=365 for `NoLeapYears`) |
/// | [`CalendarError::InvalidNoLeapDate`] | a Feb 29 date under `NoLeapYears` |
pub fn find_doy_ranges_in_dates(
    dates: &[NaiveDate],
    center_doy: u16,
    window_length: u16,
    treatment: LeapYearTreatment,
) -> Result<DoyWindow, CalendarError> {
    let no_leap = treatment == LeapYearTreatment::NoLeapYears;
    let max_doy = if no_leap { 365 } else { 366 };
    if center_doy < 1 || center_doy > max_doy {
        return Err(CalendarError::InvalidDoy {
            doy: center_doy,
            max: max_doy,
        });
    }

    let doys = days_of_year(dates, no_leap)?;

    let indices = match treatment {
        LeapYearTreatment::Strict => strict_indices(dates, &doys, center_doy, window_length),
        LeapYearTreatment::Original | LeapYearTreatment::NoLeapYears => {
            wrapped_indices(&doys, center_doy, window_length)
        }
    };

    let selected_doys = indices.iter().map(|&i| doys[i]).collect();
    Ok(DoyWindow {
        indices,
        doys: selected_doys,
    })
}

/// Window bounds as integer DOY distances, wrapped at 1/365.
///
/// The wrap constant is 365 even in the leap-aware case; DOY 366 is picked
/// up by the wrapped inequality. This is the legacy behavior.
fn wrapped_indices(doys: &[u16], center_doy: u16, window_length: u16) -> Vec<usize> {
    let center = center_doy as i32;
    let length = window_length as i32;

    let mut lower = center - length;
    if lower < 1 {
        lower += 365;
    }
    let mut upper = center + length;
    if upper > 365 {
        upper -= 365;
    }
    let (lower, upper) = (lower as u16, upper as u16);

    let inside = |doy: u16| {
        if lower <= upper {
            doy >= lower && doy <= upper
        } else {
            doy >= lower || doy <= upper
        }
    };

    doys.iter()
        .enumerate()
        .filter(|&(_, &doy)| inside(doy))
        .map(|(i, _)| i)
        .collect()
}

/// Calendar-date window per occurrence of the center DOY, clamped to the
/// bounds of the series. Occurrences are processed in order; for window
/// lengths short enough not to bridge consecutive years the result is
/// sorted and free of duplicates.
fn strict_indices(
    dates: &[NaiveDate],
    doys: &[u16],
    center_doy: u16,
    window_length: u16,
) -> Vec<usize> {
    let first = dates[0];
    let last = dates[dates.len() - 1];
    let span = Days::new(window_length as u64);

    let mut indices = Vec::new();
    for (i, &doy) in doys.iter().enumerate() {
        if doy != center_doy {
            continue;
        }
        let start = dates[i].checked_sub_days(span).unwrap_or(first).max(first);
        let end = dates[i].checked_add_days(span).unwrap_or(last).min(last);
        for (j, &date) in dates.iter().enumerate() {
            if date >= start && date <= end {
                indices.push(j);
            }
        }
    }
    indices
}
