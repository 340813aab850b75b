//! # omi-calendar
//!
//! Day-of-year arithmetic for the OMI pipeline.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["NaiveDate"] -->|"day_of_year()"| B["DOY (1..=366)"]
//!     C["&[NaiveDate]"] -->|"days_of_year()"| D["Vec of DOY"]
//!     C -->|"find_doy_ranges_in_dates()"| E["DoyWindow"]
//!     E --> F[".indices()"]
//!     E --> G[".doys()"]
//! ```
//!
//! ## Leap-year policies
//!
//! | Policy | Window arithmetic | DOY 366 |
//! |--------|-------------------|---------|
//! | [`LeapYearTreatment::Original`] | integer DOY distance, wrap at 1/365 | well sampled |
//! | [`LeapYearTreatment::Strict`] | calendar-date distance per occurrence | under-sampled |
//! | [`LeapYearTreatment::NoLeapYears`] | integer DOY distance, 365-day years | absent |
//!
//! ## Quick Start
//!
//! ```ignore
//! use chrono::NaiveDate;
//! use omi_calendar::{day_of_year, find_doy_ranges_in_dates, LeapYearTreatment};
//!
//! let doy = day_of_year(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(), false)?;
//! assert_eq!(doy, 366);
//!
//! let window = find_doy_ranges_in_dates(&dates, 3, 5, LeapYearTreatment::Original)?;
//! for &idx in window.indices() {
//!     // dates[idx] has a DOY within 5 days of DOY 3 (wrapping the year end)
//! }
//! ```

mod doy;
mod error;
mod window;

pub use doy::{day_of_year, days_of_year, doy_list};
pub use error::CalendarError;
pub use window::{DoyWindow, LeapYearTreatment, find_doy_ranges_in_dates};
