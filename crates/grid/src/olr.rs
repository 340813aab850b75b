//! Validated OLR data cube with time and spatial axes.

use chrono::NaiveDate;
use ndarray::{Array1, Array3, ArrayView2, Axis};

use omi_calendar::{LeapYearTreatment, find_doy_ranges_in_dates};

use crate::error::GridError;

/// A gridded OLR field: a `(time, latitude, longitude)` cube plus its axes.
///
/// Invariants, checked at construction:
/// - every axis length matches the corresponding cube dimension,
/// - the time axis is strictly increasing,
/// - both spatial axes are strictly increasing.
///
/// The structure is immutable; all derived fields are new objects.
#[derive(Debug, Clone)]
pub struct OlrData {
    olr: Array3<f64>,
    time: Vec<NaiveDate>,
    lat: Array1<f64>,
    long: Array1<f64>,
}

impl OlrData {
    /// Creates a new `OlrData` from a data cube and its axes.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`GridError::EmptyAxis`] | any empty axis |
    /// | [`GridError::AxisMismatch`] | axis length != cube dimension |
    /// | [`GridError::AxisNotIncreasing`] | non-monotonic axis |
    pub fn new(
        olr: Array3<f64>,
        time: Vec<NaiveDate>,
        lat: Array1<f64>,
        long: Array1<f64>,
    ) -> Result<Self, GridError> {
        let shape = olr.shape();
        check_axis_len("time", time.len(), shape[0])?;
        check_axis_len("lat", lat.len(), shape[1])?;
        check_axis_len("long", long.len(), shape[2])?;

        if !time.windows(2).all(|w| w[0] < w[1]) {
            return Err(GridError::AxisNotIncreasing { name: "time" });
        }
        check_increasing("lat", lat.as_slice().expect("contiguous"))?;
        check_increasing("long", long.as_slice().expect("contiguous"))?;

        Ok(Self {
            olr,
            time,
            lat,
            long,
        })
    }

    /// Returns the OLR data cube `(time, lat, long)`.
    pub fn olr(&self) -> &Array3<f64> {
        &self.olr
    }

    /// Returns the time axis.
    pub fn time(&self) -> &[NaiveDate] {
        &self.time
    }

    /// Returns the latitude axis.
    pub fn lat(&self) -> &Array1<f64> {
        &self.lat
    }

    /// Returns the longitude axis.
    pub fn long(&self) -> &Array1<f64> {
        &self.long
    }

    /// Returns the number of days on the time axis.
    pub fn n_time(&self) -> usize {
        self.time.len()
    }

    /// Returns the number of latitudes.
    pub fn n_lat(&self) -> usize {
        self.lat.len()
    }

    /// Returns the number of longitudes.
    pub fn n_long(&self) -> usize {
        self.long.len()
    }

    /// Temporal sampling interval in days, derived from the first two
    /// entries of the time axis. Returns 1.0 for a single-entry axis.
    pub fn time_spacing_days(&self) -> f64 {
        if self.time.len() < 2 {
            return 1.0;
        }
        (self.time[1] - self.time[0]).num_days() as f64
    }

    /// Returns the spatial OLR map for one date.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::DateNotFound`] if `date` is not on the time
    /// axis.
    pub fn olr_for_date(&self, date: NaiveDate) -> Result<ArrayView2<'_, f64>, GridError> {
        let idx = self
            .time
            .binary_search(&date)
            .map_err(|_| GridError::DateNotFound { date })?;
        Ok(self.olr.index_axis(Axis(0), idx))
    }

    /// Extracts the OLR maps of all days whose DOY lies within
    /// `window_length` days of `center_doy`.
    ///
    /// The series may span several years; each year contributes its own
    /// window around the center DOY. The result is a
    /// `(selected days, lat, long)` cube.
    ///
    /// # Errors
    ///
    /// Propagates calendar errors from the window selection.
    pub fn extract_olr_matrix_for_doy_range(
        &self,
        center_doy: u16,
        window_length: u16,
        treatment: LeapYearTreatment,
    ) -> Result<Array3<f64>, GridError> {
        let window = find_doy_ranges_in_dates(&self.time, center_doy, window_length, treatment)?;
        let mut out = Array3::zeros((window.len(), self.n_lat(), self.n_long()));
        for (row, &idx) in window.indices().iter().enumerate() {
            out.index_axis_mut(Axis(0), row)
                .assign(&self.olr.index_axis(Axis(0), idx));
        }
        Ok(out)
    }

    /// Returns a new `OlrData` restricted to days in `[start, stop]`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::EmptyPeriod`] if the restriction selects no
    /// days.
    pub fn restrict_time_coverage(
        &self,
        start: NaiveDate,
        stop: NaiveDate,
    ) -> Result<Self, GridError> {
        let indices: Vec<usize> = self
            .time
            .iter()
            .enumerate()
            .filter(|&(_, &d)| d >= start && d <= stop)
            .map(|(i, _)| i)
            .collect();
        if indices.is_empty() {
            return Err(GridError::EmptyPeriod { start, stop });
        }

        let mut olr = Array3::zeros((indices.len(), self.n_lat(), self.n_long()));
        let mut time = Vec::with_capacity(indices.len());
        for (row, &idx) in indices.iter().enumerate() {
            olr.index_axis_mut(Axis(0), row)
                .assign(&self.olr.index_axis(Axis(0), idx));
            time.push(self.time[idx]);
        }

        Self::new(olr, time, self.lat.clone(), self.long.clone())
    }
}

fn check_axis_len(name: &'static str, got: usize, expected: usize) -> Result<(), GridError> {
    if got == 0 {
        return Err(GridError::EmptyAxis { name });
    }
    if got != expected {
        return Err(GridError::AxisMismatch {
            name,
            expected,
            got,
        });
    }
    Ok(())
}

fn check_increasing(name: &'static str, values: &[f64]) -> Result<(), GridError> {
    if !values.windows(2).all(|w| w[0] < w[1]) {
        return Err(GridError::AxisNotIncreasing { name });
    }
    Ok(())
}
