//! Adapter for the NOAA interpolated OLR NetCDF product.

use std::path::Path;

use chrono::{Days, NaiveDate};
use ndarray::{Array1, Array3};
use tracing::info;

use omi_grid::OlrData;

use crate::error::IoError;

/// Scale divisor of the legacy integer encoding.
const NOAA_OLR_SCALE: f64 = 100.0;
/// Offset of the legacy integer encoding, in W/m^2.
const NOAA_OLR_OFFSET: f64 = 327.65;
/// Epoch of the `hours since 1800-01-01` time axis.
const NOAA_EPOCH: (i32, u32, u32) = (1800, 1, 1);

/// Loads the standard OLR data product provided by NOAA.
///
/// The dataset (`olr.day.mean.nc`) stores OLR as scaled integers
/// (`value / 100 + 327.65` W/m^2) on variables `olr`/`lat`/`lon` and a
/// time axis in hours since 1800-01-01. A descending latitude axis is
/// flipped on ingestion so the result satisfies the `OlrData` axis
/// ordering invariants.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] before opening a missing path, and
/// [`IoError::MissingVariable`] / [`IoError::DimensionMismatch`] /
/// [`IoError::InvalidTime`] for malformed content.
pub fn load_noaa_interpolated_olr(path: &Path) -> Result<OlrData, IoError> {
    let file = open_file(path)?;

    let lat = read_1d_f64(&file, &["lat", "latitude"], path)?;
    let long = read_1d_f64(&file, &["lon", "long", "longitude"], path)?;
    let hours = read_1d_f64(&file, &["time"], path)?;
    let (raw, shape) = read_3d_f64(&file, "olr", path)?;

    let time = hours_since_epoch_to_dates(&hours)?;

    let mut cube = Array3::from_shape_vec((shape[0], shape[1], shape[2]), raw).map_err(|e| {
        IoError::Netcdf {
            reason: format!("olr variable shape mismatch: {e}"),
        }
    })?;
    cube.mapv_inplace(|v| v / NOAA_OLR_SCALE + NOAA_OLR_OFFSET);

    // NOAA stores latitudes from north to south; flip to ascending.
    let (lat, cube) = if lat.windows(2).all(|w| w[0] > w[1]) {
        let flipped_lat: Vec<f64> = lat.iter().rev().cloned().collect();
        let flipped_cube = cube.slice(ndarray::s![.., ..;-1, ..]).to_owned();
        (flipped_lat, flipped_cube)
    } else {
        (lat, cube)
    };

    info!(
        days = time.len(),
        lats = lat.len(),
        longs = long.len(),
        "loaded NOAA interpolated OLR"
    );

    Ok(OlrData::new(
        cube,
        time,
        Array1::from_vec(lat),
        Array1::from_vec(long),
    )?)
}

/// Open a NetCDF file at `path`, returning [`IoError::FileNotFound`] if
/// the path does not exist on disk.
fn open_file(path: &Path) -> Result<netcdf::File, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(netcdf::open(path)?)
}

/// Read a 1-D `f64` variable, trying each alias in order.
///
/// Returns the data from the first alias that matches. If none match,
/// returns [`IoError::MissingVariable`] with the first alias as the name.
fn read_1d_f64(file: &netcdf::File, aliases: &[&str], path: &Path) -> Result<Vec<f64>, IoError> {
    for &alias in aliases {
        if let Some(var) = file.variable(alias) {
            return Ok(var.get_values::<f64, _>(..)?);
        }
    }
    let name = aliases.first().copied().unwrap_or("unknown");
    Err(IoError::MissingVariable {
        name: name.to_string(),
        path: path.to_path_buf(),
    })
}

/// Read a 3-D `f64` variable and return the flattened data together with
/// the shape `[nt, ny, nx]` derived from the variable's dimensions.
fn read_3d_f64(
    file: &netcdf::File,
    var_name: &str,
    path: &Path,
) -> Result<(Vec<f64>, [usize; 3]), IoError> {
    let var = file
        .variable(var_name)
        .ok_or_else(|| IoError::MissingVariable {
            name: var_name.to_string(),
            path: path.to_path_buf(),
        })?;

    let dims = var.dimensions();
    if dims.len() != 3 {
        return Err(IoError::DimensionMismatch {
            name: var_name.to_string(),
            expected: 3,
            got: dims.len(),
        });
    }

    let shape = [dims[0].len(), dims[1].len(), dims[2].len()];
    let data = var.get_values::<f64, _>(..)?;
    Ok((data, shape))
}

/// Convert `hours since 1800-01-01` offsets into dates.
///
/// Hours are converted with truncating division by 24, matching the
/// legacy decoder.
fn hours_since_epoch_to_dates(hours: &[f64]) -> Result<Vec<NaiveDate>, IoError> {
    let epoch = NaiveDate::from_ymd_opt(NOAA_EPOCH.0, NOAA_EPOCH.1, NOAA_EPOCH.2)
        .expect("epoch is a valid date");
    hours
        .iter()
        .map(|&h| {
            let days = (h / 24.0) as i64;
            if days < 0 {
                return Err(IoError::InvalidTime {
                    reason: format!("negative day offset {days} from epoch"),
                });
            }
            epoch
                .checked_add_days(Days::new(days as u64))
                .ok_or_else(|| IoError::InvalidTime {
                    reason: format!("date overflow adding {days} days to {epoch}"),
                })
        })
        .collect()
}
