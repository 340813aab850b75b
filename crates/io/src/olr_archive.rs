//! Lossless Parquet archive for gridded OLR fields.
//!
//! Long format, one row per `(time, lat, long)` cell with columns
//! `time`, `lat`, `long`, `olr`, batched per day.

use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Date32Array, Float64Array, RecordBatch};
use arrow::datatypes::{DataType, Field, Schema};
use chrono::{Days, NaiveDate};
use ndarray::{Array1, Array3};
use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::file::properties::WriterProperties;

use omi_grid::OlrData;

use crate::error::IoError;

fn olr_schema() -> Schema {
    Schema::new(vec![
        Field::new("time", DataType::Date32, false),
        Field::new("lat", DataType::Float64, false),
        Field::new("long", DataType::Float64, false),
        Field::new("olr", DataType::Float64, false),
    ])
}

fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 1).expect("epoch is a valid date")
}

fn date_to_days(date: NaiveDate) -> i32 {
    (date - epoch()).num_days() as i32
}

fn days_to_date(days: i32) -> Result<NaiveDate, IoError> {
    if days < 0 {
        return Err(IoError::InvalidTime {
            reason: format!("archive date {days} precedes 1970-01-01"),
        });
    }
    epoch()
        .checked_add_days(Days::new(days as u64))
        .ok_or_else(|| IoError::InvalidTime {
            reason: format!("archive date overflow: {days} days"),
        })
}

/// Saves an OLR field to a Parquet archive at `path`.
///
/// # Errors
///
/// Returns [`IoError::Parquet`] on write failures.
pub fn save_olr_to_parquet(olr: &OlrData, path: &Path) -> Result<(), IoError> {
    let schema = Arc::new(olr_schema());
    let file = std::fs::File::create(path)?;
    let mut writer =
        ArrowWriter::try_new(file, schema.clone(), Some(WriterProperties::builder().build()))?;

    let n_cells = olr.n_lat() * olr.n_long();
    for (t, &date) in olr.time().iter().enumerate() {
        let day = date_to_days(date);
        let mut lats = Vec::with_capacity(n_cells);
        let mut longs = Vec::with_capacity(n_cells);
        let mut values = Vec::with_capacity(n_cells);
        for (i, &lat) in olr.lat().iter().enumerate() {
            for (j, &long) in olr.long().iter().enumerate() {
                lats.push(lat);
                longs.push(long);
                values.push(olr.olr()[[t, i, j]]);
            }
        }
        let columns: Vec<ArrayRef> = vec![
            Arc::new(Date32Array::from(vec![day; n_cells])),
            Arc::new(Float64Array::from(lats)),
            Arc::new(Float64Array::from(longs)),
            Arc::new(Float64Array::from(values)),
        ];
        let batch = RecordBatch::try_new(schema.clone(), columns)?;
        writer.write(&batch)?;
    }

    writer.close()?;
    Ok(())
}

/// Restores an OLR field from a Parquet archive at `path`.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] for a missing path and
/// [`IoError::Parquet`] for malformed content.
pub fn restore_olr_from_parquet(path: &Path) -> Result<OlrData, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let file = std::fs::File::open(path)?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

    let mut days: Vec<i32> = Vec::new();
    let mut lats: Vec<f64> = Vec::new();
    let mut longs: Vec<f64> = Vec::new();
    let mut values: Vec<f64> = Vec::new();

    for batch in reader {
        let batch = batch?;
        let day_col = column_as_date32(&batch, 0, path)?;
        let lat_col = column_as_f64(&batch, 1, path)?;
        let long_col = column_as_f64(&batch, 2, path)?;
        let olr_col = column_as_f64(&batch, 3, path)?;
        days.extend(day_col.values().iter().copied());
        lats.extend(lat_col.values().iter().copied());
        longs.extend(long_col.values().iter().copied());
        values.extend(olr_col.values().iter().copied());
    }

    let time_days = unique_in_order_i32(&days);
    let lat_axis = unique_in_order_f64(&lats);
    let long_axis = unique_in_order_f64(&longs);

    let (nt, ny, nx) = (time_days.len(), lat_axis.len(), long_axis.len());
    if nt * ny * nx != values.len() {
        return Err(IoError::Parquet {
            reason: format!(
                "archive holds {} rows, expected {} ({}x{}x{})",
                values.len(),
                nt * ny * nx,
                nt,
                ny,
                nx
            ),
        });
    }

    let cube = Array3::from_shape_vec((nt, ny, nx), values).map_err(|e| IoError::Parquet {
        reason: format!("archive row order mismatch: {e}"),
    })?;
    let time = time_days
        .into_iter()
        .map(days_to_date)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(OlrData::new(
        cube,
        time,
        Array1::from_vec(lat_axis),
        Array1::from_vec(long_axis),
    )?)
}

fn column_as_f64<'a>(
    batch: &'a RecordBatch,
    index: usize,
    path: &Path,
) -> Result<&'a Float64Array, IoError> {
    batch
        .column(index)
        .as_any()
        .downcast_ref::<Float64Array>()
        .ok_or_else(|| IoError::Parquet {
            reason: format!(
                "column {index} of {} is not Float64",
                path.display()
            ),
        })
}

fn column_as_date32<'a>(
    batch: &'a RecordBatch,
    index: usize,
    path: &Path,
) -> Result<&'a Date32Array, IoError> {
    batch
        .column(index)
        .as_any()
        .downcast_ref::<Date32Array>()
        .ok_or_else(|| IoError::Parquet {
            reason: format!("column {index} of {} is not Date32", path.display()),
        })
}

fn unique_in_order_i32(values: &[i32]) -> Vec<i32> {
    let mut out = Vec::new();
    for &v in values {
        if !out.contains(&v) {
            out.push(v);
        }
    }
    out
}

fn unique_in_order_f64(values: &[f64]) -> Vec<f64> {
    let mut out: Vec<f64> = Vec::new();
    for &v in values {
        if !out.iter().any(|&u| u == v) {
            out.push(v);
        }
    }
    out
}
