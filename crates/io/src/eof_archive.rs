//! Lossless Parquet archive for full EOF collections.
//!
//! Long format, one row per `(doy, lat, long)` cell with columns `doy`,
//! `lat`, `long`, `eof1`, `eof2`, batched per DOY. The calendar flavour
//! (365 vs 366 DOYs) is recovered from the largest stored DOY.

use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, RecordBatch, UInt16Array};
use arrow::datatypes::{DataType, Field, Schema};
use ndarray::Array1;
use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::file::properties::WriterProperties;

use omi_eof::{EofCollection, EofPair};

use crate::error::IoError;

fn eof_schema() -> Schema {
    Schema::new(vec![
        Field::new("doy", DataType::UInt16, false),
        Field::new("lat", DataType::Float64, false),
        Field::new("long", DataType::Float64, false),
        Field::new("eof1", DataType::Float64, false),
        Field::new("eof2", DataType::Float64, false),
    ])
}

/// Saves a full EOF collection to a Parquet archive at `path`.
///
/// # Errors
///
/// Returns [`IoError::Parquet`] on write failures.
pub fn save_all_eofs_to_parquet(eofs: &EofCollection, path: &Path) -> Result<(), IoError> {
    let schema = Arc::new(eof_schema());
    let file = std::fs::File::create(path)?;
    let mut writer =
        ArrowWriter::try_new(file, schema.clone(), Some(WriterProperties::builder().build()))?;

    let n_cells = eofs.lat().len() * eofs.long().len();
    for (idx, pair) in eofs.pairs().iter().enumerate() {
        let doy = idx as u16 + 1;
        let mut lats = Vec::with_capacity(n_cells);
        let mut longs = Vec::with_capacity(n_cells);
        for &lat in pair.lat().iter() {
            for &long in pair.long().iter() {
                lats.push(lat);
                longs.push(long);
            }
        }
        let columns: Vec<ArrayRef> = vec![
            Arc::new(UInt16Array::from(vec![doy; n_cells])),
            Arc::new(Float64Array::from(lats)),
            Arc::new(Float64Array::from(longs)),
            Arc::new(Float64Array::from(pair.eof1_vector().to_vec())),
            Arc::new(Float64Array::from(pair.eof2_vector().to_vec())),
        ];
        let batch = RecordBatch::try_new(schema.clone(), columns)?;
        writer.write(&batch)?;
    }

    writer.close()?;
    Ok(())
}

/// Restores a full EOF collection from a Parquet archive at `path`.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] for a missing path,
/// [`IoError::Parquet`] for malformed content, and propagates collection
/// validation failures.
pub fn restore_all_eofs_from_parquet(path: &Path) -> Result<EofCollection, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let file = std::fs::File::open(path)?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

    let mut doys: Vec<u16> = Vec::new();
    let mut lats: Vec<f64> = Vec::new();
    let mut longs: Vec<f64> = Vec::new();
    let mut eof1: Vec<f64> = Vec::new();
    let mut eof2: Vec<f64> = Vec::new();

    for batch in reader {
        let batch = batch?;
        let doy_col = batch
            .column(0)
            .as_any()
            .downcast_ref::<UInt16Array>()
            .ok_or_else(|| IoError::Parquet {
                reason: format!("column 0 of {} is not UInt16", path.display()),
            })?;
        doys.extend(doy_col.values().iter().copied());
        for (target, index) in [(&mut lats, 1), (&mut longs, 2), (&mut eof1, 3), (&mut eof2, 4)]
        {
            let col = batch
                .column(index)
                .as_any()
                .downcast_ref::<Float64Array>()
                .ok_or_else(|| IoError::Parquet {
                    reason: format!("column {index} of {} is not Float64", path.display()),
                })?;
            target.extend(col.values().iter().copied());
        }
    }

    let max_doy = *doys.iter().max().ok_or_else(|| IoError::Parquet {
        reason: format!("{} holds no rows", path.display()),
    })? as usize;
    if doys.len() % max_doy != 0 {
        return Err(IoError::Parquet {
            reason: format!(
                "{} rows cannot be split into {} DOYs",
                doys.len(),
                max_doy
            ),
        });
    }
    let n_cells = doys.len() / max_doy;

    // Grid axes from the first DOY's rows.
    let lat_axis: Vec<f64> = unique_in_order(&lats[..n_cells]);
    let long_axis: Vec<f64> = unique_in_order(&longs[..n_cells]);

    let mut pairs = Vec::with_capacity(max_doy);
    for d in 0..max_doy {
        let range = d * n_cells..(d + 1) * n_cells;
        let expected_doy = d as u16 + 1;
        if doys[range.clone()].iter().any(|&v| v != expected_doy) {
            return Err(IoError::Parquet {
                reason: format!("rows for DOY {expected_doy} are not contiguous"),
            });
        }
        pairs.push(EofPair::new(
            Array1::from_vec(lat_axis.clone()),
            Array1::from_vec(long_axis.clone()),
            Array1::from_vec(eof1[range.clone()].to_vec()).into_dyn(),
            Array1::from_vec(eof2[range].to_vec()).into_dyn(),
        )?);
    }

    Ok(EofCollection::new(pairs, max_doy == 365)?)
}

fn unique_in_order(values: &[f64]) -> Vec<f64> {
    let mut out: Vec<f64> = Vec::new();
    for &v in values {
        if !out.iter().any(|&u| u == v) {
            out.push(v);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_in_order_basics() {
        assert_eq!(
            unique_in_order(&[0.0, 5.0, 0.0, 5.0, 10.0]),
            vec![0.0, 5.0, 10.0]
        );
    }
}
