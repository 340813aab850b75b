//! PC time series text formats: the CSV output format and the legacy
//! reference column layout.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;

use omi_pc::PcSeries;

use crate::error::IoError;

const HEADER: &str = "Date,PC1,PC2";

/// Saves a PC series as CSV (`Date,PC1,PC2`, ISO dates, 5 decimals).
///
/// # Errors
///
/// Returns [`IoError::Io`] on write failures.
pub fn save_pcs_to_txt_file(pcs: &PcSeries, path: &Path) -> Result<(), IoError> {
    let mut content = String::with_capacity(pcs.len() * 32);
    content.push_str(HEADER);
    content.push('\n');
    for ((date, pc1), pc2) in pcs.time().iter().zip(pcs.pc1()).zip(pcs.pc2()) {
        writeln!(content, "{},{:.5},{:.5}", date.format("%Y-%m-%d"), pc1, pc2)
            .expect("writing to a String cannot fail");
    }
    fs::write(path, content)?;
    Ok(())
}

/// Loads a PC series previously written by [`save_pcs_to_txt_file`].
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] for a missing path and
/// [`IoError::Format`] for malformed content.
pub fn load_pcs_from_txt_file(path: &Path) -> Result<PcSeries, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = fs::read_to_string(path)?;
    let mut lines = content.lines();

    match lines.next() {
        Some(header) if header.trim() == HEADER => {}
        other => {
            return Err(IoError::Format {
                path: path.to_path_buf(),
                reason: format!("unexpected header {other:?}"),
            });
        }
    }

    let mut time = Vec::new();
    let mut pc1 = Vec::new();
    let mut pc2 = Vec::new();
    for (lineno, line) in lines.enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() != 3 {
            return Err(IoError::Format {
                path: path.to_path_buf(),
                reason: format!("line {} has {} fields, expected 3", lineno + 2, fields.len()),
            });
        }
        time.push(parse_date(fields[0].trim(), path, lineno + 2)?);
        pc1.push(parse_f64(fields[1].trim(), path, lineno + 2)?);
        pc2.push(parse_f64(fields[2].trim(), path, lineno + 2)?);
    }

    Ok(PcSeries::new(time, pc1, pc2)?)
}

/// Loads PCs from the legacy reference column layout: whitespace-separated
/// rows of `year month day <ignored> pc1 pc2`.
///
/// Used only to compare recalculated PCs against the original product.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] for a missing path and
/// [`IoError::Format`] for malformed content.
pub fn load_original_pcs_from_txt_file(path: &Path) -> Result<PcSeries, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = fs::read_to_string(path)?;

    let mut time = Vec::new();
    let mut pc1 = Vec::new();
    let mut pc2 = Vec::new();
    for (lineno, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 6 {
            return Err(IoError::Format {
                path: path.to_path_buf(),
                reason: format!(
                    "line {} has {} columns, expected at least 6",
                    lineno + 1,
                    fields.len()
                ),
            });
        }
        let year: i32 = fields[0].parse().map_err(|e| IoError::Format {
            path: path.to_path_buf(),
            reason: format!("line {}: bad year: {e}", lineno + 1),
        })?;
        let month: u32 = fields[1].parse().map_err(|e| IoError::Format {
            path: path.to_path_buf(),
            reason: format!("line {}: bad month: {e}", lineno + 1),
        })?;
        let day: u32 = fields[2].parse().map_err(|e| IoError::Format {
            path: path.to_path_buf(),
            reason: format!("line {}: bad day: {e}", lineno + 1),
        })?;
        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| IoError::Format {
            path: path.to_path_buf(),
            reason: format!("line {}: invalid date {year}-{month}-{day}", lineno + 1),
        })?;
        time.push(date);
        pc1.push(parse_f64(fields[4], path, lineno + 1)?);
        pc2.push(parse_f64(fields[5], path, lineno + 1)?);
    }

    Ok(PcSeries::new(time, pc1, pc2)?)
}

fn parse_date(field: &str, path: &Path, lineno: usize) -> Result<NaiveDate, IoError> {
    NaiveDate::parse_from_str(field, "%Y-%m-%d").map_err(|e| IoError::Format {
        path: path.to_path_buf(),
        reason: format!("line {lineno}: bad date '{field}': {e}"),
    })
}

fn parse_f64(field: &str, path: &Path, lineno: usize) -> Result<f64, IoError> {
    field.parse().map_err(|e| IoError::Format {
        path: path.to_path_buf(),
        reason: format!("line {lineno}: bad value '{field}': {e}"),
    })
}
