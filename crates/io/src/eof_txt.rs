//! The legacy per-DOY EOF text format.
//!
//! One file per DOY with a `Lat,Long,EOF1,EOF2` header and fixed
//! 7-decimal rows. The fixed precision truncates at the 7th digit, so a
//! round trip is only guaranteed to 1e-7 absolute tolerance.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use ndarray::Array1;
use tracing::info;

use omi_eof::{EofCollection, EofPair};

use crate::error::IoError;

const HEADER: &str = "Lat,Long,EOF1,EOF2";

/// Saves a single EOF pair to the legacy text format.
///
/// # Errors
///
/// Returns [`IoError::Io`] on write failures.
pub fn save_eofs_to_txt_file(pair: &EofPair, path: &Path) -> Result<(), IoError> {
    let mut content = String::with_capacity(pair.eof1_vector().len() * 64);
    content.push_str(HEADER);
    content.push('\n');
    for (i, &lat) in pair.lat().iter().enumerate() {
        for (j, &long) in pair.long().iter().enumerate() {
            let k = i * pair.long().len() + j;
            writeln!(
                content,
                "{:13.7},{:13.7},{:13.7},{:13.7}",
                lat,
                long,
                pair.eof1_vector()[k],
                pair.eof2_vector()[k]
            )
            .expect("writing to a String cannot fail");
        }
    }
    fs::write(path, content)?;
    Ok(())
}

/// Loads a single EOF pair from the legacy text format.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] for a missing path and
/// [`IoError::Format`] for malformed lines.
pub fn load_single_eofs_from_txt_file(path: &Path) -> Result<EofPair, IoError> {
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

    let mut lat_full = Vec::new();
    let mut long_full = Vec::new();
    let mut eof1 = Vec::new();
    let mut eof2 = Vec::new();
    for (lineno, line) in lines.enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() != 4 {
            return Err(IoError::Format {
                path: path.to_path_buf(),
                reason: format!("line {} has {} fields, expected 4", lineno + 2, fields.len()),
            });
        }
        let mut parsed = [0.0f64; 4];
        for (slot, field) in parsed.iter_mut().zip(fields.iter()) {
            *slot = field.trim().parse().map_err(|e| IoError::Format {
                path: path.to_path_buf(),
                reason: format!("line {}: {e}", lineno + 2),
            })?;
        }
        lat_full.push(parsed[0]);
        long_full.push(parsed[1]);
        eof1.push(parsed[2]);
        eof2.push(parsed[3]);
    }

    // The full per-row grids collapse back to the axes.
    let lat = unique_in_order(&lat_full);
    let long = unique_in_order(&long_full);

    Ok(EofPair::new(
        Array1::from_vec(lat),
        Array1::from_vec(long),
        Array1::from_vec(eof1).into_dyn(),
        Array1::from_vec(eof2).into_dyn(),
    )?)
}

/// Saves a full collection as one text file per DOY
/// (`eof001.txt`..`eof366.txt`) in `dir`.
///
/// # Errors
///
/// Returns [`IoError::DirectoryNotFound`] if `dir` does not exist and
/// `create_dir` is false.
pub fn save_all_eofs_to_dir(
    eofs: &EofCollection,
    dir: &Path,
    create_dir: bool,
) -> Result<(), IoError> {
    if !dir.is_dir() {
        if !create_dir {
            return Err(IoError::DirectoryNotFound {
                path: dir.to_path_buf(),
            });
        }
        fs::create_dir_all(dir)?;
    }
    info!(doys = eofs.len(), dir = %dir.display(), "saving EOF collection as text");
    for (idx, pair) in eofs.pairs().iter().enumerate() {
        let path = dir.join(doy_filename(idx as u16 + 1));
        save_eofs_to_txt_file(pair, &path)?;
    }
    Ok(())
}

/// Loads a full collection from per-DOY text files in `dir`.
///
/// The calendar flavour is detected from the presence of `eof366.txt`.
///
/// # Errors
///
/// Returns [`IoError::DirectoryNotFound`] for a missing directory and
/// propagates per-file failures.
pub fn load_all_eofs_from_directory(dir: &Path) -> Result<EofCollection, IoError> {
    if !dir.is_dir() {
        return Err(IoError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }
    let no_leap = !dir.join(doy_filename(366)).exists();
    let max_doy = if no_leap { 365 } else { 366 };

    let mut pairs = Vec::with_capacity(max_doy as usize);
    for doy in 1..=max_doy {
        pairs.push(load_single_eofs_from_txt_file(&dir.join(doy_filename(doy)))?);
    }
    Ok(EofCollection::new(pairs, no_leap)?)
}

fn doy_filename(doy: u16) -> String {
    format!("eof{doy:03}.txt")
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
    use std::fmt::Write;

    #[test]
    fn filenames_are_zero_padded() {
        assert_eq!(doy_filename(1), "eof001.txt");
        assert_eq!(doy_filename(42), "eof042.txt");
        assert_eq!(doy_filename(366), "eof366.txt");
    }

    #[test]
    fn fixed_precision_row_format() {
        let mut s = String::new();
        writeln!(s, "{:13.7},{:13.7}", -20.0, 0.0002217849).unwrap();
        assert_eq!(s, "  -20.0000000,    0.0002218\n");
    }
}
