use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::info;

use omi_eof::{compute_eofs_from_olr, post_process_rotation};
use omi_filter::{FilterConfig, filter_olr_for_mjo_eof_calculation};
use omi_grid::{OlrData, resample_to_original_grid};
use omi_io::{
    load_noaa_interpolated_olr, restore_olr_from_parquet, save_all_eofs_to_dir,
    save_all_eofs_to_parquet,
};

use crate::cli::EofsArgs;
use crate::config::OmiConfig;

pub fn run(args: EofsArgs) -> Result<()> {
    let config = OmiConfig::load(&args.config)?;

    let olr_path = args
        .input
        .or_else(|| config.io.olr.clone())
        .context("no OLR input given (config [io].olr or --input)")?;
    let output = args
        .output
        .or_else(|| config.io.eofs.clone())
        .context("no EOF output given (config [io].eofs or --output)")?;

    let olr = load_olr(&olr_path)?;
    info!(days = olr.n_time(), "loaded OLR data");

    let resampled = resample_to_original_grid(&olr)?;

    let filter_config = FilterConfig::new()
        .with_padding_length(config.filter.padding_length)
        .with_taper_days(config.filter.taper_days);
    let filtered = filter_olr_for_mjo_eof_calculation(&resampled, &filter_config)?;

    let treatment = config.leap_year_treatment()?;
    let raw = compute_eofs_from_olr(&filtered, config.eof.window_length, treatment)?;
    let eofs = post_process_rotation(&raw)?;

    save_all_eofs_to_parquet(&eofs, &output)?;
    info!(path = %output.display(), "saved EOF archive");

    if let Some(dir) = &config.io.eofs_txt_dir {
        save_all_eofs_to_dir(&eofs, dir, true)?;
        info!(dir = %dir.display(), "saved per-DOY EOF text files");
    }

    Ok(())
}

/// Loads OLR from a NOAA NetCDF file or an OLR Parquet archive, chosen
/// by file extension.
pub fn load_olr(path: &Path) -> Result<OlrData> {
    let source: PathBuf = path.to_path_buf();
    match source.extension().and_then(|e| e.to_str()) {
        Some("nc") => Ok(load_noaa_interpolated_olr(&source)?),
        Some("parquet") => Ok(restore_olr_from_parquet(&source)?),
        other => bail!(
            "unsupported OLR input extension {:?} for {} (expected .nc or .parquet)",
            other,
            source.display()
        ),
    }
}
