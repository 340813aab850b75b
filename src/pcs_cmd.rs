use anyhow::{Context, Result};
use tracing::info;

use omi_filter::FilterConfig;
use omi_io::{restore_all_eofs_from_parquet, save_pcs_to_txt_file};
use omi_pc::{PcFilterKind, calculate_pcs_from_olr};

use crate::cli::PcsArgs;
use crate::config::{OmiConfig, parse_config_date};
use crate::eofs_cmd::load_olr;

pub fn run(args: PcsArgs) -> Result<()> {
    let config = OmiConfig::load(&args.config)?;

    let olr_path = args
        .input
        .or_else(|| config.io.olr.clone())
        .context("no OLR input given (config [io].olr or --input)")?;
    let eofs_path = args
        .eofs
        .or_else(|| config.io.eofs.clone())
        .context("no EOF archive given (config [io].eofs or --eofs)")?;
    let output = args
        .output
        .or_else(|| config.io.pcs.clone())
        .context("no PC output given (config [io].pcs or --output)")?;

    let olr = load_olr(&olr_path)?;
    let eofs = restore_all_eofs_from_parquet(&eofs_path)?;
    info!(days = olr.n_time(), doys = eofs.len(), "loaded OLR and EOFs");

    let start = match &config.pc.start {
        Some(s) => parse_config_date("start", s)?,
        None => olr.time()[0],
    };
    let stop = match &config.pc.stop {
        Some(s) => parse_config_date("stop", s)?,
        None => *olr.time().last().expect("validated non-empty"),
    };

    let filter_kind = if config.pc.quick_filter {
        PcFilterKind::QuickOneDim
    } else {
        PcFilterKind::TwoDim
    };
    let filter_config = FilterConfig::new()
        .with_padding_length(config.filter.padding_length)
        .with_taper_days(config.filter.taper_days);

    let pcs = calculate_pcs_from_olr(&olr, &eofs, start, stop, filter_kind, &filter_config)?;

    save_pcs_to_txt_file(&pcs, &output)?;
    info!(days = pcs.len(), path = %output.display(), "saved PC series");
    Ok(())
}
