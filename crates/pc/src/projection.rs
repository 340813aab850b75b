//! Projection of filtered OLR onto DOY-matched EOF pairs and the full
//! OMI assembly.

use chrono::NaiveDate;
use tracing::info;

use omi_calendar::day_of_year;
use omi_eof::EofCollection;
use omi_filter::{
    FilterConfig, filter_olr_for_mjo_pc_calculation, filter_olr_for_mjo_pc_calculation_1d,
};
use omi_grid::{OlrData, resample_spatial_grid};

use crate::error::PcError;
use crate::series::PcSeries;

/// Which bandpass variant preprocesses the OLR before projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PcFilterKind {
    /// Full 2D time-longitude filtering (periods 20..96 days, all
    /// wavenumbers). The reference choice.
    #[default]
    TwoDim,
    /// Time-only 1D spectral smoothing (periods 20..96 days). Faster and
    /// nearly as accurate for PC computation.
    QuickOneDim,
}

/// Projects each day of an (already bandpass-filtered) OLR field onto
/// the EOF pair of that day's DOY.
///
/// PC1 and PC2 are the dot products of the flattened spatial field with
/// `eof1` and `eof2` respectively. The output spans the full input
/// period, independent of the per-DOY windows the EOFs were fitted on.
///
/// # Errors
///
/// Propagates calendar errors (e.g. Feb 29 against a no-leap
/// collection), grid mismatches between field and EOFs, and series
/// validation failures.
pub fn project_onto_eofs(olr: &OlrData, eofs: &EofCollection) -> Result<PcSeries, PcError> {
    let mut pc1 = Vec::with_capacity(olr.n_time());
    let mut pc2 = Vec::with_capacity(olr.n_time());

    for &date in olr.time() {
        let doy = day_of_year(date, eofs.no_leap())?;
        let pair = eofs.pair_for_doy(doy)?;
        let map = olr.olr_for_date(date)?.to_owned();
        let vector = pair.map_to_vector(&map)?;
        pc1.push(vector.dot(pair.eof1_vector()));
        pc2.push(vector.dot(pair.eof2_vector()));
    }

    PcSeries::new(olr.time().to_vec(), pc1, pc2)
}

/// Computes normalized OMI PCs from unfiltered OLR data.
///
/// The field is restricted to `[start, stop]`, resampled onto the EOF
/// grid, bandpass-filtered with the PC band, projected onto the
/// DOY-matched EOF pairs, and finally both PCs are scaled by the inverse
/// population standard deviation of PC1.
///
/// # Errors
///
/// Propagates failures of every stage; returns [`PcError::ZeroStd`] if
/// the raw PC1 series is constant.
pub fn calculate_pcs_from_olr(
    olr: &OlrData,
    eofs: &EofCollection,
    start: NaiveDate,
    stop: NaiveDate,
    filter_kind: PcFilterKind,
    config: &FilterConfig,
) -> Result<PcSeries, PcError> {
    info!(%start, %stop, ?filter_kind, "calculating PCs from OLR");

    let restricted = olr.restrict_time_coverage(start, stop)?;
    let resampled = resample_spatial_grid(&restricted, eofs.lat(), eofs.long())?;

    let filtered = match filter_kind {
        PcFilterKind::TwoDim => filter_olr_for_mjo_pc_calculation(&resampled, config)?,
        PcFilterKind::QuickOneDim => filter_olr_for_mjo_pc_calculation_1d(&resampled)?,
    };

    let raw = project_onto_eofs(&filtered, eofs)?;
    normalize_pcs(&raw)
}

/// Scales both PCs by the inverse population standard deviation of PC1,
/// the normalization of the reference OMI product.
fn normalize_pcs(raw: &PcSeries) -> Result<PcSeries, PcError> {
    let std1 = omi_stats::std_pop(raw.pc1());
    if std1 == 0.0 {
        return Err(PcError::ZeroStd);
    }
    let factor = 1.0 / std1;
    PcSeries::new(
        raw.time().to_vec(),
        raw.pc1().iter().map(|&v| v * factor).collect(),
        raw.pc2().iter().map(|&v| v * factor).collect(),
    )
}
