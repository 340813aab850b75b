use std::path::PathBuf;

use anyhow::{Context, bail};
use chrono::NaiveDate;
use serde::Deserialize;

use omi_calendar::LeapYearTreatment;

/// Top-level OMI configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OmiConfig {
    /// I/O settings.
    #[serde(default)]
    pub io: IoToml,

    /// Wheeler-Kiladis filter settings.
    #[serde(default)]
    pub filter: FilterToml,

    /// EOF computation settings.
    #[serde(default)]
    pub eof: EofToml,

    /// PC computation settings.
    #[serde(default)]
    pub pc: PcToml,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct IoToml {
    /// OLR input: a NOAA NetCDF file (`.nc`) or an OLR Parquet archive.
    pub olr: Option<PathBuf>,
    /// EOF collection Parquet archive.
    pub eofs: Option<PathBuf>,
    /// Optional directory for the legacy per-DOY EOF text files.
    pub eofs_txt_dir: Option<PathBuf>,
    /// PC output text file.
    pub pcs: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterToml {
    #[serde(default = "default_padding_length")]
    pub padding_length: usize,
    #[serde(default = "default_taper_days")]
    pub taper_days: f64,
}

impl Default for FilterToml {
    fn default() -> Self {
        Self {
            padding_length: default_padding_length(),
            taper_days: default_taper_days(),
        }
    }
}

fn default_padding_length() -> usize {
    1 << 17
}
fn default_taper_days() -> f64 {
    10.0
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EofToml {
    #[serde(default = "default_window_length")]
    pub window_length: u16,
    #[serde(default = "default_leap_year_treatment")]
    pub leap_year_treatment: String,
}

impl Default for EofToml {
    fn default() -> Self {
        Self {
            window_length: default_window_length(),
            leap_year_treatment: default_leap_year_treatment(),
        }
    }
}

fn default_window_length() -> u16 {
    60
}
fn default_leap_year_treatment() -> String {
    "original".to_string()
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct PcToml {
    /// First day of the PC period (ISO date); defaults to the data start.
    pub start: Option<String>,
    /// Last day of the PC period (ISO date); defaults to the data end.
    pub stop: Option<String>,
    /// Use the quick 1D temporal filter instead of the full 2D filter.
    #[serde(default)]
    pub quick_filter: bool,
}

impl OmiConfig {
    /// Loads and parses a TOML configuration file.
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing config file {}", path.display()))
    }

    /// Parses the leap-year treatment string.
    pub fn leap_year_treatment(&self) -> anyhow::Result<LeapYearTreatment> {
        match self.eof.leap_year_treatment.as_str() {
            "original" => Ok(LeapYearTreatment::Original),
            "strict" => Ok(LeapYearTreatment::Strict),
            "no_leap_years" => Ok(LeapYearTreatment::NoLeapYears),
            other => bail!(
                "unknown leap_year_treatment '{other}' (expected original, strict or no_leap_years)"
            ),
        }
    }
}

/// Parses an ISO date from a config string.
pub fn parse_config_date(field: &str, value: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("parsing {field} date '{value}'"))
}
