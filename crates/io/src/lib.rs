//! # omi-io
//!
//! External formats of the OMI pipeline: the NOAA NetCDF source adapter,
//! lossless Parquet archives for OLR fields and EOF collections, the
//! legacy per-DOY EOF text format, and PC text files. Bridges file
//! formats into the in-memory data models of `omi-grid`, `omi-eof` and
//! `omi-pc`.

mod eof_archive;
mod eof_txt;
mod error;
mod netcdf_read;
mod olr_archive;
mod pc_txt;

pub use eof_archive::{restore_all_eofs_from_parquet, save_all_eofs_to_parquet};
pub use eof_txt::{
    load_all_eofs_from_directory, load_single_eofs_from_txt_file, save_all_eofs_to_dir,
    save_eofs_to_txt_file,
};
pub use error::IoError;
pub use netcdf_read::load_noaa_interpolated_olr;
pub use olr_archive::{restore_olr_from_parquet, save_olr_to_parquet};
pub use pc_txt::{load_original_pcs_from_txt_file, load_pcs_from_txt_file, save_pcs_to_txt_file};
