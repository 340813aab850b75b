//! # omi-filter
//!
//! Wheeler–Kiladis spectral bandpass filtering of OLR fields.
//!
//! ## Analysis Pipeline
//!
//! ```mermaid
//! graph LR
//!     A["Array2 (time x longitude)"] -->|"detrend per longitude"| B["trend-free slice"]
//!     B -->|"zero-pad + taper"| C["padded buffer"]
//!     C -->|"2D FFT + legacy reorder"| D["spectrum"]
//!     D -->|"trapezoid mask"| E["filtered spectrum"]
//!     E -->|"inverse reorder + 2D IFFT"| F["filtered slice"]
//! ```
//!
//! The spectral conventions (component ordering, frequency and wavenumber
//! axes, boundary-line mask) deliberately reproduce the legacy Kiladis
//! Fortran pipeline rather than a textbook formulation. The non-obvious
//! index convention is isolated in [`reorder_to_legacy`] /
//! [`reorder_from_legacy`].
//!
//! ## Quick Start
//!
//! ```ignore
//! use omi_filter::{BandLimits, FilterConfig, filter_olr_for_mjo_eof_calculation};
//!
//! let config = FilterConfig::new();
//! let filtered = filter_olr_for_mjo_eof_calculation(&olr, &config)?;
//! ```

mod error;
mod olr_filters;
mod preprocess;
mod reorder;
mod smooth1d;
mod wk;

pub use error::FilterError;
pub use olr_filters::{
    filter_olr_for_mjo_eof_calculation, filter_olr_for_mjo_pc_calculation,
    filter_olr_for_mjo_pc_calculation_1d, filter_olr_temporally_and_longitudinally,
};
pub use preprocess::{detrend_in_place, taper_to_zero_in_place};
pub use reorder::{legacy_roll_offset, reorder_from_legacy, reorder_to_legacy};
pub use smooth1d::spectral_smoothing_1d;
pub use wk::{BandLimits, FilterConfig, wk_filter};
