//! # omi-grid
//!
//! Gridded OLR field data model for the OMI pipeline.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["OlrData::new(cube, time, lat, long)?"] -->|"validate"| B["OlrData"]
//!     B -->|"restrict_time_coverage()"| B
//!     B -->|"resample_spatial_grid()"| B
//!     B --> C[".olr_for_date()"]
//!     B --> D[".extract_olr_matrix_for_doy_range()"]
//! ```
//!
//! The cube is `(time, latitude, longitude)`. All constructors copy their
//! inputs and every operation returns a new object; nothing mutates an
//! `OlrData` after construction.

mod error;
mod olr;
mod resample;

pub use error::GridError;
pub use olr::OlrData;
pub use resample::{original_grid, resample_spatial_grid, resample_to_original_grid};
