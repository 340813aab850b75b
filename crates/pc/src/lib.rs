//! # omi-pc
//!
//! Principal component time series: projection of filtered OLR fields
//! onto DOY-matched EOF pairs, and assembly of the final OMI product.
//!
//! ## Pipeline
//!
//! ```mermaid
//! graph LR
//!     A["OlrData"] -->|"restrict + resample"| B["OLR on EOF grid"]
//!     B -->|"PC bandpass filter"| C["filtered OLR"]
//!     C -->|"project_onto_eofs()"| D["raw PcSeries"]
//!     D -->|"normalize by std(PC1)"| E["OMI PcSeries"]
//! ```

mod error;
mod projection;
mod series;

pub use error::PcError;
pub use projection::{PcFilterKind, calculate_pcs_from_olr, project_onto_eofs};
pub use series::PcSeries;
