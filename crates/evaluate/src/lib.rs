//! # omi-evaluate
//!
//! Agreement statistics for validating recalculated EOFs and PCs against
//! reference data. Consumes the data models of `omi-eof` and `omi-pc`;
//! produces summary statistics only (no plotting).

mod agreement;
mod comparison;
mod error;

pub use agreement::{VectorAgreement, vector_agreement};
pub use comparison::{PcComparison, compare_eofs_all_doys, compare_pc_series};
pub use error::EvaluateError;
