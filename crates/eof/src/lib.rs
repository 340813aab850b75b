//! # omi-eof
//!
//! Day-of-year resolved Empirical Orthogonal Functions: data model,
//! per-DOY PCA, and continuity post-processing.
//!
//! ## Analysis Pipeline
//!
//! ```mermaid
//! graph LR
//!     A["filtered OlrData"] -->|"compute_eofs_from_olr()"| B["EofCollection"]
//!     B -->|"correct_spontaneous_sign_changes()"| C["sign-stable collection"]
//!     C -->|"rotate_eofs()"| D["continuity-rotated collection"]
//!     D -->|"normalize_eofs()"| E["unit-norm collection"]
//! ```
//!
//! PCA eigenvectors carry an arbitrary sign per DOY and the leading pair
//! spans a rotatable subspace, so the raw collection is not reproducible
//! across eigen backends. Only the sign-corrected, rotated, normalized
//! collection ([`post_process_rotation`]) is a stable artifact.

mod collection;
mod data;
mod error;
mod pca;
mod rotation;
mod sign;

pub use collection::EofCollection;
pub use data::{EofPair, EofStatistics};
pub use error::EofError;
pub use pca::{calc_eofs_for_doy, compute_eofs_from_olr};
pub use rotation::{
    angle_between_eof_pairs, angle_between_vectors, calculate_angle_from_discontinuity,
    normalize_eofs, post_process_rotation, rotate_each_eof_by_delta, rotate_eofs,
    rotation_matrix,
};
pub use sign::correct_spontaneous_sign_changes;
