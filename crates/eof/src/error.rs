//! Error types for the omi-eof crate.

/// Error type for all fallible operations in the omi-eof crate.
///
/// This enum covers shape and dimensionality violations in the EOF data
/// model, DOY coverage problems of collections, and degenerate inputs to
/// the PCA and rotation steps.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EofError {
    /// Returned when an eigenvector input is neither 1- nor 2-dimensional.
    #[error("eigenvector must have a dimension of 1 or 2 (got {ndim})")]
    InvalidDimensionality {
        /// Dimensionality of the offending array.
        ndim: usize,
    },

    /// Returned when the two eigenvectors of a pair differ in shape.
    #[error("eof1 and eof2 must have the same shape ({shape1:?} vs {shape2:?})")]
    ShapeMismatch {
        /// Shape of the first eigenvector.
        shape1: Vec<usize>,
        /// Shape of the second eigenvector.
        shape2: Vec<usize>,
    },

    /// Returned when a flattened eigenvector does not have
    /// `lat.size * long.size` elements.
    #[error("eigenvector length {got} does not equal lat.size*long.size ({expected})")]
    LengthMismatch {
        /// Length actually provided.
        got: usize,
        /// Product of the grid axis lengths.
        expected: usize,
    },

    /// Returned when the first axis of a 2D eigenvector map does not
    /// correspond to the latitude axis.
    #[error("length of first map dimension ({got}) does not correspond to latitude axis ({expected})")]
    LatAxisMismatch {
        /// First-axis length actually provided.
        got: usize,
        /// Latitude axis length.
        expected: usize,
    },

    /// Returned when the second axis of a 2D eigenvector map does not
    /// correspond to the longitude axis.
    #[error("length of second map dimension ({got}) does not correspond to longitude axis ({expected})")]
    LongAxisMismatch {
        /// Second-axis length actually provided.
        got: usize,
        /// Longitude axis length.
        expected: usize,
    },

    /// Returned when a collection does not cover DOYs 1..=365/366
    /// contiguously.
    #[error("collection must hold {expected} EOF pairs, one per DOY (got {got})")]
    DoyCoverage {
        /// Required number of pairs.
        expected: usize,
        /// Number of pairs provided.
        got: usize,
    },

    /// Returned when a pair's spatial grid differs from the collection
    /// grid.
    #[error("EOF pair at DOY {doy} uses a different spatial grid than the collection")]
    GridMismatch {
        /// DOY of the offending pair.
        doy: u16,
    },

    /// Returned when a DOY lookup is outside the collection's range.
    #[error("DOY {doy} outside collection range 1..={max}")]
    DoyOutOfRange {
        /// Requested DOY.
        doy: u16,
        /// Largest DOY in the collection.
        max: u16,
    },

    /// Returned when a DOY window selects too few samples for a PCA.
    #[error("DOY {doy} window selected {got} samples; at least 2 required")]
    InsufficientSamples {
        /// Center DOY of the window.
        doy: u16,
        /// Number of samples found.
        got: usize,
    },

    /// Returned when an eigenvector with zero norm cannot be normalized.
    #[error("EOF at DOY {doy} has zero norm and cannot be normalized")]
    ZeroNormEof {
        /// DOY of the offending pair.
        doy: u16,
    },

    /// Wraps an error originating from the omi-grid crate.
    #[error("grid error: {0}")]
    Grid(#[from] omi_grid::GridError),
}
