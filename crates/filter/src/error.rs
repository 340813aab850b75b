//! Error types for the omi-filter crate.

/// Error type for all fallible operations in the omi-filter crate.
///
/// This enum covers configuration validation, the hard length limit of
/// the fixed zero-padding buffer, and grid failures bubbling up from the
/// whole-field wrappers.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FilterError {
    /// Returned when configuration or band parameters are invalid.
    #[error("invalid filter configuration: {0}")]
    InvalidConfig(String),

    /// Returned when the input time series is longer than the fixed
    /// zero-padding buffer. This is a configuration error, not a
    /// recoverable condition.
    #[error("time series of length {len} exceeds the zero-padding buffer ({max})")]
    SeriesTooLong {
        /// Length of the offending input.
        len: usize,
        /// Configured padding buffer length.
        max: usize,
    },

    /// Returned when an input slice has no rows or no columns.
    #[error("input slice is empty ({nt} time steps, {nl} longitudes)")]
    EmptyInput {
        /// Number of time steps provided.
        nt: usize,
        /// Number of longitudes provided.
        nl: usize,
    },

    /// Wraps an error originating from the omi-grid crate.
    #[error("grid error: {0}")]
    Grid(#[from] omi_grid::GridError),
}
