//! Error types for the omi-evaluate crate.

/// Error type for all fallible operations in the omi-evaluate crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvaluateError {
    /// Returned when two vectors to compare differ in length.
    #[error("vectors differ in length: reference {reference}, target {target}")]
    LengthMismatch {
        /// Length of the reference vector.
        reference: usize,
        /// Length of the target vector.
        target: usize,
    },

    /// Returned when an EOF component selector is neither 1 nor 2.
    #[error("eof_number must be 1 or 2 (got {got})")]
    InvalidEofNumber {
        /// The invalid selector.
        got: u8,
    },

    /// Returned when two collections cover different DOY ranges.
    #[error("collections cover different DOY ranges: reference {reference}, target {target}")]
    CoverageMismatch {
        /// DOY count of the reference collection.
        reference: usize,
        /// DOY count of the target collection.
        target: usize,
    },

    /// Returned when two PC series are not on the same time axis.
    #[error("PC series are not on the same time axis")]
    TimeAxisMismatch,

    /// Wraps an error originating from the omi-eof crate.
    #[error("eof error: {0}")]
    Eof(#[from] omi_eof::EofError),
}
