//! Error types for omi-io.

use std::path::PathBuf;

/// Error type for all fallible operations in the omi-io crate.
///
/// This enum covers I/O failures, format-specific errors from NetCDF and
/// Parquet, text parsing issues, and data-model mismatches encountered
/// when reading or writing OMI files.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Returned when a target directory does not exist and auto-creation
    /// is disabled.
    #[error("directory not found: {}", path.display())]
    DirectoryNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps an underlying filesystem error.
    #[error("io error: {reason}")]
    Io {
        /// Description of the underlying failure.
        reason: String,
    },

    /// Wraps an error originating from the NetCDF library.
    #[error("netcdf error: {reason}")]
    Netcdf {
        /// Description of the underlying NetCDF failure.
        reason: String,
    },

    /// Wraps an error originating from the Parquet/Arrow libraries.
    #[error("parquet error: {reason}")]
    Parquet {
        /// Description of the underlying Parquet failure.
        reason: String,
    },

    /// Returned when a required variable is not present in a file.
    #[error("variable '{name}' not found in {}", path.display())]
    MissingVariable {
        /// Name of the missing variable.
        name: String,
        /// Path to the file that was inspected.
        path: PathBuf,
    },

    /// Returned when a variable has an unexpected number of dimensions.
    #[error("variable '{name}' has {got} dimensions, expected {expected}")]
    DimensionMismatch {
        /// Name of the variable.
        name: String,
        /// Expected dimensionality.
        expected: usize,
        /// Actual dimensionality.
        got: usize,
    },

    /// Returned when a time value cannot be decoded.
    #[error("invalid time: {reason}")]
    InvalidTime {
        /// Description of the time decoding issue.
        reason: String,
    },

    /// Returned when text content cannot be parsed.
    #[error("format error in {}: {reason}", path.display())]
    Format {
        /// Path of the offending file.
        path: PathBuf,
        /// Description of the parsing issue.
        reason: String,
    },

    /// Wraps an error originating from the omi-grid crate.
    #[error("grid error: {0}")]
    Grid(#[from] omi_grid::GridError),

    /// Wraps an error originating from the omi-eof crate.
    #[error("eof error: {0}")]
    Eof(#[from] omi_eof::EofError),

    /// Wraps an error originating from the omi-pc crate.
    #[error("pc error: {0}")]
    Pc(#[from] omi_pc::PcError),
}

impl From<std::io::Error> for IoError {
    fn from(e: std::io::Error) -> Self {
        IoError::Io {
            reason: e.to_string(),
        }
    }
}

impl From<netcdf::Error> for IoError {
    fn from(e: netcdf::Error) -> Self {
        IoError::Netcdf {
            reason: e.to_string(),
        }
    }
}

impl From<parquet::errors::ParquetError> for IoError {
    fn from(e: parquet::errors::ParquetError) -> Self {
        IoError::Parquet {
            reason: e.to_string(),
        }
    }
}

impl From<arrow::error::ArrowError> for IoError {
    fn from(e: arrow::error::ArrowError) -> Self {
        IoError::Parquet {
            reason: e.to_string(),
        }
    }
}
