//! Error types for Matrix Market reading and CRS conversion.

use std::collections::TryReserveError;
use std::io;

use thiserror::Error;

/// All errors that can occur while reading a Matrix Market file.
///
/// Each failure mode has its own variant so callers can tell "no matrix
/// present" apart from "bad formatting" and from resource exhaustion.
#[derive(Debug, Error)]
pub enum MmError {
    /// A buffer could not be allocated.
    #[error("allocation failed: {0}")]
    AllocationFailure(#[from] TryReserveError),

    /// The stream ended or failed before the expected line was read.
    #[error("failed to read line: {0}")]
    ReadFailure(#[from] io::Error),

    /// The stream could not be repositioned.
    #[error("failed to reposition stream: {0}")]
    SeekFailure(#[source] io::Error),

    /// A line is longer than the configured maximum.
    #[error("line exceeds {max} bytes (read {length})")]
    LineTooLong { length: usize, max: usize },

    /// The header does not start with `%%MatrixMarket`.
    #[error("header does not start with the %%MatrixMarket identifier")]
    MissingIdentifier,

    /// The header has no object type token.
    #[error("header has no object type")]
    MissingObjectType,

    /// The header has no storage format token.
    #[error("header has no format type")]
    MissingFormatType,

    /// The header names a layout this reader does not convert.
    #[error("unsupported matrix layout: {object} {format} {qualifiers}")]
    UnsupportedFormat {
        object: String,
        format: String,
        qualifiers: String,
    },

    /// The size line does not hold three unsigned integers.
    #[error("size line must hold rows, columns and nonzero count")]
    MalformedSizeLine,

    /// More nonzeros were declared than the matrix has cells.
    #[error("{num_nonzeros} nonzeros declared for a {num_rows}x{num_columns} matrix")]
    InconsistentDimensions {
        num_rows: usize,
        num_columns: usize,
        num_nonzeros: usize,
    },

    /// An entry line does not hold exactly `row column value`.
    #[error("malformed entry on body line {line}")]
    MalformedTripletLine { line: usize },

    /// An entry references a row or column outside the declared size.
    #[error("entry ({row}, {column}) on body line {line} is outside the matrix")]
    IndexOutOfRange {
        line: usize,
        row: usize,
        column: usize,
    },

    /// The body does not hold exactly the declared number of entries.
    #[error("{declared} nonzeros declared but {found} entries present")]
    NonzeroCountMismatch { declared: usize, found: usize },

    /// CRS arrays violate the storage invariants.
    #[error("invalid CRS structure: {0}")]
    InvalidStructure(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MmError>;

impl MmError {
    /// Stream exhaustion, reported through [`MmError::ReadFailure`].
    pub(crate) fn end_of_stream() -> Self {
        MmError::ReadFailure(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "stream ended before a line was read",
        ))
    }

    /// True if this is a read failure caused by the stream running out.
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, MmError::ReadFailure(e) if e.kind() == io::ErrorKind::UnexpectedEof)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_of_stream_is_read_failure() {
        let err = MmError::end_of_stream();
        assert!(matches!(err, MmError::ReadFailure(_)));
        assert!(err.is_end_of_stream());
    }

    #[test]
    fn test_other_io_errors_are_not_end_of_stream() {
        let err = MmError::from(io::Error::new(io::ErrorKind::Other, "disk on fire"));
        assert!(!err.is_end_of_stream());
        assert!(err.to_string().contains("disk on fire"));
    }

    #[test]
    fn test_messages_carry_context() {
        let err = MmError::LineTooLong {
            length: 1025,
            max: 1024,
        };
        assert_eq!(err.to_string(), "line exceeds 1024 bytes (read 1025)");

        let err = MmError::InconsistentDimensions {
            num_rows: 2,
            num_columns: 2,
            num_nonzeros: 5,
        };
        assert_eq!(err.to_string(), "5 nonzeros declared for a 2x2 matrix");
    }
}
