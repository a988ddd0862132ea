//! Constants of the Matrix Market exchange format
//!
//! Everything the readers treat as a fixed property of the file format lives
//! here. Limits that callers may want to override (the maximum line length)
//! only provide the default; the value actually used is carried by
//! [`ReaderConfig`](crate::io::ReaderConfig).

// ============================================================================
// LINE LIMITS
// ============================================================================

/// Maximum number of bytes in one line, line terminator included
pub const MAX_LINE_LENGTH: usize = 1024;

// ============================================================================
// HEADER AND COMMENT SYNTAX
// ============================================================================

/// Keyword that opens every Matrix Market header line
pub const HEADER_IDENTIFIER: &str = "%%MatrixMarket";

/// Separator between header tokens
pub const HEADER_TOKEN_SEPARATOR: char = ' ';

/// First non-whitespace character of a comment line
pub const COMMENT_MARKER: char = '%';

// ============================================================================
// HEADER VOCABULARY
// ============================================================================

/// Object type of a matrix file
pub const OBJECT_MATRIX: &str = "matrix";

/// Sparse storage format
pub const FORMAT_COORDINATE: &str = "coordinate";

/// Dense storage format (recognised, not converted)
pub const FORMAT_ARRAY: &str = "array";

// ============================================================================
// BODY LAYOUT
// ============================================================================

/// Number of integers on the size line: rows, columns, nonzeros
pub const SIZE_LINE_FIELDS: usize = 3;
