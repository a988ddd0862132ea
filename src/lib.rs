//! # mmcrs: Matrix Market to Compressed Row Storage
//!
//! Reads sparse matrices stored in the Matrix Market coordinate exchange
//! format and converts them into Compressed Row Storage (CRS/CSR) arrays for
//! numerical work.
//!
//! ## Overview
//!
//! A Matrix Market coordinate file looks like this:
//!
//! ```text
//! %%MatrixMarket matrix coordinate real general
//! % optional comments
//! 3 3 4
//! 1 1 1.0
//! 3 1 4.0
//! 1 3 2.0
//! 2 2 3.0
//! ```
//!
//! Reading happens in three steps over one stream:
//!
//! 1. **Header**: the `%%MatrixMarket` line is validated and split into object,
//!    format and qualifiers.
//! 2. **Comments**: comment and blank lines are skipped.
//! 3. **Conversion**: the entries are laid out row by row in two passes over
//!    the stream (count, then rewind and place), so no intermediate triplet
//!    list is built.
//!
//! ## Usage
//!
//! ```
//! use std::io::Cursor;
//! use mmcrs::{read_matrix_market, ReaderConfig};
//!
//! let text = "%%MatrixMarket matrix coordinate real general\n2 2 2\n1 1 5.0\n2 2 3.0\n";
//! let (header, matrix) = read_matrix_market(Cursor::new(text), &ReaderConfig::default())?;
//!
//! assert_eq!(header.format, "coordinate");
//! assert_eq!(matrix.row_offsets, vec![0, 1, 2]);
//! assert_eq!(matrix.column_indexes, vec![0, 1]);
//! assert_eq!(matrix.values, vec![5.0, 3.0]);
//! # Ok::<(), mmcrs::MmError>(())
//! ```
//!
//! The steps are also available one at a time through [`LineReader`],
//! [`read_header`], [`skip_comments`] and [`read_coordinate_general`], for
//! callers that want to branch on the header before converting.

pub mod constants;
pub mod error;
pub mod io;
pub mod matrix;
pub mod utils;

// Re-export primary components
pub use error::{MmError, Result};
pub use io::{
    read_coordinate_general, read_header, read_matrix_market, skip_comments, LineReader,
    MatrixMarketHeader, MatrixMarketIO, ReaderConfig,
};
pub use matrix::CrsMatrix;
pub use utils::{from_sprs_csr, to_dense, to_sprs_csr};

/// Version information for the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
