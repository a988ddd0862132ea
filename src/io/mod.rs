//! Matrix Market reading
//!
//! Three readers run in sequence over one [`LineReader`]:
//!
//! 1. [`read_header`] consumes the `%%MatrixMarket` line.
//! 2. [`skip_comments`] moves past comment and blank lines.
//! 3. [`read_coordinate_general`] converts the coordinate body to CRS.
//!
//! [`read_matrix_market`] and [`MatrixMarketIO`] run the whole pipeline.

pub mod comments;
pub mod config;
pub mod coordinate;
pub mod header;
pub mod line_reader;

use std::fs::File;
use std::io::{BufRead, BufReader, Seek};
use std::path::Path;

use log::{debug, warn};

use crate::error::{MmError, Result};
use crate::matrix::CrsMatrix;

pub use comments::{is_comment_or_blank, skip_comments};
pub use config::ReaderConfig;
pub use coordinate::{read_coordinate_general, ConversionStage, SizeLine, Triplet};
pub use header::{parse_header_line, read_header, MatrixField, MatrixMarketHeader, MatrixSymmetry};
pub use line_reader::{LineReader, StreamMark};

/// Read a complete Matrix Market coordinate file from a seekable stream.
///
/// The stream must be positioned at the start of the file. Headers other
/// than a general coordinate matrix of real, double or integer values are
/// rejected with `UnsupportedFormat` before the body is read.
pub fn read_matrix_market<R: BufRead + Seek>(
    inner: R,
    config: &ReaderConfig,
) -> Result<(MatrixMarketHeader, CrsMatrix<f64>)> {
    let mut reader = LineReader::with_config(inner, config)?;

    let header = read_header(&mut reader)?;
    if !header.is_coordinate_general_real() {
        warn!("refusing to convert {}", header);
        return Err(MmError::UnsupportedFormat {
            object: header.object,
            format: header.format,
            qualifiers: header.qualifiers,
        });
    }

    skip_comments(&mut reader)?;
    let matrix = read_coordinate_general(&mut reader)?;

    Ok((header, matrix))
}

/// Matrix Market file reader
pub struct MatrixMarketIO;

impl MatrixMarketIO {
    /// Read a matrix in Matrix Market coordinate format from a file
    pub fn read_matrix<P: AsRef<Path>>(path: P) -> Result<CrsMatrix<f64>> {
        Self::read_matrix_with_config(path, &ReaderConfig::default())
    }

    /// Read a matrix file using custom reader limits
    pub fn read_matrix_with_config<P: AsRef<Path>>(
        path: P,
        config: &ReaderConfig,
    ) -> Result<CrsMatrix<f64>> {
        let path = path.as_ref();
        debug!("reading {}", path.display());

        let file = File::open(path)?;
        let (_, matrix) = read_matrix_market(BufReader::new(file), config)?;
        Ok(matrix)
    }

    /// Read only the header line of a file
    pub fn read_header<P: AsRef<Path>>(path: P) -> Result<MatrixMarketHeader> {
        let file = File::open(path)?;
        let mut reader = LineReader::new(BufReader::new(file))?;
        read_header(&mut reader)
    }
}
