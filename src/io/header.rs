//! Matrix Market header line
//!
//! The first line of every Matrix Market file has the shape
//!
//! ```text
//! %%MatrixMarket <object> <format> [<qualifier> ...]
//! ```
//!
//! [`read_header`] consumes exactly that one line and produces a
//! [`MatrixMarketHeader`]. Validation is fail-fast: the first missing token
//! decides the error and no partially filled header is ever returned.

use std::fmt;
use std::io::BufRead;
use std::str::FromStr;

use log::debug;

use crate::constants::{
    FORMAT_ARRAY, FORMAT_COORDINATE, HEADER_IDENTIFIER, HEADER_TOKEN_SEPARATOR, OBJECT_MATRIX,
};
use crate::error::{MmError, Result};
use crate::io::LineReader;

/// Parsed header line, all fields lowercased
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixMarketHeader {
    /// Object kind, e.g. `matrix`
    pub object: String,
    /// Storage layout, e.g. `coordinate`
    pub format: String,
    /// Remaining tokens joined by single spaces, e.g. `real general`. May be empty.
    pub qualifiers: String,
}

/// Data type qualifier of a matrix file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixField {
    Real,
    Double,
    Integer,
    Complex,
    Pattern,
}

impl FromStr for MatrixField {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "real" => Ok(MatrixField::Real),
            "double" => Ok(MatrixField::Double),
            "integer" => Ok(MatrixField::Integer),
            "complex" => Ok(MatrixField::Complex),
            "pattern" => Ok(MatrixField::Pattern),
            _ => Err(()),
        }
    }
}

impl MatrixField {
    /// True if every entry line carries a single value parseable as `f64`
    pub fn is_real_valued(&self) -> bool {
        matches!(
            self,
            MatrixField::Real | MatrixField::Double | MatrixField::Integer
        )
    }
}

/// Symmetry qualifier of a matrix file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixSymmetry {
    General,
    Symmetric,
    SkewSymmetric,
    Hermitian,
}

impl FromStr for MatrixSymmetry {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "general" => Ok(MatrixSymmetry::General),
            "symmetric" => Ok(MatrixSymmetry::Symmetric),
            "skew-symmetric" => Ok(MatrixSymmetry::SkewSymmetric),
            "hermitian" => Ok(MatrixSymmetry::Hermitian),
            _ => Err(()),
        }
    }
}

impl MatrixMarketHeader {
    /// Individual qualifier tokens
    pub fn qualifier_tokens(&self) -> impl Iterator<Item = &str> {
        self.qualifiers.split(HEADER_TOKEN_SEPARATOR).filter(|t| !t.is_empty())
    }

    /// The data type qualifier, if one is present
    pub fn field(&self) -> Option<MatrixField> {
        self.qualifier_tokens().find_map(|t| t.parse().ok())
    }

    /// The symmetry qualifier, if one is present
    pub fn symmetry(&self) -> Option<MatrixSymmetry> {
        self.qualifier_tokens().find_map(|t| t.parse().ok())
    }

    pub fn is_matrix(&self) -> bool {
        self.object == OBJECT_MATRIX
    }

    pub fn is_coordinate(&self) -> bool {
        self.format == FORMAT_COORDINATE
    }

    pub fn is_array(&self) -> bool {
        self.format == FORMAT_ARRAY
    }

    /// True if the coordinate-to-CRS converter can read the body of this file:
    /// a general coordinate matrix of real, double or integer values.
    pub fn is_coordinate_general_real(&self) -> bool {
        self.is_matrix()
            && self.is_coordinate()
            && self.field().map_or(true, |f| f.is_real_valued())
            && self
                .symmetry()
                .map_or(true, |s| s == MatrixSymmetry::General)
    }
}

impl fmt::Display for MatrixMarketHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", HEADER_IDENTIFIER, self.object, self.format)?;
        if !self.qualifiers.is_empty() {
            write!(f, " {}", self.qualifiers)?;
        }
        Ok(())
    }
}

/// Read the header line from a stream positioned at the start of a file.
///
/// Consumes exactly one line. The stream is left just after it.
pub fn read_header<R: BufRead>(reader: &mut LineReader<R>) -> Result<MatrixMarketHeader> {
    let line = reader.require_line()?;
    let header = parse_header_line(line)?;
    debug!("read header: {}", header);
    Ok(header)
}

/// Parse a header line with its terminator already removed.
pub fn parse_header_line(line: &str) -> Result<MatrixMarketHeader> {
    if line.starts_with(HEADER_TOKEN_SEPARATOR) {
        return Err(MmError::MissingIdentifier);
    }

    let mut tokens = line
        .split(HEADER_TOKEN_SEPARATOR)
        .filter(|token| !token.is_empty());

    match tokens.next() {
        Some(HEADER_IDENTIFIER) => {}
        _ => return Err(MmError::MissingIdentifier),
    }

    let object = tokens
        .next()
        .ok_or(MmError::MissingObjectType)?
        .to_lowercase();
    let format = tokens
        .next()
        .ok_or(MmError::MissingFormatType)?
        .to_lowercase();
    let qualifiers = tokens.collect::<Vec<_>>().join(" ").to_lowercase();

    Ok(MatrixMarketHeader {
        object,
        format,
        qualifiers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_header() {
        let header = parse_header_line("%%MatrixMarket matrix coordinate real general").unwrap();
        assert_eq!(header.object, "matrix");
        assert_eq!(header.format, "coordinate");
        assert_eq!(header.qualifiers, "real general");
        assert_eq!(header.field(), Some(MatrixField::Real));
        assert_eq!(header.symmetry(), Some(MatrixSymmetry::General));
        assert!(header.is_coordinate_general_real());
    }

    #[test]
    fn test_tokens_are_lowercased() {
        let header = parse_header_line("%%MatrixMarket MATRIX Coordinate Real General").unwrap();
        assert_eq!(header.object, "matrix");
        assert_eq!(header.format, "coordinate");
        assert_eq!(header.qualifiers, "real general");
    }

    #[test]
    fn test_repeated_separators_collapse() {
        let header = parse_header_line("%%MatrixMarket  matrix   coordinate  real   general ").unwrap();
        assert_eq!(header.object, "matrix");
        assert_eq!(header.format, "coordinate");
        assert_eq!(header.qualifiers, "real general");
    }

    #[test]
    fn test_missing_qualifiers_is_not_an_error() {
        let header = parse_header_line("%%MatrixMarket matrix coordinate").unwrap();
        assert_eq!(header.qualifiers, "");
        assert_eq!(header.field(), None);
        assert!(header.is_coordinate_general_real());
    }

    #[test]
    fn test_missing_identifier() {
        assert!(matches!(
            parse_header_line("matrix coordinate real general"),
            Err(MmError::MissingIdentifier)
        ));
        assert!(matches!(
            parse_header_line("%%matrixmarket matrix coordinate real general"),
            Err(MmError::MissingIdentifier)
        ));
        assert!(matches!(parse_header_line(""), Err(MmError::MissingIdentifier)));
    }

    #[test]
    fn test_leading_space_rejected() {
        assert!(matches!(
            parse_header_line(" %%MatrixMarket matrix coordinate real general"),
            Err(MmError::MissingIdentifier)
        ));
    }

    #[test]
    fn test_missing_object_and_format() {
        assert!(matches!(
            parse_header_line("%%MatrixMarket"),
            Err(MmError::MissingObjectType)
        ));
        assert!(matches!(
            parse_header_line("%%MatrixMarket matrix"),
            Err(MmError::MissingFormatType)
        ));
    }

    #[test]
    fn test_unsupported_layouts_recognised() {
        let symmetric = parse_header_line("%%MatrixMarket matrix coordinate real symmetric").unwrap();
        assert_eq!(symmetric.symmetry(), Some(MatrixSymmetry::Symmetric));
        assert!(!symmetric.is_coordinate_general_real());

        let pattern = parse_header_line("%%MatrixMarket matrix coordinate pattern general").unwrap();
        assert_eq!(pattern.field(), Some(MatrixField::Pattern));
        assert!(!pattern.is_coordinate_general_real());

        let dense = parse_header_line("%%MatrixMarket matrix array real general").unwrap();
        assert!(dense.is_array());
        assert!(!dense.is_coordinate_general_real());
    }

    #[test]
    fn test_display_round_trips_through_parser() {
        let header = parse_header_line("%%MatrixMarket matrix coordinate integer general").unwrap();
        assert_eq!(header.to_string(), "%%MatrixMarket matrix coordinate integer general");
        assert_eq!(parse_header_line(&header.to_string()).unwrap(), header);
    }
}
