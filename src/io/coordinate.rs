//! Coordinate body to CRS conversion
//!
//! The body of a coordinate file is a size line followed by one
//! `row column value` line per stored entry, 1-based and in any order:
//!
//! ```text
//! 3 3 4
//! 3 1 4.0
//! 1 1 1.0
//! 1 3 2.0
//! 2 2 3.0
//! ```
//!
//! The conversion is a counting sort keyed by row, done in two passes over the
//! stream so the entries never have to be held in an intermediate list:
//!
//! 1. The counting pass reads every entry and counts entries per row.
//! 2. The counts are prefix-summed into row boundaries.
//! 3. The stream is rewound to the first entry line.
//! 4. The placement pass reads the entries again and writes each one into the
//!    next free slot of its row.
//!
//! Rows come out in ascending order. Inside a row entries keep file order;
//! columns are not sorted and duplicates are not merged.

use std::fmt;
use std::io::{BufRead, Seek};

use log::{debug, trace};

use crate::constants::SIZE_LINE_FIELDS;
use crate::error::{MmError, Result};
use crate::io::LineReader;
use crate::matrix::CrsMatrix;
use crate::utils::inclusive_scan_in_place;

/// Dimensions declared on the size line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeLine {
    pub num_rows: usize,
    pub num_columns: usize,
    pub num_nonzeros: usize,
}

impl SizeLine {
    /// Parse `rows columns nonzeros`. Tokens past the third are ignored.
    pub fn parse(line: &str) -> Result<Self> {
        let mut fields = [0usize; SIZE_LINE_FIELDS];
        let mut tokens = line.split_whitespace();
        for field in fields.iter_mut() {
            *field = tokens
                .next()
                .and_then(|t| t.parse().ok())
                .ok_or(MmError::MalformedSizeLine)?;
        }
        let [num_rows, num_columns, num_nonzeros] = fields;

        Ok(Self {
            num_rows,
            num_columns,
            num_nonzeros,
        })
    }

    /// Reject more nonzeros than the matrix has cells
    pub fn validate(&self) -> Result<()> {
        let inconsistent = match self.num_rows.checked_mul(self.num_columns) {
            Some(cells) => self.num_nonzeros > cells,
            None => false,
        };
        if inconsistent {
            return Err(MmError::InconsistentDimensions {
                num_rows: self.num_rows,
                num_columns: self.num_columns,
                num_nonzeros: self.num_nonzeros,
            });
        }
        Ok(())
    }
}

/// One entry line, converted to 0-based indices
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triplet {
    pub row: usize,
    pub column: usize,
    pub value: f64,
}

impl Triplet {
    /// Parse a `row column value` line and check it lies inside `size`.
    ///
    /// `line_number` is only used for error reporting.
    pub fn parse(line: &str, line_number: usize, size: &SizeLine) -> Result<Self> {
        let malformed = || MmError::MalformedTripletLine { line: line_number };

        let mut tokens = line.split_whitespace();
        let row: usize = tokens.next().and_then(|t| t.parse().ok()).ok_or_else(malformed)?;
        let column: usize = tokens.next().and_then(|t| t.parse().ok()).ok_or_else(malformed)?;
        let value: f64 = tokens.next().and_then(|t| t.parse().ok()).ok_or_else(malformed)?;
        if tokens.next().is_some() {
            return Err(malformed());
        }

        if !(1..=size.num_rows).contains(&row) || !(1..=size.num_columns).contains(&column) {
            return Err(MmError::IndexOutOfRange {
                line: line_number,
                row,
                column,
            });
        }

        Ok(Self {
            row: row - 1,
            column: column - 1,
            value,
        })
    }
}

/// Progress of a conversion, logged at trace level.
///
/// Any stage may fail; the error is returned at once and every buffer
/// allocated so far is dropped on the way out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionStage {
    Init,
    SizeParsed,
    CountingPass,
    PrefixSummed,
    Rewound,
    PlacementPass,
    Done,
}

impl fmt::Display for ConversionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConversionStage::Init => "init",
            ConversionStage::SizeParsed => "size parsed",
            ConversionStage::CountingPass => "counting pass",
            ConversionStage::PrefixSummed => "prefix summed",
            ConversionStage::Rewound => "rewound",
            ConversionStage::PlacementPass => "placement pass",
            ConversionStage::Done => "done",
        };
        f.write_str(name)
    }
}

fn enter(stage: ConversionStage) {
    trace!("coordinate conversion: {}", stage);
}

/// Reserve room for `len` elements without touching it, reporting failure
/// instead of aborting
fn try_reserved<T>(len: usize) -> Result<Vec<T>> {
    let mut buffer = Vec::new();
    buffer.try_reserve_exact(len)?;
    Ok(buffer)
}

/// Allocate `len` copies of `fill`, reporting failure instead of aborting
fn try_filled<T: Clone>(len: usize, fill: T) -> Result<Vec<T>> {
    let mut buffer = try_reserved(len)?;
    buffer.resize(len, fill);
    Ok(buffer)
}

/// Read the next entry line, skipping blank lines. `None` at end of stream.
fn next_triplet<R: BufRead>(reader: &mut LineReader<R>, size: &SizeLine) -> Result<Option<Triplet>> {
    loop {
        let line_number = reader.line_number() + 1;
        let line = match reader.next_line()? {
            Some(line) => line,
            None => return Ok(None),
        };
        if !line.trim().is_empty() {
            return Triplet::parse(line, line_number, size).map(Some);
        }
    }
}

/// Convert a coordinate body to CRS.
///
/// The reader must be positioned at the size line (as left by
/// [`skip_comments`](crate::io::skip_comments)). On success the stream is at
/// its end.
pub fn read_coordinate_general<R: BufRead + Seek>(
    reader: &mut LineReader<R>,
) -> Result<CrsMatrix<f64>> {
    enter(ConversionStage::Init);

    let size = SizeLine::parse(reader.require_line()?)?;
    size.validate()?;
    enter(ConversionStage::SizeParsed);
    debug!(
        "coordinate body: {} x {} with {} nonzeros",
        size.num_rows, size.num_columns, size.num_nonzeros
    );

    // One table, two roles. During the counting pass slot `r + 1` holds the
    // number of entries in row `r` and slot 0 stays zero. The in-place prefix
    // sum then turns it into the row boundary table.
    let mut row_offsets = try_filled(size.num_rows.saturating_add(1), 0usize)?;
    // Entry arrays are only reserved here. They are filled once the counting
    // pass has seen every declared entry, so a size line that overstates the
    // body never writes the full arrays.
    let mut column_indexes = try_reserved::<usize>(size.num_nonzeros)?;
    let mut values = try_reserved::<f64>(size.num_nonzeros)?;

    let body_start = reader.mark()?;

    enter(ConversionStage::CountingPass);
    let mut found = 0usize;
    while let Some(triplet) = next_triplet(reader, &size)? {
        row_offsets[triplet.row + 1] += 1;
        found += 1;
    }
    if found != size.num_nonzeros {
        return Err(MmError::NonzeroCountMismatch {
            declared: size.num_nonzeros,
            found,
        });
    }

    column_indexes.resize(size.num_nonzeros, 0);
    values.resize(size.num_nonzeros, 0.0);

    inclusive_scan_in_place(&mut row_offsets);
    enter(ConversionStage::PrefixSummed);

    reader.rewind(body_start)?;
    enter(ConversionStage::Rewound);

    enter(ConversionStage::PlacementPass);
    let mut placed = try_filled(size.num_rows, 0usize)?;
    let mut total_placed = 0usize;
    while let Some(triplet) = next_triplet(reader, &size)? {
        let slot = row_offsets[triplet.row] + placed[triplet.row];
        // Only reachable if the stream changed between the two passes
        if slot >= row_offsets[triplet.row + 1] {
            return Err(MmError::NonzeroCountMismatch {
                declared: size.num_nonzeros,
                found: total_placed + 1,
            });
        }
        column_indexes[slot] = triplet.column;
        values[slot] = triplet.value;
        placed[triplet.row] += 1;
        total_placed += 1;
    }
    if total_placed != size.num_nonzeros {
        return Err(MmError::NonzeroCountMismatch {
            declared: size.num_nonzeros,
            found: total_placed,
        });
    }

    enter(ConversionStage::Done);
    Ok(CrsMatrix {
        num_rows: size.num_rows,
        num_columns: size.num_columns,
        row_offsets,
        column_indexes,
        values,
    })
}
