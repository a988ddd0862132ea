//! Compressed Row Storage (CRS) matrix

use std::fmt;
use std::ops::Range;

use num_traits::Num;

use crate::error::{MmError, Result};

/// A sparse matrix in Compressed Row Storage (CRS, also called CSR) format
///
/// The matrix is stored in three arrays:
/// - `row_offsets`: `num_rows + 1` entries. Row `i` occupies the half-open
///   range `row_offsets[i]..row_offsets[i + 1]` of the two arrays below.
/// - `column_indexes`: 0-based column of each stored entry
/// - `values`: value of each stored entry, parallel to `column_indexes`
///
/// Entries inside a row keep the order in which they were supplied; columns
/// are not sorted and repeated `(row, column)` pairs are kept as separate
/// entries.
#[derive(Clone, PartialEq)]
pub struct CrsMatrix<T> {
    /// Number of rows in the matrix
    pub num_rows: usize,

    /// Number of columns in the matrix
    pub num_columns: usize,

    /// Row boundaries (size: num_rows + 1), starts at 0, ends at nnz
    pub row_offsets: Vec<usize>,

    /// Column indices (size: nnz)
    pub column_indexes: Vec<usize>,

    /// Stored values (size: nnz)
    pub values: Vec<T>,
}

impl<T> CrsMatrix<T> {
    /// Creates a CRS matrix after checking the storage invariants
    ///
    /// Fails with `InvalidStructure` if:
    /// - `row_offsets.len()` is not `num_rows + 1`
    /// - `row_offsets` does not start at 0 or decreases anywhere
    /// - `row_offsets[num_rows]` differs from `column_indexes.len()`
    /// - `column_indexes.len()` differs from `values.len()`
    /// - a column index is not below `num_columns`
    /// - there are more entries than `num_rows * num_columns`
    pub fn try_new(
        num_rows: usize,
        num_columns: usize,
        row_offsets: Vec<usize>,
        column_indexes: Vec<usize>,
        values: Vec<T>,
    ) -> Result<Self> {
        let invalid = |msg: String| Err(MmError::InvalidStructure(msg));

        let expected_offsets = match num_rows.checked_add(1) {
            Some(n) => n,
            None => return invalid(format!("{} rows cannot be addressed", num_rows)),
        };
        if row_offsets.len() != expected_offsets {
            return invalid(format!(
                "row_offsets has {} entries, expected {}",
                row_offsets.len(),
                expected_offsets
            ));
        }
        if row_offsets[0] != 0 {
            return invalid("row_offsets must start at 0".to_string());
        }
        if let Some(i) = row_offsets.windows(2).position(|w| w[0] > w[1]) {
            return invalid(format!("row_offsets decreases after row {}", i));
        }
        if column_indexes.len() != values.len() {
            return invalid(format!(
                "{} column indexes but {} values",
                column_indexes.len(),
                values.len()
            ));
        }
        if row_offsets[num_rows] != column_indexes.len() {
            return invalid(format!(
                "row_offsets ends at {} but {} entries are stored",
                row_offsets[num_rows],
                column_indexes.len()
            ));
        }
        if let Some(&col) = column_indexes.iter().find(|&&col| col >= num_columns) {
            return invalid(format!(
                "column index {} out of bounds (num_columns = {})",
                col, num_columns
            ));
        }
        let cells = num_rows.checked_mul(num_columns).unwrap_or(usize::MAX);
        if column_indexes.len() > cells {
            return invalid(format!(
                "{} entries exceed {} cells",
                column_indexes.len(),
                cells
            ));
        }

        Ok(Self {
            num_rows,
            num_columns,
            row_offsets,
            column_indexes,
            values,
        })
    }

    /// Returns the number of stored entries
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Range of row `i` inside `column_indexes` and `values`
    ///
    /// # Panics
    ///
    /// Panics if `i >= num_rows`.
    pub fn row_range(&self, i: usize) -> Range<usize> {
        assert!(i < self.num_rows, "Row index out of bounds");
        self.row_offsets[i]..self.row_offsets[i + 1]
    }

    /// Returns an iterator over the stored entries of row i
    ///
    /// Each item is a tuple (column, value), in storage order
    pub fn row_iter(&self, i: usize) -> impl Iterator<Item = (usize, &T)> {
        let range = self.row_range(i);

        self.column_indexes[range.clone()]
            .iter()
            .zip(&self.values[range])
            .map(|(&col, val)| (col, val))
    }

    /// Returns the first stored value at `(row, column)`, if any
    pub fn get(&self, row: usize, column: usize) -> Option<&T> {
        if row >= self.num_rows {
            return None;
        }
        self.row_iter(row)
            .find(|&(col, _)| col == column)
            .map(|(_, val)| val)
    }

    /// Consumes the matrix, returning `(row_offsets, column_indexes, values)`
    pub fn into_raw_parts(self) -> (Vec<usize>, Vec<usize>, Vec<T>) {
        (self.row_offsets, self.column_indexes, self.values)
    }
}

impl<T> CrsMatrix<T>
where
    T: Copy + Num,
{
    /// Creates an empty matrix with the given dimensions
    pub fn zeros(num_rows: usize, num_columns: usize) -> Self {
        Self {
            num_rows,
            num_columns,
            row_offsets: vec![0; num_rows + 1],
            column_indexes: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Creates an identity matrix of the given size
    pub fn identity(n: usize) -> Self {
        Self {
            num_rows: n,
            num_columns: n,
            row_offsets: (0..=n).collect(),
            column_indexes: (0..n).collect(),
            values: vec![T::one(); n],
        }
    }
}

/// Rows shown by the `Debug` summary
const DEBUG_ROWS: usize = 5;
/// Entries shown per row by the `Debug` summary
const DEBUG_ENTRIES: usize = 5;

/// Summary view: shape, then the leading rows with their slot ranges and
/// entries in stored order (file order for matrices read from disk).
impl<T: fmt::Debug> fmt::Debug for CrsMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "CrsMatrix {} x {}, {} stored entries",
            self.num_rows,
            self.num_columns,
            self.nnz()
        )?;

        for i in 0..self.num_rows.min(DEBUG_ROWS) {
            let range = self.row_range(i);
            write!(f, "  row {} [{}..{}):", i, range.start, range.end)?;
            for (column, value) in self.row_iter(i).take(DEBUG_ENTRIES) {
                write!(f, " {}={:?}", column, value)?;
            }
            if range.len() > DEBUG_ENTRIES {
                write!(f, " +{}", range.len() - DEBUG_ENTRIES)?;
            }
            writeln!(f)?;
        }
        if self.num_rows > DEBUG_ROWS {
            writeln!(f, "  +{} rows", self.num_rows - DEBUG_ROWS)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CrsMatrix<i32> {
        CrsMatrix::try_new(
            3, 3,
            vec![0, 2, 3, 5],
            vec![0, 1, 1, 0, 2],
            vec![1, 2, 3, 4, 5],
        )
        .unwrap()
    }

    #[test]
    fn test_new_matrix() {
        let matrix = sample();

        assert_eq!(matrix.num_rows, 3);
        assert_eq!(matrix.num_columns, 3);
        assert_eq!(matrix.nnz(), 5);
    }

    #[test]
    fn test_row_iter() {
        let matrix = sample();

        let row0: Vec<_> = matrix.row_iter(0).collect();
        assert_eq!(row0, vec![(0, &1), (1, &2)]);

        let row1: Vec<_> = matrix.row_iter(1).collect();
        assert_eq!(row1, vec![(1, &3)]);

        let row2: Vec<_> = matrix.row_iter(2).collect();
        assert_eq!(row2, vec![(0, &4), (2, &5)]);
    }

    #[test]
    fn test_get() {
        let matrix = sample();
        assert_eq!(matrix.get(2, 2), Some(&5));
        assert_eq!(matrix.get(1, 0), None);
        assert_eq!(matrix.get(7, 0), None);
    }

    #[test]
    fn test_identity() {
        let identity = CrsMatrix::<i32>::identity(3);

        assert_eq!(identity.num_rows, 3);
        assert_eq!(identity.num_columns, 3);
        assert_eq!(identity.nnz(), 3);

        assert_eq!(identity.row_offsets, vec![0, 1, 2, 3]);
        assert_eq!(identity.column_indexes, vec![0, 1, 2]);
        assert_eq!(identity.values, vec![1, 1, 1]);
    }

    #[test]
    fn test_zeros_has_empty_rows() {
        let zeros = CrsMatrix::<f64>::zeros(2, 4);
        assert_eq!(zeros.row_offsets, vec![0, 0, 0]);
        assert_eq!(zeros.row_iter(1).count(), 0);
    }

    #[test]
    fn test_invalid_row_offsets() {
        let result = CrsMatrix::try_new(
            3, 3,
            vec![0, 2, 3], // Missing last element
            vec![0, 1, 1, 0, 2],
            vec![1, 2, 3, 4, 5],
        );
        assert!(matches!(result, Err(MmError::InvalidStructure(_))));

        let result = CrsMatrix::try_new(2, 2, vec![0, 2, 1], vec![0, 1], vec![1, 2]);
        assert!(matches!(result, Err(MmError::InvalidStructure(_))));
    }

    #[test]
    fn test_inconsistent_lengths() {
        let result = CrsMatrix::try_new(
            3, 3,
            vec![0, 2, 3, 5],
            vec![0, 1, 1, 0, 2],
            vec![1, 2, 3, 4], // Missing last element
        );
        assert!(matches!(result, Err(MmError::InvalidStructure(_))));
    }

    #[test]
    fn test_column_out_of_bounds() {
        let result = CrsMatrix::try_new(1, 2, vec![0, 1], vec![2], vec![1.0]);
        assert!(matches!(result, Err(MmError::InvalidStructure(_))));
    }

    #[test]
    fn test_debug_summary() {
        let text = format!("{:?}", sample());
        assert!(text.starts_with("CrsMatrix 3 x 3, 5 stored entries"));
        assert!(text.contains("row 0 [0..2): 0=1 1=2\n"));
        assert!(text.contains("row 1 [2..3): 1=3\n"));
        assert!(!text.contains("rows"));
    }

    #[test]
    fn test_debug_summary_truncates() {
        let text = format!("{:?}", CrsMatrix::<f64>::identity(8));
        assert!(text.contains("row 4 [4..5): 4=1.0"));
        assert!(!text.contains("row 5"));
        assert!(text.contains("+3 rows"));
    }

    #[test]
    fn test_unaddressable_row_count() {
        let result = CrsMatrix::<f64>::try_new(usize::MAX, 1, vec![0], vec![], vec![]);
        assert!(matches!(result, Err(MmError::InvalidStructure(_))));
    }
}
