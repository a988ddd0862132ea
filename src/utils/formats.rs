//! Utilities for handing CRS matrices to external libraries

use crate::matrix::CrsMatrix;
use ndarray::Array2;
use num_traits::Num;
use sprs::CsMat;

/// Converts a CRS matrix to sprs CsMat format
///
/// sprs requires sorted, unique columns within each row, so each row is
/// sorted by column on the way out. Repeated `(row, column)` entries are
/// summed.
pub fn to_sprs_csr<T>(matrix: &CrsMatrix<T>) -> CsMat<T>
where
    T: Copy + Num + Default,
{
    let mut indptr = Vec::with_capacity(matrix.num_rows + 1);
    let mut indices = Vec::with_capacity(matrix.nnz());
    let mut data = Vec::with_capacity(matrix.nnz());
    indptr.push(0);

    for i in 0..matrix.num_rows {
        let mut row: Vec<(usize, T)> = matrix.row_iter(i).map(|(col, &val)| (col, val)).collect();
        row.sort_by_key(|&(col, _)| col);

        for (col, val) in row {
            if indices.len() > indptr[i] && indices.last() == Some(&col) {
                if let Some(last) = data.last_mut() {
                    *last = *last + val;
                }
            } else {
                indices.push(col);
                data.push(val);
            }
        }
        indptr.push(indices.len());
    }

    CsMat::new((matrix.num_rows, matrix.num_columns), indptr, indices, data)
}

/// Converts sprs CsMat to CrsMatrix
pub fn from_sprs_csr<T>(matrix: CsMat<T>) -> CrsMatrix<T>
where
    T: Copy + Num + Default,
{
    // Ensure matrix is in CSR format
    let matrix = if matrix.is_csr() {
        matrix
    } else {
        matrix.to_csr()
    };

    let shape = matrix.shape();
    let (indptr, indices, data) = matrix.into_raw_storage();

    CrsMatrix {
        num_rows: shape.0,
        num_columns: shape.1,
        row_offsets: indptr,
        column_indexes: indices,
        values: data,
    }
}

/// Expands a CRS matrix into a dense array, summing repeated entries
pub fn to_dense<T>(matrix: &CrsMatrix<T>) -> Array2<T>
where
    T: Copy + Num,
{
    let mut dense = Array2::zeros((matrix.num_rows, matrix.num_columns));
    for i in 0..matrix.num_rows {
        for (j, &val) in matrix.row_iter(i) {
            dense[[i, j]] = dense[[i, j]] + val;
        }
    }
    dense
}
