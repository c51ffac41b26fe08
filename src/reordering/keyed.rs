//! Reordering by numeric keys and by non-zero density

use log::debug;

use crate::error::{check_len, Result};
use crate::matrix::Matrix;
use crate::progress::Progress;
use crate::stats::{count_column_nonzeros, count_row_nonzeros};
use crate::utils::{permutation_from_keys, SortKey};

use super::apply_permutations;

/// Sorts rows and/or columns by their number of non-zeros
///
/// Degrees come from [`crate::stats`], so only CSR matrices are supported.
/// Rows or columns with equal degree keep their relative order.
pub fn density<M>(
    matrix: &mut M,
    rows: bool,
    columns: bool,
    descending: bool,
    progress: Progress<'_>,
) -> Result<()>
where
    M: Matrix + ?Sized,
{
    debug!(
        "density reorder: {}x{}, rows={}, columns={}, descending={}",
        matrix.nrows(),
        matrix.ncols(),
        rows,
        columns,
        descending
    );

    let row_degrees = if rows {
        Some(count_row_nonzeros(matrix)?)
    } else {
        None
    };
    let col_degrees = if columns {
        Some(count_column_nonzeros(matrix)?)
    } else {
        None
    };

    keys(
        matrix,
        row_degrees.as_deref(),
        col_degrees.as_deref(),
        !descending,
        progress,
    )
}

/// Sorts rows and/or columns by caller-supplied keys
///
/// Row `i` is ranked by `row_keys[i]` and column `j` by `col_keys[j]`; a
/// missing key array leaves that axis alone. Equal keys keep their relative
/// order.
pub fn keys<M, K>(
    matrix: &mut M,
    row_keys: Option<&[K]>,
    col_keys: Option<&[K]>,
    ascending: bool,
    progress: Progress<'_>,
) -> Result<()>
where
    M: Matrix + ?Sized,
    K: SortKey,
{
    if let Some(row_keys) = row_keys {
        check_len("row keys", row_keys.len(), matrix.nrows())?;
    }
    if let Some(col_keys) = col_keys {
        check_len("column keys", col_keys.len(), matrix.ncols())?;
    }

    let row_perm = row_keys
        .map(|keys| permutation_from_keys(keys, ascending))
        .transpose()?;
    let col_perm = col_keys
        .map(|keys| permutation_from_keys(keys, ascending))
        .transpose()?;

    apply_permutations(matrix, row_perm.as_deref(), col_perm.as_deref(), progress)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::matrix::{CsrMatrix, DenseMatrix};

    fn density_fixture() -> CsrMatrix<i32> {
        // [0 1 0 0]
        // [2 0 0 3]
        // [0 0 0 0]
        // [4 5 0 0]
        // [0 0 6 0]
        CsrMatrix::new(
            5,
            4,
            vec![0, 1, 3, 3, 5, 6],
            vec![1, 0, 3, 0, 1, 2],
            vec![1, 2, 3, 4, 5, 6],
        )
    }

    #[test]
    fn test_density_rows_ascending() {
        let mut matrix = density_fixture();
        density(&mut matrix, true, false, false, Progress::none()).unwrap();
        assert_eq!(matrix.offsets(), &[0, 0, 1, 2, 4, 6]);
        assert_eq!(matrix.columns(), &[1, 2, 0, 3, 0, 1]);
        assert_eq!(matrix.values(), &[1, 6, 2, 3, 4, 5]);
    }

    #[test]
    fn test_density_rows_descending() {
        let mut matrix = density_fixture();
        density(&mut matrix, true, false, true, Progress::none()).unwrap();
        // degrees [1, 2, 0, 2, 1] -> rows 1, 3, 0, 4, 2
        assert_eq!(matrix.offsets(), &[0, 2, 4, 5, 6, 6]);
        assert_eq!(matrix.values(), &[2, 3, 4, 5, 1, 6]);
    }

    #[test]
    fn test_density_both_axes() {
        let mut matrix = density_fixture();
        density(&mut matrix, true, true, false, Progress::none()).unwrap();
        // column degrees [2, 2, 1, 1] -> columns 2, 3, 0, 1
        assert_eq!(matrix.columns(), &[3, 0, 2, 1, 2, 3]);
        assert_eq!(matrix.values(), &[1, 6, 2, 3, 4, 5]);
    }

    #[test]
    fn test_density_rejects_dense() {
        let mut matrix = DenseMatrix::<f32>::new(2, 2).unwrap();
        let err = density(&mut matrix, true, false, false, Progress::none()).unwrap_err();
        assert!(matches!(err, Error::UnsupportedOperation { .. }));
    }

    #[test]
    fn test_float_keys() {
        // [1 2]
        // [3 4]
        let mut matrix = DenseMatrix::from_vec(2, 2, vec![1, 2, 3, 4]).unwrap();
        let col_keys = [0.5, -0.25];
        keys(&mut matrix, None, Some(&col_keys[..]), true, Progress::none()).unwrap();
        assert_eq!(matrix.values(), &[2, 1, 4, 3]);
    }

    #[test]
    fn test_key_length_mismatch() {
        let mut matrix = DenseMatrix::from_vec(2, 2, vec![1, 2, 3, 4]).unwrap();
        let row_keys = [1u32, 2, 3];
        assert!(keys(&mut matrix, Some(&row_keys[..]), None, true, Progress::none()).is_err());
        assert_eq!(matrix.values(), &[1, 2, 3, 4]);
    }
}
