//! Row and column non-zero counting
//!
//! Degree counting reads the CSR layout directly, so these functions reject
//! any other representation with [`Error::UnsupportedOperation`].

use crate::error::{Error, Result};
use crate::matrix::{Direction, Matrix};

/// Number of stored entries in every row
///
/// Row counts are differences of consecutive offsets.
pub fn count_row_nonzeros<M>(matrix: &M) -> Result<Vec<usize>>
where
    M: Matrix + ?Sized,
{
    count_nonzeros(matrix, Direction::Row, "count_row_nonzeros")
}

/// Number of stored entries in every column
///
/// Requires a full scan over the column indices.
pub fn count_column_nonzeros<M>(matrix: &M) -> Result<Vec<usize>>
where
    M: Matrix + ?Sized,
{
    count_nonzeros(matrix, Direction::Column, "count_column_nonzeros")
}

fn count_nonzeros<M>(matrix: &M, direction: Direction, op: &'static str) -> Result<Vec<usize>>
where
    M: Matrix + ?Sized,
{
    match matrix.as_csr() {
        Some(csr) => csr.nonzero_counts(direction),
        None => Err(Error::UnsupportedOperation {
            op,
            format: matrix.format().name(),
        }),
    }
}
