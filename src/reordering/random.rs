//! Random reordering

use log::debug;
use rand::Rng;

use crate::error::{Error, Result};
use crate::matrix::Matrix;
use crate::progress::Progress;
use crate::utils::permutation;

use super::apply_permutations;

/// Randomly permutes the rows, the columns, or both
///
/// # Arguments
///
/// * `matrix` - Matrix to reorder in place
/// * `rows` - Whether to permute the rows
/// * `columns` - Whether to permute the columns
/// * `symmetric` - Apply one permutation to both axes; requires `rows`,
///   `columns` and a square matrix
/// * `rng` - Source of randomness
/// * `progress` - Progress handle
///
/// Requesting neither axis leaves the matrix untouched.
pub fn random<M, R>(
    matrix: &mut M,
    rows: bool,
    columns: bool,
    symmetric: bool,
    rng: &mut R,
    mut progress: Progress<'_>,
) -> Result<()>
where
    M: Matrix + ?Sized,
    R: Rng + ?Sized,
{
    let (nrows, ncols) = (matrix.nrows(), matrix.ncols());
    debug!(
        "random reorder: {}x{}, rows={}, columns={}, symmetric={}",
        nrows, ncols, rows, columns, symmetric
    );

    if symmetric {
        if !(rows && columns) {
            return Err(Error::precondition(
                "symmetric reordering permutes both rows and columns",
            ));
        }
        if !matrix.is_square() {
            return Err(Error::precondition(format!(
                "cannot symmetrically reorder a {}x{} matrix",
                nrows, ncols
            )));
        }
    }
    if !rows && !columns {
        progress.finish();
        return Ok(());
    }

    let row_perm = if rows {
        Some(permutation(rng, nrows)?)
    } else {
        None
    };
    let col_perm = if symmetric {
        row_perm.clone()
    } else if columns {
        Some(permutation(rng, ncols)?)
    } else {
        None
    };

    apply_permutations(matrix, row_perm.as_deref(), col_perm.as_deref(), progress)
}
