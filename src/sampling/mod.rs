//! Sub-matrix selection built on top of [`Matrix::reduce`]
//!
//! Sampling picks a subset of rows and columns, either uniformly at random or
//! by thresholding their non-zero counts, and reduces the matrix to it.

use log::debug;
use rand::Rng;

use crate::constants::ORCHESTRATION_SAMPLE_SETUP_SHARE;
use crate::error::{Error, Result};
use crate::matrix::Matrix;
use crate::progress::Progress;
use crate::stats::{count_column_nonzeros, count_row_nonzeros};
use crate::utils::{identity_permutation, sample, try_with_capacity};

/// Keeps a uniformly random subset of `num_rows` rows and `num_cols` columns
///
/// With `symmetric` the same index set is used for both axes, which requires
/// a square matrix and equal counts. The kept rows and columns stay in their
/// original relative order.
pub fn random<M, R>(
    matrix: &mut M,
    num_rows: usize,
    num_cols: usize,
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
        "random sample: {}x{} -> {}x{}, symmetric={}",
        nrows, ncols, num_rows, num_cols, symmetric
    );

    if num_rows > nrows || num_cols > ncols {
        return Err(Error::precondition(format!(
            "cannot sample {}x{} from a {}x{} matrix",
            num_rows, num_cols, nrows, ncols
        )));
    }
    if symmetric {
        if num_rows != num_cols {
            return Err(Error::precondition(format!(
                "symmetric sampling needs equal counts, got {} rows and {} columns",
                num_rows, num_cols
            )));
        }
        if !matrix.is_square() {
            return Err(Error::precondition(format!(
                "cannot do symmetric sampling on a {}x{} matrix",
                nrows, ncols
            )));
        }
    }

    let rows = sorted_sample(rng, nrows, num_rows)?;
    let cols = if symmetric {
        rows.clone()
    } else {
        sorted_sample(rng, ncols, num_cols)?
    };
    progress.advance(ORCHESTRATION_SAMPLE_SETUP_SHARE);

    matrix.reduce(Some(&rows), Some(&cols), progress.split(1.0))?;
    progress.finish();
    Ok(())
}

/// Keeps only the rows with between `min` and `max` non-zeros, inclusive
///
/// Only CSR matrices are supported. An empty range keeps no rows.
pub fn threshold_rows<M>(matrix: &mut M, min: usize, max: usize, progress: Progress<'_>) -> Result<()>
where
    M: Matrix + ?Sized,
{
    debug!("row threshold: [{}, {}]", min, max);
    let rows = within(&count_row_nonzeros(matrix)?, min, max)?;
    reduce_selection(matrix, Some(&rows), None, progress)
}

/// Keeps only the columns with between `min` and `max` non-zeros, inclusive
///
/// Only CSR matrices are supported. An empty range keeps no columns.
pub fn threshold_columns<M>(
    matrix: &mut M,
    min: usize,
    max: usize,
    progress: Progress<'_>,
) -> Result<()>
where
    M: Matrix + ?Sized,
{
    debug!("column threshold: [{}, {}]", min, max);
    let cols = within(&count_column_nonzeros(matrix)?, min, max)?;
    reduce_selection(matrix, None, Some(&cols), progress)
}

fn sorted_sample<R: Rng + ?Sized>(rng: &mut R, len: usize, sample_len: usize) -> Result<Vec<usize>> {
    let mut set = identity_permutation(len)?;
    sample(rng, &mut set, sample_len)?;
    set.truncate(sample_len);
    set.sort_unstable();
    Ok(set)
}

/// Ascending indices whose degree lies in `[min, max]`
fn within(degrees: &[usize], min: usize, max: usize) -> Result<Vec<usize>> {
    let mut selected = try_with_capacity(degrees.len())?;
    selected.extend(
        degrees
            .iter()
            .enumerate()
            .filter(|&(_, &degree)| (min..=max).contains(&degree))
            .map(|(idx, _)| idx),
    );
    Ok(selected)
}

fn reduce_selection<M>(
    matrix: &mut M,
    rows: Option<&[usize]>,
    cols: Option<&[usize]>,
    mut progress: Progress<'_>,
) -> Result<()>
where
    M: Matrix + ?Sized,
{
    progress.advance(ORCHESTRATION_SAMPLE_SETUP_SHARE);
    matrix.reduce(rows, cols, progress.split(1.0))?;
    progress.finish();
    Ok(())
}
