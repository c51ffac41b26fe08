//! Reordering strategies built on top of [`Matrix::reorder`]
//!
//! Each strategy produces a row permutation, a column permutation, or both,
//! and hands them to the matrix:
//! - Random permutations from a caller-owned generator ([`random`])
//! - Permutations sorting rows/columns by their non-zero count ([`density`])
//! - Permutations sorting rows/columns by caller-supplied keys ([`keys`])
//!
//! A permutation generation step takes a fixed share of the progress budget;
//! the reorder itself gets the rest.

pub mod keyed;
pub mod random;

pub use keyed::{density, keys};
pub use random::random;

use crate::constants::ORCHESTRATION_REORDER_SETUP_SHARE;
use crate::error::Result;
use crate::matrix::Matrix;
use crate::progress::Progress;

/// Applies generated permutations, charging the setup share first
pub(crate) fn apply_permutations<M>(
    matrix: &mut M,
    row_perm: Option<&[usize]>,
    col_perm: Option<&[usize]>,
    mut progress: Progress<'_>,
) -> Result<()>
where
    M: Matrix + ?Sized,
{
    progress.advance(ORCHESTRATION_REORDER_SETUP_SHARE);
    matrix.reorder(row_perm, col_perm, progress.split(1.0))?;
    progress.finish();
    Ok(())
}
