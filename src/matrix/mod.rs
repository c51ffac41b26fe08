//! Matrix representations and the capability interface they share
//!
//! Two storage formats exist: [`CsrMatrix`] (compressed sparse rows) and
//! [`DenseMatrix`] (row-major). Both implement [`Matrix`], which exposes the
//! structural operations (transpose, reorder, reduce and symmetry detection)
//! together with the cached bookkeeping in [`MatrixMeta`]. [`AnyMatrix`]
//! wraps either format for callers that pick the representation at runtime.

pub mod any;
pub mod config;
pub mod conversion;
pub mod csr;
pub mod dense;
pub mod meta;
pub mod sparse;

pub use any::AnyMatrix;
pub use config::{KeySortMethod, Tolerance};
pub use csr::CsrMatrix;
pub use dense::DenseMatrix;
pub use meta::{MatrixMeta, MatrixStats, Symmetry};
pub use sparse::{SparseMatrix, SparseMeta};

use std::fmt::{self, Debug};

use log::debug;
use num_traits::{Num, ToPrimitive};

use crate::constants::{STATS_ROW_SHARE, STATS_SYMMETRY_SHARE};
use crate::error::{check_len, Error, Result};
use crate::progress::Progress;
use crate::utils::try_filled;
use meta::summarize_degrees;

/// Numeric element types a matrix can hold
pub trait Scalar: Copy + Num + PartialOrd + ToPrimitive + Debug + 'static {}

impl<T> Scalar for T where T: Copy + Num + PartialOrd + ToPrimitive + Debug + 'static {}

/// Axis selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Row,
    Column,
}

/// Storage format of a matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Csr,
    Dense,
}

impl Format {
    /// Short name used in error messages
    pub fn name(self) -> &'static str {
        match self {
            Format::Csr => "CSR",
            Format::Dense => "dense",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Structural operations and cached properties shared by every representation
///
/// Index arguments follow two conventions:
///
/// * a permutation is given as `perm[new] = old`, so position `i` of the result
///   is pulled from position `perm[i]` of the input;
/// * a selection is a strictly ascending list of indices to keep.
///
/// `None` leaves the corresponding axis untouched. Every operation consumes
/// exactly the budget of the [`Progress`] handle it is given.
pub trait Matrix {
    /// Element type
    type Value: Scalar;

    /// Shared bookkeeping
    fn meta(&self) -> &MatrixMeta;

    /// Mutable shared bookkeeping
    fn meta_mut(&mut self) -> &mut MatrixMeta;

    /// Storage format
    fn format(&self) -> Format;

    /// Swap the roles of rows and columns
    fn transpose(&mut self, progress: Progress<'_>) -> Result<()>;

    /// Apply a row permutation, a column permutation, or both
    fn reorder(
        &mut self,
        row_perm: Option<&[usize]>,
        col_perm: Option<&[usize]>,
        progress: Progress<'_>,
    ) -> Result<()>;

    /// Keep only the sub-matrix induced by the selected rows and columns
    fn reduce(
        &mut self,
        rows: Option<&[usize]>,
        cols: Option<&[usize]>,
        progress: Progress<'_>,
    ) -> Result<()>;

    /// Determine and cache value symmetry using `tolerance`
    fn compute_symmetry_with(
        &mut self,
        tolerance: &Tolerance,
        progress: Progress<'_>,
    ) -> Result<bool>;

    /// Number of non-zero entries of every row or every column
    fn nonzero_counts(&self, direction: Direction) -> Result<Vec<usize>>;

    /// The matrix as CSR storage, if that is its format
    fn as_csr(&self) -> Option<&CsrMatrix<Self::Value>> {
        None
    }

    /// The matrix as dense storage, if that is its format
    fn as_dense(&self) -> Option<&DenseMatrix<Self::Value>> {
        None
    }

    fn nrows(&self) -> usize {
        self.meta().nrows()
    }

    fn ncols(&self) -> usize {
        self.meta().ncols()
    }

    fn is_square(&self) -> bool {
        self.meta().is_square()
    }

    /// Cached symmetry flag
    ///
    /// Fails with [`Error::InvalidState`] when symmetry has not been computed
    /// or set since the last structural change.
    fn is_symmetric(&self) -> Result<bool> {
        self.meta()
            .symmetry()
            .known()
            .ok_or(Error::InvalidState("Symmetry has not been computed"))
    }

    fn is_symmetry_set(&self) -> bool {
        self.meta().symmetry().known().is_some()
    }

    /// Override the symmetry flag, e.g. when the caller knows it from the source
    fn set_symmetry(&mut self, symmetric: bool) -> Result<()> {
        self.meta_mut().set_symmetry(symmetric)
    }

    /// [`Matrix::compute_symmetry_with`] using the default tolerance
    fn compute_symmetry(&mut self, progress: Progress<'_>) -> Result<bool> {
        self.compute_symmetry_with(&Tolerance::default(), progress)
    }

    fn is_stats_set(&self) -> bool {
        self.meta().stats().is_some()
    }

    /// Cached statistics
    ///
    /// Fails with [`Error::InvalidState`] when they have not been computed
    /// since the last structural change.
    fn stats(&self) -> Result<MatrixStats> {
        self.meta()
            .stats()
            .copied()
            .ok_or(Error::InvalidState("Stats have not been computed"))
    }

    /// Compute and cache degree statistics
    ///
    /// Settles symmetry first if it is unknown. Rows and columns are always
    /// counted separately.
    fn compute_stats(&mut self, mut progress: Progress<'_>) -> Result<MatrixStats> {
        debug!(
            "compute_stats: {}x{} {} matrix",
            self.nrows(),
            self.ncols(),
            self.format()
        );

        if !self.is_symmetry_set() {
            self.compute_symmetry(progress.split(STATS_SYMMETRY_SHARE))?;
        }

        let (nrows, ncols) = (self.nrows(), self.ncols());
        let stats = if nrows == 0 || ncols == 0 {
            MatrixStats::empty(nrows, ncols)
        } else {
            let mut row_degrees = self.nonzero_counts(Direction::Row)?;
            let (max_row_size, num_empty_rows) = summarize_degrees(&mut row_degrees);
            progress.advance_remaining(STATS_ROW_SHARE);

            let mut col_degrees = self.nonzero_counts(Direction::Column)?;
            let (max_column_size, num_empty_columns) = summarize_degrees(&mut col_degrees);

            MatrixStats {
                max_row_size,
                max_column_size,
                num_empty_rows,
                num_empty_columns,
            }
        };

        self.meta_mut().set_stats(stats);
        progress.finish();
        Ok(stats)
    }

    /// Cached statistics, computing them first if necessary
    fn stats_or_compute(&mut self, mut progress: Progress<'_>) -> Result<MatrixStats> {
        match self.meta().stats() {
            Some(&stats) => {
                progress.finish();
                Ok(stats)
            }
            None => self.compute_stats(progress),
        }
    }
}

/// Fails unless `selection` is strictly ascending and every index is below `bound`
pub(crate) fn check_selection(what: &str, selection: &[usize], bound: usize) -> Result<()> {
    if let Some(pair) = selection.windows(2).find(|w| w[0] >= w[1]) {
        return Err(Error::precondition(format!(
            "{} must be strictly ascending but {} is followed by {}",
            what, pair[0], pair[1]
        )));
    }
    match selection.last() {
        Some(&last) if last >= bound => Err(Error::precondition(format!(
            "{} contains index {} but the axis has length {}",
            what, last, bound
        ))),
        _ => Ok(()),
    }
}

/// Fails unless `perm` is a permutation of `0..len`
pub(crate) fn check_permutation(what: &str, perm: &[usize], len: usize) -> Result<()> {
    check_len(what, perm.len(), len)?;
    let mut seen = try_filled(len, false)?;
    for &old in perm {
        match seen.get_mut(old) {
            Some(slot) if !*slot => *slot = true,
            Some(_) => {
                return Err(Error::precondition(format!(
                    "{} repeats index {}",
                    what, old
                )))
            }
            None => {
                return Err(Error::precondition(format!(
                    "{} contains index {} but the axis has length {}",
                    what, old, len
                )))
            }
        }
    }
    Ok(())
}
