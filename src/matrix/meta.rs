//! Dimension, symmetry and statistics bookkeeping shared by all representations
//!
//! Symmetry and statistics are derived properties. They are cached here after
//! being computed and are explicitly reset by every operation that changes the
//! structure they describe.

use crate::error::{Error, Result};

/// Tri-state symmetry flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Symmetry {
    /// Not computed since the last structural change
    #[default]
    Unknown,
    /// Known to be symmetric
    Symmetric,
    /// Known to be asymmetric
    Asymmetric,
}

impl Symmetry {
    /// The flag as a boolean, if it is known
    pub fn known(self) -> Option<bool> {
        match self {
            Symmetry::Unknown => None,
            Symmetry::Symmetric => Some(true),
            Symmetry::Asymmetric => Some(false),
        }
    }

    /// True only when the flag is set and symmetric
    pub fn is_known_symmetric(self) -> bool {
        self == Symmetry::Symmetric
    }
}

impl From<bool> for Symmetry {
    fn from(symmetric: bool) -> Self {
        if symmetric {
            Symmetry::Symmetric
        } else {
            Symmetry::Asymmetric
        }
    }
}

/// Degree statistics of a matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatrixStats {
    /// Largest number of non-zeros in any row
    pub max_row_size: usize,

    /// Largest number of non-zeros in any column
    pub max_column_size: usize,

    /// Number of rows without non-zeros
    pub num_empty_rows: usize,

    /// Number of columns without non-zeros
    pub num_empty_columns: usize,
}

impl MatrixStats {
    /// Stats of a matrix with no rows or no columns
    pub(crate) fn empty(nrows: usize, ncols: usize) -> Self {
        Self {
            max_row_size: 0,
            max_column_size: 0,
            num_empty_rows: nrows,
            num_empty_columns: ncols,
        }
    }
}

/// Sorts `degrees` and returns its maximum and the number of zero entries
pub(crate) fn summarize_degrees(degrees: &mut [usize]) -> (usize, usize) {
    degrees.sort_unstable();
    let max = degrees.last().copied().unwrap_or(0);
    let empty = degrees.partition_point(|&d| d == 0);
    (max, empty)
}

/// Bookkeeping every matrix carries next to its storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixMeta {
    nrows: usize,
    ncols: usize,
    symmetry: Symmetry,
    stats: Option<MatrixStats>,
}

impl MatrixMeta {
    /// Fresh bookkeeping with unknown symmetry and no stats
    pub fn new(nrows: usize, ncols: usize) -> Self {
        Self {
            nrows,
            ncols,
            symmetry: Symmetry::Unknown,
            stats: None,
        }
    }

    pub fn nrows(&self) -> usize {
        self.nrows
    }

    pub fn ncols(&self) -> usize {
        self.ncols
    }

    pub fn is_square(&self) -> bool {
        self.nrows == self.ncols
    }

    /// Current symmetry flag
    pub fn symmetry(&self) -> Symmetry {
        self.symmetry
    }

    /// Set the symmetry flag
    ///
    /// Fails when asked to mark a non-square matrix symmetric.
    pub fn set_symmetry(&mut self, symmetric: bool) -> Result<()> {
        if symmetric && !self.is_square() {
            return Err(Error::precondition(format!(
                "a {}x{} matrix cannot be symmetric",
                self.nrows, self.ncols
            )));
        }
        self.symmetry = Symmetry::from(symmetric);
        Ok(())
    }

    /// Forget the symmetry flag
    pub fn unset_symmetry(&mut self) {
        self.symmetry = Symmetry::Unknown;
    }

    /// Set the flag without the square check, for flags known by construction
    pub(crate) fn set_symmetry_state(&mut self, symmetry: Symmetry) {
        self.symmetry = symmetry;
    }

    /// Cached statistics, if computed since the last structural change
    pub fn stats(&self) -> Option<&MatrixStats> {
        self.stats.as_ref()
    }

    /// Forget the cached statistics
    pub fn invalidate_stats(&mut self) {
        self.stats = None;
    }

    pub(crate) fn set_stats(&mut self, stats: MatrixStats) {
        self.stats = Some(stats);
    }

    /// Record new dimensions after a reduce; symmetry is the caller's concern
    pub(crate) fn set_dims(&mut self, nrows: usize, ncols: usize) {
        self.nrows = nrows;
        self.ncols = ncols;
        self.stats = None;
    }

    /// Swap the dimensions after a transpose
    pub(crate) fn transpose_dims(&mut self) {
        std::mem::swap(&mut self.nrows, &mut self.ncols);
        self.stats = None;
    }

    /// Update symmetry after a permutation was applied
    pub(crate) fn after_reorder(&mut self, row_perm: Option<&[usize]>, col_perm: Option<&[usize]>) {
        self.stats = None;
        self.symmetry = self.symmetry.after_reorder(row_perm, col_perm);
    }

    /// Update dimensions and symmetry after a sub-matrix was extracted
    pub(crate) fn after_reduce(
        &mut self,
        rows: Option<&[usize]>,
        cols: Option<&[usize]>,
        nrows: usize,
        ncols: usize,
    ) {
        let symmetry = self.symmetry.after_reduce(rows, cols);
        self.set_dims(nrows, ncols);
        self.symmetry = symmetry;
    }
}

fn same_on_both_axes(rows: Option<&[usize]>, cols: Option<&[usize]>) -> bool {
    match (rows, cols) {
        (None, None) => true,
        (Some(r), Some(c)) => r == c,
        _ => false,
    }
}

impl Symmetry {
    /// The flag after permuting rows and columns
    ///
    /// Applying the same permutation to both axes preserves (a)symmetry.
    pub(crate) fn after_reorder(self, row_perm: Option<&[usize]>, col_perm: Option<&[usize]>) -> Self {
        if same_on_both_axes(row_perm, col_perm) {
            self
        } else {
            Symmetry::Unknown
        }
    }

    /// The flag after extracting a sub-matrix
    pub(crate) fn after_reduce(self, rows: Option<&[usize]>, cols: Option<&[usize]>) -> Self {
        match (rows, cols) {
            (None, None) => self,
            // a principal sub-matrix of a symmetric matrix is symmetric, nothing else carries over
            _ if same_on_both_axes(rows, cols) && self.is_known_symmetric() => Symmetry::Symmetric,
            _ => Symmetry::Unknown,
        }
    }
}
