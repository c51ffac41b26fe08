//! Bookkeeping and operations specific to sparse storage

use crate::error::{Error, Result};
use crate::matrix::meta::Symmetry;
use crate::matrix::Matrix;
use crate::progress::Progress;

/// Non-zero count and structural symmetry of a sparse matrix
///
/// Structural symmetry concerns only the pattern of stored entries: the matrix
/// is structurally symmetric when an entry at `(r, c)` implies one at `(c, r)`,
/// whatever the values are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SparseMeta {
    nnz: usize,
    structural: Symmetry,
}

impl SparseMeta {
    pub fn new(nnz: usize) -> Self {
        Self {
            nnz,
            structural: Symmetry::Unknown,
        }
    }

    pub fn nnz(&self) -> usize {
        self.nnz
    }

    /// Current structural symmetry flag
    pub fn structural_symmetry(&self) -> Symmetry {
        self.structural
    }

    pub(crate) fn set_nnz(&mut self, nnz: usize) {
        self.nnz = nnz;
    }

    pub(crate) fn set_structural_symmetry(&mut self, structural: Symmetry) {
        self.structural = structural;
    }

    pub(crate) fn after_reorder(&mut self, row_perm: Option<&[usize]>, col_perm: Option<&[usize]>) {
        self.structural = self.structural.after_reorder(row_perm, col_perm);
    }

    pub(crate) fn after_reduce(&mut self, rows: Option<&[usize]>, cols: Option<&[usize]>, nnz: usize) {
        self.structural = self.structural.after_reduce(rows, cols);
        self.nnz = nnz;
    }
}

/// A [`Matrix`] that stores only its non-zero entries
pub trait SparseMatrix: Matrix {
    /// Sparse bookkeeping
    fn sparse_meta(&self) -> &SparseMeta;

    /// Determine and cache whether the non-zero pattern is symmetric
    fn compute_structural_symmetry(&mut self, progress: Progress<'_>) -> Result<bool>;

    /// Number of stored entries
    fn nnz(&self) -> usize {
        self.sparse_meta().nnz()
    }

    /// Cached structural symmetry flag
    ///
    /// Fails with [`Error::InvalidState`] when it has not been computed since
    /// the last structural change.
    fn is_structurally_symmetric(&self) -> Result<bool> {
        self.sparse_meta()
            .structural_symmetry()
            .known()
            .ok_or(Error::InvalidState("Structural symmetry has not been computed"))
    }
}
