//! A matrix whose storage format is chosen at runtime

use std::fmt;

use crate::error::Result;
use crate::matrix::config::Tolerance;
use crate::matrix::meta::MatrixMeta;
use crate::matrix::{CsrMatrix, DenseMatrix, Direction, Format, Matrix, Scalar};
use crate::progress::Progress;

/// Either storage format behind one [`Matrix`] implementation
#[derive(Clone, PartialEq)]
pub enum AnyMatrix<T> {
    Csr(CsrMatrix<T>),
    Dense(DenseMatrix<T>),
}

macro_rules! delegate {
    ($self:expr, $m:ident => $body:expr) => {
        match $self {
            AnyMatrix::Csr($m) => $body,
            AnyMatrix::Dense($m) => $body,
        }
    };
}

impl<T: Scalar> Matrix for AnyMatrix<T> {
    type Value = T;

    fn meta(&self) -> &MatrixMeta {
        delegate!(self, m => m.meta())
    }

    fn meta_mut(&mut self) -> &mut MatrixMeta {
        delegate!(self, m => m.meta_mut())
    }

    fn format(&self) -> Format {
        delegate!(self, m => m.format())
    }

    fn transpose(&mut self, progress: Progress<'_>) -> Result<()> {
        delegate!(self, m => m.transpose(progress))
    }

    fn reorder(
        &mut self,
        row_perm: Option<&[usize]>,
        col_perm: Option<&[usize]>,
        progress: Progress<'_>,
    ) -> Result<()> {
        delegate!(self, m => m.reorder(row_perm, col_perm, progress))
    }

    fn reduce(
        &mut self,
        rows: Option<&[usize]>,
        cols: Option<&[usize]>,
        progress: Progress<'_>,
    ) -> Result<()> {
        delegate!(self, m => m.reduce(rows, cols, progress))
    }

    fn compute_symmetry_with(
        &mut self,
        tolerance: &Tolerance,
        progress: Progress<'_>,
    ) -> Result<bool> {
        delegate!(self, m => m.compute_symmetry_with(tolerance, progress))
    }

    fn nonzero_counts(&self, direction: Direction) -> Result<Vec<usize>> {
        delegate!(self, m => m.nonzero_counts(direction))
    }

    fn as_csr(&self) -> Option<&CsrMatrix<T>> {
        delegate!(self, m => m.as_csr())
    }

    fn as_dense(&self) -> Option<&DenseMatrix<T>> {
        delegate!(self, m => m.as_dense())
    }
}

impl<T: Scalar> fmt::Debug for AnyMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        delegate!(self, m => fmt::Debug::fmt(m, f))
    }
}

impl<T> From<CsrMatrix<T>> for AnyMatrix<T> {
    fn from(matrix: CsrMatrix<T>) -> Self {
        AnyMatrix::Csr(matrix)
    }
}

impl<T> From<DenseMatrix<T>> for AnyMatrix<T> {
    fn from(matrix: DenseMatrix<T>) -> Self {
        AnyMatrix::Dense(matrix)
    }
}
