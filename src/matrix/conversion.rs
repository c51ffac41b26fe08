//! Conversion functions between matrix formats

use ndarray::Array2;

use crate::error::{Error, Result};
use crate::matrix::{CsrMatrix, DenseMatrix, Matrix, Scalar};
use crate::utils::{prefix_sum, try_filled, try_with_capacity};

impl<T: Scalar> CsrMatrix<T> {
    /// Converts this CSR matrix to dense storage
    ///
    /// Duplicate entries are summed. The symmetry flag carries over.
    pub fn to_dense(&self) -> Result<DenseMatrix<T>> {
        let (nrows, ncols) = (self.nrows(), self.ncols());
        let mut dense = DenseMatrix::new(nrows, ncols)?;

        for row in 0..nrows {
            for (col, value) in self.row_iter(row) {
                let current = dense.get(row, col).unwrap_or_else(T::zero);
                dense.set(row, col, current + value)?;
            }
        }

        dense.meta_mut().set_symmetry_state(self.meta().symmetry());
        Ok(dense)
    }
}

impl<T: Scalar> DenseMatrix<T> {
    /// Converts this dense matrix to CSR storage, skipping zero cells
    ///
    /// Rows come out sorted by column. The symmetry flag carries over.
    pub fn to_csr(&self) -> Result<CsrMatrix<T>> {
        let (nrows, ncols) = (self.nrows(), self.ncols());
        let zero = T::zero();

        // Count non-zeros per row, then turn counts into offsets
        let mut offsets = try_filled(nrows + 1, 0usize)?;
        for row in 0..nrows {
            offsets[row + 1] = self.row(row).iter().filter(|&&v| v != zero).count();
        }
        prefix_sum::inclusive(&mut offsets);

        let nnz = offsets[nrows];
        let mut columns = try_with_capacity(nnz)?;
        let mut values = try_with_capacity(nnz)?;
        for row in 0..nrows {
            for (col, &value) in self.row(row).iter().enumerate() {
                if value != zero {
                    columns.push(col);
                    values.push(value);
                }
            }
        }

        let mut csr = CsrMatrix::try_new(nrows, ncols, offsets, columns, values)?;
        csr.meta_mut().set_symmetry_state(self.meta().symmetry());
        Ok(csr)
    }

    /// Copies a 2-D array into row-major storage
    pub fn from_array(array: &Array2<T>) -> Result<Self> {
        let (nrows, ncols) = array.dim();
        let mut values = try_with_capacity(array.len())?;
        values.extend(array.iter().copied());
        Self::from_vec(nrows, ncols, values)
    }

    /// Copies the cells into a 2-D array
    pub fn to_array(&self) -> Result<Array2<T>> {
        Array2::from_shape_vec((self.nrows(), self.ncols()), self.values().to_vec())
            .map_err(|err| Error::precondition(format!("cannot shape dense matrix: {}", err)))
    }
}
