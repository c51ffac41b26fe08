//! Row-major dense matrix storage
//!
//! Every cell is stored, so there is no sparsity bookkeeping. The structural
//! operations mirror the sparse ones: transpose works in place (cycle-following
//! for rectangular shapes), reorder and reduce gather into a fresh buffer.

use std::fmt;

use log::{debug, trace};

use crate::constants::{DEBUG_MAX_ENTRIES, DEBUG_MAX_ROWS};
use crate::error::{check_len, Error, Result};
use crate::matrix::config::Tolerance;
use crate::matrix::meta::MatrixMeta;
use crate::matrix::{check_permutation, check_selection, Direction, Format, Matrix, Scalar};
use crate::progress::{Progress, Ticker};
use crate::utils::{try_filled, try_with_capacity};

/// A dense matrix stored row by row in a single buffer
#[derive(Clone, PartialEq)]
pub struct DenseMatrix<T> {
    meta: MatrixMeta,

    /// Cell `(r, c)` lives at `r * ncols + c`
    values: Vec<T>,
}

fn cell_count(nrows: usize, ncols: usize) -> Result<usize> {
    nrows.checked_mul(ncols).ok_or_else(|| {
        Error::precondition(format!("a {}x{} matrix overflows the index space", nrows, ncols))
    })
}

impl<T: Scalar> DenseMatrix<T> {
    /// Creates a zero-filled matrix
    pub fn new(nrows: usize, ncols: usize) -> Result<Self> {
        let len = cell_count(nrows, ncols)?;
        Ok(Self {
            meta: MatrixMeta::new(nrows, ncols),
            values: try_filled(len, T::zero())?,
        })
    }

    /// Wraps a row-major buffer of `nrows * ncols` values
    pub fn from_vec(nrows: usize, ncols: usize, values: Vec<T>) -> Result<Self> {
        check_len("values", values.len(), cell_count(nrows, ncols)?)?;
        Ok(Self {
            meta: MatrixMeta::new(nrows, ncols),
            values,
        })
    }

    /// Value at `(row, col)`, or `None` when out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<T> {
        let ncols = self.meta.ncols();
        if row >= self.meta.nrows() || col >= ncols {
            return None;
        }
        Some(self.values[row * ncols + col])
    }

    /// Overwrites the value at `(row, col)`
    ///
    /// Cached symmetry and stats are reset.
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        let (nrows, ncols) = (self.meta.nrows(), self.meta.ncols());
        if row >= nrows || col >= ncols {
            return Err(Error::precondition(format!(
                "cell ({}, {}) out of bounds for a {}x{} matrix",
                row, col, nrows, ncols
            )));
        }
        self.values[row * ncols + col] = value;
        self.meta.unset_symmetry();
        self.meta.invalidate_stats();
        Ok(())
    }

    /// The row-major buffer
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// The cells of one row
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of bounds.
    pub fn row(&self, row: usize) -> &[T] {
        assert!(row < self.meta.nrows(), "Row index out of bounds");
        let ncols = self.meta.ncols();
        &self.values[row * ncols..(row + 1) * ncols]
    }

    /// Swaps every cell below the diagonal with its mirror
    fn transpose_square(&mut self, progress: &mut Progress<'_>) {
        let n = self.meta.nrows();
        let ticker = Ticker::new(n, 1.0);
        for row in 0..n {
            for col in 0..row {
                self.values.swap(row * n + col, col * n + row);
            }
            ticker.tick(progress, row);
        }
    }

    /// In-place rectangular transpose by following permutation cycles
    ///
    /// The cell at linear index `i` moves to `(i * nrows) mod (len - 1)`; the
    /// first and last cells are fixed points. Each cycle is rotated by
    /// repeatedly swapping its next member into the cycle's start slot.
    fn transpose_cycles(&mut self, progress: &mut Progress<'_>) -> Result<()> {
        let nrows = self.meta.nrows() as u128;
        let len = self.values.len();
        let last = len - 1;
        let modulus = last as u128;
        let destination = |i: usize| ((i as u128 * nrows) % modulus) as usize;

        let mut visited = try_filled(len, false)?;
        let ticker = Ticker::new(len, 1.0);
        for start in 1..last {
            ticker.tick(progress, start);
            if visited[start] {
                continue;
            }
            visited[start] = true;
            let mut next = destination(start);
            while next != start {
                self.values.swap(start, next);
                visited[next] = true;
                next = destination(next);
            }
        }
        Ok(())
    }
}

impl<T: Scalar> Matrix for DenseMatrix<T> {
    type Value = T;

    fn meta(&self) -> &MatrixMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut MatrixMeta {
        &mut self.meta
    }

    fn format(&self) -> Format {
        Format::Dense
    }

    fn as_dense(&self) -> Option<&DenseMatrix<T>> {
        Some(self)
    }

    fn transpose(&mut self, mut progress: Progress<'_>) -> Result<()> {
        let (nrows, ncols) = (self.meta.nrows(), self.meta.ncols());
        debug!("Dense transpose: {}x{}", nrows, ncols);

        if self.meta.symmetry().is_known_symmetric() {
            trace!("Dense transpose: matrix is symmetric, nothing to move");
        } else if nrows <= 1 || ncols <= 1 {
            // a single row or column reads the same in either layout
            trace!("Dense transpose: vector shape, only the dimensions change");
            self.meta.transpose_dims();
        } else if nrows == ncols {
            trace!("Dense transpose: square swap");
            self.transpose_square(&mut progress);
            self.meta.transpose_dims();
        } else {
            trace!("Dense transpose: cycle-following");
            self.transpose_cycles(&mut progress)?;
            self.meta.transpose_dims();
        }

        progress.finish();
        Ok(())
    }

    /// Gathers every destination cell from its permuted source cell
    fn reorder(
        &mut self,
        row_perm: Option<&[usize]>,
        col_perm: Option<&[usize]>,
        mut progress: Progress<'_>,
    ) -> Result<()> {
        let (nrows, ncols) = (self.meta.nrows(), self.meta.ncols());
        debug!(
            "Dense reorder: {}x{}, rows={}, columns={}",
            nrows,
            ncols,
            row_perm.is_some(),
            col_perm.is_some()
        );

        if let Some(perm) = row_perm {
            check_permutation("row permutation", perm, nrows)?;
        }
        if let Some(perm) = col_perm {
            check_permutation("column permutation", perm, ncols)?;
        }
        if row_perm.is_none() && col_perm.is_none() {
            progress.finish();
            return Ok(());
        }

        let mut new_values = try_with_capacity(self.values.len())?;
        let ticker = Ticker::new(nrows, 1.0);
        for row in 0..nrows {
            let base = row_perm.map_or(row, |perm| perm[row]) * ncols;
            let source = &self.values[base..base + ncols];
            match col_perm {
                Some(perm) => new_values.extend(perm.iter().map(|&col| source[col])),
                None => new_values.extend_from_slice(source),
            }
            ticker.tick(&mut progress, row);
        }

        self.values = new_values;
        self.meta.after_reorder(row_perm, col_perm);
        progress.finish();
        Ok(())
    }

    fn reduce(
        &mut self,
        rows: Option<&[usize]>,
        cols: Option<&[usize]>,
        mut progress: Progress<'_>,
    ) -> Result<()> {
        let (nrows, ncols) = (self.meta.nrows(), self.meta.ncols());
        debug!(
            "Dense reduce: {}x{}, rows={:?}, columns={:?}",
            nrows,
            ncols,
            rows.map(<[usize]>::len),
            cols.map(<[usize]>::len)
        );

        if let Some(rows) = rows {
            check_selection("row selection", rows, nrows)?;
        }
        if let Some(cols) = cols {
            check_selection("column selection", cols, ncols)?;
        }

        let new_nrows = rows.map_or(nrows, <[usize]>::len);
        let new_ncols = cols.map_or(ncols, <[usize]>::len);
        let mut new_values = try_with_capacity(cell_count(new_nrows, new_ncols)?)?;

        let ticker = Ticker::new(new_nrows, 1.0);
        for new_row in 0..new_nrows {
            let base = rows.map_or(new_row, |rows| rows[new_row]) * ncols;
            let source = &self.values[base..base + ncols];
            match cols {
                Some(cols) => new_values.extend(cols.iter().map(|&col| source[col])),
                None => new_values.extend_from_slice(source),
            }
            ticker.tick(&mut progress, new_row);
        }

        self.values = new_values;
        self.meta.after_reduce(rows, cols, new_nrows, new_ncols);
        progress.finish();
        Ok(())
    }

    fn compute_symmetry_with(
        &mut self,
        tolerance: &Tolerance,
        mut progress: Progress<'_>,
    ) -> Result<bool> {
        let n = self.meta.nrows();
        debug!("Dense symmetry: {}x{}", n, self.meta.ncols());

        let mut symmetric = self.meta.is_square();
        if symmetric {
            let ticker = Ticker::new(n, 1.0);
            'rows: for row in 0..n {
                for col in 0..row {
                    let lower = self.values[row * n + col];
                    let upper = self.values[col * n + row];
                    if !tolerance.matches(lower, upper) {
                        trace!("Dense symmetry: cells ({}, {}) and ({}, {}) differ", row, col, col, row);
                        symmetric = false;
                        break 'rows;
                    }
                }
                ticker.tick(&mut progress, row);
            }
        }

        self.meta.set_symmetry(symmetric)?;
        progress.finish();
        Ok(symmetric)
    }

    fn nonzero_counts(&self, direction: Direction) -> Result<Vec<usize>> {
        let (nrows, ncols) = (self.meta.nrows(), self.meta.ncols());
        let zero = T::zero();
        match direction {
            Direction::Row => {
                let mut counts = try_with_capacity(nrows)?;
                counts.extend(
                    (0..nrows).map(|row| self.row(row).iter().filter(|&&v| v != zero).count()),
                );
                Ok(counts)
            }
            Direction::Column => {
                let mut counts = try_filled(ncols, 0usize)?;
                for row in 0..nrows {
                    for (count, &value) in counts.iter_mut().zip(self.row(row)) {
                        if value != zero {
                            *count += 1;
                        }
                    }
                }
                Ok(counts)
            }
        }
    }
}

impl<T: Scalar> fmt::Debug for DenseMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (nrows, ncols) = (self.meta.nrows(), self.meta.ncols());
        writeln!(f, "DenseMatrix {{")?;
        writeln!(f, "  dimensions: {} × {}", nrows, ncols)?;

        let max_rows_to_print = DEBUG_MAX_ROWS.min(nrows);
        for row in 0..max_rows_to_print {
            let cells = self.row(row);
            let shown = DEBUG_MAX_ENTRIES.min(ncols);
            write!(f, "    row {}: {:?}", row, &cells[..shown])?;
            if ncols > shown {
                write!(f, " ... ({} more)", ncols - shown)?;
            }
            writeln!(f)?;
        }
        if nrows > max_rows_to_print {
            writeln!(f, "    ... ({} more rows)", nrows - max_rows_to_print)?;
        }

        write!(f, "}}")
    }
}
