//! Compressed Sparse Row (CSR) matrix format implementation

use std::fmt;
use std::ops::Range;

use log::{debug, trace};

use crate::constants::{
    DEBUG_MAX_ENTRIES, DEBUG_MAX_ROWS, REDUCE_SETUP_SHARE, REORDER_SETUP_SHARE,
    TRANSPOSE_HISTOGRAM_SHARE,
};
use crate::error::{check_len, Error, Result};
use crate::matrix::config::Tolerance;
use crate::matrix::meta::{MatrixMeta, Symmetry};
use crate::matrix::sparse::{SparseMatrix, SparseMeta};
use crate::matrix::{check_permutation, check_selection, Direction, Format, Matrix, Scalar};
use crate::progress::{Progress, Ticker};
use crate::utils::{check_indices, invert_permutation, prefix_sum, try_filled, try_with_capacity};

/// A sparse matrix in Compressed Sparse Row (CSR) format
///
/// The CSR format stores a sparse matrix using three arrays:
/// - offsets: Array of size nrows + 1; row `r` owns entries `offsets[r]..offsets[r + 1]`
/// - columns: Array of size nnz containing column indices of non-zero elements
/// - values: Array of size nnz containing the non-zero values
///
/// Column order within a row is not required to be sorted, and none of the
/// structural operations rely on it. [`CsrMatrix::sort_rows`] puts rows in
/// canonical order when a caller needs it.
#[derive(Clone, PartialEq)]
pub struct CsrMatrix<T> {
    meta: MatrixMeta,
    sparse: SparseMeta,

    /// Row offsets (size: nrows + 1)
    offsets: Vec<usize>,

    /// Column indices (size: nnz)
    columns: Vec<usize>,

    /// Non-zero values (size: nnz)
    values: Vec<T>,
}

impl<T: Scalar> CsrMatrix<T> {
    /// Creates a new CSR matrix with the given dimensions and data
    ///
    /// # Arguments
    ///
    /// * `nrows` - Number of rows
    /// * `ncols` - Number of columns
    /// * `offsets` - Row offsets
    /// * `columns` - Column indices
    /// * `values` - Non-zero values
    ///
    /// # Panics
    ///
    /// Panics if the input arrays are inconsistent; see [`CsrMatrix::try_new`]
    /// for the conditions and a non-panicking variant.
    pub fn new(
        nrows: usize,
        ncols: usize,
        offsets: Vec<usize>,
        columns: Vec<usize>,
        values: Vec<T>,
    ) -> Self {
        match Self::try_new(nrows, ncols, offsets, columns, values) {
            Ok(matrix) => matrix,
            Err(err) => panic!("Invalid CSR matrix: {}", err),
        }
    }

    /// Creates a new CSR matrix, validating the buffers
    ///
    /// Fails unless:
    /// - offsets.len() is nrows + 1, starts at 0 and never decreases
    /// - columns.len() equals values.len() equals offsets[nrows]
    /// - every column index is below ncols
    pub fn try_new(
        nrows: usize,
        ncols: usize,
        offsets: Vec<usize>,
        columns: Vec<usize>,
        values: Vec<T>,
    ) -> Result<Self> {
        check_len("offsets", offsets.len(), nrows + 1)?;
        check_len("values", values.len(), columns.len())?;
        if offsets[0] != 0 {
            return Err(Error::precondition("offsets must start at 0"));
        }
        if let Some(row) = offsets.windows(2).position(|w| w[0] > w[1]) {
            return Err(Error::precondition(format!(
                "offsets decrease at row {}",
                row
            )));
        }
        check_len("columns", columns.len(), offsets[nrows])?;
        if let Some(&col) = columns.iter().find(|&&col| col >= ncols) {
            return Err(Error::precondition(format!(
                "Column index {} out of bounds (ncols = {})",
                col, ncols
            )));
        }

        let nnz = columns.len();
        Ok(Self {
            meta: MatrixMeta::new(nrows, ncols),
            sparse: SparseMeta::new(nnz),
            offsets,
            columns,
            values,
        })
    }

    /// Creates an empty matrix with the given dimensions
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        Self {
            meta: MatrixMeta::new(nrows, ncols),
            sparse: SparseMeta::new(0),
            offsets: vec![0; nrows + 1],
            columns: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Creates a matrix with zero-filled buffers for `nnz` entries
    ///
    /// The buffers are meant to be filled through [`CsrMatrix::offsets_mut`],
    /// [`CsrMatrix::columns_mut`] and [`CsrMatrix::values_mut`], followed by
    /// [`CsrMatrix::update_nnz`].
    pub fn with_capacity(nrows: usize, ncols: usize, nnz: usize) -> Result<Self> {
        Ok(Self {
            meta: MatrixMeta::new(nrows, ncols),
            sparse: SparseMeta::new(0),
            offsets: try_filled(nrows + 1, 0)?,
            columns: try_filled(nnz, 0)?,
            values: try_filled(nnz, T::zero())?,
        })
    }

    /// Creates an identity matrix of the given size
    pub fn identity(n: usize) -> Self {
        let mut matrix = Self {
            meta: MatrixMeta::new(n, n),
            sparse: SparseMeta::new(n),
            offsets: (0..=n).collect(),
            columns: (0..n).collect(),
            values: vec![T::one(); n],
        };
        matrix.meta.set_symmetry_state(Symmetry::Symmetric);
        matrix.sparse.set_structural_symmetry(Symmetry::Symmetric);
        matrix
    }

    /// Builds a matrix from `(row, col, value)` triplets
    ///
    /// Entries keep their input order within each row. Duplicates are stored
    /// as separate entries.
    pub fn from_triplets(nrows: usize, ncols: usize, triplets: &[(usize, usize, T)]) -> Result<Self> {
        if let Some(&(row, col, _)) = triplets
            .iter()
            .find(|&&(row, col, _)| row >= nrows || col >= ncols)
        {
            return Err(Error::precondition(format!(
                "Entry ({}, {}) out of bounds for a {}x{} matrix",
                row, col, nrows, ncols
            )));
        }

        let nnz = triplets.len();
        let mut offsets = try_filled(nrows + 1, 0usize)?;
        for &(row, _, _) in triplets {
            offsets[row + 1] += 1;
        }
        prefix_sum::inclusive(&mut offsets);

        let mut cursor = try_with_capacity(nrows)?;
        cursor.extend_from_slice(&offsets[..nrows]);
        let mut columns = try_filled(nnz, 0usize)?;
        let mut values = try_filled(nnz, T::zero())?;
        for &(row, col, value) in triplets {
            let slot = cursor[row];
            cursor[row] += 1;
            columns[slot] = col;
            values[slot] = value;
        }

        Ok(Self {
            meta: MatrixMeta::new(nrows, ncols),
            sparse: SparseMeta::new(nnz),
            offsets,
            columns,
            values,
        })
    }

    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    pub fn columns(&self) -> &[usize] {
        &self.columns
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Mutable row offsets; call [`CsrMatrix::update_nnz`] when done
    pub fn offsets_mut(&mut self) -> &mut [usize] {
        &mut self.offsets
    }

    /// Mutable column indices; call [`CsrMatrix::update_nnz`] when done
    pub fn columns_mut(&mut self) -> &mut [usize] {
        &mut self.columns
    }

    /// Mutable values; call [`CsrMatrix::update_nnz`] when done
    pub fn values_mut(&mut self) -> &mut [T] {
        &mut self.values
    }

    /// Re-derives the non-zero count from `offsets[nrows]` after manual filling
    ///
    /// Surplus buffer capacity beyond the final offset is dropped. Cached
    /// symmetry and stats are reset since the contents may have changed.
    pub fn update_nnz(&mut self) -> Result<()> {
        let nrows = self.meta.nrows();
        if self.offsets[0] != 0 || self.offsets.windows(2).any(|w| w[0] > w[1]) {
            return Err(Error::precondition(
                "offsets must start at 0 and never decrease",
            ));
        }
        let nnz = self.offsets[nrows];
        if nnz > self.columns.len() {
            return Err(Error::precondition(format!(
                "offsets[{}] = {} exceeds the {} allocated entries",
                nrows,
                nnz,
                self.columns.len()
            )));
        }
        self.columns.truncate(nnz);
        self.values.truncate(nnz);
        check_indices("columns", &self.columns, self.meta.ncols())?;

        self.sparse.set_nnz(nnz);
        self.sparse.set_structural_symmetry(Symmetry::Unknown);
        self.meta.unset_symmetry();
        self.meta.invalidate_stats();
        Ok(())
    }

    /// Entry range of row `row` in `columns` and `values`
    #[inline]
    fn row_range(&self, row: usize) -> Range<usize> {
        self.offsets[row]..self.offsets[row + 1]
    }

    /// Number of stored entries in row `row`
    #[inline]
    pub fn row_degree(&self, row: usize) -> usize {
        self.offsets[row + 1] - self.offsets[row]
    }

    /// Returns an iterator over the non-zero elements in row i
    ///
    /// Each item is a tuple (col_idx, value) representing a non-zero element
    pub fn row_iter(&self, i: usize) -> impl Iterator<Item = (usize, T)> + '_ {
        assert!(i < self.meta.nrows(), "Row index out of bounds");

        let range = self.row_range(i);
        self.columns[range.clone()]
            .iter()
            .copied()
            .zip(self.values[range].iter().copied())
    }

    /// All entries as `(row, col, value)`, in storage order
    pub fn triplets(&self) -> Vec<(usize, usize, T)> {
        (0..self.meta.nrows())
            .flat_map(|row| self.row_iter(row).map(move |(col, value)| (row, col, value)))
            .collect()
    }

    /// Sorts the entries of every row by ascending column index
    ///
    /// The set of entries is unchanged, so cached properties stay valid.
    pub fn sort_rows(&mut self) -> Result<()> {
        let mut pairs: Vec<(usize, T)> = Vec::new();
        for row in 0..self.meta.nrows() {
            let range = self.row_range(row);
            if self.columns[range.clone()].windows(2).all(|w| w[0] <= w[1]) {
                continue;
            }
            pairs.clear();
            pairs.try_reserve(range.len()).map_err(|source| Error::Allocation {
                requested: range.len(),
                source,
            })?;
            pairs.extend(
                self.columns[range.clone()]
                    .iter()
                    .copied()
                    .zip(self.values[range.clone()].iter().copied()),
            );
            pairs.sort_by_key(|&(col, _)| col);
            for (idx, &(col, value)) in range.zip(pairs.iter()) {
                self.columns[idx] = col;
                self.values[idx] = value;
            }
        }
        Ok(())
    }

    /// Scans for the first entry without a mirrored partner
    ///
    /// With a tolerance the partner's value must also match.
    fn find_mismatch(&self, tolerance: Option<&Tolerance>, progress: &mut Progress<'_>) -> Mismatch {
        let nrows = self.meta.nrows();
        let ticker = Ticker::new(nrows, 1.0);
        for row in 0..nrows {
            for idx in self.row_range(row) {
                let col = self.columns[idx];
                let partner = self
                    .row_range(col)
                    .find(|&other| self.columns[other] == row);
                match (partner, tolerance) {
                    (None, _) => return Mismatch::MissingPartner { row, col },
                    (Some(other), Some(tolerance))
                        if !tolerance.matches(self.values[idx], self.values[other]) =>
                    {
                        return Mismatch::Value { row, col }
                    }
                    _ => {}
                }
            }
            ticker.tick(progress, row);
        }
        Mismatch::None
    }
}

/// Outcome of a symmetry scan
enum Mismatch {
    None,
    MissingPartner { row: usize, col: usize },
    Value { row: usize, col: usize },
}

impl<T: Scalar> Matrix for CsrMatrix<T> {
    type Value = T;

    fn meta(&self) -> &MatrixMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut MatrixMeta {
        &mut self.meta
    }

    fn format(&self) -> Format {
        Format::Csr
    }

    fn as_csr(&self) -> Option<&CsrMatrix<T>> {
        Some(self)
    }

    /// Counting transpose: column histogram, prefix sum, then a scatter of
    /// every entry through a per-column write cursor
    fn transpose(&mut self, mut progress: Progress<'_>) -> Result<()> {
        let (nrows, ncols) = (self.meta.nrows(), self.meta.ncols());
        debug!(
            "CSR transpose: {}x{}, nnz={}",
            nrows,
            ncols,
            self.columns.len()
        );

        if self.meta.symmetry().is_known_symmetric() {
            trace!("CSR transpose: matrix is symmetric, nothing to move");
            progress.finish();
            return Ok(());
        }
        if nrows == 0 || ncols == 0 {
            // no entries can exist, only the shape changes
            self.offsets = try_filled(ncols + 1, 0)?;
            self.meta.transpose_dims();
            progress.finish();
            return Ok(());
        }

        let nnz = self.columns.len();
        let mut new_offsets = try_filled(ncols + 1, 0usize)?;
        for &col in &self.columns {
            new_offsets[col + 1] += 1;
        }
        prefix_sum::inclusive(&mut new_offsets);
        progress.advance(TRANSPOSE_HISTOGRAM_SHARE);

        // next free slot of every new row
        let mut cursor = try_with_capacity(ncols)?;
        cursor.extend_from_slice(&new_offsets[..ncols]);
        let mut new_columns = try_filled(nnz, 0usize)?;
        let mut new_values = try_filled(nnz, T::zero())?;

        let ticker = Ticker::new(nrows, 1.0 - TRANSPOSE_HISTOGRAM_SHARE);
        for row in 0..nrows {
            for idx in self.row_range(row) {
                let col = self.columns[idx];
                let slot = cursor[col];
                cursor[col] += 1;
                new_columns[slot] = row;
                new_values[slot] = self.values[idx];
            }
            ticker.tick(&mut progress, row);
        }

        self.offsets = new_offsets;
        self.columns = new_columns;
        self.values = new_values;
        self.meta.transpose_dims();
        progress.finish();
        Ok(())
    }

    fn reorder(
        &mut self,
        row_perm: Option<&[usize]>,
        col_perm: Option<&[usize]>,
        mut progress: Progress<'_>,
    ) -> Result<()> {
        let (nrows, ncols) = (self.meta.nrows(), self.meta.ncols());
        debug!(
            "CSR reorder: {}x{}, nnz={}, rows={}, columns={}",
            nrows,
            ncols,
            self.columns.len(),
            row_perm.is_some(),
            col_perm.is_some()
        );

        if let Some(perm) = row_perm {
            check_permutation("row permutation", perm, nrows)?;
        }
        if let Some(perm) = col_perm {
            check_permutation("column permutation", perm, ncols)?;
        }

        // new column id of every old column
        let rename = col_perm.map(invert_permutation).transpose()?;

        match row_perm {
            Some(row_perm) => {
                let nnz = self.columns.len();
                let mut new_offsets = try_filled(nrows + 1, 0usize)?;
                for (new_row, &old_row) in row_perm.iter().enumerate() {
                    new_offsets[new_row + 1] = new_offsets[new_row] + self.row_degree(old_row);
                }
                progress.advance(REORDER_SETUP_SHARE);

                let mut new_columns = try_with_capacity(nnz)?;
                let mut new_values = try_with_capacity(nnz)?;
                let ticker = Ticker::new(nrows, 1.0 - REORDER_SETUP_SHARE);
                for (new_row, &old_row) in row_perm.iter().enumerate() {
                    let range = self.row_range(old_row);
                    match &rename {
                        Some(rename) => new_columns
                            .extend(self.columns[range.clone()].iter().map(|&col| rename[col])),
                        None => new_columns.extend_from_slice(&self.columns[range.clone()]),
                    }
                    new_values.extend_from_slice(&self.values[range]);
                    ticker.tick(&mut progress, new_row);
                }

                self.offsets = new_offsets;
                self.columns = new_columns;
                self.values = new_values;
            }
            None => {
                if let Some(rename) = rename {
                    progress.advance(REORDER_SETUP_SHARE);
                    let ticker = Ticker::new(self.columns.len(), 1.0 - REORDER_SETUP_SHARE);
                    for (idx, col) in self.columns.iter_mut().enumerate() {
                        *col = rename[*col];
                        ticker.tick(&mut progress, idx);
                    }
                }
            }
        }

        if row_perm.is_some() || col_perm.is_some() {
            self.meta.after_reorder(row_perm, col_perm);
            self.sparse.after_reorder(row_perm, col_perm);
        }
        progress.finish();
        Ok(())
    }

    /// Compacts the kept entries towards the front of the existing buffers
    fn reduce(
        &mut self,
        rows: Option<&[usize]>,
        cols: Option<&[usize]>,
        mut progress: Progress<'_>,
    ) -> Result<()> {
        let (nrows, ncols) = (self.meta.nrows(), self.meta.ncols());
        debug!(
            "CSR reduce: {}x{}, nnz={}, rows={:?}, columns={:?}",
            nrows,
            ncols,
            self.columns.len(),
            rows.map(<[usize]>::len),
            cols.map(<[usize]>::len)
        );

        if let Some(rows) = rows {
            check_selection("row selection", rows, nrows)?;
        }
        if let Some(cols) = cols {
            check_selection("column selection", cols, ncols)?;
        }

        let col_map = match cols {
            Some(cols) => {
                let mut map = try_filled(ncols, None)?;
                for (new_col, &old_col) in cols.iter().enumerate() {
                    map[old_col] = Some(new_col);
                }
                Some(map)
            }
            None => None,
        };
        progress.advance(REDUCE_SETUP_SHARE);

        let new_nrows = rows.map_or(nrows, <[usize]>::len);
        let new_ncols = cols.map_or(ncols, <[usize]>::len);

        // writes never overtake reads: new_row <= old_row and write <= idx
        let mut start = 0;
        let mut new_row = 0;
        let mut write = 0;
        let ticker = Ticker::new(nrows, 1.0 - REDUCE_SETUP_SHARE);
        for old_row in 0..nrows {
            let end = self.offsets[old_row + 1];
            let keep = rows.map_or(true, |rows| rows.get(new_row) == Some(&old_row));
            if keep {
                for idx in start..end {
                    let col = self.columns[idx];
                    let new_col = match &col_map {
                        Some(map) => map[col],
                        None => Some(col),
                    };
                    if let Some(new_col) = new_col {
                        self.columns[write] = new_col;
                        self.values[write] = self.values[idx];
                        write += 1;
                    }
                }
                new_row += 1;
                self.offsets[new_row] = write;
            }
            start = end;
            ticker.tick(&mut progress, old_row);
        }
        if new_row != new_nrows {
            return Err(Error::precondition(format!(
                "matched {} rows but {} were requested",
                new_row, new_nrows
            )));
        }

        self.offsets.truncate(new_nrows + 1);
        self.columns.truncate(write);
        self.values.truncate(write);
        self.meta.after_reduce(rows, cols, new_nrows, new_ncols);
        self.sparse.after_reduce(rows, cols, write);
        progress.finish();
        Ok(())
    }

    fn compute_symmetry_with(
        &mut self,
        tolerance: &Tolerance,
        mut progress: Progress<'_>,
    ) -> Result<bool> {
        debug!(
            "CSR symmetry: {}x{}, nnz={}",
            self.meta.nrows(),
            self.meta.ncols(),
            self.columns.len()
        );

        if !self.meta.is_square() {
            self.meta.set_symmetry(false)?;
            self.sparse.set_structural_symmetry(Symmetry::Asymmetric);
            progress.finish();
            return Ok(false);
        }

        let symmetric = match self.find_mismatch(Some(tolerance), &mut progress) {
            Mismatch::None => {
                self.sparse.set_structural_symmetry(Symmetry::Symmetric);
                true
            }
            Mismatch::MissingPartner { row, col } => {
                trace!("CSR symmetry: entry ({}, {}) has no partner", row, col);
                self.sparse.set_structural_symmetry(Symmetry::Asymmetric);
                false
            }
            Mismatch::Value { row, col } => {
                trace!("CSR symmetry: values at ({}, {}) and ({}, {}) differ", row, col, col, row);
                false
            }
        };

        self.meta.set_symmetry(symmetric)?;
        progress.finish();
        Ok(symmetric)
    }

    fn nonzero_counts(&self, direction: Direction) -> Result<Vec<usize>> {
        match direction {
            Direction::Row => {
                let mut counts = try_with_capacity(self.meta.nrows())?;
                counts.extend(self.offsets.windows(2).map(|w| w[1] - w[0]));
                Ok(counts)
            }
            Direction::Column => {
                let mut counts = try_filled(self.meta.ncols(), 0usize)?;
                for &col in &self.columns {
                    counts[col] += 1;
                }
                Ok(counts)
            }
        }
    }
}

impl<T: Scalar> SparseMatrix for CsrMatrix<T> {
    fn sparse_meta(&self) -> &SparseMeta {
        &self.sparse
    }

    fn compute_structural_symmetry(&mut self, mut progress: Progress<'_>) -> Result<bool> {
        let symmetric =
            self.meta.is_square() && matches!(self.find_mismatch(None, &mut progress), Mismatch::None);
        self.sparse.set_structural_symmetry(Symmetry::from(symmetric));
        progress.finish();
        Ok(symmetric)
    }
}

impl<T: Scalar> fmt::Debug for CsrMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nrows = self.meta.nrows();
        writeln!(f, "CsrMatrix {{")?;
        writeln!(f, "  dimensions: {} × {}", nrows, self.meta.ncols())?;
        writeln!(f, "  nnz: {}", self.columns.len())?;

        // Print a sample of the matrix content
        let max_rows_to_print = DEBUG_MAX_ROWS.min(nrows);

        if max_rows_to_print > 0 {
            writeln!(f, "  content sample:")?;

            for row in 0..max_rows_to_print {
                write!(f, "    row {}: ", row)?;
                let range = self.row_range(row);

                if range.is_empty() {
                    writeln!(f, "(empty)")?;
                } else {
                    let shown = DEBUG_MAX_ENTRIES.min(range.len());

                    for idx in range.start..range.start + shown {
                        write!(f, "({}, {:?}) ", self.columns[idx], self.values[idx])?;
                    }

                    if range.len() > shown {
                        write!(f, "... ({} more)", range.len() - shown)?;
                    }

                    writeln!(f)?;
                }
            }

            if nrows > max_rows_to_print {
                writeln!(f, "    ... ({} more rows)", nrows - max_rows_to_print)?;
            }
        }

        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn symmetric_fixture() -> CsrMatrix<f64> {
        // [2 0 0 0 0]
        // [0 1 0 5 0]
        // [0 0 3 0 0]
        // [0 5 0 6 0]
        // [0 0 0 0 7]
        CsrMatrix::new(
            5,
            5,
            vec![0, 1, 3, 4, 6, 7],
            vec![0, 1, 3, 2, 1, 3, 4],
            vec![2.0, 1.0, 5.0, 3.0, 5.0, 6.0, 7.0],
        )
    }

    fn rectangular_fixture() -> CsrMatrix<i32> {
        // [1 0 2]
        // [0 3 0]
        CsrMatrix::new(2, 3, vec![0, 2, 3], vec![0, 2, 1], vec![1, 2, 3])
    }

    #[test]
    fn test_new_matrix() {
        let matrix = rectangular_fixture();
        assert_eq!(matrix.nrows(), 2);
        assert_eq!(matrix.ncols(), 3);
        assert_eq!(matrix.nnz(), 3);
        assert!(!matrix.is_symmetry_set());
    }

    #[test]
    fn test_try_new_rejects_inconsistent_buffers() {
        assert!(CsrMatrix::<i32>::try_new(2, 2, vec![0, 1], vec![0], vec![1]).is_err());
        assert!(CsrMatrix::try_new(1, 2, vec![0, 1], vec![0], vec![1, 2]).is_err());
        assert!(CsrMatrix::try_new(1, 2, vec![0, 2], vec![0], vec![1]).is_err());
        assert!(CsrMatrix::try_new(1, 2, vec![0, 1], vec![2], vec![1]).is_err());
        assert!(CsrMatrix::try_new(2, 2, vec![0, 2, 1], vec![0], vec![1]).is_err());
        assert!(CsrMatrix::try_new(1, 2, vec![1, 1], vec![0], vec![1]).is_err());
    }

    #[test]
    #[should_panic(expected = "Invalid CSR matrix")]
    fn test_new_panics_on_bad_column() {
        CsrMatrix::new(1, 2, vec![0, 1], vec![5], vec![1.0]);
    }

    #[test]
    fn test_zeros_and_identity() {
        let zeros = CsrMatrix::<f64>::zeros(3, 4);
        assert_eq!(zeros.nnz(), 0);
        assert_eq!(zeros.offsets(), &[0, 0, 0, 0]);

        let identity = CsrMatrix::<f64>::identity(3);
        assert_eq!(identity.nnz(), 3);
        assert_eq!(identity.is_symmetric().unwrap(), true);
        assert_eq!(identity.is_structurally_symmetric().unwrap(), true);
        assert_eq!(identity.row_iter(1).collect::<Vec<_>>(), vec![(1, 1.0)]);
    }

    #[test]
    fn test_from_triplets_keeps_row_order() {
        let matrix = CsrMatrix::from_triplets(
            3,
            3,
            &[(2, 0, 1.0), (0, 2, 2.0), (2, 2, 3.0), (0, 1, 4.0)],
        )
        .unwrap();
        assert_eq!(matrix.offsets(), &[0, 2, 2, 4]);
        assert_eq!(matrix.columns(), &[2, 1, 0, 2]);
        assert_eq!(matrix.values(), &[2.0, 4.0, 1.0, 3.0]);

        assert!(CsrMatrix::from_triplets(2, 2, &[(0, 2, 1.0)]).is_err());
    }

    #[test]
    fn test_with_capacity_then_update_nnz() {
        let mut matrix = CsrMatrix::<i64>::with_capacity(2, 2, 4).unwrap();
        matrix.offsets_mut().copy_from_slice(&[0, 1, 3]);
        matrix.columns_mut()[..3].copy_from_slice(&[1, 0, 1]);
        matrix.values_mut()[..3].copy_from_slice(&[7, 7, 9]);
        matrix.update_nnz().unwrap();

        assert_eq!(matrix.nnz(), 3);
        assert_eq!(matrix.columns(), &[1, 0, 1]);
        assert!(matrix.compute_symmetry(Progress::none()).unwrap());
    }

    #[test]
    fn test_update_nnz_rejects_overflowing_offsets() {
        let mut matrix = CsrMatrix::<i64>::with_capacity(1, 2, 1).unwrap();
        matrix.offsets_mut()[1] = 2;
        assert!(matrix.update_nnz().is_err());
    }

    #[test]
    fn test_symmetric_fixture() {
        let mut matrix = symmetric_fixture();
        assert!(matrix.is_symmetric().is_err());
        assert!(matrix.compute_symmetry(Progress::none()).unwrap());
        assert!(matrix.is_symmetric().unwrap());
        assert!(matrix.is_structurally_symmetric().unwrap());
    }

    #[test]
    fn test_symmetry_value_mismatch() {
        // same pattern, mirrored value off by 10%
        let mut matrix = CsrMatrix::new(2, 2, vec![0, 1, 2], vec![1, 0], vec![1.0, 1.1]);
        assert!(!matrix.compute_symmetry(Progress::none()).unwrap());
        assert!(matrix.is_structurally_symmetric().is_err());
        assert!(matrix.compute_structural_symmetry(Progress::none()).unwrap());

        assert!(matrix
            .compute_symmetry_with(&Tolerance::relative(0.2), Progress::none())
            .unwrap());
    }

    #[test]
    fn test_symmetry_missing_partner() {
        let mut matrix = CsrMatrix::new(2, 2, vec![0, 1, 1], vec![1], vec![1.0]);
        assert!(!matrix.compute_symmetry(Progress::none()).unwrap());
        assert!(!matrix.is_structurally_symmetric().unwrap());
    }

    #[test]
    fn test_non_square_is_asymmetric() {
        let mut matrix = rectangular_fixture();
        assert!(!matrix.compute_symmetry(Progress::none()).unwrap());
        assert!(matrix.set_symmetry(true).is_err());
    }

    #[test]
    fn test_transpose_rectangular() {
        let mut matrix = rectangular_fixture();
        matrix.transpose(Progress::none()).unwrap();

        // [1 0]
        // [0 3]
        // [2 0]
        assert_eq!((matrix.nrows(), matrix.ncols()), (3, 2));
        assert_eq!(matrix.offsets(), &[0, 1, 2, 3]);
        assert_eq!(matrix.columns(), &[0, 1, 0]);
        assert_eq!(matrix.values(), &[1, 3, 2]);
    }

    #[test]
    fn test_transpose_degenerate_shape() {
        let mut matrix = CsrMatrix::<f32>::zeros(0, 4);
        matrix.transpose(Progress::none()).unwrap();
        assert_eq!((matrix.nrows(), matrix.ncols()), (4, 0));
        assert_eq!(matrix.offsets(), &[0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_transpose_skips_symmetric() {
        let mut matrix = symmetric_fixture();
        matrix.compute_symmetry(Progress::none()).unwrap();
        let before = matrix.columns().to_vec();
        matrix.transpose(Progress::none()).unwrap();
        assert_eq!(matrix.columns(), &before[..]);
        assert!(matrix.is_symmetric().unwrap());
    }

    #[test]
    fn test_transpose_invalidates_stats() {
        let mut matrix = rectangular_fixture();
        matrix.compute_stats(Progress::none()).unwrap();
        assert!(matrix.is_stats_set());
        matrix.transpose(Progress::none()).unwrap();
        assert!(matrix.stats().is_err());
    }

    #[test]
    fn test_reorder_rows_only() {
        let mut matrix = CsrMatrix::new(
            5,
            4,
            vec![0, 1, 3, 3, 5, 6],
            vec![1, 0, 3, 0, 1, 2],
            vec![1, 2, 3, 4, 5, 6],
        );
        matrix
            .reorder(Some(&[2, 0, 4, 1, 3]), None, Progress::none())
            .unwrap();
        assert_eq!(matrix.offsets(), &[0, 0, 1, 2, 4, 6]);
        assert_eq!(matrix.columns(), &[1, 2, 0, 3, 0, 1]);
        assert_eq!(matrix.values(), &[1, 6, 2, 3, 4, 5]);
    }

    #[test]
    fn test_reorder_both_axes() {
        let mut matrix = CsrMatrix::new(
            5,
            4,
            vec![0, 1, 3, 3, 5, 6],
            vec![1, 0, 3, 0, 1, 2],
            vec![1, 2, 3, 4, 5, 6],
        );
        matrix
            .reorder(Some(&[2, 0, 4, 1, 3]), Some(&[2, 3, 0, 1]), Progress::none())
            .unwrap();
        assert_eq!(matrix.offsets(), &[0, 0, 1, 2, 4, 6]);
        assert_eq!(matrix.columns(), &[3, 0, 2, 1, 2, 3]);
        assert_eq!(matrix.values(), &[1, 6, 2, 3, 4, 5]);
    }

    #[test]
    fn test_reorder_columns_only() {
        let mut matrix = rectangular_fixture();
        matrix.reorder(None, Some(&[2, 0, 1]), Progress::none()).unwrap();

        // [2 1 0]
        // [0 0 3]
        assert_eq!(matrix.offsets(), &[0, 2, 3]);
        assert_eq!(matrix.columns(), &[1, 0, 2]);
        assert_eq!(matrix.values(), &[1, 2, 3]);
    }

    #[test]
    fn test_reorder_validates_before_mutating() {
        let mut matrix = rectangular_fixture();
        let before = matrix.clone();
        assert!(matrix.reorder(Some(&[0, 0]), None, Progress::none()).is_err());
        assert!(matrix.reorder(None, Some(&[0, 1]), Progress::none()).is_err());
        assert!(matrix == before);
    }

    #[test]
    fn test_symmetric_reorder_keeps_symmetry() {
        let mut matrix = symmetric_fixture();
        matrix.compute_symmetry(Progress::none()).unwrap();
        let perm = [4, 2, 0, 3, 1];
        matrix.reorder(Some(&perm), Some(&perm), Progress::none()).unwrap();
        assert!(matrix.is_symmetric().unwrap());

        let mut check = matrix.clone();
        check.meta_mut().unset_symmetry();
        assert!(check.compute_symmetry(Progress::none()).unwrap());

        matrix.reorder(Some(&perm), None, Progress::none()).unwrap();
        assert!(matrix.is_symmetric().is_err());
    }

    #[test]
    fn test_reduce_rows_and_columns() {
        let mut matrix = symmetric_fixture();
        matrix
            .reduce(Some(&[1, 3]), Some(&[1, 3, 4]), Progress::none())
            .unwrap();

        // [1 5 0]
        // [5 6 0]
        assert_eq!((matrix.nrows(), matrix.ncols()), (2, 3));
        assert_eq!(matrix.offsets(), &[0, 2, 4]);
        assert_eq!(matrix.columns(), &[0, 1, 0, 1]);
        assert_eq!(matrix.values(), &[1.0, 5.0, 5.0, 6.0]);
        assert_eq!(matrix.nnz(), 4);
    }

    #[test]
    fn test_reduce_columns_only_drops_entries() {
        let mut matrix = rectangular_fixture();
        matrix.reduce(None, Some(&[1, 2]), Progress::none()).unwrap();

        // [0 2]
        // [3 0]
        assert_eq!(matrix.offsets(), &[0, 1, 2]);
        assert_eq!(matrix.columns(), &[1, 0]);
        assert_eq!(matrix.values(), &[2, 3]);
    }

    #[test]
    fn test_reduce_to_nothing() {
        let mut matrix = rectangular_fixture();
        matrix.reduce(Some(&[]), None, Progress::none()).unwrap();
        assert_eq!((matrix.nrows(), matrix.ncols()), (0, 3));
        assert_eq!(matrix.offsets(), &[0]);
        assert_eq!(matrix.nnz(), 0);
    }

    #[test]
    fn test_reduce_rejects_bad_selection() {
        let mut matrix = rectangular_fixture();
        let before = matrix.clone();
        assert!(matrix.reduce(Some(&[1, 0]), None, Progress::none()).is_err());
        assert!(matrix.reduce(Some(&[0, 2]), None, Progress::none()).is_err());
        assert!(matrix.reduce(None, Some(&[3]), Progress::none()).is_err());
        assert!(matrix == before);
    }

    #[test]
    fn test_principal_reduce_keeps_symmetry() {
        let mut matrix = symmetric_fixture();
        matrix.compute_symmetry(Progress::none()).unwrap();
        let keep = [1, 3, 4];
        matrix.reduce(Some(&keep), Some(&keep), Progress::none()).unwrap();
        assert!(matrix.is_symmetric().unwrap());
        assert!(matrix.is_structurally_symmetric().unwrap());
    }

    #[test]
    fn test_stats() {
        let mut matrix = CsrMatrix::new(
            5,
            4,
            vec![0, 1, 3, 3, 5, 6],
            vec![1, 0, 3, 0, 1, 2],
            vec![1, 2, 3, 4, 5, 6],
        );
        assert!(matrix.stats().is_err());
        let stats = matrix.compute_stats(Progress::none()).unwrap();
        assert_eq!(stats.max_row_size, 2);
        assert_eq!(stats.max_column_size, 2);
        assert_eq!(stats.num_empty_rows, 1);
        assert_eq!(stats.num_empty_columns, 0);
        assert!(matrix.is_symmetry_set());
        assert_eq!(matrix.stats().unwrap(), stats);
    }

    #[test]
    fn test_stats_of_empty_axis() {
        let mut matrix = CsrMatrix::<f64>::zeros(3, 0);
        let stats = matrix.compute_stats(Progress::none()).unwrap();
        assert_eq!(stats.num_empty_rows, 3);
        assert_eq!(stats.num_empty_columns, 0);
        assert_eq!(stats.max_row_size, 0);
    }

    #[test]
    fn test_nonzero_counts() {
        let matrix = rectangular_fixture();
        assert_eq!(matrix.nonzero_counts(Direction::Row).unwrap(), vec![2, 1]);
        assert_eq!(matrix.nonzero_counts(Direction::Column).unwrap(), vec![1, 1, 1]);
    }

    #[test]
    fn test_sort_rows() {
        let mut matrix = CsrMatrix::new(2, 3, vec![0, 3, 4], vec![2, 0, 1, 1], vec![3, 1, 2, 4]);
        matrix.sort_rows().unwrap();
        assert_eq!(matrix.columns(), &[0, 1, 2, 1]);
        assert_eq!(matrix.values(), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_triplets() {
        let matrix = rectangular_fixture();
        assert_eq!(matrix.triplets(), vec![(0, 0, 1), (0, 2, 2), (1, 1, 3)]);
    }

    #[test]
    fn test_progress_is_fully_reported() {
        let mut total = 0.0;
        {
            let mut sink = |d: f64| total += d;
            let mut progress = Progress::with_scale(&mut sink, 2.0);
            let mut matrix = symmetric_fixture();
            matrix.transpose(progress.split(0.5)).unwrap();
            matrix.compute_symmetry(progress.split(0.5)).unwrap();
        }
        assert_relative_eq!(total, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_debug_output() {
        let matrix = symmetric_fixture();
        let text = format!("{:?}", matrix);
        assert!(text.contains("CsrMatrix"));
        assert!(text.contains("dimensions: 5 × 5"));
        assert!(text.contains("nnz: 7"));
        assert!(text.contains("row 0: (0, 2.0)"));
    }
}
