//! Utilities for converting between our matrix formats and external libraries
//!
//! This is in-memory interop only; no file format is read or written here.

use sprs::CsMat;

use crate::error::{Error, Result};
use crate::matrix::{CsrMatrix, Matrix, Scalar};

/// Converts our CSR matrix to sprs CsMat format
///
/// sprs requires every row to be sorted by column without repeats, so rows
/// are sorted in a copy and duplicate entries are rejected.
pub fn to_sprs_csr<T>(matrix: &CsrMatrix<T>) -> Result<CsMat<T>>
where
    T: Scalar + Default,
{
    let mut sorted = matrix.clone();
    sorted.sort_rows()?;

    for row in 0..sorted.nrows() {
        let range = sorted.offsets()[row]..sorted.offsets()[row + 1];
        if let Some(pair) = sorted.columns()[range].windows(2).find(|w| w[0] == w[1]) {
            return Err(Error::precondition(format!(
                "row {} holds column {} more than once",
                row, pair[0]
            )));
        }
    }

    Ok(CsMat::new(
        (sorted.nrows(), sorted.ncols()),
        sorted.offsets().to_vec(),
        sorted.columns().to_vec(),
        sorted.values().to_vec(),
    ))
}

/// Converts a sprs CsMat, in either storage order, to our CSR format
pub fn from_sprs<T>(matrix: CsMat<T>) -> Result<CsrMatrix<T>>
where
    T: Scalar + Default,
{
    // Ensure matrix is in CSR format
    let matrix = if matrix.is_csr() {
        matrix
    } else {
        matrix.to_csr()
    };

    let (nrows, ncols) = matrix.shape();
    let (indptr, indices, data) = matrix.into_raw_storage();

    CsrMatrix::try_new(nrows, ncols, indptr, indices, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprs::TriMat;

    #[test]
    fn test_round_trip_through_sprs() {
        // [0 2 1]
        // [3 0 0]
        let ours = CsrMatrix::new(2, 3, vec![0, 2, 3], vec![2, 1, 0], vec![1.0, 2.0, 3.0]);
        let theirs = to_sprs_csr(&ours).unwrap();
        assert_eq!(theirs.nnz(), 3);
        assert_eq!(theirs.get(0, 1), Some(&2.0));
        assert_eq!(theirs.get(0, 2), Some(&1.0));
        assert_eq!(theirs.get(1, 0), Some(&3.0));

        let back = from_sprs(theirs).unwrap();
        assert_eq!(back.offsets(), &[0, 2, 3]);
        assert_eq!(back.columns(), &[1, 2, 0]);
        assert_eq!(back.values(), &[2.0, 1.0, 3.0]);
    }

    #[test]
    fn test_from_sprs_csc() {
        let mut trip = TriMat::new((2, 2));
        trip.add_triplet(0, 1, 4i64);
        trip.add_triplet(1, 0, 5i64);
        let csc: CsMat<i64> = trip.to_csc();

        let ours = from_sprs(csc).unwrap();
        assert_eq!(ours.triplets(), vec![(0, 1, 4), (1, 0, 5)]);
    }

    #[test]
    fn test_duplicates_are_rejected() {
        let ours = CsrMatrix::new(1, 2, vec![0, 2], vec![1, 1], vec![1.0, 2.0]);
        assert!(to_sprs_csr(&ours).is_err());
    }
}
