use approx::assert_relative_eq;
use ndarray::array;
use sprs::TriMat;

use matrix_inspector::{from_sprs, to_sprs_csr, CsrMatrix, DenseMatrix, Matrix, SparseMatrix};

#[test]
fn test_sprs_round_trip() {
    // Create a matrix using sprs
    let mut trip = TriMat::new((3, 4));
    trip.add_triplet(0, 0, 1.0);
    trip.add_triplet(0, 3, 2.0);
    trip.add_triplet(1, 1, 3.0);
    trip.add_triplet(2, 0, 4.0);
    trip.add_triplet(2, 2, 5.0);
    let sprs_mat = trip.to_csr();

    let ours: CsrMatrix<f64> = from_sprs(sprs_mat.clone()).unwrap();
    assert_eq!((ours.nrows(), ours.ncols()), (3, 4));
    assert_eq!(ours.nnz(), 5);
    assert_eq!(ours.offsets(), &[0, 2, 3, 5]);

    let back = to_sprs_csr(&ours).unwrap();
    assert_eq!(back, sprs_mat);
}

#[test]
fn test_to_sprs_sorts_rows() {
    let ours = CsrMatrix::new(1, 3, vec![0, 3], vec![2, 0, 1], vec![3.0, 1.0, 2.0]);
    let theirs = to_sprs_csr(&ours).unwrap();
    let row: Vec<_> = theirs
        .outer_view(0)
        .map(|view| view.iter().map(|(c, &v)| (c, v)).collect())
        .unwrap_or_default();
    assert_eq!(row, vec![(0, 1.0), (1, 2.0), (2, 3.0)]);
}

#[test]
fn test_dense_csr_round_trip() {
    let dense = DenseMatrix::from_array(&array![[0.0, 1.5, 0.0], [2.5, 0.0, 0.0]]).unwrap();
    let csr = dense.to_csr().unwrap();
    assert_eq!(csr.nnz(), 2);
    assert_eq!(csr.triplets(), vec![(0, 1, 1.5), (1, 0, 2.5)]);

    let again = csr.to_dense().unwrap();
    for (a, b) in again.values().iter().zip(dense.values()) {
        assert_relative_eq!(a, b);
    }
    assert_eq!(again.to_array().unwrap(), array![[0.0, 1.5, 0.0], [2.5, 0.0, 0.0]]);
}
