//! # Matrix Inspector: structural transformations of sparse and dense matrices
//!
//! This library restructures large matrices (equivalently, graphs given by an
//! adjacency matrix) in place: it transposes them, permutes their rows and
//! columns, extracts sub-matrices and analyzes symmetry and density.
//!
//! ## Overview
//!
//! - **Representations**: [`CsrMatrix`] (compressed sparse rows) and
//!   [`DenseMatrix`] (row-major), both behind the [`Matrix`] trait. [`AnyMatrix`]
//!   picks between them at runtime.
//! - **Cached properties**: symmetry and degree statistics are computed on
//!   demand, cached, and reset by every operation that changes the structure.
//! - **Orchestration**: [`reordering`] derives permutations (random, by density,
//!   by arbitrary keys) and [`sampling`] derives sub-matrix selections (random,
//!   by degree threshold).
//! - **Progress**: every operation reports into a [`Progress`] handle whose
//!   reports are additive, monotonic and bounded, so nested calls compose into
//!   one completion fraction that another thread can poll.
//!
//! ## Usage
//!
//! ```
//! use matrix_inspector::{reordering, seeded_rng, CsrMatrix, Matrix, Progress, SharedProgress};
//!
//! // [2 1 0]
//! // [1 0 0]
//! // [0 0 3]
//! let mut matrix = CsrMatrix::new(3, 3, vec![0, 2, 3, 4], vec![0, 1, 0, 2], vec![2.0, 1.0, 1.0, 3.0]);
//! assert!(matrix.compute_symmetry(Progress::none()).unwrap());
//!
//! let shared = SharedProgress::new();
//! let mut sink = shared.clone();
//! let mut rng = seeded_rng(42);
//! reordering::random(&mut matrix, true, true, true, &mut rng, Progress::new(&mut sink)).unwrap();
//!
//! assert!(matrix.is_symmetric().unwrap());
//! assert!((shared.get() - 1.0).abs() < 1e-12);
//! ```

pub mod constants;
pub mod error;
pub mod matrix;
pub mod progress;
pub mod reordering;
pub mod sampling;
pub mod stats;
pub mod utils;

// Re-export primary components
pub use error::{Error, Result};
pub use matrix::{
    AnyMatrix, CsrMatrix, DenseMatrix, Direction, Format, KeySortMethod, Matrix, MatrixMeta,
    MatrixStats, Scalar, SparseMatrix, Symmetry, Tolerance,
};
pub use progress::{Progress, ProgressSink, SharedProgress, Ticker};
pub use utils::{from_sprs, seeded_rng, to_sprs_csr};

/// Version information for the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
