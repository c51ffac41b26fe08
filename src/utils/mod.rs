//! Utility functions and helpers

pub mod formats;
pub mod prefix_sum;
pub mod random;
pub mod sort;

pub use formats::{from_sprs, to_sprs_csr};
pub use prefix_sum::{exclusive, inclusive};
pub use random::{permutation, sample, seeded_rng};
pub use sort::{key_value, permutation_from_keys, select_method, SortKey};

use crate::error::{Error, Result};

/// Allocates a vector of `len` copies of `value`, reporting allocation failure
pub(crate) fn try_filled<T: Clone>(len: usize, value: T) -> Result<Vec<T>> {
    let mut result = try_with_capacity(len)?;
    result.resize(len, value);
    Ok(result)
}

/// Allocates an empty vector able to hold `len` elements without reallocating
pub(crate) fn try_with_capacity<T>(len: usize) -> Result<Vec<T>> {
    let mut result = Vec::new();
    result
        .try_reserve_exact(len)
        .map_err(|source| Error::Allocation {
            requested: len,
            source,
        })?;
    Ok(result)
}

/// Fills a new vector with `0, 1, ..., len - 1`
pub fn identity_permutation(len: usize) -> Result<Vec<usize>> {
    let mut result = try_with_capacity(len)?;
    result.extend(0..len);
    Ok(result)
}

/// Inverts a permutation given as `perm[new] = old` into `inverse[old] = new`
///
/// Entries are assumed to be in range; duplicate sources leave the
/// corresponding slots of the inverse at zero.
pub fn invert_permutation(perm: &[usize]) -> Result<Vec<usize>> {
    let mut inverse = try_filled(perm.len(), 0)?;
    for (new, &old) in perm.iter().enumerate() {
        inverse[old] = new;
    }
    Ok(inverse)
}

/// Fails unless every index is smaller than `bound`
pub(crate) fn check_indices(what: &str, indices: &[usize], bound: usize) -> Result<()> {
    if let Some(&bad) = indices.iter().find(|&&idx| idx >= bound) {
        return Err(Error::precondition(format!(
            "{} contains index {} but the axis has length {}",
            what, bad, bound
        )));
    }
    Ok(())
}
