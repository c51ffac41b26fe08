//! Random permutations and subsets driven by a caller-owned generator

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::{Error, Result};
use crate::utils::identity_permutation;

/// Reproducible generator for a given seed
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Uniformly random permutation of `0..len`
pub fn permutation<R: Rng + ?Sized>(rng: &mut R, len: usize) -> Result<Vec<usize>> {
    let mut perm = identity_permutation(len)?;
    perm.shuffle(rng);
    Ok(perm)
}

/// Moves a uniformly random subset of `sample_len` elements to the front of `set`
///
/// Partial Fisher-Yates: position `i` swaps with a random position in
/// `i..set.len()`. The tail of `set` holds the unselected elements.
pub fn sample<R, T>(rng: &mut R, set: &mut [T], sample_len: usize) -> Result<()>
where
    R: Rng + ?Sized,
{
    let len = set.len();
    if sample_len > len {
        return Err(Error::precondition(format!(
            "cannot sample {} elements from a set of {}",
            sample_len, len
        )));
    }
    for i in 0..sample_len {
        let j = rng.random_range(i..len);
        set.swap(i, j);
    }
    Ok(())
}
