//! Key/value sorting used to derive permutations from numeric keys
//!
//! [`key_value`] reorders a values array into the order induced by sorting a
//! parallel keys array. Integral keys whose range fits within the number of
//! keys go through a counting sort (histogram, exclusive prefix sum, scatter);
//! everything else goes through a comparison sort. Both paths are stable, so
//! equal keys keep the relative order of their values.

use std::cmp::Ordering;
use std::fmt::Debug;

use log::trace;

use crate::error::{check_len, Result};
use crate::matrix::config::KeySortMethod;
use crate::utils::{identity_permutation, prefix_sum, try_filled, try_with_capacity};

/// Numeric types usable as sort keys
pub trait SortKey: Copy + PartialOrd + Debug {
    /// Whether the key type is an integer type eligible for counting sort
    const INTEGRAL: bool;

    /// Widening conversion used for bucket arithmetic
    fn as_i128(self) -> i128;

    /// Total order between keys
    fn compare(&self, other: &Self) -> Ordering;
}

macro_rules! impl_integral_key {
    ($($t:ty),*) => {
        $(
            impl SortKey for $t {
                const INTEGRAL: bool = true;

                #[inline]
                fn as_i128(self) -> i128 {
                    self as i128
                }

                #[inline]
                fn compare(&self, other: &Self) -> Ordering {
                    self.cmp(other)
                }
            }
        )*
    };
}

macro_rules! impl_float_key {
    ($($t:ty),*) => {
        $(
            impl SortKey for $t {
                const INTEGRAL: bool = false;

                #[inline]
                fn as_i128(self) -> i128 {
                    self as i128
                }

                #[inline]
                fn compare(&self, other: &Self) -> Ordering {
                    self.total_cmp(other)
                }
            }
        )*
    };
}

impl_integral_key!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);
impl_float_key!(f32, f64);

/// Chooses the sorting algorithm [`key_value`] would use for `keys`
pub fn select_method<K: SortKey>(keys: &[K]) -> KeySortMethod {
    if !K::INTEGRAL {
        return KeySortMethod::Comparison;
    }
    match integral_range(keys) {
        Some((min, max)) if range_len(min, max) <= keys.len() as u128 => KeySortMethod::Counting,
        Some(_) => KeySortMethod::Comparison,
        None => KeySortMethod::Counting,
    }
}

/// Reorders `values` into the order induced by sorting `keys`
///
/// Returns the method that was used. Fails if the two slices differ in length.
///
/// ```
/// use matrix_inspector::utils::key_value;
///
/// let keys = [1, 2, 0, 2, 1];
/// let mut values = [0, 1, 2, 3, 4];
/// key_value(&keys, &mut values, true).unwrap();
/// assert_eq!(values, [2, 0, 4, 1, 3]);
/// ```
pub fn key_value<K, V>(keys: &[K], values: &mut [V], ascending: bool) -> Result<KeySortMethod>
where
    K: SortKey,
    V: Copy,
{
    check_len("values", values.len(), keys.len())?;

    let method = select_method(keys);
    trace!(
        "key_value: {} keys, ascending={}, method={:?}",
        keys.len(),
        ascending,
        method
    );

    if keys.is_empty() {
        return Ok(method);
    }

    match method {
        KeySortMethod::Counting => {
            // integral keys are never empty here, so the range exists
            if let Some((min, max)) = integral_range(keys) {
                counting_sort(keys, values, min, max, ascending)?;
            }
        }
        KeySortMethod::Comparison => comparison_sort(keys, values, ascending)?,
    }

    Ok(method)
}

/// Builds the permutation `perm[new] = old` that sorts `keys`
pub fn permutation_from_keys<K: SortKey>(keys: &[K], ascending: bool) -> Result<Vec<usize>> {
    let mut perm = identity_permutation(keys.len())?;
    key_value(keys, &mut perm, ascending)?;
    Ok(perm)
}

fn integral_range<K: SortKey>(keys: &[K]) -> Option<(i128, i128)> {
    let first = keys.first()?.as_i128();
    Some(keys.iter().skip(1).fold((first, first), |(min, max), &k| {
        let k = k.as_i128();
        (min.min(k), max.max(k))
    }))
}

#[inline]
fn range_len(min: i128, max: i128) -> u128 {
    (max - min) as u128 + 1
}

fn counting_sort<K, V>(keys: &[K], values: &mut [V], min: i128, max: i128, ascending: bool) -> Result<()>
where
    K: SortKey,
    V: Copy,
{
    // bounded by keys.len() by the method selection
    let range = range_len(min, max) as usize;
    let bucket = |key: K| -> usize {
        if ascending {
            (key.as_i128() - min) as usize
        } else {
            (max - key.as_i128()) as usize
        }
    };

    // one extra slot keeps the scan total addressable
    let mut starts = try_filled(range + 1, 0usize)?;
    for &key in keys {
        starts[bucket(key)] += 1;
    }
    prefix_sum::exclusive(&mut starts);

    let mut source = try_with_capacity(values.len())?;
    source.extend_from_slice(values);
    for (&key, &value) in keys.iter().zip(source.iter()) {
        let slot = &mut starts[bucket(key)];
        values[*slot] = value;
        *slot += 1;
    }
    Ok(())
}

fn comparison_sort<K, V>(keys: &[K], values: &mut [V], ascending: bool) -> Result<()>
where
    K: SortKey,
    V: Copy,
{
    let mut pairs: Vec<(K, V)> = try_with_capacity(keys.len())?;
    pairs.extend(keys.iter().copied().zip(values.iter().copied()));

    // sort_by is stable, matching the counting path
    if ascending {
        pairs.sort_by(|a, b| a.0.compare(&b.0));
    } else {
        pairs.sort_by(|a, b| b.0.compare(&a.0));
    }

    for (slot, (_, value)) in values.iter_mut().zip(pairs) {
        *slot = value;
    }
    Ok(())
}
