//! In-place prefix sums used to turn per-bucket counts into write offsets

use std::ops::Add;

use num_traits::Zero;

/// Computes an exclusive prefix sum (scan) in place
///
/// After the call `buffer[i]` holds the sum of the original
/// `buffer[0..i]`. Returns the total of all original entries.
///
/// ```
/// use matrix_inspector::utils::prefix_sum;
///
/// let mut counts = vec![1, 2, 3, 4];
/// let total = prefix_sum::exclusive(&mut counts);
/// assert_eq!(counts, vec![0, 1, 3, 6]);
/// assert_eq!(total, 10);
/// ```
pub fn exclusive<T>(buffer: &mut [T]) -> T
where
    T: Copy + Zero + Add<Output = T>,
{
    let mut sum = T::zero();
    for slot in buffer.iter_mut() {
        let count = *slot;
        *slot = sum;
        sum = sum + count;
    }
    sum
}

/// Computes an inclusive prefix sum (scan) in place
///
/// After the call `buffer[i]` holds the sum of the original `buffer[0..=i]`.
pub fn inclusive<T>(buffer: &mut [T])
where
    T: Copy + Add<Output = T>,
{
    for i in 1..buffer.len() {
        buffer[i] = buffer[i] + buffer[i - 1];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exclusive_scan() {
        let mut input = vec![1, 2, 3, 4];
        assert_eq!(exclusive(&mut input), 10);
        assert_eq!(input, vec![0, 1, 3, 6]);

        let mut input = vec![0, 0, 5, 0];
        assert_eq!(exclusive(&mut input), 5);
        assert_eq!(input, vec![0, 0, 0, 5]);
    }

    #[test]
    fn test_inclusive_scan() {
        let mut input = vec![1, 2, 3, 4];
        inclusive(&mut input);
        assert_eq!(input, vec![1, 3, 6, 10]);

        let mut input = vec![2.5f64, 0.5];
        inclusive(&mut input);
        assert_eq!(input, vec![2.5, 3.0]);
    }

    #[test]
    fn test_empty_buffers() {
        let mut empty: Vec<usize> = Vec::new();
        assert_eq!(exclusive(&mut empty), 0);
        inclusive(&mut empty);
        assert!(empty.is_empty());
    }
}
