//! Configuration for comparisons and algorithm selection

use num_traits::ToPrimitive;

use crate::constants::{DEFAULT_ABSOLUTE_TOLERANCE, DEFAULT_RELATIVE_TOLERANCE};

/// Tolerance used when deciding whether two mirrored values are equal
///
/// Two values `a` and `b` match when `|a - b| <= max(absolute, |a| * relative)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    /// Tolerance relative to the magnitude of the first value
    pub relative: f64,

    /// Absolute floor, so values near zero are not held to a zero tolerance
    pub absolute: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            relative: DEFAULT_RELATIVE_TOLERANCE,
            absolute: DEFAULT_ABSOLUTE_TOLERANCE,
        }
    }
}

impl Tolerance {
    /// Exact equality
    pub fn exact() -> Self {
        Self {
            relative: 0.0,
            absolute: 0.0,
        }
    }

    /// Purely relative tolerance with the default absolute floor
    pub fn relative(relative: f64) -> Self {
        Self {
            relative,
            ..Self::default()
        }
    }

    /// Whether `b` is within tolerance of `a`
    pub fn matches<T>(&self, a: T, b: T) -> bool
    where
        T: PartialEq + ToPrimitive,
    {
        if a == b {
            return true;
        }
        match (a.to_f64(), b.to_f64()) {
            (Some(a), Some(b)) => {
                let tolerance = self.absolute.max(a.abs() * self.relative);
                (a - b).abs() <= tolerance
            }
            _ => false,
        }
    }
}

/// Algorithm used by the key/value sort
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySortMethod {
    /// Histogram, prefix sum and scatter over the key range
    Counting,
    /// Stable comparison sort over (key, value) pairs
    Comparison,
}
