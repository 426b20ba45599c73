use std::fmt;

use crate::error::{MatrixError, Result};

/// Matrix size at or below which the recursion switches to the dense kernel.
///
/// Always a power of two, so halving a power-of-two dimension lands exactly
/// on the leaf size and never produces an odd intermediate dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LeafSize(usize);

impl LeafSize {
    pub const DEFAULT: LeafSize = LeafSize(64);

    /// Validate a leaf size.
    ///
    /// # Errors
    /// Returns [`MatrixError::InvalidLeafSize`] unless `size` is a power of
    /// two (1 included, which gives the pure Strassen recursion).
    pub fn new(size: usize) -> Result<Self> {
        if size.is_power_of_two() {
            Ok(LeafSize(size))
        } else {
            Err(MatrixError::InvalidLeafSize(size))
        }
    }

    /// Validate a leaf size, substituting [`LeafSize::DEFAULT`] with a
    /// warning when it is rejected.
    pub fn new_or_default(size: usize) -> Self {
        match Self::new(size) {
            Ok(leaf) => leaf,
            Err(e) => {
                log::warn!("{}; using default leaf size {}", e, Self::DEFAULT);
                Self::DEFAULT
            }
        }
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

impl Default for LeafSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for LeafSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Smallest power of two `>= n`. `n` must be positive; `1` maps to `1`.
pub fn next_power_of_two(n: usize) -> usize {
    debug_assert!(n > 0, "matrix dimension must be positive");
    n.next_power_of_two()
}
