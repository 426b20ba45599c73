use std::fmt::Debug;

use crate::dtype::Element;
use crate::error::{MatrixError, Result};
use crate::matrix::Matrix;
use crate::strassen::{strassen, LeafSize};

/// Trait for pluggable square-matrix multipliers.
///
/// This is the checked entry point: operand dimensions are validated here so
/// that the kernels behind it can assume their preconditions.
pub trait Multiplier<T: Element>: Send + Sync + Debug {
    /// Returns the name of this multiplier (e.g., "naive", "strassen").
    fn name(&self) -> &str;

    /// Matrix multiplication: C = A @ B.
    ///
    /// # Errors
    /// Returns an error if the operands differ in dimension or are empty.
    fn multiply(&self, a: &Matrix<T>, b: &Matrix<T>) -> Result<Matrix<T>>;
}

fn check_operands<T: Element>(a: &Matrix<T>, b: &Matrix<T>) -> Result<()> {
    if a.dim() != b.dim() {
        return Err(MatrixError::DimensionMismatch {
            a: a.dim(),
            b: b.dim(),
        });
    }
    if a.dim() == 0 {
        return Err(MatrixError::Empty);
    }
    Ok(())
}

/// Dense i-k-j multiply at every size.
#[derive(Debug, Clone, Default)]
pub struct NaiveMultiplier;

impl NaiveMultiplier {
    pub fn new() -> Self {
        NaiveMultiplier
    }
}

impl<T: Element> Multiplier<T> for NaiveMultiplier {
    fn name(&self) -> &str {
        "naive"
    }

    fn multiply(&self, a: &Matrix<T>, b: &Matrix<T>) -> Result<Matrix<T>> {
        check_operands(a, b)?;
        Ok(a.multiply(b))
    }
}

/// Strassen recursion with a configurable leaf size.
#[derive(Debug, Clone, Default)]
pub struct StrassenMultiplier {
    leaf: LeafSize,
}

impl StrassenMultiplier {
    pub fn new(leaf: LeafSize) -> Self {
        StrassenMultiplier { leaf }
    }

    pub fn leaf(&self) -> LeafSize {
        self.leaf
    }
}

impl<T: Element> Multiplier<T> for StrassenMultiplier {
    fn name(&self) -> &str {
        "strassen"
    }

    fn multiply(&self, a: &Matrix<T>, b: &Matrix<T>) -> Result<Matrix<T>> {
        check_operands(a, b)?;
        Ok(strassen(a, b, a.dim(), self.leaf))
    }
}
