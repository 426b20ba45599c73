//! `sm-matrix` - Square matrices and Strassen multiplication for strassen-mm.
//!
//! This crate provides:
//! - A `Matrix` type with owned, row-major storage and resizing copies
//! - Element types (`f16`, `f32`, `f64`, `i32`, `i64`) behind the `Element` trait
//! - The cache-friendly i-k-j base kernel
//! - Strassen's recursion with zero-padding to a power of two
//! - A `Multiplier` trait with naive and Strassen implementations
//! - A plain-text reader/writer for matrix pairs

pub mod backend;
pub mod dtype;
pub mod error;
pub mod kernel;
pub mod matrix;
pub mod strassen;
pub mod text;

// Re-export primary types at the crate root for convenience.
pub use backend::{Multiplier, NaiveMultiplier, StrassenMultiplier};
pub use dtype::{DType, Element};
pub use error::{MatrixError, Result};
pub use matrix::Matrix;
pub use strassen::{strassen, LeafSize};
