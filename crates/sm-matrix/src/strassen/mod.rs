//! Strassen's divide-and-conquer multiply.
//!
//! [`strassen`] pads both operands to the next power of two, runs
//! [`strassen_recursive`] and crops the product back. Each recursive step
//! splits A and B into quadrants, forms seven half-size products instead of
//! eight, and combines them into the four quadrants of the result, for
//! O(n^2.807) element operations overall. Below the [`LeafSize`] the dense
//! i-k-j kernel takes over.

pub mod leaf;
pub mod quadrant;

pub use leaf::{next_power_of_two, LeafSize};
pub use quadrant::{merge, split, Quadrants};

use crate::dtype::Element;
use crate::matrix::Matrix;

/// Multiply two `n x n` matrices with Strassen's algorithm.
///
/// Any positive `n` is accepted: operands are zero-padded to a power of two
/// and the result is cropped back to `n x n`, so the padding is invisible to
/// the caller. Both operands must have dimension `n`.
pub fn strassen<T: Element>(a: &Matrix<T>, b: &Matrix<T>, n: usize, leaf: LeafSize) -> Matrix<T> {
    debug_assert_eq!(a.dim(), n);
    debug_assert_eq!(b.dim(), n);

    let m = next_power_of_two(n);
    log::debug!(
        "strassen: n={} padded={} leaf={} dtype={}",
        n,
        m,
        leaf,
        T::DTYPE
    );

    if m == n {
        return strassen_recursive(a, b, leaf);
    }
    let a_padded = Matrix::resized_from(m, a);
    let b_padded = Matrix::resized_from(m, b);
    let c_padded = strassen_recursive(&a_padded, &b_padded, leaf);
    Matrix::resized_from(n, &c_padded)
}

/// The recursion proper. Operands share one dimension.
///
/// Sizes at or below the leaf size go to the dense kernel. An odd size also
/// ends the recursion, since it cannot be split into equal quadrants; with a
/// power-of-two dimension and a [`LeafSize`] this only happens at size 1.
pub fn strassen_recursive<T: Element>(a: &Matrix<T>, b: &Matrix<T>, leaf: LeafSize) -> Matrix<T> {
    let size = a.dim();
    debug_assert_eq!(size, b.dim());
    if size <= leaf.get() || size % 2 != 0 {
        return a.multiply(b);
    }
    log::trace!("strassen: splitting {}x{}", size, size);

    let Quadrants {
        q11: a11,
        q12: a12,
        q21: a21,
        q22: a22,
    } = split(a);
    let Quadrants {
        q11: b11,
        q12: b12,
        q21: b21,
        q22: b22,
    } = split(b);

    let p1 = strassen_recursive(&(&a11 + &a22), &(&b11 + &b22), leaf);
    let p2 = strassen_recursive(&(&a21 + &a22), &b11, leaf);
    let p3 = strassen_recursive(&a11, &(&b12 - &b22), leaf);
    let p4 = strassen_recursive(&a22, &(&b21 - &b11), leaf);
    let p5 = strassen_recursive(&(&a11 + &a12), &b22, leaf);
    let p6 = strassen_recursive(&(&a21 - &a11), &(&b11 + &b12), leaf);
    let p7 = strassen_recursive(&(&a12 - &a22), &(&b21 + &b22), leaf);

    // c11 = p1 + p4 - p5 + p7
    let mut c11 = &p1 + &p4;
    c11 -= &p5;
    c11 += &p7;
    // c22 = p1 - p2 + p3 + p6
    let mut c22 = p1;
    c22 -= &p2;
    c22 += &p3;
    c22 += &p6;

    merge(&Quadrants {
        q11: c11,
        q12: &p3 + &p5,
        q21: &p2 + &p4,
        q22: c22,
    })
}
