//! Dense triple-loop kernels over flat row-major `n x n` buffers.
//!
//! [`multiply_ikj`] is the base case of the Strassen recursion. Keeping the
//! row of A fixed and walking the contraction index in the middle loop means
//! the innermost loop streams through one row of B and one row of the output,
//! both contiguous. [`multiply_ijk`] is the textbook ordering, kept as a
//! reference for validation and benchmarks.

use crate::dtype::Element;

#[inline]
fn check_dims<T>(a: &[T], b: &[T], out: &[T], n: usize) {
    let len = n * n;
    debug_assert_eq!(a.len(), len);
    debug_assert_eq!(b.len(), len);
    debug_assert_eq!(out.len(), len);
}

/// Cache-friendly multiply (i-k-j order): `out = a * b`.
///
/// `out` is zeroed first, so its previous contents never leak into the
/// product. Integer elements accumulate with wrapping arithmetic.
pub fn multiply_ikj<T: Element>(a: &[T], b: &[T], out: &mut [T], n: usize) {
    check_dims(a, b, out, n);
    out.fill(T::zero());
    for i in 0..n {
        let row = i * n;
        let out_row = &mut out[row..row + n];
        for k in 0..n {
            let a_ik = a[row + k];
            let b_row = &b[k * n..k * n + n];
            for (c, &b_kj) in out_row.iter_mut().zip(b_row) {
                *c = c.wrapping_add(a_ik.wrapping_mul(b_kj));
            }
        }
    }
}

/// Naive multiply (i-j-k order): `out = a * b`.
pub fn multiply_ijk<T: Element>(a: &[T], b: &[T], out: &mut [T], n: usize) {
    check_dims(a, b, out, n);
    for i in 0..n {
        let a_row = i * n;
        for j in 0..n {
            let mut sum = T::zero();
            for k in 0..n {
                sum = sum.wrapping_add(a[a_row + k].wrapping_mul(b[k * n + j]));
            }
            out[a_row + j] = sum;
        }
    }
}
