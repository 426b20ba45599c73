use crate::dtype::Element;
use crate::matrix::Matrix;

/// The four `h x h` blocks of an `n x n` matrix, `h = n / 2`.
///
/// `q11` is the top-left block, `q12` top-right, `q21` bottom-left and
/// `q22` bottom-right.
#[derive(Debug, Clone, PartialEq)]
pub struct Quadrants<T: Element> {
    pub q11: Matrix<T>,
    pub q12: Matrix<T>,
    pub q21: Matrix<T>,
    pub q22: Matrix<T>,
}

/// Copy the four quadrants of `m` into independent matrices.
///
/// `m.dim()` must be even.
pub fn split<T: Element>(m: &Matrix<T>) -> Quadrants<T> {
    let n = m.dim();
    debug_assert_eq!(n % 2, 0, "cannot split odd dimension {}", n);
    let h = n / 2;
    let src = m.as_slice();

    let mut q = Quadrants {
        q11: Matrix::zeros(h),
        q12: Matrix::zeros(h),
        q21: Matrix::zeros(h),
        q22: Matrix::zeros(h),
    };
    for i in 0..h {
        let top = i * n;
        let bottom = (i + h) * n;
        let dst = i * h..(i + 1) * h;
        q.q11.as_mut_slice()[dst.clone()].copy_from_slice(&src[top..top + h]);
        q.q12.as_mut_slice()[dst.clone()].copy_from_slice(&src[top + h..top + n]);
        q.q21.as_mut_slice()[dst.clone()].copy_from_slice(&src[bottom..bottom + h]);
        q.q22.as_mut_slice()[dst].copy_from_slice(&src[bottom + h..bottom + n]);
    }
    q
}

/// Assemble four `h x h` blocks into one `2h x 2h` matrix.
pub fn merge<T: Element>(q: &Quadrants<T>) -> Matrix<T> {
    let h = q.q11.dim();
    debug_assert!(q.q12.dim() == h && q.q21.dim() == h && q.q22.dim() == h);
    let n = 2 * h;

    let mut out = Matrix::zeros(n);
    let dst = out.as_mut_slice();
    for i in 0..h {
        let top = i * n;
        let bottom = (i + h) * n;
        dst[top..top + h].copy_from_slice(q.q11.row(i));
        dst[top + h..top + n].copy_from_slice(q.q12.row(i));
        dst[bottom..bottom + h].copy_from_slice(q.q21.row(i));
        dst[bottom + h..bottom + n].copy_from_slice(q.q22.row(i));
    }
    out
}
