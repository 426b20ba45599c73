use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use crate::dtype::{DType, Element};
use crate::error::{MatrixError, Result};
use crate::kernel;

/// A square `n x n` matrix with contiguous row-major storage.
///
/// Element `(row, col)` lives at flat index `row * n + col`, and the buffer
/// length is always exactly `n * n`. Each matrix owns its storage.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T: Element> {
    data: Vec<T>,
    n: usize,
}

impl<T: Element> Matrix<T> {
    /// Create a zero-filled `n x n` matrix.
    pub fn zeros(n: usize) -> Self {
        Self::filled(n, T::zero())
    }

    /// Create an `n x n` matrix with every element set to `value`.
    pub fn filled(n: usize, value: T) -> Self {
        Matrix {
            data: vec![value; n * n],
            n,
        }
    }

    /// Create the `n x n` identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n);
        for i in 0..n {
            m.set(i, i, T::one());
        }
        m
    }

    /// Create an `n x n` matrix from `source`, padding or cropping as needed.
    ///
    /// The top-left `min(n, source.dim())` square is copied and every other
    /// element is zero. With equal dimensions this is a plain copy.
    pub fn resized_from(n: usize, source: &Matrix<T>) -> Self {
        if n == source.n {
            return source.clone();
        }
        let mut m = Self::zeros(n);
        let overlap = n.min(source.n);
        for i in 0..overlap {
            m.data[i * n..i * n + overlap]
                .copy_from_slice(&source.data[i * source.n..i * source.n + overlap]);
        }
        m
    }

    /// Create a matrix from row-major data.
    ///
    /// # Errors
    /// Returns an error if `n * n` overflows `usize` or `data.len() != n * n`.
    pub fn from_vec(n: usize, data: Vec<T>) -> Result<Self> {
        let expected = n.checked_mul(n).ok_or(MatrixError::DimensionTooLarge(n))?;
        if data.len() != expected {
            return Err(MatrixError::LengthMismatch {
                n,
                expected,
                got: data.len(),
            });
        }
        Ok(Matrix { data, n })
    }

    /// Create a matrix from a list of rows, which must form a square.
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<Self> {
        let n = rows.len();
        let mut data = Vec::with_capacity(n * n);
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != n {
                return Err(MatrixError::NotSquare {
                    row,
                    len: values.len(),
                    expected: n,
                });
            }
            data.extend_from_slice(values);
        }
        Ok(Matrix { data, n })
    }

    /// The dimension `n` of this `n x n` matrix.
    pub fn dim(&self) -> usize {
        self.n
    }

    /// Runtime tag of the element type.
    pub fn dtype(&self) -> DType {
        T::DTYPE
    }

    /// Read element `(row, col)`.
    ///
    /// Bounds are the caller's responsibility: only debug builds check that
    /// `row` and `col` are below `dim()`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> T {
        debug_assert!(row < self.n && col < self.n);
        self.data[row * self.n + col]
    }

    /// Write element `(row, col)`. Same bounds contract as [`Matrix::get`].
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        debug_assert!(row < self.n && col < self.n);
        self.data[row * self.n + col] = value;
    }

    /// Row `i` as a slice.
    pub fn row(&self, i: usize) -> &[T] {
        &self.data[i * self.n..(i + 1) * self.n]
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Element-wise sum. Both matrices must have the same dimension.
    pub fn add(&self, other: &Matrix<T>) -> Matrix<T> {
        let mut out = self.clone();
        out.add_assign(other);
        out
    }

    /// Element-wise difference. Both matrices must have the same dimension.
    pub fn sub(&self, other: &Matrix<T>) -> Matrix<T> {
        let mut out = self.clone();
        out.sub_assign(other);
        out
    }

    /// In-place sum; integer elements wrap on overflow.
    pub fn add_assign(&mut self, other: &Matrix<T>) {
        debug_assert_eq!(self.n, other.n);
        for (x, &y) in self.data.iter_mut().zip(&other.data) {
            *x = x.wrapping_add(y);
        }
    }

    /// In-place difference; integer elements wrap on overflow.
    pub fn sub_assign(&mut self, other: &Matrix<T>) {
        debug_assert_eq!(self.n, other.n);
        for (x, &y) in self.data.iter_mut().zip(&other.data) {
            *x = x.wrapping_sub(y);
        }
    }

    /// Dense product using the i-k-j kernel, for any dimension.
    pub fn multiply(&self, other: &Matrix<T>) -> Matrix<T> {
        debug_assert_eq!(self.n, other.n);
        let mut out = Matrix::zeros(self.n);
        kernel::multiply_ikj(&self.data, &other.data, &mut out.data, self.n);
        out
    }

    /// Largest absolute element-wise difference, widened to f64.
    ///
    /// Returns `None` when the dimensions differ.
    pub fn max_abs_diff(&self, other: &Matrix<T>) -> Option<f64> {
        if self.n != other.n {
            return None;
        }
        let diff = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(&x, &y)| (x.to_f64() - y.to_f64()).abs())
            .fold(0.0f64, f64::max);
        Some(diff)
    }

    /// Element-wise comparison within an absolute-or-relative tolerance.
    pub fn approx_eq(&self, other: &Matrix<T>, tolerance: f64) -> bool {
        if self.n != other.n {
            return false;
        }
        self.data.iter().zip(&other.data).all(|(&x, &y)| {
            let (x, y) = (x.to_f64(), y.to_f64());
            let scale = x.abs().max(y.abs()).max(1.0);
            (x - y).abs() <= tolerance * scale
        })
    }
}

impl<T: Element> Add for &Matrix<T> {
    type Output = Matrix<T>;

    fn add(self, rhs: Self) -> Matrix<T> {
        Matrix::add(self, rhs)
    }
}

impl<T: Element> Sub for &Matrix<T> {
    type Output = Matrix<T>;

    fn sub(self, rhs: Self) -> Matrix<T> {
        Matrix::sub(self, rhs)
    }
}

impl<'a, T: Element> AddAssign<&'a Matrix<T>> for Matrix<T> {
    fn add_assign(&mut self, rhs: &'a Matrix<T>) {
        Matrix::add_assign(self, rhs);
    }
}

impl<'a, T: Element> SubAssign<&'a Matrix<T>> for Matrix<T> {
    fn sub_assign(&mut self, rhs: &'a Matrix<T>) {
        Matrix::sub_assign(self, rhs);
    }
}

/// Tab-separated rows, one per line.
impl<T: Element + fmt::Display> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.n {
            for (j, v) in self.row(i).iter().enumerate() {
                if j > 0 {
                    write!(f, "\t")?;
                }
                write!(f, "{}", v)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(n: usize) -> Matrix<i64> {
        Matrix::from_vec(n, (1..=(n * n) as i64).collect()).unwrap()
    }

    #[test]
    fn test_zeros_and_filled() {
        let z: Matrix<f64> = Matrix::zeros(3);
        assert_eq!(z.dim(), 3);
        assert_eq!(z.as_slice(), &[0.0; 9]);

        let f = Matrix::filled(2, 7i32);
        assert_eq!(f.as_slice(), &[7, 7, 7, 7]);
    }

    #[test]
    fn test_get_set_row_major() {
        let mut m: Matrix<i32> = Matrix::zeros(3);
        m.set(1, 2, 5);
        assert_eq!(m.get(1, 2), 5);
        assert_eq!(m.as_slice()[5], 5);
        assert_eq!(m.row(1), &[0, 0, 5]);
        assert_eq!(m.into_vec(), vec![0, 0, 0, 0, 0, 5, 0, 0, 0]);
    }

    #[test]
    fn test_from_vec_length_mismatch() {
        assert!(Matrix::from_vec(2, vec![1.0f32, 2.0, 3.0]).is_err());
    }

    #[test]
    fn test_from_vec_dimension_overflow() {
        let err = Matrix::from_vec(usize::MAX, vec![1i32]).unwrap_err();
        assert!(matches!(err, MatrixError::DimensionTooLarge(n) if n == usize::MAX));
    }

    #[test]
    fn test_add_sub_wrap_and_cancel() {
        let big = Matrix::filled(2, i32::MAX);
        let one = Matrix::filled(2, 1i32);
        let sum = &big + &one;
        assert_eq!(sum.as_slice(), &[i32::MIN; 4]);
        assert_eq!(&sum - &one, big);
    }

    #[test]
    fn test_dtype_tag() {
        assert_eq!(sample(2).dtype(), DType::I64);
        assert_eq!(Matrix::<f32>::zeros(1).dtype(), DType::F32);
    }

    #[test]
    fn test_from_rows() {
        let m = Matrix::from_rows(&[[1, 2], [3, 4]]).unwrap();
        assert_eq!(m, sample(2));
        assert!(Matrix::<i32>::from_rows(&[vec![1, 2], vec![3]]).is_err());
    }

    #[test]
    fn test_resize_same_dim_is_copy() {
        let m = sample(3);
        assert_eq!(Matrix::resized_from(3, &m), m);
    }

    #[test]
    fn test_resize_pad() {
        let m = sample(2);
        let p = Matrix::resized_from(4, &m);
        assert_eq!(p.dim(), 4);
        assert_eq!(p.row(0), &[1, 2, 0, 0]);
        assert_eq!(p.row(1), &[3, 4, 0, 0]);
        assert_eq!(p.row(2), &[0, 0, 0, 0]);
        assert_eq!(p.row(3), &[0, 0, 0, 0]);
    }

    #[test]
    fn test_crop_then_pad_restores_overlap() {
        let m = sample(4);
        let back = Matrix::resized_from(4, &Matrix::resized_from(2, &m));
        for i in 0..4 {
            for j in 0..4 {
                let expected = if i < 2 && j < 2 { m.get(i, j) } else { 0 };
                assert_eq!(back.get(i, j), expected);
            }
        }
    }

    #[test]
    fn test_add_sub() {
        let a = sample(2);
        let b = Matrix::filled(2, 1i64);
        assert_eq!((&a + &b).as_slice(), &[2, 3, 4, 5]);
        assert_eq!((&a - &b).as_slice(), &[0, 1, 2, 3]);

        let mut c = a.clone();
        c += &b;
        c -= &b;
        assert_eq!(c, a);
    }

    #[test]
    fn test_multiply() {
        let a = Matrix::<f64>::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        let b = Matrix::from_rows(&[[5.0, 6.0], [7.0, 8.0]]).unwrap();
        assert_eq!(a.multiply(&b).as_slice(), &[19.0, 22.0, 43.0, 50.0]);
    }

    #[test]
    fn test_identity() {
        let a = sample(3);
        assert_eq!(a.multiply(&Matrix::identity(3)), a);
    }

    #[test]
    fn test_approx_eq() {
        let a = Matrix::from_vec(1, vec![1.0f64]).unwrap();
        let b = Matrix::from_vec(1, vec![1.0 + 1e-12]).unwrap();
        assert!(a.approx_eq(&b, 1e-9));
        assert!(!a.approx_eq(&Matrix::zeros(1), 1e-9));
        assert!(!a.approx_eq(&Matrix::zeros(2), 1e-9));
        assert_eq!(a.max_abs_diff(&Matrix::zeros(2)), None);
    }

    #[test]
    fn test_display() {
        let m = Matrix::<f64>::from_rows(&[[1.5, 2.0], [3.0, -4.0]]).unwrap();
        assert_eq!(m.to_string(), "1.5\t2\n3\t-4\n");
    }
}
