use std::fmt;
use std::ops::{Add, Mul, Sub};
use std::str::FromStr;

use half::f16;

use crate::error::MatrixError;

/// Element kinds a [`Matrix`](crate::Matrix) can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DType {
    /// 16-bit floating point (IEEE 754 half-precision, via the `half` crate).
    F16,
    /// 32-bit floating point.
    F32,
    /// 64-bit floating point.
    F64,
    /// 32-bit signed integer.
    I32,
    /// 64-bit signed integer.
    I64,
}

impl DType {
    /// Returns true for floating point kinds, where products are compared
    /// with a tolerance rather than exactly.
    pub fn is_float(&self) -> bool {
        matches!(self, DType::F16 | DType::F32 | DType::F64)
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DType::F16 => write!(f, "f16"),
            DType::F32 => write!(f, "f32"),
            DType::F64 => write!(f, "f64"),
            DType::I32 => write!(f, "i32"),
            DType::I64 => write!(f, "i64"),
        }
    }
}

impl FromStr for DType {
    type Err = MatrixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "f16" => Ok(DType::F16),
            "f32" => Ok(DType::F32),
            "f64" => Ok(DType::F64),
            "i32" => Ok(DType::I32),
            "i64" => Ok(DType::I64),
            _ => Err(MatrixError::UnsupportedDType(s.to_string())),
        }
    }
}

/// Numeric element stored in a matrix.
///
/// The kernels only use the ring operations below. For integers they wrap:
/// Strassen's intermediate sums such as `a11 + a22` can leave the type's
/// range even when the final product fits, and arithmetic modulo `2^bits`
/// still yields that exact product. For floats they are the plain operators.
pub trait Element:
    Copy
    + Default
    + PartialEq
    + fmt::Debug
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
{
    /// The runtime tag for this element type.
    const DTYPE: DType;

    fn zero() -> Self;

    fn one() -> Self;

    fn wrapping_add(self, rhs: Self) -> Self;

    fn wrapping_sub(self, rhs: Self) -> Self;

    fn wrapping_mul(self, rhs: Self) -> Self;

    /// Lossy widening used for tolerance comparisons and diagnostics.
    fn to_f64(self) -> f64;
}

macro_rules! impl_float_element {
    ($ty:ty, $dtype:expr, $zero:expr, $one:expr) => {
        impl Element for $ty {
            const DTYPE: DType = $dtype;

            #[inline]
            fn zero() -> Self {
                $zero
            }

            #[inline]
            fn one() -> Self {
                $one
            }

            #[inline]
            fn wrapping_add(self, rhs: Self) -> Self {
                self + rhs
            }

            #[inline]
            fn wrapping_sub(self, rhs: Self) -> Self {
                self - rhs
            }

            #[inline]
            fn wrapping_mul(self, rhs: Self) -> Self {
                self * rhs
            }

            #[inline]
            fn to_f64(self) -> f64 {
                f64::from(self)
            }
        }
    };
}

macro_rules! impl_int_element {
    ($ty:ty, $dtype:expr) => {
        impl Element for $ty {
            const DTYPE: DType = $dtype;

            #[inline]
            fn zero() -> Self {
                0
            }

            #[inline]
            fn one() -> Self {
                1
            }

            #[inline]
            fn wrapping_add(self, rhs: Self) -> Self {
                <$ty>::wrapping_add(self, rhs)
            }

            #[inline]
            fn wrapping_sub(self, rhs: Self) -> Self {
                <$ty>::wrapping_sub(self, rhs)
            }

            #[inline]
            fn wrapping_mul(self, rhs: Self) -> Self {
                <$ty>::wrapping_mul(self, rhs)
            }

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }
        }
    };
}

impl_float_element!(f16, DType::F16, f16::ZERO, f16::ONE);
impl_float_element!(f32, DType::F32, 0.0, 1.0);
impl_float_element!(f64, DType::F64, 0.0, 1.0);
impl_int_element!(i32, DType::I32);
impl_int_element!(i64, DType::I64);
