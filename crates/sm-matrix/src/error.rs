use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatrixError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("data length mismatch: {n}x{n} matrix needs {expected} elements, got {got}")]
    LengthMismatch { n: usize, expected: usize, got: usize },
    #[error("matrix is not square: row {row} has {len} elements, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[error("dimension mismatch: [{a}x{a}] @ [{b}x{b}]")]
    DimensionMismatch { a: usize, b: usize },
    #[error("matrix has zero dimension")]
    Empty,
    #[error("matrix dimension {0} is too large: element count overflows")]
    DimensionTooLarge(usize),
    #[error("invalid leaf size {0}: must be a power of two")]
    InvalidLeafSize(usize),
    #[error("unsupported dtype: {0}")]
    UnsupportedDType(String),
    #[error("cannot parse {token:?} on line {line} as a number")]
    Parse { token: String, line: usize },
    #[error("short input for matrix {which}: read {read} values, expected {expected}")]
    ShortInput {
        which: char,
        read: usize,
        expected: usize,
    },
}

pub type Result<T> = std::result::Result<T, MatrixError>;
