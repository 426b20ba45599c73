//! Plain-text matrix format.
//!
//! Input is two `n x n` matrices written as whitespace- or tab-separated
//! numbers, row after row: the first `n * n` values are A in row-major order,
//! the next `n * n` are B. Blank lines may separate the two but carry no
//! meaning. Output is one row per line, tab-separated.

use std::fmt::Display;
use std::io::{BufRead, Write};
use std::str::FromStr;

use crate::dtype::Element;
use crate::error::{MatrixError, Result};
use crate::matrix::Matrix;

/// Number of values on a row, used to infer `n` from the first line.
pub fn detect_size(first_line: &str) -> usize {
    first_line.split_whitespace().count()
}

/// Read the operand pair A, B.
///
/// With `n = None` the dimension is taken from the first non-blank line.
/// Values beyond the `2 * n * n` needed are ignored.
///
/// # Errors
/// - [`MatrixError::Parse`] for a token that is not a number.
/// - [`MatrixError::ShortInput`] when either matrix runs out of values.
/// - [`MatrixError::Empty`] when the dimension is zero or the input is blank.
/// - [`MatrixError::DimensionTooLarge`] when `2 * n * n` overflows `usize`.
pub fn read_pair<T, R>(reader: R, n: Option<usize>) -> Result<(Matrix<T>, Matrix<T>)>
where
    T: Element + FromStr,
    R: BufRead,
{
    let mut n = n;
    let mut values: Vec<T> = Vec::new();

    'lines: for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let dim = *n.get_or_insert_with(|| detect_size(&line));
        let wanted = pair_len(dim)?;
        for token in line.split_whitespace() {
            if values.len() == wanted {
                break 'lines;
            }
            let value: T = token.parse().map_err(|_| MatrixError::Parse {
                token: token.to_string(),
                line: idx + 1,
            })?;
            values.push(value);
        }
    }

    let n = match n {
        Some(n) if n > 0 => n,
        _ => return Err(MatrixError::Empty),
    };
    let len = pair_len(n)? / 2;
    if values.len() < len {
        return Err(MatrixError::ShortInput {
            which: 'A',
            read: values.len(),
            expected: len,
        });
    }
    if values.len() < 2 * len {
        return Err(MatrixError::ShortInput {
            which: 'B',
            read: values.len() - len,
            expected: len,
        });
    }
    log::debug!("read two {}x{} {} matrices", n, n, T::DTYPE);

    let b = values.split_off(len);
    Ok((Matrix::from_vec(n, values)?, Matrix::from_vec(n, b)?))
}

/// Number of values in an operand pair, `2 * n * n`.
fn pair_len(n: usize) -> Result<usize> {
    n.checked_mul(n)
        .and_then(|len| len.checked_mul(2))
        .ok_or(MatrixError::DimensionTooLarge(n))
}

/// Write `m` as tab-separated rows.
pub fn write_matrix<W: Write, T: Element + Display>(mut writer: W, m: &Matrix<T>) -> Result<()> {
    write!(writer, "{}", m)?;
    writer.flush()?;
    Ok(())
}
