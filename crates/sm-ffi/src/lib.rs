mod error;
mod types;

pub use error::*;
pub use types::*;

use std::ffi::CString;
use std::os::raw::c_char;

use sm_matrix::{strassen, LeafSize, Matrix};

/// Execute a closure that returns an `SMStatus`, catching any panics
/// and converting them into `SMStatus::ErrorInternal`.
fn catch_panic<F: FnOnce() -> SMStatus + std::panic::UnwindSafe>(f: F) -> SMStatus {
    match std::panic::catch_unwind(f) {
        Ok(status) => status,
        Err(_) => fail(SMStatus::ErrorInternal, "internal panic"),
    }
}

/// Leaf size used when `sm_multiply_f64` is passed `0`.
#[no_mangle]
pub extern "C" fn sm_default_leaf_size() -> usize {
    LeafSize::DEFAULT.get()
}

/// Multiply two `n x n` row-major f64 matrices: `out = a * b`.
///
/// `a`, `b` and `out` must each point to `n * n` doubles; `out` must not
/// overlap the inputs. A `leaf_size` of `0` selects the default; any other
/// value must be a power of two.
#[no_mangle]
pub unsafe extern "C" fn sm_multiply_f64(
    n: usize,
    a: *const f64,
    b: *const f64,
    leaf_size: usize,
    out: *mut f64,
) -> SMStatus {
    catch_panic(|| {
        if a.is_null() || b.is_null() || out.is_null() {
            return fail(SMStatus::ErrorInvalidArgument, "null argument");
        }
        if n == 0 {
            return fail(SMStatus::ErrorInvalidArgument, "matrix size must be positive");
        }
        let leaf = if leaf_size == 0 {
            LeafSize::DEFAULT
        } else {
            match LeafSize::new(leaf_size) {
                Ok(l) => l,
                Err(e) => return fail(SMStatus::ErrorInvalidArgument, e),
            }
        };
        let len = match n.checked_mul(n) {
            Some(len) => len,
            None => return fail(SMStatus::ErrorInvalidArgument, "matrix size overflows"),
        };

        let (a, b) = unsafe {
            (
                std::slice::from_raw_parts(a, len).to_vec(),
                std::slice::from_raw_parts(b, len).to_vec(),
            )
        };
        let (a, b) = match (Matrix::from_vec(n, a), Matrix::from_vec(n, b)) {
            (Ok(a), Ok(b)) => (a, b),
            (Err(e), _) | (_, Err(e)) => return fail(SMStatus::ErrorInternal, e),
        };

        let c = strassen(&a, &b, n, leaf).into_vec();
        let out = unsafe { std::slice::from_raw_parts_mut(out, len) };
        out.copy_from_slice(&c);
        SMStatus::Ok
    })
}

/// Retrieve the last error message.
///
/// Returns a pointer to a C string describing the most recent error, or
/// null if no error has occurred. The caller must free the returned string
/// with `sm_free_string`.
#[no_mangle]
pub extern "C" fn sm_last_error() -> *const c_char {
    match error::take_last_error() {
        Some(e) => e.into_raw(),
        None => std::ptr::null(),
    }
}

/// Free a string previously returned by `sm_last_error`.
#[no_mangle]
pub unsafe extern "C" fn sm_free_string(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}
