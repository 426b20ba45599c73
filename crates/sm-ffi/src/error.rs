use std::cell::RefCell;
use std::ffi::CString;
use std::fmt::Display;

use crate::types::SMStatus;

thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

/// Record `msg` as this thread's last error and return `status`.
pub fn fail(status: SMStatus, msg: impl Display) -> SMStatus {
    let msg = msg.to_string();
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
    status
}

/// Take the last error message, leaving `None` in its place.
pub fn take_last_error() -> Option<CString> {
    LAST_ERROR.with(|e| e.borrow_mut().take())
}
