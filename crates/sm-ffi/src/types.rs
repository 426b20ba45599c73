/// Status codes returned by all FFI functions.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SMStatus {
    Ok = 0,
    ErrorInvalidArgument = 1,
    ErrorInternal = 2,
}
