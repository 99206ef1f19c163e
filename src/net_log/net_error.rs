//! Network error codes that appear in logged events.
//!
//! Zero means success, positive values are non-error results (such as byte
//! counts), negative values are errors. `ERR_IO_PENDING` is not an error at
//! all: it means the operation will complete asynchronously, and it must
//! never be logged as a result.

pub const OK: i32 = 0;
pub const ERR_IO_PENDING: i32 = -1;
pub const ERR_FAILED: i32 = -2;
pub const ERR_ABORTED: i32 = -3;
pub const ERR_INVALID_ARGUMENT: i32 = -4;
pub const ERR_TIMED_OUT: i32 = -7;
pub const ERR_CONNECTION_CLOSED: i32 = -100;
pub const ERR_CONNECTION_RESET: i32 = -101;
pub const ERR_CONNECTION_REFUSED: i32 = -102;
pub const ERR_CONNECTION_ABORTED: i32 = -103;
pub const ERR_CONNECTION_FAILED: i32 = -104;
pub const ERR_NAME_NOT_RESOLVED: i32 = -105;
pub const ERR_INTERNET_DISCONNECTED: i32 = -106;
pub const ERR_ADDRESS_UNREACHABLE: i32 = -109;
pub const ERR_QUIC_PROTOCOL_ERROR: i32 = -356;

/// True for codes that report a real failure.
pub fn is_error(code: i32) -> bool {
    code < 0 && code != ERR_IO_PENDING
}
