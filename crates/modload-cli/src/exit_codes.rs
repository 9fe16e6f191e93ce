//! Exit codes for the `modload` binary.
//! Loader errors map through `LoadError::exit_code` (2-4).

pub const SUCCESS: i32 = 0;
pub const NOT_FOUND: i32 = 1; // Requested package is not installed
pub const INTERNAL_ERROR: i32 = 5; // Anything not covered by a loader error
