//! Stable exit codes for quintuple commands.

/// Definition valid; for `run`, every word accepted.
pub const OK: i32 = 0;
/// Invalid definition, invalid word, bad arguments or I/O failure.
pub const INVALID: i32 = 1;
/// `run` finished and at least one word was rejected.
pub const REJECTED: i32 = 2;
