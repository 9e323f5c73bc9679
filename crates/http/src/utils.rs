//! Utility macros for the crate.

/// Returns early with an error if a condition is not met.
///
/// Like `assert!`, but returns `Err($error)` instead of panicking.
///
/// ```ignore
/// ensure!(length <= MAX_PAYLOAD_BYTES, ParseError::payload_too_large(length, MAX_PAYLOAD_BYTES));
/// ```
macro_rules! ensure {
    ($predicate:expr, $error:expr) => {
        if !$predicate {
            return Err($error);
        }
    };
}

pub(crate) use ensure;
