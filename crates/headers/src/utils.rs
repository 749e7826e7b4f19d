//! Internal helper macros.

/// Returns early with `$error` when `$predicate` does not hold.
///
/// Used on every mutating path of the header collection so that a rejected
/// call never leaves the collection partially updated.
///
/// ```ignore
/// ensure!(!self.read_only, HeaderError::ReadOnly);
/// ```
macro_rules! ensure {
    ($predicate:expr, $error:expr) => {
        if !$predicate {
            return Err($error);
        }
    };
}

pub(crate) use ensure;
