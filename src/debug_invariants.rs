//! Structural self-checks for level graphs and partitions.
//!
//! The round engine calls `debug_assert_invariants` after every contraction
//! and on the final partition. The checks compile away in release builds
//! unless `strict-invariants` or `check-invariants` is enabled.

use crate::assign_error::AssignError;

/// Types that can verify their own structural invariants.
pub trait DebugInvariants {
    /// Panics on a violated invariant when checking is enabled; no-op otherwise.
    fn debug_assert_invariants(&self);
    /// Returns the first violated invariant, regardless of build flags.
    fn validate_invariants(&self) -> Result<(), AssignError>;
}

/// Runs a fallible check and panics with `ctx` if it fails, when invariant
/// checking is enabled.
#[macro_export]
macro_rules! debug_invariants {
    ($expr:expr, $($ctx:tt)*) => {
        #[cfg(any(debug_assertions, feature = "strict-invariants", feature = "check-invariants"))]
        if let Err(e) = $expr {
            panic!(concat!("[invariants] ", $($ctx)*, ": {}"), e);
        }
    };
}
