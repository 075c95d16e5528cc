//! Error types for the mechanics engine.

use hs_core::PoolKind;

/// Errors that can occur during mechanics operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MechError {
    /// A cost could not be paid from the pool it is charged to.
    #[error("not enough {kind}: need {cost}, have {current}")]
    InsufficientResource {
        /// The pool the cost is charged to.
        kind: PoolKind,
        /// The cost that was requested.
        cost: u32,
        /// The pool's current value.
        current: i32,
    },
}

/// Convenience result type for mechanics operations.
pub type MechResult<T> = Result<T, MechError>;
