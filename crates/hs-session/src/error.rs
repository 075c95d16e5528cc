//! Error types for the session layer.

use hs_core::{SkillId, SummonId};
use thiserror::Error;

use crate::image::ImageError;
use crate::persistence::PersistError;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors returned by [`SheetSession`](crate::SheetSession) actions.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Roster error.
    #[error("{0}")]
    Core(#[from] hs_core::CoreError),

    /// A precondition of a game action did not hold.
    #[error("{0}")]
    Mechanics(#[from] hs_mechanics::MechError),

    /// The persistence collaborator failed.
    #[error("storage error: {0}")]
    Storage(#[from] PersistError),

    /// The image collaborator rejected the input.
    #[error("image error: {0}")]
    Image(#[from] ImageError),

    /// The roster could not be serialized.
    #[error("export error: {0}")]
    Export(#[from] serde_json::Error),

    /// No persistence collaborator is configured.
    #[error("no storage configured; running offline")]
    Offline,

    /// The addressed skill does not exist.
    #[error("skill not found: {0}")]
    SkillNotFound(SkillId),

    /// The addressed summon does not exist.
    #[error("summon not found: {0}")]
    SummonNotFound(SummonId),

    /// The addressed attribute does not exist.
    #[error("unknown attribute: {0}")]
    UnknownAttribute(String),
}
