use crate::id::CharacterId;

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when manipulating the roster.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The requested character does not exist in the roster.
    #[error("character not found: {0}")]
    CharacterNotFound(CharacterId),

    /// A character with the same identifier is already in the roster.
    #[error("character already exists: {0}")]
    DuplicateCharacter(CharacterId),
}
