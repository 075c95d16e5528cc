//! Core types for Hunter Sheet: the character document, its roster, and
//! the addressed update operations that edit it.
//!
//! Every update is a pure function from a document to a new document.
//! List entries live behind [`std::sync::Arc`] so that an edit only
//! allocates along the path it touches; untouched entries stay
//! pointer-identical to the input.

/// Character documents and the records they embed.
pub mod character;
/// The bootstrap document used when no roster is available.
pub mod defaults;
/// Error types used throughout the crate.
pub mod error;
/// Identifier newtypes for documents and list entries.
pub mod id;
/// Typed partial updates for list entries and top-level fields.
pub mod patch;
/// The roster of documents and the active-document pointer.
pub mod store;
/// Copy-on-write update and delete operations.
pub mod update;

/// Re-export document types.
pub use character::{
    AffinityType, AttributeMeta, Character, Item, PoolKind, ResourcePool, Skill, SkillCategory,
    Summon, Weapon,
};
/// Re-export the bootstrap document.
pub use defaults::bootstrap_character;
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export identifiers.
pub use id::{CharacterId, ItemId, SkillId, SummonId};
/// Re-export patch types.
pub use patch::{FieldValue, ItemPatch, SkillPatch, SummonPatch, WeaponPatch};
/// Re-export the document store.
pub use store::DocumentStore;
/// Re-export the update dispatch.
pub use update::{Edit, EntryRef, ListPatch, NewEntry, apply_edit};
