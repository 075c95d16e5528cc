//! Session layer for Hunter Sheet.
//!
//! [`SheetSession`] is the top-level controller: it owns the document
//! store, the activity log, and the random source, and turns user actions
//! into edits and log entries. Persistence, image embedding, and export are
//! collaborators that the session calls out to.

pub mod config;
pub mod error;
pub mod export;
pub mod image;
pub mod log;
pub mod persistence;
pub mod session;

pub use config::SheetConfig;
pub use error::{SessionError, SessionResult};
pub use log::{ActivityEntry, ActivityLog, EntryKind, LogResult};
pub use persistence::{CharacterRepository, JsonDirRepository, PersistError, StoredCharacter};
pub use session::{PoolOwner, PortraitTarget, SheetSession};
