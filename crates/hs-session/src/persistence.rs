//! Character storage.
//!
//! The session talks to storage through [`CharacterRepository`]. The
//! bundled [`JsonDirRepository`] keeps one JSON record per character in a
//! directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use hs_core::{Character, CharacterId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for storage operations.
pub type PersistResult<T> = Result<T, PersistError>;

/// Errors raised by a storage collaborator.
#[derive(Debug, Error)]
pub enum PersistError {
    /// Reading or writing the backing store failed.
    #[error("{0}")]
    Io(#[from] io::Error),

    /// A stored record could not be parsed.
    #[error("malformed record {path}: {source}")]
    Malformed {
        /// The offending file.
        path: PathBuf,
        /// The parse error.
        source: serde_json::Error,
    },

    /// A document could not be serialized.
    #[error("could not encode character: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A stored character with its last-write time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredCharacter {
    /// The document id.
    pub id: CharacterId,
    /// The document.
    pub data: Character,
    /// When the record was last written.
    pub updated_at: DateTime<Utc>,
}

/// A place characters are loaded from and saved to.
pub trait CharacterRepository: Send {
    /// Every stored character, most recently updated first.
    fn fetch_all(&self) -> PersistResult<Vec<StoredCharacter>>;

    /// Insert or overwrite the record for `doc`.
    fn save(&self, doc: &Character) -> PersistResult<()>;

    /// Delete the record for `id`. Deleting a missing record succeeds.
    fn delete(&self, id: &CharacterId) -> PersistResult<()>;
}

/// Stores each character as `<id>.json` inside a directory.
#[derive(Debug, Clone)]
pub struct JsonDirRepository {
    dir: PathBuf,
}

impl JsonDirRepository {
    /// A repository rooted at `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The backing directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The file that holds the record for `id`. Characters outside
    /// `[A-Za-z0-9_-]` are percent-encoded byte by byte, so distinct ids
    /// always map to distinct files.
    pub fn path_for(&self, id: &CharacterId) -> PathBuf {
        let mut stem = String::with_capacity(id.as_str().len());
        for byte in id.as_str().bytes() {
            if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
                stem.push(char::from(byte));
            } else {
                stem.push_str(&format!("%{byte:02X}"));
            }
        }
        self.dir.join(format!("{stem}.json"))
    }

    fn read_record(path: &Path) -> PersistResult<StoredCharacter> {
        let text = fs::read_to_string(path)?;
        serde_json::from_str(&text).map_err(|source| PersistError::Malformed {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl CharacterRepository for JsonDirRepository {
    fn fetch_all(&self) -> PersistResult<Vec<StoredCharacter>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut records = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match Self::read_record(&path) {
                Ok(record) => records.push(record),
                Err(e) => tracing::warn!(path = %path.display(), error = %e, "skipping record"),
            }
        }
        records.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        tracing::debug!(count = records.len(), dir = %self.dir.display(), "fetched roster");
        Ok(records)
    }

    fn save(&self, doc: &Character) -> PersistResult<()> {
        fs::create_dir_all(&self.dir)?;
        let record = StoredCharacter {
            id: doc.id.clone(),
            data: doc.clone(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_string_pretty(&record)?;
        fs::write(self.path_for(&doc.id), json)?;
        Ok(())
    }

    fn delete(&self, id: &CharacterId) -> PersistResult<()> {
        match fs::remove_file(self.path_for(id)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn missing_dir_is_empty_roster() {
        let tmp = tempfile::tempdir().unwrap();
        let repo = JsonDirRepository::new(tmp.path().join("nope"));
        assert!(repo.fetch_all().unwrap().is_empty());
    }

    #[test]
    fn save_then_fetch_newest_first() {
        let tmp = tempfile::tempdir().unwrap();
        let repo = JsonDirRepository::new(tmp.path());
        let gon = Character::blank("Gon");
        let killua = Character::blank("Killua");
        repo.save(&gon).unwrap();
        thread::sleep(Duration::from_millis(5));
        repo.save(&killua).unwrap();

        let records = repo.fetch_all().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].data.name, "Killua");
        assert_eq!(records[1].id, gon.id);
    }

    #[test]
    fn record_uses_camel_case() {
        let tmp = tempfile::tempdir().unwrap();
        let repo = JsonDirRepository::new(tmp.path());
        let doc = hs_core::bootstrap_character();
        repo.save(&doc).unwrap();
        let text = fs::read_to_string(repo.path_for(&doc.id)).unwrap();
        assert!(text.contains("\"updatedAt\""));
        assert!(text.contains("\"maxXp\""));
    }

    #[test]
    fn malformed_records_are_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        let repo = JsonDirRepository::new(tmp.path());
        repo.save(&Character::blank("Gon")).unwrap();
        fs::write(tmp.path().join("junk.json"), "{ not json").unwrap();
        fs::write(tmp.path().join("notes.txt"), "ignored").unwrap();
        assert_eq!(repo.fetch_all().unwrap().len(), 1);
    }

    #[test]
    fn delete_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let repo = JsonDirRepository::new(tmp.path());
        let doc = Character::blank("Gon");
        repo.save(&doc).unwrap();
        repo.delete(&doc.id).unwrap();
        repo.delete(&doc.id).unwrap();
        assert!(repo.fetch_all().unwrap().is_empty());
    }

    #[test]
    fn ids_are_escaped_into_file_names() {
        let repo = JsonDirRepository::new("/data");
        let path = repo.path_for(&CharacterId::from("../evil id"));
        assert_eq!(path, PathBuf::from("/data/%2E%2E%2Fevil%20id.json"));
        assert_eq!(
            repo.path_for(&CharacterId::from("char_default")),
            PathBuf::from("/data/char_default.json")
        );
    }

    #[test]
    fn similar_ids_get_separate_records() {
        let tmp = tempfile::tempdir().unwrap();
        let repo = JsonDirRepository::new(tmp.path());
        let mut dotted = Character::blank("Dotted");
        dotted.id = CharacterId::from("a.b");
        let mut underscored = Character::blank("Underscored");
        underscored.id = CharacterId::from("a_b");
        let mut escaped = Character::blank("Escaped");
        escaped.id = CharacterId::from("a%2Eb");

        assert_ne!(repo.path_for(&dotted.id), repo.path_for(&underscored.id));
        assert_ne!(repo.path_for(&dotted.id), repo.path_for(&escaped.id));
        repo.save(&dotted).unwrap();
        repo.save(&underscored).unwrap();
        repo.save(&escaped).unwrap();

        let mut names: Vec<_> = repo
            .fetch_all()
            .unwrap()
            .into_iter()
            .map(|record| record.data.name)
            .collect();
        names.sort();
        assert_eq!(names, vec!["Dotted", "Escaped", "Underscored"]);
    }
}
