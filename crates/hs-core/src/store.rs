use std::sync::Arc;

use crate::character::Character;
use crate::defaults::bootstrap_character;
use crate::error::{CoreError, CoreResult};
use crate::id::CharacterId;
use crate::update::{Edit, apply_edit};

/// The roster of character documents and the id of the active one.
///
/// The roster is never empty: whenever it would become empty the bootstrap
/// document takes its place. Documents are shared behind [`Arc`], so
/// editing the active document leaves every other entry pointer-identical.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    roster: Vec<Arc<Character>>,
    active: CharacterId,
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentStore {
    /// A store holding only the bootstrap document.
    pub fn new() -> Self {
        let doc = bootstrap_character();
        Self {
            active: doc.id.clone(),
            roster: vec![Arc::new(doc)],
        }
    }

    /// Build a store from loaded documents, activating the first one.
    /// An empty roster falls back to the bootstrap document.
    pub fn from_roster(docs: Vec<Character>) -> Self {
        if docs.is_empty() {
            return Self::new();
        }
        let roster: Vec<Arc<Character>> = docs.into_iter().map(Arc::new).collect();
        Self {
            active: roster[0].id.clone(),
            roster,
        }
    }

    /// Position of the active document, falling back to the first entry
    /// when the active id is no longer in the roster.
    pub fn active_index(&self) -> usize {
        self.roster
            .iter()
            .position(|doc| doc.id == self.active)
            .unwrap_or(0)
    }

    /// The active document.
    pub fn active(&self) -> &Arc<Character> {
        &self.roster[self.active_index()]
    }

    /// The id of the active document.
    pub fn active_id(&self) -> &CharacterId {
        &self.active().id
    }

    /// Make another document active.
    pub fn select(&mut self, id: &CharacterId) -> CoreResult<()> {
        if self.get(id).is_none() {
            return Err(CoreError::CharacterNotFound(id.clone()));
        }
        self.active = id.clone();
        Ok(())
    }

    /// Apply an edit to the active document. Returns false when the edit
    /// left the document unchanged, in which case the entry is not replaced.
    pub fn apply(&mut self, edit: &Edit) -> bool {
        let index = self.active_index();
        let next = apply_edit(&self.roster[index], edit);
        if *self.roster[index] == next {
            tracing::debug!(?edit, "edit left the document unchanged");
            return false;
        }
        self.roster[index] = Arc::new(next);
        true
    }

    /// Append a document and make it active.
    pub fn insert(&mut self, doc: Character) -> CoreResult<()> {
        if self.get(&doc.id).is_some() {
            return Err(CoreError::DuplicateCharacter(doc.id));
        }
        self.active = doc.id.clone();
        self.roster.push(Arc::new(doc));
        Ok(())
    }

    /// Remove a document. If it was the last one, the bootstrap document
    /// takes its place; if it was active, the first remaining entry becomes
    /// active. Unknown ids are a no-op.
    pub fn remove(&mut self, id: &CharacterId) -> Option<Arc<Character>> {
        let index = self.roster.iter().position(|doc| &doc.id == id)?;
        let removed = self.roster.remove(index);
        if self.roster.is_empty() {
            *self = Self::new();
        } else if &self.active == id {
            self.active = self.roster[0].id.clone();
        }
        Some(removed)
    }

    /// All documents in roster order.
    pub fn roster(&self) -> &[Arc<Character>] {
        &self.roster
    }

    /// Look up a document by id.
    pub fn get(&self, id: &CharacterId) -> Option<&Arc<Character>> {
        self.roster.iter().find(|doc| &doc.id == id)
    }

    /// Number of documents in the roster.
    pub fn len(&self) -> usize {
        self.roster.len()
    }

    /// Always false; kept for symmetry with [`len`](Self::len).
    pub fn is_empty(&self) -> bool {
        self.roster.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::BOOTSTRAP_ID;
    use crate::patch::FieldValue;

    fn two_docs() -> DocumentStore {
        DocumentStore::from_roster(vec![Character::blank("Gon"), Character::blank("Killua")])
    }

    #[test]
    fn new_store_holds_bootstrap() {
        let store = DocumentStore::new();
        assert_eq!(store.len(), 1);
        assert_eq!(store.active().id.as_str(), BOOTSTRAP_ID);
    }

    #[test]
    fn empty_roster_falls_back_to_bootstrap() {
        let store = DocumentStore::from_roster(Vec::new());
        assert_eq!(store.active().id.as_str(), BOOTSTRAP_ID);
        assert!(!store.is_empty());
    }

    #[test]
    fn from_roster_activates_first() {
        let store = two_docs();
        assert_eq!(store.active().name, "Gon");
        assert_eq!(store.active_index(), 0);
    }

    #[test]
    fn select_unknown_is_error() {
        let mut store = two_docs();
        let err = store.select(&CharacterId::from("nobody")).unwrap_err();
        assert!(matches!(err, CoreError::CharacterNotFound(_)));
        assert_eq!(store.active().name, "Gon");
    }

    #[test]
    fn apply_touches_only_active_document() {
        let mut store = two_docs();
        let killua = store.roster()[1].id.clone();
        store.select(&killua).unwrap();
        let gon_before = Arc::clone(&store.roster()[0]);

        let changed = store.apply(&Edit::SetField(FieldValue::Nickname("Zoldyck".into())));

        assert!(changed);
        assert_eq!(store.active().nickname, "Zoldyck");
        assert!(Arc::ptr_eq(&gon_before, &store.roster()[0]));
    }

    #[test]
    fn unchanged_edit_keeps_entry() {
        let mut store = DocumentStore::new();
        let before = Arc::clone(store.active());
        let changed = store.apply(&Edit::RemoveCondition(42));
        assert!(!changed);
        assert!(Arc::ptr_eq(&before, store.active()));
    }

    #[test]
    fn insert_activates_and_rejects_duplicates() {
        let mut store = DocumentStore::new();
        let doc = Character::blank("Kurapika");
        let id = doc.id.clone();
        store.insert(doc.clone()).unwrap();
        assert_eq!(store.active_id(), &id);
        assert_eq!(store.len(), 2);

        let err = store.insert(doc).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateCharacter(_)));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn removing_active_activates_first_remaining() {
        let mut store = two_docs();
        let gon = store.roster()[0].id.clone();
        let removed = store.remove(&gon).unwrap();
        assert_eq!(removed.name, "Gon");
        assert_eq!(store.active().name, "Killua");
    }

    #[test]
    fn removing_last_document_restores_bootstrap() {
        let mut store = DocumentStore::new();
        let id = CharacterId::from(BOOTSTRAP_ID);
        store.apply(&Edit::SetField(FieldValue::Name("Edited".into())));

        assert!(store.remove(&id).is_some());
        assert_eq!(store.len(), 1);
        assert_eq!(store.active().name, "Cristian Martínez");
    }

    #[test]
    fn remove_unknown_is_noop() {
        let mut store = two_docs();
        assert!(store.remove(&CharacterId::from("ghost")).is_none());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn edits_never_reassign_ids() {
        let mut store = two_docs();
        let ids: Vec<_> = store.roster().iter().map(|doc| doc.id.clone()).collect();

        store.apply(&Edit::SetField(FieldValue::Name("Killua".into())));
        store.apply(&Edit::SetField(FieldValue::Level(9)));
        let copy = (*store.roster()[1]).clone();
        assert!(store.insert(copy).is_err());

        let after: Vec<_> = store.roster().iter().map(|doc| doc.id.clone()).collect();
        assert_eq!(after, ids);
        assert_eq!(store.active_id(), &ids[0]);
        assert_eq!(store.roster()[0].level, 9);
    }
}
