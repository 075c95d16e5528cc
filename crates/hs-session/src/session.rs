//! The sheet session controller.
//!
//! `SheetSession` owns the roster, the activity log, and the random source.
//! Every user action goes through it: game actions check their
//! preconditions, roll, write to the log, and then commit an edit to the
//! active document. A rejected action changes nothing and logs nothing.

use std::sync::Arc;

use hs_core::{
    Character, CharacterId, DocumentStore, Edit, FieldValue, ListPatch, PoolKind, ResourcePool,
    Skill, SkillId, SkillPatch, SummonId, SummonPatch, WeaponPatch,
};
use hs_mechanics::dice::{self, CheckOutcome, RandomSource, RollOutcome, SeededRandom, ThreadRandom};
use hs_mechanics::ledger::{self, RestOutcome};
use hs_mechanics::projection::{self, Point, RadarAxis};

use crate::config::SheetConfig;
use crate::error::{SessionError, SessionResult};
use crate::export::export_roster;
use crate::image::embed_image;
use crate::log::{ActivityEntry, ActivityLog, EntryKind, LogResult};
use crate::persistence::{CharacterRepository, JsonDirRepository};

/// Title used for bookkeeping entries.
const SYSTEM: &str = "System";

/// Whose pool a calculator adjustment targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolOwner {
    /// The active character.
    Character,
    /// One of the active character's summons.
    Summon(SummonId),
}

/// Where an uploaded portrait is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortraitTarget {
    /// The character's own portrait.
    Character,
    /// A character skill.
    Skill(SkillId),
    /// A summon.
    Summon(SummonId),
    /// The equipped weapon.
    Weapon,
    /// An attribute card.
    Attribute(String),
}

/// An interactive character sheet session.
pub struct SheetSession {
    store: DocumentStore,
    log: ActivityLog,
    rng: Box<dyn RandomSource>,
    repository: Option<Box<dyn CharacterRepository>>,
    config: SheetConfig,
}

impl SheetSession {
    /// Create a session holding the bootstrap document. Storage is a
    /// [`JsonDirRepository`] when the config names a data directory;
    /// otherwise the session runs offline.
    pub fn new(config: SheetConfig) -> Self {
        let rng: Box<dyn RandomSource> = match config.seed {
            Some(seed) => Box::new(SeededRandom::new(seed)),
            None => Box::new(ThreadRandom),
        };
        let repository = config
            .data_dir
            .clone()
            .map(|dir| Box::new(JsonDirRepository::new(dir)) as Box<dyn CharacterRepository>);
        Self {
            store: DocumentStore::new(),
            log: ActivityLog::new(),
            rng,
            repository,
            config,
        }
    }

    /// Replace the random source.
    pub fn with_random_source(mut self, rng: impl RandomSource + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    /// Replace the storage collaborator.
    pub fn with_repository(mut self, repository: impl CharacterRepository + 'static) -> Self {
        self.repository = Some(Box::new(repository));
        self
    }

    /// The roster.
    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    /// The activity log.
    pub fn log(&self) -> &ActivityLog {
        &self.log
    }

    /// The session configuration.
    pub fn config(&self) -> &SheetConfig {
        &self.config
    }

    /// The active document.
    pub fn active(&self) -> &Arc<Character> {
        self.store.active()
    }

    /// Whether no storage collaborator is configured.
    pub fn is_offline(&self) -> bool {
        self.repository.is_none()
    }

    fn record(
        &mut self,
        title: impl Into<String>,
        result: impl Into<LogResult>,
        detail: impl Into<String>,
        kind: EntryKind,
    ) {
        self.log.append(ActivityEntry::new(title, result, detail, kind));
    }

    // -----------------------------------------------------------------------
    // Editing
    // -----------------------------------------------------------------------

    /// Apply an edit to the active document. Returns whether it changed.
    pub fn edit(&mut self, edit: Edit) -> bool {
        self.store.apply(&edit)
    }

    /// Add a new character built from the default template and make it
    /// active.
    pub fn create_character(&mut self, name: impl Into<String>) -> SessionResult<CharacterId> {
        let doc = Character::blank(name);
        let id = doc.id.clone();
        self.store.insert(doc)?;
        tracing::info!(%id, "created character");
        Ok(id)
    }

    /// Make another character active.
    pub fn select(&mut self, id: &CharacterId) -> SessionResult<()> {
        self.store.select(id)?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Game actions
    // -----------------------------------------------------------------------

    /// Use one of the active character's skills. The cost is checked
    /// first and paid from the character's pools after the roll.
    pub fn roll_skill(&mut self, skill_id: &SkillId) -> SessionResult<RollOutcome> {
        let doc = Arc::clone(self.store.active());
        let skill = doc
            .skill(skill_id)
            .ok_or_else(|| SessionError::SkillNotFound(skill_id.clone()))?;
        self.use_paid_skill(&doc, skill, None)
    }

    /// Use a skill of one of the active character's summons. The cost is
    /// paid from the character's pools, not the summon's.
    pub fn roll_summon_skill(
        &mut self,
        summon_id: &SummonId,
        skill_id: &SkillId,
    ) -> SessionResult<RollOutcome> {
        let doc = Arc::clone(self.store.active());
        let summon = doc
            .summon(summon_id)
            .ok_or_else(|| SessionError::SummonNotFound(summon_id.clone()))?;
        let skill = summon
            .skill(skill_id)
            .ok_or_else(|| SessionError::SkillNotFound(skill_id.clone()))?;
        self.use_paid_skill(&doc, skill, Some(&summon.name))
    }

    fn use_paid_skill(
        &mut self,
        doc: &Character,
        skill: &Skill,
        summon: Option<&str>,
    ) -> SessionResult<RollOutcome> {
        let paid = ledger::spend(doc.pool(skill.cost_kind), skill.cost, skill.cost_kind)?;

        let outcome = self.use_skill(skill, summon.unwrap_or("Skill"));
        if skill.cost > 0 {
            self.store
                .apply(&Edit::SetField(FieldValue::Pool(skill.cost_kind, paid)));
            self.record_cost(skill, summon);
        }
        Ok(outcome)
    }

    fn use_skill(&mut self, skill: &Skill, source: &str) -> RollOutcome {
        let notation = skill.damage_dice.as_deref().unwrap_or_default();
        let outcome = dice::roll(notation, self.rng.as_mut());
        let result = if outcome.total > 0 {
            LogResult::from(outcome.total)
        } else {
            LogResult::from("Activated")
        };
        let detail = if outcome.is_zero() {
            "Effect".to_string()
        } else {
            outcome.detail()
        };
        self.record(
            format!("Use: {} ({source})", skill.name),
            result,
            detail,
            EntryKind::Combat,
        );
        outcome
    }

    fn record_cost(&mut self, skill: &Skill, summon: Option<&str>) {
        let amount = format!("-{} {}", skill.cost, skill.cost_kind);
        let (title, detail, kind) = match skill.cost_kind {
            PoolKind::Hp => ("Vital Cost", "Sacrifice", EntryKind::Failure),
            PoolKind::Nen => ("Aura Cost", "Spent", EntryKind::Info),
        };
        let title = match summon {
            Some(name) => format!("{title} ({name})"),
            None => title.to_string(),
        };
        self.record(title, amount, detail, kind);
    }

    /// Roll the equipped weapon's damage.
    pub fn roll_weapon(&mut self) -> RollOutcome {
        let weapon = self.store.active().weapon.clone();
        let outcome = dice::roll(&weapon.damage, self.rng.as_mut());
        let detail = if outcome.is_zero() {
            String::new()
        } else {
            outcome.detail()
        };
        self.record(
            format!("Attack: {}", weapon.name),
            outcome.total,
            detail,
            EntryKind::Combat,
        );
        outcome
    }

    /// Roll `1d20 + value` for one attribute of the active character.
    pub fn roll_attribute(&mut self, key: &str) -> SessionResult<CheckOutcome> {
        let doc = Arc::clone(self.store.active());
        let value = *doc
            .attributes
            .get(key)
            .ok_or_else(|| SessionError::UnknownAttribute(key.to_string()))?;
        let check = dice::attribute_check(value, self.rng.as_mut());
        self.record(
            doc.attribute_label(key),
            check.total,
            check.detail(),
            EntryKind::Info,
        );
        Ok(check)
    }

    /// Roll a single die with `sides` sides.
    pub fn roll_generic(&mut self, sides: u32) -> RollOutcome {
        let outcome = dice::roll_die(sides, self.rng.as_mut());
        self.record(
            format!("d{sides}"),
            outcome.total,
            "Generic roll",
            EntryKind::Info,
        );
        outcome
    }

    /// Roll arbitrary notation, e.g. from the command line.
    pub fn roll_notation(&mut self, notation: &str) -> RollOutcome {
        let outcome = dice::roll(notation, self.rng.as_mut());
        self.record(
            format!("Roll: {notation}"),
            outcome.total,
            outcome.detail(),
            EntryKind::Info,
        );
        outcome
    }

    /// Add `delta` to a pool, clamped to its bounds. A zero delta does
    /// nothing and returns `None`.
    pub fn adjust_pool(
        &mut self,
        owner: &PoolOwner,
        kind: PoolKind,
        delta: i32,
    ) -> SessionResult<Option<ResourcePool>> {
        if delta == 0 {
            return Ok(None);
        }
        let doc = Arc::clone(self.store.active());
        let (pool, label, edit) = match owner {
            PoolOwner::Character => {
                let next = ledger::adjust(doc.pool(kind), delta);
                (next, kind.to_string(), Edit::SetField(FieldValue::Pool(kind, next)))
            }
            PoolOwner::Summon(id) => {
                let summon = doc
                    .summon(id)
                    .ok_or_else(|| SessionError::SummonNotFound(id.clone()))?;
                let next = ledger::adjust(summon.pool(kind), delta);
                let edit = Edit::Patch(ListPatch::Summon {
                    id: id.clone(),
                    patch: SummonPatch::default().pool(kind, next),
                });
                (next, format!("{kind} ({})", summon.name), edit)
            }
        };

        self.store.apply(&edit);
        let direction = if delta > 0 { "Recovered" } else { "Spent" };
        let entry_kind = if kind == PoolKind::Hp && delta < 0 {
            EntryKind::Failure
        } else {
            EntryKind::Info
        };
        self.record(
            format!("Calculator: {label}"),
            pool.current,
            format!("{direction}: {}", delta.unsigned_abs()),
            entry_kind,
        );
        Ok(Some(pool))
    }

    /// Recover a fifth of the active character's HP and Nen.
    pub fn rest(&mut self) -> RestOutcome {
        let doc = Arc::clone(self.store.active());
        let outcome = ledger::rest(doc.hp, doc.nen);
        self.store
            .apply(&Edit::SetField(FieldValue::Pool(PoolKind::Hp, outcome.hp)));
        self.store
            .apply(&Edit::SetField(FieldValue::Pool(PoolKind::Nen, outcome.nen)));
        self.record(
            "Rest",
            "Recovered",
            format!(
                "+{} HP, +{} Nen (20%)",
                outcome.hp_delta, outcome.nen_delta
            ),
            EntryKind::Info,
        );
        outcome
    }

    // -----------------------------------------------------------------------
    // Charts
    // -----------------------------------------------------------------------

    /// The affinity hexagon of the active character.
    pub fn affinity_hexagon(&self) -> [Point; 6] {
        projection::hexagon(self.active().affinity, self.config.hexagon_size)
    }

    /// The attribute radar of the active character, if it has at least
    /// three attributes.
    pub fn attribute_radar(&self) -> Option<Vec<RadarAxis>> {
        projection::project(&self.active().attributes, &self.config.radar)
    }

    // -----------------------------------------------------------------------
    // Collaborators
    // -----------------------------------------------------------------------

    /// Replace the roster with stored characters. Offline, or when storage
    /// is empty, the bootstrap document is used. A failed fetch falls back
    /// to the bootstrap document and is returned as an error.
    pub fn load(&mut self) -> SessionResult<()> {
        let Some(repository) = &self.repository else {
            tracing::warn!("no storage configured; using local mode");
            self.store = DocumentStore::new();
            self.record(
                SYSTEM,
                "Offline",
                "No storage configured. Using local mode.",
                EntryKind::Failure,
            );
            return Ok(());
        };

        match repository.fetch_all() {
            Ok(records) => {
                tracing::info!(count = records.len(), "loaded roster");
                let docs = records.into_iter().map(|record| record.data).collect();
                self.store = DocumentStore::from_roster(docs);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load roster");
                self.store = DocumentStore::new();
                self.record(
                    SYSTEM,
                    "Error",
                    "Failed to load characters. Using local mode.",
                    EntryKind::Failure,
                );
                Err(e.into())
            }
        }
    }

    /// Store the active document. On failure the in-memory document is
    /// kept as it is.
    pub fn save(&mut self) -> SessionResult<()> {
        let doc = Arc::clone(self.store.active());
        let Some(repository) = &self.repository else {
            self.record(SYSTEM, "Offline", "Nothing saved", EntryKind::Failure);
            return Err(SessionError::Offline);
        };
        match repository.save(&doc) {
            Ok(()) => {
                tracing::info!(id = %doc.id, "saved character");
                self.record(SYSTEM, "Saved", "Character stored", EntryKind::Info);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(id = %doc.id, error = %e, "save failed");
                self.record(SYSTEM, "Error", "Save failed", EntryKind::Failure);
                Err(e.into())
            }
        }
    }

    /// Delete a character from storage and from the roster. Unknown ids
    /// are ignored. If storage refuses, the roster is left alone.
    pub fn delete_character(&mut self, id: &CharacterId) -> SessionResult<()> {
        if self.store.get(id).is_none() {
            return Ok(());
        }
        if let Some(Err(e)) = self.repository.as_ref().map(|repo| repo.delete(id)) {
            tracing::warn!(%id, error = %e, "delete failed");
            self.record(SYSTEM, "Error", "Delete failed", EntryKind::Failure);
            return Err(e.into());
        }
        self.store.remove(id);
        tracing::info!(%id, "deleted character");
        self.record(SYSTEM, "Deleted", "Character removed", EntryKind::Info);
        Ok(())
    }

    /// Embed an image and attach it to part of the active document.
    pub fn attach_portrait(&mut self, target: PortraitTarget, bytes: &[u8]) -> SessionResult<()> {
        let url = match embed_image(bytes, self.config.max_image_width) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!(error = %e, "image rejected");
                self.record(SYSTEM, "Error", "Image upload failed", EntryKind::Failure);
                return Err(e.into());
            }
        };
        let portrait = Some(url);
        let edit = match target {
            PortraitTarget::Character => Edit::SetField(FieldValue::Portrait(portrait)),
            PortraitTarget::Skill(id) => Edit::Patch(ListPatch::Skill {
                id,
                patch: SkillPatch::default().portrait(portrait),
            }),
            PortraitTarget::Summon(id) => Edit::Patch(ListPatch::Summon {
                id,
                patch: SummonPatch::default().portrait(portrait),
            }),
            PortraitTarget::Weapon => Edit::PatchWeapon(WeaponPatch::default().portrait(portrait)),
            PortraitTarget::Attribute(key) => Edit::SetAttributePortrait { key, portrait },
        };
        self.store.apply(&edit);
        Ok(())
    }

    /// Serialize the whole roster for backup.
    pub fn export(&self) -> SessionResult<String> {
        export_roster(self.store.roster()).map_err(SessionError::from)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use hs_mechanics::MechError;
    use hs_mechanics::dice::FixedRandom;

    use super::*;
    use crate::persistence::{PersistError, PersistResult, StoredCharacter};

    fn session(values: Vec<u32>) -> SheetSession {
        SheetSession::new(SheetConfig::default()).with_random_source(FixedRandom::new(values))
    }

    struct BrokenRepository;

    fn broken() -> PersistError {
        PersistError::Io(std::io::Error::other("connection refused"))
    }

    impl CharacterRepository for BrokenRepository {
        fn fetch_all(&self) -> PersistResult<Vec<StoredCharacter>> {
            Err(broken())
        }

        fn save(&self, _doc: &Character) -> PersistResult<()> {
            Err(broken())
        }

        fn delete(&self, _id: &CharacterId) -> PersistResult<()> {
            Err(broken())
        }
    }

    fn png() -> Vec<u8> {
        let img = ::image::RgbImage::new(32, 16);
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ::image::ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn hp_skill_costs_five() {
        let mut s = session(vec![2, 3, 4]);
        assert_eq!(s.active().hp, ResourcePool { current: 34, max: 34 });

        let outcome = s.roll_skill(&SkillId::from("3")).unwrap();

        assert_eq!(outcome.total, 9);
        assert_eq!(s.active().hp.current, 29);
        let entries = s.log().entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "Use: Blood Sacrifice (Skill)");
        assert_eq!(entries[0].result, LogResult::Number(9));
        assert_eq!(entries[0].detail, "[3d6]: 2+3+4");
        assert_eq!(entries[0].kind, EntryKind::Combat);
        assert_eq!(entries[1].result, LogResult::Label("-5 HP".into()));
        assert_eq!(entries[1].detail, "Sacrifice");
        assert_eq!(entries[1].kind, EntryKind::Failure);
    }

    #[test]
    fn unaffordable_skill_changes_nothing() {
        let mut s = session(vec![6]);
        s.edit(Edit::SetField(FieldValue::PoolCurrent(PoolKind::Hp, 5)));
        let before = Arc::clone(s.active());

        let err = s.roll_skill(&SkillId::from("3")).unwrap_err();

        assert!(matches!(
            err,
            SessionError::Mechanics(MechError::InsufficientResource {
                kind: PoolKind::Hp,
                cost: 5,
                current: 5,
            })
        ));
        assert!(Arc::ptr_eq(&before, s.active()));
        assert!(s.log().is_empty());
    }

    #[test]
    fn nen_skill_spends_nen() {
        let mut s = session(vec![5]);
        s.roll_skill(&SkillId::from("1")).unwrap();
        assert_eq!(s.active().nen.current, 31);
        assert_eq!(s.active().hp.current, 34);
        assert_eq!(s.log().len(), 2);
        assert_eq!(s.log().entries()[1].kind, EntryKind::Info);
    }

    #[test]
    fn free_skill_logs_once() {
        let mut s = session(vec![1, 1]);
        s.roll_skill(&SkillId::from("2")).unwrap();
        assert_eq!(s.log().len(), 1);
        assert_eq!(s.active().nen.current, 33);
    }

    #[test]
    fn skill_without_dice_is_activated() {
        let mut s = session(vec![1]);
        s.edit(Edit::Patch(ListPatch::Skill {
            id: SkillId::from("2"),
            patch: SkillPatch::default().damage_dice(None),
        }));
        let outcome = s.roll_skill(&SkillId::from("2")).unwrap();
        assert!(outcome.is_zero());
        let entry = s.log().last().unwrap();
        assert_eq!(entry.result, LogResult::Label("Activated".into()));
        assert_eq!(entry.detail, "Effect");
    }

    #[test]
    fn unknown_skill_is_error() {
        let mut s = session(vec![1]);
        let err = s.roll_skill(&SkillId::from("nope")).unwrap_err();
        assert!(matches!(err, SessionError::SkillNotFound(_)));
        assert!(s.log().is_empty());
    }

    #[test]
    fn summon_skill_is_paid_by_character() {
        let mut s = session(vec![4]);
        let summon = SummonId::from("s1");
        s.roll_summon_skill(&summon, &SkillId::from("s1k1")).unwrap();

        let doc = s.active();
        assert_eq!(doc.summon(&summon).unwrap().nen.current, 10);
        assert_eq!(doc.nen.current, 31);
        assert_eq!(s.log().entries()[0].title, "Use: Shadow Bite (Shadow Guardian)");
        assert_eq!(s.log().entries()[1].title, "Aura Cost (Shadow Guardian)");
    }

    #[test]
    fn summon_skill_rejected_when_character_is_drained() {
        let mut s = session(vec![4]);
        s.edit(Edit::SetField(FieldValue::PoolCurrent(PoolKind::Nen, 1)));
        let before = Arc::clone(s.active());

        let err = s
            .roll_summon_skill(&SummonId::from("s1"), &SkillId::from("s1k1"))
            .unwrap_err();

        assert!(matches!(
            err,
            SessionError::Mechanics(MechError::InsufficientResource { cost: 2, current: 1, .. })
        ));
        assert!(Arc::ptr_eq(&before, s.active()));
        assert!(s.log().is_empty());
    }

    #[test]
    fn weapon_attack() {
        let mut s = session(vec![7]);
        let outcome = s.roll_weapon();
        assert_eq!(outcome.total, 7);
        let entry = s.log().last().unwrap();
        assert_eq!(entry.title, "Attack: Nen Scythe");
        assert_eq!(entry.detail, "[1d10]: 7");
    }

    #[test]
    fn attribute_roll_uses_label() {
        let mut s = session(vec![10]);
        let check = s.roll_attribute("prestidigitation").unwrap();
        assert_eq!(check.total, 15);
        let entry = s.log().last().unwrap();
        assert_eq!(entry.title, "Dexterity");
        assert_eq!(entry.detail, "1d20 + 5");
        assert!(matches!(
            s.roll_attribute("luck"),
            Err(SessionError::UnknownAttribute(_))
        ));
    }

    #[test]
    fn generic_roll() {
        let mut s = session(vec![7]);
        assert_eq!(s.roll_generic(20).total, 7);
        assert_eq!(s.log().last().unwrap().title, "d20");
    }

    #[test]
    fn calculator_clamps_and_logs() {
        let mut s = session(vec![]);
        let pool = s
            .adjust_pool(&PoolOwner::Character, PoolKind::Hp, -40)
            .unwrap()
            .unwrap();
        assert_eq!(pool.current, 0);
        assert_eq!(s.active().hp.current, 0);
        let entry = s.log().last().unwrap();
        assert_eq!(entry.title, "Calculator: HP");
        assert_eq!(entry.result, LogResult::Number(0));
        assert_eq!(entry.detail, "Spent: 40");
        assert_eq!(entry.kind, EntryKind::Failure);
    }

    #[test]
    fn calculator_ignores_zero() {
        let mut s = session(vec![]);
        assert_eq!(
            s.adjust_pool(&PoolOwner::Character, PoolKind::Nen, 0).unwrap(),
            None
        );
        assert!(s.log().is_empty());
    }

    #[test]
    fn calculator_on_summon() {
        let mut s = session(vec![]);
        let owner = PoolOwner::Summon(SummonId::from("s1"));
        let pool = s.adjust_pool(&owner, PoolKind::Hp, -3).unwrap().unwrap();
        assert_eq!(pool, ResourcePool { current: 17, max: 20 });
        assert_eq!(s.log().last().unwrap().title, "Calculator: HP (Shadow Guardian)");

        let missing = PoolOwner::Summon(SummonId::from("s9"));
        assert!(matches!(
            s.adjust_pool(&missing, PoolKind::Hp, 1),
            Err(SessionError::SummonNotFound(_))
        ));
    }

    #[test]
    fn rest_recovers_a_fifth() {
        let mut s = session(vec![]);
        s.edit(Edit::SetField(FieldValue::PoolCurrent(PoolKind::Hp, 20)));
        let outcome = s.rest();
        assert_eq!(outcome.hp_delta, 6);
        assert_eq!(s.active().hp.current, 26);
        assert_eq!(s.active().nen.current, 44);
        insta::assert_snapshot!(s.log().last().unwrap().to_string(), @"Rest: Recovered (+6 HP, +11 Nen (20%))");
    }

    #[test]
    fn offline_load_keeps_bootstrap() {
        let mut s = session(vec![]);
        assert!(s.is_offline());
        s.load().unwrap();
        assert_eq!(s.active().id.as_str(), "char_default");
        let entry = s.log().last().unwrap();
        assert_eq!(entry.result, LogResult::Label("Offline".into()));
        assert_eq!(entry.kind, EntryKind::Failure);
        assert!(matches!(s.save(), Err(SessionError::Offline)));
    }

    #[test]
    fn failed_load_falls_back() {
        let mut s = session(vec![]).with_repository(BrokenRepository);
        assert!(matches!(s.load(), Err(SessionError::Storage(_))));
        assert_eq!(s.store().len(), 1);
        assert_eq!(s.active().id.as_str(), "char_default");
        assert_eq!(s.log().last().unwrap().kind, EntryKind::Failure);
    }

    #[test]
    fn failed_save_keeps_document() {
        let mut s = session(vec![]).with_repository(BrokenRepository);
        s.edit(Edit::SetField(FieldValue::Name("Leorio".into())));
        assert!(s.save().is_err());
        assert_eq!(s.active().name, "Leorio");
    }

    #[test]
    fn failed_delete_keeps_roster() {
        let mut s = session(vec![]).with_repository(BrokenRepository);
        let id = s.active().id.clone();
        assert!(s.delete_character(&id).is_err());
        assert_eq!(s.store().len(), 1);
        assert_eq!(s.log().last().unwrap().detail, "Delete failed");
    }

    #[test]
    fn roster_round_trips_through_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let config = SheetConfig::default().with_data_dir(tmp.path());
        let mut s = SheetSession::new(config.clone());
        let id = s.create_character("Gon").unwrap();
        s.edit(Edit::SetField(FieldValue::Level(12)));
        s.save().unwrap();

        let mut reloaded = SheetSession::new(config);
        reloaded.load().unwrap();
        assert_eq!(reloaded.active().id, id);
        assert_eq!(reloaded.active().level, 12);
    }

    #[test]
    fn delete_then_fallback() {
        let tmp = tempfile::tempdir().unwrap();
        let mut s = SheetSession::new(SheetConfig::default().with_data_dir(tmp.path()));
        let id = s.active().id.clone();
        s.delete_character(&id).unwrap();
        assert_eq!(s.store().len(), 1);
        assert_eq!(s.log().last().unwrap().result, LogResult::Label("Deleted".into()));
    }

    #[test]
    fn portrait_attaches_to_skill() {
        let mut s = session(vec![]);
        s.attach_portrait(PortraitTarget::Skill(SkillId::from("1")), &png())
            .unwrap();
        let skill = s.active().skill(&SkillId::from("1")).unwrap();
        assert!(
            skill
                .portrait
                .as_deref()
                .unwrap()
                .starts_with("data:image/jpeg;base64,")
        );
    }

    #[test]
    fn bad_portrait_is_reported() {
        let mut s = session(vec![]);
        let err = s
            .attach_portrait(PortraitTarget::Character, b"not an image")
            .unwrap_err();
        assert!(matches!(err, SessionError::Image(_)));
        assert!(s.active().portrait.is_none());
        assert_eq!(s.log().last().unwrap().kind, EntryKind::Failure);
    }

    #[test]
    fn charts_follow_active_character() {
        let s = session(vec![]);
        let radar = s.attribute_radar().unwrap();
        assert_eq!(radar.len(), 6);
        assert_eq!(radar[0].key, "strength");
        assert_eq!(s.affinity_hexagon().len(), 6);
    }

    #[test]
    fn export_contains_roster() {
        let mut s = session(vec![]);
        s.create_character("Gon").unwrap();
        let json = s.export().unwrap();
        assert!(json.contains("\"Gon\""));
        assert!(json.contains("char_default"));
    }
}
