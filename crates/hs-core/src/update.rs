//! Every operation here takes a document by reference and returns a new
//! one. The new document shares every `Arc` it did not need to touch with
//! the input, so callers can detect exactly what changed with
//! [`Arc::ptr_eq`]. Addressing an id that does not exist is a no-op.

use std::sync::Arc;

use crate::character::{
    AttributeMeta, Character, Item, PoolKind, ResourcePool, Skill, Summon, is_base_attribute,
};
use crate::id::{ItemId, SkillId, SummonId};
use crate::patch::{FieldValue, ItemPatch, SkillPatch, SummonPatch, WeaponPatch};

/// A patch addressed at one entry of an id-keyed list.
#[derive(Debug, Clone, PartialEq)]
pub enum ListPatch {
    /// Patch a character skill.
    Skill {
        /// Target skill.
        id: SkillId,
        /// Fields to merge.
        patch: SkillPatch,
    },
    /// Patch an inventory item.
    Item {
        /// Target item.
        id: ItemId,
        /// Fields to merge.
        patch: ItemPatch,
    },
    /// Patch a summon.
    Summon {
        /// Target summon.
        id: SummonId,
        /// Fields to merge.
        patch: SummonPatch,
    },
}

/// A new entry to append to one of the lists. Ids are assigned by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum NewEntry {
    /// Append a character skill.
    Skill(Skill),
    /// Append an inventory item.
    Item(Item),
    /// Append a summon.
    Summon(Summon),
    /// Append a skill to one summon's list.
    SummonSkill {
        /// Owning summon.
        summon_id: SummonId,
        /// The skill to append.
        skill: Skill,
    },
}

/// The address of a list entry to remove.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryRef {
    /// A character skill.
    Skill(SkillId),
    /// An inventory item.
    Item(ItemId),
    /// A summon.
    Summon(SummonId),
    /// A skill in one summon's list.
    SummonSkill {
        /// Owning summon.
        summon_id: SummonId,
        /// Skill within that summon.
        skill_id: SkillId,
    },
}

/// Every edit that can be applied to a character document.
#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    /// Replace one top-level field.
    SetField(FieldValue),
    /// Insert or replace one attribute value.
    SetAttribute {
        /// Attribute key.
        key: String,
        /// New value.
        value: i32,
    },
    /// Add a fresh attribute with value 0 and a placeholder label.
    AddAttribute,
    /// Remove a non-base attribute together with its label and metadata.
    RemoveAttribute {
        /// Attribute key.
        key: String,
    },
    /// Rename the display label of an attribute.
    SetAttributeLabel {
        /// Attribute key.
        key: String,
        /// New label.
        label: String,
    },
    /// Set or clear the portrait of an attribute.
    SetAttributePortrait {
        /// Attribute key.
        key: String,
        /// New portrait.
        portrait: Option<String>,
    },
    /// Patch the equipped weapon.
    PatchWeapon(WeaponPatch),
    /// Patch one list entry.
    Patch(ListPatch),
    /// Patch one skill of one summon.
    PatchSummonSkill {
        /// Owning summon.
        summon_id: SummonId,
        /// Skill within that summon.
        skill_id: SkillId,
        /// Fields to merge.
        patch: SkillPatch,
    },
    /// Append a list entry.
    Append(NewEntry),
    /// Remove a list entry.
    Remove(EntryRef),
    /// Append a condition label.
    AddCondition(String),
    /// Remove the condition at an index.
    RemoveCondition(usize),
}

/// Apply any [`Edit`] to a document.
pub fn apply_edit(doc: &Character, edit: &Edit) -> Character {
    match edit {
        Edit::SetField(value) => set_field(doc, value),
        Edit::SetAttribute { key, value } => set_attribute(doc, key, *value),
        Edit::AddAttribute => add_attribute(doc),
        Edit::RemoveAttribute { key } => remove_attribute(doc, key),
        Edit::SetAttributeLabel { key, label } => set_attribute_label(doc, key, label),
        Edit::SetAttributePortrait { key, portrait } => {
            set_attribute_portrait(doc, key, portrait.clone())
        }
        Edit::PatchWeapon(patch) => patch_weapon(doc, patch),
        Edit::Patch(patch) => merge_patch(doc, patch),
        Edit::PatchSummonSkill {
            summon_id,
            skill_id,
            patch,
        } => merge_nested_patch(doc, summon_id, skill_id, patch),
        Edit::Append(entry) => append_entry(doc, entry),
        Edit::Remove(target) => remove_entry(doc, target),
        Edit::AddCondition(label) => add_condition(doc, label),
        Edit::RemoveCondition(index) => remove_condition(doc, *index),
    }
}

/// Replace one top-level field.
pub fn set_field(doc: &Character, value: &FieldValue) -> Character {
    let mut next = doc.clone();
    match value {
        FieldValue::Name(v) => next.name = v.clone(),
        FieldValue::Nickname(v) => next.nickname = v.clone(),
        FieldValue::Portrait(v) => next.portrait = v.clone(),
        FieldValue::Age(v) => next.age = v.clone(),
        FieldValue::Nationality(v) => next.nationality = v.clone(),
        FieldValue::Height(v) => next.height = v.clone(),
        FieldValue::Weight(v) => next.weight = v.clone(),
        FieldValue::Alignment(v) => next.alignment = v.clone(),
        FieldValue::Bio(v) => next.bio = v.clone(),
        FieldValue::Level(v) => next.level = *v,
        FieldValue::Xp(v) => next.xp = *v,
        FieldValue::MaxXp(v) => next.max_xp = *v,
        FieldValue::Affinity(v) => next.affinity = *v,
        FieldValue::Pool(kind, pool) => {
            let pool = ResourcePool::new(pool.current, pool.max);
            *pool_mut(&mut next, *kind) = pool;
        }
        FieldValue::PoolCurrent(kind, current) => {
            let slot = pool_mut(&mut next, *kind);
            *slot = slot.with_current(*current);
        }
        FieldValue::PoolMax(kind, max) => {
            let slot = pool_mut(&mut next, *kind);
            *slot = slot.with_max(*max);
        }
        FieldValue::ArmorClass(v) => next.armor_class = *v,
        FieldValue::Conditions(v) => next.conditions = v.clone(),
        FieldValue::AttributeLabels(v) => next.attribute_labels = v.clone(),
        FieldValue::AttributeMeta(v) => next.attribute_meta = v.clone(),
        FieldValue::Weapon(v) => next.weapon = v.clone(),
    }
    next
}

fn pool_mut(doc: &mut Character, kind: PoolKind) -> &mut ResourcePool {
    match kind {
        PoolKind::Hp => &mut doc.hp,
        PoolKind::Nen => &mut doc.nen,
    }
}

/// Insert or replace one attribute value. New keys go at the end; the
/// label map is left alone.
pub fn set_attribute(doc: &Character, key: &str, value: i32) -> Character {
    let mut next = doc.clone();
    next.attributes.insert(key.to_string(), value);
    next
}

/// The key [`add_attribute`] would use next: `attr_<n>` with the smallest
/// unused `n`, counting from the current attribute count.
pub fn next_attribute_key(doc: &Character) -> String {
    (doc.attributes.len() + 1..)
        .map(|n| format!("attr_{n}"))
        .find(|key| !doc.attributes.contains_key(key) && !doc.attribute_labels.contains_key(key))
        .unwrap_or_else(|| "attr_new".to_string())
}

/// Add a new attribute with value 0 and label "New".
pub fn add_attribute(doc: &Character) -> Character {
    let key = next_attribute_key(doc);
    let mut next = doc.clone();
    next.attributes.insert(key.clone(), 0);
    next.attribute_labels.insert(key, "New".to_string());
    next
}

/// Remove a dynamically added attribute and prune its label and metadata.
/// Base attributes are never removed.
pub fn remove_attribute(doc: &Character, key: &str) -> Character {
    if is_base_attribute(key) || !doc.attributes.contains_key(key) {
        return doc.clone();
    }
    let mut next = doc.clone();
    next.attributes.shift_remove(key);
    next.attribute_labels.shift_remove(key);
    next.attribute_meta.shift_remove(key);
    next
}

/// Rename the display label of an attribute.
pub fn set_attribute_label(doc: &Character, key: &str, label: &str) -> Character {
    let mut next = doc.clone();
    next.attribute_labels
        .insert(key.to_string(), label.to_string());
    next
}

/// Set or clear the portrait of an attribute.
pub fn set_attribute_portrait(doc: &Character, key: &str, portrait: Option<String>) -> Character {
    let mut next = doc.clone();
    next.attribute_meta
        .insert(key.to_string(), AttributeMeta { portrait });
    next
}

/// Patch the equipped weapon.
pub fn patch_weapon(doc: &Character, patch: &WeaponPatch) -> Character {
    let mut next = doc.clone();
    next.weapon = patch.merge_into(&doc.weapon);
    next
}

/// Shallow-merge a patch into the list entry with the matching id.
pub fn merge_patch(doc: &Character, patch: &ListPatch) -> Character {
    let mut next = doc.clone();
    match patch {
        ListPatch::Skill { id, patch } => {
            next.skills = replace_where(&doc.skills, |s| &s.id == id, |s| patch.merge_into(s));
        }
        ListPatch::Item { id, patch } => {
            next.inventory =
                replace_where(&doc.inventory, |i| &i.id == id, |i| patch.merge_into(i));
        }
        ListPatch::Summon { id, patch } => {
            next.summons = replace_where(&doc.summons, |s| &s.id == id, |s| patch.merge_into(s));
        }
    }
    next
}

/// Shallow-merge a patch into one skill of one summon. A miss at either
/// level leaves the document unchanged.
pub fn merge_nested_patch(
    doc: &Character,
    summon_id: &SummonId,
    skill_id: &SkillId,
    patch: &SkillPatch,
) -> Character {
    let found = doc
        .summon(summon_id)
        .is_some_and(|summon| summon.skill(skill_id).is_some());
    if !found {
        return doc.clone();
    }

    let mut next = doc.clone();
    next.summons = replace_where(
        &doc.summons,
        |s| &s.id == summon_id,
        |summon| {
            let mut summon = summon.clone();
            summon.skills =
                replace_where(&summon.skills, |k| &k.id == skill_id, |k| patch.merge_into(k));
            summon
        },
    );
    next
}

/// Append an entry at the end of its list.
pub fn append_entry(doc: &Character, entry: &NewEntry) -> Character {
    let mut next = doc.clone();
    match entry {
        NewEntry::Skill(skill) => next.skills.push(Arc::new(skill.clone())),
        NewEntry::Item(item) => next.inventory.push(Arc::new(item.clone())),
        NewEntry::Summon(summon) => next.summons.push(Arc::new(summon.clone())),
        NewEntry::SummonSkill { summon_id, skill } => {
            next.summons = replace_where(
                &doc.summons,
                |s| &s.id == summon_id,
                |summon| {
                    let mut summon = summon.clone();
                    summon.skills.push(Arc::new(skill.clone()));
                    summon
                },
            );
        }
    }
    next
}

/// Remove the entry with the matching id. Missing ids are a no-op.
pub fn remove_entry(doc: &Character, target: &EntryRef) -> Character {
    let mut next = doc.clone();
    match target {
        EntryRef::Skill(id) => next.skills = retain_where(&doc.skills, |s| &s.id != id),
        EntryRef::Item(id) => next.inventory = retain_where(&doc.inventory, |i| &i.id != id),
        EntryRef::Summon(id) => next.summons = retain_where(&doc.summons, |s| &s.id != id),
        EntryRef::SummonSkill {
            summon_id,
            skill_id,
        } => {
            let found = doc
                .summon(summon_id)
                .is_some_and(|summon| summon.skill(skill_id).is_some());
            if found {
                next.summons = replace_where(
                    &doc.summons,
                    |s| &s.id == summon_id,
                    |summon| {
                        let mut summon = summon.clone();
                        summon.skills = retain_where(&summon.skills, |k| &k.id != skill_id);
                        summon
                    },
                );
            }
        }
    }
    next
}

/// Append a condition label. Duplicates are allowed.
pub fn add_condition(doc: &Character, label: &str) -> Character {
    let mut next = doc.clone();
    next.conditions.push(label.to_string());
    next
}

/// Remove the condition at `index`; out-of-range indices are a no-op.
pub fn remove_condition(doc: &Character, index: usize) -> Character {
    let mut next = doc.clone();
    if index < next.conditions.len() {
        next.conditions.remove(index);
    }
    next
}

/// Rebuild a list, replacing matching entries and sharing the rest.
fn replace_where<T>(
    list: &[Arc<T>],
    is_target: impl Fn(&T) -> bool,
    replace: impl Fn(&T) -> T,
) -> Vec<Arc<T>> {
    list.iter()
        .map(|entry| {
            if is_target(&**entry) {
                Arc::new(replace(&**entry))
            } else {
                Arc::clone(entry)
            }
        })
        .collect()
}

fn retain_where<T>(list: &[Arc<T>], keep: impl Fn(&T) -> bool) -> Vec<Arc<T>> {
    list.iter()
        .filter(|&entry| keep(&**entry))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::SkillCategory;
    use crate::defaults::bootstrap_character;

    fn sid(s: &str) -> SkillId {
        SkillId::from(s)
    }

    fn all_ptr_eq<T>(a: &[Arc<T>], b: &[Arc<T>]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| Arc::ptr_eq(x, y))
    }

    /// A character with two summons that both own a skill with id "k".
    fn twin_summons() -> Character {
        let mut doc = bootstrap_character();
        let mut a = Summon::new(SummonId::from("A"), "Alpha");
        a.skills = vec![Arc::new(Skill::new(sid("k"), "Claw", SkillCategory::Summon))];
        let mut b = Summon::new(SummonId::from("B"), "Beta");
        b.skills = vec![Arc::new(Skill::new(sid("k"), "Claw", SkillCategory::Summon))];
        doc.summons = vec![Arc::new(a), Arc::new(b)];
        doc
    }

    #[test]
    fn set_field_replaces_only_that_field() {
        let doc = bootstrap_character();
        let next = set_field(&doc, &FieldValue::Nickname("Reaper".to_string()));
        assert_eq!(next.nickname, "Reaper");
        assert_eq!(next.name, doc.name);
        assert!(all_ptr_eq(&doc.skills, &next.skills));
        assert!(all_ptr_eq(&doc.summons, &next.summons));
    }

    #[test]
    fn set_field_pool_values_are_clamped() {
        let doc = bootstrap_character();
        let next = set_field(&doc, &FieldValue::PoolCurrent(PoolKind::Hp, 999));
        assert_eq!(next.hp, ResourcePool { current: 34, max: 34 });

        let next = set_field(&doc, &FieldValue::PoolMax(PoolKind::Nen, 10));
        assert_eq!(next.nen, ResourcePool { current: 10, max: 10 });

        let next = set_field(
            &doc,
            &FieldValue::Pool(PoolKind::Hp, ResourcePool { current: -4, max: 12 }),
        );
        assert_eq!(next.hp, ResourcePool { current: 0, max: 12 });
    }

    #[test]
    fn set_attribute_replaces_in_place_and_appends_new_keys() {
        let doc = bootstrap_character();
        let next = set_attribute(&doc, "charisma", 4);
        assert_eq!(next.attributes["charisma"], 4);
        assert_eq!(next.attributes.get_index_of("charisma"), Some(3));

        let next = set_attribute(&next, "luck", 2);
        assert_eq!(next.attributes.get_index_of("luck"), Some(6));
        assert!(!next.attribute_labels.contains_key("luck"));
        assert_eq!(next.attribute_label("luck"), "luck");
    }

    #[test]
    fn add_and_remove_dynamic_attribute() {
        let doc = bootstrap_character();
        let key = next_attribute_key(&doc);
        assert_eq!(key, "attr_7");

        let added = add_attribute(&doc);
        assert_eq!(added.attributes[key.as_str()], 0);
        assert_eq!(added.attribute_label(&key), "New");

        let with_portrait = set_attribute_portrait(&added, &key, Some("data:x".to_string()));
        let removed = remove_attribute(&with_portrait, &key);
        assert!(!removed.attributes.contains_key(&key));
        assert!(!removed.attribute_labels.contains_key(&key));
        assert!(!removed.attribute_meta.contains_key(&key));
    }

    #[test]
    fn base_attributes_cannot_be_removed() {
        let doc = bootstrap_character();
        assert_eq!(remove_attribute(&doc, "strength"), doc);
    }

    #[test]
    fn merge_patch_touches_only_matching_skill() {
        let doc = bootstrap_character();
        let next = merge_patch(
            &doc,
            &ListPatch::Skill {
                id: sid("2"),
                patch: SkillPatch::default().name("Umbral Step"),
            },
        );

        assert_eq!(next.skills.len(), doc.skills.len());
        assert_eq!(next.skills[1].name, "Umbral Step");
        assert_eq!(next.skills[1].id, sid("2"));
        assert!(Arc::ptr_eq(&doc.skills[0], &next.skills[0]));
        assert!(Arc::ptr_eq(&doc.skills[2], &next.skills[2]));
        let order: Vec<_> = next.skills.iter().map(|s| s.id.clone()).collect();
        assert_eq!(order, vec![sid("1"), sid("2"), sid("3")]);
    }

    #[test]
    fn merge_patch_miss_is_noop() {
        let doc = bootstrap_character();
        let next = merge_patch(
            &doc,
            &ListPatch::Item {
                id: ItemId::from("nope"),
                patch: ItemPatch::default().quantity(9),
            },
        );
        assert_eq!(next, doc);
        assert!(all_ptr_eq(&doc.inventory, &next.inventory));
    }

    #[test]
    fn merge_patch_summon() {
        let doc = bootstrap_character();
        let next = merge_patch(
            &doc,
            &ListPatch::Summon {
                id: SummonId::from("s1"),
                patch: SummonPatch::default().kind("Shade"),
            },
        );
        assert_eq!(next.summons[0].kind, "Shade");
        assert!(all_ptr_eq(&doc.summons[0].skills, &next.summons[0].skills));
    }

    #[test]
    fn nested_patch_is_scoped_per_summon() {
        let doc = twin_summons();
        let next = merge_nested_patch(
            &doc,
            &SummonId::from("A"),
            &sid("k"),
            &SkillPatch::default().name("Rend"),
        );
        assert_eq!(next.summons[0].skills[0].name, "Rend");
        assert_eq!(next.summons[1].skills[0].name, "Claw");
        assert!(Arc::ptr_eq(&doc.summons[1], &next.summons[1]));
    }

    #[test]
    fn nested_patch_miss_at_either_level_is_noop() {
        let doc = twin_summons();
        let patch = SkillPatch::default().name("Rend");

        let missing_summon = merge_nested_patch(&doc, &SummonId::from("Z"), &sid("k"), &patch);
        assert_eq!(missing_summon, doc);

        let missing_skill = merge_nested_patch(&doc, &SummonId::from("A"), &sid("q"), &patch);
        assert_eq!(missing_skill, doc);
        assert!(all_ptr_eq(&doc.summons, &missing_skill.summons));
    }

    #[test]
    fn append_goes_to_the_end() {
        let doc = bootstrap_character();
        let next = append_entry(
            &doc,
            &NewEntry::Item(Item::new(ItemId::from("i4"), "Rope", 1)),
        );
        assert_eq!(next.inventory.len(), 4);
        assert_eq!(next.inventory[3].name, "Rope");
        assert!(all_ptr_eq(&doc.inventory, &next.inventory[..3]));
    }

    #[test]
    fn append_summon_skill() {
        let doc = twin_summons();
        let next = append_entry(
            &doc,
            &NewEntry::SummonSkill {
                summon_id: SummonId::from("B"),
                skill: Skill::new(sid("k2"), "Howl", SkillCategory::Summon),
            },
        );
        assert_eq!(next.summons[1].skills.len(), 2);
        assert_eq!(next.summons[0].skills.len(), 1);
        assert!(Arc::ptr_eq(&doc.summons[0], &next.summons[0]));
    }

    #[test]
    fn remove_missing_id_returns_equal_document() {
        let doc = bootstrap_character();
        let next = remove_entry(&doc, &EntryRef::Skill(sid("404")));
        assert_eq!(next, doc);
    }

    #[test]
    fn remove_last_entry_leaves_empty_list() {
        let mut doc = bootstrap_character();
        doc.inventory.truncate(1);
        let next = remove_entry(&doc, &EntryRef::Item(ItemId::from("i1")));
        assert!(next.inventory.is_empty());
    }

    #[test]
    fn remove_summon_skill_is_scoped() {
        let doc = twin_summons();
        let next = remove_entry(
            &doc,
            &EntryRef::SummonSkill {
                summon_id: SummonId::from("A"),
                skill_id: sid("k"),
            },
        );
        assert!(next.summons[0].skills.is_empty());
        assert_eq!(next.summons[1].skills.len(), 1);
        assert!(Arc::ptr_eq(&doc.summons[1], &next.summons[1]));
    }

    #[test]
    fn conditions_allow_duplicates_and_ignore_bad_index() {
        let doc = bootstrap_character();
        let next = add_condition(&doc, "Ren");
        assert_eq!(next.conditions, vec!["Ren", "Stealth", "Ren"]);
        let next = remove_condition(&next, 0);
        assert_eq!(next.conditions, vec!["Stealth", "Ren"]);
        assert_eq!(remove_condition(&next, 10), next);
    }

    #[test]
    fn weapon_patch_through_edit() {
        let doc = bootstrap_character();
        let next = apply_edit(&doc, &Edit::PatchWeapon(WeaponPatch::default().damage("2d4")));
        assert_eq!(next.weapon.damage, "2d4");
        assert_eq!(next.weapon.name, "Nen Scythe");
    }

    #[test]
    fn apply_edit_dispatches_nested_patch() {
        let doc = bootstrap_character();
        let next = apply_edit(
            &doc,
            &Edit::PatchSummonSkill {
                summon_id: SummonId::from("s1"),
                skill_id: sid("s1k1"),
                patch: SkillPatch::default().damage_dice(Some("2d6".to_string())),
            },
        );
        assert_eq!(next.summons[0].skills[0].damage_dice.as_deref(), Some("2d6"));
    }
}
