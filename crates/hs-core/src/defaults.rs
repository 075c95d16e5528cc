use std::sync::Arc;

use indexmap::IndexMap;

use crate::character::{
    AffinityType, Character, Item, PoolKind, ResourcePool, Skill, SkillCategory, Summon, Weapon,
};
use crate::id::{CharacterId, ItemId, SkillId, SummonId};

/// Identifier of the bootstrap document.
pub const BOOTSTRAP_ID: &str = "char_default";

/// The document shown when the roster is empty or could not be loaded.
pub fn bootstrap_character() -> Character {
    let attributes: IndexMap<String, i32> = [
        ("strength", -2),
        ("constitution", -2),
        ("intelligence", 0),
        ("charisma", -3),
        ("determination", 3),
        ("prestidigitation", 5),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect();

    let attribute_labels: IndexMap<String, String> = [
        ("strength", "Strength"),
        ("constitution", "Constitution"),
        ("intelligence", "Intelligence"),
        ("charisma", "Charisma"),
        ("determination", "Determination"),
        ("prestidigitation", "Dexterity"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    let mut pulse = Skill::new(SkillId::from("1"), "Pulse Strike", SkillCategory::Weapon)
        .with_cost(2, PoolKind::Nen)
        .with_damage("1d8")
        .with_description("Strikes the air, sending a shockwave of aura at the target.");
    pulse.scaling = Some("determination".to_string());

    let mut shadow_step = Skill::new(SkillId::from("2"), "Shadow Step", SkillCategory::Combat)
        .with_damage("2d6")
        .with_description("Silent movement. Reaching a target unseen adds the damage dice.");
    shadow_step.activation = "Bonus".to_string();
    shadow_step.scaling = Some("prestidigitation".to_string());

    let sacrifice = Skill::new(SkillId::from("3"), "Blood Sacrifice", SkillCategory::Hatsu)
        .with_cost(5, PoolKind::Hp)
        .with_damage("3d6")
        .with_description("Trades vitality for raw damage.");

    let mut bite = Skill::new(SkillId::from("s1k1"), "Shadow Bite", SkillCategory::Combat)
        .with_cost(2, PoolKind::Nen)
        .with_damage("1d6")
        .with_description("A quick attack with the fangs.");
    bite.activation = "Passive".to_string();

    let mut guardian = Summon::new(SummonId::from("s1"), "Shadow Guardian");
    guardian.hp = ResourcePool::full(20);
    guardian.nen = ResourcePool::full(10);
    guardian.description = "A beast of living shadow bound to its summoner.".to_string();
    guardian.skills = vec![Arc::new(bite)];

    Character {
        id: CharacterId::from(BOOTSTRAP_ID),
        name: "Cristian Martínez".to_string(),
        nickname: "Hades".to_string(),
        portrait: None,
        age: "18".to_string(),
        nationality: "Peruvian".to_string(),
        height: "1.72 m".to_string(),
        weight: "64 kg".to_string(),
        alignment: "True Neutral".to_string(),
        bio: "Grew up on the streets of Meteor City.".to_string(),
        level: 5,
        xp: 250,
        max_xp: 600,
        affinity: AffinityType::Specialist,
        hp: ResourcePool::new(34, 34),
        nen: ResourcePool::new(33, 58),
        armor_class: 15,
        conditions: vec!["Ren".to_string(), "Stealth".to_string()],
        attributes,
        attribute_labels,
        attribute_meta: IndexMap::new(),
        weapon: Weapon {
            name: "Nen Scythe".to_string(),
            damage: "1d10".to_string(),
            description: "A conjured scythe that drains aura.".to_string(),
            powers: "On a critical hit, recover 1d4 Nen.".to_string(),
            portrait: None,
        },
        skills: vec![Arc::new(pulse), Arc::new(shadow_step), Arc::new(sacrifice)],
        inventory: vec![
            Arc::new(Item::new(ItemId::from("i1"), "Short Sword", 1)),
            Arc::new(Item::new(ItemId::from("i2"), "Healing Potion", 2)),
            Arc::new(Item::new(ItemId::from("i3"), "Hunter License", 1)),
        ],
        summons: vec![Arc::new(guardian)],
    }
}

impl Character {
    /// A fresh document built from the bootstrap template with a new random id.
    pub fn blank(name: impl Into<String>) -> Self {
        Self {
            id: CharacterId::new_random(),
            name: name.into(),
            nickname: "New Hunter".to_string(),
            ..bootstrap_character()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bootstrap_satisfies_pool_invariant() {
        let c = bootstrap_character();
        assert_eq!(c.hp, ResourcePool { current: 34, max: 34 });
        assert_eq!(c.nen, ResourcePool { current: 33, max: 58 });
        for summon in &c.summons {
            assert!(summon.hp.current <= summon.hp.max);
            assert!(summon.nen.current <= summon.nen.max);
        }
    }

    #[test]
    fn bootstrap_is_deterministic() {
        assert_eq!(bootstrap_character(), bootstrap_character());
        assert_eq!(bootstrap_character().id.as_str(), BOOTSTRAP_ID);
    }

    #[test]
    fn blank_gets_fresh_id() {
        let a = Character::blank("Gon");
        let b = Character::blank("Killua");
        assert_ne!(a.id, b.id);
        assert_ne!(a.id.as_str(), BOOTSTRAP_ID);
        assert_eq!(a.name, "Gon");
        assert_eq!(a.nickname, "New Hunter");
    }
}
