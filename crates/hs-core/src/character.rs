use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::id::{CharacterId, ItemId, SkillId, SummonId};

/// Attribute keys every character starts with. These cannot be removed.
pub const BASE_ATTRIBUTES: [&str; 6] = [
    "strength",
    "constitution",
    "intelligence",
    "charisma",
    "determination",
    "prestidigitation",
];

/// Returns true if `key` is one of the fixed base attributes.
pub fn is_base_attribute(key: &str) -> bool {
    BASE_ATTRIBUTES.contains(&key)
}

/// A character's Nen specialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AffinityType {
    /// Strengthens the natural abilities of things.
    Enhancer,
    /// Changes the properties of aura.
    Transmuter,
    /// Projects aura away from the body.
    Emitter,
    /// Creates objects out of aura.
    Conjurer,
    /// Controls living and non-living things.
    Manipulator,
    /// Abilities outside the other five categories.
    Specialist,
}

impl AffinityType {
    /// All six affinity types in declaration order.
    pub const ALL: [AffinityType; 6] = [
        Self::Enhancer,
        Self::Transmuter,
        Self::Emitter,
        Self::Conjurer,
        Self::Manipulator,
        Self::Specialist,
    ];

    /// Parse an affinity type by name (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.to_string().to_lowercase() == lower)
    }
}

impl fmt::Display for AffinityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enhancer => write!(f, "Enhancer"),
            Self::Transmuter => write!(f, "Transmuter"),
            Self::Emitter => write!(f, "Emitter"),
            Self::Conjurer => write!(f, "Conjurer"),
            Self::Manipulator => write!(f, "Manipulator"),
            Self::Specialist => write!(f, "Specialist"),
        }
    }
}

/// Which resource pool a value or cost refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PoolKind {
    /// Aura pool.
    #[default]
    Nen,
    /// Vitality pool.
    #[serde(rename = "HP")]
    Hp,
}

impl PoolKind {
    /// Parse a pool kind ("hp" or "nen", case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "hp" => Some(Self::Hp),
            "nen" => Some(Self::Nen),
            _ => None,
        }
    }
}

impl fmt::Display for PoolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nen => write!(f, "Nen"),
            Self::Hp => write!(f, "HP"),
        }
    }
}

/// A depletable stat with `0 <= current <= max`.
///
/// The constructors clamp instead of rejecting, so a pool built through
/// them always satisfies the invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ResourcePool {
    /// Current value.
    pub current: i32,
    /// Maximum value.
    pub max: i32,
}

impl ResourcePool {
    /// Create a pool, clamping `max` to be non-negative and `current` into range.
    pub fn new(current: i32, max: i32) -> Self {
        let max = max.max(0);
        Self {
            current: current.clamp(0, max),
            max,
        }
    }

    /// Create a pool starting at its maximum.
    pub fn full(max: i32) -> Self {
        Self::new(max, max)
    }

    /// The same pool with a different current value (clamped).
    pub fn with_current(self, current: i32) -> Self {
        Self::new(current, self.max)
    }

    /// The same pool with a different maximum; the current value is clamped down.
    pub fn with_max(self, max: i32) -> Self {
        Self::new(self.current, max)
    }

    /// Returns true if the pool is at zero.
    pub fn is_empty(&self) -> bool {
        self.current <= 0
    }

    /// Returns true if the pool is at its maximum.
    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }

    /// Fraction of the pool that is filled (0.0 to 1.0).
    pub fn fraction(&self) -> f64 {
        if self.max == 0 {
            return 0.0;
        }
        f64::from(self.current) / f64::from(self.max)
    }
}

impl fmt::Display for ResourcePool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.current, self.max)
    }
}

/// Skill category, used to group skills into tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillCategory {
    /// Signature Nen ability.
    Hatsu,
    /// General combat technique.
    Combat,
    /// Technique tied to the equipped weapon.
    Weapon,
    /// Skill owned by a summon.
    Summon,
}

impl fmt::Display for SkillCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hatsu => write!(f, "Hatsu"),
            Self::Combat => write!(f, "Combat"),
            Self::Weapon => write!(f, "Weapon"),
            Self::Summon => write!(f, "Summon"),
        }
    }
}

/// A skill owned by a character or a summon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    /// Identifier, unique within the owning list.
    pub id: SkillId,
    /// Display name.
    pub name: String,
    /// Tab the skill is shown under.
    pub category: SkillCategory,
    /// Free-text activation type (e.g. "Active", "Bonus", "Passive").
    #[serde(default)]
    pub activation: String,
    /// Activation cost.
    #[serde(default)]
    pub cost: u32,
    /// Which pool pays the cost.
    #[serde(default)]
    pub cost_kind: PoolKind,
    /// Damage dice notation such as `3d6`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage_dice: Option<String>,
    /// Attribute key the skill scales with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scaling: Option<String>,
    /// Description text.
    #[serde(default)]
    pub description: String,
    /// Portrait reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portrait: Option<String>,
}

impl Skill {
    /// Create a free active skill with no damage dice.
    pub fn new(id: SkillId, name: impl Into<String>, category: SkillCategory) -> Self {
        Self {
            id,
            name: name.into(),
            category,
            activation: "Active".to_string(),
            cost: 0,
            cost_kind: PoolKind::Nen,
            damage_dice: None,
            scaling: None,
            description: String::new(),
            portrait: None,
        }
    }

    /// Set the activation cost.
    pub fn with_cost(mut self, cost: u32, kind: PoolKind) -> Self {
        self.cost = cost;
        self.cost_kind = kind;
        self
    }

    /// Set the damage dice.
    pub fn with_damage(mut self, dice: impl Into<String>) -> Self {
        self.damage_dice = Some(dice.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// An inventory entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Identifier, unique within the inventory.
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// How many are carried.
    pub quantity: u32,
}

impl Item {
    /// Create an inventory entry.
    pub fn new(id: ItemId, name: impl Into<String>, quantity: u32) -> Self {
        Self {
            id,
            name: name.into(),
            quantity,
        }
    }
}

/// A subordinate ally with its own pools, attributes, and skills.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summon {
    /// Identifier, unique within the owner's summon list.
    pub id: SummonId,
    /// Display name.
    pub name: String,
    /// Free-text type label.
    #[serde(default)]
    pub kind: String,
    /// Vitality pool.
    pub hp: ResourcePool,
    /// Aura pool.
    pub nen: ResourcePool,
    /// Attribute scores, in display order.
    #[serde(default)]
    pub attributes: IndexMap<String, i32>,
    /// Description text.
    #[serde(default)]
    pub description: String,
    /// Portrait reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portrait: Option<String>,
    /// Skills scoped to this summon.
    #[serde(default)]
    pub skills: Vec<Arc<Skill>>,
}

impl Summon {
    /// Create a summon with default pools and zeroed base attributes.
    pub fn new(id: SummonId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            kind: "Nen Beast".to_string(),
            hp: ResourcePool::full(10),
            nen: ResourcePool::full(5),
            attributes: BASE_ATTRIBUTES
                .iter()
                .map(|key| (key.to_string(), 0))
                .collect(),
            description: String::new(),
            portrait: None,
            skills: Vec::new(),
        }
    }

    /// Look up one of this summon's skills.
    pub fn skill(&self, id: &SkillId) -> Option<&Arc<Skill>> {
        self.skills.iter().find(|s| &s.id == id)
    }

    /// The pool of the given kind.
    pub fn pool(&self, kind: PoolKind) -> ResourcePool {
        match kind {
            PoolKind::Hp => self.hp,
            PoolKind::Nen => self.nen,
        }
    }
}

/// The equipped weapon. Embedded in the character, not separately identified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weapon {
    /// Display name.
    pub name: String,
    /// Damage dice notation.
    pub damage: String,
    /// Description text.
    #[serde(default)]
    pub description: String,
    /// Special powers text.
    #[serde(default)]
    pub powers: String,
    /// Portrait reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portrait: Option<String>,
}

impl Default for Weapon {
    fn default() -> Self {
        Self {
            name: "Unarmed".to_string(),
            damage: "1d4".to_string(),
            description: String::new(),
            powers: String::new(),
            portrait: None,
        }
    }
}

/// Per-attribute presentation data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeMeta {
    /// Portrait reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portrait: Option<String>,
}

/// A character document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    /// Identifier, stable for the lifetime of the document.
    pub id: CharacterId,
    /// Full name.
    pub name: String,
    /// Nickname shown as the sheet title.
    #[serde(default)]
    pub nickname: String,
    /// Portrait reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portrait: Option<String>,
    /// Free-text age.
    #[serde(default)]
    pub age: String,
    /// Free-text nationality.
    #[serde(default)]
    pub nationality: String,
    /// Free-text height.
    #[serde(default)]
    pub height: String,
    /// Free-text weight.
    #[serde(default)]
    pub weight: String,
    /// Free-text alignment.
    #[serde(default)]
    pub alignment: String,
    /// Biography.
    #[serde(default)]
    pub bio: String,
    /// Hunter level.
    #[serde(default)]
    pub level: u32,
    /// Current experience.
    #[serde(default)]
    pub xp: u32,
    /// Experience needed for the next level.
    #[serde(default)]
    pub max_xp: u32,
    /// Nen specialization.
    pub affinity: AffinityType,
    /// Vitality pool.
    pub hp: ResourcePool,
    /// Aura pool.
    pub nen: ResourcePool,
    /// Armor class.
    #[serde(default)]
    pub armor_class: i32,
    /// Active condition labels; duplicates allowed.
    #[serde(default)]
    pub conditions: Vec<String>,
    /// Attribute scores, in display order.
    #[serde(default)]
    pub attributes: IndexMap<String, i32>,
    /// Display names for attribute keys.
    #[serde(default)]
    pub attribute_labels: IndexMap<String, String>,
    /// Presentation data for attribute keys.
    #[serde(default)]
    pub attribute_meta: IndexMap<String, AttributeMeta>,
    /// Equipped weapon.
    #[serde(default)]
    pub weapon: Weapon,
    /// Character skills.
    #[serde(default)]
    pub skills: Vec<Arc<Skill>>,
    /// Inventory.
    #[serde(default)]
    pub inventory: Vec<Arc<Item>>,
    /// Summoned allies.
    #[serde(default)]
    pub summons: Vec<Arc<Summon>>,
}

impl Character {
    /// Look up a skill by id.
    pub fn skill(&self, id: &SkillId) -> Option<&Arc<Skill>> {
        self.skills.iter().find(|s| &s.id == id)
    }

    /// Look up an inventory item by id.
    pub fn item(&self, id: &ItemId) -> Option<&Arc<Item>> {
        self.inventory.iter().find(|i| &i.id == id)
    }

    /// Look up a summon by id.
    pub fn summon(&self, id: &SummonId) -> Option<&Arc<Summon>> {
        self.summons.iter().find(|s| &s.id == id)
    }

    /// The pool of the given kind.
    pub fn pool(&self, kind: PoolKind) -> ResourcePool {
        match kind {
            PoolKind::Hp => self.hp,
            PoolKind::Nen => self.nen,
        }
    }

    /// Display label of an attribute, defaulting to the raw key.
    pub fn attribute_label<'a>(&'a self, key: &'a str) -> &'a str {
        self.attribute_labels
            .get(key)
            .map(String::as_str)
            .unwrap_or(key)
    }

    /// Skills in a given category, in list order.
    pub fn skills_in(&self, category: SkillCategory) -> impl Iterator<Item = &Arc<Skill>> {
        self.skills.iter().filter(move |s| s.category == category)
    }
}
