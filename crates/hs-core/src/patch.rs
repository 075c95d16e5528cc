//! Partial updates are plain structs of optional fields. `None` leaves the
//! target field alone; for fields that are themselves optional, the outer
//! `Option` selects the field and the inner one is the new value, so
//! `Some(None)` clears it.

use indexmap::IndexMap;

use crate::character::{
    AffinityType, AttributeMeta, Item, PoolKind, ResourcePool, Skill, SkillCategory, Summon,
    Weapon,
};

/// A shallow patch for a [`Skill`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkillPatch {
    /// New display name.
    pub name: Option<String>,
    /// New category.
    pub category: Option<SkillCategory>,
    /// New activation type.
    pub activation: Option<String>,
    /// New cost.
    pub cost: Option<u32>,
    /// New cost pool.
    pub cost_kind: Option<PoolKind>,
    /// New damage dice.
    pub damage_dice: Option<Option<String>>,
    /// New scaling attribute.
    pub scaling: Option<Option<String>>,
    /// New description.
    pub description: Option<String>,
    /// New portrait.
    pub portrait: Option<Option<String>>,
}

impl SkillPatch {
    /// Set the name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the category.
    pub fn category(mut self, category: SkillCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// Set the cost and the pool that pays it.
    pub fn cost(mut self, cost: u32, kind: PoolKind) -> Self {
        self.cost = Some(cost);
        self.cost_kind = Some(kind);
        self
    }

    /// Set or clear the damage dice.
    pub fn damage_dice(mut self, dice: Option<String>) -> Self {
        self.damage_dice = Some(dice);
        self
    }

    /// Set the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set or clear the portrait.
    pub fn portrait(mut self, portrait: Option<String>) -> Self {
        self.portrait = Some(portrait);
        self
    }

    /// Returns true if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Produce a copy of `skill` with this patch merged in.
    pub fn merge_into(&self, skill: &Skill) -> Skill {
        let mut out = skill.clone();
        if let Some(name) = &self.name {
            out.name = name.clone();
        }
        if let Some(category) = self.category {
            out.category = category;
        }
        if let Some(activation) = &self.activation {
            out.activation = activation.clone();
        }
        if let Some(cost) = self.cost {
            out.cost = cost;
        }
        if let Some(kind) = self.cost_kind {
            out.cost_kind = kind;
        }
        if let Some(dice) = &self.damage_dice {
            out.damage_dice = dice.clone();
        }
        if let Some(scaling) = &self.scaling {
            out.scaling = scaling.clone();
        }
        if let Some(description) = &self.description {
            out.description = description.clone();
        }
        if let Some(portrait) = &self.portrait {
            out.portrait = portrait.clone();
        }
        out
    }
}

/// A shallow patch for an [`Item`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemPatch {
    /// New name.
    pub name: Option<String>,
    /// New quantity.
    pub quantity: Option<u32>,
}

impl ItemPatch {
    /// Set the name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the quantity.
    pub fn quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// Produce a copy of `item` with this patch merged in.
    pub fn merge_into(&self, item: &Item) -> Item {
        let mut out = item.clone();
        if let Some(name) = &self.name {
            out.name = name.clone();
        }
        if let Some(quantity) = self.quantity {
            out.quantity = quantity;
        }
        out
    }
}

/// A shallow patch for a [`Summon`]. The nested skill list is edited with
/// its own addressed operations, never through this patch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummonPatch {
    /// New name.
    pub name: Option<String>,
    /// New type label.
    pub kind: Option<String>,
    /// New vitality pool.
    pub hp: Option<ResourcePool>,
    /// New aura pool.
    pub nen: Option<ResourcePool>,
    /// Replacement attribute map.
    pub attributes: Option<IndexMap<String, i32>>,
    /// New description.
    pub description: Option<String>,
    /// New portrait.
    pub portrait: Option<Option<String>>,
}

impl SummonPatch {
    /// Set the name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the type label.
    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Replace one of the pools.
    pub fn pool(mut self, kind: PoolKind, pool: ResourcePool) -> Self {
        match kind {
            PoolKind::Hp => self.hp = Some(pool),
            PoolKind::Nen => self.nen = Some(pool),
        }
        self
    }

    /// Set or clear the portrait.
    pub fn portrait(mut self, portrait: Option<String>) -> Self {
        self.portrait = Some(portrait);
        self
    }

    /// Produce a copy of `summon` with this patch merged in. Pools are
    /// re-clamped on the way in.
    pub fn merge_into(&self, summon: &Summon) -> Summon {
        let mut out = summon.clone();
        if let Some(name) = &self.name {
            out.name = name.clone();
        }
        if let Some(kind) = &self.kind {
            out.kind = kind.clone();
        }
        if let Some(hp) = self.hp {
            out.hp = ResourcePool::new(hp.current, hp.max);
        }
        if let Some(nen) = self.nen {
            out.nen = ResourcePool::new(nen.current, nen.max);
        }
        if let Some(attributes) = &self.attributes {
            out.attributes = attributes.clone();
        }
        if let Some(description) = &self.description {
            out.description = description.clone();
        }
        if let Some(portrait) = &self.portrait {
            out.portrait = portrait.clone();
        }
        out
    }
}

/// A shallow patch for the equipped [`Weapon`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeaponPatch {
    /// New name.
    pub name: Option<String>,
    /// New damage dice.
    pub damage: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New powers text.
    pub powers: Option<String>,
    /// New portrait.
    pub portrait: Option<Option<String>>,
}

impl WeaponPatch {
    /// Set the damage dice.
    pub fn damage(mut self, damage: impl Into<String>) -> Self {
        self.damage = Some(damage.into());
        self
    }

    /// Set or clear the portrait.
    pub fn portrait(mut self, portrait: Option<String>) -> Self {
        self.portrait = Some(portrait);
        self
    }

    /// Produce a copy of `weapon` with this patch merged in.
    pub fn merge_into(&self, weapon: &Weapon) -> Weapon {
        let mut out = weapon.clone();
        if let Some(name) = &self.name {
            out.name = name.clone();
        }
        if let Some(damage) = &self.damage {
            out.damage = damage.clone();
        }
        if let Some(description) = &self.description {
            out.description = description.clone();
        }
        if let Some(powers) = &self.powers {
            out.powers = powers.clone();
        }
        if let Some(portrait) = &self.portrait {
            out.portrait = portrait.clone();
        }
        out
    }
}

/// A replacement value for one top-level field of a character.
///
/// One variant per editable field, so a value always matches its field's
/// type. Pool variants are clamped when applied.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Full name.
    Name(String),
    /// Nickname.
    Nickname(String),
    /// Portrait reference.
    Portrait(Option<String>),
    /// Free-text age.
    Age(String),
    /// Free-text nationality.
    Nationality(String),
    /// Free-text height.
    Height(String),
    /// Free-text weight.
    Weight(String),
    /// Free-text alignment.
    Alignment(String),
    /// Biography.
    Bio(String),
    /// Hunter level.
    Level(u32),
    /// Current experience.
    Xp(u32),
    /// Experience needed for the next level.
    MaxXp(u32),
    /// Nen specialization.
    Affinity(AffinityType),
    /// A whole pool.
    Pool(PoolKind, ResourcePool),
    /// The current value of a pool.
    PoolCurrent(PoolKind, i32),
    /// The maximum of a pool.
    PoolMax(PoolKind, i32),
    /// Armor class.
    ArmorClass(i32),
    /// The whole condition list.
    Conditions(Vec<String>),
    /// The whole attribute label map.
    AttributeLabels(IndexMap<String, String>),
    /// The whole attribute metadata map.
    AttributeMeta(IndexMap<String, AttributeMeta>),
    /// The equipped weapon.
    Weapon(Weapon),
}
