//! Edit-mode commands. Each builds one [`Edit`], applies it through the
//! session, and saves the character when something changed.

use clap::{Args, Subcommand, ValueEnum};
use hs_core::character::is_base_attribute;
use hs_core::{
    AffinityType, Edit, EntryRef, FieldValue, Item, ItemId, ItemPatch, ListPatch, NewEntry,
    PoolKind, ResourcePool, Skill, SkillCategory, SkillId, SkillPatch, Summon, SummonId,
    SummonPatch, WeaponPatch,
};
use hs_session::SheetSession;

use super::{Context, Pool};

/// Top-level fields that `set` can change.
#[derive(Clone, Copy, ValueEnum)]
pub enum Field {
    Name,
    Nickname,
    Age,
    Nationality,
    Height,
    Weight,
    Alignment,
    Bio,
    Level,
    Xp,
    MaxXp,
    Affinity,
    /// Current HP
    Hp,
    MaxHp,
    /// Current Nen
    Nen,
    MaxNen,
    /// Armor class
    Ac,
}

impl Field {
    fn value(self, raw: &str) -> Result<FieldValue, String> {
        let text = || raw.to_string();
        Ok(match self {
            Self::Name => FieldValue::Name(text()),
            Self::Nickname => FieldValue::Nickname(text()),
            Self::Age => FieldValue::Age(text()),
            Self::Nationality => FieldValue::Nationality(text()),
            Self::Height => FieldValue::Height(text()),
            Self::Weight => FieldValue::Weight(text()),
            Self::Alignment => FieldValue::Alignment(text()),
            Self::Bio => FieldValue::Bio(text()),
            Self::Level => FieldValue::Level(number(raw)?),
            Self::Xp => FieldValue::Xp(number(raw)?),
            Self::MaxXp => FieldValue::MaxXp(number(raw)?),
            Self::Affinity => FieldValue::Affinity(
                AffinityType::parse(raw).ok_or_else(|| format!("unknown affinity: {raw}"))?,
            ),
            Self::Hp => FieldValue::PoolCurrent(PoolKind::Hp, number(raw)?),
            Self::MaxHp => FieldValue::PoolMax(PoolKind::Hp, number(raw)?),
            Self::Nen => FieldValue::PoolCurrent(PoolKind::Nen, number(raw)?),
            Self::MaxNen => FieldValue::PoolMax(PoolKind::Nen, number(raw)?),
            Self::Ac => FieldValue::ArmorClass(number(raw)?),
        })
    }
}

fn number<T: std::str::FromStr>(raw: &str) -> Result<T, String> {
    raw.trim()
        .parse()
        .map_err(|_| format!("not a number: {raw}"))
}

/// Skill tab on the command line.
#[derive(Clone, Copy, ValueEnum)]
pub enum Category {
    Hatsu,
    Combat,
    Weapon,
    Summon,
}

impl Category {
    fn kind(self) -> SkillCategory {
        match self {
            Self::Hatsu => SkillCategory::Hatsu,
            Self::Combat => SkillCategory::Combat,
            Self::Weapon => SkillCategory::Weapon,
            Self::Summon => SkillCategory::Summon,
        }
    }
}

#[derive(Subcommand)]
pub enum AttrCommand {
    /// Add a new attribute with value 0
    Add,
    /// Remove an added attribute
    Rm {
        /// Attribute key
        key: String,
    },
    /// Set an attribute's value, adding the key if it is new
    Set {
        /// Attribute key
        key: String,
        /// New value
        #[arg(allow_negative_numbers = true)]
        value: i32,
    },
    /// Rename an attribute's label
    Label {
        /// Attribute key
        key: String,
        /// New label
        label: String,
    },
}

/// Skill fields shared by the add and set forms.
#[derive(Args)]
pub struct SkillFields {
    /// Tab the skill is listed under
    #[arg(long, value_enum)]
    category: Option<Category>,

    /// Activation type (Action, Bonus, Passive, ...)
    #[arg(long)]
    activation: Option<String>,

    /// Cost paid on use
    #[arg(long)]
    cost: Option<u32>,

    /// Pool the cost is paid from
    #[arg(long, value_enum)]
    pool: Option<Pool>,

    /// Damage dice such as 2d6
    #[arg(long, conflicts_with = "no_damage")]
    damage: Option<String>,

    /// Remove the damage dice
    #[arg(long)]
    no_damage: bool,

    /// Attribute the damage scales with
    #[arg(long)]
    scaling: Option<String>,

    /// Description text
    #[arg(long)]
    description: Option<String>,
}

impl SkillFields {
    fn patch(&self, name: Option<String>) -> SkillPatch {
        let damage_dice = if self.no_damage {
            Some(None)
        } else {
            self.damage.clone().map(Some)
        };
        SkillPatch {
            name,
            category: self.category.map(Category::kind),
            activation: self.activation.clone(),
            cost: self.cost,
            cost_kind: self.pool.map(Pool::kind),
            damage_dice,
            scaling: self.scaling.clone().map(Some),
            description: self.description.clone(),
            portrait: None,
        }
    }

    fn build(&self, name: &str, category: SkillCategory) -> Skill {
        self.patch(None)
            .merge_into(&Skill::new(SkillId::new_random(), name, category))
    }
}

#[derive(Subcommand)]
pub enum SkillCommand {
    /// Add a skill
    Add {
        /// Skill name
        name: String,
        #[command(flatten)]
        fields: SkillFields,
    },
    /// Remove a skill
    Rm {
        /// Skill id
        id: String,
    },
    /// Change a skill
    Set {
        /// Skill id
        id: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        #[command(flatten)]
        fields: SkillFields,
    },
}

#[derive(Subcommand)]
pub enum ItemCommand {
    /// Add an inventory item
    Add {
        /// Item name
        name: String,
        /// How many
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove an inventory item
    Rm {
        /// Item id
        id: String,
    },
    /// Change an inventory item
    Set {
        /// Item id
        id: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New quantity
        #[arg(short, long)]
        quantity: Option<u32>,
    },
}

#[derive(Subcommand)]
pub enum SummonCommand {
    /// Add a summon
    Add {
        /// Summon name
        name: String,
        /// Type label
        #[arg(long)]
        kind: Option<String>,
        /// Maximum HP (starts full)
        #[arg(long)]
        hp: Option<i32>,
        /// Maximum Nen (starts full)
        #[arg(long)]
        nen: Option<i32>,
    },
    /// Remove a summon and its skills
    Rm {
        /// Summon id
        id: String,
    },
    /// Change a summon
    Set {
        /// Summon id
        id: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New type label
        #[arg(long)]
        kind: Option<String>,
        /// New maximum HP
        #[arg(long)]
        max_hp: Option<i32>,
        /// New maximum Nen
        #[arg(long)]
        max_nen: Option<i32>,
        /// New description
        #[arg(long)]
        description: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum SummonSkillCommand {
    /// Add a skill to a summon
    Add {
        /// Summon id
        summon: String,
        /// Skill name
        name: String,
        #[command(flatten)]
        fields: SkillFields,
    },
    /// Remove a skill from a summon
    Rm {
        /// Summon id
        summon: String,
        /// Skill id
        id: String,
    },
    /// Change one of a summon's skills
    Set {
        /// Summon id
        summon: String,
        /// Skill id
        id: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        #[command(flatten)]
        fields: SkillFields,
    },
}

#[derive(Subcommand)]
pub enum ConditionCommand {
    /// Add a condition
    Add {
        /// Condition label
        label: String,
    },
    /// Remove a condition by its position, starting at 1
    Rm {
        /// Position in the list
        position: usize,
    },
}

/// Weapon fields; anything left out stays as it is.
#[derive(Args)]
pub struct WeaponFields {
    /// Weapon name
    #[arg(long)]
    name: Option<String>,

    /// Damage dice
    #[arg(long)]
    damage: Option<String>,

    /// Description text
    #[arg(long)]
    description: Option<String>,

    /// Special powers text
    #[arg(long)]
    powers: Option<String>,
}

/// Apply `edit` and save. An edit that changes nothing is reported and
/// not saved.
fn commit(session: &mut SheetSession, edit: Edit, message: String) -> Result<(), String> {
    if !session.edit(edit) {
        println!("  Nothing changed.");
        return Ok(());
    }
    super::persist(session)?;
    println!("  {message}");
    Ok(())
}

pub fn set(ctx: &Context, field: Field, raw: &str) -> Result<(), String> {
    let value = field.value(raw)?;
    let mut session = super::open_session(ctx)?;
    let name = field
        .to_possible_value()
        .map(|v| v.get_name().to_string())
        .unwrap_or_default();
    commit(&mut session, Edit::SetField(value), format!("Set {name} to {raw}"))
}

pub fn attr(ctx: &Context, command: AttrCommand) -> Result<(), String> {
    let mut session = super::open_session(ctx)?;
    let has_key = |session: &SheetSession, key: &str| {
        if session.active().attributes.contains_key(key) {
            Ok(())
        } else {
            Err(format!("attribute not found: {key}"))
        }
    };
    match command {
        AttrCommand::Add => {
            let key = hs_core::update::next_attribute_key(session.active());
            commit(&mut session, Edit::AddAttribute, format!("Added attribute {key}"))
        }
        AttrCommand::Rm { key } => {
            has_key(&session, &key)?;
            if is_base_attribute(&key) {
                return Err(format!("{key} is a base attribute and cannot be removed"));
            }
            let message = format!("Removed attribute {key}");
            commit(&mut session, Edit::RemoveAttribute { key }, message)
        }
        AttrCommand::Set { key, value } => {
            let message = format!("Set {key} to {value:+}");
            commit(&mut session, Edit::SetAttribute { key, value }, message)
        }
        AttrCommand::Label { key, label } => {
            has_key(&session, &key)?;
            let message = format!("Renamed {key} to {label}");
            commit(&mut session, Edit::SetAttributeLabel { key, label }, message)
        }
    }
}

pub fn skill(ctx: &Context, command: SkillCommand) -> Result<(), String> {
    let mut session = super::open_session(ctx)?;
    match command {
        SkillCommand::Add { name, fields } => {
            let skill = fields.build(&name, SkillCategory::Hatsu);
            let message = format!("Added skill {} [{}]", skill.name, skill.id);
            commit(&mut session, Edit::Append(NewEntry::Skill(skill)), message)
        }
        SkillCommand::Rm { id } => {
            let id = SkillId::new(id);
            let name = skill_name(&session, &id)?;
            commit(
                &mut session,
                Edit::Remove(EntryRef::Skill(id)),
                format!("Removed skill {name}"),
            )
        }
        SkillCommand::Set { id, name, fields } => {
            let id = SkillId::new(id);
            let current = skill_name(&session, &id)?;
            let patch = fields.patch(name);
            commit(
                &mut session,
                Edit::Patch(ListPatch::Skill { id, patch }),
                format!("Updated skill {current}"),
            )
        }
    }
}

fn skill_name(session: &SheetSession, id: &SkillId) -> Result<String, String> {
    session
        .active()
        .skill(id)
        .map(|skill| skill.name.clone())
        .ok_or_else(|| format!("skill not found: {id}"))
}

pub fn item(ctx: &Context, command: ItemCommand) -> Result<(), String> {
    let mut session = super::open_session(ctx)?;
    match command {
        ItemCommand::Add { name, quantity } => {
            let item = Item::new(ItemId::new_random(), name, quantity);
            let message = format!("Added {} x{} [{}]", item.name, item.quantity, item.id);
            commit(&mut session, Edit::Append(NewEntry::Item(item)), message)
        }
        ItemCommand::Rm { id } => {
            let id = ItemId::new(id);
            let name = item_name(&session, &id)?;
            commit(
                &mut session,
                Edit::Remove(EntryRef::Item(id)),
                format!("Removed {name}"),
            )
        }
        ItemCommand::Set { id, name, quantity } => {
            let id = ItemId::new(id);
            let current = item_name(&session, &id)?;
            let patch = ItemPatch { name, quantity };
            commit(
                &mut session,
                Edit::Patch(ListPatch::Item { id, patch }),
                format!("Updated {current}"),
            )
        }
    }
}

fn item_name(session: &SheetSession, id: &ItemId) -> Result<String, String> {
    session
        .active()
        .item(id)
        .map(|item| item.name.clone())
        .ok_or_else(|| format!("item not found: {id}"))
}

pub fn summon(ctx: &Context, command: SummonCommand) -> Result<(), String> {
    let mut session = super::open_session(ctx)?;
    match command {
        SummonCommand::Add { name, kind, hp, nen } => {
            let mut summon = Summon::new(SummonId::new_random(), name);
            if let Some(kind) = kind {
                summon.kind = kind;
            }
            if let Some(hp) = hp {
                summon.hp = ResourcePool::full(hp);
            }
            if let Some(nen) = nen {
                summon.nen = ResourcePool::full(nen);
            }
            let message = format!("Added summon {} [{}]", summon.name, summon.id);
            commit(&mut session, Edit::Append(NewEntry::Summon(summon)), message)
        }
        SummonCommand::Rm { id } => {
            let id = SummonId::new(id);
            let name = find_summon(&session, &id)?.name;
            commit(
                &mut session,
                Edit::Remove(EntryRef::Summon(id)),
                format!("Removed summon {name}"),
            )
        }
        SummonCommand::Set {
            id,
            name,
            kind,
            max_hp,
            max_nen,
            description,
        } => {
            let id = SummonId::new(id);
            let current = find_summon(&session, &id)?;
            let patch = SummonPatch {
                name,
                kind,
                hp: max_hp.map(|max| current.hp.with_max(max)),
                nen: max_nen.map(|max| current.nen.with_max(max)),
                attributes: None,
                description,
                portrait: None,
            };
            commit(
                &mut session,
                Edit::Patch(ListPatch::Summon { id, patch }),
                format!("Updated summon {}", current.name),
            )
        }
    }
}

fn find_summon(session: &SheetSession, id: &SummonId) -> Result<Summon, String> {
    session
        .active()
        .summon(id)
        .map(|summon| (**summon).clone())
        .ok_or_else(|| format!("summon not found: {id}"))
}

pub fn summon_skill(ctx: &Context, command: SummonSkillCommand) -> Result<(), String> {
    let mut session = super::open_session(ctx)?;
    match command {
        SummonSkillCommand::Add {
            summon,
            name,
            fields,
        } => {
            let summon_id = SummonId::new(summon);
            let owner = find_summon(&session, &summon_id)?;
            let skill = fields.build(&name, SkillCategory::Summon);
            let message = format!("Added {} to {} [{}]", skill.name, owner.name, skill.id);
            commit(
                &mut session,
                Edit::Append(NewEntry::SummonSkill { summon_id, skill }),
                message,
            )
        }
        SummonSkillCommand::Rm { summon, id } => {
            let summon_id = SummonId::new(summon);
            let skill_id = SkillId::new(id);
            let (owner, name) = summon_skill_name(&session, &summon_id, &skill_id)?;
            commit(
                &mut session,
                Edit::Remove(EntryRef::SummonSkill {
                    summon_id,
                    skill_id,
                }),
                format!("Removed {name} from {owner}"),
            )
        }
        SummonSkillCommand::Set {
            summon,
            id,
            name,
            fields,
        } => {
            let summon_id = SummonId::new(summon);
            let skill_id = SkillId::new(id);
            let (owner, current) = summon_skill_name(&session, &summon_id, &skill_id)?;
            let patch = fields.patch(name);
            commit(
                &mut session,
                Edit::PatchSummonSkill {
                    summon_id,
                    skill_id,
                    patch,
                },
                format!("Updated {current} of {owner}"),
            )
        }
    }
}

fn summon_skill_name(
    session: &SheetSession,
    summon_id: &SummonId,
    skill_id: &SkillId,
) -> Result<(String, String), String> {
    let owner = find_summon(session, summon_id)?;
    let skill = owner
        .skill(skill_id)
        .map(|skill| skill.name.clone())
        .ok_or_else(|| format!("skill not found: {skill_id}"))?;
    Ok((owner.name, skill))
}

pub fn condition(ctx: &Context, command: ConditionCommand) -> Result<(), String> {
    let mut session = super::open_session(ctx)?;
    match command {
        ConditionCommand::Add { label } => {
            let message = format!("Added condition {label}");
            commit(&mut session, Edit::AddCondition(label), message)
        }
        ConditionCommand::Rm { position } => {
            let label = position
                .checked_sub(1)
                .and_then(|index| session.active().conditions.get(index).cloned())
                .ok_or_else(|| format!("no condition at position {position}"))?;
            commit(
                &mut session,
                Edit::RemoveCondition(position - 1),
                format!("Removed condition {label}"),
            )
        }
    }
}

pub fn weapon(ctx: &Context, fields: WeaponFields) -> Result<(), String> {
    let mut session = super::open_session(ctx)?;
    let patch = WeaponPatch {
        name: fields.name,
        damage: fields.damage,
        description: fields.description,
        powers: fields.powers,
        portrait: None,
    };
    let message = format!("Updated {}", session.active().weapon.name);
    commit(&mut session, Edit::PatchWeapon(patch), message)
}
