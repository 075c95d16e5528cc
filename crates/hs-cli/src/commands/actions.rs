use hs_core::{PoolKind, SkillId, SummonId};
use hs_session::PoolOwner;

use super::Context;

pub fn roll(ctx: &Context, notation: &str) -> Result<(), String> {
    let mut session = super::open_session(ctx)?;
    let mark = session.log().len();
    let outcome = session.roll_notation(notation);
    if outcome.is_zero() {
        eprintln!("  not dice notation: \"{notation}\" (expected e.g. 2d6)");
    }
    super::report(ctx, &session, mark)
}

pub fn use_skill(ctx: &Context, id: &str, summon: Option<&str>) -> Result<(), String> {
    let mut session = super::open_session(ctx)?;
    let mark = session.log().len();
    let skill_id = SkillId::from(id);
    let used = match summon {
        Some(summon) => session.roll_summon_skill(&SummonId::from(summon), &skill_id),
        None => session.roll_skill(&skill_id),
    };
    used.map_err(|e| e.to_string())?;
    super::persist(&mut session)?;
    super::report(ctx, &session, mark)
}

pub fn attack(ctx: &Context) -> Result<(), String> {
    let mut session = super::open_session(ctx)?;
    let mark = session.log().len();
    session.roll_weapon();
    super::report(ctx, &session, mark)
}

pub fn check(ctx: &Context, attribute: &str) -> Result<(), String> {
    let mut session = super::open_session(ctx)?;
    let mark = session.log().len();
    session
        .roll_attribute(attribute)
        .map_err(|e| e.to_string())?;
    super::report(ctx, &session, mark)
}

pub fn adjust(ctx: &Context, kind: PoolKind, delta: i32, summon: Option<&str>) -> Result<(), String> {
    let mut session = super::open_session(ctx)?;
    let mark = session.log().len();
    let owner = match summon {
        Some(id) => PoolOwner::Summon(SummonId::from(id)),
        None => PoolOwner::Character,
    };
    let changed = session
        .adjust_pool(&owner, kind, delta)
        .map_err(|e| e.to_string())?;
    if changed.is_none() {
        println!("  Nothing to do.");
        return Ok(());
    }
    super::persist(&mut session)?;
    super::report(ctx, &session, mark)
}

pub fn rest(ctx: &Context) -> Result<(), String> {
    let mut session = super::open_session(ctx)?;
    let mark = session.log().len();
    session.rest();
    super::persist(&mut session)?;
    super::report(ctx, &session, mark)
}
