use std::fs;
use std::path::Path;

use hs_core::{SkillId, SummonId};
use hs_session::PortraitTarget;

use super::Context;

/// Pick the portrait target from the mutually exclusive flags.
pub fn target(
    skill: Option<String>,
    summon: Option<String>,
    weapon: bool,
    attribute: Option<String>,
) -> PortraitTarget {
    if let Some(id) = skill {
        PortraitTarget::Skill(SkillId::new(id))
    } else if let Some(id) = summon {
        PortraitTarget::Summon(SummonId::new(id))
    } else if weapon {
        PortraitTarget::Weapon
    } else if let Some(key) = attribute {
        PortraitTarget::Attribute(key)
    } else {
        PortraitTarget::Character
    }
}

pub fn run(ctx: &Context, file: &Path, target: PortraitTarget) -> Result<(), String> {
    let bytes =
        fs::read(file).map_err(|e| format!("cannot read {}: {e}", file.display()))?;
    let mut session = super::open_session(ctx)?;
    let mark = session.log().len();
    if let Err(e) = session.attach_portrait(target, &bytes) {
        super::report(ctx, &session, mark)?;
        return Err(e.to_string());
    }
    super::persist(&mut session)?;
    println!("  Portrait attached from {}", file.display());
    Ok(())
}
