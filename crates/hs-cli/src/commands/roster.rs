use comfy_table::{ContentArrangement, Table};
use hs_core::CharacterId;
use hs_session::{CharacterRepository, JsonDirRepository, SheetSession};

use super::Context;

pub fn init(ctx: &Context) -> Result<(), String> {
    if ctx.offline {
        return Err("init needs a data directory; drop --offline".into());
    }
    let repo = JsonDirRepository::new(&ctx.data_dir);
    let existing = repo.fetch_all().map_err(|e| e.to_string())?;
    if !existing.is_empty() {
        return Err(format!(
            "{} already holds {} character(s)",
            ctx.data_dir.display(),
            existing.len()
        ));
    }

    let mut session = SheetSession::new(ctx.config());
    session.save().map_err(|e| e.to_string())?;
    println!(
        "  Initialized {} with {}",
        ctx.data_dir.display(),
        session.active().name
    );
    Ok(())
}

pub fn list(ctx: &Context) -> Result<(), String> {
    let session = super::open_session(ctx)?;
    let active = session.active().id.clone();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["", "Id", "Name", "Nickname", "Lvl", "Affinity", "HP", "Nen"]);

    for doc in session.store().roster() {
        let marker = if doc.id == active { "*" } else { "" };
        table.add_row(vec![
            marker.to_string(),
            doc.id.to_string(),
            doc.name.clone(),
            doc.nickname.clone(),
            doc.level.to_string(),
            doc.affinity.to_string(),
            doc.hp.to_string(),
            doc.nen.to_string(),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} characters", session.store().len());
    Ok(())
}

pub fn new(ctx: &Context, name: &str) -> Result<(), String> {
    let mut session = super::open_session(ctx)?;
    let id = session.create_character(name).map_err(|e| e.to_string())?;
    super::persist(&mut session)?;
    println!("  Created {name} ({id})");
    Ok(())
}

pub fn delete(ctx: &Context, id: &str) -> Result<(), String> {
    let mut session = super::open_session(ctx)?;
    let id = CharacterId::from(id);
    if session.store().get(&id).is_none() {
        return Err(format!("character not found: {id}"));
    }
    let mark = session.log().len();
    session.delete_character(&id).map_err(|e| e.to_string())?;
    super::report(ctx, &session, mark)
}
