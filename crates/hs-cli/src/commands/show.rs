use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use hs_core::{Character, SkillCategory};
use hs_mechanics::projection::{self, AxisEfficiency};
use hs_session::SheetSession;

use super::Context;

pub fn run(ctx: &Context) -> Result<(), String> {
    let session = super::open_session(ctx)?;
    let doc = session.active();

    // Header
    println!(
        "  {} \"{}\" [{}]",
        doc.name.bold(),
        doc.nickname,
        doc.id.to_string().dimmed()
    );
    println!(
        "  Level {}  XP {}/{}  {}",
        doc.level, doc.xp, doc.max_xp, doc.affinity
    );
    println!();

    // Vitals
    println!("  HP:  {}", doc.hp.to_string().red());
    println!("  Nen: {}", doc.nen.to_string().cyan());
    println!("  AC:  {}", doc.armor_class);
    if !doc.conditions.is_empty() {
        println!("  Conditions: {}", doc.conditions.join(", "));
    }
    println!();

    print_attributes(doc, &session);
    print_affinity(doc, &session);

    println!(
        "  {} {} ({})",
        "Weapon:".bold(),
        doc.weapon.name,
        doc.weapon.damage
    );
    println!();

    print_skills(doc);

    if !doc.inventory.is_empty() {
        println!("  {}", "Inventory".bold());
        for item in &doc.inventory {
            println!("    {} x{}  [{}]", item.name, item.quantity, item.id);
        }
        println!();
    }

    for summon in &doc.summons {
        println!(
            "  {} {} [{}]  HP {}  Nen {}",
            "Summon:".bold(),
            summon.name,
            summon.id,
            summon.hp,
            summon.nen
        );
        for skill in &summon.skills {
            println!("    - {} ({} {})  [{}]", skill.name, skill.cost, skill.cost_kind, skill.id);
        }
    }

    Ok(())
}

fn print_attributes(doc: &Character, session: &SheetSession) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Attribute", "Key", "Value", "Radar"]);

    let radar = session.attribute_radar();
    for (i, (key, value)) in doc.attributes.iter().enumerate() {
        let scale = radar
            .as_ref()
            .and_then(|axes| axes.get(i))
            .map(|axis| format!("{:.0}%", axis.normalized * 100.0))
            .unwrap_or_default();
        table.add_row(vec![
            doc.attribute_label(key).to_string(),
            key.clone(),
            format!("{value:+}"),
            scale,
        ]);
    }
    println!("{table}");
    if let Some(axes) = radar {
        let layout = &session.config().radar;
        println!(
            "  radar: {}",
            projection::svg_points(&projection::radar::polygon(&axes)).dimmed()
        );
        println!(
            "  web:   {}",
            projection::svg_points(&projection::radar::web(layout, axes.len(), 1.0)).dimmed()
        );
    }
    println!();
}

fn print_affinity(doc: &Character, session: &SheetSession) {
    let row: Vec<String> = projection::efficiencies(doc.affinity)
        .iter()
        .map(|axis: &AxisEfficiency| format!("{} {}%", axis.affinity, axis.percent()))
        .collect();
    println!("  {} {}", "Affinity:".bold(), row.join("  "));
    println!(
        "  hexagon: {}",
        projection::svg_points(&session.affinity_hexagon()).dimmed()
    );
    println!(
        "  outline: {}",
        projection::svg_points(&projection::outline(session.config().hexagon_size)).dimmed()
    );
    println!();
}

fn print_skills(doc: &Character) {
    if doc.skills.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Skill", "Category", "Cost", "Damage"]);

    for category in [
        SkillCategory::Hatsu,
        SkillCategory::Combat,
        SkillCategory::Weapon,
        SkillCategory::Summon,
    ] {
        for skill in doc.skills_in(category) {
            let cost = if skill.cost == 0 {
                "-".to_string()
            } else {
                format!("{} {}", skill.cost, skill.cost_kind)
            };
            table.add_row(vec![
                skill.id.to_string(),
                skill.name.clone(),
                skill.category.to_string(),
                cost,
                skill.damage_dice.clone().unwrap_or_else(|| "-".to_string()),
            ]);
        }
    }
    println!("{table}");
    println!();
}
