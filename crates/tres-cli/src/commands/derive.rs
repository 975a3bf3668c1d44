use std::path::Path;

use comfy_table::{ContentArrangement, Table};
use tres_core::Pool;

pub fn run(path: &Path, write: bool) -> Result<(), String> {
    let roster = super::load_roster(path)?;
    let (store, order) = super::open_store(roster)?;
    let roster = super::roster_from_store(&store, &order);

    if roster.actors.is_empty() {
        println!("  No actors in the roster.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Type", "Stamina", "Wounds", "Fate", "Minor wounds"]);

    let pool = |p: Option<Pool>| p.map_or_else(|| "-".to_string(), |p| p.to_string());
    for actor in &roster.actors {
        let resources = actor.system.resources.unwrap_or_default();
        table.add_row(vec![
            actor.name.clone(),
            actor.kind.to_string(),
            pool(resources.stamina),
            pool(resources.wounds),
            pool(resources.fate),
            actor.system.minor_wounds().to_string(),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} actors", roster.actors.len());

    if write {
        super::save_roster(path, &roster)?;
        println!("  Saved to {}", path.display());
    }
    Ok(())
}
