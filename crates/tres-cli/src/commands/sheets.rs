use comfy_table::{ContentArrangement, Table};
use tres_core::ActorKind;
use tres_mechanics::{SheetConfig, SheetRegistry};

pub fn run() -> Result<(), String> {
    let registry = SheetRegistry::trespasser();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Record", "Template", "Size", "Initial tab"]);

    for kind in ActorKind::ALL {
        if let Some(sheet) = registry.actor_sheet(kind) {
            table.add_row(row(&format!("actor: {kind}"), sheet));
        }
    }
    if let Some(sheet) = registry.item_sheet("gear") {
        table.add_row(row("item: any", sheet));
    }

    println!("{table}");
    Ok(())
}

fn row(label: &str, sheet: &SheetConfig) -> Vec<String> {
    vec![
        label.to_string(),
        sheet.template.clone(),
        format!("{}x{}", sheet.width, sheet.height),
        sheet
            .tabs
            .as_ref()
            .map_or_else(|| "-".to_string(), |t| t.initial.clone()),
    ]
}
