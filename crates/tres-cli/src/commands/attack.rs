use std::path::Path;
use std::sync::Arc;

use colored::Colorize;
use tres_mechanics::{ChatLog, RngEvaluator, Rolls, RulesConfig, ScriptedPrompt};

/// Who attacks whom with what.
pub struct AttackArgs {
    pub actor: String,
    pub weapon: Option<String>,
    pub target: Option<String>,
    pub write: bool,
}

pub async fn run(path: &Path, config: RulesConfig, args: &AttackArgs) -> Result<(), String> {
    let (store, order) = super::open_store(super::load_roster(path)?)?;
    let attacker = super::find_actor(&store, &args.actor)?;
    let weapon = match &args.weapon {
        Some(name) => Some(
            attacker
                .item_by_name(name)
                .map(|item| item.id.clone())
                .ok_or_else(|| format!("{} has no item named '{name}'", attacker.name))?,
        ),
        None => None,
    };
    let target = match &args.target {
        Some(name) => Some(super::find_actor(&store, name)?.id),
        None => None,
    };

    let chat = Arc::new(ChatLog::new());
    let rolls = Rolls::new(
        store.clone(),
        Arc::new(RngEvaluator::from_seed(config.seed)),
        Arc::new(ScriptedPrompt::default()),
        chat.clone(),
        config,
    );

    let report = rolls
        .attack(&attacker.id, weapon.as_ref(), target.as_ref())
        .await
        .map_err(|e| e.to_string())?;
    super::print_warnings(&chat);
    let Some(report) = report else {
        return Ok(());
    };

    let verdict = if report.hit {
        "HIT".green().bold()
    } else {
        "MISS".red().bold()
    };
    println!("{} attacks with {}", attacker.name.bold(), report.weapon);
    println!(
        "  Attack: {} = {} vs Evade {} -> {verdict}",
        report.attack.formula, report.attack.total, report.evade
    );
    if let Some(damage) = &report.damage {
        let wound = damage
            .wound
            .map_or_else(String::new, |w| format!(" -> {w}"));
        println!(
            "  Damage: {} = {} vs Armor {}{wound}",
            damage.roll.formula, damage.roll.total, damage.armor
        );
    }
    if let Some(charge) = report.charge {
        println!("  Spent: {charge:?}");
    }

    if args.write {
        super::save_roster(path, &super::roster_from_store(&store, &order))?;
        println!("  Saved to {}", path.display());
    }
    Ok(())
}
