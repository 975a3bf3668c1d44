use std::path::Path;
use std::sync::Arc;

use colored::Colorize;
use tres_mechanics::{
    ChatLog, PromptOutcome, RngEvaluator, RollForm, Rolls, RulesConfig, ScriptedPrompt,
};

pub async fn run(
    path: &Path,
    config: RulesConfig,
    actor_name: &str,
    stat: Option<&str>,
    form: RollForm,
) -> Result<(), String> {
    let (store, _) = super::open_store(super::load_roster(path)?)?;
    let actor = super::find_actor(&store, actor_name)?;
    let stat = stat
        .filter(|s| !s.is_empty())
        .unwrap_or(config.default_challenge_stat.as_str())
        .to_string();

    let chat = Arc::new(ChatLog::new());
    let rolls = Rolls::new(
        store,
        Arc::new(RngEvaluator::from_seed(config.seed)),
        Arc::new(ScriptedPrompt::new([PromptOutcome::Confirmed(form)])),
        chat.clone(),
        config,
    );

    let result = rolls
        .challenge(&actor.id, &stat)
        .await
        .map_err(|e| e.to_string())?;
    super::print_warnings(&chat);
    let Some(result) = result else {
        println!("  Challenge cancelled.");
        return Ok(());
    };

    let m = &result.modifiers;
    println!(
        "{} {} challenge",
        actor.name.bold(),
        stat.to_uppercase().cyan()
    );
    println!(
        "  Boons: {}  Banes: {}  Modifier: {}  Net dice: {}",
        m.boons, m.banes, m.modifier_text, result.net_dice
    );
    println!("  Formula: {}", result.formula);
    println!("  Dice: {}", result.dice);
    println!("  Total: {}", result.total.to_string().bold());
    Ok(())
}
