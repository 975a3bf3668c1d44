pub mod attack;
pub mod challenge;
pub mod derive;
pub mod sheets;

use std::fs;
use std::path::Path;
use std::sync::Arc;

use colored::Colorize;
use serde::{Deserialize, Serialize};
use tres_core::{Actor, ActorId};
use tres_mechanics::{ChatLog, MemoryStore, RulesConfig};

/// The actors at the table, as stored on disk.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Roster {
    #[serde(default)]
    pub actors: Vec<Actor>,
}

pub fn load_roster(path: &Path) -> Result<Roster, String> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("cannot read roster {}: {e}", path.display()))?;
    serde_json::from_str(&text).map_err(|e| format!("invalid roster {}: {e}", path.display()))
}

pub fn save_roster(path: &Path, roster: &Roster) -> Result<(), String> {
    let json = serde_json::to_string_pretty(roster).map_err(|e| e.to_string())?;
    fs::write(path, json + "\n")
        .map_err(|e| format!("cannot write roster {}: {e}", path.display()))?;
    tracing::info!(path = %path.display(), actors = roster.actors.len(), "roster saved");
    Ok(())
}

/// Rule constants from `--config`, with `--seed` taking precedence.
pub fn load_config(path: Option<&Path>, seed: Option<u64>) -> Result<RulesConfig, String> {
    let mut config = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(|e| format!("cannot read config {}: {e}", path.display()))?;
            serde_json::from_str(&text)
                .map_err(|e| format!("invalid config {}: {e}", path.display()))?
        }
        None => RulesConfig::default(),
    };
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    Ok(config)
}

/// Load every roster actor into a store. Returns the store and the actor ids
/// in roster order.
pub fn open_store(roster: Roster) -> Result<(Arc<MemoryStore>, Vec<ActorId>), String> {
    let store = MemoryStore::new();
    let mut order = Vec::with_capacity(roster.actors.len());
    for actor in roster.actors {
        let name = actor.name.clone();
        let id = store.insert(actor).map_err(|e| format!("{name}: {e}"))?;
        order.push(id);
    }
    Ok((Arc::new(store), order))
}

/// The store's actors in roster order.
pub fn roster_from_store(store: &MemoryStore, order: &[ActorId]) -> Roster {
    Roster {
        actors: order.iter().filter_map(|id| store.get(id)).collect(),
    }
}

pub fn find_actor(store: &MemoryStore, name: &str) -> Result<Actor, String> {
    store
        .find_by_name(name)
        .ok_or_else(|| format!("no actor named '{name}' in the roster"))
}

/// Print any warnings the rules raised.
pub fn print_warnings(chat: &ChatLog) {
    for warning in chat.warnings() {
        eprintln!("{} {warning}", "warning:".yellow().bold());
    }
}
