use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::{ActorId, ItemId};
use crate::item::Item;
use crate::pool::Pool;
use crate::value::{RollData, StatValue};

/// The three actor types the system registers sheets for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorKind {
    /// A player character.
    #[default]
    Trespasser,
    /// A non-player character.
    Npc,
    /// A vehicle.
    Vehicle,
}

impl ActorKind {
    /// All actor kinds, in registration order.
    pub const ALL: [ActorKind; 3] = [Self::Trespasser, Self::Npc, Self::Vehicle];

    /// Parse a kind from its host type name.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "trespasser" => Some(Self::Trespasser),
            "npc" => Some(Self::Npc),
            "vehicle" => Some(Self::Vehicle),
            _ => None,
        }
    }
}

impl fmt::Display for ActorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trespasser => write!(f, "trespasser"),
            Self::Npc => write!(f, "npc"),
            Self::Vehicle => write!(f, "vehicle"),
        }
    }
}

/// The three resource pools. Any of them may be missing on a raw record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resources {
    /// Stamina pool.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stamina: Option<Pool>,
    /// Wounds pool.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wounds: Option<Pool>,
    /// Fate pool.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fate: Option<Pool>,
}

/// Values maintained by the rules rather than typed in by players.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Derived {
    /// Accumulated minor wounds. Three of them make one wound.
    #[serde(default)]
    pub minor_wounds: i64,
}

/// The system-specific payload of an actor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActorSystem {
    /// Stat name to value (stamina, wounds, dexterity, evade, armor, ...).
    #[serde(default)]
    pub stats: BTreeMap<String, StatValue>,
    /// Resource pools; absent on records created without them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<Resources>,
    /// Rule-maintained counters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub derived: Option<Derived>,
}

impl ActorSystem {
    /// Numeric reading of a stat, if present and numeric.
    pub fn stat(&self, key: &str) -> Option<i64> {
        self.stats.get(key).and_then(StatValue::as_number)
    }

    /// Numeric reading of a stat, falling back to `default`.
    pub fn stat_or(&self, key: &str, default: i64) -> i64 {
        self.stat(key).unwrap_or(default)
    }

    /// Current wounds, or 0 when the pool is missing.
    pub fn wounds_value(&self) -> i64 {
        self.resources
            .and_then(|r| r.wounds)
            .map_or(0, |w| w.value)
    }

    /// Current minor wounds, or 0 when the counter is missing.
    pub fn minor_wounds(&self) -> i64 {
        self.derived.map_or(0, |d| d.minor_wounds)
    }
}

/// A character, NPC, or vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Record id.
    #[serde(default)]
    pub id: ActorId,
    /// Display name.
    pub name: String,
    /// Actor type.
    #[serde(rename = "type", default)]
    pub kind: ActorKind,
    /// Stats, resources, and derived counters.
    #[serde(default)]
    pub system: ActorSystem,
    /// Owned items.
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Actor {
    /// Create an actor with empty system data.
    pub fn new(name: impl Into<String>, kind: ActorKind) -> Self {
        Self {
            id: ActorId::new(),
            name: name.into(),
            kind,
            system: ActorSystem::default(),
            items: Vec::new(),
        }
    }

    /// Builder-style stat assignment.
    pub fn with_stat(mut self, key: impl Into<String>, value: impl Into<StatValue>) -> Self {
        self.system.stats.insert(key.into(), value.into());
        self
    }

    /// Builder-style resource assignment.
    pub fn with_resources(mut self, resources: Resources) -> Self {
        self.system.resources = Some(resources);
        self
    }

    /// Builder-style minor wound assignment.
    pub fn with_minor_wounds(mut self, minor_wounds: i64) -> Self {
        self.system.derived = Some(Derived { minor_wounds });
        self
    }

    /// Builder-style item assignment.
    pub fn with_item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }

    /// Find an owned item by id.
    pub fn item(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|i| &i.id == id)
    }

    /// Find an owned item by id, mutably.
    pub fn item_mut(&mut self, id: &ItemId) -> Option<&mut Item> {
        self.items.iter_mut().find(|i| &i.id == id)
    }

    /// Find an owned item by name (case-insensitive).
    pub fn item_by_name(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.name.eq_ignore_ascii_case(name))
    }

    /// Flatten numeric system fields into formula variables.
    pub fn roll_data(&self) -> RollData {
        let mut data = RollData::new();
        for (key, value) in &self.system.stats {
            if let Some(n) = value.as_number() {
                data.insert(format!("stats.{key}"), n);
            }
        }
        if let Some(resources) = self.system.resources {
            let pools = [
                ("stamina", resources.stamina),
                ("wounds", resources.wounds),
                ("fate", resources.fate),
            ];
            for (name, pool) in pools {
                let Some(pool) = pool else { continue };
                data.insert(format!("resources.{name}.value"), pool.value);
                if let Some(max) = pool.max {
                    data.insert(format!("resources.{name}.max"), max);
                }
                if let Some(base_max) = pool.base_max {
                    data.insert(format!("resources.{name}.baseMax"), base_max);
                }
            }
        }
        if let Some(derived) = self.system.derived {
            data.insert("derived.minorWounds", derived.minor_wounds);
        }
        data
    }
}
