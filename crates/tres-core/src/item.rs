use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::id::ItemId;
use crate::value::StatValue;

/// Item type used when none is given.
pub const DEFAULT_ITEM_KIND: &str = "gear";

/// Limited-use charges on an item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Uses {
    /// Remaining charges.
    #[serde(default)]
    pub value: i64,
    /// Charge capacity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
}

/// The system-specific payload of an item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemSystem {
    /// Attacker stat governing the attack roll.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stat: Option<String>,
    /// Damage dice formula.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage: Option<String>,
    /// Limited-use charges.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uses: Option<Uses>,
    /// Ammunition in the magazine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mag: Option<StatValue>,
    /// Fields the rules do not read (description, cost, quantity, ...).
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl ItemSystem {
    /// The damage formula, if one is set and non-blank.
    pub fn damage_formula(&self) -> Option<&str> {
        self.damage
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }

    /// Remaining limited uses, or 0.
    pub fn uses_remaining(&self) -> i64 {
        self.uses.map_or(0, |u| u.value)
    }

    /// Ammunition count when `mag` is a whole JSON number. Text and
    /// fractional values are not a count and are never spent.
    pub fn magazine(&self) -> Option<i64> {
        match self.mag.as_ref()? {
            StatValue::Integer(n) => Some(*n),
            StatValue::Float(f) if f.is_finite() && f.fract() == 0.0 => Some(*f as i64),
            _ => None,
        }
    }
}

/// Equipment owned by exactly one actor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Record id.
    #[serde(default)]
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Item type (weapon, gear, ...).
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
    /// Weapon and equipment fields.
    #[serde(default)]
    pub system: ItemSystem,
}

fn default_kind() -> String {
    DEFAULT_ITEM_KIND.to_string()
}

impl Item {
    /// Create an item with empty system data.
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: ItemId::new(),
            name: name.into(),
            kind: kind.into(),
            system: ItemSystem::default(),
        }
    }

    /// Create a weapon with a governing stat and damage formula.
    pub fn weapon(name: impl Into<String>, stat: &str, damage: &str) -> Self {
        let mut item = Self::new(name, "weapon");
        item.system.stat = Some(stat.to_string());
        item.system.damage = Some(damage.to_string());
        item
    }

    /// Builder-style limited uses.
    pub fn with_uses(mut self, value: i64) -> Self {
        self.system.uses = Some(Uses { value, max: None });
        self
    }

    /// Builder-style magazine count.
    pub fn with_mag(mut self, mag: i64) -> Self {
        self.system.mag = Some(StatValue::Integer(mag));
        self
    }
}
