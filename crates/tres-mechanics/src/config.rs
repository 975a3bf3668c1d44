//! Tunable rule constants.

use serde::{Deserialize, Serialize};

/// Rule constants and RNG seeding for a game table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RulesConfig {
    /// RNG seed for reproducible rolls. `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Evade used when an attack has no defender or the defender has none.
    pub default_evade: i64,
    /// Attacker stat used when a weapon names none.
    pub default_attack_stat: String,
    /// Stat tested when a challenge button names none.
    pub default_challenge_stat: String,
    /// Largest boon or bane dice adjustment.
    pub net_dice_cap: i64,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            seed: None,
            default_evade: 10,
            default_attack_stat: "dexterity".to_string(),
            default_challenge_stat: "knowledge".to_string(),
            net_dice_cap: 3,
        }
    }
}

impl RulesConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the default evade.
    pub fn with_default_evade(mut self, evade: i64) -> Self {
        self.default_evade = evade;
        self
    }

    /// Set the net dice cap (never below 0).
    pub fn with_net_dice_cap(mut self, cap: i64) -> Self {
        self.net_dice_cap = cap.max(0);
        self
    }
}
