//! Attack resolution: the hit roll against evade, damage against armor, the
//! wound that results, and the charge the weapon spends.
//!
//! [`resolve_attack`] rolls everything first and only then plans the record
//! changes, returned as one [`UpdateSet`] per record. Nothing is written here;
//! the caller hands the sets to the record store.

use std::fmt;

use serde::Serialize;
use tres_core::{Actor, ActorSystem, Item, ItemSystem, RollData, UpdateSet};

use crate::config::RulesConfig;
use crate::derive::split_minor_wounds;
use crate::dice::EvaluatedRoll;
use crate::error::MechResult;
use crate::ports::DiceEvaluator;

/// Formula of every attack roll.
pub const ATTACK_FORMULA: &str = "1d20 + @stat";

const MINOR_WOUNDS_PATH: &str = "system.derived.minorWounds";
const WOUNDS_VALUE_PATH: &str = "system.resources.wounds.value";
const USES_VALUE_PATH: &str = "system.uses.value";
const MAG_PATH: &str = "system.mag";

/// How badly a hit hurt the defender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WoundOutcome {
    /// Damage under armor: one more minor wound, no rollover yet.
    Minor,
    /// Damage under armor, and the minor wounds rolled over into wounds.
    Converted {
        /// Wounds gained from the rollover.
        wounds: i64,
    },
    /// Damage at least armor but under twice armor.
    OneWound,
    /// Damage at least twice armor.
    TwoWounds,
}

impl fmt::Display for WoundOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Minor => write!(f, "Minor wound"),
            Self::Converted { wounds } => write!(f, "{wounds} Wound(s)"),
            Self::OneWound => write!(f, "1 Wound"),
            Self::TwoWounds => write!(f, "2 Wounds"),
        }
    }
}

/// A wound outcome and the defender fields it changes.
#[derive(Debug, Clone, PartialEq)]
pub struct WoundResolution {
    /// The severity.
    pub outcome: WoundOutcome,
    /// Assignments for the defender record.
    pub updates: UpdateSet,
}

/// Decide the wound a hit inflicts.
///
/// Checked in order, first match wins: under armor is a minor wound (three
/// minors roll into wounds), at least twice armor is two wounds, anything
/// else is one wound. With 0 armor every non-negative hit lands two wounds.
pub fn resolve_wound(damage: i64, armor: i64, defender: &ActorSystem) -> WoundResolution {
    let wounds = defender.wounds_value();
    let mut updates = UpdateSet::new();

    let outcome = if damage < armor {
        let minors = defender.minor_wounds().saturating_add(1);
        updates.set(MINOR_WOUNDS_PATH, minors);
        let (gained, remaining) = split_minor_wounds(minors);
        if gained > 0 {
            updates.set(MINOR_WOUNDS_PATH, remaining);
            updates.set(WOUNDS_VALUE_PATH, wounds.saturating_add(gained));
            WoundOutcome::Converted { wounds: gained }
        } else {
            WoundOutcome::Minor
        }
    } else if damage >= armor.saturating_mul(2) {
        updates.set(WOUNDS_VALUE_PATH, wounds.saturating_add(2));
        WoundOutcome::TwoWounds
    } else {
        updates.set(WOUNDS_VALUE_PATH, wounds.saturating_add(1));
        WoundOutcome::OneWound
    };

    WoundResolution { outcome, updates }
}

/// Which counter an attack spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Charge {
    /// A limited use.
    Use {
        /// Uses left afterwards.
        remaining: i64,
    },
    /// A round of ammunition.
    Ammo {
        /// Rounds left afterwards.
        remaining: i64,
    },
}

/// Spend one charge: a use if any remain, otherwise a round of ammunition if
/// any remain. Never both, never below zero.
pub fn consume_charge(weapon: &ItemSystem) -> Option<(Charge, UpdateSet)> {
    let uses = weapon.uses_remaining();
    if uses > 0 {
        let remaining = (uses - 1).max(0);
        let updates = UpdateSet::new().with(USES_VALUE_PATH, remaining);
        return Some((Charge::Use { remaining }, updates));
    }
    match weapon.magazine() {
        Some(mag) if mag > 0 => {
            let remaining = (mag - 1).max(0);
            let updates = UpdateSet::new().with(MAG_PATH, remaining);
            Some((Charge::Ammo { remaining }, updates))
        }
        _ => None,
    }
}

/// Where an attack ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AttackStage {
    /// Declared, nothing rolled yet.
    Declared,
    /// Attack roll made.
    Rolled,
    /// The roll fell short of evade.
    Missed,
    /// The roll met evade; the weapon deals no damage.
    Hit,
    /// Damage rolled with no defender to wound.
    DamageApplied,
    /// Damage rolled and a wound applied to the defender.
    WoundApplied,
}

/// Damage dealt by a hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DamageReport {
    /// The weapon's damage formula as written.
    pub formula: String,
    /// The damage roll.
    pub roll: EvaluatedRoll,
    /// The defender's armor (0 without a defender).
    pub armor: i64,
    /// The wound inflicted, when there is a defender.
    pub wound: Option<WoundOutcome>,
}

/// Everything an attack rolled and the changes it wants written.
#[derive(Debug, Clone, PartialEq)]
pub struct AttackReport {
    /// The weapon's name.
    pub weapon: String,
    /// The attacker stat used.
    pub stat_key: String,
    /// The attack roll.
    pub attack: EvaluatedRoll,
    /// The evade the roll had to meet.
    pub evade: i64,
    /// Whether the attack hit.
    pub hit: bool,
    /// Damage, when the attack hit with a damaging weapon.
    pub damage: Option<DamageReport>,
    /// The charge spent, if any.
    pub charge: Option<Charge>,
    /// Assignments for the defender.
    pub defender_updates: Option<UpdateSet>,
    /// Assignments for the weapon.
    pub weapon_updates: Option<UpdateSet>,
}

impl AttackReport {
    /// The terminal stage of this attack.
    pub fn stage(&self) -> AttackStage {
        match (&self.damage, self.hit) {
            (_, false) => AttackStage::Missed,
            (None, true) => AttackStage::Hit,
            (Some(d), true) if d.wound.is_some() => AttackStage::WoundApplied,
            (Some(_), true) => AttackStage::DamageApplied,
        }
    }
}

/// Roll an attack and plan its consequences.
///
/// The attack roll is `1d20 + stat`, where the stat is named by the weapon.
/// Damage is only rolled on a hit with a damage formula, with the attacker's
/// roll data available to `@` variables. Without a defender the damage is
/// only reported: no wound is planned and the weapon spends no charge.
pub async fn resolve_attack(
    evaluator: &dyn DiceEvaluator,
    config: &RulesConfig,
    attacker: &Actor,
    weapon: &Item,
    defender: Option<&Actor>,
) -> MechResult<AttackReport> {
    let stat_key = weapon
        .system
        .stat
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(config.default_attack_stat.as_str())
        .to_string();
    let stat = attacker.system.stat_or(&stat_key, 0);
    let evade = defender.map_or(config.default_evade, |d| {
        d.system.stat_or("evade", config.default_evade)
    });

    let attack = evaluator
        .evaluate(ATTACK_FORMULA, &RollData::new().with("stat", stat))
        .await?;
    let hit = attack.total >= evade;
    tracing::debug!(weapon = %weapon.name, total = attack.total, evade, hit, "attack rolled");

    let mut report = AttackReport {
        weapon: weapon.name.clone(),
        stat_key,
        attack,
        evade,
        hit,
        damage: None,
        charge: None,
        defender_updates: None,
        weapon_updates: None,
    };

    let Some(formula) = weapon.system.damage_formula().filter(|_| hit) else {
        return Ok(report);
    };

    let roll = evaluator.evaluate(formula, &attacker.roll_data()).await?;
    let armor = defender.map_or(0, |d| d.system.stat_or("armor", 0));

    let wound = defender.map(|d| resolve_wound(roll.total, armor, &d.system));
    let charge = defender.and_then(|_| consume_charge(&weapon.system));

    report.damage = Some(DamageReport {
        formula: formula.to_string(),
        roll,
        armor,
        wound: wound.as_ref().map(|w| w.outcome),
    });
    report.defender_updates = wound.map(|w| w.updates).filter(|u| !u.is_empty());
    if let Some((charge, updates)) = charge {
        report.charge = Some(charge);
        report.weapon_updates = Some(updates);
    }
    Ok(report)
}
