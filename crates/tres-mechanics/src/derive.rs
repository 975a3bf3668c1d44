//! Derived-stats pass: resource ceilings from base stats and the minor-wound
//! rollover.
//!
//! Runs every time an actor is loaded or changed. It only normalizes the
//! record in memory; persisting the result is the host's business.

use tres_core::{ActorSystem, Pool};

use crate::error::{MechError, MechResult};

/// Minor wounds that make up one wound.
pub const MINOR_WOUNDS_PER_WOUND: i64 = 3;

/// Stamina ceiling when the stat is missing or not a number.
pub const DEFAULT_STAMINA: i64 = 1;

/// Wounds ceiling when the stat is missing or not a number.
pub const DEFAULT_WOUNDS: i64 = 2;

/// Normalize an actor's resources in place.
///
/// 1. Missing pools default to stamina 1/1, wounds 0/1, fate 0/0.
/// 2. `baseMax` comes from `stats.stamina` and `stats.wounds`.
/// 3. An absent `max` is backfilled from `baseMax`; a set one is kept.
/// 4. `value` is lowered to `max`, never raised.
/// 5. Every three minor wounds become one wound.
///
/// Steps 1-4 only run when the record has a `resources` section. Running the
/// pass twice changes nothing the second time.
///
/// Fails with [`MechError::MissingPool`] when minor wounds need rolling over
/// and there is no wounds pool to roll them into; the record is left as is.
pub fn derive_stats(system: &mut ActorSystem) -> MechResult<()> {
    let stamina_base = system.stat_or("stamina", DEFAULT_STAMINA);
    let wounds_base = system.stat_or("wounds", DEFAULT_WOUNDS);

    if let Some(resources) = system.resources.as_mut() {
        let stamina = resources.stamina.get_or_insert(Pool::new(1, 1));
        refresh_pool(stamina, stamina_base);

        let wounds = resources.wounds.get_or_insert(Pool::new(0, 1));
        refresh_pool(wounds, wounds_base);

        resources.fate.get_or_insert(Pool::new(0, 0));
    }

    roll_over_minor_wounds(system)?;
    Ok(())
}

fn refresh_pool(pool: &mut Pool, base_max: i64) {
    pool.base_max = Some(base_max);
    if pool.max.is_none() {
        pool.max = Some(base_max);
    }
    pool.clamp_to_max();
}

/// Convert accumulated minor wounds into wounds. Returns the number of wounds
/// added.
pub fn roll_over_minor_wounds(system: &mut ActorSystem) -> MechResult<i64> {
    let minor = system.minor_wounds();
    if minor < MINOR_WOUNDS_PER_WOUND {
        return Ok(0);
    }

    let wounds = system
        .resources
        .as_mut()
        .and_then(|r| r.wounds.as_mut())
        .ok_or(MechError::MissingPool("wounds"))?;

    let (added, remaining) = split_minor_wounds(minor);
    wounds.value = wounds.value.saturating_add(added);
    if let Some(derived) = system.derived.as_mut() {
        derived.minor_wounds = remaining;
    }
    tracing::debug!(added, remaining, "rolled minor wounds into wounds");
    Ok(added)
}

/// Split a minor-wound count into whole wounds and the remainder.
pub fn split_minor_wounds(minor: i64) -> (i64, i64) {
    (
        minor.div_euclid(MINOR_WOUNDS_PER_WOUND),
        minor.rem_euclid(MINOR_WOUNDS_PER_WOUND),
    )
}
