//! Challenge rolls: a d20, boon/bane d6s, a flat modifier, and a stat.

use serde::Serialize;
use tres_core::RollData;

use crate::dice::{Die, EvaluatedRoll, Formula, Sign, TermKind};
use crate::error::MechResult;
use crate::ports::DiceEvaluator;
use crate::prompt::RollModifiers;

/// Boons minus banes, held to `[-cap, cap]`.
pub fn net_dice(boons: i64, banes: i64, cap: i64) -> i64 {
    let cap = cap.max(0);
    boons.saturating_sub(banes).clamp(-cap, cap)
}

/// Build the challenge formula: `1d20`, then the net d6s, then the flat
/// modifier, then the stat. Zero terms are left out.
pub fn challenge_formula(stat: i64, net_dice: i64, modifier: i64) -> Formula {
    Formula::new()
        .push(
            Sign::Plus,
            TermKind::Dice {
                count: 1,
                die: Die::D20,
            },
        )
        .signed_dice(net_dice, Die::D6)
        .signed_constant(modifier)
        .signed_constant(stat)
}

/// A resolved challenge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChallengeResult {
    /// The stat value added to the roll.
    pub stat: i64,
    /// The modifiers the roll was made with.
    pub modifiers: RollModifiers,
    /// Boon/bane dice after clamping.
    pub net_dice: i64,
    /// The formula that was rolled.
    pub formula: String,
    /// The rolled total.
    pub total: i64,
    /// Individual die faces, for display.
    pub dice: String,
}

/// Build and roll a challenge. Evaluation failures propagate.
pub async fn resolve_challenge(
    evaluator: &dyn DiceEvaluator,
    stat: i64,
    modifiers: &RollModifiers,
    cap: i64,
) -> MechResult<ChallengeResult> {
    let net = net_dice(modifiers.boons, modifiers.banes, cap);
    let formula = challenge_formula(stat, net, modifiers.modifier).to_string();
    tracing::debug!(%formula, net_dice = net, "rolling challenge");

    let EvaluatedRoll { total, dice, .. } = evaluator.evaluate(&formula, &RollData::new()).await?;

    Ok(ChallengeResult {
        stat,
        modifiers: modifiers.clone(),
        net_dice: net,
        formula,
        total,
        dice: dice.to_string(),
    })
}
