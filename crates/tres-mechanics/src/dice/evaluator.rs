//! The default dice evaluator, backed by a seeded RNG.

use async_trait::async_trait;
use parking_lot::Mutex;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tres_core::RollData;

use super::{EvaluatedRoll, Formula};
use crate::error::MechResult;
use crate::ports::DiceEvaluator;

/// Evaluates formulas with an in-process RNG.
#[derive(Debug)]
pub struct RngEvaluator {
    rng: Mutex<StdRng>,
}

impl RngEvaluator {
    /// An evaluator that replays the same rolls for the same seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// An evaluator seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Seeded when a seed is given, otherwise from the operating system.
    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::seeded)
    }
}

#[async_trait]
impl DiceEvaluator for RngEvaluator {
    async fn evaluate(&self, formula: &str, data: &RollData) -> MechResult<EvaluatedRoll> {
        let parsed = Formula::parse(formula)?;
        let roll = parsed.evaluate(data, &mut self.rng.lock())?;
        tracing::debug!(formula, resolved = %roll.formula, total = roll.total, dice = %roll.dice, "evaluated roll");
        Ok(roll)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn same_seed_same_rolls() {
        let a = RngEvaluator::seeded(5);
        let b = RngEvaluator::seeded(5);
        for _ in 0..10 {
            let ra = a.evaluate("1d20 + 2d6", &RollData::new()).await.unwrap();
            let rb = b.evaluate("1d20 + 2d6", &RollData::new()).await.unwrap();
            assert_eq!(ra, rb);
        }
    }

    #[tokio::test]
    async fn substitutes_variables() {
        let eval = RngEvaluator::seeded(1);
        let data = RollData::new().with("stat", 3);
        let roll = eval.evaluate("1d20 + @stat", &data).await.unwrap();
        assert_eq!(roll.formula, "1d20 + 3");
        assert!((4..=23).contains(&roll.total));
    }

    #[tokio::test]
    async fn bad_formula_is_an_error() {
        let eval = RngEvaluator::from_entropy();
        assert!(eval.evaluate("1d20 +", &RollData::new()).await.is_err());
    }
}
