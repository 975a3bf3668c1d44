//! Test doubles shared by unit tests.

use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::Mutex;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tres_core::RollData;

use crate::dice::{EvaluatedRoll, Formula};
use crate::error::{MechError, MechResult};
use crate::ports::DiceEvaluator;

/// Evaluates formulas for real but reports scripted totals, in order.
pub(crate) struct ScriptedDice {
    totals: Mutex<VecDeque<i64>>,
    seen: Mutex<Vec<String>>,
    fail: bool,
}

impl ScriptedDice {
    pub(crate) fn new(totals: impl IntoIterator<Item = i64>) -> Self {
        Self {
            totals: Mutex::new(totals.into_iter().collect()),
            seen: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new([])
        }
    }

    pub(crate) fn formulas(&self) -> Vec<String> {
        self.seen.lock().clone()
    }
}

#[async_trait]
impl DiceEvaluator for ScriptedDice {
    async fn evaluate(&self, formula: &str, data: &RollData) -> MechResult<EvaluatedRoll> {
        if self.fail {
            return Err(MechError::Collaborator {
                collaborator: "dice",
                message: "evaluator offline".to_string(),
            });
        }
        self.seen.lock().push(formula.to_string());
        let mut roll = Formula::parse(formula)?.evaluate(data, &mut StdRng::seed_from_u64(0))?;
        if let Some(total) = self.totals.lock().pop_front() {
            roll.total = total;
        }
        Ok(roll)
    }
}
