//! Dice, dice pools, and the formula language used by challenges and
//! weapon damage.
//!
//! Formulas are sums of terms: `NdM` dice, integer constants, and `@path`
//! variables looked up in an actor's roll data.

pub mod evaluator;
pub mod formula;
pub mod pool;
pub mod roll;

pub use evaluator::RngEvaluator;
pub use formula::{EvaluatedRoll, Formula, Sign, Term, TermKind};
pub use pool::DicePool;
pub use roll::{DieResult, RollResult};

use serde::{Deserialize, Serialize};

/// A polyhedral die type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Die {
    /// Four-sided die.
    D4,
    /// Six-sided die. Boons and banes add or remove these.
    D6,
    /// Eight-sided die.
    D8,
    /// Ten-sided die.
    D10,
    /// Twelve-sided die.
    D12,
    /// Twenty-sided die. Every challenge and attack starts with one.
    D20,
    /// Percentile die (1-100).
    D100,
    /// A die with a custom number of sides.
    Custom(u32),
}

impl Die {
    /// Returns the number of sides on this die.
    pub fn sides(self) -> u32 {
        match self {
            Self::D4 => 4,
            Self::D6 => 6,
            Self::D8 => 8,
            Self::D10 => 10,
            Self::D12 => 12,
            Self::D20 => 20,
            Self::D100 => 100,
            Self::Custom(n) => n,
        }
    }

    /// The die with the given number of sides. Fewer than two sides is not a die.
    pub fn from_sides(sides: u32) -> Option<Self> {
        match sides {
            0 | 1 => None,
            4 => Some(Self::D4),
            6 => Some(Self::D6),
            8 => Some(Self::D8),
            10 => Some(Self::D10),
            12 => Some(Self::D12),
            20 => Some(Self::D20),
            100 => Some(Self::D100),
            n => Some(Self::Custom(n)),
        }
    }

    /// Parse a die from a string like "d20", "d6", "d100".
    pub fn from_str_tag(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        let sides = s.strip_prefix('d')?.parse::<u32>().ok()?;
        Self::from_sides(sides)
    }
}

impl std::fmt::Display for Die {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "d{}", self.sides())
    }
}
