//! Parsing, printing, and evaluating dice formulas.

use std::fmt;

use rand::rngs::StdRng;
use tres_core::RollData;

use super::{DicePool, Die, RollResult};
use crate::error::{MechError, MechResult};

/// Upper bound on dice in a single term.
const MAX_DICE_PER_TERM: u32 = 100;

/// Whether a term is added or subtracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    /// Added to the total.
    Plus,
    /// Subtracted from the total.
    Minus,
}

impl Sign {
    fn flip(self) -> Self {
        match self {
            Self::Plus => Self::Minus,
            Self::Minus => Self::Plus,
        }
    }

    /// Add or subtract `magnitude` from `total`, or `None` on overflow.
    fn accumulate(self, total: i64, magnitude: u64) -> Option<i64> {
        match self {
            Self::Plus => total.checked_add_unsigned(magnitude),
            Self::Minus => total.checked_sub_unsigned(magnitude),
        }
    }
}

/// The operand of a term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TermKind {
    /// `count` dice of one type.
    Dice {
        /// Number of dice.
        count: u32,
        /// Die type.
        die: Die,
    },
    /// A non-negative integer.
    Constant(u64),
    /// An `@path` reference into roll data.
    Variable(String),
}

impl fmt::Display for TermKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dice { count, die } => write!(f, "{count}{die}"),
            Self::Constant(n) => write!(f, "{n}"),
            Self::Variable(path) => write!(f, "@{path}"),
        }
    }
}

/// A signed operand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    /// Add or subtract.
    pub sign: Sign,
    /// What is added or subtracted.
    pub kind: TermKind,
}

/// A sum of dice, constants, and variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Formula {
    /// Terms in evaluation order.
    pub terms: Vec<Term>,
}

/// The outcome of evaluating a formula.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluatedRoll {
    /// The formula with variables replaced by their values.
    pub formula: String,
    /// The signed sum of all terms.
    pub total: i64,
    /// Every die rolled, in term order.
    pub dice: RollResult,
}

impl Formula {
    /// Create an empty formula.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a term.
    pub fn push(mut self, sign: Sign, kind: TermKind) -> Self {
        self.terms.push(Term { sign, kind });
        self
    }

    /// Append `n` dice: added when positive, subtracted when negative,
    /// omitted when zero.
    pub fn signed_dice(self, n: i64, die: Die) -> Self {
        if n == 0 {
            return self;
        }
        let sign = if n > 0 { Sign::Plus } else { Sign::Minus };
        let count = u32::try_from(n.unsigned_abs()).unwrap_or(u32::MAX);
        self.push(sign, TermKind::Dice { count, die })
    }

    /// Append a constant: added when positive, subtracted when negative,
    /// omitted when zero.
    pub fn signed_constant(self, n: i64) -> Self {
        if n == 0 {
            return self;
        }
        let sign = if n > 0 { Sign::Plus } else { Sign::Minus };
        self.push(sign, TermKind::Constant(n.unsigned_abs()))
    }

    /// Parse formula text such as `1d20 + @stat` or `2d6-1`.
    pub fn parse(text: &str) -> MechResult<Self> {
        let invalid = |reason: &str| MechError::InvalidFormula {
            formula: text.to_string(),
            reason: reason.to_string(),
        };

        let mut terms = Vec::new();
        let mut sign = Sign::Plus;
        let mut expect_operand = true;
        let mut chars = text.char_indices().peekable();

        while let Some(&(start, c)) = chars.peek() {
            if c.is_whitespace() {
                chars.next();
                continue;
            }
            if c == '+' || c == '-' {
                chars.next();
                if !expect_operand {
                    expect_operand = true;
                    sign = Sign::Plus;
                }
                if c == '-' {
                    sign = sign.flip();
                }
                continue;
            }
            if !is_operand_char(c) {
                return Err(invalid(&format!("unexpected character '{c}'")));
            }
            if !expect_operand {
                return Err(invalid("missing operator between terms"));
            }
            let mut end = start;
            while let Some(&(i, c)) = chars.peek() {
                if !is_operand_char(c) {
                    break;
                }
                end = i + c.len_utf8();
                chars.next();
            }
            let kind = parse_operand(&text[start..end]).map_err(|reason| invalid(&reason))?;
            terms.push(Term { sign, kind });
            sign = Sign::Plus;
            expect_operand = false;
        }

        if terms.is_empty() {
            return Err(invalid("empty formula"));
        }
        if expect_operand {
            return Err(invalid("dangling operator"));
        }
        Ok(Self { terms })
    }

    /// Roll every dice term and resolve every variable.
    ///
    /// Variables missing from `data` count as 0. Fails with
    /// [`MechError::InvalidFormula`] when the total leaves the `i64` range.
    pub fn evaluate(&self, data: &RollData, rng: &mut StdRng) -> MechResult<EvaluatedRoll> {
        let overflow = || MechError::InvalidFormula {
            formula: self.to_string(),
            reason: "total out of range".to_string(),
        };
        let mut total: i64 = 0;
        let mut dice = RollResult::default();
        let mut parts: Vec<(Sign, String)> = Vec::with_capacity(self.terms.len());

        for term in &self.terms {
            match &term.kind {
                TermKind::Dice { count, die } => {
                    let roll = DicePool::new().add(*die, *count).roll(rng);
                    total = term
                        .sign
                        .accumulate(total, roll.total().unsigned_abs())
                        .ok_or_else(overflow)?;
                    dice.extend(roll);
                    parts.push((term.sign, term.kind.to_string()));
                }
                TermKind::Constant(n) => {
                    total = term.sign.accumulate(total, *n).ok_or_else(overflow)?;
                    parts.push((term.sign, n.to_string()));
                }
                TermKind::Variable(path) => {
                    let value = data.get(path).unwrap_or_else(|| {
                        tracing::warn!(variable = %path, "unknown formula variable, using 0");
                        0
                    });
                    let sign = if value < 0 { term.sign.flip() } else { term.sign };
                    total = sign
                        .accumulate(total, value.unsigned_abs())
                        .ok_or_else(overflow)?;
                    parts.push((sign, value.unsigned_abs().to_string()));
                }
            }
        }

        Ok(EvaluatedRoll {
            formula: join_terms(parts.iter().map(|(s, t)| (*s, t.as_str()))),
            total,
            dice,
        })
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<(Sign, String)> = self
            .terms
            .iter()
            .map(|t| (t.sign, t.kind.to_string()))
            .collect();
        write!(
            f,
            "{}",
            join_terms(rendered.iter().map(|(s, t)| (*s, t.as_str())))
        )
    }
}

fn join_terms<'a>(terms: impl Iterator<Item = (Sign, &'a str)>) -> String {
    let mut out = String::new();
    for (i, (sign, text)) in terms.enumerate() {
        match (i, sign) {
            (0, Sign::Plus) => {}
            (0, Sign::Minus) => out.push('-'),
            (_, Sign::Plus) => out.push_str(" + "),
            (_, Sign::Minus) => out.push_str(" - "),
        }
        out.push_str(text);
    }
    out
}

fn is_operand_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '@' | '.' | '_')
}

fn parse_operand(token: &str) -> Result<TermKind, String> {
    if let Some(path) = token.strip_prefix('@') {
        let valid = !path.is_empty()
            && path
                .split('.')
                .all(|seg| !seg.is_empty() && seg.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
        return if valid {
            Ok(TermKind::Variable(path.to_string()))
        } else {
            Err(format!("invalid variable '{token}'"))
        };
    }

    if token.chars().all(|c| c.is_ascii_digit()) {
        return token
            .parse::<u64>()
            .map(TermKind::Constant)
            .map_err(|_| format!("number out of range '{token}'"));
    }

    let lower = token.to_ascii_lowercase();
    let d_pos = lower
        .find('d')
        .ok_or_else(|| format!("unrecognized term '{token}'"))?;
    let count_str = &lower[..d_pos];
    let count = if count_str.is_empty() {
        1
    } else {
        count_str
            .parse::<u32>()
            .map_err(|_| format!("invalid dice count '{count_str}'"))?
    };
    if count == 0 {
        return Err("dice count must be at least 1".to_string());
    }
    if count > MAX_DICE_PER_TERM {
        return Err(format!("at most {MAX_DICE_PER_TERM} dice per term"));
    }
    let die = Die::from_str_tag(&lower[d_pos..])
        .ok_or_else(|| format!("invalid die '{}'", &token[d_pos..]))?;
    Ok(TermKind::Dice { count, die })
}
