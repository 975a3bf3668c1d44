use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A stat as the host stores it: usually a number, occasionally text from a
/// free-form sheet field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    /// A whole number.
    Integer(i64),
    /// A fractional number.
    Float(f64),
    /// A boolean flag.
    Boolean(bool),
    /// Free text, possibly holding a number.
    Text(String),
}

impl StatValue {
    /// Numeric reading of the value, truncated to an integer.
    ///
    /// Text is accepted when it parses as a number. Booleans, blank text and
    /// non-finite floats have no numeric reading.
    pub fn as_number(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            Self::Float(f) if f.is_finite() => Some(f.trunc() as i64),
            Self::Float(_) | Self::Boolean(_) => None,
            Self::Text(s) => {
                let s = s.trim();
                if s.is_empty() {
                    return None;
                }
                s.parse::<i64>().ok().or_else(|| {
                    s.parse::<f64>()
                        .ok()
                        .filter(|f| f.is_finite())
                        .map(|f| f.trunc() as i64)
                })
            }
        }
    }
}

impl From<i64> for StatValue {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<&str> for StatValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Named numeric variables available to `@` references in dice formulas.
///
/// Keys are dotted paths relative to an actor's system data, e.g.
/// `stats.dexterity` or `resources.wounds.value`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RollData {
    vars: BTreeMap<String, i64>,
}

impl RollData {
    /// Create an empty variable context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: i64) -> Self {
        self.vars.insert(key.into(), value);
        self
    }

    /// Insert or replace a variable.
    pub fn insert(&mut self, key: impl Into<String>, value: i64) {
        self.vars.insert(key.into(), value);
    }

    /// Look up a variable.
    pub fn get(&self, key: &str) -> Option<i64> {
        self.vars.get(key).copied()
    }

    /// Number of variables.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Returns true if no variables are defined.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Iterate variables in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), *v))
    }
}
