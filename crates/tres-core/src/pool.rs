//! Resource pools (stamina, wounds, fate).
//!
//! A pool has a current value, a user-editable ceiling, and a ceiling derived
//! from base stats. Only the derived ceiling is ever recomputed.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A countable character resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pool {
    /// Current value.
    #[serde(default)]
    pub value: i64,
    /// User-editable maximum. Backfilled from `base_max` only when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
    /// Maximum derived from stats, recomputed on every pass.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_max: Option<i64>,
}

impl Pool {
    /// Create a pool with an explicit value and maximum.
    pub fn new(value: i64, max: i64) -> Self {
        Self {
            value,
            max: Some(max),
            base_max: None,
        }
    }

    /// Lower the value to the maximum if it exceeds it. Returns true if the
    /// value changed. Values below zero are left alone.
    pub fn clamp_to_max(&mut self) -> bool {
        match self.max {
            Some(max) if self.value > max => {
                self.value = max;
                true
            }
            _ => false,
        }
    }

    /// Returns true if the value has reached the maximum.
    pub fn is_full(&self) -> bool {
        self.max.is_some_and(|max| self.value >= max)
    }
}

impl fmt::Display for Pool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) => write!(f, "{}/{}", self.value, max),
            None => write!(f, "{}/-", self.value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_lowers_to_max() {
        let mut p = Pool::new(5, 3);
        assert!(p.clamp_to_max());
        assert_eq!(p.value, 3);
        assert!(p.is_full());
    }

    #[test]
    fn clamp_never_raises_negative_values() {
        let mut p = Pool::new(-2, 3);
        assert!(!p.clamp_to_max());
        assert_eq!(p.value, -2);
    }

    #[test]
    fn clamp_without_max_is_noop() {
        let mut p = Pool {
            value: 9,
            max: None,
            base_max: None,
        };
        assert!(!p.clamp_to_max());
        assert_eq!(p.value, 9);
        assert!(!p.is_full());
    }

    #[test]
    fn camel_case_wire_shape() {
        let p = Pool {
            value: 1,
            max: Some(2),
            base_max: Some(2),
        };
        let json = serde_json::to_value(p).unwrap();
        assert_eq!(json, serde_json::json!({"value": 1, "max": 2, "baseMax": 2}));
    }

    #[test]
    fn display() {
        assert_eq!(Pool::new(1, 4).to_string(), "1/4");
    }
}
