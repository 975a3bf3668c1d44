use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of generated record ids, matching the host's short id format.
const ID_LEN: usize = 16;

fn short_id() -> String {
    Uuid::new_v4().simple().to_string()[..ID_LEN].to_string()
}

/// Identifier of an actor record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(pub String);

impl ActorId {
    /// Generate a new random actor id.
    pub fn new() -> Self {
        Self(short_id())
    }
}

impl Default for ActorId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for ActorId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of an item record embedded in an actor.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    /// Generate a new random item id.
    pub fn new() -> Self {
        Self(short_id())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A reference to a record the host can update.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordRef {
    /// A top-level actor.
    Actor(ActorId),
    /// An item embedded in an actor.
    Item {
        /// The owning actor.
        owner: ActorId,
        /// The item itself.
        item: ItemId,
    },
}

impl fmt::Display for RecordRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Actor(id) => write!(f, "Actor.{id}"),
            Self::Item { owner, item } => write!(f, "Actor.{owner}.Item.{item}"),
        }
    }
}
