//! Interfaces to the virtual-tabletop host.
//!
//! The host owns persistence, dice presentation, dialogs, and chat. The rules
//! reach it only through these traits, so any host (or a test double) can sit
//! behind them.

use async_trait::async_trait;
use tres_core::{Actor, ActorId, Item, ItemId, RecordRef, RollData, UpdateSet};

use crate::dice::EvaluatedRoll;
use crate::error::MechResult;
use crate::prompt::{PromptOutcome, PromptRequest};

/// Document persistence.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch an actor with its embedded items.
    async fn actor(&self, id: &ActorId) -> MechResult<Option<Actor>>;

    /// Apply a batch of field assignments to one record atomically.
    async fn update(&self, target: &RecordRef, updates: &UpdateSet) -> MechResult<()>;

    /// Embed a new item in an actor, returning it as stored.
    async fn create_item(&self, owner: &ActorId, item: Item) -> MechResult<Item>;

    /// Remove embedded items from an actor.
    async fn delete_items(&self, owner: &ActorId, ids: &[ItemId]) -> MechResult<()>;
}

/// Dice formula evaluation.
#[async_trait]
pub trait DiceEvaluator: Send + Sync {
    /// Evaluate a formula, resolving `@` variables from `data`.
    async fn evaluate(&self, formula: &str, data: &RollData) -> MechResult<EvaluatedRoll>;
}

/// Modal input for roll modifiers.
#[async_trait]
pub trait Prompt: Send + Sync {
    /// Ask the user for boons, banes, and a flat modifier.
    async fn boons_banes(&self, request: &PromptRequest) -> MechResult<PromptOutcome>;
}

/// Who a chat message is attributed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Speaker {
    /// The speaking actor, if any.
    pub actor: Option<ActorId>,
    /// Display name.
    pub alias: String,
}

impl Speaker {
    /// A speaker for an actor.
    pub fn for_actor(actor: &Actor) -> Self {
        Self {
            actor: Some(actor.id.clone()),
            alias: actor.name.clone(),
        }
    }
}

/// Chat output and user notifications. Fire-and-forget.
pub trait MessageSink: Send + Sync {
    /// Post an HTML chat message.
    fn post(&self, speaker: &Speaker, content: String);

    /// Show a warning notification to the user.
    fn warn(&self, message: &str);
}
