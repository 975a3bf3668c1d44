//! Error types for the rules engine.

use tres_core::{ActorId, ItemId, RecordError};

/// Errors that can occur while deriving stats or resolving rolls.
#[derive(Debug, thiserror::Error)]
pub enum MechError {
    /// The record store has no actor with this id.
    #[error("actor not found: {0}")]
    ActorNotFound(ActorId),

    /// The actor owns no item with this id.
    #[error("item {item} not found on actor {owner}")]
    ItemNotFound {
        /// The actor that was searched.
        owner: ActorId,
        /// The missing item.
        item: ItemId,
    },

    /// A dice formula could not be parsed.
    #[error("invalid dice formula '{formula}': {reason}")]
    InvalidFormula {
        /// The formula text.
        formula: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A resource pool needed by a rule is missing from the record.
    #[error("resource pool '{0}' is missing")]
    MissingPool(&'static str),

    /// An update could not be applied to a record.
    #[error("record update failed: {0}")]
    Record(#[from] RecordError),

    /// A host collaborator failed.
    #[error("{collaborator} failed: {message}")]
    Collaborator {
        /// Which collaborator (store, dice, prompt, chat).
        collaborator: &'static str,
        /// The host's description of the failure.
        message: String,
    },
}

/// Convenience result type for rules operations.
pub type MechResult<T> = Result<T, MechError>;
