//! Record model for the Trespasser rules engine.
//!
//! The virtual-tabletop host owns persistence; this crate only describes the
//! shape of the records it hands us. Actors carry stats, resource pools, and
//! a minor-wound counter. Items carry the weapon fields the attack rules read.
//! Mutations travel back to the host as [`UpdateSet`]s keyed by dotted paths.

/// Actors (player characters, NPCs, vehicles) and their system data.
pub mod actor;
/// Error types used throughout the crate.
pub mod error;
/// Record identifiers and references.
pub mod id;
/// Embedded items (weapons, gear).
pub mod item;
/// Resource pools (stamina, wounds, fate).
pub mod pool;
/// Dotted-path field updates.
pub mod update;
/// Loosely typed stat values and roll data.
pub mod value;

pub use actor::{Actor, ActorKind, ActorSystem, Derived, Resources};
pub use error::{RecordError, RecordResult};
pub use id::{ActorId, ItemId, RecordRef};
pub use item::{Item, ItemSystem, Uses};
pub use pool::Pool;
pub use update::UpdateSet;
pub use value::{RollData, StatValue};
