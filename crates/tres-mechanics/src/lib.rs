//! Rules engine for the Trespasser tabletop RPG.
//!
//! Derives resource ceilings and rolls minor wounds into wounds, resolves
//! challenges and attacks, and renders the chat cards for them. The
//! virtual-tabletop host is reached through the traits in [`ports`]; the
//! in-memory versions in [`host`] back the CLI and the tests.

pub mod attack;
pub mod card;
pub mod challenge;
pub mod config;
pub mod derive;
pub mod dice;
pub mod error;
pub mod host;
pub mod ports;
pub mod prompt;
pub mod registry;
pub mod rolls;
pub mod sheet;

#[cfg(test)]
mod test_support;

pub use attack::{AttackReport, AttackStage, Charge, DamageReport, WoundOutcome};
pub use challenge::ChallengeResult;
pub use config::RulesConfig;
pub use derive::derive_stats;
pub use dice::{Die, EvaluatedRoll, Formula, RngEvaluator};
pub use error::{MechError, MechResult};
pub use host::{ChatLog, ChatMessage, MemoryStore, ScriptedPrompt};
pub use ports::{DiceEvaluator, MessageSink, Prompt, RecordStore, Speaker};
pub use prompt::{PromptOutcome, PromptRequest, RollForm, RollModifiers};
pub use registry::{SheetConfig, SheetRegistry, TabConfig};
pub use rolls::Rolls;
pub use sheet::{ActorSheet, InlineInput};
