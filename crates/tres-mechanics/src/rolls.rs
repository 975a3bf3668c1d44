//! Challenge and attack flows: fetch records, ask the player, roll, write
//! the results back, and post the chat card.

use std::sync::Arc;

use tres_core::{Actor, ActorId, ItemId, RecordRef};

use crate::attack::{self, AttackReport};
use crate::card;
use crate::challenge::{self, ChallengeResult};
use crate::config::RulesConfig;
use crate::error::{MechError, MechResult};
use crate::ports::{DiceEvaluator, MessageSink, Prompt, RecordStore, Speaker};
use crate::prompt::{PromptRequest, RollModifiers};

/// Warning shown when an attack is started without a weapon.
pub const NO_WEAPON_WARNING: &str = "Select a weapon to attack with.";

/// The roll flows, wired to a host's collaborators.
#[derive(Clone)]
pub struct Rolls {
    store: Arc<dyn RecordStore>,
    dice: Arc<dyn DiceEvaluator>,
    prompt: Arc<dyn Prompt>,
    chat: Arc<dyn MessageSink>,
    config: RulesConfig,
}

impl Rolls {
    /// Wire the flows to a host.
    pub fn new(
        store: Arc<dyn RecordStore>,
        dice: Arc<dyn DiceEvaluator>,
        prompt: Arc<dyn Prompt>,
        chat: Arc<dyn MessageSink>,
        config: RulesConfig,
    ) -> Self {
        Self {
            store,
            dice,
            prompt,
            chat,
            config,
        }
    }

    /// The rule constants in use.
    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    /// The record store in use.
    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    async fn load_actor(&self, id: &ActorId) -> MechResult<Actor> {
        self.store
            .actor(id)
            .await?
            .ok_or_else(|| MechError::ActorNotFound(id.clone()))
    }

    /// Roll a challenge on one of the actor's stats.
    ///
    /// Returns `Ok(None)` when the player cancels the modifier dialog; nothing
    /// is rolled or posted in that case.
    pub async fn challenge(
        &self,
        actor_id: &ActorId,
        stat_key: &str,
    ) -> MechResult<Option<ChallengeResult>> {
        let actor = self.load_actor(actor_id).await?;
        let stat = actor.system.stat_or(stat_key, 0);

        let outcome = self
            .prompt
            .boons_banes(&PromptRequest::boons_banes())
            .await?;
        let Some(form) = outcome.into_form() else {
            tracing::debug!(actor = %actor.name, "challenge cancelled");
            return Ok(None);
        };
        let modifiers = RollModifiers::from_form(&form);

        let result = challenge::resolve_challenge(
            self.dice.as_ref(),
            stat,
            &modifiers,
            self.config.net_dice_cap,
        )
        .await?;
        tracing::info!(
            actor = %actor.name,
            stat = stat_key,
            formula = %result.formula,
            total = result.total,
            "challenge resolved"
        );

        self.chat.post(
            &Speaker::for_actor(&actor),
            card::challenge_card(&actor.name, stat_key, &result),
        );
        Ok(Some(result))
    }

    /// Attack a target (or nobody) with one of the attacker's weapons.
    ///
    /// Without a weapon the player is warned and `Ok(None)` is returned.
    /// Record updates are only sent once every roll has succeeded: the
    /// defender first, then the weapon, one batch each.
    pub async fn attack(
        &self,
        attacker_id: &ActorId,
        weapon_id: Option<&ItemId>,
        target_id: Option<&ActorId>,
    ) -> MechResult<Option<AttackReport>> {
        let attacker = self.load_actor(attacker_id).await?;
        let Some(weapon) = weapon_id.and_then(|id| attacker.item(id)) else {
            tracing::warn!(attacker = %attacker.name, "attack without a weapon");
            self.chat.warn(NO_WEAPON_WARNING);
            return Ok(None);
        };
        let defender = match target_id {
            Some(id) => Some(self.load_actor(id).await?),
            None => None,
        };

        let report = attack::resolve_attack(
            self.dice.as_ref(),
            &self.config,
            &attacker,
            weapon,
            defender.as_ref(),
        )
        .await?;

        if let (Some(defender), Some(updates)) = (&defender, &report.defender_updates) {
            self.store
                .update(&RecordRef::Actor(defender.id.clone()), updates)
                .await?;
        }
        if let Some(updates) = &report.weapon_updates {
            let target = RecordRef::Item {
                owner: attacker.id.clone(),
                item: weapon.id.clone(),
            };
            self.store.update(&target, updates).await?;
        }

        tracing::info!(
            attacker = %attacker.name,
            weapon = %weapon.name,
            defender = defender.as_ref().map_or("none", |d| d.name.as_str()),
            hit = report.hit,
            stage = ?report.stage(),
            "attack resolved"
        );
        self.chat
            .post(&Speaker::for_actor(&attacker), card::attack_card(&report));
        Ok(Some(report))
    }
}
