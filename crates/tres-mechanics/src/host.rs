//! In-memory host collaborators, for the CLI and for tests.

use std::collections::{BTreeMap, VecDeque};

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use tres_core::{Actor, ActorId, Item, ItemId, RecordRef, UpdateSet};

use crate::derive::derive_stats;
use crate::error::{MechError, MechResult};
use crate::ports::{MessageSink, Prompt, RecordStore, Speaker};
use crate::prompt::{PromptOutcome, PromptRequest};

/// Actors kept in memory, keyed by id.
///
/// Every insert and update reruns [`derive_stats`] on the changed actor, the
/// way a host re-prepares a document after saving it.
#[derive(Debug, Default)]
pub struct MemoryStore {
    actors: RwLock<BTreeMap<ActorId, Actor>>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding the given actors.
    pub fn from_actors(actors: impl IntoIterator<Item = Actor>) -> MechResult<Self> {
        let store = Self::new();
        for actor in actors {
            store.insert(actor)?;
        }
        Ok(store)
    }

    /// Add or replace an actor, deriving its stats first.
    pub fn insert(&self, mut actor: Actor) -> MechResult<ActorId> {
        derive_stats(&mut actor.system)?;
        let id = actor.id.clone();
        self.actors.write().insert(id.clone(), actor);
        Ok(id)
    }

    /// A copy of one actor.
    pub fn get(&self, id: &ActorId) -> Option<Actor> {
        self.actors.read().get(id).cloned()
    }

    /// A copy of the first actor with this name.
    pub fn find_by_name(&self, name: &str) -> Option<Actor> {
        self.actors
            .read()
            .values()
            .find(|a| a.name == name)
            .cloned()
    }

    /// Copies of every actor, in id order.
    pub fn actors(&self) -> Vec<Actor> {
        self.actors.read().values().cloned().collect()
    }

    /// Number of actors.
    pub fn len(&self) -> usize {
        self.actors.read().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.actors.read().is_empty()
    }

    fn modify<T>(
        &self,
        id: &ActorId,
        change: impl FnOnce(&mut Actor) -> MechResult<T>,
    ) -> MechResult<T> {
        let mut actors = self.actors.write();
        let stored = actors
            .get_mut(id)
            .ok_or_else(|| MechError::ActorNotFound(id.clone()))?;
        // Work on a copy so a failed change leaves the stored actor alone.
        let mut actor = stored.clone();
        let out = change(&mut actor)?;
        derive_stats(&mut actor.system)?;
        *stored = actor;
        Ok(out)
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn actor(&self, id: &ActorId) -> MechResult<Option<Actor>> {
        Ok(self.get(id))
    }

    async fn update(&self, target: &RecordRef, updates: &UpdateSet) -> MechResult<()> {
        tracing::debug!(%target, fields = updates.len(), "updating record");
        match target {
            RecordRef::Actor(id) => self.modify(id, |actor| Ok(updates.apply_to(actor)?)),
            RecordRef::Item { owner, item } => self.modify(owner, |actor| {
                let found = actor.item_mut(item).ok_or_else(|| MechError::ItemNotFound {
                    owner: owner.clone(),
                    item: item.clone(),
                })?;
                Ok(updates.apply_to(found)?)
            }),
        }
    }

    async fn create_item(&self, owner: &ActorId, item: Item) -> MechResult<Item> {
        self.modify(owner, |actor| {
            actor.items.push(item.clone());
            Ok(item)
        })
    }

    async fn delete_items(&self, owner: &ActorId, ids: &[ItemId]) -> MechResult<()> {
        self.modify(owner, |actor| {
            if let Some(missing) = ids.iter().find(|id| actor.item(id).is_none()) {
                return Err(MechError::ItemNotFound {
                    owner: owner.clone(),
                    item: missing.clone(),
                });
            }
            actor.items.retain(|item| !ids.contains(&item.id));
            Ok(())
        })
    }
}

/// Answers modifier dialogs from a queue. An empty queue behaves like a
/// dialog closed without a choice.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: Mutex<VecDeque<PromptOutcome>>,
}

impl ScriptedPrompt {
    /// A prompt that gives these answers in order.
    pub fn new(answers: impl IntoIterator<Item = PromptOutcome>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
        }
    }

    /// Queue another answer.
    pub fn push(&self, answer: PromptOutcome) {
        self.answers.lock().push_back(answer);
    }
}

#[async_trait]
impl Prompt for ScriptedPrompt {
    async fn boons_banes(&self, request: &PromptRequest) -> MechResult<PromptOutcome> {
        tracing::debug!(title = %request.title, "prompting");
        Ok(self
            .answers
            .lock()
            .pop_front()
            .unwrap_or(PromptOutcome::Dismissed))
    }
}

/// A posted chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    /// Who said it.
    pub speaker: Speaker,
    /// HTML content.
    pub content: String,
}

/// Records chat messages and warnings.
#[derive(Debug, Default)]
pub struct ChatLog {
    messages: Mutex<Vec<ChatMessage>>,
    warnings: Mutex<Vec<String>>,
}

impl ChatLog {
    /// An empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages posted so far.
    pub fn messages(&self) -> Vec<ChatMessage> {
        self.messages.lock().clone()
    }

    /// Warnings shown so far.
    pub fn warnings(&self) -> Vec<String> {
        self.warnings.lock().clone()
    }

    /// Take every message, leaving the log empty.
    pub fn drain(&self) -> Vec<ChatMessage> {
        std::mem::take(&mut *self.messages.lock())
    }
}

impl MessageSink for ChatLog {
    fn post(&self, speaker: &Speaker, content: String) {
        self.messages.lock().push(ChatMessage {
            speaker: speaker.clone(),
            content,
        });
    }

    fn warn(&self, message: &str) {
        tracing::warn!(warning = message, "user warning");
        self.warnings.lock().push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::RollForm;
    use tres_core::{ActorKind, Pool, Resources};

    fn fighter() -> Actor {
        Actor::new("Vex", ActorKind::Trespasser)
            .with_stat("stamina", 4)
            .with_stat("wounds", 3)
            .with_resources(Resources {
                stamina: Some(Pool {
                    value: 9,
                    max: None,
                    base_max: None,
                }),
                ..Resources::default()
            })
            .with_item(Item::weapon("Knife", "dexterity", "1d4").with_uses(2))
    }

    #[test]
    fn insert_derives() {
        let store = MemoryStore::new();
        let id = store.insert(fighter()).unwrap();
        let actor = store.get(&id).unwrap();
        let resources = actor.system.resources.unwrap();
        assert_eq!(resources.stamina.unwrap().value, 4);
        let wounds = resources.wounds.unwrap();
        assert_eq!(wounds.base_max, Some(3));
        assert_eq!(wounds.max, Some(1));
        assert_eq!(store.find_by_name("Vex").unwrap().id, id);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn actor_update_rederives() {
        let store = MemoryStore::new();
        let id = store.insert(fighter()).unwrap();
        let updates = UpdateSet::new()
            .with("system.derived.minorWounds", 4)
            .with("system.resources.wounds.value", 1);
        store
            .update(&RecordRef::Actor(id.clone()), &updates)
            .await
            .unwrap();
        let actor = store.get(&id).unwrap();
        assert_eq!(actor.system.minor_wounds(), 1);
        assert_eq!(actor.system.wounds_value(), 2);
    }

    #[tokio::test]
    async fn item_update_touches_only_the_item() {
        let store = MemoryStore::new();
        let id = store.insert(fighter()).unwrap();
        let knife = store.get(&id).unwrap().items[0].id.clone();
        let target = RecordRef::Item {
            owner: id.clone(),
            item: knife.clone(),
        };
        store
            .update(&target, &UpdateSet::new().with("system.uses.value", 1))
            .await
            .unwrap();
        let actor = store.get(&id).unwrap();
        assert_eq!(actor.item(&knife).unwrap().system.uses_remaining(), 1);
    }

    #[tokio::test]
    async fn bad_update_leaves_record_alone() {
        let store = MemoryStore::new();
        let id = store.insert(fighter()).unwrap();
        let before = store.get(&id).unwrap();
        let bad = UpdateSet::new()
            .with("name", "Renamed")
            .with("name.first", "x");
        assert!(store.update(&RecordRef::Actor(id.clone()), &bad).await.is_err());
        assert_eq!(store.get(&id).unwrap(), before);
    }

    #[tokio::test]
    async fn unknown_records_are_errors() {
        let store = MemoryStore::new();
        let id = store.insert(fighter()).unwrap();
        let err = store
            .update(&RecordRef::Actor(ActorId::from("ghost")), &UpdateSet::new())
            .await
            .unwrap_err();
        assert!(matches!(err, MechError::ActorNotFound(_)));

        let err = store
            .delete_items(&id, &[ItemId::from("ghost")])
            .await
            .unwrap_err();
        assert!(matches!(err, MechError::ItemNotFound { .. }));
        assert_eq!(store.get(&id).unwrap().items.len(), 1);
    }

    #[tokio::test]
    async fn create_and_delete_items() {
        let store = MemoryStore::new();
        let id = store.insert(fighter()).unwrap();
        let rope = store
            .create_item(&id, Item::new("Rope", "gear"))
            .await
            .unwrap();
        assert_eq!(store.get(&id).unwrap().items.len(), 2);
        store.delete_items(&id, &[rope.id]).await.unwrap();
        assert_eq!(store.get(&id).unwrap().items.len(), 1);
    }

    #[tokio::test]
    async fn scripted_prompt_runs_dry() {
        let prompt = ScriptedPrompt::new([PromptOutcome::Cancelled]);
        prompt.push(PromptOutcome::Confirmed(RollForm::new(1, 0, "")));
        let request = PromptRequest::boons_banes();
        assert_eq!(
            prompt.boons_banes(&request).await.unwrap(),
            PromptOutcome::Cancelled
        );
        assert!(matches!(
            prompt.boons_banes(&request).await.unwrap(),
            PromptOutcome::Confirmed(_)
        ));
        assert_eq!(
            prompt.boons_banes(&request).await.unwrap(),
            PromptOutcome::Dismissed
        );
    }

    #[test]
    fn chat_log_records() {
        let log = ChatLog::new();
        let speaker = Speaker {
            actor: None,
            alias: "GM".to_string(),
        };
        log.post(&speaker, "<b>hi</b>".to_string());
        log.warn("careful");
        assert_eq!(log.messages()[0].content, "<b>hi</b>");
        assert_eq!(log.warnings(), ["careful"]);
        assert_eq!(log.drain().len(), 1);
        assert!(log.messages().is_empty());
    }
}
