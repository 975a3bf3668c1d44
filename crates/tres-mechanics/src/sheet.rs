//! Actions behind the buttons and inputs of the actor sheet.

use serde_json::{Number, Value};
use tres_core::{ActorId, Item, ItemId, RecordRef, UpdateSet, item::DEFAULT_ITEM_KIND};

use crate::attack::AttackReport;
use crate::challenge::ChallengeResult;
use crate::error::{MechError, MechResult};
use crate::registry::{SheetConfig, SheetRegistry};
use crate::rolls::Rolls;

/// The value of an inline item field as the input reported it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineInput {
    /// A checkbox and whether it is ticked.
    Checkbox(bool),
    /// A numeric input's raw text.
    Number(String),
    /// Any other input's text.
    Text(String),
}

impl InlineInput {
    /// The value to store.
    pub fn into_value(self) -> Value {
        match self {
            Self::Checkbox(checked) => Value::Bool(checked),
            Self::Number(text) => coerce_number(&text),
            Self::Text(text) => Value::String(text),
        }
    }
}

/// Read numeric input text leniently. Blank, malformed, and non-finite input
/// all become 0.
pub fn coerce_number(text: &str) -> Value {
    let text = text.trim();
    if text.is_empty() {
        return Value::from(0);
    }
    if let Ok(n) = text.parse::<i64>() {
        return Value::from(n);
    }
    let radix = [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)]
        .iter()
        .find_map(|(prefix, radix)| text.strip_prefix(prefix).map(|digits| (digits, *radix)));
    if let Some((digits, radix)) = radix {
        return Value::from(i64::from_str_radix(digits, radix).unwrap_or(0));
    }
    match text.parse::<f64>() {
        Ok(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 9.0e15 => Value::from(f as i64),
        Ok(f) if f.is_finite() => Number::from_f64(f).map_or(Value::from(0), Value::Number),
        _ => Value::from(0),
    }
}

/// One actor's sheet.
#[derive(Clone)]
pub struct ActorSheet {
    actor: ActorId,
    rolls: Rolls,
}

impl ActorSheet {
    /// A sheet for an actor, rolling through `rolls`.
    pub fn new(actor: ActorId, rolls: Rolls) -> Self {
        Self { actor, rolls }
    }

    /// The actor this sheet shows.
    pub fn actor_id(&self) -> &ActorId {
        &self.actor
    }

    /// Add a blank item named `New <type>`. A missing or blank type makes
    /// gear.
    pub async fn create_item(&self, kind: Option<&str>) -> MechResult<Item> {
        let kind = kind
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .unwrap_or(DEFAULT_ITEM_KIND);
        let item = Item::new(format!("New {kind}"), kind);
        let created = self.rolls.store().create_item(&self.actor, item).await?;
        tracing::info!(actor = %self.actor, item = %created.name, "item created");
        Ok(created)
    }

    /// The item and the sheet to open it with, if the actor owns it.
    pub async fn edit_item(
        &self,
        item_id: &ItemId,
        registry: &SheetRegistry,
    ) -> MechResult<Option<(Item, SheetConfig)>> {
        let actor = self.rolls.store().actor(&self.actor).await?;
        let item = actor.and_then(|a| a.item(item_id).cloned());
        Ok(item.and_then(|item| {
            let sheet = registry.item_sheet(&item.kind)?.clone();
            Some((item, sheet))
        }))
    }

    /// Remove an item. Nothing happens without an id.
    pub async fn delete_item(&self, item_id: Option<&ItemId>) -> MechResult<()> {
        let Some(id) = item_id else {
            return Ok(());
        };
        self.rolls
            .store()
            .delete_items(&self.actor, std::slice::from_ref(id))
            .await
    }

    /// Write one field of an item from an inline input.
    ///
    /// Returns whether an update was sent: without an id, a path, or a
    /// matching item nothing is written.
    pub async fn inline_item_edit(
        &self,
        item_id: Option<&ItemId>,
        path: Option<&str>,
        input: InlineInput,
    ) -> MechResult<bool> {
        let (Some(item_id), Some(path)) = (item_id, path.filter(|p| !p.is_empty())) else {
            return Ok(false);
        };
        let owns_item = self
            .rolls
            .store()
            .actor(&self.actor)
            .await?
            .is_some_and(|a| a.item(item_id).is_some());
        if !owns_item {
            return Ok(false);
        }

        let target = RecordRef::Item {
            owner: self.actor.clone(),
            item: item_id.clone(),
        };
        let updates = UpdateSet::new().with(path, input.into_value());
        self.rolls.store().update(&target, &updates).await?;
        Ok(true)
    }

    /// Challenge button. Without a stat the configured default is tested.
    pub async fn challenge(&self, stat: Option<&str>) -> MechResult<Option<ChallengeResult>> {
        let stat = stat
            .filter(|s| !s.is_empty())
            .unwrap_or(self.rolls.config().default_challenge_stat.as_str())
            .to_string();
        self.rolls.challenge(&self.actor, &stat).await
    }

    /// Attack button, against the current target if there is one.
    pub async fn attack(
        &self,
        weapon: Option<&ItemId>,
        target: Option<&ActorId>,
    ) -> MechResult<Option<AttackReport>> {
        self.rolls.attack(&self.actor, weapon, target).await
    }

    /// The actor's items, for the inventory tab.
    pub async fn items(&self) -> MechResult<Vec<Item>> {
        self.rolls
            .store()
            .actor(&self.actor)
            .await?
            .map(|a| a.items)
            .ok_or_else(|| MechError::ActorNotFound(self.actor.clone()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::RulesConfig;
    use crate::dice::RngEvaluator;
    use crate::host::{ChatLog, MemoryStore, ScriptedPrompt};
    use crate::prompt::{PromptOutcome, RollForm};
    use crate::rolls::NO_WEAPON_WARNING;
    use tres_core::{Actor, ActorKind};

    struct Fixture {
        sheet: ActorSheet,
        store: Arc<MemoryStore>,
        chat: Arc<ChatLog>,
        prompt: Arc<ScriptedPrompt>,
        sword: ItemId,
    }

    fn fixture() -> Fixture {
        let sword = Item::weapon("Sword", "might", "1d8").with_uses(3);
        let sword_id = sword.id.clone();
        let actor = Actor::new("Vex", ActorKind::Trespasser)
            .with_stat("knowledge", 2)
            .with_item(sword);
        let store = Arc::new(MemoryStore::new());
        let id = store.insert(actor).unwrap();
        let chat = Arc::new(ChatLog::new());
        let prompt = Arc::new(ScriptedPrompt::default());
        let rolls = Rolls::new(
            store.clone(),
            Arc::new(RngEvaluator::seeded(7)),
            prompt.clone(),
            chat.clone(),
            RulesConfig::default(),
        );
        Fixture {
            sheet: ActorSheet::new(id, rolls),
            store,
            chat,
            prompt,
            sword: sword_id,
        }
    }

    #[test]
    fn number_coercion() {
        assert_eq!(coerce_number("12"), Value::from(12));
        assert_eq!(coerce_number(" 7 "), Value::from(7));
        assert_eq!(coerce_number(""), Value::from(0));
        assert_eq!(coerce_number("abc"), Value::from(0));
        assert_eq!(coerce_number("NaN"), Value::from(0));
        assert_eq!(coerce_number("inf"), Value::from(0));
        assert_eq!(coerce_number("1e3"), Value::from(1000));
        assert_eq!(coerce_number("0x10"), Value::from(16));
        assert_eq!(coerce_number("2.5"), Value::from(2.5));
        assert_eq!(coerce_number("-4"), Value::from(-4));
    }

    #[test]
    fn inline_values() {
        assert_eq!(InlineInput::Checkbox(true).into_value(), Value::Bool(true));
        assert_eq!(
            InlineInput::Text("5".to_string()).into_value(),
            Value::from("5")
        );
        assert_eq!(
            InlineInput::Number("5".to_string()).into_value(),
            Value::from(5)
        );
    }

    #[tokio::test]
    async fn create_defaults_to_gear() {
        let f = fixture();
        let gear = f.sheet.create_item(None).await.unwrap();
        assert_eq!(gear.name, "New gear");
        assert_eq!(gear.kind, "gear");
        let weapon = f.sheet.create_item(Some("weapon")).await.unwrap();
        assert_eq!(weapon.name, "New weapon");
        assert_eq!(f.sheet.items().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn delete_without_id_is_a_no_op() {
        let f = fixture();
        f.sheet.delete_item(None).await.unwrap();
        assert_eq!(f.sheet.items().await.unwrap().len(), 1);
        f.sheet.delete_item(Some(&f.sword)).await.unwrap();
        assert!(f.sheet.items().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn inline_edit_writes_one_field() {
        let f = fixture();
        let sent = f
            .sheet
            .inline_item_edit(
                Some(&f.sword),
                Some("system.uses.value"),
                InlineInput::Number("oops".to_string()),
            )
            .await
            .unwrap();
        assert!(sent);
        let actor = f.store.get(f.sheet.actor_id()).unwrap();
        assert_eq!(actor.item(&f.sword).unwrap().system.uses_remaining(), 0);

        f.sheet
            .inline_item_edit(
                Some(&f.sword),
                Some("system.equipped"),
                InlineInput::Checkbox(true),
            )
            .await
            .unwrap();
        let actor = f.store.get(f.sheet.actor_id()).unwrap();
        let extra = &actor.item(&f.sword).unwrap().system.extra;
        assert_eq!(extra.get("equipped"), Some(&Value::Bool(true)));
    }

    #[tokio::test]
    async fn inline_edit_needs_id_path_and_item() {
        let f = fixture();
        let input = || InlineInput::Text("x".to_string());
        assert!(!f.sheet.inline_item_edit(None, Some("name"), input()).await.unwrap());
        assert!(!f.sheet.inline_item_edit(Some(&f.sword), None, input()).await.unwrap());
        let ghost = ItemId::from("ghost");
        assert!(!f.sheet.inline_item_edit(Some(&ghost), Some("name"), input()).await.unwrap());
    }

    #[tokio::test]
    async fn edit_opens_the_item_sheet() {
        let f = fixture();
        let registry = SheetRegistry::trespasser();
        let (item, sheet) = f.sheet.edit_item(&f.sword, &registry).await.unwrap().unwrap();
        assert_eq!(item.name, "Sword");
        assert_eq!(sheet.width, 560);
        let ghost = ItemId::from("ghost");
        assert!(f.sheet.edit_item(&ghost, &registry).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn challenge_defaults_to_knowledge() {
        let f = fixture();
        f.prompt
            .push(PromptOutcome::Confirmed(RollForm::new(0, 0, "0")));
        let result = f.sheet.challenge(None).await.unwrap().unwrap();
        assert_eq!(result.stat, 2);
        assert_eq!(result.formula, "1d20 + 2");
        assert!(f.chat.messages()[0].content.contains("KNOWLEDGE"));
    }

    #[tokio::test]
    async fn attack_without_weapon_warns() {
        let f = fixture();
        assert!(f.sheet.attack(None, None).await.unwrap().is_none());
        assert_eq!(f.chat.warnings(), [NO_WEAPON_WARNING]);
    }
}
