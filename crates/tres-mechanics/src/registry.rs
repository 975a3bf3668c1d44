//! Sheet registrations for the Trespasser system.
//!
//! A [`SheetRegistry`] is built once at startup and handed to whatever
//! renders sheets. Built-in sheets are replaced, not patched.

use std::collections::BTreeMap;

use serde::Serialize;
use tres_core::ActorKind;

/// System id used in CSS classes and template paths.
pub const SYSTEM_ID: &str = "trespasser-rpg";

/// Tab navigation for a sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TabConfig {
    /// Selector of the tab strip.
    pub nav_selector: String,
    /// Selector of the tab panels.
    pub content_selector: String,
    /// Tab shown when the sheet opens.
    pub initial: String,
}

/// Rendering options for one sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetConfig {
    /// CSS classes on the sheet window.
    pub classes: Vec<String>,
    /// Template path.
    pub template: String,
    /// Window width in pixels.
    pub width: u32,
    /// Window height in pixels.
    pub height: u32,
    /// Save on every field change rather than on submit.
    pub submit_on_change: bool,
    /// Tabs, if the sheet has any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tabs: Option<TabConfig>,
    /// Whether the sheet replaces the host's default for its types.
    pub make_default: bool,
}

impl SheetConfig {
    /// The actor sheet: stats, resources, and inventory tabs.
    pub fn actor() -> Self {
        Self {
            classes: classes(&["sheet", "actor"]),
            template: template("actor-sheet"),
            width: 760,
            height: 640,
            submit_on_change: true,
            tabs: Some(TabConfig {
                nav_selector: ".sheet-tabs".to_string(),
                content_selector: ".sheet-body".to_string(),
                initial: "stats".to_string(),
            }),
            make_default: true,
        }
    }

    /// The item sheet.
    pub fn item() -> Self {
        Self {
            classes: classes(&["sheet", "item"]),
            template: template("item-sheet"),
            width: 560,
            height: 520,
            submit_on_change: true,
            tabs: None,
            make_default: true,
        }
    }
}

fn classes(extra: &[&str]) -> Vec<String> {
    std::iter::once("trespasser")
        .chain(extra.iter().copied())
        .map(str::to_string)
        .collect()
}

fn template(name: &str) -> String {
    format!("systems/{SYSTEM_ID}/templates/{name}.hbs")
}

/// Which sheet renders which record type.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SheetRegistry {
    actors: BTreeMap<String, SheetConfig>,
    item_default: Option<SheetConfig>,
    items: BTreeMap<String, SheetConfig>,
}

impl SheetRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The Trespasser registrations: one actor sheet for every actor kind and
    /// one item sheet for every item type.
    pub fn trespasser() -> Self {
        let mut registry = Self::new();
        for kind in ActorKind::ALL {
            registry.register_actor(kind, SheetConfig::actor());
        }
        registry.register_item_default(SheetConfig::item());
        tracing::debug!(actor_sheets = registry.actors.len(), "registered sheets");
        registry
    }

    /// Register the sheet for an actor kind, replacing any earlier one.
    pub fn register_actor(&mut self, kind: ActorKind, config: SheetConfig) {
        self.actors.insert(kind.to_string(), config);
    }

    /// Register a sheet for one item type.
    pub fn register_item(&mut self, kind: impl Into<String>, config: SheetConfig) {
        self.items.insert(kind.into(), config);
    }

    /// Register the sheet used for item types without their own.
    pub fn register_item_default(&mut self, config: SheetConfig) {
        self.item_default = Some(config);
    }

    /// The sheet for an actor kind.
    pub fn actor_sheet(&self, kind: ActorKind) -> Option<&SheetConfig> {
        self.actors.get(&kind.to_string())
    }

    /// The sheet for an item type.
    pub fn item_sheet(&self, kind: &str) -> Option<&SheetConfig> {
        self.items.get(kind).or(self.item_default.as_ref())
    }

    /// Actor type names with a sheet, sorted.
    pub fn actor_kinds(&self) -> impl Iterator<Item = &str> {
        self.actors.keys().map(String::as_str)
    }
}
