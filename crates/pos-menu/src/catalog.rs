use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// How many options a group accepts.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionType {
    /// Exactly zero or one chosen option.
    #[default]
    Single,
    /// Any subset of the group's options.
    Multiple,
}

/// One choosable option inside a group.
///
/// `price` is a delta added on top of the item's base price when chosen.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MenuOption {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub position: i32,
}

/// A named set of mutually-related choices for a menu item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OptionGroup {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub selection_type: SelectionType,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default)]
    pub position: i32,
    #[serde(default)]
    pub options: Vec<MenuOption>,
}

impl OptionGroup {
    pub fn option(&self, option_id: u64) -> Option<&MenuOption> {
        self.options.iter().find(|o| o.id == option_id)
    }

    /// First option in display order, if any. Used as the auto-default for
    /// required single-selection groups.
    pub fn first_option(&self) -> Option<&MenuOption> {
        self.options.first()
    }
}

/// Binary add-on toggle with its own price delta, independent of groups.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpecialOption {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub price_delta: f64,
}

fn default_true() -> bool {
    true
}

/// Immutable per-item customization config, loaded once at session start.
///
/// Catalog documents key items by id; the `id` field inside the entry is
/// optional and overwritten from the map key on load.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MenuItemConfig {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub base_price: f64,
    #[serde(default = "default_true")]
    pub is_available: bool,
    #[serde(default)]
    pub groups: Vec<OptionGroup>,
    #[serde(default)]
    pub special: Option<SpecialOption>,
}

impl MenuItemConfig {
    pub fn group(&self, group_id: u64) -> Option<&OptionGroup> {
        self.groups.iter().find(|g| g.id == group_id)
    }

    /// Sort groups and their options into display order: `(position, id)`.
    ///
    /// "First option" for auto-defaults means first in this order, so the
    /// sort must run before the config is handed to a session.
    pub(crate) fn sort_for_display(&mut self) {
        self.groups.sort_by_key(|g| (g.position, g.id));
        for group in &mut self.groups {
            group.options.sort_by_key(|o| (o.position, o.id));
        }
    }
}

/// The full menu catalog, keyed by item id.
///
/// BTreeMap so iteration order is stable for display and tests.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MenuCatalog {
    items: BTreeMap<u64, MenuItemConfig>,
}

impl MenuCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items<I>(items: I) -> Self
    where
        I: IntoIterator<Item = MenuItemConfig>,
    {
        let mut catalog = Self::new();
        for mut item in items {
            item.sort_for_display();
            catalog.items.insert(item.id, item);
        }
        catalog
    }

    pub fn get(&self, item_id: u64) -> Option<&MenuItemConfig> {
        self.items.get(&item_id)
    }

    pub fn items(&self) -> impl Iterator<Item = &MenuItemConfig> {
        self.items.values()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
