use std::collections::{BTreeMap, BTreeSet};

use pos_menu::{MenuItemConfig, SelectionType};

/// The chosen options of one group. Tagged by the group's selection type
/// so single/multiple handling is exhaustive at compile time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GroupSelection {
    /// Zero or one chosen option id.
    Single(Option<u64>),
    /// Chosen option ids. BTreeSet keeps them sorted, so the canonical
    /// key never depends on click order.
    Multiple(BTreeSet<u64>),
}

impl GroupSelection {
    /// `true` when nothing is chosen in this group.
    pub fn is_empty(&self) -> bool {
        match self {
            GroupSelection::Single(choice) => choice.is_none(),
            GroupSelection::Multiple(set) => set.is_empty(),
        }
    }

    /// `true` when `option_id` is among the chosen options.
    pub fn contains(&self, option_id: u64) -> bool {
        match self {
            GroupSelection::Single(choice) => *choice == Some(option_id),
            GroupSelection::Multiple(set) => set.contains(&option_id),
        }
    }
}

/// Transient per-customization selection state: one slot per option group,
/// plus quantity and the special toggle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectionState {
    choices: BTreeMap<u64, GroupSelection>,
    pub quantity: u32,
    pub special_selected: bool,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionState {
    /// Empty state with quantity 1 and no group slots. Items without
    /// customization use this directly.
    pub fn new() -> Self {
        Self {
            choices: BTreeMap::new(),
            quantity: 1,
            special_selected: false,
        }
    }

    /// One unselected slot per group of `item`, quantity 1, special off.
    /// Defaults for required groups are applied by the session at open
    /// time, not here.
    pub fn for_item(item: &MenuItemConfig) -> Self {
        let mut state = Self::new();
        for group in &item.groups {
            let slot = match group.selection_type {
                SelectionType::Single => GroupSelection::Single(None),
                SelectionType::Multiple => GroupSelection::Multiple(BTreeSet::new()),
            };
            state.choices.insert(group.id, slot);
        }
        state
    }

    pub fn selected(&self, group_id: u64) -> Option<&GroupSelection> {
        self.choices.get(&group_id)
    }

    /// Iterate `(group_id, selection)` in ascending group-id order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, &GroupSelection)> {
        self.choices.iter().map(|(id, sel)| (*id, sel))
    }

    /// Replace the choice of a single-type slot. Returns `false` when the
    /// slot is absent or not single-typed (callers surface that as an
    /// error with catalog context).
    pub(crate) fn set_single(&mut self, group_id: u64, option_id: Option<u64>) -> bool {
        match self.choices.get_mut(&group_id) {
            Some(GroupSelection::Single(choice)) => {
                *choice = option_id;
                true
            }
            _ => false,
        }
    }

    /// Toggle membership in a multiple-type slot. Returns `Some(now_on)`
    /// after the flip, `None` when the slot is absent or single-typed.
    pub(crate) fn toggle_multiple(&mut self, group_id: u64, option_id: u64) -> Option<bool> {
        match self.choices.get_mut(&group_id) {
            Some(GroupSelection::Multiple(set)) => {
                if set.remove(&option_id) {
                    Some(false)
                } else {
                    set.insert(option_id);
                    Some(true)
                }
            }
            _ => None,
        }
    }

    /// Empty the slot of `group_id`, whatever its type. Returns `false`
    /// when the slot is absent.
    pub(crate) fn clear_group(&mut self, group_id: u64) -> bool {
        match self.choices.get_mut(&group_id) {
            Some(GroupSelection::Single(choice)) => {
                *choice = None;
                true
            }
            Some(GroupSelection::Multiple(set)) => {
                set.clear();
                true
            }
            None => false,
        }
    }
}

// Slot constructors for in-crate tests that exercise keys/pricing without
// a full catalog item.
#[cfg(test)]
impl SelectionState {
    pub(crate) fn insert_single_slot(&mut self, group_id: u64) {
        self.choices.insert(group_id, GroupSelection::Single(None));
    }

    pub(crate) fn insert_multiple_slot(&mut self, group_id: u64) {
        self.choices
            .insert(group_id, GroupSelection::Multiple(BTreeSet::new()));
    }
}
