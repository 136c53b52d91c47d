//! Canonical selection keys.
//!
//! A cart merges identical customizations into one line, so equal
//! selections must map to equal strings no matter what order the customer
//! clicked in. Fragment grammar, per group slot:
//!
//! - single: `groupId:optionId`, or `groupId:none` when unchosen
//! - multiple: `groupId:` + chosen option ids joined with `-` (ascending),
//!   or `groupId:none` when empty
//!
//! Fragments sort lexicographically and join with `|`; an item with no
//! group slots yields the literal selection part `base`. The full key is
//! `{menuItemId}::{selectionPart}`. Distinctness holds because ids are
//! numeric and the separators cannot appear inside them.

use crate::selection::{GroupSelection, SelectionState};

/// Deterministic canonical key for one customized item.
pub fn build_selection_key(menu_item_id: u64, selections: &SelectionState) -> String {
    let mut fragments: Vec<String> = selections
        .iter()
        .map(|(group_id, sel)| match sel {
            GroupSelection::Single(Some(option_id)) => format!("{group_id}:{option_id}"),
            GroupSelection::Multiple(set) if !set.is_empty() => {
                let ids: Vec<String> = set.iter().map(u64::to_string).collect();
                format!("{group_id}:{}", ids.join("-"))
            }
            _ => format!("{group_id}:none"),
        })
        .collect();
    fragments.sort();

    let part = if fragments.is_empty() {
        "base".to_string()
    } else {
        fragments.join("|")
    };
    format!("{menu_item_id}::{part}")
}
