//! Unit pricing.
//!
//! Base price plus the chosen option of each single-type group, plus the
//! sum of chosen options of each multiple-type group, plus the special
//! delta when toggled. Catalog floats convert to satang once per term;
//! the accumulation itself is exact integer arithmetic.

use pos_menu::MenuItemConfig;

use crate::money::Satang;
use crate::selection::{GroupSelection, SelectionState};

/// Price of one unit of `item` under `selections`.
///
/// Iterates the catalog's groups (not the selection slots) so selections
/// for unknown groups never price, and group order never matters.
pub fn unit_price(item: &MenuItemConfig, selections: &SelectionState) -> Satang {
    let mut total = Satang::from_baht_f64(item.base_price);

    for group in &item.groups {
        let Some(selection) = selections.selected(group.id) else {
            continue;
        };
        match selection {
            GroupSelection::Single(Some(option_id)) => {
                if let Some(option) = group.option(*option_id) {
                    total += Satang::from_baht_f64(option.price);
                }
            }
            GroupSelection::Single(None) => {}
            GroupSelection::Multiple(set) => {
                for option_id in set {
                    if let Some(option) = group.option(*option_id) {
                        total += Satang::from_baht_f64(option.price);
                    }
                }
            }
        }
    }

    if selections.special_selected {
        if let Some(special) = &item.special {
            total += Satang::from_baht_f64(special.price_delta);
        }
    }

    total
}
