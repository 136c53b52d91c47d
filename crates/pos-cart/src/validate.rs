use std::fmt;

use pos_menu::OptionGroup;

use crate::selection::SelectionState;

/// A required group with nothing chosen. `group` is the display name the
/// customer sees, so the message is directly presentable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationError {
    pub group: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "missing required selection: {}", self.group)
    }
}

impl std::error::Error for ValidationError {}

/// Check every required group has a choice. Returns the first violated
/// group in catalog (display) order, or `None` when the selection can be
/// committed. Must run before an item reaches the cart.
pub fn validate_selections(
    groups: &[OptionGroup],
    selections: &SelectionState,
) -> Option<ValidationError> {
    for group in groups {
        if !group.is_required {
            continue;
        }
        let chosen = selections
            .selected(group.id)
            .map(|sel| !sel.is_empty())
            .unwrap_or(false);
        if !chosen {
            return Some(ValidationError {
                group: group.name.clone(),
            });
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pos_menu::{MenuOption, SelectionType};

    fn group(id: u64, name: &str, selection_type: SelectionType, required: bool) -> OptionGroup {
        OptionGroup {
            id,
            name: name.into(),
            selection_type,
            is_required: required,
            position: id as i32,
            options: vec![MenuOption {
                id: id * 10,
                name: "opt".into(),
                price: 0.0,
                position: 1,
            }],
        }
    }

    #[test]
    fn optional_groups_never_violate() {
        let groups = vec![group(1, "sauce", SelectionType::Multiple, false)];
        let state = SelectionState::new();
        assert_eq!(validate_selections(&groups, &state), None);
    }

    #[test]
    fn required_single_without_choice_is_reported() {
        let groups = vec![group(1, "noodle", SelectionType::Single, true)];
        let mut state = SelectionState::new();
        state.insert_single_slot(1);
        let err = validate_selections(&groups, &state).unwrap();
        assert_eq!(err.group, "noodle");
        assert_eq!(err.to_string(), "missing required selection: noodle");
    }

    #[test]
    fn required_multiple_needs_at_least_one() {
        let groups = vec![group(1, "protein", SelectionType::Multiple, true)];
        let mut state = SelectionState::new();
        state.insert_multiple_slot(1);
        assert!(validate_selections(&groups, &state).is_some());

        state.toggle_multiple(1, 10);
        assert_eq!(validate_selections(&groups, &state), None);
    }

    #[test]
    fn first_violation_in_catalog_order_wins() {
        let groups = vec![
            group(2, "size", SelectionType::Single, true),
            group(1, "noodle", SelectionType::Single, true),
        ];
        let mut state = SelectionState::new();
        state.insert_single_slot(1);
        state.insert_single_slot(2);
        // Slice order is catalog order; group 2 comes first here.
        let err = validate_selections(&groups, &state).unwrap();
        assert_eq!(err.group, "size");
    }

    #[test]
    fn missing_slot_counts_as_unchosen() {
        let groups = vec![group(1, "noodle", SelectionType::Single, true)];
        let state = SelectionState::new();
        assert!(validate_selections(&groups, &state).is_some());
    }
}
