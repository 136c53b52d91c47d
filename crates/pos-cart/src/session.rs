//! Customization session state machine.
//!
//! # Design
//!
//! One session tracks one item being customized, from dialog open to
//! either commit or cancel:
//!
//! ```text
//!   open()        confirm() ok
//!   ──────► Open ─────────────► Committed (terminal)
//!             │  ▲
//!             │  └── confirm() validation failure (stays Open)
//!             │
//!             └── cancel() ───► Cancelled (terminal)
//! ```
//!
//! Invariants enforced by [`CustomizeSession`]:
//!
//! 1. Mutations are legal only while `Open`; anything else returns
//!    [`SessionError::NotOpen`] and changes nothing.
//! 2. Required single-selection groups auto-select their first option at
//!    open time, once. The default participates in pricing and key
//!    derivation exactly like a customer choice and is never recomputed
//!    after user edits.
//! 3. A failed confirm reports the violated group and keeps the session
//!    `Open` with all state intact.

use std::fmt;

use pos_menu::{MenuItemConfig, SelectionType};

use crate::cart::CartLineItem;
use crate::keys::build_selection_key;
use crate::money::Satang;
use crate::pricing::unit_price;
use crate::selection::{GroupSelection, SelectionState};
use crate::validate::{validate_selections, ValidationError};

// ---------------------------------------------------------------------------
// SessionPhase
// ---------------------------------------------------------------------------

/// Lifecycle phase of a customization session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SessionPhase {
    /// Dialog open; selection state is mutable.
    Open,
    /// Confirmed and merged into the cart. **Terminal.**
    Committed,
    /// Discarded without cart mutation. **Terminal.**
    Cancelled,
}

impl SessionPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Committed | Self::Cancelled)
    }
}

// ---------------------------------------------------------------------------
// SessionError
// ---------------------------------------------------------------------------

/// Why a session operation was refused. All variants are locally
/// recoverable and user-facing; none mutate session state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionError {
    /// The catalog marks this item unavailable.
    ItemUnavailable { menu_item_id: u64 },
    /// A mutation or confirm arrived after the session left `Open`.
    NotOpen { phase: SessionPhase },
    /// The item has no group with this id.
    UnknownGroup { group_id: u64 },
    /// The group has no option with this id.
    UnknownOption { group_id: u64, option_id: u64 },
    /// A single-select operation hit a multiple-type group, or vice versa.
    SelectionTypeMismatch { group_id: u64 },
    /// The item offers no special add-on.
    SpecialNotOffered { menu_item_id: u64 },
    /// A required group has nothing chosen; the session stays `Open`.
    MissingRequired(ValidationError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::ItemUnavailable { menu_item_id } => {
                write!(f, "menu item {menu_item_id} is not available")
            }
            SessionError::NotOpen { phase } => {
                write!(f, "customization session is not open (phase: {phase:?})")
            }
            SessionError::UnknownGroup { group_id } => {
                write!(f, "unknown option group: {group_id}")
            }
            SessionError::UnknownOption {
                group_id,
                option_id,
            } => write!(f, "unknown option {option_id} in group {group_id}"),
            SessionError::SelectionTypeMismatch { group_id } => {
                write!(f, "selection type mismatch for group {group_id}")
            }
            SessionError::SpecialNotOffered { menu_item_id } => {
                write!(f, "menu item {menu_item_id} has no special add-on")
            }
            SessionError::MissingRequired(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for SessionError {}

// ---------------------------------------------------------------------------
// CustomizeSession
// ---------------------------------------------------------------------------

/// One in-progress customization of one menu item.
///
/// The session owns a snapshot of the item config; catalog edits during an
/// open dialog do not leak into it.
#[derive(Clone, Debug)]
pub struct CustomizeSession {
    item: MenuItemConfig,
    selections: SelectionState,
    phase: SessionPhase,
}

impl CustomizeSession {
    /// Open a session for `item`, applying required-group defaults.
    ///
    /// # Errors
    /// [`SessionError::ItemUnavailable`] when the catalog flags the item
    /// off-menu.
    pub fn open(item: &MenuItemConfig) -> Result<Self, SessionError> {
        if !item.is_available {
            return Err(SessionError::ItemUnavailable {
                menu_item_id: item.id,
            });
        }

        let mut selections = SelectionState::for_item(item);
        // Auto-defaults, applied exactly once. Fixed at open time so later
        // edits are never silently overwritten by a re-render.
        for group in &item.groups {
            if group.is_required && group.selection_type == SelectionType::Single {
                if let Some(first) = group.first_option() {
                    selections.set_single(group.id, Some(first.id));
                }
            }
        }

        Ok(Self {
            item: item.clone(),
            selections,
            phase: SessionPhase::Open,
        })
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn item(&self) -> &MenuItemConfig {
        &self.item
    }

    pub fn selections(&self) -> &SelectionState {
        &self.selections
    }

    fn ensure_open(&self) -> Result<(), SessionError> {
        if self.phase == SessionPhase::Open {
            Ok(())
        } else {
            Err(SessionError::NotOpen { phase: self.phase })
        }
    }

    fn group_and_option_checked(
        &self,
        group_id: u64,
        option_id: u64,
    ) -> Result<SelectionType, SessionError> {
        let group = self
            .item
            .group(group_id)
            .ok_or(SessionError::UnknownGroup { group_id })?;
        if group.option(option_id).is_none() {
            return Err(SessionError::UnknownOption {
                group_id,
                option_id,
            });
        }
        Ok(group.selection_type)
    }

    /// Choose `option_id` in a single-type group, replacing any prior
    /// choice.
    pub fn choose(&mut self, group_id: u64, option_id: u64) -> Result<(), SessionError> {
        self.ensure_open()?;
        match self.group_and_option_checked(group_id, option_id)? {
            SelectionType::Single => {
                self.selections.set_single(group_id, Some(option_id));
                Ok(())
            }
            SelectionType::Multiple => Err(SessionError::SelectionTypeMismatch { group_id }),
        }
    }

    /// Toggle `option_id` in a multiple-type group. Returns whether the
    /// option is selected after the flip.
    pub fn toggle(&mut self, group_id: u64, option_id: u64) -> Result<bool, SessionError> {
        self.ensure_open()?;
        match self.group_and_option_checked(group_id, option_id)? {
            SelectionType::Multiple => Ok(self
                .selections
                .toggle_multiple(group_id, option_id)
                .unwrap_or(false)),
            SelectionType::Single => Err(SessionError::SelectionTypeMismatch { group_id }),
        }
    }

    /// Empty the selection of `group_id`. A required group emptied here
    /// will fail validation at confirm time.
    pub fn clear_group(&mut self, group_id: u64) -> Result<(), SessionError> {
        self.ensure_open()?;
        if !self.selections.clear_group(group_id) {
            return Err(SessionError::UnknownGroup { group_id });
        }
        Ok(())
    }

    /// Set the line quantity. Clamped to at least 1; removing a line is a
    /// cart operation, not a session one.
    pub fn set_quantity(&mut self, quantity: u32) -> Result<(), SessionError> {
        self.ensure_open()?;
        self.selections.quantity = quantity.max(1);
        Ok(())
    }

    pub fn increment_quantity(&mut self) -> Result<(), SessionError> {
        self.ensure_open()?;
        self.selections.quantity = self.selections.quantity.saturating_add(1);
        Ok(())
    }

    /// Decrement, stopping at 1.
    pub fn decrement_quantity(&mut self) -> Result<(), SessionError> {
        self.ensure_open()?;
        if self.selections.quantity > 1 {
            self.selections.quantity -= 1;
        }
        Ok(())
    }

    /// Toggle the special add-on.
    pub fn set_special(&mut self, on: bool) -> Result<(), SessionError> {
        self.ensure_open()?;
        if self.item.special.is_none() {
            return Err(SessionError::SpecialNotOffered {
                menu_item_id: self.item.id,
            });
        }
        self.selections.special_selected = on;
        Ok(())
    }

    /// Current per-unit price under the session's selections.
    pub fn unit_price(&self) -> Satang {
        unit_price(&self.item, &self.selections)
    }

    /// Canonical key the committed line will carry.
    pub fn selection_key(&self) -> String {
        build_selection_key(self.item.id, &self.selections)
    }

    /// Human-readable line note: `Group: Option` fragments in catalog
    /// order (multiple choices comma-joined), then the special label,
    /// joined with `" | "`. The kitchen display parses this shape.
    pub fn line_note(&self) -> Option<String> {
        let mut parts: Vec<String> = Vec::new();

        for group in &self.item.groups {
            let Some(selection) = self.selections.selected(group.id) else {
                continue;
            };
            match selection {
                GroupSelection::Single(Some(option_id)) => {
                    if let Some(option) = group.option(*option_id) {
                        parts.push(format!("{}: {}", group.name, option.name));
                    }
                }
                GroupSelection::Single(None) => {}
                GroupSelection::Multiple(set) => {
                    if set.is_empty() {
                        continue;
                    }
                    // Option display order, not id order.
                    let names: Vec<&str> = group
                        .options
                        .iter()
                        .filter(|o| set.contains(&o.id))
                        .map(|o| o.name.as_str())
                        .collect();
                    if !names.is_empty() {
                        parts.push(format!("{}: {}", group.name, names.join(", ")));
                    }
                }
            }
        }

        if self.selections.special_selected {
            if let Some(special) = &self.item.special {
                parts.push(special.label.clone());
            }
        }

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" | "))
        }
    }

    /// Validate and commit. On success the session becomes `Committed`
    /// and the priced line item is returned for the cart to merge. On a
    /// validation failure the session stays `Open`, untouched.
    pub fn confirm(&mut self) -> Result<CartLineItem, SessionError> {
        self.ensure_open()?;
        if let Some(err) = validate_selections(&self.item.groups, &self.selections) {
            return Err(SessionError::MissingRequired(err));
        }

        let line = CartLineItem {
            key: self.selection_key(),
            menu_item_id: self.item.id,
            name: self.item.name.clone(),
            unit_price: self.unit_price(),
            quantity: self.selections.quantity,
            note: self.line_note(),
            selections: self.selections.clone(),
        };
        self.phase = SessionPhase::Committed;
        Ok(line)
    }

    /// Discard the session. No cart mutation has happened or will happen.
    pub fn cancel(&mut self) -> Result<(), SessionError> {
        self.ensure_open()?;
        self.phase = SessionPhase::Cancelled;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pos_menu::{MenuOption, OptionGroup, SpecialOption};

    fn noodle_item() -> MenuItemConfig {
        MenuItemConfig {
            id: 2,
            name: "dry noodles".into(),
            base_price: 40.0,
            is_available: true,
            groups: vec![
                OptionGroup {
                    id: 10,
                    name: "noodle".into(),
                    selection_type: SelectionType::Single,
                    is_required: true,
                    position: 1,
                    options: vec![
                        MenuOption {
                            id: 100,
                            name: "egg".into(),
                            price: 5.0,
                            position: 1,
                        },
                        MenuOption {
                            id: 101,
                            name: "rice".into(),
                            price: 0.0,
                            position: 2,
                        },
                    ],
                },
                OptionGroup {
                    id: 20,
                    name: "extras".into(),
                    selection_type: SelectionType::Multiple,
                    is_required: false,
                    position: 2,
                    options: vec![
                        MenuOption {
                            id: 201,
                            name: "meatball".into(),
                            price: 10.0,
                            position: 1,
                        },
                        MenuOption {
                            id: 202,
                            name: "wonton".into(),
                            price: 10.0,
                            position: 2,
                        },
                    ],
                },
            ],
            special: Some(SpecialOption {
                label: "special".into(),
                price_delta: 10.0,
            }),
        }
    }

    #[test]
    fn open_applies_first_option_default_to_required_single_groups() {
        let session = CustomizeSession::open(&noodle_item()).unwrap();
        assert_eq!(session.phase(), SessionPhase::Open);
        assert!(session.selections().selected(10).unwrap().contains(100));
        // The default prices like a real choice: 40 + 5.
        assert_eq!(session.unit_price(), Satang::new(4500));
        // And keys like one.
        assert_eq!(session.selection_key(), "2::10:100|20:none");
    }

    #[test]
    fn optional_multiple_groups_start_empty() {
        let session = CustomizeSession::open(&noodle_item()).unwrap();
        assert!(session.selections().selected(20).unwrap().is_empty());
    }

    #[test]
    fn unavailable_item_refuses_to_open() {
        let mut item = noodle_item();
        item.is_available = false;
        let err = CustomizeSession::open(&item).unwrap_err();
        assert_eq!(err, SessionError::ItemUnavailable { menu_item_id: 2 });
    }

    #[test]
    fn choose_replaces_prior_single_choice() {
        let mut session = CustomizeSession::open(&noodle_item()).unwrap();
        session.choose(10, 101).unwrap();
        assert!(session.selections().selected(10).unwrap().contains(101));
        assert_eq!(session.unit_price(), Satang::new(4000));
    }

    #[test]
    fn type_mismatch_and_unknown_ids_are_rejected() {
        let mut session = CustomizeSession::open(&noodle_item()).unwrap();
        assert_eq!(
            session.choose(20, 201).unwrap_err(),
            SessionError::SelectionTypeMismatch { group_id: 20 }
        );
        assert_eq!(
            session.toggle(10, 100).unwrap_err(),
            SessionError::SelectionTypeMismatch { group_id: 10 }
        );
        assert_eq!(
            session.choose(99, 1).unwrap_err(),
            SessionError::UnknownGroup { group_id: 99 }
        );
        assert_eq!(
            session.toggle(20, 999).unwrap_err(),
            SessionError::UnknownOption {
                group_id: 20,
                option_id: 999
            }
        );
    }

    #[test]
    fn quantity_never_drops_below_one() {
        let mut session = CustomizeSession::open(&noodle_item()).unwrap();
        session.decrement_quantity().unwrap();
        assert_eq!(session.selections().quantity, 1);
        session.set_quantity(0).unwrap();
        assert_eq!(session.selections().quantity, 1);
        session.increment_quantity().unwrap();
        assert_eq!(session.selections().quantity, 2);
    }

    #[test]
    fn special_toggle_requires_the_offer() {
        let mut session = CustomizeSession::open(&noodle_item()).unwrap();
        session.set_special(true).unwrap();
        assert_eq!(session.unit_price(), Satang::new(5500));

        let mut plain = noodle_item();
        plain.special = None;
        let mut session = CustomizeSession::open(&plain).unwrap();
        assert_eq!(
            session.set_special(true).unwrap_err(),
            SessionError::SpecialNotOffered { menu_item_id: 2 }
        );
    }

    #[test]
    fn failed_confirm_keeps_session_open_and_state_intact() {
        let mut session = CustomizeSession::open(&noodle_item()).unwrap();
        session.toggle(20, 201).unwrap();
        session.clear_group(10).unwrap();

        let err = session.confirm().unwrap_err();
        assert_eq!(
            err,
            SessionError::MissingRequired(ValidationError {
                group: "noodle".into()
            })
        );
        assert_eq!(session.phase(), SessionPhase::Open);
        assert!(session.selections().selected(20).unwrap().contains(201));

        // Fix the violation; the session is still usable.
        session.choose(10, 100).unwrap();
        let line = session.confirm().unwrap();
        assert_eq!(session.phase(), SessionPhase::Committed);
        assert_eq!(line.unit_price, Satang::new(5500));
    }

    #[test]
    fn committed_and_cancelled_sessions_refuse_mutation() {
        let mut session = CustomizeSession::open(&noodle_item()).unwrap();
        session.confirm().unwrap();
        assert_eq!(
            session.choose(10, 101).unwrap_err(),
            SessionError::NotOpen {
                phase: SessionPhase::Committed
            }
        );
        assert!(session.confirm().is_err());

        let mut session = CustomizeSession::open(&noodle_item()).unwrap();
        session.cancel().unwrap();
        assert_eq!(session.phase(), SessionPhase::Cancelled);
        assert_eq!(
            session.set_quantity(3).unwrap_err(),
            SessionError::NotOpen {
                phase: SessionPhase::Cancelled
            }
        );
    }

    #[test]
    fn line_note_follows_catalog_order() {
        let mut session = CustomizeSession::open(&noodle_item()).unwrap();
        session.toggle(20, 202).unwrap();
        session.toggle(20, 201).unwrap();
        session.set_special(true).unwrap();
        assert_eq!(
            session.line_note().unwrap(),
            "noodle: egg | extras: meatball, wonton | special"
        );
    }

    #[test]
    fn plain_item_has_no_line_note() {
        let item = MenuItemConfig {
            id: 1,
            name: "noodle soup".into(),
            base_price: 50.0,
            is_available: true,
            groups: vec![],
            special: None,
        };
        let session = CustomizeSession::open(&item).unwrap();
        assert_eq!(session.line_note(), None);
        assert_eq!(session.selection_key(), "1::base");
    }
}
