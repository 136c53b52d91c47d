//! The cart: insertion-ordered priced lines, merged by canonical key.
//!
//! Exactly one cart is alive per browsing session; all mutations are
//! synchronous. The cart stays mutable through an in-flight submission —
//! clearing happens only after the caller has a success response (see
//! pos-client's submit orchestration).

use pos_menu::{OrderItemPayload, OrderRequest};

use crate::money::Satang;
use crate::selection::SelectionState;

/// One priced, deduplicated order line.
///
/// Invariant (held by [`CartEngine`]): at most one line exists per
/// distinct `key`; re-adding the same key merges quantities instead.
#[derive(Clone, Debug, PartialEq)]
pub struct CartLineItem {
    pub key: String,
    pub menu_item_id: u64,
    pub name: String,
    pub unit_price: Satang,
    pub quantity: u32,
    pub note: Option<String>,
    pub selections: SelectionState,
}

impl CartLineItem {
    /// `unit_price × quantity`, clamped at the i64 extremes. Exact for any
    /// realistic order.
    pub fn extended_price(&self) -> Satang {
        self.unit_price.saturating_mul_qty(self.quantity)
    }
}

/// Owned cart state with a defined API — no ambient module state, so unit
/// tests (and any future concurrent sessions) construct their own.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CartEngine {
    lines: Vec<CartLineItem>,
    order_note: String,
}

impl CartEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLineItem] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn get(&self, key: &str) -> Option<&CartLineItem> {
        self.lines.iter().find(|l| l.key == key)
    }

    /// Merge `line` into the cart: an existing entry with the same key
    /// absorbs the quantity (its position is preserved); otherwise the
    /// line appends.
    pub fn upsert_line(&mut self, line: CartLineItem) {
        debug_assert!(line.quantity > 0, "line quantity must be positive");
        if let Some(existing) = self.lines.iter_mut().find(|l| l.key == line.key) {
            existing.quantity = existing.quantity.saturating_add(line.quantity);
        } else {
            self.lines.push(line);
        }
    }

    /// Add `delta` to the entry's quantity. A result ≤ 0 removes the
    /// entry entirely; an absent key is a no-op.
    pub fn adjust_quantity(&mut self, key: &str, delta: i64) {
        let Some(idx) = self.lines.iter().position(|l| l.key == key) else {
            return;
        };
        let new_qty = i64::from(self.lines[idx].quantity) + delta;
        if new_qty <= 0 {
            self.lines.remove(idx);
        } else {
            // new_qty > 0 and bounded by u32::MAX + delta; clamp for safety.
            self.lines[idx].quantity = u32::try_from(new_qty).unwrap_or(u32::MAX);
        }
    }

    /// Σ `unit_price × quantity`. Integer satang arithmetic throughout, so
    /// the displayed total carries no accumulated rounding error.
    pub fn total(&self) -> Satang {
        self.lines
            .iter()
            .fold(Satang::ZERO, |acc, l| acc.saturating_add(l.extended_price()))
    }

    pub fn order_note(&self) -> &str {
        &self.order_note
    }

    pub fn set_order_note(&mut self, note: impl Into<String>) {
        self.order_note = note.into();
    }

    /// Empty the cart and reset the order note. Called after a successful
    /// submission; never during one.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.order_note.clear();
    }

    /// Build the submission payload: lines in insertion order, prices as
    /// 2-decimal baht floats, empty order note elided.
    pub fn submission_request(
        &self,
        table_code: impl Into<String>,
        token: impl Into<String>,
    ) -> OrderRequest {
        OrderRequest {
            table_code: table_code.into(),
            token: token.into(),
            note: if self.order_note.is_empty() {
                None
            } else {
                Some(self.order_note.clone())
            },
            items: self
                .lines
                .iter()
                .map(|l| OrderItemPayload {
                    menu_item_id: l.menu_item_id,
                    quantity: l.quantity,
                    note: l.note.clone(),
                    unit_price: l.unit_price.to_baht_f64(),
                })
                .collect(),
        }
    }
}
