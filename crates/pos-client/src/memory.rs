//! Deterministic in-memory order counter.
//!
//! Stands in for the live endpoint in tests and `--paper` dry-runs:
//! - No randomness, no timestamps. Order ids are assigned sequentially
//!   starting at 1.
//! - Failures are scripted explicitly via [`MemoryCounter::fail_next`];
//!   nothing fails on its own.
//! - Accepted requests are retained verbatim for assertions.

use pos_menu::{OrderReceipt, OrderRequest};

use crate::{OrderApi, SubmitError};

#[derive(Debug)]
pub struct MemoryCounter {
    accepted: Vec<OrderRequest>,
    next_id: i64,
    fail_next: Option<SubmitError>,
}

impl Default for MemoryCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryCounter {
    pub fn new() -> Self {
        Self {
            accepted: Vec::new(),
            next_id: 1,
            fail_next: None,
        }
    }

    /// Script the next `submit` call to fail with `err`. One-shot: the
    /// call after that succeeds again.
    pub fn fail_next(&mut self, err: SubmitError) {
        self.fail_next = Some(err);
    }

    /// Every request accepted so far, in submission order.
    pub fn accepted(&self) -> &[OrderRequest] {
        &self.accepted
    }
}

impl OrderApi for MemoryCounter {
    fn submit(&mut self, request: &OrderRequest) -> Result<OrderReceipt, SubmitError> {
        if let Some(err) = self.fail_next.take() {
            return Err(err);
        }

        let id = self.next_id;
        self.next_id += 1;

        let grand_total: f64 = request
            .items
            .iter()
            .map(|item| item.unit_price * f64::from(item.quantity))
            .sum();

        self.accepted.push(request.clone());
        Ok(OrderReceipt {
            id,
            status: Some("pending".to_string()),
            grand_total: Some((grand_total * 100.0).round() / 100.0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pos_menu::OrderItemPayload;

    fn request(lines: &[(u64, u32, f64)]) -> OrderRequest {
        OrderRequest {
            table_code: "T01".into(),
            token: "tok".into(),
            note: None,
            items: lines
                .iter()
                .map(|&(menu_item_id, quantity, unit_price)| OrderItemPayload {
                    menu_item_id,
                    quantity,
                    note: None,
                    unit_price,
                })
                .collect(),
        }
    }

    #[test]
    fn ids_are_sequential_and_totals_computed() {
        let mut counter = MemoryCounter::new();
        let first = counter.submit(&request(&[(1, 2, 50.0)])).unwrap();
        let second = counter.submit(&request(&[(2, 1, 45.0)])).unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.grand_total, Some(100.0));
        assert_eq!(counter.accepted().len(), 2);
    }

    #[test]
    fn fail_next_is_one_shot_and_records_nothing() {
        let mut counter = MemoryCounter::new();
        counter.fail_next(SubmitError::Transport("connection refused".into()));

        let err = counter.submit(&request(&[(1, 1, 50.0)])).unwrap_err();
        assert_eq!(err, SubmitError::Transport("connection refused".into()));
        assert!(counter.accepted().is_empty());

        let receipt = counter.submit(&request(&[(1, 1, 50.0)])).unwrap();
        assert_eq!(receipt.id, 1);
    }
}
