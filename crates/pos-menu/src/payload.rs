//! Wire shapes for the order submission endpoint.
//!
//! The endpoint is an external collaborator; beyond success/failure and the
//! returned order id these shapes are not interpreted, so the receipt is
//! decoded permissively.

use serde::{Deserialize, Serialize};

/// One priced order line as submitted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderItemPayload {
    pub menu_item_id: u64,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub unit_price: f64,
}

/// The full order submission request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub table_code: String,
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub items: Vec<OrderItemPayload>,
}

/// The slice of the order response we care about.
///
/// The server returns a much larger document (billing totals, payment
/// history, status labels); unknown fields are ignored and known fields
/// default when absent.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderReceipt {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub grand_total: Option<f64>,
}
