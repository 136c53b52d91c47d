//! pos-client
//!
//! Order submission adapters and the submit orchestration.
//!
//! The order endpoint is an external collaborator: this crate only knows
//! how to hand it a payload and read back success/failure plus an opaque
//! order id. Two adapters implement the [`OrderApi`] contract:
//!
//! - [`HttpOrderClient`] — the live HTTP adapter (blocking reqwest).
//! - [`MemoryCounter`] — deterministic in-memory adapter for tests and
//!   dry-runs. No randomness; ids are assigned sequentially.
//!
//! [`submit_cart`] owns the one rule the cart cannot enforce alone: the
//! cart is cleared only after a success response, and preserved unchanged
//! on any failure so a manual retry resubmits the same order.

mod http;
mod memory;

use std::fmt;

use pos_cart::CartEngine;
use pos_menu::{OrderReceipt, OrderRequest};

pub use http::HttpOrderClient;
pub use memory::MemoryCounter;

// ---------------------------------------------------------------------------
// OrderApi contract
// ---------------------------------------------------------------------------

/// The submission contract every adapter satisfies.
pub trait OrderApi {
    /// Submit one order. `Ok` means the collaborator accepted the order
    /// and assigned it an id; any `Err` means the order does not exist
    /// server-side and the caller may retry verbatim.
    fn submit(&mut self, request: &OrderRequest) -> Result<OrderReceipt, SubmitError>;
}

/// Why a submission failed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitError {
    /// The collaborator answered with a non-success status.
    Rejected { status: u16, message: String },
    /// The request never completed (connect, timeout, malformed body).
    Transport(String),
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitError::Rejected { status, message } => {
                write!(f, "order rejected ({status}): {message}")
            }
            SubmitError::Transport(detail) => write!(f, "order submission failed: {detail}"),
        }
    }
}

impl std::error::Error for SubmitError {}

// ---------------------------------------------------------------------------
// Submit orchestration
// ---------------------------------------------------------------------------

/// Why [`submit_cart`] refused or failed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitCartError {
    /// Nothing to submit; no network call was made.
    EmptyCart,
    /// The adapter failed; the cart is preserved unchanged.
    Submit(SubmitError),
}

impl fmt::Display for SubmitCartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitCartError::EmptyCart => write!(f, "cart is empty"),
            SubmitCartError::Submit(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for SubmitCartError {}

/// Submit the cart through `api`.
///
/// - An empty cart is rejected locally; the adapter is never invoked.
/// - On success the cart is cleared (lines and order note) and the
///   receipt returned.
/// - On failure the cart is left byte-for-byte as it was, so a manual
///   retry re-submits the identical order.
pub fn submit_cart(
    cart: &mut CartEngine,
    api: &mut dyn OrderApi,
    table_code: &str,
    token: &str,
) -> Result<OrderReceipt, SubmitCartError> {
    if cart.is_empty() {
        return Err(SubmitCartError::EmptyCart);
    }

    let request = cart.submission_request(table_code, token);
    match api.submit(&request) {
        Ok(receipt) => {
            tracing::info!(order_id = receipt.id, "order accepted, clearing cart");
            cart.clear();
            Ok(receipt)
        }
        Err(err) => {
            tracing::warn!(%err, "order submission failed, cart preserved");
            Err(SubmitCartError::Submit(err))
        }
    }
}
