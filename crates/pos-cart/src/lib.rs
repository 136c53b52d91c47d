//! pos-cart
//!
//! Customer self-order cart engine:
//! - Fixed-point satang money arithmetic
//! - Canonical selection keys for line-item dedup
//! - Unit pricing over option groups and the special toggle
//! - Required-group validation
//! - Customization session state machine
//! - Insertion-ordered cart with keyed quantity merge
//!
//! Pure deterministic logic. No IO, no time, no network wiring. Rendering
//! and submission live in other crates; everything here is unit-testable
//! headlessly.

mod cart;
mod keys;
mod money;
mod pricing;
mod selection;
mod session;
mod validate;

pub use cart::{CartEngine, CartLineItem};
pub use keys::build_selection_key;
pub use money::{Satang, SATANG_SCALE};
pub use pricing::unit_price;
pub use selection::{GroupSelection, SelectionState};
pub use session::{CustomizeSession, SessionError, SessionPhase};
pub use validate::{validate_selections, ValidationError};
