//! pos-menu
//!
//! Menu catalog schemas and order wire types:
//! - Serde data model for per-item customization config (option groups,
//!   special add-on, availability)
//! - Permissive decoding: missing prices default to 0, missing option
//!   arrays to empty (leniency policy, not a defect)
//! - Layered catalog loading (base + override documents, deep-merged)
//!   with a canonical SHA-256 catalog hash
//! - Request/response shapes for the order submission endpoint
//!
//! No engine logic lives here; pricing, key derivation and cart state are
//! in pos-cart.

mod catalog;
mod load;
mod payload;

pub use catalog::{
    MenuCatalog, MenuItemConfig, MenuOption, OptionGroup, SelectionType, SpecialOption,
};
pub use load::{load_layered, load_layered_from_strs, LoadedCatalog};
pub use payload::{OrderItemPayload, OrderReceipt, OrderRequest};
