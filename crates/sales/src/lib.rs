//! Sale order normalization and channel classification.
//!
//! This crate turns raw `sale.order` attribute maps into immutable
//! [`SaleOrder`] values. It is pure: no IO, no HTTP, no session state.

pub mod channel;
pub mod order;
pub mod record;

pub use channel::{Channel, detect_channel};
pub use order::{SaleOrder, SaleOrderId, unknown_order_time};
pub use record::{RawRecord, RelationalRef};
