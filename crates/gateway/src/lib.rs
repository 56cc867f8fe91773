//! Remote order gateway: one authenticated session against an Odoo database,
//! date-ranged `sale.order` queries, and normalization of the results.

pub mod client;
pub mod query;
pub mod transport;

pub use client::{OdooClient, SessionId};
pub use query::{Bound, DEFAULT_FIELDS, DateInput, DateRange, OrderQuery};
pub use transport::{JsonRpcTransport, RpcTransport};
