use std::cell::OnceCell;

use serde_json::{Value, json};
use tracing::instrument;

use salesbridge_core::{OdooConfig, SalesError, SalesResult};
use salesbridge_sales::record::is_truthy;
use salesbridge_sales::{RawRecord, SaleOrder};

use crate::query::{DEFAULT_FIELDS, DateInput, DateRange, OrderQuery, SALE_ORDER_MODEL};
use crate::transport::{JsonRpcTransport, RpcTransport};

/// Remote user id returned by a successful `authenticate`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(i64);

impl SessionId {
    pub fn get(self) -> i64 {
        self.0
    }
}

/// Client for one Odoo database.
///
/// The session is authenticated lazily and kept for the lifetime of the
/// instance. The client is not `Sync`; share it across threads only behind
/// external synchronization, or give each thread its own instance.
#[derive(Debug)]
pub struct OdooClient<T = JsonRpcTransport> {
    config: OdooConfig,
    transport: T,
    session: OnceCell<SessionId>,
}

impl OdooClient<JsonRpcTransport> {
    pub fn new(config: OdooConfig) -> SalesResult<Self> {
        let transport = JsonRpcTransport::from_config(&config)?;
        Ok(Self::with_transport(config, transport))
    }

    pub fn from_env() -> SalesResult<Self> {
        Self::new(OdooConfig::from_env()?)
    }
}

impl<T: RpcTransport> OdooClient<T> {
    pub fn with_transport(config: OdooConfig, transport: T) -> Self {
        Self {
            config,
            transport,
            session: OnceCell::new(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The cached session, if `authenticate` has already succeeded.
    pub fn session(&self) -> Option<SessionId> {
        self.session.get().copied()
    }

    /// Authenticate once; later calls return the cached session without IO.
    #[instrument(skip(self), fields(db = %self.config.db, username = %self.config.username))]
    pub fn authenticate(&self) -> SalesResult<SessionId> {
        if let Some(session) = self.session.get() {
            tracing::debug!(uid = session.0, "reusing cached session");
            return Ok(*session);
        }

        if let Some(key) = self.config.missing_credential() {
            return Err(SalesError::authentication(format!(
                "credential {key} was not provided"
            )));
        }

        let reply = self.transport.call(
            "common",
            "authenticate",
            vec![
                json!(self.config.db),
                json!(self.config.username),
                json!(self.config.api_key),
                json!({}),
            ],
        )?;

        if !is_truthy(Some(&reply)) {
            tracing::warn!("authentication rejected");
            return Err(SalesError::authentication(
                "Authentication failed; check ODOO_DB/ODOO_USERNAME/ODOO_API_KEY",
            ));
        }

        let session = reply.as_i64().map(SessionId).ok_or_else(|| {
            SalesError::remote(format!("authenticate returned a non-integer uid: {reply}"))
        })?;

        tracing::info!(uid = session.0, "authenticated");
        Ok(*self.session.get_or_init(|| session))
    }

    /// Raw `search_read` records in ascending `date_order` order.
    ///
    /// Dates are validated before any remote call is made.
    #[instrument(skip_all, fields(limit = ?limit))]
    pub fn fetch_orders(
        &self,
        date_from: impl Into<DateInput>,
        date_to: impl Into<DateInput>,
        fields: &[&str],
        limit: Option<u32>,
    ) -> SalesResult<Vec<RawRecord>> {
        let range = DateRange::new(date_from, date_to)?;
        let query = OrderQuery::new(range, fields, limit);
        self.execute(&query)
    }

    /// Normalized orders for a date range, using [`DEFAULT_FIELDS`].
    pub fn get_sales_data(
        &self,
        date_from: impl Into<DateInput>,
        date_to: impl Into<DateInput>,
        limit: Option<u32>,
    ) -> SalesResult<Vec<SaleOrder>> {
        self.get_sales_data_with_fields(date_from, date_to, DEFAULT_FIELDS, limit)
    }

    pub fn get_sales_data_with_fields(
        &self,
        date_from: impl Into<DateInput>,
        date_to: impl Into<DateInput>,
        fields: &[&str],
        limit: Option<u32>,
    ) -> SalesResult<Vec<SaleOrder>> {
        self.fetch_orders(date_from, date_to, fields, limit)?
            .iter()
            .map(SaleOrder::from_record)
            .collect()
    }

    fn execute(&self, query: &OrderQuery) -> SalesResult<Vec<RawRecord>> {
        let session = self.authenticate()?;

        tracing::debug!(
            from = %query.lower_bound(),
            to = %query.upper_bound(),
            "searching sale orders"
        );

        let reply = self.transport.call(
            "object",
            "execute_kw",
            vec![
                json!(self.config.db),
                json!(session.0),
                json!(self.config.api_key),
                json!(SALE_ORDER_MODEL),
                json!("search_read"),
                json!([query.domain()]),
                query.options(),
            ],
        )?;

        let records = match reply {
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::Object(record) => Ok(record),
                    other => Err(SalesError::remote(format!(
                        "search_read returned a non-object record: {other}"
                    ))),
                })
                .collect::<SalesResult<Vec<_>>>()?,
            other => {
                return Err(SalesError::remote(format!(
                    "search_read returned {other} instead of a list"
                )));
            }
        };

        tracing::info!(count = records.len(), "fetched sale orders");
        Ok(records)
    }
}
