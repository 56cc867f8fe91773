//! Order sources behind the HTTP routes.

use std::sync::Arc;

use salesbridge_core::SalesResult;
use salesbridge_gateway::OdooClient;
use salesbridge_sales::SaleOrder;

/// Something that can answer a date-range sales query.
///
/// Implementations block; handlers call them from a blocking worker thread.
pub trait SalesSource: Send + Sync + 'static {
    fn sales(
        &self,
        date_from: &str,
        date_to: &str,
        limit: Option<u32>,
    ) -> SalesResult<Vec<SaleOrder>>;
}

/// Builds a fresh client from the environment for every request, so a
/// request never shares a session with another.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvOdooSource;

impl SalesSource for EnvOdooSource {
    fn sales(
        &self,
        date_from: &str,
        date_to: &str,
        limit: Option<u32>,
    ) -> SalesResult<Vec<SaleOrder>> {
        OdooClient::from_env()?.get_sales_data(date_from, date_to, limit)
    }
}

pub fn env_source() -> Arc<dyn SalesSource> {
    Arc::new(EnvOdooSource)
}
