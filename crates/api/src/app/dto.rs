use serde::Deserialize;

/// `GET /api/sales?from=YYYY-MM-DD&to=YYYY-MM-DD[&limit=N]`
#[derive(Debug, Clone, Deserialize)]
pub struct SalesQuery {
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub limit: Option<u32>,
}
