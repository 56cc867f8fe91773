use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use reqwest::StatusCode;
use salesbridge_api::app::services::SalesSource;
use salesbridge_core::{SalesError, SalesResult};
use salesbridge_sales::{Channel, SaleOrder, SaleOrderId};
use serde_json::json;

/// In-memory source that records the queries it was asked.
struct StubSource {
    reply: SalesResult<Vec<SaleOrder>>,
    seen: Mutex<Vec<(String, String, Option<u32>)>>,
}

impl StubSource {
    fn new(reply: SalesResult<Vec<SaleOrder>>) -> Arc<Self> {
        Arc::new(Self {
            reply,
            seen: Mutex::new(Vec::new()),
        })
    }
}

impl SalesSource for StubSource {
    fn sales(
        &self,
        date_from: &str,
        date_to: &str,
        limit: Option<u32>,
    ) -> SalesResult<Vec<SaleOrder>> {
        self.seen
            .lock()
            .unwrap()
            .push((date_from.to_string(), date_to.to_string(), limit));
        self.reply.clone()
    }
}

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(source: Arc<dyn SalesSource>) -> Self {
        // Same router as prod, bound to an ephemeral port.
        let app = salesbridge_api::app::build_app(source);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn sample_order() -> SaleOrder {
    SaleOrder {
        id: SaleOrderId(77),
        reference: "S00077".to_string(),
        ordered_at: NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap(),
        total_amount: 349.0,
        party_name: Some("Acme Co".to_string()),
        currency_name: Some("THB".to_string()),
        channel: Channel::Lazada,
    }
}

#[tokio::test]
async fn health_is_public() {
    let srv = TestServer::spawn(StubSource::new(Ok(vec![]))).await;

    let res = reqwest::get(format!("{}/health", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn sales_endpoint_returns_flat_orders() {
    let source = StubSource::new(Ok(vec![sample_order()]));
    let srv = TestServer::spawn(source.clone()).await;

    let res = reqwest::get(format!(
        "{}/api/sales?from=2024-01-01&to=2024-01-31&limit=5",
        srv.base_url
    ))
    .await
    .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(
        body,
        json!([{
            "id": 77,
            "name": "S00077",
            "date_order": "2024-01-01 10:30:00",
            "amount_total": 349.0,
            "partner_name": "Acme Co",
            "currency_name": "THB",
            "channel": "Lazada",
        }])
    );

    let seen = source.seen.lock().unwrap().clone();
    assert_eq!(
        seen,
        vec![("2024-01-01".to_string(), "2024-01-31".to_string(), Some(5))]
    );
}

#[tokio::test]
async fn validation_error_maps_to_bad_request() {
    let source = StubSource::new(Err(SalesError::validation(
        "Dates must be in ISO format: YYYY-MM-DD",
    )));
    let srv = TestServer::spawn(source).await;

    let res = reqwest::get(format!("{}/api/sales?from=01-01-2024&to=2024-01-31", srv.base_url))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["message"], "Dates must be in ISO format: YYYY-MM-DD");
}

#[tokio::test]
async fn upstream_failures_map_to_bad_gateway() {
    for err in [
        SalesError::authentication("Authentication failed"),
        SalesError::remote("connection refused"),
        SalesError::configuration("Missing required environment variable: ODOO_URL"),
    ] {
        let srv = TestServer::spawn(StubSource::new(Err(err.clone()))).await;

        let res = reqwest::get(format!("{}/api/sales?from=2024-01-01&to=2024-01-31", srv.base_url))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_GATEWAY);

        let body: serde_json::Value = res.json().await.unwrap();
        assert_eq!(body["message"], err.message());
    }
}

#[tokio::test]
async fn missing_range_parameters_are_rejected() {
    let source = StubSource::new(Ok(vec![]));
    let srv = TestServer::spawn(source.clone()).await;

    let res = reqwest::get(format!("{}/api/sales?from=2024-01-01", srv.base_url))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(source.seen.lock().unwrap().is_empty());
}
