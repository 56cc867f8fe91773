//! Procedure-call transport to the remote service.
//!
//! The gateway only needs "call `method` on `service` with positional `args`".
//! [`JsonRpcTransport`] speaks Odoo's `/jsonrpc` endpoint; tests substitute
//! an in-memory implementation.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use salesbridge_core::{OdooConfig, SalesError, SalesResult};

/// One blocking remote procedure call per invocation.
pub trait RpcTransport {
    fn call(&self, service: &str, method: &str, args: Vec<Value>) -> SalesResult<Value>;
}

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    method: &'static str,
    params: RpcParams<'a>,
    id: u64,
}

#[derive(Debug, Serialize)]
struct RpcParams<'a> {
    service: &'a str,
    method: &'a str,
    args: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    /// `None` only when the key is absent; an explicit `null` is `Some(Null)`.
    #[serde(default, deserialize_with = "present_value")]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcFault>,
}

#[derive(Debug, Deserialize)]
struct RpcFault {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
    #[serde(default)]
    data: Option<RpcFaultData>,
}

#[derive(Debug, Deserialize)]
struct RpcFaultData {
    #[serde(default)]
    name: String,
    #[serde(default)]
    message: String,
}

fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl RpcResponse {
    fn into_result(self, service: &str, method: &str) -> SalesResult<Value> {
        match (self.error, self.result) {
            (Some(fault), _) => Err(fault.into_error()),
            (None, Some(result)) => Ok(result),
            (None, None) => Err(SalesError::remote(format!(
                "{service}.{method} returned neither a result nor an error"
            ))),
        }
    }
}

impl RpcFault {
    fn into_error(self) -> SalesError {
        let (name, detail) = match self.data {
            Some(data) if !data.message.is_empty() => (data.name, data.message),
            Some(data) => (data.name, self.message),
            None => (String::new(), self.message),
        };

        if name.ends_with("AccessDenied") {
            return SalesError::authentication(detail);
        }
        if name.is_empty() {
            SalesError::remote(format!("fault {}: {detail}", self.code))
        } else {
            SalesError::remote(format!("{name}: {detail}"))
        }
    }
}

/// JSON-RPC 2.0 over HTTP, using a blocking client.
#[derive(Debug)]
pub struct JsonRpcTransport {
    http: Client,
    endpoint: String,
    next_id: AtomicU64,
}

impl JsonRpcTransport {
    pub fn new(base_url: &str, timeout: Duration) -> SalesResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SalesError::remote(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            endpoint: format!("{}/jsonrpc", base_url.trim_end_matches('/')),
            next_id: AtomicU64::new(1),
        })
    }

    pub fn from_config(config: &OdooConfig) -> SalesResult<Self> {
        Self::new(&config.url, config.timeout)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl RpcTransport for JsonRpcTransport {
    fn call(&self, service: &str, method: &str, args: Vec<Value>) -> SalesResult<Value> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            method: "call",
            params: RpcParams {
                service,
                method,
                args,
            },
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
        };

        tracing::debug!(
            endpoint = %self.endpoint,
            service,
            method,
            id = request.id,
            "rpc call"
        );

        let response = self
            .http
            .post(&self.endpoint)
            .json(&request)
            .send()
            .map_err(|e| SalesError::remote(format!("{service}.{method} request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SalesError::remote(format!(
                "{service}.{method} returned HTTP {status}"
            )));
        }

        let body: RpcResponse = response.json().map_err(|e| {
            SalesError::remote(format!("{service}.{method} returned a malformed response: {e}"))
        })?;

        body.into_result(service, method)
    }
}
