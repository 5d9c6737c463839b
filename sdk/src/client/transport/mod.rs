use serde_json::Value;
use std::time::Duration;

use crate::client::error::Result;

pub mod http;

pub use http::HttpClient;

/// Everything a transport needs for one POST. Built fresh for every call so
/// that client reconfiguration applies to the next request.
#[derive(Debug, Clone)]
pub struct TransportRequest<'a> {
    pub url: &'a str,
    pub body: &'a Value,
    pub token: Option<&'a str>,
    pub read_timeout: Option<Duration>,
    pub all_certificates_trusted: bool,
    pub streaming_mode: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

pub trait RpcTransport: Send + Sync {
    /// Posts the JSON-RPC request and returns the raw HTTP status and body.
    /// Non-2xx statuses are not errors at this layer: JSON-RPC servers report
    /// failures with an error envelope on a 500 response.
    fn call(&self, request: &TransportRequest<'_>) -> Result<TransportResponse>;
}
