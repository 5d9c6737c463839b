use std::io::Cursor;

use reqwest::blocking::{Body, Client};
use tracing::trace;

use crate::client::error::{AssemblyApiError, Result};
use crate::client::transport::{RpcTransport, TransportRequest, TransportResponse};

/// Blocking HTTP transport. A new `reqwest` client is built for every call.
#[derive(Debug, Default, Clone)]
pub struct HttpClient;

impl HttpClient {
    pub fn new() -> Self {
        Self
    }

    fn build_client(request: &TransportRequest<'_>) -> Result<Client> {
        Client::builder()
            .timeout(request.read_timeout)
            .danger_accept_invalid_certs(request.all_certificates_trusted)
            .build()
            .map_err(|e| {
                AssemblyApiError::TransportError(format!("Failed to build HTTP client: {}", e))
            })
    }
}

impl RpcTransport for HttpClient {
    fn call(&self, request: &TransportRequest<'_>) -> Result<TransportResponse> {
        let client = Self::build_client(request)?;
        let payload = serde_json::to_vec(request.body)?;

        // A reader body has no known length, so reqwest sends it chunked.
        let body = if request.streaming_mode {
            Body::new(Cursor::new(payload))
        } else {
            Body::from(payload)
        };

        let mut builder = client
            .post(request.url)
            .header("content-type", "application/json")
            .body(body);
        if let Some(token) = request.token {
            builder = builder.header("authorization", token);
        }

        match builder.send() {
            Ok(res) => {
                let status = res.status().as_u16();
                trace!(status, url = request.url, "received HTTP response");
                match res.text() {
                    Ok(body) => Ok(TransportResponse { status, body }),
                    Err(e) => Err(AssemblyApiError::TransportError(format!(
                        "Failed to read response text: {}",
                        e
                    ))),
                }
            }
            Err(e) => Err(e.into()),
        }
    }
}
