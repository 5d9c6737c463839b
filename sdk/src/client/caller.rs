use rand_core::{OsRng, RngCore};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{from_str, json, Map, Value};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::client::config::{parse_url, Config};
use crate::client::error::{AssemblyApiError, Result};
use crate::client::transport::{RpcTransport, TransportRequest, TransportResponse};

/// JSON-RPC protocol version sent with every request.
pub const JSONRPC_VERSION: &str = "1.1";

/// Optional per-call metadata, sent as the request's `context` member.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RpcContext {
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub provenance: Vec<Value>,
    #[serde(flatten)]
    pub additional_properties: Map<String, Value>,
}

impl RpcContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_provenance(mut self, action: Value) -> Self {
        self.provenance.push(action);
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: Value) -> Self {
        self.additional_properties.insert(key.into(), value);
        self
    }
}

/// Generic caller shared by every typed client method: builds the request
/// envelope, enforces the auth policy and unwraps the single-element result.
#[derive(Clone)]
pub struct JsonClientCaller {
    pub(crate) config: Config,
    pub(crate) token: Option<String>,
    transport: Arc<dyn RpcTransport>,
}

impl JsonClientCaller {
    pub fn new(config: Config, token: Option<String>, transport: Arc<dyn RpcTransport>) -> Self {
        Self {
            config,
            token,
            transport,
        }
    }

    /// Calls `method` with positional `args` and decodes the first element
    /// of the `result` array as `R`.
    pub fn jsonrpc_call<R: DeserializeOwned>(
        &self,
        method: &str,
        args: Vec<Value>,
        auth_required: bool,
        context: Option<&RpcContext>,
    ) -> Result<R> {
        let token = self.token_for_call(method, auth_required)?;
        let request_id = next_request_id();
        let body = self.build_request(method, args, &request_id, context)?;

        debug!(method, id = %request_id, authenticated = token.is_some(), "sending RPC request");
        let response = self.transport.call(&TransportRequest {
            url: &self.config.url,
            body: &body,
            token,
            read_timeout: self.config.read_timeout(),
            all_certificates_trusted: self.config.all_certificates_trusted,
            streaming_mode: self.config.streaming_mode,
        })?;

        match process_result(method, response) {
            Ok(value) => serde_json::from_value(value).map_err(|e| {
                AssemblyApiError::protocol(format!(
                    "Failed to deserialize {} response: {}",
                    method, e
                ))
            }),
            Err(e) => {
                debug!(method, id = %request_id, error = %e, "RPC request failed");
                Err(e)
            }
        }
    }

    fn token_for_call(&self, method: &str, auth_required: bool) -> Result<Option<&str>> {
        let token = match self.token.as_deref() {
            Some(token) => token,
            None if auth_required => {
                return Err(AssemblyApiError::AuthenticationError(format!(
                    "RPC method {} requires authentication but credentials were not provided",
                    method
                )))
            }
            None => return Ok(None),
        };

        // Url::parse lowercases the scheme, so "HTTP://" is caught here too.
        let insecure = parse_url(&self.config.url, "service")?.scheme() == "http";
        if insecure && !self.config.insecure_http_allowed {
            if auth_required {
                return Err(AssemblyApiError::AuthenticationError(format!(
                    "RPC method {} requires authentication and must not be called over \
                     insecure http; use https or allow insecure http connections",
                    method
                )));
            }
            // Optional auth: call anonymously rather than leak the token.
            warn!(method, "not sending token over insecure http connection");
            return Ok(None);
        }

        Ok(Some(token))
    }

    fn build_request(
        &self,
        method: &str,
        args: Vec<Value>,
        id: &str,
        context: Option<&RpcContext>,
    ) -> Result<Value> {
        let mut request = json!({
            "version": JSONRPC_VERSION,
            "method": method,
            "params": args,
            "id": id,
        });

        let mut context = match context {
            Some(ctx) => match serde_json::to_value(ctx)? {
                Value::Object(map) => map,
                _ => Map::new(),
            },
            None => Map::new(),
        };
        if let Some(version) = &self.config.service_version {
            context.insert("service_ver".to_string(), json!(version));
        }
        if !context.is_empty() {
            request["context"] = Value::Object(context);
        }

        Ok(request)
    }
}

fn next_request_id() -> String {
    OsRng.next_u64().to_string()
}

/// Interprets a JSON-RPC response and returns the first element of its
/// `result` array.
pub(crate) fn process_result(method: &str, response: TransportResponse) -> Result<Value> {
    let parsed = from_str::<Value>(&response.body);

    if response.status == 401 || response.status == 403 {
        let message = parsed
            .as_ref()
            .ok()
            .and_then(|v| v.get("error"))
            .and_then(|err| err.get("message"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("Server rejected credentials (status {})", response.status));
        return Err(AssemblyApiError::AuthenticationError(message));
    }

    let result = match parsed {
        Ok(Value::Object(object)) => object,
        Ok(_) => {
            return Err(AssemblyApiError::protocol(
                "Unexpected JSON structure".to_string(),
            ))
        }
        Err(e) => {
            return Err(AssemblyApiError::protocol(format!(
                "Failed to parse JSON (status {}): {}",
                response.status, e
            )))
        }
    };

    if let Some(err) = result.get("error").filter(|err| !err.is_null()) {
        return Err(AssemblyApiError::from_envelope(err));
    }

    match result.get("result") {
        Some(Value::Array(values)) => values.first().cloned().ok_or_else(|| {
            AssemblyApiError::protocol(format!("Empty result returned by {}", method))
        }),
        Some(_) => Err(AssemblyApiError::protocol(format!(
            "Result returned by {} is not an array",
            method
        ))),
        None => Err(AssemblyApiError::protocol(format!(
            "No result returned by {} (status {})",
            method, response.status
        ))),
    }
}
