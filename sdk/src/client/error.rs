use serde_json::Value;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AssemblyApiError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssemblyApiError {
    /// Credentials were rejected, missing for a method that needs them, or
    /// would have been sent over an insecure connection.
    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    /// The HTTP exchange could not complete (connection refused, timeout,
    /// TLS or DNS failure).
    #[error("Transport error: {0}")]
    TransportError(String),

    /// The response could not be decoded into the expected shape, or the
    /// server answered with a JSON-RPC error envelope.
    #[error("Protocol error: {message}")]
    ProtocolError {
        message: String,
        name: Option<String>,
        code: Option<i64>,
        data: Option<String>,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl AssemblyApiError {
    pub fn protocol(message: impl Into<String>) -> Self {
        AssemblyApiError::ProtocolError {
            message: message.into(),
            name: None,
            code: None,
            data: None,
        }
    }

    /// Builds a protocol error from the `error` member of a response.
    /// A bare string member is the message itself. Otherwise falls back to
    /// the raw JSON when the envelope has no message.
    pub fn from_envelope(error: &Value) -> Self {
        if let Value::String(message) = error {
            return AssemblyApiError::protocol(message.clone());
        }
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string());
        let name = error.get("name").and_then(Value::as_str).map(str::to_string);
        let code = error.get("code").and_then(Value::as_i64);
        // KBase servers put the remote stack trace under "error"; JSON-RPC 2.0
        // servers use "data".
        let data = error
            .get("error")
            .or_else(|| error.get("data"))
            .filter(|v| !v.is_null())
            .map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            });

        AssemblyApiError::ProtocolError {
            message,
            name,
            code,
            data,
        }
    }

    /// Server-supplied message for protocol errors, the plain message otherwise.
    pub fn message(&self) -> &str {
        match self {
            AssemblyApiError::AuthenticationError(m)
            | AssemblyApiError::TransportError(m)
            | AssemblyApiError::InvalidConfig(m) => m,
            AssemblyApiError::ProtocolError { message, .. } => message,
        }
    }
}

impl From<serde_json::Error> for AssemblyApiError {
    fn from(e: serde_json::Error) -> Self {
        AssemblyApiError::protocol(format!("Failed to decode JSON: {}", e))
    }
}

impl From<reqwest::Error> for AssemblyApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            AssemblyApiError::TransportError(format!("Request timed out: {}", e))
        } else if e.is_decode() {
            AssemblyApiError::protocol(format!("Failed to read response: {}", e))
        } else {
            AssemblyApiError::TransportError(format!("Request failed: {}", e))
        }
    }
}
