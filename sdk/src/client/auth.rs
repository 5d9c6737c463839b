//! Client for the identity provider that issues and validates tokens.

use reqwest::blocking::Client;
use serde_json::Value;
use std::fmt;
use tracing::debug;

use crate::client::error::{AssemblyApiError, Result};

/// A validated token together with the user it belongs to.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken {
    pub token: String,
    pub user_id: Option<String>,
}

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            user_id: None,
        }
    }
}

// Keep the secret out of logs.
impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthToken")
            .field("token", &"<redacted>")
            .field("user_id", &self.user_id)
            .finish()
    }
}

pub struct AuthClient {
    url: String,
    all_certificates_trusted: bool,
}

impl AuthClient {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            all_certificates_trusted: false,
        }
    }

    pub fn with_all_certificates_trusted(mut self, trust_all: bool) -> Self {
        self.all_certificates_trusted = trust_all;
        self
    }

    pub fn is_all_certificates_trusted(&self) -> bool {
        self.all_certificates_trusted
    }

    /// Exchanges a username and password for a token.
    pub fn login(&self, username: &str, password: &str) -> Result<AuthToken> {
        debug!(user = username, "logging in with identity provider");
        let body = self.post(&[
            ("user_id", username),
            ("password", password),
            ("fields", "token,user_id"),
        ])?;

        let token = body
            .get("token")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                AssemblyApiError::AuthenticationError(
                    "Identity provider response did not include a token".to_string(),
                )
            })?
            .to_string();
        let user_id = body
            .get("user_id")
            .and_then(Value::as_str)
            .map(str::to_string)
            .or_else(|| Some(username.to_string()));

        Ok(AuthToken { token, user_id })
    }

    /// Checks that `token` is accepted and returns the user it belongs to.
    pub fn validate_token(&self, token: &str) -> Result<AuthToken> {
        debug!("validating token with identity provider");
        let body = self.post(&[("token", token), ("fields", "user_id")])?;

        let user_id = body
            .get("user_id")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                AssemblyApiError::AuthenticationError("Token was not accepted".to_string())
            })?
            .to_string();

        Ok(AuthToken {
            token: token.to_string(),
            user_id: Some(user_id),
        })
    }

    fn post(&self, form: &[(&str, &str)]) -> Result<Value> {
        let client = Client::builder()
            .danger_accept_invalid_certs(self.all_certificates_trusted)
            .build()
            .map_err(|e| {
                AssemblyApiError::TransportError(format!("Failed to build HTTP client: {}", e))
            })?;

        let res = client.post(&self.url).form(form).send()?;
        let status = res.status();
        let text = res.text().map_err(|e| {
            AssemblyApiError::TransportError(format!("Failed to read response text: {}", e))
        })?;

        let body = serde_json::from_str::<Value>(&text).ok();
        if let Some(message) = body.as_ref().and_then(error_message) {
            return Err(AssemblyApiError::AuthenticationError(message));
        }
        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(AssemblyApiError::AuthenticationError(format!(
                "Identity provider rejected the credentials (status {})",
                status
            )));
        }
        if !status.is_success() {
            return Err(AssemblyApiError::TransportError(format!(
                "Identity provider returned status {}",
                status
            )));
        }

        body.ok_or_else(|| {
            AssemblyApiError::AuthenticationError(
                "Identity provider returned a malformed response".to_string(),
            )
        })
    }
}

fn error_message(body: &Value) -> Option<String> {
    let err = body.get("error_msg").or_else(|| body.get("error"))?;
    match err {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Object(obj) => Some(
            obj.get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| err.to_string()),
        ),
        other => Some(other.to_string()),
    }
}
