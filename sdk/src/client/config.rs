//! Connection settings for the AssemblyAPI client.
//!
//! A [`Config`] can be built in code or loaded with [`Config::load`], which
//! merges an optional TOML file with `ASSEMBLY_API_*` environment variables:
//!
//! ```bash
//! ASSEMBLY_API_URL=https://kbase.us/services/assembly_api
//! ASSEMBLY_API_READ_TIMEOUT_MS=30000
//! ASSEMBLY_API_CREDENTIALS__TYPE=token
//! ASSEMBLY_API_CREDENTIALS__TOKEN=XXXXXXXX
//! ```

use std::path::Path;
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::client::error::{AssemblyApiError, Result};

pub const DEFAULT_AUTH_SERVICE_URL: &str =
    "https://kbase.us/services/authorization/Sessions/Login";

const ENV_PREFIX: &str = "ASSEMBLY_API_";

/// How the client identifies itself to the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Credentials {
    #[default]
    None,
    Token {
        token: String,
    },
    UserPassword {
        username: String,
        password: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub url: String,
    #[serde(default)]
    pub credentials: Credentials,
    #[serde(default = "default_auth_service_url")]
    pub auth_service_url: String,
    /// Milliseconds to wait for a response. `None` or `0` waits forever.
    #[serde(default)]
    pub read_timeout_ms: Option<u64>,
    #[serde(default)]
    pub insecure_http_allowed: bool,
    #[serde(default)]
    pub all_certificates_trusted: bool,
    #[serde(default)]
    pub streaming_mode: bool,
    #[serde(default)]
    pub service_version: Option<String>,
}

fn default_auth_service_url() -> String {
    DEFAULT_AUTH_SERVICE_URL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: String::new(),
            credentials: Credentials::None,
            auth_service_url: default_auth_service_url(),
            read_timeout_ms: None,
            insecure_http_allowed: false,
            all_certificates_trusted: false,
            streaming_mode: false,
            service_version: None,
        }
    }
}

impl Config {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// A service started locally with the module's default port.
    pub fn localhost() -> Self {
        Self {
            url: "http://localhost:5000".to_string(),
            insecure_http_allowed: true,
            ..Self::default()
        }
    }

    /// Loads defaults, then the TOML file at `path` (if given), then
    /// `ASSEMBLY_API_*` environment variables. Nested keys use `__`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = path {
            figment = figment.merge(Toml::file(path));
        }
        let config: Config = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(|e| AssemblyApiError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.credentials = Credentials::Token {
            token: token.into(),
        };
        self
    }

    pub fn with_user_password(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.credentials = Credentials::UserPassword {
            username: username.into(),
            password: password.into(),
        };
        self
    }

    pub fn with_auth_service_url(mut self, url: impl Into<String>) -> Self {
        self.auth_service_url = url.into();
        self
    }

    pub fn with_read_timeout_ms(mut self, milliseconds: u64) -> Self {
        self.read_timeout_ms = Some(milliseconds);
        self
    }

    pub fn with_insecure_http_allowed(mut self, allowed: bool) -> Self {
        self.insecure_http_allowed = allowed;
        self
    }

    pub fn with_all_certificates_trusted(mut self, trust_all: bool) -> Self {
        self.all_certificates_trusted = trust_all;
        self
    }

    pub fn with_streaming_mode(mut self, streaming: bool) -> Self {
        self.streaming_mode = streaming;
        self
    }

    pub fn with_service_version(mut self, version: impl Into<String>) -> Self {
        self.service_version = Some(version.into());
        self
    }

    /// Read timeout as a duration; zero means unbounded.
    pub fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout_ms
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
    }

    pub fn validate(&self) -> Result<()> {
        parse_url(&self.url, "service")?;
        if !matches!(self.credentials, Credentials::None) {
            parse_url(&self.auth_service_url, "auth service")?;
        }
        Ok(())
    }
}

pub(crate) fn parse_url(url: &str, what: &str) -> Result<reqwest::Url> {
    if url.trim().is_empty() {
        return Err(AssemblyApiError::InvalidConfig(format!(
            "{} URL is required",
            what
        )));
    }
    let parsed = reqwest::Url::parse(url).map_err(|e| {
        AssemblyApiError::InvalidConfig(format!("Invalid {} URL '{}': {}", what, url, e))
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(AssemblyApiError::InvalidConfig(format!(
            "Unsupported {} URL scheme '{}'",
            what, other
        ))),
    }
}
