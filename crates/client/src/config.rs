//! Client configuration, read once from the environment.

use std::time::Duration;

use reqwest::Url;

use crate::error::{ClientError, ClientResult};

pub const ENV_BASE_URL: &str = "DISPATCH_BASE_URL";
pub const ENV_TOKEN: &str = "DISPATCH_TOKEN";
pub const ENV_TIMEOUT_SECS: &str = "DISPATCH_TIMEOUT_SECS";

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct ClientConfig {
    base_url: Url,
    token: Option<String>,
    timeout: Duration,
}

impl ClientConfig {
    /// Config for `base_url` with no token and the default timeout.
    pub fn new(base_url: &str) -> ClientResult<Self> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            token: None,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn from_env() -> ClientResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key/value source; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ClientResult<Self> {
        let base_url = lookup(ENV_BASE_URL).unwrap_or_else(|| {
            tracing::warn!("{ENV_BASE_URL} not set; using {DEFAULT_BASE_URL}");
            DEFAULT_BASE_URL.to_string()
        });
        let mut config = Self::new(&base_url)?;

        if let Some(token) = lookup(ENV_TOKEN).filter(|t| !t.trim().is_empty()) {
            config.token = Some(token);
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                ClientError::Config(format!("{ENV_TIMEOUT_SECS} must be whole seconds, got {raw:?}"))
            })?;
            if secs == 0 {
                return Err(ClientError::Config(format!("{ENV_TIMEOUT_SECS} must be positive")));
            }
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// `<base>/api/<path>`.
    pub fn endpoint_url(&self, path: &str) -> String {
        format!(
            "{}/api/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

fn parse_base_url(raw: &str) -> ClientResult<Url> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ClientError::Config(format!("invalid base url {raw:?}: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(ClientError::Config(format!(
            "base url must be an absolute http(s) origin, got {raw:?}"
        )));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(ClientError::Config(format!(
            "base url must not carry a query or fragment, got {raw:?}"
        )));
    }
    Ok(url)
}
