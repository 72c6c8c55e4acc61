//! HTTP plumbing shared by every API surface.

use reqwest::RequestBuilder;
use reqwest::multipart::Form;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::envelope::ApiEnvelope;
use crate::error::{ClientError, ClientResult};

/// Async client for the designer portal.
///
/// Cheap to clone; clones share one connection pool. Each call is a single
/// request with no retry.
#[derive(Debug, Clone)]
pub struct DispatchClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl DispatchClient {
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;
        Ok(Self { http, config })
    }

    pub fn from_env() -> ClientResult<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Same connection pool, different bearer token.
    pub fn with_token(&self, token: impl Into<String>) -> Self {
        Self {
            http: self.http.clone(),
            config: self.config.clone().with_token(token),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub(crate) async fn post_json<B, T>(&self, path: &str, body: &B) -> ClientResult<ApiEnvelope<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let req = self.http.post(self.config.endpoint_url(path)).json(body);
        self.send(path, req).await
    }

    /// POST with query parameters and no body.
    pub(crate) async fn post_query<Q, T>(&self, path: &str, query: &Q) -> ClientResult<ApiEnvelope<T>>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let req = self.http.post(self.config.endpoint_url(path)).query(query);
        self.send(path, req).await
    }

    pub(crate) async fn get_json<Q, T>(&self, path: &str, query: &Q) -> ClientResult<ApiEnvelope<T>>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let req = self.http.get(self.config.endpoint_url(path)).query(query);
        self.send(path, req).await
    }

    pub(crate) async fn post_multipart<T>(&self, path: &str, form: Form) -> ClientResult<ApiEnvelope<T>>
    where
        T: DeserializeOwned,
    {
        let req = self.http.post(self.config.endpoint_url(path)).multipart(form);
        self.send(path, req).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        path: &str,
        mut req: RequestBuilder,
    ) -> ClientResult<ApiEnvelope<T>> {
        if let Some(token) = self.config.token() {
            req = req.bearer_auth(token);
        }

        tracing::debug!(path, "portal request");
        let resp = req.send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(path, status = status.as_u16(), "portal answered with HTTP error");
            return Err(ClientError::Status {
                path: path.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let bytes = resp.bytes().await?;
        let envelope: ApiEnvelope<T> =
            serde_json::from_slice(&bytes).map_err(|e| ClientError::decode(path, e))?;

        if !envelope.is_success() {
            tracing::warn!(
                path,
                code = envelope.code,
                message = %envelope.message,
                "portal rejected request"
            );
        }
        Ok(envelope)
    }
}
