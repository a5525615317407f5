//! Thin reqwest wrapper that speaks the coupon API's envelope format.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::api::dto::{AckResponse, ApiResponse, decode_envelope};
use crate::error::ApiError;

/// HTTP client bound to one versioned API root (e.g. `http://localhost:8080/v1`).
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    root: Url,
}

impl ApiClient {
    /// Builds a client for `{base_url}/{version}` with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Endpoint`] if `base_url` is not an absolute URL, or
    /// [`ApiError::Transport`] if the TLS backend cannot be initialized.
    pub fn new(base_url: &str, version: &str, timeout: Duration) -> Result<Self, ApiError> {
        let mut root = Url::parse(base_url)?;
        root.path_segments_mut()
            .map_err(|_| ApiError::Endpoint(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(version.split('/').filter(|s| !s.is_empty()));

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("coupon-console/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, root })
    }

    /// The versioned API root all endpoints are resolved against.
    pub fn root(&self) -> &Url {
        &self.root
    }

    /// Resolves path segments against the API root.
    ///
    /// Each segment is percent-encoded, so a coupon code can never escape
    /// its path position.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Endpoint`] if the root cannot carry a path.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.root.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::Endpoint(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// `GET` without query parameters.
    pub async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ApiError> {
        let url = self.endpoint(segments)?;
        self.send(Method::GET, self.http.get(url)).await
    }

    /// `GET` with a serialized query string.
    pub async fn get_with_query<Q, T>(&self, segments: &[&str], query: &Q) -> Result<T, ApiError>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments)?;
        self.send(Method::GET, self.http.get(url).query(query)).await
    }

    /// `POST` with a JSON body.
    pub async fn post<B, T>(&self, segments: &[&str], body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments)?;
        self.send(Method::POST, self.http.post(url).json(body)).await
    }

    /// `PUT` with a JSON body.
    pub async fn put<B, T>(&self, segments: &[&str], body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments)?;
        self.send(Method::PUT, self.http.put(url).json(body)).await
    }

    /// `DELETE`.
    pub async fn delete<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ApiError> {
        let url = self.endpoint(segments)?;
        self.send(Method::DELETE, self.http.delete(url)).await
    }

    /// Calls `GET ping` and returns the service's answer (normally `"pong"`).
    ///
    /// # Errors
    ///
    /// Any transport failure or error envelope.
    pub async fn ping(&self) -> Result<String, ApiError> {
        let response: AckResponse = self.get(&["ping"]).await?;
        Ok(match response.data {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        })
    }

    /// Unwraps `{"data": ...}` from a single-object response.
    pub async fn get_data<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ApiError> {
        let response: ApiResponse<T> = self.get(segments).await?;
        Ok(response.data)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = request.send().await.inspect_err(|e| {
            warn!(%method, error = %e, "Coupon API request failed");
        })?;

        let status = response.status();
        let url = response.url().clone();
        let body = response.bytes().await?;

        debug!(%method, %url, status = status.as_u16(), bytes = body.len(), "Coupon API response");

        decode_envelope(status.as_u16(), &body).inspect_err(|e| {
            if e.is_rejection() {
                debug!(%method, %url, error = %e, "Coupon API rejected request");
            } else {
                warn!(%method, %url, error = %e, "Coupon API returned an unusable response");
            }
        })
    }
}
