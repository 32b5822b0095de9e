//! HTTP client implementation

use std::time::Duration;

use console_api::ErrorResponse;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, error};
use url::Url;

use crate::errors::ConsoleError;

/// Status code and raw body of a response, whatever its status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP client for backend communication
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: Url,
}

impl HttpClient {
    /// Create a new HTTP client
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ConsoleError> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url = Url::parse(base_url.trim_end_matches('/'))?;
        if base_url.cannot_be_a_base() {
            return Err(ConsoleError::ConfigError(format!(
                "backend URL cannot be used as a base: {}",
                base_url
            )));
        }

        Ok(Self { client, base_url })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Join percent-encoded path segments onto the base URL
    pub fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ConsoleError> {
        let request = self.client.get(self.url(segments));
        self.send_json(Method::GET, request).await
    }

    /// Make a POST request with a JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<T, ConsoleError> {
        let request = self.client.post(self.url(segments)).json(body);
        self.send_json(Method::POST, request).await
    }

    /// Make a PUT request with a JSON body
    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<T, ConsoleError> {
        let request = self.client.put(self.url(segments)).json(body);
        self.send_json(Method::PUT, request).await
    }

    /// Make a bodiless request and return the raw body on success
    pub async fn send_empty(&self, method: Method, segments: &[&str]) -> Result<String, ConsoleError> {
        let request = self.client.request(method.clone(), self.url(segments));
        let response = self.send(&method, request).await?;
        Ok(response.text().await?)
    }

    /// Make a request to an absolute URL and capture the response regardless of status
    pub async fn send_raw(&self, request: RequestBuilder) -> Result<RawResponse, ConsoleError> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(RawResponse { status, body })
    }

    /// Access the underlying client to build requests against absolute URLs
    pub fn inner(&self) -> &Client {
        &self.client
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        request: RequestBuilder,
    ) -> Result<T, ConsoleError> {
        let response = self.send(&method, request).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn send(&self, method: &Method, request: RequestBuilder) -> Result<Response, ConsoleError> {
        let response = request.send().await.map_err(|e| {
            error!("HTTP {} failed: {}", method, e);
            ConsoleError::Transport(e)
        })?;
        debug!("{} {} -> {}", method, response.url(), response.status());

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("HTTP {} failed: {} - {}", method, status, body);
            let message = ErrorResponse::message_from_body(&body)
                .unwrap_or_else(|| format!("Status: {}", status.as_u16()));
            return Err(ConsoleError::Backend {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }
}
