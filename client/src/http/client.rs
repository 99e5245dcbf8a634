//! Thin JSON client over the DataChat API
//!
//! The single place that knows about HTTP: bearer-token attachment, JSON
//! encoding, and the normalization of failures into one human-readable
//! message per call.

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;

/// Failure of an API call, normalized to a displayable message
#[derive(Debug, Error)]
pub enum ClientError {
    /// Non-2xx response; carries the server-provided detail when present
    #[error("{0}")]
    Api(String),

    /// Connection-level failure or undecodable response
    #[error("Network error: {0}")]
    Network(String),
}

// Error payload shapes the backend uses interchangeably
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
    error: Option<String>,
}

/// JSON client with optional bearer authentication
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            token: RwLock::new(None),
        }
    }

    /// Attach a bearer token to subsequent requests
    pub async fn set_token(&self, token: impl Into<String>) {
        *self.token.write().await = Some(token.into());
    }

    /// Drop the bearer token
    pub async fn clear_token(&self) {
        *self.token.write().await = None;
    }

    pub async fn has_token(&self) -> bool {
        self.token.read().await.is_some()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.send(Method::GET, path, None::<&()>).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        self.send(Method::POST, path, Some(body)).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        self.send(Method::PUT, path, Some(body)).await
    }

    /// DELETE carrying a JSON body, returning the ack payload
    pub async fn delete_with_body<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        self.send(Method::DELETE, path, Some(body)).await
    }

    /// DELETE whose response body is irrelevant (may be empty)
    pub async fn delete_discard(&self, path: &str) -> Result<(), ClientError> {
        let response = self
            .request(Method::DELETE, path, None::<&()>)
            .await?
            .send()
            .await
            .map_err(|error| ClientError::Network(error.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(Self::api_error(status, response).await);
        }
        Ok(())
    }

    async fn send<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ClientError> {
        let response = self
            .request(method, path, body)
            .await?
            .send()
            .await
            .map_err(|error| ClientError::Network(error.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::api_error(status, response).await);
        }

        response
            .json::<T>()
            .await
            .map_err(|error| ClientError::Network(error.to_string()))
    }

    async fn request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<reqwest::RequestBuilder, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.request(method, &url);

        if let Some(token) = self.token.read().await.as_deref() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        Ok(request)
    }

    async fn api_error(status: reqwest::StatusCode, response: reqwest::Response) -> ClientError {
        let detail = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.detail.or(body.error))
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
        ClientError::Api(detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = ClientError::Api("Invalid OTP code".to_string());
        assert_eq!(error.to_string(), "Invalid OTP code");

        let error = ClientError::Network("connection refused".to_string());
        assert_eq!(error.to_string(), "Network error: connection refused");
    }

    #[test]
    fn test_error_body_shapes() {
        let body: ErrorBody = serde_json::from_str(r#"{"detail": "no"}"#).unwrap();
        assert_eq!(body.detail.as_deref(), Some("no"));
        let body: ErrorBody = serde_json::from_str(r#"{"error": "also no"}"#).unwrap();
        assert_eq!(body.error.as_deref(), Some("also no"));
        let body: ErrorBody = serde_json::from_str("{}").unwrap();
        assert!(body.detail.is_none() && body.error.is_none());
    }

    #[tokio::test]
    async fn test_token_lifecycle() {
        let client = ApiClient::new("https://api.example.test/api");
        assert!(!client.has_token().await);
        client.set_token("abc").await;
        assert!(client.has_token().await);
        client.clear_token().await;
        assert!(!client.has_token().await);
    }
}
