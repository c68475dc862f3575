//! Authenticated HTTP plumbing shared by the endpoint wrappers.
//!
//! Every request goes through [`ApiClient`], which asks an injected
//! [`RequestSigner`] for a bearer token instead of mutating any global
//! default headers. A 401 propagates to the caller unchanged: there is no
//! token refresh and no retry here.

pub mod analytics;
pub mod catalog;
pub mod movements;
pub mod products;

use crate::error::ApiError;
use crate::models::{TokenPair, User};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// Supplies the bearer token attached to outgoing requests, if any.
///
/// Implemented by the token store; tests inject fixed or empty signers.
pub trait RequestSigner: Send + Sync {
    fn bearer_token(&self) -> Option<String>;
}

/// Signer that never attaches a token.
pub struct NoAuth;

impl RequestSigner for NoAuth {
    fn bearer_token(&self) -> Option<String> {
        None
    }
}

/// HTTP client for the inventory API.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    signer: Arc<dyn RequestSigner>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, signer: Arc<dyn RequestSigner>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
            signer,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn sign(&self, request: RequestBuilder) -> RequestBuilder {
        match self.signer.bearer_token() {
            Some(token) => request.header("Authorization", format!("Bearer {token}")),
            None => request,
        }
    }

    /// Turn a settled response into the decoded body or an [`ApiError`].
    async fn read<T: DeserializeOwned>(path: &str, response: Response) -> Result<T, ApiError> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ApiError::from_response(status, path, body));
        }
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn read_empty(path: &str, response: Response) -> Result<(), ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(ApiError::from_response(status, path, body));
        }
        Ok(())
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T, ApiError> {
        tracing::debug!(path, "GET");
        let request = self.sign(self.http.get(self.url(path)).query(query));
        Self::read(path, request.send().await?).await
    }

    /// Fetch an opaque cursor URL exactly as the server returned it.
    pub(crate) async fn get_absolute<T: DeserializeOwned>(
        &self,
        url: &str,
    ) -> Result<T, ApiError> {
        tracing::debug!(url, "GET (cursor)");
        let request = self.sign(self.http.get(url));
        Self::read(url, request.send().await?).await
    }

    /// Fetch a binary body (the QR code endpoint returns a PNG, not JSON).
    pub(crate) async fn get_bytes(&self, path: &str) -> Result<Vec<u8>, ApiError> {
        tracing::debug!(path, "GET (bytes)");
        let request = self.sign(self.http.get(self.url(path)));
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(ApiError::from_response(status, path, body));
        }
        Ok(response.bytes().await?.to_vec())
    }

    pub(crate) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        tracing::debug!(path, "POST");
        let request = self.sign(self.http.post(self.url(path)).json(body));
        Self::read(path, request.send().await?).await
    }

    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T, ApiError> {
        tracing::debug!(path, "POST (multipart)");
        let request = self.sign(self.http.post(self.url(path)).multipart(form));
        Self::read(path, request.send().await?).await
    }

    pub(crate) async fn patch_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T, ApiError> {
        tracing::debug!(path, "PATCH (multipart)");
        let request = self.sign(self.http.patch(self.url(path)).multipart(form));
        Self::read(path, request.send().await?).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        tracing::debug!(path, "DELETE");
        let request = self.sign(self.http.delete(self.url(path)));
        Self::read_empty(path, request.send().await?).await
    }

    /// Exchange credentials for a token pair. Sent unsigned: the token
    /// endpoint does not expect (or want) a stale bearer header.
    pub async fn obtain_token(
        &self,
        username: &str,
        password: &str,
    ) -> Result<TokenPair, ApiError> {
        let path = "/api/token/";
        let body = serde_json::json!({ "username": username, "password": password });
        let request = self.http.post(self.url(path)).json(&body);
        Self::read(path, request.send().await?).await
    }

    /// Fetch the identity record for the current token.
    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.get_json("/api/user/", &[]).await
    }

    /// Create a new account.
    pub async fn register(&self, username: &str, password: &str) -> Result<User, ApiError> {
        let body = serde_json::json!({ "username": username, "password": password });
        self.post_json("/api/register/", &body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedToken(&'static str);

    impl RequestSigner for FixedToken {
        fn bearer_token(&self) -> Option<String> {
            Some(self.0.to_string())
        }
    }

    #[test]
    fn base_url_is_normalized() {
        let client = ApiClient::new("http://inventory.local:8000/", Arc::new(NoAuth));
        assert_eq!(client.base_url(), "http://inventory.local:8000");
        assert_eq!(client.url("/api/products/"), "http://inventory.local:8000/api/products/");
    }

    #[test]
    fn signer_is_consulted_per_request() {
        let client = ApiClient::new("http://inventory.local", Arc::new(FixedToken("abc")));
        let request = client
            .sign(client.http.get(client.url("/api/user/")))
            .build()
            .unwrap();
        assert_eq!(
            request.headers().get("Authorization").unwrap(),
            "Bearer abc"
        );
    }

    #[test]
    fn anonymous_requests_carry_no_auth_header() {
        let client = ApiClient::new("http://inventory.local", Arc::new(NoAuth));
        let request = client
            .sign(client.http.get(client.url("/api/products/")))
            .build()
            .unwrap();
        assert!(request.headers().get("Authorization").is_none());
    }
}
