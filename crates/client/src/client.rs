use std::sync::RwLock;

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
use crate::error::ApiError;

/// Configured request client bound to one base URL.
///
/// Cookies are stored and forwarded automatically (the refresh endpoint is
/// cookie-authenticated), and a default `Authorization: Bearer` header is
/// attached to every request once the session layer installs a token.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    bearer: RwLock<Option<String>>,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url,
            bearer: RwLock::new(None),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Install the bearer token attached to every subsequent request.
    pub fn set_bearer_token(&self, token: &str) {
        match self.bearer.write() {
            Ok(mut bearer) => *bearer = Some(token.to_string()),
            Err(poisoned) => *poisoned.into_inner() = Some(token.to_string()),
        }
    }

    /// Remove the bearer token. Idempotent.
    pub fn clear_bearer_token(&self) {
        match self.bearer.write() {
            Ok(mut bearer) => *bearer = None,
            Err(poisoned) => *poisoned.into_inner() = None,
        }
    }

    pub fn has_bearer_token(&self) -> bool {
        match self.bearer.read() {
            Ok(bearer) => bearer.is_some(),
            Err(poisoned) => poisoned.into_inner().is_some(),
        }
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.http.request(method, url);

        let token = match self.bearer.read() {
            Ok(bearer) => bearer.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        req
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
        path: &str,
    ) -> Result<T, ApiError> {
        let resp = req
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !status.is_success() {
            tracing::debug!(%status, path, "request failed");
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(self.request(Method::GET, path), path).await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(self.request(Method::POST, path).json(body), path)
            .await
    }

    /// POST with an empty JSON body (the refresh endpoint takes none).
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(
            self.request(Method::POST, path).json(&serde_json::json!({})),
            path,
        )
        .await
    }

    pub async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(self.request(Method::PUT, path).json(body), path)
            .await
    }
}

impl core::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("has_bearer_token", &self.has_bearer_token())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;

    fn client() -> ApiClient {
        ApiClient::new(ApiConfig::new("http://127.0.0.1:1")).unwrap()
    }

    #[test]
    fn bearer_token_set_and_clear() {
        let client = client();
        assert!(!client.has_bearer_token());

        client.set_bearer_token("abc");
        assert!(client.has_bearer_token());

        client.clear_bearer_token();
        client.clear_bearer_token();
        assert!(!client.has_bearer_token());
    }

    #[tokio::test]
    async fn network_failure_propagates_unchanged() {
        // Port 1 refuses connections; the adapter must not retry or remap.
        let client = client();
        let err = client
            .get_json::<serde_json::Value>("/products")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }
}
