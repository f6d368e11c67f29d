pub mod applications;
pub mod auth;
pub mod error;
pub mod hackathons;
pub mod inflight;
pub mod memberships;
pub mod notifications;
pub mod projects;
pub mod tasks;
pub mod users;

use std::sync::{Arc, PoisonError, RwLock};

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub use error::ApiError;
use inflight::InFlight;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/v1/";

/// Trim the configured base URL and make sure it ends in exactly one `/`.
pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_BASE_URL.to_string()
    } else {
        format!("{}/", trimmed)
    }
}

/// JSON client for the TeamUp REST API. Clones share the connection pool,
/// the bearer token and the in-flight GET table.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
    token: Arc<RwLock<Option<String>>>,
    inflight: InFlight<Value>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let http = Client::builder()
            .build()
            .map_err(|e| ApiError::Transport(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            base_url: normalize_base_url(base_url),
            http,
            token: Arc::new(RwLock::new(None)),
            inflight: InFlight::default(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Empty tokens are treated as signed out.
    pub fn set_token(&self, token: Option<String>) {
        let token = token.filter(|t| !t.is_empty() && t != "null");
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = token;
    }

    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }

    /// GET, shared with any identical GET still on the wire.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let this = self.clone();
        let owned = path.to_string();
        let value = self
            .inflight
            .run(path, move || async move { this.send(Method::GET, &owned, None).await })
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = serde_json::to_value(body)?;
        let value = self.send(Method::POST, path, Some(body)).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// POST without a body, used by action endpoints (`approve`, `accept`).
    pub async fn post_action<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let value = self.send(Method::POST, path, None).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn patch<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = serde_json::to_value(body)?;
        let value = self.send(Method::PATCH, path, Some(body)).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send(Method::DELETE, path, None).await.map(|_| ())
    }

    async fn send(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value, ApiError> {
        let url = self.url(path);
        log::debug!("{} {}", method, url);

        let mut req = self
            .http
            .request(method.clone(), &url)
            .header(ACCEPT, "application/json");
        if let Some(token) = self.token() {
            req = req.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        if let Some(body) = body {
            req = req.header(CONTENT_TYPE, "application/json").json(&body);
        }

        let resp = req.send().await.map_err(|e| {
            log::warn!("{} {} failed: {}", method, url, e);
            ApiError::from(e)
        })?;
        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            let err = ApiError::from_status(status.as_u16(), &text);
            if status.is_server_error() {
                log::error!("{} {} -> {}: {}", method, url, status, text);
            } else {
                log::warn!("{} {} -> {}: {}", method, url, status, err);
            }
            return Err(err);
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| {
            log::warn!("{} {}: undecodable body: {}", method, url, e);
            ApiError::Decode(e.to_string())
        })
    }
}

/// Render `path?k=v&...`, skipping `None` values.
pub(crate) fn with_query(path: &str, params: &[(&str, Option<String>)]) -> String {
    let pairs: Vec<String> = params
        .iter()
        .filter_map(|(k, v)| v.as_ref().map(|v| format!("{}={}", k, v)))
        .collect();
    if pairs.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, pairs.join("&"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_normalization() {
        assert_eq!(normalize_base_url("http://h:8000/api/v1"), "http://h:8000/api/v1/");
        assert_eq!(normalize_base_url(" http://h/api/v1// "), "http://h/api/v1/");
        assert_eq!(normalize_base_url(""), DEFAULT_BASE_URL);
    }

    #[test]
    fn url_joins_without_double_slash() {
        let client = ApiClient::new("http://h/api/v1").unwrap();
        assert_eq!(client.url("/projects"), "http://h/api/v1/projects");
        assert_eq!(client.url("users/me"), "http://h/api/v1/users/me");
    }

    #[test]
    fn null_token_is_signed_out() {
        let client = ApiClient::new(DEFAULT_BASE_URL).unwrap();
        client.set_token(Some("null".into()));
        assert_eq!(client.token(), None);
        client.set_token(Some("abc".into()));
        let other = client.clone();
        assert_eq!(other.token().as_deref(), Some("abc"));
    }

    #[test]
    fn query_rendering() {
        assert_eq!(with_query("applications", &[("type", None)]), "applications");
        assert_eq!(
            with_query(
                "applications",
                &[("type", Some("project".into())), ("target_id", Some("4".into()))]
            ),
            "applications?type=project&target_id=4"
        );
    }
}
