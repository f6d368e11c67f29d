use serde::{Deserialize, Serialize};

use super::{ApiClient, ApiError};
use crate::core::user::Role;

#[derive(Debug, Clone, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RefreshBody<'a> {
    refresh_token: &'a str,
}

/// Body of `POST auth/register`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: Role,
    pub skills: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

pub async fn register(client: &ApiClient, registration: &Registration) -> Result<TokenPair, ApiError> {
    client.post("auth/register", registration).await
}

pub async fn login(client: &ApiClient, email: &str, password: &str) -> Result<TokenPair, ApiError> {
    client
        .post("auth/login", &Credentials { email, password })
        .await
}

pub async fn refresh(client: &ApiClient, refresh_token: &str) -> Result<TokenPair, ApiError> {
    client
        .post("auth/refresh", &RefreshBody { refresh_token })
        .await
}
