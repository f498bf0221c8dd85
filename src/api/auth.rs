//! Login and register round trips. These are the only endpoints that go
//! out without a bearer header; the token they return is what the rest of
//! the gateway attaches.

use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::api::client::ApiClient;
use crate::api::envelope;
use crate::api::error::ApiError;
use crate::model::UserId;

/// The payload under `data` in a successful auth response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub user: Option<AuthUser>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

/// `POST /auth/login`
pub async fn login(
    client: &ApiClient,
    email: &str,
    password: &str,
) -> Result<AuthSession, ApiError> {
    let body = json!({"email": email, "password": password});
    let resp = client.public_post("/auth/login", &body).await?;
    let data = envelope::unwrap_data(resp)?;
    let session: AuthSession =
        serde_json::from_value(data).map_err(|e| ApiError::Shape(e.to_string()))?;
    info!(email, "logged in");
    Ok(session)
}

/// `POST /auth/register`
pub async fn register(
    client: &ApiClient,
    name: &str,
    email: &str,
    password: &str,
) -> Result<AuthSession, ApiError> {
    let body = json!({"name": name, "email": email, "password": password});
    let resp = client.public_post("/auth/register", &body).await?;
    let data = envelope::unwrap_data(resp)?;
    let session: AuthSession =
        serde_json::from_value(data).map_err(|e| ApiError::Shape(e.to_string()))?;
    info!(email, "registered");
    Ok(session)
}
