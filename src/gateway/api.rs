use std::fmt;

use serde::{Deserialize, Serialize};

use super::Gateway;
use crate::error::GatewayError;
use crate::model::{Resource, StoreId, OWNER_QUERY};
use crate::wizard::{CreatedStore, StoreSubmission};

/// Token exchange endpoint.
pub const LOGIN_PATH: &str = "login/";

/// Store creation endpoint.
pub const STORES_PATH: &str = "stores/";

/// Login form.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Access/refresh token pair issued on login.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// List every entity of kind `R`, scoped to `owner` when the resource is
/// store-owned.
pub async fn fetch_list<R: Resource>(
    gateway: &dyn Gateway,
    owner: Option<StoreId>,
) -> Result<Vec<R>, GatewayError> {
    let query: Vec<(&str, String)> = match owner {
        Some(owner) if R::OWNED => vec![(OWNER_QUERY, owner.to_string())],
        _ => Vec::new(),
    };
    let body = gateway.get(R::LIST_PATH, &query).await?;
    R::ENVELOPE.decode(body)
}

/// Delete one entity of kind `R`.
pub async fn delete_entity<R: Resource>(
    gateway: &dyn Gateway,
    id: &R::Id,
) -> Result<(), GatewayError> {
    gateway.delete(&R::delete_path(id)).await
}

/// Exchange credentials for a token pair.
///
/// Any failure, including a non-success status, is returned to the caller.
pub async fn login(
    gateway: &dyn Gateway,
    credentials: &Credentials,
) -> Result<TokenPair, GatewayError> {
    let body = gateway
        .post(LOGIN_PATH, serde_json::to_value(credentials)?)
        .await?;
    Ok(serde_json::from_value(body)?)
}

/// Register a new store.
pub async fn create_store(
    gateway: &dyn Gateway,
    submission: &StoreSubmission,
) -> Result<CreatedStore, GatewayError> {
    let body = gateway
        .post(STORES_PATH, serde_json::to_value(submission)?)
        .await?;
    Ok(serde_json::from_value(body)?)
}
