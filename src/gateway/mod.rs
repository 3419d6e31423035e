//! Remote API access.
//!
//! [`Gateway`] is the transport seam: three verbs on paths relative to the
//! API base URL, exchanging JSON. [`HttpGateway`] implements it over HTTP;
//! tests substitute in-memory fakes. The functions in this module are the
//! typed calls the rest of the crate makes, one per remote operation.

mod api;
mod http;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::GatewayError;

pub use api::{
    create_store, delete_entity, fetch_list, login, Credentials, TokenPair, LOGIN_PATH,
    STORES_PATH,
};
pub use http::HttpGateway;

/// JSON transport to the marketplace API.
///
/// Paths are relative to the API base URL and carry no leading slash.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// `GET path?query`, returning the decoded body.
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value, GatewayError>;

    /// `POST path` with a JSON body, returning the decoded response body
    /// (`Value::Null` when empty).
    async fn post(&self, path: &str, body: Value) -> Result<Value, GatewayError>;

    /// `DELETE path`; success carries no body.
    async fn delete(&self, path: &str) -> Result<(), GatewayError>;
}
