use async_trait::async_trait;
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Client, Method, RequestBuilder, Url};
use serde_json::Value;

use super::Gateway;
use crate::config::Config;
use crate::error::GatewayError;

/// Body fields inspected, in order, for a human-readable failure message.
const MESSAGE_FIELDS: [&str; 3] = ["detail", "message", "error"];

/// Plain-text bodies longer than this are not surfaced as messages.
const MAX_TEXT_MESSAGE: usize = 200;

/// [`Gateway`] over HTTP with `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base: Url,
    bearer: Option<HeaderValue>,
}

impl HttpGateway {
    pub fn new(config: &Config) -> Result<Self, GatewayError> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            base: config.api_base_url().clone(),
            bearer: None,
        })
    }

    /// Send `Authorization: Bearer <token>` with every request.
    pub fn with_bearer(mut self, token: &str) -> Result<Self, GatewayError> {
        let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|e| GatewayError::Unknown(format!("invalid bearer token: {e}")))?;
        value.set_sensitive(true);
        self.bearer = Some(value);
        Ok(self)
    }

    fn url(&self, path: &str) -> Result<Url, GatewayError> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(|e| GatewayError::Unknown(format!("invalid endpoint path {path:?}: {e}")))
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, GatewayError> {
        let url = self.url(path)?;
        tracing::debug!(%method, %url, "sending request");
        let mut builder = self.client.request(method, url);
        if let Some(bearer) = &self.bearer {
            builder = builder.header(AUTHORIZATION, bearer.clone());
        }
        Ok(builder)
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Vec<u8>, GatewayError> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?.to_vec();
        if !status.is_success() {
            let message = server_message(&body);
            tracing::warn!(status = status.as_u16(), ?message, "request rejected");
            return Err(GatewayError::Server {
                status: status.as_u16(),
                message,
            });
        }
        Ok(body)
    }
}

/// Decode a success body; an empty body is `null`.
fn decode_body(body: &[u8]) -> Result<Value, GatewayError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_slice(body)?)
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value, GatewayError> {
        let builder = self.request(Method::GET, path)?.query(query);
        decode_body(&self.send(builder).await?)
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value, GatewayError> {
        let builder = self.request(Method::POST, path)?.json(&body);
        decode_body(&self.send(builder).await?)
    }

    async fn delete(&self, path: &str) -> Result<(), GatewayError> {
        let builder = self.request(Method::DELETE, path)?;
        self.send(builder).await?;
        Ok(())
    }
}

/// Pull a readable message out of a failure body.
///
/// Tries the well-known message fields, then the first field-level
/// validation error (`{"name": ["This field is required."]}`), then a short
/// plain-text body.
pub(crate) fn server_message(body: &[u8]) -> Option<String> {
    let text = std::str::from_utf8(body).ok()?.trim();
    if text.is_empty() {
        return None;
    }

    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => {
            for field in MESSAGE_FIELDS {
                if let Some(Value::String(message)) = map.get(field) {
                    return Some(message.clone());
                }
            }
            map.iter().find_map(|(field, value)| match value {
                Value::Array(items) => items
                    .iter()
                    .find_map(Value::as_str)
                    .map(|first| format!("{field}: {first}")),
                Value::String(message) => Some(format!("{field}: {message}")),
                _ => None,
            })
        }
        Ok(Value::String(message)) => Some(message),
        Ok(_) => None,
        Err(_) if text.len() <= MAX_TEXT_MESSAGE && !text.starts_with('<') => {
            Some(text.to_string())
        }
        Err(_) => None,
    }
}
