use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::GatewayError;

/// Query parameter naming the store a listing belongs to.
pub const OWNER_QUERY: &str = "storeId";

/// Identifier of a registered store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoreId(pub u64);

impl fmt::Display for StoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where the entity sequence sits inside a list response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Envelope {
    /// The body is the sequence itself.
    Bare,
    /// The sequence is nested one level down under the named field.
    Field(&'static str),
}

impl Envelope {
    /// Decode a list response into entities.
    ///
    /// A missing or `null` envelope field decodes to an empty sequence; a body
    /// of the wrong kind altogether is a decode error.
    pub fn decode<T: DeserializeOwned>(self, body: Value) -> Result<Vec<T>, GatewayError> {
        let inner = match (self, body) {
            (Envelope::Bare, body) => body,
            (Envelope::Field(field), Value::Object(mut map)) => {
                map.remove(field).unwrap_or(Value::Null)
            }
            (Envelope::Field(field), other) => {
                return Err(GatewayError::Decode(format!(
                    "expected an object with a `{field}` field, got {}",
                    json_kind(&other)
                )));
            }
        };
        if inner.is_null() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_value(inner)?)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// A listable, deletable remote entity kind.
pub trait Resource: Clone + fmt::Debug + DeserializeOwned + Send + Sync + 'static {
    /// Key compared for deletion.
    type Id: Clone + PartialEq + fmt::Debug + fmt::Display + Send + Sync + 'static;

    /// Resource name, used for logging and as the delete path prefix.
    const NAME: &'static str;

    /// Path of the list endpoint, relative to the API base URL.
    const LIST_PATH: &'static str;

    /// Whether listings are scoped by [`OWNER_QUERY`].
    const OWNED: bool = true;

    const ENVELOPE: Envelope = Envelope::Bare;

    fn id(&self) -> &Self::Id;

    fn delete_path(id: &Self::Id) -> String {
        format!("{}/{}", Self::NAME, id)
    }
}

/// A service provider listed on the marketplace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tasker {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

impl Resource for Tasker {
    type Id = u64;
    const NAME: &'static str = "taskers";
    const LIST_PATH: &'static str = "services/";
    const OWNED: bool = false;
    const ENVELOPE: Envelope = Envelope::Field("results");

    fn id(&self) -> &u64 {
        &self.id
    }
}

/// A service a store offers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offering {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Decimal amount as sent by the server, e.g. `"25.00"`.
    #[serde(default)]
    pub price: Option<String>,
}

impl Resource for Offering {
    type Id = u64;
    const NAME: &'static str = "offerings";
    const LIST_PATH: &'static str = "offerings";

    fn id(&self) -> &u64 {
        &self.id
    }
}

/// A gallery photo belonging to a store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub id: u64,
    /// URL of the stored asset.
    pub image: String,
}

impl Resource for Image {
    type Id = u64;
    const NAME: &'static str = "images";
    const LIST_PATH: &'static str = "images";
    const ENVELOPE: Envelope = Envelope::Field("images");

    fn id(&self) -> &u64 {
        &self.id
    }
}

/// A customer review of a store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: u64,
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub reviewer: Option<String>,
}

impl Resource for Review {
    type Id = u64;
    const NAME: &'static str = "reviews";
    const LIST_PATH: &'static str = "reviews";

    fn id(&self) -> &u64 {
        &self.id
    }
}
