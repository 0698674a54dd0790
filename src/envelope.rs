//! The upstream's double-encoded JSON envelope.
//!
//! Requests carry their arguments as a JSON *string* under `data`, and responses
//! answer the same way: `{"data": "<json string>"}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Result;

#[derive(Debug, Serialize)]
pub struct RequestEnvelope<'a> {
    pub action_name: &'a str,
    pub data: String,
    pub d_info: Value,
}

impl<'a> RequestEnvelope<'a> {
    /// Encodes `inner` and wraps it for `action_name`.
    pub fn new<T: Serialize>(action_name: &'a str, inner: &T) -> Result<Self> {
        Ok(Self {
            action_name,
            data: serde_json::to_string(inner)?,
            d_info: Value::Object(Default::default()),
        })
    }
}

#[derive(Debug, Deserialize)]
struct ResponseEnvelope {
    #[serde(default)]
    data: Value,
}

/// Decodes both layers of a response body.
///
/// A missing, null or non-string `data` yields no nodes. A payload that decodes
/// to something other than an array is also treated as empty.
pub fn unwrap(raw: &[u8]) -> Result<Vec<Value>> {
    let envelope: ResponseEnvelope = serde_json::from_slice(raw)?;
    let Value::String(inner) = envelope.data else {
        return Ok(Vec::new());
    };

    match serde_json::from_str(&inner)? {
        Value::Array(nodes) => Ok(nodes),
        _ => Ok(Vec::new()),
    }
}
