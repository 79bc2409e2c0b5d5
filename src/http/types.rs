//! HTTP Types
//!
//! Response type returned by the HTTP client and helpers for reading
//! fields out of a decoded JSON object.

use rust_i18n::t;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::time::Duration;

use super::error::{HttpError, HttpResult};

/// A fully read HTTP response
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Status code
    pub status: u16,
    /// Response headers, lowercase names
    pub headers: HashMap<String, String>,
    /// Raw body text
    pub body: String,
    /// Time from sending the request until the body was read
    pub elapsed: Duration,
}

impl HttpResponse {
    /// Whether the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decodes the body as a top-level JSON object
    pub fn json_object(&self) -> HttpResult<JsonObject> {
        match serde_json::from_str::<Value>(&self.body)? {
            Value::Object(map) => Ok(JsonObject(map)),
            _ => Err(HttpError::Decode(t!("http.not_an_object").to_string())),
        }
    }
}

/// A decoded JSON object with string-oriented field access
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonObject(pub Map<String, Value>);

impl JsonObject {
    /// Reads a top-level field as a string.
    ///
    /// Strings are returned verbatim, other scalars as their JSON text.
    /// Missing fields, `null`, arrays and objects yield `None`.
    pub fn get_string(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }
}
