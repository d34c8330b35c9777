//! HTTP types and enums

use serde_json::Value as JsonValue;
use std::fmt;
use std::time::Duration;

/// HTTP methods used against the shop API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    /// Get the string representation of the HTTP method
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
        }
    }
}

/// A completed HTTP exchange.
///
/// The body is parsed as JSON when possible and kept as a JSON string
/// otherwise, so callers can always probe it without a second request.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: JsonValue,
    pub elapsed: Duration,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// First non-null value found at any of the given JSON pointers
    pub fn find(&self, pointers: &[&str]) -> Option<&JsonValue> {
        pointers
            .iter()
            .filter_map(|p| self.body.pointer(p))
            .find(|v| !v.is_null())
    }

    /// Like [`ApiResponse::find`] but renders strings and numbers as text
    pub fn find_text(&self, pointers: &[&str]) -> Option<String> {
        match self.find(pointers)? {
            JsonValue::String(s) => Some(s.clone()),
            JsonValue::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}
