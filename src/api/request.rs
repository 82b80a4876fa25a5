use std::{collections::BTreeMap, fmt};

use serde::Serialize;
use uuid::Uuid;

use crate::errors::Result;
use crate::session::SessionContext;

pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        })
    }
}

/// A request ready to hand to the HTTP transport.
///
/// Query parameters are kept unencoded; encoding is the transport's job.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: BTreeMap<String, String>,
    pub body: Option<String>,
    pub request_id: Uuid,
}

impl PreparedRequest {
    /// Endpoints starting with `http` are used verbatim, others are joined to
    /// `base_url`.
    pub fn new(method: Method, base_url: &str, endpoint: &str) -> Self {
        let url = if endpoint.starts_with("http") {
            endpoint.to_string()
        } else {
            format!(
                "{}/{}",
                base_url.trim_end_matches('/'),
                endpoint.trim_start_matches('/')
            )
        };
        let request_id = Uuid::new_v4();
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert(REQUEST_ID_HEADER.to_string(), request_id.to_string());
        Self {
            method,
            url,
            query: Vec::new(),
            headers,
            body: None,
            request_id,
        }
    }

    pub fn get(base_url: &str, endpoint: &str) -> Self {
        Self::new(Method::Get, base_url, endpoint)
    }

    pub fn post(base_url: &str, endpoint: &str) -> Self {
        Self::new(Method::Post, base_url, endpoint)
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn json_body<T: Serialize>(mut self, body: &T) -> Result<Self> {
        self.body = Some(serde_json::to_string(body)?);
        Ok(self)
    }

    /// Adds a bearer token when the session holds a live one.
    pub fn authorize(mut self, session: &SessionContext) -> Self {
        match session.bearer_token() {
            Some(token) => {
                self.headers
                    .insert("Authorization".to_string(), format!("Bearer {}", token));
            }
            None => {
                tracing::debug!(request_id = %self.request_id, url = %self.url, "sending request without authorization");
            }
        }
        self
    }
}
