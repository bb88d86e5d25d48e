//! HTTP Transport Seam
//!
//! The client builds `ApiRequest`s and hands them to a `Transport`.
//! The browser build sends them with gloo-net; tests use a scripted mock.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

/// Request payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    /// `application/json`
    Json(String),
    /// `application/x-www-form-urlencoded`
    Form(String),
}

impl Body {
    pub fn content_type(&self) -> &'static str {
        match self {
            Body::Json(_) => "application/json",
            Body::Form(_) => "application/x-www-form-urlencoded",
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Body::Json(s) | Body::Form(s) => s,
        }
    }
}

/// A fully resolved request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    /// Absolute URL
    pub url: String,
    pub body: Option<Body>,
    /// Bearer token for the `Authorization` header
    pub bearer: Option<String>,
}

impl ApiRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            body: None,
            bearer: None,
        }
    }

    pub fn with_body(mut self, body: Body) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }
}

/// Any response that made it back, whatever its status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }
}

/// No response was received (DNS, CORS, connection reset, ...)
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Sends a request and returns whatever the server answered
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: &ApiRequest) -> Result<RawResponse, TransportError>;
}

impl<T: Transport> Transport for &T {
    async fn send(&self, request: &ApiRequest) -> Result<RawResponse, TransportError> {
        (**self).send(request).await
    }
}
