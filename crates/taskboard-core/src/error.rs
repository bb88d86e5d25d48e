//! Error Taxonomy
//!
//! Every failure a page can hit ends up as an `ApiError`. Non-2xx
//! responses are classified from their status and `detail` body.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::transport::{RawResponse, TransportError};

/// Client-side validation failure, raised before any request is sent
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required.")]
    Required(&'static str),
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("{field} must be at least {min} characters.")]
    TooShort { field: &'static str, min: usize },
    #[error("{field} must be at most {max} characters.")]
    TooLong { field: &'static str, max: usize },
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Nothing to update.")]
    NothingToUpdate,
    #[error("Missing {0} id in the address.")]
    MissingId(&'static str),
    #[error("Invalid {0} id in the address.")]
    InvalidId(&'static str),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// No response received
    #[error("Network error: {0}")]
    Network(#[from] TransportError),
    /// 401, or no token to send
    #[error("Session expired. Please sign in again.")]
    Unauthorized,
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    /// 400/422 with structured field errors
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("{}", server_message(.status, .detail))]
    Server { status: u16, detail: Option<String> },
    #[error("Unexpected response from server: {0}")]
    Decode(String),
}

fn server_message(status: &u16, detail: &Option<String>) -> String {
    match detail {
        Some(detail) => detail.clone(),
        None => format!("Server error ({}).", status),
    }
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    /// Classify a non-2xx response
    pub fn from_response(response: &RawResponse) -> Self {
        let detail = serde_json::from_str::<ErrorBody>(&response.body)
            .ok()
            .and_then(|body| body.detail);

        match (response.status, detail) {
            (401, _) => ApiError::Unauthorized,
            (404, Some(Detail::Text(text))) => ApiError::NotFound(text),
            (404, _) => ApiError::NotFound("Not found.".to_string()),
            (_, Some(Detail::Fields(fields))) if !fields.is_empty() => {
                ApiError::Validation(join_field_errors(&fields))
            }
            (status, Some(Detail::Text(text))) => ApiError::Server {
                status,
                detail: Some(text),
            },
            (status, _) => ApiError::Server {
                status,
                detail: None,
            },
        }
    }

    /// Same as `from_response`, but with an entity-specific 404 message
    pub fn from_response_for(response: &RawResponse, entity: &str) -> Self {
        match Self::from_response(response) {
            ApiError::NotFound(_) => ApiError::NotFound(format!("{} not found.", entity)),
            other => other,
        }
    }
}

/// FastAPI-style error body: `{"detail": "..."}` or `{"detail": [{loc, msg}]}`
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<Detail>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Detail {
    Text(String),
    Fields(Vec<FieldError>),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FieldError {
    #[serde(default)]
    pub loc: Vec<Value>,
    #[serde(default)]
    pub msg: String,
}

impl FieldError {
    /// Last path segment of `loc` (`["body", "title"]` -> `title`)
    pub fn field(&self) -> Option<String> {
        self.loc.last().map(|segment| match segment {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}

/// `title: field required; email: value is not a valid email address`
pub fn join_field_errors(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(|err| match err.field() {
            Some(field) => format!("{}: {}", field, err.msg),
            None => err.msg.clone(),
        })
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_401_is_unauthorized_regardless_of_body() {
        let err = ApiError::from_response(&RawResponse::new(401, "not json"));
        assert!(err.is_unauthorized());
    }

    #[test]
    fn test_validation_array_is_joined() {
        let body = r#"{"detail": [
            {"loc": ["body", "title"], "msg": "field required", "type": "missing"},
            {"loc": ["body", "items", 0], "msg": "bad item"}
        ]}"#;
        let err = ApiError::from_response(&RawResponse::new(422, body));
        assert_eq!(
            err,
            ApiError::Validation("title: field required; 0: bad item".to_string())
        );
    }

    #[test]
    fn test_server_detail_text_is_kept() {
        let err = ApiError::from_response(&RawResponse::new(403, r#"{"detail": "Not the owner"}"#));
        assert_eq!(err.to_string(), "Not the owner");
    }

    #[test]
    fn test_server_without_detail_falls_back() {
        let err = ApiError::from_response(&RawResponse::new(500, "<html>oops</html>"));
        assert_eq!(err, ApiError::Server { status: 500, detail: None });
        assert_eq!(err.to_string(), "Server error (500).");
    }

    #[test]
    fn test_not_found_uses_entity_name() {
        let err = ApiError::from_response_for(&RawResponse::new(404, ""), "Project");
        assert_eq!(err.to_string(), "Project not found.");
    }

    #[test]
    fn test_validation_error_passes_through() {
        let err: ApiError = ValidationError::InvalidEmail.into();
        assert_eq!(err.to_string(), "Please enter a valid email address.");
    }
}
