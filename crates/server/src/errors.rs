use axum::http::{header, HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::ErrorBody;
use service::errors::ServiceError;
use service::validation::Violations;
use thiserror::Error;
use tracing::{debug, error};

/// Response header carrying the violation map of a rejected payload.
pub const ERRORS_HEADER: HeaderName = HeaderName::from_static("errors");

/// Failure of a request, rendered as status code, headers and JSON body.
#[derive(Debug)]
pub enum ApiError {
    Service(ServiceError),
    /// Payload failed validation; the body echoes what was submitted.
    Invalid { violations: Violations, payload: serde_json::Value },
}

impl ApiError {
    pub fn invalid<T: serde::Serialize>(violations: Violations, payload: &T) -> Self {
        let payload = serde_json::to_value(payload).unwrap_or(serde_json::Value::Null);
        Self::Invalid { violations, payload }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Invalid { .. } => StatusCode::BAD_REQUEST,
            ApiError::Service(e) => match e {
                ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
                ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
                ServiceError::Unauthorized => StatusCode::UNAUTHORIZED,
                ServiceError::Forbidden(_) => StatusCode::FORBIDDEN,
                ServiceError::Conflict(_) => StatusCode::CONFLICT,
                ServiceError::Db(_) | ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        ApiError::Service(e)
    }
}

/// Violation map as a header value. Non-ASCII text is `\u` escaped so the
/// value stays valid JSON and a valid header.
pub fn violations_header(v: &Violations) -> HeaderValue {
    let json = serde_json::to_string(v).unwrap_or_else(|_| "{}".to_string());
    let mut ascii = String::with_capacity(json.len());
    for c in json.chars() {
        if c.is_ascii() && !c.is_ascii_control() {
            ascii.push(c);
        } else {
            let mut buf = [0u16; 2];
            for unit in c.encode_utf16(&mut buf) {
                ascii.push_str(&format!("\\u{unit:04x}"));
            }
        }
    }
    HeaderValue::from_str(&ascii).unwrap_or_else(|_| HeaderValue::from_static("{}"))
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ApiError::Invalid { violations, payload } => {
                debug!(%violations, "payload rejected");
                let mut resp = (status, Json(payload)).into_response();
                resp.headers_mut().insert(ERRORS_HEADER, violations_header(&violations));
                resp
            }
            ApiError::Service(ServiceError::Validation(violations)) => {
                debug!(%violations, "payload rejected");
                let body = ErrorBody::new("Bad Request", Some(violations.to_string()));
                let mut resp = (status, Json(body)).into_response();
                resp.headers_mut().insert(ERRORS_HEADER, violations_header(&violations));
                resp
            }
            ApiError::Service(ServiceError::NotFound(msg)) => {
                debug!(%msg, "not found");
                status.into_response()
            }
            ApiError::Service(e @ ServiceError::Unauthorized) => {
                let body = ErrorBody::new("Unauthorized", Some(e.to_string()));
                (status, [(header::WWW_AUTHENTICATE, "Bearer")], Json(body)).into_response()
            }
            ApiError::Service(e @ ServiceError::Forbidden(_)) => {
                (status, Json(ErrorBody::new("Forbidden", Some(e.to_string())))).into_response()
            }
            ApiError::Service(e @ ServiceError::Conflict(_)) => {
                (status, Json(ErrorBody::new("Conflict", Some(e.to_string())))).into_response()
            }
            ApiError::Service(e) => {
                error!(error = %e, "request failed");
                (status, Json(ErrorBody::new("Internal Server Error", Some(e.to_string())))).into_response()
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
    #[error("bootstrap failed: {0}")]
    Bootstrap(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
