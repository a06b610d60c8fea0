//! Shared request/response shaping for the resource handlers.

use axum::{
    extract::rejection::JsonRejection,
    http::{header::LOCATION, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use service::errors::ServiceError;
use service::validation::{Validate, Violations};

use crate::errors::ApiError;

/// Unwraps a JSON body; an unparseable body is a violation on the empty path.
pub fn parse<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    match body {
        Ok(Json(v)) => Ok(v),
        Err(rejection) => Err(ServiceError::Validation(Violations::single("", rejection.body_text())).into()),
    }
}

/// Passes the payload through when it has no violations.
pub fn validated<T: Validate + Serialize>(payload: T) -> Result<T, ApiError> {
    let violations = payload.validate();
    if violations.is_empty() {
        Ok(payload)
    } else {
        Err(ApiError::invalid(violations, &payload))
    }
}

/// 201 with a `Location` header pointing at the new resource.
pub fn created<T: Serialize>(location: String, body: T) -> Response {
    (StatusCode::CREATED, [(LOCATION, location)], Json(body)).into_response()
}

/// Collection reads answer 404 instead of an empty list.
pub fn non_empty<T>(items: Vec<T>, what: &str) -> Result<Json<Vec<T>>, ApiError> {
    if items.is_empty() {
        Err(ServiceError::NotFound(format!("no {what} stored")).into())
    } else {
        Ok(Json(items))
    }
}
