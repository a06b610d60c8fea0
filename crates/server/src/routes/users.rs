use axum::{
    extract::{rejection::JsonRejection, State},
    response::Response,
    Json,
};

use service::auth::domain::NewUser;
use service::authz::policy;
use service::errors::ServiceError;

use crate::errors::ApiError;
use crate::routes::auth::{Caller, ServerState};
use crate::routes::respond::{created, parse, validated};

#[utoipa::path(
    post, path = "/api/users", tag = "users",
    request_body = NewUser,
    responses(
        (status = 201, description = "Created; the password is never returned", body = AuthUser),
        (status = 400, description = "Validation failed; see the `errors` header"),
        (status = 409, description = "Username taken")
    ),
    security(("bearer" = []))
)]
pub async fn create(
    caller: Caller,
    State(state): State<ServerState>,
    body: Result<Json<NewUser>, JsonRejection>,
) -> Result<Response, ApiError> {
    caller.require(&policy::USER_ADMIN)?;
    let payload = validated(parse(body)?)?;
    let user = state.auth.create_user(payload).await.map_err(ServiceError::from)?;
    Ok(created(format!("/api/users/{}", user.username), user))
}
