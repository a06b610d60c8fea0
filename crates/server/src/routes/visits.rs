use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use service::authz::policy;
use service::domain::Visit;
use service::gateway;

use crate::errors::ApiError;
use crate::routes::auth::{Caller, ServerState};
use crate::routes::respond::{non_empty, parse, validated};

#[utoipa::path(
    get, path = "/api/visits", tag = "visits",
    responses(
        (status = 200, description = "All visits", body = [Visit]),
        (status = 404, description = "No visits stored")
    ),
    security(("bearer" = []))
)]
pub async fn list(caller: Caller, State(state): State<ServerState>) -> Result<Json<Vec<Visit>>, ApiError> {
    caller.require(&policy::OWNER_ADMIN)?;
    non_empty(gateway::visit::list_all(&state.db).await?, "visits")
}

#[utoipa::path(
    get, path = "/api/visits/{visitId}", tag = "visits",
    params(("visitId" = i32, Path, description = "Visit id")),
    responses(
        (status = 200, description = "Visit", body = Visit),
        (status = 404, description = "Not Found")
    ),
    security(("bearer" = []))
)]
pub async fn find(caller: Caller, State(state): State<ServerState>, Path(id): Path<i32>) -> Result<Json<Visit>, ApiError> {
    caller.require(&policy::OWNER_ADMIN)?;
    Ok(Json(gateway::visit::find_by_id(&state.db, id).await?))
}

/// The visit stays with its pet; a missing date keeps the stored one.
#[utoipa::path(
    put, path = "/api/visits/{visitId}", tag = "visits",
    params(("visitId" = i32, Path, description = "Visit id")),
    request_body = Visit,
    responses(
        (status = 204, description = "Updated"),
        (status = 400, description = "Validation failed; see the `errors` header"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer" = []))
)]
pub async fn update(
    caller: Caller,
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    body: Result<Json<Visit>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    caller.require(&policy::OWNER_ADMIN)?;
    let payload = validated(parse(body)?)?;
    let mut current = gateway::visit::find_by_id(&state.db, id).await?;
    current.date = payload.date.or(current.date);
    current.description = payload.description;
    gateway::visit::save(&state.db, &current).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete, path = "/api/visits/{visitId}", tag = "visits",
    params(("visitId" = i32, Path, description = "Visit id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer" = []))
)]
pub async fn remove(caller: Caller, State(state): State<ServerState>, Path(id): Path<i32>) -> Result<StatusCode, ApiError> {
    caller.require(&policy::OWNER_ADMIN)?;
    let current = gateway::visit::find_by_id(&state.db, id).await?;
    gateway::visit::delete(&state.db, &current).await?;
    Ok(StatusCode::NO_CONTENT)
}
