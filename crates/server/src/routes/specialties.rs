use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Response,
    Json,
};

use service::authz::policy;
use service::domain::Specialty;
use service::gateway;

use crate::errors::ApiError;
use crate::routes::auth::{Caller, ServerState};
use crate::routes::respond::{created, non_empty, parse, validated};

#[utoipa::path(
    get, path = "/api/specialties", tag = "specialties",
    responses(
        (status = 200, description = "All specialties", body = [Specialty]),
        (status = 404, description = "No specialties stored")
    ),
    security(("bearer" = []))
)]
pub async fn list(caller: Caller, State(state): State<ServerState>) -> Result<Json<Vec<Specialty>>, ApiError> {
    caller.require(&policy::VET_ADMIN)?;
    non_empty(gateway::specialty::list_all(&state.db).await?, "specialties")
}

#[utoipa::path(
    get, path = "/api/specialties/{specialtyId}", tag = "specialties",
    params(("specialtyId" = i32, Path, description = "Specialty id")),
    responses(
        (status = 200, description = "Specialty", body = Specialty),
        (status = 404, description = "Not Found")
    ),
    security(("bearer" = []))
)]
pub async fn find(caller: Caller, State(state): State<ServerState>, Path(id): Path<i32>) -> Result<Json<Specialty>, ApiError> {
    caller.require(&policy::VET_ADMIN)?;
    Ok(Json(gateway::specialty::find_by_id(&state.db, id).await?))
}

#[utoipa::path(
    post, path = "/api/specialties", tag = "specialties",
    request_body = Specialty,
    responses(
        (status = 201, description = "Created", body = Specialty),
        (status = 400, description = "Validation failed; see the `errors` header")
    ),
    security(("bearer" = []))
)]
pub async fn create(
    caller: Caller,
    State(state): State<ServerState>,
    body: Result<Json<Specialty>, JsonRejection>,
) -> Result<Response, ApiError> {
    caller.require(&policy::VET_ADMIN)?;
    let payload = validated(parse(body)?)?;
    let saved = gateway::specialty::save(&state.db, &Specialty { id: None, ..payload }).await?;
    Ok(created(format!("/api/specialties/{}", saved.id.unwrap_or_default()), saved))
}

#[utoipa::path(
    put, path = "/api/specialties/{specialtyId}", tag = "specialties",
    params(("specialtyId" = i32, Path, description = "Specialty id")),
    request_body = Specialty,
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
    body: Result<Json<Specialty>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    caller.require(&policy::VET_ADMIN)?;
    let payload = validated(parse(body)?)?;
    let mut current = gateway::specialty::find_by_id(&state.db, id).await?;
    current.name = payload.name;
    gateway::specialty::save(&state.db, &current).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete, path = "/api/specialties/{specialtyId}", tag = "specialties",
    params(("specialtyId" = i32, Path, description = "Specialty id")),
    responses(
        (status = 204, description = "Deleted and unlinked from vets"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer" = []))
)]
pub async fn remove(caller: Caller, State(state): State<ServerState>, Path(id): Path<i32>) -> Result<StatusCode, ApiError> {
    caller.require(&policy::VET_ADMIN)?;
    let current = gateway::specialty::find_by_id(&state.db, id).await?;
    gateway::specialty::delete(&state.db, &current).await?;
    Ok(StatusCode::NO_CONTENT)
}
