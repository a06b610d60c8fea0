use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Response,
    Json,
};
use tracing::info;

use service::authz::policy;
use service::domain::PetType;
use service::gateway;

use crate::errors::ApiError;
use crate::routes::auth::{Caller, ServerState};
use crate::routes::respond::{created, non_empty, parse, validated};

#[utoipa::path(
    get, path = "/api/pettypes", tag = "pettypes",
    responses(
        (status = 200, description = "All pet types", body = [PetType]),
        (status = 404, description = "No pet types stored")
    ),
    security(("bearer" = []))
)]
pub async fn list(caller: Caller, State(state): State<ServerState>) -> Result<Json<Vec<PetType>>, ApiError> {
    caller.require(&policy::PET_TYPES_READ)?;
    non_empty(gateway::pet_type::list_all(&state.db).await?, "pet types")
}

#[utoipa::path(
    get, path = "/api/pettypes/{petTypeId}", tag = "pettypes",
    params(("petTypeId" = i32, Path, description = "Pet type id")),
    responses(
        (status = 200, description = "Pet type", body = PetType),
        (status = 404, description = "Not Found")
    ),
    security(("bearer" = []))
)]
pub async fn find(caller: Caller, State(state): State<ServerState>, Path(id): Path<i32>) -> Result<Json<PetType>, ApiError> {
    caller.require(&policy::PET_TYPES_READ)?;
    Ok(Json(gateway::pet_type::find_by_id(&state.db, id).await?))
}

#[utoipa::path(
    post, path = "/api/pettypes", tag = "pettypes",
    request_body = PetType,
    responses(
        (status = 201, description = "Created", body = PetType),
        (status = 400, description = "Validation failed; see the `errors` header")
    ),
    security(("bearer" = []))
)]
pub async fn create(
    caller: Caller,
    State(state): State<ServerState>,
    body: Result<Json<PetType>, JsonRejection>,
) -> Result<Response, ApiError> {
    caller.require(&policy::PET_TYPES_WRITE)?;
    let payload = validated(parse(body)?)?;
    let saved = gateway::pet_type::save(&state.db, &PetType { id: None, ..payload }).await?;
    let id = saved.id.unwrap_or_default();
    info!(id, "pet type added");
    Ok(created(format!("/api/pettypes/{id}"), saved))
}

#[utoipa::path(
    put, path = "/api/pettypes/{petTypeId}", tag = "pettypes",
    params(("petTypeId" = i32, Path, description = "Pet type id")),
    request_body = PetType,
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
    body: Result<Json<PetType>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    caller.require(&policy::PET_TYPES_WRITE)?;
    let payload = validated(parse(body)?)?;
    let mut current = gateway::pet_type::find_by_id(&state.db, id).await?;
    current.name = payload.name;
    gateway::pet_type::save(&state.db, &current).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete, path = "/api/pettypes/{petTypeId}", tag = "pettypes",
    params(("petTypeId" = i32, Path, description = "Pet type id")),
    responses(
        (status = 204, description = "Deleted with its pets and their visits"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer" = []))
)]
pub async fn remove(caller: Caller, State(state): State<ServerState>, Path(id): Path<i32>) -> Result<StatusCode, ApiError> {
    caller.require(&policy::PET_TYPES_WRITE)?;
    let current = gateway::pet_type::find_by_id(&state.db, id).await?;
    let summary = gateway::pet_type::delete(&state.db, &current).await?;
    info!(id, pets = summary.pets, visits = summary.visits, "pet type removed");
    Ok(StatusCode::NO_CONTENT)
}
