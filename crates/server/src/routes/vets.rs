use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Response,
    Json,
};
use tracing::info;

use service::authz::policy;
use service::domain::Vet;
use service::gateway;

use crate::errors::ApiError;
use crate::routes::auth::{Caller, ServerState};
use crate::routes::respond::{created, non_empty, parse, validated};

#[utoipa::path(
    get, path = "/api/vets", tag = "vets",
    responses(
        (status = 200, description = "All vets with their specialties", body = [Vet]),
        (status = 404, description = "No vets stored")
    ),
    security(("bearer" = []))
)]
pub async fn list(caller: Caller, State(state): State<ServerState>) -> Result<Json<Vec<Vet>>, ApiError> {
    caller.require(&policy::VET_ADMIN)?;
    non_empty(gateway::vet::list_all(&state.db).await?, "vets")
}

#[utoipa::path(
    get, path = "/api/vets/{vetId}", tag = "vets",
    params(("vetId" = i32, Path, description = "Vet id")),
    responses(
        (status = 200, description = "Vet", body = Vet),
        (status = 404, description = "Not Found")
    ),
    security(("bearer" = []))
)]
pub async fn find(caller: Caller, State(state): State<ServerState>, Path(id): Path<i32>) -> Result<Json<Vet>, ApiError> {
    caller.require(&policy::VET_ADMIN)?;
    Ok(Json(gateway::vet::find_by_id(&state.db, id).await?))
}

#[utoipa::path(
    post, path = "/api/vets", tag = "vets",
    request_body = Vet,
    responses(
        (status = 201, description = "Created", body = Vet),
        (status = 400, description = "Validation failed; see the `errors` header")
    ),
    security(("bearer" = []))
)]
pub async fn create(
    caller: Caller,
    State(state): State<ServerState>,
    body: Result<Json<Vet>, JsonRejection>,
) -> Result<Response, ApiError> {
    caller.require(&policy::VET_ADMIN)?;
    let payload = validated(parse(body)?)?;
    let saved = gateway::vet::save(&state.db, &Vet { id: None, ..payload }).await?;
    let id = saved.id.unwrap_or_default();
    info!(id, specialties = saved.specialties.len(), "vet added");
    Ok(created(format!("/api/vets/{id}"), saved))
}

#[utoipa::path(
    put, path = "/api/vets/{vetId}", tag = "vets",
    params(("vetId" = i32, Path, description = "Vet id")),
    request_body = Vet,
    responses(
        (status = 204, description = "Updated; specialty links replaced"),
        (status = 400, description = "Validation failed; see the `errors` header"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer" = []))
)]
pub async fn update(
    caller: Caller,
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    body: Result<Json<Vet>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    caller.require(&policy::VET_ADMIN)?;
    let payload = validated(parse(body)?)?;
    let mut current = gateway::vet::find_by_id(&state.db, id).await?;
    current.first_name = payload.first_name;
    current.last_name = payload.last_name;
    current.specialties = payload.specialties;
    gateway::vet::save(&state.db, &current).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete, path = "/api/vets/{vetId}", tag = "vets",
    params(("vetId" = i32, Path, description = "Vet id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer" = []))
)]
pub async fn remove(caller: Caller, State(state): State<ServerState>, Path(id): Path<i32>) -> Result<StatusCode, ApiError> {
    caller.require(&policy::VET_ADMIN)?;
    let current = gateway::vet::find_by_id(&state.db, id).await?;
    gateway::vet::delete(&state.db, &current).await?;
    Ok(StatusCode::NO_CONTENT)
}
