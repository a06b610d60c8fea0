use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Response,
    Json,
};
use tracing::info;

use service::authz::policy;
use service::domain::{Pet, Visit};
use service::gateway;

use crate::errors::ApiError;
use crate::routes::auth::{Caller, ServerState};
use crate::routes::respond::{created, non_empty, parse, validated};

#[utoipa::path(
    get, path = "/api/pets", tag = "pets",
    responses(
        (status = 200, description = "All pets with type and visits", body = [Pet]),
        (status = 404, description = "No pets stored")
    ),
    security(("bearer" = []))
)]
pub async fn list(caller: Caller, State(state): State<ServerState>) -> Result<Json<Vec<Pet>>, ApiError> {
    caller.require(&policy::OWNER_ADMIN)?;
    non_empty(gateway::pet::list_all(&state.db).await?, "pets")
}

#[utoipa::path(
    get, path = "/api/pets/{petId}", tag = "pets",
    params(("petId" = i32, Path, description = "Pet id")),
    responses(
        (status = 200, description = "Pet", body = Pet),
        (status = 404, description = "Not Found")
    ),
    security(("bearer" = []))
)]
pub async fn find(caller: Caller, State(state): State<ServerState>, Path(id): Path<i32>) -> Result<Json<Pet>, ApiError> {
    caller.require(&policy::OWNER_ADMIN)?;
    Ok(Json(gateway::pet::find_by_id(&state.db, id).await?))
}

#[utoipa::path(
    put, path = "/api/pets/{petId}", tag = "pets",
    params(("petId" = i32, Path, description = "Pet id")),
    request_body = Pet,
    responses(
        (status = 204, description = "Updated"),
        (status = 400, description = "Validation failed; see the `errors` header"),
        (status = 404, description = "Pet or pet type not found")
    ),
    security(("bearer" = []))
)]
pub async fn update(
    caller: Caller,
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    body: Result<Json<Pet>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    caller.require(&policy::OWNER_ADMIN)?;
    let payload = validated(parse(body)?)?;
    let mut current = gateway::pet::find_by_id(&state.db, id).await?;
    current.name = payload.name;
    current.birth_date = payload.birth_date;
    current.pet_type = payload.pet_type;
    gateway::pet::save(&state.db, &current).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete, path = "/api/pets/{petId}", tag = "pets",
    params(("petId" = i32, Path, description = "Pet id")),
    responses(
        (status = 204, description = "Deleted with its visits"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer" = []))
)]
pub async fn remove(caller: Caller, State(state): State<ServerState>, Path(id): Path<i32>) -> Result<StatusCode, ApiError> {
    caller.require(&policy::OWNER_ADMIN)?;
    let current = gateway::pet::find_by_id(&state.db, id).await?;
    gateway::pet::delete(&state.db, &current).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post, path = "/api/pets/{petId}/visits", tag = "pets",
    params(("petId" = i32, Path, description = "Pet id")),
    request_body = Visit,
    responses(
        (status = 201, description = "Visit added to pet", body = Visit),
        (status = 400, description = "Validation failed; see the `errors` header"),
        (status = 404, description = "Pet not found")
    ),
    security(("bearer" = []))
)]
pub async fn add_visit(
    caller: Caller,
    State(state): State<ServerState>,
    Path(pet_id): Path<i32>,
    body: Result<Json<Visit>, JsonRejection>,
) -> Result<Response, ApiError> {
    caller.require(&policy::OWNER_ADMIN)?;
    let payload = validated(parse(body)?)?;
    let pet = gateway::pet::find_by_id(&state.db, pet_id).await?;
    let saved = gateway::visit::save(&state.db, &Visit { id: None, pet_id: pet.id, ..payload }).await?;
    let id = saved.id.unwrap_or_default();
    info!(id, pet_id, "visit added");
    Ok(created(format!("/api/visits/{id}"), saved))
}
