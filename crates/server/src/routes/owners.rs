use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::Response,
    Json,
};
use serde::Deserialize;
use tracing::info;

use service::authz::policy;
use service::domain::{Owner, Pet};
use service::gateway;

use crate::errors::ApiError;
use crate::routes::auth::{Caller, ServerState};
use crate::routes::respond::{created, non_empty, parse, validated};

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct OwnerQuery {
    /// Case-sensitive last-name prefix.
    pub last_name: Option<String>,
}

#[utoipa::path(
    get, path = "/api/owners", tag = "owners",
    params(OwnerQuery),
    responses(
        (status = 200, description = "Owners with pets, types and visits", body = [Owner]),
        (status = 404, description = "No matching owners")
    ),
    security(("bearer" = []))
)]
pub async fn list(
    caller: Caller,
    State(state): State<ServerState>,
    Query(q): Query<OwnerQuery>,
) -> Result<Json<Vec<Owner>>, ApiError> {
    caller.require(&policy::OWNER_ADMIN)?;
    let owners = match q.last_name.as_deref() {
        Some(prefix) => gateway::owner::find_by_last_name(&state.db, prefix).await?,
        None => gateway::owner::list_all(&state.db).await?,
    };
    non_empty(owners, "owners")
}

#[utoipa::path(
    get, path = "/api/owners/{ownerId}", tag = "owners",
    params(("ownerId" = i32, Path, description = "Owner id")),
    responses(
        (status = 200, description = "Owner", body = Owner),
        (status = 404, description = "Not Found")
    ),
    security(("bearer" = []))
)]
pub async fn find(caller: Caller, State(state): State<ServerState>, Path(id): Path<i32>) -> Result<Json<Owner>, ApiError> {
    caller.require(&policy::OWNER_ADMIN)?;
    Ok(Json(gateway::owner::find_by_id(&state.db, id).await?))
}

#[utoipa::path(
    post, path = "/api/owners", tag = "owners",
    request_body = Owner,
    responses(
        (status = 201, description = "Created", body = Owner),
        (status = 400, description = "Validation failed; see the `errors` header")
    ),
    security(("bearer" = []))
)]
pub async fn create(
    caller: Caller,
    State(state): State<ServerState>,
    body: Result<Json<Owner>, JsonRejection>,
) -> Result<Response, ApiError> {
    caller.require(&policy::OWNER_ADMIN)?;
    let payload = validated(parse(body)?)?;
    let saved = gateway::owner::save(&state.db, &Owner { id: None, pets: Vec::new(), ..payload }).await?;
    let id = saved.id.unwrap_or_default();
    info!(id, "owner added");
    Ok(created(format!("/api/owners/{id}"), saved))
}

#[utoipa::path(
    put, path = "/api/owners/{ownerId}", tag = "owners",
    params(("ownerId" = i32, Path, description = "Owner id")),
    request_body = Owner,
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
    body: Result<Json<Owner>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    caller.require(&policy::OWNER_ADMIN)?;
    let payload = validated(parse(body)?)?;
    let mut current = gateway::owner::find_by_id(&state.db, id).await?;
    current.first_name = payload.first_name;
    current.last_name = payload.last_name;
    current.address = payload.address;
    current.city = payload.city;
    current.telephone = payload.telephone;
    gateway::owner::save(&state.db, &current).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete, path = "/api/owners/{ownerId}", tag = "owners",
    params(("ownerId" = i32, Path, description = "Owner id")),
    responses(
        (status = 204, description = "Deleted with pets and visits"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer" = []))
)]
pub async fn remove(caller: Caller, State(state): State<ServerState>, Path(id): Path<i32>) -> Result<StatusCode, ApiError> {
    caller.require(&policy::OWNER_ADMIN)?;
    let current = gateway::owner::find_by_id(&state.db, id).await?;
    let summary = gateway::owner::delete(&state.db, &current).await?;
    info!(id, pets = summary.pets, visits = summary.visits, "owner removed");
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post, path = "/api/owners/{ownerId}/pets", tag = "owners",
    params(("ownerId" = i32, Path, description = "Owner id")),
    request_body = Pet,
    responses(
        (status = 201, description = "Pet added to owner", body = Pet),
        (status = 400, description = "Validation failed; see the `errors` header"),
        (status = 404, description = "Owner or pet type not found")
    ),
    security(("bearer" = []))
)]
pub async fn add_pet(
    caller: Caller,
    State(state): State<ServerState>,
    Path(owner_id): Path<i32>,
    body: Result<Json<Pet>, JsonRejection>,
) -> Result<Response, ApiError> {
    caller.require(&policy::OWNER_ADMIN)?;
    let payload = validated(parse(body)?)?;
    let owner = gateway::owner::find_by_id(&state.db, owner_id).await?;
    let pet = Pet { id: None, owner_id: owner.id, visits: Vec::new(), ..payload };
    let saved = gateway::pet::save(&state.db, &pet).await?;
    let id = saved.id.unwrap_or_default();
    info!(id, owner_id, "pet added");
    Ok(created(format!("/api/pets/{id}"), saved))
}
