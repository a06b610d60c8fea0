pub mod auth;
pub mod owners;
pub mod pet_types;
pub mod pets;
pub mod respond;
pub mod specialties;
pub mod users;
pub mod vets;
pub mod visits;

use axum::{
    http::{header, HeaderName},
    response::Redirect,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::errors::ERRORS_HEADER;
use crate::openapi::ApiDoc;
use auth::ServerState;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "Service is up")))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn root() -> Redirect {
    Redirect::temporary("/swagger-ui/")
}

/// CORS for browser clients; validation failures travel in the `errors` header.
pub fn build_cors() -> CorsLayer {
    let exposed: [HeaderName; 3] = [ERRORS_HEADER, header::CONTENT_TYPE, header::LOCATION];
    CorsLayer::very_permissive().expose_headers(exposed)
}

fn api_routes() -> Router<ServerState> {
    Router::new()
        .route("/api/pettypes", get(pet_types::list).post(pet_types::create))
        .route(
            "/api/pettypes/:id",
            get(pet_types::find).put(pet_types::update).delete(pet_types::remove),
        )
        .route("/api/specialties", get(specialties::list).post(specialties::create))
        .route(
            "/api/specialties/:id",
            get(specialties::find).put(specialties::update).delete(specialties::remove),
        )
        .route("/api/vets", get(vets::list).post(vets::create))
        .route("/api/vets/:id", get(vets::find).put(vets::update).delete(vets::remove))
        .route("/api/owners", get(owners::list).post(owners::create))
        .route("/api/owners/:id", get(owners::find).put(owners::update).delete(owners::remove))
        .route("/api/owners/:id/pets", post(owners::add_pet))
        .route("/api/pets", get(pets::list))
        .route("/api/pets/:id", get(pets::find).put(pets::update).delete(pets::remove))
        .route("/api/pets/:id/visits", post(pets::add_visit))
        .route("/api/visits", get(visits::list))
        .route("/api/visits/:id", get(visits::find).put(visits::update).delete(visits::remove))
        .route("/api/users", post(users::create))
}

/// Build the full application router: docs, health, login and the clinic API.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/auth/login", post(auth::login));

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(public.merge(api_routes()).with_state(state))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
