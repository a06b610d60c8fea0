use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use service::auth::domain::{AuthSession, AuthUser, LoginInput, NewUser};
use service::authz::Role;
use service::domain::{Owner, Pet, PetType, Specialty, Vet, Visit};

#[derive(utoipa::ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(utoipa::ToSchema)]
pub struct ErrorResponse { pub error: String, pub message: Option<String> }

/// Registers the `bearer` scheme referenced by the protected operations.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Token issued by POST /auth/login."))
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(title = "Pet clinic REST API", description = "Owners, pets, visits, vets and their lookups."),
    paths(
        crate::routes::health,
        crate::routes::auth::login,
        crate::routes::pet_types::list,
        crate::routes::pet_types::find,
        crate::routes::pet_types::create,
        crate::routes::pet_types::update,
        crate::routes::pet_types::remove,
        crate::routes::specialties::list,
        crate::routes::specialties::find,
        crate::routes::specialties::create,
        crate::routes::specialties::update,
        crate::routes::specialties::remove,
        crate::routes::vets::list,
        crate::routes::vets::find,
        crate::routes::vets::create,
        crate::routes::vets::update,
        crate::routes::vets::remove,
        crate::routes::owners::list,
        crate::routes::owners::find,
        crate::routes::owners::create,
        crate::routes::owners::update,
        crate::routes::owners::remove,
        crate::routes::owners::add_pet,
        crate::routes::pets::list,
        crate::routes::pets::find,
        crate::routes::pets::update,
        crate::routes::pets::remove,
        crate::routes::pets::add_visit,
        crate::routes::visits::list,
        crate::routes::visits::find,
        crate::routes::visits::update,
        crate::routes::visits::remove,
        crate::routes::users::create,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorResponse,
            PetType,
            Specialty,
            Vet,
            Owner,
            Pet,
            Visit,
            Role,
            NewUser,
            AuthUser,
            LoginInput,
            AuthSession,
        )
    ),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "pettypes"),
        (name = "specialties"),
        (name = "vets"),
        (name = "owners"),
        (name = "pets"),
        (name = "visits"),
        (name = "users")
    )
)]
pub struct ApiDoc;
