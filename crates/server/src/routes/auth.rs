use std::collections::BTreeSet;
use std::sync::Arc;

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequestParts, State},
    http::{header::AUTHORIZATION, request::Parts},
    Json,
};
use sea_orm::DatabaseConnection;
use tracing::{debug, warn};

use service::auth::domain::{AuthSession, LoginInput};
use service::auth::repo::SeaOrmAuthRepository;
use service::auth::AuthService;
use service::authz::{authorize, Role, RolePredicate};
use service::errors::ServiceError;

use crate::errors::ApiError;
use crate::routes::respond::parse;

#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub auth: Arc<AuthService<SeaOrmAuthRepository>>,
    /// When false every caller holds every role.
    pub security_enabled: bool,
}

/// The authenticated principal of a request, decoded from `Authorization: Bearer`.
#[derive(Debug, Clone)]
pub struct Caller {
    pub username: String,
    pub roles: BTreeSet<Role>,
}

impl Caller {
    fn unsecured() -> Self {
        Self { username: "anonymous".into(), roles: Role::ALL.into_iter().collect() }
    }

    /// Role guard; handlers call it before touching the payload or the store.
    pub fn require(&self, predicate: &RolePredicate) -> Result<(), ApiError> {
        authorize(&self.roles, predicate).map_err(|e| {
            warn!(username = %self.username, %predicate, "access denied");
            ApiError::from(e)
        })
    }
}

#[async_trait]
impl FromRequestParts<ServerState> for Caller {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &ServerState) -> Result<Self, Self::Rejection> {
        if !state.security_enabled {
            return Ok(Caller::unsecured());
        }
        let path = parts.uri.path().to_string();
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                debug!(%path, "missing Authorization header");
                ServiceError::Unauthorized
            })?;
        let token = header.strip_prefix("Bearer ").ok_or_else(|| {
            warn!(%path, "invalid Authorization format (expect Bearer)");
            ServiceError::Unauthorized
        })?;
        let claims = state.auth.verify_token(token.trim()).map_err(|e| {
            warn!(%path, err = %e, "token validation failed");
            ServiceError::Unauthorized
        })?;
        Ok(Caller { username: claims.sub, roles: claims.roles })
    }
}

#[utoipa::path(
    post, path = "/auth/login", tag = "auth",
    request_body = LoginInput,
    responses(
        (status = 200, description = "Logged in", body = AuthSession),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<ServerState>,
    body: Result<Json<LoginInput>, JsonRejection>,
) -> Result<Json<AuthSession>, ApiError> {
    let input = parse(body)?;
    let session = state.auth.login(input).await.map_err(ServiceError::from)?;
    Ok(Json(session))
}
