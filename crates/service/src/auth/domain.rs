use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::authz::Role;

/// Account creation payload. Role names may carry a `ROLE_` prefix.
/// The password is accepted but never serialized back.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    #[serde(default)]
    pub username: String,
    #[serde(default, skip_serializing)]
    pub password: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub roles: Vec<String>,
}

fn default_enabled() -> bool { true }

impl NewUser {
    /// Parsed roles; unknown names are dropped (validation reports them).
    pub fn parsed_roles(&self) -> BTreeSet<Role> {
        self.roles.iter().filter_map(|r| r.parse().ok()).collect()
    }
}

/// Login input
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

/// Domain user (business view); the password hash never leaves the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AuthUser {
    pub username: String,
    pub enabled: bool,
    pub roles: BTreeSet<Role>,
}

/// Domain credentials (hashed)
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password_hash: String,
}

/// Login result (session)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthSession {
    pub token: String,
    pub username: String,
    pub roles: BTreeSet<Role>,
}

/// Bearer token claims (HS256).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub roles: BTreeSet<Role>,
    pub iat: i64,
    pub exp: i64,
}
