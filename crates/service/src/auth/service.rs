use std::collections::BTreeSet;
use std::sync::Arc;

use argon2::{
    password_hash::{PasswordHasher, PasswordVerifier, SaltString},
    Argon2, PasswordHash,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header as JwtHeader, Validation};
use rand::rngs::OsRng;
use tracing::{debug, info, instrument, warn};

use super::domain::{AuthSession, AuthUser, Claims, LoginInput, NewUser};
use super::errors::AuthError;
use super::repository::AuthRepository;
use crate::authz::Role;
use crate::validation::Validate;

/// Auth service configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_minutes: i64,
}

/// Auth business service independent of web framework
pub struct AuthService<R: AuthRepository> {
    repo: Arc<R>,
    cfg: AuthConfig,
}

impl<R: AuthRepository> AuthService<R> {
    pub fn new(repo: Arc<R>, cfg: AuthConfig) -> Self { Self { repo, cfg } }

    /// Create an account with an argon2-hashed password.
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn create_user(&self, input: NewUser) -> Result<AuthUser, AuthError> {
        let violations = input.validate();
        if !violations.is_empty() {
            return Err(AuthError::Validation(violations));
        }
        if self.repo.find_user(&input.username).await?.is_some() {
            debug!("user exists");
            return Err(AuthError::Conflict);
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(input.password.as_bytes(), &salt)
            .map_err(|e| AuthError::HashError(e.to_string()))?
            .to_string();

        let user = AuthUser { roles: input.parsed_roles(), username: input.username, enabled: input.enabled };
        let created = self.repo.create_user(&user, hash).await?;
        info!(username = %created.username, roles = created.roles.len(), "user_created");
        Ok(created)
    }

    /// Creates the account with every role unless the username is taken.
    /// Returns whether a user was created.
    #[instrument(skip(self, password))]
    pub async fn ensure_user(&self, username: &str, password: &str) -> Result<bool, AuthError> {
        if self.repo.find_user(username).await?.is_some() {
            return Ok(false);
        }
        let input = NewUser {
            username: username.to_string(),
            password: password.to_string(),
            enabled: true,
            roles: Role::ALL.iter().map(|r| r.as_str().to_string()).collect(),
        };
        match self.create_user(input).await {
            Ok(_) => Ok(true),
            Err(AuthError::Conflict) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Authenticate a user and issue a bearer token.
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let cred = self.repo
            .get_credentials(&input.username)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        let parsed = PasswordHash::new(&cred.password_hash).map_err(|e| AuthError::HashError(e.to_string()))?;
        if Argon2::default().verify_password(input.password.as_bytes(), &parsed).is_err() {
            warn!("login_rejected");
            return Err(AuthError::Unauthorized);
        }

        let user = self.repo.find_user(&cred.username).await?.ok_or(AuthError::Unauthorized)?;
        let token = self.issue_token(&user.username, &user.roles)?;
        info!(roles = user.roles.len(), "login_succeeded");
        Ok(AuthSession { token, username: user.username, roles: user.roles })
    }

    pub fn issue_token(&self, username: &str, roles: &BTreeSet<Role>) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: username.to_string(),
            roles: roles.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::minutes(self.cfg.token_ttl_minutes)).timestamp(),
        };
        encode(&JwtHeader::default(), &claims, &EncodingKey::from_secret(self.cfg.jwt_secret.as_bytes()))
            .map_err(|e| AuthError::TokenError(e.to_string()))
    }

    /// Decode and check signature and expiry of an HS256 token.
    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &DecodingKey::from_secret(self.cfg.jwt_secret.as_bytes()), &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| AuthError::TokenError(e.to_string()))
    }
}
