use async_trait::async_trait;

use super::domain::{AuthUser, Credentials};
use super::errors::AuthError;

/// Repository abstraction for auth-related persistence.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn find_user(&self, username: &str) -> Result<Option<AuthUser>, AuthError>;
    async fn get_credentials(&self, username: &str) -> Result<Option<Credentials>, AuthError>;
    /// Stores the user with its roles; an existing username is `Conflict`.
    async fn create_user(&self, user: &AuthUser, password_hash: String) -> Result<AuthUser, AuthError>;
}
