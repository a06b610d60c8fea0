use std::collections::BTreeSet;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, ModelTrait, NotSet, QueryFilter, Set, SqlErr,
    TransactionTrait,
};

use models::{role, user};

use crate::auth::domain::{AuthUser, Credentials};
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;
use crate::authz::Role;

pub struct SeaOrmAuthRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmAuthRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

fn repo_err(e: DbErr) -> AuthError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AuthError::Conflict,
        _ => AuthError::Repository(e.to_string()),
    }
}

#[async_trait::async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn find_user(&self, username: &str) -> Result<Option<AuthUser>, AuthError> {
        let Some(u) = user::Entity::find_by_id(username.to_string()).one(&self.db).await.map_err(repo_err)? else {
            return Ok(None);
        };
        let roles: BTreeSet<Role> = u
            .find_related(role::Entity)
            .all(&self.db)
            .await
            .map_err(repo_err)?
            .into_iter()
            .filter_map(|r| r.role.parse().ok())
            .collect();
        Ok(Some(AuthUser { username: u.username, enabled: u.enabled, roles }))
    }

    async fn get_credentials(&self, username: &str) -> Result<Option<Credentials>, AuthError> {
        let res = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .filter(user::Column::Enabled.eq(true))
            .one(&self.db)
            .await
            .map_err(repo_err)?;
        Ok(res.map(|u| Credentials { username: u.username, password_hash: u.password }))
    }

    async fn create_user(&self, new: &AuthUser, password_hash: String) -> Result<AuthUser, AuthError> {
        let txn = self.db.begin().await.map_err(repo_err)?;
        user::ActiveModel {
            username: Set(new.username.clone()),
            password: Set(password_hash),
            enabled: Set(new.enabled),
        }
        .insert(&txn)
        .await
        .map_err(repo_err)?;
        if !new.roles.is_empty() {
            let rows = new.roles.iter().map(|r| role::ActiveModel {
                id: NotSet,
                username: Set(new.username.clone()),
                role: Set(r.as_str().to_string()),
            });
            role::Entity::insert_many(rows).exec_without_returning(&txn).await.map_err(repo_err)?;
        }
        txn.commit().await.map_err(repo_err)?;
        Ok(new.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    #[tokio::test]
    async fn stores_user_with_roles_and_rejects_duplicates() -> Result<(), anyhow::Error> {
        let repo = SeaOrmAuthRepository::new(get_db().await?);
        let alice = AuthUser {
            username: "alice".into(),
            enabled: true,
            roles: BTreeSet::from([Role::OwnerAdmin, Role::VetAdmin]),
        };
        repo.create_user(&alice, "$argon2id$stub".into()).await?;

        assert_eq!(repo.find_user("alice").await?, Some(alice.clone()));
        let cred = repo.get_credentials("alice").await?.unwrap();
        assert_eq!(cred.password_hash, "$argon2id$stub");

        let again = repo.create_user(&alice, "x".into()).await;
        assert!(matches!(again, Err(AuthError::Conflict)));
        assert!(repo.find_user("bob").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn disabled_users_have_no_credentials() -> Result<(), anyhow::Error> {
        let repo = SeaOrmAuthRepository::new(get_db().await?);
        let bob = AuthUser { username: "bob".into(), enabled: false, roles: BTreeSet::from([Role::Admin]) };
        repo.create_user(&bob, "hash".into()).await?;
        assert!(repo.get_credentials("bob").await?.is_none());
        Ok(())
    }
}
