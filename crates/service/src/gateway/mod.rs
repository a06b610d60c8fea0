//! Persistence gateway: find, list, save and delete per clinic entity.
//!
//! Every call takes an explicit store handle, either a pooled
//! `DatabaseConnection` or an open `DatabaseTransaction`. Multi-statement
//! operations open their own transaction on that handle (a savepoint when the
//! handle already is one) and commit only when every statement succeeded.
//!
//! `save` inserts when the entity carries no id and updates in place
//! otherwise; updating an id with no stored row is `NotFound`. `delete`
//! reloads the entity by id before removing anything.

pub mod owner;
pub mod pet;
pub mod pet_type;
pub mod specialty;
pub mod vet;
pub mod visit;

use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};

use models::{pet as pet_entity, visit as visit_entity};

use crate::domain::Persistable;
use crate::errors::ServiceError;

/// Rows removed by a cascading delete, not counting the root row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CascadeSummary {
    pub visits: u64,
    pub pets: u64,
}

/// Identity of an entity that is about to be deleted.
pub(crate) fn identity_of<T: Persistable>(entity: &T) -> Result<i32, ServiceError> {
    entity
        .id()
        .ok_or_else(|| ServiceError::NotFound(format!("{} has no identity", T::KIND)))
}

/// Deletes the visits of `pet_ids`, then the pets themselves.
pub(crate) async fn delete_pets_with_visits<C: ConnectionTrait>(
    txn: &C,
    pet_ids: &[i32],
) -> Result<CascadeSummary, DbErr> {
    if pet_ids.is_empty() {
        return Ok(CascadeSummary::default());
    }
    let visits = visit_entity::Entity::delete_many()
        .filter(visit_entity::Column::PetId.is_in(pet_ids.iter().copied()))
        .exec(txn)
        .await?
        .rows_affected;
    let pets = pet_entity::Entity::delete_many()
        .filter(pet_entity::Column::Id.is_in(pet_ids.iter().copied()))
        .exec(txn)
        .await?
        .rows_affected;
    Ok(CascadeSummary { visits, pets })
}
