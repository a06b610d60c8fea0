use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};
use tracing::{info, instrument};

use models::{pet, pet_type};

use super::{delete_pets_with_visits, identity_of, CascadeSummary};
use crate::domain::{PetType, Persistable};
use crate::errors::ServiceError;

pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: i32) -> Result<PetType, ServiceError> {
    pet_type::Entity::find_by_id(id)
        .one(db)
        .await?
        .map(PetType::from)
        .ok_or_else(|| ServiceError::not_found(PetType::KIND, id))
}

pub async fn list_all<C: ConnectionTrait>(db: &C) -> Result<Vec<PetType>, ServiceError> {
    let rows = pet_type::Entity::find().order_by_asc(pet_type::Column::Id).all(db).await?;
    Ok(rows.into_iter().map(PetType::from).collect())
}

#[instrument(skip(db, entity), fields(id = ?entity.id))]
pub async fn save<C: ConnectionTrait>(db: &C, entity: &PetType) -> Result<PetType, ServiceError> {
    let saved = match entity.id {
        None => {
            let m = pet_type::ActiveModel { id: NotSet, name: Set(entity.name.clone()) }.insert(db).await?;
            info!(id = m.id, "pet_type_created");
            m
        }
        Some(id) => {
            let mut am: pet_type::ActiveModel = pet_type::Entity::find_by_id(id)
                .one(db)
                .await?
                .ok_or_else(|| ServiceError::not_found(PetType::KIND, id))?
                .into();
            am.name = Set(entity.name.clone());
            let m = am.update(db).await?;
            info!(id = m.id, "pet_type_updated");
            m
        }
    };
    Ok(saved.into())
}

/// Removes the type together with every pet of that type and their visits.
#[instrument(skip(db, entity), fields(id = ?entity.id))]
pub async fn delete<C>(db: &C, entity: &PetType) -> Result<CascadeSummary, ServiceError>
where
    C: ConnectionTrait + TransactionTrait,
{
    let id = identity_of(entity)?;
    let txn = db.begin().await?;
    if pet_type::Entity::find_by_id(id).one(&txn).await?.is_none() {
        return Err(ServiceError::not_found(PetType::KIND, id));
    }
    let pet_ids: Vec<i32> = pet::Entity::find()
        .select_only()
        .column(pet::Column::Id)
        .filter(pet::Column::TypeId.eq(id))
        .into_tuple()
        .all(&txn)
        .await?;
    let summary = delete_pets_with_visits(&txn, &pet_ids).await?;
    pet_type::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;
    info!(id, pets = summary.pets, visits = summary.visits, "pet_type_deleted");
    Ok(summary)
}
