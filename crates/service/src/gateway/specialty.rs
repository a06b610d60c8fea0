use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::{info, instrument};

use models::{specialty, vet_specialty};

use super::identity_of;
use crate::domain::{Persistable, Specialty};
use crate::errors::ServiceError;

pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: i32) -> Result<Specialty, ServiceError> {
    specialty::Entity::find_by_id(id)
        .one(db)
        .await?
        .map(Specialty::from)
        .ok_or_else(|| ServiceError::not_found(Specialty::KIND, id))
}

pub async fn list_all<C: ConnectionTrait>(db: &C) -> Result<Vec<Specialty>, ServiceError> {
    let rows = specialty::Entity::find().order_by_asc(specialty::Column::Id).all(db).await?;
    Ok(rows.into_iter().map(Specialty::from).collect())
}

/// First specialty with exactly this name, lowest id wins.
pub async fn find_by_name<C: ConnectionTrait>(db: &C, name: &str) -> Result<Option<Specialty>, ServiceError> {
    Ok(row_by_name(db, name).await?.map(Specialty::from))
}

pub(crate) async fn row_by_name<C: ConnectionTrait>(db: &C, name: &str) -> Result<Option<specialty::Model>, ServiceError> {
    let row = specialty::Entity::find()
        .filter(specialty::Column::Name.eq(name))
        .order_by_asc(specialty::Column::Id)
        .one(db)
        .await?;
    Ok(row)
}

#[instrument(skip(db, entity), fields(id = ?entity.id))]
pub async fn save<C: ConnectionTrait>(db: &C, entity: &Specialty) -> Result<Specialty, ServiceError> {
    let saved = match entity.id {
        None => {
            let m = specialty::ActiveModel { id: NotSet, name: Set(entity.name.clone()) }.insert(db).await?;
            info!(id = m.id, "specialty_created");
            m
        }
        Some(id) => {
            let mut am: specialty::ActiveModel = specialty::Entity::find_by_id(id)
                .one(db)
                .await?
                .ok_or_else(|| ServiceError::not_found(Specialty::KIND, id))?
                .into();
            am.name = Set(entity.name.clone());
            let m = am.update(db).await?;
            info!(id = m.id, "specialty_updated");
            m
        }
    };
    Ok(saved.into())
}

/// Removes the specialty after unlinking it from every vet.
#[instrument(skip(db, entity), fields(id = ?entity.id))]
pub async fn delete<C>(db: &C, entity: &Specialty) -> Result<(), ServiceError>
where
    C: ConnectionTrait + TransactionTrait,
{
    let id = identity_of(entity)?;
    let txn = db.begin().await?;
    if specialty::Entity::find_by_id(id).one(&txn).await?.is_none() {
        return Err(ServiceError::not_found(Specialty::KIND, id));
    }
    let links = vet_specialty::Entity::delete_many()
        .filter(vet_specialty::Column::SpecialtyId.eq(id))
        .exec(&txn)
        .await?
        .rows_affected;
    specialty::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;
    info!(id, links, "specialty_deleted");
    Ok(())
}
