use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, LoaderTrait, NotSet, QueryOrder, Set, TransactionTrait};
use tracing::{info, instrument};

use models::{owner, pet, pet_type, visit};

use super::{delete_pets_with_visits, identity_of, CascadeSummary};
use crate::domain::{Owner, Persistable, Pet, PetType};
use crate::errors::ServiceError;
use crate::validation::{Violations, MUST_NOT_BE_NULL};

/// Attaches type and visits to each pet with one batched query per relation.
pub(crate) async fn assemble<C: ConnectionTrait>(db: &C, pets: Vec<pet::Model>) -> Result<Vec<Pet>, ServiceError> {
    if pets.is_empty() {
        return Ok(Vec::new());
    }
    let types = pets.load_one(pet_type::Entity, db).await?;
    let visits = pets.load_many(visit::Entity, db).await?;
    Ok(pets
        .into_iter()
        .zip(types)
        .zip(visits)
        .map(|((p, t), v)| Pet::from_parts(p, t, v))
        .collect())
}

pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: i32) -> Result<Pet, ServiceError> {
    let row = pet::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found(Pet::KIND, id))?;
    assemble(db, vec![row])
        .await?
        .pop()
        .ok_or_else(|| ServiceError::not_found(Pet::KIND, id))
}

pub async fn list_all<C: ConnectionTrait>(db: &C) -> Result<Vec<Pet>, ServiceError> {
    let rows = pet::Entity::find().order_by_asc(pet::Column::Id).all(db).await?;
    assemble(db, rows).await
}

/// Stores the pet row. Visits are owned by the visit gateway and ignored here.
///
/// The referenced type and owner must exist; the pet is returned as reloaded
/// from the store.
#[instrument(skip(db, entity), fields(id = ?entity.id, owner_id = ?entity.owner_id))]
pub async fn save<C: ConnectionTrait>(db: &C, entity: &Pet) -> Result<Pet, ServiceError> {
    let type_id = entity
        .pet_type
        .as_ref()
        .and_then(|t| t.id)
        .ok_or_else(|| ServiceError::Validation(Violations::single("type", MUST_NOT_BE_NULL)))?;
    let owner_id = entity
        .owner_id
        .ok_or_else(|| ServiceError::Validation(Violations::single("ownerId", MUST_NOT_BE_NULL)))?;
    if pet_type::Entity::find_by_id(type_id).one(db).await?.is_none() {
        return Err(ServiceError::not_found(PetType::KIND, type_id));
    }
    if owner::Entity::find_by_id(owner_id).one(db).await?.is_none() {
        return Err(ServiceError::not_found(Owner::KIND, owner_id));
    }

    let id = match entity.id {
        None => {
            let m = pet::ActiveModel {
                id: NotSet,
                name: Set(entity.name.clone()),
                birth_date: Set(entity.birth_date),
                type_id: Set(type_id),
                owner_id: Set(owner_id),
            }
            .insert(db)
            .await?;
            info!(id = m.id, owner_id, "pet_created");
            m.id
        }
        Some(id) => {
            let mut am: pet::ActiveModel = pet::Entity::find_by_id(id)
                .one(db)
                .await?
                .ok_or_else(|| ServiceError::not_found(Pet::KIND, id))?
                .into();
            am.name = Set(entity.name.clone());
            am.birth_date = Set(entity.birth_date);
            am.type_id = Set(type_id);
            am.owner_id = Set(owner_id);
            let m = am.update(db).await?;
            info!(id = m.id, owner_id, "pet_updated");
            m.id
        }
    };
    find_by_id(db, id).await
}

/// Removes the pet after its visits.
#[instrument(skip(db, entity), fields(id = ?entity.id))]
pub async fn delete<C>(db: &C, entity: &Pet) -> Result<CascadeSummary, ServiceError>
where
    C: ConnectionTrait + TransactionTrait,
{
    let id = identity_of(entity)?;
    let txn = db.begin().await?;
    if pet::Entity::find_by_id(id).one(&txn).await?.is_none() {
        return Err(ServiceError::not_found(Pet::KIND, id));
    }
    let summary = delete_pets_with_visits(&txn, &[id]).await?;
    txn.commit().await?;
    info!(id, visits = summary.visits, "pet_deleted");
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{self, get_db};

    #[tokio::test]
    async fn saved_pet_carries_type_and_owner() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let cat = test_support::pet_type(&db, "cat").await?;
        let george = test_support::owner(&db, "George", "Franklin").await?;
        let leo = test_support::pet(&db, &george, &cat, "Leo").await?;

        assert!(leo.id.is_some());
        assert_eq!(leo.pet_type, Some(cat));
        assert_eq!(leo.owner_id, george.id);
        assert!(leo.visits.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn visits_are_loaded_in_id_order() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let cat = test_support::pet_type(&db, "cat").await?;
        let george = test_support::owner(&db, "George", "Franklin").await?;
        let leo = test_support::pet(&db, &george, &cat, "Leo").await?;
        test_support::visit(&db, &leo, "rabies shot").await?;
        test_support::visit(&db, &leo, "neutered").await?;

        let loaded = find_by_id(&db, leo.id.unwrap()).await?;
        let descriptions: Vec<_> = loaded.visits.iter().map(|v| v.description.as_str()).collect();
        assert_eq!(descriptions, ["rabies shot", "neutered"]);
        Ok(())
    }

    #[tokio::test]
    async fn unknown_type_or_owner_is_not_found() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let cat = test_support::pet_type(&db, "cat").await?;
        let george = test_support::owner(&db, "George", "Franklin").await?;

        let orphan = Pet {
            name: "Leo".into(),
            pet_type: Some(cat.clone()),
            owner_id: Some(999),
            ..Pet::default()
        };
        assert!(matches!(save(&db, &orphan).await, Err(ServiceError::NotFound(m)) if m.contains("owner")));

        let untyped = Pet {
            name: "Leo".into(),
            pet_type: Some(PetType { id: Some(999), name: "dragon".into() }),
            owner_id: george.id,
            ..Pet::default()
        };
        assert!(matches!(save(&db, &untyped).await, Err(ServiceError::NotFound(m)) if m.contains("pet type")));
        assert!(list_all(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn update_changes_fields_without_duplicating() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let cat = test_support::pet_type(&db, "cat").await?;
        let dog = test_support::pet_type(&db, "dog").await?;
        let george = test_support::owner(&db, "George", "Franklin").await?;
        let leo = test_support::pet(&db, &george, &cat, "Leo").await?;

        let renamed = Pet { name: "Leonardo".into(), pet_type: Some(dog.clone()), ..leo.clone() };
        let saved = save(&db, &renamed).await?;
        assert_eq!(saved.id, leo.id);
        assert_eq!(saved.pet_type, Some(dog));

        let all = list_all(&db).await?;
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "Leonardo");
        Ok(())
    }

    #[tokio::test]
    async fn delete_removes_visits_first() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let cat = test_support::pet_type(&db, "cat").await?;
        let george = test_support::owner(&db, "George", "Franklin").await?;
        let leo = test_support::pet(&db, &george, &cat, "Leo").await?;
        test_support::visit(&db, &leo, "rabies shot").await?;

        let summary = delete(&db, &leo).await?;
        assert_eq!(summary, CascadeSummary { visits: 1, pets: 1 });
        assert!(crate::gateway::visit::list_all(&db).await?.is_empty());
        assert!(matches!(find_by_id(&db, leo.id.unwrap()).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }
}
