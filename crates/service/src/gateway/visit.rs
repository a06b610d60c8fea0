use chrono::Local;
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, NotSet, QueryOrder, Set};
use tracing::{info, instrument};

use models::{pet, visit};

use super::identity_of;
use crate::domain::{Persistable, Pet, Visit};
use crate::errors::ServiceError;
use crate::validation::{Violations, MUST_NOT_BE_NULL};

pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: i32) -> Result<Visit, ServiceError> {
    visit::Entity::find_by_id(id)
        .one(db)
        .await?
        .map(Visit::from)
        .ok_or_else(|| ServiceError::not_found(Visit::KIND, id))
}

pub async fn list_all<C: ConnectionTrait>(db: &C) -> Result<Vec<Visit>, ServiceError> {
    let rows = visit::Entity::find().order_by_asc(visit::Column::Id).all(db).await?;
    Ok(rows.into_iter().map(Visit::from).collect())
}

/// Stores the visit for an existing pet; a missing date becomes today.
#[instrument(skip(db, entity), fields(id = ?entity.id, pet_id = ?entity.pet_id))]
pub async fn save<C: ConnectionTrait>(db: &C, entity: &Visit) -> Result<Visit, ServiceError> {
    let pet_id = entity
        .pet_id
        .ok_or_else(|| ServiceError::Validation(Violations::single("petId", MUST_NOT_BE_NULL)))?;
    if pet::Entity::find_by_id(pet_id).one(db).await?.is_none() {
        return Err(ServiceError::not_found(Pet::KIND, pet_id));
    }
    let date = entity.date.unwrap_or_else(|| Local::now().date_naive());

    let saved = match entity.id {
        None => {
            let m = visit::ActiveModel {
                id: NotSet,
                pet_id: Set(pet_id),
                visit_date: Set(date),
                description: Set(entity.description.clone()),
            }
            .insert(db)
            .await?;
            info!(id = m.id, pet_id, "visit_created");
            m
        }
        Some(id) => {
            let mut am: visit::ActiveModel = visit::Entity::find_by_id(id)
                .one(db)
                .await?
                .ok_or_else(|| ServiceError::not_found(Visit::KIND, id))?
                .into();
            am.pet_id = Set(pet_id);
            am.visit_date = Set(date);
            am.description = Set(entity.description.clone());
            let m = am.update(db).await?;
            info!(id = m.id, pet_id, "visit_updated");
            m
        }
    };
    Ok(saved.into())
}

#[instrument(skip(db, entity), fields(id = ?entity.id))]
pub async fn delete<C: ConnectionTrait>(db: &C, entity: &Visit) -> Result<(), ServiceError> {
    let id = identity_of(entity)?;
    if visit::Entity::find_by_id(id).one(db).await?.is_none() {
        return Err(ServiceError::not_found(Visit::KIND, id));
    }
    visit::Entity::delete_by_id(id).exec(db).await?;
    info!(id, "visit_deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::test_support::{self, get_db};

    #[tokio::test]
    async fn missing_date_defaults_to_today() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let cat = test_support::pet_type(&db, "cat").await?;
        let george = test_support::owner(&db, "George", "Franklin").await?;
        let leo = test_support::pet(&db, &george, &cat, "Leo").await?;

        let saved = save(&db, &Visit { description: "checkup".into(), pet_id: leo.id, ..Visit::default() }).await?;
        let date = saved.date.unwrap();
        let today = Local::now().date_naive();
        assert!(date == today || date.succ_opt() == Some(today));
        assert_eq!(find_by_id(&db, saved.id.unwrap()).await?, saved);
        Ok(())
    }

    #[tokio::test]
    async fn visit_for_unknown_pet_is_not_found() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let visit = Visit { description: "checkup".into(), pet_id: Some(5), ..Visit::default() };
        assert!(matches!(save(&db, &visit).await, Err(ServiceError::NotFound(_))));
        assert!(list_all(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn update_and_delete() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let cat = test_support::pet_type(&db, "cat").await?;
        let george = test_support::owner(&db, "George", "Franklin").await?;
        let leo = test_support::pet(&db, &george, &cat, "Leo").await?;
        let shot = test_support::visit(&db, &leo, "rabies shot").await?;

        let moved = Visit {
            date: NaiveDate::from_ymd_opt(2013, 1, 2),
            description: "rabies booster".into(),
            ..shot.clone()
        };
        let saved = save(&db, &moved).await?;
        assert_eq!(saved, moved);
        assert_eq!(list_all(&db).await?.len(), 1);

        delete(&db, &saved).await?;
        assert!(matches!(delete(&db, &saved).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }
}
