//! Lookup indexes: name searches, FK columns and the unique role grant.
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Owner search is by last-name prefix
        manager
            .create_index(
                Index::create()
                    .name("idx_owners_last_name")
                    .table(Owners::Table)
                    .col(Owners::LastName)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_vets_last_name")
                    .table(Vets::Table)
                    .col(Vets::LastName)
                    .to_owned(),
            )
            .await?;

        // Cascading deletes walk these FK columns
        manager
            .create_index(
                Index::create()
                    .name("idx_pets_type_id")
                    .table(Pets::Table)
                    .col(Pets::TypeId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_pets_owner_id")
                    .table(Pets::Table)
                    .col(Pets::OwnerId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_visits_pet_id")
                    .table(Visits::Table)
                    .col(Visits::PetId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uniq_roles_username_role")
                    .table(Roles::Table)
                    .col(Roles::Username)
                    .col(Roles::Role)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_owners_last_name").table(Owners::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_vets_last_name").table(Vets::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_pets_type_id").table(Pets::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_pets_owner_id").table(Pets::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_visits_pet_id").table(Visits::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("uniq_roles_username_role").table(Roles::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Owners { Table, LastName }

#[derive(DeriveIden)]
enum Vets { Table, LastName }

#[derive(DeriveIden)]
enum Pets { Table, TypeId, OwnerId }

#[derive(DeriveIden)]
enum Visits { Table, PetId }

#[derive(DeriveIden)]
enum Roles { Table, Username, Role }
