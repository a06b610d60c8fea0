//! Create `pets` table with FKs to `types` and `owners`.
//!
//! Neither FK cascades: deleting a type or an owner must remove the pets
//! (and their visits) first.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Pets::Table)
                    .if_not_exists()
                    .col(pk_auto(Pets::Id))
                    .col(string_len(Pets::Name, 30).not_null())
                    .col(ColumnDef::new(Pets::BirthDate).date().null())
                    .col(integer(Pets::TypeId).not_null())
                    .col(integer(Pets::OwnerId).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pets_types")
                            .from(Pets::Table, Pets::TypeId)
                            .to(Types::Table, Types::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pets_owners")
                            .from(Pets::Table, Pets::OwnerId)
                            .to(Owners::Table, Owners::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Pets::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Pets { Table, Id, Name, BirthDate, TypeId, OwnerId }

#[derive(DeriveIden)]
enum Types { Table, Id }

#[derive(DeriveIden)]
enum Owners { Table, Id }
