//! Create `types` table.
//!
//! Pet types (cat, dog, ...). Pets reference it without cascading deletes;
//! removal of a type and its pets is done explicitly by the service layer.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Types::Table)
                    .if_not_exists()
                    .col(pk_auto(Types::Id))
                    .col(string_len(Types::Name, 80).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Types::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Types { Table, Id, Name }
