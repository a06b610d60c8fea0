//! Create `visits` table with FK to `pets`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Visits::Table)
                    .if_not_exists()
                    .col(pk_auto(Visits::Id))
                    .col(integer(Visits::PetId).not_null())
                    .col(date(Visits::VisitDate).not_null())
                    .col(string_len(Visits::Description, 255).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_visits_pets")
                            .from(Visits::Table, Visits::PetId)
                            .to(Pets::Table, Pets::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Visits::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Visits { Table, Id, PetId, VisitDate, Description }

#[derive(DeriveIden)]
enum Pets { Table, Id }
