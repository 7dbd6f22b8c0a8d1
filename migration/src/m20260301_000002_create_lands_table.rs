use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `lands` table and its columns.
#[derive(DeriveIden)]
pub enum Lands {
    Table,
    Id,
    FarmerId,
    Area,
    Location,
    PinCode,
    Price,
    Quality,
    CropFeasibility,
    IsLended,
    CreatedAt,
}

/// Re-declare parent table identifiers for foreign-key references.
#[derive(DeriveIden)]
enum Profiles {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Lands::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Lands::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Lands::FarmerId).uuid().not_null())
                    .col(ColumnDef::new(Lands::Area).string().not_null())
                    .col(ColumnDef::new(Lands::Location).string().not_null())
                    .col(ColumnDef::new(Lands::PinCode).string())
                    .col(ColumnDef::new(Lands::Price).double().not_null())
                    .col(ColumnDef::new(Lands::Quality).string().not_null())
                    .col(ColumnDef::new(Lands::CropFeasibility).string())
                    .col(
                        ColumnDef::new(Lands::IsLended)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Lands::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_lands_farmer_id")
                            .from(Lands::Table, Lands::FarmerId)
                            .to(Profiles::Table, Profiles::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Lands::Table).to_owned())
            .await
    }
}
