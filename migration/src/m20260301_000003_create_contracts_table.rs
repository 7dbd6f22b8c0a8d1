use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `contracts` table and its columns.
#[derive(DeriveIden)]
pub enum Contracts {
    Table,
    Id,
    Title,
    Description,
    CropType,
    Quantity,
    Price,
    StartDate,
    EndDate,
    Status,
    FarmerId,
    ContractorId,
    LandId,
    AdminNotes,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Profiles {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Lands {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Contracts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Contracts::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Contracts::Title).string().not_null())
                    .col(ColumnDef::new(Contracts::Description).text())
                    .col(ColumnDef::new(Contracts::CropType).string().not_null())
                    .col(ColumnDef::new(Contracts::Quantity).string())
                    .col(ColumnDef::new(Contracts::Price).double().not_null())
                    .col(ColumnDef::new(Contracts::StartDate).date())
                    .col(ColumnDef::new(Contracts::EndDate).date())
                    .col(ColumnDef::new(Contracts::Status).string().not_null())
                    .col(ColumnDef::new(Contracts::FarmerId).uuid().not_null())
                    .col(ColumnDef::new(Contracts::ContractorId).uuid().not_null())
                    .col(ColumnDef::new(Contracts::LandId).uuid())
                    .col(ColumnDef::new(Contracts::AdminNotes).text())
                    .col(
                        ColumnDef::new(Contracts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contracts_farmer_id")
                            .from(Contracts::Table, Contracts::FarmerId)
                            .to(Profiles::Table, Profiles::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contracts_contractor_id")
                            .from(Contracts::Table, Contracts::ContractorId)
                            .to(Profiles::Table, Profiles::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contracts_land_id")
                            .from(Contracts::Table, Contracts::LandId)
                            .to(Lands::Table, Lands::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Contracts::Table).to_owned())
            .await
    }
}
