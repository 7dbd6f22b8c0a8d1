use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Contracts {
    Table,
    FarmerId,
    ContractorId,
    Status,
}

#[derive(DeriveIden)]
enum Lands {
    Table,
    FarmerId,
    IsLended,
}

#[derive(DeriveIden)]
enum Notifications {
    Table,
    UserId,
    IsRead,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Contract listings are always scoped by party or status.
        manager
            .create_index(
                Index::create()
                    .name("idx_contracts_farmer_id")
                    .table(Contracts::Table)
                    .col(Contracts::FarmerId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_contracts_contractor_id")
                    .table(Contracts::Table)
                    .col(Contracts::ContractorId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_contracts_status")
                    .table(Contracts::Table)
                    .col(Contracts::Status)
                    .to_owned(),
            )
            .await?;

        // The browse listing filters on is_lended; farmer pages on owner.
        manager
            .create_index(
                Index::create()
                    .name("idx_lands_farmer_id")
                    .table(Lands::Table)
                    .col(Lands::FarmerId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_lands_is_lended")
                    .table(Lands::Table)
                    .col(Lands::IsLended)
                    .to_owned(),
            )
            .await?;

        // Per-user notification feed with unread badge counts.
        manager
            .create_index(
                Index::create()
                    .name("idx_notifications_user_id_is_read")
                    .table(Notifications::Table)
                    .col(Notifications::UserId)
                    .col(Notifications::IsRead)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in [
            "idx_contracts_farmer_id",
            "idx_contracts_contractor_id",
            "idx_contracts_status",
        ] {
            manager
                .drop_index(Index::drop().name(name).table(Contracts::Table).to_owned())
                .await?;
        }
        for name in ["idx_lands_farmer_id", "idx_lands_is_lended"] {
            manager
                .drop_index(Index::drop().name(name).table(Lands::Table).to_owned())
                .await?;
        }
        manager
            .drop_index(
                Index::drop()
                    .name("idx_notifications_user_id_is_read")
                    .table(Notifications::Table)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}
