pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_profiles_table;
mod m20260301_000002_create_lands_table;
mod m20260301_000003_create_contracts_table;
mod m20260301_000004_create_notifications_table;
mod m20260310_000001_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_profiles_table::Migration),
            Box::new(m20260301_000002_create_lands_table::Migration),
            Box::new(m20260301_000003_create_contracts_table::Migration),
            Box::new(m20260301_000004_create_notifications_table::Migration),
            Box::new(m20260310_000001_add_indexes::Migration),
        ]
    }
}
