pub use sea_orm_migration::prelude::*;

mod m20250901_000001_create_lottery_games;
mod m20250901_000002_create_inventory_books;
mod m20250902_000001_create_daily_lottery_reports;
mod m20250902_000002_create_scanned_tickets;
mod m20250905_000001_create_audit_logs;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250901_000001_create_lottery_games::Migration),
            Box::new(m20250901_000002_create_inventory_books::Migration),
            Box::new(m20250902_000001_create_daily_lottery_reports::Migration),
            Box::new(m20250902_000002_create_scanned_tickets::Migration),
            Box::new(m20250905_000001_create_audit_logs::Migration),
        ]
    }
}
