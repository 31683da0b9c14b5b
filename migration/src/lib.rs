pub use sea_orm_migration::prelude::*;

mod m20250210_000001_create_cities;
mod m20250210_000002_create_centers;
mod m20250210_000003_create_delivery_types;
mod m20250210_000004_create_tariffs;
mod m20250210_000005_create_users;
mod m20250210_000006_create_requests;
mod m20250210_000007_create_packages;
mod m20250210_000008_create_payments;
mod m20250210_000009_create_drivers;
mod m20250210_000010_create_deliveries;
mod m20250210_000011_create_tracking_points;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250210_000001_create_cities::Migration),
            Box::new(m20250210_000002_create_centers::Migration),
            Box::new(m20250210_000003_create_delivery_types::Migration),
            Box::new(m20250210_000004_create_tariffs::Migration),
            Box::new(m20250210_000005_create_users::Migration),
            Box::new(m20250210_000006_create_requests::Migration),
            Box::new(m20250210_000007_create_packages::Migration),
            Box::new(m20250210_000008_create_payments::Migration),
            Box::new(m20250210_000009_create_drivers::Migration),
            Box::new(m20250210_000010_create_deliveries::Migration),
            Box::new(m20250210_000011_create_tracking_points::Migration),
        ]
    }
}
