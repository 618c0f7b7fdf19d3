//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_roles;
mod m20240101_000002_create_users;
mod m20240101_000003_create_user_sessions;
mod m20240101_000004_create_properties;
mod m20240101_000005_create_amenities;
mod m20240101_000006_create_property_images;
mod m20240101_000007_create_property_codes;
mod m20240101_000008_create_holidays;
mod m20240101_000009_create_bookings;
mod m20240101_000010_create_booking_sequences;
mod m20240101_000011_create_subscriptions;
mod m20240101_000012_create_tickets;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_roles::Migration),
            Box::new(m20240101_000002_create_users::Migration),
            Box::new(m20240101_000003_create_user_sessions::Migration),
            Box::new(m20240101_000004_create_properties::Migration),
            Box::new(m20240101_000005_create_amenities::Migration),
            Box::new(m20240101_000006_create_property_images::Migration),
            Box::new(m20240101_000007_create_property_codes::Migration),
            Box::new(m20240101_000008_create_holidays::Migration),
            Box::new(m20240101_000009_create_bookings::Migration),
            Box::new(m20240101_000010_create_booking_sequences::Migration),
            Box::new(m20240101_000011_create_subscriptions::Migration),
            Box::new(m20240101_000012_create_tickets::Migration),
        ]
    }
}
