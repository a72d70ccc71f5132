use sea_orm_migration::prelude::*;

mod m2026_07_28_000001_create_users;
mod m2026_07_28_000002_create_freelancer_profiles;
mod m2026_07_28_000003_create_clients;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        // users must exist before profiles, profiles before clients
        vec![
            Box::new(m2026_07_28_000001_create_users::Migration),
            Box::new(m2026_07_28_000002_create_freelancer_profiles::Migration),
            Box::new(m2026_07_28_000003_create_clients::Migration),
        ]
    }
}
