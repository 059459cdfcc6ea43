pub use sea_orm_migration::prelude::*;

mod m20200801_000001_create_catalog_tables;
mod m20200829_000001_add_screen_actors_guild_member;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20200801_000001_create_catalog_tables::Migration),
            Box::new(m20200829_000001_add_screen_actors_guild_member::Migration),
        ]
    }
}
