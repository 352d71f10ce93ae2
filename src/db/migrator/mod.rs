use sea_orm_migration::prelude::*;

mod m20230115_initial_schema;
mod m20230116_seed_user_roles;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20230115_initial_schema::Migration),
            Box::new(m20230116_seed_user_roles::Migration),
        ]
    }
}
