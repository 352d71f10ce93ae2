use crate::entities::prelude::*;
use crate::entities::user_roles::{self, UserRole};
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{ActiveEnum, Iterable};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut insert = Query::insert();
        insert
            .into_table(UserRoles)
            .columns([user_roles::Column::Id, user_roles::Column::RoleName]);

        for role in UserRole::iter() {
            insert.values_panic([role.to_value().into(), role.role_name().into()]);
        }

        manager.exec_stmt(insert.to_owned()).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let delete = Query::delete()
            .from_table(UserRoles)
            .and_where(
                Expr::col(user_roles::Column::Id)
                    .is_in(UserRole::iter().map(|role| role.to_value())),
            )
            .to_owned();

        manager.exec_stmt(delete).await?;

        Ok(())
    }
}
