use sea_orm::entity::prelude::*;
use serde::Serialize;

use super::user_roles::UserRole;
use crate::db::Table;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub user_role: UserRole,

    #[sea_orm(unique)]
    pub username: String,

    #[serde(skip_serializing)]
    pub password: String,

    #[sea_orm(unique)]
    pub email: String,

    pub avatar_url: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user_roles::Entity",
        from = "Column::UserRole",
        to = "super::user_roles::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    UserRoles,
    #[sea_orm(has_one = "super::customers::Entity")]
    Customers,
    #[sea_orm(has_one = "super::administrators::Entity")]
    Administrators,
    #[sea_orm(has_one = "super::airline_companies::Entity")]
    AirlineCompanies,
}

impl Related<super::user_roles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserRoles.def()
    }
}

impl Related<super::customers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customers.def()
    }
}

impl Related<super::administrators::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Administrators.def()
    }
}

impl Related<super::airline_companies::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AirlineCompanies.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Table for Entity {
    type Key = String;

    fn id_column() -> Column {
        Column::Id
    }

    fn key_column() -> Column {
        Column::Username
    }
}
