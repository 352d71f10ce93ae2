use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::db::Table;

/// Canonical role numbering, mirrored into the `user_roles` lookup table.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    #[sea_orm(num_value = 1)]
    Customer,
    #[sea_orm(num_value = 2)]
    AirlineCompany,
    #[sea_orm(num_value = 3)]
    Administrator,
}

impl UserRole {
    #[must_use]
    pub const fn role_name(self) -> &'static str {
        match self {
            Self::Customer => "CUSTOMER",
            Self::AirlineCompany => "AIRLINE_COMPANY",
            Self::Administrator => "ADMINISTRATOR",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "user_roles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    #[sea_orm(unique)]
    pub role_name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::users::Entity")]
    Users,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Table for Entity {
    type Key = i32;

    fn id_column() -> Column {
        Column::Id
    }

    fn key_column() -> Column {
        Column::Id
    }
}
