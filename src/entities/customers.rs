use sea_orm::entity::prelude::*;
use serde::Serialize;

use crate::db::Table;

/// Customer profile. Shares its primary key with the owning `users` row.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "customers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    #[sea_orm(unique)]
    pub phone_number: String,
    #[sea_orm(unique)]
    #[serde(skip_serializing)]
    pub credit_card_number: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::Id",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Users,
    #[sea_orm(has_many = "super::tickets::Entity")]
    Tickets,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::tickets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tickets.def()
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
