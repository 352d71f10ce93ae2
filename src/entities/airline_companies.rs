use sea_orm::entity::prelude::*;
use serde::Serialize;

use crate::db::Table;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "airline_companies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Owning user, expected to hold the `AIRLINE_COMPANY` role.
    #[sea_orm(unique)]
    pub user_id: i32,
    pub country_id: i32,
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Users,
    #[sea_orm(
        belongs_to = "super::countries::Entity",
        from = "Column::CountryId",
        to = "super::countries::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Countries,
    #[sea_orm(has_many = "super::flights::Entity")]
    Flights,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::countries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Countries.def()
    }
}

impl Related<super::flights::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Flights.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Table for Entity {
    type Key = i32;

    fn id_column() -> Column {
        Column::Id
    }

    fn key_column() -> Column {
        Column::UserId
    }
}
