use sea_orm::entity::prelude::*;
use serde::Serialize;

use crate::db::Table;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "countries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// ISO 3166-1 alpha-2 code.
    #[sea_orm(unique)]
    pub code: String,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::airports::Entity")]
    Airports,
    #[sea_orm(has_many = "super::airline_companies::Entity")]
    AirlineCompanies,
}

impl Related<super::airports::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Airports.def()
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
        Column::Code
    }
}
