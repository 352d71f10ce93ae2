use sea_orm::entity::prelude::*;
use serde::Serialize;

use crate::db::Table;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "flights")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub airline_company_id: i32,
    pub origin_country_id: i32,
    pub destination_country_id: i32,
    pub departure_time: DateTime,
    pub landing_time: DateTime,
    pub remaining_tickets: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::airline_companies::Entity",
        from = "Column::AirlineCompanyId",
        to = "super::airline_companies::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    AirlineCompanies,
    #[sea_orm(
        belongs_to = "super::countries::Entity",
        from = "Column::OriginCountryId",
        to = "super::countries::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    OriginCountry,
    #[sea_orm(
        belongs_to = "super::countries::Entity",
        from = "Column::DestinationCountryId",
        to = "super::countries::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    DestinationCountry,
    #[sea_orm(has_many = "super::tickets::Entity")]
    Tickets,
}

impl Related<super::airline_companies::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AirlineCompanies.def()
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
