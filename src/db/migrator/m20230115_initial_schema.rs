use crate::entities::prelude::*;
use crate::entities::tickets;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Schema;

#[derive(DeriveMigrationName)]
pub struct Migration;

const TICKETS_UNIQUE_INDEX: &str = "idx_tickets_flight_customer";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        // Referenced tables first.
        let tables = [
            schema.create_table_from_entity(UserRoles),
            schema.create_table_from_entity(Countries),
            schema.create_table_from_entity(Users),
            schema.create_table_from_entity(Airports),
            schema.create_table_from_entity(Customers),
            schema.create_table_from_entity(Administrators),
            schema.create_table_from_entity(AirlineCompanies),
            schema.create_table_from_entity(Flights),
            schema.create_table_from_entity(Tickets),
        ];

        for mut table in tables {
            manager
                .create_table(table.if_not_exists().to_owned())
                .await?;
        }

        manager
            .create_index(
                Index::create()
                    .name(TICKETS_UNIQUE_INDEX)
                    .table(Tickets)
                    .col(tickets::Column::FlightId)
                    .col(tickets::Column::CustomerId)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(TICKETS_UNIQUE_INDEX)
                    .table(Tickets)
                    .if_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Tickets).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Flights).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AirlineCompanies).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Administrators).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Customers).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Airports).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Countries).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserRoles).if_exists().to_owned())
            .await?;

        Ok(())
    }
}
