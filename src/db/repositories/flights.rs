use chrono::{NaiveDate, NaiveTime};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};

use crate::db::{DataResult, Repository};
use crate::entities::flights;

impl Repository<flights::Entity> {
    /// Flights between two countries leaving on `date`, earliest first.
    pub async fn departing_on(
        &self,
        origin_country_id: i32,
        destination_country_id: i32,
        date: NaiveDate,
    ) -> DataResult<Vec<flights::Model>> {
        let mut query = flights::Entity::find()
            .filter(flights::Column::OriginCountryId.eq(origin_country_id))
            .filter(flights::Column::DestinationCountryId.eq(destination_country_id))
            .filter(flights::Column::DepartureTime.gte(date.and_time(NaiveTime::MIN)));

        if let Some(next_day) = date.succ_opt() {
            query = query
                .filter(flights::Column::DepartureTime.lt(next_day.and_time(NaiveTime::MIN)));
        }

        let rows = query
            .order_by_asc(flights::Column::DepartureTime)
            .order_by_asc(flights::Column::Id)
            .all(&self.conn)
            .await?;
        Ok(rows)
    }
}
