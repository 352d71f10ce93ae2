use std::collections::HashMap;

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QuerySelect};

use crate::db::{DataError, DataResult, Repository, Table};
use crate::entities::countries;

impl Repository<countries::Entity> {
    /// Maps every stored country code to its row id.
    pub async fn code_to_id_map(&self) -> DataResult<HashMap<String, i32>> {
        let pairs: Vec<(String, i32)> = countries::Entity::find()
            .select_only()
            .column(countries::Column::Code)
            .column(countries::Column::Id)
            .into_tuple()
            .all(&self.conn)
            .await?;

        Ok(pairs.into_iter().collect())
    }

    pub async fn get_by_code(&self, code: &str) -> DataResult<countries::Model> {
        countries::Entity::find()
            .filter(countries::Column::Code.eq(code))
            .one(&self.conn)
            .await?
            .ok_or_else(|| DataError::not_found(&countries::Entity::table(), code))
    }
}
