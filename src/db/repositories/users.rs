use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

use crate::db::{DataError, DataResult, Repository, Table};
use crate::entities::users;

impl Repository<users::Entity> {
    pub async fn get_by_username(&self, username: &str) -> DataResult<users::Model> {
        users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.conn)
            .await?
            .ok_or_else(|| DataError::not_found(&users::Entity::table(), username))
    }
}
