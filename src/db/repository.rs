//! Generic per-table record accessor.
//!
//! A [`Repository`] is bound at compile time to one entity. Each entity
//! implements [`Table`] to name its surrogate key column and the identifier
//! column that [`Repository::add_many`] uses to skip records already stored.

use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;
use std::marker::PhantomData;

use sea_orm::sea_query::ValueType;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    DbErr, EntityTrait, IntoActiveModel, ModelTrait, PaginatorTrait, PrimaryKeyTrait,
    QueryFilter, QueryOrder, QuerySelect, TransactionTrait, TryGetable, Value,
};
use tracing::{debug, info};

use super::error::{DataError, DataResult};

/// SQLite caps bound parameters per statement (999 on older builds).
const KEY_LOOKUP_CHUNK: usize = 500;
const INSERT_CHUNK_SIZE: usize = 100;

pub trait Table: EntityTrait {
    /// Rust type of the identifier column.
    type Key: ValueType + TryGetable + Into<Value> + Clone + Eq + Hash + Debug + Send + Sync;

    fn id_column() -> Self::Column;

    /// Column whose values identify a record for duplicate skipping.
    fn key_column() -> Self::Column;

    #[must_use]
    fn table() -> String {
        Self::default().table_name().to_string()
    }
}

pub struct Repository<E> {
    pub(crate) conn: DatabaseConnection,
    entity: PhantomData<E>,
}

impl<E> Clone for Repository<E> {
    fn clone(&self) -> Self {
        Self {
            conn: self.conn.clone(),
            entity: PhantomData,
        }
    }
}

impl<E> Repository<E>
where
    E: Table,
    E::Model: IntoActiveModel<E::ActiveModel> + Send + Sync,
    E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send + Sync,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<i32>,
{
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self {
            conn,
            entity: PhantomData,
        }
    }

    pub async fn get_by_id(&self, id: i32) -> DataResult<E::Model> {
        E::find_by_id(id)
            .one(&self.conn)
            .await?
            .ok_or_else(|| DataError::not_found(&E::table(), id))
    }

    pub async fn get_all(&self) -> DataResult<Vec<E::Model>> {
        let rows = E::find()
            .order_by_asc(E::id_column())
            .all(&self.conn)
            .await?;
        Ok(rows)
    }

    pub async fn count(&self) -> DataResult<u64> {
        Ok(E::find().count(&self.conn).await?)
    }

    /// Inserts one record and returns it as stored, generated id included.
    pub async fn add_one(&self, record: E::ActiveModel) -> DataResult<E::Model> {
        let table = E::table();
        let txn = self.conn.begin().await?;

        let model = record
            .insert(&txn)
            .await
            .map_err(|err| DataError::classify(&table, err))?;

        txn.commit().await?;
        debug!("Inserted one {} record", table);
        Ok(model)
    }

    /// Inserts the records whose identifier is not stored yet and returns
    /// exactly those. Records already present, or repeating an identifier
    /// seen earlier in the batch, are skipped. Records without an identifier
    /// value are always inserted.
    pub async fn add_many(&self, records: Vec<E::ActiveModel>) -> DataResult<Vec<E::Model>> {
        if records.is_empty() {
            return Ok(Vec::new());
        }

        let table = E::table();
        let txn = self.conn.begin().await?;

        let keys: Vec<E::Key> = records.iter().filter_map(Self::key_of).collect();
        let existing = Self::existing_keys(&txn, &keys).await?;

        let mut seen = HashSet::with_capacity(keys.len());
        let mut inserted = Vec::new();
        let mut skipped = 0usize;

        for record in records {
            let already_stored = Self::key_of(&record)
                .is_some_and(|key| existing.contains(&key) || !seen.insert(key));
            if already_stored {
                skipped += 1;
                continue;
            }

            let model = record
                .insert(&txn)
                .await
                .map_err(|err| DataError::classify(&table, err))?;
            inserted.push(model);
        }

        txn.commit().await?;
        debug!(
            "Inserted {} {} records, skipped {} already present",
            inserted.len(),
            table,
            skipped
        );
        Ok(inserted)
    }

    /// Overwrites every column of the row sharing `record`'s id.
    pub async fn update(&self, record: E::Model) -> DataResult<E::Model> {
        let table = E::table();
        let id = describe(record.get(E::id_column()));
        let active = record.into_active_model().reset_all();

        let txn = self.conn.begin().await?;
        let model = match active.update(&txn).await {
            Ok(model) => model,
            Err(DbErr::RecordNotUpdated | DbErr::RecordNotFound(_)) => {
                return Err(DataError::not_found(&table, id));
            }
            Err(err) => return Err(DataError::classify(&table, err)),
        };
        txn.commit().await?;

        debug!("Updated {} record {}", table, id);
        Ok(model)
    }

    /// Deletes the row and returns it as it was before deletion.
    pub async fn delete(&self, id: i32) -> DataResult<E::Model> {
        let table = E::table();
        let txn = self.conn.begin().await?;

        let Some(model) = E::find_by_id(id).one(&txn).await? else {
            return Err(DataError::not_found(&table, id));
        };

        E::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|err| DataError::classify(&table, err))?;

        txn.commit().await?;
        debug!("Deleted {} record {}", table, id);
        Ok(model)
    }

    /// Deletes every row. Returns the number of rows removed.
    pub async fn clear(&self) -> DataResult<u64> {
        let table = E::table();
        let result = E::delete_many()
            .exec(&self.conn)
            .await
            .map_err(|err| DataError::classify(&table, err))?;
        Ok(result.rows_affected)
    }

    /// Truncates the table and bulk-inserts `records` in one transaction.
    /// Returns the number of rows inserted.
    pub async fn replace_all(&self, records: Vec<E::ActiveModel>) -> DataResult<usize> {
        let txn = self.conn.begin().await?;
        let inserted = Self::replace_within(&txn, records).await?;
        txn.commit().await?;
        Ok(inserted)
    }

    /// Like [`Self::replace_all`], but first empties `D`, a table whose rows
    /// reference this one, inside the same transaction.
    pub async fn replace_all_clearing<D: Table>(
        &self,
        records: Vec<E::ActiveModel>,
    ) -> DataResult<usize> {
        let dependent = D::table();
        let txn = self.conn.begin().await?;

        let cleared = D::delete_many()
            .exec(&txn)
            .await
            .map_err(|err| DataError::classify(&dependent, err))?
            .rows_affected;
        info!("Cleared {} {} records", cleared, dependent);

        let inserted = Self::replace_within(&txn, records).await?;
        txn.commit().await?;
        Ok(inserted)
    }

    async fn replace_within(
        txn: &DatabaseTransaction,
        records: Vec<E::ActiveModel>,
    ) -> DataResult<usize> {
        let table = E::table();

        let removed = E::delete_many()
            .exec(txn)
            .await
            .map_err(|err| DataError::classify(&table, err))?
            .rows_affected;

        for chunk in records.chunks(INSERT_CHUNK_SIZE) {
            E::insert_many(chunk.to_vec())
                .exec(txn)
                .await
                .map_err(|err| DataError::classify(&table, err))?;
        }

        info!(
            "Replaced contents of {}: removed {}, inserted {}",
            table,
            removed,
            records.len()
        );
        Ok(records.len())
    }

    fn key_of(record: &E::ActiveModel) -> Option<E::Key> {
        record
            .get(E::key_column())
            .into_value()
            .and_then(|value| <E::Key as ValueType>::try_from(value).ok())
    }

    async fn existing_keys(
        txn: &DatabaseTransaction,
        keys: &[E::Key],
    ) -> DataResult<HashSet<E::Key>> {
        let mut existing = HashSet::new();

        for chunk in keys.chunks(KEY_LOOKUP_CHUNK) {
            let found: Vec<E::Key> = E::find()
                .select_only()
                .column(E::key_column())
                .filter(E::key_column().is_in(chunk.iter().cloned()))
                .into_tuple()
                .all(txn)
                .await?;
            existing.extend(found);
        }

        Ok(existing)
    }
}

fn describe(value: Value) -> String {
    match value {
        Value::Int(Some(id)) => id.to_string(),
        Value::BigInt(Some(id)) => id.to_string(),
        Value::String(Some(id)) => id.to_string(),
        other => format!("{other:?}"),
    }
}
