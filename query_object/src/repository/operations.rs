//! Repository operations
//!
//! Multi-object convenience loops stop at the first failure and report
//! it; earlier successful statements are not rolled back.

use super::core::Repository;
use crate::compat::{OrderArg, RestrictionArg};
use crate::errors::QueryError;
use crate::query_builder::Criterion;
use crate::traits::TableModel;
use type_mapping::{serialize_to_field_map, FieldMap, SqlValue};

impl<T: TableModel> Repository<T> {
    /// Fetch one object by primary key
    pub async fn get(&self, id: impl Into<SqlValue>) -> Result<Option<T>, QueryError> {
        self.base_query()?
            .add(Criterion::eq(self.id_column.as_str(), id))
            .first(self.mode)
            .await
    }

    /// Fetch the objects with the given keys; no keys, no statement
    pub async fn find_by_ids(
        &self,
        ids: Vec<SqlValue>,
        orders: Vec<OrderArg>,
    ) -> Result<Vec<T>, QueryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let restriction = Criterion::in_values(self.id_column.as_str(), ids);
        self.find(vec![restriction.into()], orders, 0, 0).await
    }

    pub async fn find(
        &self,
        restrictions: Vec<RestrictionArg>,
        orders: Vec<OrderArg>,
        first_result: i64,
        max_results: i64,
    ) -> Result<Vec<T>, QueryError> {
        self.create_query(None, restrictions, orders, first_result, max_results)?
            .list(self.mode)
            .await
    }

    pub async fn find_one(
        &self,
        restrictions: Vec<RestrictionArg>,
        orders: Vec<OrderArg>,
    ) -> Result<Option<T>, QueryError> {
        self.create_query(None, restrictions, orders, -1, 1)?
            .first(self.mode)
            .await
    }

    pub async fn count(&self, restrictions: Vec<RestrictionArg>) -> Result<u64, QueryError> {
        self.create_query(None, restrictions, Vec::new(), -1, 0)?
            .count(self.mode)
            .await
    }

    /// Insert a new row and return the id generated by that INSERT
    ///
    /// 0 when the table has no auto-increment key or the insert failed
    /// silently.
    pub async fn create(&self, object: &T) -> Result<u64, QueryError> {
        let fields = T::pre_save(serialize_to_field_map(object)?, true);
        let id = self.base_query()?.insert(&fields, self.mode).await?;
        if id.is_none() {
            tracing::warn!(table = T::table_name(), "create failed");
        }
        Ok(id.unwrap_or(0))
    }

    /// Update the row of an existing object and return it as stored
    ///
    /// Returns `None` when the object has no id, has nothing to update, or
    /// the update failed silently.
    pub async fn save(&self, object: &T) -> Result<Option<T>, QueryError> {
        let mut fields = T::pre_save(serialize_to_field_map(object)?, false);
        let id = match fields.remove(&self.id_column) {
            Some(id) if !id.is_null() => id,
            _ => return Ok(None),
        };
        if fields.is_empty() {
            return Ok(None);
        }

        let updated = self
            .base_query()?
            .add(Criterion::eq(self.id_column.as_str(), id.clone()))
            .try_save(&fields, self.mode)
            .await?;
        if updated.is_none() {
            return Ok(None);
        }
        self.get(id).await
    }

    /// Save several objects, stopping at the first failure
    pub async fn save_all(&self, objects: &[T]) -> Result<bool, QueryError> {
        for object in objects {
            if self.save(object).await?.is_none() {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Delete the row with the given id
    ///
    /// Models with a soft-delete field get that field cleared instead.
    pub async fn delete(&self, id: impl Into<SqlValue>) -> Result<bool, QueryError> {
        let id = id.into();
        if id.is_null() {
            return Ok(false);
        }

        let query = self
            .base_query()?
            .add(Criterion::eq(self.id_column.as_str(), id));
        let outcome = match T::soft_delete_field() {
            Some(field) => {
                let fields = FieldMap::new().with(field, false);
                query.try_save(&fields, self.mode).await?
            }
            None => query.try_delete(self.mode).await?,
        };
        Ok(outcome.is_some())
    }

    pub async fn delete_object(&self, object: &T) -> Result<bool, QueryError> {
        let fields = serialize_to_field_map(object)?;
        match fields.get(&self.id_column) {
            Some(id) => self.delete(id.clone()).await,
            None => Ok(false),
        }
    }

    /// Delete several rows by id, stopping at the first failure
    pub async fn delete_all(&self, ids: Vec<SqlValue>) -> Result<bool, QueryError> {
        for id in ids {
            if !self.delete(id).await? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Delete every row matching the restrictions; returns affected rows
    pub async fn delete_by(&self, restrictions: Vec<RestrictionArg>) -> Result<u64, QueryError> {
        let query = self.create_query(None, restrictions, Vec::new(), -1, 0)?;
        match T::soft_delete_field() {
            Some(field) => {
                let fields = FieldMap::new().with(field, false);
                query.save(&fields, self.mode).await
            }
            None => query.delete(self.mode).await,
        }
    }
}
