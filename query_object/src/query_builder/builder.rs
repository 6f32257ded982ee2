//! The query aggregate
//!
//! A `Query` is bound to one table (and optional alias) on one connection
//! and collects the nodes that make up a statement. Builder methods take
//! `self` and return it for chaining; rendering never mutates.

use super::criterion::Criterion;
use super::grouping::GroupBy;
use super::join::JoinClause;
use super::ordering::Order;
use super::pagination::Pagination;
use super::projection::Projection;
use super::property::Property;
use super::sql_generation::SqlGenerator;
use crate::connection::Connection;
use crate::errors::QueryError;
use crate::validation::{ValidatedAlias, ValidatedTableName};
use std::sync::Arc;
use type_mapping::{FieldMap, SqlValue};

/// Alias given to the row count of derived count queries
pub const COUNT_ALIAS: &str = "cnt";

#[derive(Debug, Clone)]
pub struct Query {
    pub(crate) connection: Arc<dyn Connection>,
    pub(crate) table: ValidatedTableName,
    pub(crate) alias: Option<ValidatedAlias>,
    pub(crate) projections: Vec<Projection>,
    pub(crate) criteria: Vec<Criterion>,
    pub(crate) orders: Vec<Order>,
    pub(crate) group_by: GroupBy,
    pub(crate) pagination: Pagination,
    pub(crate) joins: Vec<JoinClause>,
}

impl Query {
    pub fn new(
        connection: Arc<dyn Connection>,
        table: &str,
        alias: Option<&str>,
    ) -> Result<Self, QueryError> {
        let table = ValidatedTableName::new(table)?;
        let alias = alias.map(ValidatedAlias::new).transpose()?;

        Ok(Self {
            connection,
            table,
            alias,
            projections: Vec::new(),
            criteria: Vec::new(),
            orders: Vec::new(),
            group_by: GroupBy::default(),
            pagination: Pagination::default(),
            joins: Vec::new(),
        })
    }

    pub fn connection(&self) -> &Arc<dyn Connection> {
        &self.connection
    }

    pub fn table_name(&self) -> &str {
        self.table.as_str()
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_ref().map(ValidatedAlias::as_str)
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    /// Add a restriction (AND-combined with the others)
    pub fn add(mut self, criterion: Criterion) -> Self {
        self.criteria.push(criterion);
        self
    }

    pub fn add_all(mut self, criteria: impl IntoIterator<Item = Criterion>) -> Self {
        self.criteria.extend(criteria);
        self
    }

    pub fn add_order(mut self, order: Order) -> Self {
        self.orders.push(order);
        self
    }

    /// Replace the selected columns
    pub fn set_projection(mut self, projection: Projection) -> Self {
        self.projections = vec![projection];
        self
    }

    pub fn add_projection(mut self, projection: Projection) -> Self {
        self.projections.push(projection);
        self
    }

    /// Add a GROUP BY column
    ///
    /// GROUP BY renders ahead of WHERE, which MySQL rejects when the query
    /// also has restrictions; restrict grouped queries with
    /// [`Query::add_having`] instead.
    pub fn add_group_by(mut self, projection: Projection) -> Self {
        self.group_by.projections.push(projection);
        self
    }

    /// Add a HAVING restriction; rendered only when there is a GROUP BY
    pub fn add_having(mut self, criterion: Criterion) -> Self {
        self.group_by.having.push(criterion);
        self
    }

    pub fn set_group_by(mut self, group_by: GroupBy) -> Self {
        self.group_by = group_by;
        self
    }

    pub fn set_first_result(mut self, first_result: i64) -> Self {
        self.pagination.first_result = first_result;
        self
    }

    pub fn set_max_results(mut self, max_results: i64) -> Self {
        self.pagination.max_results = max_results;
        self
    }

    pub fn set_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = pagination;
        self
    }

    pub fn add_joined_query(mut self, query: Query, condition: Criterion) -> Self {
        self.joins.push(JoinClause::new(query, condition));
        self
    }

    /// Join a new query on the same connection and hand it back for
    /// further configuration
    pub fn create_joined_query(
        &mut self,
        table: &str,
        alias: Option<&str>,
        condition: Criterion,
    ) -> Result<&mut Query, QueryError> {
        let query = Query::new(self.connection.clone(), table, alias)?;
        self.joins.push(JoinClause::new(query, condition));
        let index = self.joins.len() - 1;
        Ok(&mut self.joins[index].query)
    }

    /// In-place form of [`Query::add`], used on joined queries
    pub fn push(&mut self, criterion: Criterion) -> &mut Self {
        self.criteria.push(criterion);
        self
    }

    /// Quote a column reference
    ///
    /// A qualified property ignores `alias`; otherwise the name is prefixed
    /// with the alias when one is given.
    pub fn quote_name(&self, alias: Option<&str>, property: &Property) -> String {
        match (property, alias) {
            (Property::Qualified { qualifier, name }, _) => format!(
                "{}.{}",
                self.quote_identifier(qualifier),
                self.quote_identifier(name)
            ),
            (Property::Name(name), Some(alias)) => format!(
                "{}.{}",
                self.quote_identifier(alias),
                self.quote_identifier(name)
            ),
            (Property::Name(name), None) => self.quote_identifier(name),
        }
    }

    pub fn quote_identifier(&self, name: &str) -> String {
        self.connection.quote_identifier(name)
    }

    /// Quote a literal, lower-casing text first when `lower_case` is set
    pub fn prepare_value(&self, value: &SqlValue, lower_case: bool) -> String {
        if lower_case && value.is_text() {
            self.connection.quote_value(&value.to_lowercase())
        } else {
            self.connection.quote_value(value)
        }
    }

    /// `<table>[ AS <alias>]`
    pub fn from_clause(&self) -> String {
        match self.alias() {
            Some(alias) => format!(
                "{} AS {}",
                self.quote_identifier(self.table_name()),
                self.quote_identifier(alias)
            ),
            None => self.quote_identifier(self.table_name()),
        }
    }

    pub fn select_sql(&self) -> String {
        let mut sql = format!(
            "SELECT {} FROM {}",
            SqlGenerator::build_select_clause(self),
            self.from_clause()
        );

        for clause in [
            SqlGenerator::build_join_clause(self),
            SqlGenerator::build_group_by_clause(self),
            SqlGenerator::build_where_clause(self),
            SqlGenerator::build_order_clause(self),
            self.pagination.to_sql(),
        ]
        .into_iter()
        .flatten()
        {
            sql.push(' ');
            sql.push_str(&clause);
        }
        sql
    }

    /// Single-table UPDATE; joined queries and their criteria are ignored
    pub fn update_sql(&self, fields: &FieldMap) -> String {
        let mut sql = format!(
            "UPDATE {} SET {}",
            self.from_clause(),
            SqlGenerator::build_set_clause(self, fields)
        );
        if let Some(where_clause) = SqlGenerator::build_single_table_where_clause(self) {
            sql.push(' ');
            sql.push_str(&where_clause);
        }
        sql
    }

    /// Single-table DELETE; joined queries and their criteria are ignored
    pub fn delete_sql(&self) -> String {
        let mut sql = format!("DELETE FROM {}", self.from_clause());
        if let Some(where_clause) = SqlGenerator::build_single_table_where_clause(self) {
            sql.push(' ');
            sql.push_str(&where_clause);
        }
        sql
    }

    /// Single-row INSERT; criteria and joins are ignored
    pub fn insert_sql(&self, fields: &FieldMap) -> String {
        let (columns, values) = SqlGenerator::build_insert_lists(self, fields);
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.quote_identifier(self.table_name()),
            columns,
            values
        )
    }

    /// Copy used for counting: pagination reset, ordering cleared and
    /// the column list replaced by an aliased row count
    pub fn count_query(&self) -> Query {
        let mut query = self.clone();
        query.pagination = Pagination::default();
        query.orders.clear();
        query.projections = vec![Projection::alias(Projection::row_count(), COUNT_ALIAS)];
        query
    }
}
