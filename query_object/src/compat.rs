//! Loosely-typed convenience arguments
//!
//! Repository methods accept restrictions and orderings as strings,
//! `(field, value)` pairs or prebuilt nodes. This module turns those into
//! structured [`Criterion`] and [`Order`] nodes so the query builder only
//! ever sees the latter.

use crate::errors::QueryError;
use crate::query_builder::{ComparisonOperator, Criterion, Order, Property};
use type_mapping::{value_to_sql_value, SqlValue};

/// One restriction argument
#[derive(Debug, Clone, PartialEq)]
pub enum RestrictionArg {
    Criterion(Criterion),
    /// Raw SQL fragment
    Sql(String),
    /// Field compared with a value; the operator defaults to `=`
    Field {
        field: String,
        value: SqlValue,
        operator: Option<String>,
    },
}

impl From<Criterion> for RestrictionArg {
    fn from(criterion: Criterion) -> Self {
        RestrictionArg::Criterion(criterion)
    }
}

impl From<&str> for RestrictionArg {
    fn from(sql: &str) -> Self {
        RestrictionArg::Sql(sql.to_string())
    }
}

impl From<String> for RestrictionArg {
    fn from(sql: String) -> Self {
        RestrictionArg::Sql(sql)
    }
}

impl<V: Into<SqlValue>> From<(&str, V)> for RestrictionArg {
    fn from((field, value): (&str, V)) -> Self {
        RestrictionArg::Field {
            field: field.to_string(),
            value: value.into(),
            operator: None,
        }
    }
}

impl<V: Into<SqlValue>> From<(&str, V, &str)> for RestrictionArg {
    fn from((field, value, operator): (&str, V, &str)) -> Self {
        RestrictionArg::Field {
            field: field.to_string(),
            value: value.into(),
            operator: Some(operator.to_string()),
        }
    }
}

/// How several restriction arguments are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Combine {
    #[default]
    And,
    Or,
}

/// One ordering argument
#[derive(Debug, Clone, PartialEq)]
pub enum OrderArg {
    Order(Order),
    /// Legacy form such as `"attr4 desc"`
    Text(String),
}

impl From<Order> for OrderArg {
    fn from(order: Order) -> Self {
        OrderArg::Order(order)
    }
}

impl From<&str> for OrderArg {
    fn from(text: &str) -> Self {
        OrderArg::Text(text.to_string())
    }
}

impl From<String> for OrderArg {
    fn from(text: String) -> Self {
        OrderArg::Text(text)
    }
}

impl OrderArg {
    pub fn into_order(self) -> Order {
        match self {
            OrderArg::Order(order) => order,
            OrderArg::Text(text) => to_order(&text),
        }
    }
}

fn is_plain_column(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

fn to_property(text: &str) -> Option<Property> {
    match text.split_once('.') {
        Some((qualifier, name)) if is_plain_column(qualifier) && is_plain_column(name) => {
            Some(Property::qualified(qualifier, name))
        }
        None if is_plain_column(text) => Some(Property::from(text)),
        _ => None,
    }
}

/// Parse a legacy ordering string
///
/// A trailing `asc`/`desc` keyword (any case) sets the direction, and a
/// single word sorts ascending. Anything that is not a plain, optionally
/// qualified column is kept as raw SQL.
pub fn to_order(text: &str) -> Order {
    let text = text.trim();
    let (column, ascending) = match text.rfind(' ') {
        Some(pos) => match text[pos + 1..].to_ascii_lowercase().as_str() {
            "desc" => (text[..pos].trim_end(), false),
            "asc" => (text[..pos].trim_end(), true),
            _ => (text, true),
        },
        None => (text, true),
    };

    match to_property(column) {
        Some(property) if ascending => Order::asc(property),
        Some(property) => Order::desc(property),
        None => {
            tracing::warn!(order = text, "ordering kept as raw SQL");
            Order::sql(text)
        }
    }
}

fn list_values(value: SqlValue) -> Vec<SqlValue> {
    match value {
        SqlValue::Json(serde_json::Value::Array(items)) => {
            items.into_iter().map(value_to_sql_value).collect()
        }
        other => vec![other],
    }
}

/// Build a criterion from a field, a value and an optional operator
///
/// A null value yields `IS NULL` for `=` and `IS NOT NULL` for any other
/// operator. `IN`/`NOT IN` expect a JSON array value; a scalar is taken
/// as a one-element list.
pub fn to_criterion(
    field: &str,
    value: impl Into<SqlValue>,
    operator: Option<&str>,
) -> Result<Criterion, QueryError> {
    let value = value.into();
    let operator = operator.unwrap_or("=").trim();

    if value.is_null() {
        return Ok(if operator == "=" {
            Criterion::is_null(field)
        } else {
            Criterion::is_not_null(field)
        });
    }

    match operator.to_ascii_lowercase().as_str() {
        "in" => Ok(Criterion::in_values(field, list_values(value))),
        "not in" => Ok(Criterion::not_in_values(field, list_values(value))),
        _ => {
            let parsed = ComparisonOperator::parse(operator)
                .ok_or_else(|| QueryError::InvalidOperator(operator.to_string()))?;
            Ok(Criterion::compare(field, parsed, value))
        }
    }
}

impl RestrictionArg {
    pub fn into_criterion(self) -> Result<Criterion, QueryError> {
        match self {
            RestrictionArg::Criterion(criterion) => Ok(criterion),
            RestrictionArg::Sql(sql) => {
                tracing::debug!(sql = %sql, "raw SQL restriction");
                Ok(Criterion::sql(sql))
            }
            RestrictionArg::Field {
                field,
                value,
                operator,
            } => to_criterion(&field, value, operator.as_deref()),
        }
    }
}

/// Combine restriction arguments into one criterion
///
/// Returns `None` for no arguments, so no empty logical node is ever
/// attached to a query.
pub fn to_restrictions<I>(args: I, combine: Combine) -> Result<Option<Criterion>, QueryError>
where
    I: IntoIterator,
    I::Item: Into<RestrictionArg>,
{
    let criteria = args
        .into_iter()
        .map(|arg| arg.into().into_criterion())
        .collect::<Result<Vec<_>, _>>()?;

    if criteria.is_empty() {
        return Ok(None);
    }

    Ok(Some(match combine {
        Combine::And => Criterion::and(criteria),
        Combine::Or => Criterion::or(criteria),
    }))
}

pub fn to_orders<I>(args: I) -> Vec<Order>
where
    I: IntoIterator,
    I::Item: Into<OrderArg>,
{
    args.into_iter().map(|arg| arg.into().into_order()).collect()
}
