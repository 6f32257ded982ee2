//! Clause assembly for rendered statements
//!
//! Each builder returns `None` when its clause has no content, so the
//! caller can skip it entirely.

use super::builder::Query;
use super::criterion::Criterion;
use type_mapping::FieldMap;

pub struct SqlGenerator;

impl SqlGenerator {
    /// Column list, `<alias>.*` or `*`
    pub fn build_select_clause(query: &Query) -> String {
        if !query.projections.is_empty() {
            return query
                .projections
                .iter()
                .map(|projection| projection.render(query, query))
                .collect::<Vec<_>>()
                .join(", ");
        }

        match query.alias() {
            Some(alias) => format!("{}.*", query.quote_identifier(alias)),
            None => "*".to_string(),
        }
    }

    pub fn build_join_clause(query: &Query) -> Option<String> {
        if query.joins.is_empty() {
            return None;
        }

        Some(
            query
                .joins
                .iter()
                .map(|join| join.to_sql(query))
                .collect::<Vec<_>>()
                .join(" "),
        )
    }

    /// GROUP BY, followed by HAVING when there are having criteria
    pub fn build_group_by_clause(query: &Query) -> Option<String> {
        let group_by = &query.group_by;
        if group_by.is_empty() {
            return None;
        }

        let mut clause = format!(
            "GROUP BY {}",
            group_by
                .projections
                .iter()
                .map(|projection| projection.render(query, query))
                .collect::<Vec<_>>()
                .join(", ")
        );

        if group_by.has_having() {
            let having = Self::join_criteria(group_by.having.iter().map(|c| (c, query)), query);
            clause.push_str(" HAVING ");
            clause.push_str(&having);
        }
        Some(clause)
    }

    /// Own criteria first, then those of each joined query in its own
    /// alias context, all in one AND chain
    pub fn build_where_clause(query: &Query) -> Option<String> {
        let own = query.criteria.iter().map(|criterion| (criterion, query));
        let joined = query.joins.iter().flat_map(|join| {
            join.query
                .criteria
                .iter()
                .map(move |criterion| (criterion, &join.query))
        });
        Self::where_from(Self::join_criteria(own.chain(joined), query))
    }

    /// WHERE over the query's own criteria only, for statements that
    /// render no JOIN
    pub fn build_single_table_where_clause(query: &Query) -> Option<String> {
        let own = query.criteria.iter().map(|criterion| (criterion, query));
        Self::where_from(Self::join_criteria(own, query))
    }

    fn where_from(conditions: String) -> Option<String> {
        if conditions.is_empty() {
            None
        } else {
            Some(format!("WHERE {}", conditions))
        }
    }

    pub fn build_order_clause(query: &Query) -> Option<String> {
        let orders = query
            .orders
            .iter()
            .map(|order| order.render(query, query))
            .collect::<Vec<_>>()
            .join(",");

        if orders.trim().is_empty() {
            None
        } else {
            Some(format!("ORDER BY {}", orders))
        }
    }

    /// `` `col`=value `` pairs; null values render as NULL
    pub fn build_set_clause(query: &Query, fields: &FieldMap) -> String {
        fields
            .iter()
            .map(|(column, value)| {
                format!(
                    "{}={}",
                    query.quote_identifier(column),
                    query.prepare_value(value, false)
                )
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn build_insert_lists(query: &Query, fields: &FieldMap) -> (String, String) {
        let columns = fields
            .columns()
            .map(|column| query.quote_identifier(column))
            .collect::<Vec<_>>()
            .join(", ");
        let values = fields
            .iter()
            .map(|(_, value)| query.prepare_value(value, false))
            .collect::<Vec<_>>()
            .join(", ");
        (columns, values)
    }

    /// Parenthesize each criterion rendered in its local context and join
    /// with AND
    fn join_criteria<'a>(
        criteria: impl Iterator<Item = (&'a Criterion, &'a Query)>,
        overall: &Query,
    ) -> String {
        criteria
            .map(|(criterion, local)| format!("({})", criterion.render(local, overall)))
            .collect::<Vec<_>>()
            .join(" AND ")
    }
}
