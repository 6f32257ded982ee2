//! Criterion nodes
//!
//! Boolean-producing expressions used in WHERE, HAVING and JOIN ... ON.

use super::builder::Query;
use super::property::Property;
use type_mapping::SqlValue;

/// Binary comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOperator {
    Eq,        // =
    Ne,        // !=
    Gt,        // >
    Ge,        // >=
    Lt,        // <
    Le,        // <=
    Like,      // LIKE
    NotLike,   // NOT LIKE
    Regexp,    // REGEXP
    NotRegexp, // NOT REGEXP
}

impl ComparisonOperator {
    pub fn to_sql(&self) -> &'static str {
        match self {
            ComparisonOperator::Eq => "=",
            ComparisonOperator::Ne => "!=",
            ComparisonOperator::Gt => ">",
            ComparisonOperator::Ge => ">=",
            ComparisonOperator::Lt => "<",
            ComparisonOperator::Le => "<=",
            ComparisonOperator::Like => "LIKE",
            ComparisonOperator::NotLike => "NOT LIKE",
            ComparisonOperator::Regexp => "REGEXP",
            ComparisonOperator::NotRegexp => "NOT REGEXP",
        }
    }

    /// Parse an operator token, case-insensitively. `<>` is accepted for `!=`,
    /// `RLIKE` for `REGEXP`.
    pub fn parse(token: &str) -> Option<Self> {
        let token = token
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_ascii_uppercase();
        match token.as_str() {
            "=" => Some(ComparisonOperator::Eq),
            "!=" | "<>" => Some(ComparisonOperator::Ne),
            ">" => Some(ComparisonOperator::Gt),
            ">=" => Some(ComparisonOperator::Ge),
            "<" => Some(ComparisonOperator::Lt),
            "<=" => Some(ComparisonOperator::Le),
            "LIKE" => Some(ComparisonOperator::Like),
            "NOT LIKE" => Some(ComparisonOperator::NotLike),
            "REGEXP" | "RLIKE" => Some(ComparisonOperator::Regexp),
            "NOT REGEXP" | "NOT RLIKE" => Some(ComparisonOperator::NotRegexp),
            _ => None,
        }
    }
}

/// Logical operators for combining criteria
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOperator {
    And,
    Or,
}

impl LogicalOperator {
    pub fn to_sql(&self) -> &'static str {
        match self {
            LogicalOperator::And => "AND",
            LogicalOperator::Or => "OR",
        }
    }
}

/// A node that renders to a boolean SQL predicate
#[derive(Debug, Clone, PartialEq)]
pub enum Criterion {
    /// `<property> <op> <value>`
    Simple {
        property: Property,
        operator: ComparisonOperator,
        value: SqlValue,
        ignore_case: bool,
    },
    /// `<property> IS [NOT] NULL`
    Null { property: Property, negated: bool },
    /// `<property> [NOT ]IN (<v1>,<v2>,...)`
    In {
        property: Property,
        values: Vec<SqlValue>,
        negated: bool,
        ignore_case: bool,
    },
    /// `<property> BETWEEN <min> AND <max>`
    Between {
        property: Property,
        min: SqlValue,
        max: SqlValue,
        ignore_case: bool,
    },
    /// `<left> <op> <right>`, both sides column references
    PropertyComparison {
        left: Property,
        right: Property,
        operator: ComparisonOperator,
        ignore_case: bool,
    },
    /// Parenthesized children joined by AND/OR
    Logical {
        operator: LogicalOperator,
        criteria: Vec<Criterion>,
    },
    /// Raw SQL, rendered verbatim
    Sql(String),
}

impl Criterion {
    fn simple(
        property: impl Into<Property>,
        value: impl Into<SqlValue>,
        operator: ComparisonOperator,
    ) -> Self {
        Criterion::Simple {
            property: property.into(),
            operator,
            value: value.into(),
            ignore_case: false,
        }
    }

    fn property_comparison(
        left: impl Into<Property>,
        right: impl Into<Property>,
        operator: ComparisonOperator,
    ) -> Self {
        Criterion::PropertyComparison {
            left: left.into(),
            right: right.into(),
            operator,
            ignore_case: false,
        }
    }

    /// Comparison with an explicit operator
    pub fn compare(
        property: impl Into<Property>,
        operator: ComparisonOperator,
        value: impl Into<SqlValue>,
    ) -> Self {
        Self::simple(property, value, operator)
    }

    pub fn eq(property: impl Into<Property>, value: impl Into<SqlValue>) -> Self {
        Self::simple(property, value, ComparisonOperator::Eq)
    }

    /// Equality, or `IS NULL` when the value is null
    pub fn eq_or_null(property: impl Into<Property>, value: impl Into<SqlValue>) -> Self {
        let value = value.into();
        if value.is_null() {
            Self::is_null(property)
        } else {
            Self::simple(property, value, ComparisonOperator::Eq)
        }
    }

    pub fn ne(property: impl Into<Property>, value: impl Into<SqlValue>) -> Self {
        Self::simple(property, value, ComparisonOperator::Ne)
    }

    /// Inequality, or `IS NULL` when the value is null
    pub fn ne_or_null(property: impl Into<Property>, value: impl Into<SqlValue>) -> Self {
        let value = value.into();
        if value.is_null() {
            Self::is_null(property)
        } else {
            Self::simple(property, value, ComparisonOperator::Ne)
        }
    }

    pub fn gt(property: impl Into<Property>, value: impl Into<SqlValue>) -> Self {
        Self::simple(property, value, ComparisonOperator::Gt)
    }

    pub fn ge(property: impl Into<Property>, value: impl Into<SqlValue>) -> Self {
        Self::simple(property, value, ComparisonOperator::Ge)
    }

    pub fn lt(property: impl Into<Property>, value: impl Into<SqlValue>) -> Self {
        Self::simple(property, value, ComparisonOperator::Lt)
    }

    pub fn le(property: impl Into<Property>, value: impl Into<SqlValue>) -> Self {
        Self::simple(property, value, ComparisonOperator::Le)
    }

    pub fn like(property: impl Into<Property>, pattern: impl Into<SqlValue>) -> Self {
        Self::simple(property, pattern, ComparisonOperator::Like)
    }

    pub fn between(
        property: impl Into<Property>,
        min: impl Into<SqlValue>,
        max: impl Into<SqlValue>,
    ) -> Self {
        Criterion::Between {
            property: property.into(),
            min: min.into(),
            max: max.into(),
            ignore_case: false,
        }
    }

    pub fn is_null(property: impl Into<Property>) -> Self {
        Criterion::Null {
            property: property.into(),
            negated: false,
        }
    }

    pub fn is_not_null(property: impl Into<Property>) -> Self {
        Criterion::Null {
            property: property.into(),
            negated: true,
        }
    }

    /// IN list. An empty list renders `IN ()`, which the server rejects.
    pub fn in_values<I, V>(property: impl Into<Property>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<SqlValue>,
    {
        Criterion::In {
            property: property.into(),
            values: values.into_iter().map(Into::into).collect(),
            negated: false,
            ignore_case: false,
        }
    }

    pub fn not_in_values<I, V>(property: impl Into<Property>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<SqlValue>,
    {
        Criterion::In {
            property: property.into(),
            values: values.into_iter().map(Into::into).collect(),
            negated: true,
            ignore_case: false,
        }
    }

    pub fn and(criteria: impl IntoIterator<Item = Criterion>) -> Self {
        Criterion::Logical {
            operator: LogicalOperator::And,
            criteria: criteria.into_iter().collect(),
        }
    }

    pub fn or(criteria: impl IntoIterator<Item = Criterion>) -> Self {
        Criterion::Logical {
            operator: LogicalOperator::Or,
            criteria: criteria.into_iter().collect(),
        }
    }

    pub fn eq_property(left: impl Into<Property>, right: impl Into<Property>) -> Self {
        Self::property_comparison(left, right, ComparisonOperator::Eq)
    }

    pub fn ne_property(left: impl Into<Property>, right: impl Into<Property>) -> Self {
        Self::property_comparison(left, right, ComparisonOperator::Ne)
    }

    pub fn gt_property(left: impl Into<Property>, right: impl Into<Property>) -> Self {
        Self::property_comparison(left, right, ComparisonOperator::Gt)
    }

    pub fn ge_property(left: impl Into<Property>, right: impl Into<Property>) -> Self {
        Self::property_comparison(left, right, ComparisonOperator::Ge)
    }

    pub fn lt_property(left: impl Into<Property>, right: impl Into<Property>) -> Self {
        Self::property_comparison(left, right, ComparisonOperator::Lt)
    }

    pub fn le_property(left: impl Into<Property>, right: impl Into<Property>) -> Self {
        Self::property_comparison(left, right, ComparisonOperator::Le)
    }

    /// Raw SQL escape hatch; the text is not escaped
    pub fn sql(sql: impl Into<String>) -> Self {
        Criterion::Sql(sql.into())
    }

    /// Compare case-insensitively
    ///
    /// Logical nodes pass the flag on to their children. Null checks and
    /// raw SQL are unaffected.
    pub fn ignore_case(self) -> Self {
        match self {
            Criterion::Simple {
                property,
                operator,
                value,
                ..
            } => Criterion::Simple {
                property,
                operator,
                value,
                ignore_case: true,
            },
            Criterion::In {
                property,
                values,
                negated,
                ..
            } => Criterion::In {
                property,
                values,
                negated,
                ignore_case: true,
            },
            Criterion::Between {
                property, min, max, ..
            } => Criterion::Between {
                property,
                min,
                max,
                ignore_case: true,
            },
            Criterion::PropertyComparison {
                left,
                right,
                operator,
                ..
            } => Criterion::PropertyComparison {
                left,
                right,
                operator,
                ignore_case: true,
            },
            Criterion::Logical { operator, criteria } => Criterion::Logical {
                operator,
                criteria: criteria.into_iter().map(Criterion::ignore_case).collect(),
            },
            other => other,
        }
    }

    /// Append a child to a logical node
    ///
    /// Any other node is combined with the child under a new AND node.
    pub fn add(self, criterion: Criterion) -> Self {
        match self {
            Criterion::Logical {
                operator,
                mut criteria,
            } => {
                criteria.push(criterion);
                Criterion::Logical { operator, criteria }
            }
            other => Criterion::and(vec![other, criterion]),
        }
    }

    /// True for a logical node without children, which renders as ""
    pub fn is_empty(&self) -> bool {
        matches!(self, Criterion::Logical { criteria, .. } if criteria.is_empty())
    }

    /// Render against `local` (alias resolution) and `overall` (quoting)
    pub fn render(&self, local: &Query, overall: &Query) -> String {
        match self {
            Criterion::Simple {
                property,
                operator,
                value,
                ignore_case,
            } => {
                let lower = *ignore_case && value.is_text();
                format!(
                    "{} {} {}",
                    wrap_lower(overall.quote_name(local.alias(), property), lower),
                    operator.to_sql(),
                    overall.prepare_value(value, lower)
                )
            }
            Criterion::Null { property, negated } => {
                let keyword = if *negated { "IS NOT NULL" } else { "IS NULL" };
                format!("{} {}", overall.quote_name(local.alias(), property), keyword)
            }
            Criterion::In {
                property,
                values,
                negated,
                ignore_case,
            } => {
                let values = values
                    .iter()
                    .map(|value| overall.prepare_value(value, *ignore_case))
                    .collect::<Vec<_>>()
                    .join(",");
                format!(
                    "{} {}IN ({})",
                    wrap_lower(overall.quote_name(local.alias(), property), *ignore_case),
                    if *negated { "NOT " } else { "" },
                    values
                )
            }
            Criterion::Between {
                property,
                min,
                max,
                ignore_case,
            } => {
                let lower = *ignore_case && min.is_text() && max.is_text();
                format!(
                    "{} BETWEEN {} AND {}",
                    wrap_lower(overall.quote_name(local.alias(), property), lower),
                    overall.prepare_value(min, lower),
                    overall.prepare_value(max, lower)
                )
            }
            Criterion::PropertyComparison {
                left,
                right,
                operator,
                ignore_case,
            } => format!(
                "{} {} {}",
                wrap_lower(overall.quote_name(local.alias(), left), *ignore_case),
                operator.to_sql(),
                wrap_lower(overall.quote_name(local.alias(), right), *ignore_case)
            ),
            Criterion::Logical { operator, criteria } => criteria
                .iter()
                .map(|criterion| format!("({})", criterion.render(local, overall)))
                .collect::<Vec<_>>()
                .join(&format!(" {} ", operator.to_sql())),
            Criterion::Sql(sql) => sql.clone(),
        }
    }
}

fn wrap_lower(expression: String, lower: bool) -> String {
    if lower {
        format!("LOWER({})", expression)
    } else {
        expression
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::MemoryConnection;
    use std::sync::Arc;

    fn query(table: &str, alias: Option<&str>) -> Query {
        Query::new(Arc::new(MemoryConnection::new()), table, alias).unwrap()
    }

    fn render(criterion: &Criterion) -> String {
        let q = query("dual", None);
        criterion.render(&q, &q)
    }

    #[test]
    fn test_simple_comparisons() {
        assert_eq!(render(&Criterion::eq("aName", "aValue")), "`aName` = 'aValue'");
        assert_eq!(render(&Criterion::ne("aName", 13)), "`aName` != 13");
        assert_eq!(render(&Criterion::ge("price", 2.5)), "`price` >= 2.5");
        assert_eq!(render(&Criterion::like("name", "%x%")), "`name` LIKE '%x%'");
    }

    #[test]
    fn test_ignore_case_only_folds_text() {
        assert_eq!(
            render(&Criterion::eq("aName", "aValue").ignore_case()),
            "LOWER(`aName`) = 'avalue'"
        );
        assert_eq!(render(&Criterion::eq("aName", 13).ignore_case()), "`aName` = 13");
        assert_eq!(
            render(&Criterion::like("aName", "A%").ignore_case()),
            "LOWER(`aName`) LIKE 'a%'"
        );
    }

    #[test]
    fn test_null_checks() {
        assert_eq!(render(&Criterion::is_null("aName")), "`aName` IS NULL");
        assert_eq!(render(&Criterion::is_not_null("aName")), "`aName` IS NOT NULL");
        assert_eq!(
            render(&Criterion::eq_or_null("aName", Option::<i64>::None)),
            "`aName` IS NULL"
        );
        assert_eq!(
            render(&Criterion::ne_or_null("aName", Some(3))),
            "`aName` != 3"
        );
    }

    #[test]
    fn test_in_lists() {
        assert_eq!(
            render(&Criterion::in_values("aName", ["aValue1", "aValue2"]).ignore_case()),
            "LOWER(`aName`) IN ('avalue1','avalue2')"
        );
        assert_eq!(
            render(&Criterion::not_in_values("aName", [1, 2])),
            "`aName` NOT IN (1,2)"
        );
        assert_eq!(
            render(&Criterion::in_values("aName", Vec::<i64>::new())),
            "`aName` IN ()"
        );
    }

    #[test]
    fn test_between() {
        assert_eq!(render(&Criterion::between("n", 1, 5)), "`n` BETWEEN 1 AND 5");
        assert_eq!(
            render(&Criterion::between("n", "A", "C").ignore_case()),
            "LOWER(`n`) BETWEEN 'a' AND 'c'"
        );
        // mixed operand types are not folded
        assert_eq!(
            render(&Criterion::between("n", "A", 3).ignore_case()),
            "`n` BETWEEN 'A' AND 3"
        );
    }

    #[test]
    fn test_property_comparison_uses_local_alias() {
        let q = query("dual", Some("a"));
        let criterion = Criterion::eq_property("details", ("b", "uid"));
        assert_eq!(criterion.render(&q, &q), "`a`.`details` = `b`.`uid`");

        let folded = Criterion::ne_property("x", "y").ignore_case();
        assert_eq!(folded.render(&q, &q), "LOWER(`a`.`x`) != LOWER(`a`.`y`)");
    }

    #[test]
    fn test_logical_nodes() {
        let criterion = Criterion::or(vec![
            Criterion::eq("a", 1),
            Criterion::and(vec![Criterion::eq("b", 2), Criterion::sql("c > d")]),
        ]);
        assert_eq!(render(&criterion), "(`a` = 1) OR ((`b` = 2) AND (c > d))");
        assert_eq!(render(&Criterion::and(vec![])), "");
        assert!(Criterion::and(vec![]).is_empty());
    }

    #[test]
    fn test_add_to_logical() {
        let criterion = Criterion::or(vec![Criterion::eq("a", 1)]).add(Criterion::eq("b", 2));
        assert_eq!(render(&criterion), "(`a` = 1) OR (`b` = 2)");

        let criterion = Criterion::eq("a", 1).add(Criterion::eq("b", 2));
        assert_eq!(render(&criterion), "(`a` = 1) AND (`b` = 2)");
    }

    #[test]
    fn test_operator_parsing() {
        assert_eq!(ComparisonOperator::parse("like"), Some(ComparisonOperator::Like));
        assert_eq!(ComparisonOperator::parse("<>"), Some(ComparisonOperator::Ne));
        assert_eq!(ComparisonOperator::parse(">="), Some(ComparisonOperator::Ge));
        assert_eq!(ComparisonOperator::parse("~"), None);
        assert_eq!(ComparisonOperator::parse("not  like"), Some(ComparisonOperator::NotLike));
        assert_eq!(ComparisonOperator::parse("RLIKE"), Some(ComparisonOperator::Regexp));
        assert_eq!(ComparisonOperator::parse("not regexp"), Some(ComparisonOperator::NotRegexp));
    }
}
