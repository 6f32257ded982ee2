//! Column expressions for SELECT and GROUP BY lists

use super::builder::Query;
use super::property::Property;

/// Represents SQL aggregate functions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateFunction {
    /// COUNT(field)
    Count,
    /// COUNT(DISTINCT field)
    CountDistinct,
    /// SUM(field)
    Sum,
    /// AVG(field)
    Avg,
    /// MIN(field)
    Min,
    /// MAX(field)
    Max,
}

impl AggregateFunction {
    pub fn to_sql(&self) -> &'static str {
        match self {
            AggregateFunction::Count => "COUNT",
            AggregateFunction::CountDistinct => "COUNT",
            AggregateFunction::Sum => "SUM",
            AggregateFunction::Avg => "AVG",
            AggregateFunction::Min => "MIN",
            AggregateFunction::Max => "MAX",
        }
    }

    pub fn is_distinct(&self) -> bool {
        matches!(self, AggregateFunction::CountDistinct)
    }
}

/// A node that renders to a SQL value expression
#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    /// Plain column reference
    Property(Property),
    /// `FUNC(<property>)`
    Aggregate {
        function: AggregateFunction,
        property: Property,
    },
    /// `COUNT(*)`
    RowCount,
    /// `DISTINCT <inner>`
    Distinct(Box<Projection>),
    /// `<inner> AS <alias>`
    Alias {
        projection: Box<Projection>,
        alias: String,
    },
    /// Raw SQL, rendered verbatim
    Sql(String),
    /// Several columns rendered as one comma-joined unit
    Multi(Vec<Projection>),
}

impl Projection {
    pub fn property(property: impl Into<Property>) -> Self {
        Projection::Property(property.into())
    }

    pub fn property_as(property: impl Into<Property>, alias: impl Into<String>) -> Self {
        Self::alias(Self::property(property), alias)
    }

    pub fn distinct(projection: Projection) -> Self {
        Projection::Distinct(Box::new(projection))
    }

    pub fn row_count() -> Self {
        Projection::RowCount
    }

    pub fn count(property: impl Into<Property>) -> Self {
        Self::aggregate(AggregateFunction::Count, property)
    }

    pub fn count_distinct(property: impl Into<Property>) -> Self {
        Self::aggregate(AggregateFunction::CountDistinct, property)
    }

    pub fn avg(property: impl Into<Property>) -> Self {
        Self::aggregate(AggregateFunction::Avg, property)
    }

    pub fn sum(property: impl Into<Property>) -> Self {
        Self::aggregate(AggregateFunction::Sum, property)
    }

    pub fn min(property: impl Into<Property>) -> Self {
        Self::aggregate(AggregateFunction::Min, property)
    }

    pub fn max(property: impl Into<Property>) -> Self {
        Self::aggregate(AggregateFunction::Max, property)
    }

    pub fn aggregate(function: AggregateFunction, property: impl Into<Property>) -> Self {
        Projection::Aggregate {
            function,
            property: property.into(),
        }
    }

    pub fn alias(projection: Projection, alias: impl Into<String>) -> Self {
        Projection::Alias {
            projection: Box::new(projection),
            alias: alias.into(),
        }
    }

    pub fn sql(sql: impl Into<String>) -> Self {
        Projection::Sql(sql.into())
    }

    pub fn multi(projections: impl IntoIterator<Item = Projection>) -> Self {
        Projection::Multi(projections.into_iter().collect())
    }

    /// Chaining form of [`Projection::alias`]
    pub fn as_alias(self, alias: impl Into<String>) -> Self {
        Self::alias(self, alias)
    }

    pub fn render(&self, local: &Query, overall: &Query) -> String {
        match self {
            Projection::Property(property) => overall.quote_name(local.alias(), property),
            Projection::Aggregate { function, property } => format!(
                "{}({}{})",
                function.to_sql(),
                if function.is_distinct() { "DISTINCT " } else { "" },
                overall.quote_name(local.alias(), property)
            ),
            Projection::RowCount => "COUNT(*)".to_string(),
            Projection::Distinct(inner) => format!("DISTINCT {}", inner.render(local, overall)),
            Projection::Alias { projection, alias } => format!(
                "{} AS {}",
                projection.render(local, overall),
                overall.quote_identifier(alias)
            ),
            Projection::Sql(sql) => sql.clone(),
            Projection::Multi(projections) => projections
                .iter()
                .map(|projection| projection.render(local, overall))
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}
