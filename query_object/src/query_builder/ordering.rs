use super::builder::Query;
use super::property::Property;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn to_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// One ORDER BY term
#[derive(Debug, Clone, PartialEq)]
pub enum Order {
    Property {
        property: Property,
        direction: SortOrder,
        ignore_case: bool,
    },
    /// Raw SQL such as `"attr3 DESC"`, rendered verbatim
    Sql(String),
}

impl Order {
    pub fn new(property: impl Into<Property>, direction: SortOrder) -> Self {
        Order::Property {
            property: property.into(),
            direction,
            ignore_case: false,
        }
    }

    pub fn asc(property: impl Into<Property>) -> Self {
        Self::new(property, SortOrder::Asc)
    }

    pub fn desc(property: impl Into<Property>) -> Self {
        Self::new(property, SortOrder::Desc)
    }

    pub fn sql(sql: impl Into<String>) -> Self {
        Order::Sql(sql.into())
    }

    /// Sort on the lower-cased column; raw SQL is unaffected
    pub fn ignore_case(self) -> Self {
        match self {
            Order::Property {
                property,
                direction,
                ..
            } => Order::Property {
                property,
                direction,
                ignore_case: true,
            },
            other => other,
        }
    }

    /// Ascending adds no suffix
    pub fn render(&self, local: &Query, overall: &Query) -> String {
        match self {
            Order::Property {
                property,
                direction,
                ignore_case,
            } => {
                let mut sql = overall.quote_name(local.alias(), property);
                if *ignore_case {
                    sql = format!("LOWER({})", sql);
                }
                if *direction == SortOrder::Desc {
                    sql.push(' ');
                    sql.push_str(direction.to_sql());
                }
                sql
            }
            Order::Sql(sql) => sql.clone(),
        }
    }
}
