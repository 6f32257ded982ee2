use super::builder::Query;
use super::criterion::Criterion;

/// A joined query and the criterion it is joined on
///
/// The condition is rendered with the parent as local context, so bare
/// names resolve to the parent alias; child columns need an explicit
/// `(alias, column)` pair. The child's own criteria are merged into the
/// parent's WHERE clause, not into the ON condition.
#[derive(Debug, Clone)]
pub struct JoinClause {
    pub query: Query,
    pub condition: Criterion,
}

impl JoinClause {
    pub fn new(query: Query, condition: Criterion) -> Self {
        Self { query, condition }
    }

    pub fn to_sql(&self, parent: &Query) -> String {
        format!(
            "INNER JOIN {} ON {}",
            self.query.from_clause(),
            self.condition.render(parent, &self.query)
        )
    }
}
