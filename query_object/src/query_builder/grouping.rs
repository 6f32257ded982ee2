use super::criterion::Criterion;
use super::projection::Projection;

/// Represents a GROUP BY list with its HAVING criteria
///
/// HAVING is only rendered when at least one group-by column exists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupBy {
    /// Columns to group by
    pub projections: Vec<Projection>,
    /// Criteria applied to grouped rows
    pub having: Vec<Criterion>,
}

impl GroupBy {
    pub fn new(projections: Vec<Projection>) -> Self {
        Self {
            projections,
            having: Vec::new(),
        }
    }

    pub fn single(projection: Projection) -> Self {
        Self::new(vec![projection])
    }

    /// Add a single HAVING criterion
    pub fn having(mut self, criterion: Criterion) -> Self {
        self.having.push(criterion);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.projections.is_empty()
    }

    pub fn has_having(&self) -> bool {
        !self.having.is_empty()
    }
}
