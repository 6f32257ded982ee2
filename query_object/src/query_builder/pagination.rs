/// Pagination configuration
///
/// Negative values mean "unset". LIMIT is only emitted for a positive
/// `max_results`, and OFFSET only together with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub first_result: i64,
    pub max_results: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new()
    }
}

impl Pagination {
    pub fn new() -> Self {
        Self {
            first_result: -1,
            max_results: -1,
        }
    }

    pub fn with_first_result(mut self, first_result: i64) -> Self {
        self.first_result = first_result;
        self
    }

    pub fn with_max_results(mut self, max_results: i64) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn to_sql(&self) -> Option<String> {
        if self.max_results <= 0 {
            return None;
        }

        let mut clause = format!("LIMIT {}", self.max_results);
        if self.first_result >= 0 {
            clause.push_str(&format!(" OFFSET {}", self.first_result));
        }
        Some(clause)
    }
}
