use crate::types::SqlValue;

/// Ordered column/value pairs used for SET and VALUES lists
///
/// Insertion order is kept so rendered statements are deterministic.
/// Setting an existing column replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMap {
    fields: Vec<(String, SqlValue)>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Set a column value (chaining form)
    pub fn with(mut self, column: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        self.set(column, value);
        self
    }

    pub fn set(&mut self, column: impl Into<String>, value: impl Into<SqlValue>) {
        let column = column.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(name, _)| *name == column) {
            Some(entry) => entry.1 = value,
            None => self.fields.push((column, value)),
        }
    }

    pub fn get(&self, column: &str) -> Option<&SqlValue> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn remove(&mut self, column: &str) -> Option<SqlValue> {
        let index = self.fields.iter().position(|(name, _)| name == column)?;
        Some(self.fields.remove(index).1)
    }

    /// Keep only the columns for which the predicate holds
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&str, &SqlValue) -> bool,
    {
        self.fields.retain(|(name, value)| keep(name, value));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SqlValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for FieldMap
where
    K: Into<String>,
    V: Into<SqlValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = FieldMap::new();
        for (column, value) in iter {
            map.set(column, value);
        }
        map
    }
}

impl IntoIterator for FieldMap {
    type Item = (String, SqlValue);
    type IntoIter = std::vec::IntoIter<(String, SqlValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_is_kept() {
        let fields = FieldMap::new().with("b", 1).with("a", "x").with("c", true);
        let columns: Vec<&str> = fields.columns().collect();
        assert_eq!(columns, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut fields = FieldMap::new().with("a", 1).with("b", 2);
        fields.set("a", 3);
        assert_eq!(fields.len(), 2);
        assert_eq!(fields.get("a"), Some(&SqlValue::Integer(3)));
        assert_eq!(fields.columns().next(), Some("a"));
    }

    #[test]
    fn test_remove_and_retain() {
        let mut fields: FieldMap = vec![("uid", 1), ("_cache", 2), ("n", 3)].into_iter().collect();
        assert_eq!(fields.remove("uid"), Some(SqlValue::Integer(1)));
        fields.retain(|name, _| !name.starts_with('_'));
        assert_eq!(fields.columns().collect::<Vec<_>>(), vec!["n"]);
        assert!(fields.remove("missing").is_none());
    }
}
