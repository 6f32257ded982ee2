use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;
use type_mapping::FieldMap;

/// Mapping of a model type onto one database table
///
/// Models are written and read through serde: serialized fields become
/// columns, fetched rows are deserialized back.
///
/// ```
/// use query_object::TableModel;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Clone, Serialize, Deserialize)]
/// pub struct Customer {
///     pub uid: Option<u64>,
///     pub name: String,
///     pub is_active: bool,
/// }
///
/// impl TableModel for Customer {
///     fn table_name() -> &'static str {
///         "customers"
///     }
///
///     fn soft_delete_field() -> Option<&'static str> {
///         Some("is_active")
///     }
/// }
/// ```
pub trait TableModel: Clone + Send + Sync + Debug + Serialize + DeserializeOwned {
    /// The table name in the database
    fn table_name() -> &'static str;

    /// Primary key column; `None` uses the repository's configured default
    fn id_column() -> Option<&'static str> {
        None
    }

    /// Boolean column cleared instead of deleting the row
    fn soft_delete_field() -> Option<&'static str> {
        None
    }

    /// Adjust the serialized fields before they are written
    ///
    /// Drops internal fields (names starting with `_`) by default.
    fn pre_save(mut fields: FieldMap, _is_create: bool) -> FieldMap {
        fields.retain(|name, _| !name.starts_with('_'));
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use type_mapping::serialize_to_field_map;

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct Note {
        uid: u64,
        text: String,
        _cached: bool,
    }

    impl TableModel for Note {
        fn table_name() -> &'static str {
            "notes"
        }
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Note::id_column(), None);
        assert_eq!(Note::soft_delete_field(), None);
    }

    #[test]
    fn test_pre_save_strips_internal_fields() {
        let note = Note {
            uid: 1,
            text: "hi".to_string(),
            _cached: true,
        };
        let fields = Note::pre_save(serialize_to_field_map(&note).unwrap(), false);
        assert_eq!(fields.columns().collect::<Vec<_>>(), vec!["uid", "text"]);
    }
}
