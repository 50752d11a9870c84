//! Column resolution for a collection

use db_core::{Column, DocumentStore};

use crate::BrowseError;

/// Resolve the ordered display columns for `collection`.
///
/// Delegates to the store's field enumeration. The result is not cached
/// here; call again on every collection switch and let the session keep the
/// columns inside the activation.
pub fn resolve_columns(
    store: &dyn DocumentStore,
    collection: &str,
) -> Result<Vec<Column>, BrowseError> {
    let groups = store.fields_of(collection).map_err(|e| {
        BrowseError::Schema(format!("cannot enumerate fields of '{}': {}", collection, e))
    })?;

    let mut columns = Vec::with_capacity(groups.len());
    for group in groups {
        let column = Column::from_aliases(group).ok_or_else(|| {
            BrowseError::Schema(format!(
                "collection '{}' reported an empty alias group",
                collection
            ))
        })?;
        columns.push(column);
    }
    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::MemorySource;
    use db_core::AliasGroup;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> db_core::Document {
        match value {
            serde_json::Value::Object(map) => map,
            _ => panic!("test document must be an object"),
        }
    }

    #[test]
    fn test_resolves_configured_groups_in_order() {
        let mut store = MemorySource::new("test");
        store.insert_collection("users", vec![doc(json!({ "name": "a" }))]);
        store.set_alias_groups(
            "users",
            vec![AliasGroup::new(["name", "nm"]), AliasGroup::new(["email"])],
        );

        let columns = resolve_columns(&store, "users").unwrap();
        let labels: Vec<_> = columns.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, ["name", "email"]);
    }

    #[test]
    fn test_unknown_collection_is_schema_error() {
        let store = MemorySource::new("test");
        let err = resolve_columns(&store, "missing").unwrap_err();
        assert!(matches!(err, BrowseError::Schema(_)));
    }

    #[test]
    fn test_empty_alias_group_is_schema_error() {
        let mut store = MemorySource::new("test");
        store.insert_collection("users", vec![]);
        store.set_alias_groups("users", vec![AliasGroup::new(Vec::<String>::new())]);

        let err = resolve_columns(&store, "users").unwrap_err();
        assert!(matches!(err, BrowseError::Schema(_)));
    }
}
