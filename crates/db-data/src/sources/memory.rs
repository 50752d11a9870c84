//! In-memory document source

use std::collections::HashMap;

use anyhow::{bail, Result};
use db_core::{AliasGroup, Document, DocumentStore};
use indexmap::IndexMap;

/// Document collections held in memory.
///
/// Collection order and document order are insertion order. Intended for
/// embedders and tests; the browser sees it through `DocumentStore` like any
/// other backend.
#[derive(Debug, Default, Clone)]
pub struct MemorySource {
    name: String,
    collections: IndexMap<String, Vec<Document>>,
    alias_groups: HashMap<String, Vec<AliasGroup>>,
}

impl MemorySource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            collections: IndexMap::new(),
            alias_groups: HashMap::new(),
        }
    }

    /// Add or extend a collection.
    pub fn insert_collection(&mut self, name: impl Into<String>, documents: Vec<Document>) {
        self.collections
            .entry(name.into())
            .or_default()
            .extend(documents);
    }

    /// Declare the alias groups of one collection's logical columns.
    ///
    /// Without a declaration, `fields_of` derives one single-alias group per
    /// field, in first-seen order across the collection's documents.
    pub fn set_alias_groups(&mut self, collection: impl Into<String>, groups: Vec<AliasGroup>) {
        self.alias_groups.insert(collection.into(), groups);
    }

    fn collection(&self, name: &str) -> Result<&[Document]> {
        match self.collections.get(name) {
            Some(documents) => Ok(documents),
            None => bail!("unknown collection '{}'", name),
        }
    }

    fn derived_fields(documents: &[Document]) -> Vec<AliasGroup> {
        let mut seen: Vec<&String> = Vec::new();
        for document in documents {
            for key in document.keys() {
                if !seen.contains(&key) {
                    seen.push(key);
                }
            }
        }
        seen.into_iter()
            .map(|name| AliasGroup::new([name.clone()]))
            .collect()
    }
}

impl DocumentStore for MemorySource {
    fn list_collections(&self) -> Result<Vec<String>> {
        Ok(self.collections.keys().cloned().collect())
    }

    fn fields_of(&self, collection: &str) -> Result<Vec<AliasGroup>> {
        let documents = self.collection(collection)?;
        match self.alias_groups.get(collection) {
            Some(groups) => Ok(groups.clone()),
            None => Ok(Self::derived_fields(documents)),
        }
    }

    fn for_each_document(
        &self,
        collection: &str,
        visit: &mut dyn FnMut(&Document) -> Result<()>,
    ) -> Result<()> {
        for document in self.collection(collection)? {
            visit(document)?;
        }
        Ok(())
    }

    fn find_document(
        &self,
        collection: &str,
        predicate: &dyn Fn(&Document) -> bool,
    ) -> Result<Option<Document>> {
        Ok(self
            .collection(collection)?
            .iter()
            .find(|document| predicate(document))
            .cloned())
    }

    fn source_name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> Document {
        match value {
            serde_json::Value::Object(map) => map,
            _ => panic!("test document must be an object"),
        }
    }

    #[test]
    fn test_collections_keep_insertion_order() {
        let mut store = MemorySource::new("test");
        store.insert_collection("zebra", vec![]);
        store.insert_collection("alpha", vec![]);

        assert_eq!(store.list_collections().unwrap(), ["zebra", "alpha"]);
    }

    #[test]
    fn test_derived_fields_are_first_seen_order() {
        let mut store = MemorySource::new("test");
        store.insert_collection(
            "users",
            vec![
                doc(json!({ "name": "a", "email": "a@x" })),
                doc(json!({ "email": "b@x", "age": 3 })),
            ],
        );

        let groups = store.fields_of("users").unwrap();
        let labels: Vec<_> = groups.iter().filter_map(AliasGroup::label).collect();
        assert_eq!(labels, ["name", "email", "age"]);
    }

    #[test]
    fn test_configured_groups_win_over_derivation() {
        let mut store = MemorySource::new("test");
        store.insert_collection("users", vec![doc(json!({ "nm": "a" }))]);
        store.set_alias_groups("users", vec![AliasGroup::new(["name", "nm"])]);

        let groups = store.fields_of("users").unwrap();
        assert_eq!(groups, vec![AliasGroup::new(["name", "nm"])]);
    }

    #[test]
    fn test_unknown_collection_errors() {
        let store = MemorySource::new("test");
        assert!(store.fields_of("missing").is_err());
        assert!(store
            .for_each_document("missing", &mut |_| Ok(()))
            .is_err());
    }

    #[test]
    fn test_visitor_error_is_a_hard_stop() {
        let mut store = MemorySource::new("test");
        store.insert_collection(
            "users",
            vec![doc(json!({ "n": 1 })), doc(json!({ "n": 2 }))],
        );

        let mut visited = 0;
        let result = store.for_each_document("users", &mut |_| {
            visited += 1;
            bail!("stop")
        });
        assert!(result.is_err());
        assert_eq!(visited, 1);
    }

    #[test]
    fn test_find_document_returns_first_match() {
        let mut store = MemorySource::new("test");
        store.insert_collection(
            "users",
            vec![doc(json!({ "n": 1 })), doc(json!({ "n": 2 })), doc(json!({ "n": 2 }))],
        );

        let found = store
            .find_document("users", &|d| d.get("n") == Some(&json!(2)))
            .unwrap();
        assert_eq!(found, Some(doc(json!({ "n": 2 }))));

        let none = store
            .find_document("users", &|d| d.get("n") == Some(&json!(9)))
            .unwrap();
        assert!(none.is_none());
    }
}
