//! JSON file document source

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use db_core::{AliasGroup, Connector, Document, DocumentStore, Value};
use tracing::debug;

use super::MemorySource;

/// Key of the optional alias table inside a store file.
const SCHEMA_KEY: &str = "$schema";

/// Flat-file JSON store: a top-level object mapping collection names to
/// arrays of documents, with an optional alias table for columns that were
/// renamed across schema versions:
///
/// ```json
/// {
///     "$schema": { "users": [["name", "nm"], ["email"]] },
///     "users": [ { "name": "ada" }, { "nm": "bob" } ]
/// }
/// ```
///
/// The whole file is materialized on open; this is a browsing backend, not
/// a storage engine.
#[derive(Debug)]
pub struct JsonSource {
    inner: MemorySource,
    path: PathBuf,
}

impl JsonSource {
    /// Open and fully parse the file at `path`.
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let inner = tokio::task::spawn_blocking({
            let path = path.clone();
            move || Self::parse_file(&path)
        })
        .await??;
        Ok(Self { inner, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parse_file(path: &Path) -> Result<MemorySource> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        let root: Value = serde_json::from_str(&text)
            .with_context(|| format!("{} is not valid JSON", path.display()))?;
        let Value::Object(entries) = root else {
            bail!(
                "{}: top level must be an object of collections",
                path.display()
            );
        };

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown.json");
        let mut source = MemorySource::new(name);

        let mut schema_table = None;
        for (key, value) in entries {
            if key == SCHEMA_KEY {
                schema_table = Some(value);
                continue;
            }
            let Value::Array(items) = value else {
                bail!("collection '{}' must be an array of documents", key);
            };
            let mut documents = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::Object(document) => documents.push(document),
                    other => bail!("collection '{}' holds a non-document entry: {}", key, other),
                }
            }
            source.insert_collection(key, documents);
        }

        if let Some(table) = schema_table {
            let table: HashMap<String, Vec<AliasGroup>> =
                serde_json::from_value(table).context("invalid $schema alias table")?;
            for (collection, groups) in table {
                source.set_alias_groups(collection, groups);
            }
        }

        debug!(path = %path.display(), "parsed store file");
        Ok(source)
    }
}

impl DocumentStore for JsonSource {
    fn list_collections(&self) -> Result<Vec<String>> {
        self.inner.list_collections()
    }

    fn fields_of(&self, collection: &str) -> Result<Vec<AliasGroup>> {
        self.inner.fields_of(collection)
    }

    fn for_each_document(
        &self,
        collection: &str,
        visit: &mut dyn FnMut(&Document) -> Result<()>,
    ) -> Result<()> {
        self.inner.for_each_document(collection, visit)
    }

    fn find_document(
        &self,
        collection: &str,
        predicate: &dyn Fn(&Document) -> bool,
    ) -> Result<Option<Document>> {
        self.inner.find_document(collection, predicate)
    }

    fn source_name(&self) -> &str {
        self.inner.source_name()
    }
}

/// Opens `JsonSource` stores for the connection gate.
pub struct JsonConnector;

#[async_trait]
impl Connector for JsonConnector {
    async fn connect(&self, path: &Path) -> Result<Box<dyn DocumentStore>> {
        let source = JsonSource::open(path).await?;
        Ok(Box::new(source))
    }
}
