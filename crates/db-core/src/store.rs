//! Store collaborator traits
//!
//! The browser consumes a document store through these traits and never
//! reaches into storage internals. Backends implement `DocumentStore` for an
//! opened handle and `Connector` for producing one from a path.

use std::fmt::Debug;
use std::path::Path;

use anyhow::Result;

use crate::document::{AliasGroup, Document};

/// Read-only access to an opened document store.
pub trait DocumentStore: Send + Sync + Debug {
    /// Collection names in store order.
    fn list_collections(&self) -> Result<Vec<String>>;

    /// Ordered alias groups for one collection's logical columns.
    fn fields_of(&self, collection: &str) -> Result<Vec<AliasGroup>>;

    /// Visit every document of `collection` in store order.
    ///
    /// An error returned by `visit` is a hard stop and propagates to the
    /// caller.
    fn for_each_document(
        &self,
        collection: &str,
        visit: &mut dyn FnMut(&Document) -> Result<()>,
    ) -> Result<()>;

    /// The first document of `collection` satisfying `predicate`, if any.
    fn find_document(
        &self,
        collection: &str,
        predicate: &dyn Fn(&Document) -> bool,
    ) -> Result<Option<Document>>;

    /// Name of the backing source, for display.
    fn source_name(&self) -> &str;
}

/// Producer of store handles from a filesystem path.
#[async_trait::async_trait]
pub trait Connector: Send + Sync {
    /// Open the store at `path`.
    async fn connect(&self, path: &Path) -> Result<Box<dyn DocumentStore>>;
}
