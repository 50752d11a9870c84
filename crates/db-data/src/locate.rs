//! Reverse lookup from a displayed row to its source document

use db_core::{Document, DocumentStore};

use crate::project::display_cell;
use crate::session::Activation;
use crate::BrowseError;

/// Recovers the document behind one displayed row.
///
/// There is no primary key to join on; identity comes from equality between
/// the row's sanitized cells and the candidate document's rendered fields.
/// Two documents that differ only in stripped characters are
/// indistinguishable, and each lookup is a fresh full scan of the
/// collection. Both are accepted costs of value-based recovery.
pub struct RecordLocator<'a> {
    store: &'a dyn DocumentStore,
    activation: &'a Activation,
}

impl<'a> RecordLocator<'a> {
    pub fn new(store: &'a dyn DocumentStore, activation: &'a Activation) -> Self {
        Self { store, activation }
    }

    /// Find the first document whose rendered fields match row `row`.
    pub fn locate(&self, row: usize) -> Result<Document, BrowseError> {
        let cells = self
            .activation
            .display_rows
            .get(row)
            .ok_or(BrowseError::RowOutOfRange(row))?;
        let columns = &self.activation.columns;

        let matched = self
            .store
            .find_document(&self.activation.collection, &|doc: &Document| {
                columns.iter().zip(cells.iter()).all(|(column, cell)| {
                    column.aliases.names().iter().all(|alias| match doc.get(alias) {
                        Some(value) => display_cell(value) == *cell,
                        None => true,
                    })
                })
            })
            .map_err(|e| BrowseError::Store(e.to_string()))?;

        matched.ok_or(BrowseError::RecordNotFound)
    }
}
