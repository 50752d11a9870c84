//! Browser session state
//!
//! One session owns the open store handle, the collection list, the active
//! row set, and the notification log. Components never share globals; the
//! view layer drives everything through this object.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use db_core::{Column, Connector, Document, DocumentStore, NotificationLog, Value};
use tracing::info;
use uuid::Uuid;

use crate::connect::ConnectionGate;
use crate::locate::RecordLocator;
use crate::project::project_collection;
use crate::schema::resolve_columns;
use crate::BrowseError;

/// Identity of one collection activation.
pub type ActivationId = Uuid;

/// Frozen output of one collection selection.
///
/// Columns and rows always belong together; a new activation replaces the
/// whole set, so rows from two selections can never be mixed. The id tags
/// the row set so a request against a stale one is detectable.
#[derive(Debug, Clone)]
pub struct Activation {
    pub id: ActivationId,
    pub collection: String,
    pub columns: Vec<Column>,
    pub display_rows: Vec<Vec<String>>,
    pub raw_rows: Vec<Vec<Value>>,
}

impl Activation {
    /// Table header labels in display order.
    pub fn headers(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.label.as_str()).collect()
    }

    pub fn row_count(&self) -> usize {
        self.display_rows.len()
    }

    /// Raw cells for one row, for the detail view.
    pub fn raw_row(&self, row: usize) -> Option<&[Value]> {
        self.raw_rows.get(row).map(Vec::as_slice)
    }
}

/// All browser state for one opened store.
pub struct Session {
    store: Option<Box<dyn DocumentStore>>,
    source_path: Option<PathBuf>,
    collections: Vec<String>,
    active_collection: usize,
    activation: Option<Activation>,
    gate: ConnectionGate,
    /// Event log read by the view layer.
    pub notifications: NotificationLog,
}

impl Session {
    pub fn new(open_timeout: Duration) -> Self {
        Self {
            store: None,
            source_path: None,
            collections: Vec::new(),
            active_collection: 0,
            activation: None,
            gate: ConnectionGate::new(open_timeout),
            notifications: NotificationLog::new(),
        }
    }

    /// Open the store at `path` and activate its first collection.
    ///
    /// On open or enumeration failure the session keeps whatever it had
    /// before. A schema failure on the first collection is not fatal to the
    /// open itself; it leaves the table empty and is reported through the
    /// notification log.
    pub async fn open(
        &mut self,
        connector: Arc<dyn Connector>,
        path: PathBuf,
    ) -> Result<(), BrowseError> {
        let store = match self.gate.open(connector, path.clone()).await {
            Ok(store) => store,
            Err(e @ BrowseError::OpenTimeout(_)) => {
                self.notifications
                    .error("Open database timed out, maybe it's opened somewhere else?");
                return Err(e);
            }
            Err(e) => {
                self.notifications
                    .error(format!("Open database failed: {}", e));
                return Err(e);
            }
        };

        let collections = match store.list_collections() {
            Ok(collections) => collections,
            Err(e) => {
                self.notifications
                    .error(format!("Failed to get collections: {}", e));
                return Err(BrowseError::Store(e.to_string()));
            }
        };

        self.store = Some(store);
        self.source_path = Some(path.clone());
        self.collections = collections;
        self.active_collection = 0;
        self.activation = None;

        if !self.collections.is_empty() {
            // Already reported through the notification log.
            let _ = self.activate_current();
        }
        self.notifications
            .success(format!("Opened database: {}", path.display()));
        Ok(())
    }

    /// Switch to the collection named `name`.
    pub fn activate_collection(&mut self, name: &str) -> Result<(), BrowseError> {
        let index = self
            .collections
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| BrowseError::Schema(format!("unknown collection '{}'", name)))?;
        self.switch_to(index)
    }

    /// Switch to the next collection, wrapping at the end.
    pub fn next_collection(&mut self) -> Result<(), BrowseError> {
        self.step_collection(1)
    }

    /// Switch to the previous collection, wrapping at the start.
    pub fn previous_collection(&mut self) -> Result<(), BrowseError> {
        self.step_collection(-1)
    }

    fn step_collection(&mut self, step: isize) -> Result<(), BrowseError> {
        if self.store.is_none() {
            return Err(BrowseError::NotConnected);
        }
        if self.collections.is_empty() {
            return Ok(());
        }
        let len = self.collections.len() as isize;
        let next = (self.active_collection as isize + step).rem_euclid(len) as usize;
        self.switch_to(next)
    }

    /// A failed switch leaves both the previous activation and the previous
    /// selection in place.
    fn switch_to(&mut self, index: usize) -> Result<(), BrowseError> {
        let previous = self.active_collection;
        self.active_collection = index;
        match self.activate_current() {
            Ok(()) => Ok(()),
            Err(e) => {
                self.active_collection = previous;
                Err(e)
            }
        }
    }

    fn activate_current(&mut self) -> Result<(), BrowseError> {
        let store = self.store.as_deref().ok_or(BrowseError::NotConnected)?;
        let collection = self
            .collections
            .get(self.active_collection)
            .ok_or(BrowseError::NotConnected)?
            .clone();

        let columns = match resolve_columns(store, &collection) {
            Ok(columns) => columns,
            Err(e) => {
                self.notifications
                    .error(format!("Failed to get columns: {}", e));
                return Err(e);
            }
        };

        let projection = match project_collection(store, &collection, &columns) {
            Ok(projection) => projection,
            Err(e) => {
                self.notifications
                    .error(format!("Failed to load rows: {}", e));
                return Err(e);
            }
        };

        if projection.rejected > 0 {
            // One summary entry for the whole pass, not one per row.
            self.notifications.error(format!(
                "Excluded {} document(s) with mismatched cell counts",
                projection.rejected
            ));
        }
        self.notifications
            .info(format!("Loaded {} row(s)", projection.len()));
        info!(collection = %collection, rows = projection.len(), "activated collection");

        self.activation = Some(Activation {
            id: Uuid::new_v4(),
            collection,
            columns,
            display_rows: projection.display,
            raw_rows: projection.raw,
        });
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        self.store.is_some()
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    pub fn collections(&self) -> &[String] {
        &self.collections
    }

    /// Name of the currently selected collection.
    pub fn active_collection(&self) -> Option<&str> {
        self.collections
            .get(self.active_collection)
            .map(String::as_str)
    }

    /// The active row set, if a collection has been activated.
    pub fn activation(&self) -> Option<&Activation> {
        self.activation.as_ref()
    }

    /// Recover the source document for `row` of activation `id`.
    ///
    /// The id must match the current activation; a row position taken from
    /// an earlier selection is rejected instead of silently searched
    /// against the wrong collection.
    pub fn locate(&self, id: ActivationId, row: usize) -> Result<Document, BrowseError> {
        let store = self.store.as_deref().ok_or(BrowseError::NotConnected)?;
        let activation = self.activation.as_ref().ok_or(BrowseError::NotConnected)?;
        if activation.id != id {
            return Err(BrowseError::StaleActivation);
        }
        RecordLocator::new(store, activation).locate(row)
    }
}
