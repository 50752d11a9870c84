//! Projection and reverse-lookup engine for the document browser
//!
//! Turns heterogeneous, loosely-typed documents into a stable tabular view
//! and maps a displayed row back to its originating document. Also hosts the
//! bounded-time store-open handshake and the session object that ties the
//! pieces together.

pub mod connect;
pub mod detail;
pub mod locate;
pub mod project;
pub mod schema;
pub mod session;
pub mod sources;

use std::time::Duration;

use thiserror::Error;
use tokio::task::JoinError;

// Re-exports
pub use connect::ConnectionGate;
pub use locate::RecordLocator;
pub use project::{project, project_collection, Projection};
pub use schema::resolve_columns;
pub use session::{Activation, ActivationId, Session};
pub use sources::{JsonConnector, JsonSource, MemorySource};

/// Errors that can occur while browsing a store
#[derive(Error, Debug)]
pub enum BrowseError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("open failed: {0}")]
    Open(String),

    #[error("open timed out after {0:?}")]
    OpenTimeout(Duration),

    #[error("schema resolution failed: {0}")]
    Schema(String),

    #[error("store error: {0}")]
    Store(String),

    #[error("no document matches the selected row")]
    RecordNotFound,

    #[error("row {0} is out of range")]
    RowOutOfRange(usize),

    #[error("row set belongs to a previous collection activation")]
    StaleActivation,

    #[error("no store is open")]
    NotConnected,

    #[error("join error: {0}")]
    Join(#[from] JoinError),
}
