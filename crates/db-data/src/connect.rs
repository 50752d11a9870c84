//! Bounded-time store opening

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use db_core::{Connector, DocumentStore};
use tokio::time;
use tracing::{debug, warn};

use crate::BrowseError;

/// Opens a store handle without letting a wedged backend block the caller.
///
/// The connect call runs as its own task and races a fixed timer. Exactly
/// one of three outcomes reaches the caller: the handle, an explicit open
/// failure, or a timeout. On timeout the in-flight task is abandoned rather
/// than cancelled; whatever it later produces is dropped with the join
/// handle and no caller ever observes it.
#[derive(Debug, Clone, Copy)]
pub struct ConnectionGate {
    timeout: Duration,
}

impl ConnectionGate {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Open the store at `path`, waiting at most the configured timeout.
    pub async fn open(
        &self,
        connector: Arc<dyn Connector>,
        path: PathBuf,
    ) -> Result<Box<dyn DocumentStore>, BrowseError> {
        debug!(path = %path.display(), "opening store");
        let attempt = tokio::spawn(async move { connector.connect(&path).await });

        match time::timeout(self.timeout, attempt).await {
            Ok(Ok(Ok(store))) => Ok(store),
            Ok(Ok(Err(e))) => Err(BrowseError::Open(e.to_string())),
            Ok(Err(join_err)) => Err(BrowseError::Join(join_err)),
            Err(_elapsed) => {
                warn!(timeout = ?self.timeout, "store open timed out, abandoning the attempt");
                Err(BrowseError::OpenTimeout(self.timeout))
            }
        }
    }
}
