//! Core abstractions for the document store browser
//!
//! This crate provides the document data model, the traits through which a
//! store backend is consumed, and the state primitives shared between the
//! browsing engine and the view layer.

pub mod document;
pub mod navigation;
pub mod notify;
pub mod store;

// Re-export commonly used types
pub use document::{AliasGroup, Column, Document, Value};
pub use navigation::RowCursor;
pub use notify::{NotificationEntry, NotificationKind, NotificationLog};
pub use store::{Connector, DocumentStore};
