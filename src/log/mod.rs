//! Event Log Module
//!
//! The data store: an append-only, replayable log of parse events with
//! dictionary-encoded names and namespaces. No namespace scoping lives
//! here; see [`capture`](crate::capture) and [`replay`](crate::replay).
//!
//! ## Memory Efficiency
//!
//! - Names and namespaces are stored once and referenced by `u32` handles.
//! - All text shares one `String`; events record only its length.
//! - Cursors are three integer offsets, so replay never allocates per event.

pub mod codes;
pub mod cursor;
pub mod names;
pub mod namespaces;
pub mod store;

pub use codes::EventCode;
pub use cursor::Cursor;
pub use names::{NameHandle, NameTable, NamespaceIndex, QNameRecord};
pub use namespaces::{NamespaceRecord, NamespaceTable};
pub use store::{text_length, EventLog, LogStats};
