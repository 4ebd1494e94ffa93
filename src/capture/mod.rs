//! Capture Module
//!
//! Write side of the store: a [`ContentHandler`](crate::sax::ContentHandler)
//! that appends each notification to an [`EventLog`](crate::log::EventLog).
//!
//! ## Namespace resolution
//!
//! - Elements use the active binding for their URI, default before prefixed.
//! - Attributes only use a prefixed binding; unprefixed attributes are in
//!   no namespace.
//! - A URI with no declared binding (the built-in `xml` prefix) gets a
//!   namespace record from the name's own prefix, without a mapping event.

pub mod adapter;
pub mod config;
pub mod scope;

pub use adapter::{capture_events, Capture};
pub use config::CaptureConfig;
pub use scope::NamespaceScope;
