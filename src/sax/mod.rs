//! SAX (Simple API for XML) Module
//!
//! The push-style notification contract shared by capture and replay.
//!
//! ## Architecture
//!
//! ```text
//! parser ---> Capture ---> EventLog <--- Replayer ---> ContentHandler
//!   (ContentHandler)                                  (EventCollector, ...)
//! ```
//!
//! Both adapters speak [`ContentHandler`], so a capture-then-replay round
//! trip is transparent to the downstream consumer.
//!
//! ## Event Types
//!
//! - `start_document` / `end_document`
//! - `start_prefix_mapping` / `end_prefix_mapping`
//! - `start_element` / `end_element` - resolved [`QName`] plus attributes
//! - `characters`, `ignorable_whitespace`, `start_cdata` / `end_cdata`
//! - `processing_instruction`, `comment`, `doctype`, `entity_reference`

pub mod collector;
pub mod events;
pub mod handler;
pub mod qname;

pub use collector::EventCollector;
pub use events::{OwnedAttribute, OwnedQName, SaxEvent};
pub use handler::ContentHandler;
pub use qname::{split_name, Attribute, QName};
