//! saxlog - Compact, replayable store for XML parse events
//!
//! Components:
//! A: EventLog - append-only, dictionary-encoded event buffers (log)
//! B: Capture - push notifications in, resolving namespace scope (capture)
//! C: Replayer - pull the same notifications back out (replay)
//!
//! ```text
//! parser --> Capture --> EventLog <-- Replayer --> consumer
//! ```
//!
//! ## Example
//!
//! ```
//! use saxlog::{Capture, ContentHandler, QName, replay_to_vec, SaxEvent};
//!
//! let mut capture = Capture::new();
//! capture.start_document()?;
//! capture.start_element(&QName::local("root"), &[])?;
//! capture.characters("hello")?;
//! capture.end_element(&QName::local("root"))?;
//! capture.end_document()?;
//!
//! let log = capture.finish();
//! let events = replay_to_vec(&log)?;
//! assert_eq!(events[2], SaxEvent::Characters("hello".into()));
//! # Ok::<(), saxlog::Error>(())
//! ```

pub mod capture;
pub mod error;
pub mod log;
pub mod replay;
pub mod sax;

pub use capture::{capture_events, Capture, CaptureConfig};
pub use error::{Error, Result};
pub use log::{Cursor, EventCode, EventLog, LogStats, NameHandle, NamespaceIndex};
pub use replay::{replay_to_vec, replay_to_vec_with, ReplayConfig, ReplayState, Replayer};
pub use sax::{Attribute, ContentHandler, EventCollector, QName, SaxEvent};
