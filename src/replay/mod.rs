//! Replay Module
//!
//! Read side of the store: decodes an [`EventLog`](crate::log::EventLog)
//! through a cursor and pushes the original notifications to a consumer.
//!
//! ```text
//! before-start --(start-document)--> in-document --(end-document)--> done
//! ```
//!
//! Nesting depth is tracked by stacks, not by states. Any code the reader
//! does not recognize is fatal.

pub mod adapter;
pub mod config;
#[cfg(feature = "parallel")]
pub mod parallel;

pub use adapter::{replay_to_vec, replay_to_vec_with, ReplayState, Replayer, XMLNS_URI};
pub use config::ReplayConfig;
