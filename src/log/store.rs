//! Event Log
//!
//! Append-only store for one captured document. Four parallel buffers:
//!
//! ```text
//! EventLog
//! ├── events: Vec<u32>        # codes + inline words, authoritative order
//! ├── chars: String           # text, CDATA, comments, doctype, entity names
//! ├── strings: Vec<Box<str>>  # attribute values, PI target/data
//! ├── names: NameTable        # (namespace, local) -> handle
//! └── namespaces: NamespaceTable
//! ```
//!
//! The log does not check structure; that is the capture adapter's job.
//! Readers hold plain offsets, so a completed log can be replayed by any
//! number of cursors at once.

use super::codes::EventCode;
use super::cursor::Cursor;
use super::names::{NameHandle, NameTable, NamespaceIndex, QNameRecord};
use super::namespaces::{NamespaceRecord, NamespaceTable};
use crate::error::{Error, Result};
use tracing::debug;

/// Length of a character run as stored inline in the event sequence
#[inline]
pub fn text_length(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| Error::CapacityExceeded { what: "text", len })
}

/// Buffer sizes of a log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LogStats {
    /// Words in the event sequence (codes plus inline data)
    pub event_words: usize,
    /// Bytes in the character buffer
    pub chars: usize,
    pub strings: usize,
    pub names: usize,
    pub namespaces: usize,
    /// Approximate heap bytes held by all buffers
    pub heap_bytes: usize,
}

#[derive(Debug, Default, Clone)]
pub struct EventLog {
    events: Vec<u32>,
    chars: String,
    strings: Vec<Box<str>>,
    names: NameTable,
    namespaces: NamespaceTable,
}

impl EventLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::with_capacity(256, 4096)
    }

    /// Create with estimated capacity
    pub fn with_capacity(event_words: usize, chars: usize) -> Self {
        EventLog {
            events: Vec::with_capacity(event_words),
            chars: String::with_capacity(chars),
            strings: Vec::with_capacity(event_words / 8),
            names: NameTable::new(),
            namespaces: NamespaceTable::new(),
        }
    }

    /// Append an event code followed by its inline words
    #[inline]
    pub fn append_event(&mut self, code: EventCode, inline: &[u32]) {
        self.events.push(code.as_word());
        self.events.extend_from_slice(inline);
    }

    /// Append a bare inline word (attribute name handles after a start tag)
    #[inline]
    pub fn append_word(&mut self, word: u32) {
        self.events.push(word);
    }

    /// Append text to the character buffer, returning its byte length
    ///
    /// Nothing is written when the length does not fit an inline word.
    #[inline]
    pub fn append_chars(&mut self, text: &str) -> Result<u32> {
        let len = text_length(text.len())?;
        self.chars.push_str(text);
        Ok(len)
    }

    /// Append a whole string value, returning its table index
    pub fn append_string(&mut self, value: &str) -> u32 {
        let index = self.strings.len() as u32;
        self.strings.push(value.into());
        index
    }

    /// Return the handle for (namespace, local name), creating it on first use
    ///
    /// The display form takes the prefix of the namespace record.
    pub fn intern_qname(&mut self, namespace: Option<NamespaceIndex>, local_name: &str) -> NameHandle {
        if let Some(handle) = self.names.lookup(namespace, local_name) {
            return handle;
        }
        let prefix = namespace
            .and_then(|ns| self.namespaces.get(ns))
            .map(|record| &*record.prefix);
        self.names.intern(namespace, local_name, prefix)
    }

    /// Append a namespace record, returning its index
    pub fn append_namespace(&mut self, record: NamespaceRecord) -> NamespaceIndex {
        self.namespaces.push(record)
    }

    /// Create an independent cursor positioned at the start of every buffer
    pub fn create_reader(&self) -> Cursor<'_> {
        Cursor::new(self)
    }

    /// Clear all buffers and dictionaries for reuse with another document
    pub fn reset(&mut self) {
        if self.is_blank() {
            return;
        }
        debug!(
            event_words = self.events.len(),
            chars = self.chars.len(),
            names = self.names.len(),
            "resetting event log"
        );
        self.events.clear();
        self.chars.clear();
        self.strings.clear();
        self.names.clear();
        self.namespaces.clear();
    }

    /// Release spare capacity left over from growth
    pub fn shrink_to_fit(&mut self) {
        self.events.shrink_to_fit();
        self.chars.shrink_to_fit();
        self.strings.shrink_to_fit();
        self.names.shrink_to_fit();
        self.namespaces.shrink_to_fit();
    }

    #[inline]
    pub fn name(&self, handle: NameHandle) -> Option<&QNameRecord> {
        self.names.get(handle)
    }

    #[inline]
    pub fn namespace(&self, index: NamespaceIndex) -> Option<&NamespaceRecord> {
        self.namespaces.get(index)
    }

    pub fn names(&self) -> &NameTable {
        &self.names
    }

    pub fn namespaces(&self) -> &NamespaceTable {
        &self.namespaces
    }

    /// Raw event sequence
    pub fn events(&self) -> &[u32] {
        &self.events
    }

    /// Raw character buffer
    pub fn chars(&self) -> &str {
        &self.chars
    }

    /// Raw string table
    pub fn strings(&self) -> &[Box<str>] {
        &self.strings
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// No events and no table entries
    fn is_blank(&self) -> bool {
        self.events.is_empty()
            && self.chars.is_empty()
            && self.strings.is_empty()
            && self.names.is_empty()
            && self.namespaces.is_empty()
    }

    pub fn stats(&self) -> LogStats {
        let heap_bytes = self.events.capacity() * std::mem::size_of::<u32>()
            + self.chars.capacity()
            + self.strings.capacity() * std::mem::size_of::<Box<str>>()
            + self.strings.iter().map(|s| s.len()).sum::<usize>()
            + self.names.heap_bytes()
            + self.namespaces.heap_bytes();
        LogStats {
            event_words: self.events.len(),
            chars: self.chars.len(),
            strings: self.strings.len(),
            names: self.names.len(),
            namespaces: self.namespaces.len(),
            heap_bytes,
        }
    }
}
