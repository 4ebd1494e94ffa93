//! Namespace Table
//!
//! Ordered (prefix, URI) records referenced by `StartNamespaceMapping`
//! events and by name records. The table does not deduplicate; the capture
//! side decides when a pair gets a new record.

use super::names::NamespaceIndex;

/// Namespace binding record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceRecord {
    /// Bound prefix, empty for the default namespace
    pub prefix: Box<str>,
    pub uri: Box<str>,
}

impl NamespaceRecord {
    pub fn new(prefix: &str, uri: &str) -> Self {
        NamespaceRecord { prefix: prefix.into(), uri: uri.into() }
    }

    /// Whether this is a default (no-prefix) binding
    #[inline]
    pub fn is_default(&self) -> bool {
        self.prefix.is_empty()
    }
}

#[derive(Debug, Default, Clone)]
pub struct NamespaceTable {
    records: Vec<NamespaceRecord>,
}

impl NamespaceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record and return its index
    pub fn push(&mut self, record: NamespaceRecord) -> NamespaceIndex {
        let index = self.records.len() as NamespaceIndex;
        self.records.push(record);
        index
    }

    #[inline]
    pub fn get(&self, index: NamespaceIndex) -> Option<&NamespaceRecord> {
        self.records.get(index as usize)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NamespaceRecord> {
        self.records.iter()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn shrink_to_fit(&mut self) {
        self.records.shrink_to_fit();
    }

    pub fn heap_bytes(&self) -> usize {
        self.records.capacity() * std::mem::size_of::<NamespaceRecord>()
            + self.records.iter().map(|r| r.prefix.len() + r.uri.len()).sum::<usize>()
    }
}
