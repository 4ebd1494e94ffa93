//! Namespace Scope
//!
//! Stack-based binding resolver for the capture side.
//!
//! Each `start_prefix_mapping` pushes a binding; ending it removes that
//! binding again, which makes any outer binding of the same prefix visible
//! once more. A binding is *active* while no later binding on the stack
//! uses the same prefix.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::log::{EventLog, NamespaceIndex, NamespaceRecord};
use tracing::trace;

#[derive(Debug, Clone)]
struct ScopeBinding {
    prefix: Box<str>,
    uri: Box<str>,
    record: NamespaceIndex,
}

#[derive(Debug, Default)]
pub struct NamespaceScope {
    /// Stack of bindings, innermost last
    bindings: Vec<ScopeBinding>,
    /// uri -> prefix -> record, so a reopened pair reuses its record
    records: HashMap<Box<str>, HashMap<Box<str>, NamespaceIndex>>,
}

impl NamespaceScope {
    pub fn new() -> Self {
        NamespaceScope {
            bindings: Vec::with_capacity(16),
            records: HashMap::new(),
        }
    }

    /// Number of bindings on the stack (active or masked)
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Find or register the namespace record for a (prefix, uri) pair
    pub fn record_for(&mut self, prefix: &str, uri: &str, log: &mut EventLog) -> NamespaceIndex {
        if let Some(&index) = self.records.get(uri).and_then(|by_prefix| by_prefix.get(prefix)) {
            return index;
        }
        let index = log.append_namespace(NamespaceRecord::new(prefix, uri));
        self.records
            .entry(uri.into())
            .or_default()
            .insert(prefix.into(), index);
        index
    }

    /// Push a binding, masking any outer binding of the same prefix
    pub fn declare(&mut self, prefix: &str, uri: &str, log: &mut EventLog) -> NamespaceIndex {
        let record = self.record_for(prefix, uri, log);
        trace!(prefix, uri, record, depth = self.bindings.len(), "namespace binding pushed");
        self.bindings.push(ScopeBinding {
            prefix: prefix.into(),
            uri: uri.into(),
            record,
        });
        record
    }

    /// Remove the innermost binding of `prefix` among the top `window` bindings
    ///
    /// `window` is the number of bindings the just-closed element declared;
    /// they sit on top of the stack in declaration order.
    pub fn undeclare(&mut self, prefix: &str, window: usize) -> Result<NamespaceIndex> {
        let floor = self.bindings.len().saturating_sub(window);
        let found = self.bindings[floor..]
            .iter()
            .rposition(|b| &*b.prefix == prefix)
            .map(|pos| floor + pos);

        match found {
            Some(pos) => {
                let binding = self.bindings.remove(pos);
                trace!(prefix, uri = &*binding.uri, "namespace binding popped");
                Ok(binding.record)
            }
            None => match self.bindings[..floor].iter().rev().find(|b| &*b.prefix == prefix) {
                Some(_) => Err(Error::PrefixMismatch {
                    expected: self
                        .bindings
                        .last()
                        .map(|b| b.prefix.to_string())
                        .unwrap_or_default(),
                    found: prefix.to_owned(),
                }),
                None => Err(Error::UnboundPrefix { prefix: prefix.to_owned() }),
            },
        }
    }

    /// Drop the top `count` bindings without matching end notifications
    pub fn discard(&mut self, count: usize) {
        let keep = self.bindings.len().saturating_sub(count);
        self.bindings.truncate(keep);
    }

    /// Record of the active binding for `prefix`, if any
    pub fn resolve_prefix(&self, prefix: &str) -> Option<NamespaceIndex> {
        self.bindings
            .iter()
            .rev()
            .find(|b| &*b.prefix == prefix)
            .map(|b| b.record)
    }

    /// Namespace record for an element in `uri`
    ///
    /// Uses the most recent active binding for the URI; when both a default
    /// and a prefixed binding are active, the default one wins.
    pub fn resolve_element(&self, uri: &str) -> Option<NamespaceIndex> {
        let mut prefixed = None;
        for (pos, binding) in self.bindings.iter().enumerate().rev() {
            if &*binding.uri != uri || !self.is_active(pos) {
                continue;
            }
            if binding.prefix.is_empty() {
                return Some(binding.record);
            }
            if prefixed.is_none() {
                prefixed = Some(binding.record);
            }
        }
        prefixed
    }

    /// Namespace record for an attribute in `uri`
    ///
    /// Attributes never pick up the default namespace, so only an active
    /// prefixed binding counts.
    pub fn resolve_attribute(&self, uri: &str) -> Option<NamespaceIndex> {
        self.bindings
            .iter()
            .enumerate()
            .rev()
            .find(|(pos, b)| !b.prefix.is_empty() && &*b.uri == uri && self.is_active(*pos))
            .map(|(_, b)| b.record)
    }

    /// A binding is active while nothing above it rebinds its prefix
    fn is_active(&self, pos: usize) -> bool {
        let prefix = &self.bindings[pos].prefix;
        !self.bindings[pos + 1..].iter().any(|b| b.prefix == *prefix)
    }

    /// Forget all bindings and records
    pub fn clear(&mut self) {
        self.bindings.clear();
        self.records.clear();
    }
}
