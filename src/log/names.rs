//! Qualified-Name Dictionary
//!
//! Deduplicates (namespace, local name) pairs into integer handles.
//!
//! Lookup goes by local name first. Almost every local name is used with a
//! single namespace, so the slot holds that one handle directly; only when a
//! second namespace shows up with the same local name does the slot grow a
//! namespace-keyed map.

use std::collections::HashMap;

/// Handle of an interned name: its index in the dictionary
pub type NameHandle = u32;

/// Index into the namespace table
pub type NamespaceIndex = u32;

/// One dictionary entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QNameRecord {
    /// Owning namespace record, `None` for no namespace
    pub namespace: Option<NamespaceIndex>,
    pub local_name: Box<str>,
    /// Display form, `prefix:local` or `local`
    pub qname: Box<str>,
    pub handle: NameHandle,
}

#[derive(Debug, Clone)]
enum NameSlot {
    Single(NameHandle),
    Shared(HashMap<Option<NamespaceIndex>, NameHandle>),
}

/// Name dictionary with first-use handle assignment
#[derive(Debug, Default, Clone)]
pub struct NameTable {
    records: Vec<QNameRecord>,
    by_local: HashMap<Box<str>, NameSlot>,
}

impl NameTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find the handle for a pair without inserting
    pub fn lookup(&self, namespace: Option<NamespaceIndex>, local_name: &str) -> Option<NameHandle> {
        match self.by_local.get(local_name)? {
            NameSlot::Single(handle) => {
                (self.records[*handle as usize].namespace == namespace).then_some(*handle)
            }
            NameSlot::Shared(map) => map.get(&namespace).copied(),
        }
    }

    /// Return the handle for a pair, creating the record on first use
    ///
    /// `prefix` only matters on first use, where it fixes the display form.
    pub fn intern(
        &mut self,
        namespace: Option<NamespaceIndex>,
        local_name: &str,
        prefix: Option<&str>,
    ) -> NameHandle {
        let records = &mut self.records;
        match self.by_local.get_mut(local_name) {
            Some(slot) => match slot {
                NameSlot::Single(existing) => {
                    let existing = *existing;
                    if records[existing as usize].namespace == namespace {
                        return existing;
                    }
                    let handle = push_record(records, namespace, local_name, prefix);
                    let mut map = HashMap::with_capacity(2);
                    map.insert(records[existing as usize].namespace, existing);
                    map.insert(namespace, handle);
                    *slot = NameSlot::Shared(map);
                    handle
                }
                NameSlot::Shared(map) => {
                    if let Some(&handle) = map.get(&namespace) {
                        return handle;
                    }
                    let handle = push_record(records, namespace, local_name, prefix);
                    map.insert(namespace, handle);
                    handle
                }
            },
            None => {
                let handle = push_record(records, namespace, local_name, prefix);
                self.by_local.insert(local_name.into(), NameSlot::Single(handle));
                handle
            }
        }
    }

    #[inline]
    pub fn get(&self, handle: NameHandle) -> Option<&QNameRecord> {
        self.records.get(handle as usize)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &QNameRecord> {
        self.records.iter()
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.by_local.clear();
    }

    pub fn shrink_to_fit(&mut self) {
        self.records.shrink_to_fit();
        self.by_local.shrink_to_fit();
    }

    /// Approximate heap bytes held by the records
    pub fn heap_bytes(&self) -> usize {
        self.records.capacity() * std::mem::size_of::<QNameRecord>()
            + self
                .records
                .iter()
                .map(|r| r.local_name.len() * 2 + r.qname.len())
                .sum::<usize>()
    }
}

fn push_record(
    records: &mut Vec<QNameRecord>,
    namespace: Option<NamespaceIndex>,
    local_name: &str,
    prefix: Option<&str>,
) -> NameHandle {
    let handle = records.len() as NameHandle;
    let qname = match prefix {
        Some(p) if !p.is_empty() => format!("{p}:{local_name}").into_boxed_str(),
        _ => local_name.into(),
    };
    records.push(QNameRecord {
        namespace,
        local_name: local_name.into(),
        qname,
        handle,
    });
    handle
}
