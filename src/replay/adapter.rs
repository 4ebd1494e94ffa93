//! Replay Adapter
//!
//! Walks a [`Cursor`] and re-emits the captured notifications to any
//! [`ContentHandler`]. Element nesting and namespace scope are rebuilt from
//! the event sequence alone:
//!
//! - an element stack supplies the name for each end tag,
//! - a per-element count of preceding `StartNamespaceMapping` events says
//!   how many end mappings to synthesize when the element closes,
//! - a binding stack mirrors the capture-side scope.

use super::config::ReplayConfig;
use crate::error::{Error, Result, TableKind};
use crate::log::{Cursor, EventCode, EventLog, NamespaceRecord, QNameRecord};
use crate::sax::qname::XMLNS;
use crate::sax::{Attribute, ContentHandler, EventCollector, QName, SaxEvent};
use tracing::trace;

/// Namespace URI of synthesized `xmlns` attributes
pub const XMLNS_URI: &str = "http://www.w3.org/2000/xmlns/";

/// Replay progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayState {
    BeforeStart,
    InDocument,
    Done,
}

/// Read side of the store
pub struct Replayer<'a> {
    cursor: Cursor<'a>,
    config: ReplayConfig,
    state: ReplayState,
    /// Open elements
    elements: Vec<&'a QNameRecord>,
    /// Mappings declared by each open element
    mapping_counts: Vec<u32>,
    /// Active bindings, innermost last
    bindings: Vec<&'a NamespaceRecord>,
    /// Mappings seen since the last start tag
    pending_mappings: u32,
}

impl<'a> Replayer<'a> {
    /// Replay a log from its start with default options
    pub fn new(log: &'a EventLog) -> Self {
        Self::with_cursor(log.create_reader(), ReplayConfig::default())
    }

    pub fn with_config(log: &'a EventLog, config: ReplayConfig) -> Self {
        Self::with_cursor(log.create_reader(), config)
    }

    /// Replay from an existing cursor
    pub fn with_cursor(cursor: Cursor<'a>, config: ReplayConfig) -> Self {
        Replayer {
            cursor,
            config,
            state: ReplayState::BeforeStart,
            elements: Vec::with_capacity(32),
            mapping_counts: Vec::with_capacity(32),
            bindings: Vec::with_capacity(16),
            pending_mappings: 0,
        }
    }

    pub fn state(&self) -> ReplayState {
        self.state
    }

    pub fn config(&self) -> &ReplayConfig {
        &self.config
    }

    /// Number of open elements
    pub fn depth(&self) -> usize {
        self.elements.len()
    }

    /// Rewind to the start of the log; the log itself is untouched
    pub fn reset(&mut self) {
        self.cursor.reset();
        self.state = ReplayState::BeforeStart;
        self.elements.clear();
        self.mapping_counts.clear();
        self.bindings.clear();
        self.pending_mappings = 0;
    }

    /// Replay every remaining event up to and including `end_document`
    pub fn run<H: ContentHandler>(&mut self, handler: &mut H) -> Result<()> {
        while self.step(handler)? {}
        Ok(())
    }

    /// Decode one event and deliver it
    ///
    /// Returns `false` once `end_document` has been delivered.
    pub fn step<H: ContentHandler>(&mut self, handler: &mut H) -> Result<bool> {
        if self.state == ReplayState::Done {
            return Err(Error::ReplayFinished);
        }

        let offset = self.cursor.position();
        let code = self.cursor.next_code()?;
        trace!(offset, ?code, depth = self.elements.len(), "replay step");

        match (self.state, code) {
            (ReplayState::BeforeStart, EventCode::StartDocument) => {
                self.state = ReplayState::InDocument;
                handler.start_document()?;
            }
            (ReplayState::BeforeStart, _) | (_, EventCode::StartDocument) => {
                return Err(Error::OutOfOrder { offset });
            }
            (_, EventCode::EndDocument) => {
                self.close_mappings(self.pending_mappings, handler)?;
                self.pending_mappings = 0;
                self.state = ReplayState::Done;
                handler.end_document()?;
                return Ok(false);
            }
            (_, EventCode::StartNamespaceMapping) => {
                let (_, record) = self.cursor.read_namespace()?;
                self.bindings.push(record);
                self.pending_mappings += 1;
                if self.config.namespace_mappings {
                    handler.start_prefix_mapping(&record.prefix, &record.uri)?;
                }
            }
            (_, EventCode::StartTag) => self.start_tag(handler)?,
            (_, EventCode::EndTag) => {
                let element = self.elements.pop().ok_or(Error::OutOfOrder { offset })?;
                let declared = self.mapping_counts.pop().unwrap_or(0);
                handler.end_element(&self.qname(element)?)?;
                self.close_mappings(declared, handler)?;
            }
            (_, EventCode::Text) => handler.characters(self.cursor.read_text()?)?,
            (_, EventCode::CData) => {
                let text = self.cursor.read_text()?;
                handler.start_cdata()?;
                if !text.is_empty() {
                    handler.characters(text)?;
                }
                handler.end_cdata()?;
            }
            (_, EventCode::IgnorableWhitespace) => {
                handler.ignorable_whitespace(self.cursor.read_text()?)?
            }
            (_, EventCode::Comment) => handler.comment(self.cursor.read_text()?)?,
            (_, EventCode::DocDecl) => handler.doctype(self.cursor.read_text()?)?,
            (_, EventCode::EntityRef) => handler.entity_reference(self.cursor.read_text()?)?,
            (_, EventCode::ProcessingInstruction) => {
                let target = self.cursor.read_string()?;
                let data = self.cursor.read_string()?;
                handler.processing_instruction(target, data)?;
            }
        }
        Ok(true)
    }

    fn start_tag<H: ContentHandler>(&mut self, handler: &mut H) -> Result<()> {
        let element = self.cursor.read_name()?;
        let count = self.cursor.read_word()? as usize;
        let declared = self.pending_mappings as usize;
        self.pending_mappings = 0;

        // Synthesized names must outlive the attribute slice
        let xmlns_names: Vec<String> = if self.config.namespace_attributes {
            self.bindings[self.bindings.len() - declared..]
                .iter()
                .map(|b| {
                    if b.is_default() {
                        XMLNS.to_owned()
                    } else {
                        format!("{XMLNS}:{}", b.prefix)
                    }
                })
                .collect()
        } else {
            Vec::new()
        };

        let mut attributes: Vec<Attribute<'_>> = Vec::with_capacity(count + xmlns_names.len());
        let declared_bindings = &self.bindings[self.bindings.len() - declared..];
        for (binding, qname) in declared_bindings.iter().copied().zip(&xmlns_names) {
            let local = if binding.is_default() { qname.as_str() } else { &*binding.prefix };
            attributes.push(Attribute::new(QName::new(XMLNS_URI, local, qname), &binding.uri));
        }
        for _ in 0..count {
            let record = self.cursor.read_name()?;
            let value = self.cursor.read_string()?;
            attributes.push(Attribute::new(self.qname(record)?, value));
        }

        self.elements.push(element);
        self.mapping_counts.push(declared as u32);
        handler.start_element(&self.qname(element)?, &attributes)
    }

    /// Pop `count` bindings, reporting each end mapping innermost first
    fn close_mappings<H: ContentHandler>(&mut self, count: u32, handler: &mut H) -> Result<()> {
        for _ in 0..count {
            let Some(binding) = self.bindings.pop() else {
                return Err(Error::OutOfOrder { offset: self.cursor.position() });
            };
            if self.config.namespace_mappings {
                handler.end_prefix_mapping(&binding.prefix)?;
            }
        }
        Ok(())
    }

    fn qname(&self, record: &'a QNameRecord) -> Result<QName<'a>> {
        let uri = match record.namespace {
            Some(index) => {
                let namespace = self.cursor.log().namespace(index).ok_or(
                    Error::DanglingReference { kind: TableKind::Namespace, index },
                )?;
                &*namespace.uri
            }
            None => "",
        };
        Ok(QName::new(uri, &record.local_name, &record.qname))
    }
}

/// Replay a whole log into a list of events
pub fn replay_to_vec(log: &EventLog) -> Result<Vec<SaxEvent>> {
    replay_to_vec_with(log, ReplayConfig::default())
}

pub fn replay_to_vec_with(log: &EventLog, config: ReplayConfig) -> Result<Vec<SaxEvent>> {
    let mut collector = EventCollector::new();
    Replayer::with_config(log, config).run(&mut collector)?;
    Ok(collector.take_events())
}
