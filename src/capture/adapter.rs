//! Capture Adapter
//!
//! Implements ContentHandler to write notifications into an [`EventLog`],
//! resolving every element and attribute name to a namespace record first.

use super::config::CaptureConfig;
use super::scope::NamespaceScope;
use crate::error::{Error, Result};
use crate::log::{text_length, EventCode, EventLog, NameHandle, NamespaceIndex};
use crate::sax::{Attribute, ContentHandler, EventCollector, QName, SaxEvent};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CaptureState {
    Idle,
    InDocument,
    Ended,
}

/// An open element
#[derive(Debug, Clone, Copy)]
struct ElementFrame {
    handle: NameHandle,
    /// Prefix mappings declared just before this element
    mappings: u32,
}

/// Write side of the store
///
/// Owns the log while capturing; [`Capture::finish`] hands it back.
pub struct Capture {
    log: EventLog,
    config: CaptureConfig,
    scope: NamespaceScope,
    state: CaptureState,
    /// Stack of open elements
    elements: Vec<ElementFrame>,
    /// Mappings declared since the last start_element
    pending_mappings: u32,
    /// End mappings still expected for the element closed last
    closing_mappings: u32,
    /// Character offset where the open CDATA section began
    cdata_start: Option<usize>,
}

impl Capture {
    /// Create a capture writing into a fresh log
    pub fn new() -> Self {
        Self::with_config(CaptureConfig::default())
    }

    pub fn with_config(config: CaptureConfig) -> Self {
        Self::with_log(EventLog::new(), config)
    }

    /// Reuse an existing log; any previous content is cleared first
    pub fn with_log(mut log: EventLog, config: CaptureConfig) -> Self {
        log.reset();
        Capture {
            log,
            config,
            scope: NamespaceScope::new(),
            state: CaptureState::Idle,
            elements: Vec::with_capacity(32),
            pending_mappings: 0,
            closing_mappings: 0,
            cdata_start: None,
        }
    }

    /// The log written so far
    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    /// Number of open elements
    pub fn depth(&self) -> usize {
        self.elements.len()
    }

    /// Whether `end_document` has been captured
    pub fn is_complete(&self) -> bool {
        self.state == CaptureState::Ended
    }

    /// Clear the log and all scope state for an unrelated document
    pub fn reset(&mut self) {
        self.log.reset();
        self.scope.clear();
        self.state = CaptureState::Idle;
        self.elements.clear();
        self.pending_mappings = 0;
        self.closing_mappings = 0;
        self.cdata_start = None;
    }

    /// Finish capturing and return the log
    pub fn finish(mut self) -> EventLog {
        if self.state != CaptureState::Ended {
            warn!(depth = self.elements.len(), "capture finished before end_document");
        }
        if self.config.shrink_on_finish {
            self.log.shrink_to_fit();
        }
        self.log
    }

    /// Check document state for anything other than section content
    fn ensure_in_document(&mut self) -> Result<()> {
        if self.cdata_start.is_some() {
            return Err(Error::UnclosedCData);
        }
        self.settle_document()
    }

    /// Check document state and settle the scope of the last closed element
    fn settle_document(&mut self) -> Result<()> {
        match self.state {
            CaptureState::Idle => return Err(Error::NotInDocument),
            CaptureState::Ended => return Err(Error::DocumentEnded),
            CaptureState::InDocument => {}
        }
        if self.closing_mappings > 0 {
            warn!(
                count = self.closing_mappings,
                "prefix mappings of a closed element were never ended"
            );
            self.scope.discard(self.closing_mappings as usize);
            self.closing_mappings = 0;
        }
        Ok(())
    }

    fn resolve_element(&mut self, name: &QName<'_>) -> Option<NamespaceIndex> {
        if name.uri.is_empty() {
            return None;
        }
        self.scope.resolve_element(name.uri).or_else(|| {
            let prefix = name.prefix().unwrap_or("");
            Some(self.scope.record_for(prefix, name.uri, &mut self.log))
        })
    }

    fn resolve_attribute(&mut self, name: &QName<'_>) -> Option<NamespaceIndex> {
        if name.uri.is_empty() {
            return None;
        }
        self.scope.resolve_attribute(name.uri).or_else(|| {
            // Bound only through the name itself, e.g. xml:lang
            let prefix = name.prefix()?;
            Some(self.scope.record_for(prefix, name.uri, &mut self.log))
        })
    }

    fn intern(&mut self, namespace: Option<NamespaceIndex>, name: &QName<'_>) -> NameHandle {
        // Non-namespace-aware parsers may leave the local name empty
        let local = if name.local_name.is_empty() { name.qname } else { name.local_name };
        self.log.intern_qname(namespace, local)
    }

    fn keep_attribute(&self, attr: &Attribute<'_>) -> bool {
        !(self.config.skip_namespace_attributes && attr.name.is_namespace_declaration())
    }

    fn append_text(&mut self, code: EventCode, text: &str) -> Result<()> {
        self.ensure_in_document()?;
        let len = self.log.append_chars(text)?;
        self.log.append_event(code, &[len]);
        Ok(())
    }
}

impl Default for Capture {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentHandler for Capture {
    fn start_document(&mut self) -> Result<()> {
        match self.state {
            CaptureState::Idle => {}
            CaptureState::InDocument => return Err(Error::AlreadyStarted),
            CaptureState::Ended => return Err(Error::DocumentEnded),
        }
        self.state = CaptureState::InDocument;
        self.log.append_event(EventCode::StartDocument, &[]);
        Ok(())
    }

    fn end_document(&mut self) -> Result<()> {
        self.ensure_in_document()?;
        if !self.elements.is_empty() {
            return Err(Error::UnclosedElements { depth: self.elements.len() });
        }
        if self.pending_mappings > 0 {
            warn!(
                count = self.pending_mappings,
                "prefix mappings declared without a following element"
            );
            self.scope.discard(self.pending_mappings as usize);
            self.pending_mappings = 0;
        }
        self.log.append_event(EventCode::EndDocument, &[]);
        self.state = CaptureState::Ended;

        let stats = self.log.stats();
        debug!(
            event_words = stats.event_words,
            chars = stats.chars,
            strings = stats.strings,
            names = stats.names,
            namespaces = stats.namespaces,
            "capture complete"
        );
        Ok(())
    }

    fn start_prefix_mapping(&mut self, prefix: &str, uri: &str) -> Result<()> {
        self.ensure_in_document()?;
        let record = self.scope.declare(prefix, uri, &mut self.log);
        self.log.append_event(EventCode::StartNamespaceMapping, &[record]);
        self.pending_mappings += 1;
        Ok(())
    }

    fn end_prefix_mapping(&mut self, prefix: &str) -> Result<()> {
        match self.state {
            CaptureState::Idle => return Err(Error::NotInDocument),
            CaptureState::Ended => return Err(Error::DocumentEnded),
            CaptureState::InDocument => {}
        }
        if self.cdata_start.is_some() {
            return Err(Error::UnclosedCData);
        }
        if self.closing_mappings == 0 {
            return Err(Error::UnexpectedEndMapping { prefix: prefix.to_owned() });
        }
        self.scope.undeclare(prefix, self.closing_mappings as usize)?;
        self.closing_mappings -= 1;
        Ok(())
    }

    fn start_element(&mut self, name: &QName<'_>, attributes: &[Attribute<'_>]) -> Result<()> {
        self.ensure_in_document()?;
        let namespace = self.resolve_element(name);
        let handle = self.intern(namespace, name);

        let count = attributes.iter().filter(|a| self.keep_attribute(a)).count() as u32;
        self.log.append_event(EventCode::StartTag, &[handle, count]);

        for attr in attributes {
            if !self.keep_attribute(attr) {
                continue;
            }
            let namespace = self.resolve_attribute(&attr.name);
            let attr_handle = self.intern(namespace, &attr.name);
            self.log.append_word(attr_handle);
            self.log.append_string(attr.value);
        }

        self.elements.push(ElementFrame {
            handle,
            mappings: self.pending_mappings,
        });
        self.pending_mappings = 0;
        Ok(())
    }

    fn end_element(&mut self, name: &QName<'_>) -> Result<()> {
        self.ensure_in_document()?;
        let frame = self.elements.pop().ok_or(Error::UnbalancedEndElement)?;
        let local = if name.local_name.is_empty() { name.qname } else { name.local_name };
        if let Some(open) = self.log.name(frame.handle) {
            if !local.is_empty() && *open.local_name != *local {
                return Err(Error::MismatchedEndElement {
                    expected: open.qname.to_string(),
                    found: name.qname.to_owned(),
                });
            }
        }
        self.log.append_event(EventCode::EndTag, &[]);
        self.closing_mappings = frame.mappings;
        Ok(())
    }

    fn characters(&mut self, text: &str) -> Result<()> {
        let Some(start) = self.cdata_start else {
            return self.append_text(EventCode::Text, text);
        };
        // Section content is sized when the section closes
        self.settle_document()?;
        text_length(self.log.chars().len() - start + text.len())?;
        self.log.append_chars(text)?;
        Ok(())
    }

    fn ignorable_whitespace(&mut self, text: &str) -> Result<()> {
        self.append_text(EventCode::IgnorableWhitespace, text)
    }

    fn start_cdata(&mut self) -> Result<()> {
        self.ensure_in_document()?;
        self.cdata_start = Some(self.log.chars().len());
        Ok(())
    }

    fn end_cdata(&mut self) -> Result<()> {
        self.settle_document()?;
        let start = self.cdata_start.ok_or(Error::UnbalancedCData)?;
        let len = text_length(self.log.chars().len() - start)?;
        self.cdata_start = None;
        self.log.append_event(EventCode::CData, &[len]);
        Ok(())
    }

    fn processing_instruction(&mut self, target: &str, data: &str) -> Result<()> {
        self.ensure_in_document()?;
        self.log.append_event(EventCode::ProcessingInstruction, &[]);
        self.log.append_string(target);
        self.log.append_string(data);
        Ok(())
    }

    fn comment(&mut self, text: &str) -> Result<()> {
        self.append_text(EventCode::Comment, text)
    }

    fn doctype(&mut self, text: &str) -> Result<()> {
        self.append_text(EventCode::DocDecl, text)
    }

    fn entity_reference(&mut self, name: &str) -> Result<()> {
        self.append_text(EventCode::EntityRef, name)
    }
}

/// Capture a recorded list of notifications into a new log
pub fn capture_events(events: Vec<SaxEvent>) -> Result<EventLog> {
    let mut capture = Capture::new();
    EventCollector::from_events(events).replay_into(&mut capture)?;
    Ok(capture.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::EventCode;

    fn codes(log: &EventLog) -> Vec<EventCode> {
        // Walk the sequence, skipping inline words
        let mut out = Vec::new();
        let mut cursor = log.create_reader();
        while !cursor.is_at_end() {
            let code = cursor.next_code().unwrap();
            match code {
                EventCode::StartTag => {
                    cursor.read_word().unwrap();
                    let count = cursor.read_word().unwrap();
                    for _ in 0..count {
                        cursor.read_word().unwrap();
                    }
                }
                EventCode::StartNamespaceMapping => {
                    cursor.read_word().unwrap();
                }
                c if c.carries_chars() => {
                    cursor.read_word().unwrap();
                }
                _ => {}
            }
            out.push(code);
        }
        out
    }

    #[test]
    fn test_simple_capture() {
        let mut capture = Capture::new();
        capture.start_document().unwrap();
        capture.start_element(&QName::local("root"), &[]).unwrap();
        capture.characters("hello").unwrap();
        capture.end_element(&QName::local("root")).unwrap();
        capture.end_document().unwrap();
        assert!(capture.is_complete());

        let log = capture.finish();
        assert_eq!(
            codes(&log),
            vec![
                EventCode::StartDocument,
                EventCode::StartTag,
                EventCode::Text,
                EventCode::EndTag,
                EventCode::EndDocument,
            ]
        );
        assert_eq!(log.chars(), "hello");
    }

    #[test]
    fn test_attributes_encoded() {
        let mut capture = Capture::new();
        capture.start_document().unwrap();
        capture
            .start_element(
                &QName::local("root"),
                &[
                    Attribute::new(QName::local("id"), "1"),
                    Attribute::new(QName::local("name"), "test"),
                ],
            )
            .unwrap();
        capture.end_element(&QName::local("root")).unwrap();
        capture.end_document().unwrap();

        let log = capture.finish();
        // start-doc, start-tag, handle, count, attr handles..., end-tag, end-doc
        assert_eq!(log.events()[1], EventCode::StartTag.as_word());
        assert_eq!(log.events()[3], 2);
        assert_eq!(log.strings().len(), 2);
        assert_eq!(&*log.strings()[1], "test");
    }

    #[test]
    fn test_cdata_chunks_coalesce() {
        let mut capture = Capture::new();
        capture.start_document().unwrap();
        capture.start_element(&QName::local("a"), &[]).unwrap();
        capture.start_cdata().unwrap();
        capture.characters("<x").unwrap();
        capture.characters("/>").unwrap();
        capture.end_cdata().unwrap();
        capture.end_element(&QName::local("a")).unwrap();
        capture.end_document().unwrap();

        let log = capture.finish();
        assert_eq!(codes(&log)[2], EventCode::CData);
        assert_eq!(log.events()[5], 4);
    }

    #[test]
    fn test_namespace_attributes_skipped() {
        let mut capture = Capture::new();
        capture.start_document().unwrap();
        capture.start_prefix_mapping("p", "urn:p").unwrap();
        capture
            .start_element(
                &QName::new("urn:p", "a", "p:a"),
                &[Attribute::new(QName::new("", "p", "xmlns:p"), "urn:p")],
            )
            .unwrap();
        assert!(capture.log().strings().is_empty());
    }

    #[test]
    fn test_namespace_attributes_kept_when_configured() {
        let config = CaptureConfig::default().with_skip_namespace_attributes(false);
        let mut capture = Capture::with_config(config);
        capture.start_document().unwrap();
        capture
            .start_element(
                &QName::local("a"),
                &[Attribute::new(QName::local("xmlns"), "urn:d")],
            )
            .unwrap();
        assert_eq!(capture.log().strings().len(), 1);
    }

    #[test]
    fn test_handles_shared_across_elements() {
        let mut capture = Capture::new();
        capture.start_document().unwrap();
        for _ in 0..3 {
            capture.start_element(&QName::local("item"), &[]).unwrap();
            capture.end_element(&QName::local("item")).unwrap();
        }
        capture.end_document().unwrap();
        assert_eq!(capture.log().names().len(), 1);
    }

    #[test]
    fn test_same_uri_reuses_namespace_record() {
        let mut capture = Capture::new();
        capture.start_document().unwrap();
        for _ in 0..2 {
            capture.start_prefix_mapping("p", "urn:p").unwrap();
            capture.start_element(&QName::new("urn:p", "a", "p:a"), &[]).unwrap();
            capture.end_element(&QName::new("urn:p", "a", "p:a")).unwrap();
            capture.end_prefix_mapping("p").unwrap();
        }
        capture.end_document().unwrap();
        let log = capture.finish();
        assert_eq!(log.namespaces().len(), 1);
        assert_eq!(log.names().len(), 1);
    }

    #[test]
    fn test_xml_prefix_without_mapping() {
        let xml = "http://www.w3.org/XML/1998/namespace";
        let mut capture = Capture::new();
        capture.start_document().unwrap();
        capture
            .start_element(
                &QName::local("a"),
                &[Attribute::new(QName::new(xml, "lang", "xml:lang"), "en")],
            )
            .unwrap();
        let log = capture.log();
        let attr = log.name(1).unwrap();
        assert_eq!(&*attr.qname, "xml:lang");
        let ns = log.namespace(attr.namespace.unwrap()).unwrap();
        assert_eq!(&*ns.uri, xml);
    }

    #[test]
    fn test_unbalanced_end_element() {
        let mut capture = Capture::new();
        capture.start_document().unwrap();
        assert!(matches!(
            capture.end_element(&QName::local("a")),
            Err(Error::UnbalancedEndElement)
        ));
    }

    #[test]
    fn test_mismatched_end_element() {
        let mut capture = Capture::new();
        capture.start_document().unwrap();
        capture.start_element(&QName::local("a"), &[]).unwrap();
        assert!(matches!(
            capture.end_element(&QName::local("b")),
            Err(Error::MismatchedEndElement { .. })
        ));
    }

    #[test]
    fn test_markup_inside_cdata_rejected() {
        let mut capture = Capture::new();
        capture.start_document().unwrap();
        capture.start_element(&QName::local("a"), &[]).unwrap();
        capture.start_cdata().unwrap();
        capture.characters("xy").unwrap();

        assert!(matches!(capture.comment("note"), Err(Error::UnclosedCData)));
        assert!(matches!(capture.ignorable_whitespace(" "), Err(Error::UnclosedCData)));
        assert!(matches!(
            capture.processing_instruction("t", "d"),
            Err(Error::UnclosedCData)
        ));
        assert!(matches!(
            capture.start_element(&QName::local("b"), &[]),
            Err(Error::UnclosedCData)
        ));
        assert!(matches!(
            capture.end_element(&QName::local("a")),
            Err(Error::UnclosedCData)
        ));
        assert!(matches!(
            capture.start_prefix_mapping("p", "urn:p"),
            Err(Error::UnclosedCData)
        ));
        assert!(matches!(capture.end_document(), Err(Error::UnclosedCData)));

        // Rejected notifications left nothing behind
        capture.end_cdata().unwrap();
        capture.characters("tail").unwrap();
        capture.end_element(&QName::local("a")).unwrap();
        capture.end_document().unwrap();
        let log = capture.finish();
        assert_eq!(log.chars(), "xytail");
        assert!(log.strings().is_empty());

        let events = crate::replay_to_vec(&log).unwrap();
        assert_eq!(
            events[2..6],
            [
                SaxEvent::StartCData,
                SaxEvent::Characters("xy".into()),
                SaxEvent::EndCData,
                SaxEvent::Characters("tail".into()),
            ]
        );
    }

    #[test]
    fn test_nested_cdata_rejected() {
        let mut capture = Capture::new();
        capture.start_document().unwrap();
        capture.start_cdata().unwrap();
        capture.characters("lost").unwrap();
        assert!(matches!(capture.start_cdata(), Err(Error::UnclosedCData)));
        capture.characters("kept").unwrap();
        capture.end_cdata().unwrap();
        capture.characters("tail").unwrap();
        capture.end_document().unwrap();

        let events = crate::replay_to_vec(&capture.finish()).unwrap();
        assert_eq!(
            events,
            vec![
                SaxEvent::StartDocument,
                SaxEvent::StartCData,
                SaxEvent::Characters("lostkept".into()),
                SaxEvent::EndCData,
                SaxEvent::Characters("tail".into()),
                SaxEvent::EndDocument,
            ]
        );
    }

    #[test]
    fn test_unended_mappings_dropped_before_sibling() {
        let root = QName::local("root");
        let first = QName::new("urn:a", "x", "p:x");
        let second = QName::new("urn:b", "y", "p:y");

        let mut capture = Capture::new();
        capture.start_document().unwrap();
        capture.start_element(&root, &[]).unwrap();
        capture.start_prefix_mapping("p", "urn:a").unwrap();
        capture.start_element(&first, &[]).unwrap();
        capture.end_element(&first).unwrap();
        // No end_prefix_mapping("p") for the first element
        capture.start_prefix_mapping("p", "urn:b").unwrap();
        assert_eq!(capture.scope.len(), 1);
        assert_eq!(capture.scope.resolve_element("urn:b"), capture.scope.resolve_prefix("p"));
        capture.start_element(&second, &[]).unwrap();
        capture.end_element(&second).unwrap();
        capture.end_prefix_mapping("p").unwrap();
        capture.end_element(&root).unwrap();
        capture.end_document().unwrap();
        assert!(capture.scope.is_empty());

        let events = crate::replay_to_vec(&capture.finish()).unwrap();
        let p_start = |uri: &str| SaxEvent::StartPrefixMapping { prefix: "p".into(), uri: uri.into() };
        let p_end = SaxEvent::EndPrefixMapping { prefix: "p".into() };
        assert_eq!(
            events,
            vec![
                SaxEvent::StartDocument,
                SaxEvent::StartElement { name: (&root).into(), attributes: vec![] },
                p_start("urn:a"),
                SaxEvent::StartElement { name: (&first).into(), attributes: vec![] },
                SaxEvent::EndElement { name: (&first).into() },
                p_end.clone(),
                p_start("urn:b"),
                SaxEvent::StartElement { name: (&second).into(), attributes: vec![] },
                SaxEvent::EndElement { name: (&second).into() },
                p_end,
                SaxEvent::EndElement { name: (&root).into() },
                SaxEvent::EndDocument,
            ]
        );
    }

    #[test]
    fn test_trailing_mapping_closed_at_end_document() {
        let root = QName::local("root");
        let mut capture = Capture::new();
        capture.start_document().unwrap();
        capture.start_element(&root, &[]).unwrap();
        capture.end_element(&root).unwrap();
        capture.start_prefix_mapping("q", "urn:q").unwrap();
        capture.end_document().unwrap();
        assert!(capture.scope.is_empty());

        let events = crate::replay_to_vec(&capture.finish()).unwrap();
        assert_eq!(
            events,
            vec![
                SaxEvent::StartDocument,
                SaxEvent::StartElement { name: (&root).into(), attributes: vec![] },
                SaxEvent::EndElement { name: (&root).into() },
                SaxEvent::StartPrefixMapping { prefix: "q".into(), uri: "urn:q".into() },
                SaxEvent::EndPrefixMapping { prefix: "q".into() },
                SaxEvent::EndDocument,
            ]
        );
    }

    #[test]
    fn test_reused_log_is_cleared() {
        let mut log = EventLog::new();
        log.append_event(EventCode::Comment, &[1]);
        log.append_chars("x").unwrap();
        let capture = Capture::with_log(log, CaptureConfig::default());
        assert!(capture.log().is_empty());
        assert!(capture.log().chars().is_empty());
    }

    #[test]
    fn test_end_cdata_without_start() {
        let mut capture = Capture::new();
        capture.start_document().unwrap();
        assert!(matches!(capture.end_cdata(), Err(Error::UnbalancedCData)));
    }

    #[test]
    fn test_unclosed_elements_at_end() {
        let mut capture = Capture::new();
        capture.start_document().unwrap();
        capture.start_element(&QName::local("a"), &[]).unwrap();
        assert!(matches!(
            capture.end_document(),
            Err(Error::UnclosedElements { depth: 1 })
        ));
    }

    #[test]
    fn test_end_mapping_never_started() {
        let mut capture = Capture::new();
        capture.start_document().unwrap();
        capture.start_element(&QName::local("a"), &[]).unwrap();
        capture.end_element(&QName::local("a")).unwrap();
        assert!(matches!(
            capture.end_prefix_mapping("p"),
            Err(Error::UnexpectedEndMapping { .. })
        ));
    }

    #[test]
    fn test_end_mapping_wrong_prefix() {
        let mut capture = Capture::new();
        capture.start_document().unwrap();
        capture.start_prefix_mapping("p", "urn:p").unwrap();
        capture.start_element(&QName::new("urn:p", "a", "p:a"), &[]).unwrap();
        capture.end_element(&QName::new("urn:p", "a", "p:a")).unwrap();
        assert!(matches!(
            capture.end_prefix_mapping("q"),
            Err(Error::UnboundPrefix { .. })
        ));
    }

    #[test]
    fn test_document_order_enforced() {
        let mut capture = Capture::new();
        assert!(matches!(capture.characters("x"), Err(Error::NotInDocument)));
        capture.start_document().unwrap();
        assert!(matches!(capture.start_document(), Err(Error::AlreadyStarted)));
        capture.end_document().unwrap();
        assert!(matches!(capture.comment("x"), Err(Error::DocumentEnded)));

        capture.reset();
        capture.start_document().unwrap();
    }

    #[test]
    fn test_capture_events_helper() {
        let log = capture_events(vec![SaxEvent::StartDocument, SaxEvent::EndDocument]).unwrap();
        assert_eq!(codes(&log), vec![EventCode::StartDocument, EventCode::EndDocument]);
    }
}
