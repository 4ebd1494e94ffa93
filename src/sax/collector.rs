//! SAX Collector
//!
//! Implements ContentHandler to collect notifications as owned events.

use super::events::{OwnedAttribute, OwnedQName, SaxEvent};
use super::handler::ContentHandler;
use super::qname::{Attribute, QName};
use crate::error::Result;

/// Collector that gathers notifications into a list of [`SaxEvent`]s
#[derive(Debug, Default, Clone)]
pub struct EventCollector {
    events: Vec<SaxEvent>,
}

impl EventCollector {
    /// Create a new collector
    pub fn new() -> Self {
        Self { events: Vec::with_capacity(64) }
    }

    /// Create from an existing list of events (to re-drive them)
    pub fn from_events(events: Vec<SaxEvent>) -> Self {
        Self { events }
    }

    /// Get the collected events as a slice
    pub fn events(&self) -> &[SaxEvent] {
        &self.events
    }

    /// Take the collected events
    pub fn take_events(&mut self) -> Vec<SaxEvent> {
        std::mem::take(&mut self.events)
    }

    /// Get number of collected events
    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Push the collected events into another handler, in order
    pub fn replay_into<H: ContentHandler>(&self, handler: &mut H) -> Result<()> {
        let mut attrs: Vec<Attribute<'_>> = Vec::with_capacity(8);
        for event in &self.events {
            match event {
                SaxEvent::StartDocument => handler.start_document()?,
                SaxEvent::EndDocument => handler.end_document()?,
                SaxEvent::StartPrefixMapping { prefix, uri } => {
                    handler.start_prefix_mapping(prefix, uri)?
                }
                SaxEvent::EndPrefixMapping { prefix } => handler.end_prefix_mapping(prefix)?,
                SaxEvent::StartElement { name, attributes } => {
                    attrs.clear();
                    attrs.extend(attributes.iter().map(OwnedAttribute::as_attribute));
                    handler.start_element(&name.as_qname(), &attrs)?;
                }
                SaxEvent::EndElement { name } => handler.end_element(&name.as_qname())?,
                SaxEvent::Characters(text) => handler.characters(text)?,
                SaxEvent::IgnorableWhitespace(text) => handler.ignorable_whitespace(text)?,
                SaxEvent::StartCData => handler.start_cdata()?,
                SaxEvent::EndCData => handler.end_cdata()?,
                SaxEvent::ProcessingInstruction { target, data } => {
                    handler.processing_instruction(target, data)?
                }
                SaxEvent::Comment(text) => handler.comment(text)?,
                SaxEvent::DocType(text) => handler.doctype(text)?,
                SaxEvent::EntityReference(name) => handler.entity_reference(name)?,
            }
        }
        Ok(())
    }
}

impl ContentHandler for EventCollector {
    fn start_document(&mut self) -> Result<()> {
        self.events.push(SaxEvent::StartDocument);
        Ok(())
    }

    fn end_document(&mut self) -> Result<()> {
        self.events.push(SaxEvent::EndDocument);
        Ok(())
    }

    fn start_prefix_mapping(&mut self, prefix: &str, uri: &str) -> Result<()> {
        self.events.push(SaxEvent::StartPrefixMapping {
            prefix: prefix.to_owned(),
            uri: uri.to_owned(),
        });
        Ok(())
    }

    fn end_prefix_mapping(&mut self, prefix: &str) -> Result<()> {
        self.events.push(SaxEvent::EndPrefixMapping { prefix: prefix.to_owned() });
        Ok(())
    }

    fn start_element(&mut self, name: &QName<'_>, attributes: &[Attribute<'_>]) -> Result<()> {
        self.events.push(SaxEvent::StartElement {
            name: OwnedQName::from(name),
            attributes: attributes.iter().map(OwnedAttribute::from).collect(),
        });
        Ok(())
    }

    fn end_element(&mut self, name: &QName<'_>) -> Result<()> {
        self.events.push(SaxEvent::EndElement { name: OwnedQName::from(name) });
        Ok(())
    }

    fn characters(&mut self, text: &str) -> Result<()> {
        self.events.push(SaxEvent::Characters(text.to_owned()));
        Ok(())
    }

    fn ignorable_whitespace(&mut self, text: &str) -> Result<()> {
        self.events.push(SaxEvent::IgnorableWhitespace(text.to_owned()));
        Ok(())
    }

    fn start_cdata(&mut self) -> Result<()> {
        self.events.push(SaxEvent::StartCData);
        Ok(())
    }

    fn end_cdata(&mut self) -> Result<()> {
        self.events.push(SaxEvent::EndCData);
        Ok(())
    }

    fn processing_instruction(&mut self, target: &str, data: &str) -> Result<()> {
        self.events.push(SaxEvent::ProcessingInstruction {
            target: target.to_owned(),
            data: data.to_owned(),
        });
        Ok(())
    }

    fn comment(&mut self, text: &str) -> Result<()> {
        self.events.push(SaxEvent::Comment(text.to_owned()));
        Ok(())
    }

    fn doctype(&mut self, text: &str) -> Result<()> {
        self.events.push(SaxEvent::DocType(text.to_owned()));
        Ok(())
    }

    fn entity_reference(&mut self, name: &str) -> Result<()> {
        self.events.push(SaxEvent::EntityReference(name.to_owned()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_simple() {
        let mut collector = EventCollector::new();
        collector.start_document().unwrap();
        collector.start_element(&QName::local("root"), &[]).unwrap();
        collector.characters("hello").unwrap();
        collector.end_element(&QName::local("root")).unwrap();
        collector.end_document().unwrap();

        assert_eq!(collector.event_count(), 5);
        assert!(collector.events()[1].is_start_element());
        assert_eq!(collector.events()[2].as_text(), Some("hello"));
    }

    #[test]
    fn test_replay_into_copies_events() {
        let mut source = EventCollector::new();
        source.start_document().unwrap();
        source
            .start_element(
                &QName::local("root"),
                &[Attribute::new(QName::local("id"), "1")],
            )
            .unwrap();
        source.start_cdata().unwrap();
        source.characters("<raw>").unwrap();
        source.end_cdata().unwrap();
        source.processing_instruction("target", "data").unwrap();
        source.end_element(&QName::local("root")).unwrap();
        source.end_document().unwrap();

        let mut copy = EventCollector::new();
        source.replay_into(&mut copy).unwrap();
        assert_eq!(copy.events(), source.events());
    }
}
