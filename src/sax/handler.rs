//! Content Handler Trait
//!
//! The notification contract shared by both sides of the store: a parser
//! pushes these into [`Capture`](crate::capture::Capture), and
//! [`Replayer`](crate::replay::Replayer) pushes the same calls back out to
//! any consumer.

use super::qname::{Attribute, QName};
use crate::error::Result;

/// Trait for receiving XML parse notifications
///
/// Implement this trait to consume a replayed event stream, or drive an
/// implementation of it (the capture adapter) from a parser. Names and text
/// are borrowed for the duration of the call only.
pub trait ContentHandler {
    /// Called once before any other notification
    fn start_document(&mut self) -> Result<()>;

    /// Called once after every other notification
    fn end_document(&mut self) -> Result<()>;

    /// Called before the `start_element` whose scope the binding opens
    ///
    /// # Arguments
    /// * `prefix` - Bound prefix, empty for the default namespace
    /// * `uri` - Namespace URI
    fn start_prefix_mapping(&mut self, prefix: &str, uri: &str) -> Result<()>;

    /// Called after the `end_element` that closes the binding's scope
    fn end_prefix_mapping(&mut self, prefix: &str) -> Result<()>;

    /// Called when an element starts
    ///
    /// # Arguments
    /// * `name` - Resolved element name
    /// * `attributes` - Attributes in document order
    fn start_element(&mut self, name: &QName<'_>, attributes: &[Attribute<'_>]) -> Result<()>;

    /// Called when an element ends
    fn end_element(&mut self, name: &QName<'_>) -> Result<()>;

    /// Called for character data
    ///
    /// Inside a CDATA section this carries the section content.
    fn characters(&mut self, text: &str) -> Result<()>;

    /// Called for whitespace in element-only content (optional)
    fn ignorable_whitespace(&mut self, _text: &str) -> Result<()> {
        Ok(())
    }

    /// Called before the `characters` call of a CDATA section (optional)
    fn start_cdata(&mut self) -> Result<()> {
        Ok(())
    }

    /// Called after the `characters` call of a CDATA section (optional)
    fn end_cdata(&mut self) -> Result<()> {
        Ok(())
    }

    /// Called for processing instructions
    ///
    /// # Arguments
    /// * `target` - PI target
    /// * `data` - PI data, empty when absent
    fn processing_instruction(&mut self, target: &str, data: &str) -> Result<()>;

    /// Called for comments (optional)
    fn comment(&mut self, _text: &str) -> Result<()> {
        Ok(())
    }

    /// Called for the document type declaration (optional)
    fn doctype(&mut self, _text: &str) -> Result<()> {
        Ok(())
    }

    /// Called for an entity reference the parser did not expand (optional)
    fn entity_reference(&mut self, _name: &str) -> Result<()> {
        Ok(())
    }
}

impl<H: ContentHandler + ?Sized> ContentHandler for &mut H {
    fn start_document(&mut self) -> Result<()> {
        (**self).start_document()
    }

    fn end_document(&mut self) -> Result<()> {
        (**self).end_document()
    }

    fn start_prefix_mapping(&mut self, prefix: &str, uri: &str) -> Result<()> {
        (**self).start_prefix_mapping(prefix, uri)
    }

    fn end_prefix_mapping(&mut self, prefix: &str) -> Result<()> {
        (**self).end_prefix_mapping(prefix)
    }

    fn start_element(&mut self, name: &QName<'_>, attributes: &[Attribute<'_>]) -> Result<()> {
        (**self).start_element(name, attributes)
    }

    fn end_element(&mut self, name: &QName<'_>) -> Result<()> {
        (**self).end_element(name)
    }

    fn characters(&mut self, text: &str) -> Result<()> {
        (**self).characters(text)
    }

    fn ignorable_whitespace(&mut self, text: &str) -> Result<()> {
        (**self).ignorable_whitespace(text)
    }

    fn start_cdata(&mut self) -> Result<()> {
        (**self).start_cdata()
    }

    fn end_cdata(&mut self) -> Result<()> {
        (**self).end_cdata()
    }

    fn processing_instruction(&mut self, target: &str, data: &str) -> Result<()> {
        (**self).processing_instruction(target, data)
    }

    fn comment(&mut self, text: &str) -> Result<()> {
        (**self).comment(text)
    }

    fn doctype(&mut self, text: &str) -> Result<()> {
        (**self).doctype(text)
    }

    fn entity_reference(&mut self, name: &str) -> Result<()> {
        (**self).entity_reference(name)
    }
}
