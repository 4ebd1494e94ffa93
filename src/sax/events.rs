//! SAX Event Types
//!
//! Owned form of the notifications in [`ContentHandler`](super::ContentHandler),
//! for callers that want a list of events rather than callbacks.

use super::qname::{Attribute, QName};

/// Owned version of [`QName`] for storage
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OwnedQName {
    pub uri: String,
    pub local_name: String,
    pub qname: String,
}

impl OwnedQName {
    pub fn new(uri: &str, local_name: &str, qname: &str) -> Self {
        OwnedQName {
            uri: uri.to_owned(),
            local_name: local_name.to_owned(),
            qname: qname.to_owned(),
        }
    }

    /// Name in no namespace
    pub fn local(local_name: &str) -> Self {
        Self::new("", local_name, local_name)
    }

    /// Borrow as a [`QName`]
    pub fn as_qname(&self) -> QName<'_> {
        QName::new(&self.uri, &self.local_name, &self.qname)
    }
}

impl From<&QName<'_>> for OwnedQName {
    fn from(name: &QName<'_>) -> Self {
        Self::new(name.uri, name.local_name, name.qname)
    }
}

/// Owned version of [`Attribute`] for storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedAttribute {
    pub name: OwnedQName,
    pub value: String,
}

impl OwnedAttribute {
    pub fn new(name: OwnedQName, value: &str) -> Self {
        OwnedAttribute { name, value: value.to_owned() }
    }

    pub fn as_attribute(&self) -> Attribute<'_> {
        Attribute::new(self.name.as_qname(), &self.value)
    }
}

impl From<&Attribute<'_>> for OwnedAttribute {
    fn from(attr: &Attribute<'_>) -> Self {
        OwnedAttribute {
            name: OwnedQName::from(&attr.name),
            value: attr.value.to_owned(),
        }
    }
}

/// A single parse notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaxEvent {
    StartDocument,
    EndDocument,
    StartPrefixMapping { prefix: String, uri: String },
    EndPrefixMapping { prefix: String },
    StartElement { name: OwnedQName, attributes: Vec<OwnedAttribute> },
    EndElement { name: OwnedQName },
    Characters(String),
    IgnorableWhitespace(String),
    StartCData,
    EndCData,
    ProcessingInstruction { target: String, data: String },
    Comment(String),
    DocType(String),
    EntityReference(String),
}

impl SaxEvent {
    /// Check if this is a start element event
    #[inline]
    pub fn is_start_element(&self) -> bool {
        matches!(self, SaxEvent::StartElement { .. })
    }

    /// Check if this is an end element event
    #[inline]
    pub fn is_end_element(&self) -> bool {
        matches!(self, SaxEvent::EndElement { .. })
    }

    /// Check if this is a text event
    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self, SaxEvent::Characters(_))
    }

    /// Get the element name if this is a start or end element
    pub fn element_name(&self) -> Option<&OwnedQName> {
        match self {
            SaxEvent::StartElement { name, .. } | SaxEvent::EndElement { name } => Some(name),
            _ => None,
        }
    }

    /// Get text content if applicable
    pub fn as_text(&self) -> Option<&str> {
        match self {
            SaxEvent::Characters(t) | SaxEvent::IgnorableWhitespace(t) => Some(t),
            _ => None,
        }
    }
}
