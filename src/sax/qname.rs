//! Qualified Names
//!
//! Borrowed views of element and attribute names as they cross the
//! [`ContentHandler`](super::ContentHandler) boundary.

use memchr::memchr;

/// The prefix reserved for namespace declarations
pub const XMLNS: &str = "xmlns";

/// A resolved XML name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QName<'a> {
    /// Namespace URI, empty for no namespace
    pub uri: &'a str,
    /// Local name (after colon)
    pub local_name: &'a str,
    /// Qualified name as written, `prefix:local` or `local`
    pub qname: &'a str,
}

impl<'a> QName<'a> {
    /// Create a name with explicit parts
    pub const fn new(uri: &'a str, local_name: &'a str, qname: &'a str) -> Self {
        QName { uri, local_name, qname }
    }

    /// Create a name in no namespace
    pub const fn local(local_name: &'a str) -> Self {
        QName { uri: "", local_name, qname: local_name }
    }

    /// Namespace prefix (before colon), if any
    pub fn prefix(&self) -> Option<&'a str> {
        split_name(self.qname).0
    }

    /// Check whether the name is a namespace declaration (`xmlns` or `xmlns:*`)
    pub fn is_namespace_declaration(&self) -> bool {
        is_namespace_declaration(self.qname)
    }
}

/// An attribute with a resolved name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attribute<'a> {
    pub name: QName<'a>,
    pub value: &'a str,
}

impl<'a> Attribute<'a> {
    pub const fn new(name: QName<'a>, value: &'a str) -> Self {
        Attribute { name, value }
    }
}

/// Split a name into prefix and local name at the colon
pub fn split_name(name: &str) -> (Option<&str>, &str) {
    match memchr(b':', name.as_bytes()) {
        Some(pos) => (Some(&name[..pos]), &name[pos + 1..]),
        None => (None, name),
    }
}

/// Check whether a qualified name is `xmlns` or `xmlns:*`
pub fn is_namespace_declaration(qname: &str) -> bool {
    match split_name(qname) {
        (Some(prefix), _) => prefix == XMLNS,
        (None, local) => local == XMLNS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_name() {
        assert_eq!(split_name("svg:rect"), (Some("svg"), "rect"));
        assert_eq!(split_name("rect"), (None, "rect"));
    }

    #[test]
    fn test_prefix() {
        let name = QName::new("http://www.w3.org/2000/svg", "rect", "svg:rect");
        assert_eq!(name.prefix(), Some("svg"));
        assert_eq!(QName::local("div").prefix(), None);
    }

    #[test]
    fn test_namespace_declaration() {
        assert!(is_namespace_declaration("xmlns"));
        assert!(is_namespace_declaration("xmlns:p"));
        assert!(!is_namespace_declaration("xmlnsx"));
        assert!(!is_namespace_declaration("p:xmlns"));
    }
}
