//! Event Codes
//!
//! Tag values written to the event sequence. Some codes are followed by
//! inline words:
//!
//! | Code | Inline words |
//! |------|--------------|
//! | `StartTag` | name handle, attribute count, then one name handle per attribute |
//! | `Text`, `CData`, `Comment`, `DocDecl`, `EntityRef`, `IgnorableWhitespace` | character length |
//! | `StartNamespaceMapping` | namespace index |
//!
//! Attribute values and PI target/data live in the string table and are
//! consumed in write order.

/// Event type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum EventCode {
    StartDocument = 1,
    EndDocument = 2,
    StartTag = 3,
    EndTag = 4,
    Text = 5,
    CData = 6,
    EntityRef = 7,
    IgnorableWhitespace = 8,
    ProcessingInstruction = 9,
    Comment = 10,
    DocDecl = 11,
    StartNamespaceMapping = 12,
}

impl EventCode {
    /// Decode a raw word, `None` for anything this version does not write
    #[inline]
    pub fn from_word(word: u32) -> Option<Self> {
        Some(match word {
            1 => EventCode::StartDocument,
            2 => EventCode::EndDocument,
            3 => EventCode::StartTag,
            4 => EventCode::EndTag,
            5 => EventCode::Text,
            6 => EventCode::CData,
            7 => EventCode::EntityRef,
            8 => EventCode::IgnorableWhitespace,
            9 => EventCode::ProcessingInstruction,
            10 => EventCode::Comment,
            11 => EventCode::DocDecl,
            12 => EventCode::StartNamespaceMapping,
            _ => return None,
        })
    }

    #[inline]
    pub fn as_word(self) -> u32 {
        self as u32
    }

    /// Whether the code is followed by a character length
    #[inline]
    pub fn carries_chars(self) -> bool {
        matches!(
            self,
            EventCode::Text
                | EventCode::CData
                | EventCode::EntityRef
                | EventCode::IgnorableWhitespace
                | EventCode::Comment
                | EventCode::DocDecl
        )
    }
}
