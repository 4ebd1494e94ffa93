//! Log Cursor
//!
//! Three monotonically increasing offsets (event words, chars, strings)
//! over a borrowed [`EventLog`]. The borrow keeps the log immutable while
//! any cursor is alive.

use super::codes::EventCode;
use super::names::{NamespaceIndex, QNameRecord};
use super::namespaces::NamespaceRecord;
use super::store::EventLog;
use crate::error::{Error, Result, TableKind};

#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    log: &'a EventLog,
    event: usize,
    chars: usize,
    strings: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(log: &'a EventLog) -> Self {
        Cursor { log, event: 0, chars: 0, strings: 0 }
    }

    pub fn log(&self) -> &'a EventLog {
        self.log
    }

    /// Offset of the next word in the event sequence
    #[inline]
    pub fn position(&self) -> usize {
        self.event
    }

    /// Offsets of (event, chars, strings)
    pub fn offsets(&self) -> (usize, usize, usize) {
        (self.event, self.chars, self.strings)
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.event >= self.log.events().len()
    }

    /// Rewind all three offsets to the start
    pub fn reset(&mut self) {
        self.event = 0;
        self.chars = 0;
        self.strings = 0;
    }

    /// Read one raw word from the event sequence
    #[inline]
    pub fn read_word(&mut self) -> Result<u32> {
        let word = *self
            .log
            .events()
            .get(self.event)
            .ok_or(Error::Truncated { offset: self.event })?;
        self.event += 1;
        Ok(word)
    }

    /// Read and decode the next event code
    pub fn next_code(&mut self) -> Result<EventCode> {
        let offset = self.event;
        let word = self.read_word()?;
        EventCode::from_word(word).ok_or(Error::UnknownEventCode { code: word, offset })
    }

    /// Slice the next `len` bytes off the character buffer
    pub fn read_chars(&mut self, len: u32) -> Result<&'a str> {
        let start = self.chars;
        let end = start + len as usize;
        let text = self
            .log
            .chars()
            .get(start..end)
            .ok_or(Error::Truncated { offset: self.event })?;
        self.chars = end;
        Ok(text)
    }

    /// Read a length word, then that many characters
    pub fn read_text(&mut self) -> Result<&'a str> {
        let len = self.read_word()?;
        self.read_chars(len)
    }

    /// Take the next entry of the string table
    pub fn read_string(&mut self) -> Result<&'a str> {
        let value = self
            .log
            .strings()
            .get(self.strings)
            .ok_or(Error::Truncated { offset: self.event })?;
        self.strings += 1;
        Ok(&**value)
    }

    /// Read a name handle and resolve it
    pub fn read_name(&mut self) -> Result<&'a QNameRecord> {
        let handle = self.read_word()?;
        self.log
            .name(handle)
            .ok_or(Error::DanglingReference { kind: TableKind::Name, index: handle })
    }

    /// Read a namespace index and resolve it
    pub fn read_namespace(&mut self) -> Result<(NamespaceIndex, &'a NamespaceRecord)> {
        let index = self.read_word()?;
        let record = self.log.namespace(index).ok_or(Error::DanglingReference {
            kind: TableKind::Namespace,
            index,
        })?;
        Ok((index, record))
    }
}
