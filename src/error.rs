//! Error types
//!
//! Every error here is a contract violation or corruption: capture rejects
//! notifications that would leave the namespace or element stacks
//! inconsistent, and replay refuses to guess when the log does not decode.

use thiserror::Error;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, Error>;

/// What kind of table a dangling reference pointed into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Name,
    Namespace,
}

impl std::fmt::Display for TableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableKind::Name => f.write_str("name"),
            TableKind::Namespace => f.write_str("namespace"),
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("notification received outside of a document")]
    NotInDocument,
    #[error("start_document received while a document is already open")]
    AlreadyStarted,
    #[error("notification received after end_document")]
    DocumentEnded,
    #[error("end_prefix_mapping for prefix {prefix:?} which is not bound")]
    UnboundPrefix { prefix: String },
    #[error("end_prefix_mapping for {found:?} but the innermost binding is {expected:?}")]
    PrefixMismatch { expected: String, found: String },
    #[error("end_prefix_mapping for {prefix:?} but the closed element declared no more mappings")]
    UnexpectedEndMapping { prefix: String },
    #[error("end_element with no open element")]
    UnbalancedEndElement,
    #[error("end_element for {found:?} but the open element is {expected:?}")]
    MismatchedEndElement { expected: String, found: String },
    #[error("end_cdata with no open CDATA section")]
    UnbalancedCData,
    #[error("only characters may appear inside an open CDATA section")]
    UnclosedCData,
    #[error("end_document with {depth} element(s) still open")]
    UnclosedElements { depth: usize },
    #[error("unrecognized event code {code} at offset {offset}")]
    UnknownEventCode { code: u32, offset: usize },
    #[error("event at offset {offset} is out of document order")]
    OutOfOrder { offset: usize },
    #[error("event log truncated at offset {offset}")]
    Truncated { offset: usize },
    #[error("dangling {kind} reference {index}")]
    DanglingReference { kind: TableKind, index: u32 },
    #[error("{what} of {len} bytes exceeds the 32-bit length limit")]
    CapacityExceeded { what: &'static str, len: usize },
    #[error("replay already reached end_document")]
    ReplayFinished,
    #[error("consumer aborted replay: {0}")]
    Consumer(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    /// Wrap an arbitrary consumer error so a handler can abort replay with it
    pub fn consumer<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Error::Consumer(err.into())
    }

    /// True for errors that mean the log itself cannot be decoded
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            Error::UnknownEventCode { .. }
                | Error::OutOfOrder { .. }
                | Error::Truncated { .. }
                | Error::DanglingReference { .. }
        )
    }
}
