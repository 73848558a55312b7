//! Errors raised while reading param declarations.

use thiserror::Error;

/// A type reference that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid type reference '{input}' at byte {position}: {reason}")]
pub struct TypeParseError {
    /// The full text that was being parsed.
    pub input: String,
    /// Byte offset where parsing stopped.
    pub position: usize,
    /// What the parser expected.
    pub reason: String,
}
