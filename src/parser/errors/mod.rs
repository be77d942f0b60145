//! Parse error types.
//!
//! Every error carries a semantic [`ErrorKind`] (what rule was violated and
//! which statements/tokens were involved) plus the line number the lexical
//! adapter had reached. Parsing is fail-fast: the first error aborts the
//! whole parse and the partially built tree is dropped.

mod kind;

pub use kind::{ErrorKind, FailureClass};

use thiserror::Error;

/// A YIN parse error: the violated rule plus its source line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    /// What went wrong.
    pub kind: ErrorKind,
    /// Line in the input the lexical adapter had reached (1-based).
    pub line: u32,
}

impl ParseError {
    pub fn new(kind: ErrorKind, line: u32) -> Self {
        Self { kind, line }
    }

    /// Coarse failure class, for mapping to process exit codes.
    pub fn class(&self) -> FailureClass {
        self.kind.class()
    }
}

/// Result alias used throughout the parser.
pub type Result<T> = std::result::Result<T, ParseError>;
