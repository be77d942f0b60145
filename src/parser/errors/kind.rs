//! Semantic error kinds.
//!
//! Kind names describe the violated rule, not the keyword that triggered it;
//! the offending statement and token names travel as fields so diagnostics
//! can be rendered without re-deriving context.

use thiserror::Error;

/// Coarse failure classification, used for process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureClass {
    /// The input violates YIN/YANG rules.
    InvalidInput,
    /// A parser invariant was violated - a bug in this crate.
    InternalBug,
    /// Resource exhaustion reported by the embedding allocator.
    ResourceExhausted,
}

/// Everything the parser can reject.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// UTF-8 violation or a character illegal in the active lexical class.
    #[error("invalid character `{ch}` in {what}")]
    InvalidCharacter { ch: char, what: &'static str },

    /// The expected argument attribute appeared twice.
    #[error("duplicate attribute `{attr}` of `{stmt}` element")]
    DuplicateAttribute { attr: &'static str, stmt: &'static str },

    /// An unprefixed attribute the statement does not take.
    #[error("unexpected attribute `{attr}` of `{stmt}` element")]
    UnexpectedAttribute { attr: String, stmt: &'static str },

    /// The statement's argument attribute is missing.
    #[error("missing mandatory attribute `{attr}` of `{stmt}` element")]
    MissingAttribute { attr: &'static str, stmt: &'static str },

    /// A unique child appeared a second time.
    #[error("redefinition of `{child}` sub-element in `{parent}` element")]
    DuplicateChild { child: &'static str, parent: &'static str },

    /// A child the statement does not allow.
    #[error("unexpected sub-element `{child}` of `{parent}` element")]
    UnexpectedChild { child: String, parent: &'static str },

    /// A mandatory child never appeared.
    #[error("missing mandatory sub-element `{child}` of `{parent}` element")]
    MissingChild { child: &'static str, parent: &'static str },

    /// A first-only child appeared after some other child.
    #[error("sub-element `{child}` of `{parent}` element must be defined as its first sub-element")]
    FirstViolation { child: &'static str, parent: &'static str },

    /// Module/submodule phase ordering violated.
    #[error("invalid order of `{parent}` sub-elements: `{child}` cannot appear after `{after}`")]
    OrderingViolation {
        child: &'static str,
        after: &'static str,
        parent: &'static str,
    },

    /// A YANG 1.1 child inside a 1.0 module.
    #[error("sub-element `{child}` of `{parent}` element requires YANG version 1.1")]
    VersionTooLow { child: &'static str, parent: &'static str },

    /// A value outside a statement's closed value set.
    #[error("invalid value `{value}` of `{attr}` attribute of `{stmt}` element, expected {expected}")]
    InvalidEnum {
        value: String,
        attr: &'static str,
        stmt: &'static str,
        expected: &'static str,
    },

    /// A numeric literal that does not lex under the strict rules.
    #[error("invalid value `{value}` of `value` attribute of `{stmt}` element")]
    InvalidNumber { value: String, stmt: &'static str },

    /// A numeric literal outside its integer domain.
    #[error("value `{value}` of `value` attribute of `{stmt}` element is out of bounds")]
    OutOfRange { value: String, stmt: &'static str },

    /// A date argument that is not a plausible `YYYY-MM-DD`.
    #[error("invalid value `{value}` of `date` attribute of `{stmt}` element")]
    InvalidDate { value: String, stmt: &'static str },

    /// Import prefix clash, include name clash, or duplicate enum/bit name.
    #[error("name collision: {what} `{name}` is already defined")]
    NameCollision { what: &'static str, name: String },

    /// min-elements > max-elements, or min-elements > 0 combined with a
    /// default on a leaf-list.
    #[error("invalid combination of min-elements and max-elements: {detail}")]
    InvalidMinMax { detail: String },

    /// A child that is legal for a different deviate shape.
    #[error("deviate sub-element `{child}` is not allowed for this deviate type")]
    InvalidDeviateSubstatement { child: &'static str },

    /// The document root is not the expected module/submodule element.
    #[error("invalid root element `{found}`, expected `{expected}`")]
    ModuleSubmoduleExpected { found: String, expected: &'static str },

    /// Content after the root element closed.
    #[error("trailing garbage `{snippet}` after the root element")]
    TrailingGarbage { snippet: String },

    /// Malformed XML reported by the lexical adapter.
    #[error("malformed XML: {0}")]
    Xml(String),

    /// Allocation failure surfaced by the embedding allocator.
    #[error("out of memory")]
    OutOfMemory,

    /// A parser invariant was violated - a bug, not an input problem.
    #[error("internal parser error: {0}")]
    Internal(String),
}

impl ErrorKind {
    /// Coarse failure class, used for process exit codes.
    pub fn class(&self) -> FailureClass {
        match self {
            Self::Internal(_) => FailureClass::InternalBug,
            Self::OutOfMemory => FailureClass::ResourceExhausted,
            _ => FailureClass::InvalidInput,
        }
    }

    /// Whether this kind reports a cardinality/ordering rule of the child
    /// dispatcher (as opposed to a value or attribute rule).
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::DuplicateChild { .. }
                | Self::UnexpectedChild { .. }
                | Self::MissingChild { .. }
                | Self::FirstViolation { .. }
                | Self::OrderingViolation { .. }
                | Self::VersionTooLow { .. }
                | Self::InvalidDeviateSubstatement { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classes() {
        assert_eq!(
            ErrorKind::TrailingGarbage { snippet: "<x/>".into() }.class(),
            FailureClass::InvalidInput
        );
        assert_eq!(ErrorKind::OutOfMemory.class(), FailureClass::ResourceExhausted);
        assert_eq!(
            ErrorKind::Internal("unsorted table".into()).class(),
            FailureClass::InternalBug
        );
    }

    #[test]
    fn test_structural_split() {
        assert!(
            ErrorKind::DuplicateChild {
                child: "description",
                parent: "module"
            }
            .is_structural()
        );
        assert!(
            !ErrorKind::InvalidNumber {
                value: "01".into(),
                stmt: "fraction-digits"
            }
            .is_structural()
        );
    }

    #[test]
    fn test_messages_name_both_statements() {
        let kind = ErrorKind::VersionTooLow {
            child: "notification",
            parent: "container",
        };
        let msg = kind.to_string();
        assert!(msg.contains("notification"));
        assert!(msg.contains("container"));
        assert!(msg.contains("1.1"));
    }
}
