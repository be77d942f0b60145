//! The child dispatcher: the core loop every statement handler runs its
//! body through.
//!
//! Each handler hands over a child table sorted ascending by
//! [`StatementKind`] plus a routing closure. The dispatcher consumes the
//! element's content, resolves every child, enforces the cardinality,
//! ordering, version, and uniqueness rules, and forwards each child to the
//! closure in strict source order. Pure-text content is validated as a
//! `String` and delivered to the optional text sink instead.

use crate::base::IStr;
use crate::parser::Descent;
use crate::parser::errors::{ErrorKind, ParseError, Result};
use crate::parser::keyword::{StatementKind, is_deviate_substatement, module_phase, resolve_keyword};
use crate::parser::value::{LexicalClass, validate_value};
use crate::parser::ast::YangVersion;
use crate::xml::{Element, FirstContent};

// Child-table entry flags.
pub(crate) const SUB_UNIQUE: u8 = 0x01;
pub(crate) const SUB_MANDATORY: u8 = 0x02;
pub(crate) const SUB_FIRST: u8 = 0x04;
pub(crate) const SUB_VER2: u8 = 0x08;
/// Runtime bookkeeping: set once the child has been observed.
pub(crate) const SUB_PARSED: u8 = 0x10;

/// One allowed child of a statement.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ChildSpec {
    pub kind: StatementKind,
    pub flags: u8,
}

impl ChildSpec {
    pub(crate) const fn new(kind: StatementKind, flags: u8) -> Self {
        Self { kind, flags }
    }

    /// The extension-instance entry every statement's table ends with.
    pub(crate) const fn extensions() -> Self {
        Self::new(StatementKind::ExtensionInstance, 0)
    }
}

impl Descent<'_, '_> {
    /// Parse the content of `elem` against `table`.
    ///
    /// `handle` receives every resolved child, in source order, after the
    /// table checks passed; it routes the child into the destination fields
    /// the calling handler owns. `text_sink` receives a pure-text body; a
    /// text body with no sink is validated and discarded.
    pub(crate) fn parse_children(
        &mut self,
        parent: StatementKind,
        elem: &Element,
        table: &mut [ChildSpec],
        mut text_sink: Option<&mut Option<IStr>>,
        mut handle: impl FnMut(&mut Self, Element, StatementKind) -> Result<()>,
    ) -> Result<()> {
        debug_assert!(
            table.windows(2).all(|w| w[0].kind < w[1].kind),
            "child table of `{}` is not sorted",
            parent.as_str()
        );

        if !elem.empty {
            match self.cur.first_content()? {
                FirstContent::Text(body) => {
                    let line = self.cur.line();
                    validate_value(LexicalClass::String, &body.text, line)?;
                    if let Some(sink) = text_sink.take() {
                        *sink = Some(if body.dynamic {
                            self.dict.intern_string(body.text)
                        } else {
                            self.dict.intern(&body.text)
                        });
                    }
                }
                FirstContent::Child(first) => {
                    let mut last_kw: Option<StatementKind> = None;
                    let mut next = Some(first);
                    while let Some(child) = next.take() {
                        self.dispatch_child(parent, child, table, &mut last_kw, &mut handle)?;
                        next = self.cur.next_child()?;
                    }
                }
            }
        }

        // mandatory children are checked only once the whole body was parsed
        for spec in table.iter() {
            if spec.flags & SUB_MANDATORY != 0 && spec.flags & SUB_PARSED == 0 {
                let line = self.cur.line();
                return Err(ParseError::new(
                    ErrorKind::MissingChild {
                        child: spec.kind.as_str(),
                        parent: parent.as_str(),
                    },
                    line,
                ));
            }
        }
        Ok(())
    }

    fn dispatch_child(
        &mut self,
        parent: StatementKind,
        child: Element,
        table: &mut [ChildSpec],
        last_kw: &mut Option<StatementKind>,
        handle: &mut impl FnMut(&mut Self, Element, StatementKind) -> Result<()>,
    ) -> Result<()> {
        let line = child.line;
        let Some(kw) = resolve_keyword(child.ns.as_deref(), &child.local, Some(parent)) else {
            return Err(ParseError::new(
                ErrorKind::UnexpectedChild {
                    child: child.qualified_name(),
                    parent: parent.as_str(),
                },
                line,
            ));
        };

        let Ok(idx) = table.binary_search_by(|e| e.kind.cmp(&kw)) else {
            if parent == StatementKind::Deviate && is_deviate_substatement(kw) {
                return Err(ParseError::new(
                    ErrorKind::InvalidDeviateSubstatement { child: kw.as_str() },
                    line,
                ));
            }
            return Err(ParseError::new(
                ErrorKind::UnexpectedChild {
                    child: child.qualified_name(),
                    parent: parent.as_str(),
                },
                line,
            ));
        };

        // relative order is constrained only among module/submodule children
        if matches!(parent, StatementKind::Module | StatementKind::Submodule) {
            if let Some(prev) = *last_kw {
                if module_phase(prev) > module_phase(kw) {
                    return Err(ParseError::new(
                        ErrorKind::OrderingViolation {
                            child: kw.as_str(),
                            after: prev.as_str(),
                            parent: parent.as_str(),
                        },
                        line,
                    ));
                }
            }
        }
        *last_kw = Some(kw);

        let flags = table[idx].flags;
        if flags & SUB_UNIQUE != 0 && flags & SUB_PARSED != 0 {
            return Err(ParseError::new(
                ErrorKind::DuplicateChild {
                    child: kw.as_str(),
                    parent: parent.as_str(),
                },
                line,
            ));
        }
        if flags & SUB_FIRST != 0 && table.iter().any(|e| e.flags & SUB_PARSED != 0) {
            return Err(ParseError::new(
                ErrorKind::FirstViolation {
                    child: kw.as_str(),
                    parent: parent.as_str(),
                },
                line,
            ));
        }
        if flags & SUB_VER2 != 0 && self.ctx.version < YangVersion::V1_1 {
            return Err(ParseError::new(
                ErrorKind::VersionTooLow {
                    child: kw.as_str(),
                    parent: parent.as_str(),
                },
                line,
            ));
        }
        table[idx].flags |= SUB_PARSED;

        tracing::trace!(parent = parent.as_str(), child = kw.as_str(), line, "dispatch");
        handle(self, child, kw)
    }

    /// Parse an `InlineText`/`InlineValue` pseudo-statement: no argument
    /// attribute is consulted, no children are allowed, the text body is
    /// the statement's value.
    pub(crate) fn parse_inline(
        &mut self,
        elem: Element,
        kind: StatementKind,
        sink: &mut Option<IStr>,
    ) -> Result<()> {
        let mut table: [ChildSpec; 0] = [];
        self.parse_children(kind, &elem, &mut table, Some(sink), |_, _, _| Ok(()))
    }

    /// Internal error for a child that passed the table but has no routing
    /// arm; indicates a table/closure mismatch in this crate.
    pub(crate) fn unroutable(&mut self, parent: StatementKind, kw: StatementKind) -> ParseError {
        let line = self.cur.line();
        ParseError::new(
            ErrorKind::Internal(format!(
                "no destination for `{}` under `{}`",
                kw.as_str(),
                parent.as_str()
            )),
            line,
        )
    }
}
