//! Per-statement handlers.
//!
//! Every handler follows the same stereotyped shape: bind the argument, set
//! kind-specific flags, build the sorted child table, run the child
//! dispatcher with a routing closure over the destination fields it owns,
//! then run statement-specific cross-field checks.

pub(crate) mod deviation;
pub(crate) mod extension;
pub(crate) mod module;
pub(crate) mod nodes;
pub(crate) mod types;

use std::mem;

use crate::base::IStr;
use crate::parser::Descent;
use crate::parser::ast::{ExtensionInstance, Substmt};
use crate::parser::content::{ChildSpec, SUB_FIRST, SUB_MANDATORY, SUB_UNIQUE};
use crate::parser::errors::{ErrorKind, ParseError, Result};
use crate::parser::flags::StmtFlags;
use crate::parser::keyword::{ArgumentKind, StatementKind};
use crate::parser::value::{LexicalClass, validate_value};
use crate::xml::Element;

impl Descent<'_, '_> {
    /// Bind the statement's argument from the element's attribute list.
    ///
    /// Exactly one unprefixed attribute with the expected name is accepted;
    /// prefixed attributes are extension metadata and are ignored. Returns
    /// `None` only when the class allows absence.
    pub(crate) fn bind_argument(
        &mut self,
        elem: &mut Element,
        expected: ArgumentKind,
        class: LexicalClass,
        stmt: StatementKind,
    ) -> Result<Option<IStr>> {
        let line = elem.line;
        let mut found: Option<IStr> = None;
        for attr in &mut elem.attrs {
            if attr.prefix.is_some() {
                continue;
            }
            let matched = ArgumentKind::from_name(&attr.local)
                .is_some_and(|kind| kind == expected && expected != ArgumentKind::None);
            if !matched {
                return Err(ParseError::new(
                    ErrorKind::UnexpectedAttribute {
                        attr: attr.local.clone(),
                        stmt: stmt.as_str(),
                    },
                    line,
                ));
            }
            if found.is_some() {
                return Err(ParseError::new(
                    ErrorKind::DuplicateAttribute {
                        attr: expected.as_str(),
                        stmt: stmt.as_str(),
                    },
                    line,
                ));
            }
            validate_value(class, &attr.value, line)?;
            let value = mem::take(&mut attr.value);
            found = Some(if attr.dynamic {
                self.dict.intern_string(value)
            } else {
                self.dict.intern(&value)
            });
        }

        if found.is_none() && !class.optional() && expected != ArgumentKind::None {
            return Err(ParseError::new(
                ErrorKind::MissingAttribute {
                    attr: expected.as_str(),
                    stmt: stmt.as_str(),
                },
                line,
            ));
        }
        Ok(found)
    }

    /// [`Self::bind_argument`] for classes where absence is an error.
    pub(crate) fn bind_required(
        &mut self,
        elem: &mut Element,
        expected: ArgumentKind,
        class: LexicalClass,
        stmt: StatementKind,
    ) -> Result<IStr> {
        match self.bind_argument(elem, expected, class, stmt)? {
            Some(value) => Ok(value),
            None => Err(self.internal("argument binder accepted an absent required argument")),
        }
    }

    /// Check that the element carries no argument attribute.
    pub(crate) fn bind_none(&mut self, elem: &mut Element, stmt: StatementKind) -> Result<()> {
        self.bind_argument(elem, ArgumentKind::None, LexicalClass::OptionalString, stmt)
            .map(|_| ())
    }

    pub(crate) fn internal(&mut self, msg: &str) -> ParseError {
        let line = self.cur.line();
        ParseError::new(ErrorKind::Internal(msg.to_owned()), line)
    }

    /// Intern an attribute/text value through the path matching its origin.
    pub(crate) fn intern_value(&mut self, value: String, dynamic: bool) -> IStr {
        if dynamic {
            self.dict.intern_string(value)
        } else {
            self.dict.intern(&value)
        }
    }

    /// Parse a statement whose only legal children are extension instances.
    pub(crate) fn parse_exts_only(
        &mut self,
        elem: &Element,
        kind: StatementKind,
        substmt: Substmt,
        exts: &mut Vec<ExtensionInstance>,
    ) -> Result<()> {
        let mut table = [ChildSpec::extensions()];
        self.parse_children(kind, elem, &mut table, None, |p, child, _| {
            p.parse_extension_instance(child, substmt, 0, exts)
        })
    }

    /// A simple element: argument mapped to an attribute, stored in a
    /// unique slot, extension instances forwarded to the parent's list.
    pub(crate) fn parse_simple_element(
        &mut self,
        mut elem: Element,
        kind: StatementKind,
        arg: ArgumentKind,
        class: LexicalClass,
        substmt: Substmt,
        slot: &mut Option<IStr>,
        exts: &mut Vec<ExtensionInstance>,
    ) -> Result<()> {
        let value = self.bind_required(&mut elem, arg, class, kind)?;
        *slot = Some(value);
        self.parse_exts_only(&elem, kind, substmt, exts)
    }

    /// A simple element that may occur multiple times (`if-feature`,
    /// `base`, `default` in some parents, ...); extension instances carry
    /// the index of the instance they appeared under.
    pub(crate) fn parse_simple_elements(
        &mut self,
        mut elem: Element,
        kind: StatementKind,
        arg: ArgumentKind,
        class: LexicalClass,
        substmt: Substmt,
        values: &mut Vec<IStr>,
        exts: &mut Vec<ExtensionInstance>,
    ) -> Result<()> {
        let value = self.bind_required(&mut elem, arg, class, kind)?;
        values.push(value);
        let index = (values.len() - 1) as u32;
        let mut table = [ChildSpec::extensions()];
        self.parse_children(kind, &elem, &mut table, None, |p, child, _| {
            p.parse_extension_instance(child, substmt, index, exts)
        })
    }

    /// A meta element (`organization`, `contact`, `description`,
    /// `reference`): the argument is carried by a mandatory, unique, first
    /// `<text>` child.
    pub(crate) fn parse_meta_element(
        &mut self,
        mut elem: Element,
        kind: StatementKind,
        substmt: Substmt,
        slot: &mut Option<IStr>,
        exts: &mut Vec<ExtensionInstance>,
    ) -> Result<()> {
        self.bind_none(&mut elem, kind)?;
        let mut table = [
            ChildSpec::extensions(),
            ChildSpec::new(StatementKind::InlineText, SUB_MANDATORY | SUB_UNIQUE | SUB_FIRST),
        ];
        self.parse_children(kind, &elem, &mut table, None, |p, child, kw| match kw {
            StatementKind::InlineText => p.parse_inline(child, kw, slot),
            StatementKind::ExtensionInstance => p.parse_extension_instance(child, substmt, 0, exts),
            other => Err(p.unroutable(kind, other)),
        })
    }

    /// `error-message`: like a meta element, but the body travels in a
    /// `<value>` child.
    pub(crate) fn parse_error_message(
        &mut self,
        mut elem: Element,
        slot: &mut Option<IStr>,
        exts: &mut Vec<ExtensionInstance>,
    ) -> Result<()> {
        let kind = StatementKind::ErrorMessage;
        self.bind_none(&mut elem, kind)?;
        let mut table = [
            ChildSpec::extensions(),
            ChildSpec::new(StatementKind::InlineValue, SUB_MANDATORY | SUB_UNIQUE | SUB_FIRST),
        ];
        self.parse_children(kind, &elem, &mut table, None, |p, child, kw| match kw {
            StatementKind::InlineValue => p.parse_inline(child, kw, slot),
            StatementKind::ExtensionInstance => {
                p.parse_extension_instance(child, Substmt::ErrorMessage, 0, exts)
            }
            other => Err(p.unroutable(kind, other)),
        })
    }

    /// `config`: `true`/`false` into the parent's flags.
    pub(crate) fn parse_config(
        &mut self,
        mut elem: Element,
        flags: &mut StmtFlags,
        exts: &mut Vec<ExtensionInstance>,
    ) -> Result<()> {
        let kind = StatementKind::Config;
        let value = self.bind_required(&mut elem, ArgumentKind::Value, LexicalClass::String, kind)?;
        match &*value {
            "true" => *flags |= StmtFlags::CONFIG_WRITE,
            "false" => *flags |= StmtFlags::CONFIG_READ,
            _ => return Err(value_set_error(&value, kind, "`true` or `false`", elem.line)),
        }
        self.parse_exts_only(&elem, kind, Substmt::Config, exts)
    }

    /// `mandatory`: `true`/`false` into the parent's flags.
    pub(crate) fn parse_mandatory(
        &mut self,
        mut elem: Element,
        flags: &mut StmtFlags,
        exts: &mut Vec<ExtensionInstance>,
    ) -> Result<()> {
        let kind = StatementKind::Mandatory;
        let value = self.bind_required(&mut elem, ArgumentKind::Value, LexicalClass::String, kind)?;
        match &*value {
            "true" => *flags |= StmtFlags::MANDATORY_TRUE,
            "false" => *flags |= StmtFlags::MANDATORY_FALSE,
            _ => return Err(value_set_error(&value, kind, "`true` or `false`", elem.line)),
        }
        self.parse_exts_only(&elem, kind, Substmt::Mandatory, exts)
    }

    /// `status`: `current`/`deprecated`/`obsolete` into the parent's flags.
    pub(crate) fn parse_status(
        &mut self,
        mut elem: Element,
        flags: &mut StmtFlags,
        exts: &mut Vec<ExtensionInstance>,
    ) -> Result<()> {
        let kind = StatementKind::Status;
        let value = self.bind_required(&mut elem, ArgumentKind::Value, LexicalClass::String, kind)?;
        match &*value {
            "current" => *flags |= StmtFlags::STATUS_CURRENT,
            "deprecated" => *flags |= StmtFlags::STATUS_DEPRECATED,
            "obsolete" => *flags |= StmtFlags::STATUS_OBSOLETE,
            _ => {
                return Err(value_set_error(&value, kind, "`current`, `deprecated` or `obsolete`", elem.line));
            }
        }
        self.parse_exts_only(&elem, kind, Substmt::Status, exts)
    }

    /// `ordered-by`: `system`/`user` into the parent's flags.
    pub(crate) fn parse_ordered_by(
        &mut self,
        mut elem: Element,
        flags: &mut StmtFlags,
        exts: &mut Vec<ExtensionInstance>,
    ) -> Result<()> {
        let kind = StatementKind::OrderedBy;
        let value = self.bind_required(&mut elem, ArgumentKind::Value, LexicalClass::String, kind)?;
        match &*value {
            "system" => *flags |= StmtFlags::ORDERED_BY_SYSTEM,
            "user" => *flags |= StmtFlags::ORDERED_BY_USER,
            _ => return Err(value_set_error(&value, kind, "`system` or `user`", elem.line)),
        }
        self.parse_exts_only(&elem, kind, Substmt::OrderedBy, exts)
    }

    /// `yin-element`: `true`/`false` into the extension definition's flags.
    pub(crate) fn parse_yin_element(
        &mut self,
        mut elem: Element,
        flags: &mut StmtFlags,
        exts: &mut Vec<ExtensionInstance>,
    ) -> Result<()> {
        let kind = StatementKind::YinElement;
        let value = self.bind_required(&mut elem, ArgumentKind::Value, LexicalClass::String, kind)?;
        match &*value {
            "true" => *flags |= StmtFlags::YIN_ELEMENT_TRUE,
            "false" => *flags |= StmtFlags::YIN_ELEMENT_FALSE,
            _ => return Err(value_set_error(&value, kind, "`true` or `false`", elem.line)),
        }
        self.parse_exts_only(&elem, kind, Substmt::YinElement, exts)
    }
}

/// Build the error for a value outside a statement's closed value set.
pub(crate) fn value_set_error(
    value: &str,
    stmt: StatementKind,
    expected: &'static str,
    line: u32,
) -> ParseError {
    ParseError::new(
        ErrorKind::InvalidEnum {
            value: value.to_owned(),
            attr: "value",
            stmt: stmt.as_str(),
            expected,
        },
        line,
    )
}
