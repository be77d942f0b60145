//! Handlers for `type` and its restriction statements.

use crate::base::IStr;
use crate::parser::Descent;
use crate::parser::ast::{Enumerant, ExtensionInstance, Restriction, Substmt, TypeRef};
use crate::parser::content::{ChildSpec, SUB_UNIQUE};
use crate::parser::errors::{ErrorKind, ParseError, Result};
use crate::parser::flags::StmtFlags;
use crate::parser::keyword::{ArgumentKind, StatementKind};
use crate::parser::value::{
    LexicalClass, check_enum_name, parse_bit_position, parse_enum_value, parse_fraction_digits,
};
use crate::xml::Element;

use super::value_set_error;

/// Sentinel byte prefixed to a pattern argument: regular match.
pub(crate) const PATTERN_MATCH: char = '\u{6}';
/// Sentinel byte a `modifier invert-match` child rewrites the prefix to.
pub(crate) const PATTERN_INVERT_MATCH: char = '\u{15}';

impl Descent<'_, '_> {
    /// `type`: the named base type plus inline restrictions. Nested `type`
    /// children form a union's member list.
    pub(crate) fn parse_type(&mut self, mut elem: Element, ty: &mut TypeRef) -> Result<()> {
        use StatementKind::*;

        let name = self.bind_required(
            &mut elem,
            ArgumentKind::Name,
            LexicalClass::PrefixedIdentifier,
            Type,
        )?;
        ty.name = Some(name);

        let mut table = [
            ChildSpec::new(Base, 0),
            ChildSpec::new(Bit, 0),
            ChildSpec::new(Enum, 0),
            ChildSpec::new(FractionDigits, SUB_UNIQUE),
            ChildSpec::new(Length, SUB_UNIQUE),
            ChildSpec::new(Path, SUB_UNIQUE),
            ChildSpec::new(Pattern, 0),
            ChildSpec::new(Range, SUB_UNIQUE),
            ChildSpec::new(RequireInstance, SUB_UNIQUE),
            ChildSpec::new(Type, 0),
            ChildSpec::extensions(),
        ];
        self.parse_children(Type, &elem, &mut table, None, |p, child, kw| match kw {
            Base => {
                ty.flags |= StmtFlags::SET_BASE;
                p.parse_simple_elements(
                    child,
                    kw,
                    ArgumentKind::Name,
                    LexicalClass::PrefixedIdentifier,
                    Substmt::Base,
                    &mut ty.bases,
                    &mut ty.exts,
                )
            }
            Bit => p.parse_bit(child, ty),
            Enum => p.parse_enum(child, ty),
            FractionDigits => p.parse_fraction_digits_stmt(child, ty),
            Length => {
                ty.flags |= StmtFlags::SET_LENGTH;
                let restr = ty.length.get_or_insert_with(Box::default);
                p.parse_restriction(child, kw, restr)
            }
            Path => {
                ty.flags |= StmtFlags::SET_PATH;
                p.parse_simple_element(
                    child,
                    kw,
                    ArgumentKind::Value,
                    LexicalClass::String,
                    Substmt::Path,
                    &mut ty.path,
                    &mut ty.exts,
                )
            }
            Pattern => p.parse_pattern(child, ty),
            Range => {
                ty.flags |= StmtFlags::SET_RANGE;
                let restr = ty.range.get_or_insert_with(Box::default);
                p.parse_restriction(child, kw, restr)
            }
            RequireInstance => p.parse_require_instance(child, ty),
            Type => {
                ty.flags |= StmtFlags::SET_TYPE;
                let mut member = TypeRef::default();
                p.parse_type(child, &mut member)?;
                ty.types.push(member);
                Ok(())
            }
            ExtensionInstance => p.parse_extension_instance(child, Substmt::Itself, 0, &mut ty.exts),
            other => Err(p.unroutable(Type, other)),
        })
    }

    /// `enum`: a named enumerant; names are unique within the type.
    pub(crate) fn parse_enum(&mut self, mut elem: Element, ty: &mut TypeRef) -> Result<()> {
        use StatementKind::*;

        ty.flags |= StmtFlags::SET_ENUM;
        let name = self.bind_required(&mut elem, ArgumentKind::Name, LexicalClass::Identifier, Enum)?;
        check_enum_name(&name, elem.line)?;
        if ty.enums.iter().any(|e| e.name == name) {
            return Err(ParseError::new(
                ErrorKind::NameCollision { what: "enum", name: name.to_string() },
                elem.line,
            ));
        }
        let mut en = Enumerant::new(name);

        let mut table = [
            ChildSpec::new(Description, SUB_UNIQUE),
            ChildSpec::new(IfFeature, 0),
            ChildSpec::new(Reference, SUB_UNIQUE),
            ChildSpec::new(Status, SUB_UNIQUE),
            ChildSpec::new(Value, SUB_UNIQUE),
            ChildSpec::extensions(),
        ];
        let e = &mut en;
        self.parse_children(Enum, &elem, &mut table, None, |p, child, kw| match kw {
            Description => {
                p.parse_meta_element(child, kw, Substmt::Description, &mut e.description, &mut e.exts)
            }
            IfFeature => p.parse_simple_elements(
                child,
                kw,
                ArgumentKind::Name,
                LexicalClass::String,
                Substmt::IfFeature,
                &mut e.iffeatures,
                &mut e.exts,
            ),
            Reference => {
                p.parse_meta_element(child, kw, Substmt::Reference, &mut e.reference, &mut e.exts)
            }
            Status => p.parse_status(child, &mut e.flags, &mut e.exts),
            Value => p.parse_value_pos(child, kw, e),
            ExtensionInstance => p.parse_extension_instance(child, Substmt::Itself, 0, &mut e.exts),
            other => Err(p.unroutable(Enum, other)),
        })?;

        ty.enums.push(en);
        Ok(())
    }

    /// `bit`: a named bit; names are unique within the type.
    pub(crate) fn parse_bit(&mut self, mut elem: Element, ty: &mut TypeRef) -> Result<()> {
        use StatementKind::*;

        ty.flags |= StmtFlags::SET_BIT;
        let name = self.bind_required(&mut elem, ArgumentKind::Name, LexicalClass::Identifier, Bit)?;
        if ty.bits.iter().any(|b| b.name == name) {
            return Err(ParseError::new(
                ErrorKind::NameCollision { what: "bit", name: name.to_string() },
                elem.line,
            ));
        }
        let mut bit = Enumerant::new(name);

        let mut table = [
            ChildSpec::new(Description, SUB_UNIQUE),
            ChildSpec::new(IfFeature, 0),
            ChildSpec::new(Position, SUB_UNIQUE),
            ChildSpec::new(Reference, SUB_UNIQUE),
            ChildSpec::new(Status, SUB_UNIQUE),
            ChildSpec::extensions(),
        ];
        let b = &mut bit;
        self.parse_children(Bit, &elem, &mut table, None, |p, child, kw| match kw {
            Description => {
                p.parse_meta_element(child, kw, Substmt::Description, &mut b.description, &mut b.exts)
            }
            IfFeature => p.parse_simple_elements(
                child,
                kw,
                ArgumentKind::Name,
                LexicalClass::String,
                Substmt::IfFeature,
                &mut b.iffeatures,
                &mut b.exts,
            ),
            Position => p.parse_value_pos(child, kw, b),
            Reference => {
                p.parse_meta_element(child, kw, Substmt::Reference, &mut b.reference, &mut b.exts)
            }
            Status => p.parse_status(child, &mut b.flags, &mut b.exts),
            ExtensionInstance => p.parse_extension_instance(child, Substmt::Itself, 0, &mut b.exts),
            other => Err(p.unroutable(Bit, other)),
        })?;

        ty.bits.push(bit);
        Ok(())
    }

    /// `value` (enum) or `position` (bit): strict integer literal into the
    /// enumerant.
    pub(crate) fn parse_value_pos(
        &mut self,
        mut elem: Element,
        kind: StatementKind,
        en: &mut Enumerant,
    ) -> Result<()> {
        en.flags |= StmtFlags::SET_VALUE;
        let value = self.bind_required(&mut elem, ArgumentKind::Value, LexicalClass::String, kind)?;
        en.value = if kind == StatementKind::Value {
            parse_enum_value(&value, elem.line)?
        } else {
            parse_bit_position(&value, elem.line)?
        };
        let substmt = if kind == StatementKind::Value {
            Substmt::Value
        } else {
            Substmt::Position
        };
        self.parse_exts_only(&elem, kind, substmt, &mut en.exts)
    }

    /// `fraction-digits`: 1..=18 into the type.
    pub(crate) fn parse_fraction_digits_stmt(
        &mut self,
        mut elem: Element,
        ty: &mut TypeRef,
    ) -> Result<()> {
        let kind = StatementKind::FractionDigits;
        let value = self.bind_required(&mut elem, ArgumentKind::Value, LexicalClass::String, kind)?;
        ty.fraction_digits = parse_fraction_digits(&value, elem.line)?;
        ty.flags |= StmtFlags::SET_FRACTION_DIGITS;
        self.parse_exts_only(&elem, kind, Substmt::FractionDigits, &mut ty.exts)
    }

    /// A restriction body: `range`/`length` carry `value`, `must` carries
    /// `condition`; all share the same error/documentation children.
    pub(crate) fn parse_restriction(
        &mut self,
        mut elem: Element,
        kind: StatementKind,
        restr: &mut Restriction,
    ) -> Result<()> {
        use StatementKind::*;
        debug_assert!(matches!(kind, Must | Length | Range));

        let arg_kind = if kind == Must {
            ArgumentKind::Condition
        } else {
            ArgumentKind::Value
        };
        let arg = self.bind_required(&mut elem, arg_kind, LexicalClass::String, kind)?;
        restr.arg = Some(arg);

        let mut table = [
            ChildSpec::new(Description, SUB_UNIQUE),
            ChildSpec::new(ErrorAppTag, SUB_UNIQUE),
            ChildSpec::new(ErrorMessage, SUB_UNIQUE),
            ChildSpec::new(Reference, SUB_UNIQUE),
            ChildSpec::extensions(),
        ];
        let r = &mut *restr;
        self.parse_children(kind, &elem, &mut table, None, |p, child, kw| match kw {
            Description => {
                p.parse_meta_element(child, kw, Substmt::Description, &mut r.description, &mut r.exts)
            }
            ErrorAppTag => p.parse_simple_element(
                child,
                kw,
                ArgumentKind::Value,
                LexicalClass::String,
                Substmt::ErrorAppTag,
                &mut r.error_app_tag,
                &mut r.exts,
            ),
            ErrorMessage => p.parse_error_message(child, &mut r.error_message, &mut r.exts),
            Reference => {
                p.parse_meta_element(child, kw, Substmt::Reference, &mut r.reference, &mut r.exts)
            }
            ExtensionInstance => p.parse_extension_instance(child, Substmt::Itself, 0, &mut r.exts),
            other => Err(p.unroutable(kind, other)),
        })
    }

    /// `must` into a growable restriction sequence.
    pub(crate) fn parse_must(
        &mut self,
        elem: Element,
        musts: &mut Vec<Restriction>,
    ) -> Result<()> {
        let mut restr = Restriction::default();
        self.parse_restriction(elem, StatementKind::Must, &mut restr)?;
        musts.push(restr);
        Ok(())
    }

    /// `pattern`: the argument is stored behind a match sentinel byte which
    /// a later `modifier` child may rewrite.
    pub(crate) fn parse_pattern(&mut self, mut elem: Element, ty: &mut TypeRef) -> Result<()> {
        use StatementKind::*;

        let value = self.bind_required(&mut elem, ArgumentKind::Value, LexicalClass::String, Pattern)?;
        let mut stored = String::with_capacity(value.len() + 1);
        stored.push(PATTERN_MATCH);
        stored.push_str(&value);
        let mut restr = Restriction::default();
        restr.arg = Some(self.dict.intern_string(stored));
        ty.flags |= StmtFlags::SET_PATTERN;

        let mut table = [
            ChildSpec::new(Description, SUB_UNIQUE),
            ChildSpec::new(ErrorAppTag, SUB_UNIQUE),
            ChildSpec::new(ErrorMessage, SUB_UNIQUE),
            ChildSpec::new(Modifier, SUB_UNIQUE),
            ChildSpec::new(Reference, SUB_UNIQUE),
            ChildSpec::extensions(),
        ];
        let r = &mut restr;
        self.parse_children(Pattern, &elem, &mut table, None, |p, child, kw| match kw {
            Description => {
                p.parse_meta_element(child, kw, Substmt::Description, &mut r.description, &mut r.exts)
            }
            ErrorAppTag => p.parse_simple_element(
                child,
                kw,
                ArgumentKind::Value,
                LexicalClass::String,
                Substmt::ErrorAppTag,
                &mut r.error_app_tag,
                &mut r.exts,
            ),
            ErrorMessage => p.parse_error_message(child, &mut r.error_message, &mut r.exts),
            Modifier => p.parse_modifier(child, &mut r.arg, &mut r.exts),
            Reference => {
                p.parse_meta_element(child, kw, Substmt::Reference, &mut r.reference, &mut r.exts)
            }
            ExtensionInstance => p.parse_extension_instance(child, Substmt::Itself, 0, &mut r.exts),
            other => Err(p.unroutable(Pattern, other)),
        })?;

        ty.patterns.push(restr);
        Ok(())
    }

    /// `modifier`: only `invert-match` exists; it retroactively rewrites the
    /// sibling pattern's sentinel byte.
    pub(crate) fn parse_modifier(
        &mut self,
        mut elem: Element,
        pattern: &mut Option<IStr>,
        exts: &mut Vec<ExtensionInstance>,
    ) -> Result<()> {
        let kind = StatementKind::Modifier;
        let value = self.bind_required(&mut elem, ArgumentKind::Value, LexicalClass::String, kind)?;
        if &*value != "invert-match" {
            return Err(value_set_error(&value, kind, "`invert-match`", elem.line));
        }

        let rewritten = match pattern.as_deref().and_then(|p| p.strip_prefix(PATTERN_MATCH)) {
            Some(rest) => {
                let mut s = String::with_capacity(rest.len() + 1);
                s.push(PATTERN_INVERT_MATCH);
                s.push_str(rest);
                s
            }
            None => return Err(self.internal("modifier applied to a pattern without match sentinel")),
        };
        *pattern = Some(self.dict.intern_string(rewritten));

        self.parse_exts_only(&elem, kind, Substmt::Modifier, exts)
    }

    /// `require-instance`: `true`/`false` into the type.
    pub(crate) fn parse_require_instance(
        &mut self,
        mut elem: Element,
        ty: &mut TypeRef,
    ) -> Result<()> {
        let kind = StatementKind::RequireInstance;
        ty.flags |= StmtFlags::SET_REQUIRE_INSTANCE;
        let value = self.bind_required(&mut elem, ArgumentKind::Value, LexicalClass::String, kind)?;
        match &*value {
            "true" => ty.require_instance = true,
            "false" => ty.require_instance = false,
            _ => return Err(value_set_error(&value, kind, "`true` or `false`", elem.line)),
        }
        self.parse_exts_only(&elem, kind, Substmt::RequireInstance, &mut ty.exts)
    }
}
