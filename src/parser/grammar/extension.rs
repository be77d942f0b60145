//! Extension definitions and preserved extension instances.

use std::mem;

use crate::base::IStr;
use crate::parser::Descent;
use crate::parser::ast::{ExtStmt, ExtensionDef, ExtensionInstance, Substmt};
use crate::parser::content::{ChildSpec, SUB_UNIQUE};
use crate::parser::errors::Result;
use crate::parser::flags::StmtFlags;
use crate::parser::keyword::{ArgumentKind, StatementKind};
use crate::parser::value::LexicalClass;
use crate::xml::{Element, FirstContent};

impl Descent<'_, '_> {
    /// `extension`: declares a new extension keyword.
    pub(crate) fn parse_extension_def(
        &mut self,
        mut elem: Element,
        extensions: &mut Vec<ExtensionDef>,
    ) -> Result<()> {
        use StatementKind::*;

        let name =
            self.bind_required(&mut elem, ArgumentKind::Name, LexicalClass::Identifier, Extension)?;
        let mut ext = ExtensionDef::new(name);

        let mut table = [
            ChildSpec::new(Argument, SUB_UNIQUE),
            ChildSpec::new(Description, SUB_UNIQUE),
            ChildSpec::new(Reference, SUB_UNIQUE),
            ChildSpec::new(Status, SUB_UNIQUE),
            ChildSpec::extensions(),
        ];
        let e = &mut ext;
        self.parse_children(Extension, &elem, &mut table, None, |p, child, kw| match kw {
            Argument => p.parse_argument_stmt(child, &mut e.argument, &mut e.flags, &mut e.exts),
            Description => {
                p.parse_meta_element(child, kw, Substmt::Description, &mut e.description, &mut e.exts)
            }
            Reference => {
                p.parse_meta_element(child, kw, Substmt::Reference, &mut e.reference, &mut e.exts)
            }
            Status => p.parse_status(child, &mut e.flags, &mut e.exts),
            ExtensionInstance => p.parse_extension_instance(child, Substmt::Itself, 0, &mut e.exts),
            other => Err(p.unroutable(Extension, other)),
        })?;

        extensions.push(ext);
        Ok(())
    }

    /// `argument` inside an extension definition: names the argument and may
    /// request the yin-element form.
    pub(crate) fn parse_argument_stmt(
        &mut self,
        mut elem: Element,
        argument: &mut Option<IStr>,
        flags: &mut StmtFlags,
        exts: &mut Vec<ExtensionInstance>,
    ) -> Result<()> {
        use StatementKind::*;

        let kind = Argument;
        let name = self.bind_required(&mut elem, ArgumentKind::Name, LexicalClass::Identifier, kind)?;
        *argument = Some(name);

        let mut table = [
            ChildSpec::new(YinElement, SUB_UNIQUE),
            ChildSpec::extensions(),
        ];
        self.parse_children(kind, &elem, &mut table, None, |p, child, kw| match kw {
            YinElement => p.parse_yin_element(child, flags, exts),
            ExtensionInstance => p.parse_extension_instance(child, Substmt::Argument, 0, exts),
            other => Err(p.unroutable(kind, other)),
        })
    }

    /// An element in a foreign namespace: preserve its literal structure for
    /// downstream extension processing.
    ///
    /// `substmt`/`index` record which substatement slot of the carrying
    /// statement the instance appeared in.
    pub(crate) fn parse_extension_instance(
        &mut self,
        mut elem: Element,
        substmt: Substmt,
        index: u32,
        exts: &mut Vec<ExtensionInstance>,
    ) -> Result<()> {
        let name = self.dict.intern(&elem.qualified_name());
        let mut inst = ExtensionInstance::new(name, substmt, index);

        // unprefixed attributes become attribute-flagged pseudo-children
        let attrs = mem::take(&mut elem.attrs);
        for attr in attrs {
            if attr.prefix.is_some() {
                continue;
            }
            let mut stmt = ExtStmt::new(self.dict.intern(&attr.local));
            stmt.from_attribute = true;
            stmt.argument = Some(self.intern_value(attr.value, attr.dynamic));
            inst.children.push(stmt);
        }

        if !elem.empty {
            match self.cur.first_content()? {
                FirstContent::Text(body) => {
                    inst.argument = Some(self.intern_value(body.text, body.dynamic));
                }
                FirstContent::Child(first) => {
                    let mut next = Some(first);
                    while let Some(child) = next.take() {
                        let stmt = self.parse_element_generic(child)?;
                        inst.children.push(stmt);
                        next = self.cur.next_child()?;
                    }
                }
            }
        }

        exts.push(inst);
        Ok(())
    }

    /// Schema-free walker for the inside of an extension instance: preserve
    /// names, arguments (from text content), and nested elements without
    /// consulting the YANG vocabulary.
    fn parse_element_generic(&mut self, mut elem: Element) -> Result<ExtStmt> {
        let mut stmt = ExtStmt::new(self.dict.intern(&elem.local));

        // all attributes are preserved; only unprefixed ones keep a value
        let attrs = mem::take(&mut elem.attrs);
        for attr in attrs {
            let mut child = ExtStmt::new(self.dict.intern(&attr.local));
            child.from_attribute = true;
            if attr.prefix.is_none() {
                child.argument = Some(self.intern_value(attr.value, attr.dynamic));
            }
            stmt.children.push(child);
        }

        if !elem.empty {
            match self.cur.first_content()? {
                FirstContent::Text(body) => {
                    if !body.text.is_empty() {
                        stmt.argument = Some(self.intern_value(body.text, body.dynamic));
                    }
                }
                FirstContent::Child(first) => {
                    let mut next = Some(first);
                    while let Some(child) = next.take() {
                        let nested = self.parse_element_generic(child)?;
                        stmt.children.push(nested);
                        next = self.cur.next_child()?;
                    }
                }
            }
        }

        Ok(stmt)
    }
}
