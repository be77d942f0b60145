//! Handlers for `deviation` and the four `deviate` shapes.

use crate::parser::Descent;
use crate::parser::ast::{
    Deviate, DeviateAdd, DeviateDelete, DeviateReplace, Deviation, Substmt, TypeRef,
};
use crate::parser::content::{ChildSpec, SUB_MANDATORY, SUB_UNIQUE};
use crate::parser::errors::Result;
use crate::parser::keyword::{ArgumentKind, StatementKind};
use crate::parser::value::LexicalClass;
use crate::xml::Element;

use super::value_set_error;

impl Descent<'_, '_> {
    /// `deviation`: a target node plus at least one deviate.
    pub(crate) fn parse_deviation(
        &mut self,
        mut elem: Element,
        deviations: &mut Vec<Deviation>,
    ) -> Result<()> {
        use StatementKind::*;

        let target = self.bind_required(
            &mut elem,
            ArgumentKind::TargetNode,
            LexicalClass::String,
            Deviation,
        )?;
        if target.is_empty() {
            tracing::warn!(line = elem.line, "empty argument of deviation statement");
        }
        let mut dev = crate::parser::ast::Deviation::new(target);

        let mut table = [
            ChildSpec::new(Description, SUB_UNIQUE),
            ChildSpec::new(Deviate, SUB_MANDATORY),
            ChildSpec::new(Reference, SUB_UNIQUE),
            ChildSpec::extensions(),
        ];
        let d = &mut dev;
        self.parse_children(Deviation, &elem, &mut table, None, |p, child, kw| match kw {
            Description => {
                p.parse_meta_element(child, kw, Substmt::Description, &mut d.description, &mut d.exts)
            }
            Deviate => p.parse_deviate(child, &mut d.deviates),
            Reference => {
                p.parse_meta_element(child, kw, Substmt::Reference, &mut d.reference, &mut d.exts)
            }
            ExtensionInstance => p.parse_extension_instance(child, Substmt::Itself, 0, &mut d.exts),
            other => Err(p.unroutable(Deviation, other)),
        })?;

        deviations.push(dev);
        Ok(())
    }

    /// `deviate`: the argument selects one of four shapes, each with its own
    /// child table. A child that is legal for a *different* shape is
    /// reported as an invalid deviate substatement by the dispatcher.
    pub(crate) fn parse_deviate(
        &mut self,
        mut elem: Element,
        deviates: &mut Vec<Deviate>,
    ) -> Result<()> {
        use StatementKind::*;

        let kind = Deviate;
        let value = self.bind_required(&mut elem, ArgumentKind::Value, LexicalClass::String, kind)?;
        match &*value {
            "not-supported" => {
                let mut exts = Vec::new();
                let mut table = [ChildSpec::extensions()];
                self.parse_children(kind, &elem, &mut table, None, |p, child, _| {
                    p.parse_extension_instance(child, Substmt::Itself, 0, &mut exts)
                })?;
                deviates.push(crate::parser::ast::Deviate::NotSupported { exts });
            }
            "add" => {
                let mut add = DeviateAdd::default();
                let mut table = [
                    ChildSpec::new(Config, SUB_UNIQUE),
                    ChildSpec::new(Default, 0),
                    ChildSpec::new(Mandatory, SUB_UNIQUE),
                    ChildSpec::new(MaxElements, SUB_UNIQUE),
                    ChildSpec::new(MinElements, SUB_UNIQUE),
                    ChildSpec::new(Must, 0),
                    ChildSpec::new(Unique, 0),
                    ChildSpec::new(Units, SUB_UNIQUE),
                    ChildSpec::extensions(),
                ];
                let a = &mut add;
                self.parse_children(kind, &elem, &mut table, None, |p, child, kw| match kw {
                    Config => p.parse_config(child, &mut a.flags, &mut a.exts),
                    Default => p.parse_simple_elements(
                        child,
                        kw,
                        ArgumentKind::Value,
                        LexicalClass::String,
                        Substmt::Default,
                        &mut a.defaults,
                        &mut a.exts,
                    ),
                    Mandatory => p.parse_mandatory(child, &mut a.flags, &mut a.exts),
                    MaxElements => {
                        let DeviateAdd { max_elements, flags, exts, .. } = a;
                        p.parse_max_elements_stmt(child, max_elements, flags, exts)
                    }
                    MinElements => {
                        let DeviateAdd { min_elements, flags, exts, .. } = a;
                        p.parse_min_elements_stmt(child, min_elements, flags, exts)
                    }
                    Must => p.parse_must(child, &mut a.musts),
                    Unique => p.parse_simple_elements(
                        child,
                        kw,
                        ArgumentKind::Tag,
                        LexicalClass::String,
                        Substmt::Unique,
                        &mut a.uniques,
                        &mut a.exts,
                    ),
                    Units => p.parse_simple_element(
                        child,
                        kw,
                        ArgumentKind::Name,
                        LexicalClass::String,
                        Substmt::Units,
                        &mut a.units,
                        &mut a.exts,
                    ),
                    ExtensionInstance => {
                        p.parse_extension_instance(child, Substmt::Itself, 0, &mut a.exts)
                    }
                    other => Err(p.unroutable(kind, other)),
                })?;
                deviates.push(crate::parser::ast::Deviate::Add(add));
            }
            "replace" => {
                let mut rpl = DeviateReplace::default();
                let mut table = [
                    ChildSpec::new(Config, SUB_UNIQUE),
                    ChildSpec::new(Default, SUB_UNIQUE),
                    ChildSpec::new(Mandatory, SUB_UNIQUE),
                    ChildSpec::new(MaxElements, SUB_UNIQUE),
                    ChildSpec::new(MinElements, SUB_UNIQUE),
                    ChildSpec::new(Type, SUB_UNIQUE),
                    ChildSpec::new(Units, SUB_UNIQUE),
                    ChildSpec::extensions(),
                ];
                let r = &mut rpl;
                self.parse_children(kind, &elem, &mut table, None, |p, child, kw| match kw {
                    Config => p.parse_config(child, &mut r.flags, &mut r.exts),
                    Default => p.parse_simple_element(
                        child,
                        kw,
                        ArgumentKind::Value,
                        LexicalClass::String,
                        Substmt::Default,
                        &mut r.default,
                        &mut r.exts,
                    ),
                    Mandatory => p.parse_mandatory(child, &mut r.flags, &mut r.exts),
                    MaxElements => {
                        let DeviateReplace { max_elements, flags, exts, .. } = r;
                        p.parse_max_elements_stmt(child, max_elements, flags, exts)
                    }
                    MinElements => {
                        let DeviateReplace { min_elements, flags, exts, .. } = r;
                        p.parse_min_elements_stmt(child, min_elements, flags, exts)
                    }
                    Type => {
                        let ty = r.type_.get_or_insert_with(|| Box::new(TypeRef::default()));
                        p.parse_type(child, ty)
                    }
                    Units => p.parse_simple_element(
                        child,
                        kw,
                        ArgumentKind::Name,
                        LexicalClass::String,
                        Substmt::Units,
                        &mut r.units,
                        &mut r.exts,
                    ),
                    ExtensionInstance => {
                        p.parse_extension_instance(child, Substmt::Itself, 0, &mut r.exts)
                    }
                    other => Err(p.unroutable(kind, other)),
                })?;
                deviates.push(crate::parser::ast::Deviate::Replace(rpl));
            }
            "delete" => {
                let mut del = DeviateDelete::default();
                let mut table = [
                    ChildSpec::new(Default, 0),
                    ChildSpec::new(Must, 0),
                    ChildSpec::new(Unique, 0),
                    ChildSpec::new(Units, SUB_UNIQUE),
                    ChildSpec::extensions(),
                ];
                let dl = &mut del;
                self.parse_children(kind, &elem, &mut table, None, |p, child, kw| match kw {
                    Default => p.parse_simple_elements(
                        child,
                        kw,
                        ArgumentKind::Value,
                        LexicalClass::String,
                        Substmt::Default,
                        &mut dl.defaults,
                        &mut dl.exts,
                    ),
                    Must => p.parse_must(child, &mut dl.musts),
                    Unique => p.parse_simple_elements(
                        child,
                        kw,
                        ArgumentKind::Tag,
                        LexicalClass::String,
                        Substmt::Unique,
                        &mut dl.uniques,
                        &mut dl.exts,
                    ),
                    Units => p.parse_simple_element(
                        child,
                        kw,
                        ArgumentKind::Name,
                        LexicalClass::String,
                        Substmt::Units,
                        &mut dl.units,
                        &mut dl.exts,
                    ),
                    ExtensionInstance => {
                        p.parse_extension_instance(child, Substmt::Itself, 0, &mut dl.exts)
                    }
                    other => Err(p.unroutable(kind, other)),
                })?;
                deviates.push(crate::parser::ast::Deviate::Delete(del));
            }
            _ => {
                return Err(value_set_error(
                    &value,
                    kind,
                    "`not-supported`, `add`, `replace` or `delete`",
                    elem.line,
                ));
            }
        }
        Ok(())
    }
}
