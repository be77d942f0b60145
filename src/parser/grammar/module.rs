//! Handlers for module/submodule roots and their header, linkage, meta,
//! and revision statements, plus `feature` and `identity` definitions.

use crate::parser::Descent;
use crate::parser::ast::{
    Feature, Identity, Import, Include, Module, Revision, Submodule, Substmt, YangVersion,
};
use crate::parser::ast::ExtensionInstance;
use crate::base::IStr;
use crate::parser::content::{ChildSpec, SUB_MANDATORY, SUB_UNIQUE, SUB_VER2};
use crate::parser::errors::{ErrorKind, ParseError, Result};
use crate::parser::keyword::{ArgumentKind, StatementKind};
use crate::parser::value::{LexicalClass, check_date};
use crate::xml::Element;

use super::value_set_error;

impl Descent<'_, '_> {
    /// Parse the body of the root `module` element.
    pub(crate) fn parse_module_stmt(&mut self, mut elem: Element) -> Result<Module> {
        use StatementKind::*;

        let name = self.bind_required(&mut elem, ArgumentKind::Name, LexicalClass::Identifier, Module)?;
        let mut module = crate::parser::ast::Module::new(name);

        let mut table = [
            ChildSpec::new(Anydata, SUB_VER2),
            ChildSpec::new(Anyxml, 0),
            ChildSpec::new(Augment, 0),
            ChildSpec::new(Choice, 0),
            ChildSpec::new(Contact, SUB_UNIQUE),
            ChildSpec::new(Container, 0),
            ChildSpec::new(Description, SUB_UNIQUE),
            ChildSpec::new(Deviation, 0),
            ChildSpec::new(Extension, 0),
            ChildSpec::new(Feature, 0),
            ChildSpec::new(Grouping, 0),
            ChildSpec::new(Identity, 0),
            ChildSpec::new(Import, 0),
            ChildSpec::new(Include, 0),
            ChildSpec::new(Leaf, 0),
            ChildSpec::new(LeafList, 0),
            ChildSpec::new(List, 0),
            ChildSpec::new(Namespace, SUB_MANDATORY | SUB_UNIQUE),
            ChildSpec::new(Notification, 0),
            ChildSpec::new(Organization, SUB_UNIQUE),
            ChildSpec::new(Prefix, SUB_MANDATORY | SUB_UNIQUE),
            ChildSpec::new(Reference, SUB_UNIQUE),
            ChildSpec::new(Revision, 0),
            ChildSpec::new(Rpc, 0),
            ChildSpec::new(Typedef, 0),
            ChildSpec::new(Uses, 0),
            ChildSpec::new(YangVersion, SUB_MANDATORY | SUB_UNIQUE),
            ChildSpec::extensions(),
        ];

        let m = &mut module;
        self.parse_children(Module, &elem, &mut table, None, |p, child, kw| match kw {
            Anydata | Anyxml => p.parse_any(child, kw, &mut m.data),
            Augment => p.parse_augment(child, &mut m.augments),
            Choice => p.parse_choice(child, &mut m.data),
            Contact => p.parse_meta_element(child, kw, Substmt::Contact, &mut m.contact, &mut m.exts),
            Container => p.parse_container(child, &mut m.data),
            Description => {
                p.parse_meta_element(child, kw, Substmt::Description, &mut m.description, &mut m.exts)
            }
            Deviation => p.parse_deviation(child, &mut m.deviations),
            Extension => p.parse_extension_def(child, &mut m.extensions),
            Feature => p.parse_feature(child, &mut m.features),
            Grouping => p.parse_grouping(child, None, &mut m.groupings),
            Identity => p.parse_identity(child, &mut m.identities),
            Import => {
                let own_prefix = m.prefix.clone();
                p.parse_import(child, own_prefix, &mut m.imports)
            }
            Include => {
                let own_name = m.name.clone();
                p.parse_include(child, &own_name, &mut m.includes)
            }
            Leaf => p.parse_leaf(child, &mut m.data),
            LeafList => p.parse_leaf_list(child, &mut m.data),
            List => p.parse_list(child, &mut m.data),
            Namespace => p.parse_simple_element(
                child,
                kw,
                ArgumentKind::Uri,
                LexicalClass::String,
                Substmt::Namespace,
                &mut m.namespace,
                &mut m.exts,
            ),
            Notification => p.parse_notification(child, &mut m.notifications),
            Organization => {
                p.parse_meta_element(child, kw, Substmt::Organization, &mut m.organization, &mut m.exts)
            }
            Prefix => p.parse_simple_element(
                child,
                kw,
                ArgumentKind::Value,
                LexicalClass::Identifier,
                Substmt::Prefix,
                &mut m.prefix,
                &mut m.exts,
            ),
            Reference => {
                p.parse_meta_element(child, kw, Substmt::Reference, &mut m.reference, &mut m.exts)
            }
            Revision => p.parse_revision(child, &mut m.revisions),
            Rpc => p.parse_action(child, kw, &mut m.rpcs),
            Typedef => p.parse_typedef(child, None, &mut m.typedefs),
            Uses => p.parse_uses(child, &mut m.data),
            YangVersion => p.parse_yang_version(child, &mut m.version, &mut m.exts),
            ExtensionInstance => p.parse_extension_instance(child, Substmt::Itself, 0, &mut m.exts),
            other => Err(p.unroutable(Module, other)),
        })?;

        Ok(module)
    }

    /// Parse the body of the root `submodule` element.
    pub(crate) fn parse_submodule_stmt(&mut self, mut elem: Element) -> Result<Submodule> {
        use StatementKind::*;

        let name =
            self.bind_required(&mut elem, ArgumentKind::Name, LexicalClass::Identifier, Submodule)?;
        let mut submod = crate::parser::ast::Submodule::new(name);

        let mut table = [
            ChildSpec::new(Anydata, SUB_VER2),
            ChildSpec::new(Anyxml, 0),
            ChildSpec::new(Augment, 0),
            ChildSpec::new(BelongsTo, SUB_MANDATORY | SUB_UNIQUE),
            ChildSpec::new(Choice, 0),
            ChildSpec::new(Contact, SUB_UNIQUE),
            ChildSpec::new(Container, 0),
            ChildSpec::new(Description, SUB_UNIQUE),
            ChildSpec::new(Deviation, 0),
            ChildSpec::new(Extension, 0),
            ChildSpec::new(Feature, 0),
            ChildSpec::new(Grouping, 0),
            ChildSpec::new(Identity, 0),
            ChildSpec::new(Import, 0),
            ChildSpec::new(Include, 0),
            ChildSpec::new(Leaf, 0),
            ChildSpec::new(LeafList, 0),
            ChildSpec::new(List, 0),
            ChildSpec::new(Notification, 0),
            ChildSpec::new(Organization, SUB_UNIQUE),
            ChildSpec::new(Reference, SUB_UNIQUE),
            ChildSpec::new(Revision, 0),
            ChildSpec::new(Rpc, 0),
            ChildSpec::new(Typedef, 0),
            ChildSpec::new(Uses, 0),
            ChildSpec::new(YangVersion, SUB_MANDATORY | SUB_UNIQUE),
            ChildSpec::extensions(),
        ];

        let s = &mut submod;
        self.parse_children(Submodule, &elem, &mut table, None, |p, child, kw| match kw {
            Anydata | Anyxml => p.parse_any(child, kw, &mut s.data),
            Augment => p.parse_augment(child, &mut s.augments),
            BelongsTo => p.parse_belongs_to(child, &mut s.belongs_to, &mut s.prefix, &mut s.exts),
            Choice => p.parse_choice(child, &mut s.data),
            Contact => p.parse_meta_element(child, kw, Substmt::Contact, &mut s.contact, &mut s.exts),
            Container => p.parse_container(child, &mut s.data),
            Description => {
                p.parse_meta_element(child, kw, Substmt::Description, &mut s.description, &mut s.exts)
            }
            Deviation => p.parse_deviation(child, &mut s.deviations),
            Extension => p.parse_extension_def(child, &mut s.extensions),
            Feature => p.parse_feature(child, &mut s.features),
            Grouping => p.parse_grouping(child, None, &mut s.groupings),
            Identity => p.parse_identity(child, &mut s.identities),
            Import => {
                let own_prefix = s.prefix.clone();
                p.parse_import(child, own_prefix, &mut s.imports)
            }
            Include => {
                let own_name = s.name.clone();
                p.parse_include(child, &own_name, &mut s.includes)
            }
            Leaf => p.parse_leaf(child, &mut s.data),
            LeafList => p.parse_leaf_list(child, &mut s.data),
            List => p.parse_list(child, &mut s.data),
            Notification => p.parse_notification(child, &mut s.notifications),
            Organization => {
                p.parse_meta_element(child, kw, Substmt::Organization, &mut s.organization, &mut s.exts)
            }
            Reference => {
                p.parse_meta_element(child, kw, Substmt::Reference, &mut s.reference, &mut s.exts)
            }
            Revision => p.parse_revision(child, &mut s.revisions),
            Rpc => p.parse_action(child, kw, &mut s.rpcs),
            Typedef => p.parse_typedef(child, None, &mut s.typedefs),
            Uses => p.parse_uses(child, &mut s.data),
            YangVersion => p.parse_yang_version(child, &mut s.version, &mut s.exts),
            ExtensionInstance => p.parse_extension_instance(child, Substmt::Itself, 0, &mut s.exts),
            other => Err(p.unroutable(Submodule, other)),
        })?;

        Ok(submod)
    }

    /// `belongs-to`: names the owning module and carries the submodule's
    /// prefix in a mandatory child.
    pub(crate) fn parse_belongs_to(
        &mut self,
        mut elem: Element,
        belongs_to: &mut Option<IStr>,
        prefix: &mut Option<IStr>,
        exts: &mut Vec<ExtensionInstance>,
    ) -> Result<()> {
        let kind = StatementKind::BelongsTo;
        let value =
            self.bind_required(&mut elem, ArgumentKind::Module, LexicalClass::Identifier, kind)?;
        *belongs_to = Some(value);

        let mut table = [
            ChildSpec::new(StatementKind::Prefix, SUB_MANDATORY | SUB_UNIQUE),
            ChildSpec::extensions(),
        ];
        self.parse_children(kind, &elem, &mut table, None, |p, child, kw| match kw {
            StatementKind::Prefix => p.parse_simple_element(
                child,
                kw,
                ArgumentKind::Value,
                LexicalClass::Identifier,
                Substmt::Prefix,
                prefix,
                exts,
            ),
            StatementKind::ExtensionInstance => {
                p.parse_extension_instance(child, Substmt::BelongsTo, 0, exts)
            }
            other => Err(p.unroutable(kind, other)),
        })
    }

    /// `yang-version`: `1.0` or `1.1`; also arms the version gate for
    /// `Version2`-flagged children.
    pub(crate) fn parse_yang_version(
        &mut self,
        mut elem: Element,
        version: &mut YangVersion,
        exts: &mut Vec<ExtensionInstance>,
    ) -> Result<()> {
        let kind = StatementKind::YangVersion;
        let value = self.bind_required(&mut elem, ArgumentKind::Value, LexicalClass::String, kind)?;
        let parsed = match &*value {
            "1.0" => YangVersion::V1_0,
            "1.1" => YangVersion::V1_1,
            _ => return Err(value_set_error(&value, kind, "`1.0` or `1.1`", elem.line)),
        };
        *version = parsed;
        self.ctx.version = parsed;
        self.parse_exts_only(&elem, kind, Substmt::YangVersion, exts)
    }

    /// `import`: module name plus a mandatory prefix that must not collide
    /// with the owning module's prefix or any earlier import's.
    pub(crate) fn parse_import(
        &mut self,
        mut elem: Element,
        own_prefix: Option<IStr>,
        imports: &mut Vec<Import>,
    ) -> Result<()> {
        let kind = StatementKind::Import;
        let name =
            self.bind_required(&mut elem, ArgumentKind::Module, LexicalClass::Identifier, kind)?;
        let mut imp = Import::new(name);

        let mut table = [
            ChildSpec::new(StatementKind::Description, SUB_UNIQUE),
            ChildSpec::new(StatementKind::Prefix, SUB_MANDATORY | SUB_UNIQUE),
            ChildSpec::new(StatementKind::Reference, SUB_UNIQUE),
            ChildSpec::new(StatementKind::RevisionDate, SUB_UNIQUE),
            ChildSpec::extensions(),
        ];
        let i = &mut imp;
        self.parse_children(kind, &elem, &mut table, None, |p, child, kw| match kw {
            StatementKind::Description => {
                p.parse_meta_element(child, kw, Substmt::Description, &mut i.description, &mut i.exts)
            }
            StatementKind::Prefix => p.parse_simple_element(
                child,
                kw,
                ArgumentKind::Value,
                LexicalClass::Identifier,
                Substmt::Prefix,
                &mut i.prefix,
                &mut i.exts,
            ),
            StatementKind::Reference => {
                p.parse_meta_element(child, kw, Substmt::Reference, &mut i.reference, &mut i.exts)
            }
            StatementKind::RevisionDate => {
                p.parse_revision_date(child, &mut i.revision, &mut i.exts)
            }
            StatementKind::ExtensionInstance => {
                p.parse_extension_instance(child, Substmt::Itself, 0, &mut i.exts)
            }
            other => Err(p.unroutable(kind, other)),
        })?;

        // prefixes must be unique among the module's own prefix and all imports
        if let Some(prefix) = &imp.prefix {
            let clashes = own_prefix.as_deref() == Some(prefix)
                || imports.iter().any(|other| other.prefix.as_deref() == Some(&**prefix));
            if clashes {
                let line = self.cur.line();
                return Err(ParseError::new(
                    ErrorKind::NameCollision {
                        what: "prefix",
                        name: prefix.to_string(),
                    },
                    line,
                ));
            }
        }
        imports.push(imp);
        Ok(())
    }

    /// `include`: the submodule name shares the module namespace, so it must
    /// differ from the including module's name and from every module the
    /// embedder already knows.
    pub(crate) fn parse_include(
        &mut self,
        mut elem: Element,
        own_name: &str,
        includes: &mut Vec<Include>,
    ) -> Result<()> {
        let kind = StatementKind::Include;
        let name =
            self.bind_required(&mut elem, ArgumentKind::Module, LexicalClass::Identifier, kind)?;
        if &*name == own_name || self.known_modules.contains(&*name) {
            let line = elem.line;
            return Err(ParseError::new(
                ErrorKind::NameCollision {
                    what: "module",
                    name: name.to_string(),
                },
                line,
            ));
        }
        let mut inc = Include::new(name);

        let mut table = [
            ChildSpec::new(StatementKind::Description, SUB_UNIQUE | SUB_VER2),
            ChildSpec::new(StatementKind::Reference, SUB_UNIQUE | SUB_VER2),
            ChildSpec::new(StatementKind::RevisionDate, SUB_UNIQUE),
            ChildSpec::extensions(),
        ];
        let i = &mut inc;
        self.parse_children(kind, &elem, &mut table, None, |p, child, kw| match kw {
            StatementKind::Description => {
                p.parse_meta_element(child, kw, Substmt::Description, &mut i.description, &mut i.exts)
            }
            StatementKind::Reference => {
                p.parse_meta_element(child, kw, Substmt::Reference, &mut i.reference, &mut i.exts)
            }
            StatementKind::RevisionDate => {
                p.parse_revision_date(child, &mut i.revision, &mut i.exts)
            }
            StatementKind::ExtensionInstance => {
                p.parse_extension_instance(child, Substmt::Itself, 0, &mut i.exts)
            }
            other => Err(p.unroutable(kind, other)),
        })?;

        includes.push(inc);
        Ok(())
    }

    /// `revision`: a dated history entry.
    pub(crate) fn parse_revision(
        &mut self,
        mut elem: Element,
        revisions: &mut Vec<Revision>,
    ) -> Result<()> {
        let kind = StatementKind::Revision;
        let date = self.bind_required(&mut elem, ArgumentKind::Date, LexicalClass::String, kind)?;
        check_date(&date, "revision", elem.line)?;
        let mut rev = Revision::new(date);

        let mut table = [
            ChildSpec::new(StatementKind::Description, SUB_UNIQUE),
            ChildSpec::new(StatementKind::Reference, SUB_UNIQUE),
            ChildSpec::extensions(),
        ];
        let r = &mut rev;
        self.parse_children(kind, &elem, &mut table, None, |p, child, kw| match kw {
            StatementKind::Description => {
                p.parse_meta_element(child, kw, Substmt::Description, &mut r.description, &mut r.exts)
            }
            StatementKind::Reference => {
                p.parse_meta_element(child, kw, Substmt::Reference, &mut r.reference, &mut r.exts)
            }
            StatementKind::ExtensionInstance => {
                p.parse_extension_instance(child, Substmt::Itself, 0, &mut r.exts)
            }
            other => Err(p.unroutable(kind, other)),
        })?;

        revisions.push(rev);
        Ok(())
    }

    /// `revision-date` inside `import`/`include`.
    pub(crate) fn parse_revision_date(
        &mut self,
        mut elem: Element,
        slot: &mut Option<IStr>,
        exts: &mut Vec<ExtensionInstance>,
    ) -> Result<()> {
        let kind = StatementKind::RevisionDate;
        let date = self.bind_required(&mut elem, ArgumentKind::Date, LexicalClass::String, kind)?;
        check_date(&date, "revision-date", elem.line)?;
        *slot = Some(date);
        self.parse_exts_only(&elem, kind, Substmt::RevisionDate, exts)
    }

    /// `feature` definition.
    pub(crate) fn parse_feature(
        &mut self,
        mut elem: Element,
        features: &mut Vec<Feature>,
    ) -> Result<()> {
        let kind = StatementKind::Feature;
        let name =
            self.bind_required(&mut elem, ArgumentKind::Name, LexicalClass::Identifier, kind)?;
        let mut feat = Feature::new(name);

        let mut table = [
            ChildSpec::new(StatementKind::Description, SUB_UNIQUE),
            ChildSpec::new(StatementKind::IfFeature, 0),
            ChildSpec::new(StatementKind::Reference, SUB_UNIQUE),
            ChildSpec::new(StatementKind::Status, SUB_UNIQUE),
            ChildSpec::extensions(),
        ];
        let f = &mut feat;
        self.parse_children(kind, &elem, &mut table, None, |p, child, kw| match kw {
            StatementKind::Description => {
                p.parse_meta_element(child, kw, Substmt::Description, &mut f.description, &mut f.exts)
            }
            StatementKind::IfFeature => p.parse_simple_elements(
                child,
                kw,
                ArgumentKind::Name,
                LexicalClass::String,
                Substmt::IfFeature,
                &mut f.iffeatures,
                &mut f.exts,
            ),
            StatementKind::Reference => {
                p.parse_meta_element(child, kw, Substmt::Reference, &mut f.reference, &mut f.exts)
            }
            StatementKind::Status => p.parse_status(child, &mut f.flags, &mut f.exts),
            StatementKind::ExtensionInstance => {
                p.parse_extension_instance(child, Substmt::Itself, 0, &mut f.exts)
            }
            other => Err(p.unroutable(kind, other)),
        })?;

        features.push(feat);
        Ok(())
    }

    /// `identity` definition.
    pub(crate) fn parse_identity(
        &mut self,
        mut elem: Element,
        identities: &mut Vec<Identity>,
    ) -> Result<()> {
        let kind = StatementKind::Identity;
        let name =
            self.bind_required(&mut elem, ArgumentKind::Name, LexicalClass::Identifier, kind)?;
        let mut ident = Identity::new(name);

        let mut table = [
            ChildSpec::new(StatementKind::Base, 0),
            ChildSpec::new(StatementKind::Description, SUB_UNIQUE),
            ChildSpec::new(StatementKind::IfFeature, SUB_VER2),
            ChildSpec::new(StatementKind::Reference, SUB_UNIQUE),
            ChildSpec::new(StatementKind::Status, SUB_UNIQUE),
            ChildSpec::extensions(),
        ];
        let i = &mut ident;
        self.parse_children(kind, &elem, &mut table, None, |p, child, kw| match kw {
            StatementKind::Base => p.parse_simple_elements(
                child,
                kw,
                ArgumentKind::Name,
                LexicalClass::PrefixedIdentifier,
                Substmt::Base,
                &mut i.bases,
                &mut i.exts,
            ),
            StatementKind::Description => {
                p.parse_meta_element(child, kw, Substmt::Description, &mut i.description, &mut i.exts)
            }
            StatementKind::IfFeature => p.parse_simple_elements(
                child,
                kw,
                ArgumentKind::Name,
                LexicalClass::String,
                Substmt::IfFeature,
                &mut i.iffeatures,
                &mut i.exts,
            ),
            StatementKind::Reference => {
                p.parse_meta_element(child, kw, Substmt::Reference, &mut i.reference, &mut i.exts)
            }
            StatementKind::Status => p.parse_status(child, &mut i.flags, &mut i.exts),
            StatementKind::ExtensionInstance => {
                p.parse_extension_instance(child, Substmt::Itself, 0, &mut i.exts)
            }
            other => Err(p.unroutable(kind, other)),
        })?;

        identities.push(ident);
        Ok(())
    }
}
