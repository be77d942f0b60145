//! Handlers for schema data nodes and the reusable bodies around them.

use crate::parser::{Descent, ScopeRef};
use crate::parser::ast::{
    Action, AnyKind, AnyNode, Augment, CaseNode, ChoiceNode, ContainerNode, DataNode,
    ExtensionInstance, Grouping, InOut, LeafListNode, LeafNode, ListNode, Notification, Refine,
    Typedef, UsesNode, When,
};
use crate::parser::content::{ChildSpec, SUB_MANDATORY, SUB_UNIQUE, SUB_VER2};
use crate::parser::errors::{ErrorKind, ParseError, Result};
use crate::parser::flags::StmtFlags;
use crate::parser::keyword::{ArgumentKind, StatementKind};
use crate::parser::value::{LexicalClass, parse_max_elements, parse_min_elements};
use crate::xml::Element;

/// Scopes whose typedefs/groupings do not shadow anything outside of them.
fn is_private_scope(kind: StatementKind) -> bool {
    use StatementKind::*;
    matches!(kind, Grouping | Action | Rpc | Input | Output | Notification)
}

impl Descent<'_, '_> {
    /// `when` condition body.
    pub(crate) fn parse_when(&mut self, mut elem: Element, slot: &mut Option<When>) -> Result<()> {
        use StatementKind::*;

        let cond =
            self.bind_required(&mut elem, ArgumentKind::Condition, LexicalClass::String, When)?;
        let mut when = crate::parser::ast::When::new(cond);

        let mut table = [
            ChildSpec::new(Description, SUB_UNIQUE),
            ChildSpec::new(Reference, SUB_UNIQUE),
            ChildSpec::extensions(),
        ];
        let w = &mut when;
        self.parse_children(When, &elem, &mut table, None, |p, child, kw| match kw {
            Description => {
                p.parse_meta_element(child, kw, crate::parser::ast::Substmt::Description, &mut w.description, &mut w.exts)
            }
            Reference => {
                p.parse_meta_element(child, kw, crate::parser::ast::Substmt::Reference, &mut w.reference, &mut w.exts)
            }
            ExtensionInstance => {
                p.parse_extension_instance(child, crate::parser::ast::Substmt::Itself, 0, &mut w.exts)
            }
            other => Err(p.unroutable(When, other)),
        })?;

        *slot = Some(when);
        Ok(())
    }

    /// `min-elements` into a polymorphic (leaf-list/list/refine/deviate)
    /// destination.
    pub(crate) fn parse_min_elements_stmt(
        &mut self,
        mut elem: Element,
        min: &mut u32,
        flags: &mut StmtFlags,
        exts: &mut Vec<ExtensionInstance>,
    ) -> Result<()> {
        let kind = StatementKind::MinElements;
        *flags |= StmtFlags::SET_MIN;
        let value = self.bind_required(&mut elem, ArgumentKind::Value, LexicalClass::String, kind)?;
        *min = parse_min_elements(&value, elem.line)?;
        self.parse_exts_only(&elem, kind, crate::parser::ast::Substmt::MinElements, exts)
    }

    /// `max-elements` into a polymorphic destination; `unbounded` stays 0.
    pub(crate) fn parse_max_elements_stmt(
        &mut self,
        mut elem: Element,
        max: &mut u32,
        flags: &mut StmtFlags,
        exts: &mut Vec<ExtensionInstance>,
    ) -> Result<()> {
        let kind = StatementKind::MaxElements;
        *flags |= StmtFlags::SET_MAX;
        let value = self.bind_required(&mut elem, ArgumentKind::Value, LexicalClass::String, kind)?;
        *max = parse_max_elements(&value, elem.line)?;
        self.parse_exts_only(&elem, kind, crate::parser::ast::Substmt::MaxElements, exts)
    }

    fn minmax_error(&mut self, min: u32, max: u32) -> ParseError {
        let line = self.cur.line();
        ParseError::new(
            ErrorKind::InvalidMinMax {
                detail: format!("min value {min} is bigger than max value {max}"),
            },
            line,
        )
    }

    /// `anydata` / `anyxml`.
    pub(crate) fn parse_any(
        &mut self,
        mut elem: Element,
        kind: StatementKind,
        siblings: &mut Vec<DataNode>,
    ) -> Result<()> {
        use StatementKind::*;
        use crate::parser::ast::Substmt;

        let name = self.bind_required(&mut elem, ArgumentKind::Name, LexicalClass::Identifier, kind)?;
        let any_kind = if kind == Anydata { AnyKind::Data } else { AnyKind::Xml };
        let mut any = AnyNode::new(any_kind, name);

        let mut table = [
            ChildSpec::new(Config, SUB_UNIQUE),
            ChildSpec::new(Description, SUB_UNIQUE),
            ChildSpec::new(IfFeature, 0),
            ChildSpec::new(Mandatory, SUB_UNIQUE),
            ChildSpec::new(Must, 0),
            ChildSpec::new(Reference, SUB_UNIQUE),
            ChildSpec::new(Status, SUB_UNIQUE),
            ChildSpec::new(When, SUB_UNIQUE),
            ChildSpec::extensions(),
        ];
        let a = &mut any;
        self.parse_children(kind, &elem, &mut table, None, |p, child, kw| match kw {
            Config => p.parse_config(child, &mut a.flags, &mut a.exts),
            Description => {
                p.parse_meta_element(child, kw, Substmt::Description, &mut a.description, &mut a.exts)
            }
            IfFeature => p.parse_simple_elements(
                child,
                kw,
                ArgumentKind::Name,
                LexicalClass::String,
                Substmt::IfFeature,
                &mut a.iffeatures,
                &mut a.exts,
            ),
            Mandatory => p.parse_mandatory(child, &mut a.flags, &mut a.exts),
            Must => p.parse_must(child, &mut a.musts),
            Reference => {
                p.parse_meta_element(child, kw, Substmt::Reference, &mut a.reference, &mut a.exts)
            }
            Status => p.parse_status(child, &mut a.flags, &mut a.exts),
            When => p.parse_when(child, &mut a.when),
            ExtensionInstance => p.parse_extension_instance(child, Substmt::Itself, 0, &mut a.exts),
            other => Err(p.unroutable(kind, other)),
        })?;

        siblings.push(DataNode::Any(any));
        Ok(())
    }

    /// `leaf`.
    pub(crate) fn parse_leaf(
        &mut self,
        mut elem: Element,
        siblings: &mut Vec<DataNode>,
    ) -> Result<()> {
        use StatementKind::*;
        use crate::parser::ast::Substmt;

        let name = self.bind_required(&mut elem, ArgumentKind::Name, LexicalClass::Identifier, Leaf)?;
        let mut leaf = LeafNode::new(name);

        let mut table = [
            ChildSpec::new(Config, SUB_UNIQUE),
            ChildSpec::new(Default, SUB_UNIQUE),
            ChildSpec::new(Description, SUB_UNIQUE),
            ChildSpec::new(IfFeature, 0),
            ChildSpec::new(Mandatory, SUB_UNIQUE),
            ChildSpec::new(Must, 0),
            ChildSpec::new(Reference, SUB_UNIQUE),
            ChildSpec::new(Status, SUB_UNIQUE),
            ChildSpec::new(Type, SUB_MANDATORY | SUB_UNIQUE),
            ChildSpec::new(Units, SUB_UNIQUE),
            ChildSpec::new(When, SUB_UNIQUE),
            ChildSpec::extensions(),
        ];
        let l = &mut leaf;
        self.parse_children(Leaf, &elem, &mut table, None, |p, child, kw| match kw {
            Config => p.parse_config(child, &mut l.flags, &mut l.exts),
            Default => p.parse_simple_element(
                child,
                kw,
                ArgumentKind::Value,
                LexicalClass::String,
                Substmt::Default,
                &mut l.default,
                &mut l.exts,
            ),
            Description => {
                p.parse_meta_element(child, kw, Substmt::Description, &mut l.description, &mut l.exts)
            }
            IfFeature => p.parse_simple_elements(
                child,
                kw,
                ArgumentKind::Name,
                LexicalClass::String,
                Substmt::IfFeature,
                &mut l.iffeatures,
                &mut l.exts,
            ),
            Mandatory => p.parse_mandatory(child, &mut l.flags, &mut l.exts),
            Must => p.parse_must(child, &mut l.musts),
            Reference => {
                p.parse_meta_element(child, kw, Substmt::Reference, &mut l.reference, &mut l.exts)
            }
            Status => p.parse_status(child, &mut l.flags, &mut l.exts),
            Type => p.parse_type(child, &mut l.type_),
            Units => p.parse_simple_element(
                child,
                kw,
                ArgumentKind::Name,
                LexicalClass::String,
                Substmt::Units,
                &mut l.units,
                &mut l.exts,
            ),
            When => p.parse_when(child, &mut l.when),
            ExtensionInstance => p.parse_extension_instance(child, Substmt::Itself, 0, &mut l.exts),
            other => Err(p.unroutable(Leaf, other)),
        })?;

        siblings.push(DataNode::Leaf(leaf));
        Ok(())
    }

    /// `leaf-list`; rejects `min-elements > 0` combined with defaults and
    /// `min > max`.
    pub(crate) fn parse_leaf_list(
        &mut self,
        mut elem: Element,
        siblings: &mut Vec<DataNode>,
    ) -> Result<()> {
        use StatementKind::*;
        use crate::parser::ast::Substmt;

        let name =
            self.bind_required(&mut elem, ArgumentKind::Name, LexicalClass::Identifier, LeafList)?;
        let mut llist = LeafListNode::new(name);

        let mut table = [
            ChildSpec::new(Config, SUB_UNIQUE),
            ChildSpec::new(Default, 0),
            ChildSpec::new(Description, SUB_UNIQUE),
            ChildSpec::new(IfFeature, 0),
            ChildSpec::new(MaxElements, SUB_UNIQUE),
            ChildSpec::new(MinElements, SUB_UNIQUE),
            ChildSpec::new(Must, 0),
            ChildSpec::new(OrderedBy, SUB_UNIQUE),
            ChildSpec::new(Reference, SUB_UNIQUE),
            ChildSpec::new(Status, SUB_UNIQUE),
            ChildSpec::new(Type, SUB_MANDATORY | SUB_UNIQUE),
            ChildSpec::new(Units, SUB_UNIQUE),
            ChildSpec::new(When, SUB_UNIQUE),
            ChildSpec::extensions(),
        ];
        let ll = &mut llist;
        self.parse_children(LeafList, &elem, &mut table, None, |p, child, kw| match kw {
            Config => p.parse_config(child, &mut ll.flags, &mut ll.exts),
            Default => p.parse_simple_elements(
                child,
                kw,
                ArgumentKind::Value,
                LexicalClass::String,
                Substmt::Default,
                &mut ll.defaults,
                &mut ll.exts,
            ),
            Description => {
                p.parse_meta_element(child, kw, Substmt::Description, &mut ll.description, &mut ll.exts)
            }
            IfFeature => p.parse_simple_elements(
                child,
                kw,
                ArgumentKind::Name,
                LexicalClass::String,
                Substmt::IfFeature,
                &mut ll.iffeatures,
                &mut ll.exts,
            ),
            MaxElements => {
                let LeafListNode { max_elements, flags, exts, .. } = ll;
                p.parse_max_elements_stmt(child, max_elements, flags, exts)
            }
            MinElements => {
                let LeafListNode { min_elements, flags, exts, .. } = ll;
                p.parse_min_elements_stmt(child, min_elements, flags, exts)
            }
            Must => p.parse_must(child, &mut ll.musts),
            OrderedBy => p.parse_ordered_by(child, &mut ll.flags, &mut ll.exts),
            Reference => {
                p.parse_meta_element(child, kw, Substmt::Reference, &mut ll.reference, &mut ll.exts)
            }
            Status => p.parse_status(child, &mut ll.flags, &mut ll.exts),
            Type => p.parse_type(child, &mut ll.type_),
            Units => p.parse_simple_element(
                child,
                kw,
                ArgumentKind::Name,
                LexicalClass::String,
                Substmt::Units,
                &mut ll.units,
                &mut ll.exts,
            ),
            When => p.parse_when(child, &mut ll.when),
            ExtensionInstance => p.parse_extension_instance(child, Substmt::Itself, 0, &mut ll.exts),
            other => Err(p.unroutable(LeafList, other)),
        })?;

        if llist.min_elements > 0 && !llist.defaults.is_empty() {
            let line = self.cur.line();
            return Err(ParseError::new(
                ErrorKind::InvalidMinMax {
                    detail: "min-elements and default cannot be combined in leaf-list".to_owned(),
                },
                line,
            ));
        }
        if llist.max_elements != 0 && llist.min_elements > llist.max_elements {
            return Err(self.minmax_error(llist.min_elements, llist.max_elements));
        }

        siblings.push(DataNode::LeafList(llist));
        Ok(())
    }

    /// `list`; rejects `min > max`.
    pub(crate) fn parse_list(
        &mut self,
        mut elem: Element,
        siblings: &mut Vec<DataNode>,
    ) -> Result<()> {
        use StatementKind::*;
        use crate::parser::ast::Substmt;

        let name = self.bind_required(&mut elem, ArgumentKind::Name, LexicalClass::Identifier, List)?;
        let id = self.next_id();
        let mut list = ListNode::new(id, name);

        let mut table = [
            ChildSpec::new(Action, 0),
            ChildSpec::new(Anydata, 0),
            ChildSpec::new(Anyxml, 0),
            ChildSpec::new(Choice, 0),
            ChildSpec::new(Config, SUB_UNIQUE),
            ChildSpec::new(Container, 0),
            ChildSpec::new(Description, SUB_UNIQUE),
            ChildSpec::new(Grouping, 0),
            ChildSpec::new(IfFeature, 0),
            ChildSpec::new(Key, SUB_UNIQUE),
            ChildSpec::new(Leaf, 0),
            ChildSpec::new(LeafList, 0),
            ChildSpec::new(List, 0),
            ChildSpec::new(MaxElements, SUB_UNIQUE),
            ChildSpec::new(MinElements, SUB_UNIQUE),
            ChildSpec::new(Must, 0),
            ChildSpec::new(Notification, 0),
            ChildSpec::new(OrderedBy, SUB_UNIQUE),
            ChildSpec::new(Reference, SUB_UNIQUE),
            ChildSpec::new(Status, SUB_UNIQUE),
            ChildSpec::new(Typedef, 0),
            ChildSpec::new(Unique, 0),
            ChildSpec::new(Uses, 0),
            ChildSpec::new(When, SUB_UNIQUE),
            ChildSpec::extensions(),
        ];
        let scope = ScopeRef { id, kind: List };
        let ls = &mut list;
        self.parse_children(List, &elem, &mut table, None, |p, child, kw| match kw {
            Action => p.parse_action(child, kw, &mut ls.actions),
            Anydata | Anyxml => p.parse_any(child, kw, &mut ls.children),
            Choice => p.parse_choice(child, &mut ls.children),
            Config => p.parse_config(child, &mut ls.flags, &mut ls.exts),
            Container => p.parse_container(child, &mut ls.children),
            Description => {
                p.parse_meta_element(child, kw, Substmt::Description, &mut ls.description, &mut ls.exts)
            }
            Grouping => p.parse_grouping(child, Some(scope), &mut ls.groupings),
            IfFeature => p.parse_simple_elements(
                child,
                kw,
                ArgumentKind::Name,
                LexicalClass::String,
                Substmt::IfFeature,
                &mut ls.iffeatures,
                &mut ls.exts,
            ),
            Key => p.parse_simple_element(
                child,
                kw,
                ArgumentKind::Value,
                LexicalClass::String,
                Substmt::Key,
                &mut ls.key,
                &mut ls.exts,
            ),
            Leaf => p.parse_leaf(child, &mut ls.children),
            LeafList => p.parse_leaf_list(child, &mut ls.children),
            List => p.parse_list(child, &mut ls.children),
            MaxElements => {
                let ListNode { max_elements, flags, exts, .. } = ls;
                p.parse_max_elements_stmt(child, max_elements, flags, exts)
            }
            MinElements => {
                let ListNode { min_elements, flags, exts, .. } = ls;
                p.parse_min_elements_stmt(child, min_elements, flags, exts)
            }
            Must => p.parse_must(child, &mut ls.musts),
            Notification => p.parse_notification(child, &mut ls.notifications),
            OrderedBy => p.parse_ordered_by(child, &mut ls.flags, &mut ls.exts),
            Reference => {
                p.parse_meta_element(child, kw, Substmt::Reference, &mut ls.reference, &mut ls.exts)
            }
            Status => p.parse_status(child, &mut ls.flags, &mut ls.exts),
            Typedef => p.parse_typedef(child, Some(scope), &mut ls.typedefs),
            Unique => p.parse_simple_elements(
                child,
                kw,
                ArgumentKind::Tag,
                LexicalClass::String,
                Substmt::Unique,
                &mut ls.uniques,
                &mut ls.exts,
            ),
            Uses => p.parse_uses(child, &mut ls.children),
            When => p.parse_when(child, &mut ls.when),
            ExtensionInstance => p.parse_extension_instance(child, Substmt::Itself, 0, &mut ls.exts),
            other => Err(p.unroutable(List, other)),
        })?;

        if list.max_elements != 0 && list.min_elements > list.max_elements {
            return Err(self.minmax_error(list.min_elements, list.max_elements));
        }

        siblings.push(DataNode::List(list));
        Ok(())
    }

    /// `container`.
    pub(crate) fn parse_container(
        &mut self,
        mut elem: Element,
        siblings: &mut Vec<DataNode>,
    ) -> Result<()> {
        use StatementKind::*;
        use crate::parser::ast::Substmt;

        let name =
            self.bind_required(&mut elem, ArgumentKind::Name, LexicalClass::Identifier, Container)?;
        let id = self.next_id();
        let mut cont = ContainerNode::new(id, name);

        let mut table = [
            ChildSpec::new(Action, SUB_VER2),
            ChildSpec::new(Anydata, SUB_VER2),
            ChildSpec::new(Anyxml, 0),
            ChildSpec::new(Choice, 0),
            ChildSpec::new(Config, SUB_UNIQUE),
            ChildSpec::new(Container, 0),
            ChildSpec::new(Description, SUB_UNIQUE),
            ChildSpec::new(Grouping, 0),
            ChildSpec::new(IfFeature, 0),
            ChildSpec::new(Leaf, 0),
            ChildSpec::new(LeafList, 0),
            ChildSpec::new(List, 0),
            ChildSpec::new(Must, 0),
            ChildSpec::new(Notification, SUB_VER2),
            ChildSpec::new(Presence, SUB_UNIQUE),
            ChildSpec::new(Reference, SUB_UNIQUE),
            ChildSpec::new(Status, SUB_UNIQUE),
            ChildSpec::new(Typedef, 0),
            ChildSpec::new(Uses, 0),
            ChildSpec::new(When, SUB_UNIQUE),
            ChildSpec::extensions(),
        ];
        let scope = ScopeRef { id, kind: Container };
        let c = &mut cont;
        self.parse_children(Container, &elem, &mut table, None, |p, child, kw| match kw {
            Action => p.parse_action(child, kw, &mut c.actions),
            Anydata | Anyxml => p.parse_any(child, kw, &mut c.children),
            Choice => p.parse_choice(child, &mut c.children),
            Config => p.parse_config(child, &mut c.flags, &mut c.exts),
            Container => p.parse_container(child, &mut c.children),
            Description => {
                p.parse_meta_element(child, kw, Substmt::Description, &mut c.description, &mut c.exts)
            }
            Grouping => p.parse_grouping(child, Some(scope), &mut c.groupings),
            IfFeature => p.parse_simple_elements(
                child,
                kw,
                ArgumentKind::Name,
                LexicalClass::String,
                Substmt::IfFeature,
                &mut c.iffeatures,
                &mut c.exts,
            ),
            Leaf => p.parse_leaf(child, &mut c.children),
            LeafList => p.parse_leaf_list(child, &mut c.children),
            List => p.parse_list(child, &mut c.children),
            Must => p.parse_must(child, &mut c.musts),
            Notification => p.parse_notification(child, &mut c.notifications),
            Presence => p.parse_simple_element(
                child,
                kw,
                ArgumentKind::Value,
                LexicalClass::String,
                Substmt::Presence,
                &mut c.presence,
                &mut c.exts,
            ),
            Reference => {
                p.parse_meta_element(child, kw, Substmt::Reference, &mut c.reference, &mut c.exts)
            }
            Status => p.parse_status(child, &mut c.flags, &mut c.exts),
            Typedef => p.parse_typedef(child, Some(scope), &mut c.typedefs),
            Uses => p.parse_uses(child, &mut c.children),
            When => p.parse_when(child, &mut c.when),
            ExtensionInstance => p.parse_extension_instance(child, Substmt::Itself, 0, &mut c.exts),
            other => Err(p.unroutable(Container, other)),
        })?;

        siblings.push(DataNode::Container(cont));
        Ok(())
    }

    /// `case` inside a choice.
    pub(crate) fn parse_case(
        &mut self,
        mut elem: Element,
        siblings: &mut Vec<DataNode>,
    ) -> Result<()> {
        use StatementKind::*;
        use crate::parser::ast::Substmt;

        let name = self.bind_required(&mut elem, ArgumentKind::Name, LexicalClass::Identifier, Case)?;
        let mut cas = CaseNode::new(name);

        let mut table = [
            ChildSpec::new(Anydata, SUB_VER2),
            ChildSpec::new(Anyxml, 0),
            ChildSpec::new(Choice, 0),
            ChildSpec::new(Container, 0),
            ChildSpec::new(Description, SUB_UNIQUE),
            ChildSpec::new(IfFeature, 0),
            ChildSpec::new(Leaf, 0),
            ChildSpec::new(LeafList, 0),
            ChildSpec::new(List, 0),
            ChildSpec::new(Reference, SUB_UNIQUE),
            ChildSpec::new(Status, SUB_UNIQUE),
            ChildSpec::new(Uses, 0),
            ChildSpec::new(When, SUB_UNIQUE),
            ChildSpec::extensions(),
        ];
        let c = &mut cas;
        self.parse_children(Case, &elem, &mut table, None, |p, child, kw| match kw {
            Anydata | Anyxml => p.parse_any(child, kw, &mut c.children),
            Choice => p.parse_choice(child, &mut c.children),
            Container => p.parse_container(child, &mut c.children),
            Description => {
                p.parse_meta_element(child, kw, Substmt::Description, &mut c.description, &mut c.exts)
            }
            IfFeature => p.parse_simple_elements(
                child,
                kw,
                ArgumentKind::Name,
                LexicalClass::String,
                Substmt::IfFeature,
                &mut c.iffeatures,
                &mut c.exts,
            ),
            Leaf => p.parse_leaf(child, &mut c.children),
            LeafList => p.parse_leaf_list(child, &mut c.children),
            List => p.parse_list(child, &mut c.children),
            Reference => {
                p.parse_meta_element(child, kw, Substmt::Reference, &mut c.reference, &mut c.exts)
            }
            Status => p.parse_status(child, &mut c.flags, &mut c.exts),
            Uses => p.parse_uses(child, &mut c.children),
            When => p.parse_when(child, &mut c.when),
            ExtensionInstance => p.parse_extension_instance(child, Substmt::Itself, 0, &mut c.exts),
            other => Err(p.unroutable(Case, other)),
        })?;

        siblings.push(DataNode::Case(cas));
        Ok(())
    }

    /// `choice`.
    pub(crate) fn parse_choice(
        &mut self,
        mut elem: Element,
        siblings: &mut Vec<DataNode>,
    ) -> Result<()> {
        use StatementKind::*;
        use crate::parser::ast::Substmt;

        let name =
            self.bind_required(&mut elem, ArgumentKind::Name, LexicalClass::Identifier, Choice)?;
        let mut choice = ChoiceNode::new(name);

        let mut table = [
            ChildSpec::new(Anydata, SUB_VER2),
            ChildSpec::new(Anyxml, 0),
            ChildSpec::new(Case, 0),
            ChildSpec::new(Choice, SUB_VER2),
            ChildSpec::new(Config, SUB_UNIQUE),
            ChildSpec::new(Container, 0),
            ChildSpec::new(Default, SUB_UNIQUE),
            ChildSpec::new(Description, SUB_UNIQUE),
            ChildSpec::new(IfFeature, 0),
            ChildSpec::new(Leaf, 0),
            ChildSpec::new(LeafList, 0),
            ChildSpec::new(List, 0),
            ChildSpec::new(Mandatory, SUB_UNIQUE),
            ChildSpec::new(Reference, SUB_UNIQUE),
            ChildSpec::new(Status, SUB_UNIQUE),
            ChildSpec::new(When, SUB_UNIQUE),
            ChildSpec::extensions(),
        ];
        let ch = &mut choice;
        self.parse_children(Choice, &elem, &mut table, None, |p, child, kw| match kw {
            Anydata | Anyxml => p.parse_any(child, kw, &mut ch.children),
            Case => p.parse_case(child, &mut ch.children),
            Choice => p.parse_choice(child, &mut ch.children),
            Config => p.parse_config(child, &mut ch.flags, &mut ch.exts),
            Container => p.parse_container(child, &mut ch.children),
            Default => p.parse_simple_element(
                child,
                kw,
                ArgumentKind::Value,
                LexicalClass::String,
                Substmt::Default,
                &mut ch.default,
                &mut ch.exts,
            ),
            Description => {
                p.parse_meta_element(child, kw, Substmt::Description, &mut ch.description, &mut ch.exts)
            }
            IfFeature => p.parse_simple_elements(
                child,
                kw,
                ArgumentKind::Name,
                LexicalClass::String,
                Substmt::IfFeature,
                &mut ch.iffeatures,
                &mut ch.exts,
            ),
            Leaf => p.parse_leaf(child, &mut ch.children),
            LeafList => p.parse_leaf_list(child, &mut ch.children),
            List => p.parse_list(child, &mut ch.children),
            Mandatory => p.parse_mandatory(child, &mut ch.flags, &mut ch.exts),
            Reference => {
                p.parse_meta_element(child, kw, Substmt::Reference, &mut ch.reference, &mut ch.exts)
            }
            Status => p.parse_status(child, &mut ch.flags, &mut ch.exts),
            When => p.parse_when(child, &mut ch.when),
            ExtensionInstance => p.parse_extension_instance(child, Substmt::Itself, 0, &mut ch.exts),
            other => Err(p.unroutable(Choice, other)),
        })?;

        siblings.push(DataNode::Choice(choice));
        Ok(())
    }

    /// `uses` of a grouping, with refines and augments.
    pub(crate) fn parse_uses(
        &mut self,
        mut elem: Element,
        siblings: &mut Vec<DataNode>,
    ) -> Result<()> {
        use StatementKind::*;
        use crate::parser::ast::Substmt;

        let name = self.bind_required(
            &mut elem,
            ArgumentKind::Name,
            LexicalClass::PrefixedIdentifier,
            Uses,
        )?;
        let mut uses = UsesNode::new(name);

        let mut table = [
            ChildSpec::new(Augment, 0),
            ChildSpec::new(Description, SUB_UNIQUE),
            ChildSpec::new(IfFeature, 0),
            ChildSpec::new(Reference, SUB_UNIQUE),
            ChildSpec::new(Refine, 0),
            ChildSpec::new(Status, SUB_UNIQUE),
            ChildSpec::new(When, SUB_UNIQUE),
            ChildSpec::extensions(),
        ];
        let u = &mut uses;
        self.parse_children(Uses, &elem, &mut table, None, |p, child, kw| match kw {
            Augment => p.parse_augment(child, &mut u.augments),
            Description => {
                p.parse_meta_element(child, kw, Substmt::Description, &mut u.description, &mut u.exts)
            }
            IfFeature => p.parse_simple_elements(
                child,
                kw,
                ArgumentKind::Name,
                LexicalClass::String,
                Substmt::IfFeature,
                &mut u.iffeatures,
                &mut u.exts,
            ),
            Reference => {
                p.parse_meta_element(child, kw, Substmt::Reference, &mut u.reference, &mut u.exts)
            }
            Refine => p.parse_refine(child, &mut u.refines),
            Status => p.parse_status(child, &mut u.flags, &mut u.exts),
            When => p.parse_when(child, &mut u.when),
            ExtensionInstance => p.parse_extension_instance(child, Substmt::Itself, 0, &mut u.exts),
            other => Err(p.unroutable(Uses, other)),
        })?;

        siblings.push(DataNode::Uses(uses));
        Ok(())
    }

    /// `refine` of a node brought in through `uses`.
    pub(crate) fn parse_refine(
        &mut self,
        mut elem: Element,
        refines: &mut Vec<Refine>,
    ) -> Result<()> {
        use StatementKind::*;
        use crate::parser::ast::Substmt;

        let target = self.bind_required(
            &mut elem,
            ArgumentKind::TargetNode,
            LexicalClass::String,
            Refine,
        )?;
        if target.is_empty() {
            tracing::warn!(line = elem.line, "empty argument of refine statement");
        }
        let mut rf = crate::parser::ast::Refine::new(target);

        let mut table = [
            ChildSpec::new(Config, SUB_UNIQUE),
            ChildSpec::new(Default, 0),
            ChildSpec::new(Description, SUB_UNIQUE),
            ChildSpec::new(IfFeature, 0),
            ChildSpec::new(Mandatory, SUB_UNIQUE),
            ChildSpec::new(MaxElements, SUB_UNIQUE),
            ChildSpec::new(MinElements, SUB_UNIQUE),
            ChildSpec::new(Must, 0),
            ChildSpec::new(Presence, SUB_UNIQUE),
            ChildSpec::new(Reference, SUB_UNIQUE),
            ChildSpec::extensions(),
        ];
        let r = &mut rf;
        self.parse_children(Refine, &elem, &mut table, None, |p, child, kw| match kw {
            Config => p.parse_config(child, &mut r.flags, &mut r.exts),
            Default => p.parse_simple_elements(
                child,
                kw,
                ArgumentKind::Value,
                LexicalClass::String,
                Substmt::Default,
                &mut r.defaults,
                &mut r.exts,
            ),
            Description => {
                p.parse_meta_element(child, kw, Substmt::Description, &mut r.description, &mut r.exts)
            }
            IfFeature => p.parse_simple_elements(
                child,
                kw,
                ArgumentKind::Name,
                LexicalClass::String,
                Substmt::IfFeature,
                &mut r.iffeatures,
                &mut r.exts,
            ),
            Mandatory => p.parse_mandatory(child, &mut r.flags, &mut r.exts),
            MaxElements => {
                let crate::parser::ast::Refine { max_elements, flags, exts, .. } = r;
                p.parse_max_elements_stmt(child, max_elements, flags, exts)
            }
            MinElements => {
                let crate::parser::ast::Refine { min_elements, flags, exts, .. } = r;
                p.parse_min_elements_stmt(child, min_elements, flags, exts)
            }
            Must => p.parse_must(child, &mut r.musts),
            Presence => p.parse_simple_element(
                child,
                kw,
                ArgumentKind::Value,
                LexicalClass::String,
                Substmt::Presence,
                &mut r.presence,
                &mut r.exts,
            ),
            Reference => {
                p.parse_meta_element(child, kw, Substmt::Reference, &mut r.reference, &mut r.exts)
            }
            ExtensionInstance => p.parse_extension_instance(child, Substmt::Itself, 0, &mut r.exts),
            other => Err(p.unroutable(Refine, other)),
        })?;

        refines.push(rf);
        Ok(())
    }

    /// `typedef`; records the enclosing scope for the downstream shadowing
    /// check unless the scope is private.
    pub(crate) fn parse_typedef(
        &mut self,
        mut elem: Element,
        scope: Option<ScopeRef>,
        typedefs: &mut Vec<Typedef>,
    ) -> Result<()> {
        use StatementKind::*;
        use crate::parser::ast::Substmt;

        let name =
            self.bind_required(&mut elem, ArgumentKind::Name, LexicalClass::Identifier, Typedef)?;
        let mut tpdf = crate::parser::ast::Typedef::new(name);

        let mut table = [
            ChildSpec::new(Default, SUB_UNIQUE),
            ChildSpec::new(Description, SUB_UNIQUE),
            ChildSpec::new(Reference, SUB_UNIQUE),
            ChildSpec::new(Status, SUB_UNIQUE),
            ChildSpec::new(Type, SUB_MANDATORY | SUB_UNIQUE),
            ChildSpec::new(Units, SUB_UNIQUE),
            ChildSpec::extensions(),
        ];
        let t = &mut tpdf;
        self.parse_children(Typedef, &elem, &mut table, None, |p, child, kw| match kw {
            Default => p.parse_simple_element(
                child,
                kw,
                ArgumentKind::Value,
                LexicalClass::String,
                Substmt::Default,
                &mut t.default,
                &mut t.exts,
            ),
            Description => {
                p.parse_meta_element(child, kw, Substmt::Description, &mut t.description, &mut t.exts)
            }
            Reference => {
                p.parse_meta_element(child, kw, Substmt::Reference, &mut t.reference, &mut t.exts)
            }
            Status => p.parse_status(child, &mut t.flags, &mut t.exts),
            Type => p.parse_type(child, &mut t.type_),
            Units => p.parse_simple_element(
                child,
                kw,
                ArgumentKind::Name,
                LexicalClass::String,
                Substmt::Units,
                &mut t.units,
                &mut t.exts,
            ),
            ExtensionInstance => p.parse_extension_instance(child, Substmt::Itself, 0, &mut t.exts),
            other => Err(p.unroutable(Typedef, other)),
        })?;

        if let Some(scope) = scope {
            if !is_private_scope(scope.kind) {
                self.ctx.typedef_nodes.insert(scope.id);
            }
        }

        typedefs.push(tpdf);
        Ok(())
    }

    /// `grouping`; records the enclosing scope symmetrically to typedefs.
    pub(crate) fn parse_grouping(
        &mut self,
        mut elem: Element,
        scope: Option<ScopeRef>,
        groupings: &mut Vec<Grouping>,
    ) -> Result<()> {
        use StatementKind::*;
        use crate::parser::ast::Substmt;

        let name =
            self.bind_required(&mut elem, ArgumentKind::Name, LexicalClass::Identifier, Grouping)?;
        let id = self.next_id();
        let mut grp = crate::parser::ast::Grouping::new(id, name);

        let mut table = [
            ChildSpec::new(Action, 0),
            ChildSpec::new(Anydata, 0),
            ChildSpec::new(Anyxml, 0),
            ChildSpec::new(Choice, 0),
            ChildSpec::new(Container, 0),
            ChildSpec::new(Description, SUB_UNIQUE),
            ChildSpec::new(Grouping, 0),
            ChildSpec::new(Leaf, 0),
            ChildSpec::new(LeafList, 0),
            ChildSpec::new(List, 0),
            ChildSpec::new(Notification, 0),
            ChildSpec::new(Reference, SUB_UNIQUE),
            ChildSpec::new(Status, SUB_UNIQUE),
            ChildSpec::new(Typedef, 0),
            ChildSpec::new(Uses, 0),
            ChildSpec::extensions(),
        ];
        let inner_scope = ScopeRef { id, kind: Grouping };
        let g = &mut grp;
        self.parse_children(Grouping, &elem, &mut table, None, |p, child, kw| match kw {
            Action => p.parse_action(child, kw, &mut g.actions),
            Anydata | Anyxml => p.parse_any(child, kw, &mut g.data),
            Choice => p.parse_choice(child, &mut g.data),
            Container => p.parse_container(child, &mut g.data),
            Description => {
                p.parse_meta_element(child, kw, Substmt::Description, &mut g.description, &mut g.exts)
            }
            Grouping => p.parse_grouping(child, Some(inner_scope), &mut g.groupings),
            Leaf => p.parse_leaf(child, &mut g.data),
            LeafList => p.parse_leaf_list(child, &mut g.data),
            List => p.parse_list(child, &mut g.data),
            Notification => p.parse_notification(child, &mut g.notifications),
            Reference => {
                p.parse_meta_element(child, kw, Substmt::Reference, &mut g.reference, &mut g.exts)
            }
            Status => p.parse_status(child, &mut g.flags, &mut g.exts),
            Typedef => p.parse_typedef(child, Some(inner_scope), &mut g.typedefs),
            Uses => p.parse_uses(child, &mut g.data),
            ExtensionInstance => p.parse_extension_instance(child, Substmt::Itself, 0, &mut g.exts),
            other => Err(p.unroutable(Grouping, other)),
        })?;

        if let Some(scope) = scope {
            if !is_private_scope(scope.kind) {
                self.ctx.grouping_nodes.insert(scope.id);
            }
        }

        groupings.push(grp);
        Ok(())
    }

    /// `augment` of a target node.
    pub(crate) fn parse_augment(
        &mut self,
        mut elem: Element,
        augments: &mut Vec<Augment>,
    ) -> Result<()> {
        use StatementKind::*;
        use crate::parser::ast::Substmt;

        let target = self.bind_required(
            &mut elem,
            ArgumentKind::TargetNode,
            LexicalClass::String,
            Augment,
        )?;
        if target.is_empty() {
            tracing::warn!(line = elem.line, "empty argument of augment statement");
        }
        let mut aug = crate::parser::ast::Augment::new(target);

        let mut table = [
            ChildSpec::new(Action, SUB_VER2),
            ChildSpec::new(Anydata, SUB_VER2),
            ChildSpec::new(Anyxml, 0),
            ChildSpec::new(Case, 0),
            ChildSpec::new(Choice, 0),
            ChildSpec::new(Container, 0),
            ChildSpec::new(Description, SUB_UNIQUE),
            ChildSpec::new(IfFeature, 0),
            ChildSpec::new(Leaf, 0),
            ChildSpec::new(LeafList, 0),
            ChildSpec::new(List, 0),
            ChildSpec::new(Notification, SUB_VER2),
            ChildSpec::new(Reference, SUB_UNIQUE),
            ChildSpec::new(Status, SUB_UNIQUE),
            ChildSpec::new(Uses, 0),
            ChildSpec::new(When, SUB_UNIQUE),
            ChildSpec::extensions(),
        ];
        let a = &mut aug;
        self.parse_children(Augment, &elem, &mut table, None, |p, child, kw| match kw {
            Action => p.parse_action(child, kw, &mut a.actions),
            Anydata | Anyxml => p.parse_any(child, kw, &mut a.data),
            Case => p.parse_case(child, &mut a.data),
            Choice => p.parse_choice(child, &mut a.data),
            Container => p.parse_container(child, &mut a.data),
            Description => {
                p.parse_meta_element(child, kw, Substmt::Description, &mut a.description, &mut a.exts)
            }
            IfFeature => p.parse_simple_elements(
                child,
                kw,
                ArgumentKind::Name,
                LexicalClass::String,
                Substmt::IfFeature,
                &mut a.iffeatures,
                &mut a.exts,
            ),
            Leaf => p.parse_leaf(child, &mut a.data),
            LeafList => p.parse_leaf_list(child, &mut a.data),
            List => p.parse_list(child, &mut a.data),
            Notification => p.parse_notification(child, &mut a.notifications),
            Reference => {
                p.parse_meta_element(child, kw, Substmt::Reference, &mut a.reference, &mut a.exts)
            }
            Status => p.parse_status(child, &mut a.flags, &mut a.exts),
            Uses => p.parse_uses(child, &mut a.data),
            When => p.parse_when(child, &mut a.when),
            ExtensionInstance => p.parse_extension_instance(child, Substmt::Itself, 0, &mut a.exts),
            other => Err(p.unroutable(Augment, other)),
        })?;

        augments.push(aug);
        Ok(())
    }

    /// `action` (or top-level `rpc`).
    pub(crate) fn parse_action(
        &mut self,
        mut elem: Element,
        kind: StatementKind,
        actions: &mut Vec<Action>,
    ) -> Result<()> {
        use StatementKind::*;
        use crate::parser::ast::Substmt;

        let name = self.bind_required(&mut elem, ArgumentKind::Name, LexicalClass::Identifier, kind)?;
        let id = self.next_id();
        let mut act = crate::parser::ast::Action::new(id, name);

        let mut table = [
            ChildSpec::new(Description, SUB_UNIQUE),
            ChildSpec::new(Grouping, 0),
            ChildSpec::new(IfFeature, 0),
            ChildSpec::new(Input, SUB_UNIQUE),
            ChildSpec::new(Output, SUB_UNIQUE),
            ChildSpec::new(Reference, SUB_UNIQUE),
            ChildSpec::new(Status, SUB_UNIQUE),
            ChildSpec::new(Typedef, 0),
            ChildSpec::extensions(),
        ];
        let scope = ScopeRef { id, kind };
        let ac = &mut act;
        self.parse_children(kind, &elem, &mut table, None, |p, child, kw| match kw {
            Description => {
                p.parse_meta_element(child, kw, Substmt::Description, &mut ac.description, &mut ac.exts)
            }
            Grouping => p.parse_grouping(child, Some(scope), &mut ac.groupings),
            IfFeature => p.parse_simple_elements(
                child,
                kw,
                ArgumentKind::Name,
                LexicalClass::String,
                Substmt::IfFeature,
                &mut ac.iffeatures,
                &mut ac.exts,
            ),
            Input => {
                let io = p.parse_inout(child, kw)?;
                ac.input = Some(io);
                Ok(())
            }
            Output => {
                let io = p.parse_inout(child, kw)?;
                ac.output = Some(io);
                Ok(())
            }
            Reference => {
                p.parse_meta_element(child, kw, Substmt::Reference, &mut ac.reference, &mut ac.exts)
            }
            Status => p.parse_status(child, &mut ac.flags, &mut ac.exts),
            Typedef => p.parse_typedef(child, Some(scope), &mut ac.typedefs),
            ExtensionInstance => p.parse_extension_instance(child, Substmt::Itself, 0, &mut ac.exts),
            other => Err(p.unroutable(kind, other)),
        })?;

        actions.push(act);
        Ok(())
    }

    /// `input`/`output` body of an action.
    pub(crate) fn parse_inout(&mut self, mut elem: Element, kind: StatementKind) -> Result<InOut> {
        use StatementKind::*;
        use crate::parser::ast::Substmt;

        self.bind_none(&mut elem, kind)?;
        let id = self.next_id();
        let mut io = InOut::new(id);

        let mut table = [
            ChildSpec::new(Anydata, SUB_VER2),
            ChildSpec::new(Anyxml, 0),
            ChildSpec::new(Choice, 0),
            ChildSpec::new(Container, 0),
            ChildSpec::new(Grouping, 0),
            ChildSpec::new(Leaf, 0),
            ChildSpec::new(LeafList, 0),
            ChildSpec::new(List, 0),
            ChildSpec::new(Must, SUB_VER2),
            ChildSpec::new(Typedef, 0),
            ChildSpec::new(Uses, 0),
            ChildSpec::extensions(),
        ];
        let scope = ScopeRef { id, kind };
        let o = &mut io;
        self.parse_children(kind, &elem, &mut table, None, |p, child, kw| match kw {
            Anydata | Anyxml => p.parse_any(child, kw, &mut o.data),
            Choice => p.parse_choice(child, &mut o.data),
            Container => p.parse_container(child, &mut o.data),
            Grouping => p.parse_grouping(child, Some(scope), &mut o.groupings),
            Leaf => p.parse_leaf(child, &mut o.data),
            LeafList => p.parse_leaf_list(child, &mut o.data),
            List => p.parse_list(child, &mut o.data),
            Must => p.parse_must(child, &mut o.musts),
            Typedef => p.parse_typedef(child, Some(scope), &mut o.typedefs),
            Uses => p.parse_uses(child, &mut o.data),
            ExtensionInstance => p.parse_extension_instance(child, Substmt::Itself, 0, &mut o.exts),
            other => Err(p.unroutable(kind, other)),
        })?;

        Ok(io)
    }

    /// `notification`.
    pub(crate) fn parse_notification(
        &mut self,
        mut elem: Element,
        notifications: &mut Vec<Notification>,
    ) -> Result<()> {
        use StatementKind::*;
        use crate::parser::ast::Substmt;

        let name = self.bind_required(
            &mut elem,
            ArgumentKind::Name,
            LexicalClass::Identifier,
            Notification,
        )?;
        let id = self.next_id();
        let mut notif = crate::parser::ast::Notification::new(id, name);

        let mut table = [
            ChildSpec::new(Anydata, SUB_VER2),
            ChildSpec::new(Anyxml, 0),
            ChildSpec::new(Choice, 0),
            ChildSpec::new(Container, 0),
            ChildSpec::new(Description, SUB_UNIQUE),
            ChildSpec::new(Grouping, 0),
            ChildSpec::new(IfFeature, 0),
            ChildSpec::new(Leaf, 0),
            ChildSpec::new(LeafList, 0),
            ChildSpec::new(List, 0),
            ChildSpec::new(Must, SUB_VER2),
            ChildSpec::new(Reference, SUB_UNIQUE),
            ChildSpec::new(Status, SUB_UNIQUE),
            ChildSpec::new(Typedef, 0),
            ChildSpec::new(Uses, 0),
            ChildSpec::extensions(),
        ];
        let scope = ScopeRef { id, kind: Notification };
        let n = &mut notif;
        self.parse_children(Notification, &elem, &mut table, None, |p, child, kw| match kw {
            Anydata | Anyxml => p.parse_any(child, kw, &mut n.data),
            Choice => p.parse_choice(child, &mut n.data),
            Container => p.parse_container(child, &mut n.data),
            Description => {
                p.parse_meta_element(child, kw, Substmt::Description, &mut n.description, &mut n.exts)
            }
            Grouping => p.parse_grouping(child, Some(scope), &mut n.groupings),
            IfFeature => p.parse_simple_elements(
                child,
                kw,
                ArgumentKind::Name,
                LexicalClass::String,
                Substmt::IfFeature,
                &mut n.iffeatures,
                &mut n.exts,
            ),
            Leaf => p.parse_leaf(child, &mut n.data),
            LeafList => p.parse_leaf_list(child, &mut n.data),
            List => p.parse_list(child, &mut n.data),
            Must => p.parse_must(child, &mut n.musts),
            Reference => {
                p.parse_meta_element(child, kw, Substmt::Reference, &mut n.reference, &mut n.exts)
            }
            Status => p.parse_status(child, &mut n.flags, &mut n.exts),
            Typedef => p.parse_typedef(child, Some(scope), &mut n.typedefs),
            Uses => p.parse_uses(child, &mut n.data),
            ExtensionInstance => p.parse_extension_instance(child, Substmt::Itself, 0, &mut n.exts),
            other => Err(p.unroutable(Notification, other)),
        })?;

        notifications.push(notif);
        Ok(())
    }
}
