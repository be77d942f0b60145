//! Schema data nodes and the bodies that contain them.

use crate::base::IStr;
use crate::parser::ast::{ExtensionInstance, NodeId, Restriction, TypeRef};
use crate::parser::flags::StmtFlags;

/// A `when` condition.
#[derive(Debug, Clone)]
pub struct When {
    pub condition: IStr,
    pub description: Option<IStr>,
    pub reference: Option<IStr>,
    pub exts: Vec<ExtensionInstance>,
}

impl When {
    pub fn new(condition: IStr) -> Self {
        Self {
            condition,
            description: None,
            reference: None,
            exts: Vec::new(),
        }
    }
}

/// A `typedef` definition.
#[derive(Debug, Clone)]
pub struct Typedef {
    pub name: IStr,
    pub type_: TypeRef,
    pub units: Option<IStr>,
    pub default: Option<IStr>,
    pub description: Option<IStr>,
    pub reference: Option<IStr>,
    pub flags: StmtFlags,
    pub exts: Vec<ExtensionInstance>,
}

impl Typedef {
    pub fn new(name: IStr) -> Self {
        Self {
            name,
            type_: TypeRef::default(),
            units: None,
            default: None,
            description: None,
            reference: None,
            flags: StmtFlags::NONE,
            exts: Vec::new(),
        }
    }
}

/// A `grouping` definition.
#[derive(Debug, Clone)]
pub struct Grouping {
    pub id: NodeId,
    pub name: IStr,
    pub typedefs: Vec<Typedef>,
    pub groupings: Vec<Grouping>,
    pub data: Vec<DataNode>,
    pub actions: Vec<Action>,
    pub notifications: Vec<Notification>,
    pub description: Option<IStr>,
    pub reference: Option<IStr>,
    pub flags: StmtFlags,
    pub exts: Vec<ExtensionInstance>,
}

impl Grouping {
    pub fn new(id: NodeId, name: IStr) -> Self {
        Self {
            id,
            name,
            typedefs: Vec::new(),
            groupings: Vec::new(),
            data: Vec::new(),
            actions: Vec::new(),
            notifications: Vec::new(),
            description: None,
            reference: None,
            flags: StmtFlags::NONE,
            exts: Vec::new(),
        }
    }
}

/// The `input` or `output` body of an action/rpc.
#[derive(Debug, Clone)]
pub struct InOut {
    pub id: NodeId,
    pub musts: Vec<Restriction>,
    pub typedefs: Vec<Typedef>,
    pub groupings: Vec<Grouping>,
    pub data: Vec<DataNode>,
    pub exts: Vec<ExtensionInstance>,
}

impl InOut {
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            musts: Vec::new(),
            typedefs: Vec::new(),
            groupings: Vec::new(),
            data: Vec::new(),
            exts: Vec::new(),
        }
    }
}

/// An `action` or top-level `rpc`.
#[derive(Debug, Clone)]
pub struct Action {
    pub id: NodeId,
    pub name: IStr,
    pub input: Option<InOut>,
    pub output: Option<InOut>,
    pub typedefs: Vec<Typedef>,
    pub groupings: Vec<Grouping>,
    pub iffeatures: Vec<IStr>,
    pub description: Option<IStr>,
    pub reference: Option<IStr>,
    pub flags: StmtFlags,
    pub exts: Vec<ExtensionInstance>,
}

impl Action {
    pub fn new(id: NodeId, name: IStr) -> Self {
        Self {
            id,
            name,
            input: None,
            output: None,
            typedefs: Vec::new(),
            groupings: Vec::new(),
            iffeatures: Vec::new(),
            description: None,
            reference: None,
            flags: StmtFlags::NONE,
            exts: Vec::new(),
        }
    }
}

/// A `notification`.
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: NodeId,
    pub name: IStr,
    pub musts: Vec<Restriction>,
    pub iffeatures: Vec<IStr>,
    pub typedefs: Vec<Typedef>,
    pub groupings: Vec<Grouping>,
    pub data: Vec<DataNode>,
    pub description: Option<IStr>,
    pub reference: Option<IStr>,
    pub flags: StmtFlags,
    pub exts: Vec<ExtensionInstance>,
}

impl Notification {
    pub fn new(id: NodeId, name: IStr) -> Self {
        Self {
            id,
            name,
            musts: Vec::new(),
            iffeatures: Vec::new(),
            typedefs: Vec::new(),
            groupings: Vec::new(),
            data: Vec::new(),
            description: None,
            reference: None,
            flags: StmtFlags::NONE,
            exts: Vec::new(),
        }
    }
}

/// An `augment` of some target node.
#[derive(Debug, Clone)]
pub struct Augment {
    pub target: IStr,
    pub when: Option<When>,
    pub iffeatures: Vec<IStr>,
    pub data: Vec<DataNode>,
    pub actions: Vec<Action>,
    pub notifications: Vec<Notification>,
    pub description: Option<IStr>,
    pub reference: Option<IStr>,
    pub flags: StmtFlags,
    pub exts: Vec<ExtensionInstance>,
}

impl Augment {
    pub fn new(target: IStr) -> Self {
        Self {
            target,
            when: None,
            iffeatures: Vec::new(),
            data: Vec::new(),
            actions: Vec::new(),
            notifications: Vec::new(),
            description: None,
            reference: None,
            flags: StmtFlags::NONE,
            exts: Vec::new(),
        }
    }
}

/// A `refine` of a node brought in through `uses`.
#[derive(Debug, Clone)]
pub struct Refine {
    pub target: IStr,
    pub iffeatures: Vec<IStr>,
    pub musts: Vec<Restriction>,
    pub presence: Option<IStr>,
    pub defaults: Vec<IStr>,
    pub min_elements: u32,
    pub max_elements: u32,
    pub description: Option<IStr>,
    pub reference: Option<IStr>,
    pub flags: StmtFlags,
    pub exts: Vec<ExtensionInstance>,
}

impl Refine {
    pub fn new(target: IStr) -> Self {
        Self {
            target,
            iffeatures: Vec::new(),
            musts: Vec::new(),
            presence: None,
            defaults: Vec::new(),
            min_elements: 0,
            max_elements: 0,
            description: None,
            reference: None,
            flags: StmtFlags::NONE,
            exts: Vec::new(),
        }
    }
}

/// A `uses` of a grouping.
#[derive(Debug, Clone)]
pub struct UsesNode {
    pub name: IStr,
    pub when: Option<When>,
    pub iffeatures: Vec<IStr>,
    pub refines: Vec<Refine>,
    pub augments: Vec<Augment>,
    pub description: Option<IStr>,
    pub reference: Option<IStr>,
    pub flags: StmtFlags,
    pub exts: Vec<ExtensionInstance>,
}

impl UsesNode {
    pub fn new(name: IStr) -> Self {
        Self {
            name,
            when: None,
            iffeatures: Vec::new(),
            refines: Vec::new(),
            augments: Vec::new(),
            description: None,
            reference: None,
            flags: StmtFlags::NONE,
            exts: Vec::new(),
        }
    }
}

/// A `container`.
#[derive(Debug, Clone)]
pub struct ContainerNode {
    pub id: NodeId,
    pub name: IStr,
    pub when: Option<When>,
    pub iffeatures: Vec<IStr>,
    pub musts: Vec<Restriction>,
    pub presence: Option<IStr>,
    pub typedefs: Vec<Typedef>,
    pub groupings: Vec<Grouping>,
    pub children: Vec<DataNode>,
    pub actions: Vec<Action>,
    pub notifications: Vec<Notification>,
    pub description: Option<IStr>,
    pub reference: Option<IStr>,
    pub flags: StmtFlags,
    pub exts: Vec<ExtensionInstance>,
}

impl ContainerNode {
    pub fn new(id: NodeId, name: IStr) -> Self {
        Self {
            id,
            name,
            when: None,
            iffeatures: Vec::new(),
            musts: Vec::new(),
            presence: None,
            typedefs: Vec::new(),
            groupings: Vec::new(),
            children: Vec::new(),
            actions: Vec::new(),
            notifications: Vec::new(),
            description: None,
            reference: None,
            flags: StmtFlags::NONE,
            exts: Vec::new(),
        }
    }
}

/// A `leaf`.
#[derive(Debug, Clone)]
pub struct LeafNode {
    pub name: IStr,
    pub when: Option<When>,
    pub iffeatures: Vec<IStr>,
    pub musts: Vec<Restriction>,
    pub type_: TypeRef,
    pub units: Option<IStr>,
    pub default: Option<IStr>,
    pub description: Option<IStr>,
    pub reference: Option<IStr>,
    pub flags: StmtFlags,
    pub exts: Vec<ExtensionInstance>,
}

impl LeafNode {
    pub fn new(name: IStr) -> Self {
        Self {
            name,
            when: None,
            iffeatures: Vec::new(),
            musts: Vec::new(),
            type_: TypeRef::default(),
            units: None,
            default: None,
            description: None,
            reference: None,
            flags: StmtFlags::NONE,
            exts: Vec::new(),
        }
    }
}

/// A `leaf-list`. `max_elements == 0` means unbounded.
#[derive(Debug, Clone)]
pub struct LeafListNode {
    pub name: IStr,
    pub when: Option<When>,
    pub iffeatures: Vec<IStr>,
    pub musts: Vec<Restriction>,
    pub type_: TypeRef,
    pub units: Option<IStr>,
    pub defaults: Vec<IStr>,
    pub min_elements: u32,
    pub max_elements: u32,
    pub description: Option<IStr>,
    pub reference: Option<IStr>,
    pub flags: StmtFlags,
    pub exts: Vec<ExtensionInstance>,
}

impl LeafListNode {
    pub fn new(name: IStr) -> Self {
        Self {
            name,
            when: None,
            iffeatures: Vec::new(),
            musts: Vec::new(),
            type_: TypeRef::default(),
            units: None,
            defaults: Vec::new(),
            min_elements: 0,
            max_elements: 0,
            description: None,
            reference: None,
            flags: StmtFlags::NONE,
            exts: Vec::new(),
        }
    }
}

/// A `list`. `max_elements == 0` means unbounded.
#[derive(Debug, Clone)]
pub struct ListNode {
    pub id: NodeId,
    pub name: IStr,
    pub when: Option<When>,
    pub iffeatures: Vec<IStr>,
    pub musts: Vec<Restriction>,
    pub key: Option<IStr>,
    pub uniques: Vec<IStr>,
    pub min_elements: u32,
    pub max_elements: u32,
    pub typedefs: Vec<Typedef>,
    pub groupings: Vec<Grouping>,
    pub children: Vec<DataNode>,
    pub actions: Vec<Action>,
    pub notifications: Vec<Notification>,
    pub description: Option<IStr>,
    pub reference: Option<IStr>,
    pub flags: StmtFlags,
    pub exts: Vec<ExtensionInstance>,
}

impl ListNode {
    pub fn new(id: NodeId, name: IStr) -> Self {
        Self {
            id,
            name,
            when: None,
            iffeatures: Vec::new(),
            musts: Vec::new(),
            key: None,
            uniques: Vec::new(),
            min_elements: 0,
            max_elements: 0,
            typedefs: Vec::new(),
            groupings: Vec::new(),
            children: Vec::new(),
            actions: Vec::new(),
            notifications: Vec::new(),
            description: None,
            reference: None,
            flags: StmtFlags::NONE,
            exts: Vec::new(),
        }
    }
}

/// A `choice`.
#[derive(Debug, Clone)]
pub struct ChoiceNode {
    pub name: IStr,
    pub when: Option<When>,
    pub iffeatures: Vec<IStr>,
    pub default: Option<IStr>,
    pub children: Vec<DataNode>,
    pub description: Option<IStr>,
    pub reference: Option<IStr>,
    pub flags: StmtFlags,
    pub exts: Vec<ExtensionInstance>,
}

impl ChoiceNode {
    pub fn new(name: IStr) -> Self {
        Self {
            name,
            when: None,
            iffeatures: Vec::new(),
            default: None,
            children: Vec::new(),
            description: None,
            reference: None,
            flags: StmtFlags::NONE,
            exts: Vec::new(),
        }
    }
}

/// A `case` inside a choice.
#[derive(Debug, Clone)]
pub struct CaseNode {
    pub name: IStr,
    pub when: Option<When>,
    pub iffeatures: Vec<IStr>,
    pub children: Vec<DataNode>,
    pub description: Option<IStr>,
    pub reference: Option<IStr>,
    pub flags: StmtFlags,
    pub exts: Vec<ExtensionInstance>,
}

impl CaseNode {
    pub fn new(name: IStr) -> Self {
        Self {
            name,
            when: None,
            iffeatures: Vec::new(),
            children: Vec::new(),
            description: None,
            reference: None,
            flags: StmtFlags::NONE,
            exts: Vec::new(),
        }
    }
}

/// Which of the two opaque-data statements an [`AnyNode`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnyKind {
    Data,
    Xml,
}

/// An `anydata` or `anyxml` node.
#[derive(Debug, Clone)]
pub struct AnyNode {
    pub kind: AnyKind,
    pub name: IStr,
    pub when: Option<When>,
    pub iffeatures: Vec<IStr>,
    pub musts: Vec<Restriction>,
    pub description: Option<IStr>,
    pub reference: Option<IStr>,
    pub flags: StmtFlags,
    pub exts: Vec<ExtensionInstance>,
}

impl AnyNode {
    pub fn new(kind: AnyKind, name: IStr) -> Self {
        Self {
            kind,
            name,
            when: None,
            iffeatures: Vec::new(),
            musts: Vec::new(),
            description: None,
            reference: None,
            flags: StmtFlags::NONE,
            exts: Vec::new(),
        }
    }
}

/// Any schema data node that can appear in a data-definition body.
#[derive(Debug, Clone)]
pub enum DataNode {
    Container(ContainerNode),
    Leaf(LeafNode),
    LeafList(LeafListNode),
    List(ListNode),
    Choice(ChoiceNode),
    Case(CaseNode),
    Any(AnyNode),
    Uses(UsesNode),
}

impl DataNode {
    /// The node's name (for `uses`, the referenced grouping name).
    pub fn name(&self) -> &str {
        match self {
            Self::Container(n) => &n.name,
            Self::Leaf(n) => &n.name,
            Self::LeafList(n) => &n.name,
            Self::List(n) => &n.name,
            Self::Choice(n) => &n.name,
            Self::Case(n) => &n.name,
            Self::Any(n) => &n.name,
            Self::Uses(n) => &n.name,
        }
    }
}
