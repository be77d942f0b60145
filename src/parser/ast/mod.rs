//! The parsed-schema tree.
//!
//! A pure ownership tree rooted at [`Module`] or [`Submodule`]: every node
//! is owned by exactly one parent collection and sibling order mirrors the
//! source document. Nodes that may host `typedef`/`grouping` definitions
//! carry a [`NodeId`] so the parser context can point at them without
//! back-references.

mod deviation;
mod extensions;
mod nodes;
mod types;

pub use deviation::{Deviate, DeviateAdd, DeviateDelete, DeviateReplace, Deviation};
pub use extensions::{ExtStmt, ExtensionDef, ExtensionInstance, Substmt};
pub use nodes::{
    Action, AnyKind, AnyNode, Augment, CaseNode, ChoiceNode, ContainerNode, DataNode, Grouping,
    InOut, LeafListNode, LeafNode, ListNode, Notification, Refine, Typedef, UsesNode, When,
};
pub use types::{Enumerant, Restriction, TypeRef};

use crate::base::IStr;
use crate::parser::flags::StmtFlags;

/// Identity of a schema node that can host scoped definitions.
///
/// Issued densely by the parser during descent; stable for the lifetime of
/// the parsed tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u32);

/// The YANG language version a module declares.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum YangVersion {
    #[default]
    V1_0,
    V1_1,
}

impl YangVersion {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::V1_0 => "1.0",
            Self::V1_1 => "1.1",
        }
    }
}

/// One `revision` statement.
#[derive(Debug, Clone)]
pub struct Revision {
    pub date: IStr,
    pub description: Option<IStr>,
    pub reference: Option<IStr>,
    pub exts: Vec<ExtensionInstance>,
}

impl Revision {
    pub fn new(date: IStr) -> Self {
        Self {
            date,
            description: None,
            reference: None,
            exts: Vec::new(),
        }
    }
}

/// One `import` statement.
#[derive(Debug, Clone)]
pub struct Import {
    pub name: IStr,
    pub prefix: Option<IStr>,
    pub revision: Option<IStr>,
    pub description: Option<IStr>,
    pub reference: Option<IStr>,
    pub exts: Vec<ExtensionInstance>,
}

impl Import {
    pub fn new(name: IStr) -> Self {
        Self {
            name,
            prefix: None,
            revision: None,
            description: None,
            reference: None,
            exts: Vec::new(),
        }
    }
}

/// One `include` statement.
#[derive(Debug, Clone)]
pub struct Include {
    pub name: IStr,
    pub revision: Option<IStr>,
    pub description: Option<IStr>,
    pub reference: Option<IStr>,
    pub exts: Vec<ExtensionInstance>,
}

impl Include {
    pub fn new(name: IStr) -> Self {
        Self {
            name,
            revision: None,
            description: None,
            reference: None,
            exts: Vec::new(),
        }
    }
}

/// One `feature` definition.
#[derive(Debug, Clone)]
pub struct Feature {
    pub name: IStr,
    pub iffeatures: Vec<IStr>,
    pub description: Option<IStr>,
    pub reference: Option<IStr>,
    pub flags: StmtFlags,
    pub exts: Vec<ExtensionInstance>,
}

impl Feature {
    pub fn new(name: IStr) -> Self {
        Self {
            name,
            iffeatures: Vec::new(),
            description: None,
            reference: None,
            flags: StmtFlags::NONE,
            exts: Vec::new(),
        }
    }
}

/// One `identity` definition.
#[derive(Debug, Clone)]
pub struct Identity {
    pub name: IStr,
    pub bases: Vec<IStr>,
    pub iffeatures: Vec<IStr>,
    pub description: Option<IStr>,
    pub reference: Option<IStr>,
    pub flags: StmtFlags,
    pub exts: Vec<ExtensionInstance>,
}

impl Identity {
    pub fn new(name: IStr) -> Self {
        Self {
            name,
            bases: Vec::new(),
            iffeatures: Vec::new(),
            description: None,
            reference: None,
            flags: StmtFlags::NONE,
            exts: Vec::new(),
        }
    }
}

/// A parsed `module` root.
#[derive(Debug, Clone)]
pub struct Module {
    pub name: IStr,
    pub version: YangVersion,
    pub namespace: Option<IStr>,
    pub prefix: Option<IStr>,
    pub organization: Option<IStr>,
    pub contact: Option<IStr>,
    pub description: Option<IStr>,
    pub reference: Option<IStr>,
    pub imports: Vec<Import>,
    pub includes: Vec<Include>,
    pub revisions: Vec<Revision>,
    pub extensions: Vec<ExtensionDef>,
    pub features: Vec<Feature>,
    pub identities: Vec<Identity>,
    pub typedefs: Vec<Typedef>,
    pub groupings: Vec<Grouping>,
    pub data: Vec<DataNode>,
    pub augments: Vec<Augment>,
    pub rpcs: Vec<Action>,
    pub notifications: Vec<Notification>,
    pub deviations: Vec<Deviation>,
    pub exts: Vec<ExtensionInstance>,
}

impl Module {
    pub fn new(name: IStr) -> Self {
        Self {
            name,
            version: YangVersion::default(),
            namespace: None,
            prefix: None,
            organization: None,
            contact: None,
            description: None,
            reference: None,
            imports: Vec::new(),
            includes: Vec::new(),
            revisions: Vec::new(),
            extensions: Vec::new(),
            features: Vec::new(),
            identities: Vec::new(),
            typedefs: Vec::new(),
            groupings: Vec::new(),
            data: Vec::new(),
            augments: Vec::new(),
            rpcs: Vec::new(),
            notifications: Vec::new(),
            deviations: Vec::new(),
            exts: Vec::new(),
        }
    }
}

/// A parsed `submodule` root.
///
/// Submodules have no namespace of their own; they belong to a main module
/// and acquire their prefix through `belongs-to`.
#[derive(Debug, Clone)]
pub struct Submodule {
    pub name: IStr,
    pub version: YangVersion,
    pub belongs_to: Option<IStr>,
    pub prefix: Option<IStr>,
    pub organization: Option<IStr>,
    pub contact: Option<IStr>,
    pub description: Option<IStr>,
    pub reference: Option<IStr>,
    pub imports: Vec<Import>,
    pub includes: Vec<Include>,
    pub revisions: Vec<Revision>,
    pub extensions: Vec<ExtensionDef>,
    pub features: Vec<Feature>,
    pub identities: Vec<Identity>,
    pub typedefs: Vec<Typedef>,
    pub groupings: Vec<Grouping>,
    pub data: Vec<DataNode>,
    pub augments: Vec<Augment>,
    pub rpcs: Vec<Action>,
    pub notifications: Vec<Notification>,
    pub deviations: Vec<Deviation>,
    pub exts: Vec<ExtensionInstance>,
}

impl Submodule {
    pub fn new(name: IStr) -> Self {
        Self {
            name,
            version: YangVersion::default(),
            belongs_to: None,
            prefix: None,
            organization: None,
            contact: None,
            description: None,
            reference: None,
            imports: Vec::new(),
            includes: Vec::new(),
            revisions: Vec::new(),
            extensions: Vec::new(),
            features: Vec::new(),
            identities: Vec::new(),
            typedefs: Vec::new(),
            groupings: Vec::new(),
            data: Vec::new(),
            augments: Vec::new(),
            rpcs: Vec::new(),
            notifications: Vec::new(),
            deviations: Vec::new(),
            exts: Vec::new(),
        }
    }
}
