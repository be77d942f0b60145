//! Extension definitions and preserved extension instances.

use crate::base::IStr;
use crate::parser::flags::StmtFlags;

/// An `extension` definition (the statement that *declares* an extension).
#[derive(Debug, Clone)]
pub struct ExtensionDef {
    pub name: IStr,
    /// The declared argument name, if the extension takes one.
    pub argument: Option<IStr>,
    pub description: Option<IStr>,
    pub reference: Option<IStr>,
    pub flags: StmtFlags,
    pub exts: Vec<ExtensionInstance>,
}

impl ExtensionDef {
    pub fn new(name: IStr) -> Self {
        Self {
            name,
            argument: None,
            description: None,
            reference: None,
            flags: StmtFlags::NONE,
            exts: Vec::new(),
        }
    }
}

/// Which substatement slot of the carrying statement an extension instance
/// appeared in. `Itself` means it sits directly in the statement's body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Substmt {
    #[default]
    Itself,
    Argument,
    Base,
    BelongsTo,
    Config,
    Contact,
    Default,
    Description,
    ErrorAppTag,
    ErrorMessage,
    FractionDigits,
    IfFeature,
    Key,
    Mandatory,
    MaxElements,
    MinElements,
    Modifier,
    Namespace,
    OrderedBy,
    Organization,
    Path,
    Position,
    Prefix,
    Presence,
    Reference,
    RequireInstance,
    RevisionDate,
    Status,
    Unique,
    Units,
    Value,
    YangVersion,
    YinElement,
}

/// A preserved element in a non-YIN namespace.
///
/// Interpretation is deferred to downstream extension processing; the parser
/// only records the literal structure.
#[derive(Debug, Clone)]
pub struct ExtensionInstance {
    /// Full element name as written, including its prefix.
    pub name: IStr,
    /// The substatement slot of the carrying statement it appeared in.
    pub substmt: Substmt,
    /// Instance index within that slot (for multi-instance substatements).
    pub substmt_index: u32,
    /// Text content, when the element body was text rather than elements.
    pub argument: Option<IStr>,
    /// Attributes (flagged) and nested elements, in source order.
    pub children: Vec<ExtStmt>,
}

impl ExtensionInstance {
    pub fn new(name: IStr, substmt: Substmt, substmt_index: u32) -> Self {
        Self {
            name,
            substmt,
            substmt_index,
            argument: None,
            children: Vec::new(),
        }
    }
}

/// A generic statement preserved inside an extension instance.
#[derive(Debug, Clone)]
pub struct ExtStmt {
    pub name: IStr,
    pub argument: Option<IStr>,
    /// True when this statement was rewritten from an XML attribute.
    pub from_attribute: bool,
    pub children: Vec<ExtStmt>,
}

impl ExtStmt {
    pub fn new(name: IStr) -> Self {
        Self {
            name,
            argument: None,
            from_attribute: false,
            children: Vec::new(),
        }
    }
}
