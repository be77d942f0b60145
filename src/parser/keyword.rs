//! The YANG statement vocabulary and its YIN argument alphabet.
//!
//! [`StatementKind`] is declared in ascending keyword order with the three
//! pseudo-kinds last; child tables rely on this order for binary search, so
//! new variants must keep it sorted.

use crate::xml::YIN_NS_URI;

/// Every YANG statement, plus the foreign-namespace marker and the two
/// YIN-only pseudo-statements used when an argument is carried as a child
/// element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StatementKind {
    Action,
    Anydata,
    Anyxml,
    Argument,
    Augment,
    Base,
    BelongsTo,
    Bit,
    Case,
    Choice,
    Config,
    Contact,
    Container,
    Default,
    Description,
    Deviate,
    Deviation,
    Enum,
    ErrorAppTag,
    ErrorMessage,
    Extension,
    Feature,
    FractionDigits,
    Grouping,
    Identity,
    IfFeature,
    Import,
    Include,
    Input,
    Key,
    Leaf,
    LeafList,
    Length,
    List,
    Mandatory,
    MaxElements,
    MinElements,
    Modifier,
    Module,
    Must,
    Namespace,
    Notification,
    OrderedBy,
    Organization,
    Output,
    Path,
    Pattern,
    Position,
    Prefix,
    Presence,
    Range,
    Reference,
    Refine,
    RequireInstance,
    Revision,
    RevisionDate,
    Rpc,
    Status,
    Submodule,
    Type,
    Typedef,
    Unique,
    Units,
    Uses,
    Value,
    When,
    YangVersion,
    YinElement,
    /// An element in a namespace other than YIN - an extension instance.
    ExtensionInstance,
    /// The `<text>` child carrying a statement's argument.
    InlineText,
    /// The `<value>` child carrying `error-message`'s argument.
    InlineValue,
}

impl StatementKind {
    /// The keyword as spelled in YANG/YIN.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Action => "action",
            Self::Anydata => "anydata",
            Self::Anyxml => "anyxml",
            Self::Argument => "argument",
            Self::Augment => "augment",
            Self::Base => "base",
            Self::BelongsTo => "belongs-to",
            Self::Bit => "bit",
            Self::Case => "case",
            Self::Choice => "choice",
            Self::Config => "config",
            Self::Contact => "contact",
            Self::Container => "container",
            Self::Default => "default",
            Self::Description => "description",
            Self::Deviate => "deviate",
            Self::Deviation => "deviation",
            Self::Enum => "enum",
            Self::ErrorAppTag => "error-app-tag",
            Self::ErrorMessage => "error-message",
            Self::Extension => "extension",
            Self::Feature => "feature",
            Self::FractionDigits => "fraction-digits",
            Self::Grouping => "grouping",
            Self::Identity => "identity",
            Self::IfFeature => "if-feature",
            Self::Import => "import",
            Self::Include => "include",
            Self::Input => "input",
            Self::Key => "key",
            Self::Leaf => "leaf",
            Self::LeafList => "leaf-list",
            Self::Length => "length",
            Self::List => "list",
            Self::Mandatory => "mandatory",
            Self::MaxElements => "max-elements",
            Self::MinElements => "min-elements",
            Self::Modifier => "modifier",
            Self::Module => "module",
            Self::Must => "must",
            Self::Namespace => "namespace",
            Self::Notification => "notification",
            Self::OrderedBy => "ordered-by",
            Self::Organization => "organization",
            Self::Output => "output",
            Self::Path => "path",
            Self::Pattern => "pattern",
            Self::Position => "position",
            Self::Prefix => "prefix",
            Self::Presence => "presence",
            Self::Range => "range",
            Self::Reference => "reference",
            Self::Refine => "refine",
            Self::RequireInstance => "require-instance",
            Self::Revision => "revision",
            Self::RevisionDate => "revision-date",
            Self::Rpc => "rpc",
            Self::Status => "status",
            Self::Submodule => "submodule",
            Self::Type => "type",
            Self::Typedef => "typedef",
            Self::Unique => "unique",
            Self::Units => "units",
            Self::Uses => "uses",
            Self::Value => "value",
            Self::When => "when",
            Self::YangVersion => "yang-version",
            Self::YinElement => "yin-element",
            Self::ExtensionInstance => "(extension instance)",
            Self::InlineText => "text",
            Self::InlineValue => "value",
        }
    }

    /// Match a bare keyword spelling. The two pseudo-statements are handled
    /// by [`resolve_keyword`], never here.
    fn from_keyword(name: &str) -> Option<Self> {
        Some(match name {
            "action" => Self::Action,
            "anydata" => Self::Anydata,
            "anyxml" => Self::Anyxml,
            "argument" => Self::Argument,
            "augment" => Self::Augment,
            "base" => Self::Base,
            "belongs-to" => Self::BelongsTo,
            "bit" => Self::Bit,
            "case" => Self::Case,
            "choice" => Self::Choice,
            "config" => Self::Config,
            "contact" => Self::Contact,
            "container" => Self::Container,
            "default" => Self::Default,
            "description" => Self::Description,
            "deviate" => Self::Deviate,
            "deviation" => Self::Deviation,
            "enum" => Self::Enum,
            "error-app-tag" => Self::ErrorAppTag,
            "error-message" => Self::ErrorMessage,
            "extension" => Self::Extension,
            "feature" => Self::Feature,
            "fraction-digits" => Self::FractionDigits,
            "grouping" => Self::Grouping,
            "identity" => Self::Identity,
            "if-feature" => Self::IfFeature,
            "import" => Self::Import,
            "include" => Self::Include,
            "input" => Self::Input,
            "key" => Self::Key,
            "leaf" => Self::Leaf,
            "leaf-list" => Self::LeafList,
            "length" => Self::Length,
            "list" => Self::List,
            "mandatory" => Self::Mandatory,
            "max-elements" => Self::MaxElements,
            "min-elements" => Self::MinElements,
            "modifier" => Self::Modifier,
            "module" => Self::Module,
            "must" => Self::Must,
            "namespace" => Self::Namespace,
            "notification" => Self::Notification,
            "ordered-by" => Self::OrderedBy,
            "organization" => Self::Organization,
            "output" => Self::Output,
            "path" => Self::Path,
            "pattern" => Self::Pattern,
            "position" => Self::Position,
            "prefix" => Self::Prefix,
            "presence" => Self::Presence,
            "range" => Self::Range,
            "reference" => Self::Reference,
            "refine" => Self::Refine,
            "require-instance" => Self::RequireInstance,
            "revision" => Self::Revision,
            "revision-date" => Self::RevisionDate,
            "rpc" => Self::Rpc,
            "status" => Self::Status,
            "submodule" => Self::Submodule,
            "type" => Self::Type,
            "typedef" => Self::Typedef,
            "unique" => Self::Unique,
            "units" => Self::Units,
            "uses" => Self::Uses,
            "value" => Self::Value,
            "when" => Self::When,
            "yang-version" => Self::YangVersion,
            "yin-element" => Self::YinElement,
            _ => return None,
        })
    }
}

/// Resolve an element name to a statement kind.
///
/// A missing namespace binding yields `None` (unknown element); a non-YIN
/// namespace yields [`StatementKind::ExtensionInstance`]. Within the YIN
/// namespace the local name must match a keyword exactly, with two
/// disambiguations: `text` is always the inline-text pseudo-statement, and
/// `value` under `error-message` is the inline-value pseudo-statement.
pub fn resolve_keyword(
    ns: Option<&str>,
    local: &str,
    parent: Option<StatementKind>,
) -> Option<StatementKind> {
    let uri = ns?;
    if uri != YIN_NS_URI {
        return Some(StatementKind::ExtensionInstance);
    }
    match local {
        "text" => Some(StatementKind::InlineText),
        "value" if parent == Some(StatementKind::ErrorMessage) => Some(StatementKind::InlineValue),
        other => StatementKind::from_keyword(other),
    }
}

/// The phases a module/submodule body moves through, in required order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ModulePhase {
    Header,
    Linkage,
    Meta,
    Revision,
    Body,
}

/// Which phase a direct child of `module`/`submodule` belongs to.
pub fn module_phase(kind: StatementKind) -> ModulePhase {
    use StatementKind::*;
    match kind {
        YangVersion | Namespace | Prefix | BelongsTo => ModulePhase::Header,
        Import | Include => ModulePhase::Linkage,
        Organization | Contact | Description | Reference => ModulePhase::Meta,
        Revision => ModulePhase::Revision,
        _ => ModulePhase::Body,
    }
}

/// Whether a keyword is a legal substatement of *some* deviate shape.
/// Used to pick the more specific error when it is illegal for the shape
/// being parsed.
pub fn is_deviate_substatement(kind: StatementKind) -> bool {
    use StatementKind::*;
    matches!(
        kind,
        Config | Default | Mandatory | MaxElements | MinElements | Must | Type | Unique | Units
    )
}

/// The XML attributes a YIN statement may carry its argument in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgumentKind {
    /// The statement takes no argument attribute.
    None,
    Name,
    TargetNode,
    Module,
    Value,
    Text,
    Condition,
    Uri,
    Date,
    Tag,
}

impl ArgumentKind {
    /// The attribute name as it appears in YIN.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Name => "name",
            Self::TargetNode => "target-node",
            Self::Module => "module",
            Self::Value => "value",
            Self::Text => "text",
            Self::Condition => "condition",
            Self::Uri => "uri",
            Self::Date => "date",
            Self::Tag => "tag",
        }
    }

    /// Match an attribute name against the argument alphabet.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "name" => Self::Name,
            "target-node" => Self::TargetNode,
            "module" => Self::Module,
            "value" => Self::Value,
            "text" => Self::Text,
            "condition" => Self::Condition,
            "uri" => Self::Uri,
            "date" => Self::Date,
            "tag" => Self::Tag,
            _ => return None,
        })
    }
}
