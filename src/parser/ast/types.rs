//! Type references, restrictions, and enumerants.

use crate::base::IStr;
use crate::parser::ast::ExtensionInstance;
use crate::parser::flags::StmtFlags;

/// A `type` statement: the named base type plus whatever restrictions were
/// spelled inline. A union carries its member types in `types`.
#[derive(Debug, Clone, Default)]
pub struct TypeRef {
    /// Possibly prefixed type name; set once the argument is bound.
    pub name: Option<IStr>,
    pub range: Option<Box<Restriction>>,
    pub length: Option<Box<Restriction>>,
    pub patterns: Vec<Restriction>,
    pub enums: Vec<Enumerant>,
    pub bits: Vec<Enumerant>,
    pub path: Option<IStr>,
    pub bases: Vec<IStr>,
    /// Union member types, in source order.
    pub types: Vec<TypeRef>,
    pub fraction_digits: u8,
    pub require_instance: bool,
    pub flags: StmtFlags,
    pub exts: Vec<ExtensionInstance>,
}

/// A restriction body shared by `range`, `length`, `must`, and `pattern`.
///
/// For `pattern` the argument carries a leading sentinel byte: `0x06` for a
/// regular match, rewritten to `0x15` when an `invert-match` modifier child
/// is parsed.
#[derive(Debug, Clone, Default)]
pub struct Restriction {
    /// The range/length expression, must condition, or sentinel-prefixed
    /// pattern text.
    pub arg: Option<IStr>,
    pub description: Option<IStr>,
    pub error_app_tag: Option<IStr>,
    pub error_message: Option<IStr>,
    pub reference: Option<IStr>,
    pub exts: Vec<ExtensionInstance>,
}

/// One `enum` or `bit` member of an enumeration/bits type.
///
/// `value` holds the enum value (i32 domain) or the bit position (u32
/// domain); `SET_VALUE` in `flags` records that it was spelled explicitly.
#[derive(Debug, Clone)]
pub struct Enumerant {
    pub name: IStr,
    pub value: i64,
    pub iffeatures: Vec<IStr>,
    pub description: Option<IStr>,
    pub reference: Option<IStr>,
    pub flags: StmtFlags,
    pub exts: Vec<ExtensionInstance>,
}

impl Enumerant {
    pub fn new(name: IStr) -> Self {
        Self {
            name,
            value: 0,
            iffeatures: Vec::new(),
            description: None,
            reference: None,
            flags: StmtFlags::NONE,
            exts: Vec::new(),
        }
    }
}
