//! Deviations: parsed here, applied downstream.

use crate::base::IStr;
use crate::parser::ast::{ExtensionInstance, Restriction, TypeRef};
use crate::parser::flags::StmtFlags;

/// A `deviation` of some target node, carrying one or more deviates.
#[derive(Debug, Clone)]
pub struct Deviation {
    pub target: IStr,
    pub deviates: Vec<Deviate>,
    pub description: Option<IStr>,
    pub reference: Option<IStr>,
    pub exts: Vec<ExtensionInstance>,
}

impl Deviation {
    pub fn new(target: IStr) -> Self {
        Self {
            target,
            deviates: Vec::new(),
            description: None,
            reference: None,
            exts: Vec::new(),
        }
    }
}

/// One `deviate` statement; the argument selects the shape.
#[derive(Debug, Clone)]
pub enum Deviate {
    NotSupported { exts: Vec<ExtensionInstance> },
    Add(DeviateAdd),
    Replace(DeviateReplace),
    Delete(DeviateDelete),
}

/// `deviate add`.
#[derive(Debug, Clone, Default)]
pub struct DeviateAdd {
    pub units: Option<IStr>,
    pub musts: Vec<Restriction>,
    pub uniques: Vec<IStr>,
    pub defaults: Vec<IStr>,
    pub min_elements: u32,
    pub max_elements: u32,
    pub flags: StmtFlags,
    pub exts: Vec<ExtensionInstance>,
}

/// `deviate replace`.
#[derive(Debug, Clone, Default)]
pub struct DeviateReplace {
    pub type_: Option<Box<TypeRef>>,
    pub units: Option<IStr>,
    pub default: Option<IStr>,
    pub min_elements: u32,
    pub max_elements: u32,
    pub flags: StmtFlags,
    pub exts: Vec<ExtensionInstance>,
}

/// `deviate delete`.
#[derive(Debug, Clone, Default)]
pub struct DeviateDelete {
    pub units: Option<IStr>,
    pub musts: Vec<Restriction>,
    pub uniques: Vec<IStr>,
    pub defaults: Vec<IStr>,
    pub exts: Vec<ExtensionInstance>,
}
