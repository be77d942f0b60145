//! The YIN parser: statement-driven descent over the XML serialization of
//! YANG.
//!
//! Entry points are [`parse_module`] and [`parse_submodule`] (or the
//! configurable [`YinParser`] façade when the embedder owns the dictionary
//! or knows already-loaded modules). The parse is fail-fast; on success the
//! caller gets the owned tree plus a [`ParserContext`] for downstream
//! compilation.

pub mod ast;
pub(crate) mod content;
pub mod errors;
pub mod flags;
pub(crate) mod grammar;
pub mod keyword;
pub mod value;

use indexmap::IndexSet;
use rustc_hash::{FxBuildHasher, FxHashSet};

use crate::base::Interner;
use crate::parser::ast::{Module, NodeId, Submodule, YangVersion};
use crate::parser::keyword::{StatementKind, resolve_keyword};
use crate::xml::XmlCursor;

pub use errors::{ErrorKind, FailureClass, ParseError};
use errors::Result;

/// Insertion-ordered set keyed with the fast hasher; keeps diagnostics
/// deterministic across runs.
type FxIndexSet<T> = IndexSet<T, FxBuildHasher>;

/// What the parser learned beyond the tree itself; input to downstream
/// compilation.
#[derive(Debug, Clone, Default)]
pub struct ParserContext {
    /// The YANG version the root declared.
    pub version: YangVersion,
    /// Nodes that host `typedef` definitions in a shadowing-relevant scope.
    pub typedef_nodes: FxIndexSet<NodeId>,
    /// Nodes that host `grouping` definitions in a shadowing-relevant scope.
    pub grouping_nodes: FxIndexSet<NodeId>,
    /// How many node ids this parse issued; a submodule parse continues
    /// numbering from its main module's context so inherited ids stay
    /// unambiguous.
    pub nodes_issued: u32,
    /// The lexer's line counter at termination.
    pub line: u32,
}

/// Identity and kind of the statement enclosing a definition, passed down
/// during descent in place of parent back-pointers.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ScopeRef {
    pub id: NodeId,
    pub kind: StatementKind,
}

/// Overall parse progress (spec state machine).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Expecting the opening root element.
    PreRoot,
    /// Inside the root `module`/`submodule`.
    InRoot,
    /// Root closed; only trivia may remain.
    PostRoot,
    /// An error occurred; the parse is abandoned.
    Failed,
}

/// One in-flight descent over one document.
pub(crate) struct Descent<'i, 'd> {
    pub(crate) cur: XmlCursor<'i>,
    pub(crate) dict: &'d mut Interner,
    pub(crate) known_modules: &'d FxHashSet<String>,
    pub(crate) ctx: ParserContext,
    state: ParseState,
}

impl<'i, 'd> Descent<'i, 'd> {
    fn new(
        input: &'i str,
        dict: &'d mut Interner,
        known_modules: &'d FxHashSet<String>,
        ctx: ParserContext,
    ) -> Self {
        Self {
            cur: XmlCursor::new(input),
            dict,
            known_modules,
            ctx,
            state: ParseState::PreRoot,
        }
    }

    /// Issue the next node id.
    pub(crate) fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.ctx.nodes_issued);
        self.ctx.nodes_issued += 1;
        id
    }

    fn run_module(mut self) -> Result<(Module, ParserContext)> {
        match self.parse_root_module() {
            Ok(module) => {
                self.ctx.line = self.cur.line();
                Ok((module, self.ctx))
            }
            Err(err) => {
                self.state = ParseState::Failed;
                Err(err)
            }
        }
    }

    fn run_submodule(mut self) -> Result<(Submodule, ParserContext)> {
        match self.parse_root_submodule() {
            Ok(submod) => {
                self.ctx.line = self.cur.line();
                Ok((submod, self.ctx))
            }
            Err(err) => {
                self.state = ParseState::Failed;
                Err(err)
            }
        }
    }

    fn parse_root_module(&mut self) -> Result<Module> {
        let root = self.expect_root(StatementKind::Module)?;
        self.state = ParseState::InRoot;
        let module = self.parse_module_stmt(root)?;
        self.state = ParseState::PostRoot;
        self.cur.finish()?;
        Ok(module)
    }

    fn parse_root_submodule(&mut self) -> Result<Submodule> {
        let root = self.expect_root(StatementKind::Submodule)?;
        self.state = ParseState::InRoot;
        let submod = self.parse_submodule_stmt(root)?;
        self.state = ParseState::PostRoot;
        self.cur.finish()?;
        Ok(submod)
    }

    fn expect_root(&mut self, expected: StatementKind) -> Result<crate::xml::Element> {
        debug_assert_eq!(self.state, ParseState::PreRoot);
        let Some(root) = self.cur.root_element()? else {
            let line = self.cur.line();
            return Err(ParseError::new(
                ErrorKind::ModuleSubmoduleExpected {
                    found: "end of input".to_owned(),
                    expected: expected.as_str(),
                },
                line,
            ));
        };
        let kw = resolve_keyword(root.ns.as_deref(), &root.local, None);
        if kw != Some(expected) {
            // a submodule handed to the module entry point (and vice versa)
            // is still a wrong root, just with a better-known name
            return Err(ParseError::new(
                ErrorKind::ModuleSubmoduleExpected {
                    found: root.qualified_name(),
                    expected: expected.as_str(),
                },
                root.line,
            ));
        }
        Ok(root)
    }
}

/// A configured parser: borrows the dictionary and knows which top-level
/// modules the embedder has already loaded (consulted by the `include`
/// collision check).
pub struct YinParser<'d> {
    dict: &'d mut Interner,
    known_modules: FxHashSet<String>,
}

impl<'d> YinParser<'d> {
    pub fn new(dict: &'d mut Interner) -> Self {
        Self {
            dict,
            known_modules: FxHashSet::default(),
        }
    }

    /// Register an already-loaded top-level module name.
    pub fn know_module(&mut self, name: impl Into<String>) -> &mut Self {
        self.known_modules.insert(name.into());
        self
    }

    /// Parse a buffer whose root must be a `module` element.
    pub fn parse_module(&mut self, input: &[u8]) -> Result<(Module, ParserContext)> {
        let text = decode_input(input)?;
        tracing::debug!(bytes = input.len(), "parsing YIN module");
        let descent = Descent::new(text, self.dict, &self.known_modules, ParserContext::default());
        let parsed = descent.run_module();
        if let Ok((module, ctx)) = &parsed {
            tracing::debug!(
                module = &*module.name,
                version = ctx.version.as_str(),
                lines = ctx.line,
                "parsed YIN module"
            );
        }
        parsed
    }

    /// Parse a buffer whose root must be a `submodule` element.
    ///
    /// The submodule inherits the typedef/grouping scope sets (and the node
    /// id watermark) from the main module's context.
    pub fn parse_submodule(
        &mut self,
        input: &[u8],
        main: &ParserContext,
    ) -> Result<(Submodule, ParserContext)> {
        let text = decode_input(input)?;
        tracing::debug!(bytes = input.len(), "parsing YIN submodule");
        let ctx = ParserContext {
            version: YangVersion::default(),
            typedef_nodes: main.typedef_nodes.clone(),
            grouping_nodes: main.grouping_nodes.clone(),
            nodes_issued: main.nodes_issued,
            line: 0,
        };
        Descent::new(text, self.dict, &self.known_modules, ctx).run_submodule()
    }
}

/// Parse a `module` document with a private dictionary.
pub fn parse_module(input: &[u8]) -> Result<(Module, ParserContext)> {
    let mut dict = Interner::new();
    YinParser::new(&mut dict).parse_module(input)
}

/// Parse a `submodule` document with a private dictionary, inheriting
/// scopes from the main module's context.
pub fn parse_submodule(input: &[u8], main: &ParserContext) -> Result<(Submodule, ParserContext)> {
    let mut dict = Interner::new();
    YinParser::new(&mut dict).parse_submodule(input, main)
}

/// The input must be UTF-8; a violation is an invalid-character error at
/// the line the valid prefix ends on.
fn decode_input(input: &[u8]) -> Result<&str> {
    std::str::from_utf8(input).map_err(|err| {
        let line = 1 + input[..err.valid_up_to()]
            .iter()
            .filter(|b| **b == b'\n')
            .count() as u32;
        ParseError::new(
            ErrorKind::InvalidCharacter {
                ch: char::REPLACEMENT_CHARACTER,
                what: "UTF-8 input",
            },
            line,
        )
    })
}
