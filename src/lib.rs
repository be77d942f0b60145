//! # yantra-base
//!
//! Core library for YANG schema parsing from YIN (the XML serialization of
//! YANG), parsed tree, and validation.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! parser    → statement-driven descent parser, parsed tree, validation
//!   ↓
//! xml       → lexical adapter: pull cursor over the YIN byte stream
//!   ↓
//! base      → primitives (string interner)
//! ```
//!
//! The parser consumes a well-formed XML document that uses the YIN
//! namespace `urn:ietf:params:xml:ns:yang:yin:1` for YANG keywords and
//! produces an owned [`parser::ast::Module`]/[`parser::ast::Submodule`]
//! tree together with a [`parser::ParserContext`] for downstream
//! compilation. Parsing is fail-fast: the first structural, cardinality,
//! ordering, value, or version violation aborts the parse.

/// Foundation types: string interner
pub mod base;

/// Lexical adapter: namespace-aware pull cursor over the input buffer
pub mod xml;

/// Parser: keyword vocabulary, child dispatcher, per-statement handlers
pub mod parser;

// Re-export commonly needed items
pub use base::{IStr, Interner};
pub use parser::{ParseError, ParserContext, YinParser, parse_module, parse_submodule};
