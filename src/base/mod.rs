//! Foundation primitives shared across the crate.

mod interner;

pub use interner::{IStr, Interner};
