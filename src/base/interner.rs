//! String interner for efficient string storage and comparison.
//!
//! Uses `Rc<str>` for cheap cloning (reference count increment instead of
//! allocation). The interner deduplicates strings so identical strings share
//! the same allocation.
//!
//! Every argument value, text body, and extension name in a parsed schema
//! tree is an [`IStr`] owned by this dictionary. The parser borrows the
//! interner for the duration of one parse; its lifecycle belongs to the
//! embedding application.

use std::collections::HashSet;
use std::rc::Rc;

/// An interned string - cheap to clone (just Rc increment)
pub type IStr = Rc<str>;

/// String interner that deduplicates strings.
///
/// Interning a string returns an `Rc<str>` that can be cheaply cloned.
/// If the same string is interned multiple times, the same `Rc` is returned,
/// so handles for equal strings compare equal by identity.
#[derive(Debug, Default, Clone)]
pub struct Interner {
    strings: HashSet<Rc<str>>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a borrowed slice, returning a cheap-to-clone reference.
    ///
    /// If the string was already interned, returns the existing `Rc`.
    /// Otherwise, creates a new `Rc` and stores it.
    pub fn intern(&mut self, s: &str) -> IStr {
        if let Some(existing) = self.strings.get(s) {
            Rc::clone(existing)
        } else {
            let rc: Rc<str> = Rc::from(s);
            self.strings.insert(Rc::clone(&rc));
            rc
        }
    }

    /// Intern an owned string, avoiding a copy when it is new.
    ///
    /// This is the move-in path for values the lexical adapter had to
    /// unescape into a fresh heap copy.
    pub fn intern_string(&mut self, s: String) -> IStr {
        if let Some(existing) = self.strings.get(s.as_str()) {
            Rc::clone(existing)
        } else {
            let rc: Rc<str> = Rc::from(s);
            self.strings.insert(Rc::clone(&rc));
            rc
        }
    }

    /// Get an interned string if it exists, without creating it.
    pub fn get(&self, s: &str) -> Option<IStr> {
        self.strings.get(s).cloned()
    }

    /// Number of unique strings interned.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Returns true if no strings have been interned.
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Clear all interned strings.
    pub fn clear(&mut self) {
        self.strings.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_returns_same_rc() {
        let mut interner = Interner::new();
        let a = interner.intern("leaf");
        let b = interner.intern("leaf");
        assert!(Rc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_intern_string_deduplicates() {
        let mut interner = Interner::new();
        let a = interner.intern("urn:example:mod");
        let b = interner.intern_string(String::from("urn:example:mod"));
        assert!(Rc::ptr_eq(&a, &b));
        assert_eq!(interner.len(), 1);
    }

    #[test]
    fn test_intern_different_strings() {
        let mut interner = Interner::new();
        let a = interner.intern("container");
        let b = interner.intern("list");
        assert!(!Rc::ptr_eq(&a, &b));
        assert_eq!(&*a, "container");
        assert_eq!(&*b, "list");
    }

    #[test]
    fn test_empty_string_is_interned() {
        let mut interner = Interner::new();
        let a = interner.intern("");
        assert_eq!(&*a, "");
        assert!(interner.get("").is_some());
    }

    #[test]
    fn test_get_existing() {
        let mut interner = Interner::new();
        interner.intern("exists");
        assert!(interner.get("exists").is_some());
        assert!(interner.get("missing").is_none());
    }
}
