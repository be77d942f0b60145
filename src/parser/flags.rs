//! The per-statement flags word.
//!
//! One bit per YANG modifier or "this optional piece was set" marker,
//! shared by every node payload that carries modifiers.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Bit set of YANG modifiers and set-markers on a parsed statement.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct StmtFlags(u32);

impl StmtFlags {
    pub const NONE: Self = Self(0);

    // status
    pub const STATUS_CURRENT: Self = Self(1 << 0);
    pub const STATUS_DEPRECATED: Self = Self(1 << 1);
    pub const STATUS_OBSOLETE: Self = Self(1 << 2);

    // config
    pub const CONFIG_WRITE: Self = Self(1 << 3);
    pub const CONFIG_READ: Self = Self(1 << 4);

    // mandatory
    pub const MANDATORY_TRUE: Self = Self(1 << 5);
    pub const MANDATORY_FALSE: Self = Self(1 << 6);

    // ordered-by
    pub const ORDERED_BY_SYSTEM: Self = Self(1 << 7);
    pub const ORDERED_BY_USER: Self = Self(1 << 8);

    // yin-element
    pub const YIN_ELEMENT_TRUE: Self = Self(1 << 9);
    pub const YIN_ELEMENT_FALSE: Self = Self(1 << 10);

    // explicit-value markers
    pub const SET_VALUE: Self = Self(1 << 11);
    pub const SET_MIN: Self = Self(1 << 12);
    pub const SET_MAX: Self = Self(1 << 13);
    pub const SET_RANGE: Self = Self(1 << 14);
    pub const SET_LENGTH: Self = Self(1 << 15);
    pub const SET_PATH: Self = Self(1 << 16);
    pub const SET_PATTERN: Self = Self(1 << 17);
    pub const SET_ENUM: Self = Self(1 << 18);
    pub const SET_BIT: Self = Self(1 << 19);
    pub const SET_FRACTION_DIGITS: Self = Self(1 << 20);
    pub const SET_REQUIRE_INSTANCE: Self = Self(1 << 21);
    pub const SET_BASE: Self = Self(1 << 22);
    pub const SET_TYPE: Self = Self(1 << 23);

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for StmtFlags {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for StmtFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for StmtFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StmtFlags({:#x})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_or_and_contains() {
        let mut flags = StmtFlags::NONE;
        flags |= StmtFlags::CONFIG_WRITE;
        flags |= StmtFlags::SET_MIN;
        assert!(flags.contains(StmtFlags::CONFIG_WRITE));
        assert!(flags.contains(StmtFlags::SET_MIN));
        assert!(!flags.contains(StmtFlags::SET_MAX));
        assert!(flags.intersects(StmtFlags::SET_MIN | StmtFlags::SET_MAX));
    }

    #[test]
    fn test_default_is_empty() {
        assert!(StmtFlags::default().is_empty());
    }
}
