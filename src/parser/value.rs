//! Value lexing: lexical classes, strict integer literals, dates.
//!
//! Argument values arrive as already-decoded UTF-8; this module enforces the
//! per-class character rules and the bespoke numeric/date grammars of the
//! individual statements.

use std::num::IntErrorKind;

use crate::parser::errors::{ErrorKind, ParseError, Result};

/// The lexical classes an argument value is validated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexicalClass {
    /// A YANG identifier: `[A-Za-z_][A-Za-z0-9_.-]*`.
    Identifier,
    /// An identifier optionally qualified by one `prefix:` part.
    PrefixedIdentifier,
    /// Any run of legal XML characters; the argument is required.
    String,
    /// Any run of legal XML characters; the argument may be absent.
    OptionalString,
}

impl LexicalClass {
    /// Whether absence of the argument is allowed for this class.
    pub fn optional(self) -> bool {
        matches!(self, Self::OptionalString)
    }
}

/// Validate a value against a lexical class.
///
/// Validation is per-codepoint; an empty value passes every class.
pub fn validate_value(class: LexicalClass, value: &str, line: u32) -> Result<()> {
    match class {
        LexicalClass::Identifier => validate_identifier(value, false, line),
        LexicalClass::PrefixedIdentifier => validate_identifier(value, true, line),
        LexicalClass::String | LexicalClass::OptionalString => {
            for c in value.chars() {
                if !is_string_char(c) {
                    return Err(ParseError::new(
                        ErrorKind::InvalidCharacter { ch: c, what: "string argument" },
                        line,
                    ));
                }
            }
            Ok(())
        }
    }
}

/// YANG identifier character partition: first character alphabetic or `_`,
/// subsequent characters alphanumeric or `_`, `-`, `.`; a prefixed
/// identifier additionally allows a single `:` that restarts the
/// first-character rule.
fn validate_identifier(value: &str, prefixed: bool, line: u32) -> Result<()> {
    let mut first = true;
    let mut seen_colon = false;
    for c in value.chars() {
        let ok = if first {
            first = false;
            c.is_ascii_alphabetic() || c == '_'
        } else if c == ':' && prefixed && !seen_colon {
            seen_colon = true;
            first = true;
            true
        } else {
            c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.'
        };
        if !ok {
            return Err(ParseError::new(
                ErrorKind::InvalidCharacter { ch: c, what: "identifier" },
                line,
            ));
        }
    }
    Ok(())
}

/// Legal XML 1.0 character.
fn is_string_char(c: char) -> bool {
    matches!(c,
        '\u{9}' | '\u{A}' | '\u{D}'
        | '\u{20}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}

/// Enum names pass identifier validation but must additionally be non-empty
/// and free of surrounding whitespace.
pub fn check_enum_name(name: &str, line: u32) -> Result<()> {
    if name.is_empty() {
        return Err(ParseError::new(
            ErrorKind::InvalidEnum {
                value: String::new(),
                attr: "name",
                stmt: "enum",
                expected: "a non-empty name",
            },
            line,
        ));
    }
    if name.starts_with(char::is_whitespace) || name.ends_with(char::is_whitespace) {
        return Err(ParseError::new(
            ErrorKind::InvalidCharacter { ch: ' ', what: "enum name" },
            line,
        ));
    }
    Ok(())
}

/// `YYYY-MM-DD` with calendar plausibility (month range, day range per
/// month, leap years).
pub fn check_date(value: &str, stmt: &'static str, line: u32) -> Result<()> {
    let invalid = || {
        ParseError::new(
            ErrorKind::InvalidDate { value: value.to_owned(), stmt },
            line,
        )
    };

    let bytes = value.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return Err(invalid());
    }
    for (i, b) in bytes.iter().enumerate() {
        if i != 4 && i != 7 && !b.is_ascii_digit() {
            return Err(invalid());
        }
    }

    let year: u32 = value[0..4].parse().map_err(|_| invalid())?;
    let month: u32 = value[5..7].parse().map_err(|_| invalid())?;
    let day: u32 = value[8..10].parse().map_err(|_| invalid())?;

    if !(1..=12).contains(&month) || day == 0 {
        return Err(invalid());
    }
    let leap = year % 4 == 0 && (year % 100 != 0 || year % 400 == 0);
    let days_in_month = match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ => {
            if leap {
                29
            } else {
                28
            }
        }
    };
    if day > days_in_month {
        return Err(invalid());
    }
    Ok(())
}

/// `fraction-digits`: non-empty decimal without leading zeros, 1..=18.
pub fn parse_fraction_digits(value: &str, line: u32) -> Result<u8> {
    let stmt = "fraction-digits";
    let first = value.chars().next();
    if value.is_empty() || first == Some('0') || !first.is_some_and(|c| c.is_ascii_digit()) {
        return Err(number_error(value, stmt, line));
    }
    let num: u64 = value
        .parse()
        .map_err(|_| number_error(value, stmt, line))?;
    if num > 18 {
        return Err(ParseError::new(
            ErrorKind::OutOfRange { value: value.to_owned(), stmt },
            line,
        ));
    }
    Ok(num as u8)
}

/// `min-elements`: decimal without leading zeros (`0` itself is fine).
pub fn parse_min_elements(value: &str, line: u32) -> Result<u32> {
    let stmt = "min-elements";
    if value.is_empty() || (value.starts_with('0') && value.len() > 1) {
        return Err(number_error(value, stmt, line));
    }
    parse_u32(value, stmt, line)
}

/// `max-elements`: `unbounded` (returned as 0) or a positive decimal
/// without leading zeros.
pub fn parse_max_elements(value: &str, line: u32) -> Result<u32> {
    let stmt = "max-elements";
    let first = value.chars().next();
    if value.is_empty()
        || first == Some('0')
        || !first.is_some_and(|c| c == 'u' || c.is_ascii_digit())
    {
        return Err(number_error(value, stmt, line));
    }
    if value == "unbounded" {
        return Ok(0);
    }
    parse_u32(value, stmt, line)
}

/// `enum`'s `value`: signed decimal in the 32-bit domain, no leading `+`,
/// no superfluous leading zeros.
pub fn parse_enum_value(value: &str, line: u32) -> Result<i64> {
    let stmt = "value";
    if has_bad_numeric_shape(value) {
        return Err(number_error(value, stmt, line));
    }
    let num: i64 = value.parse().map_err(|e: std::num::ParseIntError| {
        int_error(e, value, stmt, line)
    })?;
    if !(i64::from(i32::MIN)..=i64::from(i32::MAX)).contains(&num) {
        return Err(ParseError::new(
            ErrorKind::OutOfRange { value: value.to_owned(), stmt },
            line,
        ));
    }
    Ok(num)
}

/// `bit`'s `position`: unsigned decimal in the 32-bit domain, no leading
/// `+`, no superfluous leading zeros, `-0` rejected.
pub fn parse_bit_position(value: &str, line: u32) -> Result<i64> {
    let stmt = "position";
    if has_bad_numeric_shape(value) || value == "-0" {
        return Err(number_error(value, stmt, line));
    }
    let num: u64 = value.parse().map_err(|e: std::num::ParseIntError| {
        int_error(e, value, stmt, line)
    })?;
    if num > u64::from(u32::MAX) {
        return Err(ParseError::new(
            ErrorKind::OutOfRange { value: value.to_owned(), stmt },
            line,
        ));
    }
    Ok(num as i64)
}

/// Shared shape rules for enum values and bit positions: empty, a leading
/// `+`, or a leading zero followed by more digits are all rejected.
fn has_bad_numeric_shape(value: &str) -> bool {
    value.is_empty()
        || value.starts_with('+')
        || (value.starts_with('0') && value.len() > 1)
}

fn parse_u32(value: &str, stmt: &'static str, line: u32) -> Result<u32> {
    value
        .parse::<u32>()
        .map_err(|e| int_error(e, value, stmt, line))
}

fn int_error(
    err: std::num::ParseIntError,
    value: &str,
    stmt: &'static str,
    line: u32,
) -> ParseError {
    let kind = match err.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
            ErrorKind::OutOfRange { value: value.to_owned(), stmt }
        }
        _ => ErrorKind::InvalidNumber { value: value.to_owned(), stmt },
    };
    ParseError::new(kind, line)
}

fn number_error(value: &str, stmt: &'static str, line: u32) -> ParseError {
    ParseError::new(
        ErrorKind::InvalidNumber { value: value.to_owned(), stmt },
        line,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_partition() {
        assert!(validate_value(LexicalClass::Identifier, "interface-name", 1).is_ok());
        assert!(validate_value(LexicalClass::Identifier, "_x.y-z9", 1).is_ok());
        assert!(validate_value(LexicalClass::Identifier, "9name", 1).is_err());
        assert!(validate_value(LexicalClass::Identifier, "-name", 1).is_err());
        assert!(validate_value(LexicalClass::Identifier, "na me", 1).is_err());
        assert!(validate_value(LexicalClass::Identifier, "pfx:name", 1).is_err());
    }

    #[test]
    fn test_prefixed_identifier_allows_one_colon() {
        assert!(validate_value(LexicalClass::PrefixedIdentifier, "pfx:name", 1).is_ok());
        assert!(validate_value(LexicalClass::PrefixedIdentifier, "name", 1).is_ok());
        assert!(validate_value(LexicalClass::PrefixedIdentifier, "a:b:c", 1).is_err());
        assert!(validate_value(LexicalClass::PrefixedIdentifier, "pfx:9", 1).is_err());
    }

    #[test]
    fn test_string_class_rejects_control_chars() {
        assert!(validate_value(LexicalClass::String, "a b\tc\nd", 1).is_ok());
        assert!(validate_value(LexicalClass::String, "bad\u{1}char", 1).is_err());
    }

    #[test]
    fn test_empty_value_passes_every_class() {
        for class in [
            LexicalClass::Identifier,
            LexicalClass::PrefixedIdentifier,
            LexicalClass::String,
            LexicalClass::OptionalString,
        ] {
            assert!(validate_value(class, "", 1).is_ok());
        }
    }

    #[test]
    fn test_date_format_and_calendar() {
        assert!(check_date("2020-02-29", "revision", 1).is_ok());
        assert!(check_date("2021-02-29", "revision", 1).is_err());
        assert!(check_date("1900-02-29", "revision", 1).is_err());
        assert!(check_date("2000-02-29", "revision", 1).is_ok());
        assert!(check_date("2020-13-01", "revision", 1).is_err());
        assert!(check_date("2020-00-10", "revision", 1).is_err());
        assert!(check_date("2020-1-01", "revision", 1).is_err());
        assert!(check_date("2020-01-32", "revision", 1).is_err());
        assert!(check_date("20200101", "revision", 1).is_err());
    }

    #[test]
    fn test_fraction_digits_bounds() {
        assert_eq!(parse_fraction_digits("1", 1).unwrap(), 1);
        assert_eq!(parse_fraction_digits("18", 1).unwrap(), 18);
        assert!(parse_fraction_digits("0", 1).is_err());
        assert!(parse_fraction_digits("19", 1).is_err());
        assert!(parse_fraction_digits("01", 1).is_err());
        assert!(parse_fraction_digits("", 1).is_err());
        assert!(parse_fraction_digits("+1", 1).is_err());
    }

    #[test]
    fn test_min_max_elements() {
        assert_eq!(parse_min_elements("0", 1).unwrap(), 0);
        assert_eq!(parse_min_elements("7", 1).unwrap(), 7);
        assert!(parse_min_elements("01", 1).is_err());
        assert!(parse_min_elements("", 1).is_err());
        assert_eq!(parse_max_elements("unbounded", 1).unwrap(), 0);
        assert_eq!(parse_max_elements("4294967295", 1).unwrap(), u32::MAX);
        assert!(parse_max_elements("unboundedX", 1).is_err());
        assert!(parse_max_elements("0", 1).is_err());
        assert!(parse_max_elements("+3", 1).is_err());
    }

    #[test]
    fn test_enum_value_domain() {
        assert_eq!(parse_enum_value("-2147483648", 1).unwrap(), i64::from(i32::MIN));
        assert_eq!(parse_enum_value("2147483647", 1).unwrap(), i64::from(i32::MAX));
        assert!(matches!(
            parse_enum_value("2147483648", 1).unwrap_err().kind,
            ErrorKind::OutOfRange { .. }
        ));
        assert!(parse_enum_value("+1", 1).is_err());
        assert!(parse_enum_value("007", 1).is_err());
        assert_eq!(parse_enum_value("0", 1).unwrap(), 0);
    }

    #[test]
    fn test_bit_position_domain() {
        assert_eq!(parse_bit_position("0", 1).unwrap(), 0);
        assert_eq!(parse_bit_position("4294967295", 1).unwrap(), i64::from(u32::MAX));
        assert!(matches!(
            parse_bit_position("4294967296", 1).unwrap_err().kind,
            ErrorKind::OutOfRange { .. }
        ));
        assert!(parse_bit_position("-0", 1).is_err());
        assert!(parse_bit_position("-1", 1).is_err());
        assert!(parse_bit_position("+0", 1).is_err());
    }
}
