//! Named operand values.
//!
//! The natural-index sentinels are fixed, externally defined encodings of a
//! maximal natural index at each width. Any other operand token is an
//! integer literal.

use std::fmt;

pub static NATURAL_INDEX_SENTINELS: [(&str, u64); 3] = [
    ("NATIND16", 36879),
    ("NATIND32", 2954019116),
    ("NATIND64", 11529215048034579760),
];

/// Look up a sentinel by exact name.
pub fn resolve(name: &str) -> Option<u64> {
    NATURAL_INDEX_SENTINELS
        .iter()
        .find(|(sym, _)| *sym == name)
        .map(|(_, value)| *value)
}

/// The value of an operand line, before width resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OperandValue {
    Symbol { name: &'static str, value: u64 },
    Literal(i128),
}

impl OperandValue {
    /// Resolve a token: sentinel names first, then an integer literal.
    ///
    /// Literals may be decimal, `0x` hex or `0b` binary, with an optional
    /// leading `-` and `_` separators. Returns `None` if the token is neither.
    pub fn parse(token: &str) -> Option<Self> {
        if let Some((name, value)) = NATURAL_INDEX_SENTINELS
            .iter()
            .find(|(sym, _)| *sym == token)
        {
            return Some(Self::Symbol {
                name: *name,
                value: *value,
            });
        }
        parse_int_literal(token).map(Self::Literal)
    }

    pub fn value(&self) -> i128 {
        match self {
            Self::Symbol { value, .. } => *value as i128,
            Self::Literal(value) => *value,
        }
    }
}

impl fmt::Display for OperandValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Symbol { name, value } => write!(f, "{name} ({value})"),
            Self::Literal(value) => write!(f, "{value}"),
        }
    }
}

fn parse_int_literal(token: &str) -> Option<i128> {
    let (negative, body) = match token.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, token),
    };

    let hex = body.strip_prefix("0x").or_else(|| body.strip_prefix("0X"));
    let bin = body.strip_prefix("0b").or_else(|| body.strip_prefix("0B"));
    let (radix, digits) = match (hex, bin) {
        (Some(d), _) => (16, d),
        (_, Some(d)) => (2, d),
        _ => (10, body),
    };

    // `_` separators are allowed between digits, not as the first character.
    if digits.is_empty() || digits.starts_with('_') {
        return None;
    }
    let cleaned: String = digits.chars().filter(|&c| c != '_').collect();
    if cleaned.is_empty() || !cleaned.chars().all(|c| c.is_digit(radix)) {
        return None;
    }

    let magnitude = u128::from_str_radix(&cleaned, radix).ok()?;
    if negative {
        0i128.checked_sub_unsigned(magnitude)
    } else {
        i128::try_from(magnitude).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinels() {
        assert_eq!(resolve("NATIND16"), Some(36879));
        assert_eq!(resolve("NATIND32"), Some(2954019116));
        assert_eq!(resolve("NATIND64"), Some(11529215048034579760));
        assert_eq!(resolve("natind16"), None);
        assert_eq!(resolve("NATIND8"), None);
    }

    #[test]
    fn test_parse_literals() {
        assert_eq!(OperandValue::parse("0"), Some(OperandValue::Literal(0)));
        assert_eq!(OperandValue::parse("-5"), Some(OperandValue::Literal(-5)));
        assert_eq!(OperandValue::parse("0x10"), Some(OperandValue::Literal(16)));
        assert_eq!(OperandValue::parse("-0x10"), Some(OperandValue::Literal(-16)));
        assert_eq!(OperandValue::parse("0b101"), Some(OperandValue::Literal(5)));
        assert_eq!(OperandValue::parse("1_000"), Some(OperandValue::Literal(1000)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for token in ["", "-", "0x", "_1", "12a", "NATIND", "1.5", "--1", "0xg"] {
            assert_eq!(OperandValue::parse(token), None, "token {token:?}");
        }
    }

    #[test]
    fn test_parse_symbol() {
        let v = OperandValue::parse("NATIND64").unwrap();
        assert_eq!(v.value(), 11529215048034579760);
        assert!(matches!(v, OperandValue::Symbol { name: "NATIND64", .. }));
    }
}
