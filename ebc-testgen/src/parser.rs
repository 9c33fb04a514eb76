//! Test-case description parser.
//!
//! ```text
//! <label>, <opcode>, <high:True|False>, <low:True|False>, (<..>, <selector>) $ <expected text>
//! <label>, <NATIND16|NATIND32|NATIND64|integer>, <width>, signed=<True|False>
//! ```
//!
//! Blocks are separated by blank lines. The parser is purely syntactic:
//! opcode and width validity are checked by the assembler.

use crate::error::{BlockError, Field, Result};
use crate::lexer::{Block, Blocks, FieldCursor, Line, Token};
use crate::symbols::OperandValue;

/// The selector byte as written in the description.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectorLiteral {
    pub value: u8,
    /// Rust integer literal reproducing the source digits, e.g. `0b00010001`
    /// or `0x5A`.
    pub literal: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestCaseHeader {
    pub opcode: u8,
    pub flag_high: bool,
    pub flag_low: bool,
    pub selector: SelectorLiteral,
    pub expected_text: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OperandLine {
    pub line: usize,
    pub value: OperandValue,
    /// Width as written, in bytes or bits.
    pub declared_width: u32,
    pub signed: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestCase {
    /// Line of the header.
    pub line: usize,
    pub header: TestCaseHeader,
    pub operands: Vec<OperandLine>,
}

/// Parse a whole document, stopping at the first malformed block.
pub fn parse(document: &str) -> std::result::Result<Vec<TestCase>, BlockError> {
    blocks(document).collect()
}

/// Lazily parse a document block by block.
pub fn blocks(
    document: &str,
) -> impl Iterator<Item = std::result::Result<TestCase, BlockError>> + '_ {
    Blocks::new(document).map(|block| {
        parse_block(&block).map_err(|source| BlockError {
            first_line: block.first_line(),
            text: block.text(),
            source,
        })
    })
}

pub fn parse_block(block: &Block<'_>) -> Result<TestCase> {
    let header = parse_header(block.header)?;
    let operands = block
        .operands
        .iter()
        .map(|line| parse_operand(*line))
        .collect::<Result<Vec<_>>>()?;

    Ok(TestCase {
        line: block.first_line(),
        header,
        operands,
    })
}

pub fn parse_header(line: Line<'_>) -> Result<TestCaseHeader> {
    let mut fields = FieldCursor::new(line);
    let _label = fields.next_field(Field::Label)?;
    let opcode = parse_opcode(fields.next_field(Field::Opcode)?)?;
    let flag_high = parse_bool(fields.next_field(Field::FlagHigh)?)?;
    let flag_low = parse_bool(fields.next_field(Field::FlagLow)?)?;

    let tail = fields.rest(Field::Selector)?;
    let Some(dollar) = tail.text.find('$') else {
        return Err(tail.malformed("missing `$` before the expected text"));
    };
    let expected = tail.slice(&tail.text[dollar + 1..], Field::ExpectedText);
    if expected.text.is_empty() {
        return Err(expected.malformed("expected text is empty"));
    }
    let selector = parse_selector(tail.slice(&tail.text[..dollar], Field::Selector))?;

    Ok(TestCaseHeader {
        opcode,
        flag_high,
        flag_low,
        selector,
        expected_text: expected.text.to_string(),
    })
}

pub fn parse_operand(line: Line<'_>) -> Result<OperandLine> {
    let mut fields = FieldCursor::new(line);
    let _label = fields.next_field(Field::Label)?;

    let value_tok = fields.next_field(Field::OperandValue)?;
    let value = OperandValue::parse(value_tok.text).ok_or_else(|| {
        value_tok.malformed(format!(
            "`{}` is neither NATIND16/NATIND32/NATIND64 nor an integer",
            value_tok.text
        ))
    })?;

    let width_tok = fields.next_field(Field::Width)?;
    let declared_width = width_tok
        .text
        .parse::<u32>()
        .map_err(|_| width_tok.malformed(format!("`{}` is not an integer", width_tok.text)))?;

    let signed = parse_signedness(fields.rest(Field::Signedness)?)?;

    Ok(OperandLine {
        line: line.number,
        value,
        declared_width,
        signed,
    })
}

fn parse_opcode(tok: Token<'_>) -> Result<u8> {
    let digits = tok
        .text
        .strip_prefix("0x")
        .or_else(|| tok.text.strip_prefix("0X"))
        .ok_or_else(|| tok.malformed(format!("`{}` is not a 0x-prefixed hex literal", tok.text)))?;
    if digits.is_empty() || digits.len() > 2 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(tok.malformed(format!("`{}` is not a single hex byte", tok.text)));
    }
    u8::from_str_radix(digits, 16)
        .map_err(|_| tok.malformed(format!("`{}` is not a hex literal", tok.text)))
}

fn parse_bool(tok: Token<'_>) -> Result<bool> {
    match tok.text {
        "True" => Ok(true),
        "False" => Ok(false),
        other => Err(tok.malformed(format!("expected `True` or `False`, found `{other}`"))),
    }
}

/// `signed=True` / `signed=False`, spaces allowed around `=`.
fn parse_signedness(tok: Token<'_>) -> Result<bool> {
    let value = tok
        .text
        .strip_prefix("signed")
        .map(str::trim_start)
        .and_then(|s| s.strip_prefix('='))
        .map(str::trim);
    match value {
        Some("True") => Ok(true),
        Some("False") => Ok(false),
        _ => Err(tok.malformed(format!(
            "expected `signed=True` or `signed=False`, found `{}`",
            tok.text
        ))),
    }
}

/// The text before `$` must contain `)`. The selector is the last
/// comma-separated item before it, e.g. `0b00010001)` or `(ADD, 5A)`.
fn parse_selector(tok: Token<'_>) -> Result<SelectorLiteral> {
    let Some(paren) = tok.text.find(')') else {
        return Err(tok.malformed("missing `)` after the selector byte"));
    };
    let inner = tok.text[..paren].trim();
    let inner = inner.strip_prefix('(').unwrap_or(inner);
    let last = inner.rsplit(',').next().unwrap_or(inner);
    let sel = tok.slice(last, Field::Selector);
    let text = sel.text;

    let bad = || {
        sel.malformed(format!(
            "`{text}` is not a byte literal (0b + up to 8 binary digits, 0x + up to 2 hex digits, or 2 hex digits)"
        ))
    };

    let binary = text
        .strip_prefix("0b")
        .or_else(|| text.strip_prefix("0B"))
        .filter(|d| !d.is_empty());
    if let Some(digits) = binary {
        if digits.len() > 8 || !digits.chars().all(|c| c == '0' || c == '1') {
            return Err(bad());
        }
        let value = u8::from_str_radix(digits, 2).map_err(|_| bad())?;
        return Ok(SelectorLiteral {
            value,
            literal: format!("0b{digits}"),
        });
    }

    let hex = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(digits) if (1..=2).contains(&digits.len()) => digits,
        Some(_) => return Err(bad()),
        None if text.len() == 2 => text,
        None => return Err(bad()),
    };
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(bad());
    }
    let value = u8::from_str_radix(hex, 16).map_err(|_| bad())?;
    Ok(SelectorLiteral {
        value,
        literal: format!("0x{hex}"),
    })
}
