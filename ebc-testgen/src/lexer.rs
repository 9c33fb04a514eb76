//! Splits a test-case description into blocks and lines into fields.

use std::iter::{Enumerate, Peekable};
use std::str::Lines;

use crate::error::{Error, Field, Result};

/// One source line with its 1-based line number.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Line<'a> {
    pub number: usize,
    pub text: &'a str,
}

/// A header line followed by zero or more operand lines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block<'a> {
    pub header: Line<'a>,
    pub operands: Vec<Line<'a>>,
}

impl Block<'_> {
    pub fn first_line(&self) -> usize {
        self.header.number
    }

    /// The block's source text, lines joined with `\n`.
    pub fn text(&self) -> String {
        let mut out = String::from(self.header.text);
        for line in &self.operands {
            out.push('\n');
            out.push_str(line.text);
        }
        out
    }
}

/// Iterator over the blocks of a document. Blocks are separated by one or
/// more whitespace-only lines; `\r\n` line endings are accepted.
pub struct Blocks<'a> {
    lines: Peekable<Enumerate<Lines<'a>>>,
}

impl<'a> Blocks<'a> {
    pub fn new(document: &'a str) -> Self {
        Self {
            lines: document.lines().enumerate().peekable(),
        }
    }
}

impl<'a> Iterator for Blocks<'a> {
    type Item = Block<'a>;

    fn next(&mut self) -> Option<Block<'a>> {
        while self
            .lines
            .next_if(|(_, text)| text.trim().is_empty())
            .is_some()
        {}

        let (idx, text) = self.lines.next()?;
        let header = Line {
            number: idx + 1,
            text,
        };
        let mut operands = Vec::new();
        while let Some((idx, text)) = self.lines.next_if(|(_, text)| !text.trim().is_empty()) {
            operands.push(Line {
                number: idx + 1,
                text,
            });
        }
        Some(Block { header, operands })
    }
}

/// A trimmed field and where it starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub field: Field,
    pub line: usize,
    /// 1-based byte column of the first non-blank character.
    pub column: usize,
}

impl<'a> Token<'a> {
    /// Narrow to `part`, which must be a subslice of `self.text`.
    pub fn slice(&self, part: &'a str, field: Field) -> Token<'a> {
        let offset = (part.as_ptr() as usize).saturating_sub(self.text.as_ptr() as usize);
        debug_assert!(offset + part.len() <= self.text.len());
        let leading = part.len() - part.trim_start().len();
        Token {
            text: part.trim(),
            field,
            line: self.line,
            column: self.column + offset + leading,
        }
    }

    pub fn malformed(&self, reason: impl Into<String>) -> Error {
        Error::MalformedBlock {
            line: self.line,
            column: self.column,
            field: self.field,
            reason: reason.into(),
        }
    }
}

/// Comma-separated field reader over a single line.
pub struct FieldCursor<'a> {
    line: Line<'a>,
    pos: usize,
    done: bool,
}

impl<'a> FieldCursor<'a> {
    pub fn new(line: Line<'a>) -> Self {
        Self {
            line,
            pos: 0,
            done: false,
        }
    }

    /// Take the text up to the next comma (or the end of the line).
    pub fn next_field(&mut self, field: Field) -> Result<Token<'a>> {
        self.ensure_more(field)?;
        let rest = &self.line.text[self.pos..];
        let (end, next_pos) = match rest.find(',') {
            Some(i) => (self.pos + i, self.pos + i + 1),
            None => {
                self.done = true;
                (self.line.text.len(), self.line.text.len())
            }
        };
        let token = self.token(field, self.pos, end);
        self.pos = next_pos;
        Ok(token)
    }

    /// Take everything that is left, commas included.
    pub fn rest(&mut self, field: Field) -> Result<Token<'a>> {
        self.ensure_more(field)?;
        self.done = true;
        let token = self.token(field, self.pos, self.line.text.len());
        self.pos = self.line.text.len();
        Ok(token)
    }

    fn ensure_more(&self, field: Field) -> Result<()> {
        if self.done {
            return Err(Error::MalformedBlock {
                line: self.line.number,
                column: self.line.text.len() + 1,
                field,
                reason: "missing field".to_string(),
            });
        }
        Ok(())
    }

    fn token(&self, field: Field, start: usize, end: usize) -> Token<'a> {
        let raw = &self.line.text[start..end];
        let leading = raw.len() - raw.trim_start().len();
        Token {
            text: raw.trim(),
            field,
            line: self.line.number,
            column: start + leading + 1,
        }
    }
}
