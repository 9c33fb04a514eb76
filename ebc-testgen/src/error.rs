use std::fmt;

use thiserror::Error;

/// Field of a test-case line, named in diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Label,
    Opcode,
    FlagHigh,
    FlagLow,
    Selector,
    ExpectedText,
    OperandValue,
    Width,
    Signedness,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Label => "label",
            Self::Opcode => "opcode",
            Self::FlagHigh => "high flag",
            Self::FlagLow => "low flag",
            Self::Selector => "selector byte",
            Self::ExpectedText => "expected text",
            Self::OperandValue => "operand value",
            Self::Width => "width",
            Self::Signedness => "signedness",
        };
        f.write_str(name)
    }
}

/// A failure in one test-case block. Every kind is fatal to the run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("line {line}, column {column}: malformed {field}: {reason}")]
    MalformedBlock {
        line: usize,
        column: usize,
        field: Field,
        reason: String,
    },

    #[error("line {line}: unknown opcode {opcode:#04x}")]
    UnknownOpcode { line: usize, opcode: u8 },

    #[error("line {line}: unsupported operand width {width} (expected one of 2, 4, 8, 16, 32, 64)")]
    UnsupportedWidth { line: usize, width: u32 },

    #[error("line {line}: value {value} does not fit in {ty}")]
    OperandOutOfRange {
        line: usize,
        value: i128,
        /// Target integer type, e.g. `u16`.
        ty: &'static str,
    },
}

impl Error {
    /// Line of the test-case description the error points at.
    pub fn line(&self) -> usize {
        match self {
            Self::MalformedBlock { line, .. }
            | Self::UnknownOpcode { line, .. }
            | Self::UnsupportedWidth { line, .. }
            | Self::OperandOutOfRange { line, .. } => *line,
        }
    }
}

/// A block that failed, with its source text for the report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{source}\n--- offending block ---\n{text}")]
pub struct BlockError {
    /// Line of the block's header.
    pub first_line: usize,
    pub text: String,
    pub source: Error,
}

/// Errors from [`generate`](crate::generate).
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Block(#[from] BlockError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
