//! Expands compact EFI Byte Code test-case descriptions into disassembler
//! test assertions.
//!
//! Each blank-line separated block names an opcode, its two header flag bits,
//! a selector byte and the text the disassembler should print, followed by the
//! instruction's trailing operands. The pipeline is text → [`parser`] →
//! [`assembler`] → [`emitter`], one block at a time.

pub mod assembler;
pub mod emitter;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod symbols;
pub mod width;

use std::io::Write;

pub use assembler::{AssembledInstruction, ResolvedOperand, assemble};
pub use emitter::{Emitter, FragmentStyle, emit, render};
pub use error::{BlockError, Error, Field, GenerateError};
pub use parser::{TestCase, parse};

#[derive(Clone, Copy, Debug, Default)]
pub struct GenerateOptions {
    pub style: FragmentStyle,
}

/// Totals for a completed run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub fragments: usize,
    pub operands: usize,
}

/// Parse, assemble and emit every block of `document` into `sink`.
///
/// Stops at the first failing block. Fragments for earlier blocks have
/// already been written and flushed at that point.
pub fn generate<W: Write>(
    document: &str,
    sink: W,
    options: &GenerateOptions,
) -> Result<Summary, GenerateError> {
    let mut emitter = Emitter::new(sink, options.style);
    let mut summary = Summary::default();

    for case in parser::blocks(document) {
        let case = case?;
        let instr = assemble_case(&case, document)?;
        emitter.emit(&instr, &case.header.expected_text)?;
        summary.fragments += 1;
        summary.operands += instr.operands.len();
    }

    log::info!(
        "emitted {} fragments ({} operands)",
        summary.fragments,
        summary.operands
    );
    Ok(summary)
}

/// Parse and assemble every block without writing anything.
pub fn check(document: &str) -> Result<Summary, BlockError> {
    let mut summary = Summary::default();
    for case in parser::blocks(document) {
        let case = case?;
        let instr = assemble_case(&case, document)?;
        summary.fragments += 1;
        summary.operands += instr.operands.len();
    }
    Ok(summary)
}

fn assemble_case(case: &TestCase, document: &str) -> Result<AssembledInstruction, BlockError> {
    assemble(case).map_err(|source| BlockError {
        first_line: case.line,
        text: block_text(document, case),
        source,
    })
}

/// Source lines of an already-parsed block.
fn block_text(document: &str, case: &TestCase) -> String {
    document
        .lines()
        .skip(case.line - 1)
        .take(case.operands.len() + 1)
        .collect::<Vec<_>>()
        .join("\n")
}
