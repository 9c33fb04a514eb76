//! Renders assembled test cases as Rust assertions for the disassembler's
//! test suite.
//!
//! A fragment looks like:
//!
//! ```text
//! assert_eq!(
//!     "MOVnw R1, @R2 (+1, +0)",
//!     dis(
//!         opts,
//!         cur,
//!         &[
//!             &[byte(0, 1, OpCode::MOVnw), 0b00100001][..],
//!             &(36879u16).to_le_bytes()[..],
//!         ].concat()
//!     )
//! );
//! ```
//!
//! `dis`, `byte`, `opts`, `cur` and `OpCode` are provided by the consuming
//! test module.

use std::io::{self, Write};

use crate::assembler::AssembledInstruction;

/// How the instruction bytes are spelled in a fragment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FragmentStyle {
    /// `byte(high, low, OpCode::X)`, the selector literal as written, and
    /// typed integer literals for operands.
    #[default]
    Symbolic,
    /// Precomputed hex byte arrays.
    Raw,
}

/// Render one fragment. Every fragment starts with a newline.
pub fn render(instr: &AssembledInstruction, expected: &str, style: FragmentStyle) -> String {
    let mut out = String::new();
    out.push_str("\nassert_eq!(\n");
    out.push_str(&format!("    {expected:?},\n"));
    out.push_str("    dis(\n        opts,\n        cur,\n        &[\n");

    match style {
        FragmentStyle::Symbolic => {
            out.push_str(&format!(
                "            &[byte({}, {}, OpCode::{}), {}][..],\n",
                instr.flags.high() as u8,
                instr.flags.low() as u8,
                instr.opcode.mnemonic(),
                instr.selector.literal
            ));
            for operand in &instr.operands {
                out.push_str(&format!(
                    "            &({}{}).to_le_bytes()[..],\n",
                    operand.value(),
                    operand.rust_type()
                ));
            }
        }
        FragmentStyle::Raw => {
            let header = [instr.header_byte, instr.selector.value];
            out.push_str(&format!("            &{}[..],\n", byte_array(&header)));
            for bytes in instr.operand_bytes() {
                out.push_str(&format!("            &{}[..],\n", byte_array(&bytes)));
            }
        }
    }

    out.push_str("        ].concat()\n    )\n);\n");
    out
}

/// Render one fragment and write it to `sink`.
pub fn emit<W: Write>(
    sink: &mut W,
    instr: &AssembledInstruction,
    expected: &str,
    style: FragmentStyle,
) -> io::Result<()> {
    sink.write_all(render(instr, expected, style).as_bytes())
}

fn byte_array(bytes: &[u8]) -> String {
    let items: Vec<String> = bytes.iter().map(|b| format!("{b:#04X}")).collect();
    format!("[{}]", items.join(", "))
}

/// Appends fragments to a sink in order, flushing after each one so that
/// fragments already written survive a later failure.
pub struct Emitter<W: Write> {
    sink: W,
    style: FragmentStyle,
    count: usize,
}

impl<W: Write> Emitter<W> {
    pub fn new(sink: W, style: FragmentStyle) -> Self {
        Self {
            sink,
            style,
            count: 0,
        }
    }

    pub fn emit(&mut self, instr: &AssembledInstruction, expected: &str) -> io::Result<()> {
        emit(&mut self.sink, instr, expected, self.style)?;
        self.sink.flush()?;
        self.count += 1;
        Ok(())
    }

    /// Fragments written so far.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn into_inner(self) -> W {
        self.sink
    }
}
