//! Turns a parsed test case into instruction bytes.

use ebc_isa::{HeaderFlags, OpcodeInfo, RegistryError, header_byte};

use crate::error::{Error, Result};
use crate::parser::{OperandLine, SelectorLiteral, TestCase};
use crate::width::IntWidth;

/// An operand value bound to the integer type it is encoded as.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedOperand {
    value: i128,
    width: IntWidth,
    signed: bool,
}

impl ResolvedOperand {
    /// Returns `None` if `value` is outside the range of the target type.
    pub fn new(value: i128, width: IntWidth, signed: bool) -> Option<Self> {
        let (min, max) = width.range(signed);
        (min..=max).contains(&value).then_some(Self {
            value,
            width,
            signed,
        })
    }

    #[inline]
    pub fn value(&self) -> i128 {
        self.value
    }

    #[inline]
    pub fn width(&self) -> IntWidth {
        self.width
    }

    #[inline]
    pub fn signed(&self) -> bool {
        self.signed
    }

    /// `u16`, `i64`, ...
    pub fn rust_type(&self) -> &'static str {
        self.width.rust_type(self.signed)
    }

    /// Little-endian two's-complement encoding, `width.byte_count()` bytes long.
    pub fn le_bytes(&self) -> Vec<u8> {
        (self.value as u128).to_le_bytes()[..self.width.byte_count()].to_vec()
    }
}

/// Header byte, selector byte and operand words of one test case.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssembledInstruction {
    pub opcode: &'static OpcodeInfo,
    pub flags: HeaderFlags,
    /// `opcode | flags`, for output that does not use the symbolic form.
    pub header_byte: u8,
    pub selector: SelectorLiteral,
    /// In declaration order, which is the in-memory operand order.
    pub operands: Vec<ResolvedOperand>,
}

impl AssembledInstruction {
    pub fn operand_bytes(&self) -> Vec<Vec<u8>> {
        self.operands.iter().map(ResolvedOperand::le_bytes).collect()
    }

    /// The full instruction: header, selector, then each operand.
    pub fn bytes(&self) -> Vec<u8> {
        let mut out = vec![self.header_byte, self.selector.value];
        for operand in &self.operands {
            out.extend(operand.le_bytes());
        }
        out
    }
}

pub fn assemble(case: &TestCase) -> Result<AssembledInstruction> {
    let header = &case.header;
    let opcode = ebc_isa::lookup(header.opcode).map_err(|e| match e {
        RegistryError::UnknownOpcode(opcode) => Error::UnknownOpcode {
            line: case.line,
            opcode,
        },
    })?;
    let flags = HeaderFlags::from_bits_pair(header.flag_high, header.flag_low);

    let operands = case
        .operands
        .iter()
        .map(resolve_operand)
        .collect::<Result<Vec<_>>>()?;

    log::debug!(
        "line {}: {} high={} low={} selector={} operands={} -> {:?}",
        case.line,
        opcode.mnemonic(),
        flags.high() as u8,
        flags.low() as u8,
        header.selector.literal,
        operands.len(),
        header.expected_text
    );

    Ok(AssembledInstruction {
        opcode,
        flags,
        header_byte: header_byte(opcode.opcode(), flags),
        selector: header.selector.clone(),
        operands,
    })
}

/// Resolve an operand's width and check its value fits.
///
/// Out-of-range values are rejected rather than wrapped.
pub fn resolve_operand(op: &OperandLine) -> Result<ResolvedOperand> {
    let width = IntWidth::from_declared(op.declared_width).ok_or(Error::UnsupportedWidth {
        line: op.line,
        width: op.declared_width,
    })?;
    let value = op.value.value();
    ResolvedOperand::new(value, width, op.signed).ok_or(Error::OperandOutOfRange {
        line: op.line,
        value,
        ty: width.rust_type(op.signed),
    })
}
