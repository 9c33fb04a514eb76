//! EFI Byte Code opcode definitions, generated from `isa.yaml`.
//!
//! This crate provides the opcode registry and the packing rules for an
//! instruction's first byte (opcode plus two modifier flag bits).

// The bitflags crate is used by `HeaderFlags`
pub use bitflags;

mod header;

pub use header::{HeaderFlags, OPCODE_MASK, header_byte, split_header_byte};

include!(concat!(env!("OUT_DIR"), "/generated.rs"));

use std::fmt;

/// Errors from [`lookup`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// No opcode with this value exists in the table.
    #[error("unknown opcode {0:#04x}")]
    UnknownOpcode(u8),
}

/// Broad instruction family, used for listings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpcodeCategory {
    Arithmetic,
    Comparison,
    ControlFlow,
    Move,
    Stack,
    Indirection,
    System,
}

impl fmt::Display for OpcodeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Arithmetic => "arithmetic",
            Self::Comparison => "comparison",
            Self::ControlFlow => "control-flow",
            Self::Move => "move",
            Self::Stack => "stack",
            Self::Indirection => "indirection",
            Self::System => "system",
        };
        f.write_str(name)
    }
}

/// One row of the opcode table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OpcodeInfo {
    opcode: Opcode,
    mnemonic: &'static str,
    category: OpcodeCategory,
}

impl OpcodeInfo {
    #[inline]
    pub const fn opcode(&self) -> Opcode {
        self.opcode
    }

    /// Mnemonic as spelled by the disassembler's `OpCode` enum (`CMPeq`, `MOVsnw`, ...).
    #[inline]
    pub const fn mnemonic(&self) -> &'static str {
        self.mnemonic
    }

    #[inline]
    pub const fn category(&self) -> OpcodeCategory {
        self.category
    }

    #[inline]
    pub const fn raw(&self) -> u8 {
        self.opcode as u8
    }
}

impl Opcode {
    /// Raw 6-bit opcode value.
    #[inline]
    pub const fn raw(self) -> u8 {
        self as u8
    }

    pub fn info(self) -> &'static OpcodeInfo {
        // Every variant has a row; the table is generated from the same list.
        &OPCODE_TABLE[table_index(self.raw()).unwrap_or_default()]
    }

    pub fn mnemonic(self) -> &'static str {
        self.info().mnemonic()
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

impl TryFrom<u8> for Opcode {
    type Error = RegistryError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        Self::from_raw(raw).ok_or(RegistryError::UnknownOpcode(raw))
    }
}

fn table_index(raw: u8) -> Option<usize> {
    OPCODE_TABLE
        .binary_search_by_key(&raw, |info| info.raw())
        .ok()
}

/// Look up the table row for a raw opcode value.
///
/// ```
/// let info = ebc_isa::lookup(0x0C).unwrap();
/// assert_eq!(info.mnemonic(), "ADD");
/// assert!(ebc_isa::lookup(0x27).is_err());
/// ```
pub fn lookup(raw: u8) -> Result<&'static OpcodeInfo, RegistryError> {
    table_index(raw)
        .map(|i| &OPCODE_TABLE[i])
        .ok_or(RegistryError::UnknownOpcode(raw))
}

/// All opcodes, sorted by raw value.
pub fn opcode_table() -> &'static [OpcodeInfo] {
    &OPCODE_TABLE
}

pub fn opcode_count() -> usize {
    OPCODE_TABLE.len()
}
