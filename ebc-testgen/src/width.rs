//! Operand width units.
//!
//! A test case may declare an operand's width either as a byte count
//! (`2`, `4`, `8`) or as the matching bit count (`16`, `32`, `64`).

use std::fmt;

/// Byte count ↔ bit count. Each key maps to the other unit, so applying the
/// table twice returns the original key.
pub static WIDTH_TABLE: [(u32, u32); 6] = [(2, 16), (4, 32), (8, 64), (16, 2), (32, 4), (64, 8)];

/// Symmetric lookup: a byte count yields bits, a bit count yields bytes.
///
/// Returns `None` for anything outside the table.
pub fn resolve(declared: u32) -> Option<u32> {
    WIDTH_TABLE
        .iter()
        .find(|(key, _)| *key == declared)
        .map(|(_, other)| *other)
}

/// `2 → 16`, `4 → 32`, `8 → 64`.
pub fn bits_from_byte_count(bytes: u32) -> Option<u32> {
    match bytes {
        2 | 4 | 8 => resolve(bytes),
        _ => None,
    }
}

/// `16 → 2`, `32 → 4`, `64 → 8`.
pub fn byte_count_from_bits(bits: u32) -> Option<u32> {
    match bits {
        16 | 32 | 64 => resolve(bits),
        _ => None,
    }
}

/// Width of the integer type an operand is encoded as.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IntWidth {
    W8,
    W16,
    W32,
    W64,
}

impl IntWidth {
    pub fn from_bits(bits: u32) -> Option<Self> {
        match bits {
            8 => Some(Self::W8),
            16 => Some(Self::W16),
            32 => Some(Self::W32),
            64 => Some(Self::W64),
            _ => None,
        }
    }

    /// Canonicalize a declared width given in either unit.
    ///
    /// `2` and `16` both give [`IntWidth::W16`]; `8` is a byte count and gives
    /// [`IntWidth::W64`].
    pub fn from_declared(declared: u32) -> Option<Self> {
        let bits = match bits_from_byte_count(declared) {
            Some(bits) => bits,
            None => byte_count_from_bits(declared)? * 8,
        };
        Self::from_bits(bits)
    }

    #[inline]
    pub const fn bits(self) -> u32 {
        match self {
            Self::W8 => 8,
            Self::W16 => 16,
            Self::W32 => 32,
            Self::W64 => 64,
        }
    }

    #[inline]
    pub const fn byte_count(self) -> usize {
        (self.bits() / 8) as usize
    }

    /// Rust primitive type name, e.g. `u16` or `i64`.
    pub const fn rust_type(self, signed: bool) -> &'static str {
        match (self, signed) {
            (Self::W8, false) => "u8",
            (Self::W16, false) => "u16",
            (Self::W32, false) => "u32",
            (Self::W64, false) => "u64",
            (Self::W8, true) => "i8",
            (Self::W16, true) => "i16",
            (Self::W32, true) => "i32",
            (Self::W64, true) => "i64",
        }
    }

    /// Inclusive value range of the integer type.
    pub fn range(self, signed: bool) -> (i128, i128) {
        let bits = self.bits();
        if signed {
            (-(1i128 << (bits - 1)), (1i128 << (bits - 1)) - 1)
        } else {
            (0, (1i128 << bits) - 1)
        }
    }
}

impl fmt::Display for IntWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-bit", self.bits())
    }
}
