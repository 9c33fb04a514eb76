use bitflags::bitflags;

use crate::Opcode;

/// Bits of the first instruction byte that hold the opcode.
pub const OPCODE_MASK: u8 = 0x3F;

bitflags! {
    /// Modifier bits packed above the opcode in an instruction's first byte.
    ///
    /// Their meaning depends on the instruction (64-bit operation, immediate
    /// data present, conditional jump, ...); the packing is the same for all.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct HeaderFlags: u8 {
        /// Bit 7.
        const HIGH = 0x80;
        /// Bit 6.
        const LOW = 0x40;
    }
}

impl HeaderFlags {
    pub fn from_bits_pair(high: bool, low: bool) -> Self {
        let mut flags = Self::empty();
        flags.set(Self::HIGH, high);
        flags.set(Self::LOW, low);
        flags
    }

    #[inline]
    pub fn high(self) -> bool {
        self.contains(Self::HIGH)
    }

    #[inline]
    pub fn low(self) -> bool {
        self.contains(Self::LOW)
    }
}

/// Pack an opcode and its two flag bits into the first instruction byte.
#[inline]
pub fn header_byte(opcode: Opcode, flags: HeaderFlags) -> u8 {
    (opcode.raw() & OPCODE_MASK) | flags.bits()
}

/// Split a first instruction byte into its raw opcode and flag bits.
///
/// The raw opcode is not checked against the table; pass it to
/// [`lookup`](crate::lookup) for that.
#[inline]
pub fn split_header_byte(byte: u8) -> (u8, HeaderFlags) {
    (byte & OPCODE_MASK, HeaderFlags::from_bits_truncate(byte))
}
