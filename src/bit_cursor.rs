
use core::fmt;

use crate::FormatError;

/// A bit-granular position in a byte buffer.
///
/// `bit` counts from the most-significant bit of `byte` and is always in the range 0..8.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct BitPosition {
    pub byte: usize,
    pub bit: u32,
}

impl BitPosition {
    /// Returns the position as a number of bits from the start of the buffer.
    pub fn bit_index(&self) -> u64 {
        self.byte as u64 * 8 + u64::from(self.bit)
    }
}

impl fmt::Display for BitPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "byte {} bit {}", self.byte, self.bit)
    }
}

/// `BitCursor` reads unsigned integers of any width up to 32 bits from a byte buffer,
/// most-significant bit first.
///
/// Reads may start and end anywhere inside a byte. The cursor only moves forward.
#[derive(Debug, Clone)]
pub struct BitCursor<'a> {
    buf: &'a [u8],
    byte: usize,
    bit: u32,
}

impl<'a> BitCursor<'a> {
    /// Creates a cursor at the first bit of `buf`.
    pub fn new(buf: &'a [u8]) -> Self {
        BitCursor {
            buf,
            byte: 0,
            bit: 0,
        }
    }

    /// Returns the current position.
    pub fn position(&self) -> BitPosition {
        BitPosition { byte: self.byte, bit: self.bit }
    }

    /// Returns the number of unread bits before the end of the buffer.
    pub fn remaining_bits(&self) -> u64 {
        let remaining_bytes = self.buf.len().saturating_sub(self.byte) as u64;
        (remaining_bytes * 8).saturating_sub(u64::from(self.bit))
    }

    /// Reads `num_bits` bits (at most 32) as an unsigned integer.
    ///
    /// If fewer than `num_bits` bits remain, `FormatError::InsufficientBits` is returned and
    /// the position is left unchanged.
    #[inline]
    pub fn read_unsigned(&mut self, num_bits: u32) -> Result<u32, FormatError> {
        debug_assert!(num_bits <= u32::BITS);

        if u64::from(num_bits) > self.remaining_bits() {
            return Err(FormatError::InsufficientBits {
                position: self.position(),
                requested: num_bits,
            });
        }
        let mut value = 0u32;
        let mut bits_needed = num_bits;
        while bits_needed > 0 {
            let Some(&byte) = self.buf.get(self.byte) else {
                return Err(FormatError::InsufficientBits {
                    position: self.position(),
                    requested: bits_needed,
                });
            };
            let available = 8 - self.bit;
            let take = available.min(bits_needed);
            let bits = (u32::from(byte) >> (available - take)) & ((1u32 << take) - 1);
            value = (value << take) | bits;
            bits_needed -= take;
            self.bit += take;
            if self.bit == 8 {
                self.bit = 0;
                self.byte += 1;
            }
        }
        Ok(value)
    }

    /// Reads 16 bits as a two's complement signed integer.
    #[inline]
    pub fn read_signed16(&mut self) -> Result<i16, FormatError> {
        let bytes = self.read_unsigned(16)?.to_be_bytes();
        Ok(i16::from_be_bytes([ bytes[2], bytes[3] ]))
    }
}
