
#[cfg(feature = "internal-no-panic")]
use no_panic::no_panic;

use crate::tables::{index_adjust, step_size, MAX_STEP_INDEX};
use crate::Error;

/// Number of bits in each delta code.
///
/// The code size is selected once per sound data record by its first two bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodeSize {
    Bits2,
    Bits3,
    Bits4,
    Bits5,
}

impl CodeSize {
    /// Converts the 2-bit code size selector from the start of a sound data record.
    ///
    /// Returns `Error::Unsupported` for selector values above 3.
    pub fn from_selector(selector: u8) -> Result<CodeSize, Error> {
        match selector {
            0 => Ok(CodeSize::Bits2),
            1 => Ok(CodeSize::Bits3),
            2 => Ok(CodeSize::Bits4),
            3 => Ok(CodeSize::Bits5),
            _ => Err(Error::Unsupported("ADPCM code size selector")),
        }
    }

    /// Returns the number of bits per delta code (2, 3, 4 or 5).
    #[inline(always)]
    pub fn bits(self) -> u32 {
        match self {
            CodeSize::Bits2 => 2,
            CodeSize::Bits3 => 3,
            CodeSize::Bits4 => 4,
            CodeSize::Bits5 => 5,
        }
    }

    #[inline(always)]
    fn mask(self) -> u8 {
        match self {
            CodeSize::Bits2 => 0x03,
            CodeSize::Bits3 => 0x07,
            CodeSize::Bits4 => 0x0f,
            CodeSize::Bits5 => 0x1f,
        }
    }
}

/// Decoder state: the running sample value and the quantizer step index.
///
/// A packet header seeds both values and every decoded delta code updates them.
#[derive(Debug, Clone, PartialEq)]
pub struct Predictor {
    pub sample: i16,
    pub index: u8,
}

impl Predictor {
    /// Creates a predictor seeded from a packet header.
    pub fn new(sample: i16, index: u8) -> Predictor {
        Predictor {
            sample,
            index,
        }
    }

    /// Decodes one delta code to a linear 16-bit signed integer sample value.
    ///
    /// Only the lowest `code_size.bits()` bits of `code` are used. The top bit of the code is
    /// the sign and the remaining bits are the magnitude. This method updates the sample and
    /// the step index and returns the new sample.
    #[cfg_attr(feature = "internal-no-panic", no_panic)]
    #[inline(always)]
    pub fn decode(&mut self, code: u8, code_size: CodeSize) -> i16 {
        let bits = code_size.bits();
        let code = code & code_size.mask();
        self.index = self.index.min(MAX_STEP_INDEX); // validate index

        // the lowest contribution is always added, each magnitude bit doubles its share
        let step = step_size(self.index);
        let mut diff = step >> (bits - 1);
        for bit in 0..bits - 1 {
            if (code & (1 << bit)) != 0 {
                diff += step >> (bits - 2 - bit);
            }
        }
        let mut sample = i32::from(self.sample);
        if (code & (1 << (bits - 1))) != 0 {
            sample -= diff;
        } else {
            sample += diff;
        }
        #[allow(clippy::cast_possible_truncation)] // value is clamped so truncation never happens
        {
        self.sample = sample.clamp(-32768, 32767) as i16;
        }
        // adjust step index, clamped to 0..=88
        self.index = self.index
            .saturating_add_signed(index_adjust(code_size, code))
            .min(MAX_STEP_INDEX);
        self.sample
    }
}
