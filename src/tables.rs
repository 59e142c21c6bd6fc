
#[cfg(feature = "internal-no-panic")]
use no_panic::no_panic;

use crate::predictor::CodeSize;

/// Largest valid quantizer step index.
pub const MAX_STEP_INDEX: u8 = 88;

// the index adjustment ignores the sign bit, so each table is its positive half repeated

const INDEX_TABLE_2BIT: &[i8; 4] = &[
    -1, 2,
    -1, 2,
];

const INDEX_TABLE_3BIT: &[i8; 8] = &[
    -1, -1, 2, 4,
    -1, -1, 2, 4,
];

const INDEX_TABLE_4BIT: &[i8; 16] = &[
    -1, -1, -1, -1, 2, 4, 6, 8,
    -1, -1, -1, -1, 2, 4, 6, 8,
];

const INDEX_TABLE_5BIT: &[i8; 32] = &[
    -1, -1, -1, -1, -1, -1, -1, -1, 1, 2, 4, 6, 8, 10, 13, 16,
    -1, -1, -1, -1, -1, -1, -1, -1, 1, 2, 4, 6, 8, 10, 13, 16,
];

const STEP_TABLE: &[i16; 89] = &[
    7, 8, 9, 10, 11, 12, 13, 14, 16, 17,
    19, 21, 23, 25, 28, 31, 34, 37, 41, 45,
    50, 55, 60, 66, 73, 80, 88, 97, 107, 118,
    130, 143, 157, 173, 190, 209, 230, 253, 279, 307,
    337, 371, 408, 449, 494, 544, 598, 658, 724, 796,
    876, 963, 1060, 1166, 1282, 1411, 1552, 1707, 1878, 2066,
    2272, 2499, 2749, 3024, 3327, 3660, 4026, 4428, 4871, 5358,
    5894, 6484, 7132, 7845, 8630, 9493, 10442, 11487, 12635, 13899,
    15289, 16818, 18500, 20350, 22385, 24623, 27086, 29794, 32767
];

/// Returns the quantizer step size for `index`. Indexes above 88 are treated as 88.
#[cfg_attr(feature = "internal-no-panic", no_panic)]
#[inline(always)]
pub fn step_size(index: u8) -> i32 {
    i32::from(STEP_TABLE[usize::from(index.min(MAX_STEP_INDEX))])
}

/// Returns the signed step index delta for a delta code of the given size.
///
/// Only the lowest `code_size.bits()` bits of `code` are used.
#[cfg_attr(feature = "internal-no-panic", no_panic)]
#[inline(always)]
pub fn index_adjust(code_size: CodeSize, code: u8) -> i8 {
    let code = usize::from(code);
    match code_size {
        CodeSize::Bits2 => INDEX_TABLE_2BIT[code & 0x03],
        CodeSize::Bits3 => INDEX_TABLE_3BIT[code & 0x07],
        CodeSize::Bits4 => INDEX_TABLE_4BIT[code & 0x0f],
        CodeSize::Bits5 => INDEX_TABLE_5BIT[code & 0x1f],
    }
}
