//!
//! This crate decodes ADPCM compressed sound data as stored in SWF (Flash) files to
//! linear 16-bit PCM samples.
//!
//! A sound data record starts with a 2-bit code size selector (2, 3, 4 or 5 bits per sample)
//! followed by packets. Each packet has a 22-bit header (a 16-bit initial sample and a 6-bit
//! step index) and up to 4095 delta codes. Packets are packed back to back without
//! byte alignment.
//!
//! The decoder is `no_std` and doesn't allocate. The `std` feature (enabled by default)
//! adds `std::io` based sample sinks.
//!
//! ```
//! use swf_adpcm::{decode_adpcm_swf, DecoderOptions};
//!
//! // 4-bit codes, initial sample 0x1234, step index 20, delta codes 0x8 and 0x0
//! let record = [ 0x84, 0x8d, 0x14, 0x80 ];
//! let mut samples: Vec<i16> = Vec::new();
//! let summary = decode_adpcm_swf(&record, &DecoderOptions::default(), &mut samples).unwrap();
//! assert_eq!(summary.samples, 3);
//! assert_eq!(samples, [ 4660, 4654, 4659 ]);
//! ```
//!

#![cfg_attr(not(any(feature = "std", test)), no_std)]

#![forbid(
    unsafe_code,
    clippy::panic,
    clippy::exit,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::unimplemented,
    clippy::todo,
    clippy::unreachable,
)]
#![deny(
    clippy::cast_ptr_alignment,
    clippy::char_lit_as_u8,
    clippy::unnecessary_cast,
    clippy::cast_lossless,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::checked_conversions,
)]
#![allow(clippy::manual_range_contains)]

use core::fmt;

mod tables;
pub use tables::{index_adjust, step_size, MAX_STEP_INDEX};

mod predictor;
pub use predictor::{CodeSize, Predictor};

mod bit_cursor;
pub use bit_cursor::{BitCursor, BitPosition};

mod framer;
pub use framer::{decode_adpcm_swf, Channels, DecodeSummary, DecoderOptions, PacketFramer};
pub use framer::{BLOCK_LEN, HEADER_BITS};

mod sink;
pub use sink::{SampleSink, SliceSink};
#[cfg(feature = "std")]
pub use sink::PcmWriter;

/// Malformed sound data. Each value carries the position where the problem was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatError {
    /// A read needed more bits than remain in the buffer.
    InsufficientBits { position: BitPosition, requested: u32 },

    /// A packet header was expected but the buffer ends before it is complete.
    TruncatedHeader { position: BitPosition, available: u64 },

    /// A packet header has a step index above 88.
    InvalidIndex { position: BitPosition, index: u8 },
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            FormatError::InsufficientBits { position, requested } => {
                write!(f, "unexpected end of data at {}: {} bits requested", position, requested)
            }
            FormatError::TruncatedHeader { position, available } => {
                write!(f, "truncated packet header at {}: {} of {} bits available",
                    position, available, HEADER_BITS)
            }
            FormatError::InvalidIndex { position, index } => {
                write!(f, "invalid step index {} in packet header at {}", index, position)
            }
        }
    }
}

/// Error values.
#[derive(Debug)]
pub enum Error {
    /// The sound data is malformed.
    Format(FormatError),

    /// The sound data uses a feature which isn't supported.
    Unsupported(&'static str),

    /// Buffer has an invalid size.
    InvalidBufferSize,

    /// Writing decoded samples failed.
    #[cfg(feature = "std")]
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Error::Format(ref err) => err.fmt(f),
            Error::Unsupported(what) => write!(f, "unsupported feature: {}", what),
            Error::InvalidBufferSize => f.write_str("output buffer is too small for the block"),
            #[cfg(feature = "std")]
            Error::Io(ref err) => err.fmt(f),
        }
    }
}

impl From<FormatError> for Error {
    fn from(err: FormatError) -> Error {
        Error::Format(err)
    }
}

#[cfg(feature = "std")]
impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FormatError {}

#[cfg(feature = "std")]
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Error::Format(ref err) => Some(err),
            Error::Io(ref err) => Some(err),
            _ => None,
        }
    }
}
