
use log::{debug, trace};

use crate::bit_cursor::{BitCursor, BitPosition};
use crate::predictor::{CodeSize, Predictor};
use crate::sink::SampleSink;
use crate::tables::MAX_STEP_INDEX;
use crate::{Error, FormatError};

/// Maximum number of samples in one block: the header sample and up to 4095 decoded samples.
pub const BLOCK_LEN: usize = 4096;

/// Size of a packet header: a 16-bit initial sample and a 6-bit initial step index.
pub const HEADER_BITS: u32 = 22;

const SELECTOR_BITS: u32 = 2;
const INDEX_BITS: u32 = 6;

// after a completed block, fewer bits than this are byte padding rather than a broken header;
// 8 or more bits that can't hold a header are reported as `TruncatedHeader` instead of being
// dropped silently
const PADDING_BITS: u64 = 8;

/// Channel layout of the sound data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Channels {
    #[default]
    Mono,
    /// Stereo packets. Not supported.
    Stereo,
}

/// Options for decoding a sound data record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecoderOptions {
    pub channels: Channels,
}

/// Totals for a decoded sound data record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeSummary {
    /// The code size, or `None` for an empty record.
    pub code_size: Option<CodeSize>,
    pub blocks: usize,
    pub samples: u64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct PacketHeader {
    sample: i16,
    index: u8,
}

impl PacketHeader {
    fn read(cursor: &mut BitCursor<'_>) -> Result<PacketHeader, FormatError> {
        let position = cursor.position();
        let sample = cursor.read_signed16()?;
        let index = cursor.read_unsigned(INDEX_BITS)?.to_le_bytes()[0];
        PacketHeader { sample, index }.validate(position)
    }

    fn validate(self, position: BitPosition) -> Result<PacketHeader, FormatError> {
        if self.index > MAX_STEP_INDEX {
            return Err(FormatError::InvalidIndex { position, index: self.index });
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    AwaitHeader,
    EmitHeaderSample(PacketHeader),
    DecodeBody,
    Done,
    Finished,
    Failed(FormatError),
}

/// `PacketFramer` splits a mono sound data record into blocks of decoded samples.
///
/// Each call to [`PacketFramer::next_block`] reads one packet header, decodes delta codes
/// until the block holds 4096 samples or the data runs out, and returns the block. Packet
/// headers are read from wherever the previous packet ended, which is usually not on a byte
/// boundary.
///
/// The framer stops at the first malformed packet and keeps returning that error.
pub struct PacketFramer<'a> {
    cursor: BitCursor<'a>,
    code_size: Option<CodeSize>,
    predictor: Predictor,
    state: State,
    block: [i16; BLOCK_LEN],
    block_len: usize,
    blocks_emitted: usize,
}

impl<'a> PacketFramer<'a> {
    /// Creates a framer for the sound data record in `buf` and reads its code size selector.
    ///
    /// Stereo sound data isn't supported and returns `Error::Unsupported` without reading
    /// anything. An empty `buf` gives a framer which returns no blocks.
    pub fn new(buf: &'a [u8], options: &DecoderOptions) -> Result<PacketFramer<'a>, Error> {
        if options.channels == Channels::Stereo {
            return Err(Error::Unsupported("stereo ADPCM packets"));
        }
        debug!("sound data size={}", buf.len());

        let mut cursor = BitCursor::new(buf);
        let (code_size, state) = match buf.first() {
            Some(first) => {
                debug!("first byte=0x{:02x}", first);
                let selector = cursor.read_unsigned(SELECTOR_BITS)?.to_le_bytes()[0];
                let code_size = CodeSize::from_selector(selector)?;
                debug!("code size selector={}, bits per code={}", selector, code_size.bits());
                (Some(code_size), State::AwaitHeader)
            }
            None => (None, State::Finished),
        };

        Ok(PacketFramer {
            cursor,
            code_size,
            predictor: Predictor::new(0, 0),
            state,
            block: [0; BLOCK_LEN],
            block_len: 0,
            blocks_emitted: 0,
        })
    }

    /// Returns the code size of the record, or `None` if the record is empty.
    pub fn code_size(&self) -> Option<CodeSize> {
        self.code_size
    }

    /// Returns the number of blocks returned so far.
    pub fn blocks_emitted(&self) -> usize {
        self.blocks_emitted
    }

    /// Returns the position of the next unread bit.
    pub fn position(&self) -> BitPosition {
        self.cursor.position()
    }

    /// Decodes the next block.
    ///
    /// Returns `Ok(None)` once all packets have been decoded. Bits left over at the end of
    /// the data which can't hold another delta code or packet header are ignored.
    pub fn next_block(&mut self) -> Result<Option<&[i16]>, Error> {
        loop {
            match self.state {
                State::AwaitHeader => {
                    self.state = self.await_header();
                }
                State::EmitHeaderSample(header) => {
                    // the header sample is output as is and seeds the predictor
                    self.predictor = Predictor::new(header.sample, header.index);
                    self.block[0] = header.sample;
                    self.block_len = 1;
                    self.state = State::DecodeBody;
                }
                State::DecodeBody => {
                    self.decode_body();
                    self.state = State::Done;
                }
                State::Done => {
                    self.blocks_emitted += 1;
                    trace!("block {}: {} samples, next packet at {}",
                        self.blocks_emitted, self.block_len, self.cursor.position());
                    self.state = State::AwaitHeader;
                    return Ok(Some(&self.block[..self.block_len]));
                }
                State::Finished => return Ok(None),
                State::Failed(err) => return Err(err.into()),
            }
        }
    }

    /// Decodes all remaining blocks and writes them to `sink`.
    ///
    /// `DecodeSummary::blocks` counts every block the framer has returned, while `samples`
    /// counts only the samples written by this call.
    pub fn decode_into<S>(&mut self, sink: &mut S) -> Result<DecodeSummary, Error>
        where S: SampleSink + ?Sized {

        let mut samples = 0u64;
        while let Some(block) = self.next_block()? {
            sink.write_block(block)?;
            samples += block.len() as u64;
        }
        let summary = DecodeSummary {
            code_size: self.code_size,
            blocks: self.blocks_emitted,
            samples,
        };
        debug!("decoded {} blocks, {} samples", summary.blocks, summary.samples);
        Ok(summary)
    }

    fn await_header(&mut self) -> State {
        let available = self.cursor.remaining_bits();
        if available < u64::from(HEADER_BITS) {
            if self.blocks_emitted > 0 && available < PADDING_BITS {
                if available > 0 {
                    debug!("ignoring {} trailing bits at {}", available, self.cursor.position());
                }
                return State::Finished;
            }
            return State::Failed(FormatError::TruncatedHeader {
                position: self.cursor.position(),
                available,
            });
        }
        match PacketHeader::read(&mut self.cursor) {
            Ok(header) => State::EmitHeaderSample(header),
            Err(err) => State::Failed(err),
        }
    }

    fn decode_body(&mut self) {
        let Some(code_size) = self.code_size else {
            return;
        };
        while self.block_len < BLOCK_LEN {
            let code = match self.cursor.read_unsigned(code_size.bits()) {
                Ok(code) => code.to_le_bytes()[0],
                Err(_) => {
                    // fewer bits than one code remain, they are never a new header
                    if self.cursor.remaining_bits() > 0 {
                        debug!("ignoring {} trailing bits at {}",
                            self.cursor.remaining_bits(), self.cursor.position());
                    }
                    break;
                }
            };
            self.block[self.block_len] = self.predictor.decode(code, code_size);
            self.block_len += 1;
        }
    }
}

/// Decodes a whole SWF ADPCM sound data record and writes the samples to `sink`, one block
/// at a time.
///
/// Blocks written to `sink` before an error stay written.
pub fn decode_adpcm_swf<S>(buf: &[u8], options: &DecoderOptions, sink: &mut S)
    -> Result<DecodeSummary, Error>
    where S: SampleSink + ?Sized {

    PacketFramer::new(buf, options)?.decode_into(sink)
}
