
#[cfg(feature = "std")]
use std::io::Write;

use crate::Error;

/// `SampleSink` receives decoded blocks in decode order.
pub trait SampleSink {
    /// Writes all samples of a block, or returns an error.
    ///
    /// Blocks accepted by earlier calls stay written even if a later call fails.
    fn write_block(&mut self, samples: &[i16]) -> Result<(), Error>;
}

impl<S: SampleSink + ?Sized> SampleSink for &mut S {
    fn write_block(&mut self, samples: &[i16]) -> Result<(), Error> {
        (**self).write_block(samples)
    }
}

/// Writes samples to a caller-provided buffer.
///
/// A block which doesn't fit in the remaining space returns `Error::InvalidBufferSize` and
/// none of its samples are written.
#[derive(Debug)]
pub struct SliceSink<'a> {
    out: &'a mut [i16],
    len: usize,
}

impl<'a> SliceSink<'a> {
    pub fn new(out: &'a mut [i16]) -> Self {
        SliceSink {
            out,
            len: 0,
        }
    }

    /// Returns the number of samples written.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the samples written so far.
    pub fn samples(&self) -> &[i16] {
        &self.out[..self.len]
    }
}

impl SampleSink for SliceSink<'_> {
    fn write_block(&mut self, samples: &[i16]) -> Result<(), Error> {
        let end = self.len.checked_add(samples.len()).ok_or(Error::InvalidBufferSize)?;
        let out = self.out.get_mut(self.len..end).ok_or(Error::InvalidBufferSize)?;
        out.copy_from_slice(samples);
        self.len = end;
        Ok(())
    }
}

#[cfg(feature = "std")]
impl SampleSink for Vec<i16> {
    fn write_block(&mut self, samples: &[i16]) -> Result<(), Error> {
        self.extend_from_slice(samples);
        Ok(())
    }
}

/// Writes samples as raw 16-bit signed little-endian PCM.
///
/// Each block is converted to bytes first and passed to the writer with a single `write_all`
/// call, so a sample is never split between two writes.
#[cfg(feature = "std")]
#[derive(Debug)]
pub struct PcmWriter<W: Write> {
    writer: W,
    buf: Vec<u8>,
}

#[cfg(feature = "std")]
impl<W: Write> PcmWriter<W> {
    pub fn new(writer: W) -> Self {
        PcmWriter {
            writer,
            buf: Vec::with_capacity(2 * crate::BLOCK_LEN),
        }
    }

    /// Flushes the underlying writer.
    pub fn flush(&mut self) -> Result<(), Error> {
        self.writer.flush()?;
        Ok(())
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(feature = "std")]
impl<W: Write> SampleSink for PcmWriter<W> {
    fn write_block(&mut self, samples: &[i16]) -> Result<(), Error> {
        self.buf.clear();
        for sample in samples {
            self.buf.extend_from_slice(&sample.to_le_bytes());
        }
        self.writer.write_all(&self.buf)?;
        Ok(())
    }
}
