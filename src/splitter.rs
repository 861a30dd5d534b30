//! Drives the rolling-hash split-point detector over the sliding buffer,
//! pulling from [`ReadIter`] on demand, and emits `(bytes, level)` chunks.

use crate::buffer::SlidingBuffer;
use crate::config::Config;
use crate::error::{ProgressError, SplitError};
use crate::reader::ReadIter;
use crate::rolling::scan_for_split;

/// One emitted chunk: an owned byte range and its fan-out level.
///
/// Bytes are returned owned (a `Box<[u8]>`, copied once out of the sliding
/// buffer) rather than as a view that would be invalidated by the next
/// pull — see the "Zero-copy chunk views vs. owned chunks" design note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    data: Box<[u8]>,
    level: u32,
}

impl Chunk {
    /// The chunk's byte range.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the chunk, returning its owned byte range.
    #[must_use]
    pub fn into_bytes(self) -> Box<[u8]> {
        self.data
    }

    /// The fan-out level derived from the split's trailing-bit count, or
    /// `0` if the chunk ended without a detected split.
    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }

    /// Number of bytes in this chunk.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether this chunk is empty. Never true for a chunk actually emitted
    /// by [`SplitIter`]: length is always in `[1, max_chunk]`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Produces the chunk stream by alternating a fill phase (pulling from
/// [`ReadIter`] until the buffer holds at least `max_chunk` bytes or the
/// reader is exhausted) with a scan phase (running the rolling-hash
/// predicate over the buffered prefix).
pub struct SplitIter<I, P> {
    reader: ReadIter<I, P>,
    buffer: SlidingBuffer,
    config: Config,
    reader_exhausted: bool,
    errored: bool,
}

impl<I, P> SplitIter<I, P>
where
    I: Iterator<Item = Box<dyn crate::source::Source>>,
    P: FnMut(usize, usize) -> Result<(), ProgressError>,
{
    /// Builds a splitter over `sources` with `config`'s tunables.
    pub fn new(sources: I, config: Config, progress: Option<P>) -> Self {
        let reader = ReadIter::new(sources, config.read_size(), progress);
        let buffer = SlidingBuffer::with_capacity(config.read_size() + config.max_chunk());
        Self {
            reader,
            buffer,
            config,
            reader_exhausted: false,
            errored: false,
        }
    }

    fn fill(&mut self) -> Result<(), SplitError> {
        while self.buffer.used() < self.config.max_chunk() && !self.reader_exhausted {
            match self.reader.next_block() {
                None => self.reader_exhausted = true,
                Some(Ok(block)) => self.buffer.put(block),
                Some(Err(e)) => return Err(e),
            }
        }
        Ok(())
    }

    /// Pulls the next chunk, or `None` once the pipeline is fully drained.
    pub fn next(&mut self) -> Option<Result<Chunk, SplitError>> {
        if self.errored {
            return None;
        }

        if let Err(e) = self.fill() {
            self.errored = true;
            return Some(Err(e));
        }

        let max_chunk = self.config.max_chunk();
        let view_len = self.buffer.used().min(max_chunk);
        if view_len == 0 {
            return None;
        }

        let base_bits = self.config.base_bits();
        let min_chunk = self.config.min_chunk_size();

        let (chunk_len, level) = {
            let view = self.buffer.peek(view_len);
            let scan_start = min_chunk.min(view_len);
            if scan_start < view_len {
                let result = scan_for_split(&view[scan_start..], base_bits);
                if result.found() {
                    let bits = result.bits as u32;
                    // `fan_bits` is `floor(log2(fanout))`; guard against a
                    // degenerate `fanout == 1` configuration (fan_bits == 0),
                    // which would otherwise divide by zero below.
                    let fan_bits = self.config.fan_bits().max(1);
                    let level = (bits - base_bits) / fan_bits;
                    (scan_start + result.ofs, level)
                } else {
                    (view_len, 0)
                }
            } else {
                (view_len, 0)
            }
        };

        let data: Box<[u8]> = self.buffer.peek(chunk_len).to_vec().into_boxed_slice();
        self.buffer.eat(chunk_len);

        tracing::debug!(len = chunk_len, level, "emitted chunk");

        Some(Ok(Chunk { data, level }))
    }
}

/// Thin adapter over [`SplitIter`] implementing [`Iterator`], so external
/// consumers see one lazy sequence of chunks.
pub struct HashSplitIter<I, P> {
    inner: SplitIter<I, P>,
}

impl<I, P> HashSplitIter<I, P>
where
    I: Iterator<Item = Box<dyn crate::source::Source>>,
    P: FnMut(usize, usize) -> Result<(), ProgressError>,
{
    pub(crate) fn new(sources: I, config: Config, progress: Option<P>) -> Self {
        Self {
            inner: SplitIter::new(sources, config, progress),
        }
    }
}

impl<I, P> Iterator for HashSplitIter<I, P>
where
    I: Iterator<Item = Box<dyn crate::source::Source>>,
    P: FnMut(usize, usize) -> Result<(), ProgressError>,
{
    type Item = Result<Chunk, SplitError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}
