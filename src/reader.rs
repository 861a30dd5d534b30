//! Consumes an ordered sequence of input sources and yields raw byte
//! blocks, tracking per-source offsets, issuing page-cache advisories, and
//! driving the optional progress callback.

use crate::error::{ProgressError, SplitError};
use crate::source::{advise_dontneed, Source};

/// Lazily pulls fixed-size blocks out of an ordered sequence of sources.
///
/// Mirrors [`std::io::BufRead`]'s `fill_buf`/`consume` shape rather than
/// [`Iterator`]: a block borrows the reader's internal scratch buffer, so
/// callers must copy (or hand it to [`crate::buffer::SlidingBuffer::put`])
/// before requesting the next block.
pub struct ReadIter<I, P> {
    sources: I,
    current: Option<Box<dyn Source>>,
    index: usize,
    pulled_any_source: bool,
    offset: u64,
    last_read: usize,
    advised_upto: u64,
    read_size: usize,
    scratch: Vec<u8>,
    progress: Option<P>,
    errored: bool,
}

impl<I, P> ReadIter<I, P>
where
    I: Iterator<Item = Box<dyn Source>>,
    P: FnMut(usize, usize) -> Result<(), ProgressError>,
{
    /// Creates a reader over `sources`, attempting `read_size`-byte reads,
    /// invoking `progress` before each read attempt.
    pub fn new(sources: I, read_size: usize, progress: Option<P>) -> Self {
        Self {
            sources,
            current: None,
            index: 0,
            pulled_any_source: false,
            offset: 0,
            last_read: 0,
            advised_upto: 0,
            read_size,
            scratch: vec![0u8; read_size],
            progress,
            errored: false,
        }
    }

    /// Pulls the next non-empty byte block, or `None` once every source is
    /// exhausted. Once an error is returned, every subsequent call returns
    /// `None`.
    pub fn next_block(&mut self) -> Option<Result<&[u8], SplitError>> {
        if self.errored {
            return None;
        }

        loop {
            if self.current.is_none() {
                match self.sources.next() {
                    None => return None,
                    Some(src) => {
                        if self.pulled_any_source {
                            self.index += 1;
                        }
                        self.pulled_any_source = true;
                        self.current = Some(src);
                        self.offset = 0;
                        self.last_read = 0;
                        self.advised_upto = 0;
                        tracing::debug!(source = self.index, "starting next source");
                    }
                }
            }

            if let Some(cb) = self.progress.as_mut() {
                tracing::trace!(source = self.index, prev_read = self.last_read, "progress tick");
                if let Err(e) = cb(self.index, self.last_read) {
                    self.errored = true;
                    return Some(Err(SplitError::Progress {
                        index: self.index,
                        source: e,
                    }));
                }
            }

            let src = self.current.as_mut().expect("current source just ensured");
            let read_size = self.read_size;
            let n = match src.read_up_to(&mut self.scratch[..read_size]) {
                Ok(n) => n,
                Err(e) => {
                    self.errored = true;
                    return Some(Err(SplitError::Io {
                        index: self.index,
                        source: e,
                    }));
                }
            };

            if n > read_size {
                self.errored = true;
                return Some(Err(SplitError::OversizedRead {
                    index: self.index,
                    got: n,
                    limit: read_size,
                }));
            }

            if n == 0 {
                if let Some(fd) = src.fileno() {
                    advise_dontneed(fd, self.offset);
                }
                tracing::debug!(source = self.index, bytes = self.offset, "source exhausted");
                self.current = None;
                continue;
            }

            self.offset += n as u64;
            self.last_read = n;

            if let Some(fd) = src.fileno() {
                let read_size = self.read_size as u64;
                if self.offset > read_size {
                    let safe_upto = self.offset - read_size;
                    if safe_upto > self.advised_upto {
                        advise_dontneed(fd, safe_upto);
                        self.advised_upto = safe_upto;
                    }
                }
            }

            tracing::trace!(source = self.index, bytes = n, "read block");
            return Some(Ok(&self.scratch[..n]));
        }
    }
}
