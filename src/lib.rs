//! Content-defined chunking core for a deduplicating backup system.
//!
//! Given an ordered sequence of input byte streams, [`hash_split`] produces
//! a lazy sequence of [`Chunk`]s — variable-length byte ranges selected at
//! boundaries determined by a rolling checksum of the data itself, along
//! with a fan-out `level` derived from the number of trailing one-bits in
//! the boundary checksum.
//!
//! The pipeline is pull-driven and composed of three pieces, each in its
//! own module:
//!
//! * [`reader`] — [`reader::ReadIter`] turns an ordered sequence of
//!   [`source::Source`]s into a lazy sequence of byte blocks.
//! * [`buffer`] — [`buffer::SlidingBuffer`] is the byte queue between the
//!   reader and the splitter.
//! * [`splitter`] — [`splitter::SplitIter`] drives the rolling-hash kernel
//!   ([`rolling`]) over the buffer and emits chunks; [`HashSplitIter`] is
//!   the public, `Iterator`-implementing wrapper around it.
//!
//! Storage of chunks, assembly of a hash tree over them, content hashing,
//! and file discovery are all external collaborators — this crate only
//! produces the chunk boundaries.
//!
//! # Example
//!
//! ```
//! use blobsplit::{hash_split, Config};
//! use blobsplit::source::GenericSource;
//! use std::io::Cursor;
//!
//! let sources: Vec<Box<dyn blobsplit::source::Source>> = vec![
//!     Box::new(GenericSource::new(Cursor::new(b"hello world".to_vec()))),
//! ];
//!
//! for chunk in hash_split(sources, Config::default()) {
//!     let chunk = chunk.expect("no io error on an in-memory source");
//!     println!("{} bytes at level {}", chunk.len(), chunk.level());
//! }
//! ```

pub mod buffer;
pub mod config;
pub mod error;
pub mod reader;
pub mod rolling;
pub mod source;
pub mod splitter;

pub use config::Config;
pub use error::{ProgressError, SplitError};
pub use rolling::{Bup, RollingHash};
pub use splitter::{Chunk, HashSplitIter};

/// Builds a chunking pipeline over `sources` with no progress callback.
///
/// `sources` is consumed lazily: it may be any `IntoIterator` yielding
/// boxed [`source::Source`] trait objects, so a single pipeline can mix
/// file-backed and in-memory sources.
pub fn hash_split<S>(
    sources: S,
    config: Config,
) -> HashSplitIter<S::IntoIter, fn(usize, usize) -> Result<(), ProgressError>>
where
    S: IntoIterator<Item = Box<dyn source::Source>>,
{
    HashSplitIter::new(sources.into_iter(), config, None)
}

/// Builds a chunking pipeline over `sources`, invoking `progress` before
/// each read attempt with `(source_index, previous_read_size)`.
pub fn hash_split_with_progress<S, P>(
    sources: S,
    config: Config,
    progress: P,
) -> HashSplitIter<S::IntoIter, P>
where
    S: IntoIterator<Item = Box<dyn source::Source>>,
    P: FnMut(usize, usize) -> Result<(), ProgressError>,
{
    HashSplitIter::new(sources.into_iter(), config, Some(progress))
}
