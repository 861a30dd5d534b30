use std::io;

/// Error returned by a user-supplied progress callback.
///
/// Wraps any boxed [`std::error::Error`] so callers can report failures from
/// whatever type is most convenient for them (an `io::Error`, a custom enum,
/// `anyhow::Error`, ...).
#[derive(Debug)]
pub struct ProgressError(Box<dyn std::error::Error + Send + Sync + 'static>);

impl ProgressError {
    /// Wraps an arbitrary error raised by a progress callback.
    pub fn new<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self(Box::new(err))
    }
}

impl std::fmt::Display for ProgressError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "progress callback failed: {}", self.0)
    }
}

impl std::error::Error for ProgressError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.0.as_ref())
    }
}

/// Errors that can terminate a [`crate::HashSplitIter`].
///
/// All variants are terminal: once a [`SplitError`] is yielded, the iterator
/// latches into a failed state and every subsequent call returns `None`
/// rather than re-raising or resuming.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SplitError {
    /// A read from source `index` failed.
    #[error("reading source {index}: {source}")]
    Io {
        /// 0-based ordinal of the source that failed.
        index: usize,
        #[source]
        source: io::Error,
    },

    /// A source delivered more bytes than the requested read size.
    ///
    /// The reference implementation has no recovery path for this; this
    /// crate treats it as a terminating error rather than silently growing
    /// the sliding buffer.
    #[error(
        "source {index} returned {got} bytes, exceeding the requested read size of {limit}"
    )]
    OversizedRead {
        /// 0-based ordinal of the offending source.
        index: usize,
        /// Number of bytes the source actually delivered.
        got: usize,
        /// Requested read size (`Config::read_size`).
        limit: usize,
    },

    /// The progress callback returned an error while processing source `index`.
    #[error("progress callback failed on source {index}: {source}")]
    Progress {
        /// 0-based ordinal of the source being read when the callback failed.
        index: usize,
        #[source]
        source: ProgressError,
    },
}
