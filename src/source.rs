//! The capability set [`ReadIter`](crate::reader::ReadIter) needs from an
//! input source, and a couple of stock implementations.

use std::io::{self, Read};

/// One input byte stream.
///
/// Consumed through at most two operations: `read_up_to`, and an optional
/// `fileno` used to enable the page-cache advisory. Represented as
/// a trait object at the [`ReadIter`](crate::reader::ReadIter) boundary so
/// a single pipeline can mix file-backed and in-memory sources within one
/// ordered sequence.
pub trait Source {
    /// Attempts to fill `buf` completely, returning the number of bytes
    /// actually read. `0` means end-of-source; any other `Ok` value may be
    /// a short read, which the caller (the sliding buffer) must tolerate.
    fn read_up_to(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Returns the underlying file descriptor, if this source is backed by
    /// one. Used only for the best-effort page-cache advisory; sources
    /// that cannot or need not expose one simply return `None`.
    fn fileno(&self) -> Option<i32> {
        None
    }
}

/// Adapts any [`std::io::Read`] implementation into a [`Source`] with no
/// file-descriptor advisory (the generic byte stream case).
pub struct GenericSource<R> {
    inner: R,
}

impl<R: Read> GenericSource<R> {
    /// Wraps `inner` as a source with no fileno advisory.
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

impl<R: Read> Source for GenericSource<R> {
    fn read_up_to(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl Source for std::fs::File {
    fn read_up_to(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Read::read(self, buf)
    }

    #[cfg(unix)]
    fn fileno(&self) -> Option<i32> {
        use std::os::unix::io::AsRawFd;
        Some(self.as_raw_fd())
    }

    #[cfg(not(unix))]
    fn fileno(&self) -> Option<i32> {
        None
    }
}

/// Best-effort advisory that the kernel page cache no longer needs
/// `[0, end)` of the file behind `fd`. A no-op on platforms without
/// `posix_fadvise` or if the descriptor doesn't support it.
#[cfg(unix)]
pub(crate) fn advise_dontneed(fd: i32, end: u64) {
    // SAFETY: `fd` is a raw descriptor we only ever read-only borrow here;
    // posix_fadvise takes no ownership and the call is side-effect-only.
    // A failure is intentionally ignored: this is a hint, not a contract.
    unsafe {
        libc::posix_fadvise(fd, 0, end as libc::off_t, libc::POSIX_FADV_DONTNEED);
    }
}

#[cfg(not(unix))]
pub(crate) fn advise_dontneed(_fd: i32, _end: u64) {}
