//! Rolling checksum used to locate content-defined chunk boundaries.
//!
//! Strongly based on the `bup` rolling checksum
//! (`lib/bup/bupsplit.c` in `bup`'s history), which is itself a distant
//! cousin of Adler-32: two 16-bit accumulators `s1`, `s2` are kept over a
//! fixed-size trailing window, each update touching only the byte leaving
//! the window and the byte entering it.

use std::default::Default;

/// Width of the rolling window, in bytes.
pub const WINDOW_SIZE: usize = crate::config::BUP_WINDOWSIZE;

const CHAR_OFFSET: usize = 31;

/// A rolling-sum engine: feed bytes one at a time, read back a digest.
pub trait RollingHash {
    /// Digest type produced by [`RollingHash::digest`].
    type Digest;

    /// Rolls over one byte, shifting the oldest byte out of the window.
    fn roll_byte(&mut self, byte: u8);

    /// Rolls over a slice of bytes.
    fn roll(&mut self, buf: &[u8]) {
        buf.iter().for_each(|&b| self.roll_byte(b));
    }

    /// Returns the current rolling digest.
    fn digest(&self) -> Self::Digest;

    /// Resets the engine to its initial (empty-window) state.
    fn reset(&mut self);

    /// Feeds `buf` one byte at a time, stopping as soon as `cond` reports
    /// true on the live digest. Returns the 1-based offset within `buf`
    /// where `cond` first fired, or `None` if it never did.
    ///
    /// This is the shared loop behind [`scan_for_split`], kept on the trait
    /// so unit tests can probe an arbitrary predicate directly without
    /// duplicating the byte-feeding logic.
    fn find_chunk_edge_cond<F>(&mut self, buf: &[u8], mut cond: F) -> Option<usize>
    where
        Self: Sized,
        F: FnMut(&Self) -> bool,
    {
        for (i, &byte) in buf.iter().enumerate() {
            self.roll_byte(byte);
            if cond(self) {
                return Some(i + 1);
            }
        }
        None
    }
}

/// Rolling checksum used by the bup-style content-defined chunker.
///
/// Strongly based on
/// <https://github.com/bup/bup/blob/706e8d273/lib/bup/bupsplit.c>.
pub struct Bup {
    s1: usize,
    s2: usize,
    window: [u8; WINDOW_SIZE],
    wofs: usize,
}

impl Default for Bup {
    fn default() -> Self {
        Bup {
            s1: WINDOW_SIZE * CHAR_OFFSET,
            s2: WINDOW_SIZE * (WINDOW_SIZE - 1) * CHAR_OFFSET,
            window: [0; WINDOW_SIZE],
            wofs: 0,
        }
    }
}

impl Bup {
    /// Creates a new engine with a freshly initialized (empty) window.
    pub fn new() -> Self {
        Default::default()
    }

    #[inline(always)]
    fn add(&mut self, drop: u8, add: u8) {
        self.s1 = self.s1.wrapping_add(add as usize).wrapping_sub(drop as usize);
        self.s2 = self
            .s2
            .wrapping_add(self.s1)
            .wrapping_sub(WINDOW_SIZE * (drop as usize + CHAR_OFFSET));
    }

    /// Number of consecutive low-order one-bits in `digest() >> 1`, starting
    /// at bit 0. A split is declared when this is `>= base_bits`.
    #[inline]
    pub fn trailing_split_bits(&self) -> u32 {
        (self.digest() >> 1).trailing_ones()
    }
}

impl RollingHash for Bup {
    type Digest = u32;

    #[inline(always)]
    fn roll_byte(&mut self, newch: u8) {
        let prevch = self.window[self.wofs];
        self.add(prevch, newch);
        self.window[self.wofs] = newch;
        self.wofs = (self.wofs + 1) % WINDOW_SIZE;
    }

    #[inline(always)]
    fn digest(&self) -> u32 {
        ((self.s1 as u32) << 16) | ((self.s2 as u32) & 0xffff)
    }

    #[inline]
    fn reset(&mut self) {
        *self = Bup::default();
    }
}

/// Result of scanning a window for a split point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanResult {
    /// 1-based offset within `buf` where the split occurs, or `0` if none
    /// was found.
    pub ofs: usize,
    /// Trailing one-bit count realized at the split, or `-1` if `ofs == 0`.
    pub bits: i64,
}

impl ScanResult {
    /// Whether a split point was found.
    #[must_use]
    pub const fn found(&self) -> bool {
        self.ofs > 0
    }
}

/// Scans `buf` byte by byte with a freshly reset rolling state, returning
/// the first position at which the split predicate fires.
///
/// The rolling state is always local to this call: implementations MUST NOT
/// carry hash state across a chunk boundary.
pub fn scan_for_split(buf: &[u8], base_bits: u32) -> ScanResult {
    let mut engine = Bup::new();
    match engine.find_chunk_edge_cond(buf, |e| e.trailing_split_bits() >= base_bits) {
        Some(ofs) => ScanResult {
            ofs,
            bits: engine.trailing_split_bits() as i64,
        },
        None => ScanResult { ofs: 0, bits: -1 },
    }
}
