/// Fixed read quantum: each pull from a source attempts exactly this many bytes.
pub const BLOB_READ_SIZE: usize = 1 << 20;

/// Hard upper bound on chunk length (`8192 * 4`).
pub const BLOB_MAX: usize = 8192 * 4;

/// Rolling-hash window size.
pub const BUP_WINDOWSIZE: usize = 64;

/// Base split threshold: minimum number of trailing one-bits (beyond the
/// lowest bit) the rolling digest must show to declare a split.
pub const BUP_BLOBBITS: u32 = 13;

/// Default branching factor of the hash tree the surrounding system builds
/// on top of the chunk stream.
pub const FANOUT: u32 = 128;

/// Tunable parameters for a chunking pipeline.
///
/// `Config::default()` reproduces the constants above exactly. Constructing
/// or modifying a `Config` never fails: an unusual configuration (say, a
/// `base_bits` so large no split can ever fire) is legal and simply yields
/// `max_chunk`-bounded chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    read_size: usize,
    max_chunk: usize,
    base_bits: u32,
    fanout: u32,
    min_chunk: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            read_size: BLOB_READ_SIZE,
            max_chunk: BLOB_MAX,
            base_bits: BUP_BLOBBITS,
            fanout: FANOUT,
            min_chunk: 0,
        }
    }
}

impl Config {
    /// Creates a new configuration with the default tunables.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read quantum attempted on each pull from a source.
    #[must_use]
    pub const fn read_size(&self) -> usize {
        self.read_size
    }

    /// Overrides the read quantum. Must be positive; unchecked here, but a
    /// zero value will spin the fill phase without making progress.
    #[must_use]
    pub const fn with_read_size(mut self, read_size: usize) -> Self {
        self.read_size = read_size;
        self
    }

    /// Hard upper bound on chunk length.
    #[must_use]
    pub const fn max_chunk(&self) -> usize {
        self.max_chunk
    }

    /// Overrides the maximum chunk length.
    #[must_use]
    pub const fn with_max_chunk(mut self, max_chunk: usize) -> Self {
        self.max_chunk = max_chunk;
        self
    }

    /// Rolling-hash window size used by the kernel. Fixed by the algorithm
    /// (`BUP_WINDOWSIZE`); exposed for documentation, not for tuning.
    #[must_use]
    pub const fn window_size(&self) -> usize {
        BUP_WINDOWSIZE
    }

    /// Base split threshold (number of trailing one-bits required).
    #[must_use]
    pub const fn base_bits(&self) -> u32 {
        self.base_bits
    }

    /// Overrides the base split threshold.
    #[must_use]
    pub const fn with_base_bits(mut self, base_bits: u32) -> Self {
        self.base_bits = base_bits;
        self
    }

    /// Branching factor of the hash tree built on top of the chunk stream.
    /// A value of `0` is normalized to `128`.
    #[must_use]
    pub const fn fanout(&self) -> u32 {
        self.fanout
    }

    /// Overrides the fan-out. `0` is normalized to `128`.
    #[must_use]
    pub const fn with_fanout(mut self, fanout: u32) -> Self {
        self.fanout = if fanout == 0 { FANOUT } else { fanout };
        self
    }

    /// Minimum chunk size below which the scanner does not consult the
    /// split predicate at all. Defaults to `0` (disabled). This is a
    /// supplement beyond the literal split algorithm, for callers that want
    /// a floor under pathologically small chunks.
    #[must_use]
    pub const fn min_chunk_size(&self) -> usize {
        self.min_chunk
    }

    /// Overrides the minimum chunk size.
    #[must_use]
    pub const fn with_min_chunk_size(mut self, min_chunk: usize) -> Self {
        self.min_chunk = min_chunk;
        self
    }

    /// `floor(log2(fanout))`, used to derive a chunk's level from its split bits.
    #[must_use]
    pub(crate) fn fan_bits(&self) -> u32 {
        let fanout = if self.fanout == 0 { FANOUT } else { self.fanout };
        31 - fanout.leading_zeros()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_documented_constants() {
        let cfg = Config::default();
        assert_eq!(cfg.read_size(), 1_048_576);
        assert_eq!(cfg.max_chunk(), 32_768);
        assert_eq!(cfg.window_size(), 64);
        assert_eq!(cfg.base_bits(), 13);
        assert_eq!(cfg.fanout(), 128);
        assert_eq!(cfg.min_chunk_size(), 0);
    }

    #[test]
    fn fanout_of_128_has_7_fan_bits() {
        assert_eq!(Config::default().fan_bits(), 7);
    }

    #[test]
    fn zero_fanout_normalizes_to_default() {
        let cfg = Config::default().with_fanout(0);
        assert_eq!(cfg.fanout(), FANOUT);
    }
}
