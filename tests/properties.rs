//! Property tests for determinism, read-size independence, and
//! source-boundary agnosticism.

use blobsplit::source::Source;
use blobsplit::{hash_split, Config};
use proptest::prelude::*;
use std::io;

fn run(sources: Vec<Box<dyn Source>>) -> Vec<(Vec<u8>, u32)> {
    hash_split(sources, Config::default())
        .map(|r| r.expect("in-memory sources never fail"))
        .map(|c| (c.bytes().to_vec(), c.level()))
        .collect()
}

/// A source that hands back `data` broken into the caller-chosen fragment
/// sizes (wrapping around once exhausted), regardless of how large a read
/// was requested — simulating "arbitrary non-empty fragments" from
/// invariant 5.
struct FragmentedSource {
    data: Vec<u8>,
    pos: usize,
    fragment_sizes: Vec<usize>,
    next_fragment: usize,
}

impl FragmentedSource {
    fn new(data: Vec<u8>, fragment_sizes: Vec<usize>) -> Self {
        let fragment_sizes = if fragment_sizes.is_empty() {
            vec![1]
        } else {
            fragment_sizes
        };
        Self {
            data,
            pos: 0,
            fragment_sizes,
            next_fragment: 0,
        }
    }
}

impl Source for FragmentedSource {
    fn read_up_to(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.pos >= self.data.len() {
            return Ok(0);
        }
        let requested = self.fragment_sizes[self.next_fragment % self.fragment_sizes.len()].max(1);
        self.next_fragment += 1;
        let n = requested.min(buf.len()).min(self.data.len() - self.pos);
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

fn random_bytes() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..(3 * 1024 * 1024))
}

fn fragment_sizes() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(1usize..4096, 1..64)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn determinism_same_bytes_same_config_same_chunks(data in random_bytes()) {
        let a = run(vec![Box::new(FragmentedSource::new(data.clone(), vec![1024]))]);
        let b = run(vec![Box::new(FragmentedSource::new(data, vec![1024]))]);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn read_size_independence(data in random_bytes(), frag_a in fragment_sizes(), frag_b in fragment_sizes()) {
        let a = run(vec![Box::new(FragmentedSource::new(data.clone(), frag_a))]);
        let b = run(vec![Box::new(FragmentedSource::new(data, frag_b))]);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn source_boundary_agnostic(first in random_bytes(), second in random_bytes()) {
        let mut combined = first.clone();
        combined.extend_from_slice(&second);

        let split_sources: Vec<Box<dyn Source>> = vec![
            Box::new(FragmentedSource::new(first, vec![4096])),
            Box::new(FragmentedSource::new(second, vec![4096])),
        ];
        let merged_sources: Vec<Box<dyn Source>> = vec![
            Box::new(FragmentedSource::new(combined, vec![4096])),
        ];

        prop_assert_eq!(run(split_sources), run(merged_sources));
    }

    #[test]
    fn concatenation_and_bounds_hold(data in random_bytes()) {
        let chunks = run(vec![Box::new(FragmentedSource::new(data.clone(), vec![8192]))]);
        let reassembled: Vec<u8> = chunks.iter().flat_map(|(b, _)| b.clone()).collect();
        prop_assert_eq!(reassembled, data);
        for (bytes, level) in &chunks {
            prop_assert!(!bytes.is_empty());
            prop_assert!(bytes.len() <= Config::default().max_chunk());
            // level is a u32, always >= 0 by construction; nothing further to assert.
            let _ = level;
        }
    }
}
