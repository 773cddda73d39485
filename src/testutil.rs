use itertools::Itertools;
use rand::{SeedableRng, seq::index};

/// Deterministic generator of `u16` value sets with interesting shapes.
pub struct SetGen {
    rng: rand::rngs::StdRng,
}

impl SetGen {
    pub fn new(seed: u64) -> Self {
        let rng = rand::rngs::StdRng::seed_from_u64(seed);
        Self { rng }
    }

    /// `len` distinct values sampled uniformly from the whole universe.
    pub fn sparse(&mut self, len: usize) -> Vec<u16> {
        index::sample(&mut self.rng, 1 << 16, len)
            .into_iter()
            .map(|v| v as u16)
            .sorted()
            .collect()
    }

    /// `n_clusters` randomly placed clusters of `cluster_len` consecutive
    /// values each; clusters may overlap or merge.
    pub fn clustered(&mut self, n_clusters: usize, cluster_len: usize) -> Vec<u16> {
        index::sample(&mut self.rng, 1 << 16, n_clusters)
            .into_iter()
            .flat_map(|start| {
                let end = usize::min(start + cluster_len - 1, u16::MAX as usize);
                start..=end
            })
            .map(|v| v as u16)
            .sorted()
            .dedup()
            .collect()
    }

    /// The first `len` values of the universe.
    pub fn dense(&mut self, len: usize) -> Vec<u16> {
        (0..len).map(|v| v as u16).collect()
    }

    /// Every `stride`-th value in `[start, end)`.
    pub fn dense_stride(&mut self, start: usize, end: usize, stride: usize) -> Vec<u16> {
        (start..end).step_by(stride).map(|v| v as u16).collect()
    }
}
