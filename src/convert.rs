//! Cross-representation conversions. This module knows the physical layout of
//! every container type; everything else in the crate treats them as opaque.
//!
//! Conversions take their input by value: consuming the old representation is
//! enforced by the type system rather than by a freeing convention. The no-op
//! branches of [`Container::optimize`] return the input unchanged.

use crate::container::{
    Container,
    array::{ARRAY_MAX_CARDINALITY, ArrayContainer},
    bitset::BitsetContainer,
    run::{Run, RunContainer},
};

impl BitsetContainer {
    /// Rebuilds the array's value set as a bitset. Does not consume the array.
    pub fn from_array(array: &ArrayContainer) -> Self {
        let mut bitset = BitsetContainer::default();
        for value in array.iter() {
            bitset.insert(value);
        }
        bitset
    }

    /// Rebuilds the run container's value set as a bitset. `cardinality` is
    /// supplied by the caller (runs carry it implicitly) and must match the
    /// run container's derived cardinality.
    pub fn from_run(run: &RunContainer, cardinality: usize) -> Self {
        let mut bitset = BitsetContainer::default();
        for r in run.runs() {
            bitset.insert_range(r.start, r.end());
        }
        debug_assert_eq!(bitset.cardinality(), cardinality, "inconsistent run cardinality");
        bitset
    }
}

impl ArrayContainer {
    /// Rebuilds the bitset's value set as a sorted array.
    ///
    /// Scans word at a time, repeatedly extracting the lowest set bit; word
    /// order plus low-to-high extraction yields strictly increasing output.
    pub fn from_bitset(bitset: &BitsetContainer) -> Self {
        let mut values = Vec::with_capacity(bitset.cardinality());
        for (i, &word) in bitset.as_raw_slice().iter().enumerate() {
            let mut word = word;
            while word != 0 {
                let bit = word.trailing_zeros() as usize;
                values.push((i * 64 + bit) as u16);
                word &= word - 1;
            }
        }
        debug_assert_eq!(values.len(), bitset.cardinality());
        ArrayContainer::from_sorted_unique_unchecked(values.into_iter())
    }
}

impl RunContainer {
    /// Converts the run container to an array if `cardinality` is at most
    /// `array_max`, otherwise to a bitset. Consumes the run container.
    ///
    /// `cardinality` is supplied by the caller and must match the run
    /// container's derived cardinality.
    pub fn into_bitset_or_array(self, cardinality: usize, array_max: usize) -> Container {
        debug_assert_eq!(cardinality, self.cardinality(), "inconsistent run cardinality");
        if cardinality <= array_max {
            let mut values = Vec::with_capacity(cardinality);
            for run in self.runs() {
                values.extend(run.start..=run.end());
            }
            debug_assert_eq!(values.len(), cardinality);
            // runs are sorted and disjoint, so expansion is sorted and unique
            Container::Array(ArrayContainer::from_sorted_unique_unchecked(values.into_iter()))
        } else {
            Container::Bitset(BitsetContainer::from_run(&self, cardinality))
        }
    }

    /// Replaces the run representation with whichever of {run, array, bitset}
    /// serializes smallest. A tie keeps the run form, avoiding the rewrite.
    pub fn into_efficient(self) -> Container {
        let size_as_run = RunContainer::serialized_size(self.n_runs());
        let cardinality = self.cardinality();
        let size_as_array = ArrayContainer::serialized_size(cardinality);
        let min_size_non_run = BitsetContainer::SERIALIZED_SIZE.min(size_as_array);
        if size_as_run <= min_size_non_run {
            return Container::Run(self);
        }
        self.into_bitset_or_array(cardinality, ARRAY_MAX_CARDINALITY)
    }
}

impl Container {
    /// Rewrites the container into whichever representation is estimated to
    /// serialize smallest, consuming the input. Called after construction or
    /// a batch of mutations.
    ///
    /// An empty container is returned unchanged: with no values there is
    /// nothing to re-encode, and treating emptiness as a no-op keeps
    /// `optimize` a fixed point on every input.
    pub fn optimize(self) -> Container {
        if self.is_empty() {
            return self;
        }
        match self {
            Container::Run(run) => run.into_efficient(),
            Container::Array(array) => optimize_array(array),
            Container::Bitset(bitset) => optimize_bitset(bitset),
        }
    }
}

/// Converts the array to runs if that serializes smaller. A tie keeps the
/// simpler array form.
fn optimize_array(array: ArrayContainer) -> Container {
    let n_runs = array.count_runs();
    let size_as_run = RunContainer::serialized_size(n_runs);
    let size_as_array = ArrayContainer::serialized_size(array.cardinality());
    if size_as_run >= size_as_array {
        return Container::Array(array);
    }
    let runs = RunContainer::from_sorted_unique_with_capacity(n_runs, array.iter());
    debug_assert_eq!(runs.n_runs(), n_runs);
    Container::Run(runs)
}

/// Converts the bitset to runs if that serializes smaller. A tie keeps the
/// bitset form.
///
/// Only the run encoding is considered as an alternative; a sparse bitset
/// whose best encoding is an array therefore becomes runs here and settles
/// into the array form on the next `optimize` call.
fn optimize_bitset(bitset: BitsetContainer) -> Container {
    let n_runs = bitset.count_runs();
    let size_as_run = RunContainer::serialized_size(n_runs);
    if BitsetContainer::SERIALIZED_SIZE <= size_as_run {
        return Container::Bitset(bitset);
    }
    debug_assert!(n_runs > 0, "empty bitset reached the conversion branch");
    Container::Run(bitset_to_runs(&bitset, n_runs))
}

/// Extracts every maximal run of set bits with a single word-at-a-time scan,
/// stitching runs across 64-bit word boundaries.
fn bitset_to_runs(bitset: &BitsetContainer, n_runs: usize) -> RunContainer {
    let words = bitset.as_raw_slice();
    let mut runs = RunContainer::with_capacity(n_runs);

    let mut i = 0;
    let mut word = words[0];
    loop {
        while word == 0 && i + 1 < words.len() {
            i += 1;
            word = words[i];
        }
        if word == 0 {
            break;
        }

        let start = i * 64 + word.trailing_zeros() as usize;

        // `word | (word - 1)` fills every bit below the run, so the run ends
        // at the lowest zero bit of the filled word; all-ones means the run
        // continues into the next word.
        let mut filled = word | (word - 1);
        while filled == u64::MAX && i + 1 < words.len() {
            i += 1;
            filled = words[i];
        }
        if filled == u64::MAX {
            // the run reaches the end of the universe
            let end = words.len() * 64 - 1;
            runs.push_run(Run::new(start as u16, (end - start) as u16));
            break;
        }

        let end = i * 64 + (!filled).trailing_zeros() as usize - 1;
        runs.push_run(Run::new(start as u16, (end - start) as u16));

        // clear the run's trailing ones, exposing the next run in this word
        // (or zero, handing control back to the skip-zero loop)
        word = filled & (filled + 1);
    }

    debug_assert_eq!(runs.n_runs(), n_runs);
    debug_assert_eq!(runs.cardinality(), bitset.cardinality());
    runs
}
