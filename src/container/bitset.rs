use std::fmt::{self, Debug};

use bitvec::{bitbox, boxed::BitBox, order::Lsb0};

use crate::count::count_bitmap_runs;

/// Number of values representable by one chunk.
pub const UNIVERSE_SIZE: usize = 1 << 16;

/// Fixed 65536-bit vector plus a maintained cardinality counter.
///
/// Invariant: `cardinality` always equals the popcount of the bit vector;
/// every mutation path keeps the two synchronized.
#[derive(Clone, PartialEq, Eq)]
pub struct BitsetContainer {
    bits: BitBox<u64, Lsb0>,
    cardinality: usize,
}

impl BitsetContainer {
    /// Serialized size in bytes; independent of cardinality.
    pub const SERIALIZED_SIZE: usize = UNIVERSE_SIZE / 8;

    #[inline]
    pub fn cardinality(&self) -> usize {
        debug_assert_eq!(self.cardinality, self.bits.count_ones());
        self.cardinality
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cardinality == 0
    }

    pub fn contains(&self, value: u16) -> bool {
        // SAFETY: self.bits stores UNIVERSE_SIZE bits and u16 is restricted
        // to [0, UNIVERSE_SIZE)
        *unsafe { self.bits.get_unchecked(value as usize) }
    }

    /// Sets the bit for `value`, returning `true` if it was previously clear.
    pub fn insert(&mut self, value: u16) -> bool {
        let mut bit = self.bits.get_mut(value as usize).expect("value out of range");
        let inserted = !bit.replace(true);
        drop(bit);
        self.cardinality += inserted as usize;
        inserted
    }

    /// Sets every bit in the inclusive range `[start, end]`.
    pub fn insert_range(&mut self, start: u16, end: u16) {
        debug_assert!(start <= end);
        let range = start as usize..=end as usize;
        let slice = &mut self.bits[range];
        let already_set = slice.count_ones();
        slice.fill(true);
        self.cardinality += (end - start) as usize + 1 - already_set;
    }

    /// Number of maximal runs of consecutive set bits.
    #[inline]
    pub fn count_runs(&self) -> usize {
        count_bitmap_runs(self.as_raw_slice())
    }

    /// Word-level view of the bit vector, for word-at-a-time scans.
    #[inline]
    pub fn as_raw_slice(&self) -> &[u64] {
        self.bits.as_raw_slice()
    }

    pub fn iter(&self) -> impl Iterator<Item = u16> {
        self.bits.iter_ones().map(|i| i as u16)
    }
}

impl Default for BitsetContainer {
    fn default() -> Self {
        BitsetContainer {
            bits: bitbox![u64, Lsb0; 0; UNIVERSE_SIZE],
            cardinality: 0,
        }
    }
}

impl Debug for BitsetContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitsetContainer({})", self.cardinality)
    }
}

impl FromIterator<u16> for BitsetContainer {
    fn from_iter<I: IntoIterator<Item = u16>>(iter: I) -> Self {
        let mut bitset = BitsetContainer::default();
        for value in iter {
            bitset.insert(value);
        }
        bitset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_tracks_cardinality() {
        let mut bitset = BitsetContainer::default();
        assert!(bitset.is_empty());
        assert!(bitset.insert(100));
        assert!(bitset.insert(65535));
        assert!(!bitset.insert(100));
        assert_eq!(bitset.cardinality(), 2);
        assert!(bitset.contains(100));
        assert!(!bitset.contains(101));
        assert_eq!(bitset.iter().collect::<Vec<_>>(), vec![100, 65535]);
    }

    #[test]
    fn test_insert_range_overlapping() {
        let mut bitset = BitsetContainer::default();
        bitset.insert_range(10, 20);
        assert_eq!(bitset.cardinality(), 11);
        // overlaps [10, 20], only 5 new bits
        bitset.insert_range(16, 25);
        assert_eq!(bitset.cardinality(), 16);
        assert!(bitset.iter().eq(10..=25));
    }

    #[test]
    fn test_count_runs_across_words() {
        let mut bitset = BitsetContainer::default();
        bitset.insert_range(60, 68);
        assert_eq!(bitset.count_runs(), 1);
        bitset.insert(70);
        assert_eq!(bitset.count_runs(), 2);
    }
}
