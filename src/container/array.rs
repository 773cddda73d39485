use std::fmt::{self, Debug};

use itertools::Itertools;

use crate::count::count_runs_sorted;

/// Preferred cardinality ceiling for the array encoding; past this point a
/// bitset of the same cardinality serializes smaller (8192 bytes vs 2 bytes
/// per value).
pub const ARRAY_MAX_CARDINALITY: usize = 4096;

/// Sorted list of distinct `u16` values.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ArrayContainer {
    values: Vec<u16>,
}

impl ArrayContainer {
    /// Serialized size in bytes of an array holding `cardinality` values.
    #[inline]
    pub const fn serialized_size(cardinality: usize) -> usize {
        cardinality * size_of::<u16>()
    }

    /// Construct an `ArrayContainer` from a sorted iter of unique values.
    /// SAFETY: undefined behavior if the iter is not sorted or contains duplicates
    pub fn from_sorted_unique_unchecked(values: impl Iterator<Item = u16>) -> Self {
        let values: Vec<u16> = values.collect();
        debug_assert!(values.windows(2).all(|w| w[0] < w[1]), "values must be sorted and unique");
        ArrayContainer { values }
    }

    #[inline]
    pub fn cardinality(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn contains(&self, value: u16) -> bool {
        self.values.binary_search(&value).is_ok()
    }

    /// Inserts the value unless it already exists, keeping the list sorted.
    /// Returns `true` if the insertion occurred.
    pub fn insert(&mut self, value: u16) -> bool {
        match self.values.binary_search(&value) {
            Ok(_) => false,
            Err(index) => {
                self.values.insert(index, value);
                true
            }
        }
    }

    /// Number of runs the values would collapse into if run-encoded.
    #[inline]
    pub fn count_runs(&self) -> usize {
        count_runs_sorted(self.iter())
    }

    #[inline]
    pub fn as_slice(&self) -> &[u16] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = u16> {
        self.values.iter().copied()
    }
}

impl Debug for ArrayContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ArrayContainer({})", self.cardinality())
    }
}

impl FromIterator<u16> for ArrayContainer {
    fn from_iter<I: IntoIterator<Item = u16>>(iter: I) -> Self {
        let values = iter.into_iter().sorted().dedup();
        // SAFETY: the iterator is sorted and deduped
        Self::from_sorted_unique_unchecked(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_sorted() {
        let mut array = ArrayContainer::default();
        assert!(array.insert(9));
        assert!(array.insert(3));
        assert!(array.insert(12));
        assert!(!array.insert(9));
        assert_eq!(array.as_slice(), &[3, 9, 12]);
        assert_eq!(array.cardinality(), 3);
        assert!(array.contains(12));
        assert!(!array.contains(4));
    }

    #[test]
    fn test_from_iter_sorts_and_dedups() {
        let array: ArrayContainer = [5u16, 1, 5, 2, 1].into_iter().collect();
        assert_eq!(array.as_slice(), &[1, 2, 5]);
    }

    #[test]
    fn test_count_runs() {
        let array: ArrayContainer = [1u16, 2, 3, 7, 8, 10].into_iter().collect();
        assert_eq!(array.count_runs(), 3);
        assert_eq!(ArrayContainer::default().count_runs(), 0);
    }
}
