use num::{PrimInt, traits::ConstOne};

/// Counts the number of runs present in `iter`. Requires that the iterator is
/// sorted and unique.
pub fn count_runs_sorted<I, T>(iter: I) -> usize
where
    I: IntoIterator<Item = T>,
    T: PrimInt + ConstOne,
{
    let mut iter = iter.into_iter().peekable();
    let mut runs = 0;
    let mut last = None;

    while let Some(mut curr) = iter.next() {
        debug_assert!(
            Some(curr) > last.replace(curr),
            "values must be sorted and unique"
        );

        runs += 1;
        // swallow the rest of the run
        while curr < T::max_value() && iter.peek() == Some(&(curr + T::ONE)) {
            curr = curr + T::ONE;
            iter.next();
        }
    }

    runs
}

/// Counts the number of maximal runs of consecutive set bits in `words`,
/// interpreted as a little-endian bit vector.
///
/// A run starts at every set bit whose predecessor bit is clear, so each word
/// contributes `popcount(w & !(w << 1))` starts, corrected by the top bit of
/// the previous word.
pub fn count_bitmap_runs(words: &[u64]) -> usize {
    let mut runs = 0;
    let mut prev_top = 0u64;
    for &word in words {
        runs += (word & !((word << 1) | prev_top)).count_ones() as usize;
        prev_top = word >> 63;
    }
    runs
}
