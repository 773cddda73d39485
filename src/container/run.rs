use std::fmt::{self, Debug};

use itertools::Itertools;

use crate::RunsErr;

/// One inclusive run of values, covering `[start, start + length]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub start: u16,
    pub length: u16,
}

impl Run {
    #[inline]
    pub const fn new(start: u16, length: u16) -> Self {
        Run { start, length }
    }

    /// Last value covered by this run (inclusive).
    #[inline]
    pub const fn end(&self) -> u16 {
        self.start + self.length
    }

    #[inline]
    pub const fn cardinality(&self) -> usize {
        self.length as usize + 1
    }
}

/// Sorted list of disjoint, non-mergeable runs.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RunContainer {
    runs: Vec<Run>,
}

impl RunContainer {
    /// Serialized size in bytes of a run container holding `n_runs` runs:
    /// a `u16` run count followed by two `u16`s per run.
    #[inline]
    pub const fn serialized_size(n_runs: usize) -> usize {
        size_of::<u16>() + n_runs * 2 * size_of::<u16>()
    }

    pub(crate) fn with_capacity(n_runs: usize) -> Self {
        RunContainer { runs: Vec::with_capacity(n_runs) }
    }

    /// Validates an externally built run sequence: every run must stay inside
    /// the 16-bit universe, and consecutive runs must be sorted, disjoint, and
    /// separated by at least one absent value.
    pub fn try_from_runs(runs: Vec<Run>) -> Result<Self, RunsErr> {
        for run in &runs {
            if run.start.checked_add(run.length).is_none() {
                return Err(RunsErr::OutOfRange);
            }
        }
        for pair in runs.windows(2) {
            let (prev, next) = (pair[0], pair[1]);
            if u32::from(next.start) <= u32::from(prev.end()) {
                return Err(RunsErr::Overlap);
            }
            if u32::from(next.start) == u32::from(prev.end()) + 1 {
                return Err(RunsErr::Mergeable);
            }
        }
        Ok(RunContainer { runs })
    }

    /// Construct a `RunContainer` from a sorted iter of unique values,
    /// collapsing consecutive values into runs.
    /// SAFETY: undefined behavior if the iter is not sorted or contains duplicates
    pub fn from_sorted_unique_unchecked(values: impl Iterator<Item = u16>) -> Self {
        Self::from_sorted_unique_with_capacity(0, values)
    }

    /// Like [`Self::from_sorted_unique_unchecked`], pre-sized for callers that
    /// already hold a run-count estimate.
    pub(crate) fn from_sorted_unique_with_capacity(
        n_runs: usize,
        mut values: impl Iterator<Item = u16>,
    ) -> Self {
        let Some(first) = values.next() else {
            return RunContainer::default();
        };
        let mut runs = RunContainer::with_capacity(n_runs);
        let mut cursor = (first, first);
        for value in values {
            // since the input iterator is sorted and unique, we only need to
            // check if the next value is adjacent to the pending run
            if cursor.1 + 1 == value {
                cursor.1 = value;
            } else {
                runs.push_run(Run::new(cursor.0, cursor.1 - cursor.0));
                cursor = (value, value);
            }
        }
        runs.push_run(Run::new(cursor.0, cursor.1 - cursor.0));
        runs
    }

    /// Appends a run. The caller guarantees it starts after the previous run
    /// ends, with a gap.
    pub(crate) fn push_run(&mut self, run: Run) {
        debug_assert!(run.start.checked_add(run.length).is_some(), "run out of range");
        if let Some(prev) = self.runs.last() {
            debug_assert!(
                u32::from(run.start) > u32::from(prev.end()) + 1,
                "runs must be appended in order and non-mergeable"
            );
        }
        self.runs.push(run);
    }

    #[inline]
    pub fn n_runs(&self) -> usize {
        self.runs.len()
    }

    #[inline]
    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    pub fn cardinality(&self) -> usize {
        self.runs.iter().map(Run::cardinality).sum()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    pub fn contains(&self, value: u16) -> bool {
        // index of the last run starting at or before `value`
        let idx = self.runs.partition_point(|run| run.start <= value);
        idx > 0 && value <= self.runs[idx - 1].end()
    }

    pub fn iter(&self) -> impl Iterator<Item = u16> {
        self.runs.iter().flat_map(|run| run.start..=run.end())
    }
}

impl Debug for RunContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RunContainer({} runs)", self.n_runs())
    }
}

impl FromIterator<u16> for RunContainer {
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
    fn test_from_sorted_unique() {
        let vals = [1u16, 2, 5, 7, 8, 11];
        let runs = RunContainer::from_sorted_unique_unchecked(vals.iter().copied());

        assert_eq!(
            runs.runs(),
            &[Run::new(1, 1), Run::new(5, 0), Run::new(7, 1), Run::new(11, 0)]
        );
        assert_eq!(runs.cardinality(), vals.len());
        itertools::assert_equal(vals, runs.iter());
    }

    #[test]
    fn test_contains() {
        let runs: RunContainer = [3u16, 4, 5, 9, 65535].into_iter().collect();
        for v in [3, 4, 5, 9, 65535] {
            assert!(runs.contains(v), "{v}");
        }
        for v in [0, 2, 6, 8, 10, 65534] {
            assert!(!runs.contains(v), "{v}");
        }
    }

    #[test]
    fn test_try_from_runs() {
        let ok = RunContainer::try_from_runs(vec![Run::new(1, 3), Run::new(7, 1)]);
        assert_eq!(ok.map(|r| r.cardinality()), Ok(6));

        assert_eq!(
            RunContainer::try_from_runs(vec![Run::new(65000, 1000)]),
            Err(RunsErr::OutOfRange)
        );
        assert_eq!(
            RunContainer::try_from_runs(vec![Run::new(1, 5), Run::new(4, 1)]),
            Err(RunsErr::Overlap)
        );
        assert_eq!(
            RunContainer::try_from_runs(vec![Run::new(1, 2), Run::new(4, 1)]),
            Err(RunsErr::Mergeable)
        );
    }

    #[test]
    fn test_empty() {
        let runs = RunContainer::default();
        assert!(runs.is_empty());
        assert_eq!(runs.cardinality(), 0);
        assert!(runs.iter().next().is_none());
    }
}
