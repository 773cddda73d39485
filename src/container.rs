use std::fmt::{self, Debug};

use crate::container::{array::ArrayContainer, bitset::BitsetContainer, run::RunContainer};

pub mod array;
pub mod bitset;
pub mod run;

/// Identifies which physical layout a [`Container`] currently uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    Array,
    Bitset,
    Run,
}

/// One chunk of the index: a set of `u16` values in one of three encodings.
#[derive(Clone, PartialEq, Eq)]
pub enum Container {
    Array(ArrayContainer),
    Bitset(BitsetContainer),
    Run(RunContainer),
}

impl Container {
    pub fn kind(&self) -> ContainerKind {
        match self {
            Container::Array(_) => ContainerKind::Array,
            Container::Bitset(_) => ContainerKind::Bitset,
            Container::Run(_) => ContainerKind::Run,
        }
    }

    pub fn cardinality(&self) -> usize {
        match self {
            Container::Array(c) => c.cardinality(),
            Container::Bitset(c) => c.cardinality(),
            Container::Run(c) => c.cardinality(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Container::Array(c) => c.is_empty(),
            Container::Bitset(c) => c.is_empty(),
            Container::Run(c) => c.is_empty(),
        }
    }

    pub fn contains(&self, value: u16) -> bool {
        match self {
            Container::Array(c) => c.contains(value),
            Container::Bitset(c) => c.contains(value),
            Container::Run(c) => c.contains(value),
        }
    }

    /// Estimated serialized size in bytes of the current encoding.
    pub fn serialized_size(&self) -> usize {
        match self {
            Container::Array(c) => ArrayContainer::serialized_size(c.cardinality()),
            Container::Bitset(_) => BitsetContainer::SERIALIZED_SIZE,
            Container::Run(c) => RunContainer::serialized_size(c.n_runs()),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = u16> {
        match self {
            Container::Array(c) => Iter::Array(c.iter()),
            Container::Bitset(c) => Iter::Bitset(c.iter()),
            Container::Run(c) => Iter::Run(c.iter()),
        }
    }
}

impl Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Container::Array(c) => c.fmt(f),
            Container::Bitset(c) => c.fmt(f),
            Container::Run(c) => c.fmt(f),
        }
    }
}

impl Default for Container {
    fn default() -> Self {
        Container::Array(ArrayContainer::default())
    }
}

impl FromIterator<u16> for Container {
    fn from_iter<I: IntoIterator<Item = u16>>(iter: I) -> Self {
        Container::Array(iter.into_iter().collect()).optimize()
    }
}

enum Iter<A, B, R> {
    Array(A),
    Bitset(B),
    Run(R),
}

impl<T, A, B, R> Iterator for Iter<A, B, R>
where
    A: Iterator<Item = T>,
    B: Iterator<Item = T>,
    R: Iterator<Item = T>,
{
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Iter::Array(iter) => iter.next(),
            Iter::Bitset(iter) => iter.next(),
            Iter::Run(iter) => iter.next(),
        }
    }
}
