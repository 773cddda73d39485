//! Chunkset implements the adaptive container layer of a [Roaring](https://roaringbitmap.org/)-style
//! compressed bitmap index. A container holds one 16-bit "chunk" of a larger sparse
//! integer set (the values sharing a high-bit prefix) in whichever of three
//! physical encodings is smallest:
//!
//! - **Array**: a sorted list of `u16` values, best for sparse sets.
//! - **Bitset**: a fixed 65536-bit vector, best for dense sets.
//! - **Run**: a sorted list of disjoint inclusive ranges, best for clustered sets.
//!
//! [`Container::optimize`] is the conversion engine: after a batch of mutations it
//! estimates the serialized size of each candidate encoding and rewrites the
//! container into the smallest one, moving ownership so the consumed
//! representation can never be reused.

use thiserror::Error;

mod container;
mod convert;
mod count;

#[cfg(test)]
mod testutil;

pub use container::{
    Container, ContainerKind,
    array::{ARRAY_MAX_CARDINALITY, ArrayContainer},
    bitset::BitsetContainer,
    run::{Run, RunContainer},
};

/// Validation failures for externally supplied run sequences.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RunsErr {
    #[error("run extends past the 16-bit universe")]
    OutOfRange,

    #[error("runs must be sorted by start and disjoint")]
    Overlap,

    #[error("adjacent runs must be separated by at least one absent value")]
    Mergeable,
}
