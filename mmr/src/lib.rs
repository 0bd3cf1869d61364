#![deny(missing_docs)]

//! Append-only Merkle Mountain Range accumulator for merge-mined share chains.
//!
//! The accumulator commits an ever-growing, ordered sequence of share hashes
//! into a single 32-byte digest. Only the roots of the currently-open perfect
//! subtrees (the "peaks") and the total leaf count are kept, so appending a
//! leaf costs O(1) hash combinations amortized and reducing the whole range
//! to one digest costs O(log n).

#[macro_use]
mod serialization;

mod accumulator;
mod errors;
mod hash;
mod hasher;

pub use self::accumulator::MmrAccumulator;
pub use self::errors::MmrError;
pub use self::hash::Hash;
pub use self::hasher::merge_hash;
