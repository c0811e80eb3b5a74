#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that enumerates every elimination order of a fixed length.

use exvs_cost_core::{EliminationSequence, UnitSlot};

/// Number of sequences [`generate`] produces for the provided length.
#[must_use]
pub fn sequence_count(max_length: usize) -> usize {
    1usize << max_length
}

/// Enumerates all `2^max_length` elimination sequences of exactly `max_length` steps.
///
/// Sequence `i` eliminates unit `B` at position `j` when bit `j` of `i` is set
/// and unit `A` otherwise, so index zero is the all-`A` order. The ordering is
/// stable across calls.
#[must_use]
pub fn generate(max_length: usize) -> Vec<EliminationSequence> {
    (0..sequence_count(max_length))
        .map(|index| sequence_at(index, max_length))
        .collect()
}

fn sequence_at(index: usize, length: usize) -> EliminationSequence {
    (0..length)
        .map(|position| {
            if index & (1 << position) == 0 {
                UnitSlot::A
            } else {
                UnitSlot::B
            }
        })
        .collect()
}
