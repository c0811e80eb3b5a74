#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that ranks evaluated sequences and removes behavioural duplicates.

use std::{cmp::Ordering, collections::HashSet};

use exvs_cost_core::{EvaluatedSequence, Formation, UnitSlot};

/// Ranks `evaluated` and keeps the best sequence per realized elimination order.
///
/// When `formation` pairs units of different cost, sequences that eliminate the
/// more expensive unit first rank ahead of the rest. Remaining ties are broken
/// by total effective health, highest first, and then by input order. Sequences
/// whose traces ended identically collapse onto the highest ranked one. At most
/// `limit` entries are returned when a limit is provided.
#[must_use]
pub fn top_sequences(
    evaluated: &[EvaluatedSequence],
    formation: Option<&Formation>,
    limit: Option<usize>,
) -> Vec<EvaluatedSequence> {
    let preferred_first = formation.and_then(Formation::higher_cost_slot);
    let limit = limit.unwrap_or(usize::MAX);

    let mut ordered: Vec<&EvaluatedSequence> = evaluated.iter().collect();
    ordered.sort_by(|left, right| compare(left, right, preferred_first));

    let mut seen = HashSet::new();
    let mut accepted = Vec::new();
    for candidate in ordered {
        if accepted.len() >= limit {
            break;
        }
        if seen.insert(candidate.realized_order()) {
            accepted.push(candidate.clone());
        }
    }

    accepted
}

fn compare(
    left: &EvaluatedSequence,
    right: &EvaluatedSequence,
    preferred_first: Option<UnitSlot>,
) -> Ordering {
    let fairness = match preferred_first {
        Some(slot) => opens_with(right, slot).cmp(&opens_with(left, slot)),
        None => Ordering::Equal,
    };

    fairness.then_with(|| {
        right
            .total_effective_health
            .cmp(&left.total_effective_health)
    })
}

fn opens_with(evaluated: &EvaluatedSequence, slot: UnitSlot) -> bool {
    evaluated.sequence.first() == Some(slot)
}
