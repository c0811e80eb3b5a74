#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that summarises batches of evaluated sequences.

use exvs_cost_core::{
    AggregateStatistics, Annotation, CountRange, EvaluatedSequence, HealthSummary,
};

/// Computes batch statistics, or `None` for an empty batch.
#[must_use]
pub fn aggregate(evaluated: &[EvaluatedSequence]) -> Option<AggregateStatistics> {
    let total_effective_health = health_summary(evaluated)?;
    let overdraft_count = count_range(evaluated, |entry| entry.overdraft_count)?;
    let step_count = count_range(evaluated, EvaluatedSequence::step_count)?;

    let eligible = || {
        evaluated
            .iter()
            .filter(|entry| entry.can_reach_special_threshold)
    };

    Some(AggregateStatistics {
        total_effective_health,
        overdraft_count,
        step_count,
        special_eligible_count: eligible().count(),
        total_sequences: evaluated.len(),
        special_eligible_max_health: eligible()
            .map(|entry| entry.total_effective_health)
            .max(),
    })
}

/// Tags `sequence` with the dimensions along which it stands out in its batch.
///
/// Nothing is reported for single-sequence batches or along dimensions where
/// every sequence in the batch shares the same value.
#[must_use]
pub fn annotate(sequence: &EvaluatedSequence, stats: &AggregateStatistics) -> Vec<Annotation> {
    let mut annotations = Vec::new();
    if stats.total_sequences <= 1 {
        return annotations;
    }

    let health = stats.total_effective_health;
    if health.max != health.min {
        if sequence.total_effective_health == health.max {
            annotations.push(Annotation::HighestTotalHealth);
        }
        if sequence.total_effective_health == health.min {
            annotations.push(Annotation::LowestTotalHealth);
        }
    }

    let overdrafts = stats.overdraft_count;
    if overdrafts.max != overdrafts.min && sequence.overdraft_count == overdrafts.min {
        annotations.push(Annotation::FewestOverdrafts);
    }

    let steps = stats.step_count;
    if steps.max != steps.min && sequence.step_count() == steps.max {
        annotations.push(Annotation::LongestSurviving);
    }

    if sequence.can_reach_special_threshold
        && stats.special_eligible_count > 1
        && stats.special_eligible_max_health == Some(sequence.total_effective_health)
    {
        annotations.push(Annotation::HighestSpecialEligibleHealth);
    }

    annotations
}

fn health_summary(evaluated: &[EvaluatedSequence]) -> Option<HealthSummary> {
    let values = || evaluated.iter().map(|entry| entry.total_effective_health);
    let max = values().max()?;
    let min = values().min()?;

    let count = evaluated.len() as u64;
    let sum: u64 = values().map(u64::from).sum();
    let average = u32::try_from((sum + count / 2) / count).unwrap_or(max);

    Some(HealthSummary { max, min, average })
}

fn count_range<F>(evaluated: &[EvaluatedSequence], metric: F) -> Option<CountRange>
where
    F: Fn(&EvaluatedSequence) -> usize,
{
    let max = evaluated.iter().map(&metric).max()?;
    let min = evaluated.iter().map(&metric).min()?;
    Some(CountRange { max, min })
}
