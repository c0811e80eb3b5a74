#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that runs the full calculation pipeline for one formation.

use exvs_cost_core::{
    AggregateStatistics, Annotation, EvaluatedSequence, Formation, RespawnLookup,
};
use exvs_cost_system_pattern_evaluation::evaluate;
use exvs_cost_system_ranking::top_sequences;
use exvs_cost_system_statistics::{aggregate, annotate};
use serde::Serialize;

/// Ranked sequence together with the tags it earned within the full batch.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct RankedSequence {
    /// Evaluated sequence.
    pub evaluated: EvaluatedSequence,
    /// Dimensions along which the sequence stands out.
    pub annotations: Vec<Annotation>,
}

/// Outcome of the pipeline for one formation.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Report {
    /// Formation the report was computed for.
    pub formation: Formation,
    /// Number of sequences evaluated before ranking.
    pub evaluated_count: usize,
    /// Distinct outcomes in ranked order.
    pub ranked: Vec<RankedSequence>,
    /// Statistics over every evaluated sequence, absent when nothing was evaluated.
    pub statistics: Option<AggregateStatistics>,
}

impl Report {
    /// Whether the report holds no outcomes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }
}

/// Evaluates, ranks, aggregates and annotates the outcomes of `formation`.
///
/// Statistics and annotations are computed against the whole evaluated batch,
/// not only the entries that survive ranking. `limit` caps the ranked list.
#[must_use]
pub fn build_report<L>(formation: &Formation, table: &L, limit: Option<usize>) -> Report
where
    L: RespawnLookup + ?Sized,
{
    let evaluated = evaluate(formation, table);
    let statistics = aggregate(&evaluated);
    let ranked = top_sequences(&evaluated, Some(formation), limit);

    tracing::debug!(
        evaluated = evaluated.len(),
        ranked = ranked.len(),
        "built formation report"
    );

    let ranked = ranked
        .into_iter()
        .map(|entry| {
            let annotations = statistics
                .as_ref()
                .map(|stats| annotate(&entry, stats))
                .unwrap_or_default();
            RankedSequence {
                evaluated: entry,
                annotations,
            }
        })
        .collect();

    Report {
        formation: *formation,
        evaluated_count: evaluated.len(),
        ranked,
        statistics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exvs_cost_catalog::RespawnTable;
    use exvs_cost_core::{CostTier, UnitConfig};

    #[test]
    fn incomplete_formation_yields_empty_report() {
        let formation = Formation::new(None, Some(UnitConfig::new(CostTier::C2000, 600)));
        let report = build_report(&formation, &RespawnTable::standard(), None);

        assert!(report.is_empty());
        assert_eq!(report.evaluated_count, 0);
        assert_eq!(report.statistics, None);
    }

    #[test]
    fn statistics_cover_full_batch() {
        let formation = Formation::pair(
            UnitConfig::new(CostTier::C3000, 720),
            UnitConfig::new(CostTier::C3000, 720),
        );
        let report = build_report(&formation, &RespawnTable::standard(), Some(1));

        assert_eq!(report.ranked.len(), 1);
        assert_eq!(report.evaluated_count, 16);
        let stats = report.statistics.expect("complete formation");
        assert_eq!(stats.total_sequences, 16);
    }
}
