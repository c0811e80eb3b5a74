#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that derives per-sequence metrics from simulated traces.

use exvs_cost_core::{
    BattleStep, EliminationSequence, EvaluatedSequence, Formation, RespawnLookup,
};
use exvs_cost_system_battle_simulation::simulate;
use exvs_cost_system_pattern_generation::generate;

/// Enumerates, simulates and evaluates every elimination sequence of `formation`.
///
/// The sequence length follows the formation's revival flags. Results keep the
/// generation order. An incomplete formation yields no results.
#[must_use]
pub fn evaluate<L>(formation: &Formation, table: &L) -> Vec<EvaluatedSequence>
where
    L: RespawnLookup + ?Sized,
{
    if !formation.is_complete() {
        return Vec::new();
    }

    let sequences = generate(formation.max_sequence_length());
    tracing::debug!(
        sequences = sequences.len(),
        revivals = formation.revival_count(),
        "evaluating elimination sequences"
    );

    sequences
        .into_iter()
        .filter_map(|sequence| {
            let trace = simulate(&sequence, formation, table);
            evaluate_trace(sequence, trace, formation)
        })
        .collect()
}

/// Derives the metrics of one already simulated trace.
///
/// Returns `None` for an incomplete formation.
#[must_use]
pub fn evaluate_trace(
    sequence: EliminationSequence,
    trace: Vec<BattleStep>,
    formation: &Formation,
) -> Option<EvaluatedSequence> {
    let (unit_a, unit_b) = formation.units()?;
    let surviving = || trace.iter().take_while(|step| !step.is_team_defeated);

    let starting_health = unit_a.health() + unit_b.health();
    let respawned: u32 = surviving().map(|step| step.respawn_health).sum();
    let overdraft_count = trace.iter().filter(|step| step.is_overdraft).count();
    let can_reach_special_threshold = formation
        .special_threshold()
        .is_some_and(|threshold| surviving().any(|step| step.remaining_cost <= threshold));

    Some(EvaluatedSequence {
        sequence,
        trace,
        total_effective_health: starting_health + respawned,
        overdraft_count,
        can_reach_special_threshold,
        fails_to_reach_special_threshold: !can_reach_special_threshold,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use exvs_cost_core::{CostTier, UnitConfig, UnitSlot};

    fn step(index: usize, remaining: i32, respawn: u32) -> BattleStep {
        BattleStep {
            step_index: index,
            eliminated: UnitSlot::A,
            remaining_cost: remaining,
            is_overdraft: false,
            respawn_health: respawn,
            is_team_defeated: remaining <= 0,
            is_special_revival: false,
        }
    }

    fn pair() -> Formation {
        Formation::pair(
            UnitConfig::new(CostTier::C2000, 600),
            UnitConfig::new(CostTier::C2000, 600),
        )
    }

    #[test]
    fn totals_stop_at_defeat() {
        let trace = vec![step(0, 4_000, 600), step(1, 2_000, 600), step(2, 0, 0)];
        let evaluated = evaluate_trace("AAA".parse().expect("sequence"), trace, &pair())
            .expect("complete formation");

        assert_eq!(evaluated.total_effective_health, 2_400);
        assert_eq!(evaluated.step_count(), 3);
    }

    #[test]
    fn threshold_ignores_defeat_step() {
        let trace = vec![step(0, 4_000, 600), step(1, 0, 0)];
        let evaluated = evaluate_trace("AA".parse().expect("sequence"), trace, &pair())
            .expect("complete formation");

        assert!(!evaluated.can_reach_special_threshold);
        assert!(evaluated.fails_to_reach_special_threshold);
    }

    #[test]
    fn threshold_is_inclusive() {
        let trace = vec![step(0, 4_000, 600), step(1, 2_000, 600)];
        let evaluated = evaluate_trace("AA".parse().expect("sequence"), trace, &pair())
            .expect("complete formation");

        assert!(evaluated.can_reach_special_threshold);
        assert!(!evaluated.fails_to_reach_special_threshold);
    }

    #[test]
    fn incomplete_formation_evaluates_nothing() {
        struct Unused;
        impl RespawnLookup for Unused {
            fn lookup(&self, _: CostTier, _: u32, _: i32) -> Option<u32> {
                panic!("lookup must not run for incomplete formations");
            }
        }

        let formation = Formation::new(None, Some(UnitConfig::new(CostTier::C3000, 800)));
        assert!(evaluate(&formation, &Unused).is_empty());
        assert!(evaluate(&Formation::default(), &Unused).is_empty());
    }

    #[test]
    fn incomplete_formation_has_no_trace_evaluation() {
        let formation = Formation::new(Some(UnitConfig::new(CostTier::C3000, 800)), None);
        let evaluated = evaluate_trace("AA".parse().expect("sequence"), Vec::new(), &formation);

        assert_eq!(evaluated, None);
    }
}
