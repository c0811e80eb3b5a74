#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that replays an elimination sequence against the team cost pool.

use exvs_cost_core::{
    BattleStep, EliminationSequence, Formation, RespawnLookup, UnitConfig, UnitSlot,
    SPECIAL_REVIVAL_HEALTH, TEAM_COST_POOL,
};

/// Replays `sequence` against `formation` and returns the per-step trace.
///
/// Each elimination deducts the unit's nominal cost from the shared pool. A
/// unit eliminated with the pool still at or above its cost re-enters at full
/// health; below that it re-enters with the overdraft value from `table`.
/// Once the pool is exhausted the match ends unless the eliminated unit still
/// holds its special revival, which is consumed for a single re-entry at
/// [`SPECIAL_REVIVAL_HEALTH`]. The trace stops at the first defeat step.
///
/// An incomplete formation yields an empty trace. Missing table entries fall
/// back to the unit's nominal health and emit a warning.
#[must_use]
pub fn simulate<L>(
    sequence: &EliminationSequence,
    formation: &Formation,
    table: &L,
) -> Vec<BattleStep>
where
    L: RespawnLookup + ?Sized,
{
    let Some((unit_a, unit_b)) = formation.units() else {
        return Vec::new();
    };

    let mut remaining = TEAM_COST_POOL;
    let mut revival_ready = RevivalState::new(unit_a, unit_b);
    let mut trace = Vec::with_capacity(sequence.len());

    for (step_index, eliminated) in sequence.iter().enumerate() {
        let unit = match eliminated {
            UnitSlot::A => unit_a,
            UnitSlot::B => unit_b,
        };
        let cost = unit.cost().value();
        remaining -= cost;

        let step = if remaining <= 0 {
            let is_special_revival = revival_ready.consume(eliminated);
            BattleStep {
                step_index,
                eliminated,
                remaining_cost: remaining,
                is_overdraft: false,
                respawn_health: if is_special_revival {
                    SPECIAL_REVIVAL_HEALTH
                } else {
                    0
                },
                is_team_defeated: !is_special_revival,
                is_special_revival,
            }
        } else {
            BattleStep {
                step_index,
                eliminated,
                remaining_cost: remaining,
                is_overdraft: remaining < cost,
                respawn_health: respawn_health(unit, remaining, table),
                is_team_defeated: false,
                is_special_revival: false,
            }
        };

        trace.push(step);
        if step.is_team_defeated {
            break;
        }
    }

    trace
}

fn respawn_health<L>(unit: &UnitConfig, remaining: i32, table: &L) -> u32
where
    L: RespawnLookup + ?Sized,
{
    if remaining >= unit.cost().value() {
        return unit.health();
    }

    match table.lookup(unit.cost(), unit.health(), remaining) {
        Some(health) => health,
        None => {
            tracing::warn!(
                cost = unit.cost().value(),
                health = unit.health(),
                remaining,
                "respawn table has no entry; falling back to nominal health"
            );
            unit.health()
        }
    }
}

#[derive(Debug)]
struct RevivalState {
    a: bool,
    b: bool,
}

impl RevivalState {
    fn new(unit_a: &UnitConfig, unit_b: &UnitConfig) -> Self {
        Self {
            a: unit_a.special_revival(),
            b: unit_b.special_revival(),
        }
    }

    /// Spends the slot's revival, returning whether one was available.
    fn consume(&mut self, slot: UnitSlot) -> bool {
        let ready = match slot {
            UnitSlot::A => &mut self.a,
            UnitSlot::B => &mut self.b,
        };
        std::mem::replace(ready, false)
    }
}
