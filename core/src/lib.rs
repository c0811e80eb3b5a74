#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the EXVS2 team-cost calculator.
//!
//! This crate defines the data model that connects the static catalog, the
//! pure calculation systems and the adapters. A caller builds a [`Formation`]
//! from two [`UnitConfig`] values, the systems enumerate every
//! [`EliminationSequence`], replay each one into a trace of [`BattleStep`]
//! records and derive an [`EvaluatedSequence`] per trace. Batches of evaluated
//! sequences are summarised by [`AggregateStatistics`] and tagged with
//! [`Annotation`] labels. Respawn health is sourced through the
//! [`RespawnLookup`] seam so the calculation logic never owns its data.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Team-shared cost pool available at the start of every match.
pub const TEAM_COST_POOL: i32 = 6_000;

/// Health a unit re-enters with when it consumes its special revival.
pub const SPECIAL_REVIVAL_HEALTH: u32 = 100;

/// Elimination sequence length before any revival slots are added.
pub const BASE_SEQUENCE_LENGTH: usize = 4;

/// Nominal cost tiers a unit may belong to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum CostTier {
    /// Units costing 1500.
    C1500,
    /// Units costing 2000.
    C2000,
    /// Units costing 2500.
    C2500,
    /// Units costing 3000.
    C3000,
}

impl CostTier {
    /// Every tier in ascending cost order.
    pub const ALL: [CostTier; 4] = [
        CostTier::C1500,
        CostTier::C2000,
        CostTier::C2500,
        CostTier::C3000,
    ];

    /// Nominal cost deducted from the team pool when the unit is eliminated.
    #[must_use]
    pub const fn value(self) -> i32 {
        match self {
            CostTier::C1500 => 1_500,
            CostTier::C2000 => 2_000,
            CostTier::C2500 => 2_500,
            CostTier::C3000 => 3_000,
        }
    }

    /// Resolves the tier matching the provided nominal cost.
    #[must_use]
    pub fn from_value(value: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|tier| tier.value() == value)
    }
}

impl fmt::Display for CostTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl From<CostTier> for u32 {
    fn from(tier: CostTier) -> Self {
        tier.value().unsigned_abs()
    }
}

impl TryFrom<u32> for CostTier {
    type Error = UnknownCostTier;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        i32::try_from(value)
            .ok()
            .and_then(CostTier::from_value)
            .ok_or(UnknownCostTier(value))
    }
}

/// Reports a nominal cost that does not belong to any tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("cost {0} is not a valid cost tier")]
pub struct UnknownCostTier(pub u32);

/// Identifies one of the two slots of a formation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UnitSlot {
    /// First unit of the team.
    A,
    /// Second unit of the team.
    B,
}

impl UnitSlot {
    /// Both slots in canonical order.
    pub const ALL: [UnitSlot; 2] = [UnitSlot::A, UnitSlot::B];

    /// Single-character label used in sequence strings.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            UnitSlot::A => 'A',
            UnitSlot::B => 'B',
        }
    }
}

impl fmt::Display for UnitSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Static description of a single unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitConfig {
    cost: CostTier,
    health: u32,
    #[serde(default)]
    special_revival: bool,
}

impl UnitConfig {
    /// Creates a unit without a special revival.
    #[must_use]
    pub const fn new(cost: CostTier, health: u32) -> Self {
        Self {
            cost,
            health,
            special_revival: false,
        }
    }

    /// Returns a copy of the unit with the special revival flag set as requested.
    #[must_use]
    pub const fn with_special_revival(self, special_revival: bool) -> Self {
        Self {
            special_revival,
            ..self
        }
    }

    /// Cost tier of the unit.
    #[must_use]
    pub const fn cost(&self) -> CostTier {
        self.cost
    }

    /// Nominal health of the unit.
    #[must_use]
    pub const fn health(&self) -> u32 {
        self.health
    }

    /// Whether the unit may re-enter once after the pool is exhausted.
    #[must_use]
    pub const fn special_revival(&self) -> bool {
        self.special_revival
    }
}

/// Two-slot team, either slot of which may still be unfilled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Formation {
    unit_a: Option<UnitConfig>,
    unit_b: Option<UnitConfig>,
}

impl Formation {
    /// Creates a formation from two optional slots.
    #[must_use]
    pub const fn new(unit_a: Option<UnitConfig>, unit_b: Option<UnitConfig>) -> Self {
        Self { unit_a, unit_b }
    }

    /// Creates a complete formation.
    #[must_use]
    pub const fn pair(unit_a: UnitConfig, unit_b: UnitConfig) -> Self {
        Self::new(Some(unit_a), Some(unit_b))
    }

    /// Unit occupying the requested slot, if any.
    #[must_use]
    pub fn unit(&self, slot: UnitSlot) -> Option<&UnitConfig> {
        match slot {
            UnitSlot::A => self.unit_a.as_ref(),
            UnitSlot::B => self.unit_b.as_ref(),
        }
    }

    /// Both units when the formation is complete.
    #[must_use]
    pub fn units(&self) -> Option<(&UnitConfig, &UnitConfig)> {
        Some((self.unit_a.as_ref()?, self.unit_b.as_ref()?))
    }

    /// Whether both slots are filled.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.units().is_some()
    }

    /// Number of filled slots whose unit carries a special revival.
    #[must_use]
    pub fn revival_count(&self) -> usize {
        UnitSlot::ALL
            .into_iter()
            .filter_map(|slot| self.unit(slot))
            .filter(|unit| unit.special_revival())
            .count()
    }

    /// Length of the elimination sequences enumerated for this formation.
    #[must_use]
    pub fn max_sequence_length(&self) -> usize {
        BASE_SEQUENCE_LENGTH + self.revival_count()
    }

    /// Pool level at or below which either unit's elimination ends the match.
    #[must_use]
    pub fn special_threshold(&self) -> Option<i32> {
        let (unit_a, unit_b) = self.units()?;
        Some(unit_a.cost().value().min(unit_b.cost().value()))
    }

    /// Slot holding the strictly more expensive unit, if the costs differ.
    #[must_use]
    pub fn higher_cost_slot(&self) -> Option<UnitSlot> {
        let (unit_a, unit_b) = self.units()?;
        match unit_a.cost().cmp(&unit_b.cost()) {
            std::cmp::Ordering::Greater => Some(UnitSlot::A),
            std::cmp::Ordering::Less => Some(UnitSlot::B),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// Ordered list of the units eliminated at each step.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct EliminationSequence(Vec<UnitSlot>);

impl EliminationSequence {
    /// Eliminations in order.
    #[must_use]
    pub fn as_slice(&self) -> &[UnitSlot] {
        &self.0
    }

    /// Number of eliminations in the sequence.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the sequence contains no eliminations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the eliminations in order.
    pub fn iter(&self) -> impl Iterator<Item = UnitSlot> + '_ {
        self.0.iter().copied()
    }

    /// First unit eliminated, if any.
    #[must_use]
    pub fn first(&self) -> Option<UnitSlot> {
        self.0.first().copied()
    }
}

impl FromIterator<UnitSlot> for EliminationSequence {
    fn from_iter<I: IntoIterator<Item = UnitSlot>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for EliminationSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for slot in &self.0 {
            write!(f, "{slot}")?;
        }
        Ok(())
    }
}

impl FromStr for EliminationSequence {
    type Err = SequenceParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(SequenceParseError::Empty);
        }

        trimmed
            .chars()
            .enumerate()
            .map(|(position, found)| match found.to_ascii_uppercase() {
                'A' => Ok(UnitSlot::A),
                'B' => Ok(UnitSlot::B),
                _ => Err(SequenceParseError::InvalidUnit { position, found }),
            })
            .collect()
    }
}

impl From<EliminationSequence> for String {
    fn from(sequence: EliminationSequence) -> Self {
        sequence.to_string()
    }
}

impl TryFrom<String> for EliminationSequence {
    type Error = SequenceParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Errors produced while parsing an [`EliminationSequence`] from text.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SequenceParseError {
    /// The provided text contained no eliminations.
    #[error("elimination sequence is empty")]
    Empty,
    /// A character other than `A` or `B` was found.
    #[error("unexpected unit '{found}' at position {position}; expected 'A' or 'B'")]
    InvalidUnit {
        /// Zero-based index of the offending character.
        position: usize,
        /// Character that could not be interpreted.
        found: char,
    },
}

/// One elimination replayed against the team cost pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BattleStep {
    /// Zero-based position of the step in the sequence.
    pub step_index: usize,
    /// Unit eliminated at this step.
    pub eliminated: UnitSlot,
    /// Team cost pool left after deducting the eliminated unit's cost.
    pub remaining_cost: i32,
    /// The unit re-entered with less pool left than its own cost.
    pub is_overdraft: bool,
    /// Health the unit re-enters with, zero on defeat.
    pub respawn_health: u32,
    /// The pool was exhausted and the match ended.
    pub is_team_defeated: bool,
    /// The unit re-entered through its one-time special revival.
    pub is_special_revival: bool,
}

/// Metrics derived from one simulated elimination sequence.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EvaluatedSequence {
    /// Generated elimination order.
    pub sequence: EliminationSequence,
    /// Simulated trace, truncated at the first defeat.
    pub trace: Vec<BattleStep>,
    /// Starting health of both units plus every non-defeat respawn health.
    pub total_effective_health: u32,
    /// Number of steps that respawned in overdraft.
    pub overdraft_count: usize,
    /// Some non-defeat step left the pool at or below the special threshold.
    pub can_reach_special_threshold: bool,
    /// Negation of `can_reach_special_threshold`.
    pub fails_to_reach_special_threshold: bool,
}

impl EvaluatedSequence {
    /// Elimination order actually executed before the match ended.
    #[must_use]
    pub fn realized_order(&self) -> EliminationSequence {
        self.trace.iter().map(|step| step.eliminated).collect()
    }

    /// Number of steps in the simulated trace.
    #[must_use]
    pub fn step_count(&self) -> usize {
        self.trace.len()
    }
}

/// Maximum, minimum and rounded average of a health metric.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HealthSummary {
    /// Largest observed value.
    pub max: u32,
    /// Smallest observed value.
    pub min: u32,
    /// Average rounded to the nearest integer.
    pub average: u32,
}

/// Maximum and minimum of a count metric.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CountRange {
    /// Largest observed count.
    pub max: usize,
    /// Smallest observed count.
    pub min: usize,
}

/// Summary of a batch of evaluated sequences.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AggregateStatistics {
    /// Total effective health across the batch.
    pub total_effective_health: HealthSummary,
    /// Overdraft counts across the batch.
    pub overdraft_count: CountRange,
    /// Trace lengths across the batch.
    pub step_count: CountRange,
    /// Number of sequences able to reach the special threshold.
    pub special_eligible_count: usize,
    /// Number of sequences in the batch.
    pub total_sequences: usize,
    /// Highest total health among special-eligible sequences.
    pub special_eligible_max_health: Option<u32>,
}

/// Qualitative tag attached to a sequence that stands out within its batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Annotation {
    /// Sequence reaches the batch maximum total health.
    HighestTotalHealth,
    /// Sequence sits at the batch minimum total health.
    LowestTotalHealth,
    /// Sequence has the fewest overdrafts.
    FewestOverdrafts,
    /// Sequence survives the most steps.
    LongestSurviving,
    /// Sequence has the highest health among special-eligible sequences.
    HighestSpecialEligibleHealth,
}

impl Annotation {
    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Annotation::HighestTotalHealth => "highest total health",
            Annotation::LowestTotalHealth => "lowest total health",
            Annotation::FewestOverdrafts => "fewest overdrafts",
            Annotation::LongestSurviving => "longest surviving",
            Annotation::HighestSpecialEligibleHealth => "highest health among special-eligible",
        }
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Read-only source of respawn health values.
///
/// Implementations answer for the unit's cost tier, its nominal health and the
/// team pool left after its elimination. `None` signals that the data holds no
/// entry for the triple; callers decide how to degrade.
pub trait RespawnLookup {
    /// Health the unit re-enters with for the given remaining pool.
    fn lookup(&self, cost: CostTier, health: u32, remaining: i32) -> Option<u32>;
}
